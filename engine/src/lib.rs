//! Escape-the-maze game engine: a small dynamic graph of rooms that is
//! periodically re-randomized, riddle-gated room transitions, a DFS path
//! finder, and the two schedulers (maze shift, countdown) that drive a
//! game to one of its terminal states. The presentation layer is an
//! external collaborator behind the [`ui::GameUi`] trait.

mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod maze;
pub mod pathfind;
pub mod riddle;
pub mod room;
pub mod state;
pub mod ui;


pub use config::MazeDef;
pub use engine::{BlockReason, Engine, Transition};
pub use error::EngineError;
pub use maze::MazeGraph;
pub use pathfind::find_path_to_exit;
pub use riddle::{RiddleRule, RiddleTable};
pub use room::{Room, RoomDef, RoomId};
pub use state::{GameState, Outcome};
pub use ui::{GameUi, MinimapRow, RoomView};
