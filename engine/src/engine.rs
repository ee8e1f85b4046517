use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info};

use crate::config::MazeDef;
use crate::error::EngineError;
use crate::pathfind;
use crate::riddle::RiddleTable;
use crate::room::RoomId;
use crate::state::{GameState, Outcome};
use crate::ui::{GameUi, RoomView};

/// Why a room-entry attempt did not complete. The player stays where they
/// are and may retry later; neither case changes any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// The player declined to answer the riddle.
    Declined,
    /// The answer did not match.
    WrongAnswer,
}

/// Result of one room-entry attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Blocked(BlockReason),
    Trapped,
    Escaped,
    Moved { neighbors: Vec<RoomId> },
}

/// The room-transition engine. Owns the single lock every mutation
/// (transition, reshuffle, countdown tick) serializes on, the riddle
/// table, the presentation collaborator, and the terminal broadcast the
/// clock tasks and pending prompts watch. Cloning is cheap; clones share
/// the same game.
#[derive(Clone)]
pub struct Engine {
    pub(crate) state: Arc<Mutex<GameState>>,
    pub(crate) ui: Arc<dyn GameUi>,
    riddles: Arc<RiddleTable>,
    terminal: Arc<watch::Sender<bool>>,
}

impl Engine {
    pub fn new(def: &MazeDef, seed: u64, ui: Arc<dyn GameUi>) -> Result<Self, EngineError> {
        let state = GameState::new(def, seed)?;
        let (terminal, _) = watch::channel(false);
        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            ui,
            riddles: Arc::new(def.riddle_rules.clone()),
            terminal: Arc::new(terminal),
        })
    }

    /// Render the starting room.
    pub async fn start(&self) {
        let view = self.state.lock().await.view();
        self.ui.render_room(view).await;
    }

    /// Receiver that flips to true once the game reaches a terminal state
    /// (trap, exit, timeout) or `stop` is called.
    pub fn watch_terminal(&self) -> watch::Receiver<bool> {
        self.terminal.subscribe()
    }

    /// Make the schedulers and any pending riddle prompt inert.
    pub fn stop(&self) {
        let _ = self.terminal.send(true);
    }

    pub(crate) fn signal_terminal(&self) {
        let _ = self.terminal.send(true);
    }

    /// Attempt to enter `target`: riddle gate first, then the trap/exit
    /// terminal checks, then the move itself. The riddle prompt runs
    /// without the state lock and is raced against the terminal signal, so
    /// a timeout that lands mid-prompt wins and the attempt resolves as
    /// `GameOver`.
    pub async fn enter_room(&self, target: RoomId) -> Result<Transition, EngineError> {
        let gate = {
            let state = self.state.lock().await;
            if state.is_over() {
                return Err(EngineError::GameOver);
            }
            let room = state.room(target)?;
            if target != state.current && !state.graph().contains_edge(state.current, target) {
                return Err(EngineError::NotAdjacent(target));
            }
            if room.is_solved() {
                None
            } else {
                room.riddle.clone()
            }
        };

        if let Some(riddle) = gate {
            let mut terminal = self.terminal.subscribe();
            let answer = tokio::select! {
                answer = self.ui.prompt_riddle(&riddle) => answer,
                _ = terminal.wait_for(|done| *done) => {
                    debug!(room = target, "riddle prompt cancelled by terminal state");
                    return Err(EngineError::GameOver);
                }
            };
            let Some(answer) = answer else {
                self.ui.notify("No answer given. The way stays shut.").await;
                return Ok(Transition::Blocked(BlockReason::Declined));
            };
            if !self.riddles.check(&riddle, &answer) {
                self.ui.notify("Wrong answer! Try again later.").await;
                return Ok(Transition::Blocked(BlockReason::WrongAnswer));
            }
            {
                let mut state = self.state.lock().await;
                if state.is_over() {
                    return Err(EngineError::GameOver);
                }
                if state.solve_riddle(target) {
                    info!(room = target, score = state.score, "riddle solved");
                }
            }
            self.ui.notify("Correct! You earned 50 points.").await;
        }

        let (transition, view) = {
            let mut state = self.state.lock().await;
            if state.is_over() {
                return Err(EngineError::GameOver);
            }
            let room = state.room(target)?;
            if room.is_trap {
                state.finish(Outcome::Trapped);
                (Transition::Trapped, None)
            } else if room.is_exit {
                state.finish(Outcome::Escaped);
                (Transition::Escaped, None)
            } else {
                state.current = target;
                let neighbors = state.graph().neighbors_of(target);
                let view = state.view();
                (Transition::Moved { neighbors }, Some(view))
            }
        };

        match &transition {
            Transition::Trapped => {
                self.signal_terminal();
                self.ui
                    .notify("You stepped into a TRAP room! Game Over.")
                    .await;
            }
            Transition::Escaped => {
                self.signal_terminal();
                self.ui.notify("You found the EXIT! You're free!").await;
            }
            Transition::Moved { .. } => {
                if let Some(view) = view {
                    self.ui.render_room(view).await;
                }
            }
            Transition::Blocked(_) => {}
        }
        Ok(transition)
    }

    /// Depth-first search from the current room to the exit over a
    /// consistent snapshot (the search runs under the state lock), then
    /// hand the result to the presentation layer. `None` is a normal
    /// outcome, not an error: the next shift may reconnect the exit.
    pub async fn show_path(&self) -> Option<Vec<RoomId>> {
        let (path, names) = {
            let state = self.state.lock().await;
            let path = pathfind::find_path_to_exit(state.graph(), state.rooms(), state.current);
            let names = path.as_ref().map(|p| {
                p.iter()
                    .map(|&id| state.rooms()[id].name.clone())
                    .collect::<Vec<_>>()
            });
            (path, names)
        };
        self.ui.render_path(names).await;
        path
    }

    pub async fn view(&self) -> RoomView {
        self.state.lock().await.view()
    }

    pub async fn current_room(&self) -> RoomId {
        self.state.lock().await.current
    }

    pub async fn score(&self) -> u32 {
        self.state.lock().await.score
    }

    pub async fn time_left(&self) -> u32 {
        self.state.lock().await.time_left
    }

    pub async fn outcome(&self) -> Option<Outcome> {
        self.state.lock().await.outcome()
    }
}
