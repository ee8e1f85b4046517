use thiserror::Error;

use crate::room::RoomId;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid maze definition: {0}")]
    InvalidMaze(String),

    #[error("malformed maze definition: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown room id {0}")]
    UnknownRoom(RoomId),

    #[error("room {0} is not adjacent to the current room")]
    NotAdjacent(RoomId),

    #[error("the game is already over")]
    GameOver,
}
