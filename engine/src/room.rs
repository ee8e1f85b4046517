use serde::{Deserialize, Serialize};

/// Index into the fixed room list. Room 0 is always the starting room.
pub type RoomId = usize;

/// A vertex of the maze with its gameplay attributes.
#[derive(Debug, Clone)]
pub struct Room {
    pub name: String,
    pub description: String,
    pub is_exit: bool,
    pub is_trap: bool,
    pub riddle: Option<String>,
    solved: bool,
}

impl Room {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        is_exit: bool,
        is_trap: bool,
        riddle: Option<String>,
    ) -> Self {
        let solved = riddle.is_none();
        Self {
            name: name.into(),
            description: description.into(),
            is_exit,
            is_trap,
            riddle,
            solved,
        }
    }

    /// Whether the room's gate is open. Rooms without a riddle start solved.
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Idempotent; `solved` never reverts to false.
    pub fn mark_solved(&mut self) {
        self.solved = true;
    }
}

/// Room shape in a maze definition file. Trap flags are not part of the
/// file; they are drawn from the seeded RNG when the maze is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDef {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub riddle: Option<String>,
    #[serde(default)]
    pub exit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solved_starts_true_without_riddle() {
        let room = Room::new("Void Atrium", "The air hums.", false, false, None);
        assert!(room.is_solved());
    }

    #[test]
    fn test_solved_starts_false_with_riddle() {
        let mut room = Room::new(
            "Gravity Sink",
            "The floor tilts.",
            false,
            false,
            Some("What am I?".to_string()),
        );
        assert!(!room.is_solved());
        room.mark_solved();
        assert!(room.is_solved());
        // Idempotent
        room.mark_solved();
        assert!(room.is_solved());
    }
}
