use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::riddle::RiddleTable;
use crate::room::{Room, RoomDef};

fn default_trap_chance() -> f64 {
    0.2
}

fn default_time_limit() -> u32 {
    30
}

fn default_shift_interval() -> u64 {
    30
}

/// Static description of a maze: the room list plus the tuning constants.
/// `Default` is the built-in ten-room maze; a custom one can be loaded
/// from JSON. Trap flags are not part of the definition — they are drawn
/// per game from the seeded RNG, skipping the start and exit rooms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeDef {
    pub rooms: Vec<RoomDef>,

    #[serde(default)]
    pub riddle_rules: RiddleTable,

    #[serde(default = "default_trap_chance")]
    pub trap_chance: f64,

    /// Starting time budget in seconds.
    #[serde(default = "default_time_limit")]
    pub time_limit: u32,

    /// Seconds between maze shifts.
    #[serde(default = "default_shift_interval")]
    pub shift_interval_secs: u64,
}

impl MazeDef {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let def: Self = serde_json::from_str(json)?;
        def.validate()?;
        Ok(def)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.rooms.len() < 2 {
            return Err(EngineError::InvalidMaze(format!(
                "need at least 2 rooms, got {}",
                self.rooms.len()
            )));
        }
        let exits = self.rooms.iter().filter(|r| r.exit).count();
        if exits != 1 {
            return Err(EngineError::InvalidMaze(format!(
                "exactly one exit room required, got {}",
                exits
            )));
        }
        if self.rooms[0].exit {
            return Err(EngineError::InvalidMaze(
                "the starting room cannot be the exit".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.trap_chance) {
            return Err(EngineError::InvalidMaze(format!(
                "trap_chance must be within 0..=1, got {}",
                self.trap_chance
            )));
        }
        if self.time_limit == 0 {
            return Err(EngineError::InvalidMaze(
                "time_limit must be at least 1 second".to_string(),
            ));
        }
        // A zero period would panic tokio's interval timer.
        if self.shift_interval_secs == 0 {
            return Err(EngineError::InvalidMaze(
                "shift_interval_secs must be at least 1 second".to_string(),
            ));
        }
        let mut names = HashSet::new();
        if let Some(dup) = self.rooms.iter().find(|r| !names.insert(r.name.as_str())) {
            return Err(EngineError::InvalidMaze(format!(
                "duplicate room name {:?}",
                dup.name
            )));
        }
        Ok(())
    }

    /// Instantiate the rooms, drawing trap flags. The start room and the
    /// exit room never trap.
    pub fn build_rooms(&self, rng: &mut StdRng) -> Vec<Room> {
        self.rooms
            .iter()
            .enumerate()
            .map(|(i, def)| {
                let is_trap = i != 0 && !def.exit && rng.gen_bool(self.trap_chance);
                Room::new(
                    def.name.clone(),
                    def.description.clone(),
                    def.exit,
                    is_trap,
                    def.riddle.clone(),
                )
            })
            .collect()
    }
}

impl Default for MazeDef {
    fn default() -> Self {
        let sphinx =
            "What walks on four legs in the morning, two at noon and three in the evening?";
        let echo = "I speak without a mouth and hear without ears. What am I?";
        let rooms = vec![
            room("Hall of Whispers", "You hear whispers echoing in reverse.", None, false),
            room(
                "Gravity Sink",
                "The floor tilts toward an endless black pit.",
                Some(sphinx),
                false,
            ),
            room("Void Atrium", "The air hums with invisible voices.", None, false),
            room("Lava Lounge", "Walls drip lava, yet it's cold.", None, false),
            room(
                "Screaming Spiral",
                "Spirals dance across your eyes.",
                Some(echo),
                false,
            ),
            room("Cloud Hallway", "Everything feels upside down.", None, false),
            room("Illusion Room", "The walls breathe slightly.", None, false),
            room("Blink Chamber", "The lights blink with your heartbeat.", None, false),
            room("Infinity Cube", "You see infinite versions of yourself.", None, false),
            room("Exit Chamber", "A soft light glows at the far end.", None, true),
        ];
        Self {
            rooms,
            riddle_rules: RiddleTable::default(),
            trap_chance: default_trap_chance(),
            time_limit: default_time_limit(),
            shift_interval_secs: default_shift_interval(),
        }
    }
}

fn room(name: &str, description: &str, riddle: Option<&str>, exit: bool) -> RoomDef {
    RoomDef {
        name: name.to_string(),
        description: description.to_string(),
        riddle: riddle.map(str::to_string),
        exit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_default_maze_validates() {
        let def = MazeDef::default();
        assert!(def.validate().is_ok());
        assert_eq!(def.rooms.len(), 10);
        assert!(def.rooms[9].exit);
    }

    #[test]
    fn test_exactly_one_exit_required() {
        let mut def = MazeDef::default();
        def.rooms[5].exit = true;
        assert!(matches!(def.validate(), Err(EngineError::InvalidMaze(_))));

        def.rooms[5].exit = false;
        def.rooms[9].exit = false;
        assert!(matches!(def.validate(), Err(EngineError::InvalidMaze(_))));
    }

    #[test]
    fn test_start_and_exit_rooms_never_trap() {
        let def = MazeDef {
            trap_chance: 1.0,
            ..MazeDef::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let rooms = def.build_rooms(&mut rng);
        assert!(!rooms[0].is_trap);
        assert!(!rooms[9].is_trap);
        // With trap_chance forced to 1.0, every other room traps.
        for room in &rooms[1..9] {
            assert!(room.is_trap, "{} should trap", room.name);
        }
    }

    #[test]
    fn test_trap_draws_are_seed_deterministic() {
        let def = MazeDef::default();
        let a: Vec<bool> = def
            .build_rooms(&mut StdRng::seed_from_u64(99))
            .iter()
            .map(|r| r.is_trap)
            .collect();
        let b: Vec<bool> = def
            .build_rooms(&mut StdRng::seed_from_u64(99))
            .iter()
            .map(|r| r.is_trap)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_json_minimal() {
        let def = MazeDef::from_json(
            r#"{
                "rooms": [
                    {"name": "A", "description": "start"},
                    {"name": "B", "description": "end", "exit": true}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(def.time_limit, 30);
        assert_eq!(def.shift_interval_secs, 30);
        assert!((def.trap_chance - 0.2).abs() < f64::EPSILON);
        assert!(!def.riddle_rules.is_empty());
    }

    #[test]
    fn test_zero_intervals_are_rejected() {
        let mut def = MazeDef::default();
        def.shift_interval_secs = 0;
        assert!(matches!(def.validate(), Err(EngineError::InvalidMaze(_))));

        let mut def = MazeDef::default();
        def.time_limit = 0;
        assert!(matches!(def.validate(), Err(EngineError::InvalidMaze(_))));
    }

    #[test]
    fn test_duplicate_room_names_are_rejected() {
        let mut def = MazeDef::default();
        def.rooms[3].name = def.rooms[2].name.clone();
        assert!(matches!(def.validate(), Err(EngineError::InvalidMaze(_))));
    }

    #[test]
    fn test_from_json_with_custom_riddle_rules() {
        let def = MazeDef::from_json(
            r#"{
                "rooms": [
                    {"name": "A", "description": "start"},
                    {"name": "B", "description": "locked",
                     "riddle": "What has keys but opens no locks?"},
                    {"name": "C", "description": "end", "exit": true}
                ],
                "riddle_rules": [
                    {"keyword": "keys but opens no locks", "accepted": ["piano"]}
                ]
            }"#,
        )
        .unwrap();
        assert!(def
            .riddle_rules
            .check("What has keys but opens no locks?", "a piano"));
        assert!(!def
            .riddle_rules
            .check("What has keys but opens no locks?", "a door"));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            MazeDef::from_json("{"),
            Err(EngineError::Parse(_))
        ));
    }
}
