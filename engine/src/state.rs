use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::MazeDef;
use crate::error::EngineError;
use crate::maze::MazeGraph;
use crate::room::{Room, RoomId};
use crate::ui::{MinimapRow, RoomView};

/// How a game ends. Set exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The player entered a trap room.
    Trapped,
    /// The player reached the exit room.
    Escaped,
    /// The countdown hit zero.
    TimedOut,
}

/// The mutable heart of a game: rooms, topology, player position, score,
/// time budget, and the one-shot outcome. Always lives behind the
/// engine's single lock; reshuffle, room transitions, and countdown ticks
/// all serialize on it. Owns the seeded RNG so trap draws and every
/// reshuffle come from one injected source.
pub struct GameState {
    rooms: Vec<Room>,
    graph: MazeGraph,
    pub current: RoomId,
    pub score: u32,
    pub time_left: u32,
    outcome: Option<Outcome>,
    rng: StdRng,
}

impl GameState {
    pub fn new(def: &MazeDef, seed: u64) -> Result<Self, EngineError> {
        def.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let rooms = def.build_rooms(&mut rng);
        let mut graph = MazeGraph::build(rooms.len());
        graph.reshuffle(&mut rng);
        Ok(Self {
            rooms,
            graph,
            current: 0,
            score: 0,
            time_left: def.time_limit,
            outcome: None,
            rng,
        })
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Result<&Room, EngineError> {
        self.rooms.get(id).ok_or(EngineError::UnknownRoom(id))
    }

    pub fn graph(&self) -> &MazeGraph {
        &self.graph
    }

    /// Redraw the whole topology from the owned RNG.
    pub fn reshuffle(&mut self) {
        self.graph.reshuffle(&mut self.rng);
    }

    #[cfg(test)]
    pub(crate) fn graph_mut(&mut self) -> &mut MazeGraph {
        &mut self.graph
    }

    /// Mark the room's riddle solved and award the 50 points. Returns
    /// false (and changes nothing) when it was already solved.
    pub fn solve_riddle(&mut self, id: RoomId) -> bool {
        let room = &mut self.rooms[id];
        if room.is_solved() {
            return false;
        }
        room.mark_solved();
        self.score += 50;
        true
    }

    /// First write wins; later outcomes are ignored.
    pub fn finish(&mut self, outcome: Outcome) {
        if self.outcome.is_none() {
            self.outcome = Some(outcome);
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// One countdown tick. Returns the remaining budget, floored at zero.
    pub fn tick(&mut self) -> u32 {
        self.time_left = self.time_left.saturating_sub(1);
        self.time_left
    }

    pub fn view(&self) -> RoomView {
        let room = &self.rooms[self.current];
        let moves = self
            .graph
            .neighbors_of(self.current)
            .into_iter()
            .map(|id| (id, self.rooms[id].name.clone()))
            .collect();
        let minimap = self
            .rooms
            .iter()
            .enumerate()
            .map(|(id, r)| MinimapRow {
                here: id == self.current,
                name: r.name.clone(),
                links: self.graph.degree(id),
                exit: r.is_exit,
                trap: r.is_trap,
            })
            .collect();
        RoomView {
            name: room.name.clone(),
            description: room.description.clone(),
            moves,
            score: self.score,
            time_left: self.time_left,
            minimap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_exit_for_the_maze_lifetime() {
        let state = GameState::new(&MazeDef::default(), 11).unwrap();
        let exits = state.rooms().iter().filter(|r| r.is_exit).count();
        assert_eq!(exits, 1);
    }

    #[test]
    fn test_outcome_is_first_write_wins() {
        let mut state = GameState::new(&MazeDef::default(), 3).unwrap();
        assert!(!state.is_over());
        state.finish(Outcome::Trapped);
        state.finish(Outcome::Escaped);
        assert_eq!(state.outcome(), Some(Outcome::Trapped));
    }

    #[test]
    fn test_solve_riddle_scores_once() {
        let mut state = GameState::new(&MazeDef::default(), 3).unwrap();
        // Room 1 ("Gravity Sink") carries the sphinx riddle.
        assert!(state.solve_riddle(1));
        assert_eq!(state.score, 50);
        assert!(!state.solve_riddle(1));
        assert_eq!(state.score, 50);
        assert!(state.rooms()[1].is_solved());
    }

    #[test]
    fn test_tick_floors_at_zero() {
        let def = MazeDef {
            time_limit: 2,
            ..MazeDef::default()
        };
        let mut state = GameState::new(&def, 0).unwrap();
        assert_eq!(state.tick(), 1);
        assert_eq!(state.tick(), 0);
        assert_eq!(state.tick(), 0);
    }

    #[test]
    fn test_view_reports_live_neighbors_and_minimap() {
        let state = GameState::new(&MazeDef::default(), 17).unwrap();
        let view = state.view();
        assert_eq!(view.name, "Hall of Whispers");
        assert_eq!(view.minimap.len(), 10);
        assert!(view.minimap[0].here);
        assert!(view.minimap[9].exit);
        let expected: Vec<RoomId> = state.graph().neighbors_of(0);
        let got: Vec<RoomId> = view.moves.iter().map(|(id, _)| *id).collect();
        assert_eq!(got, expected);
    }
}
