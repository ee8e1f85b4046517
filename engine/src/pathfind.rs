use crate::maze::MazeGraph;
use crate::room::{Room, RoomId};

/// Exhaustive depth-first search from `start` to any exit room over the
/// graph's current edge set. Iterative, with an explicit stack of
/// (room, path-so-far) frames and a visited set, so cyclic and
/// disconnected graphs terminate. Neighbors are explored in descending id
/// order (pushed ascending, popped last-in-first-out), which keeps the
/// result stable for a given edge set. This is path existence, not
/// shortest path. Read-only: callers hold the state lock for the duration
/// so no reshuffle can interleave mid-traversal.
pub fn find_path_to_exit(graph: &MazeGraph, rooms: &[Room], start: RoomId) -> Option<Vec<RoomId>> {
    let mut visited = vec![false; graph.room_count()];
    let mut stack: Vec<(RoomId, Vec<RoomId>)> = vec![(start, vec![start])];
    visited[start] = true;

    while let Some((room, path)) = stack.pop() {
        if rooms[room].is_exit {
            return Some(path);
        }
        for neighbor in graph.neighbors_of(room) {
            if !visited[neighbor] {
                visited[neighbor] = true;
                let mut next_path = path.clone();
                next_path.push(neighbor);
                stack.push((neighbor, next_path));
            }
        }
    }
    None
}
