use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::Rng;

use crate::room::RoomId;

/// Undirected simple graph over the fixed room set. The vertex set never
/// changes after `build`; the edge set is discarded and redrawn wholesale
/// by `reshuffle`, which is the only topology mutator. Adjacency sets are
/// ordered so neighbor iteration is stable for a given edge set.
#[derive(Debug, Clone)]
pub struct MazeGraph {
    adj: Vec<BTreeSet<RoomId>>,
}

impl MazeGraph {
    /// All vertices, no edges.
    pub fn build(room_count: usize) -> Self {
        Self {
            adj: vec![BTreeSet::new(); room_count],
        }
    }

    pub fn room_count(&self) -> usize {
        self.adj.len()
    }

    /// Discard every edge and redraw the topology: each room draws an edge
    /// count k in 1..=3, then k random partners. Self-loops are silently
    /// dropped and duplicate edges collapse (simple-graph semantics), so a
    /// room can end up isolated. Deterministic for a given RNG state.
    pub fn reshuffle(&mut self, rng: &mut StdRng) {
        for set in &mut self.adj {
            set.clear();
        }
        let n = self.adj.len();
        for room in 0..n {
            let k = rng.gen_range(1..=3);
            for _ in 0..k {
                let other = rng.gen_range(0..n);
                if other != room {
                    self.add_edge(room, other);
                }
            }
        }
    }

    fn add_edge(&mut self, a: RoomId, b: RoomId) {
        self.adj[a].insert(b);
        self.adj[b].insert(a);
    }

    /// Remove a single edge. Only tests exercise this directly; gameplay
    /// changes topology through `reshuffle` alone.
    #[cfg(test)]
    pub fn remove_edge(&mut self, a: RoomId, b: RoomId) {
        self.adj[a].remove(&b);
        self.adj[b].remove(&a);
    }

    #[cfg(test)]
    pub fn clear_edges(&mut self) {
        for set in &mut self.adj {
            set.clear();
        }
    }

    #[cfg(test)]
    pub fn insert_edge(&mut self, a: RoomId, b: RoomId) {
        assert_ne!(a, b, "self-loops are not representable");
        self.add_edge(a, b);
    }

    pub fn contains_edge(&self, a: RoomId, b: RoomId) -> bool {
        self.adj[a].contains(&b)
    }

    /// Rooms adjacent to `room` under the current edge set, in ascending
    /// id order.
    pub fn neighbors_of(&self, room: RoomId) -> Vec<RoomId> {
        self.adj[room].iter().copied().collect()
    }

    pub fn degree(&self, room: RoomId) -> usize {
        self.adj[room].len()
    }

    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(|s| s.len()).sum::<usize>() / 2
    }

    /// Flattened edge list, each pair once with the smaller id first.
    pub fn edges(&self) -> Vec<(RoomId, RoomId)> {
        let mut edges = Vec::new();
        for (a, set) in self.adj.iter().enumerate() {
            for &b in set {
                if a < b {
                    edges.push((a, b));
                }
            }
        }
        edges
    }
}
