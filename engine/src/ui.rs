use async_trait::async_trait;

use crate::room::RoomId;

/// One line of the minimap: every room with its live link count, the
/// current-room marker, and its EXIT/TRAP tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimapRow {
    pub here: bool,
    pub name: String,
    pub links: usize,
    pub exit: bool,
    pub trap: bool,
}

/// Everything the presentation layer needs to draw a room: description,
/// the live moves out of it, the score/time status, and the minimap.
/// An empty `moves` list means the room is currently stranded; the next
/// maze shift may reconnect it.
#[derive(Debug, Clone)]
pub struct RoomView {
    pub name: String,
    pub description: String,
    pub moves: Vec<(RoomId, String)>,
    pub score: u32,
    pub time_left: u32,
    pub minimap: Vec<MinimapRow>,
}

/// The presentation collaborator. The engine drives it; it never mutates
/// game state except by returning a riddle answer.
#[async_trait]
pub trait GameUi: Send + Sync {
    /// Blocking request for a riddle answer. `None` means the player
    /// declined to answer. The engine races this against the terminal
    /// signal, so implementations need not watch the clock themselves.
    async fn prompt_riddle(&self, text: &str) -> Option<String>;

    async fn render_room(&self, view: RoomView);

    /// One-shot informational message (trap, exit, timeout, maze shift,
    /// wrong answer).
    async fn notify(&self, message: &str);

    /// Display hook for DFS results; `None` means no path was found.
    async fn render_path(&self, path: Option<Vec<String>>);
}
