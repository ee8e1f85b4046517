use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;
use tracing::debug;

use crate::engine::Engine;
use crate::state::Outcome;

/// The two schedulers share nothing beyond the engine's state lock and its
/// terminal broadcast. Both become inert the moment any terminal state is
/// reached. Periods are parameters so tests can run them in milliseconds.
impl Engine {
    /// Periodic maze shift: discard and redraw the whole edge set, then
    /// tell the player and re-render the current room, whose neighbor set
    /// may have changed (possibly to nothing).
    pub fn spawn_shift_task(&self, period: Duration) -> JoinHandle<()> {
        let engine = self.clone();
        let mut terminal = self.watch_terminal();
        tokio::spawn(async move {
            let mut ticker = time::interval(period);
            // An interval's first tick completes immediately; consume it so
            // the first shift lands one full period in.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let view = {
                            let mut state = engine.state.lock().await;
                            if state.is_over() {
                                break;
                            }
                            state.reshuffle();
                            debug!(edges = state.graph().edge_count(), "maze shifted");
                            state.view()
                        };
                        engine.ui.notify("The maze shifts!").await;
                        engine.ui.render_room(view).await;
                    }
                    // Wrapped so the branch yields (), not a watch::Ref:
                    // the guard is not Send and this future is spawned.
                    _ = async { let _ = terminal.wait_for(|done| *done).await; } => break,
                }
            }
        })
    }

    /// Countdown: one tick per time unit; at zero the game ends in
    /// `TimedOut` regardless of what the player is doing, including a
    /// pending riddle prompt.
    pub fn spawn_countdown_task(&self, tick: Duration) -> JoinHandle<()> {
        let engine = self.clone();
        let mut terminal = self.watch_terminal();
        tokio::spawn(async move {
            let mut ticker = time::interval(tick);
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let timed_out = {
                            let mut state = engine.state.lock().await;
                            if state.is_over() {
                                break;
                            }
                            if state.tick() == 0 {
                                state.finish(Outcome::TimedOut);
                                true
                            } else {
                                false
                            }
                        };
                        if timed_out {
                            engine.signal_terminal();
                            engine.ui.notify("Time's up! Game Over.").await;
                            break;
                        }
                    }
                    _ = async { let _ = terminal.wait_for(|done| *done).await; } => break,
                }
            }
        })
    }
}
