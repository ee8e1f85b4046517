use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use tracing::{info, warn};

use mindmaze_engine::{
    Engine, EngineError, GameUi, MazeDef, Outcome, RoomView, Transition,
};

#[derive(Parser, Debug)]
#[command(name = "mindmaze")]
#[command(about = "Escape the Mind Maze: a shifting-maze escape game", long_about = None)]
struct Args {
    /// Random seed; a fixed seed reproduces the same maze
    #[arg(long)]
    seed: Option<u64>,

    /// JSON maze definition file (defaults to the built-in ten-room maze)
    #[arg(long)]
    maze: Option<PathBuf>,

    /// Time budget in seconds
    #[arg(long)]
    time_limit: Option<u32>,

    /// Seconds between maze shifts
    #[arg(long)]
    shift_secs: Option<u64>,

    /// Optional ambient sound file; problems with it are logged and ignored
    #[arg(long)]
    ambient_sound: Option<PathBuf>,
}

/// Terminal presentation layer: prompts and renders on stdout, reads the
/// player on stdin.
struct ConsoleUi;

#[async_trait]
impl GameUi for ConsoleUi {
    async fn prompt_riddle(&self, text: &str) -> Option<String> {
        println!("\nRiddle: {}", text);
        print!("Your answer (empty line to stand back): ");
        let line = read_line().await?;
        let line = line.trim().to_string();
        if line.is_empty() {
            None
        } else {
            Some(line)
        }
    }

    async fn render_room(&self, view: RoomView) {
        println!("\n=== {} ===", view.name);
        println!("{}", view.description);
        println!();
        for row in &view.minimap {
            let marker = if row.here { "-> " } else { "   " };
            let mut line = format!("{}{} | Links: {}", marker, row.name, row.links);
            if row.exit {
                line.push_str(" [EXIT]");
            }
            if row.trap {
                line.push_str(" [TRAP]");
            }
            println!("{}", line);
        }
        println!("\nScore: {} | Time Left: {}s", view.score, view.time_left);
        if view.moves.is_empty() {
            println!("No exits from here. Wait for the maze to shift.");
        } else {
            for (i, (_, name)) in view.moves.iter().enumerate() {
                println!("  {}) Enter: {}", i + 1, name);
            }
        }
        println!("Type a number to move, 'path' for a DFS route, 'quit' to give up.");
    }

    async fn notify(&self, message: &str) {
        println!("\n*** {} ***", message);
    }

    async fn render_path(&self, path: Option<Vec<String>>) {
        match path {
            Some(rooms) => println!("\nDFS Path to Exit: {}", rooms.join(" -> ")),
            None => println!("\nNo path to exit found via DFS."),
        }
    }
}

/// One line from stdin without blocking the runtime. `None` on EOF.
async fn read_line() -> Option<String> {
    std::io::stdout().flush().ok();
    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        match std::io::stdin().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(_) => None,
        }
    })
    .await
    .ok()
    .flatten()
}

/// Ambient audio is a side concern with no effect on game logic; no audio
/// backend is wired in, so just probe the file to make a bad path visible
/// in the logs.
fn start_ambient(path: &Path) {
    match std::fs::metadata(path) {
        Ok(_) => info!(file = %path.display(), "ambient sound present (playback not wired)"),
        Err(e) => warn!(file = %path.display(), "Sound failed: {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut def = match &args.maze {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read maze file {}", path.display()))?;
            MazeDef::from_json(&json)
                .with_context(|| format!("invalid maze file {}", path.display()))?
        }
        None => MazeDef::default(),
    };
    if let Some(t) = args.time_limit {
        def.time_limit = t;
    }
    if let Some(s) = args.shift_secs {
        def.shift_interval_secs = s;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "starting game");

    if let Some(path) = &args.ambient_sound {
        start_ambient(path);
    }

    let engine = Engine::new(&def, seed, Arc::new(ConsoleUi))?;

    println!("Escape the Mind Maze");
    println!(
        "Find the exit in {} seconds. The maze shifts every {} seconds.",
        def.time_limit, def.shift_interval_secs
    );
    engine.start().await;

    let shift = engine.spawn_shift_task(Duration::from_secs(def.shift_interval_secs));
    let countdown = engine.spawn_countdown_task(Duration::from_secs(1));

    let engine_for_signal = engine.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\nInterrupted. Leaving the maze.");
            engine_for_signal.stop();
        }
    });

    let mut terminal = engine.watch_terminal();
    loop {
        print!("\n> ");
        let command = tokio::select! {
            line = read_line() => line,
            _ = terminal.wait_for(|done| *done) => break,
        };
        let Some(command) = command else {
            engine.stop();
            break;
        };
        match command.trim().to_lowercase().as_str() {
            "" => continue,
            "quit" | "q" => {
                engine.stop();
                break;
            }
            "path" | "p" => {
                engine.show_path().await;
            }
            choice => match choice.parse::<usize>() {
                Ok(n) if n >= 1 => {
                    let target = engine
                        .view()
                        .await
                        .moves
                        .get(n - 1)
                        .map(|(id, _)| *id);
                    let Some(target) = target else {
                        println!("No such option.");
                        continue;
                    };
                    match engine.enter_room(target).await {
                        Ok(Transition::Trapped | Transition::Escaped) => break,
                        Ok(_) => {}
                        Err(EngineError::GameOver) => break,
                        Err(e) => warn!("move rejected: {}", e),
                    }
                }
                _ => println!("Type a number to move, 'path' for a DFS route, 'quit' to give up."),
            },
        }
        if engine.outcome().await.is_some() {
            break;
        }
    }

    engine.stop();
    let _ = shift.await;
    let _ = countdown.await;

    let score = engine.score().await;
    match engine.outcome().await {
        Some(Outcome::Escaped) => println!("\nYou escaped with {} points.", score),
        Some(Outcome::Trapped) => println!("\nThe maze claims another mind. Final score: {}.", score),
        Some(Outcome::TimedOut) => println!("\nThe maze outlasted you. Final score: {}.", score),
        None => println!("\nYou gave up with {} points.", score),
    }
    // A blocking stdin read may still be parked in the pool; don't let it
    // hold the runtime open.
    std::process::exit(0);
}
