//! BLOCKFALL - a falling-block puzzle game for the terminal

mod board;
mod game;
mod gravity;
mod input;
mod piece;
mod score;
mod settings;
mod spawner;
mod tetromino;
mod ui;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use game::{Game, GameState};
use input::{Input, KeyMap};
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Settings;
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    // Log to a file; the terminal belongs to the game while it runs
    let log_dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_file = format!("{:08x}.log", session_id);

    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("blockfall=debug".parse().unwrap()),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "blockfall starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();
    // Write back so a first run leaves an editable settings file
    if let Err(e) = settings.save() {
        tracing::warn!("could not save settings: {}", e);
    }

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app and capture result
    let result = run_app(&mut terminal, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    // Print final message
    if let Ok(game) = &result {
        println!("\nThanks for playing BLOCKFALL!");
        println!("Final Score: {}", game.score.points);
        println!("Level: {} | Lines: {}", game.score.level, game.score.lines);
    }

    result.map(|_| ())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &Settings,
) -> io::Result<Game> {
    let keymap = KeyMap::from_settings(settings);
    let mut game = Game::new();
    let mut last_state = game.state;
    let mut last_frame = Instant::now();

    loop {
        // Render
        terminal.draw(|frame| ui::render_game(frame, &game, settings))?;

        // Handle input
        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                // Repeats count: held keys keep moving the piece
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    match keymap.resolve(key) {
                        Some(Input::Quit) => return Ok(game),
                        Some(Input::Play(action)) => game.process_action(action),
                        None => {}
                    }
                }
            }
        }

        // Feed elapsed time to the drop clock
        let now = Instant::now();
        let delta = now.duration_since(last_frame);
        last_frame = now;
        game.tick(delta.as_millis() as u64);

        if game.state != last_state {
            log_transition(last_state, &game);
            last_state = game.state;
        }
    }
}

/// Log state transitions for the session record
fn log_transition(from: GameState, game: &Game) {
    match game.state {
        GameState::Running if from == GameState::Paused => tracing::debug!("resumed"),
        GameState::Running => tracing::info!("game started"),
        GameState::Paused => tracing::debug!("paused"),
        GameState::GameOver => tracing::info!(
            "game over: score={} lines={} level={}",
            game.score.points,
            game.score.lines,
            game.score.level
        ),
        GameState::Idle => {}
    }
}
