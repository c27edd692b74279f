use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use flappy_term::terminal::{self, TerminalFrontend, TerminalGuard};
use flappy_term::{Clock, Config, Game, SystemClock, run};

const LOG_FILE_ENV: &str = "FLAPPY_LOG_FILE";

/// Logs go to a file, if asked for; the terminal is busy drawing.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os(LOG_FILE_ENV) else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("could not create log file {}", path.to_string_lossy()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let (cols, rows) = terminal::check_terminal().context("cannot start the game")?;
    let config = Config::new();
    let (world_w, world_h) = (config.screen_width, config.screen_height);

    let guard = TerminalGuard::enter().context("could not set up the terminal")?;
    let mut frontend = TerminalFrontend::new(guard, cols, rows, world_w, world_h);
    let mut clock = SystemClock::new();
    let mut game = Game::new(config, StdRng::from_entropy(), clock.now_ms());

    run(&mut game, &mut frontend, &mut clock).context("game loop failed")?;
    Ok(())
}
