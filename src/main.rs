mod app;
mod audio;
mod config;
mod fruit;
mod game_state;
mod geometry;
mod logger;
mod render;
mod rng;
mod shape;
mod snake;
mod term;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::GameConfig;
use crate::game_state::GameState;
use crate::rng::GameRng;

pub type TermInt = u16;
pub type Coords = (u16, u16);

#[derive(Parser)]
#[command(name = "snake", about = "Grow the snake, eat the fruit, don't bite yourself")]
struct Args {
    /// YAML config file. Defaults are used if it does not exist.
    #[arg(long, default_value = "snake.yaml")]
    config: PathBuf,

    /// Seed for fruit placement, to replay a game.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,

    /// Disable the terminal bell on eating.
    #[arg(long)]
    mute: bool,

    /// Print the default config as YAML and exit.
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", GameConfig::default().to_yaml()?);
        return Ok(());
    }

    logger::init_logger(&args.log_file, Some("snake".to_string()))?;

    let config = GameConfig::load(&args.config)?;
    let rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_random(),
    };

    let state = GameState::new(&config, rng);
    log!(
        "starting: grid {}x{}, tick {}ms, placement {:?}, seed {}",
        state.config().grid_size,
        state.config().grid_size,
        state.config().tick_interval_ms,
        state.config().fruit_placement,
        state.seed()
    );

    let audio = audio::from_settings(config.sound && !args.mute);
    let term = term::TermManager::new().context("failed to query terminal")?;

    let mut game = app::App::new(term, state, audio)?;
    game.run()
}
