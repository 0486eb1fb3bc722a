use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use env_logger::{Env, Target};
use retro_snake::config::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, Difficulty, EASY_PERIOD_MS, EngineConfig,
    FRAME_POLL_INTERVAL, GridSize, HARD_PERIOD_MS, MAX_HISTORY_ENTRIES, MEDIUM_PERIOD_MS,
    PixelStyle, SpeedTable,
};
use retro_snake::error::EngineError;
use retro_snake::game::Game;
use retro_snake::input::{GameInput, InputHandler};
use retro_snake::renderer::{self, View};
use retro_snake::score::{JsonScoreStore, MemoryScoreStore, RunRecord, ScoreStore};
use retro_snake::session::Session;
use retro_snake::terminal_runtime::TerminalSession;
use retro_snake::ui::hud::HudInfo;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Grid width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    width: u16,

    /// Grid height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    height: u16,

    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Tick period for the easy preset, in milliseconds.
    #[arg(long, default_value_t = EASY_PERIOD_MS)]
    easy_ms: u64,

    #[arg(long, default_value_t = MEDIUM_PERIOD_MS)]
    medium_ms: u64,

    #[arg(long, default_value_t = HARD_PERIOD_MS)]
    hard_ms: u64,

    #[arg(long, value_enum, default_value_t = PixelStyle::Bit16)]
    pixel_style: PixelStyle,

    /// Seed food placement for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Keep scores in memory only.
    #[arg(long)]
    no_save: bool,

    /// Override the score file location.
    #[arg(long)]
    scores_file: Option<PathBuf>,

    /// Write logs to this file (the terminal is busy drawing the game).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let grid = GridSize::new(cli.width, cli.height)?;
    let speeds = SpeedTable::from_millis(cli.easy_ms, cli.medium_ms, cli.hard_ms)?;
    let config = EngineConfig::new(grid);
    let game = match cli.seed {
        Some(seed) => Game::new_with_seed(config, seed)?,
        None => Game::new(config)?,
    };

    let store: Box<dyn ScoreStore> = if cli.no_save {
        log::info!("scores kept in memory only");
        Box::new(MemoryScoreStore::new())
    } else {
        let store = match cli.scores_file.clone() {
            Some(path) => JsonScoreStore::new(path),
            None => JsonScoreStore::at_default_path(),
        };
        log::info!("scores stored in {}", store.path().display());
        Box::new(store)
    };

    let mut session = Session::new(game, speeds, cli.difficulty, store);
    log::info!(
        "starting {}x{} game on {}",
        grid.width,
        grid.height,
        cli.difficulty
    );

    let mut terminal = TerminalSession::enter()?;
    run(&mut terminal, &mut session, cli.pixel_style)?;
    Ok(())
}

fn run(
    terminal: &mut TerminalSession,
    session: &mut Session,
    mut pixel_style: PixelStyle,
) -> io::Result<()> {
    let mut input = InputHandler::new(FRAME_POLL_INTERVAL);
    let mut history: Option<Vec<RunRecord>> = None;

    loop {
        let snapshot = session.game().snapshot();
        let view = View {
            hud: HudInfo {
                high_score: session.high_score(),
                difficulty: session.difficulty(),
                pixel_style,
            },
            last_run: session.last_run(),
            history: history.as_deref(),
        };
        terminal.draw(|frame| renderer::render(frame, &snapshot, &view))?;

        if let Some(game_input) = input.poll_input()? {
            match game_input {
                GameInput::Quit => break,
                GameInput::ToggleHistory => {
                    history = match history {
                        Some(_) => None,
                        None => Some(session.top_runs(MAX_HISTORY_ENTRIES)),
                    };
                }
                GameInput::TogglePixelStyle => pixel_style = pixel_style.toggled(),
                other => session.handle_input(other, Instant::now()),
            }
        }

        let _ = session.advance(Instant::now());
    }

    Ok(())
}

fn init_logging(log_file: Option<&PathBuf>) -> io::Result<()> {
    let mut builder = match log_file {
        Some(path) => {
            let env = Env::default().default_filter_or("info");
            let mut builder = env_logger::Builder::from_env(env);
            builder.target(Target::Pipe(Box::new(File::create(path)?)));
            builder
        }
        None => env_logger::Builder::from_env(Env::default().default_filter_or("off")),
    };
    builder.init();
    Ok(())
}
