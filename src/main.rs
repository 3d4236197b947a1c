mod render;

use std::fs::File;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::Stylize;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use grid_chase::game::{DEFAULT_CHASE_PROBABILITY, DEFAULT_ITEMS, DEFAULT_SIZE};
use grid_chase::{CoinFlip, Command, Game, GameConfig, MoveGate, PathPolicy, UndoPolicy};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

use crate::render::Renderer;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum UndoArg {
    PlayerOnly,
    PlayerAndPursuer,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PathArg {
    AdjacentCell,
    FirstStep,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Collect every item before the pursuer catches you")]
struct Cli {
    #[arg(long, env = "CHASE_SIZE", default_value_t = DEFAULT_SIZE)]
    size: usize,
    #[arg(long, env = "CHASE_ITEMS", default_value_t = DEFAULT_ITEMS)]
    items: usize,
    #[arg(long, env = "CHASE_SEED")]
    seed: Option<u64>,
    /// What an undo rolls back.
    #[arg(long, value_enum, default_value_t = UndoArg::PlayerAndPursuer)]
    undo: UndoArg,
    /// How the pursuer turns its search result into a step.
    #[arg(long, value_enum, default_value_t = PathArg::AdjacentCell)]
    path: PathArg,
    /// Chance that the pursuer moves on a given tick.
    #[arg(long, default_value_t = DEFAULT_CHASE_PROBABILITY)]
    chase_probability: f64,
    #[arg(long, env = "CHASE_LOG")]
    log_file: Option<PathBuf>,
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    fn config(&self) -> GameConfig {
        GameConfig {
            item_count: self.items,
            undo: match self.undo {
                UndoArg::PlayerOnly => UndoPolicy::PlayerOnly,
                UndoArg::PlayerAndPursuer => UndoPolicy::PlayerAndPursuer,
            },
            path: match self.path {
                PathArg::AdjacentCell => PathPolicy::AdjacentCell,
                PathArg::FirstStep => PathPolicy::FirstStep,
            },
            chase_probability: self.chase_probability,
            ..GameConfig::with_size(self.size)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), cli.log_level)?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let config = cli.config();
    let probability = config.chase_probability;
    let mut game = Game::new(config, &mut rng).context("invalid game configuration")?;
    let mut gate = CoinFlip::new(rng, probability);

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("enabling raw mode")?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &mut game, &mut gate);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result?;

    if let Some((msg, color)) = render::outcome_banner(game.outcome()) {
        println!("{}", msg.with(color).bold());
    }
    info!(outcome = ?game.outcome(), "session finished");
    Ok(())
}

fn init_logging(path: Option<&Path>, level: LevelFilter) -> Result<()> {
    // The terminal is in raw mode while playing, so logs only go to a file.
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn run(stdout: &mut Stdout, game: &mut Game, gate: &mut impl MoveGate) -> io::Result<()> {
    let mut renderer = Renderer::new();
    renderer.draw(stdout, game, None)?;

    loop {
        let Some(key) = read_key()? else {
            return Ok(());
        };
        let cmd = Command::from_char(key);
        if cmd == Command::Invalid {
            renderer.draw(
                stdout,
                game,
                Some("Invalid move! Please enter W, S, A, D, or U."),
            )?;
            continue;
        }

        let outcome = game.resolve_tick(cmd, gate);
        renderer.draw(stdout, game, None)?;
        if outcome.is_terminal() {
            renderer.draw_outcome(stdout, game)?;
            read_key()?;
            return Ok(());
        }
    }
}

/// Blocks for the next key press. `None` means the player asked to quit.
fn read_key() -> io::Result<Option<char>> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => None,
                KeyCode::Char(c) => Some(c),
                _ => Some('\0'),
            });
        }
    }
}
