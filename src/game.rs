use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::gate::MoveGate;
use crate::grid::{Dir, Pos};
use crate::items::ItemSet;
use crate::path::{find_direction_with, PathPolicy};

pub const DEFAULT_SIZE: usize = 10;
pub const DEFAULT_ITEMS: usize = 5;
pub const DEFAULT_CHASE_PROBABILITY: f64 = 0.5;
/// Largest accepted grid side. Keeps per-tick search tables small and every
/// screen coordinate within `u16`.
pub const MAX_SIZE: usize = 1024;

/// What an undo rolls back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndoPolicy {
    PlayerOnly,
    #[default]
    PlayerAndPursuer,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid size must be at least 1")]
    EmptyGrid,
    #[error("grid size {got} exceeds the maximum of {max}")]
    GridTooLarge { got: usize, max: usize },
    #[error("{who} start {pos:?} is outside a {size}x{size} grid")]
    StartOutOfBounds {
        who: &'static str,
        pos: Pos,
        size: usize,
    },
    #[error("player and pursuer cannot start on the same cell {0:?}")]
    SharedStart(Pos),
    #[error("item count must be between 1 and {max}, got {got}")]
    ItemCount { got: usize, max: usize },
    #[error("chase probability must be within [0, 1], got {0}")]
    Probability(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub size: usize,
    pub item_count: usize,
    pub player_start: Pos,
    pub pursuer_start: Pos,
    pub undo: UndoPolicy,
    pub path: PathPolicy,
    pub chase_probability: f64,
}

impl GameConfig {
    /// Defaults for an arbitrary grid: player in the top-left corner,
    /// pursuer in the centre.
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            item_count: DEFAULT_ITEMS,
            player_start: Pos::new(0, 0),
            pursuer_start: Pos::new(size / 2, size / 2),
            undo: UndoPolicy::default(),
            path: PathPolicy::default(),
            chase_probability: DEFAULT_CHASE_PROBABILITY,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.size > MAX_SIZE {
            return Err(ConfigError::GridTooLarge {
                got: self.size,
                max: MAX_SIZE,
            });
        }
        for (who, pos) in [("player", self.player_start), ("pursuer", self.pursuer_start)] {
            if !pos.in_bounds(self.size) {
                return Err(ConfigError::StartOutOfBounds {
                    who,
                    pos,
                    size: self.size,
                });
            }
        }
        if self.player_start == self.pursuer_start {
            return Err(ConfigError::SharedStart(self.player_start));
        }
        let max = self
            .size
            .checked_mul(self.size)
            .map_or(usize::MAX, |cells| cells - 1);
        if self.item_count == 0 || self.item_count > max {
            return Err(ConfigError::ItemCount {
                got: self.item_count,
                max,
            });
        }
        if !(0.0..=1.0).contains(&self.chase_probability) {
            return Err(ConfigError::Probability(self.chase_probability));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::with_size(DEFAULT_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    Undo,
    Invalid,
}

impl Command {
    pub fn from_char(c: char) -> Self {
        match c.to_ascii_lowercase() {
            'w' => Command::Up,
            's' => Command::Down,
            'a' => Command::Left,
            'd' => Command::Right,
            'u' => Command::Undo,
            _ => Command::Invalid,
        }
    }

    fn dir(self) -> Option<Dir> {
        match self {
            Command::Up => Some(Dir::North),
            Command::Down => Some(Dir::South),
            Command::Left => Some(Dir::West),
            Command::Right => Some(Dir::East),
            Command::Undo | Command::Invalid => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Playing,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Playing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    Player,
    Pursuer,
    Item,
}

/// Read-only picture of the grid after a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Glyph>,
}

impl Board {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn glyph(&self, pos: Pos) -> Glyph {
        self.cells[pos.row * self.size + pos.col]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Glyph]> {
        self.cells.chunks(self.size)
    }

    pub fn has_player(&self) -> bool {
        self.cells.contains(&Glyph::Player)
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    player: Pos,
    pursuer: Pos,
    items: ItemSet,
    player_history: Vec<Pos>,
    pursuer_history: Vec<Pos>,
    outcome: Outcome,
}

impl Game {
    /// Starts a game with items scattered at random, never on the player's
    /// start cell.
    pub fn new(config: GameConfig, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        config.validate()?;
        let items = ItemSet::scatter(rng, config.size, config.item_count, &[config.player_start]);
        Self::with_items(config, items)
    }

    /// Starts a game with a caller-chosen item layout. `config.item_count` is
    /// ignored in favour of the layout.
    pub fn with_items(config: GameConfig, items: ItemSet) -> Result<Self, ConfigError> {
        let config = GameConfig {
            item_count: items.len(),
            ..config
        };
        config.validate()?;
        if let Some(pos) = items.iter().find(|p| !p.in_bounds(config.size)) {
            return Err(ConfigError::StartOutOfBounds {
                who: "item",
                pos,
                size: config.size,
            });
        }
        debug!(?config, "new game");
        Ok(Self {
            player: config.player_start,
            pursuer: config.pursuer_start,
            config,
            items,
            player_history: Vec::new(),
            pursuer_history: Vec::new(),
            outcome: Outcome::Playing,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn size(&self) -> usize {
        self.config.size
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn pursuer(&self) -> Pos {
        self.pursuer
    }

    pub fn items(&self) -> &ItemSet {
        &self.items
    }

    pub fn items_remaining(&self) -> usize {
        self.items.len()
    }

    pub fn player_history(&self) -> &[Pos] {
        &self.player_history
    }

    pub fn pursuer_history(&self) -> &[Pos] {
        &self.pursuer_history
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Runs one tick: player move or undo, pursuer chase, then the end-of-game
    /// checks. Invalid commands and ticks after the game has ended change
    /// nothing.
    pub fn resolve_tick(&mut self, cmd: Command, gate: &mut impl MoveGate) -> Outcome {
        if self.outcome.is_terminal() || cmd == Command::Invalid {
            return self.outcome;
        }

        let undo = cmd == Command::Undo;
        if undo {
            self.undo();
        } else if let Some(dir) = cmd.dir() {
            self.move_player(dir);
        }

        // An undone tick never advances the pursuer, but the gate is only
        // consulted when there is somewhere to go.
        if !undo {
            let chase =
                find_direction_with(self.config.path, self.size(), self.pursuer, self.player);
            if let Some(dir) = chase {
                if gate.allow() {
                    self.move_pursuer(dir);
                }
            }
        }

        self.outcome = self.judge();
        if self.outcome.is_terminal() {
            info!(outcome = ?self.outcome, remaining = self.items_remaining(), "game over");
        }
        self.outcome
    }

    /// Board picture with the pursuer drawn over the player on a capture.
    pub fn snapshot(&self) -> Board {
        let size = self.size();
        let mut cells = vec![Glyph::Empty; size * size];
        for pos in self.items.iter() {
            cells[pos.row * size + pos.col] = Glyph::Item;
        }
        cells[self.player.row * size + self.player.col] = Glyph::Player;
        cells[self.pursuer.row * size + self.pursuer.col] = Glyph::Pursuer;
        Board { size, cells }
    }

    fn move_player(&mut self, dir: Dir) {
        if let Some(next) = self.player.step(dir, self.size()) {
            self.player_history.push(self.player);
            self.player = next;
            debug!(player = ?self.player, "player moved");
        }
    }

    fn move_pursuer(&mut self, dir: Dir) {
        if let Some(next) = self.pursuer.step(dir, self.size()) {
            self.pursuer_history.push(self.pursuer);
            self.pursuer = next;
            debug!(pursuer = ?self.pursuer, ?dir, "pursuer moved");
        }
    }

    fn undo(&mut self) {
        let Some(prev) = self.player_history.pop() else {
            return;
        };
        self.player = prev;
        if self.config.undo == UndoPolicy::PlayerAndPursuer {
            if let Some(prev) = self.pursuer_history.pop() {
                self.pursuer = prev;
            }
        }
        debug!(player = ?self.player, pursuer = ?self.pursuer, "undo");
    }

    fn judge(&mut self) -> Outcome {
        if self.player == self.pursuer {
            return Outcome::Lost;
        }
        if self.items.remove(self.player) && self.items.is_empty() {
            return Outcome::Won;
        }
        // The board only loses its player marker when the pursuer is drawn
        // over it, which the capture check above already covers.
        Outcome::Playing
    }
}
