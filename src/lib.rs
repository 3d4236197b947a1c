//! Turn-based chase on a square grid: the player collects items while a
//! pursuer closes in using breadth-first search.

pub mod game;
pub mod gate;
pub mod grid;
pub mod items;
pub mod path;

pub use game::{Board, Command, ConfigError, Game, GameConfig, Glyph, Outcome, UndoPolicy};
pub use gate::{CoinFlip, FixedGate, MoveGate};
pub use grid::{Dir, Pos};
pub use items::ItemSet;
pub use path::{find_direction, find_direction_with, PathPolicy};
