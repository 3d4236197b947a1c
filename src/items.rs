use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::Pos;

/// Collectibles still on the board, keyed by cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSet {
    cells: HashSet<Pos>,
}

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `count` items on distinct cells chosen uniformly at random,
    /// never on a cell listed in `avoid`. Fewer items are placed if the grid
    /// runs out of free cells.
    pub fn scatter(rng: &mut impl Rng, size: usize, count: usize, avoid: &[Pos]) -> Self {
        let mut free: Vec<Pos> = (0..size)
            .flat_map(|row| (0..size).map(move |col| Pos::new(row, col)))
            .filter(|p| !avoid.contains(p))
            .collect();
        let (picked, _) = free.partial_shuffle(rng, count);
        picked.iter().copied().collect()
    }

    pub fn insert(&mut self, pos: Pos) -> bool {
        self.cells.insert(pos)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }

    pub fn remove(&mut self, pos: Pos) -> bool {
        self.cells.remove(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().copied()
    }
}

impl FromIterator<Pos> for ItemSet {
    fn from_iter<I: IntoIterator<Item = Pos>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
