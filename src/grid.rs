#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    North,
    South,
    East,
    West,
}

/// Expansion order used by the search: east, west, south, north.
pub const NEIGHBOR_ORDER: [Dir; 4] = [Dir::East, Dir::West, Dir::South, Dir::North];

impl Dir {
    /// Row and column offsets.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::North => (-1, 0),
            Dir::South => (1, 0),
            Dir::East => (0, 1),
            Dir::West => (0, -1),
        }
    }
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    pub fn manhattan(self, other: Pos) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// The neighbouring cell in `dir`, or `None` when it would leave the grid.
    pub fn step(self, dir: Dir, size: usize) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let next = Pos { row, col };
        next.in_bounds(size).then_some(next)
    }

    pub fn neighbors(self, size: usize) -> impl Iterator<Item = (Dir, Pos)> {
        NEIGHBOR_ORDER
            .into_iter()
            .filter_map(move |dir| self.step(dir, size).map(|next| (dir, next)))
    }
}
