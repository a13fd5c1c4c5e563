use std::fmt;

/// A cell address on the service grid. Ordering is row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GridCoord {
    pub row: u32,
    pub col: u32,
}

impl GridCoord {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// L1 distance, the hop count on an open 4-connected grid.
    pub fn manhattan(&self, other: GridCoord) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Neighbours inside a `rows x cols` extent, in the order down, up,
    /// right, left.
    pub fn neighbours4(self, rows: u32, cols: u32) -> impl Iterator<Item = GridCoord> {
        let GridCoord { row, col } = self;
        [
            (row + 1 < rows).then(|| GridCoord::new(row + 1, col)),
            (row > 0).then(|| GridCoord::new(row - 1, col)),
            (col + 1 < cols).then(|| GridCoord::new(row, col + 1)),
            (col > 0).then(|| GridCoord::new(row, col - 1)),
        ]
        .into_iter()
        .flatten()
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
