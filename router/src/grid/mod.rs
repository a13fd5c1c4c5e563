pub mod service;

use relay_common::geom::coord::GridCoord;

/// What the connectivity search needs from a grid.
pub trait TraversalGrid: Sync + Send {
    fn rows(&self) -> u32;
    fn cols(&self) -> u32;

    /// Whether a hop may land on `coord`. Only called for in-bounds cells.
    fn is_enterable(&self, coord: GridCoord) -> bool;

    /// In-bounds 4-neighbours in the order down, up, right, left.
    fn neighbours4(&self, coord: GridCoord) -> impl Iterator<Item = GridCoord> {
        coord.neighbours4(self.rows(), self.cols())
    }

    fn cell_count(&self) -> usize {
        (self.rows() as usize) * (self.cols() as usize)
    }

    #[inline(always)]
    fn index(&self, coord: GridCoord) -> usize {
        (coord.row as usize) * (self.cols() as usize) + (coord.col as usize)
    }

    #[inline(always)]
    fn coord(&self, index: usize) -> GridCoord {
        let cols = self.cols() as usize;
        GridCoord::new((index / cols) as u32, (index % cols) as u32)
    }
}
