use crate::error::GridError;
use crate::geom::coord::GridCoord;
use crate::geom::rect::CellRect;
use crate::util::generator::{self, IndexSampler};

/// Classification of a single grid cell.
///
/// `Covered` is used both for a relay's own cell and for every cell inside
/// its footprint; relay centres are tracked separately in
/// [`ServiceGrid::relays`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Free,
    Obstructed,
    Covered,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellCounts {
    pub free: usize,
    pub obstructed: usize,
    pub covered: usize,
}

/// Fixed-size `rows x cols` occupancy array, stored row-major.
#[derive(Clone, Debug)]
pub struct ServiceGrid {
    rows: u32,
    cols: u32,
    cells: Vec<CellState>,
    // Row-major order, which is the order the sweep discovers them in.
    relays: Vec<GridCoord>,
    planned: bool,
}

impl ServiceGrid {
    /// An all-`Free` grid.
    pub fn new(rows: u32, cols: u32) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimension { rows, cols });
        }

        // Searches address cells with u32 indices.
        let size = rows as u64 * cols as u64;
        if size > u32::MAX as u64 {
            return Err(GridError::InvalidDimension { rows, cols });
        }
        let size = size as usize;
        if size > 2_000_000_000 {
            log::warn!(
                "Allocating large ServiceGrid: {} cells. Ensure sufficient RAM.",
                size
            );
        }

        Ok(Self {
            rows,
            cols,
            cells: vec![CellState::Free; size],
            relays: Vec::new(),
            planned: false,
        })
    }

    /// Builds a grid and obstructs `floor(fraction * rows * cols)` distinct
    /// cells chosen by `sampler`.
    pub fn generate<S: IndexSampler + ?Sized>(
        rows: u32,
        cols: u32,
        obstacle_fraction: f64,
        sampler: &mut S,
    ) -> Result<Self, GridError> {
        generator::obstacle_count(obstacle_fraction, rows, cols)?;
        let mut grid = Self::new(rows, cols)?;
        generator::place_obstacles(&mut grid, obstacle_fraction, sampler)?;
        Ok(grid)
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }
    pub fn cols(&self) -> u32 {
        self.cols
    }
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline(always)]
    fn index(&self, coord: GridCoord) -> usize {
        (coord.row as usize) * (self.cols as usize) + (coord.col as usize)
    }

    /// Inverse of the row-major layout: `index / cols`, `index % cols`.
    #[inline(always)]
    pub fn coord_of(&self, index: usize) -> GridCoord {
        let cols = self.cols as usize;
        GridCoord::new((index / cols) as u32, (index % cols) as u32)
    }

    #[inline(always)]
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    pub fn check_bounds(&self, coord: GridCoord) -> Result<(), GridError> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                coord,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Panics if `coord` is outside the grid.
    #[inline]
    pub fn state(&self, coord: GridCoord) -> CellState {
        assert!(
            self.contains(coord),
            "cell {} outside {}x{} grid",
            coord,
            self.rows,
            self.cols
        );
        self.cells[self.index(coord)]
    }

    /// Panics if `coord` is outside the grid.
    #[inline]
    pub fn set_state(&mut self, coord: GridCoord, state: CellState) {
        assert!(
            self.contains(coord),
            "cell {} outside {}x{} grid",
            coord,
            self.rows,
            self.cols
        );
        let idx = self.index(coord);
        self.cells[idx] = state;
    }

    #[inline]
    pub fn is_traversable(&self, coord: GridCoord) -> bool {
        self.state(coord) != CellState::Obstructed
    }

    /// Read-only row-major snapshot for renderers.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Cells within Chebyshev distance `radius` of `center`, clipped to the grid.
    pub fn footprint(&self, center: GridCoord, radius: u32) -> CellRect {
        assert!(self.contains(center), "footprint centre {} outside grid", center);
        CellRect::around(center, radius, self.rows, self.cols)
    }

    /// In-bounds 4-neighbours in the fixed order down, up, right, left.
    pub fn neighbours4(&self, coord: GridCoord) -> impl Iterator<Item = GridCoord> + use<> {
        coord.neighbours4(self.rows, self.cols)
    }

    pub fn counts(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for state in &self.cells {
            match state {
                CellState::Free => counts.free += 1,
                CellState::Obstructed => counts.obstructed += 1,
                CellState::Covered => counts.covered += 1,
            }
        }
        counts
    }

    pub fn relays(&self) -> &[GridCoord] {
        &self.relays
    }

    pub fn is_relay(&self, coord: GridCoord) -> bool {
        self.relays.binary_search(&coord).is_ok()
    }

    /// Records a relay centre. Centres must arrive in row-major order.
    pub fn add_relay(&mut self, center: GridCoord) {
        assert!(self.contains(center), "relay {} outside grid", center);
        debug_assert!(
            self.relays.last().is_none_or(|&last| last < center),
            "relays must be added in row-major order"
        );
        self.relays.push(center);
    }

    pub fn is_planned(&self) -> bool {
        self.planned
    }

    pub fn mark_planned(&mut self) {
        self.planned = true;
    }
}
