use crate::geom::coord::GridCoord;
use thiserror::Error;

/// Contract violations raised by grid construction, planning and search.
///
/// All of them are detected before the grid is touched, so a failed call
/// leaves the grid exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimension { rows: u32, cols: u32 },

    #[error("obstacle fraction {0} is outside [0, 1)")]
    InvalidFraction(f64),

    #[error("coordinate {coord} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        coord: GridCoord,
        rows: u32,
        cols: u32,
    },

    #[error("obstacles can only be placed on a fresh, unplanned grid")]
    NotFresh,

    #[error("grid has already been planned")]
    AlreadyPlanned,
}
