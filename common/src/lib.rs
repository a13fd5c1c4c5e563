pub mod db;
pub mod error;
pub mod geom;
pub mod util;

pub use db::core::{CellCounts, CellState, ServiceGrid};
pub use error::GridError;
pub use geom::coord::GridCoord;
