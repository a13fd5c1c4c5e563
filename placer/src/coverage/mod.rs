pub mod greedy;

use relay_common::{GridError, ServiceGrid};

/// Outcome of a single planning pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlanReport {
    pub relays: usize,
    /// Cells that went from `Free` to `Covered`.
    pub newly_covered: usize,
    /// `Obstructed` cells turned `Covered` by a footprint.
    pub obstacles_erased: usize,
}

pub trait CoveragePlanner {
    /// Marks relay footprints on `grid`. Fails with
    /// [`GridError::AlreadyPlanned`] without touching a grid that was
    /// planned before.
    fn plan(&self, grid: &mut ServiceGrid) -> Result<PlanReport, GridError>;
}
