use super::{CoveragePlanner, PlanReport};
use relay_common::db::core::{CellState, ServiceGrid};
use relay_common::error::GridError;
use relay_common::geom::coord::GridCoord;
use relay_common::util::config::{CoverageConfig, ObstaclePolicy};
use relay_common::util::profiler::ScopedTimer;

/// Single row-major sweep. A `Free` cell becomes a relay centre unless some
/// cell in its footprint is already `Covered`. Cells are never revisited.
pub struct GreedyPlanner {
    radius: u32,
    obstacle_policy: ObstaclePolicy,
}

impl GreedyPlanner {
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            obstacle_policy: ObstaclePolicy::Overwrite,
        }
    }

    pub fn with_policy(mut self, policy: ObstaclePolicy) -> Self {
        self.obstacle_policy = policy;
        self
    }

    pub fn from_config(config: &CoverageConfig) -> Self {
        Self::new(config.radius).with_policy(config.obstacle_policy)
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    fn is_served(&self, grid: &ServiceGrid, coord: GridCoord) -> bool {
        grid.footprint(coord, self.radius)
            .iter()
            .any(|c| grid.state(c) == CellState::Covered)
    }

    fn place_relay(&self, grid: &mut ServiceGrid, center: GridCoord, report: &mut PlanReport) {
        grid.add_relay(center);
        report.relays += 1;

        for c in grid.footprint(center, self.radius).iter() {
            match grid.state(c) {
                CellState::Free => report.newly_covered += 1,
                CellState::Obstructed => match self.obstacle_policy {
                    ObstaclePolicy::Overwrite => report.obstacles_erased += 1,
                    ObstaclePolicy::Preserve => continue,
                },
                CellState::Covered => {}
            }
            grid.set_state(c, CellState::Covered);
        }
    }
}

impl CoveragePlanner for GreedyPlanner {
    fn plan(&self, grid: &mut ServiceGrid) -> Result<PlanReport, GridError> {
        if grid.is_planned() {
            return Err(GridError::AlreadyPlanned);
        }
        let _timer = ScopedTimer::new("Coverage planning");
        log::info!(
            "Planning coverage on {}x{} grid (radius {}, {:?})",
            grid.rows(),
            grid.cols(),
            self.radius,
            self.obstacle_policy
        );

        let mut report = PlanReport::default();
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let coord = GridCoord::new(row, col);
                if grid.state(coord) != CellState::Free || self.is_served(grid, coord) {
                    continue;
                }
                log::debug!("Relay at {}", coord);
                self.place_relay(grid, coord, &mut report);
            }
        }
        grid.mark_planned();

        if report.obstacles_erased > 0 {
            log::warn!(
                "{} obstructed cells were overwritten by relay coverage",
                report.obstacles_erased
            );
        }
        log::info!(
            "Placed {} relays covering {} free cells",
            report.relays,
            report.newly_covered
        );
        Ok(report)
    }
}
