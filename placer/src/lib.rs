pub mod coverage;

pub use coverage::greedy::GreedyPlanner;
pub use coverage::{CoveragePlanner, PlanReport};
pub use relay_common::util::config::ObstaclePolicy;
