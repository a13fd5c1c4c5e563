use crate::db::core::{CellState, ServiceGrid};
use rayon::prelude::*;

/// Post-planning verification. Every `Free` cell must have a `Covered` cell
/// within `radius` (the sweep skips such cells as already served), and every
/// `Covered` cell must be within `radius` of a recorded relay centre.
pub fn run_coverage_check(grid: &ServiceGrid, radius: u32) -> Result<(), String> {
    log::info!("Starting Coverage Verification...");

    let mut msgs = Vec::new();

    let free: Vec<_> = (0..grid.cell_count())
        .into_par_iter()
        .filter(|&i| grid.cells()[i] == CellState::Free)
        .map(|i| grid.coord_of(i))
        .collect();

    let unserved: Vec<_> = free
        .par_iter()
        .copied()
        .filter(|&c| {
            !grid
                .footprint(c, radius)
                .iter()
                .any(|n| grid.state(n) == CellState::Covered)
        })
        .collect();

    if !free.is_empty() {
        log::warn!(
            "{} free cells were skipped next to existing coverage",
            free.len() - unserved.len()
        );
    }

    if unserved.is_empty() {
        log::info!("\x1b[32mPASS\x1b[0m: No unserved cells remain.");
    } else {
        log::error!(
            "\x1b[31mFAIL\x1b[0m: {} free cells have no coverage in range (first at {})",
            unserved.len(),
            unserved[0]
        );
        msgs.push(format!("{} unserved cells", unserved.len()));
    }

    let orphans: Vec<_> = (0..grid.cell_count())
        .into_par_iter()
        .filter(|&i| grid.cells()[i] == CellState::Covered)
        .map(|i| grid.coord_of(i))
        .filter(|&c| !grid.footprint(c, radius).iter().any(|n| grid.is_relay(n)))
        .collect();

    if orphans.is_empty() {
        log::info!("\x1b[32mPASS\x1b[0m: Every covered cell has a relay in range.");
    } else {
        log::error!(
            "\x1b[31mFAIL\x1b[0m: {} covered cells have no relay within radius {} (first at {})",
            orphans.len(),
            radius,
            orphans[0]
        );
        msgs.push(format!("{} covered cells without a relay", orphans.len()));
    }

    if msgs.is_empty() {
        log::info!(
            "\x1b[32mSUCCESS\x1b[0m: {} relays cover the grid",
            grid.relays().len()
        );
        Ok(())
    } else {
        Err(msgs.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::parser::layout;

    #[test]
    fn radius_decides_orphans() {
        let grid = layout::parse_str("+++#\n+T++\n++++\n").unwrap();
        assert!(run_coverage_check(&grid, 1).is_err());
        assert!(run_coverage_check(&grid, 2).is_ok());
    }

    #[test]
    fn reports_unserved_cells() {
        let grid = layout::parse_str("T.\n").unwrap();
        let err = run_coverage_check(&grid, 0).unwrap_err();
        assert!(err.contains("1 unserved"));
    }

    #[test]
    fn tolerates_free_cells_next_to_coverage() {
        let grid = layout::parse_str("T\n+\n.\n").unwrap();
        assert!(run_coverage_check(&grid, 1).is_ok());
    }

    #[test]
    fn reports_orphan_coverage() {
        let grid = layout::parse_str("T+++\n").unwrap();
        let err = run_coverage_check(&grid, 1).unwrap_err();
        assert!(err.contains("2 covered cells without a relay"));
    }
}
