use crate::algo::bfs::{Bfs, Hops};
use crate::grid::TraversalGrid;
use rayon::prelude::*;
use relay_common::error::GridError;
use relay_common::geom::coord::GridCoord;
use relay_common::util::profiler::ScopedTimer;

fn check_bounds<G: TraversalGrid + ?Sized>(grid: &G, coord: GridCoord) -> Result<(), GridError> {
    if coord.row < grid.rows() && coord.col < grid.cols() {
        Ok(())
    } else {
        Err(GridError::OutOfBounds {
            coord,
            rows: grid.rows(),
            cols: grid.cols(),
        })
    }
}

/// Shortest hop count between two cells over non-obstructed terrain.
pub fn hop_distance<G: TraversalGrid + ?Sized>(
    grid: &G,
    start: GridCoord,
    end: GridCoord,
) -> Result<Hops, GridError> {
    check_bounds(grid, start)?;
    check_bounds(grid, end)?;

    let hops = Bfs::new().hop_count(grid, start, end);
    log::debug!("{} -> {}: {}", start, end, hops);
    Ok(hops)
}

/// A shortest path from `start` to `end`, both inclusive, or `None` when
/// `end` cannot be reached.
pub fn find_path<G: TraversalGrid + ?Sized>(
    grid: &G,
    start: GridCoord,
    end: GridCoord,
) -> Result<Option<Vec<GridCoord>>, GridError> {
    check_bounds(grid, start)?;
    check_bounds(grid, end)?;

    Ok(Bfs::new().find_path(grid, start, end))
}

/// Answers independent queries in parallel against a finalized grid. All
/// coordinates are validated before any search runs.
pub fn hop_distances_batch<G: TraversalGrid + ?Sized>(
    grid: &G,
    queries: &[(GridCoord, GridCoord)],
) -> Result<Vec<Hops>, GridError> {
    for &(start, end) in queries {
        check_bounds(grid, start)?;
        check_bounds(grid, end)?;
    }

    let _timer = ScopedTimer::new(format!("{} connectivity queries", queries.len()));
    let results: Vec<Hops> = queries
        .par_iter()
        .map_with(Bfs::new(), |bfs, &(start, end)| bfs.hop_count(grid, start, end))
        .collect();

    let unreachable = results.iter().filter(|h| !h.is_reachable()).count();
    if unreachable > 0 {
        log::info!("{} of {} queries unreachable", unreachable, queries.len());
    }
    Ok(results)
}
