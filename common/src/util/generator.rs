use crate::db::core::{CellState, ServiceGrid};
use crate::error::GridError;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Source of distinct cell indices for obstacle placement.
pub trait IndexSampler {
    /// Returns `amount` distinct values drawn from `0..length`.
    fn sample_distinct(&mut self, amount: usize, length: usize) -> Vec<usize>;
}

/// Uniform sampling without replacement backed by `StdRng`.
pub struct RandomSampler {
    rng: StdRng,
}

impl RandomSampler {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl IndexSampler for RandomSampler {
    fn sample_distinct(&mut self, amount: usize, length: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, length, amount).into_vec()
    }
}

/// `floor(fraction * rows * cols)`, rejecting fractions outside `[0, 1)`.
pub fn obstacle_count(fraction: f64, rows: u32, cols: u32) -> Result<usize, GridError> {
    if !(0.0..1.0).contains(&fraction) {
        return Err(GridError::InvalidFraction(fraction));
    }
    let total = (rows as usize) * (cols as usize);
    let count = (fraction * total as f64).floor() as usize;
    if count > total {
        return Err(GridError::InvalidFraction(fraction));
    }
    Ok(count)
}

/// Obstructs `floor(fraction * cells)` distinct cells of `grid`, mapping each
/// sampled index to `(index / cols, index % cols)`. Returns how many were placed.
///
/// Only a fresh grid (all `Free`, never planned) accepts obstacles, and the
/// sampler output is validated before the first cell changes.
pub(crate) fn place_obstacles<S: IndexSampler + ?Sized>(
    grid: &mut ServiceGrid,
    fraction: f64,
    sampler: &mut S,
) -> Result<usize, GridError> {
    let count = obstacle_count(fraction, grid.rows(), grid.cols())?;
    if grid.is_planned() || grid.cells().iter().any(|&s| s != CellState::Free) {
        return Err(GridError::NotFresh);
    }
    let total = grid.cell_count();

    let indices = sampler.sample_distinct(count, total);
    assert_eq!(
        indices.len(),
        count,
        "sampler returned {} indices, expected {}",
        indices.len(),
        count
    );

    let mut seen = vec![false; total];
    for &index in &indices {
        assert!(
            index < total && !seen[index],
            "sampler returned invalid or duplicate index {}",
            index
        );
        seen[index] = true;
    }

    for index in indices {
        let coord = grid.coord_of(index);
        grid.set_state(coord, CellState::Obstructed);
    }

    log::info!(
        "Placed {} obstacles on {}x{} grid ({:.1}%)",
        count,
        grid.rows(),
        grid.cols(),
        fraction * 100.0
    );
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::parser::layout;
    use crate::geom::coord::GridCoord;
    use proptest::prelude::*;

    struct FixedSampler(Vec<usize>);

    impl IndexSampler for FixedSampler {
        fn sample_distinct(&mut self, amount: usize, _length: usize) -> Vec<usize> {
            self.0.iter().copied().take(amount).collect()
        }
    }

    #[test]
    fn count_floors_product() {
        assert_eq!(obstacle_count(0.3, 10, 10).unwrap(), 30);
        assert_eq!(obstacle_count(0.25, 3, 3).unwrap(), 2);
        assert_eq!(obstacle_count(0.0, 7, 7).unwrap(), 0);
        assert_eq!(obstacle_count(0.999, 10, 10).unwrap(), 99);
    }

    #[test]
    fn rejects_fraction_outside_unit_interval() {
        assert_eq!(
            obstacle_count(1.0, 2, 2),
            Err(GridError::InvalidFraction(1.0))
        );
        assert!(obstacle_count(-0.1, 2, 2).is_err());
        assert!(obstacle_count(f64::NAN, 2, 2).is_err());
    }

    #[test]
    fn index_maps_row_major() {
        let mut grid = ServiceGrid::new(3, 4).unwrap();
        let mut sampler = FixedSampler(vec![5, 11]);
        let placed = place_obstacles(&mut grid, 0.2, &mut sampler).unwrap();
        assert_eq!(placed, 2);
        assert_eq!(grid.state(GridCoord::new(1, 1)), CellState::Obstructed);
        assert_eq!(grid.state(GridCoord::new(2, 3)), CellState::Obstructed);
        assert_eq!(grid.counts().obstructed, 2);
    }

    #[test]
    #[should_panic(expected = "duplicate")]
    fn duplicate_indices_are_a_sampler_bug() {
        let mut grid = ServiceGrid::new(3, 4).unwrap();
        let mut sampler = FixedSampler(vec![5, 5]);
        let _ = place_obstacles(&mut grid, 0.2, &mut sampler);
    }

    #[test]
    fn duplicate_indices_leave_grid_untouched() {
        let mut grid = ServiceGrid::new(3, 4).unwrap();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            place_obstacles(&mut grid, 0.2, &mut FixedSampler(vec![5, 5]))
        }));
        assert!(result.is_err());
        assert_eq!(grid.counts().free, 12);
    }

    #[test]
    fn obstructed_grid_is_rejected_unchanged() {
        let mut grid = layout::parse_str("..#.\n").unwrap();
        let before = grid.cells().to_vec();
        assert_eq!(
            place_obstacles(&mut grid, 0.5, &mut FixedSampler(vec![0, 2])),
            Err(GridError::NotFresh)
        );
        assert_eq!(grid.cells(), &before[..]);
    }

    #[test]
    fn planned_grid_is_rejected_unchanged() {
        let mut grid = layout::parse_str("T+\n++\n").unwrap();
        let before = grid.cells().to_vec();
        assert_eq!(
            place_obstacles(&mut grid, 0.5, &mut FixedSampler(vec![0, 3])),
            Err(GridError::NotFresh)
        );
        assert_eq!(grid.cells(), &before[..]);
        assert_eq!(grid.relays(), &[GridCoord::new(0, 0)]);
    }

    #[test]
    fn generation_fails_before_allocating_on_bad_fraction() {
        let mut sampler = RandomSampler::seeded(1);
        assert_eq!(
            ServiceGrid::generate(4, 4, 1.5, &mut sampler).unwrap_err(),
            GridError::InvalidFraction(1.5)
        );
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = ServiceGrid::generate(12, 9, 0.4, &mut RandomSampler::seeded(42)).unwrap();
        let b = ServiceGrid::generate(12, 9, 0.4, &mut RandomSampler::seeded(42)).unwrap();
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn zero_fraction_leaves_grid_free() {
        let grid = ServiceGrid::generate(6, 6, 0.0, &mut RandomSampler::seeded(3)).unwrap();
        assert_eq!(grid.counts().free, 36);
    }

    proptest! {
        #[test]
        fn exact_number_of_distinct_obstacles(
            rows in 1u32..20,
            cols in 1u32..20,
            fraction in 0.0f64..0.999,
            seed in any::<u64>(),
        ) {
            let grid = ServiceGrid::generate(rows, cols, fraction, &mut RandomSampler::seeded(seed)).unwrap();
            let expected = (fraction * (rows * cols) as f64).floor() as usize;
            let counts = grid.counts();
            prop_assert_eq!(counts.obstructed, expected);
            prop_assert_eq!(counts.free, (rows * cols) as usize - expected);
            prop_assert_eq!(counts.covered, 0);
        }
    }
}
