use crate::grid::TraversalGrid;
use relay_common::geom::coord::GridCoord;
use std::collections::VecDeque;
use std::fmt;

/// Result of a hop-count query. `Unreachable` is an answer, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hops {
    Reachable(u32),
    Unreachable,
}

impl Hops {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Hops::Reachable(_))
    }

    /// Hop count of an inclusive cell path, `Unreachable` for no path.
    pub fn along(path: Option<&[GridCoord]>) -> Self {
        match path {
            Some(path) if !path.is_empty() => Hops::Reachable(path.len() as u32 - 1),
            _ => Hops::Unreachable,
        }
    }

    pub fn count(&self) -> Option<u32> {
        match *self {
            Hops::Reachable(n) => Some(n),
            Hops::Unreachable => None,
        }
    }
}

impl fmt::Display for Hops {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hops::Reachable(n) => write!(f, "{} hops", n),
            Hops::Unreachable => write!(f, "unreachable"),
        }
    }
}

const NO_PARENT: u32 = u32::MAX;

/// Breadth-first search context. Buffers are sized to the largest grid seen
/// and invalidated between queries by bumping `current_tag`, so one context
/// can serve many queries without clearing.
#[derive(Clone)]
pub struct Bfs {
    parents: Vec<u32>,
    hops: Vec<u32>,
    visited_tag: Vec<u32>,
    current_tag: u32,
    queue: VecDeque<u32>,
}

impl Default for Bfs {
    fn default() -> Self {
        Self::new()
    }
}

impl Bfs {
    pub fn new() -> Self {
        Self {
            parents: Vec::new(),
            hops: Vec::new(),
            visited_tag: Vec::new(),
            current_tag: 1,
            queue: VecDeque::new(),
        }
    }

    fn ensure_capacity(&mut self, size: usize) {
        if size > self.visited_tag.len() {
            self.parents.resize(size, NO_PARENT);
            self.hops.resize(size, 0);
            self.visited_tag.resize(size, 0);
        }
    }

    fn reset(&mut self) {
        self.current_tag = self.current_tag.wrapping_add(1);
        if self.current_tag == 0 {
            self.visited_tag.fill(0);
            self.current_tag = 1;
        }
        self.queue.clear();
    }

    #[inline(always)]
    fn visit(&mut self, idx: usize, parent: u32, hops: u32) {
        self.visited_tag[idx] = self.current_tag;
        self.parents[idx] = parent;
        self.hops[idx] = hops;
        self.queue.push_back(idx as u32);
    }

    /// Runs the search and leaves the predecessor map of the explored region
    /// in `parents`. Both coordinates must be in bounds.
    fn search<G: TraversalGrid + ?Sized>(
        &mut self,
        grid: &G,
        start: GridCoord,
        end: GridCoord,
    ) -> Option<usize> {
        assert!(
            grid.cell_count() <= u32::MAX as usize,
            "grid of {} cells exceeds u32 cell indices",
            grid.cell_count()
        );
        self.ensure_capacity(grid.cell_count());
        self.reset();

        let end_idx = grid.index(end);
        self.visit(grid.index(start), NO_PARENT, 0);

        while let Some(curr) = self.queue.pop_front() {
            let curr_idx = curr as usize;
            if curr_idx == end_idx {
                return Some(curr_idx);
            }

            let next_hops = self.hops[curr_idx] + 1;
            for neighbor in grid.neighbours4(grid.coord(curr_idx)) {
                let idx = grid.index(neighbor);
                if self.visited_tag[idx] == self.current_tag || !grid.is_enterable(neighbor) {
                    continue;
                }
                self.visit(idx, curr, next_hops);
            }
        }
        None
    }

    /// Minimum number of 4-connected hops from `start` to `end`.
    /// Both coordinates must be in bounds.
    pub fn hop_count<G: TraversalGrid + ?Sized>(
        &mut self,
        grid: &G,
        start: GridCoord,
        end: GridCoord,
    ) -> Hops {
        match self.search(grid, start, end) {
            Some(idx) => Hops::Reachable(self.hops[idx]),
            None => Hops::Unreachable,
        }
    }

    /// One shortest path, `start` and `end` inclusive.
    pub fn find_path<G: TraversalGrid + ?Sized>(
        &mut self,
        grid: &G,
        start: GridCoord,
        end: GridCoord,
    ) -> Option<Vec<GridCoord>> {
        let end_idx = self.search(grid, start, end)?;
        Some(self.reconstruct_path(grid, end_idx))
    }

    fn reconstruct_path<G: TraversalGrid + ?Sized>(
        &self,
        grid: &G,
        end_idx: usize,
    ) -> Vec<GridCoord> {
        let mut path = Vec::with_capacity(self.hops[end_idx] as usize + 1);
        let mut curr = end_idx;
        loop {
            path.push(grid.coord(curr));
            let parent = self.parents[curr];
            if parent == NO_PARENT {
                break;
            }
            curr = parent as usize;
        }
        path.reverse();
        path
    }
}
