use super::TraversalGrid;
use relay_common::db::core::ServiceGrid;
use relay_common::geom::coord::GridCoord;

// Covered and free cells are both passable; only obstructions block a hop.
impl TraversalGrid for ServiceGrid {
    fn rows(&self) -> u32 {
        ServiceGrid::rows(self)
    }
    fn cols(&self) -> u32 {
        ServiceGrid::cols(self)
    }

    #[inline(always)]
    fn is_enterable(&self, coord: GridCoord) -> bool {
        self.is_traversable(coord)
    }

    fn neighbours4(&self, coord: GridCoord) -> impl Iterator<Item = GridCoord> {
        ServiceGrid::neighbours4(self, coord)
    }
}
