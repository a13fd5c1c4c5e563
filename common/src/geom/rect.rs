use super::coord::GridCoord;

/// Inclusive rectangle of cells, `min..=max` on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub min: GridCoord,
    pub max: GridCoord,
}

impl CellRect {
    /// Square of side `2 * radius + 1` around `center`, clipped to a
    /// `rows x cols` extent. `center` must lie inside the extent.
    pub fn around(center: GridCoord, radius: u32, rows: u32, cols: u32) -> Self {
        Self {
            min: GridCoord::new(
                center.row.saturating_sub(radius),
                center.col.saturating_sub(radius),
            ),
            max: GridCoord::new(
                center.row.saturating_add(radius).min(rows - 1),
                center.col.saturating_add(radius).min(cols - 1),
            ),
        }
    }

    /// Row-major walk over every cell of the rectangle.
    pub fn iter(&self) -> impl Iterator<Item = GridCoord> + use<> {
        let (min, max) = (self.min, self.max);
        (min.row..=max.row)
            .flat_map(move |row| (min.col..=max.col).map(move |col| GridCoord::new(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn around_clips_to_extent() {
        let r = CellRect::around(GridCoord::new(0, 4), 2, 5, 5);
        assert_eq!(r.min, GridCoord::new(0, 2));
        assert_eq!(r.max, GridCoord::new(2, 4));
        assert_eq!(r.iter().count(), 9);
    }

    #[test]
    fn zero_radius_is_single_cell() {
        let c = GridCoord::new(3, 3);
        let r = CellRect::around(c, 0, 10, 10);
        assert_eq!(r.iter().collect::<Vec<_>>(), vec![c]);
    }

    #[test]
    fn huge_radius_covers_everything() {
        let r = CellRect::around(GridCoord::new(1, 1), u32::MAX, 3, 4);
        assert_eq!(r.iter().count(), 12);
        assert_eq!(r.max, GridCoord::new(2, 3));
    }

    #[test]
    fn iter_is_row_major() {
        let r = CellRect::around(GridCoord::new(2, 2), 1, 3, 3);
        let cells: Vec<_> = r.iter().collect();
        assert_eq!(
            cells,
            vec![
                GridCoord::new(1, 1),
                GridCoord::new(1, 2),
                GridCoord::new(2, 1),
                GridCoord::new(2, 2),
            ]
        );
    }
}
