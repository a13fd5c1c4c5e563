use crate::db::core::{CellState, ServiceGrid};
use crate::geom::coord::GridCoord;
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_line_segment_mut,
};
use imageproc::rect::Rect as ImageRect;
use std::collections::HashSet;
use std::path::Path;

pub const GLYPH_FREE: char = '.';
pub const GLYPH_OBSTRUCTED: char = '#';
pub const GLYPH_COVERED: char = '+';
pub const GLYPH_RELAY: char = 'T';
pub const GLYPH_PATH: char = '*';

pub fn glyph(grid: &ServiceGrid, coord: GridCoord) -> char {
    match grid.state(coord) {
        CellState::Free => GLYPH_FREE,
        CellState::Obstructed => GLYPH_OBSTRUCTED,
        CellState::Covered if grid.is_relay(coord) => GLYPH_RELAY,
        CellState::Covered => GLYPH_COVERED,
    }
}

/// One text line per grid row. Path cells, if given, are drawn over the
/// underlying classification.
pub fn render_ascii(grid: &ServiceGrid, path: Option<&[GridCoord]>) -> String {
    let on_path: HashSet<GridCoord> = path.into_iter().flatten().copied().collect();
    let mut out = String::with_capacity(grid.cell_count() + grid.rows() as usize);

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let coord = GridCoord::new(row, col);
            if on_path.contains(&coord) {
                out.push(GLYPH_PATH);
            } else {
                out.push(glyph(grid, coord));
            }
        }
        out.push('\n');
    }
    out
}

/// Draws the grid as a PNG with `cell_px` pixels per cell. Row 0 is at the top.
pub fn draw_grid_png(
    grid: &ServiceGrid,
    path: Option<&[GridCoord]>,
    filename: &str,
    cell_px: u32,
) -> image::ImageResult<()> {
    let cell_px = cell_px.max(4);
    let width = grid.cols() * cell_px;
    let height = grid.rows() * cell_px;
    let mut img = RgbImage::from_pixel(width, height, Rgb([20, 20, 20]));

    let color_free = Rgb([40, 170, 70]);
    let color_obstructed = Rgb([200, 50, 50]);
    let color_covered = Rgb([50, 90, 220]);
    let color_relay = Rgb([255, 215, 0]);
    let color_grid = Rgb([60, 60, 60]);
    let color_path = Rgb([240, 240, 240]);

    let center = |c: GridCoord| {
        (
            (c.col * cell_px + cell_px / 2) as i32,
            (c.row * cell_px + cell_px / 2) as i32,
        )
    };
    let radius = (cell_px as i32 / 2 - 2).max(1);

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let coord = GridCoord::new(row, col);
            let rect = ImageRect::at((col * cell_px) as i32, (row * cell_px) as i32)
                .of_size(cell_px, cell_px);
            draw_filled_rect_mut(&mut img, rect, color_grid);
            let inner = ImageRect::at((col * cell_px) as i32 + 1, (row * cell_px) as i32 + 1)
                .of_size(cell_px - 2, cell_px - 2);
            draw_filled_rect_mut(&mut img, inner, Rgb([20, 20, 20]));

            let color = match grid.state(coord) {
                CellState::Free => color_free,
                CellState::Obstructed => color_obstructed,
                CellState::Covered => color_covered,
            };
            draw_filled_circle_mut(&mut img, center(coord), radius, color);
        }
    }

    for &relay in grid.relays() {
        draw_hollow_circle_mut(&mut img, center(relay), radius, color_relay);
        draw_filled_circle_mut(&mut img, center(relay), (radius / 3).max(1), color_relay);
    }

    if let Some(path) = path {
        for pair in path.windows(2) {
            let (x1, y1) = center(pair[0]);
            let (x2, y2) = center(pair[1]);
            draw_line_segment_mut(
                &mut img,
                (x1 as f32, y1 as f32),
                (x2 as f32, y2 as f32),
                color_path,
            );
            // Double stroke so the path survives downscaling.
            draw_line_segment_mut(
                &mut img,
                ((x1 + 1) as f32, (y1 + 1) as f32),
                ((x2 + 1) as f32, (y2 + 1) as f32),
                color_path,
            );
        }
    }

    img.save(Path::new(filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_uses_cell_alphabet() {
        let mut grid = ServiceGrid::new(2, 3).unwrap();
        grid.set_state(GridCoord::new(0, 1), CellState::Obstructed);
        grid.set_state(GridCoord::new(1, 0), CellState::Covered);
        grid.set_state(GridCoord::new(1, 1), CellState::Covered);
        grid.add_relay(GridCoord::new(1, 1));
        assert_eq!(render_ascii(&grid, None), ".#.\n+T.\n");
    }

    #[test]
    fn ascii_overlays_path() {
        let grid = ServiceGrid::new(2, 2).unwrap();
        let path = [GridCoord::new(0, 0), GridCoord::new(0, 1), GridCoord::new(1, 1)];
        assert_eq!(render_ascii(&grid, Some(&path)), "**\n.*\n");
    }
}
