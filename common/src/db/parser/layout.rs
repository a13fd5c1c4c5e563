//! Plain-text grid layouts, one line per row.
//!
//! `.` free, `#` obstructed, `+` covered, `T` covered relay centre. Blank
//! lines and lines starting with `;` are skipped.

use crate::db::core::{CellState, ServiceGrid};
use crate::geom::coord::GridCoord;
use crate::util::visualization::{
    self, GLYPH_COVERED, GLYPH_FREE, GLYPH_OBSTRUCTED, GLYPH_RELAY,
};
use anyhow::{Result, anyhow, bail};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};

pub fn parse(filename: &str) -> Result<ServiceGrid> {
    let file = File::open(filename)?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }
    parse_lines(lines.iter().map(String::as_str))
}

pub fn parse_str(text: &str) -> Result<ServiceGrid> {
    parse_lines(text.lines())
}

fn parse_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Result<ServiceGrid> {
    let mut rows: Vec<(usize, Vec<char>)> = Vec::new();

    for (line_no, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        let row: Vec<char> = line.chars().collect();
        if let Some((first_no, first)) = rows.first() {
            if row.len() != first.len() {
                bail!(
                    "line {}: row has {} cells, expected {} (from line {})",
                    line_no + 1,
                    row.len(),
                    first.len(),
                    first_no + 1
                );
            }
        }
        rows.push((line_no, row));
    }

    let num_rows = rows.len() as u32;
    let num_cols = rows.first().map_or(0, |(_, r)| r.len() as u32);
    let mut grid =
        ServiceGrid::new(num_rows, num_cols).map_err(|e| anyhow!("empty layout: {}", e))?;
    let mut planned = false;

    for (r, (line_no, row)) in rows.iter().enumerate() {
        for (c, &ch) in row.iter().enumerate() {
            let coord = GridCoord::new(r as u32, c as u32);
            let state = match ch {
                GLYPH_FREE => CellState::Free,
                GLYPH_OBSTRUCTED => CellState::Obstructed,
                GLYPH_COVERED => CellState::Covered,
                GLYPH_RELAY => {
                    grid.add_relay(coord);
                    CellState::Covered
                }
                other => bail!(
                    "line {}, column {}: unknown cell character '{}'",
                    line_no + 1,
                    c + 1,
                    other
                ),
            };
            if state == CellState::Covered {
                planned = true;
            }
            grid.set_state(coord, state);
        }
    }

    if planned {
        grid.mark_planned();
    }

    log::info!(
        "Loaded {}x{} layout ({} obstacles, {} relays)",
        grid.rows(),
        grid.cols(),
        grid.counts().obstructed,
        grid.relays().len()
    );
    Ok(grid)
}

pub fn save(grid: &ServiceGrid, filename: &str) -> std::io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(
        file,
        "; {}x{} service grid, {} relays",
        grid.rows(),
        grid.cols(),
        grid.relays().len()
    )?;
    file.write_all(visualization::render_ascii(grid, None).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_cell_kinds() {
        let grid = parse_str("; demo\n.#+\n\nT..\n").unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 3));
        assert_eq!(grid.state(GridCoord::new(0, 1)), CellState::Obstructed);
        assert_eq!(grid.state(GridCoord::new(0, 2)), CellState::Covered);
        assert_eq!(grid.state(GridCoord::new(1, 0)), CellState::Covered);
        assert_eq!(grid.relays(), &[GridCoord::new(1, 0)]);
        assert!(grid.is_planned());
    }

    #[test]
    fn unplanned_layout() {
        let grid = parse_str("..#\n...\n").unwrap();
        assert!(!grid.is_planned());
        assert_eq!(grid.counts().obstructed, 1);
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = parse_str("...\n..\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn rejects_unknown_characters() {
        let err = parse_str("..x\n").unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn rejects_empty_layout() {
        assert!(parse_str("; nothing here\n\n").is_err());
    }

    #[test]
    fn saved_layout_loads_back() {
        let mut grid = ServiceGrid::new(2, 2).unwrap();
        grid.set_state(GridCoord::new(0, 0), CellState::Covered);
        grid.add_relay(GridCoord::new(0, 0));
        grid.set_state(GridCoord::new(1, 1), CellState::Obstructed);

        let path = std::env::temp_dir().join(format!("relay-layout-{}.txt", std::process::id()));
        let path = path.to_str().unwrap().to_string();
        save(&grid, &path).unwrap();
        let loaded = parse(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.cells(), grid.cells());
        assert_eq!(loaded.relays(), grid.relays());
    }
}
