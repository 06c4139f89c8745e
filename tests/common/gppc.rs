//! Loader for the GPPC (Grid-based Path Planning Competition) map and
//! scenario formats, feeding competition maps straight into the solvers.
//!
//! A map file reads:
//!
//! ```text
//! type octile
//! height 3
//! width 3
//! map
//! .G.
//! @@.
//! ...
//! ```
//!
//! where `.` and `G` are passable and anything else is a wall. A scenario
//! file is an optional `version` header followed by one experiment per
//! line; version 0 rows read `bunk bucket x0 y0 x1 y1 dist`, version 1
//! rows read `bunk map mw mh x0 y0 x1 y1 dist`.

use amble::Grid;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GppcError {
    #[error("malformed map header: {0}")]
    Header(String),
    #[error("map row {row} has {actual} cells, expected {expected}")]
    Row { row: usize, expected: usize, actual: usize },
    #[error("map has {actual} rows, expected {expected}")]
    RowCount { expected: usize, actual: usize },
    #[error("malformed scenario line: {0}")]
    Scenario(String),
}

/// One experiment of a scenario file: a start, a goal and the reference
/// optimal distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    pub start: [usize; 2],
    pub end: [usize; 2],
    pub distance: f64,
}

/// Parses a GPPC map into a boolean grid (`false` = open).
pub fn parse_map(text: &str) -> Result<Grid<2>, GppcError> {
    let header = Regex::new(
        r"(?s)^type \w+\s*\nheight (\d+)\s*\nwidth (\d+)\s*\nmap\s*\n",
    )
    .expect("the header pattern is well formed");

    let captures = header
        .captures(text)
        .ok_or_else(|| GppcError::Header(text.lines().take(4).collect::<Vec<_>>().join("|")))?;
    let height: usize = captures[1].parse().map_err(|_| GppcError::Header(text.into()))?;
    let width: usize = captures[2].parse().map_err(|_| GppcError::Header(text.into()))?;

    let body = &text[captures.get(0).map(|m| m.end()).unwrap_or(0)..];
    let mut grid = Grid::with_nodes([width, height], vec![true; width * height])
        .expect("extent and node count agree by construction");

    let mut rows = 0;
    for (y, line) in body.lines().take_while(|line| !line.is_empty()).enumerate() {
        if line.chars().count() != width {
            return Err(GppcError::Row { row: y, expected: width, actual: line.chars().count() });
        }
        for (x, glyph) in line.chars().enumerate() {
            if glyph == '.' || glyph == 'G' {
                grid.set(&[x, y], false);
            }
        }
        rows += 1;
    }
    if rows != height {
        return Err(GppcError::RowCount { expected: height, actual: rows });
    }

    Ok(grid)
}

/// Parses a GPPC scenario file into its experiments.
pub fn parse_scenarios(text: &str) -> Result<Vec<Experiment>, GppcError> {
    let mut lines = text.lines().peekable();

    let version = match lines.peek() {
        Some(line) if line.starts_with("version") => {
            let line = lines.next().expect("peeked");
            line.split_whitespace()
                .nth(1)
                .and_then(|v| v.parse::<f64>().ok())
                .ok_or_else(|| GppcError::Scenario(line.into()))? as u32
        }
        _ => 0,
    };

    let mut experiments = vec![];
    for line in lines.filter(|line| !line.trim().is_empty()) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let expect = if version == 0 { 7 } else { 9 };
        if fields.len() != expect {
            return Err(GppcError::Scenario(line.into()));
        }

        // v0: bunk bucket x0 y0 x1 y1 dist / v1: bunk map mw mh x0 y0 x1 y1 dist
        let at = if version == 0 { 2 } else { 4 };
        let coord = |i: usize| -> Result<usize, GppcError> {
            fields[i].parse().map_err(|_| GppcError::Scenario(line.into()))
        };
        experiments.push(Experiment {
            start: [coord(at)?, coord(at + 1)?],
            end: [coord(at + 2)?, coord(at + 3)?],
            distance: fields[at + 4]
                .parse()
                .map_err(|_| GppcError::Scenario(line.into()))?,
        });
    }

    Ok(experiments)
}
