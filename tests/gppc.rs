//! The GPPC loader: map parsing, scenario parsing and an end-to-end run of
//! a competition-style experiment.

mod common;

use amble::*;
use common::gppc::{parse_map, parse_scenarios, GppcError};
use common::solve_grid;

const MAP: &str = "\
type octile
height 4
width 5
map
.....
.@@@.
.@G..
.....
";

#[test]
fn maps_parse_with_dots_and_g_passable() {
    let grid = parse_map(MAP).unwrap();
    assert_eq!(&[5, 4], grid.size());

    assert!(grid.get(&[0, 0]).is_active());
    assert!(!grid.get(&[1, 1]).is_active());
    assert!(grid.get(&[2, 2]).is_active(), "'G' cells are passable");
    assert!(grid.get(&[4, 3]).is_active());
}

#[test]
fn a_broken_header_is_rejected() {
    assert!(matches!(parse_map("width 3\nheight 3\nmap\n..."), Err(GppcError::Header(_))));
}

#[test]
fn a_ragged_row_is_rejected() {
    let text = "type octile\nheight 2\nwidth 3\nmap\n...\n..\n";
    assert_eq!(
        Err(GppcError::Row { row: 1, expected: 3, actual: 2 }),
        parse_map(text).map(|_| ())
    );
}

#[test]
fn a_truncated_map_is_rejected() {
    let text = "type octile\nheight 3\nwidth 3\nmap\n...\n...\n";
    assert_eq!(
        Err(GppcError::RowCount { expected: 3, actual: 2 }),
        parse_map(text).map(|_| ())
    );
}

#[test]
fn version_0_scenarios_parse() {
    let text = "0 4 1 1 3 3 4.82842712\n0 4 0 0 4 3 7.0\n";
    let experiments = parse_scenarios(text).unwrap();
    assert_eq!(2, experiments.len());
    assert_eq!([1, 1], experiments[0].start);
    assert_eq!([3, 3], experiments[0].end);
    assert!((experiments[0].distance - 4.82842712).abs() < 1e-9);
}

#[test]
fn version_1_scenarios_parse() {
    let text = "version 1\n0 arena.map 5 4 0 0 4 0 4.0\n";
    let experiments = parse_scenarios(text).unwrap();
    assert_eq!(1, experiments.len());
    assert_eq!([0, 0], experiments[0].start);
    assert_eq!([4, 0], experiments[0].end);
    assert_eq!(4.0, experiments[0].distance);
}

#[test]
fn a_short_scenario_line_is_rejected() {
    assert!(matches!(
        parse_scenarios("version 1\n0 map 5 4 0 0 4\n"),
        Err(GppcError::Scenario(_))
    ));
}

#[test]
fn a_competition_experiment_runs_end_to_end() {
    let grid = parse_map(MAP).unwrap();
    // around the obstacle block: 0,0 to 4,0 straight along the top row
    let scenarios = parse_scenarios("version 1\n0 arena.map 5 4 0 0 4 0 4.0\n").unwrap();

    for experiment in scenarios {
        let path = solve_grid::<Jps>(&grid, experiment.start, experiment.end, octile_distance);
        common::assert_valid_jump_path(&grid, &path, experiment.start, experiment.end);

        let cost: Scalar = path.windows(2).map(|w| octile_distance(&w[0], &w[1])).sum();
        assert!((cost - experiment.distance).abs() < 1e-6);
    }
}
