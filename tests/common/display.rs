//! A bare-bones console renderer for 2-D grids, used to make assertion
//! failures legible.

use amble::{Cell, Coord, Grid};

/// Renders the grid row by row: `#` for walls, `.` for open cells, `*` for
/// cells on the given path.
pub fn render(grid: &Grid<2>, path: &[Coord<2>]) -> String {
    let [width, height] = *grid.size();
    let mut out = String::with_capacity((width + 1) * height);

    for y in 0..height {
        for x in 0..width {
            let cell = [x, y];
            out.push(if path.contains(&cell) {
                '*'
            } else if grid.get(&cell).is_active() {
                '.'
            } else {
                '#'
            });
        }
        out.push('\n');
    }

    out
}
