use gridnav_core::{ObstacleGrid, Tile};
use itertools::Itertools;

/// ASCII picture of the grid: `#` hard, `~` soft only, `o` occupied, `*` path,
/// `S`/`G` path ends.
pub fn render(grid: &ObstacleGrid, path: &[Tile]) -> String {
    let cols = grid.columns() as i32;
    let rows = grid.rows() as i32;
    (0..rows)
        .map(|y| {
            (0..cols)
                .map(|x| {
                    let t = Tile::new(x, y);
                    if path.first() == Some(&t) {
                        'S'
                    } else if path.last() == Some(&t) {
                        'G'
                    } else if path.contains(&t) {
                        '*'
                    } else if grid.test_hard(t).unwrap_or(true) {
                        '#'
                    } else if grid.test_soft(t).unwrap_or(true) {
                        '~'
                    } else if grid.test_dynamic(t).unwrap_or(true) {
                        'o'
                    } else {
                        '.'
                    }
                })
                .collect::<String>()
        })
        .join("\n")
}
