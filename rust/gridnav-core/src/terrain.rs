//! One-shot translation of per-tile terrain bytes into the static planes.

use tracing::{debug, warn};

use crate::grid::{ObstacleGrid, Plane};
use crate::models::Tile;

/// Blocks everything, including movement that ignores soft terrain.
pub const OBSTACLE: u8 = 0x80;
/// Blocks normal movement only.
pub const TRANS: u8 = 0x40;

#[inline]
pub fn is_soft_blocked(byte: u8) -> bool {
    byte & (OBSTACLE | TRANS) != 0
}

#[inline]
pub fn is_hard_blocked(byte: u8) -> bool {
    byte & OBSTACLE != 0
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticSyncStats {
    pub soft_blocked: usize,
    pub hard_blocked: usize,
    /// Tiles with no descriptor byte, treated as fully blocked.
    pub missing: usize,
}

/// Overwrite both static planes from a row-major terrain array.
///
/// Tiles past the end of `terrain` have no descriptor and come out blocked on
/// both planes. Bytes past `columns * rows` are ignored.
pub fn sync_static(grid: &mut ObstacleGrid, terrain: &[u8]) -> StaticSyncStats {
    let cells = grid.cells();
    if terrain.len() > cells {
        warn!(expected = cells, got = terrain.len(), "terrain descriptor longer than grid; extra bytes ignored");
    }
    sync_static_with(grid, |_, index| terrain.get(index).copied())
}

/// Overwrite both static planes from a lookup. `None` means no descriptor for
/// that tile, which is treated as fully blocked.
pub fn sync_static_with<F>(grid: &mut ObstacleGrid, mut lookup: F) -> StaticSyncStats
where
    F: FnMut(Tile, usize) -> Option<u8>,
{
    let cells = grid.cells();
    grid.plane_mut(Plane::SoftStatic).fill(true);
    grid.plane_mut(Plane::HardStatic).fill(true);

    let mut stats = StaticSyncStats::default();
    for index in 0..cells {
        let tile = grid.tile_at(index);
        match lookup(tile, index) {
            Some(byte) => {
                let soft = is_soft_blocked(byte);
                let hard = is_hard_blocked(byte);
                grid.set_bit_at(Plane::SoftStatic, index, soft);
                grid.set_bit_at(Plane::HardStatic, index, hard);
                stats.soft_blocked += soft as usize;
                stats.hard_blocked += hard as usize;
            }
            None => {
                stats.missing += 1;
                stats.soft_blocked += 1;
                stats.hard_blocked += 1;
            }
        }
    }
    debug!(
        soft = stats.soft_blocked,
        hard = stats.hard_blocked,
        missing = stats.missing,
        "static planes synced"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_mapping() {
        assert!(is_soft_blocked(OBSTACLE));
        assert!(is_hard_blocked(OBSTACLE));
        assert!(is_soft_blocked(TRANS));
        assert!(!is_hard_blocked(TRANS));
        assert!(!is_soft_blocked(0x20));
        assert!(is_hard_blocked(OBSTACLE | 0x01));
    }

    #[test]
    fn translates_bytes_per_tile() {
        let mut g = ObstacleGrid::allocate(3, 1).unwrap();
        let stats = sync_static(&mut g, &[0, TRANS, OBSTACLE]);
        assert_eq!(stats, StaticSyncStats { soft_blocked: 2, hard_blocked: 1, missing: 0 });
        assert!(!g.test_soft(Tile::new(0, 0)).unwrap());
        assert!(g.test_soft(Tile::new(1, 0)).unwrap());
        assert!(!g.test_hard(Tile::new(1, 0)).unwrap());
        assert!(g.test_hard(Tile::new(2, 0)).unwrap());
    }

    #[test]
    fn missing_bytes_are_blocked() {
        let mut g = ObstacleGrid::allocate(2, 2).unwrap();
        let stats = sync_static(&mut g, &[0, 0]);
        assert_eq!(stats.missing, 2);
        assert!(g.test_soft(Tile::new(0, 1)).unwrap());
        assert!(g.test_hard(Tile::new(1, 1)).unwrap());
    }

    #[test]
    fn resync_overwrites_completely() {
        let mut g = ObstacleGrid::allocate(2, 1).unwrap();
        sync_static(&mut g, &[OBSTACLE, OBSTACLE]);
        sync_static(&mut g, &[0, TRANS]);
        assert!(!g.test_hard(Tile::new(0, 0)).unwrap());
        assert!(!g.test_soft(Tile::new(0, 0)).unwrap());
        assert!(g.test_soft(Tile::new(1, 0)).unwrap());
    }
}
