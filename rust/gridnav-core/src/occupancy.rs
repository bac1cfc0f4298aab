//! Per-tick rebuild of the dynamic plane from occupant positions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grid::{ObstacleGrid, Plane};
use crate::models::Tile;

/// Anything that can stand on a tile and may block it.
pub trait Occupant {
    fn tile(&self) -> Tile;
    fn blocks(&self) -> bool;
}

impl Occupant for (Tile, bool) {
    fn tile(&self) -> Tile {
        self.0
    }
    fn blocks(&self) -> bool {
        self.1
    }
}

impl<O: Occupant + ?Sized> Occupant for &O {
    fn tile(&self) -> Tile {
        (**self).tile()
    }
    fn blocks(&self) -> bool {
        (**self).blocks()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupantKind {
    Npc,
    Object,
    AreaEffect,
    Player,
}

/// One entity as read from the simulation for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupantSnapshot {
    pub tile: Tile,
    pub kind: OccupantKind,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub removed: bool,
    #[serde(default)]
    pub block_radius: u32,
}

fn default_visible() -> bool {
    true
}

impl OccupantSnapshot {
    pub fn new(kind: OccupantKind, tile: Tile) -> Self {
        Self { tile, kind, visible: true, removed: false, block_radius: 0 }
    }
}

impl Occupant for OccupantSnapshot {
    fn tile(&self) -> Tile {
        self.tile
    }

    fn blocks(&self) -> bool {
        match self.kind {
            OccupantKind::Player => true,
            OccupantKind::Npc | OccupantKind::Object => self.visible && !self.removed,
            OccupantKind::AreaEffect => !self.removed && self.block_radius > 0,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DynamicSyncStats {
    pub marked: usize,
    pub non_blocking: usize,
    pub off_grid: usize,
}

/// Clear the dynamic plane, then mark one bit per blocking occupant.
/// Occupants off the grid are skipped.
pub fn sync_dynamic<I>(grid: &mut ObstacleGrid, occupants: I) -> DynamicSyncStats
where
    I: IntoIterator,
    I::Item: Occupant,
{
    grid.plane_mut(Plane::Dynamic).clear();
    let mut stats = DynamicSyncStats::default();
    for occ in occupants {
        if !occ.blocks() {
            stats.non_blocking += 1;
            continue;
        }
        match grid.index(occ.tile()) {
            Ok(i) => {
                grid.set_bit_at(Plane::Dynamic, i, true);
                stats.marked += 1;
            }
            Err(_) => stats.off_grid += 1,
        }
    }
    debug!(marked = stats.marked, non_blocking = stats.non_blocking, off_grid = stats.off_grid, "dynamic plane synced");
    stats
}
