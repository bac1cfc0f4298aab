//! Scenario files: a terrain sketch plus an occupant snapshot.
//!
//! Terrain rows use `.` for open ground, `#` for a full obstacle, `~` for soft
//! terrain that flyers may cross and `?` for a tile with no descriptor.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use gridnav_core::{DynamicSyncStats, GridManager, GridView, OccupantSnapshot, StaticSyncStats, Tile, OBSTACLE, TRANS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub columns: i64,
    pub rows: i64,
    pub terrain: Vec<String>,
    #[serde(default)]
    pub occupants: Vec<OccupantSnapshot>,
}

pub fn parse_cell(c: char) -> Result<Option<u8>> {
    Ok(match c {
        '.' => Some(0),
        '#' => Some(OBSTACLE | TRANS),
        '~' => Some(TRANS),
        '?' => None,
        other => bail!("unknown terrain character {other:?}"),
    })
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading scenario {}", path.display()))?;
        let sc: Scenario = serde_json::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))?;
        sc.validate()?;
        Ok(sc)
    }

    pub fn validate(&self) -> Result<()> {
        if self.terrain.len() as i64 > self.rows {
            bail!("terrain has {} rows, grid has {}", self.terrain.len(), self.rows);
        }
        for (y, row) in self.terrain.iter().enumerate() {
            if row.chars().count() as i64 > self.columns {
                bail!("terrain row {y} is wider than {} columns", self.columns);
            }
        }
        self.descriptor_rows()?;
        Ok(())
    }

    /// Descriptor bytes per terrain row, parsed once. `None` marks `?` tiles;
    /// tiles past the end of a row or past the last row are not covered at all.
    pub fn descriptor_rows(&self) -> Result<Vec<Vec<Option<u8>>>> {
        self.terrain
            .iter()
            .enumerate()
            .map(|(y, row)| row.chars().map(parse_cell).collect::<Result<Vec<_>>>().with_context(|| format!("terrain row {y}")))
            .collect()
    }

    /// Load the map into `manager` and run the static and first dynamic sync.
    pub fn apply(&self, manager: &mut GridManager) -> Result<(GridView, StaticSyncStats, DynamicSyncStats)> {
        let rows = self.descriptor_rows()?;
        let view = manager.load_map(self.columns, self.rows).context("allocating grid")?;
        let st = manager.sync_static_with(|tile, _| descriptor_at(&rows, tile))?;
        let dy = manager.sync_dynamic(&self.occupants)?;
        Ok((view, st, dy))
    }
}

fn descriptor_at(rows: &[Vec<Option<u8>>], tile: Tile) -> Option<u8> {
    let row = rows.get(usize::try_from(tile.y).ok()?)?;
    row.get(usize::try_from(tile.x).ok()?).copied().flatten()
}

pub fn parse_tile(s: &str) -> Result<Tile> {
    let (x, y) = s.split_once(',').with_context(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse::<i32>().with_context(|| format!("bad x in {s:?}"))?;
    let y = y.trim().parse::<i32>().with_context(|| format!("bad y in {s:?}"))?;
    Ok(Tile::new(x, y))
}
