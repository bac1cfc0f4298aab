//! Map lifecycle: allocation, reuse, release and stale-view detection.
//!
//! Every `load_map` starts a new epoch. A [`GridView`] records the epoch and
//! cell count it was taken at; calls that present an older view fail with
//! [`GridError::StaleView`] instead of reading planes that belong to another map.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::SearchConfig;
use crate::errors::{GridError, Result};
use crate::grid::ObstacleGrid;
use crate::models::Tile;
use crate::occupancy::{sync_dynamic, DynamicSyncStats, Occupant};
use crate::search::{PathFinder, PathRequest, SearchOutcome};
use crate::terrain::{sync_static, sync_static_with, StaticSyncStats};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GridView {
    pub epoch: u64,
    pub columns: u32,
    pub rows: u32,
    pub cells: usize,
}

#[derive(Debug, Default)]
pub struct GridManager {
    grid: Option<ObstacleGrid>,
    epoch: u64,
    static_synced: bool,
    finder: PathFinder,
}

impl GridManager {
    pub fn new(config: SearchConfig) -> Self {
        Self { grid: None, epoch: 0, static_synced: false, finder: PathFinder::new(config) }
    }

    /// Prepare planes for a newly loaded map. Same-size grids are cleared in
    /// place; anything else is reallocated. Either way a static sync is
    /// required before the next search.
    pub fn load_map(&mut self, columns: i64, rows: i64) -> Result<GridView> {
        let reuse = matches!(&self.grid, Some(g) if g.columns() as i64 == columns && g.rows() as i64 == rows);
        if reuse {
            if let Some(g) = self.grid.as_mut() {
                g.clear_all();
            }
            info!(columns, rows, "reusing obstacle grid for new map");
        } else {
            let fresh = ObstacleGrid::allocate(columns, rows)?;
            if self.grid.is_some() {
                info!(columns, rows, "reallocating obstacle grid for new dimensions");
            }
            self.grid = Some(fresh);
        }
        self.epoch += 1;
        self.static_synced = false;
        self.view()
    }

    pub fn release(&mut self) {
        if self.grid.take().is_some() {
            info!(epoch = self.epoch, "released obstacle grid");
        }
        self.epoch += 1;
        self.static_synced = false;
    }

    pub fn is_loaded(&self) -> bool {
        self.grid.is_some()
    }

    pub fn view(&self) -> Result<GridView> {
        let g = self.grid()?;
        Ok(GridView { epoch: self.epoch, columns: g.columns(), rows: g.rows(), cells: g.cells() })
    }

    /// Fails with `StaleView` unless `view` matches the current grid.
    pub fn check_view(&self, view: &GridView) -> Result<()> {
        let g = self.grid()?;
        if view.cells == 0 || view.epoch != self.epoch || view.cells != g.cells() {
            return Err(GridError::StaleView { held: view.epoch, current: self.epoch });
        }
        Ok(())
    }

    pub fn grid(&self) -> Result<&ObstacleGrid> {
        self.grid.as_ref().ok_or(GridError::NotInitialized)
    }

    fn grid_mut(&mut self) -> Result<&mut ObstacleGrid> {
        self.grid.as_mut().ok_or(GridError::NotInitialized)
    }

    pub fn sync_static(&mut self, terrain: &[u8]) -> Result<StaticSyncStats> {
        let stats = sync_static(self.grid_mut()?, terrain);
        self.static_synced = true;
        Ok(stats)
    }

    /// Static sync from a per-tile lookup; `None` marks a tile with no descriptor.
    pub fn sync_static_with<F>(&mut self, lookup: F) -> Result<StaticSyncStats>
    where
        F: FnMut(Tile, usize) -> Option<u8>,
    {
        let stats = sync_static_with(self.grid_mut()?, lookup);
        self.static_synced = true;
        Ok(stats)
    }

    pub fn sync_static_with_view(&mut self, view: &GridView, terrain: &[u8]) -> Result<StaticSyncStats> {
        self.check_view(view)?;
        self.sync_static(terrain)
    }

    pub fn sync_dynamic<I>(&mut self, occupants: I) -> Result<DynamicSyncStats>
    where
        I: IntoIterator,
        I::Item: Occupant,
    {
        Ok(sync_dynamic(self.grid_mut()?, occupants))
    }

    pub fn sync_dynamic_with_view<I>(&mut self, view: &GridView, occupants: I) -> Result<DynamicSyncStats>
    where
        I: IntoIterator,
        I::Item: Occupant,
    {
        self.check_view(view)?;
        self.sync_dynamic(occupants)
    }

    pub fn find_path(&mut self, request: &PathRequest) -> Result<Vec<Tile>> {
        self.find_path_detailed(request).map(|o| o.path)
    }

    pub fn find_path_with_view(&mut self, view: &GridView, request: &PathRequest) -> Result<Vec<Tile>> {
        self.check_view(view)?;
        self.find_path(request)
    }

    pub fn find_path_detailed(&mut self, request: &PathRequest) -> Result<SearchOutcome> {
        let grid = self.grid.as_ref().ok_or(GridError::NotInitialized)?;
        if !self.static_synced {
            warn!(epoch = self.epoch, "search before static sync for this map");
            return Err(GridError::NotInitialized);
        }
        self.finder.find_path_detailed(grid, request)
    }
}
