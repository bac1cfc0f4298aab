use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gridnav_core::{FailReason, GridManager, Mobility, PathRequest, Plane, SearchConfig, Tile};
use serde::Serialize;
use tracing::info;

use crate::render::render;
use crate::scenario::Scenario;

#[derive(Debug, Serialize)]
pub struct FindReport {
    pub request: PathRequest,
    pub found: bool,
    pub length: usize,
    pub expanded: u32,
    pub reason: Option<FailReason>,
    pub path: Vec<Tile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub columns: u32,
    pub rows: u32,
    pub cells: usize,
    pub soft_blocked: usize,
    pub hard_blocked: usize,
    pub missing: usize,
    pub dynamic_blocked: usize,
    pub occupants_skipped: usize,
    pub walkable_ground: usize,
    pub walkable_flying: usize,
}

/// Search config from a JSON file, or from the environment when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<SearchConfig> {
    match path {
        Some(p) => {
            let text = fs::read_to_string(p).with_context(|| format!("reading config {}", p.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", p.display()))
        }
        None => Ok(SearchConfig::from_env()),
    }
}

pub fn find(scenario: &Scenario, request: PathRequest, config: SearchConfig, with_picture: bool) -> Result<FindReport> {
    let mut manager = GridManager::new(config);
    scenario.apply(&mut manager)?;
    let outcome = manager.find_path_detailed(&request).context("path query")?;
    info!(policy = %request.policy, found = outcome.is_found(), len = outcome.path.len(), expanded = outcome.expanded, "query done");
    let picture = if with_picture { Some(render(manager.grid()?, &outcome.path)) } else { None };
    Ok(FindReport {
        request,
        found: outcome.is_found(),
        length: outcome.path.len(),
        expanded: outcome.expanded,
        reason: outcome.reason,
        path: outcome.path,
        picture,
    })
}

pub fn stats(scenario: &Scenario) -> Result<StatsReport> {
    let mut manager = GridManager::default();
    let (_, st, dy) = scenario.apply(&mut manager)?;
    let grid = manager.grid()?;
    let walkable = |m: Mobility| (0..grid.cells()).filter(|&i| grid.is_walkable(grid.tile_at(i), m).unwrap_or(false)).count();
    Ok(StatsReport {
        columns: grid.columns(),
        rows: grid.rows(),
        cells: grid.cells(),
        soft_blocked: st.soft_blocked,
        hard_blocked: st.hard_blocked,
        missing: st.missing,
        dynamic_blocked: grid.count(Plane::Dynamic),
        occupants_skipped: dy.non_blocking + dy.off_grid,
        walkable_ground: walkable(Mobility::Ground),
        walkable_flying: walkable(Mobility::Flying),
    })
}
