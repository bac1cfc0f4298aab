//! Path search over the obstacle planes. Read-only with respect to the grid.

pub mod best_first;
pub mod line;
pub mod neighbors;
pub mod policy;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::SearchConfig;
use crate::errors::Result;
use crate::grid::ObstacleGrid;
use crate::models::{Connectivity, Mobility, Tile};

pub use best_first::SearchContext;
pub use neighbors::StepRules;
pub use policy::{Policy, Strategy};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRequest {
    pub start: Tile,
    pub goal: Tile,
    pub policy: Policy,
    #[serde(default)]
    pub connectivity: Connectivity,
    #[serde(default)]
    pub mobility: Mobility,
}

impl PathRequest {
    pub fn new(start: Tile, goal: Tile, policy: Policy, connectivity: Connectivity) -> Self {
        Self { start, goal, policy, connectivity, mobility: Mobility::Ground }
    }

    pub fn with_mobility(mut self, mobility: Mobility) -> Self {
        self.mobility = mobility;
        self
    }
}

/// Why a search came back empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailReason {
    GoalBlocked,
    Exhausted,
    IterationCap,
    LineBlocked,
    NoStep,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    /// Start first, goal last; empty when no path was found.
    pub path: Vec<Tile>,
    /// Nodes expanded, line steps walked or directions tried, depending on policy.
    pub expanded: u32,
    pub reason: Option<FailReason>,
}

impl SearchOutcome {
    pub(crate) fn found(path: Vec<Tile>, expanded: u32) -> Self {
        Self { path, expanded, reason: None }
    }

    pub(crate) fn failed(reason: FailReason, expanded: u32) -> Self {
        Self { path: Vec::new(), expanded, reason: Some(reason) }
    }

    pub fn is_found(&self) -> bool {
        self.reason.is_none()
    }
}

/// Policy dispatcher holding a config and reusable scratch space.
#[derive(Debug, Default)]
pub struct PathFinder {
    config: SearchConfig,
    ctx: SearchContext,
}

impl PathFinder {
    pub fn new(config: SearchConfig) -> Self {
        Self { config, ctx: SearchContext::new() }
    }

    pub fn find_path(&mut self, grid: &ObstacleGrid, request: &PathRequest) -> Result<Vec<Tile>> {
        self.find_path_detailed(grid, request).map(|o| o.path)
    }

    pub fn find_path_detailed(&mut self, grid: &ObstacleGrid, request: &PathRequest) -> Result<SearchOutcome> {
        let start_idx = grid.index(request.start)?;
        let goal_idx = grid.index(request.goal)?;

        if request.start == request.goal {
            return Ok(SearchOutcome::found(vec![request.start], 0));
        }
        if !grid.walkable_at(goal_idx, request.mobility) {
            trace!(policy = %request.policy, goal = %request.goal, "goal blocked");
            return Ok(SearchOutcome::failed(FailReason::GoalBlocked, 0));
        }

        let rules = StepRules { grid, mobility: request.mobility, no_corner_cutting: self.config.no_corner_cutting };
        let (start, goal, conn) = (request.start, request.goal, request.connectivity);
        let outcome = match request.policy.strategy(&self.config) {
            Strategy::StraightLine => line::straight_line(&rules, conn, start, goal),
            Strategy::OneStep => line::one_step(&rules, conn, start, goal),
            Strategy::Capped(profile) => {
                best_first::capped_search(&rules, conn, (start, start_idx), (goal, goal_idx), profile, &mut self.ctx)
            }
        };
        trace!(
            policy = %request.policy,
            expanded = outcome.expanded,
            len = outcome.path.len(),
            reason = ?outcome.reason,
            "search finished"
        );
        Ok(outcome)
    }
}

/// One-off search with the default configuration.
pub fn find_path(grid: &ObstacleGrid, start: Tile, goal: Tile, policy: Policy, connectivity: Connectivity) -> Result<Vec<Tile>> {
    PathFinder::default().find_path(grid, &PathRequest::new(start, goal, policy, connectivity))
}
