//! Tile-grid pathfinding core.
//!
//! An [`ObstacleGrid`] holds three bit planes: soft static terrain, hard static
//! terrain and dynamic occupancy. [`terrain::sync_static`] fills the static
//! planes once per map load, [`occupancy::sync_dynamic`] rebuilds the dynamic
//! plane every tick, and [`search::PathFinder`] answers path queries against
//! whatever the planes hold at call time. [`GridManager`] ties the three to a
//! map lifecycle and rejects stale views after a reallocation.

pub mod bitplane;
pub mod config;
pub mod errors;
pub mod grid;
pub mod lifecycle;
pub mod models;
pub mod occupancy;
pub mod search;
pub mod terrain;

pub use config::{SearchConfig, SearchProfile};
pub use errors::{GridError, Result};
pub use grid::{ObstacleGrid, Plane, PlaneSnapshot};
pub use lifecycle::{GridManager, GridView};
pub use models::{Connectivity, Mobility, Tile};
pub use occupancy::{sync_dynamic, DynamicSyncStats, Occupant, OccupantKind, OccupantSnapshot};
pub use search::{find_path, FailReason, PathFinder, PathRequest, Policy, SearchOutcome};
pub use terrain::{sync_static, sync_static_with, StaticSyncStats, OBSTACLE, TRANS};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
