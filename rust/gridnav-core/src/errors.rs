use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid grid dimensions {columns}x{rows}")]
    InvalidDimensions { columns: i64, rows: i64 },
    #[error("grid not initialized")]
    NotInitialized,
    #[error("tile ({x},{y}) outside {columns}x{rows} grid")]
    OutOfBounds { x: i32, y: i32, columns: u32, rows: u32 },
    #[error("stale grid view: held epoch {held}, current epoch {current}")]
    StaleView { held: u64, current: u64 },
    #[error("unknown policy: {0}")]
    UnknownPolicy(String),
    #[error("connectivity must be 4 or 8, got {0}")]
    InvalidConnectivity(u32),
    #[error("connectivity must be 4 or 8, got {0:?}")]
    UnknownConnectivity(String),
    #[error("unknown mobility: {0}")]
    UnknownMobility(String),
}

pub type Result<T> = std::result::Result<T, GridError>;
