use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GridError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
}

impl Tile {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    pub fn chebyshev(self, other: Tile) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Neighborhood used when generating moves. Serialized as the plain number 4 or 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Connectivity {
    Four,
    #[default]
    Eight,
}

impl Connectivity {
    pub fn count(self) -> u32 {
        match self {
            Connectivity::Four => 4,
            Connectivity::Eight => 8,
        }
    }

    /// True when `a` and `b` are distinct tiles one legal move apart.
    pub fn adjacent(self, a: Tile, b: Tile) -> bool {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        match self {
            Connectivity::Four => dx + dy == 1,
            Connectivity::Eight => dx.max(dy) == 1,
        }
    }
}

impl TryFrom<u32> for Connectivity {
    type Error = GridError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Connectivity::Four),
            8 => Ok(Connectivity::Eight),
            other => Err(GridError::InvalidConnectivity(other)),
        }
    }
}

impl From<Connectivity> for u32 {
    fn from(c: Connectivity) -> u32 {
        c.count()
    }
}

impl FromStr for Connectivity {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s.trim().parse::<u32>().map_err(|_| GridError::UnknownConnectivity(s.to_string()))?;
        Connectivity::try_from(n)
    }
}

/// Which static plane blocks the mover. Both modes are blocked by dynamic occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mobility {
    /// Blocked by soft static terrain.
    #[default]
    Ground,
    /// Ignores soft terrain, still blocked by hard static terrain.
    Flying,
}

impl FromStr for Mobility {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ground" => Ok(Mobility::Ground),
            "flying" | "fly" => Ok(Mobility::Flying),
            other => Err(GridError::UnknownMobility(other.to_string())),
        }
    }
}
