//! Step directions, move legality and the cost model.

use crate::grid::ObstacleGrid;
use crate::models::{Connectivity, Mobility, Tile};

pub const ORTHOGONAL_COST: u32 = 10;
pub const DIAGONAL_COST: u32 = 14;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Direction {
    pub name: &'static str,
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    pub fn is_diagonal(self) -> bool {
        self.dx != 0 && self.dy != 0
    }

    pub fn cost(self) -> u32 {
        if self.is_diagonal() { DIAGONAL_COST } else { ORTHOGONAL_COST }
    }

    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        EIGHT_WAY.iter().copied().find(|d| d.dx == dx && d.dy == dy)
    }
}

// y grows southwards.
pub const SOUTH: Direction = Direction { name: "south", dx: 0, dy: 1 };
pub const SOUTHWEST: Direction = Direction { name: "southwest", dx: -1, dy: 1 };
pub const WEST: Direction = Direction { name: "west", dx: -1, dy: 0 };
pub const NORTHWEST: Direction = Direction { name: "northwest", dx: -1, dy: -1 };
pub const NORTH: Direction = Direction { name: "north", dx: 0, dy: -1 };
pub const NORTHEAST: Direction = Direction { name: "northeast", dx: 1, dy: -1 };
pub const EAST: Direction = Direction { name: "east", dx: 1, dy: 0 };
pub const SOUTHEAST: Direction = Direction { name: "southeast", dx: 1, dy: 1 };

// Expansion order, fixed for determinism.
pub const EIGHT_WAY: [Direction; 8] = [SOUTH, SOUTHWEST, WEST, NORTHWEST, NORTH, NORTHEAST, EAST, SOUTHEAST];
pub const FOUR_WAY: [Direction; 4] = [SOUTH, WEST, NORTH, EAST];

// Clockwise rings starting east, used to rank directions by angle.
const RING_8: [Direction; 8] = [EAST, SOUTHEAST, SOUTH, SOUTHWEST, WEST, NORTHWEST, NORTH, NORTHEAST];
const RING_4: [Direction; 4] = [EAST, SOUTH, WEST, NORTH];

pub fn directions(connectivity: Connectivity) -> &'static [Direction] {
    match connectivity {
        Connectivity::Four => &FOUR_WAY,
        Connectivity::Eight => &EIGHT_WAY,
    }
}

/// Admissible distance estimate in step-cost units.
pub fn heuristic(connectivity: Connectivity, from: Tile, to: Tile) -> u64 {
    let dx = (from.x as i64 - to.x as i64).unsigned_abs();
    let dy = (from.y as i64 - to.y as i64).unsigned_abs();
    let straight = ORTHOGONAL_COST as u64;
    match connectivity {
        Connectivity::Four => straight * (dx + dy),
        Connectivity::Eight => {
            let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
            straight * hi + (DIAGONAL_COST - ORTHOGONAL_COST) as u64 * lo
        }
    }
}

/// Rules shared by every policy when taking one step.
#[derive(Copy, Clone, Debug)]
pub struct StepRules<'g> {
    pub grid: &'g ObstacleGrid,
    pub mobility: Mobility,
    pub no_corner_cutting: bool,
}

impl<'g> StepRules<'g> {
    /// Target tile and its index if stepping `dir` from `from` is legal.
    pub fn step(&self, from: Tile, dir: Direction) -> Option<(Tile, usize)> {
        let to = from.offset(dir.dx, dir.dy);
        let idx = self.grid.index(to).ok()?;
        if !self.grid.walkable_at(idx, self.mobility) {
            return None;
        }
        if self.no_corner_cutting && dir.is_diagonal() && (self.hard(from.offset(dir.dx, 0)) || self.hard(from.offset(0, dir.dy))) {
            return None;
        }
        Some((to, idx))
    }

    fn hard(&self, tile: Tile) -> bool {
        self.grid.index(tile).map(|i| self.grid.hard_at(i)).unwrap_or(false)
    }
}

/// Directions ranked by how closely they point from `from` at `to`:
/// the nearest first, then alternating either side of it, up to 90 degrees off.
pub fn toward(connectivity: Connectivity, from: Tile, to: Tile) -> Vec<Direction> {
    let dx = (to.x - from.x) as f64;
    let dy = (to.y - from.y) as f64;
    let ring: &[Direction] = match connectivity {
        Connectivity::Four => &RING_4,
        Connectivity::Eight => &RING_8,
    };
    let n = ring.len() as i64;
    let sector = std::f64::consts::TAU / n as f64;
    let angle = dy.atan2(dx).rem_euclid(std::f64::consts::TAU);
    let base = ((angle / sector).round() as i64).rem_euclid(n);
    let spread = n / 4;
    let mut out = vec![ring[base as usize]];
    for k in 1..=spread {
        out.push(ring[(base + k).rem_euclid(n) as usize]);
        out.push(ring[(base - k).rem_euclid(n) as usize]);
    }
    out
}
