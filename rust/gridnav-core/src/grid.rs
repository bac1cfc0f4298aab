//! Three obstacle planes over a fixed `columns x rows` tile grid.

use serde::Serialize;
use tracing::info;

use crate::bitplane::BitPlane;
use crate::errors::{GridError, Result};
use crate::models::{Mobility, Tile};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Plane {
    /// Blocks normal movement.
    SoftStatic,
    /// Blocks even movement that ignores soft terrain.
    HardStatic,
    /// Transient occupancy, rebuilt every tick.
    Dynamic,
}

#[derive(Clone, Debug)]
pub struct ObstacleGrid {
    columns: u32,
    rows: u32,
    soft: BitPlane,
    hard: BitPlane,
    dynamic: BitPlane,
}

/// Whole-buffer copy of the planes for handing across a boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlaneSnapshot {
    pub columns: u32,
    pub rows: u32,
    pub soft_static: Vec<u8>,
    pub hard_static: Vec<u8>,
    pub dynamic: Vec<u8>,
}

impl ObstacleGrid {
    /// Allocate a fully walkable grid. Zero, negative, or sizes past the
    /// `i32` tile coordinate range are rejected.
    pub fn allocate(columns: i64, rows: i64) -> Result<Self> {
        if columns <= 0 || rows <= 0 || columns > i32::MAX as i64 || rows > i32::MAX as i64 {
            return Err(GridError::InvalidDimensions { columns, rows });
        }
        let cells = (columns as usize)
            .checked_mul(rows as usize)
            .ok_or(GridError::InvalidDimensions { columns, rows })?;
        info!(columns, rows, cells, "allocating obstacle grid");
        Ok(Self {
            columns: columns as u32,
            rows: rows as u32,
            soft: BitPlane::new(cells),
            hard: BitPlane::new(cells),
            dynamic: BitPlane::new(cells),
        })
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cells(&self) -> usize {
        self.soft.len()
    }

    pub fn contains(&self, tile: Tile) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as u32) < self.columns && (tile.y as u32) < self.rows
    }

    /// Row-major index `row * columns + column`.
    pub fn index(&self, tile: Tile) -> Result<usize> {
        if !self.contains(tile) {
            return Err(GridError::OutOfBounds { x: tile.x, y: tile.y, columns: self.columns, rows: self.rows });
        }
        Ok(tile.y as usize * self.columns as usize + tile.x as usize)
    }

    pub fn tile_at(&self, index: usize) -> Tile {
        let c = self.columns as usize;
        Tile::new((index % c) as i32, (index / c) as i32)
    }

    pub fn test_soft(&self, tile: Tile) -> Result<bool> {
        self.test(Plane::SoftStatic, tile)
    }

    pub fn test_hard(&self, tile: Tile) -> Result<bool> {
        self.test(Plane::HardStatic, tile)
    }

    pub fn test_dynamic(&self, tile: Tile) -> Result<bool> {
        self.test(Plane::Dynamic, tile)
    }

    pub fn test(&self, plane: Plane, tile: Tile) -> Result<bool> {
        let i = self.index(tile)?;
        Ok(self.plane(plane).get(i).unwrap_or(true))
    }

    /// Walkability under `mobility`. Out-of-bounds tiles are an error, never a default.
    pub fn is_walkable(&self, tile: Tile, mobility: Mobility) -> Result<bool> {
        let i = self.index(tile)?;
        Ok(self.walkable_at(i, mobility))
    }

    /// Index must come from [`ObstacleGrid::index`].
    #[inline]
    pub(crate) fn walkable_at(&self, index: usize, mobility: Mobility) -> bool {
        let statics = match mobility {
            Mobility::Ground => &self.soft,
            Mobility::Flying => &self.hard,
        };
        !statics.get(index).unwrap_or(true) && !self.dynamic.get(index).unwrap_or(true)
    }

    #[inline]
    pub(crate) fn hard_at(&self, index: usize) -> bool {
        self.hard.get(index).unwrap_or(true)
    }

    /// Write one bit. Only the synchronizers call this; search is read-only.
    pub fn set_bit(&mut self, plane: Plane, tile: Tile, value: bool) -> Result<()> {
        let i = self.index(tile)?;
        self.plane_mut(plane).set(i, value);
        Ok(())
    }

    pub(crate) fn set_bit_at(&mut self, plane: Plane, index: usize, value: bool) {
        self.plane_mut(plane).set(index, value);
    }

    pub(crate) fn plane(&self, plane: Plane) -> &BitPlane {
        match plane {
            Plane::SoftStatic => &self.soft,
            Plane::HardStatic => &self.hard,
            Plane::Dynamic => &self.dynamic,
        }
    }

    pub(crate) fn plane_mut(&mut self, plane: Plane) -> &mut BitPlane {
        match plane {
            Plane::SoftStatic => &mut self.soft,
            Plane::HardStatic => &mut self.hard,
            Plane::Dynamic => &mut self.dynamic,
        }
    }

    /// Number of set bits in `plane`.
    pub fn count(&self, plane: Plane) -> usize {
        self.plane(plane).count_ones()
    }

    /// Reset all three planes to walkable without reallocating.
    pub fn clear_all(&mut self) {
        self.soft.clear();
        self.hard.clear();
        self.dynamic.clear();
    }

    pub fn export_planes(&self) -> PlaneSnapshot {
        PlaneSnapshot {
            columns: self.columns,
            rows: self.rows,
            soft_static: self.soft.to_packed_bytes(),
            hard_static: self.hard.to_packed_bytes(),
            dynamic: self.dynamic.to_packed_bytes(),
        }
    }
}
