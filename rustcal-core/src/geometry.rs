//! Geometry resolution: mapping touched volumes to block coordinates.

use std::collections::HashMap;

/// Sentinel returned when an identifier axis cannot be resolved.
///
/// Unresolved coordinates are not an error: the resulting (-1, -1) block
/// sits far outside the active radius and is silently dropped at
/// finalization.
pub const UNRESOLVED: i32 = -1;

/// Identifier axis of the detector face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentAxis {
    Column,
    Row,
}

/// Resolves a step's touched volume to an integer block coordinate.
///
/// Implementations wrap whatever geometry description the surrounding
/// framework maintains; the digitizer only ever asks for one axis at a
/// time and treats [`UNRESOLVED`] as "not in a readout block".
pub trait GeometryResolver: Send + Sync {
    /// Returns the coordinate of `volume_id` along `axis`, or
    /// [`UNRESOLVED`].
    fn identify(&self, volume_id: u32, axis: IdentAxis) -> i32;
}

/// Resolver for a rectangular block lattice where volume ids are assigned
/// row-major: `volume_id = row * columns + column`.
#[derive(Debug, Clone, Copy)]
pub struct LatticeGeometry {
    columns: u32,
    rows: u32,
}

impl LatticeGeometry {
    /// Creates a lattice resolver for a `columns` x `rows` face.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Volume id of the block at (`column`, `row`), row-major.
    #[must_use]
    pub fn volume_id(&self, column: u32, row: u32) -> u32 {
        row * self.columns + column
    }
}

impl GeometryResolver for LatticeGeometry {
    fn identify(&self, volume_id: u32, axis: IdentAxis) -> i32 {
        if volume_id >= self.columns * self.rows {
            return UNRESOLVED;
        }
        let coord = match axis {
            IdentAxis::Column => volume_id % self.columns,
            IdentAxis::Row => volume_id / self.columns,
        };
        coord as i32
    }
}

/// Table-backed resolver for irregular geometries and tests.
#[derive(Debug, Clone, Default)]
pub struct TableGeometry {
    table: HashMap<(u32, IdentAxis), i32>,
}

impl TableGeometry {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers both coordinates for a volume id.
    pub fn insert(&mut self, volume_id: u32, column: i32, row: i32) {
        self.table.insert((volume_id, IdentAxis::Column), column);
        self.table.insert((volume_id, IdentAxis::Row), row);
    }
}

impl GeometryResolver for TableGeometry {
    fn identify(&self, volume_id: u32, axis: IdentAxis) -> i32 {
        self.table
            .get(&(volume_id, axis))
            .copied()
            .unwrap_or(UNRESOLVED)
    }
}
