//! Block identity and per-block hit records.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identity of one readout block on the calorimeter face.
///
/// Coordinates are signed so that the geometry resolver's unresolved
/// sentinel (`-1`) flows through unchanged; such blocks fall outside the
/// active radius and are dropped at finalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockId {
    /// Column index on the detector face.
    pub column: i32,
    /// Row index on the detector face.
    pub row: i32,
}

impl BlockId {
    /// Creates a new block identity.
    #[inline]
    #[must_use]
    pub fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Row-major integer key: row in the high 32 bits, column
    /// zero-extended in the low 32. Invertible for all coordinate pairs.
    #[inline]
    #[must_use]
    pub fn key(&self) -> i64 {
        (i64::from(self.row) << 32) | i64::from(self.column as u32)
    }

    /// Recovers the block identity from its key.
    #[inline]
    #[must_use]
    pub fn from_key(key: i64) -> Self {
        Self {
            row: (key >> 32) as i32,
            column: key as u32 as i32,
        }
    }

    /// Physical center of the block relative to the beam axis, in cm.
    #[must_use]
    pub fn center_cm(&self, central_column: i32, central_row: i32, block_width_cm: f64) -> (f64, f64) {
        let x0 = f64::from(self.column - central_column) * block_width_cm;
        let y0 = f64::from(self.row - central_row) * block_width_cm;
        (x0, y0)
    }
}

/// One reconstructed analog hit on a block.
///
/// Energy is attenuation-corrected, time is propagation-corrected; both
/// refer to the signal at the readout end of the block.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockHit {
    /// Deposited energy in MeV, summed over merged steps.
    pub e_mev: f64,
    /// Hit time in ns; merges keep the earliest contributing time.
    pub t_ns: f64,
}

impl BlockHit {
    /// Creates a new hit.
    #[inline]
    #[must_use]
    pub fn new(e_mev: f64, t_ns: f64) -> Self {
        Self { e_mev, t_ns }
    }
}

/// Per-event record for one block: its identity plus the running hit list.
///
/// The hit list is kept non-decreasing in time during the online phase.
/// Records live for exactly one event; the per-event index drops them
/// wholesale at end of event.
#[derive(Debug, Clone)]
pub struct BlockRecord {
    /// Block identity, immutable after creation.
    pub id: BlockId,
    /// Time-ordered hit list.
    pub hits: Vec<BlockHit>,
}

impl BlockRecord {
    /// Creates an empty record for the given block.
    #[must_use]
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            hits: Vec::new(),
        }
    }

    /// Returns the number of hits currently recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Returns true if no hits have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// A finalized block as handed to the event sink: identity plus the
/// surviving hits, in time order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockReadout {
    /// Column index.
    pub column: i32,
    /// Row index.
    pub row: i32,
    /// Surviving hits after the finalization merge and threshold filter.
    pub hits: Vec<BlockHit>,
}
