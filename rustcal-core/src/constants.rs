//! Detector constants shared by all digitizer instances.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Time window for the end-of-event re-merge pass, in ns.
///
/// Deliberately tighter than the online merge window: the online pass only
/// compares a deposit against one position in the ordered scan, so near
/// duplicates closer than this can survive it.
pub const FINALIZE_WINDOW_NS: f64 = 1.0;

/// Upper limit on a credible post-step time, in ns (1 second).
///
/// Particles that range out or decay at rest inside the volume can carry
/// an enormous "out" time; above this limit the pre-step time is used.
pub const OUT_TIME_LIMIT_NS: f64 = 1.0e9;

/// Calibration constants for one calorimeter configuration.
///
/// Built exactly once by the driver before any worker starts and shared
/// read-only (`Arc`) by every digitizer instance. Defaults are the
/// forward-calorimeter values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalConstants {
    /// Signal attenuation length in the block material, cm.
    pub attenuation_length_cm: f64,
    /// Effective signal propagation speed, cm/ns.
    pub c_effective_cm_per_ns: f64,
    /// Transverse width of one block, cm.
    pub block_width_cm: f64,
    /// Longitudinal length of one block, cm.
    pub block_length_cm: f64,
    /// Radius of the active area around the beam axis, cm.
    pub active_radius_cm: f64,
    /// Column index of the block centered on the beam axis.
    pub central_column: i32,
    /// Row index of the block centered on the beam axis.
    pub central_row: i32,
    /// Online merge window (detector two-hit time resolution), ns.
    pub two_hit_resol_ns: f64,
    /// Hard cap on hits per block per event.
    pub max_hits: usize,
    /// Readout energy threshold, MeV. Also gates truth-point recording.
    pub thresh_mev: f64,
}

impl Default for CalConstants {
    fn default() -> Self {
        Self {
            attenuation_length_cm: 100.0,
            c_effective_cm_per_ns: 15.0,
            block_width_cm: 4.0,
            block_length_cm: 45.0,
            active_radius_cm: 120.0,
            central_column: 29,
            central_row: 29,
            two_hit_resol_ns: 75.0,
            max_hits: 100,
            thresh_mev: 5.0,
        }
    }
}

impl CalConstants {
    /// Validates that the physical constants are usable.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConstant`] for a non-positive attenuation
    /// length, signal speed, block dimension, or merge window.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("attenuation_length_cm", self.attenuation_length_cm),
            ("c_effective_cm_per_ns", self.c_effective_cm_per_ns),
            ("block_width_cm", self.block_width_cm),
            ("block_length_cm", self.block_length_cm),
            ("active_radius_cm", self.active_radius_cm),
            ("two_hit_resol_ns", self.two_hit_resol_ns),
        ];
        for (name, value) in checks {
            if value.is_nan() || value <= 0.0 {
                return Err(Error::InvalidConstant { name, value });
            }
        }
        Ok(())
    }
}
