//! Truth points: first qualifying entry of each track into the volume.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Immutable record of a particle's first qualifying crossing of the
/// sensitive volume, kept for simulation-truth comparison.
///
/// Populated from raw pre-step kinematics; none of the signal corrections
/// applied to block hits are applied here. Truth points are never merged
/// and never deleted; their identity is their insertion order in the
/// per-event list.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TruthPoint {
    /// Particle type in the output numbering scheme.
    pub ptype: i32,
    /// Simulation track id.
    pub track: i32,
    /// Reconstruction track id from the per-track marker store.
    pub track_id: i32,
    /// True for primary particles (no parent track).
    pub primary: bool,
    /// Pre-step time, ns.
    pub t_ns: f64,
    /// Pre-step position, cm.
    pub x_cm: f64,
    pub y_cm: f64,
    pub z_cm: f64,
    /// Pre-step momentum, GeV/c.
    pub px_gev: f64,
    pub py_gev: f64,
    pub pz_gev: f64,
    /// Pre-step total energy, GeV.
    pub e_gev: f64,
}
