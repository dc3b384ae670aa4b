//! Simulation step records as delivered by the external event loop.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::OUT_TIME_LIMIT_NS;

/// A 3-component vector (position in cm or momentum in GeV/c).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Creates a new vector.
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product.
    #[inline]
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

/// One discrete energy-deposition step from the simulation engine.
///
/// All quantities are raw simulation values: positions in cm, times in
/// ns, momenta and total energy in GeV, energy deposit in MeV. The
/// `volume_id` is an opaque handle that the geometry resolver maps to a
/// block coordinate; `local_z_cm` is the block-frame z of the step
/// midpoint, already resolved by the caller's geometry layer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    /// Simulation track id of the depositing particle.
    pub track_id: i32,
    /// Parent track id; zero for primaries.
    pub parent_id: i32,
    /// PDG particle code.
    pub pdg: i32,
    /// Opaque handle identifying the touched sub-volume.
    pub volume_id: u32,
    /// Pre-step position, cm.
    pub pre_position: Vec3,
    /// Pre-step momentum, GeV/c.
    pub pre_momentum: Vec3,
    /// Pre-step total energy, GeV.
    pub pre_energy_gev: f64,
    /// Pre-step global time, ns.
    pub pre_time_ns: f64,
    /// Post-step position, cm.
    pub post_position: Vec3,
    /// Post-step global time, ns.
    pub post_time_ns: f64,
    /// Energy deposited along the step, MeV.
    pub energy_deposit_mev: f64,
    /// Block-frame z coordinate of the step midpoint, cm.
    pub local_z_cm: f64,
}

impl Step {
    /// Midpoint time of the step, ns.
    ///
    /// Falls back to the pre-step time when the post-step time exceeds
    /// [`OUT_TIME_LIMIT_NS`]: particles that range out inside the volume
    /// can be assigned an enormous, nonphysical "out" time.
    #[must_use]
    pub fn midpoint_time_ns(&self) -> f64 {
        if self.post_time_ns > OUT_TIME_LIMIT_NS {
            self.pre_time_ns
        } else {
            (self.pre_time_ns + self.post_time_ns) / 2.0
        }
    }

    /// Midpoint position of the step, cm.
    #[must_use]
    pub fn midpoint_position(&self) -> Vec3 {
        Vec3::new(
            (self.pre_position.x + self.post_position.x) / 2.0,
            (self.pre_position.y + self.post_position.y) / 2.0,
            (self.pre_position.z + self.post_position.z) / 2.0,
        )
    }

    /// True when the particle is moving outward through the front face,
    /// i.e. its pre-step momentum has a positive component along the
    /// pre-step position direction. Grazing tracks fail this.
    #[must_use]
    pub fn is_entering(&self) -> bool {
        self.pre_position.dot(&self.pre_momentum) > 0.0
    }
}
