//! Signal correction arithmetic for one simulation step.

use rustcal_core::{CalConstants, Step};

/// An energy deposit corrected to the readout end of its block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectedDeposit {
    /// Attenuation-corrected energy, MeV.
    pub e_mev: f64,
    /// Propagation-corrected time, ns.
    pub t_ns: f64,
}

/// Corrects one step's energy deposit for attenuation and propagation
/// delay along the block.
///
/// Returns `None` for zero-energy steps (pure transport, nothing to
/// digitize). Otherwise: the longitudinal distance from the step midpoint
/// to the readout face is half the block length minus the local z
/// coordinate; energy falls off exponentially over the attenuation
/// length and the time picks up the propagation delay at the effective
/// signal speed.
#[must_use]
pub fn correct(constants: &CalConstants, step: &Step) -> Option<CorrectedDeposit> {
    if step.energy_deposit_mev == 0.0 {
        return None;
    }
    let dist = 0.5 * constants.block_length_cm - step.local_z_cm;
    Some(CorrectedDeposit {
        e_mev: step.energy_deposit_mev * (-dist / constants.attenuation_length_cm).exp(),
        t_ns: step.midpoint_time_ns() + dist / constants.c_effective_cm_per_ns,
    })
}
