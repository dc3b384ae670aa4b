//! Truth-point recording: one-shot latch per track.

use rustcal_core::{CalConstants, ParticleTypes, Step, TrackMarkers, TruthPoint};

/// Records the first qualifying entry of a track into the active volume.
///
/// Qualifies when nothing has been recorded for the track yet, the
/// particle is moving into the sensitive region (positive momentum
/// component along the position direction), and its pre-step total
/// energy exceeds the readout threshold. The record carries raw pre-step
/// kinematics; the reconstruction track id is whatever the marker store
/// held before the latch flips. Returns `None` for steps that do not
/// qualify, including every later step of an already-recorded track.
pub fn try_record(
    constants: &CalConstants,
    step: &Step,
    particles: &dyn ParticleTypes,
    markers: &mut dyn TrackMarkers,
) -> Option<TruthPoint> {
    if markers.history(step.track_id) != 0
        || !step.is_entering()
        || step.pre_energy_gev * 1000.0 <= constants.thresh_mev
    {
        return None;
    }
    let point = TruthPoint {
        ptype: particles.output_code(step.pdg),
        track: step.track_id,
        track_id: markers.track_id(step.track_id),
        primary: step.parent_id == 0,
        t_ns: step.pre_time_ns,
        x_cm: step.pre_position.x,
        y_cm: step.pre_position.y,
        z_cm: step.pre_position.z,
        px_gev: step.pre_momentum.x,
        py_gev: step.pre_momentum.y,
        pz_gev: step.pre_momentum.z,
        e_gev: step.pre_energy_gev,
    };
    markers.set(step.track_id, 2, step.track_id);
    Some(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rustcal_core::{EventTrackMarkers, Geant3ParticleTypes, Vec3};

    fn entering_step(track_id: i32) -> Step {
        Step {
            track_id,
            parent_id: 0,
            pdg: 22,
            volume_id: 0,
            pre_position: Vec3::new(12.0, -4.0, 620.0),
            pre_momentum: Vec3::new(0.01, 0.0, 0.8),
            pre_energy_gev: 0.8,
            pre_time_ns: 21.0,
            post_position: Vec3::new(12.0, -4.0, 621.0),
            post_time_ns: 21.1,
            energy_deposit_mev: 2.0,
            local_z_cm: -22.0,
        }
    }

    #[test]
    fn test_qualifying_step_is_recorded() {
        let constants = CalConstants::default();
        let mut markers = EventTrackMarkers::new();
        let point = try_record(
            &constants,
            &entering_step(3),
            &Geant3ParticleTypes,
            &mut markers,
        )
        .unwrap();
        assert_eq!(point.ptype, 1);
        assert_eq!(point.track, 3);
        assert!(point.primary);
        // Raw pre-step kinematics, no signal corrections.
        assert_relative_eq!(point.t_ns, 21.0, epsilon = 1e-12);
        assert_relative_eq!(point.x_cm, 12.0, epsilon = 1e-12);
        assert_relative_eq!(point.e_gev, 0.8, epsilon = 1e-12);
        assert_eq!(markers.history(3), 2);
        assert_eq!(markers.track_id(3), 3);
    }

    #[test]
    fn test_latch_records_exactly_once() {
        let constants = CalConstants::default();
        let mut markers = EventTrackMarkers::new();
        let first = try_record(
            &constants,
            &entering_step(7),
            &Geant3ParticleTypes,
            &mut markers,
        );
        assert!(first.is_some());
        let second = try_record(
            &constants,
            &entering_step(7),
            &Geant3ParticleTypes,
            &mut markers,
        );
        assert!(second.is_none());
    }

    #[test]
    fn test_outgoing_track_not_recorded() {
        let constants = CalConstants::default();
        let mut markers = EventTrackMarkers::new();
        let mut step = entering_step(1);
        step.pre_momentum = Vec3::new(0.0, 0.0, -0.8);
        assert!(try_record(&constants, &step, &Geant3ParticleTypes, &mut markers).is_none());
        // Not latched either: a later qualifying step may still record.
        assert_eq!(markers.history(1), 0);
    }

    #[test]
    fn test_below_energy_threshold_not_recorded() {
        let constants = CalConstants::default();
        let mut markers = EventTrackMarkers::new();
        let mut step = entering_step(1);
        step.pre_energy_gev = 0.004; // 4 MeV < 5 MeV threshold
        assert!(try_record(&constants, &step, &Geant3ParticleTypes, &mut markers).is_none());
    }

    #[test]
    fn test_secondary_flag_and_prior_reco_id() {
        let constants = CalConstants::default();
        let mut markers = EventTrackMarkers::new();
        markers.set(9, 0, 42);
        let mut step = entering_step(9);
        step.parent_id = 2;
        let point = try_record(&constants, &step, &Geant3ParticleTypes, &mut markers).unwrap();
        assert!(!point.primary);
        // The record keeps the id the store held before the latch.
        assert_eq!(point.track_id, 42);
        assert_eq!(markers.track_id(9), 9);
    }
}
