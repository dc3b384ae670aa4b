#![allow(clippy::uninlined_format_args)]
use std::sync::Arc;

use approx::assert_relative_eq;
use rustcal_core::{
    CalConstants, CollectSink, EventTrackMarkers, Geant3ParticleTypes, LatticeGeometry, Step, Vec3,
};
use rustcal_digi::Digitizer;

const COLUMNS: u32 = 59;
const ROWS: u32 = 59;

fn geometry() -> LatticeGeometry {
    LatticeGeometry::new(COLUMNS, ROWS)
}

/// A step depositing `edep_mev` at block-frame `local_z_cm`, with the
/// given midpoint time (pre/post times straddle it by 0.1 ns).
fn step(volume_id: u32, track_id: i32, t_mid_ns: f64, edep_mev: f64, local_z_cm: f64) -> Step {
    Step {
        track_id,
        parent_id: 0,
        pdg: 22,
        volume_id,
        pre_position: Vec3::new(0.0, 0.0, 625.0),
        pre_momentum: Vec3::new(0.0, 0.0, 1.0),
        pre_energy_gev: 1.0,
        pre_time_ns: t_mid_ns - 0.1,
        post_position: Vec3::new(0.0, 0.0, 625.2),
        post_time_ns: t_mid_ns + 0.1,
        energy_deposit_mev: edep_mev,
        local_z_cm,
    }
}

/// The worked reference scenario: block (10, 10), two deposits at the
/// block center merging into one corrected hit.
#[test]
fn test_reference_scenario() {
    let geo = geometry();
    let mut digitizer = Digitizer::new(Arc::new(CalConstants::default()));
    let mut markers = EventTrackMarkers::new();
    let mut sink = CollectSink::new();

    digitizer.begin_event();
    let volume = geo.volume_id(10, 10);
    digitizer.process_step(
        &step(volume, 1, 50.0, 10.0, 0.0),
        &geo,
        &Geant3ParticleTypes,
        &mut markers,
    );
    digitizer.process_step(
        &step(volume, 1, 51.8, 3.0, 0.0),
        &geo,
        &Geant3ParticleTypes,
        &mut markers,
    );
    digitizer.end_event(&mut sink).unwrap();

    let (blocks, _) = &sink.events[0];
    assert_eq!(blocks.len(), 1);
    assert_eq!((blocks[0].column, blocks[0].row), (10, 10));
    assert_eq!(blocks[0].hits.len(), 1);

    // distance 22.5 cm: E scales by exp(-0.225), t shifts by +1.5 ns.
    let scale = (-0.225_f64).exp();
    assert_relative_eq!(blocks[0].hits[0].e_mev, 13.0 * scale, epsilon = 1e-9);
    assert_relative_eq!(blocks[0].hits[0].e_mev, 10.3807, epsilon = 1e-4);
    // Earlier corrected time wins the merge.
    assert_relative_eq!(blocks[0].hits[0].t_ns, 51.5, epsilon = 1e-9);
}

/// Energy conservation: in-window deposits on one block end up in one
/// hit whose energy is the sum of the corrected deposits, regardless of
/// arrival order.
#[test]
fn test_energy_conservation_any_order() {
    let geo = geometry();
    let volume = geo.volume_id(20, 20);
    // Max pairwise separation stays inside the 75 ns merge window.
    let times = [50.0, 60.0, 10.0, 40.0, 25.0];
    let expected: f64 = times.len() as f64 * 2.0 * (-0.225_f64).exp();

    for rotation in 0..times.len() {
        let mut digitizer = Digitizer::new(Arc::new(CalConstants::default()));
        let mut markers = EventTrackMarkers::new();
        let mut sink = CollectSink::new();
        digitizer.begin_event();
        for i in 0..times.len() {
            let t = times[(i + rotation) % times.len()];
            digitizer.process_step(
                &step(volume, 1, t, 2.0, 0.0),
                &geo,
                &Geant3ParticleTypes,
                &mut markers,
            );
        }
        digitizer.end_event(&mut sink).unwrap();

        let (blocks, _) = &sink.events[0];
        assert_eq!(blocks[0].hits.len(), 1, "rotation {rotation}");
        assert_relative_eq!(blocks[0].hits[0].e_mev, expected, epsilon = 1e-9);
        // Minimum corrected time: earliest midpoint + 1.5 ns.
        assert_relative_eq!(blocks[0].hits[0].t_ns, 11.5, epsilon = 1e-9);
    }
}

/// Truncation boundary: with max_hits = N, N + 1 well-separated deposits
/// keep exactly N hits and count one truncation.
#[test]
fn test_truncation_boundary() {
    let geo = geometry();
    let n = 5;
    let constants = Arc::new(CalConstants {
        max_hits: n,
        thresh_mev: 0.1,
        ..CalConstants::default()
    });
    let mut digitizer = Digitizer::new(constants);
    let mut markers = EventTrackMarkers::new();
    let mut sink = CollectSink::new();

    digitizer.begin_event();
    let volume = geo.volume_id(29, 29);
    for i in 0..=n {
        digitizer.process_step(
            &step(volume, 1, 1000.0 * (i + 1) as f64, 10.0, 0.0),
            &geo,
            &Geant3ParticleTypes,
            &mut markers,
        );
    }
    assert_eq!(digitizer.statistics().deposits_truncated, 1);
    digitizer.end_event(&mut sink).unwrap();

    let (blocks, _) = &sink.events[0];
    assert_eq!(blocks[0].hits.len(), n);
}

/// Truth latch: two qualifying steps for one track produce one truth
/// point, from the first step's raw pre-step kinematics.
#[test]
fn test_truth_latch_first_step_wins() {
    let geo = geometry();
    let mut digitizer = Digitizer::new(Arc::new(CalConstants::default()));
    let mut markers = EventTrackMarkers::new();
    let mut sink = CollectSink::new();

    digitizer.begin_event();
    let volume = geo.volume_id(29, 29);
    digitizer.process_step(
        &step(volume, 5, 40.0, 6.0, 0.0),
        &geo,
        &Geant3ParticleTypes,
        &mut markers,
    );
    digitizer.process_step(
        &step(volume, 5, 400.0, 6.0, 0.0),
        &geo,
        &Geant3ParticleTypes,
        &mut markers,
    );
    digitizer.end_event(&mut sink).unwrap();

    let (_, points) = &sink.events[0];
    assert_eq!(points.len(), 1);
    assert_relative_eq!(points[0].t_ns, 39.9, epsilon = 1e-9);
}

/// Blocks that end the event under threshold vanish silently while the
/// rest of the event survives.
#[test]
fn test_subthreshold_block_omitted() {
    let geo = geometry();
    let mut digitizer = Digitizer::new(Arc::new(CalConstants::default()));
    let mut markers = EventTrackMarkers::new();
    let mut sink = CollectSink::new();

    digitizer.begin_event();
    digitizer.process_step(
        &step(geo.volume_id(29, 29), 1, 50.0, 40.0, 0.0),
        &geo,
        &Geant3ParticleTypes,
        &mut markers,
    );
    digitizer.process_step(
        &step(geo.volume_id(30, 30), 2, 50.0, 0.5, 0.0),
        &geo,
        &Geant3ParticleTypes,
        &mut markers,
    );
    digitizer.end_event(&mut sink).unwrap();

    let (blocks, _) = &sink.events[0];
    assert_eq!(blocks.len(), 1);
    assert_eq!((blocks[0].column, blocks[0].row), (29, 29));
}

/// Blocks are emitted in row-major key order regardless of the order
/// steps touched them.
#[test]
fn test_block_emission_order() {
    let geo = geometry();
    let mut digitizer = Digitizer::new(Arc::new(CalConstants::default()));
    let mut markers = EventTrackMarkers::new();
    let mut sink = CollectSink::new();

    digitizer.begin_event();
    for (column, row) in [(30, 31), (28, 29), (29, 29), (31, 28)] {
        digitizer.process_step(
            &step(geo.volume_id(column, row), 1, 50.0, 40.0, 0.0),
            &geo,
            &Geant3ParticleTypes,
            &mut markers,
        );
    }
    digitizer.end_event(&mut sink).unwrap();

    let (blocks, _) = &sink.events[0];
    let order: Vec<(i32, i32)> = blocks.iter().map(|b| (b.row, b.column)).collect();
    let mut sorted = order.clone();
    sorted.sort_unstable();
    assert_eq!(order, sorted);
    assert_eq!(blocks.len(), 4);
}
