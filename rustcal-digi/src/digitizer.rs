//! Per-event digitizer lifecycle: begin-event, process-step, end-event.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::warn;

use rustcal_core::{
    BlockId, BlockReadout, BlockRecord, CalConstants, EventSink, GeometryResolver, IdentAxis,
    ParticleTypes, Result, Step, TrackMarkers, TruthPoint,
};

use crate::correction::correct;
use crate::finalize::{in_active_area, merge_and_filter};
use crate::merge::{record_deposit, MergeOutcome};
use crate::truth::try_record;

/// Running counters for one digitizer instance.
///
/// Cumulative across events; useful for end-of-run reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigiStatistics {
    /// Steps handed to `process_step`.
    pub steps_seen: usize,
    /// Steps with zero energy deposit (no-ops).
    pub zero_energy_steps: usize,
    /// Deposits absorbed into an existing hit.
    pub deposits_merged: usize,
    /// Deposits that became new hits (inserted or appended).
    pub deposits_recorded: usize,
    /// Deposits dropped because a block was at its hit cap.
    pub deposits_truncated: usize,
    /// Truth points recorded.
    pub truth_points: usize,
}

/// One detector-module digitizer instance.
///
/// Owns the per-event index exclusively: a key-ordered map from block key
/// to block record plus the truth-point list. Instances share nothing
/// mutable, so one can live on each worker thread with the constants
/// behind an `Arc`. All per-step work is synchronous, CPU-bound
/// arithmetic; nothing here blocks.
pub struct Digitizer {
    constants: Arc<CalConstants>,
    blocks: BTreeMap<i64, BlockRecord>,
    points: Vec<TruthPoint>,
    stats: DigiStatistics,
}

impl Digitizer {
    /// Creates a digitizer sharing the process-wide constants.
    #[must_use]
    pub fn new(constants: Arc<CalConstants>) -> Self {
        Self {
            constants,
            blocks: BTreeMap::new(),
            points: Vec::new(),
            stats: DigiStatistics::default(),
        }
    }

    /// Returns the shared constants.
    #[must_use]
    pub fn constants(&self) -> &CalConstants {
        &self.constants
    }

    /// Returns the running counters.
    #[must_use]
    pub fn statistics(&self) -> DigiStatistics {
        self.stats
    }

    /// Starts a fresh event, discarding any state from the previous one.
    pub fn begin_event(&mut self) {
        self.blocks.clear();
        self.points.clear();
    }

    /// Processes one simulation step.
    ///
    /// Runs the truth-point latch, then corrects the energy deposit and
    /// merges it into the owning block's hit list. Returns the merge
    /// outcome, or `None` for zero-energy steps. A truncated deposit is
    /// reported and dropped; it never aborts the event.
    pub fn process_step(
        &mut self,
        step: &Step,
        geometry: &dyn GeometryResolver,
        particles: &dyn ParticleTypes,
        markers: &mut dyn TrackMarkers,
    ) -> Option<MergeOutcome> {
        self.stats.steps_seen += 1;

        let Some(deposit) = correct(&self.constants, step) else {
            self.stats.zero_energy_steps += 1;
            return None;
        };

        // Truth points are posted in order of appearance in the event,
        // independent of the hit clustering below.
        if let Some(point) = try_record(&self.constants, step, particles, markers) {
            self.points.push(point);
            self.stats.truth_points += 1;
        }

        let id = BlockId::new(
            geometry.identify(step.volume_id, IdentAxis::Column),
            geometry.identify(step.volume_id, IdentAxis::Row),
        );
        let record = self
            .blocks
            .entry(id.key())
            .or_insert_with(|| BlockRecord::new(id));

        let outcome = record_deposit(
            record,
            &deposit,
            self.constants.two_hit_resol_ns,
            self.constants.max_hits,
        );
        match outcome {
            MergeOutcome::Merged(_) => self.stats.deposits_merged += 1,
            MergeOutcome::Inserted(_) | MergeOutcome::Appended => {
                self.stats.deposits_recorded += 1;
            }
            MergeOutcome::Truncated => {
                self.stats.deposits_truncated += 1;
                warn!(
                    "max hit count {} exceeded on block ({}, {}), truncating",
                    self.constants.max_hits, id.column, id.row
                );
            }
        }
        Some(outcome)
    }

    /// Finalizes the event and hands the results to the sink.
    ///
    /// Every block gets the exhaustive re-merge and threshold filter;
    /// blocks outside the active radius or left without hits are omitted.
    /// Surviving blocks are emitted in key order, then the truth points
    /// in insertion order. Events with nothing at all to report do not
    /// touch the sink. The per-event index is cleared either way.
    ///
    /// # Errors
    /// Propagates sink failure, which the driver treats as fatal.
    pub fn end_event(&mut self, sink: &mut dyn EventSink) -> Result<()> {
        if self.blocks.is_empty() && self.points.is_empty() {
            return Ok(());
        }

        let mut readouts = Vec::new();
        for record in std::mem::take(&mut self.blocks).into_values() {
            let mut hits = record.hits;
            merge_and_filter(&mut hits, self.constants.thresh_mev);
            if !hits.is_empty() && in_active_area(&self.constants, record.id) {
                readouts.push(BlockReadout {
                    column: record.id.column,
                    row: record.id.row,
                    hits,
                });
            }
        }
        let points = std::mem::take(&mut self.points);
        sink.accept(readouts, points)
    }
}
