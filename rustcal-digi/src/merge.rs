//! Online per-step hit-list merge.

use crate::correction::CorrectedDeposit;
use rustcal_core::{BlockHit, BlockRecord};

/// What happened to one corrected deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Absorbed into the existing hit at this index.
    Merged(usize),
    /// Inserted as a new hit at this index, ahead of later hits.
    Inserted(usize),
    /// Appended as a new hit at the tail.
    Appended,
    /// Dropped: the block already holds the maximum hit count.
    Truncated,
}

/// Records one corrected deposit into a block's time-ordered hit list.
///
/// Single ordered scan. The window check runs before the ordering check,
/// so a deposit inside the merge window of an existing hit is absorbed
/// even when it is strictly earlier than that hit ("closer in time
/// absorbs"). A merge sums the energies and keeps the earlier time; a
/// hit's recorded time never advances. Otherwise the deposit is inserted
/// before the first later hit, or appended, keeping the list
/// non-decreasing in time throughout.
pub fn record_deposit(
    record: &mut BlockRecord,
    deposit: &CorrectedDeposit,
    window_ns: f64,
    max_hits: usize,
) -> MergeOutcome {
    for i in 0..record.hits.len() {
        if (record.hits[i].t_ns - deposit.t_ns).abs() < window_ns {
            record.hits[i].e_mev += deposit.e_mev;
            if record.hits[i].t_ns > deposit.t_ns {
                record.hits[i].t_ns = deposit.t_ns;
            }
            return MergeOutcome::Merged(i);
        }
        if record.hits[i].t_ns > deposit.t_ns {
            record
                .hits
                .insert(i, BlockHit::new(deposit.e_mev, deposit.t_ns));
            return MergeOutcome::Inserted(i);
        }
    }
    if record.hits.len() < max_hits {
        record.hits.push(BlockHit::new(deposit.e_mev, deposit.t_ns));
        MergeOutcome::Appended
    } else {
        MergeOutcome::Truncated
    }
}
