//! rustcal-digi: Hit aggregation and digitization for calorimeter blocks.
//!
//! Converts a stream of simulation energy-deposition steps into
//! time-ordered, threshold-filtered analog hits per block, plus a
//! parallel list of truth points recording each track's first qualifying
//! entry into the active volume.
//!
//! Two merge passes operate on each block's hit list: an online windowed
//! ordered-scan merge applied per step, and an exhaustive end-of-event
//! re-merge with a tighter window that cleans up residual near
//! duplicates. The two windows and tie-break rules differ on purpose.

pub mod correction;
pub mod digitizer;
pub mod finalize;
pub mod merge;
pub mod truth;

pub use correction::{correct, CorrectedDeposit};
pub use digitizer::{DigiStatistics, Digitizer};
pub use finalize::{in_active_area, merge_and_filter};
pub use merge::{record_deposit, MergeOutcome};
pub use truth::try_record;
