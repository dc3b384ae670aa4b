//! Output sink for digitized events.

use crate::block::BlockReadout;
use crate::error::Result;
use crate::truth::TruthPoint;

/// Receives the finalized output of one event.
///
/// Blocks arrive in key order with their hits already merged, filtered
/// and time-ordered; truth points arrive in insertion order. The sink
/// owns the serialization format.
pub trait EventSink {
    /// Accepts one digitized event.
    ///
    /// # Errors
    /// Returns an error if the event cannot be accepted; this is treated
    /// as fatal by the driver.
    fn accept(&mut self, blocks: Vec<BlockReadout>, points: Vec<TruthPoint>) -> Result<()>;
}

/// Sink that keeps everything in memory, for tests and small runs.
#[derive(Debug, Clone, Default)]
pub struct CollectSink {
    /// Digitized events in arrival order.
    pub events: Vec<(Vec<BlockReadout>, Vec<TruthPoint>)>,
}

impl CollectSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for CollectSink {
    fn accept(&mut self, blocks: Vec<BlockReadout>, points: Vec<TruthPoint>) -> Result<()> {
        self.events.push((blocks, points));
        Ok(())
    }
}
