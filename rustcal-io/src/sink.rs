//! JSON event sink.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use rustcal_core::{BlockReadout, EventSink, TruthPoint};

use crate::error::Result;

/// One digitized event as serialized to JSON.
#[derive(Debug, Clone, Serialize)]
pub struct EventOutput {
    /// Sequence number in arrival order at the sink.
    pub event: u32,
    /// Surviving blocks in key order.
    pub blocks: Vec<BlockReadout>,
    /// Truth points in insertion order.
    pub points: Vec<TruthPoint>,
}

/// Buffers digitized events and writes them as one JSON document.
///
/// `accept` never fails; all I/O happens in [`write_to`](Self::write_to)
/// so that a broken output path surfaces as one fatal error at the end
/// of the run rather than a partial file.
#[derive(Debug, Clone, Default)]
pub struct JsonEventSink {
    events: Vec<EventOutput>,
}

impl JsonEventSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when no events have been accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Writes all buffered events to `path` as a JSON array.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or serialized.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let out = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(out, &self.events)?;
        Ok(())
    }
}

impl EventSink for JsonEventSink {
    fn accept(
        &mut self,
        blocks: Vec<BlockReadout>,
        points: Vec<TruthPoint>,
    ) -> rustcal_core::Result<()> {
        let event = u32::try_from(self.events.len()).unwrap_or(u32::MAX);
        self.events.push(EventOutput {
            event,
            blocks,
            points,
        });
        Ok(())
    }
}
