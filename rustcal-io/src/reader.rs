//! Memory-mapped step-file reader.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use rustcal_core::Step;

use crate::error::{Error, Result};
use crate::format::{
    decode_event_header, decode_step, EVENT_HEADER_SIZE, FILE_HEADER_SIZE, MAGIC,
    STEP_RECORD_SIZE, VERSION,
};

/// One event's worth of steps, decoded.
#[derive(Debug, Clone)]
pub struct EventSteps {
    /// Event number as written by the producer.
    pub number: u32,
    /// Steps in simulation order.
    pub steps: Vec<Step>,
}

/// A memory-mapped CSF step file.
///
/// The whole file is mapped once; events are decoded lazily as the
/// iterator advances, so only the event being digitized is ever
/// materialized.
pub struct StepFileReader {
    mmap: Mmap,
    event_count: u32,
}

impl StepFileReader {
    /// Opens and validates a step file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or mapped, or if
    /// the header or framing is malformed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)?;
        // SAFETY: the file is opened read-only and assumed not to be
        // modified concurrently, the standard memory-mapping contract.
        #[allow(unsafe_code)]
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() < FILE_HEADER_SIZE {
            return Err(Error::InvalidFormat("file shorter than header".into()));
        }
        if mmap[0..4] != MAGIC {
            return Err(Error::InvalidFormat("bad magic".into()));
        }
        let version = u32::from_le_bytes([mmap[4], mmap[5], mmap[6], mmap[7]]);
        if version != VERSION {
            return Err(Error::InvalidFormat(format!(
                "unsupported version {version}"
            )));
        }
        let event_count = u32::from_le_bytes([mmap[8], mmap[9], mmap[10], mmap[11]]);

        let reader = Self { mmap, event_count };
        reader.validate_framing()?;
        Ok(reader)
    }

    /// Number of events in the file.
    #[must_use]
    pub fn event_count(&self) -> u32 {
        self.event_count
    }

    /// Total number of step records across all events.
    #[must_use]
    pub fn step_count(&self) -> u64 {
        let mut offset = FILE_HEADER_SIZE;
        let mut total = 0u64;
        for _ in 0..self.event_count {
            let (_, steps) = decode_event_header(&self.mmap[offset..]);
            total += u64::from(steps);
            offset += EVENT_HEADER_SIZE + steps as usize * STEP_RECORD_SIZE;
        }
        total
    }

    /// Iterates over events in file order.
    #[must_use]
    pub fn events(&self) -> EventIter<'_> {
        EventIter {
            reader: self,
            offset: FILE_HEADER_SIZE,
            remaining: self.event_count,
        }
    }

    /// Walks the event framing once so that iteration cannot run off the
    /// end of the map.
    fn validate_framing(&self) -> Result<()> {
        let mut offset = FILE_HEADER_SIZE;
        for i in 0..self.event_count {
            if offset + EVENT_HEADER_SIZE > self.mmap.len() {
                return Err(Error::InvalidFormat(format!(
                    "truncated header for event index {i}"
                )));
            }
            let (_, steps) = decode_event_header(&self.mmap[offset..]);
            offset += EVENT_HEADER_SIZE + steps as usize * STEP_RECORD_SIZE;
            if offset > self.mmap.len() {
                return Err(Error::InvalidFormat(format!(
                    "truncated step records in event index {i}"
                )));
            }
        }
        Ok(())
    }
}

/// Iterator over the events of a [`StepFileReader`].
pub struct EventIter<'a> {
    reader: &'a StepFileReader,
    offset: usize,
    remaining: u32,
}

impl Iterator for EventIter<'_> {
    type Item = EventSteps;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let bytes = &self.reader.mmap[self.offset..];
        let (number, step_count) = decode_event_header(bytes);
        let mut steps = Vec::with_capacity(step_count as usize);
        for i in 0..step_count as usize {
            let start = EVENT_HEADER_SIZE + i * STEP_RECORD_SIZE;
            steps.push(decode_step(&bytes[start..start + STEP_RECORD_SIZE]));
        }
        self.offset += EVENT_HEADER_SIZE + step_count as usize * STEP_RECORD_SIZE;
        self.remaining -= 1;
        Some(EventSteps { number, steps })
    }
}
