//! CSF step-file writer.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use rustcal_core::Step;

use crate::error::{Error, Result};
use crate::format::{encode_event_header, encode_step, FILE_HEADER_SIZE, MAGIC, VERSION};

/// Writes a CSF step file event by event.
///
/// The event count lives in the file header and is only known at the
/// end, so the header is written with a placeholder and patched on
/// [`finish`](Self::finish). Dropping the writer without finishing
/// leaves an unreadable file.
pub struct StepFileWriter {
    out: BufWriter<File>,
    events_written: u32,
}

impl StepFileWriter {
    /// Creates a new step file, truncating any existing one.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut out = BufWriter::new(File::create(path)?);
        let mut header = [0u8; FILE_HEADER_SIZE];
        header[0..4].copy_from_slice(&MAGIC);
        header[4..8].copy_from_slice(&VERSION.to_le_bytes());
        // event count (bytes 8..12) patched in finish(); 12..16 reserved
        out.write_all(&header)?;
        Ok(Self {
            out,
            events_written: 0,
        })
    }

    /// Appends one event.
    ///
    /// # Errors
    /// Returns an error on write failure or event-count overflow.
    pub fn write_event(&mut self, event_number: u32, steps: &[Step]) -> Result<()> {
        let step_count = u32::try_from(steps.len())
            .map_err(|_| Error::InvalidFormat("too many steps in one event".into()))?;
        self.out
            .write_all(&encode_event_header(event_number, step_count))?;
        for step in steps {
            self.out.write_all(&encode_step(step))?;
        }
        self.events_written = self
            .events_written
            .checked_add(1)
            .ok_or_else(|| Error::InvalidFormat("event count overflow".into()))?;
        Ok(())
    }

    /// Patches the event count into the header and flushes.
    ///
    /// # Errors
    /// Returns an error on write failure.
    pub fn finish(mut self) -> Result<()> {
        self.out.flush()?;
        let file = self.out.get_mut();
        file.seek(SeekFrom::Start(8))?;
        file.write_all(&self.events_written.to_le_bytes())?;
        file.flush()?;
        Ok(())
    }
}
