//! rustcal-io: Step-file input and JSON event output for rustcal.
//!
//! Step files are memory-mapped (`memmap2`) and decoded from fixed-size
//! little-endian records; digitized events are serialized to JSON.
//!

pub mod calib;
mod error;
pub mod format;
mod reader;
mod sink;
mod writer;

pub use calib::load_constants;
pub use error::{Error, Result};
pub use reader::{EventIter, EventSteps, StepFileReader};
pub use sink::{EventOutput, JsonEventSink};
pub use writer::StepFileWriter;
