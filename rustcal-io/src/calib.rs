//! Calibration loading.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rustcal_core::CalConstants;

use crate::error::Result;

/// Loads detector constants from a JSON file and validates them.
///
/// Missing fields fall back to their defaults, so a calibration file
/// only needs to name the constants it overrides. Failure here is fatal
/// to the driver: there is no degraded mode without calibration.
///
/// # Errors
/// Returns an error if the file cannot be read, parsed, or validated.
pub fn load_constants<P: AsRef<Path>>(path: P) -> Result<CalConstants> {
    let reader = BufReader::new(File::open(path)?);
    let constants: CalConstants = serde_json::from_reader(reader)?;
    constants.validate()?;
    Ok(constants)
}
