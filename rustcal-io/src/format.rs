//! CSF step-file format: fixed-size little-endian records.
//!
//! Layout:
//! - 16-byte file header: magic `CSF1`, format version (u32), event
//!   count (u32), reserved (u32).
//! - Per event: 8-byte header (event number u32, step count u32)
//!   followed by `step count` records of [`STEP_RECORD_SIZE`] bytes.

use rustcal_core::{Step, Vec3};

/// File magic.
pub const MAGIC: [u8; 4] = *b"CSF1";

/// Format version this crate reads and writes.
pub const VERSION: u32 = 1;

/// File header size in bytes.
pub const FILE_HEADER_SIZE: usize = 16;

/// Event header size in bytes.
pub const EVENT_HEADER_SIZE: usize = 8;

/// Size of one encoded step record in bytes.
pub const STEP_RECORD_SIZE: usize = 128;

fn read_f64(bytes: &[u8], offset: usize) -> f64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[offset..offset + 8]);
    f64::from_le_bytes(buf)
}

fn read_i32(bytes: &[u8], offset: usize) -> i32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[offset..offset + 4]);
    i32::from_le_bytes(buf)
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(buf)
}

/// Decodes a `(event number, step count)` event header.
#[must_use]
pub fn decode_event_header(bytes: &[u8]) -> (u32, u32) {
    (read_u32(bytes, 0), read_u32(bytes, 4))
}

/// Encodes an event header.
#[must_use]
pub fn encode_event_header(event_number: u32, step_count: u32) -> [u8; EVENT_HEADER_SIZE] {
    let mut buf = [0u8; EVENT_HEADER_SIZE];
    buf[0..4].copy_from_slice(&event_number.to_le_bytes());
    buf[4..8].copy_from_slice(&step_count.to_le_bytes());
    buf
}

/// Decodes one step record. `bytes` must hold [`STEP_RECORD_SIZE`] bytes.
#[must_use]
pub fn decode_step(bytes: &[u8]) -> Step {
    Step {
        track_id: read_i32(bytes, 0),
        parent_id: read_i32(bytes, 4),
        pdg: read_i32(bytes, 8),
        volume_id: read_u32(bytes, 12),
        pre_position: Vec3::new(read_f64(bytes, 16), read_f64(bytes, 24), read_f64(bytes, 32)),
        pre_momentum: Vec3::new(read_f64(bytes, 40), read_f64(bytes, 48), read_f64(bytes, 56)),
        pre_energy_gev: read_f64(bytes, 64),
        pre_time_ns: read_f64(bytes, 72),
        post_position: Vec3::new(read_f64(bytes, 80), read_f64(bytes, 88), read_f64(bytes, 96)),
        post_time_ns: read_f64(bytes, 104),
        energy_deposit_mev: read_f64(bytes, 112),
        local_z_cm: read_f64(bytes, 120),
    }
}

/// Encodes one step record.
#[must_use]
pub fn encode_step(step: &Step) -> [u8; STEP_RECORD_SIZE] {
    let mut buf = [0u8; STEP_RECORD_SIZE];
    buf[0..4].copy_from_slice(&step.track_id.to_le_bytes());
    buf[4..8].copy_from_slice(&step.parent_id.to_le_bytes());
    buf[8..12].copy_from_slice(&step.pdg.to_le_bytes());
    buf[12..16].copy_from_slice(&step.volume_id.to_le_bytes());
    for (i, v) in [
        step.pre_position.x,
        step.pre_position.y,
        step.pre_position.z,
        step.pre_momentum.x,
        step.pre_momentum.y,
        step.pre_momentum.z,
        step.pre_energy_gev,
        step.pre_time_ns,
        step.post_position.x,
        step.post_position.y,
        step.post_position.z,
        step.post_time_ns,
        step.energy_deposit_mev,
        step.local_z_cm,
    ]
    .iter()
    .enumerate()
    {
        let offset = 16 + i * 8;
        buf[offset..offset + 8].copy_from_slice(&v.to_le_bytes());
    }
    buf
}
