// ABOUTME: Volume scale conversion
// ABOUTME: Maps 0-255 wire bytes to and from the player's internal volume range

/// Scale converter implementation
pub mod converter;

pub use converter::{byte_to_volume, volume_to_byte, VolumeScale, MAX_STATE_VOLUME};
