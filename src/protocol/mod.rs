// ABOUTME: Wire protocol for volume synchronization
// ABOUTME: Single-byte framed commands, one fresh TCP connection per exchange

/// Command definitions and wire encoding
pub mod messages;

pub use messages::{Command, REQUEST_VOLUME, SET_VOLUME};
