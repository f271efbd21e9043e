// ABOUTME: Main library entry point for volume-link
// ABOUTME: Exports the volume client, volume listener, and scale conversion

//! # volume-link
//!
//! Minimal volume synchronization between a media player and an external
//! volume controller (hardware knob, amplifier, home-automation hub) over TCP.
//!
//! Every exchange is a fresh connection carrying one or two bytes. The player
//! can pull the peer's volume ([`VolumeClient::get_volume`]), push its own
//! changes ([`VolumeClient::set_volume`]), and receive unsolicited updates
//! through a [`VolumeListener`] that keeps only the most recent value.
//!
//! All operations are best effort: failures degrade to "no value" and are
//! logged at debug level at most.

#![warn(missing_docs)]

/// Outbound role: pull and push volume
pub mod client;
/// Endpoint configuration
pub mod config;
/// Inbound role: accept pushed volume updates
pub mod listener;
/// Wire bytes of the single-byte protocol
pub mod protocol;
/// Conversion between wire bytes and the player's volume range
pub mod scale;
/// Latest-wins handoff between listener and host
pub mod slot;

pub use client::VolumeClient;
pub use config::{Endpoint, VolumeConfig};
pub use listener::VolumeListener;
pub use scale::{VolumeScale, MAX_STATE_VOLUME};
pub use slot::VolumeSlot;

/// Result type for volume-link operations
pub type Result<T> = std::result::Result<T, error::Error>;

/// Error types for volume-link
pub mod error {
    use thiserror::Error;

    /// Error types for volume-link operations
    #[derive(Error, Debug)]
    pub enum Error {
        /// Could not reach the peer
        #[error("Connection error: {0}")]
        Connection(String),

        /// The exchange did not finish before its deadline
        #[error("Timed out after {0:?}")]
        Timeout(std::time::Duration),

        /// Socket I/O failure during an exchange
        #[error("I/O error: {0}")]
        Io(#[from] std::io::Error),

        /// Invalid configuration
        #[error("Config error: {0}")]
        Config(String),
    }
}
