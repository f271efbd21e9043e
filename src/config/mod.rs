// ABOUTME: Endpoint configuration for the volume client and listener
// ABOUTME: Serde-backed, loadable from JSON, disabled unless switched on

/// Endpoint and config file types
pub mod endpoint;

pub use endpoint::{Endpoint, VolumeConfig};
