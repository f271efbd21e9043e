// ABOUTME: Outbound volume role
// ABOUTME: Pulls the peer's volume and pushes local changes, one connection per exchange

/// Volume client implementation
pub mod volume_client;

pub use volume_client::VolumeClient;
