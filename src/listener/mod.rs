// ABOUTME: Inbound volume role
// ABOUTME: Accepts peer pushes and hands the newest value to the host through a slot

/// Volume listener implementation
pub mod volume_listener;

pub use volume_listener::{VolumeListener, READ_DEADLINE};
