// ABOUTME: Coalescing handoff for externally pushed volume
// ABOUTME: Capacity-1 lock-free slot where the newest value always wins

/// Volume slot implementation
pub mod volume_slot;

pub use volume_slot::VolumeSlot;
