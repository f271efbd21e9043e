// ABOUTME: Lock-free latest-wins volume slot
// ABOUTME: crossbeam ArrayQueue of capacity 1 plus a tokio Notify for waiting consumers

use crossbeam::queue::ArrayQueue;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Notify;

struct SlotState {
    value: ArrayQueue<u32>,
    ready: Notify,
}

/// Single-value handoff from connection handlers to the host.
///
/// Producers never block: a deposit replaces any value that has not been
/// taken yet. Consumers either poll with [`VolumeSlot::try_take`] or wait with
/// [`VolumeSlot::recv`]. Cloning shares the same slot.
#[derive(Clone)]
pub struct VolumeSlot {
    state: Arc<SlotState>,
}

impl VolumeSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self {
            state: Arc::new(SlotState {
                value: ArrayQueue::new(1),
                ready: Notify::new(),
            }),
        }
    }

    /// Store `volume`, discarding any unconsumed predecessor
    pub fn deposit(&self, volume: u32) {
        // force_push pops the old value when full, so the slot never holds two
        let _superseded = self.state.value.force_push(volume);
        self.state.ready.notify_one();
    }

    /// Take the pending value, if any, without waiting
    pub fn try_take(&self) -> Option<u32> {
        self.state.value.pop()
    }

    /// Wait until a value is available and take it
    pub async fn recv(&self) -> u32 {
        loop {
            if let Some(volume) = self.try_take() {
                return volume;
            }
            self.state.ready.notified().await;
        }
    }

    /// Whether a value is waiting to be taken
    pub fn is_empty(&self) -> bool {
        self.state.value.is_empty()
    }
}

impl Default for VolumeSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VolumeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolumeSlot")
            .field("pending", &!self.is_empty())
            .finish()
    }
}
