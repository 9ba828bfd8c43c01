//! Session tuning

use std::time::Duration;

/// Quiet windows for the debounce chains, one per logical operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncDelays {
    /// Buffer settle: saves all buffers and feeds the preview chain
    pub settle: Duration,

    /// Completion fetch after the last cursor activity
    pub suggest: Duration,

    /// Preview composition after a settle
    pub compose: Duration,
}

impl Default for SyncDelays {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(500),
            suggest: Duration::from_millis(750),
            compose: Duration::from_millis(250),
        }
    }
}
