//! Session-scoped conversion history.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tracing::debug;

use crate::config::DEFAULT_HISTORY_CAPACITY;
use crate::conversion::ConversionRecord;

/// Bounded, append-only list of recent conversions.
///
/// Newest entries come first; once `capacity` is reached the oldest entry
/// is dropped on each append.
pub struct ConversionHistory {
    entries: Mutex<VecDeque<ConversionRecord>>,
    capacity: usize,
}

impl ConversionHistory {
    /// Create a history with the default capacity of 10.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create a history with a custom capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Append a conversion.
    pub fn record(&self, record: ConversionRecord) {
        let mut entries = self.entries.lock();

        entries.push_front(record);
        while entries.len() > self.capacity {
            if let Some(evicted) = entries.pop_back() {
                debug!(conversion_id = %evicted.id, "Evicted oldest conversion from history");
            }
        }
    }

    /// Recent conversions, newest first.
    pub fn recent(&self) -> Vec<ConversionRecord> {
        self.entries.lock().iter().cloned().collect()
    }

    /// Most recent conversion.
    pub fn latest(&self) -> Option<ConversionRecord> {
        self.entries.lock().front().cloned()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for ConversionHistory {
    fn default() -> Self {
        Self::new()
    }
}
