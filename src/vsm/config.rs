use serde::{Deserialize, Serialize};

/// Engine tuning knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VsmConfig {
    /// Capacity of the outcome channel of a training stream.
    /// Publishing waits while it is full. 0 is treated as 1.
    pub stream_capacity: usize,
    /// Corpus size from which a search scores records in parallel
    pub parallel_scan_threshold: usize,
}

impl Default for VsmConfig {
    fn default() -> Self {
        Self {
            stream_capacity: 1,
            parallel_scan_threshold: 1024,
        }
    }
}

impl VsmConfig {
    pub fn stream_capacity(&self) -> usize {
        self.stream_capacity.max(1)
    }
}
