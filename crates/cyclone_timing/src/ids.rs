//! Arena index for timing graph vertices.

use serde::{Deserialize, Serialize};

/// Opaque, copyable ID for a vertex in the timing graph.
///
/// Assigned in vertex-creation order, so ids double as a deterministic
/// iteration order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct TimingNodeId(u32);

impl TimingNodeId {
    /// Creates an ID from a raw `u32` index.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw `u32` index.
    pub fn as_raw(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
