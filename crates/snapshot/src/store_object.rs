//! Default item wrapper used by [`SnapshotList::new`](crate::SnapshotList::new).

use serde::{Deserialize, Serialize};

/// Wraps a raw value as a list item.
///
/// This is what a [`SnapshotList`](crate::SnapshotList) stores when no custom
/// factory is configured. Field lookups see the wrapped value under the key
/// `"data"`, and the members of the wrapped value (when it serializes to a
/// JSON object) under their own keys.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreObject<T> {
    pub data: T,
}

impl<T> StoreObject<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Factory function suitable for [`SnapshotList::with_factory`](crate::SnapshotList::with_factory).
    pub fn create(data: T) -> Self {
        Self::new(data)
    }

    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T> From<T> for StoreObject<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}
