//! Error type for snapshot containers.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// A history lookup ran while the container was clean.
    #[error("NO_HISTORY")]
    NoHistory,
}
