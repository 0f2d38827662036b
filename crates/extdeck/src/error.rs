//! Error types shared by the storage, loader and session layers.
//!
//! Only [`LoadError`] ever reaches the user. Everything else is logged and
//! the session carries on with its in-memory state.

use std::fmt;

/// Error returned by a [`KeyValueStore`](crate::storage::KeyValueStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The medium cannot be reached at all (private mode, disabled storage, no window).
    Unavailable(String),
    /// The medium refused the write because it is full.
    QuotaExceeded(String),
    /// The medium rejected the operation for any other reason.
    Rejected(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            StorageError::QuotaExceeded(reason) => write!(f, "storage quota exceeded: {reason}"),
            StorageError::Rejected(reason) => write!(f, "storage rejected the operation: {reason}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Why the one-shot seed fetch did not produce a usable dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The request never produced a response.
    Network(String),
    /// The response status was outside 200..=299.
    Status(u16),
    /// The body was not a JSON array of seed records.
    Malformed(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Network(reason) => write!(f, "seed request failed: {reason}"),
            FetchFailure::Status(status) => write!(f, "seed request returned HTTP {status}"),
            FetchFailure::Malformed(reason) => write!(f, "seed payload is malformed: {reason}"),
        }
    }
}

impl std::error::Error for FetchFailure {}

/// The persisted snapshot could not be read back as a list of item records.
#[derive(Debug)]
pub enum SnapshotError {
    Json(serde_json::Error),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Json(error) => write!(f, "snapshot is not a list of item records: {error}"),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Json(error) => Some(error),
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(error: serde_json::Error) -> Self {
        SnapshotError::Json(error)
    }
}

/// Why the working set could not be written back to storage.
#[derive(Debug)]
pub enum SyncError {
    Snapshot(SnapshotError),
    Storage(StorageError),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Snapshot(error) => write!(f, "could not serialize extensions: {error}"),
            SyncError::Storage(error) => write!(f, "could not store extensions: {error}"),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Snapshot(error) => Some(error),
            SyncError::Storage(error) => Some(error),
        }
    }
}

impl From<SnapshotError> for SyncError {
    fn from(error: SnapshotError) -> Self {
        SyncError::Snapshot(error)
    }
}

impl From<StorageError> for SyncError {
    fn from(error: StorageError) -> Self {
        SyncError::Storage(error)
    }
}

/// Fatal startup error. The session shows the error page and renders no cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    Fetch(FetchFailure),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Fetch(failure) => write!(f, "could not load extensions: {failure}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Fetch(failure) => Some(failure),
        }
    }
}

impl From<FetchFailure> for LoadError {
    fn from(failure: FetchFailure) -> Self {
        LoadError::Fetch(failure)
    }
}
