//! Durable key-value storage behind the working set and theme.
//!
//! The browser implementation lives in the frontend; [`MemoryStore`] backs
//! tests and non-browser hosts.

use std::collections::BTreeMap;

use crate::config::AppConfig;
use crate::error::StorageError;
use crate::theme::Theme;

/// Synchronous string key-value medium.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// How a [`MemoryStore`] misbehaves, for exercising failure paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Failure {
    #[default]
    None,
    /// Reads and writes fail.
    Unavailable,
    /// Reads succeed, writes fail.
    QuotaExceeded,
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    failure: Failure,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn set_failure(&mut self, failure: Failure) {
        self.failure = failure;
    }

    /// Raw value under `key`, ignoring any configured failure.
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.failure == Failure::Unavailable {
            return Err(StorageError::Unavailable("memory store switched off".to_string()));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self.failure {
            Failure::None => {
                self.entries.insert(key.to_string(), value.to_string());
                self.writes += 1;
                Ok(())
            }
            Failure::Unavailable => {
                Err(StorageError::Unavailable("memory store switched off".to_string()))
            }
            Failure::QuotaExceeded => Err(StorageError::QuotaExceeded(format!(
                "no room for {} bytes under '{key}'",
                value.len()
            ))),
        }
    }
}

/// The two keys the app uses, over any [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct StateStore<S> {
    store: S,
    snapshot_key: String,
    theme_key: String,
}

impl<S: KeyValueStore> StateStore<S> {
    pub fn new(store: S, config: &AppConfig) -> Self {
        Self {
            store,
            snapshot_key: config.snapshot_key.clone(),
            theme_key: config.theme_key.clone(),
        }
    }

    /// Serialized working set, if one was stored. Read failures count as absent.
    pub fn load_snapshot(&self) -> Option<String> {
        self.read(&self.snapshot_key)
    }

    pub fn save_snapshot(&mut self, snapshot: &str) -> Result<(), StorageError> {
        self.store.set(&self.snapshot_key, snapshot)
    }

    /// Stored theme; light when nothing usable was stored.
    pub fn load_theme(&self) -> Theme {
        self.read(&self.theme_key)
            .map(|value| Theme::from_stored(&value))
            .unwrap_or_default()
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.store.set(&self.theme_key, theme.as_str())
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(error) => {
                log::warn!("Failed to read '{key}': {error}");
                None
            }
        }
    }
}
