//! `window.localStorage` as a [`KeyValueStore`].

use extdeck::StorageError;
use extdeck::storage::KeyValueStore;
use zoon::wasm_bindgen::{JsCast, JsValue};
use zoon::web_sys::{self, DomException, Storage};

pub struct LocalStore {
    storage: Option<Storage>,
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStore {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage is not available, changes will not survive a reload");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is not available".to_string()))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(storage_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(storage_error)
    }
}

fn storage_error(error: JsValue) -> StorageError {
    match error.dyn_ref::<DomException>() {
        Some(exception) if exception.name() == "QuotaExceededError" => {
            StorageError::QuotaExceeded(exception.message())
        }
        Some(exception) if exception.name() == "SecurityError" => StorageError::Unavailable(exception.message()),
        Some(exception) => StorageError::Rejected(format!("{}: {}", exception.name(), exception.message())),
        None => StorageError::Rejected(format!("{error:?}")),
    }
}
