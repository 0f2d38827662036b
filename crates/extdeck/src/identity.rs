//! Item identities.
//!
//! An identity is assigned once, when an item first enters a working set
//! without one, and is persisted with the item from then on.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of one item record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Source of fresh identities.
pub trait IdentitySource {
    fn next_id(&mut self) -> ItemId;
}

/// Random version-4 UUIDs in lowercase hyphenated form.
///
/// On wasm the `uuid` crate draws from `crypto.getRandomValues`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdentity;

impl IdentitySource for RandomIdentity {
    fn next_id(&mut self) -> ItemId {
        ItemId(Uuid::new_v4().hyphenated().to_string())
    }
}

impl<S: IdentitySource + ?Sized> IdentitySource for &mut S {
    fn next_id(&mut self) -> ItemId {
        (**self).next_id()
    }
}
