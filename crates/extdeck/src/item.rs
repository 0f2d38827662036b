//! Item records and the two wire shapes they are read from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::identity::ItemId;

/// One extension as held in the working set.
///
/// Fields the app does not know about are kept in `extra` and written back on
/// every sync.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub logo: String,
    pub is_active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        description: impl Into<String>,
        logo: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            logo: logo.into(),
            is_active: false,
            extra: Map::new(),
        }
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub(crate) fn from_stored(record: StoredRecord, id: ItemId) -> Self {
        Self {
            id,
            name: record.name,
            description: record.description.unwrap_or_default(),
            logo: record.logo.unwrap_or_default(),
            is_active: record.is_active.unwrap_or_default(),
            extra: record.extra,
        }
    }

    pub(crate) fn from_seed(record: SeedRecord, id: ItemId) -> Self {
        Self {
            id,
            name: record.name,
            description: record.description,
            logo: record.logo,
            is_active: record.is_active.unwrap_or_default(),
            extra: record.extra,
        }
    }
}

/// A record read back from the persisted snapshot.
///
/// Only `name` is required; older snapshots may lack an `id`. A missing or
/// `null` optional field reads as its default.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    #[serde(default)]
    pub id: Option<ItemId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoredRecord {
    /// The stored identity, if it is present and non-empty.
    pub fn usable_id(&self) -> Option<&ItemId> {
        self.id.as_ref().filter(|id| !id.is_empty())
    }
}

/// A record from the seed file. Seed identities are never trusted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord {
    pub name: String,
    pub description: String,
    pub logo: String,
    #[serde(default)]
    pub is_active: Option<bool>,
    // Swallowed so a stray seed `id` does not end up in `extra`.
    #[serde(default, rename = "id")]
    _discarded_id: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_serializes_with_camel_case_fields() {
        let item = Item::new("x1", "DevLens", "Inspect pages", "./logo.svg").active(true);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "x1",
                "name": "DevLens",
                "description": "Inspect pages",
                "logo": "./logo.svg",
                "isActive": true,
            })
        );
    }

    #[test]
    fn stored_record_defaults_optional_fields() {
        let record: StoredRecord = serde_json::from_str(r#"{"id":"x1","name":"A","isActive":true}"#).unwrap();
        assert_eq!(record.usable_id().map(ItemId::as_str), Some("x1"));
        assert!(record.extra.is_empty());
        let item = Item::from_stored(record, ItemId::from("x1"));
        assert_eq!(item.description, "");
        assert_eq!(item.logo, "");
        assert!(item.is_active);
    }

    #[test]
    fn stored_record_reads_null_fields_as_defaults() {
        let record: StoredRecord = serde_json::from_str(
            r#"{"id":null,"name":"A","description":null,"logo":null,"isActive":null}"#,
        )
        .unwrap();
        assert!(record.usable_id().is_none());
        assert!(record.extra.is_empty());
        let item = Item::from_stored(record, ItemId::from("fresh"));
        assert_eq!(item, Item::new("fresh", "A", "", ""));
    }

    #[test]
    fn stored_record_treats_empty_id_as_missing() {
        let record: StoredRecord = serde_json::from_str(r#"{"id":"","name":"A"}"#).unwrap();
        assert!(record.usable_id().is_none());
    }

    #[test]
    fn seed_record_requires_logo() {
        let result = serde_json::from_str::<SeedRecord>(r#"{"name":"A","description":"d"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn seed_record_keeps_unknown_fields_but_not_id() {
        let record: SeedRecord = serde_json::from_str(
            r#"{"id":"seed-1","name":"A","description":"d","logo":"l.png","vendor":"acme"}"#,
        )
        .unwrap();
        assert_eq!(record.extra.get("vendor"), Some(&Value::from("acme")));
        assert!(!record.extra.contains_key("id"));
        let item = Item::from_seed(record, ItemId::from("fresh"));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "fresh");
        assert_eq!(json["vendor"], "acme");
    }
}
