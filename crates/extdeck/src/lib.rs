//! Extension toggle list.
//!
//! Keeps three layers consistent: the seed data fetched on first run, the
//! snapshot persisted in the browser's key-value storage, and the working set
//! rendered as cards. The browser glue lives in the `frontend` crate.

pub mod config;
pub mod error;
pub mod filter;
pub mod identity;
pub mod item;
pub mod loader;
pub mod once;
pub mod render;
pub mod session;
pub mod storage;
pub mod test_harness;
pub mod theme;
pub mod working_set;

pub use config::AppConfig;
pub use error::{FetchFailure, LoadError, SnapshotError, StorageError, SyncError};
pub use filter::FilterCategory;
pub use identity::{IdentitySource, ItemId, RandomIdentity};
pub use item::Item;
pub use loader::{LoadOrigin, LoadReport, SeedSource, load};
pub use session::{Gesture, Reaction, Session};
pub use storage::{KeyValueStore, StateStore};
pub use theme::Theme;
pub use working_set::WorkingSet;
