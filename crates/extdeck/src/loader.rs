//! Startup reconciliation between the persisted snapshot and the seed data.
//!
//! A usable snapshot always wins and the seed is never fetched. Without one,
//! the seed is fetched once, given identities and written straight back so
//! the next start finds a snapshot.

use std::future::Future;

use crate::error::{FetchFailure, LoadError, SyncError};
use crate::identity::IdentitySource;
use crate::item::SeedRecord;
use crate::storage::{KeyValueStore, StateStore};
use crate::working_set::WorkingSet;

/// The one-time seed dataset.
pub trait SeedSource {
    /// Body of the resource at `url`. Failures other than `Malformed` are
    /// reported here; the body is parsed by the loader.
    fn fetch_seed(&self, url: &str) -> impl Future<Output = Result<String, FetchFailure>>;
}

/// Which path produced the working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Read back from storage; `migrated` records were given a fresh identity.
    Snapshot { migrated: usize },
    /// First run: fetched and materialized.
    Seed,
    /// The stored snapshot was unreadable and has been replaced by the seed.
    RecoveredFromMalformedSnapshot,
}

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub working_set: WorkingSet,
    pub origin: LoadOrigin,
}

/// Parses a seed payload: a JSON array of `{name, description, logo, isActive?}`.
pub fn parse_seed(payload: &str) -> Result<Vec<SeedRecord>, FetchFailure> {
    serde_json::from_str(payload).map_err(|error| FetchFailure::Malformed(error.to_string()))
}

/// Builds the session's working set.
///
/// Only a seed failure is fatal; nothing is written to storage in that case.
pub async fn load<S, F, I>(
    store: &mut StateStore<S>,
    seed: &F,
    seed_url: &str,
    ids: &mut I,
) -> Result<LoadReport, LoadError>
where
    S: KeyValueStore,
    F: SeedSource,
    I: IdentitySource,
{
    let mut recovering = false;
    if let Some(snapshot) = store.load_snapshot() {
        match WorkingSet::from_snapshot(&snapshot, ids) {
            Ok((working_set, migrated)) => {
                if migrated > 0 {
                    log::info!("Assigned identities to {migrated} stored extension(s)");
                    persist(store, &working_set);
                }
                log::debug!("Restored {} extension(s) from storage", working_set.len());
                return Ok(LoadReport {
                    working_set,
                    origin: LoadOrigin::Snapshot { migrated },
                });
            }
            Err(error) => {
                log::warn!("Ignoring stored extensions: {error}");
                recovering = true;
            }
        }
    }

    log::debug!("Fetching seed extensions from '{seed_url}'");
    let payload = seed.fetch_seed(seed_url).await?;
    let records = parse_seed(&payload)?;
    let working_set = WorkingSet::from_seed(records, ids);
    persist(store, &working_set);
    log::info!("Loaded {} extension(s) from '{seed_url}'", working_set.len());

    let origin = if recovering {
        LoadOrigin::RecoveredFromMalformedSnapshot
    } else {
        LoadOrigin::Seed
    };
    Ok(LoadReport { working_set, origin })
}

fn persist<S: KeyValueStore>(store: &mut StateStore<S>, working_set: &WorkingSet) {
    let result = working_set
        .to_snapshot()
        .map_err(SyncError::from)
        .and_then(|snapshot| store.save_snapshot(&snapshot).map_err(SyncError::from));
    if let Err(error) = result {
        log::error!("{error}");
    }
}
