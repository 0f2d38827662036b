//! Test harness for driving a session without a browser.
//! Provides scripted seed responses, predictable identities and gesture helpers.

use std::cell::{Cell, RefCell};

use crate::config::AppConfig;
use crate::error::{FetchFailure, LoadError};
use crate::identity::{IdentitySource, ItemId};
use crate::loader::{LoadOrigin, SeedSource, load};
use crate::render::CardView;
use crate::session::{Gesture, Reaction, Session};
use crate::storage::{MemoryStore, StateStore};

/// Identities `prefix-1`, `prefix-2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: usize,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdentitySource for SequentialIds {
    fn next_id(&mut self) -> ItemId {
        let id = ItemId::new(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

/// Seed source answering every request with the same scripted outcome.
#[derive(Debug)]
pub struct ScriptedSeed {
    response: Result<String, FetchFailure>,
    requests: Cell<usize>,
    urls: RefCell<Vec<String>>,
}

impl ScriptedSeed {
    pub fn body(body: impl Into<String>) -> Self {
        Self::respond(Ok(body.into()))
    }

    pub fn status(status: u16) -> Self {
        Self::respond(Err(FetchFailure::Status(status)))
    }

    pub fn network(reason: impl Into<String>) -> Self {
        Self::respond(Err(FetchFailure::Network(reason.into())))
    }

    fn respond(response: Result<String, FetchFailure>) -> Self {
        Self {
            response,
            requests: Cell::new(0),
            urls: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.get()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.urls.borrow().clone()
    }
}

impl SeedSource for ScriptedSeed {
    async fn fetch_seed(&self, url: &str) -> Result<String, FetchFailure> {
        self.requests.set(self.requests.get() + 1);
        self.urls.borrow_mut().push(url.to_string());
        self.response.clone()
    }
}

/// Outcome of [`boot`].
pub enum Boot {
    Running { session: TestSession, origin: LoadOrigin },
    /// Startup failed; the store is handed back for inspection.
    Failed { error: LoadError, store: MemoryStore },
}

impl Boot {
    pub fn running(self) -> TestSession {
        match self {
            Boot::Running { session, .. } => session,
            Boot::Failed { error, .. } => panic!("Expected a running session, startup failed: {error}"),
        }
    }

    pub fn failed(self) -> (LoadError, MemoryStore) {
        match self {
            Boot::Failed { error, store } => (error, store),
            Boot::Running { .. } => panic!("Expected startup to fail"),
        }
    }

    pub fn origin(&self) -> Option<LoadOrigin> {
        match self {
            Boot::Running { origin, .. } => Some(*origin),
            Boot::Failed { .. } => None,
        }
    }
}

/// Runs the same startup sequence as the browser app against `memory`.
pub async fn boot(memory: MemoryStore, seed: &ScriptedSeed, config: AppConfig) -> Boot {
    let mut store = StateStore::new(memory, &config);
    let theme = store.load_theme();
    let mut ids = SequentialIds::new("id");
    match load(&mut store, seed, &config.seed_url, &mut ids).await {
        Ok(report) => Boot::Running {
            session: TestSession {
                session: Session::new(store, report.working_set, theme, config),
            },
            origin: report.origin,
        },
        Err(error) => Boot::Failed {
            error,
            store: store.inner().clone(),
        },
    }
}

/// Test wrapper that provides gesture shortcuts and snapshot assertions.
pub struct TestSession {
    session: Session<MemoryStore>,
}

impl TestSession {
    pub fn new(session: Session<MemoryStore>) -> Self {
        Self { session }
    }

    pub fn toggle(&mut self, id: &str, active: bool) -> Reaction {
        self.session.dispatch(Gesture::Toggle {
            id: ItemId::from(id),
            active,
        })
    }

    /// Remove gesture followed by one completion signal.
    pub fn remove(&mut self, id: &str) -> Reaction {
        self.session.dispatch(Gesture::Remove { id: ItemId::from(id) });
        self.finish_removal(id)
    }

    pub fn finish_removal(&mut self, id: &str) -> Reaction {
        self.session.dispatch(Gesture::RemovalFinished { id: ItemId::from(id) })
    }

    pub fn dispatch(&mut self, gesture: Gesture) -> Reaction {
        self.session.dispatch(gesture)
    }

    pub fn session(&self) -> &Session<MemoryStore> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<MemoryStore> {
        &mut self.session
    }

    pub fn rendered(&self) -> Vec<CardView> {
        let mut surface = Vec::new();
        self.session.render_all(&mut surface);
        surface
    }

    pub fn ids(&self) -> Vec<String> {
        self.session
            .working_set()
            .iter()
            .map(|item| item.id.to_string())
            .collect()
    }

    /// Raw persisted snapshot.
    pub fn snapshot(&self) -> Option<String> {
        self.session
            .store()
            .inner()
            .peek(&self.session.config().snapshot_key)
            .map(str::to_string)
    }

    /// Persisted snapshot parsed as JSON.
    pub fn snapshot_json(&self) -> serde_json::Value {
        let snapshot = self.snapshot().unwrap_or_else(|| panic!("No snapshot stored"));
        serde_json::from_str(&snapshot).unwrap_or_else(|error| panic!("Stored snapshot is not JSON: {error}"))
    }

    pub fn writes(&self) -> usize {
        self.session.store().inner().writes()
    }

    /// Assert the working set holds exactly these identities, in order.
    pub fn assert_ids(&self, expected: &[&str]) {
        let actual = self.ids();
        assert_eq!(
            actual, expected,
            "Working set expected {:?} but got {:?}",
            expected, actual
        );
    }
}
