//! Startup reconciliation: snapshot, seed and the fallbacks between them.

use std::collections::HashSet;

use extdeck::error::{FetchFailure, LoadError};
use extdeck::render::CardState;
use extdeck::storage::MemoryStore;
use extdeck::test_harness::{ScriptedSeed, boot};
use extdeck::{AppConfig, LoadOrigin, Theme};
use futures::executor::block_on;

const SEED: &str = r#"[
    {"name":"DevLens","description":"Quickly inspect page layouts","logo":"./assets/images/logo-devlens.svg","isActive":true},
    {"name":"StyleSpy","description":"Instantly analyze CSS","logo":"./assets/images/logo-style-spy.svg","isActive":true},
    {"name":"SpeedBoost","description":"Optimizes browser resource usage","logo":"./assets/images/logo-speed-boost.svg","isActive":false}
]"#;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn first_run_materializes_seed() {
    init_logging();
    let seed = ScriptedSeed::body(r#"[{"name":"A","description":"d","logo":"l.png"}]"#);
    let boot = block_on(boot(MemoryStore::new(), &seed, AppConfig::default()));
    assert_eq!(boot.origin(), Some(LoadOrigin::Seed));
    let session = boot.running();

    let items = session.session().working_set().items();
    assert_eq!(items.len(), 1);
    assert!(!items[0].id.is_empty());
    assert!(!items[0].is_active);
    assert_eq!(seed.requested_urls(), ["data.json"]);

    let snapshot = session.snapshot_json();
    let stored = snapshot.as_array().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["id"], items[0].id.as_str());
    assert_eq!(stored[0]["name"], "A");
    assert_eq!(stored[0]["isActive"], false);
}

#[test]
fn seed_http_error_is_fatal() {
    init_logging();
    let seed = ScriptedSeed::status(500);
    let (error, store) = block_on(boot(MemoryStore::new(), &seed, AppConfig::default())).failed();
    assert_eq!(error, LoadError::Fetch(FetchFailure::Status(500)));
    assert_eq!(store.peek("extensionsData"), None);
    assert_eq!(store.writes(), 0);
}

#[test]
fn seed_network_error_is_fatal() {
    let seed = ScriptedSeed::network("connection refused");
    let (error, _) = block_on(boot(MemoryStore::new(), &seed, AppConfig::default())).failed();
    assert!(matches!(error, LoadError::Fetch(FetchFailure::Network(_))));
}

#[test]
fn stored_snapshot_skips_fetch() {
    init_logging();
    let memory = MemoryStore::new().with_entry("extensionsData", r#"[{"id":"x1","name":"A","isActive":true}]"#);
    let seed = ScriptedSeed::body(SEED);
    let session = block_on(boot(memory, &seed, AppConfig::default())).running();

    assert_eq!(seed.requests(), 0);
    let cards = session.rendered();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id.as_str(), "x1");
    assert_eq!(cards[0].state, CardState::PresentActive);
    assert!(cards[0].is_active);
}

#[test]
fn legacy_snapshot_gets_identities_and_is_repersisted() {
    init_logging();
    let memory = MemoryStore::new().with_entry(
        "extensionsData",
        r#"[{"name":"A","description":"d","logo":"a.svg"},{"id":"keep","name":"B","description":"d","logo":"b.svg"}]"#,
    );
    let seed = ScriptedSeed::body(SEED);
    let boot = block_on(boot(memory, &seed, AppConfig::default()));
    assert_eq!(boot.origin(), Some(LoadOrigin::Snapshot { migrated: 1 }));
    let session = boot.running();

    session.assert_ids(&["id-1", "keep"]);
    let snapshot = session.snapshot_json();
    assert_eq!(snapshot[0]["id"], "id-1");
    assert_eq!(snapshot[1]["id"], "keep");
    assert_eq!(seed.requests(), 0);
}

#[test]
fn null_fields_in_snapshot_keep_the_users_items() {
    init_logging();
    let memory = MemoryStore::new().with_entry(
        "extensionsData",
        r#"[{"id":"x1","name":"Mine","isActive":null},{"id":null,"name":"Other","description":null,"logo":null}]"#,
    );
    let seed = ScriptedSeed::body(SEED);
    let boot = block_on(boot(memory, &seed, AppConfig::default()));
    assert_eq!(boot.origin(), Some(LoadOrigin::Snapshot { migrated: 1 }));
    let session = boot.running();

    assert_eq!(seed.requests(), 0);
    session.assert_ids(&["x1", "id-1"]);
    let items = session.session().working_set().items();
    assert_eq!(items[0].name, "Mine");
    assert!(!items[0].is_active);
    assert_eq!(items[1].description, "");

    let snapshot = session.snapshot_json();
    assert_eq!(snapshot[0]["isActive"], false);
    assert_eq!(snapshot[1]["id"], "id-1");
    assert_eq!(snapshot[1]["logo"], "");
}

#[test]
fn malformed_snapshot_falls_back_to_seed() {
    init_logging();
    for bad in ["not json", r#"{"name":"A"}"#, r#"[{"description":"no name"}]"#] {
        let memory = MemoryStore::new().with_entry("extensionsData", bad);
        let seed = ScriptedSeed::body(SEED);
        let boot = block_on(boot(memory, &seed, AppConfig::default()));
        assert_eq!(boot.origin(), Some(LoadOrigin::RecoveredFromMalformedSnapshot), "snapshot {bad:?}");
        let session = boot.running();
        assert_eq!(session.session().working_set().len(), 3);
        assert_eq!(session.snapshot_json().as_array().map(Vec::len), Some(3));
        assert_eq!(seed.requests(), 1);
    }
}

#[test]
fn ids_are_unique_and_non_empty_after_every_load_path() {
    let seed = ScriptedSeed::body(SEED);
    let from_seed = block_on(boot(MemoryStore::new(), &seed, AppConfig::default())).running();

    let duplicated = r#"[{"id":"d","name":"A"},{"id":"d","name":"B"},{"name":"C"}]"#;
    let memory = MemoryStore::new().with_entry("extensionsData", duplicated);
    let from_snapshot = block_on(boot(memory, &seed, AppConfig::default())).running();

    for session in [&from_seed, &from_snapshot] {
        let ids = session.ids();
        assert!(ids.iter().all(|id| !id.is_empty()));
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
    }
}

#[test]
fn theme_is_read_before_cards_render() {
    let memory = MemoryStore::new()
        .with_entry("theme", "\"dark\"")
        .with_entry("extensionsData", "[]");
    let session = block_on(boot(memory, &ScriptedSeed::status(404), AppConfig::default())).running();
    assert_eq!(session.session().theme(), Theme::Dark);
    assert!(session.rendered().is_empty());
}

#[test]
fn configured_keys_and_seed_address_are_used() {
    let config = AppConfig {
        snapshot_key: "custom-snapshot".to_string(),
        seed_url: "/static/seed.json".to_string(),
        ..AppConfig::default()
    };
    let seed = ScriptedSeed::body(SEED);
    let session = block_on(boot(MemoryStore::new(), &seed, config)).running();
    assert_eq!(seed.requested_urls(), ["/static/seed.json"]);
    assert!(session.session().store().inner().peek("custom-snapshot").is_some());
    assert!(session.session().store().inner().peek("extensionsData").is_none());
}
