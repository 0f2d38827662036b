//! Browser front end: binds the extension session to zoon elements,
//! `localStorage` and `fetch`.

mod app;
mod card;
pub mod console_log;
pub mod local_store;
pub mod seed_fetch;

use extdeck::storage::StateStore;
use extdeck::{AppConfig, RandomIdentity, Session, load};
use zoon::web_sys;
use zoon::*;

use app::{Phase, apply_theme, root};
use local_store::LocalStore;
use seed_fetch::HttpSeed;

pub use app::switch_theme;

pub fn start() {
    let config = AppConfig::default().with_removal_transition(!prefers_reduced_motion());
    console_log::init(config.log_level);

    let mut store = StateStore::new(LocalStore::new(), &config);
    let theme = store.load_theme();
    apply_theme(theme);

    let phase = Mutable::new(Phase::Loading);
    Task::start({
        let phase = phase.clone();
        async move {
            match load(&mut store, &HttpSeed, &config.seed_url, &mut RandomIdentity).await {
                Ok(report) => {
                    let session = Session::new(store, report.working_set, theme, config);
                    phase.set(Phase::Ready(app::App::new(session)));
                }
                Err(error) => {
                    log::error!("{error}");
                    phase.set(Phase::Failed);
                }
            }
        }
    });
    start_app("app", move || root(phase));
}

fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .is_some_and(|query| query.matches())
}
