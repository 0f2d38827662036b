//! Theme class switching. Run with `wasm-pack test --headless --firefox frontend`.
#![cfg(target_arch = "wasm32")]

use extdeck::Theme;
use extdeck::theme::DARK_THEME_CLASS;
use frontend::switch_theme;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use zoon::web_sys;

wasm_bindgen_test_configure!(run_in_browser);

fn body_is_dark() -> bool {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
        .is_some_and(|body| body.class_list().contains(DARK_THEME_CLASS))
}

async fn switch(theme: Theme) {
    if let Some(done) = switch_theme(theme) {
        JsFuture::from(done).await.unwrap();
    }
}

#[wasm_bindgen_test]
async fn switching_theme_toggles_body_class() {
    switch(Theme::Dark).await;
    assert!(body_is_dark());
    switch(Theme::Light).await;
    assert!(!body_is_dark());
}
