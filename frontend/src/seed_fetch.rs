//! Seed dataset over `window.fetch`.

use extdeck::{FetchFailure, SeedSource};
use wasm_bindgen_futures::JsFuture;
use zoon::wasm_bindgen::JsCast;
use zoon::web_sys::{self, Response};

pub struct HttpSeed;

impl SeedSource for HttpSeed {
    async fn fetch_seed(&self, url: &str) -> Result<String, FetchFailure> {
        let window = web_sys::window().ok_or_else(|| FetchFailure::Network("no window".to_string()))?;
        let response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|error| FetchFailure::Network(format!("{error:?}")))?;
        let response: Response = response
            .dyn_into()
            .map_err(|value| FetchFailure::Network(format!("fetch resolved to {value:?}")))?;
        if !response.ok() {
            return Err(FetchFailure::Status(response.status()));
        }
        let text = response
            .text()
            .map_err(|error| FetchFailure::Network(format!("{error:?}")))?;
        let body = JsFuture::from(text)
            .await
            .map_err(|error| FetchFailure::Network(format!("{error:?}")))?;
        body.as_string()
            .ok_or_else(|| FetchFailure::Malformed("response body is not text".to_string()))
    }
}
