//! Storage keys, seed address and session switches.

pub const SNAPSHOT_STORAGE_KEY: &str = "extensionsData";
pub const THEME_STORAGE_KEY: &str = "theme";
pub const SEED_URL: &str = "data.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Key holding the serialized working set.
    pub snapshot_key: String,
    /// Key holding `dark` or `light`.
    pub theme_key: String,
    /// Address of the one-time seed dataset.
    pub seed_url: String,
    /// When false, a remove gesture completes without waiting for the exit transition.
    pub removal_transition: bool,
    pub log_level: log::LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            snapshot_key: SNAPSHOT_STORAGE_KEY.to_string(),
            theme_key: THEME_STORAGE_KEY.to_string(),
            seed_url: SEED_URL.to_string(),
            removal_transition: true,
            log_level: log::LevelFilter::Info,
        }
    }
}

impl AppConfig {
    pub fn with_removal_transition(mut self, enabled: bool) -> Self {
        self.removal_transition = enabled;
        self
    }
}
