//! Light/dark theme preference.

/// CSS class set on the document body while the dark theme is active.
pub const DARK_THEME_CLASS: &str = "darkmode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// The value written to storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Reads a stored preference. Accepts the bare word and a JSON string;
    /// anything unrecognized is light.
    pub fn from_stored(value: &str) -> Self {
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|value| value.strip_suffix('"'))
            .unwrap_or(value);
        if value == "dark" { Theme::Dark } else { Theme::Light }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_values() {
        assert_eq!(Theme::from_stored("dark"), Theme::Dark);
        assert_eq!(Theme::from_stored("\"dark\""), Theme::Dark);
        assert_eq!(Theme::from_stored("light"), Theme::Light);
        assert_eq!(Theme::from_stored("DARK"), Theme::Light);
        assert_eq!(Theme::from_stored(""), Theme::Light);
    }

    #[test]
    fn toggling_twice_is_identity() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }
}
