//! Status filter: which cards are visible.

/// CSS class of a hidden card.
pub const HIDDEN_CARD_CLASS: &str = "isHidden";
/// CSS class of the selected filter button.
pub const ACTIVE_FILTER_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterCategory {
    #[default]
    All,
    Enabled,
    Disabled,
}

impl FilterCategory {
    /// Buttons in display order.
    pub const ALL: [FilterCategory; 3] = [FilterCategory::All, FilterCategory::Enabled, FilterCategory::Disabled];

    pub fn shows(self, is_active: bool) -> bool {
        match self {
            FilterCategory::All => true,
            FilterCategory::Enabled => is_active,
            FilterCategory::Disabled => !is_active,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterCategory::All => "All",
            FilterCategory::Enabled => "Active",
            FilterCategory::Disabled => "Inactive",
        }
    }

    /// Value of the button's `data-filter` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterCategory::All => "all",
            FilterCategory::Enabled => "enabled",
            FilterCategory::Disabled => "disabled",
        }
    }
}

/// The filter button row. Exactly one button is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterBar {
    selected: FilterCategory,
}

impl FilterBar {
    pub fn selected(&self) -> FilterCategory {
        self.selected
    }

    pub fn select(&mut self, category: FilterCategory) {
        self.selected = category;
    }
}
