//! The running session: working set, card lifecycle, filter and theme.
//!
//! Gestures from the presentation layer go through [`Session::dispatch`].
//! What a gesture means is decided by the pure [`decide`]; the session then
//! applies the decision, keeps storage in sync and answers with a
//! [`Reaction`] describing the visual update.

use std::collections::HashSet;

use crate::config::AppConfig;
use crate::error::SyncError;
use crate::filter::{FilterBar, FilterCategory};
use crate::identity::ItemId;
use crate::render::{self, CardState, CardView, DisplaySurface};
use crate::storage::{KeyValueStore, StateStore};
use crate::theme::Theme;
use crate::working_set::WorkingSet;

/// A user gesture reported by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// The card's switch now reads `active`.
    Toggle { id: ItemId, active: bool },
    Remove { id: ItemId },
    /// The card's exit transition has ended. May be delivered more than once.
    RemovalFinished { id: ItemId },
    SelectFilter(FilterCategory),
    ToggleTheme,
}

/// What a gesture means for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    SetActive { id: ItemId, active: bool },
    /// The card is leaving; report its unchanged flag so the switch snaps back.
    RestoreActivity { id: ItemId },
    BeginRemoval { id: ItemId },
    FinishRemoval { id: ItemId },
    SelectFilter(FilterCategory),
    SwitchTheme(Theme),
    Ignore(&'static str),
}

/// The visual update that follows a dispatched gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    CardActivity { id: ItemId, is_active: bool },
    /// Start the exit transition and report `RemovalFinished` when it ends.
    CardRemoving { id: ItemId },
    /// Detach the card; the item is gone.
    CardDetached { id: ItemId },
    /// Selected filter and the resulting visibility of every card.
    Visibility {
        category: FilterCategory,
        visible: Vec<(ItemId, bool)>,
    },
    ThemeChanged(Theme),
    Ignored,
}

pub fn decide(working_set: &WorkingSet, removing: &HashSet<ItemId>, theme: Theme, gesture: &Gesture) -> Decision {
    let state_of = |id: &ItemId| CardState::of(working_set.get(id), removing.contains(id));
    match gesture {
        Gesture::Toggle { id, active } => match state_of(id) {
            state if state.is_present() => Decision::SetActive {
                id: id.clone(),
                active: *active,
            },
            CardState::Removing => Decision::RestoreActivity { id: id.clone() },
            _ => Decision::Ignore("toggle on an unknown extension"),
        },
        Gesture::Remove { id } => match state_of(id) {
            state if state.is_present() => Decision::BeginRemoval { id: id.clone() },
            CardState::Removing => Decision::Ignore("removal already in progress"),
            _ => Decision::Ignore("remove on an unknown extension"),
        },
        Gesture::RemovalFinished { id } => match state_of(id) {
            CardState::Removing => Decision::FinishRemoval { id: id.clone() },
            _ => Decision::Ignore("no removal in progress"),
        },
        Gesture::SelectFilter(category) => Decision::SelectFilter(*category),
        Gesture::ToggleTheme => Decision::SwitchTheme(theme.toggled()),
    }
}

pub struct Session<S> {
    config: AppConfig,
    store: StateStore<S>,
    working_set: WorkingSet,
    removing: HashSet<ItemId>,
    filter: FilterBar,
    theme: Theme,
}

impl<S: KeyValueStore> Session<S> {
    /// `theme` is the preference already read from `store` and applied.
    pub fn new(store: StateStore<S>, working_set: WorkingSet, theme: Theme, config: AppConfig) -> Self {
        Self {
            config,
            store,
            working_set,
            removing: HashSet::new(),
            filter: FilterBar::default(),
            theme,
        }
    }

    pub fn working_set(&self) -> &WorkingSet {
        &self.working_set
    }

    pub fn store(&self) -> &StateStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut StateStore<S> {
        &mut self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn filter(&self) -> FilterCategory {
        self.filter.selected()
    }

    pub fn card_state(&self, id: &ItemId) -> CardState {
        CardState::of(self.working_set.get(id), self.removing.contains(id))
    }

    /// Cards for every item still in the working set, removing ones included.
    pub fn cards(&self) -> impl Iterator<Item = CardView> + '_ {
        self.working_set
            .iter()
            .map(|item| CardView::new(item, self.card_state(&item.id)))
    }

    pub fn render_all(&self, surface: &mut impl DisplaySurface) -> usize {
        render::render_all(self.cards(), surface)
    }

    pub fn visibility(&self) -> Vec<(ItemId, bool)> {
        let category = self.filter.selected();
        self.working_set
            .iter()
            .map(|item| (item.id.clone(), category.shows(item.is_active)))
            .collect()
    }

    /// Writes the working set under the snapshot key.
    pub fn sync(&mut self) -> Result<(), SyncError> {
        let snapshot = self.working_set.to_snapshot()?;
        self.store.save_snapshot(&snapshot)?;
        Ok(())
    }

    pub fn dispatch(&mut self, gesture: Gesture) -> Reaction {
        let decision = decide(&self.working_set, &self.removing, self.theme, &gesture);
        self.apply(decision)
    }

    fn apply(&mut self, decision: Decision) -> Reaction {
        match decision {
            Decision::SetActive { id, active } => {
                self.working_set.set_active(&id, active);
                self.sync_logged();
                Reaction::CardActivity { id, is_active: active }
            }
            Decision::RestoreActivity { id } => match self.working_set.get(&id) {
                Some(item) => {
                    log::debug!("Toggle on '{id}' ignored, the card is being removed");
                    Reaction::CardActivity {
                        is_active: item.is_active,
                        id,
                    }
                }
                None => Reaction::Ignored,
            },
            Decision::BeginRemoval { id } => {
                self.removing.insert(id.clone());
                if self.config.removal_transition {
                    Reaction::CardRemoving { id }
                } else {
                    self.apply(Decision::FinishRemoval { id })
                }
            }
            Decision::FinishRemoval { id } => {
                self.removing.remove(&id);
                self.working_set.remove(&id);
                self.sync_logged();
                Reaction::CardDetached { id }
            }
            Decision::SelectFilter(category) => {
                self.filter.select(category);
                Reaction::Visibility {
                    category,
                    visible: self.visibility(),
                }
            }
            Decision::SwitchTheme(theme) => {
                self.theme = theme;
                if let Err(error) = self.store.save_theme(theme) {
                    log::warn!("Failed to store theme: {error}");
                }
                Reaction::ThemeChanged(theme)
            }
            Decision::Ignore(reason) => {
                log::debug!("Ignored gesture: {reason}");
                Reaction::Ignored
            }
        }
    }

    fn sync_logged(&mut self) {
        if let Err(error) = self.sync() {
            log::warn!("{error}");
        }
    }
}
