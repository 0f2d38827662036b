//! Projection of the working set onto display cards.

use crate::identity::ItemId;
use crate::item::Item;

pub const CARD_CLASS: &str = "card";
pub const ENABLED_CARD_CLASS: &str = "enable";
pub const REMOVING_CARD_CLASS: &str = "removing";

/// Lifecycle of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    PresentActive,
    PresentInactive,
    /// Exit transition running; the item is still in the working set.
    Removing,
    /// Detached and deleted from the working set.
    Removed,
}

impl CardState {
    pub fn of(item: Option<&Item>, is_removing: bool) -> Self {
        match item {
            None => CardState::Removed,
            Some(_) if is_removing => CardState::Removing,
            Some(item) if item.is_active => CardState::PresentActive,
            Some(_) => CardState::PresentInactive,
        }
    }

    pub fn is_present(self) -> bool {
        matches!(self, CardState::PresentActive | CardState::PresentInactive)
    }
}

/// What the presentation layer needs to build one card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub logo: String,
    pub is_active: bool,
    pub state: CardState,
}

impl CardView {
    pub fn new(item: &Item, state: CardState) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            logo: item.logo.clone(),
            is_active: item.is_active,
            state,
        }
    }
}

/// Where rendered cards go. The presentation layer attaches the toggle and
/// remove affordances.
pub trait DisplaySurface {
    fn append_card(&mut self, card: CardView);
}

impl DisplaySurface for Vec<CardView> {
    fn append_card(&mut self, card: CardView) {
        self.push(card);
    }
}

/// Appends every card to `surface`, in order. Returns how many were appended.
pub fn render_all(cards: impl IntoIterator<Item = CardView>, surface: &mut impl DisplaySurface) -> usize {
    let mut count = 0;
    for card in cards {
        surface.append_card(card);
        count += 1;
    }
    count
}
