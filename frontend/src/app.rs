use std::cell::RefCell;
use std::rc::Rc;

use extdeck::filter::{ACTIVE_FILTER_CLASS, FilterCategory};
use extdeck::render::CardView;
use extdeck::theme::DARK_THEME_CLASS;
use extdeck::{Gesture, ItemId, Reaction, Session, Theme};
use js_sys::{Function, Promise, Reflect};
use zoon::wasm_bindgen::closure::Closure;
use zoon::wasm_bindgen::{JsCast, JsValue};
use zoon::web_sys;
use zoon::*;

use crate::card::{CardModel, card};
use crate::local_store::LocalStore;

const ERROR_TITLE: &str = "⚠ Oops! Something went wrong while loading the products.";
const ERROR_HINT: &str = "Please refresh the page or try again later.";

#[derive(Clone)]
pub enum Phase {
    /// Waiting for the seed fetch. Nothing is rendered.
    Loading,
    Ready(App),
    Failed,
}

#[derive(Clone)]
pub struct App {
    session: Rc<RefCell<Session<LocalStore>>>,
    cards: MutableVec<Rc<CardModel>>,
    pub filter: Mutable<FilterCategory>,
}

impl App {
    pub fn new(session: Session<LocalStore>) -> Self {
        let mut views: Vec<CardView> = Vec::new();
        let count = session.render_all(&mut views);
        log::debug!("Rendered {count} extension card(s)");
        let cards = views.into_iter().map(CardModel::new).collect::<Vec<_>>();
        let filter = Mutable::new(session.filter());
        Self {
            session: Rc::new(RefCell::new(session)),
            cards: MutableVec::new_with_values(cards),
            filter,
        }
    }

    pub fn dispatch(&self, gesture: Gesture) {
        let reaction = self.session.borrow_mut().dispatch(gesture);
        self.apply(reaction);
    }

    fn apply(&self, reaction: Reaction) {
        match reaction {
            Reaction::CardActivity { id, is_active } => {
                if let Some(card) = self.card(&id) {
                    // always notify: the checkbox may already show a flag the session refused
                    card.is_active.set(is_active);
                }
            }
            Reaction::CardRemoving { id } => {
                if let Some(card) = self.card(&id) {
                    let app = self.clone();
                    card.arm_removal(move || app.dispatch(Gesture::RemovalFinished { id }));
                }
            }
            Reaction::CardDetached { id } => {
                self.cards.lock_mut().retain(|card| card.id() != &id);
            }
            Reaction::Visibility { category, .. } => self.filter.set_neq(category),
            Reaction::ThemeChanged(theme) => {
                switch_theme(theme);
            }
            Reaction::Ignored => {}
        }
    }

    fn card(&self, id: &ItemId) -> Option<Rc<CardModel>> {
        self.cards.lock_ref().iter().find(|card| card.id() == id).cloned()
    }

    fn view(&self) -> impl Element + use<> {
        Column::new()
            .update_raw_el(|raw_el| raw_el.class("container"))
            .item(self.header())
            .item(self.toolbar())
            .item(
                Column::new()
                    .update_raw_el(|raw_el| raw_el.class("extensions-list"))
                    .items_signal_vec({
                        let app = self.clone();
                        self.cards
                            .signal_vec_cloned()
                            .map(move |model| card(app.clone(), model))
                    }),
            )
    }

    fn header(&self) -> impl Element + use<> {
        let app = self.clone();
        Row::new()
            .update_raw_el(|raw_el| raw_el.class("header"))
            .item(RawHtmlEl::new("h1").child(Text::new("extensions")))
            .item(
                Button::new()
                    .label("Toggle theme")
                    .update_raw_el(|raw_el| raw_el.class("btn-theme"))
                    .on_press(move || app.dispatch(Gesture::ToggleTheme)),
            )
    }

    fn toolbar(&self) -> impl Element + use<> {
        Row::new()
            .update_raw_el(|raw_el| raw_el.class("toolbar"))
            .item(RawHtmlEl::new("h2").child(Text::new("Extensions List")))
            .item(
                Row::new()
                    .update_raw_el(|raw_el| raw_el.class("filter"))
                    .items(FilterCategory::ALL.map(|category| self.filter_button(category))),
            )
    }

    fn filter_button(&self, category: FilterCategory) -> impl Element + use<> {
        let app = self.clone();
        let selected = self.filter.signal().map(move |filter| filter == category);
        Button::new()
            .label(category.label())
            .update_raw_el(move |raw_el| {
                raw_el
                    .class("filter-btn")
                    .class_signal(ACTIVE_FILTER_CLASS, selected)
                    .attr("data-filter", category.as_str())
            })
            .on_press(move || app.dispatch(Gesture::SelectFilter(category)))
    }
}

/// Applies `theme` inside a view transition where the browser offers one.
/// Returns the promise that settles once the theme class is in place, when a
/// transition was started.
pub fn switch_theme(theme: Theme) -> Option<Promise> {
    let document = web_sys::window().and_then(|window| window.document());
    let start_view_transition = document.as_ref().and_then(|document| {
        Reflect::get(document, &JsValue::from_str("startViewTransition"))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
    });
    let (Some(document), Some(start_view_transition)) = (document, start_view_transition) else {
        apply_theme(theme);
        return None;
    };
    let update = Closure::once_into_js(move || apply_theme(theme));
    match start_view_transition.call1(&document, &update) {
        Ok(transition) => Reflect::get(&transition, &JsValue::from_str("updateCallbackDone"))
            .ok()
            .and_then(|done| done.dyn_into::<Promise>().ok()),
        Err(error) => {
            log::debug!("View transition unavailable: {error:?}");
            apply_theme(theme);
            None
        }
    }
}

/// Sets the dark-theme class on `<body>`.
pub fn apply_theme(theme: Theme) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        log::warn!("No document body to apply the theme to");
        return;
    };
    if let Err(error) = body.class_list().toggle_with_force(DARK_THEME_CLASS, theme.is_dark()) {
        log::warn!("Failed to apply theme: {error:?}");
    }
}

pub fn root(phase: Mutable<Phase>) -> impl Element {
    El::new()
        .update_raw_el(|raw_el| raw_el.class("app"))
        .child_signal(phase.signal_cloned().map(|phase| match phase {
            Phase::Loading => None,
            Phase::Ready(app) => Some(app.view().unify()),
            Phase::Failed => Some(error_page().unify()),
        }))
}

fn error_page() -> impl Element {
    Column::new()
        .update_raw_el(|raw_el| raw_el.class("error-fetching"))
        .item(Paragraph::new().content(ERROR_TITLE))
        .item(Paragraph::new().content(ERROR_HINT))
}
