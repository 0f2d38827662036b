use std::cell::RefCell;
use std::rc::Rc;

use extdeck::filter::{FilterCategory, HIDDEN_CARD_CLASS};
use extdeck::once::OneShot;
use extdeck::render::{CARD_CLASS, CardView, ENABLED_CARD_CLASS, REMOVING_CARD_CLASS};
use extdeck::{Gesture, ItemId};
use zoon::wasm_bindgen::JsCast;
use zoon::wasm_bindgen::closure::Closure;
use zoon::web_sys::{self, AddEventListenerOptions};
use zoon::*;

use crate::app::App;

const TRANSITION_END: &str = "transitionend";

/// Per-card visual state. The item data itself lives in the session.
pub struct CardModel {
    pub view: CardView,
    pub is_active: Mutable<bool>,
    pub removing: Mutable<bool>,
    /// Armed when the exit transition starts; reports the end of the removal once.
    pub finish_removal: RefCell<Option<OneShot<Box<dyn FnOnce()>>>>,
}

impl CardModel {
    pub fn new(view: CardView) -> Rc<Self> {
        Rc::new(Self {
            is_active: Mutable::new(view.is_active),
            removing: Mutable::new(false),
            finish_removal: RefCell::new(None),
            view,
        })
    }

    pub fn id(&self) -> &ItemId {
        &self.view.id
    }

    pub fn arm_removal(&self, continuation: impl FnOnce() + 'static) {
        *self.finish_removal.borrow_mut() = Some(OneShot::new(Box::new(continuation)));
        self.removing.set(true);
    }

    fn transition_ended(&self) {
        if let Some(once) = self.finish_removal.borrow_mut().as_mut() {
            once.fire();
        }
    }
}

pub fn card(app: App, model: Rc<CardModel>) -> impl Element {
    let hidden = {
        let filter = app.filter.clone();
        let is_active = model.is_active.clone();
        map_ref! {
            let filter = filter.signal(),
            let is_active = is_active.signal() => !FilterCategory::shows(*filter, *is_active)
        }
    };
    Column::new()
        .update_raw_el({
            let model = model.clone();
            move |raw_el| {
                let element = raw_el.dom_element();
                let listener = Closure::<dyn FnMut(web_sys::Event)>::new({
                    let model = model.clone();
                    let card_element = element.clone().unchecked_into::<web_sys::Element>();
                    move |event: web_sys::Event| {
                        // transitions of the toggle bubble up too
                        let own = event
                            .target()
                            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
                            .is_some_and(|target| target == card_element);
                        if own {
                            model.transition_ended();
                        }
                    }
                });
                let options = AddEventListenerOptions::new();
                options.set_passive(true);
                if let Err(error) = element.add_event_listener_with_callback_and_add_event_listener_options(
                    TRANSITION_END,
                    listener.as_ref().unchecked_ref(),
                    &options,
                ) {
                    log::error!("Failed to observe card transitions: {error:?}");
                }

                raw_el
                    .class(CARD_CLASS)
                    .class_signal(ENABLED_CARD_CLASS, model.is_active.signal())
                    .class_signal(REMOVING_CARD_CLASS, model.removing.signal())
                    .class_signal(HIDDEN_CARD_CLASS, hidden)
                    .attr("data-id", model.id().as_str())
                    .after_remove(move |element| {
                        if let Err(error) =
                            element.remove_event_listener_with_callback(TRANSITION_END, listener.as_ref().unchecked_ref())
                        {
                            log::warn!("Failed to stop observing card transitions: {error:?}");
                        }
                        drop(listener);
                    })
            }
        })
        .item(
            Row::new()
                .update_raw_el(|raw_el| raw_el.class("card-content"))
                .item(
                    Image::new()
                        .url(model.view.logo.clone())
                        .description(format!("{} logo", model.view.name)),
                )
                .item(
                    Column::new()
                        .update_raw_el(|raw_el| raw_el.class("card-text"))
                        .item(RawHtmlEl::new("h3").child(Text::new(model.view.name.clone())))
                        .item(RawHtmlEl::new("p").child(Text::new(model.view.description.clone()))),
                ),
        )
        .item(
            Row::new()
                .update_raw_el(|raw_el| raw_el.class("card-actions"))
                .item(remove_button(app.clone(), model.id().clone()))
                .item(toggle(app, model)),
        )
}

fn remove_button(app: App, id: ItemId) -> impl Element {
    Button::new()
        .label("Remove")
        .update_raw_el(|raw_el| raw_el.class("card-remove"))
        .on_press(move || app.dispatch(Gesture::Remove { id: id.clone() }))
}

fn toggle(app: App, model: Rc<CardModel>) -> impl Element {
    let id = model.id().clone();
    Checkbox::new()
        .label_hidden(format!("Enable {}", model.view.name))
        .checked_signal(model.is_active.signal())
        .icon(|checked: Mutable<bool>| {
            El::new().update_raw_el(move |raw_el| {
                raw_el
                    .class("card-toggle")
                    .class_signal("checked", checked.signal())
            })
        })
        .on_change(move |active| app.dispatch(Gesture::Toggle { id: id.clone(), active }))
}
