//! Page embellishments around the constellation: card tilt, smooth anchor
//! scrolling, the placeholder contact form and the footer year.
//!
//! Every listener lives as long as the page, so closures are leaked with
//! `Closure::forget`.

use glam::Vec2;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlElement, HtmlFormElement, MouseEvent,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use crate::tilt::{Rect, Tilt};

const TILT_SELECTOR: &str = ".card, .project-card";
const ANCHOR_SELECTOR: &str = "a[href^='#']";
const FORM_SELECTOR: &str = ".contact__form";
const SENT_LABEL: &str = "Signal sent ✓";
const SENT_RESET_MS: i32 = 2200;

fn elements(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn set_transform(element: &HtmlElement, value: &str) {
    if let Err(e) = element.style().set_property("transform", value) {
        warn!("failed to set card transform: {:?}", e);
    }
}

/// Restore a submit button to its label and enabled state.
fn restore_button(button: &HtmlButtonElement, label: &str) {
    button.set_text_content(Some(label));
    button.set_disabled(false);
}

/// Tilt cards toward the pointer while hovered.
pub fn install_card_tilt(document: &Document) -> Result<(), JsValue> {
    for element in elements(document, TILT_SELECTOR)? {
        let Ok(card) = element.dyn_into::<HtmlElement>() else {
            continue;
        };

        let target = card.clone();
        let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let bounds = target.get_bounding_client_rect();
            let rect = Rect::new(
                bounds.left() as f32,
                bounds.top() as f32,
                bounds.width() as f32,
                bounds.height() as f32,
            );
            let pointer = Vec2::new(event.client_x() as f32, event.client_y() as f32);
            let tilt = Tilt::from_pointer(rect, pointer);
            set_transform(&target, &tilt.css_transform());
        });

        let target = card.clone();
        let on_reset = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            set_transform(&target, "");
        });

        card.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        card.add_event_listener_with_callback("mouseleave", on_reset.as_ref().unchecked_ref())?;
        card.add_event_listener_with_callback("blur", on_reset.as_ref().unchecked_ref())?;
        on_move.forget();
        on_reset.forget();
    }
    Ok(())
}

/// Scroll smoothly to in-page anchors instead of jumping.
pub fn install_smooth_scroll(document: &Document) -> Result<(), JsValue> {
    for anchor in elements(document, ANCHOR_SELECTOR)? {
        let doc = document.clone();
        let href = anchor.get_attribute("href").unwrap_or_default();
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            // A bare "#" or malformed id is not a valid selector; ignore it
            if let Ok(Some(target)) = doc.query_selector(&href) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        });
        anchor.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}

/// Fake a successful submit: reset the form and flash a confirmation on its button.
pub fn install_contact_form(window: &Window, document: &Document) -> Result<(), JsValue> {
    let Some(form) = document.query_selector(FORM_SELECTOR)? else {
        debug!("no contact form on this page");
        return Ok(());
    };
    let form: HtmlFormElement = form.dyn_into()?;

    let window = window.clone();
    let target = form.clone();
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        target.reset();

        let Some(button) = target
            .query_selector("button")
            .ok()
            .flatten()
            .and_then(|b| b.dyn_into::<HtmlButtonElement>().ok())
        else {
            return;
        };

        let original = button.text_content().unwrap_or_default();
        button.set_text_content(Some(SENT_LABEL));
        button.set_disabled(true);

        let restore = {
            let button = button.clone();
            let original = original.clone();
            Closure::once_into_js(move || restore_button(&button, &original))
        };
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            restore.unchecked_ref(),
            SENT_RESET_MS,
        ) {
            warn!("could not schedule button restore: {:?}", e);
            restore_button(&button, &original);
        }
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(())
}

/// Stamp the current year into `#year`.
pub fn stamp_year(document: &Document) {
    let Some(year) = document.get_element_by_id("year") else {
        debug!("no #year element on this page");
        return;
    };
    let now = js_sys::Date::new_0();
    year.set_text_content(Some(&now.get_full_year().to_string()));
}
