//! Browser host.
//!
//! Attaches the constellation to a `<canvas>` that fills the window, drives it
//! with `requestAnimationFrame`, and wires up the rest of the page.
//!
//! ```js
//! import init, { start } from "./constellation.js";
//! await init();
//! start("constellation");
//! ```

mod canvas;
mod page;

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, MouseEvent, Window};
use web_time::Instant;

use crate::config::FieldConfig;
use crate::frame::{Constellation, FrameScheduler, Viewport};

pub use canvas::CanvasSurface;

/// Browser window as the viewport: `innerWidth` x `innerHeight`.
struct BrowserViewport(Window);

impl Viewport for BrowserViewport {
    fn viewport_size(&self) -> (u32, u32) {
        let dim = |v: Result<JsValue, JsValue>| {
            v.ok()
                .and_then(|v| v.as_f64())
                .map_or(0, |v| v.max(0.0) as u32)
        };
        (dim(self.0.inner_width()), dim(self.0.inner_height()))
    }
}

type FrameCallback = Closure<dyn FnMut()>;
type FrameSlot = Rc<RefCell<Option<FrameCallback>>>;

/// Schedules frames with `requestAnimationFrame`.
struct AnimationFrameScheduler {
    window: Window,
    callback: FrameSlot,
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) {
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        if let Err(e) = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            warn!("requestAnimationFrame failed: {:?}", e);
        }
    }
}

struct Host {
    constellation: Constellation,
    surface: CanvasSurface,
    viewport: BrowserViewport,
}

/// Start the constellation on the canvas with id `canvas_id` and install the
/// page embellishments.
#[wasm_bindgen]
pub fn start(canvas_id: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // A second start on the same page keeps the first logger
    console_log::init_with_level(log::Level::Debug).ok();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id {canvas_id:?}")))?
        .dyn_into()?;

    let mut surface = CanvasSurface::new(canvas)?;
    let viewport = BrowserViewport(window.clone());
    let constellation = Constellation::new(FieldConfig::default(), &viewport, &mut surface);

    let host = Rc::new(RefCell::new(Host {
        constellation,
        surface,
        viewport,
    }));

    let frames: FrameSlot = Rc::new(RefCell::new(None));

    install_pointer(&window, &document, &host)?;
    install_resize(&window, &host, &frames)?;
    start_frames(&window, &host, &frames);

    page::install_card_tilt(&document)?;
    page::install_smooth_scroll(&document)?;
    page::install_contact_form(&window, &document)?;
    page::stamp_year(&document);

    Ok(())
}

/// Pointer moves are read off the window. `mouseleave` is only dispatched to
/// elements, so leaving the page is observed on the root `<html>` element.
fn install_pointer(
    window: &Window,
    document: &Document,
    host: &Rc<RefCell<Host>>,
) -> Result<(), JsValue> {
    let h = host.clone();
    let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let position = Vec2::new(event.client_x() as f32, event.client_y() as f32);
        h.borrow_mut().constellation.pointer_moved(position);
    });

    let h = host.clone();
    let on_leave = Closure::<dyn FnMut()>::new(move || {
        h.borrow_mut().constellation.pointer_left();
    });

    let root = document
        .document_element()
        .ok_or_else(|| JsValue::from_str("document has no root element"))?;

    window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
    root.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
    on_move.forget();
    on_leave.forget();
    Ok(())
}

fn install_resize(
    window: &Window,
    host: &Rc<RefCell<Host>>,
    frames: &FrameSlot,
) -> Result<(), JsValue> {
    let h = host.clone();
    let mut scheduler = AnimationFrameScheduler {
        window: window.clone(),
        callback: frames.clone(),
    };
    let on_resize = Closure::<dyn FnMut()>::new(move || {
        let mut host = h.borrow_mut();
        host.constellation.resized(Instant::now());
        // A zero-sized viewport suspends the loop until the next resize
        host.constellation.resume(&mut scheduler);
    });
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();
    Ok(())
}

fn start_frames(window: &Window, host: &Rc<RefCell<Host>>, slot: &FrameSlot) {
    // The callback has to reach itself to reschedule, hence the shared slot.
    let mut scheduler = AnimationFrameScheduler {
        window: window.clone(),
        callback: slot.clone(),
    };
    let h = host.clone();
    let frame_scheduler_window = window.clone();
    let frame_slot = slot.clone();
    *slot.borrow_mut() = Some(Closure::new(move || {
        let mut scheduler = AnimationFrameScheduler {
            window: frame_scheduler_window.clone(),
            callback: frame_slot.clone(),
        };
        let mut host = h.borrow_mut();
        let Host {
            constellation,
            surface,
            viewport,
        } = &mut *host;
        constellation.frame(Instant::now(), &*viewport, &mut *surface, &mut scheduler);
    }));

    host.borrow_mut().constellation.start(&mut scheduler);
}
