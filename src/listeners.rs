//! Per-instance event listener registry.
//!
//! Every listener a tool adds (window resize, image load, pointer events) is
//! kept here and removed again when the registry is dropped, so instances
//! never leak or share handlers.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, HtmlElement, HtmlImageElement, MouseEvent, Window};

use vit_core::Point;

use crate::wasm::{js_error, Delivery, SharedTool};

type EventHandler = Closure<dyn FnMut(Event) -> Result<(), JsValue>>;
type MouseHandler = Closure<dyn FnMut(MouseEvent) -> Result<(), JsValue>>;

/// Listeners registered by one tool instance.
pub struct Listeners {
    window: Window,
    document: Document,
    container: HtmlElement,
    image: HtmlImageElement,
    on_resize: EventHandler,
    on_load: Option<EventHandler>,
    on_mouse_down: MouseHandler,
    on_mouse_move: MouseHandler,
    on_mouse_up: MouseHandler,
}

impl Listeners {
    /// Register all listeners for `tool`.
    ///
    /// Pointer-down is delegated to the image container and classified there;
    /// move/up are document-wide so a drag keeps tracking outside the image.
    pub fn attach(tool: &SharedTool, delivery: &Delivery) -> Result<Self, JsValue> {
        let (window, document, container, image) = {
            let tool = tool.borrow();
            let surface = tool.surface().map_err(js_error)?;
            (
                surface.window().clone(),
                surface.document().clone(),
                surface.container().clone(),
                surface.image().clone(),
            )
        };

        let on_resize = refresh_handler(tool, delivery);
        let on_load = (!image.complete()).then(|| refresh_handler(tool, delivery));

        let on_mouse_down = {
            let tool = tool.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| -> Result<(), JsValue> {
                let Some(target) = event.target() else {
                    return Ok(());
                };
                let hit = tool
                    .borrow()
                    .surface()
                    .ok()
                    .and_then(|surface| surface.classify(&target));
                let Some(hit) = hit else {
                    return Ok(());
                };

                let started = tool
                    .borrow_mut()
                    .pointer_down(hit, client_position(&event))
                    .map_err(js_error)?;
                if started {
                    event.prevent_default();
                }
                Ok(())
            }) as Box<dyn FnMut(MouseEvent) -> Result<(), JsValue>>)
        };

        let on_mouse_move = {
            let tool = tool.clone();
            let delivery = delivery.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| -> Result<(), JsValue> {
                tool.borrow_mut()
                    .pointer_move(client_position(&event))
                    .map_err(js_error)?;
                delivery.flush()
            }) as Box<dyn FnMut(MouseEvent) -> Result<(), JsValue>>)
        };

        let on_mouse_up = {
            let tool = tool.clone();
            Closure::wrap(Box::new(move |_event: MouseEvent| -> Result<(), JsValue> {
                tool.borrow_mut().pointer_up().map_err(js_error)
            }) as Box<dyn FnMut(MouseEvent) -> Result<(), JsValue>>)
        };

        add(&window, "resize", &on_resize)?;
        if let Some(on_load) = &on_load {
            add(&image, "load", on_load)?;
        }
        add(&container, "mousedown", &on_mouse_down)?;
        add(&document, "mousemove", &on_mouse_move)?;
        add(&document, "mouseup", &on_mouse_up)?;
        log::trace!("Listeners attached");

        Ok(Self {
            window,
            document,
            container,
            image,
            on_resize,
            on_load,
            on_mouse_down,
            on_mouse_move,
            on_mouse_up,
        })
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        remove(&self.window, "resize", &self.on_resize);
        if let Some(on_load) = &self.on_load {
            remove(&self.image, "load", on_load);
        }
        remove(&self.container, "mousedown", &self.on_mouse_down);
        remove(&self.document, "mousemove", &self.on_mouse_move);
        remove(&self.document, "mouseup", &self.on_mouse_up);
        log::trace!("Listeners detached");
    }
}

fn refresh_handler(tool: &SharedTool, delivery: &Delivery) -> EventHandler {
    let tool = tool.clone();
    let delivery = delivery.clone();
    Closure::wrap(Box::new(move |_event: Event| -> Result<(), JsValue> {
        tool.borrow_mut().refresh().map_err(js_error)?;
        delivery.flush()
    }) as Box<dyn FnMut(Event) -> Result<(), JsValue>>)
}

fn client_position(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

fn add<T: ?Sized>(target: &EventTarget, kind: &str, handler: &Closure<T>) -> Result<(), JsValue> {
    target.add_event_listener_with_callback(kind, handler.as_ref().unchecked_ref())
}

fn remove<T: ?Sized>(target: &EventTarget, kind: &str, handler: &Closure<T>) {
    if let Err(e) = target.remove_event_listener_with_callback(kind, handler.as_ref().unchecked_ref()) {
        log::warn!("Failed to remove {} listener: {:?}", kind, e);
    }
}
