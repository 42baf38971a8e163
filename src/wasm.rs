//! JavaScript binding: the `VisualImageTool` class.
//!
//! The core tool lives behind `Rc<RefCell<..>>` so DOM listeners can reach it.
//! Snapshots are queued while the tool is borrowed and handed to the host's
//! `onChange` afterwards, so the callback may freely call back into the tool.
//! An exception thrown by `onChange` is returned, unchanged, from the call (or
//! event handler) that caused the change.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use vit_core::{ImageTool, Snapshot, SnapshotQueue, ToolConfig, ToolError};

use crate::dom::{self, DomSurface};
use crate::listeners::Listeners;

pub(crate) type SharedTool = Rc<RefCell<ImageTool<DomSurface>>>;

/// Option keys decoded as plain JSON data.
const CONFIG_KEYS: [&str; 3] = ["focusPoint", "cropZone", "debug"];

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Convert a tool error into a JS `Error` named after its class.
pub(crate) fn js_error(err: ToolError) -> JsValue {
    let js = js_sys::Error::new(&err.to_string());
    js.set_name(err.kind());
    js.into()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}

/// Snapshots waiting for the host callback.
#[derive(Clone)]
pub(crate) struct Delivery {
    queue: SnapshotQueue,
    on_change: Option<Function>,
}

impl Delivery {
    fn new(on_change: Option<Function>) -> Self {
        Self {
            queue: SnapshotQueue::new(),
            on_change,
        }
    }

    /// Deliver queued snapshots in order. Stops at the first exception and
    /// drops whatever is still queued.
    pub(crate) fn flush(&self) -> Result<(), JsValue> {
        let Some(on_change) = &self.on_change else {
            self.queue.clear();
            return Ok(());
        };

        self.queue
            .drain_with(|snapshot| on_change.call1(&JsValue::NULL, &to_js(&snapshot)?).map(drop))
    }
}

fn read_config(options: &JsValue) -> Result<ToolConfig, ToolError> {
    let plain = js_sys::Object::new();
    for key in CONFIG_KEYS {
        let key = JsValue::from_str(key);
        let value = Reflect::get(options, &key).unwrap_or(JsValue::UNDEFINED);
        if !value.is_undefined() && Reflect::set(&plain, &key, &value).is_err() {
            return Err(ToolError::invalid_options("options object is not readable"));
        }
    }

    let json: String = js_sys::JSON::stringify(&plain)
        .map_err(|_| ToolError::invalid_options("options are not serializable"))?
        .into();
    serde_json::from_str(&json).map_err(|e| ToolError::invalid_options(e.to_string()))
}

/// Focus point and crop zone editor bound to an `<img>`.
#[wasm_bindgen(js_name = VisualImageTool)]
#[derive(Clone)]
pub struct VisualImageTool {
    tool: SharedTool,
    delivery: Delivery,
    listeners: Rc<RefCell<Option<Listeners>>>,
}

#[wasm_bindgen(js_class = VisualImageTool)]
impl VisualImageTool {
    /// `new VisualImageTool({ imageElement, focusPoint?, cropZone?, onChange?, debug? })`
    ///
    /// Throws a `ConfigurationError` when the image is missing, cannot be
    /// found, or is not an `<img>`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<VisualImageTool, JsValue> {
        if !options.is_object() {
            return Err(js_error(ToolError::MissingImage));
        }

        let window = web_sys::window().ok_or_else(|| JsError::new("VisualImageTool needs a browser window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsError::new("VisualImageTool needs a document"))?;

        let image_value = Reflect::get(&options, &JsValue::from_str("imageElement")).unwrap_or(JsValue::UNDEFINED);
        let image = dom::resolve_image(&document, &image_value).map_err(js_error)?;
        let config = read_config(&options).map_err(js_error)?;
        let on_change = Reflect::get(&options, &JsValue::from_str("onChange"))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok());

        if config.debug && console_log::init_with_level(log::Level::Debug).is_ok() {
            log::debug!("Debug logging enabled");
        }

        let surface = DomSurface::bind(window, document, image).map_err(js_error)?;
        let delivery = Delivery::new(on_change);

        let mut tool = ImageTool::new(surface, config);
        if delivery.on_change.is_some() {
            let queue = delivery.queue.clone();
            tool = tool.on_change(move |snapshot: &Snapshot| queue.push(snapshot));
        }
        let tool: SharedTool = Rc::new(RefCell::new(tool));

        let listeners = Listeners::attach(&tool, &delivery)?;

        Ok(Self {
            tool,
            delivery,
            listeners: Rc::new(RefCell::new(Some(listeners))),
        })
    }

    /// Show (`true`), hide (`false`) or flip (no argument) the focus point.
    #[wasm_bindgen(js_name = toggleFocusPoint)]
    pub fn toggle_focus_point(&self, active: Option<bool>) -> Result<VisualImageTool, JsValue> {
        self.tool
            .borrow_mut()
            .toggle_focus_point(active)
            .map_err(js_error)?;
        self.delivery.flush()?;
        Ok(self.clone())
    }

    /// Show (`true`), hide (`false`) or flip (no argument) the crop zone.
    #[wasm_bindgen(js_name = toggleCropZone)]
    pub fn toggle_crop_zone(&self, active: Option<bool>) -> Result<VisualImageTool, JsValue> {
        self.tool
            .borrow_mut()
            .toggle_crop_zone(active)
            .map_err(js_error)?;
        self.delivery.flush()?;
        Ok(self.clone())
    }

    #[wasm_bindgen(js_name = setFocusPoint)]
    pub fn set_focus_point(&self, x: f64, y: f64) -> Result<VisualImageTool, JsValue> {
        self.tool
            .borrow_mut()
            .set_focus_point(x, y)
            .map_err(js_error)?;
        self.delivery.flush()?;
        Ok(self.clone())
    }

    #[wasm_bindgen(js_name = setCropZone)]
    pub fn set_crop_zone(&self, x: f64, y: f64, width: f64, height: f64) -> Result<VisualImageTool, JsValue> {
        self.tool
            .borrow_mut()
            .set_crop_zone(x, y, width, height)
            .map_err(js_error)?;
        self.delivery.flush()?;
        Ok(self.clone())
    }

    /// `{x, y}` in natural pixels.
    #[wasm_bindgen(js_name = getFocusPoint)]
    pub fn get_focus_point(&self) -> Result<JsValue, JsValue> {
        let point = self.tool.borrow().focus_point().map_err(js_error)?;
        to_js(&point)
    }

    /// `{x, y, width, height}` in natural pixels.
    #[wasm_bindgen(js_name = getCropZone)]
    pub fn get_crop_zone(&self) -> Result<JsValue, JsValue> {
        let zone = self.tool.borrow().crop_zone().map_err(js_error)?;
        to_js(&zone)
    }

    /// `{width, height}` of the image's natural size.
    #[wasm_bindgen(js_name = getImageDimensions)]
    pub fn get_image_dimensions(&self) -> Result<JsValue, JsValue> {
        let size = self.tool.borrow().image_dimensions().map_err(js_error)?;
        to_js(&size)
    }

    /// The object `onChange` receives.
    #[wasm_bindgen(js_name = getSnapshot)]
    pub fn get_snapshot(&self) -> Result<JsValue, JsValue> {
        let snapshot = self.tool.borrow().snapshot().map_err(js_error)?;
        to_js(&snapshot)
    }

    #[wasm_bindgen(js_name = isFocusActive)]
    pub fn is_focus_active(&self) -> Result<bool, JsValue> {
        self.tool.borrow().is_focus_active().map_err(js_error)
    }

    #[wasm_bindgen(js_name = isCropActive)]
    pub fn is_crop_active(&self) -> Result<bool, JsValue> {
        self.tool.borrow().is_crop_active().map_err(js_error)
    }

    /// Re-measure the image, e.g. after the host resized it without a window resize.
    #[wasm_bindgen(js_name = updateScaling)]
    pub fn update_scaling(&self) -> Result<(), JsValue> {
        self.tool.borrow_mut().refresh().map_err(js_error)?;
        self.delivery.flush()
    }

    /// Remove the overlay and every listener. Calling it again does nothing.
    pub fn destroy(&self) {
        drop(self.listeners.borrow_mut().take());
        self.tool.borrow_mut().destroy();
        self.delivery.queue.clear();
    }
}
