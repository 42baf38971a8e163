//! DOM-backed overlay surface.
//!
//! Owns the overlay `<div>`s appended to the image's parent container and
//! answers layout queries from the live document.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, HtmlElement, HtmlImageElement, Window};

use crate::css;
use vit_core::{
    Anchor, CropStyle, Cursor, Handle, HandleStyle, ImageCandidate, ImageRef, MarkerStyle, OverlayElement,
    OverlaySurface, Point, PointerTarget, Size, ToolError,
};

/// Plus-shaped marker outline.
const MARKER_CLIP_PATH: &str = "polygon(40% 0%, 60% 0%, 60% 40%, 100% 40%, 100% 60%, 60% 60%, 60% 100%, 40% 100%, 40% 60%, 0% 60%, 0% 40%, 40% 40%)";
const MARKER_Z_INDEX: &str = "999";
const CROP_Z_INDEX: &str = "998";
const HANDLE_DATA_KEY: &str = "handle";

/// Resolve the host's `imageElement` option (element or CSS selector).
pub fn resolve_image(document: &Document, value: &JsValue) -> Result<HtmlImageElement, ToolError> {
    let reference = if value.is_undefined() || value.is_null() {
        ImageRef::Missing
    } else if let Some(selector) = value.as_string() {
        ImageRef::Selector(selector)
    } else if let Some(element) = value.dyn_ref::<Element>() {
        ImageRef::Element(DomNode(element.clone()))
    } else {
        ImageRef::Other
    };

    let DomNode(element) = vit_core::resolve_image(reference, |selector| {
        document.query_selector(selector).ok().flatten().map(DomNode)
    })?;

    let tag = element.tag_name();
    element
        .dyn_into::<HtmlImageElement>()
        .map_err(|_| ToolError::not_an_image(tag))
}

/// Document element seen through [`ImageCandidate`].
struct DomNode(Element);

impl ImageCandidate for DomNode {
    fn tag_name(&self) -> String {
        self.0.tag_name()
    }

    fn has_parent(&self) -> bool {
        self.0.parent_element().is_some()
    }
}

/// Overlay surface bound to one `<img>` and its parent container.
#[derive(Debug)]
pub struct DomSurface {
    window: Window,
    document: Document,
    image: HtmlImageElement,
    container: HtmlElement,
    marker: Option<HtmlElement>,
    crop: Option<HtmlElement>,
}

impl DomSurface {
    /// Bind to `image`. The parent container is made `position: relative` so
    /// the overlays anchor to it.
    pub fn bind(window: Window, document: Document, image: HtmlImageElement) -> Result<Self, ToolError> {
        let container = image
            .parent_element()
            .and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
            .ok_or(ToolError::Detached)?;

        set_style(&container, "position", "relative");

        Ok(Self {
            window,
            document,
            image,
            container,
            marker: None,
            crop: None,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn image(&self) -> &HtmlImageElement {
        &self.image
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Map an event target to the overlay part it belongs to.
    pub fn classify(&self, target: &EventTarget) -> Option<PointerTarget> {
        let target: &JsValue = target.as_ref();

        if self.marker.as_ref().is_some_and(|m| is_same(m, target)) {
            return Some(PointerTarget::FocusMarker);
        }

        let crop = self.crop.as_ref()?;
        if is_same(crop, target) {
            return Some(PointerTarget::CropBody);
        }

        let element = target.dyn_ref::<HtmlElement>()?;
        let parent = element.parent_element()?;
        if !is_same(crop, AsRef::<JsValue>::as_ref(&parent)) {
            return None;
        }
        element
            .dataset()
            .get(HANDLE_DATA_KEY)
            .and_then(|id| id.parse::<Handle>().ok())
            .map(PointerTarget::CropHandle)
    }

    fn element(&self, element: OverlayElement) -> Option<&HtmlElement> {
        match element {
            OverlayElement::FocusMarker => self.marker.as_ref(),
            OverlayElement::CropZone => self.crop.as_ref(),
        }
    }

    fn create_div(&self) -> Option<HtmlElement> {
        match self
            .document
            .create_element("div")
            .and_then(|el| el.dyn_into::<HtmlElement>().map_err(JsValue::from))
        {
            Ok(div) => Some(div),
            Err(e) => {
                log::error!("Failed to create overlay element: {:?}", e);
                None
            }
        }
    }

    fn create_handle(&self, overlay: &HtmlElement, handle: Handle, style: &HandleStyle) {
        let Some(div) = self.create_div() else {
            return;
        };

        apply_styles(
            &div,
            &[
                ("position", "absolute"),
                ("width", style.width.as_str()),
                ("height", style.height.as_str()),
                ("background-color", style.background_color.as_str()),
                ("border", style.border.as_str()),
                ("box-shadow", style.box_shadow.as_str()),
                ("box-sizing", "border-box"),
                ("cursor", handle.cursor()),
            ],
        );

        // Centered on the border line.
        let half_width = css::negative_half(&style.width);
        let half_height = css::negative_half(&style.height);
        match handle.horizontal() {
            Anchor::Start => set_style(&div, "left", &half_width),
            Anchor::End => set_style(&div, "right", &half_width),
            Anchor::Center => {
                set_style(&div, "left", "50%");
                set_style(&div, "margin-left", &half_width);
            }
        }
        match handle.vertical() {
            Anchor::Start => set_style(&div, "top", &half_height),
            Anchor::End => set_style(&div, "bottom", &half_height),
            Anchor::Center => {
                set_style(&div, "top", "50%");
                set_style(&div, "margin-top", &half_height);
            }
        }

        if let Err(e) = div.dataset().set(HANDLE_DATA_KEY, handle.id()) {
            log::warn!("Failed to tag handle {}: {:?}", handle, e);
        }
        append(overlay, &div);
    }
}

impl OverlaySurface for DomSurface {
    fn natural_size(&self) -> Size {
        Size::new(
            f64::from(self.image.natural_width()),
            f64::from(self.image.natural_height()),
        )
    }

    fn rendered_size(&self) -> Size {
        Size::new(
            f64::from(self.image.offset_width()),
            f64::from(self.image.offset_height()),
        )
    }

    fn image_origin(&self) -> Point {
        let rect = self.image.get_bounding_client_rect();
        Point::new(rect.left(), rect.top())
    }

    fn container_offset(&self) -> Point {
        let style = match self.window.get_computed_style(&self.container) {
            Ok(Some(style)) => style,
            _ => return Point::ORIGIN,
        };
        let read = |property: &str| {
            style
                .get_property_value(property)
                .map(|value| css::parse_px(&value))
                .unwrap_or(0.0)
        };
        Point::new(read("padding-left"), read("padding-top"))
    }

    fn create_focus_marker(&mut self, style: &MarkerStyle) {
        let Some(marker) = self.create_div() else {
            return;
        };

        apply_styles(
            &marker,
            &[
                ("position", "absolute"),
                ("width", style.width.as_str()),
                ("height", style.height.as_str()),
                ("border", style.border.as_str()),
                ("box-shadow", style.box_shadow.as_str()),
                ("background-color", style.background_color.as_str()),
                ("z-index", MARKER_Z_INDEX),
                ("clip-path", MARKER_CLIP_PATH),
            ],
        );

        append(&self.container, &marker);
        self.marker = Some(marker);
    }

    fn create_crop_overlay(&mut self, style: &CropStyle, handle_style: &HandleStyle) {
        let Some(overlay) = self.create_div() else {
            return;
        };

        apply_styles(
            &overlay,
            &[
                ("position", "absolute"),
                ("border", style.border.as_str()),
                ("background-color", style.background_color.as_str()),
                ("box-sizing", "border-box"),
                ("z-index", CROP_Z_INDEX),
            ],
        );

        for handle in Handle::ALL {
            self.create_handle(&overlay, handle, handle_style);
        }

        append(&self.container, &overlay);
        self.crop = Some(overlay);
    }

    fn has_element(&self, element: OverlayElement) -> bool {
        self.element(element).is_some()
    }

    fn element_size(&self, element: OverlayElement) -> Size {
        self.element(element)
            .map(|el| Size::new(f64::from(el.offset_width()), f64::from(el.offset_height())))
            .unwrap_or_default()
    }

    fn place(&mut self, element: OverlayElement, position: Point, size: Option<Size>) {
        let Some(el) = self.element(element) else {
            return;
        };

        set_style(el, "left", &format!("{}px", position.x));
        set_style(el, "top", &format!("{}px", position.y));
        if let Some(size) = size {
            set_style(el, "width", &format!("{}px", size.width));
            set_style(el, "height", &format!("{}px", size.height));
        }
    }

    fn set_visible(&mut self, element: OverlayElement, visible: bool) {
        if let Some(el) = self.element(element) {
            set_style(el, "display", if visible { "block" } else { "none" });
        }
    }

    fn set_cursor(&mut self, element: Option<OverlayElement>, cursor: Cursor) {
        match element {
            Some(element) => {
                if let Some(el) = self.element(element) {
                    set_style(el, "cursor", cursor.css());
                }
            }
            None => {
                if let Some(body) = self.document.body() {
                    set_style(&body, "cursor", cursor.css());
                }
            }
        }
    }

    fn remove_elements(&mut self) {
        for el in [self.marker.take(), self.crop.take()].into_iter().flatten() {
            el.remove();
        }
        log::trace!("Overlay elements removed");
    }
}

fn is_same(element: &HtmlElement, target: &JsValue) -> bool {
    AsRef::<JsValue>::as_ref(element) == target
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = el.style().set_property(property, value) {
        log::warn!("Failed to set {}: {} ({:?})", property, value, e);
    }
}

fn apply_styles(el: &HtmlElement, styles: &[(&str, &str)]) {
    for (property, value) in styles {
        set_style(el, property, value);
    }
}

fn append(parent: &HtmlElement, child: &HtmlElement) {
    if let Err(e) = parent.append_child(child) {
        log::error!("Failed to attach overlay element: {:?}", e);
    }
}
