//! The seam between the tool and whatever displays it.
//!
//! In the browser this is the DOM (bound `<img>`, its parent container and the
//! overlay `<div>`s). Tests use a recording implementation.

use crate::config::{CropStyle, HandleStyle, MarkerStyle};
use crate::geometry::{Point, Size};
use crate::handle::Handle;

/// The two overlay elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayElement {
    FocusMarker,
    CropZone,
}

/// Cursor affordances used by the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Move,
    Grabbing,
    Resize(Handle),
}

impl Cursor {
    /// CSS `cursor` value.
    pub fn css(&self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Move => "move",
            Cursor::Grabbing => "grabbing",
            Cursor::Resize(handle) => handle.cursor(),
        }
    }
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    FocusMarker,
    /// The crop rectangle itself, not one of its handles
    CropBody,
    CropHandle(Handle),
}

/// Display backend for the overlay.
///
/// Positions passed to [`OverlaySurface::place`] are relative to the
/// container's padding box, i.e. already include the container offset.
pub trait OverlaySurface {
    /// Intrinsic size of the bound image; zero while it has not loaded.
    fn natural_size(&self) -> Size;

    /// Rendered size of the bound image.
    fn rendered_size(&self) -> Size;

    /// Top-left of the rendered image in pointer (client) coordinates.
    fn image_origin(&self) -> Point;

    /// Offset of the image inside the overlay's positioning box (container padding).
    fn container_offset(&self) -> Point;

    fn create_focus_marker(&mut self, style: &MarkerStyle);

    fn create_crop_overlay(&mut self, style: &CropStyle, handle_style: &HandleStyle);

    fn has_element(&self, element: OverlayElement) -> bool;

    /// Rendered size of an overlay element (zero if missing or hidden).
    fn element_size(&self, element: OverlayElement) -> Size;

    /// Move an element; `size` is applied when given.
    fn place(&mut self, element: OverlayElement, position: Point, size: Option<Size>);

    fn set_visible(&mut self, element: OverlayElement, visible: bool);

    /// Set the cursor of an element, or of the whole document for `None`.
    fn set_cursor(&mut self, element: Option<OverlayElement>, cursor: Cursor);

    /// Remove every overlay element that was created.
    fn remove_elements(&mut self);
}
