//! vit_core - focus point and crop zone editing over a scaled image.
//!
//! This crate holds everything that does not touch the DOM: the natural/display
//! coordinate mapping, the clamped annotation model, overlay placement against
//! an abstract [`OverlaySurface`], the drag/resize state machine, image
//! resolution and change notification. The browser binding lives in the `vit` crate.

mod binding;
mod config;
mod error;
mod frame;
mod geometry;
mod handle;
mod interaction;
mod model;
mod notifier;
mod render;
mod surface;
mod tool;

#[cfg(test)]
mod tests;

pub use binding::{resolve_image, ImageCandidate, ImageRef};
pub use config::{CropStyle, CropZoneOptions, FocusPointOptions, HandleStyle, MarkerStyle, ToolConfig};
pub use error::ToolError;
pub use frame::ImageFrame;
pub use geometry::{CropZone, FocusPoint, Point, Rect, Size};
pub use handle::{Anchor, Handle, UnknownHandle};
pub use interaction::{InteractionSession, MIN_DISPLAY_SIZE};
pub use model::{clamp_crop_zone, clamp_focus_point, AnnotationModel, Snapshot, Transition, MIN_CROP_SIZE};
pub use notifier::{ChangeNotifier, SnapshotQueue};
pub use render::{crop_placement, marker_position, OverlayRenderer};
pub use surface::{Cursor, OverlayElement, OverlaySurface, PointerTarget};
pub use tool::ImageTool;
