//! Overlay placement.
//!
//! The renderer keeps no geometry of its own. Each pass reads the model and
//! the current frame, maps to display space and pushes the result to the
//! surface.

use crate::frame::ImageFrame;
use crate::geometry::{CropZone, FocusPoint, Point, Rect, Size};
use crate::surface::{OverlayElement, OverlaySurface};

/// Top-left for the focus marker so its center lands on `point`.
pub fn marker_position(frame: &ImageFrame, point: FocusPoint, offset: Point, marker: Size) -> Point {
    let display = frame.to_display(point);
    Point::new(
        display.x + offset.x - marker.width / 2.0,
        display.y + offset.y - marker.height / 2.0,
    )
}

/// Display rectangle for the crop overlay, shifted by the container offset.
pub fn crop_placement(frame: &ImageFrame, zone: CropZone, offset: Point) -> Rect {
    let display = frame.rect_to_display(zone);
    Rect::new(
        display.x + offset.x,
        display.y + offset.y,
        display.width,
        display.height,
    )
}

/// Pushes model geometry to an [`OverlaySurface`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlayRenderer {
    debug: bool,
}

impl OverlayRenderer {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    pub fn render_focus<S: OverlaySurface>(&self, surface: &mut S, frame: &ImageFrame, point: FocusPoint) {
        if !surface.has_element(OverlayElement::FocusMarker) {
            return;
        }

        let offset = surface.container_offset();
        let marker = surface.element_size(OverlayElement::FocusMarker);
        let position = marker_position(frame, point, offset, marker);

        if self.debug {
            log::debug!(
                "[FocusMarker] display={:?} offset={:?} marker={:?} -> left={} top={}",
                frame.to_display(point),
                offset,
                marker,
                position.x,
                position.y
            );
        }

        surface.place(OverlayElement::FocusMarker, position, None);
    }

    pub fn render_crop<S: OverlaySurface>(&self, surface: &mut S, frame: &ImageFrame, zone: CropZone) {
        if !surface.has_element(OverlayElement::CropZone) {
            return;
        }

        let offset = surface.container_offset();
        let placed = crop_placement(frame, zone, offset);

        if self.debug {
            log::debug!(
                "[CropOverlay] zone={:?} scale={:?} offset={:?} -> {:?}",
                zone,
                frame.scale(),
                offset,
                placed
            );
        }

        surface.place(OverlayElement::CropZone, placed.origin(), Some(placed.size()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> ImageFrame {
        ImageFrame::new(Size::new(100.0, 100.0), Size::new(200.0, 200.0))
    }

    #[test]
    fn test_marker_is_centered_on_point() {
        let pos = marker_position(&frame(), Point::new(50.0, 25.0), Point::ORIGIN, Size::new(36.0, 36.0));
        assert_eq!(pos, Point::new(82.0, 32.0));
    }

    #[test]
    fn test_container_offset_is_added() {
        let offset = Point::new(12.0, 8.0);
        let pos = marker_position(&frame(), Point::new(0.0, 0.0), offset, Size::new(10.0, 10.0));
        assert_eq!(pos, Point::new(7.0, 3.0));

        let rect = crop_placement(&frame(), Rect::new(20.0, 20.0, 80.0, 80.0), offset);
        assert_eq!(rect, Rect::new(52.0, 48.0, 160.0, 160.0));
    }

    #[test]
    fn test_crop_scales_size() {
        let rect = crop_placement(&frame(), Rect::new(20.0, 20.0, 80.0, 80.0), Point::ORIGIN);
        assert_eq!(rect, Rect::new(40.0, 40.0, 160.0, 160.0));
    }
}
