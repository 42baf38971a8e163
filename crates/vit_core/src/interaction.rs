//! Pointer gesture state and the display-space geometry of drags and resizes.
//!
//! A gesture is pointer-down, any number of pointer-moves, pointer-up. The
//! session records what is being manipulated and the geometry captured at
//! pointer-down; every move is computed from that anchor, not incrementally.

use crate::geometry::{Point, Rect};
use crate::handle::Handle;

/// Minimum crop width/height in display pixels while resizing.
pub const MIN_DISPLAY_SIZE: f64 = 10.0;

/// The gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionSession {
    /// No gesture
    #[default]
    Idle,
    /// Moving the focus marker.
    DraggingFocus {
        /// Pointer position minus the marker's visual center at pointer-down
        grab_offset: Point,
    },
    /// Moving the whole crop rectangle.
    DraggingCrop {
        /// Display-space top-left of the crop zone at pointer-down
        start_origin: Point,
        /// Pointer position at pointer-down (client space)
        start_pointer: Point,
    },
    /// Dragging one of the resize handles.
    ResizingCrop {
        handle: Handle,
        /// Display-space crop rectangle at pointer-down
        start: Rect,
        /// Pointer position at pointer-down (client space)
        start_pointer: Point,
    },
}

impl InteractionSession {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionSession::Idle)
    }

    /// The handle being dragged, if resizing.
    pub fn active_handle(&self) -> Option<Handle> {
        match self {
            InteractionSession::ResizingCrop { handle, .. } => Some(*handle),
            _ => None,
        }
    }
}

/// Display-space position for the focus point while dragging the marker.
///
/// `image_origin` and `pointer` are client coordinates; the result is
/// relative to the image's top-left.
pub fn focus_drag_target(image_origin: Point, pointer: Point, grab_offset: Point) -> Point {
    pointer - image_origin - grab_offset
}

/// Display-space top-left for the crop zone while moving it.
pub fn crop_drag_origin(start_origin: Point, start_pointer: Point, pointer: Point) -> Point {
    start_origin + (pointer - start_pointer)
}

/// Display-space rectangle after dragging `handle` by `delta`.
///
/// `t`/`l` move the top/left edge and shrink the size by the same amount;
/// `b`/`r` only grow the size. A dimension that would drop below
/// [`MIN_DISPLAY_SIZE`] is held at the minimum with the far edge pinned.
pub fn resize_rect(handle: Handle, start: Rect, delta: Point) -> Rect {
    let mut rect = start;

    if handle.moves_top() {
        rect.y = start.y + delta.y;
        rect.height = start.height - delta.y;
    }
    if handle.moves_bottom() {
        rect.height = start.height + delta.y;
    }
    if handle.moves_left() {
        rect.x = start.x + delta.x;
        rect.width = start.width - delta.x;
    }
    if handle.moves_right() {
        rect.width = start.width + delta.x;
    }

    if rect.width < MIN_DISPLAY_SIZE {
        if handle.moves_left() {
            rect.x = start.x + start.width - MIN_DISPLAY_SIZE;
        }
        rect.width = MIN_DISPLAY_SIZE;
    }
    if rect.height < MIN_DISPLAY_SIZE {
        if handle.moves_top() {
            rect.y = start.y + start.height - MIN_DISPLAY_SIZE;
        }
        rect.height = MIN_DISPLAY_SIZE;
    }

    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Rect {
        Rect::new(40.0, 40.0, 160.0, 160.0)
    }

    #[test]
    fn test_top_left_grows_up_and_left() {
        let r = resize_rect(Handle::TopLeft, start(), Point::new(-20.0, -20.0));
        assert_eq!(r, Rect::new(20.0, 20.0, 180.0, 180.0));
    }

    #[test]
    fn test_bottom_right_only_changes_size() {
        let r = resize_rect(Handle::BottomRight, start(), Point::new(15.0, -30.0));
        assert_eq!(r, Rect::new(40.0, 40.0, 175.0, 130.0));
    }

    #[test]
    fn test_mid_edge_leaves_other_axis() {
        let r = resize_rect(Handle::TopMiddle, start(), Point::new(50.0, 10.0));
        assert_eq!(r, Rect::new(40.0, 50.0, 160.0, 150.0));

        let r = resize_rect(Handle::MiddleRight, start(), Point::new(-60.0, 99.0));
        assert_eq!(r, Rect::new(40.0, 40.0, 100.0, 160.0));

        let r = resize_rect(Handle::MiddleLeft, start(), Point::new(30.0, 99.0));
        assert_eq!(r, Rect::new(70.0, 40.0, 130.0, 160.0));

        let r = resize_rect(Handle::BottomMiddle, start(), Point::new(-5.0, 20.0));
        assert_eq!(r, Rect::new(40.0, 40.0, 160.0, 180.0));
    }

    #[test]
    fn test_mixed_corners() {
        let r = resize_rect(Handle::TopRight, start(), Point::new(10.0, 10.0));
        assert_eq!(r, Rect::new(40.0, 50.0, 170.0, 150.0));

        let r = resize_rect(Handle::BottomLeft, start(), Point::new(10.0, 10.0));
        assert_eq!(r, Rect::new(50.0, 40.0, 150.0, 170.0));
    }

    #[test]
    fn test_floor_pins_far_edge_when_dragging_near_edge() {
        // Dragging the left edge past the right edge: right edge stays at 200.
        let r = resize_rect(Handle::TopLeft, start(), Point::new(500.0, 500.0));
        assert_eq!(r, Rect::new(190.0, 190.0, MIN_DISPLAY_SIZE, MIN_DISPLAY_SIZE));
        assert_eq!(r.right(), start().right());
        assert_eq!(r.bottom(), start().bottom());
    }

    #[test]
    fn test_floor_keeps_origin_when_dragging_far_edge() {
        let r = resize_rect(Handle::BottomRight, start(), Point::new(-500.0, -155.0));
        assert_eq!(r, Rect::new(40.0, 40.0, MIN_DISPLAY_SIZE, MIN_DISPLAY_SIZE));
    }

    #[test]
    fn test_drag_helpers() {
        let target = focus_drag_target(
            Point::new(100.0, 50.0),
            Point::new(180.0, 130.0),
            Point::new(3.0, -2.0),
        );
        assert_eq!(target, Point::new(77.0, 82.0));

        let origin = crop_drag_origin(
            Point::new(40.0, 40.0),
            Point::new(300.0, 300.0),
            Point::new(290.0, 320.0),
        );
        assert_eq!(origin, Point::new(30.0, 60.0));
    }

    #[test]
    fn test_session_accessors() {
        assert!(InteractionSession::default().is_idle());
        let session = InteractionSession::ResizingCrop {
            handle: Handle::BottomMiddle,
            start: start(),
            start_pointer: Point::ORIGIN,
        };
        assert!(!session.is_idle());
        assert_eq!(session.active_handle(), Some(Handle::BottomMiddle));
    }
}
