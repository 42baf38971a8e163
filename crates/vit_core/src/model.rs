//! Annotation model: the focus point, the crop zone and their activation flags.
//!
//! Values are kept in natural-pixel space and are clamped into the image on
//! every mutation. Out-of-range input is never an error.

use serde::{Deserialize, Serialize};

use crate::frame::ImageFrame;
use crate::geometry::{CropZone, FocusPoint, Point, Rect};

/// Minimum crop zone width/height in natural pixels.
pub const MIN_CROP_SIZE: f64 = 10.0;

/// Clamp a focus point into `[0, natural_width] x [0, natural_height]`.
pub fn clamp_focus_point(frame: &ImageFrame, x: f64, y: f64) -> FocusPoint {
    let natural = frame.natural();
    Point::new(x.min(natural.width).max(0.0), y.min(natural.height).max(0.0))
}

/// Clamp a crop zone into the image.
///
/// Position is clamped first, against the *requested* size; the size is then
/// re-bounded against the clamped position. The order matters when the
/// requested size exceeds the image.
pub fn clamp_crop_zone(frame: &ImageFrame, x: f64, y: f64, width: f64, height: f64) -> CropZone {
    let natural = frame.natural();

    let clamped_x = x.min(natural.width - width).max(0.0);
    let clamped_y = y.min(natural.height - height).max(0.0);
    let clamped_width = width.min(natural.width - clamped_x).max(MIN_CROP_SIZE);
    let clamped_height = height.min(natural.height - clamped_y).max(MIN_CROP_SIZE);

    Rect::new(clamped_x, clamped_y, clamped_width, clamped_height)
}

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Inactive -> active.
    Activated,
    /// Active -> inactive.
    Deactivated,
    /// Requested state equals the current one.
    Unchanged,
}

/// Immutable copy of the annotation state handed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub focus_point: FocusPoint,
    pub crop_zone: CropZone,
    pub focus_active: bool,
    pub crop_active: bool,
}

/// Current annotations of one tool instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationModel {
    focus_point: FocusPoint,
    crop_zone: CropZone,
    focus_active: bool,
    crop_active: bool,
}

impl AnnotationModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus_point(&self) -> FocusPoint {
        self.focus_point
    }

    pub fn crop_zone(&self) -> CropZone {
        self.crop_zone
    }

    pub fn is_focus_active(&self) -> bool {
        self.focus_active
    }

    pub fn is_crop_active(&self) -> bool {
        self.crop_active
    }

    pub fn set_focus_point(&mut self, frame: &ImageFrame, x: f64, y: f64) {
        self.focus_point = clamp_focus_point(frame, x, y);
    }

    pub fn set_crop_zone(&mut self, frame: &ImageFrame, x: f64, y: f64, width: f64, height: f64) {
        self.crop_zone = clamp_crop_zone(frame, x, y, width, height);
    }

    /// Enable, disable or flip (`None`) the focus point.
    ///
    /// Activating a point that still sits at exactly `(0, 0)` moves it to the
    /// image center first. Deactivating keeps the coordinates.
    pub fn toggle_focus(&mut self, frame: &ImageFrame, active: Option<bool>) -> Transition {
        let wanted = active.unwrap_or(!self.focus_active);

        match (wanted, self.focus_active) {
            (true, false) => {
                if self.focus_point == Point::ORIGIN {
                    let natural = frame.natural();
                    self.focus_point = Point::new(natural.width / 2.0, natural.height / 2.0);
                }
                self.focus_active = true;
                Transition::Activated
            }
            (false, true) => {
                self.focus_active = false;
                Transition::Deactivated
            }
            _ => Transition::Unchanged,
        }
    }

    /// Enable, disable or flip (`None`) the crop zone.
    ///
    /// Activating a zone with zero width or height seeds a centered rectangle
    /// half the size of the image. Deactivating keeps the rectangle.
    pub fn toggle_crop(&mut self, frame: &ImageFrame, active: Option<bool>) -> Transition {
        let wanted = active.unwrap_or(!self.crop_active);

        match (wanted, self.crop_active) {
            (true, false) => {
                if self.crop_zone.width == 0.0 || self.crop_zone.height == 0.0 {
                    let natural = frame.natural();
                    let width = natural.width / 2.0;
                    let height = natural.height / 2.0;
                    self.crop_zone = Rect::new(
                        (natural.width - width) / 2.0,
                        (natural.height - height) / 2.0,
                        width,
                        height,
                    );
                }
                self.crop_active = true;
                Transition::Activated
            }
            (false, true) => {
                self.crop_active = false;
                Transition::Deactivated
            }
            _ => Transition::Unchanged,
        }
    }

    /// Re-clamp the focus point against `frame`. Returns true if it moved.
    pub fn reclamp_focus(&mut self, frame: &ImageFrame) -> bool {
        let clamped = clamp_focus_point(frame, self.focus_point.x, self.focus_point.y);
        let moved = clamped != self.focus_point;
        self.focus_point = clamped;
        moved
    }

    /// Re-clamp the crop zone against `frame`. Returns true if it changed.
    pub fn reclamp_crop(&mut self, frame: &ImageFrame) -> bool {
        let c = self.crop_zone;
        let clamped = clamp_crop_zone(frame, c.x, c.y, c.width, c.height);
        let changed = clamped != c;
        self.crop_zone = clamped;
        changed
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            focus_point: self.focus_point,
            crop_zone: self.crop_zone,
            focus_active: self.focus_active,
            crop_active: self.crop_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use proptest::prelude::*;

    fn frame(w: f64, h: f64) -> ImageFrame {
        ImageFrame::new(Size::new(w, h), Size::new(w, h))
    }

    #[test]
    fn test_focus_point_in_range_is_stored_exactly() {
        let f = frame(100.0, 80.0);
        let mut model = AnnotationModel::new();
        model.set_focus_point(&f, 25.5, 79.0);
        assert_eq!(model.focus_point(), Point::new(25.5, 79.0));
    }

    #[test]
    fn test_focus_point_is_clamped() {
        let f = frame(100.0, 80.0);
        let mut model = AnnotationModel::new();
        model.set_focus_point(&f, -5.0, 500.0);
        assert_eq!(model.focus_point(), Point::new(0.0, 80.0));
        model.set_focus_point(&f, 101.0, -0.1);
        assert_eq!(model.focus_point(), Point::new(100.0, 0.0));
    }

    #[test]
    fn test_crop_position_clamped_before_size() {
        let f = frame(100.0, 100.0);
        let zone = clamp_crop_zone(&f, 40.0, 40.0, 80.0, 80.0);
        assert_eq!(zone, Rect::new(20.0, 20.0, 80.0, 80.0));
    }

    #[test]
    fn test_crop_oversized_request() {
        // x is clamped against 100 - 150 = -50, i.e. pinned to 0; width then
        // re-bounded to 100 - 0.
        let f = frame(100.0, 100.0);
        let zone = clamp_crop_zone(&f, 30.0, 10.0, 150.0, 50.0);
        assert_eq!(zone, Rect::new(0.0, 10.0, 100.0, 50.0));
    }

    #[test]
    fn test_crop_minimum_size() {
        let f = frame(100.0, 100.0);
        let zone = clamp_crop_zone(&f, 10.0, 10.0, 2.0, -4.0);
        assert_eq!(zone, Rect::new(10.0, 10.0, MIN_CROP_SIZE, MIN_CROP_SIZE));
    }

    #[test]
    fn test_crop_negative_position() {
        let f = frame(200.0, 100.0);
        let zone = clamp_crop_zone(&f, -30.0, -1.0, 50.0, 50.0);
        assert_eq!(zone, Rect::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn test_crop_containment_holds_for_valid_inputs() {
        let f = frame(320.0, 240.0);
        let xs = [-100.0, 0.0, 17.0, 160.0, 319.0, 400.0];
        let sizes = [MIN_CROP_SIZE, 64.0, 239.0, 320.0, 1000.0];
        for &x in &xs {
            for &w in &sizes {
                for &h in &sizes {
                    let z = clamp_crop_zone(&f, x, x / 2.0, w, h);
                    assert!(z.x >= 0.0 && z.y >= 0.0, "{z:?}");
                    assert!(z.width >= MIN_CROP_SIZE && z.height >= MIN_CROP_SIZE, "{z:?}");
                    assert!(z.right() <= 320.0 && z.bottom() <= 240.0, "{z:?}");
                }
            }
        }
    }

    proptest! {
        #[test]
        fn focus_point_stays_inside_image(
            width in 1.0f64..5000.0,
            height in 1.0f64..5000.0,
            x in -1e6f64..1e6,
            y in -1e6f64..1e6,
        ) {
            let p = clamp_focus_point(&frame(width, height), x, y);
            prop_assert!((0.0..=width).contains(&p.x), "{:?}", p);
            prop_assert!((0.0..=height).contains(&p.y), "{:?}", p);
            if (0.0..=width).contains(&x) && (0.0..=height).contains(&y) {
                prop_assert_eq!(p, Point::new(x, y));
            }
        }

        #[test]
        fn crop_zone_stays_inside_image(
            image_width in MIN_CROP_SIZE..5000.0,
            image_height in MIN_CROP_SIZE..5000.0,
            x in -1e5f64..1e5,
            y in -1e5f64..1e5,
            width in MIN_CROP_SIZE..1e5,
            height in MIN_CROP_SIZE..1e5,
        ) {
            let z = clamp_crop_zone(&frame(image_width, image_height), x, y, width, height);
            let slack = 1e-9 * image_width.max(image_height);
            prop_assert!(z.x >= 0.0 && z.y >= 0.0, "{:?}", z);
            prop_assert!(z.width >= MIN_CROP_SIZE && z.height >= MIN_CROP_SIZE, "{:?}", z);
            prop_assert!(z.right() <= image_width + slack, "{:?}", z);
            prop_assert!(z.bottom() <= image_height + slack, "{:?}", z);
        }
    }

    #[test]
    fn test_first_focus_activation_centers() {
        let f = frame(100.0, 60.0);
        let mut model = AnnotationModel::new();
        assert_eq!(model.toggle_focus(&f, Some(true)), Transition::Activated);
        assert_eq!(model.focus_point(), Point::new(50.0, 30.0));
    }

    #[test]
    fn test_focus_toggle_keeps_coordinates() {
        let f = frame(100.0, 60.0);
        let mut model = AnnotationModel::new();
        model.set_focus_point(&f, 12.0, 34.0);
        model.toggle_focus(&f, None);
        assert_eq!(model.toggle_focus(&f, None), Transition::Deactivated);
        assert_eq!(model.toggle_focus(&f, Some(true)), Transition::Activated);
        assert_eq!(model.focus_point(), Point::new(12.0, 34.0));
    }

    #[test]
    fn test_focus_toggle_twice_is_idempotent() {
        let f = frame(100.0, 60.0);
        let mut model = AnnotationModel::new();
        model.toggle_focus(&f, Some(true));
        let once = model.clone();
        assert_eq!(model.toggle_focus(&f, Some(true)), Transition::Unchanged);
        assert_eq!(model, once);
    }

    #[test]
    fn test_first_crop_activation_is_centered_half() {
        let f = frame(200.0, 100.0);
        let mut model = AnnotationModel::new();
        model.toggle_crop(&f, Some(true));
        assert_eq!(model.crop_zone(), Rect::new(50.0, 25.0, 100.0, 50.0));
        assert!(model.is_crop_active());
    }

    #[test]
    fn test_crop_seed_uses_zero_width_or_height() {
        // A zone at the origin with a real size is not "untouched".
        let f = frame(200.0, 100.0);
        let mut model = AnnotationModel::new();
        model.set_crop_zone(&f, 0.0, 0.0, 30.0, 30.0);
        model.toggle_crop(&f, Some(true));
        assert_eq!(model.crop_zone(), Rect::new(0.0, 0.0, 30.0, 30.0));
    }

    #[test]
    fn test_focus_seed_only_at_exact_origin() {
        let f = frame(200.0, 100.0);
        let mut model = AnnotationModel::new();
        model.set_focus_point(&f, 0.0, 5.0);
        model.toggle_focus(&f, Some(true));
        assert_eq!(model.focus_point(), Point::new(0.0, 5.0));
    }

    #[test]
    fn test_reclamp_after_image_shrinks() {
        let mut model = AnnotationModel::new();
        model.set_focus_point(&frame(500.0, 500.0), 400.0, 100.0);
        model.set_crop_zone(&frame(500.0, 500.0), 300.0, 300.0, 150.0, 150.0);

        let small = frame(200.0, 200.0);
        assert!(model.reclamp_focus(&small));
        assert_eq!(model.focus_point(), Point::new(200.0, 100.0));
        assert!(model.reclamp_crop(&small));
        assert_eq!(model.crop_zone(), Rect::new(50.0, 50.0, 150.0, 150.0));
        assert!(!model.reclamp_crop(&small));
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let f = frame(100.0, 100.0);
        let mut model = AnnotationModel::new();
        model.toggle_crop(&f, Some(true));
        let json = serde_json::to_value(model.snapshot()).unwrap();
        assert_eq!(json["cropActive"], true);
        assert_eq!(json["focusActive"], false);
        assert_eq!(json["cropZone"]["width"], 50.0);
        assert_eq!(json["focusPoint"]["x"], 0.0);
    }
}
