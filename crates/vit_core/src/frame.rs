//! Natural/display coordinate mapping.
//!
//! The bound image has an intrinsic (natural) size and a rendered size that
//! depends on CSS. Annotations are stored in natural pixels; the overlay is
//! positioned in display pixels. [`ImageFrame`] holds the ratio between the two.

use crate::geometry::{Point, Rect, Size};

/// Natural and rendered dimensions of the bound image plus the derived scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageFrame {
    natural: Size,
    display: Size,
    scale_x: f64,
    scale_y: f64,
}

impl ImageFrame {
    /// Build a frame from raw image measurements.
    ///
    /// Natural dimensions that are zero, negative or non-finite (image not
    /// loaded yet) are floored to 1. If the rendered size is not usable
    /// either, the image is treated as shown at its natural size so the
    /// scale stays positive and finite.
    pub fn new(natural: Size, display: Size) -> Self {
        let natural = Size::new(floor_dimension(natural.width), floor_dimension(natural.height));
        let display = if display.is_positive() { display } else { natural };

        Self {
            natural,
            display,
            scale_x: display.width / natural.width,
            scale_y: display.height / natural.height,
        }
    }

    /// Natural size (already floored).
    pub fn natural(&self) -> Size {
        self.natural
    }

    /// Rendered size used for the scale.
    pub fn display(&self) -> Size {
        self.display
    }

    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    /// Display pixels -> natural pixels.
    pub fn to_original(&self, display: Point) -> Point {
        Point::new(display.x / self.scale_x, display.y / self.scale_y)
    }

    /// Natural pixels -> display pixels.
    pub fn to_display(&self, original: Point) -> Point {
        Point::new(original.x * self.scale_x, original.y * self.scale_y)
    }

    pub fn size_to_original(&self, display: Size) -> Size {
        Size::new(display.width / self.scale_x, display.height / self.scale_y)
    }

    pub fn size_to_display(&self, original: Size) -> Size {
        Size::new(original.width * self.scale_x, original.height * self.scale_y)
    }

    pub fn rect_to_original(&self, display: Rect) -> Rect {
        Rect::from_origin_size(
            self.to_original(display.origin()),
            self.size_to_original(display.size()),
        )
    }

    pub fn rect_to_display(&self, original: Rect) -> Rect {
        Rect::from_origin_size(
            self.to_display(original.origin()),
            self.size_to_display(original.size()),
        )
    }
}

impl Default for ImageFrame {
    /// Frame of an image that has not loaded: 1x1 shown at 1x1.
    fn default() -> Self {
        Self::new(Size::new(1.0, 1.0), Size::new(1.0, 1.0))
    }
}

fn floor_dimension(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_scale_from_rendered_size() {
        let frame = ImageFrame::new(Size::new(100.0, 50.0), Size::new(200.0, 25.0));
        assert_eq!(frame.scale(), (2.0, 0.5));
        assert_eq!(frame.to_display(Point::new(10.0, 10.0)), Point::new(20.0, 5.0));
        assert_eq!(frame.to_original(Point::new(20.0, 5.0)), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_unloaded_image_floors_natural_size() {
        let frame = ImageFrame::new(Size::new(0.0, f64::NAN), Size::new(300.0, 200.0));
        assert_eq!(frame.natural(), Size::new(1.0, 1.0));
        assert_eq!(frame.scale(), (300.0, 200.0));
    }

    #[test]
    fn test_unrendered_image_keeps_unit_scale() {
        let frame = ImageFrame::new(Size::new(640.0, 480.0), Size::new(0.0, 0.0));
        assert_eq!(frame.display(), Size::new(640.0, 480.0));
        assert_eq!(frame.scale(), (1.0, 1.0));
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let scales = [(0.37, 3.1), (1.0, 1.0), (2.0, 2.0), (7.25, 0.013)];
        for (sx, sy) in scales {
            let frame = ImageFrame::new(Size::new(1000.0, 1000.0), Size::new(1000.0 * sx, 1000.0 * sy));
            for p in [Point::new(0.0, 0.0), Point::new(123.456, 789.012), Point::new(999.9, 0.1)] {
                let back = frame.to_original(frame.to_display(p));
                assert!(approx_eq(back.x, p.x), "x {} vs {}", back.x, p.x);
                assert!(approx_eq(back.y, p.y), "y {} vs {}", back.y, p.y);
            }
        }
    }

    proptest! {
        #[test]
        fn display_round_trip_is_lossless(
            natural_width in 1.0f64..10_000.0,
            natural_height in 1.0f64..10_000.0,
            display_width in 1.0f64..10_000.0,
            display_height in 1.0f64..10_000.0,
            fx in 0.0f64..=1.0,
            fy in 0.0f64..=1.0,
        ) {
            let frame = ImageFrame::new(
                Size::new(natural_width, natural_height),
                Size::new(display_width, display_height),
            );
            let p = Point::new(fx * natural_width, fy * natural_height);
            let back = frame.to_original(frame.to_display(p));
            prop_assert!((back.x - p.x).abs() <= EPSILON * p.x.max(1.0), "x {} vs {}", back.x, p.x);
            prop_assert!((back.y - p.y).abs() <= EPSILON * p.y.max(1.0), "y {} vs {}", back.y, p.y);
        }
    }

    #[test]
    fn test_rect_mapping() {
        let frame = ImageFrame::new(Size::new(100.0, 100.0), Size::new(200.0, 200.0));
        let display = frame.rect_to_display(Rect::new(20.0, 20.0, 80.0, 80.0));
        assert_eq!(display, Rect::new(40.0, 40.0, 160.0, 160.0));
        assert_eq!(frame.rect_to_original(display), Rect::new(20.0, 20.0, 80.0, 80.0));
    }
}
