//! Small CSS value helpers for the DOM surface.

/// Parse a computed CSS length such as `"12.5px"`. Anything else reads as 0.
pub fn parse_px(value: &str) -> f64 {
    value
        .trim()
        .trim_end_matches("px")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// `calc()` expression for minus half of `length`, used to center handles on
/// the crop border whatever unit the host styled them in.
pub fn negative_half(length: &str) -> String {
    format!("calc({} / -2)", length.trim())
}
