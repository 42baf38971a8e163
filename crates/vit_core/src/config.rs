//! Tool configuration.
//!
//! Mirrors the options object a host passes in. Every field has a default, and
//! style blocks merge field-by-field so a host can override just one property.

use serde::{Deserialize, Serialize};

/// Complete tool configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolConfig {
    pub focus_point: FocusPointOptions,
    pub crop_zone: CropZoneOptions,
    /// Log computed geometry while rendering
    pub debug: bool,
}

/// Focus point section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FocusPointOptions {
    pub enabled: bool,
    pub style: MarkerStyle,
}

impl Default for FocusPointOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            style: MarkerStyle::default(),
        }
    }
}

/// Crop zone section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CropZoneOptions {
    pub enabled: bool,
    pub style: CropStyle,
    pub handle_style: HandleStyle,
}

impl Default for CropZoneOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            style: CropStyle::default(),
            handle_style: HandleStyle::default(),
        }
    }
}

/// CSS for the focus marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkerStyle {
    pub width: String,
    pub height: String,
    pub border: String,
    pub box_shadow: String,
    pub background_color: String,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            width: "30px".to_string(),
            height: "30px".to_string(),
            border: "3px solid white".to_string(),
            box_shadow: "0 0 0 2px black, 0 0 5px rgba(0,0,0,0.5)".to_string(),
            background_color: "rgba(255, 0, 0, 0.5)".to_string(),
        }
    }
}

/// CSS for the crop rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CropStyle {
    pub border: String,
    pub background_color: String,
}

impl Default for CropStyle {
    fn default() -> Self {
        Self {
            border: "1px dashed #fff".to_string(),
            background_color: "rgba(0, 0, 0, 0.4)".to_string(),
        }
    }
}

/// CSS for each resize handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HandleStyle {
    pub width: String,
    pub height: String,
    pub background_color: String,
    pub border: String,
    pub box_shadow: String,
}

impl Default for HandleStyle {
    fn default() -> Self {
        Self {
            width: "14px".to_string(),
            height: "14px".to_string(),
            background_color: "white".to_string(),
            border: "2px solid black".to_string(),
            box_shadow: "0 0 3px rgba(0,0,0,0.5)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config: ToolConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ToolConfig::default());
        assert!(config.focus_point.enabled);
        assert!(config.crop_zone.enabled);
        assert!(!config.debug);
    }

    #[test]
    fn test_partial_style_merges_with_defaults() {
        let json = r#"{
            "focusPoint": { "style": { "backgroundColor": "blue" } },
            "cropZone": { "enabled": false, "handleStyle": { "width": "20px" } },
            "debug": true
        }"#;
        let config: ToolConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.focus_point.style.background_color, "blue");
        assert_eq!(config.focus_point.style.width, "30px");
        assert!(config.focus_point.enabled);
        assert!(!config.crop_zone.enabled);
        assert_eq!(config.crop_zone.handle_style.width, "20px");
        assert_eq!(config.crop_zone.handle_style.height, "14px");
        assert!(config.debug);
    }

    #[test]
    fn test_unknown_host_fields_are_ignored() {
        // Hosts pass the element and callback in the same object.
        let json = r##"{ "imageElement": "#photo", "onChange": null, "debug": false }"##;
        let config: ToolConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, ToolConfig::default());
    }
}
