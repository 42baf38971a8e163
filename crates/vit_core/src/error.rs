//! Error types for the image tool.

use thiserror::Error;

/// Errors returned by tool construction and by operations on a destroyed tool.
///
/// Out-of-range coordinates are not errors; they are clamped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    /// No image element or selector was supplied
    #[error("Image element is required")]
    MissingImage,

    /// Selector did not match any element
    #[error("No element matches selector '{selector}'")]
    SelectorUnresolved {
        /// The selector that was looked up
        selector: String,
    },

    /// Bound element is not an `<img>`
    #[error("Invalid image element: expected IMG, found {tag}")]
    NotAnImage {
        /// Tag name (or a description) of what was supplied
        tag: String,
    },

    /// Image element is not attached to a container
    #[error("Image element has no parent container")]
    Detached,

    /// Options could not be decoded
    #[error("Invalid options: {message}")]
    InvalidOptions {
        /// Description of the decoding failure
        message: String,
    },

    /// Operation on a tool after `destroy()`
    #[error("Image tool has been destroyed")]
    Disposed,
}

impl ToolError {
    /// Create a not-an-image error.
    pub fn not_an_image(tag: impl Into<String>) -> Self {
        Self::NotAnImage { tag: tag.into() }
    }

    /// Create an invalid options error.
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }

    /// True for errors raised while constructing a tool.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, ToolError::Disposed)
    }

    /// Name of the error class exposed to JavaScript hosts.
    pub fn kind(&self) -> &'static str {
        if self.is_configuration() {
            "ConfigurationError"
        } else {
            "DisposedError"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(ToolError::MissingImage.is_configuration());
        assert!(ToolError::not_an_image("DIV").is_configuration());
        assert!(!ToolError::Disposed.is_configuration());
        assert_eq!(ToolError::Detached.kind(), "ConfigurationError");
        assert_eq!(ToolError::Disposed.kind(), "DisposedError");
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ToolError::not_an_image("DIV").to_string(),
            "Invalid image element: expected IMG, found DIV"
        );
        assert_eq!(
            ToolError::SelectorUnresolved {
                selector: "#photo".into()
            }
            .to_string(),
            "No element matches selector '#photo'"
        );
    }
}
