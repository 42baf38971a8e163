//! Resolving the host's image option to an element a tool can bind to.

use crate::error::ToolError;

/// The host's image option, sorted by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageRef<E> {
    /// Absent, `null` or `undefined`.
    Missing,
    /// A CSS selector to look up in the document.
    Selector(String),
    Element(E),
    /// Anything else (numbers, plain objects, text nodes).
    Other,
}

/// An element a tool could be bound to.
pub trait ImageCandidate {
    /// Tag name as the document reports it (`IMG` in HTML documents).
    fn tag_name(&self) -> String;

    /// Whether the element has a parent element to host the overlays.
    fn has_parent(&self) -> bool;
}

/// Turn `reference` into a bindable `<img>`.
///
/// Selectors go through `query`. An empty selector counts as missing.
pub fn resolve_image<E, Q>(reference: ImageRef<E>, query: Q) -> Result<E, ToolError>
where
    E: ImageCandidate,
    Q: FnOnce(&str) -> Option<E>,
{
    let element = match reference {
        ImageRef::Missing => return Err(ToolError::MissingImage),
        ImageRef::Selector(selector) if selector.is_empty() => return Err(ToolError::MissingImage),
        ImageRef::Selector(selector) => match query(&selector) {
            Some(element) => element,
            None => return Err(ToolError::SelectorUnresolved { selector }),
        },
        ImageRef::Element(element) => element,
        ImageRef::Other => return Err(ToolError::not_an_image("a non-element value")),
    };

    let tag = element.tag_name();
    if !tag.eq_ignore_ascii_case("img") {
        return Err(ToolError::not_an_image(tag));
    }
    if !element.has_parent() {
        return Err(ToolError::Detached);
    }
    Ok(element)
}
