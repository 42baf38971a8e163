//! vit - Visual image tool
//!
//! Lets a user place a focus point and a crop rectangle on a displayed image
//! and reports both in the image's natural pixel space, whatever size the
//! image is rendered at. The platform-independent core is [`vit_core`]; this
//! crate adds the browser binding on `wasm32`.

#[cfg(any(target_arch = "wasm32", test))]
mod css;

pub use vit_core::*;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod listeners;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
