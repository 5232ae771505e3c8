// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom_web --heading-base-level=0

//! DOM bindings for `understory_zoom`.
//!
//! This crate attaches a `ViewportController` to an HTML element when
//! targeting `wasm32`: wheel zoom, single-pointer drag, and two-pointer pinch
//! zoom, with behavior declared in data attributes.
//!
//! # Usage
//!
//! ```html
//! <div class="zoomable" data-bounds data-draggable data-min-zoom="fit" data-max-zoom="800">
//!   <img src="map.png">
//! </div>
//! ```
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn attach() -> Result<understory_zoom_web::ZoomableElement, understory_zoom_web::Error> {
//!     understory_zoom_web::ZoomableElement::new(".zoomable")
//! }
//! ```
//!
//! Notes:
//! - `pointerup` is observed on the window, so a gesture ends even when the
//!   pointer is released outside the element.
//! - The interacting flag clears 25 ms after the last release; read it from a
//!   click handler to ignore the click that ends a drag.
//! - Geometry comes from `getBoundingClientRect`. A statically positioned
//!   element is switched to `position: relative` so its `left`/`top` apply;
//!   `destroy` removes that again.
//! - Log output goes through `tracing`; install a subscriber to see it.

mod error;

#[cfg(target_arch = "wasm32")]
mod element;
#[cfg(target_arch = "wasm32")]
mod surface;

pub use error::Error;

#[cfg(target_arch = "wasm32")]
pub use element::{DEFAULT_SELECTOR, ELEMENT_CLASS, ZoomableElement};
#[cfg(target_arch = "wasm32")]
pub use surface::DomSurface;
