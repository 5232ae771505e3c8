// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom --heading-base-level=0

//! Understory Zoom: headless pan/zoom for a single element.
//!
//! This crate models an element displayed inside a container (the viewport or
//! the element's offset parent) under a pan + uniform zoom transform. It
//! focuses on:
//! - Transform state: offset in pixels plus a zoom percentage.
//! - Zooming toward an anchor point, within numeric or "fit" limits.
//! - Keeping bounds-constrained elements centered or clamped in their container.
//! - Turning raw pointer and wheel input into drags and pinch zooms.
//!
//! It does **not** talk to any platform. Hosts implement [`Surface`] (geometry
//! queries plus a style sink), route input events into [`ViewportController`],
//! and schedule [`ViewportController::release_interaction`] after pointer
//! releases. `understory_zoom_web` does this for DOM elements;
//! [`HeadlessSurface`] is an in-memory host for tests and non-browser use.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_zoom::{Config, HeadlessSurface, PointerId, PointerSample, ViewportController};
//!
//! // A 1000x750 element in an 800x600 viewport.
//! let surface = HeadlessSurface::new(Size::new(800.0, 600.0), Size::new(1000.0, 750.0));
//! let config = Config::default().with_bounds(true).with_draggable(true);
//! let mut view = ViewportController::new(surface, config);
//!
//! // Shrink to fit and center, as done once content has loaded.
//! view.fit_initial();
//! assert!((view.zoom() - 80.0).abs() < 1e-9);
//!
//! // Wheel up over the middle of the viewport zooms in around that point.
//! view.on_wheel(-1.0, Point::new(400.0, 300.0));
//! assert!(view.zoom() > 80.0);
//!
//! // Drag with one pointer.
//! let at = |x, y| PointerSample::new(PointerId(1), Point::new(x, y), Point::new(x, y));
//! view.on_pointer_down(at(400.0, 300.0));
//! view.on_pointer_move(at(380.0, 290.0));
//! assert!(view.is_interacting());
//! view.on_pointer_up(PointerId(1));
//! view.release_interaction();
//! assert!(!view.is_interacting());
//! ```
//!
//! ## Design notes
//!
//! - Zoom is uniform and applied around the element's top-left corner.
//! - Geometry is never cached: every operation asks the surface, which is
//!   expected to reflect the last applied transform.
//! - Policy rejections (limits, disabled dragging, unconstrained bounds) are
//!   silent no-ops rather than errors.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

pub mod bounds;
pub mod config;
mod controller;
mod geometry;
pub mod gesture;
mod headless;
mod transform;
pub mod zoom;

pub use config::{Attributes, Config, Origin, ParseZoomLimitError, ZoomLimit};
pub use controller::ViewportController;
pub use geometry::{Axes, Geometry, Surface};
pub use gesture::{GestureSession, PointerId, PointerSample};
pub use headless::HeadlessSurface;
pub use transform::Transform;
