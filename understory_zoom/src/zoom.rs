// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom engine: anchor-preserving zoom with numeric or fit limits.

use kurbo::Point;

use crate::bounds::fits_in_container;
use crate::config::{Config, ZoomLimit};
use crate::geometry::{Axes, Geometry};
use crate::transform::Transform;

/// Amplitude of a single wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.1;

/// Maps a wheel `delta_y` to a zoom amplitude.
///
/// Scrolling up zooms in by [`WHEEL_ZOOM_STEP`], scrolling down zooms out by its
/// inverse. A zero delta yields `0.0`, which [`zoom_at`] rejects.
#[must_use]
pub fn wheel_amplitude(delta_y: f64) -> f64 {
    if delta_y < 0.0 {
        WHEEL_ZOOM_STEP
    } else if delta_y > 0.0 {
        1.0 / WHEEL_ZOOM_STEP
    } else {
        0.0
    }
}

/// Scales the element by `amplitude` while keeping `anchor` (in viewport
/// coordinates) visually fixed.
///
/// Returns `false` without touching `transform` when the request is rejected:
/// - `amplitude` is not a finite, positive number;
/// - zooming out with a `fit` minimum while the element already fits;
/// - zooming in with a `fit` maximum while the element already fits;
/// - the new zoom would reach a numeric minimum or maximum.
pub fn zoom_at(
    transform: &mut Transform,
    geometry: &impl Geometry,
    config: &Config,
    amplitude: f64,
    anchor: Point,
) -> bool {
    if !amplitude.is_finite() || amplitude <= 0.0 {
        return false;
    }

    let zooming_out = amplitude < 1.0;
    let zooming_in = amplitude > 1.0;
    let target = transform.zoom_percent * amplitude;

    match (zooming_out, config.min_zoom) {
        (true, ZoomLimit::Fit) if fits_in_container(geometry, config, Axes::BOTH) => return false,
        (true, ZoomLimit::Percent(min)) if target <= min => return false,
        _ => {}
    }
    match (zooming_in, config.max_zoom) {
        (true, ZoomLimit::Fit) if fits_in_container(geometry, config, Axes::BOTH) => return false,
        (true, ZoomLimit::Percent(max)) if target >= max => return false,
        _ => {}
    }

    let rect = geometry.element_rect();
    transform.x = (anchor.x - (rect.x0 - transform.x)) - (anchor.x - rect.x0) * amplitude;
    transform.y = (anchor.y - (rect.y0 - transform.y)) - (anchor.y - rect.y0) * amplitude;
    transform.zoom_percent = target;
    true
}
