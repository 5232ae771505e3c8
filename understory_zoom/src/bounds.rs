// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds engine: centering, fitting, and clamping against the container.
//!
//! Every function reads geometry fresh from the host, so callers must apply the
//! transform before asking questions about the element's current size.

use crate::config::Config;
use crate::geometry::{Axes, Geometry};
use crate::transform::Transform;

/// Returns `true` if the element is no larger than its container on every requested axis.
#[must_use]
pub fn fits_in_container(geometry: &impl Geometry, config: &Config, axes: Axes) -> bool {
    let rect = geometry.element_rect();
    let container = geometry.container_rect(config.origin);
    let fits_x = !axes.contains(Axes::X) || rect.width() <= container.width();
    let fits_y = !axes.contains(Axes::Y) || rect.height() <= container.height();
    fits_x && fits_y
}

/// Centers the element in its container on the requested axes.
pub fn center(transform: &mut Transform, geometry: &impl Geometry, config: &Config, axes: Axes) {
    let rect = geometry.element_rect();
    let container = geometry.container_rect(config.origin);
    if axes.contains(Axes::X) {
        transform.x = (container.width() - rect.width()) / 2.0;
    }
    if axes.contains(Axes::Y) {
        transform.y = (container.height() - rect.height()) / 2.0;
    }
}

/// Keeps a bounds-constrained element within its container.
///
/// An axis on which the element is smaller than the container is centered. On
/// an overflowing axis, a gap at the leading edge resets the offset to zero and
/// a gap at the trailing edge pulls the element until it touches that edge.
pub fn fit_to_bounds(transform: &mut Transform, geometry: &impl Geometry, config: &Config) {
    if !config.bounds {
        return;
    }

    let rect = geometry.element_rect();
    let container = geometry.container_rect(config.origin);

    let overflows_x = rect.width() >= container.width();
    let overflows_y = rect.height() >= container.height();

    if !overflows_x {
        center(transform, geometry, config, Axes::X);
    }
    if !overflows_y {
        center(transform, geometry, config, Axes::Y);
    }

    if overflows_x {
        transform.x = clamp_axis(
            transform.x,
            rect.x0 - container.x0,
            container.x1 - rect.x1,
        );
    }
    if overflows_y {
        transform.y = clamp_axis(
            transform.y,
            rect.y0 - container.y0,
            container.y1 - rect.y1,
        );
    }
}

fn clamp_axis(offset: f64, leading: f64, trailing_gap: f64) -> f64 {
    let mut offset = offset;
    if leading > 0.0 {
        offset = 0.0;
    }
    if trailing_gap > 0.0 {
        offset += trailing_gap;
    }
    offset
}

/// Shrinks the zoom so the element fits its container on both axes.
///
/// Never zooms in. No-op for elements that are not bounds-constrained or when
/// either rect is degenerate.
pub fn zoom_to_fit(transform: &mut Transform, geometry: &impl Geometry, config: &Config) {
    if !config.bounds {
        return;
    }

    let rect = geometry.element_rect();
    let container = geometry.container_rect(config.origin);
    if container.width() <= 0.0 || container.height() <= 0.0 {
        return;
    }

    let width_ratio = rect.width() / container.width();
    let height_ratio = rect.height() / container.height();
    let ratio = width_ratio.max(height_ratio);
    if ratio <= 0.0 || !ratio.is_finite() {
        return;
    }

    transform.zoom_percent = transform.zoom_percent.min(transform.zoom_percent / ratio);
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::*;
    use crate::config::Origin;
    use crate::geometry::Surface;
    use crate::headless::HeadlessSurface;

    fn bounded() -> Config {
        Config::default().with_bounds(true)
    }

    fn surface(viewport: (f64, f64), element: (f64, f64), t: &Transform) -> HeadlessSurface {
        let mut s = HeadlessSurface::new(
            Size::new(viewport.0, viewport.1),
            Size::new(element.0, element.1),
        );
        s.apply_transform(t);
        s
    }

    #[test]
    fn small_element_is_centered_on_both_axes() {
        let mut t = Transform::default();
        let s = surface((800.0, 600.0), (200.0, 100.0), &t);
        fit_to_bounds(&mut t, &s, &bounded());
        assert_eq!(t.position(), Point::new(300.0, 250.0));
    }

    #[test]
    fn unconstrained_element_is_left_alone() {
        let mut t = Transform::new(-40.0, 7.0, 100.0);
        let s = surface((800.0, 600.0), (200.0, 100.0), &t);
        fit_to_bounds(&mut t, &s, &Config::default());
        zoom_to_fit(&mut t, &s, &Config::default());
        assert_eq!(t, Transform::new(-40.0, 7.0, 100.0));
    }

    #[test]
    fn overflowing_axis_snaps_leading_gap() {
        // Wide element pushed right: leading gap on X, centered on Y.
        let mut t = Transform::new(50.0, 0.0, 100.0);
        let s = surface((800.0, 600.0), (1000.0, 100.0), &t);
        fit_to_bounds(&mut t, &s, &bounded());
        assert_eq!(t.x, 0.0);
        assert_eq!(t.y, 250.0);
    }

    #[test]
    fn overflowing_axis_closes_trailing_gap() {
        // Right edge at 900 - 300 = 700 leaves a 100px gap in an 800px viewport.
        let mut t = Transform::new(-300.0, 0.0, 100.0);
        let s = surface((800.0, 600.0), (1000.0, 100.0), &t);
        fit_to_bounds(&mut t, &s, &bounded());
        assert_eq!(t.x, -200.0);
    }

    #[test]
    fn overflowing_axis_already_covering_is_unchanged() {
        let mut t = Transform::new(-100.0, -50.0, 100.0);
        let s = surface((800.0, 600.0), (1000.0, 750.0), &t);
        fit_to_bounds(&mut t, &s, &bounded());
        assert_eq!(t.position(), Point::new(-100.0, -50.0));
    }

    #[test]
    fn parent_origin_measures_against_offset_parent() {
        let parent = Rect::new(100.0, 50.0, 500.0, 350.0);
        let mut t = Transform::default();
        let mut s = HeadlessSurface::new(Size::new(1200.0, 900.0), Size::new(200.0, 100.0))
            .with_parent(parent);
        s.apply_transform(&t);
        let config = bounded().with_origin(Origin::Parent);

        assert!(fits_in_container(&s, &config, Axes::BOTH));
        fit_to_bounds(&mut t, &s, &config);
        assert_eq!(t.position(), Point::new(100.0, 100.0));
    }

    fn parent_surface(layout_origin: Point, t: &Transform) -> HeadlessSurface {
        let mut s = HeadlessSurface::new(Size::new(1200.0, 900.0), Size::new(600.0, 400.0))
            .with_parent(Rect::new(100.0, 50.0, 500.0, 350.0))
            .with_layout_origin(layout_origin);
        s.apply_transform(t);
        s
    }

    #[test]
    fn parent_overflow_snaps_leading_gap() {
        let mut t = Transform::new(50.0, 30.0, 100.0);
        let s = parent_surface(Point::new(100.0, 50.0), &t);
        fit_to_bounds(&mut t, &s, &bounded().with_origin(Origin::Parent));
        assert_eq!(t.position(), Point::ZERO);
    }

    #[test]
    fn parent_overflow_closes_trailing_gap_at_parent_edge() {
        // Laid out 20px inside the parent; the far edges sit at (420, 270).
        let mut t = Transform::new(-300.0, -200.0, 100.0);
        let mut s = parent_surface(Point::new(120.0, 70.0), &t);
        fit_to_bounds(&mut t, &s, &bounded().with_origin(Origin::Parent));
        assert_eq!(t.position(), Point::new(-220.0, -120.0));

        s.apply_transform(&t);
        let rect = s.element_rect();
        assert_eq!((rect.x1, rect.y1), (500.0, 350.0));
    }

    #[test]
    fn center_only_touches_requested_axes() {
        let mut t = Transform::new(-1.0, -2.0, 100.0);
        let s = surface((800.0, 600.0), (200.0, 100.0), &t);
        center(&mut t, &s, &Config::default(), Axes::Y);
        assert_eq!(t.position(), Point::new(-1.0, 250.0));
        center(&mut t, &s, &Config::default(), Axes::BOTH);
        assert_eq!(t.position(), Point::new(300.0, 250.0));
    }

    #[test]
    fn zoom_to_fit_shrinks_to_largest_ratio() {
        let mut t = Transform::default();
        let s = surface((800.0, 600.0), (1000.0, 750.0), &t);
        zoom_to_fit(&mut t, &s, &bounded());
        assert!((t.zoom_percent - 80.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_to_fit_never_zooms_in() {
        let mut t = Transform::default();
        let s = surface((800.0, 600.0), (400.0, 300.0), &t);
        zoom_to_fit(&mut t, &s, &bounded());
        assert_eq!(t.zoom_percent, 100.0);
    }

    #[test]
    fn fits_checks_each_axis() {
        let t = Transform::default();
        let s = surface((800.0, 600.0), (900.0, 100.0), &t);
        let config = Config::default();
        assert!(!fits_in_container(&s, &config, Axes::X));
        assert!(fits_in_container(&s, &config, Axes::Y));
        assert!(!fits_in_container(&s, &config, Axes::BOTH));
    }
}
