// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

/// Zoom percentage of an untransformed element.
pub(crate) const DEFAULT_ZOOM_PERCENT: f64 = 100.0;

/// Pan + uniform zoom applied to the controlled element.
///
/// `x`/`y` are the element's offset in pixels and `zoom_percent` its scale as a
/// percentage of its natural size. The scale is applied around the element's
/// top-left corner, so the world → view mapping is
/// `translate(x, y) * scale(zoom_percent / 100)`.
///
/// `zoom_percent` is expected to stay strictly positive; the zoom engine never
/// produces a non-positive value, but the raw setters do not validate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Horizontal offset in pixels.
    pub x: f64,
    /// Vertical offset in pixels.
    pub y: f64,
    /// Uniform scale as a percentage (`100.0` is the natural size).
    pub zoom_percent: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No offset, natural size.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        zoom_percent: DEFAULT_ZOOM_PERCENT,
    };

    /// Creates a transform from an offset and a zoom percentage.
    #[must_use]
    pub const fn new(x: f64, y: f64, zoom_percent: f64) -> Self {
        Self { x, y, zoom_percent }
    }

    /// Restores the identity transform.
    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Returns the offset as a point.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Sets the offset.
    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    /// Returns the offset as a vector.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Returns the scale factor (`zoom_percent / 100`).
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.zoom_percent / DEFAULT_ZOOM_PERCENT
    }

    /// Returns the affine mapping element-local coordinates into its container.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.offset()) * Affine::scale(self.scale())
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::Transform;

    #[test]
    fn reset_restores_identity() {
        let mut t = Transform::new(12.0, -4.0, 250.0);
        t.reset();
        assert_eq!(t, Transform::IDENTITY);
        assert_eq!(t.position(), Point::ZERO);
        assert_eq!(t.zoom_percent, 100.0);
    }

    #[test]
    fn affine_scales_around_top_left() {
        let t = Transform::new(10.0, 20.0, 200.0);
        let a = t.to_affine();
        assert_eq!(a * Point::ZERO, Point::new(10.0, 20.0));
        assert_eq!(a * Point::new(5.0, 5.0), Point::new(20.0, 30.0));
    }

    #[test]
    fn set_position_only_touches_offset() {
        let mut t = Transform::new(0.0, 0.0, 80.0);
        t.set_position(Point::new(3.0, 4.0));
        assert_eq!(t, Transform::new(3.0, 4.0, 80.0));
    }
}
