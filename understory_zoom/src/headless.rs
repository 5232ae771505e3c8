// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size};

use crate::geometry::{Geometry, Surface};
use crate::transform::Transform;

/// In-memory [`Surface`] for hosts without a layout engine, and for tests.
///
/// Models an element of a fixed natural size whose untransformed top-left
/// corner sits at `layout_origin` (the viewport origin, or the parent's origin
/// when a parent is set), scaled around that corner. The element rect follows
/// the most recently *applied* transform, as a browser layout would.
#[derive(Clone, Debug)]
pub struct HeadlessSurface {
    viewport: Size,
    parent: Option<Rect>,
    natural_size: Size,
    layout_origin: Point,
    applied: Transform,
    apply_count: usize,
    cleared: bool,
}

impl HeadlessSurface {
    /// Creates a surface for an element of `natural_size` laid out at the viewport origin.
    #[must_use]
    pub fn new(viewport: Size, natural_size: Size) -> Self {
        Self {
            viewport,
            parent: None,
            natural_size,
            layout_origin: Point::ORIGIN,
            applied: Transform::IDENTITY,
            apply_count: 0,
            cleared: false,
        }
    }

    /// Places the element inside an offset parent, laid out at the parent's origin.
    #[must_use]
    pub fn with_parent(mut self, parent: Rect) -> Self {
        self.parent = Some(parent);
        self.layout_origin = parent.origin();
        self
    }

    /// Overrides where the untransformed element is laid out.
    #[must_use]
    pub fn with_layout_origin(mut self, origin: Point) -> Self {
        self.layout_origin = origin;
        self
    }

    /// Resizes the viewport, as a window resize would.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// The last transform written by [`Surface::apply_transform`].
    #[must_use]
    pub fn applied(&self) -> Transform {
        self.applied
    }

    /// How many times a transform was applied.
    #[must_use]
    pub fn apply_count(&self) -> usize {
        self.apply_count
    }

    /// Whether [`Surface::clear_transform`] was called since the last apply.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.cleared
    }
}

impl Geometry for HeadlessSurface {
    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn element_rect(&self) -> Rect {
        let local = Rect::from_origin_size(Point::ORIGIN, self.natural_size);
        (Affine::translate(self.layout_origin.to_vec2()) * self.applied.to_affine())
            .transform_rect_bbox(local)
    }

    fn offset_parent_rect(&self) -> Option<Rect> {
        self.parent
    }
}

impl Surface for HeadlessSurface {
    type Target = u32;

    fn apply_transform(&mut self, transform: &Transform) {
        self.applied = *transform;
        self.apply_count += 1;
        self.cleared = false;
    }

    fn clear_transform(&mut self) {
        self.applied = Transform::IDENTITY;
        self.cleared = true;
    }
}
