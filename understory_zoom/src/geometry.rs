// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capabilities: geometry queries and the style sink.

use kurbo::{Point, Rect, Size};

use crate::config::Origin;
use crate::transform::Transform;

bitflags::bitflags! {
    /// Axes an operation applies to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Axes: u8 {
        /// Horizontal axis.
        const X = 0b01;
        /// Vertical axis.
        const Y = 0b10;
        /// Both axes.
        const BOTH = Self::X.bits() | Self::Y.bits();
    }
}

/// Fresh geometry of the controlled element and its possible containers.
///
/// All rectangles are in viewport coordinates. Implementations must not cache:
/// layout may change between calls, and the element rect must reflect the most
/// recently applied [`Transform`].
pub trait Geometry {
    /// Size of the browser viewport (or window).
    fn viewport_size(&self) -> Size;

    /// Bounding rect of the element, including its current transform.
    fn element_rect(&self) -> Rect;

    /// Bounding rect of the element's offset parent, if it has one.
    fn offset_parent_rect(&self) -> Option<Rect>;

    /// Bounding rect of the container selected by `origin`.
    ///
    /// [`Origin::Parent`] falls back to the viewport when there is no offset parent.
    fn container_rect(&self, origin: Origin) -> Rect {
        let viewport = || Rect::from_origin_size(Point::ORIGIN, self.viewport_size());
        match origin {
            Origin::Window => viewport(),
            Origin::Parent => self.offset_parent_rect().unwrap_or_else(viewport),
        }
    }
}

/// A rendering surface that displays the controlled element.
pub trait Surface: Geometry {
    /// Host event-target type, compared to tell apart pointers on different targets.
    type Target: Clone + PartialEq;

    /// Writes the transform to the element's style.
    fn apply_transform(&mut self, transform: &Transform);

    /// Removes every style written by [`Surface::apply_transform`].
    fn clear_transform(&mut self);
}
