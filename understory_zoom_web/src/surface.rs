// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Size};
use understory_zoom::{Attributes, Geometry, Surface, Transform};
use web_sys::{DomRect, EventTarget, HtmlElement, Window};

const STYLE_PROPERTIES: [&str; 5] = [
    "transform",
    "transform-origin",
    "left",
    "top",
    "touch-action",
];

fn rect_from_dom(rect: &DomRect) -> Rect {
    Rect::from_origin_size((rect.x(), rect.y()), (rect.width(), rect.height()))
}

/// [`Surface`] backed by a live `HTMLElement`.
///
/// The transform is written as `left`/`top` in pixels plus a `scale()` around
/// the element's top-left corner. [`DomSurface::prepare`] makes a statically
/// positioned element `relative` so the offsets take effect.
#[derive(Clone, Debug)]
pub struct DomSurface {
    window: Window,
    element: HtmlElement,
    positioned: bool,
}

impl DomSurface {
    /// Wraps `element`, measuring the viewport of `window`.
    #[must_use]
    pub fn new(window: Window, element: HtmlElement) -> Self {
        Self {
            window,
            element,
            positioned: false,
        }
    }

    /// Readies the element for pointer-driven transforms.
    ///
    /// Stops the browser from claiming touch gestures for scrolling, and sets
    /// `position: relative` when the computed position is `static`. An element
    /// already positioned by the page keeps its own value.
    pub fn prepare(&mut self) {
        self.set_style("touch-action", "none");
        if self.computed_position().as_deref() == Some("static") {
            self.set_style("position", "relative");
            self.positioned = true;
        }
    }

    fn computed_position(&self) -> Option<String> {
        let style = self.window.get_computed_style(&self.element).ok()??;
        style.get_property_value("position").ok()
    }

    fn set_style(&self, name: &str, value: &str) {
        if let Err(err) = self.element.style().set_property(name, value) {
            tracing::warn!(?err, name, value, "failed to set style property");
        }
    }
}

impl Geometry for DomSurface {
    fn viewport_size(&self) -> Size {
        let width = self.window.inner_width().ok().and_then(|v| v.as_f64());
        let height = self.window.inner_height().ok().and_then(|v| v.as_f64());
        Size::new(width.unwrap_or(0.0), height.unwrap_or(0.0))
    }

    fn element_rect(&self) -> Rect {
        rect_from_dom(&self.element.get_bounding_client_rect())
    }

    fn offset_parent_rect(&self) -> Option<Rect> {
        self.element
            .offset_parent()
            .map(|parent| rect_from_dom(&parent.get_bounding_client_rect()))
    }
}

impl Surface for DomSurface {
    type Target = EventTarget;

    fn apply_transform(&mut self, transform: &Transform) {
        self.set_style("transform-origin", "0 0");
        self.set_style("transform", &format!("scale({})", transform.scale()));
        self.set_style("left", &format!("{}px", transform.x));
        self.set_style("top", &format!("{}px", transform.y));
    }

    fn clear_transform(&mut self) {
        let style = self.element.style();
        let positioned = self.positioned.then_some("position");
        for name in STYLE_PROPERTIES.into_iter().chain(positioned) {
            if let Err(err) = style.remove_property(name) {
                tracing::warn!(?err, name, "failed to remove style property");
            }
        }
        self.positioned = false;
    }
}

impl Attributes for DomSurface {
    fn has_attribute(&self, name: &str) -> bool {
        self.element.has_attribute(name)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }
}
