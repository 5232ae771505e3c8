// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::Point;

use crate::bounds;
use crate::config::Config;
use crate::geometry::{Axes, Surface};
use crate::gesture::{DragAnchor, GestureSession, GestureStep, PointerId, PointerSample};
use crate::transform::Transform;
use crate::zoom;

/// Pan/zoom controller for a single element.
///
/// `ViewportController` owns the element's [`Transform`], its [`Config`], and
/// the pointer bookkeeping, and drives a host [`Surface`] for geometry and
/// style output. Geometry is always read back from the surface, so operations
/// that depend on the element's current size expect the transform to have been
/// [applied](Self::apply) first; the event handlers take care of that.
///
/// Operations on a configuration that disallows them (dragging when not
/// draggable, bounds fitting when not bounds-constrained, zooming past a limit)
/// are silent no-ops.
pub struct ViewportController<S: Surface> {
    surface: S,
    config: Config,
    transform: Transform,
    session: GestureSession<S::Target>,
    interacting: bool,
}

impl<S: Surface> ViewportController<S> {
    /// Creates a controller with an identity transform.
    ///
    /// Nothing is written to the surface until [`Self::apply`] is called.
    #[must_use]
    pub fn new(surface: S, config: Config) -> Self {
        Self {
            surface,
            config,
            transform: Transform::IDENTITY,
            session: GestureSession::default(),
            interacting: false,
        }
    }

    /// Returns the surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns the surface mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replaces the configuration, for example after attributes changed.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    /// Returns the pointer bookkeeping.
    #[must_use]
    pub fn session(&self) -> &GestureSession<S::Target> {
        &self.session
    }

    /// Returns the current transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Restores the identity transform.
    pub fn reset(&mut self) {
        self.transform.reset();
    }

    /// Current zoom, in percent.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.transform.zoom_percent
    }

    /// Sets the zoom, in percent, without checking limits.
    pub fn set_zoom(&mut self, zoom_percent: f64) {
        self.transform.zoom_percent = zoom_percent;
    }

    /// Current offset.
    #[must_use]
    pub fn position(&self) -> Point {
        self.transform.position()
    }

    /// Sets the offset without clamping.
    pub fn set_position(&mut self, position: Point) {
        self.transform.set_position(position);
    }

    /// Whether a drag or pinch is in progress or ended moments ago.
    #[must_use]
    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    /// Clears the interacting flag.
    ///
    /// Hosts call this [`INTERACTION_RELEASE_DELAY_MS`] after each
    /// [`Self::on_pointer_up`]. The callback is not cancelled by later presses.
    ///
    /// [`INTERACTION_RELEASE_DELAY_MS`]: crate::gesture::INTERACTION_RELEASE_DELAY_MS
    pub fn release_interaction(&mut self) {
        self.interacting = false;
    }

    /// Centers the element in its container on the given axes.
    pub fn center(&mut self, axes: Axes) {
        bounds::center(&mut self.transform, &self.surface, &self.config, axes);
    }

    /// Keeps a bounds-constrained element within its container.
    pub fn fit_to_bounds(&mut self) {
        bounds::fit_to_bounds(&mut self.transform, &self.surface, &self.config);
    }

    /// Shrinks a bounds-constrained element until it fits its container.
    pub fn zoom_to_fit(&mut self) {
        bounds::zoom_to_fit(&mut self.transform, &self.surface, &self.config);
    }

    /// Whether the element fits its container on the given axes.
    #[must_use]
    pub fn fits_in_container(&self, axes: Axes) -> bool {
        bounds::fits_in_container(&self.surface, &self.config, axes)
    }

    /// Zooms by `amplitude` around `anchor`; see [`zoom::zoom_at`].
    ///
    /// Returns `false` if the zoom was rejected.
    pub fn zoom_at(&mut self, amplitude: f64, anchor: Point) -> bool {
        zoom::zoom_at(
            &mut self.transform,
            &self.surface,
            &self.config,
            amplitude,
            anchor,
        )
    }

    /// Writes the current transform to the surface.
    pub fn apply(&mut self) {
        self.surface.apply_transform(&self.transform);
    }

    /// Initial layout once the element's content is loaded: shrink to fit,
    /// center, then clamp into bounds.
    pub fn fit_initial(&mut self) {
        self.zoom_to_fit();
        self.apply();
        self.center(Axes::BOTH);
        self.apply();
        self.fit_to_bounds();
        self.apply();
    }

    /// Handles a wheel event at `client` with vertical delta `delta_y`.
    pub fn on_wheel(&mut self, delta_y: f64, client: Point) {
        self.zoom_at(zoom::wheel_amplitude(delta_y), client);
        self.apply();
        self.fit_to_bounds();
        self.apply();
    }

    /// Handles a pointer press on the element.
    pub fn on_pointer_down(&mut self, sample: PointerSample<S::Target>) {
        let position = self.transform.position();
        self.session.pointer_down(sample, position);
    }

    /// Handles a pointer move over the element.
    pub fn on_pointer_move(&mut self, sample: PointerSample<S::Target>) {
        match self.session.pointer_move(sample) {
            Some(GestureStep::Drag { anchor, screen }) => self.drag_to(anchor, screen),
            Some(GestureStep::Pinch { amplitude, anchor }) => {
                self.interacting = true;
                self.zoom_at(amplitude, anchor);
                self.apply();
                self.fit_to_bounds();
                self.apply();
            }
            None => {}
        }
    }

    /// Handles a pointer release anywhere in the document.
    ///
    /// The interacting flag stays set until [`Self::release_interaction`].
    pub fn on_pointer_up(&mut self, id: PointerId) {
        self.session.pointer_up(id);
    }

    /// Forgets all pointers and removes the styles written to the surface.
    pub fn destroy(&mut self) {
        self.session.clear();
        self.interacting = false;
        self.surface.clear_transform();
    }

    fn drag_to(&mut self, anchor: DragAnchor, screen: Point) {
        if !self.config.draggable {
            return;
        }

        let mut position = anchor.position_for(screen);
        if anchor.exceeds_threshold(screen) {
            self.interacting = true;
        }

        if self.config.bounds {
            let rect = self.surface.element_rect();
            let container = self.surface.container_rect(self.config.origin);

            // Overflowing axes stay inside the container; fitting axes do not move.
            position.x = if self.fits_in_container(Axes::X) {
                self.transform.x
            } else {
                position.x.min(0.0).max(container.width() - rect.width())
            };
            position.y = if self.fits_in_container(Axes::Y) {
                self.transform.y
            } else {
                position.y.min(0.0).max(container.height() - rect.height())
            };
        }

        self.transform.set_position(position);
        self.apply();
    }
}

impl<S> fmt::Debug for ViewportController<S>
where
    S: Surface + fmt::Debug,
    S::Target: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportController")
            .field("surface", &self.surface)
            .field("config", &self.config)
            .field("transform", &self.transform)
            .field("session", &self.session)
            .field("interacting", &self.interacting)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};

    use super::ViewportController;
    use crate::config::Config;
    use crate::gesture::{PointerId, PointerSample};
    use crate::headless::HeadlessSurface;

    fn press(id: i32, x: f64, y: f64) -> PointerSample<u32> {
        PointerSample::new(PointerId(id), Point::new(x, y), Point::new(x, y))
    }

    #[test]
    fn drag_requires_draggable() {
        let surface = HeadlessSurface::new(Size::new(800.0, 600.0), Size::new(100.0, 100.0));
        let mut c = ViewportController::new(surface, Config::default());
        c.on_pointer_down(press(1, 10.0, 10.0));
        c.on_pointer_move(press(1, 60.0, 60.0));
        assert_eq!(c.position(), Point::ZERO);
        assert!(!c.is_interacting());
        assert_eq!(c.surface().apply_count(), 0);
    }

    #[test]
    fn tiny_drag_does_not_mark_interaction() {
        let surface = HeadlessSurface::new(Size::new(800.0, 600.0), Size::new(100.0, 100.0));
        let mut c = ViewportController::new(surface, Config::default().with_draggable(true));
        c.on_pointer_down(press(1, 10.0, 10.0));
        c.on_pointer_move(press(1, 11.0, 10.5));
        assert_eq!(c.position(), Point::new(1.0, 0.5));
        assert!(!c.is_interacting());
    }

    #[test]
    fn destroy_clears_surface_and_session() {
        let surface = HeadlessSurface::new(Size::new(800.0, 600.0), Size::new(100.0, 100.0));
        let mut c = ViewportController::new(surface, Config::default());
        c.set_zoom(250.0);
        c.apply();
        c.on_pointer_down(press(1, 0.0, 0.0));
        c.destroy();
        assert!(c.surface().is_cleared());
        assert!(c.session().pointers().is_empty());
    }
}
