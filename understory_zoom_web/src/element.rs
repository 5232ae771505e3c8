// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use kurbo::Point;
use understory_zoom::gesture::INTERACTION_RELEASE_DELAY_MS;
use understory_zoom::{Axes, Config, PointerId, PointerSample, ViewportController};
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlElement, PointerEvent, WheelEvent, Window};

use crate::error::Error;
use crate::surface::DomSurface;

type Shared = Rc<RefCell<ViewportController<DomSurface>>>;

/// Selector used by [`ZoomableElement::with_default_selector`].
pub const DEFAULT_SELECTOR: &str = ".zoomable";

/// Class added to the controlled element while attached.
pub const ELEMENT_CLASS: &str = "understory-zoom-element";

fn read_config(surface: &DomSurface) -> Config {
    match Config::try_from_attributes(surface) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(%err, "malformed zoom limit attribute, using the default");
            Config::from_attributes(surface)
        }
    }
}

fn listen(
    target: &EventTarget,
    event_type: &'static str,
    callback: impl FnMut(&Event) + 'static,
) -> EventListener {
    let options = EventListenerOptions::enable_prevent_default();
    EventListener::new_with_options(target, event_type, options, callback)
}

fn pointer_sample(event: &PointerEvent) -> PointerSample<EventTarget> {
    PointerSample {
        id: PointerId(event.pointer_id()),
        client: Point::new(f64::from(event.client_x()), f64::from(event.client_y())),
        screen: Point::new(f64::from(event.screen_x()), f64::from(event.screen_y())),
        target: event.target(),
    }
}

/// A DOM element with wheel zoom, drag, and pinch zoom attached.
///
/// Behavior is configured through data attributes on the element:
/// `data-bounds`, `data-draggable`, `data-origin-parent`, `data-min-zoom`, and
/// `data-max-zoom` (a percentage or `fit`).
///
/// Dropping the value detaches all listeners but leaves the element's styles
/// as they are; call [`ZoomableElement::destroy`] to restore the element.
#[derive(Debug)]
pub struct ZoomableElement {
    window: Window,
    element: HtmlElement,
    controller: Shared,
    listeners: Vec<EventListener>,
    on_load: Option<EventListener>,
}

impl ZoomableElement {
    /// Attaches to the first element matching `selector`.
    ///
    /// The element is fitted into its container once the page has loaded (or
    /// immediately, if it already has).
    pub fn new(selector: &str) -> Result<Self, Error> {
        let window = web_sys::window().ok_or(Error::NoWindow)?;
        let document = window.document().ok_or(Error::NoDocument)?;
        let element = document
            .query_selector(selector)
            .map_err(|_| Error::InvalidSelector {
                selector: selector.to_owned(),
            })?
            .ok_or_else(|| Error::ElementNotFound {
                selector: selector.to_owned(),
            })?
            .dyn_into::<HtmlElement>()
            .map_err(|_| Error::NotHtmlElement {
                selector: selector.to_owned(),
            })?;

        tracing::debug!(selector, "attaching zoom controller");
        let mut this = Self::from_parts(window, element);
        if document.ready_state() == "complete" {
            this.controller.borrow_mut().fit_initial();
        } else {
            this.fit_on_load();
        }
        Ok(this)
    }

    /// Attaches to the first element matching [`DEFAULT_SELECTOR`].
    pub fn with_default_selector() -> Result<Self, Error> {
        Self::new(DEFAULT_SELECTOR)
    }

    fn from_parts(window: Window, element: HtmlElement) -> Self {
        if let Err(err) = element.class_list().add_1(ELEMENT_CLASS) {
            tracing::warn!(?err, "failed to add element class");
        }
        let mut surface = DomSurface::new(window.clone(), element.clone());
        surface.prepare();
        let config = read_config(&surface);
        let mut this = Self {
            window,
            element,
            controller: Rc::new(RefCell::new(ViewportController::new(surface, config))),
            listeners: Vec::new(),
            on_load: None,
        };
        this.add_listeners();
        this
    }

    fn fit_on_load(&mut self) {
        let controller = Rc::downgrade(&self.controller);
        self.on_load = Some(EventListener::once(&self.window, "load", move |_| {
            if let Some(controller) = controller.upgrade() {
                controller.borrow_mut().fit_initial();
            }
        }));
    }

    /// Runs `f` with the underlying controller.
    pub fn with_controller<R>(
        &self,
        f: impl FnOnce(&mut ViewportController<DomSurface>) -> R,
    ) -> R {
        f(&mut self.controller.borrow_mut())
    }

    /// Re-reads the data attributes, for example after they were changed by script.
    pub fn reload_config(&self) {
        let mut controller = self.controller.borrow_mut();
        let config = read_config(controller.surface());
        controller.set_config(config);
    }

    /// Restores the identity transform. Call [`Self::apply`] to display it.
    pub fn reset(&self) {
        self.controller.borrow_mut().reset();
    }

    /// Current zoom, in percent.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.controller.borrow().zoom()
    }

    /// Sets the zoom, in percent, without checking limits.
    pub fn set_zoom(&self, zoom_percent: f64) {
        self.controller.borrow_mut().set_zoom(zoom_percent);
    }

    /// Current offset in pixels.
    #[must_use]
    pub fn position(&self) -> Point {
        self.controller.borrow().position()
    }

    /// Sets the offset without clamping.
    pub fn set_position(&self, position: Point) {
        self.controller.borrow_mut().set_position(position);
    }

    /// Whether the user is dragging or pinching, or just stopped.
    #[must_use]
    pub fn is_interacting(&self) -> bool {
        self.controller.borrow().is_interacting()
    }

    /// Centers the element in its container on the given axes.
    pub fn center(&self, axes: Axes) {
        self.controller.borrow_mut().center(axes);
    }

    /// Keeps a `data-bounds` element within its container.
    pub fn fit_to_bounds(&self) {
        self.controller.borrow_mut().fit_to_bounds();
    }

    /// Shrinks a `data-bounds` element until it fits its container.
    pub fn zoom_to_fit(&self) {
        self.controller.borrow_mut().zoom_to_fit();
    }

    /// Zooms by `amplitude` around `anchor` (client coordinates).
    pub fn zoom_at(&self, amplitude: f64, anchor: Point) -> bool {
        self.controller.borrow_mut().zoom_at(amplitude, anchor)
    }

    /// Writes the current transform to the element's style.
    pub fn apply(&self) {
        self.controller.borrow_mut().apply();
    }

    /// Subscribes to wheel and pointer events. Does nothing if already subscribed.
    ///
    /// `pointerup` is observed on the window so releases outside the element
    /// still end the gesture.
    pub fn add_listeners(&mut self) {
        if !self.listeners.is_empty() {
            return;
        }
        let controller = Rc::clone(&self.controller);
        let wheel = listen(&self.element, "wheel", move |event| {
            let Some(event) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            event.prevent_default();
            let client = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
            tracing::trace!(delta_y = event.delta_y(), ?client, "wheel zoom");
            controller.borrow_mut().on_wheel(event.delta_y(), client);
        });

        let controller = Rc::clone(&self.controller);
        let down = listen(&self.element, "pointerdown", move |event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            event.prevent_default();
            tracing::trace!(pointer_id = event.pointer_id(), "pointer down");
            controller.borrow_mut().on_pointer_down(pointer_sample(event));
        });

        let controller = Rc::clone(&self.controller);
        let moved = listen(&self.element, "pointermove", move |event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            event.prevent_default();
            controller.borrow_mut().on_pointer_move(pointer_sample(event));
        });

        let controller = Rc::clone(&self.controller);
        let up = listen(&self.window, "pointerup", move |event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            event.prevent_default();
            tracing::trace!(pointer_id = event.pointer_id(), "pointer up");
            controller.borrow_mut().on_pointer_up(PointerId(event.pointer_id()));
            schedule_release(Rc::downgrade(&controller));
        });

        self.listeners = vec![wheel, down, moved, up];
        tracing::debug!(count = self.listeners.len(), "zoom listeners attached");
    }

    /// Unsubscribes from all events.
    pub fn remove_listeners(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        self.listeners.clear();
        tracing::debug!("zoom listeners detached");
    }

    /// Detaches listeners and removes every style and class this controller added.
    pub fn destroy(mut self) {
        self.remove_listeners();
        self.on_load = None;
        self.controller.borrow_mut().destroy();
        if let Err(err) = self.element.class_list().remove_1(ELEMENT_CLASS) {
            tracing::warn!(?err, "failed to remove element class");
        }
        tracing::debug!("zoom controller destroyed");
    }
}

/// Clears the interacting flag once the release delay has passed.
///
/// The timer is never cancelled: a press arriving before it fires may see its
/// flag cleared early, which only affects the advisory interacting state.
fn schedule_release(controller: Weak<RefCell<ViewportController<DomSurface>>>) {
    Timeout::new(INTERACTION_RELEASE_DELAY_MS, move || {
        if let Some(controller) = controller.upgrade() {
            controller.borrow_mut().release_interaction();
        }
    })
    .forget();
}
