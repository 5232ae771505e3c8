// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture state: tell a one-pointer drag apart from a two-pointer pinch.
//!
//! ## Usage
//!
//! 1) Feed pointer-down samples to [`GestureSession::pointer_down`] together with
//!    the element's current offset.
//! 2) Feed every move to [`GestureSession::pointer_move`]; it returns the
//!    [`GestureStep`] to execute, if any.
//! 3) Feed releases to [`GestureSession::pointer_up`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_zoom::gesture::{GestureSession, GestureStep, PointerId, PointerSample};
//!
//! let mut session = GestureSession::<()>::new();
//! let sample = |id, x, y| PointerSample::new(PointerId(id), Point::new(x, y), Point::new(x, y));
//!
//! session.pointer_down(sample(1, 0.0, 0.0), Point::ZERO);
//! session.pointer_down(sample(2, 100.0, 0.0), Point::ZERO);
//!
//! // The first two-pointer move only records the distance.
//! assert_eq!(session.pointer_move(sample(2, 100.0, 0.0)), None);
//!
//! // Spreading to 150 zooms by 1.5 around the first pointer.
//! let step = session.pointer_move(sample(2, 150.0, 0.0));
//! assert_eq!(
//!     step,
//!     Some(GestureStep::Pinch { amplitude: 1.5, anchor: Point::ZERO })
//! );
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Movement, in pixels, a gesture must exceed to count as an interaction.
pub const MOVE_THRESHOLD: f64 = 1.0;

/// Delay after a pointer release before the interacting flag clears.
///
/// Keeps the flag set across the click that typically follows a drag, so
/// consumers can tell a drag-release from a tap.
pub const INTERACTION_RELEASE_DELAY_MS: u32 = 25;

/// Host-assigned pointer identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub i32);

/// Last known state of an active pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerSample<T> {
    /// Pointer identifier.
    pub id: PointerId,
    /// Position in viewport (client) coordinates, used for pinching.
    pub client: Point,
    /// Position in screen coordinates, used for dragging.
    pub screen: Point,
    /// Event target the sample was delivered to, if known.
    pub target: Option<T>,
}

impl<T> PointerSample<T> {
    /// Creates a sample without a target.
    #[must_use]
    pub fn new(id: PointerId, client: Point, screen: Point) -> Self {
        Self {
            id,
            client,
            screen,
            target: None,
        }
    }

    /// Sets the event target.
    #[must_use]
    pub fn with_target(mut self, target: T) -> Self {
        self.target = Some(target);
        self
    }
}

/// Element offset and pointer position captured when a drag starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragAnchor {
    /// Element offset at drag start.
    pub element: Point,
    /// Pointer screen position at drag start.
    pub pointer: Point,
}

impl DragAnchor {
    /// Pointer movement since the drag started.
    #[must_use]
    pub fn displacement(&self, screen: Point) -> Vec2 {
        screen - self.pointer
    }

    /// Element offset that follows the pointer to `screen`.
    #[must_use]
    pub fn position_for(&self, screen: Point) -> Point {
        self.element + self.displacement(screen)
    }

    /// Returns `true` once the pointer moved more than [`MOVE_THRESHOLD`] on either axis.
    #[must_use]
    pub fn exceeds_threshold(&self, screen: Point) -> bool {
        let d = self.displacement(screen);
        d.x.abs() > MOVE_THRESHOLD || d.y.abs() > MOVE_THRESHOLD
    }
}

/// Work produced by a pointer move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureStep {
    /// A single pointer moved while a drag is anchored.
    Drag {
        /// Where the drag started.
        anchor: DragAnchor,
        /// Current pointer screen position.
        screen: Point,
    },
    /// Two pointers moved apart or together by more than [`MOVE_THRESHOLD`].
    Pinch {
        /// Ratio of the new pointer distance to the previous one.
        amplitude: f64,
        /// Client position of the first pointer.
        anchor: Point,
    },
}

/// Pointer bookkeeping for one controlled element.
#[derive(Clone, Debug)]
pub struct GestureSession<T> {
    pointers: SmallVec<[PointerSample<T>; 2]>,
    pinch_distance: Option<f64>,
    drag_anchor: Option<DragAnchor>,
}

impl<T> Default for GestureSession<T> {
    fn default() -> Self {
        Self {
            pointers: SmallVec::new(),
            pinch_distance: None,
            drag_anchor: None,
        }
    }
}

impl<T: Clone + PartialEq> GestureSession<T> {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pressed pointer.
    ///
    /// The first pointer of an idle session anchors a drag at `element_position`.
    /// A pointer id that is already registered is replaced in place.
    pub fn pointer_down(&mut self, sample: PointerSample<T>, element_position: Point) {
        if self.pointers.is_empty() && self.drag_anchor.is_none() {
            self.drag_anchor = Some(DragAnchor {
                element: element_position,
                pointer: sample.screen,
            });
        }
        match self.pointers.iter_mut().find(|p| p.id == sample.id) {
            Some(existing) => *existing = sample,
            None => self.pointers.push(sample),
        }
    }

    /// Records a pointer move and returns the resulting step, if any.
    ///
    /// With one active pointer this is a drag step, produced only while a drag
    /// is anchored and the move targets the same element as the first pointer.
    /// With two active pointers this is a pinch step, produced when the
    /// distance changed by more than [`MOVE_THRESHOLD`] since the previous move.
    /// The distance is cached on every two-pointer move.
    pub fn pointer_move(&mut self, sample: PointerSample<T>) -> Option<GestureStep> {
        if let Some(existing) = self.pointers.iter_mut().find(|p| p.id == sample.id) {
            *existing = sample.clone();
        }

        match self.pointers.as_slice() {
            [first] => {
                let anchor = self.drag_anchor?;
                if let Some(target) = &sample.target {
                    if first.target.as_ref() != Some(target) {
                        return None;
                    }
                }
                Some(GestureStep::Drag {
                    anchor,
                    screen: sample.screen,
                })
            }
            [first, second] => {
                let distance = first.client.distance(second.client);
                let step = match self.pinch_distance {
                    Some(previous)
                        if previous > 0.0 && (distance - previous).abs() > MOVE_THRESHOLD =>
                    {
                        Some(GestureStep::Pinch {
                            amplitude: distance / previous,
                            anchor: first.client,
                        })
                    }
                    _ => None,
                };
                self.pinch_distance = Some(distance);
                step
            }
            _ => None,
        }
    }

    /// Forgets a released pointer and ends any drag.
    pub fn pointer_up(&mut self, id: PointerId) {
        self.drag_anchor = None;
        if let Some(index) = self.pointers.iter().position(|p| p.id == id) {
            self.pointers.remove(index);
        }
        if self.pointers.len() < 2 {
            self.pinch_distance = None;
        }
    }

    /// Drops every pointer, the drag anchor, and the cached pinch distance.
    pub fn clear(&mut self) {
        self.pointers.clear();
        self.pinch_distance = None;
        self.drag_anchor = None;
    }

    /// Active pointers in press order.
    #[must_use]
    pub fn pointers(&self) -> &[PointerSample<T>] {
        &self.pointers
    }

    /// Distance between the two pointers at the previous pinch move.
    #[must_use]
    pub fn pinch_distance(&self) -> Option<f64> {
        self.pinch_distance
    }

    /// The current drag anchor, if a drag is in progress.
    #[must_use]
    pub fn drag_anchor(&self) -> Option<DragAnchor> {
        self.drag_anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(id: i32, x: f64, y: f64) -> PointerSample<u8> {
        PointerSample::new(PointerId(id), Point::new(x, y), Point::new(x, y))
    }

    #[test]
    fn first_pointer_anchors_drag() {
        let mut session = GestureSession::new();
        session.pointer_down(at(1, 100.0, 100.0), Point::new(5.0, 6.0));
        session.pointer_down(at(2, 300.0, 300.0), Point::new(9.0, 9.0));

        assert_eq!(
            session.drag_anchor(),
            Some(DragAnchor {
                element: Point::new(5.0, 6.0),
                pointer: Point::new(100.0, 100.0),
            })
        );
        assert_eq!(session.pointers().len(), 2);
    }

    #[test]
    fn single_pointer_move_produces_drag() {
        let mut session = GestureSession::new();
        session.pointer_down(at(1, 100.0, 100.0), Point::ZERO);

        let step = session.pointer_move(at(1, 150.0, 130.0));
        let Some(GestureStep::Drag { anchor, screen }) = step else {
            panic!("expected a drag step, got {step:?}");
        };
        assert_eq!(anchor.position_for(screen), Point::new(50.0, 30.0));
        assert!(anchor.exceeds_threshold(screen));
        assert!(!anchor.exceeds_threshold(Point::new(101.0, 99.0)));
    }

    #[test]
    fn drag_on_another_target_is_ignored() {
        let mut session = GestureSession::new();
        session.pointer_down(at(1, 0.0, 0.0).with_target(7), Point::ZERO);

        // An unregistered pointer over another target does not move the element.
        assert_eq!(session.pointer_move(at(9, 10.0, 0.0).with_target(8)), None);
        assert!(session.pointer_move(at(9, 10.0, 0.0).with_target(7)).is_some());
        // The pressed pointer itself always drags.
        assert!(session.pointer_move(at(1, 10.0, 0.0).with_target(8)).is_some());
    }

    #[test]
    fn move_without_anchor_does_nothing() {
        let mut session = GestureSession::new();
        session.pointer_down(at(1, 0.0, 0.0), Point::ZERO);
        session.pointer_down(at(2, 50.0, 0.0), Point::ZERO);
        session.pointer_up(PointerId(1));

        // The remaining pointer no longer drags.
        assert_eq!(session.pointer_move(at(2, 80.0, 0.0)), None);
    }

    #[test]
    fn pinch_caches_distance_regardless_of_threshold() {
        let mut session = GestureSession::new();
        session.pointer_down(at(1, 0.0, 0.0), Point::ZERO);
        session.pointer_down(at(2, 100.0, 0.0), Point::ZERO);

        assert_eq!(session.pointer_move(at(2, 100.0, 0.0)), None);
        assert_eq!(session.pinch_distance(), Some(100.0));

        // Below the threshold: no step, but the distance still updates.
        assert_eq!(session.pointer_move(at(2, 100.5, 0.0)), None);
        assert_eq!(session.pinch_distance(), Some(100.5));

        let step = session.pointer_move(at(2, 201.0, 0.0));
        assert_eq!(
            step,
            Some(GestureStep::Pinch {
                amplitude: 2.0,
                anchor: Point::ZERO,
            })
        );
        assert_eq!(session.pinch_distance(), Some(201.0));
    }

    #[test]
    fn release_resets_pinch_distance() {
        let mut session = GestureSession::new();
        session.pointer_down(at(1, 0.0, 0.0), Point::ZERO);
        session.pointer_down(at(2, 100.0, 0.0), Point::ZERO);
        session.pointer_move(at(2, 120.0, 0.0));
        assert!(session.pinch_distance().is_some());

        session.pointer_up(PointerId(2));
        assert_eq!(session.pinch_distance(), None);
        assert_eq!(session.drag_anchor(), None);
        assert_eq!(session.pointers().len(), 1);
    }

    #[test]
    fn repeated_down_replaces_pointer() {
        let mut session = GestureSession::new();
        session.pointer_down(at(1, 0.0, 0.0), Point::ZERO);
        session.pointer_down(at(1, 5.0, 5.0), Point::ZERO);
        assert_eq!(session.pointers().len(), 1);
        assert_eq!(session.pointers()[0].client, Point::new(5.0, 5.0));
    }

    #[test]
    fn three_pointers_neither_drag_nor_pinch() {
        let mut session = GestureSession::new();
        for id in 1..=3 {
            session.pointer_down(at(id, f64::from(id) * 10.0, 0.0), Point::ZERO);
        }
        assert_eq!(session.pointer_move(at(3, 90.0, 0.0)), None);
        session.clear();
        assert!(session.pointers().is_empty());
    }
}
