//! Input model: mouse buttons, wheel deltas, and the gesture state machine.
//!
//! This module defines the types consumed by the editor core. A gesture
//! spans pointer-down to pointer-up; [`GestureState`] is the active gesture
//! being tracked in between, carrying all context needed to compute
//! incremental updates without re-hit-testing on every move.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::hit::Corner;
use crate::scene::{ElementId, Rect};
use crate::viewport::Point;

/// Which pointer button a press or release came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// The main button, usually the left one.
    Primary,
    /// The wheel button; dedicated to panning.
    Middle,
    /// The context-menu button, usually the right one.
    Secondary,
}

/// Scroll distance reported by a wheel or trackpad event.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal component, in screen pixels.
    pub dx: f64,
    /// Vertical component, in screen pixels; positive scrolls down.
    pub dy: f64,
}

/// The active gesture between pointer-down and pointer-up.
///
/// Each variant carries the context captured at pointer-down; moves are
/// computed against it, never against intermediate state, so a gesture
/// cannot drift.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureState {
    /// Nothing in flight; the next pointer-down decides what starts.
    Idle,
    /// The user is moving an element across the floor plan.
    Dragging {
        /// Id of the element being dragged.
        id: ElementId,
        /// World-space offset from the element origin to the pointer at
        /// drag start; kept constant so the element doesn't jump.
        grab_offset: Point,
    },
    /// The user is resizing an element by one of its corner handles.
    Resizing {
        /// Id of the element being resized.
        id: ElementId,
        /// Which corner handle is being dragged.
        corner: Corner,
        /// Element rectangle at the start of the resize; all corner math
        /// derives from it.
        orig: Rect,
    },
    /// The user is panning the viewport with the middle button.
    Panning {
        /// Screen-space position of the previous pointer event, used to
        /// compute the pan delta.
        last_screen: Point,
    },
}

impl GestureState {
    /// Whether no gesture is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }
}

impl Default for GestureState {
    fn default() -> Self {
        Self::Idle
    }
}
