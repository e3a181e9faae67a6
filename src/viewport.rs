#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::consts::{MAX_ZOOM, MIN_ZOOM};

/// An x/y pair; the containing API decides whether it is screen or world
/// space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Viewport state for pan/zoom over the floor plan.
///
/// `offset_x` / `offset_y` are the screen-space translation in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom); [`Viewport::zoom_at`] keeps it
/// inside [`MIN_ZOOM`]`..=`[`MAX_ZOOM`]. Viewport state is per-session and
/// never persisted with the scene.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub offset_x: f64,
    pub offset_y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { offset_x: 0.0, offset_y: 0.0, zoom: 1.0 }
    }
}

impl Viewport {
    /// Screen pixels to world coordinates.
    #[must_use]
    pub fn to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset_x) / self.zoom,
            y: (screen.y - self.offset_y) / self.zoom,
        }
    }

    /// World coordinates to screen pixels.
    #[must_use]
    pub fn to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.offset_x,
            y: world.y * self.zoom + self.offset_y,
        }
    }

    /// A length in screen pixels expressed in world units.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Translate the view by a screen-space delta. Pan is unclamped.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Scale the view by `factor`, keeping the world point under the
    /// screen-space `anchor` fixed.
    ///
    /// The resulting zoom is clamped into [`MIN_ZOOM`]`..=`[`MAX_ZOOM`];
    /// non-finite or non-positive factors are ignored.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let world = self.to_world(anchor);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.offset_x = anchor.x - world.x * self.zoom;
        self.offset_y = anchor.y - world.y * self.zoom;
    }
}
