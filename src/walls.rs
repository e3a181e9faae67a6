//! Wall configuration and partial-wall segment geometry.
//!
//! Each room module carries a [`Walls`] record: one [`WallConfig`] per
//! compass side, where `pct` is the covered share of the edge and `offset`
//! shifts the covered run along it (both in percent of the edge length).
//! [`wall_segment`] turns a side's config into the world-space line segment
//! a renderer would draw, clamped to the module rectangle.

#[cfg(test)]
#[path = "walls_test.rs"]
mod walls_test;

use serde::Serialize;

use crate::coerce::finite_or;
use crate::scene::Element;

/// Compass side of a module rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    North,
    South,
    East,
    West,
}

impl Side {
    /// All four sides in persisted order.
    pub const ALL: [Side; 4] = [Side::North, Side::South, Side::East, Side::West];

    /// The persisted object key for this side.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Side::North => "N",
            Side::South => "S",
            Side::East => "E",
            Side::West => "W",
        }
    }
}

/// Configuration of one wall side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WallConfig {
    /// Whether the wall is drawn at all.
    pub enabled: bool,
    /// Covered share of the edge, percent in `[0, 100]`.
    pub pct: f64,
    /// Start of the covered run along the edge, percent in `[0, 100]`.
    pub offset: f64,
}

impl WallConfig {
    /// A fully enabled wall covering the whole edge.
    #[must_use]
    pub fn full() -> Self {
        Self { enabled: true, pct: 100.0, offset: 0.0 }
    }

    /// An absent wall.
    #[must_use]
    pub fn disabled() -> Self {
        Self { enabled: false, pct: 0.0, offset: 0.0 }
    }

    /// The config with the at-rest invariants applied: percentages are
    /// finite and clamped to `[0, 100]`, zero coverage reads as disabled,
    /// and a disabled wall holds no coverage.
    #[must_use]
    pub fn normalized(self) -> Self {
        let mut cfg = self;
        cfg.pct = finite_or(cfg.pct, 0.0).clamp(0.0, 100.0);
        cfg.offset = finite_or(cfg.offset, 0.0).clamp(0.0, 100.0);
        if cfg.pct <= 0.0 {
            cfg.enabled = false;
        }
        if !cfg.enabled {
            cfg.pct = 0.0;
        }
        cfg
    }
}

/// Wall configuration for all four sides of a module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Walls {
    #[serde(rename = "N")]
    pub n: WallConfig,
    #[serde(rename = "S")]
    pub s: WallConfig,
    #[serde(rename = "E")]
    pub e: WallConfig,
    #[serde(rename = "W")]
    pub w: WallConfig,
}

impl Walls {
    /// Four fully enabled walls, the state a new module starts in.
    #[must_use]
    pub fn full() -> Self {
        Self {
            n: WallConfig::full(),
            s: WallConfig::full(),
            e: WallConfig::full(),
            w: WallConfig::full(),
        }
    }

    /// The config for one side.
    #[must_use]
    pub fn side(&self, side: Side) -> WallConfig {
        match side {
            Side::North => self.n,
            Side::South => self.s,
            Side::East => self.e,
            Side::West => self.w,
        }
    }

    /// Mutable config for one side.
    pub fn side_mut(&mut self, side: Side) -> &mut WallConfig {
        match side {
            Side::North => &mut self.n,
            Side::South => &mut self.s,
            Side::East => &mut self.e,
            Side::West => &mut self.w,
        }
    }

    /// All four sides normalized.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            n: self.n.normalized(),
            s: self.s.normalized(),
            e: self.e.normalized(),
            w: self.w.normalized(),
        }
    }
}

/// A line segment in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// The world-space segment a module's wall covers on `side`, or `None`
/// when the element is not a module, the wall is disabled, or coverage is
/// zero.
///
/// The covered run starts `offset` percent along the edge and extends
/// `pct` percent of the edge length, truncated at the module corner when
/// the two overshoot. Segments follow the unrotated rectangle; rotation is
/// the renderer's affair.
#[must_use]
pub fn wall_segment(element: &Element, side: Side) -> Option<Segment> {
    let cfg = element.walls()?.side(side);
    if !cfg.enabled {
        return None;
    }
    let pct = cfg.pct.clamp(0.0, 100.0) / 100.0;
    let offset = cfg.offset.clamp(0.0, 100.0) / 100.0;
    if pct <= 0.0 {
        return None;
    }

    let rect = element.rect();
    match side {
        Side::North | Side::South => {
            let y = if side == Side::North { rect.y } else { rect.bottom() };
            let start = rect.x + rect.w * offset;
            let end = rect.x + (rect.w * offset + rect.w * pct).min(rect.w);
            Some(Segment { x1: start, y1: y, x2: end, y2: y })
        }
        Side::East | Side::West => {
            let x = if side == Side::East { rect.right() } else { rect.x };
            let start = rect.y + rect.h * offset;
            let end = rect.y + (rect.h * offset + rect.h * pct).min(rect.h);
            Some(Segment { x1: x, y1: start, x2: x, y2: end })
        }
    }
}

/// Every drawable wall segment of an element, in N, S, E, W order.
#[must_use]
pub fn all_wall_segments(element: &Element) -> Vec<Segment> {
    Side::ALL
        .iter()
        .filter_map(|&side| wall_segment(element, side))
        .collect()
}
