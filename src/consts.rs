//! Shared numeric constants for the floorboard crate.

// ── Grid ────────────────────────────────────────────────────────

/// Snapping pitches (world units) the host may offer.
pub const GRID_SIZES: [f64; 3] = [10.0, 20.0, 40.0];

/// Default snapping pitch in world units.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

// ── Scale ───────────────────────────────────────────────────────

/// Real-world centimeters per world unit. Catalog footprints are given in
/// centimeters and divided by this to size the created element.
pub const SCALE_CM_PER_PX: f64 = 1.0;

// ── Viewport ────────────────────────────────────────────────────

/// Lower zoom clamp.
pub const MIN_ZOOM: f64 = 0.2;

/// Upper zoom clamp.
pub const MAX_ZOOM: f64 = 4.0;

/// Multiplicative zoom factor applied per wheel notch.
pub const ZOOM_STEP: f64 = 1.1;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for resize handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

// ── Element creation ────────────────────────────────────────────

/// Left/top edge of the window new elements are scattered into.
pub const PLACEMENT_ORIGIN: f64 = 100.0;

/// Extent of the random placement window.
pub const PLACEMENT_SPREAD: f64 = 200.0;
