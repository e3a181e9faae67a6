#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

/// Snap `value` to the nearest multiple of `grid_size`.
///
/// Ties round away from zero (`f64::round` semantics): `10.0` snaps to
/// `20.0` on a 20-unit grid and `-10.0` to `-20.0`. `grid_size` must be
/// positive; [`crate::engine::EditorCore::set_grid_size`] guarantees this
/// for every grid the engine snaps against.
#[must_use]
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    debug_assert!(grid_size > 0.0, "grid size must be positive");
    (value / grid_size).round() * grid_size
}
