#![allow(clippy::float_cmp)]

use super::*;

// --- Basics ---

#[test]
fn multiples_are_unchanged() {
    assert_eq!(snap_to_grid(40.0, 20.0), 40.0);
    assert_eq!(snap_to_grid(-60.0, 20.0), -60.0);
    assert_eq!(snap_to_grid(0.0, 20.0), 0.0);
}

#[test]
fn rounds_to_nearest_multiple() {
    assert_eq!(snap_to_grid(24.0, 20.0), 20.0);
    assert_eq!(snap_to_grid(36.0, 20.0), 40.0);
    assert_eq!(snap_to_grid(-24.0, 20.0), -20.0);
    assert_eq!(snap_to_grid(-36.0, 20.0), -40.0);
}

#[test]
fn ties_round_away_from_zero() {
    assert_eq!(snap_to_grid(10.0, 20.0), 20.0);
    assert_eq!(snap_to_grid(-10.0, 20.0), -20.0);
    assert_eq!(snap_to_grid(30.0, 20.0), 40.0);
}

#[test]
fn works_with_fractional_grid() {
    assert_eq!(snap_to_grid(0.76, 0.5), 1.0);
    assert_eq!(snap_to_grid(0.7, 0.5), 0.5);
}

// --- Properties ---

#[test]
fn result_is_always_a_multiple() {
    for grid in [10.0, 20.0, 40.0] {
        for i in -50..=50 {
            let v = f64::from(i) * 7.3;
            let snapped = snap_to_grid(v, grid);
            let steps = snapped / grid;
            assert!(
                (steps - steps.round()).abs() < 1e-9,
                "snap({v}, {grid}) = {snapped} is not on the grid"
            );
        }
    }
}

#[test]
fn never_moves_more_than_half_a_pitch() {
    for grid in [10.0, 20.0, 40.0] {
        for i in -50..=50 {
            let v = f64::from(i) * 7.3;
            assert!(
                (snap_to_grid(v, grid) - v).abs() <= grid / 2.0 + 1e-9,
                "snap({v}, {grid}) moved too far"
            );
        }
    }
}
