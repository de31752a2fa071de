//! Points policy tests.

use rewards_core::points::calculate_points;

#[test]
fn nothing_below_fifty() {
    assert_eq!(calculate_points(0.0), 0);
    assert_eq!(calculate_points(10.0), 0);
    assert_eq!(calculate_points(49.99), 0);
}

#[test]
fn zero_at_exactly_fifty() {
    assert_eq!(calculate_points(50.0), 0);
}

#[test]
fn one_point_per_whole_dollar_in_the_middle_band() {
    assert_eq!(calculate_points(51.0), 1);
    assert_eq!(calculate_points(75.5), 25);
    assert_eq!(calculate_points(99.99), 49);
    assert_eq!(calculate_points(100.0), 50);
}

#[test]
fn double_rate_above_one_hundred() {
    assert_eq!(calculate_points(101.0), 52);
    assert_eq!(calculate_points(120.0), 90);
    assert_eq!(calculate_points(250.0), 350);
}

#[test]
fn floor_applies_to_the_band_offset_not_the_amount() {
    // floor(20.99) * 2 + 50, not floor-then-floor on the raw amount
    assert_eq!(calculate_points(120.99), 90);
    assert_eq!(calculate_points(100.5), 50);
    assert_eq!(calculate_points(59.99), 9);
}

#[test]
fn negative_amounts_earn_nothing() {
    assert_eq!(calculate_points(-0.01), 0);
    assert_eq!(calculate_points(-500.0), 0);
}

#[test]
fn monotonically_non_decreasing() {
    let mut previous = 0;
    for cents in 0..=40_000u64 {
        let amount = cents as f64 * 0.25;
        let points = calculate_points(amount);
        assert!(
            points >= previous,
            "points dropped from {previous} to {points} at amount {amount}"
        );
        previous = points;
    }
}
