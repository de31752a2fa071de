//! Reward-points policy: a tiered rate over the transaction amount.
//!
//! 1 point per whole dollar between $50 and $100, then 2 points per
//! whole dollar above $100 on top of the flat 50 earned in the lower
//! band. The floor applies to the dollars above each threshold, so
//! fractional cents never earn fractional points.

use crate::types::Points;

pub fn calculate_points(amount: f64) -> Points {
    if amount < 50.0 {
        0
    } else if amount <= 100.0 {
        (amount - 50.0).floor() as Points
    } else {
        (50.0 + (amount - 100.0).floor() * 2.0) as Points
    }
}
