//! Average rating computation.

use venues_core::model::Rating;

/// Lowest rating a user may submit.
pub const MIN_RATING: f64 = 0.5;

/// Highest rating a user may submit.
pub const MAX_RATING: f64 = 5.0;

/// Returns `true` if `value` lies in `[MIN_RATING, MAX_RATING]`.
#[must_use]
pub fn is_valid_rating(value: f64) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&value)
}

/// Arithmetic mean of every rating value, or `0.0` when there are none.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn recompute(ratings: &[Rating]) -> f64 {
    let total: f64 = ratings.iter().map(|r| r.rating).sum();
    finite_or_zero(total / ratings.len() as f64)
}

/// The mean after adding `new_rating` to `existing`, without a second pass
/// over the stored ratings.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn incorporate(existing: &[Rating], new_rating: f64) -> f64 {
    let total: f64 = existing.iter().map(|r| r.rating).sum::<f64>() + new_rating;
    finite_or_zero(total / (existing.len() + 1) as f64)
}

fn finite_or_zero(mean: f64) -> f64 {
    if mean.is_finite() { mean } else { 0.0 }
}
