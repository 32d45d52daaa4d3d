//! Alert tiers for remaining shelf-life

use crate::models::AlertTier;

/// Last day count (inclusive) that still classifies as expiring
pub const EXPIRING_WINDOW_DAYS: i64 = 2;

/// Map days remaining until predicted expiry to an alert tier
///
/// Negative values are already expired. Total over all integers.
pub fn classify(days_remaining: i64) -> AlertTier {
    if days_remaining < 0 {
        AlertTier::Expired
    } else if days_remaining <= EXPIRING_WINDOW_DAYS {
        AlertTier::Expiring
    } else {
        AlertTier::Safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_days_are_expired() {
        for d in [-1, -2, -30, i64::MIN] {
            assert_eq!(classify(d), AlertTier::Expired, "days={}", d);
        }
    }

    #[test]
    fn test_zero_to_two_days_are_expiring() {
        for d in 0..=2 {
            assert_eq!(classify(d), AlertTier::Expiring, "days={}", d);
        }
    }

    #[test]
    fn test_more_than_two_days_is_safe() {
        for d in [3, 4, 30, 365, i64::MAX] {
            assert_eq!(classify(d), AlertTier::Safe, "days={}", d);
        }
    }
}
