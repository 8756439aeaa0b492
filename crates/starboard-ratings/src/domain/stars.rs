//! Five-star visual breakdown of an average rating.

use serde::Serialize;
use starboard_core::rating::round_to_tenth;

/// Number of stars in the visual scale.
pub const STAR_COUNT: u8 = 5;

/// Full, partial and empty stars for a mean rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StarBreakdown {
    /// `floor(mean)`.
    pub full: u8,
    /// Fractional remainder of the mean, rounded to one decimal.
    pub partial: f64,
    /// `5 - ceil(mean)`.
    pub empty: u8,
}

impl StarBreakdown {
    /// Splits `mean` into full, partial and empty stars.
    ///
    /// Means outside `0..=5` are clamped first.
    #[must_use]
    pub fn from_mean(mean: f64) -> Self {
        let mean = if mean.is_finite() {
            mean.clamp(0.0, f64::from(STAR_COUNT))
        } else {
            0.0
        };
        // Clamped to 0..=5 above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (full, ceiling) = (mean.floor() as u8, mean.ceil() as u8);
        Self {
            full,
            partial: round_to_tenth(mean.fract()),
            empty: STAR_COUNT - ceiling,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractional_mean() {
        let stars = StarBreakdown::from_mean(3.7);
        assert_eq!(stars.full, 3);
        assert!((stars.partial - 0.7).abs() < 1e-9);
        assert_eq!(stars.empty, 1);
    }

    #[test]
    fn test_whole_mean_has_no_partial() {
        let stars = StarBreakdown::from_mean(4.0);
        assert_eq!(stars.full, 4);
        assert!(stars.partial.abs() < f64::EPSILON);
        assert_eq!(stars.empty, 1);
    }

    #[test]
    fn test_zero_mean_is_all_empty() {
        let stars = StarBreakdown::from_mean(0.0);
        assert_eq!(stars.full, 0);
        assert_eq!(stars.empty, 5);
    }

    #[test]
    fn test_out_of_range_mean_is_clamped() {
        assert_eq!(StarBreakdown::from_mean(7.0).full, 5);
        assert_eq!(StarBreakdown::from_mean(f64::NAN).empty, 5);
    }
}
