//! Rating values and the grade classifier.
//!
//! The OMDb API reports episode ratings as strings that are either a decimal
//! number or the literal `N/A`. Modelling that as a tagged union keeps the
//! classifier total: missing data gets its own tier instead of riding along
//! as a magic string.

use std::fmt;

/// An IMDb rating as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    /// A numeric rating, typically in the 1.0..=10.0 range
    Numeric(f64),
    /// The API's `N/A` marker for episodes without a rating
    Unavailable,
}

impl Rating {
    /// Parses a rating field from the API.
    ///
    /// Returns `None` when the value is neither `N/A` nor a decimal number.
    pub fn parse(value: &str) -> Option<Rating> {
        if value == "N/A" {
            return Some(Rating::Unavailable);
        }
        value.parse().ok().map(Rating::Numeric)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Numeric(value) => write!(f, "{value:.1}"),
            Rating::Unavailable => write!(f, "N/A"),
        }
    }
}

/// Color-coded severity tier for a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Worst,
    Medium,
    Best,
    /// Dedicated tier for `N/A` ratings
    Missing,
}

/// Boundaries between the numeric tiers.
///
/// Ratings below `low` are the worst tier, ratings at or above `high` the
/// best, everything in between medium.
#[derive(Debug, Clone, Copy)]
pub struct GradeThresholds {
    pub low: f64,
    pub high: f64,
}

impl Default for GradeThresholds {
    fn default() -> Self {
        Self { low: 4.0, high: 8.0 }
    }
}

/// Maps a rating to its tier.
pub fn classify(rating: Rating, thresholds: &GradeThresholds) -> Tier {
    match rating {
        Rating::Unavailable => Tier::Missing,
        Rating::Numeric(value) if value >= thresholds.high => Tier::Best,
        Rating::Numeric(value) if value >= thresholds.low => Tier::Medium,
        Rating::Numeric(_) => Tier::Worst,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(tier: Tier) -> u8 {
        match tier {
            Tier::Worst => 0,
            Tier::Medium => 1,
            Tier::Best => 2,
            Tier::Missing => panic!("numeric rating classified as missing"),
        }
    }

    #[test]
    fn test_classify_is_monotonic() {
        let thresholds = GradeThresholds::default();
        let mut previous = 0;

        for step in 0..=100 {
            let rating = Rating::Numeric(step as f64 / 10.0);
            let current = rank(classify(rating, &thresholds));
            assert!(current >= previous, "tier dropped at rating {rating}");
            previous = current;
        }
    }

    #[test]
    fn test_classify_boundaries() {
        let thresholds = GradeThresholds::default();
        assert_eq!(classify(Rating::Numeric(3.9), &thresholds), Tier::Worst);
        assert_eq!(classify(Rating::Numeric(4.0), &thresholds), Tier::Medium);
        assert_eq!(classify(Rating::Numeric(7.9), &thresholds), Tier::Medium);
        assert_eq!(classify(Rating::Numeric(8.0), &thresholds), Tier::Best);
    }

    #[test]
    fn test_unavailable_is_always_missing() {
        for (low, high) in [(0.0, 0.0), (4.0, 8.0), (9.9, 10.0)] {
            let thresholds = GradeThresholds { low, high };
            assert_eq!(classify(Rating::Unavailable, &thresholds), Tier::Missing);
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = GradeThresholds { low: 2.0, high: 9.0 };
        assert_eq!(classify(Rating::Numeric(3.0), &thresholds), Tier::Medium);
        assert_eq!(classify(Rating::Numeric(8.5), &thresholds), Tier::Medium);
        assert_eq!(classify(Rating::Numeric(9.0), &thresholds), Tier::Best);
    }

    #[test]
    fn test_rating_parse() {
        assert_eq!(Rating::parse("8.5"), Some(Rating::Numeric(8.5)));
        assert_eq!(Rating::parse("N/A"), Some(Rating::Unavailable));
        assert_eq!(Rating::parse("n/a"), None);
        assert_eq!(Rating::parse("great"), None);
    }

    #[test]
    fn test_rating_display() {
        assert_eq!(Rating::Numeric(8.5).to_string(), "8.5");
        assert_eq!(Rating::Numeric(10.0).to_string(), "10.0");
        assert_eq!(Rating::Unavailable.to_string(), "N/A");
    }
}
