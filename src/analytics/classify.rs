//! Pass-rate performance tiers
//!
//! | Pass rate | Class |
//! |-----------|-------|
//! | ≥ 90 | Excellent |
//! | 80 – <90 | Good |
//! | 70 – <80 | Acceptable |
//! | < 70 | Needs Improvement |

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorClass {
    Excellent,
    Good,
    Acceptable,
    NeedsImprovement,
}

impl ColorClass {
    /// Best tier first.
    pub const ALL: [ColorClass; 4] = [
        ColorClass::Excellent,
        ColorClass::Good,
        ColorClass::Acceptable,
        ColorClass::NeedsImprovement,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ColorClass::Excellent => "Excellent",
            ColorClass::Good => "Good",
            ColorClass::Acceptable => "Acceptable",
            ColorClass::NeedsImprovement => "Needs Improvement",
        }
    }

    /// Legend text, e.g. `Good (80-89%)`.
    pub fn legend(&self) -> &'static str {
        match self {
            ColorClass::Excellent => "Excellent (≥90%)",
            ColorClass::Good => "Good (80-89%)",
            ColorClass::Acceptable => "Acceptable (70-79%)",
            ColorClass::NeedsImprovement => "Needs Improvement (<70%)",
        }
    }
}

impl fmt::Display for ColorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a pass rate onto its tier. Lower bounds are inclusive.
///
/// NaN compares false against every threshold and lands in
/// [`ColorClass::NeedsImprovement`].
pub fn classify_pass_rate(rate: f64) -> ColorClass {
    if rate >= 90.0 {
        ColorClass::Excellent
    } else if rate >= 80.0 {
        ColorClass::Good
    } else if rate >= 70.0 {
        ColorClass::Acceptable
    } else {
        ColorClass::NeedsImprovement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // THRESHOLD BOUNDARY TESTS
    // ==========================================================================
    //
    // Each tier includes its lower bound and excludes the next tier's.
    // ==========================================================================

    #[test]
    fn test_boundaries() {
        assert_eq!(classify_pass_rate(90.0), ColorClass::Excellent);
        assert_eq!(classify_pass_rate(89.999), ColorClass::Good);
        assert_eq!(classify_pass_rate(80.0), ColorClass::Good);
        assert_eq!(classify_pass_rate(79.999), ColorClass::Acceptable);
        assert_eq!(classify_pass_rate(70.0), ColorClass::Acceptable);
        assert_eq!(classify_pass_rate(69.999), ColorClass::NeedsImprovement);
    }

    #[test]
    fn test_extremes_are_classified() {
        assert_eq!(classify_pass_rate(100.0), ColorClass::Excellent);
        assert_eq!(classify_pass_rate(0.0), ColorClass::NeedsImprovement);
        assert_eq!(classify_pass_rate(f64::INFINITY), ColorClass::Excellent);
        assert_eq!(classify_pass_rate(f64::NEG_INFINITY), ColorClass::NeedsImprovement);
        assert_eq!(classify_pass_rate(-5.0), ColorClass::NeedsImprovement);
        assert_eq!(classify_pass_rate(150.0), ColorClass::Excellent);
    }

    #[test]
    fn test_nan_needs_improvement() {
        assert_eq!(classify_pass_rate(f64::NAN), ColorClass::NeedsImprovement);
    }

    #[test]
    fn test_classification_is_monotonic() {
        // Walking up in 0.5 steps never moves to a worse tier
        let mut previous = classify_pass_rate(0.0);
        let mut rate = 0.0;
        while rate <= 100.0 {
            let class = classify_pass_rate(rate);
            assert!(class <= previous, "{} regressed at {}", class, rate);
            previous = class;
            rate += 0.5;
        }
    }

    #[test]
    fn test_sample_modules() {
        assert_eq!(classify_pass_rate(90.6), ColorClass::Excellent);
        assert_eq!(classify_pass_rate(89.7), ColorClass::Good);
        assert_eq!(classify_pass_rate(84.6), ColorClass::Good);
        assert_eq!(classify_pass_rate(46.2), ColorClass::NeedsImprovement);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ColorClass::NeedsImprovement.to_string(), "Needs Improvement");
        assert_eq!(ColorClass::Good.legend(), "Good (80-89%)");
    }
}
