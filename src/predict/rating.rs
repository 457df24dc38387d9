//! Rating correction and qualitative bands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw output value the correction pivots around.
pub const DEFAULT_ANCHOR: f64 = 4.45;

/// Slope factor applied below the anchor.
pub const DEFAULT_SLOPE_BELOW: f64 = 6.5;

/// Slope factor applied at or above the anchor.
pub const DEFAULT_SLOPE_ABOVE: f64 = 4.0;

/// Lowest reported rating.
pub const DEFAULT_MIN_RATING: f64 = 3.0;

/// Highest reported rating.
pub const DEFAULT_MAX_RATING: f64 = 4.81;

/// Piecewise-linear rescaling of raw model output.
///
/// With `d = raw - anchor`, the corrected value is
/// `d * anchor * slope + anchor`, using `slope_below` when `raw < anchor` and
/// `slope_above` otherwise, clamped to `[min_rating, max_rating]` and rounded
/// to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RatingCorrection {
    /// Pivot value of the raw model output
    pub anchor: f64,
    /// Slope factor below the anchor
    pub slope_below: f64,
    /// Slope factor at or above the anchor
    pub slope_above: f64,
    /// Lower clamp bound
    pub min_rating: f64,
    /// Upper clamp bound
    pub max_rating: f64,
}

impl Default for RatingCorrection {
    fn default() -> Self {
        Self {
            anchor: DEFAULT_ANCHOR,
            slope_below: DEFAULT_SLOPE_BELOW,
            slope_above: DEFAULT_SLOPE_ABOVE,
            min_rating: DEFAULT_MIN_RATING,
            max_rating: DEFAULT_MAX_RATING,
        }
    }
}

impl RatingCorrection {
    /// Unclamped, unrounded corrected value.
    #[must_use]
    pub fn rescale(&self, raw: f64) -> f64 {
        let d = raw - self.anchor;
        let slope = if raw < self.anchor {
            self.slope_below
        } else {
            self.slope_above
        };
        d * self.anchor * slope + self.anchor
    }

    /// Rescale, clamp and round a raw model output.
    #[must_use]
    pub fn apply(&self, raw: f64) -> PredictedRating {
        let corrected = self.rescale(raw);
        let clamped = corrected.clamp(self.min_rating, self.max_rating);
        tracing::debug!(raw, corrected, clamped, "rating correction");
        PredictedRating((clamped * 100.0).round() / 100.0)
    }
}

/// A corrected rating, bounded and rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PredictedRating(f64);

impl PredictedRating {
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn band(self) -> RatingBand {
        RatingBand::from_rating(self.0)
    }
}

impl fmt::Display for PredictedRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Qualitative label for a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RatingBand {
    /// 4.5 and above
    Excellent,
    /// 4.0 to 4.5
    VeryGood,
    /// 3.5 to 4.0
    Good,
    /// 3.0 to 3.5
    Average,
    /// Below 3.0
    BelowAverage,
}

impl RatingBand {
    #[must_use]
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 4.5 {
            Self::Excellent
        } else if rating >= 4.0 {
            Self::VeryGood
        } else if rating >= 3.5 {
            Self::Good
        } else if rating >= 3.0 {
            Self::Average
        } else {
            Self::BelowAverage
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very good",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::BelowAverage => "Below average",
        }
    }
}

impl fmt::Display for RatingBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
