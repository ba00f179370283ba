//! Layer aggregation, quantisation and tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const WEIGHT_SUM_TOLERANCE: f32 = 1.0e-4;

/// Relative weight of the Eastern and Western layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerWeights {
    /// Weight of the Chinese-animal layer.
    pub east: f32,
    /// Weight of the Western-sign layer.
    pub west: f32,
}

impl Default for LayerWeights {
    fn default() -> Self {
        Self {
            east: 0.6,
            west: 0.4,
        }
    }
}

impl LayerWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidWeights`] when either weight is not
    /// finite, is negative, or the two do not sum to one.
    #[expect(
        clippy::float_arithmetic,
        reason = "validation compares the weight sum against one"
    )]
    pub fn validate(self) -> Result<Self, ConfigError> {
        let finite = self.east.is_finite() && self.west.is_finite();
        let non_negative = self.east >= 0.0 && self.west >= 0.0;
        let unit_sum = (self.east + self.west - 1.0).abs() <= WEIGHT_SUM_TOLERANCE;
        if finite && non_negative && unit_sum {
            Ok(self)
        } else {
            Err(ConfigError::InvalidWeights {
                east: self.east,
                west: self.west,
            })
        }
    }
}

/// Combine the two layer scores into a raw score.
///
/// # Examples
/// ```
/// use astromatch_scorer::{LayerWeights, aggregate};
///
/// let raw = aggregate(80.0, 90.0, LayerWeights::default());
/// assert!((raw - 86.0).abs() < 1.0e-4);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "aggregation is a weighted sum of layer scores"
)]
pub fn aggregate(west: f32, east: f32, weights: LayerWeights) -> f32 {
    east * weights.east + west * weights.west
}

/// Snaps raw scores onto a fixed step grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantiser {
    /// Lowest reportable score.
    pub floor: u8,
    /// Highest reportable score.
    pub ceiling: u8,
    /// Distance between neighbouring steps.
    pub step: u8,
}

impl Default for Quantiser {
    fn default() -> Self {
        Self {
            floor: 64,
            ceiling: 96,
            step: 2,
        }
    }
}

impl Quantiser {
    /// Validate the grid and return a copy.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidQuantiser`] unless the step is non-zero,
    /// `floor < ceiling <= 100`, and the step divides the range.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let valid = self.step > 0
            && self.floor < self.ceiling
            && self.ceiling <= 100
            && self.ceiling.abs_diff(self.floor).rem_euclid(self.step) == 0;
        if valid {
            Ok(self)
        } else {
            Err(ConfigError::InvalidQuantiser {
                floor: self.floor,
                ceiling: self.ceiling,
                step: self.step,
            })
        }
    }

    /// Every member of the step set, ascending.
    pub fn steps(self) -> impl Iterator<Item = u8> {
        (self.floor..=self.ceiling).step_by(usize::from(self.step.max(1)))
    }

    /// Clamp `raw` to the grid bounds and snap it to the nearest step.
    ///
    /// Ties resolve toward the higher step and non-finite input maps to the
    /// floor. Quantising a step returns it unchanged.
    ///
    /// # Examples
    /// ```
    /// use astromatch_scorer::Quantiser;
    ///
    /// let quantiser = Quantiser::default();
    /// assert_eq!(quantiser.quantise(65.0), 66);
    /// assert_eq!(quantiser.quantise(12.0), 64);
    /// assert_eq!(quantiser.quantise(f32::NAN), 64);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "snapping measures the distance to each step"
    )]
    pub fn quantise(self, raw: f32) -> u8 {
        if !raw.is_finite() {
            return self.floor;
        }
        let clamped = raw.clamp(f32::from(self.floor), f32::from(self.ceiling));
        let (nearest, _) = self.steps().fold(
            (self.floor, f32::INFINITY),
            |(best, best_distance), step| {
                let distance = (clamped - f32::from(step)).abs();
                // Ascending iteration: `<=` hands ties to the higher step.
                if distance <= best_distance {
                    (step, distance)
                } else {
                    (best, best_distance)
                }
            },
        );
        nearest
    }
}

/// Compatibility tier, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Below 70.
    Challenging,
    /// 70 to 79.
    Balanced,
    /// 80 to 89.
    HighlyCompatible,
    /// 90 and above.
    Exceptional,
}

impl Tier {
    /// All tiers, weakest first.
    pub const ALL: [Self; 4] = [
        Self::Challenging,
        Self::Balanced,
        Self::HighlyCompatible,
        Self::Exceptional,
    ];

    /// Tier for a score.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            90.. => Self::Exceptional,
            80..=89 => Self::HighlyCompatible,
            70..=79 => Self::Balanced,
            _ => Self::Challenging,
        }
    }

    /// Return the tier as a `snake_case` `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Challenging => "challenging",
            Self::Balanced => "balanced",
            Self::HighlyCompatible => "highly_compatible",
            Self::Exceptional => "exceptional",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier for a score; shorthand for [`Tier::from_score`].
#[must_use]
pub const fn tier_of(score: u8) -> Tier {
    Tier::from_score(score)
}
