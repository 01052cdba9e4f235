//! Perceptual space, prior distributions and similarity kernels
//!
//! States are evenly spaced points on `[0, 1]`. Similarity between two
//! states decays as a Gaussian of their perceptual distance, with the
//! width set by the agents' acuity.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, Normal};

use crate::{Error, Result, matrix::Matrix, utils};

/// Location of the normal prior's peak
const NORMAL_PRIOR_MEAN: f64 = 0.5;
/// Standard deviation used by the normal and bimodal priors
const PRIOR_SPREAD: f64 = 0.1;

/// Evenly spaced states on the unit interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerceptualSpace {
    points: Vec<f64>,
}

impl PerceptualSpace {
    /// `size` points from 0 to 1 inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an empty space.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidConfiguration {
                message: "state space must contain at least one state".to_string(),
            });
        }
        let points = if size == 1 {
            vec![0.0]
        } else {
            let step = 1.0 / (size - 1) as f64;
            (0..size).map(|i| i as f64 * step).collect()
        };
        Ok(Self { points })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Absolute distance between every pair of states
    pub fn distance(&self) -> Matrix {
        let n = self.len();
        Matrix::from_fn(n, n, |i, j| (self.points[i] - self.points[j]).abs())
    }

    /// Gaussian similarity `exp(-(d² / (1 / acuity)²))`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] unless acuity is positive and finite.
    pub fn similarity(&self, acuity: f64) -> Result<Matrix> {
        if !(acuity.is_finite() && acuity > 0.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("perceptual acuity must be positive, got {acuity}"),
            });
        }
        let width = 1.0 / acuity;
        Ok(self.distance().map(|d| (-(d * d) / (width * width)).exp()))
    }

    /// Prior probability of each state under `distribution`
    pub fn priors(&self, distribution: PriorDistribution) -> Result<Vec<f64>> {
        let n = self.len();
        let priors = match distribution {
            PriorDistribution::Uniform => vec![1.0 / n as f64; n],
            PriorDistribution::Normal => {
                utils::make_distribution(&self.density(NORMAL_PRIOR_MEAN, PRIOR_SPREAD)?)
            }
            PriorDistribution::Degenerate => {
                let mut priors = vec![0.0; n];
                priors[n / 2] = 1.0;
                priors
            }
            PriorDistribution::Bimodal => {
                let low = utils::make_distribution(&self.density(0.0, PRIOR_SPREAD)?);
                let high = utils::make_distribution(&self.density(1.0, PRIOR_SPREAD)?);
                let combined: Vec<f64> = low.iter().zip(&high).map(|(a, b)| a + b).collect();
                utils::make_distribution(&combined)
            }
        };
        Ok(priors)
    }

    fn density(&self, mean: f64, std_dev: f64) -> Result<Vec<f64>> {
        let normal = Normal::new(mean, std_dev).map_err(|e| Error::InvalidConfiguration {
            message: format!("invalid prior density N({mean}, {std_dev}): {e}"),
        })?;
        Ok(self.points.iter().map(|&x| normal.pdf(x)).collect())
    }
}

/// Shape of the prior distribution over states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PriorDistribution {
    #[default]
    Uniform,
    /// Single peak in the middle of the scale
    Normal,
    /// All mass on the middle state
    Degenerate,
    /// Peaks at both ends of the scale
    Bimodal,
}

impl PriorDistribution {
    pub const VARIANTS: &'static str = "uniform, normal, degenerate, bimodal";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Normal => "normal",
            Self::Degenerate => "degenerate",
            Self::Bimodal => "bimodal",
        }
    }
}

impl fmt::Display for PriorDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriorDistribution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" => Ok(Self::Uniform),
            "normal" => Ok(Self::Normal),
            "degenerate" => Ok(Self::Degenerate),
            "bimodal" => Ok(Self::Bimodal),
            other => Err(Error::ParsePriorDistribution {
                input: other.to_string(),
                expected: Self::VARIANTS.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for PriorDistribution {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PriorDistribution> for String {
    fn from(value: PriorDistribution) -> Self {
        value.as_str().to_string()
    }
}
