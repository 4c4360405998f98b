//! Numeric Tolerances
//!
//! Floors that keep the pipeline away from division by near-zero values.
//! Loaded from the `[tolerances]` config section; the defaults are the
//! values every prototype bank in the wild has been built with.

use serde::{Deserialize, Serialize};

/// Default floor below which the body-height scale is replaced
pub const DEFAULT_SCALE_EPSILON: f64 = 1e-6;

/// Default scale substituted for a degenerate (static / collapsed) pose
pub const DEFAULT_SCALE_FALLBACK: f64 = 1.0;

/// Default floor below which a vector is treated as the zero vector
pub const DEFAULT_NORM_EPSILON: f64 = 1e-8;

/// Numeric floors shared by the normalizer, extractor and scorer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Scales below this are replaced by `scale_fallback`
    pub scale_epsilon: f64,
    /// Replacement scale for degenerate poses
    pub scale_fallback: f64,
    /// Vectors with a norm below this are never divided by their norm
    pub norm_epsilon: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            scale_epsilon: DEFAULT_SCALE_EPSILON,
            scale_fallback: DEFAULT_SCALE_FALLBACK,
            norm_epsilon: DEFAULT_NORM_EPSILON,
        }
    }
}

impl Tolerances {
    /// Validate tolerance values.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !self.scale_epsilon.is_finite() || self.scale_epsilon <= 0.0 {
            return Err(crate::Error::Config(format!(
                "scale_epsilon must be finite and > 0, got {}",
                self.scale_epsilon
            )));
        }
        if !self.scale_fallback.is_finite() || self.scale_fallback <= 0.0 {
            return Err(crate::Error::Config(format!(
                "scale_fallback must be finite and > 0, got {}",
                self.scale_fallback
            )));
        }
        if !self.norm_epsilon.is_finite() || self.norm_epsilon <= 0.0 {
            return Err(crate::Error::Config(format!(
                "norm_epsilon must be finite and > 0, got {}",
                self.norm_epsilon
            )));
        }
        Ok(())
    }
}
