//! Hill climbing configuration.

use crate::error::{require_positive, Error, Result};

/// Configuration for [`HillClimber`](super::HillClimber).
///
/// # Examples
///
/// ```
/// use u_localsearch::hc::HcConfig;
///
/// let config = HcConfig::default()
///     .with_max_iterations(500)
///     .with_step_fraction(0.005)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HcConfig {
    /// Maximum number of iterations. Must be positive.
    pub max_iterations: usize,

    /// The run stops once two consecutive recorded values differ by less
    /// than this.
    pub epsilon: f64,

    /// Coordinate step as a fraction of each dimension's width.
    pub step_fraction: f64,

    /// Random seed for the start point.
    pub seed: Option<u64>,
}

impl Default for HcConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            epsilon: 1e-6,
            step_fraction: 0.01,
            seed: None,
        }
    }
}

impl HcConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_step_fraction(mut self, fraction: f64) -> Self {
        self.step_fraction = fraction;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(Error::config("max_iterations", "must be positive"));
        }
        require_positive("epsilon", self.epsilon)?;
        require_positive("step_fraction", self.step_fraction)?;
        Ok(())
    }
}
