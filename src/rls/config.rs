//! Random local search configuration.

use crate::error::{require_positive, Error, Result};

/// Configuration for [`RandomLocalSearch`](super::RandomLocalSearch).
///
/// # Examples
///
/// ```
/// use u_localsearch::rls::RlsConfig;
///
/// let config = RlsConfig::default()
///     .with_initial_radius(0.5)
///     .with_max_radius(1.5)
///     .with_seed(11);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RlsConfig {
    /// Maximum number of iterations. Must be positive.
    pub max_iterations: usize,

    /// The run stops once two consecutive recorded values differ by less
    /// than this. A rejected candidate repeats the previous value, so
    /// with any positive epsilon the first rejection ends the run.
    pub epsilon: f64,

    /// Neighborhood radius at the start of the run.
    pub initial_radius: f64,

    /// Radius multiplier applied after an accepted move.
    pub shrink_factor: f64,

    /// Radius multiplier applied after a rejected move.
    pub growth_factor: f64,

    /// Upper limit on the radius.
    pub max_radius: f64,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for RlsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            epsilon: 1e-6,
            initial_radius: 1.0,
            shrink_factor: 0.99,
            growth_factor: 1.01,
            max_radius: 2.0,
            seed: None,
        }
    }
}

impl RlsConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_initial_radius(mut self, radius: f64) -> Self {
        self.initial_radius = radius;
        self
    }

    pub fn with_shrink_factor(mut self, factor: f64) -> Self {
        self.shrink_factor = factor;
        self
    }

    pub fn with_growth_factor(mut self, factor: f64) -> Self {
        self.growth_factor = factor;
        self
    }

    pub fn with_max_radius(mut self, radius: f64) -> Self {
        self.max_radius = radius;
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
        require_positive("initial_radius", self.initial_radius)?;
        require_positive("shrink_factor", self.shrink_factor)?;
        require_positive("growth_factor", self.growth_factor)?;
        require_positive("max_radius", self.max_radius)?;
        if self.initial_radius > self.max_radius {
            return Err(Error::config(
                "initial_radius",
                format!(
                    "must not exceed max_radius ({}), got {}",
                    self.max_radius, self.initial_radius
                ),
            ));
        }
        Ok(())
    }
}
