//! SA configuration.

use crate::error::{require_positive, Error, Result};

/// Configuration for [`SimulatedAnnealing`](super::SimulatedAnnealing).
///
/// Cooling is geometric: `T_{k+1} = cooling_rate * T_k`. A rate in
/// (0, 1) is expected; a rate of 1 or more is accepted but the
/// temperature then never reaches the floor, so only the iteration cap
/// or the stall check ends the run.
///
/// # Examples
///
/// ```
/// use u_localsearch::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(100.0)
///     .with_cooling_rate(0.98)
///     .with_max_iterations(5000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Maximum number of iterations. Must be positive.
    pub max_iterations: usize,

    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Geometric cooling factor.
    pub cooling_rate: f64,

    /// Temperature floor and convergence tolerance. The run stops when
    /// the temperature drops below it, or when recorded values stop
    /// moving by at least this much (see `stall_window`).
    pub epsilon: f64,

    /// Maximum step as a fraction of each dimension's width, at the
    /// initial temperature. Scales linearly with `T / T0`.
    pub step_fraction: f64,

    /// Convergence also requires the value this many samples back to be
    /// within `epsilon` of the latest one.
    pub stall_window: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            initial_temperature: 1000.0,
            cooling_rate: 0.95,
            epsilon: 1e-6,
            step_fraction: 0.1,
            stall_window: 10,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
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

    pub fn with_stall_window(mut self, window: usize) -> Self {
        self.stall_window = window;
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
        require_positive("initial_temperature", self.initial_temperature)?;
        require_positive("cooling_rate", self.cooling_rate)?;
        require_positive("epsilon", self.epsilon)?;
        require_positive("step_fraction", self.step_fraction)?;
        if self.stall_window == 0 {
            return Err(Error::config("stall_window", "must be at least 1"));
        }
        Ok(())
    }

    /// Number of iterations before the temperature drops below
    /// `epsilon`: the first `k` with `T0 * rate^k < epsilon`. `None` when
    /// the temperature never gets there.
    pub fn temperature_steps(&self) -> Option<usize> {
        let rate = self.cooling_rate;
        let cools = rate > 0.0 && rate < 1.0;
        if !cools || !(self.epsilon > 0.0) || !self.initial_temperature.is_finite() {
            return None;
        }
        let below = |k: usize| self.initial_temperature * rate.powf(k as f64) < self.epsilon;

        let estimate = (self.epsilon / self.initial_temperature).ln() / rate.ln();
        let mut steps = if estimate > 0.0 {
            estimate.floor() as usize + 1
        } else {
            0
        };
        // the logarithms can land one off an exact power
        while steps > 0 && below(steps - 1) {
            steps -= 1;
        }
        while !below(steps) {
            steps += 1;
        }
        Some(steps)
    }
}
