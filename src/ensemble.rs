//! Repeated independent runs of a search.
//!
//! Runs share no mutable state: each trial receives its own seed and
//! builds its own random source, point and history. With the `parallel`
//! feature the trials are spread over rayon's thread pool; results are
//! identical to a sequential run with the same seeds.

use crate::error::{Error, Result};
use crate::problem::RunResult;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs a search several times with consecutive seeds.
///
/// # Examples
///
/// ```
/// use u_localsearch::ensemble::Ensemble;
/// use u_localsearch::hc::{HcConfig, HillClimber};
/// use u_localsearch::problem::Bounds;
///
/// let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
/// let bounds = Bounds::uniform(2, -5.0, 5.0).unwrap();
///
/// let report = Ensemble::default()
///     .with_trials(20)
///     .run(|seed| HillClimber::run(&sphere, &bounds, &HcConfig::default().with_seed(seed)))
///     .unwrap();
/// assert_eq!(report.results().len(), 20);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ensemble {
    /// Number of runs. Must be positive.
    pub trials: usize,

    /// Seed of trial 0; trial `i` uses `base_seed + i` (wrapping).
    pub base_seed: u64,

    /// Whether to run trials concurrently. Ignored without the
    /// `parallel` feature.
    pub parallel: bool,
}

impl Default for Ensemble {
    fn default() -> Self {
        Self {
            trials: 100,
            base_seed: 0,
            parallel: true,
        }
    }
}

impl Ensemble {
    pub fn with_trials(mut self, n: usize) -> Self {
        self.trials = n;
        self
    }

    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Seed handed to trial `index`.
    pub fn seed(&self, index: usize) -> u64 {
        self.base_seed.wrapping_add(index as u64)
    }

    /// Runs `trial` once per seed and collects the results in trial order.
    ///
    /// # Errors
    ///
    /// Fails when `trials` is zero, or with the error of a failing trial.
    pub fn run<T>(&self, trial: T) -> Result<EnsembleReport>
    where
        T: Fn(u64) -> Result<RunResult> + Sync + Send,
    {
        if self.trials == 0 {
            return Err(Error::config("trials", "must be positive"));
        }

        debug!(
            trials = self.trials,
            base_seed = self.base_seed,
            parallel = self.parallel,
            "ensemble started"
        );

        let results = if self.parallel {
            self.run_parallel(&trial)?
        } else {
            (0..self.trials)
                .map(|i| trial(self.seed(i)))
                .collect::<Result<Vec<_>>>()?
        };

        let report = EnsembleReport { results };
        debug!(
            mean_best_value = report.mean_best_value(),
            "ensemble finished"
        );
        Ok(report)
    }

    #[cfg(feature = "parallel")]
    fn run_parallel<T>(&self, trial: &T) -> Result<Vec<RunResult>>
    where
        T: Fn(u64) -> Result<RunResult> + Sync + Send,
    {
        (0..self.trials)
            .into_par_iter()
            .map(|i| trial(self.seed(i)))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn run_parallel<T>(&self, trial: &T) -> Result<Vec<RunResult>>
    where
        T: Fn(u64) -> Result<RunResult> + Sync + Send,
    {
        (0..self.trials).map(|i| trial(self.seed(i))).collect()
    }
}

/// Results of an [`Ensemble`], in trial order.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnsembleReport {
    results: Vec<RunResult>,
}

impl EnsembleReport {
    pub fn results(&self) -> &[RunResult] {
        &self.results
    }

    /// The run with the lowest best value.
    pub fn best(&self) -> Option<&RunResult> {
        self.results
            .iter()
            .min_by(|a, b| a.best_value.total_cmp(&b.best_value))
    }

    /// Mean of the per-run best values.
    pub fn mean_best_value(&self) -> f64 {
        if self.results.is_empty() {
            return f64::NAN;
        }
        self.results.iter().map(|r| r.best_value).sum::<f64>() / self.results.len() as f64
    }

    /// Fraction of runs whose best value is below `threshold`.
    pub fn success_rate(&self, threshold: f64) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        let hits = self
            .results
            .iter()
            .filter(|r| r.best_value < threshold)
            .count();
        hits as f64 / self.results.len() as f64
    }

    pub fn into_results(self) -> Vec<RunResult> {
        self.results
    }
}
