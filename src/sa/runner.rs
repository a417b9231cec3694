//! SA execution loop.

use super::config::SaConfig;
use crate::error::Result;
use crate::problem::{
    check_start, Bounds, Evaluator, History, Objective, Point, RunResult, StopReason,
};
use crate::rng::rng_for;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, trace, warn};

/// Executes the Simulated Annealing algorithm.
pub struct SimulatedAnnealing;

impl SimulatedAnnealing {
    /// Runs SA with a random source seeded from `config.seed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_localsearch::problem::Bounds;
    /// use u_localsearch::sa::{SaConfig, SimulatedAnnealing};
    ///
    /// let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
    /// let bounds = Bounds::uniform(2, -5.0, 5.0).unwrap();
    /// let config = SaConfig::default().with_seed(42);
    /// let result = SimulatedAnnealing::run(&sphere, &bounds, &config).unwrap();
    ///
    /// let lowest = result.history.values().fold(f64::INFINITY, f64::min);
    /// assert_eq!(result.best_value, lowest);
    /// ```
    pub fn run<F: Objective + ?Sized>(
        objective: &F,
        bounds: &Bounds,
        config: &SaConfig,
    ) -> Result<RunResult> {
        let mut rng = rng_for(config.seed);
        Self::run_with_rng(objective, bounds, config, &mut rng)
    }

    /// Runs SA drawing the start point, candidates and acceptance tests
    /// from `rng`.
    pub fn run_with_rng<F: Objective + ?Sized, R: Rng>(
        objective: &F,
        bounds: &Bounds,
        config: &SaConfig,
        rng: &mut R,
    ) -> Result<RunResult> {
        config.validate()?;
        let start = bounds.sample(rng);
        anneal(objective, bounds, config, start, rng)
    }

    /// Runs SA from a fixed start point.
    pub fn run_from<F: Objective + ?Sized, R: Rng>(
        objective: &F,
        bounds: &Bounds,
        config: &SaConfig,
        start: Point,
        rng: &mut R,
    ) -> Result<RunResult> {
        config.validate()?;
        check_start(bounds, &start)?;
        anneal(objective, bounds, config, start, rng)
    }
}

fn anneal<F: Objective + ?Sized, R: Rng>(
    objective: &F,
    bounds: &Bounds,
    config: &SaConfig,
    start: Point,
    rng: &mut R,
) -> Result<RunResult> {
    warn_if_not_cooling(config.cooling_rate);

    let mut eval = Evaluator::new(objective, bounds)?;
    let mut current = eval.sample(start)?;
    let mut best = current.clone();
    let mut history = History::start(current.clone(), config.max_iterations);

    let mut temperature = config.initial_temperature;
    let mut accepted_moves = 0usize;
    let mut improving_moves = 0usize;
    let mut stop_reason = StopReason::MaxIterations;

    debug!(
        dimensions = bounds.dimensions(),
        max_iterations = config.max_iterations,
        initial_temperature = config.initial_temperature,
        cooling_rate = config.cooling_rate,
        initial_value = current.value,
        "simulated annealing started"
    );

    for iteration in 0..config.max_iterations {
        if temperature < config.epsilon {
            stop_reason = StopReason::TemperatureFloor;
            break;
        }

        let scale = config.step_fraction * temperature / config.initial_temperature;
        let candidate = eval.sample(neighbor(bounds, &current.point, scale, rng))?;

        if candidate.value < current.value {
            improving_moves += 1;
            accepted_moves += 1;
            if candidate.value < best.value {
                trace!(iteration, value = candidate.value, temperature, "new best");
                best = candidate.clone();
            }
            current = candidate;
        } else {
            // Metropolis acceptance criterion
            let delta = candidate.value - current.value;
            let probability = (-delta / temperature).exp();
            if rng.random_range(0.0..1.0) < probability {
                current = candidate;
                accepted_moves += 1;
            }
        }

        history.push(current.clone());
        temperature *= config.cooling_rate;

        if history.settled(config.epsilon)
            && history.stalled(config.stall_window, config.epsilon)
        {
            stop_reason = StopReason::Converged;
            break;
        }
    }

    let iterations = history.len() - 1;
    debug!(
        ?stop_reason,
        iterations,
        best_value = best.value,
        final_temperature = temperature,
        accepted_moves,
        "simulated annealing finished"
    );

    Ok(RunResult {
        best: best.point,
        best_value: best.value,
        history,
        iterations,
        evaluations: eval.evaluations(),
        accepted_moves,
        improving_moves,
        stop_reason,
    })
}

static NON_COOLING_WARNED: AtomicBool = AtomicBool::new(false);

/// Warns about a cooling rate of 1 or more, once per process, so that
/// ensembles of such runs log it a single time. Returns whether it logged.
fn warn_if_not_cooling(cooling_rate: f64) -> bool {
    if cooling_rate < 1.0 || NON_COOLING_WARNED.swap(true, Ordering::Relaxed) {
        return false;
    }
    warn!(cooling_rate, "cooling rate >= 1, temperature will not decrease");
    true
}

/// Offsets each coordinate uniformly within `±scale * width(dim)` and
/// clamps into `bounds`.
///
/// The step is capped at `f64::MAX` so a growing temperature or a large
/// `step_fraction` never yields an infinite range.
fn neighbor<R: Rng>(bounds: &Bounds, point: &[f64], scale: f64, rng: &mut R) -> Point {
    point
        .iter()
        .enumerate()
        .map(|(dim, &x)| {
            let step = (bounds.width(dim) * scale).min(f64::MAX);
            bounds.clamp(dim, x + step * rng.random_range(-1.0..=1.0))
        })
        .collect::<Vec<_>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::rng::create_rng;

    fn sphere(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    fn box2() -> Bounds {
        Bounds::uniform(2, -5.0, 5.0).unwrap()
    }

    #[test]
    fn test_sa_best_is_history_minimum() {
        for seed in 0..20 {
            let config = SaConfig::default().with_seed(seed);
            let result = SimulatedAnnealing::run(&sphere, &box2(), &config).unwrap();
            let lowest = result.history.best().unwrap();
            assert_eq!(result.best_value, lowest.value, "seed {seed}");
            assert_eq!(result.best, lowest.point, "seed {seed}");
            assert!(result.history.values().all(|v| result.best_value <= v));
        }
    }

    #[test]
    fn test_sa_sphere_improves_on_start() {
        let config = SaConfig::default().with_seed(42);
        let result = SimulatedAnnealing::run(&sphere, &box2(), &config).unwrap();
        assert!(result.best_value <= result.history.first().unwrap().value);
        assert!(result.improving_moves > 0);
        assert!(result.accepted_moves >= result.improving_moves);
    }

    #[test]
    fn test_sa_temperature_floor_default_schedule() {
        let config = SaConfig::default().with_max_iterations(100_000);
        let steps = config.temperature_steps().unwrap();
        for seed in 0..10 {
            let result =
                SimulatedAnnealing::run(&sphere, &box2(), &config.clone().with_seed(seed)).unwrap();
            assert!(
                result.iterations <= steps,
                "expected <= {steps} iterations, got {}",
                result.iterations
            );
            assert_ne!(result.stop_reason, StopReason::MaxIterations);
        }
    }

    #[test]
    fn test_sa_temperature_floor_exact() {
        // T: 1, 0.5, 0.25, 0.125, then 0.0625 < 0.1
        let config = SaConfig::default()
            .with_initial_temperature(1.0)
            .with_cooling_rate(0.5)
            .with_epsilon(0.1)
            .with_seed(4);
        let result = SimulatedAnnealing::run(&sphere, &box2(), &config).unwrap();
        assert_eq!(result.iterations, 4);
        assert_eq!(result.history.len(), 5);
        assert_eq!(result.evaluations, 5);
        assert_eq!(result.stop_reason, StopReason::TemperatureFloor);
    }

    #[test]
    fn test_sa_floor_on_exact_power() {
        // T reaches 0.125 exactly at k = 3, which is not below the floor
        let config = SaConfig::default()
            .with_initial_temperature(1.0)
            .with_cooling_rate(0.5)
            .with_epsilon(0.125)
            .with_seed(8);
        let result = SimulatedAnnealing::run(&sphere, &box2(), &config).unwrap();
        assert_eq!(result.stop_reason, StopReason::TemperatureFloor);
        assert_eq!(Some(result.iterations), config.temperature_steps());
        assert_eq!(result.iterations, 4);
    }

    #[test]
    fn test_sa_huge_steps_stay_finite() {
        let bounds = Bounds::new(vec![(-8e307, 8e307), (0.0, 0.0)]).unwrap();
        let f = |x: &[f64]| (x[0] / 1e307).abs();
        let config = SaConfig::default()
            .with_step_fraction(1e300)
            .with_max_iterations(50)
            .with_seed(6);
        let start = vec![0.0, 0.0].into();
        let result =
            SimulatedAnnealing::run_from(&f, &bounds, &config, start, &mut create_rng(6)).unwrap();
        assert!(result.history.iter().all(|s| bounds.contains(&s.point)));

        // a growing temperature eventually overflows the scale
        let config = SaConfig::default()
            .with_initial_temperature(1.0)
            .with_cooling_rate(1e10)
            .with_max_iterations(50)
            .with_seed(6);
        let result = SimulatedAnnealing::run(&sphere, &box2(), &config).unwrap();
        assert!(result.history.iter().all(|s| box2().contains(&s.point)));
    }

    #[test]
    fn test_non_cooling_warning_logged_once() {
        assert!(!warn_if_not_cooling(0.95));
        warn_if_not_cooling(1.5);
        assert!(!warn_if_not_cooling(1.5));
        assert!(!warn_if_not_cooling(2.0));
    }

    #[test]
    fn test_sa_stall_needs_window() {
        // Every candidate ties and is accepted (exp(0) = 1), so consecutive
        // values always match; the run ends once the window is filled.
        let f = |_: &[f64]| 2.5;
        let config = SaConfig::default().with_seed(0);
        let result = SimulatedAnnealing::run(&f, &box2(), &config).unwrap();
        assert_eq!(result.history.len(), 11);
        assert_eq!(result.stop_reason, StopReason::Converged);
        assert_eq!(result.accepted_moves, 10);
        assert_eq!(result.improving_moves, 0);
    }

    #[test]
    fn test_sa_accepts_uphill_at_high_temperature() {
        let f = |x: &[f64]| x[0];
        let bounds = Bounds::uniform(1, -10.0, 10.0).unwrap();
        let config = SaConfig::default()
            .with_initial_temperature(1e9)
            .with_cooling_rate(0.99)
            .with_max_iterations(200)
            .with_seed(42);
        let result = SimulatedAnnealing::run(&f, &bounds, &config).unwrap();
        let uphill = result.accepted_moves - result.improving_moves;
        assert!(uphill > 50, "expected many uphill moves, got {uphill}");
    }

    #[test]
    fn test_sa_rejects_uphill_when_cold() {
        // With T0 tiny relative to any value change, worsening moves
        // are essentially never taken.
        let f = |x: &[f64]| 1e6 * x[0];
        let bounds = Bounds::uniform(1, 0.0, 1.0).unwrap();
        let config = SaConfig::default()
            .with_initial_temperature(1e-3)
            .with_epsilon(1e-9)
            .with_cooling_rate(0.999)
            .with_max_iterations(50);
        let mut rng = create_rng(6);
        let result =
            SimulatedAnnealing::run_from(&f, &bounds, &config, vec![0.5].into(), &mut rng).unwrap();
        for window in result.history.as_slice().windows(2) {
            assert!(window[1].value <= window[0].value);
        }
    }

    #[test]
    fn test_sa_step_shrinks_with_temperature() {
        // Cold start: T / T0 stays ~1 with a slow rate, so steps are at
        // most 10% of the width.
        let f = |x: &[f64]| x[0];
        let bounds = Bounds::uniform(1, -10.0, 10.0).unwrap();
        let config = SaConfig::default()
            .with_initial_temperature(1e12)
            .with_cooling_rate(0.5)
            .with_max_iterations(30)
            .with_seed(1);
        let result = SimulatedAnnealing::run(&f, &bounds, &config).unwrap();
        let mut bound = 2.0;
        for window in result.history.as_slice().windows(2) {
            assert!((window[1].point[0] - window[0].point[0]).abs() <= bound + 1e-12);
            bound *= 0.5;
        }
    }

    #[test]
    fn test_sa_seed_deterministic() {
        let config = SaConfig::default().with_seed(99);
        let a = SimulatedAnnealing::run(&sphere, &box2(), &config).unwrap();
        let b = SimulatedAnnealing::run(&sphere, &box2(), &config).unwrap();
        assert_eq!(a.history, b.history);
        assert_eq!(a.best, b.best);
    }

    #[test]
    fn test_sa_run_from_deterministic() {
        let config = SaConfig::default();
        let start: Point = vec![4.5, -4.5].into();
        let run = |start: Point| {
            SimulatedAnnealing::run_from(&sphere, &box2(), &config, start, &mut create_rng(5))
        };
        let (a, b) = (run(start.clone()), run(start));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a.history, b.history);
        assert_eq!(a.history.first().unwrap().point.coords(), &[4.5, -4.5]);
    }

    #[test]
    fn test_sa_invalid_config() {
        let config = SaConfig::default().with_initial_temperature(0.0);
        let err = SimulatedAnnealing::run(&sphere, &box2(), &config).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfig {
                field: "initial_temperature",
                ..
            }
        ));
    }

    #[test]
    fn test_sa_non_finite_objective() {
        let f = |x: &[f64]| if x[0] > 4.0 { f64::INFINITY } else { 0.0 };
        let bounds = Bounds::uniform(1, -5.0, 5.0).unwrap();
        let err = SimulatedAnnealing::run_from(
            &f,
            &bounds,
            &SaConfig::default(),
            vec![4.5].into(),
            &mut create_rng(0),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NonFiniteValue { .. }));
    }
}
