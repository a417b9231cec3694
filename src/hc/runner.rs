//! HC execution loop.

use super::config::HcConfig;
use crate::error::Result;
use crate::problem::{
    check_start, Bounds, Evaluator, History, Objective, Point, RunResult, Sample, StopReason,
};
use crate::rng::rng_for;
use rand::Rng;
use tracing::{debug, trace};

/// Executes coordinate-wise hill climbing.
pub struct HillClimber;

impl HillClimber {
    /// Runs HC from a random start drawn with `config.seed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_localsearch::hc::{HcConfig, HillClimber};
    /// use u_localsearch::problem::Bounds;
    ///
    /// let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
    /// let bounds = Bounds::uniform(2, -5.0, 5.0).unwrap();
    /// let result = HillClimber::run(&sphere, &bounds, &HcConfig::default().with_seed(1)).unwrap();
    ///
    /// assert!(result.best_value <= 5.1e-3);
    /// ```
    pub fn run<F: Objective + ?Sized>(
        objective: &F,
        bounds: &Bounds,
        config: &HcConfig,
    ) -> Result<RunResult> {
        let mut rng = rng_for(config.seed);
        Self::run_with_rng(objective, bounds, config, &mut rng)
    }

    /// Runs HC from a start point drawn from `rng`.
    pub fn run_with_rng<F: Objective + ?Sized, R: Rng>(
        objective: &F,
        bounds: &Bounds,
        config: &HcConfig,
        rng: &mut R,
    ) -> Result<RunResult> {
        config.validate()?;
        let start = bounds.sample(rng);
        climb(objective, bounds, config, start)
    }

    /// Runs HC from a fixed start point. Fully deterministic.
    pub fn run_from<F: Objective + ?Sized>(
        objective: &F,
        bounds: &Bounds,
        config: &HcConfig,
        start: Point,
    ) -> Result<RunResult> {
        config.validate()?;
        check_start(bounds, &start)?;
        climb(objective, bounds, config, start)
    }
}

fn climb<F: Objective + ?Sized>(
    objective: &F,
    bounds: &Bounds,
    config: &HcConfig,
    start: Point,
) -> Result<RunResult> {
    let mut eval = Evaluator::new(objective, bounds)?;
    let mut current = eval.sample(start)?;
    let mut history = History::start(current.clone(), config.max_iterations);
    let mut moves = 0usize;
    let mut stop_reason = StopReason::MaxIterations;

    debug!(
        dimensions = bounds.dimensions(),
        max_iterations = config.max_iterations,
        initial_value = current.value,
        "hill climbing started"
    );

    for iteration in 0..config.max_iterations {
        let next = first_improvement(&mut eval, bounds, &current, config.step_fraction)?;
        let improved = next.is_some();
        if let Some(next) = next {
            trace!(iteration, value = next.value, "step accepted");
            current = next;
            moves += 1;
        }

        history.push(current.clone());

        if !improved {
            stop_reason = StopReason::NoImprovingMove;
            break;
        }
        if history.settled(config.epsilon) {
            stop_reason = StopReason::Converged;
            break;
        }
    }

    let iterations = history.len() - 1;
    debug!(
        ?stop_reason,
        iterations,
        best_value = current.value,
        "hill climbing finished"
    );

    Ok(RunResult {
        best: current.point,
        best_value: current.value,
        history,
        iterations,
        evaluations: eval.evaluations(),
        accepted_moves: moves,
        improving_moves: moves,
        stop_reason,
    })
}

/// Tries `+step` then `-step` along each dimension in order and returns
/// the first candidate strictly better than `current`.
fn first_improvement<F: Objective + ?Sized>(
    eval: &mut Evaluator<'_, F>,
    bounds: &Bounds,
    current: &Sample,
    step_fraction: f64,
) -> Result<Option<Sample>> {
    for dim in 0..bounds.dimensions() {
        let step = bounds.width(dim) * step_fraction;
        for delta in [step, -step] {
            let coord = bounds.clamp(dim, current.point[dim] + delta);
            let candidate = eval.sample(current.point.with_coord(dim, coord))?;
            if candidate.value < current.value {
                return Ok(Some(candidate));
            }
        }
    }
    Ok(None)
}
