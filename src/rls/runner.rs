//! RLS execution loop.

use super::config::RlsConfig;
use super::neighborhood::Neighborhood;
use crate::error::Result;
use crate::problem::{
    check_start, Bounds, Evaluator, History, Objective, Point, RunResult, StopReason,
};
use crate::rng::rng_for;
use rand::Rng;
use tracing::{debug, trace};

/// Executes random local search with an adaptive neighborhood.
pub struct RandomLocalSearch;

impl RandomLocalSearch {
    /// Runs RLS with a random source seeded from `config.seed`.
    pub fn run<F: Objective + ?Sized>(
        objective: &F,
        bounds: &Bounds,
        config: &RlsConfig,
    ) -> Result<RunResult> {
        let mut rng = rng_for(config.seed);
        Self::run_with_rng(objective, bounds, config, &mut rng)
    }

    /// Runs RLS drawing the start point and every perturbation from `rng`.
    pub fn run_with_rng<F: Objective + ?Sized, R: Rng>(
        objective: &F,
        bounds: &Bounds,
        config: &RlsConfig,
        rng: &mut R,
    ) -> Result<RunResult> {
        config.validate()?;
        let start = bounds.sample(rng);
        search(objective, bounds, config, start, rng)
    }

    /// Runs RLS from a fixed start point.
    pub fn run_from<F: Objective + ?Sized, R: Rng>(
        objective: &F,
        bounds: &Bounds,
        config: &RlsConfig,
        start: Point,
        rng: &mut R,
    ) -> Result<RunResult> {
        config.validate()?;
        check_start(bounds, &start)?;
        search(objective, bounds, config, start, rng)
    }
}

fn search<F: Objective + ?Sized, R: Rng>(
    objective: &F,
    bounds: &Bounds,
    config: &RlsConfig,
    start: Point,
    rng: &mut R,
) -> Result<RunResult> {
    let mut eval = Evaluator::new(objective, bounds)?;
    let mut current = eval.sample(start)?;
    let mut history = History::start(current.clone(), config.max_iterations);
    let mut neighborhood = Neighborhood::new(config);
    let mut moves = 0usize;
    let mut stop_reason = StopReason::MaxIterations;

    debug!(
        dimensions = bounds.dimensions(),
        max_iterations = config.max_iterations,
        initial_value = current.value,
        "random local search started"
    );

    for iteration in 0..config.max_iterations {
        let candidate = eval.sample(neighborhood.perturb(bounds, &current.point, rng))?;

        if candidate.value < current.value {
            current = candidate;
            neighborhood.shrink();
            moves += 1;
            trace!(
                iteration,
                value = current.value,
                radius = neighborhood.radius(),
                "candidate accepted"
            );
        } else {
            neighborhood.grow();
        }

        history.push(current.clone());

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
        final_radius = neighborhood.radius(),
        "random local search finished"
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
