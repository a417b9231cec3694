//! Points, samples, run history and results.

use std::ops::Deref;
use std::sync::Arc;

/// An immutable point in the search space.
///
/// Coordinates live behind an `Arc`, so cloning a point (e.g. into the
/// history) shares storage instead of copying it. Each search step
/// builds a new point; nothing mutates one after creation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Point(Arc<[f64]>);

impl Point {
    /// Number of coordinates.
    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    /// The coordinates as a slice.
    pub fn coords(&self) -> &[f64] {
        &self.0
    }

    /// Builds a copy with coordinate `dimension` replaced by `value`.
    pub fn with_coord(&self, dimension: usize, value: f64) -> Point {
        let mut coords = self.0.to_vec();
        coords[dimension] = value;
        coords.into()
    }
}

impl Deref for Point {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for Point {
    fn from(coords: Vec<f64>) -> Self {
        Point(coords.into())
    }
}

impl From<&[f64]> for Point {
    fn from(coords: &[f64]) -> Self {
        Point(coords.into())
    }
}

/// A point together with its objective value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub point: Point,
    pub value: f64,
}

/// Append-only log of the samples visited by a run.
///
/// Entry 0 is the initial sample; every iteration appends exactly one
/// entry holding the current point after that iteration's decision.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct History {
    samples: Vec<Sample>,
}

impl History {
    pub(crate) fn start(initial: Sample, capacity: usize) -> Self {
        let mut samples = Vec::with_capacity(capacity.saturating_add(1).min(1 << 16));
        samples.push(initial);
        Self { samples }
    }

    pub(crate) fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// Objective values in recording order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.value)
    }

    /// The sample with the lowest value (earliest on ties).
    pub fn best(&self) -> Option<&Sample> {
        self.samples
            .iter()
            .reduce(|best, s| if s.value < best.value { s } else { best })
    }

    /// Whether the last two recorded values differ by less than `epsilon`.
    pub fn settled(&self, epsilon: f64) -> bool {
        match self.samples.as_slice() {
            [.., previous, latest] => (previous.value - latest.value).abs() < epsilon,
            _ => false,
        }
    }

    /// Whether more than `window` samples exist and the sample `window`
    /// positions from the end is within `epsilon` of the latest one.
    pub fn stalled(&self, window: usize, epsilon: f64) -> bool {
        let n = self.samples.len();
        if window == 0 || n <= window {
            return false;
        }
        (self.samples[n - window].value - self.samples[n - 1].value).abs() < epsilon
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// The iteration cap was reached.
    MaxIterations,
    /// No coordinate step improved the current point (hill climbing).
    NoImprovingMove,
    /// Recorded values stopped changing by at least epsilon.
    Converged,
    /// Annealing temperature fell below epsilon.
    TemperatureFloor,
}

/// Outcome of a single search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult {
    /// Best point found.
    pub best: Point,

    /// Objective value at `best`.
    pub best_value: f64,

    /// Every recorded sample, initial sample first.
    pub history: History,

    /// Iterations executed (`history.len() - 1`).
    pub iterations: usize,

    /// Objective evaluations, including the initial one.
    pub evaluations: usize,

    /// Candidates adopted as the current point.
    pub accepted_moves: usize,

    /// Accepted candidates that were strictly better than the current point.
    pub improving_moves: usize,

    pub stop_reason: StopReason,
}
