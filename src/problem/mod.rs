//! Shared data model: objective, bounds, samples, history and results.
//!
//! All three runners consume an [`Objective`] over a [`Bounds`] box and
//! produce a [`RunResult`]. They share nothing else.

mod bounds;
mod objective;
mod sample;

pub use bounds::Bounds;
pub use objective::Objective;
pub use sample::{History, Point, RunResult, Sample, StopReason};

pub(crate) use objective::{check_start, Evaluator};
