//! Hill Climbing (HC).
//!
//! Deterministic coordinate-wise descent from a random start. Each
//! iteration walks the dimensions in order and takes the first forward
//! or backward step (a fixed fraction of the dimension's width) that
//! strictly lowers the objective. The run ends at a point where no such
//! step exists.

mod config;
mod runner;

pub use config::HcConfig;
pub use runner::HillClimber;
