//! Random Local Search (RLS).
//!
//! Stochastic neighborhood search. Each iteration perturbs every
//! coordinate of the current point by a uniform offset within the
//! current radius. Improvements are accepted and tighten the radius;
//! rejections widen it up to a cap.

mod config;
mod neighborhood;
mod runner;

pub use config::RlsConfig;
pub use neighborhood::Neighborhood;
pub use runner::RandomLocalSearch;
