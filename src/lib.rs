//! Bounded continuous minimization by local search heuristics.
//!
//! Provides three black-box searches over a box-constrained real vector:
//!
//! - **Hill Climbing (HC)**: Deterministic coordinate-wise descent with
//!   first-improvement steps of a fixed fraction of each dimension.
//! - **Random Local Search (RLS)**: Uniform perturbation within an
//!   adaptive radius that shrinks on success and grows (capped) on failure.
//! - **Simulated Annealing (SA)**: Temperature-scaled perturbation with
//!   Metropolis acceptance of worsening moves and geometric cooling.
//!
//! Every run returns a [`RunResult`](problem::RunResult): the best point,
//! its value and the full [`History`](problem::History) of the trajectory.
//! The [`ensemble`] module repeats a search over a range of seeds.
//!
//! # Architecture
//!
//! The runners share only the data model in [`problem`] and the error
//! type in [`error`]. Each run owns its random source, point and history,
//! so independent runs can execute concurrently. The crate performs no
//! I/O; rendering a history is left to the caller.
//!
//! # Features
//!
//! | Flag | What it enables |
//! |------|-----------------|
//! | `parallel` | Concurrent [`ensemble`] trials via rayon |
//! | `serde` | `Serialize`/`Deserialize` on configs, bounds and results |
//!
//! # Example
//!
//! ```
//! use u_localsearch::hc::{HcConfig, HillClimber};
//! use u_localsearch::problem::Bounds;
//! use u_localsearch::rls::{RandomLocalSearch, RlsConfig};
//! use u_localsearch::sa::{SaConfig, SimulatedAnnealing};
//!
//! let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
//! let bounds = Bounds::new(vec![(-5.0, 5.0), (-5.0, 5.0)])?;
//!
//! let hc = HillClimber::run(&sphere, &bounds, &HcConfig::default().with_seed(1))?;
//! let rls = RandomLocalSearch::run(&sphere, &bounds, &RlsConfig::default().with_seed(1))?;
//! let sa = SimulatedAnnealing::run(&sphere, &bounds, &SaConfig::default().with_seed(1))?;
//!
//! for result in [&hc, &rls, &sa] {
//!     assert!(bounds.contains(&result.best));
//! }
//! # Ok::<(), u_localsearch::error::Error>(())
//! ```

pub mod ensemble;
pub mod error;
pub mod hc;
pub mod problem;
pub mod rls;
pub mod rng;
pub mod sa;

pub use error::{Error, Result};
