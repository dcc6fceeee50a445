//! Curioso: curiosity-driven particle swarm optimization.
//!
//! A population-based optimizer for black-box, real-valued objectives
//! over bounded domains, augmented with a diversification ("curiosity")
//! mechanism: stagnating particles receive a kernel-weighted impulse
//! computed against previously visited and currently crowded regions,
//! gated by a decaying energy ("gas") budget that shrinks as the run
//! matures.
//!
//! # Quick Start
//!
//! ```
//! use curioso::prelude::*;
//!
//! // Minimize the 2-D sphere function.
//! let sphere = |x: &[f64], _best: f64| (x.iter().map(|xi| xi * xi).sum::<f64>(), 0.0);
//!
//! let bounds = Bounds::uniform(2, -5.0, 5.0).unwrap();
//! let mut swarm = Swarm::new(30, bounds, SeededSource::new(42)).unwrap();
//!
//! let result = swarm
//!     .run(&sphere, &SwarmParams::default(), &StoppingRule::generations(200))
//!     .unwrap();
//! assert!(result.best_fitness < 1e-2);
//! ```
//!
//! # Modules
//!
//! - [`bounds`]: Validated per-dimension search-domain limits
//! - [`particle`]: Particle state, velocity/position dynamics, curiosity
//!   geometry, energy budget, Gaussian mutation
//! - [`swarm`]: Population management, generation loop, stopping rules
//! - [`objective`]: External evaluator capability
//! - [`random`]: Injected random-source capability (seeded, reproducible)
//! - [`benchmarks`]: Standard test functions (sphere, Rastrigin, ...)
//! - [`error`]: Error types
//!
//! # Design
//!
//! The objective evaluator and the random source are injected
//! capabilities; the core never touches a global generator or performs
//! I/O. With a fixed seed, runs are reproducible bit-for-bit.

pub mod benchmarks;
pub mod bounds;
pub mod error;
pub mod objective;
pub mod particle;
pub mod random;
pub mod swarm;

pub use bounds::Bounds;
pub use error::{CuriosoError, Result};
pub use objective::Objective;
pub use particle::Particle;
pub use random::{RandomSource, SeededSource};
pub use swarm::{RunResult, StoppingRule, Swarm, SwarmParams, TerminationReason};

/// Convenience re-exports for typical use.
pub mod prelude {
    pub use crate::bounds::Bounds;
    pub use crate::error::{CuriosoError, Result};
    pub use crate::objective::Objective;
    pub use crate::particle::Particle;
    pub use crate::random::{RandomSource, SeededSource};
    pub use crate::swarm::{RunResult, StoppingRule, Swarm, SwarmParams, TerminationReason};
}
