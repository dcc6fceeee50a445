//! Swarm-level coordination: population management, generation-best
//! tracking, and the optimization loop.
//!
//! Each generation has two sequential phases: a read-only scan for the
//! lowest-fitness particle, then an update pass over every particle
//! against an immutable snapshot of that best position. Particles never
//! receive a live view of another particle's mutable state.

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::error::{CuriosoError, Result};
use crate::objective::Objective;
use crate::particle::Particle;
use crate::random::RandomSource;

/// Per-generation update coefficients.
///
/// # Example
///
/// ```
/// use curioso::SwarmParams;
///
/// let params = SwarmParams::default()
///     .with_inertia(0.6)
///     .with_curiosity(true);
/// assert_eq!(params.inertia, 0.6);
/// assert!(params.curiosity);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwarmParams {
    /// Fraction of the previous velocity retained (default: 0.7)
    pub inertia: f64,
    /// Pull toward the particle's own best position (default: 1.5)
    pub self_confidence: f64,
    /// Pull toward the generation-best position (default: 1.5)
    pub swarm_confidence: f64,
    /// Scale of the curiosity impulse (default: 1.0)
    pub adventure_sense: f64,
    /// Whether the curiosity impulse is applied (default: false)
    #[serde(default)]
    pub curiosity: bool,
    /// Opaque scalar forwarded to the objective evaluator (default: 0.0)
    #[serde(default)]
    pub best_known_value: f64,
}

impl Default for SwarmParams {
    fn default() -> Self {
        Self {
            inertia: 0.7,
            self_confidence: 1.5,
            swarm_confidence: 1.5,
            adventure_sense: 1.0,
            curiosity: false,
            best_known_value: 0.0,
        }
    }
}

impl SwarmParams {
    /// Set the inertia factor.
    #[must_use]
    pub fn with_inertia(mut self, inertia: f64) -> Self {
        self.inertia = inertia;
        self
    }

    /// Set the pull toward the personal best.
    #[must_use]
    pub fn with_self_confidence(mut self, self_confidence: f64) -> Self {
        self.self_confidence = self_confidence;
        self
    }

    /// Set the pull toward the generation best.
    #[must_use]
    pub fn with_swarm_confidence(mut self, swarm_confidence: f64) -> Self {
        self.swarm_confidence = swarm_confidence;
        self
    }

    /// Set the curiosity impulse scale.
    #[must_use]
    pub fn with_adventure_sense(mut self, adventure_sense: f64) -> Self {
        self.adventure_sense = adventure_sense;
        self
    }

    /// Enable or disable the curiosity impulse.
    #[must_use]
    pub fn with_curiosity(mut self, curiosity: bool) -> Self {
        self.curiosity = curiosity;
        self
    }

    /// Set the scalar forwarded to the objective evaluator.
    #[must_use]
    pub fn with_best_known_value(mut self, best_known_value: f64) -> Self {
        self.best_known_value = best_known_value;
        self
    }
}

/// When the generation loop stops.
///
/// A generation budget is always enforced; a stagnation window and a
/// target value are opt-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoppingRule {
    /// Hard cap on generations.
    pub max_generations: usize,
    /// Stop when the best-ever fitness improved by at most
    /// `stall_epsilon` over this many consecutive generations.
    #[serde(default)]
    pub stall_window: Option<usize>,
    /// Minimum improvement that counts as progress (default: 1e-8)
    pub stall_epsilon: f64,
    /// Stop when the best-ever fitness reaches this value within
    /// `target_tolerance`.
    #[serde(default)]
    pub target: Option<f64>,
    /// Tolerance for the target check (default: 1e-8)
    pub target_tolerance: f64,
}

impl Default for StoppingRule {
    fn default() -> Self {
        Self {
            max_generations: 100,
            stall_window: None,
            stall_epsilon: 1e-8,
            target: None,
            target_tolerance: 1e-8,
        }
    }
}

impl StoppingRule {
    /// Generation budget only.
    #[must_use]
    pub fn generations(max_generations: usize) -> Self {
        Self {
            max_generations,
            ..Self::default()
        }
    }

    /// Stop after `window` consecutive generations without meaningful
    /// improvement.
    #[must_use]
    pub fn with_stall_window(mut self, window: usize) -> Self {
        self.stall_window = Some(window);
        self
    }

    /// Set the improvement threshold for the stagnation check.
    #[must_use]
    pub fn with_stall_epsilon(mut self, epsilon: f64) -> Self {
        self.stall_epsilon = epsilon;
        self
    }

    /// Stop once the best fitness is within tolerance of `target`.
    #[must_use]
    pub fn with_target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the tolerance for the target check.
    #[must_use]
    pub fn with_target_tolerance(mut self, tolerance: f64) -> Self {
        self.target_tolerance = tolerance;
        self
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// The generation budget ran out.
    BudgetExhausted,
    /// No meaningful improvement over the stall window.
    Stagnated,
    /// The best fitness reached the target within tolerance.
    TargetReached,
}

/// Outcome of a run: best-ever solution plus convergence diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Best position ever observed across all generations.
    pub best_position: Vec<f64>,
    /// Fitness at `best_position`.
    pub best_fitness: f64,
    /// Generations actually run.
    pub generations: usize,
    /// Best-ever fitness after each generation.
    pub history: Vec<f64>,
    /// Why the loop stopped.
    pub termination: TerminationReason,
}

/// The full population: an ordered collection of particles sharing
/// dimensionality, bounds, and one injected random source.
///
/// # Example
///
/// ```
/// use curioso::{Bounds, SeededSource, StoppingRule, Swarm, SwarmParams};
///
/// let sphere = |x: &[f64], _best: f64| (x.iter().map(|xi| xi * xi).sum::<f64>(), 0.0);
/// let bounds = Bounds::uniform(2, -5.0, 5.0).unwrap();
/// let mut swarm = Swarm::new(30, bounds, SeededSource::new(42)).unwrap();
/// let result = swarm
///     .run(&sphere, &SwarmParams::default(), &StoppingRule::generations(200))
///     .unwrap();
/// assert!(result.best_fitness < 1e-2);
/// ```
#[derive(Debug, Clone)]
pub struct Swarm<R: RandomSource> {
    particles: Vec<Particle>,
    bounds: Bounds,
    rng: R,
}

impl<R: RandomSource> Swarm<R> {
    /// Build a population of `swarm_size` particles with sequential ids.
    ///
    /// # Errors
    ///
    /// [`CuriosoError::EmptySwarm`] when `swarm_size == 0`.
    pub fn new(swarm_size: usize, bounds: Bounds, mut rng: R) -> Result<Self> {
        if swarm_size == 0 {
            return Err(CuriosoError::EmptySwarm);
        }
        let particles = (0..swarm_size)
            .map(|id| Particle::new(id, &bounds, &mut rng))
            .collect();
        Ok(Self {
            particles,
            bounds,
            rng,
        })
    }

    /// Number of particles (fixed for the lifetime of the swarm).
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Always false; a swarm holds at least one particle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The shared search-domain bounds.
    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Read access to the population, in id order.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// The particle with the lowest fitness seen so far; ties keep the
    /// earliest-constructed (lowest-id) particle. O(population size).
    #[must_use]
    pub fn best(&self) -> &Particle {
        let mut best = &self.particles[0];
        for particle in &self.particles[1..] {
            if particle.fitness() < best.fitness() {
                best = particle;
            }
        }
        best
    }

    /// One generation: scan for the current best, then update every
    /// particle against an independent snapshot of its position.
    ///
    /// When curiosity is enabled, each particle receives the pre-update
    /// position snapshots of all *other* particles as repulsion
    /// candidates, so the minimum viable swarm size for curiosity is 11.
    ///
    /// A failing particle (evaluator error, under-sized curiosity sample)
    /// aborts only its own step; the remaining particles are still driven
    /// and the first error is returned afterwards.
    ///
    /// # Errors
    ///
    /// The first [`CuriosoError::Objective`] or
    /// [`CuriosoError::CuriositySample`] raised by any particle.
    pub fn update_swarm<O: Objective>(&mut self, objective: &O, params: &SwarmParams) -> Result<()> {
        let swarm_best = self.best().position().to_vec();
        let positions: Vec<Vec<f64>> = if params.curiosity {
            self.particles.iter().map(|p| p.position().to_vec()).collect()
        } else {
            Vec::new()
        };

        let mut first_error = None;
        for idx in 0..self.particles.len() {
            let candidates: Vec<Vec<f64>> = if params.curiosity {
                positions
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != idx)
                    .map(|(_, p)| p.clone())
                    .collect()
            } else {
                Vec::new()
            };

            let outcome = self.particles[idx].update(
                objective,
                params,
                &swarm_best,
                &candidates,
                &self.bounds,
                &mut self.rng,
            );
            if let Err(e) = outcome {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Drive [`update_swarm`] until a stopping rule fires, tracking the
    /// best `(fitness, position)` ever observed across generations (the
    /// per-generation best is only a snapshot in time).
    ///
    /// # Errors
    ///
    /// Propagates the first error surfaced by [`update_swarm`].
    ///
    /// [`update_swarm`]: Swarm::update_swarm
    pub fn run<O: Objective>(
        &mut self,
        objective: &O,
        params: &SwarmParams,
        stopping: &StoppingRule,
    ) -> Result<RunResult> {
        let mut best_fitness = f64::INFINITY;
        let mut best_position = self.particles[0].position().to_vec();
        let mut history = Vec::new();
        let mut generations = 0;
        let mut termination = TerminationReason::BudgetExhausted;

        for _ in 0..stopping.max_generations {
            self.update_swarm(objective, params)?;
            generations += 1;

            let generation_best = self.best();
            if generation_best.fitness() < best_fitness {
                best_fitness = generation_best.fitness();
                best_position = generation_best.position().to_vec();
            }
            history.push(best_fitness);

            if let Some(target) = stopping.target {
                if best_fitness <= target + stopping.target_tolerance {
                    termination = TerminationReason::TargetReached;
                    break;
                }
            }
            if let Some(window) = stopping.stall_window {
                if history.len() > window {
                    let before_window = history[history.len() - 1 - window];
                    if before_window - best_fitness <= stopping.stall_epsilon {
                        termination = TerminationReason::Stagnated;
                        break;
                    }
                }
            }
        }

        Ok(RunResult {
            best_position,
            best_fitness,
            generations,
            history,
            termination,
        })
    }

    /// Apply the Gaussian perturbation operator to one particle.
    ///
    /// Restart strategies layered on top of the generation loop call this
    /// between generations.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    pub fn mutate_particle(&mut self, index: usize) {
        self.particles[index].mutate(&self.bounds, &mut self.rng);
    }

    /// Mutable access to the population for restart strategies
    /// (resetting memory or fitness, re-randomizing state).
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Mutable access to the injected random source.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

#[cfg(test)]
#[path = "swarm_tests.rs"]
mod tests;
