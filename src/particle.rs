//! Particle state and per-generation dynamics.
//!
//! A particle owns one candidate solution: position, velocity, personal
//! memory, and a decaying "gas" budget that gates the curiosity impulse.
//! All external inputs (bounds, swarm-best snapshot, evaluator, random
//! source) are passed as explicit parameters; a particle carries no
//! ambient state.
//!
//! # Velocity update
//!
//! ```text
//! v' = inertia·v
//!    + self_confidence·U₁·(personal_best - x)
//!    + swarm_confidence·U₂·(swarm_best - x)
//!    [ + adventure_sense·s·direction·half_range·energy ]   (curiosity)
//! ```
//!
//! The curiosity direction is a Gaussian-kernel-weighted sum of difference
//! vectors toward a sampled subset of other particles' positions plus this
//! particle's own memory, normalized to unit length. Nearer points weigh
//! more, biasing the impulse relative to crowded or previously visited
//! regions.
//!
//! Out-of-bounds positions are reflected at the violated bound and the
//! corresponding velocity component zeroed, the boundary handling shown to
//! perform best on average by Helwig et al. (2013).
//!
//! # References
//!
//! - Kennedy & Eberhart (1995): "Particle Swarm Optimization"
//! - Helwig et al. (2013): "Experimental Analysis of Bound Handling
//!   Techniques in Particle Swarm Optimization"

use std::collections::VecDeque;

use crate::bounds::Bounds;
use crate::error::{CuriosoError, Result};
use crate::objective::Objective;
use crate::random::RandomSource;
use crate::swarm::SwarmParams;

/// Number of previous positions a particle remembers.
pub const HISTORY_CAP: usize = 3;

/// Size of the repulsion subset drawn without replacement.
pub const CURIOSITY_SAMPLES: usize = 10;

/// Gaussian kernel bandwidth, `1 / (2 · 0.1²)`.
const KERNEL_GAMMA: f64 = 50.0;

/// `current_energy / max_energy` ratio below which the gas tank is
/// considered empty.
const ENERGY_FLOOR_RATIO: f64 = 1e-5;

/// Fraction of the per-dimension range within which two positions count
/// as stagnated on the same spot.
const STAGNATION_RATIO: f64 = 0.01;

/// Gaussian mutation step as a fraction of the per-dimension range.
const MUTATION_SCALE: f64 = 0.01;

/// One candidate solution in the population.
///
/// Created once at swarm construction and mutated in place every
/// generation; never destroyed during a run.
#[derive(Debug, Clone)]
pub struct Particle {
    id: usize,
    age: u64,
    position: Vec<f64>,
    velocity: Vec<f64>,
    fitness: f64,
    best_position: Vec<f64>,
    best_fitness: f64,
    recent_positions: VecDeque<Vec<f64>>,
    max_energy: f64,
    current_energy: f64,
    curiosity_active: bool,
}

impl Particle {
    /// Create a particle with uniformly random position and velocity.
    ///
    /// Both vectors are sampled per dimension in `[lower[i], upper[i]]`.
    /// Fitness starts at `+inf` (worst); the personal best mirrors the
    /// initial state; the gas tank is full.
    pub fn new<R: RandomSource>(id: usize, bounds: &Bounds, rng: &mut R) -> Self {
        let position = uniform_in_bounds(bounds, rng);
        let velocity = uniform_in_bounds(bounds, rng);
        Self {
            id,
            age: 0,
            best_position: position.clone(),
            best_fitness: f64::INFINITY,
            position,
            velocity,
            fitness: f64::INFINITY,
            recent_positions: VecDeque::with_capacity(HISTORY_CAP),
            max_energy: 1.0,
            current_energy: 1.0,
            curiosity_active: false,
        }
    }

    /// Unit-length direction of the curiosity impulse.
    ///
    /// Samples [`CURIOSITY_SAMPLES`] distinct positions without replacement
    /// from `candidates`, appends the personal best and the recent-position
    /// history, normalizes everything by the per-dimension range, and sums
    /// the difference vectors (candidate − current) weighted by
    /// `exp(-γ·‖diff‖²)` with `γ = 50`. The sum is normalized to unit
    /// Euclidean length.
    ///
    /// # Errors
    ///
    /// - [`CuriosoError::CuriositySample`] when fewer than
    ///   [`CURIOSITY_SAMPLES`] candidates are available.
    /// - [`CuriosoError::ZeroDirection`] when the weighted sum cancels to
    ///   zero norm; callers skip the curiosity term for that step.
    pub fn curiosity_direction<R: RandomSource>(
        &self,
        candidates: &[Vec<f64>],
        bounds: &Bounds,
        rng: &mut R,
    ) -> Result<Vec<f64>> {
        if candidates.len() < CURIOSITY_SAMPLES {
            return Err(CuriosoError::CuriositySample {
                available: candidates.len(),
                required: CURIOSITY_SAMPLES,
            });
        }

        let picks = rng.sample_indices(candidates.len(), CURIOSITY_SAMPLES);
        let mut repellers: Vec<&[f64]> = picks.iter().map(|&i| candidates[i].as_slice()).collect();
        repellers.push(&self.best_position);
        for past in &self.recent_positions {
            repellers.push(past);
        }

        let dim = bounds.dimension();
        let range = bounds.range();
        let current: Vec<f64> = (0..dim).map(|i| self.position[i] / range[i]).collect();

        let mut direction = vec![0.0; dim];
        for repeller in repellers {
            let diff: Vec<f64> = (0..dim).map(|i| repeller[i] / range[i] - current[i]).collect();
            let squared_norm: f64 = diff.iter().map(|d| d * d).sum();
            let weight = (-KERNEL_GAMMA * squared_norm).exp();
            for i in 0..dim {
                direction[i] += weight * diff[i];
            }
        }

        let norm = direction.iter().map(|d| d * d).sum::<f64>().sqrt();
        if norm == 0.0 {
            return Err(CuriosoError::ZeroDirection);
        }
        for d in &mut direction {
            *d /= norm;
        }
        Ok(direction)
    }

    /// Velocity update: inertia + cognitive + social terms, plus the
    /// curiosity impulse when enabled.
    ///
    /// The curiosity impulse is scaled by a fresh uniform scalar `s` and
    /// the current gas level, after which the gas decays by `1 - s`. A
    /// [`CuriosoError::ZeroDirection`] from the direction computation is
    /// absorbed here (the impulse is skipped and the gas left untouched).
    ///
    /// Each component is then capped at `half_range[i]`; the cap drops the
    /// sign, so an over-limit component always ends up at `+half_range[i]`.
    ///
    /// # Errors
    ///
    /// [`CuriosoError::CuriositySample`] when curiosity is enabled with too
    /// few candidate positions; the velocity is left unchanged.
    pub fn update_velocity<R: RandomSource>(
        &mut self,
        params: &SwarmParams,
        swarm_best: &[f64],
        candidates: &[Vec<f64>],
        bounds: &Bounds,
        rng: &mut R,
    ) -> Result<()> {
        let dim = bounds.dimension();
        let u1 = rng.uniform_vector(dim);
        let u2 = rng.uniform_vector(dim);

        let mut velocity: Vec<f64> = (0..dim)
            .map(|i| {
                params.inertia * self.velocity[i]
                    + params.self_confidence * u1[i] * (self.best_position[i] - self.position[i])
                    + params.swarm_confidence * u2[i] * (swarm_best[i] - self.position[i])
            })
            .collect();

        self.curiosity_active = params.curiosity;
        if params.curiosity {
            match self.curiosity_direction(candidates, bounds, rng) {
                Ok(direction) => {
                    let s = rng.uniform();
                    let half_range = bounds.half_range();
                    for i in 0..dim {
                        velocity[i] += params.adventure_sense
                            * s
                            * direction[i]
                            * half_range[i]
                            * self.current_energy;
                    }
                    self.current_energy *= 1.0 - s;
                }
                Err(CuriosoError::ZeroDirection) => {}
                Err(e) => return Err(e),
            }
        }

        let half_range = bounds.half_range();
        for (v, &cap) in velocity.iter_mut().zip(half_range) {
            if v.abs() > cap {
                *v = cap;
            }
        }
        self.velocity = velocity;
        Ok(())
    }

    /// Move by the current velocity, reflecting at the domain bounds.
    ///
    /// The pre-move position is pushed onto the recent-position history
    /// (oldest entry evicted past [`HISTORY_CAP`]). When curiosity is
    /// active and the gas tank has drained below `1e-5` of its ceiling
    /// while the particle — or the swarm best — sits within 1% of the
    /// per-dimension range of this particle's memory, the ceiling halves
    /// and the tank refills to it, shrinking future impulses as the run
    /// matures.
    pub fn update_position(&mut self, swarm_best: &[f64], bounds: &Bounds) {
        let dim = bounds.dimension();
        let lower = bounds.lower();
        let upper = bounds.upper();

        let mut candidate = vec![0.0; dim];
        for i in 0..dim {
            let (value, reflected) =
                reflect(self.position[i] + self.velocity[i], lower[i], upper[i]);
            candidate[i] = value;
            if reflected {
                self.velocity[i] = 0.0;
            }
        }

        if self.recent_positions.len() >= HISTORY_CAP {
            self.recent_positions.pop_front();
        }
        let previous = std::mem::replace(&mut self.position, candidate);
        self.recent_positions.push_back(previous);

        if self.curiosity_active && self.current_energy <= ENERGY_FLOOR_RATIO * self.max_energy {
            let range = bounds.range();
            let self_stagnated = (0..dim)
                .all(|i| (self.position[i] - self.best_position[i]).abs() < STAGNATION_RATIO * range[i]);
            let swarm_stagnated = (0..dim)
                .all(|i| (swarm_best[i] - self.best_position[i]).abs() < STAGNATION_RATIO * range[i]);
            if self_stagnated || swarm_stagnated {
                self.max_energy *= 0.5;
                self.current_energy = self.max_energy;
            }
        }
    }

    /// Evaluate the objective at the current position and refresh the
    /// personal memory.
    ///
    /// The returned standard deviation is informational only. Memory
    /// updates on ties (`fitness <= best_fitness`) so plateaus and
    /// discrete objectives do not stall the particle.
    ///
    /// # Errors
    ///
    /// Evaluator failures propagate unchanged; fitness and memory are left
    /// as they were.
    pub fn update_fitness<O: Objective>(&mut self, objective: &O, best_known_value: f64) -> Result<()> {
        let (fitness, _std) = objective.evaluate(&self.position, best_known_value)?;
        self.fitness = fitness;
        if fitness <= self.best_fitness {
            self.best_fitness = fitness;
            self.best_position = self.position.clone();
        }
        Ok(())
    }

    /// One full generation step: velocity, position, fitness, age.
    ///
    /// This is the single operation the swarm invokes per generation.
    /// `swarm_best` must be an independent snapshot, never a live view of
    /// another particle's position.
    ///
    /// # Errors
    ///
    /// Propagates [`CuriosoError::CuriositySample`] from the velocity
    /// update and [`CuriosoError::Objective`] from the evaluator; either
    /// aborts the remainder of this particle's step only.
    pub fn update<O: Objective, R: RandomSource>(
        &mut self,
        objective: &O,
        params: &SwarmParams,
        swarm_best: &[f64],
        candidates: &[Vec<f64>],
        bounds: &Bounds,
        rng: &mut R,
    ) -> Result<()> {
        self.update_velocity(params, swarm_best, candidates, bounds, rng)?;
        self.update_position(swarm_best, bounds);
        self.update_fitness(objective, params.best_known_value)?;
        self.age += 1;
        Ok(())
    }

    /// Gaussian perturbation, independent of the main update cycle.
    ///
    /// Each coordinate moves by `0.01 · N(0,1) · range[i]`, with the same
    /// reflection policy as [`update_position`] (velocity zeroed on any
    /// reflected dimension). Useful for restart strategies layered on top
    /// of the generation loop.
    ///
    /// [`update_position`]: Particle::update_position
    pub fn mutate<R: RandomSource>(&mut self, bounds: &Bounds, rng: &mut R) {
        let lower = bounds.lower();
        let upper = bounds.upper();
        let range = bounds.range();
        for i in 0..bounds.dimension() {
            let perturbed = self.position[i] + MUTATION_SCALE * rng.standard_normal() * range[i];
            let (value, reflected) = reflect(perturbed, lower[i], upper[i]);
            self.position[i] = value;
            if reflected {
                self.velocity[i] = 0.0;
            }
        }
    }

    /// Forget the current fitness (reset to `+inf`).
    pub fn reset_fitness(&mut self) {
        self.fitness = f64::INFINITY;
    }

    /// Collapse the personal memory onto the current state.
    pub fn reset_memory(&mut self) {
        self.best_position = self.position.clone();
        self.best_fitness = self.fitness;
    }

    /// Resample the position uniformly within bounds.
    pub fn randomize_position<R: RandomSource>(&mut self, bounds: &Bounds, rng: &mut R) {
        self.position = uniform_in_bounds(bounds, rng);
    }

    /// Resample the velocity uniformly within bounds.
    pub fn randomize_velocity<R: RandomSource>(&mut self, bounds: &Bounds, rng: &mut R) {
        self.velocity = uniform_in_bounds(bounds, rng);
    }

    /// Sequential id assigned at swarm construction.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Completed update count.
    #[must_use]
    pub fn age(&self) -> u64 {
        self.age
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    /// Current velocity.
    #[must_use]
    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    /// Current fitness (lower is better; `+inf` before the first
    /// evaluation).
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Best position this particle has ever occupied.
    #[must_use]
    pub fn best_position(&self) -> &[f64] {
        &self.best_position
    }

    /// Fitness at the personal-best position; non-increasing over the
    /// particle's lifetime.
    #[must_use]
    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    /// Remaining curiosity gas.
    #[must_use]
    pub fn current_energy(&self) -> f64 {
        self.current_energy
    }

    /// Current gas ceiling; halves on each detected stagnation recharge.
    #[must_use]
    pub fn max_energy(&self) -> f64 {
        self.max_energy
    }

    /// Previous positions, oldest first (at most [`HISTORY_CAP`]).
    #[must_use]
    pub fn recent_positions(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.recent_positions.iter().map(Vec::as_slice)
    }
}

/// Uniform per-dimension draw in `[lower[i], upper[i]]`.
fn uniform_in_bounds<R: RandomSource>(bounds: &Bounds, rng: &mut R) -> Vec<f64> {
    let samples = rng.uniform_vector(bounds.dimension());
    samples
        .iter()
        .zip(bounds.lower().iter().zip(bounds.range()))
        .map(|(&u, (&lo, &r))| lo + u * r)
        .collect()
}

/// Mirror `value` back into `[lower, upper]`, clamping on the (extremely
/// unlikely) double overshoot past the opposite bound. Returns the
/// corrected value and whether a reflection happened.
fn reflect(value: f64, lower: f64, upper: f64) -> (f64, bool) {
    if value > upper {
        let reflected = upper - (value - upper);
        (reflected.max(lower), true)
    } else if value < lower {
        let reflected = lower + (lower - value);
        (reflected.min(upper), true)
    } else {
        (value, false)
    }
}

#[cfg(test)]
#[path = "particle_tests.rs"]
mod tests;
