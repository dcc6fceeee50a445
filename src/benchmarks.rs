//! Standard continuous test functions for exercising the optimizer.
//!
//! All functions take their global minimum value 0. They return a bare
//! scalar; wrap them with [`as_objective`] to plug into the swarm's
//! `(fitness, std)` evaluator interface.
//!
//! Reference: Liang et al. (2013) "Problem Definitions and Evaluation
//! Criteria for the CEC 2013 Special Session on Real-Parameter
//! Optimization"

use std::f64::consts::PI;

/// Adapt a plain `f(x)` test function to the evaluator interface.
///
/// The reported standard deviation is always `0.0` (deterministic
/// function) and the best-known-value argument is ignored.
///
/// # Example
///
/// ```
/// use curioso::benchmarks::{as_objective, sphere};
/// use curioso::Objective;
///
/// let objective = as_objective(sphere);
/// let (fitness, std) = objective.evaluate(&[0.0, 0.0], 0.0).unwrap();
/// assert_eq!(fitness, 0.0);
/// assert_eq!(std, 0.0);
/// ```
pub fn as_objective(f: fn(&[f64]) -> f64) -> impl Fn(&[f64], f64) -> (f64, f64) {
    move |x: &[f64], _best: f64| (f(x), 0.0)
}

/// Sphere function - unimodal, separable.
///
/// Global minimum: `f(0, ..., 0) = 0`. Typical domain: `[-100, 100]^D`.
#[must_use]
pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|xi| xi * xi).sum()
}

/// Rosenbrock function - unimodal, non-separable banana valley.
///
/// Global minimum: `f(1, ..., 1) = 0`. Typical domain: `[-30, 30]^D`.
#[must_use]
pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| {
            let valley = w[1] - w[0] * w[0];
            let shift = 1.0 - w[0];
            100.0 * valley * valley + shift * shift
        })
        .sum()
}

/// Rastrigin function - highly multimodal, separable.
///
/// Global minimum: `f(0, ..., 0) = 0`. Typical domain: `[-5.12, 5.12]^D`.
/// Local minima sit on a regular lattice, punishing greedy swarms.
#[must_use]
pub fn rastrigin(x: &[f64]) -> f64 {
    10.0 * x.len() as f64
        + x.iter()
            .map(|xi| xi * xi - 10.0 * (2.0 * PI * xi).cos())
            .sum::<f64>()
}

/// Ackley function - multimodal with a nearly flat outer region.
///
/// Global minimum: `f(0, ..., 0) = 0`. Typical domain: `[-32, 32]^D`.
#[must_use]
pub fn ackley(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    let sum_sq: f64 = x.iter().map(|xi| xi * xi).sum();
    let sum_cos: f64 = x.iter().map(|xi| (2.0 * PI * xi).cos()).sum();
    -20.0 * (-0.2 * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + 20.0 + std::f64::consts::E
}

/// Griewank function - multimodal with product-coupled dimensions.
///
/// Global minimum: `f(0, ..., 0) = 0`. Typical domain: `[-600, 600]^D`.
#[must_use]
pub fn griewank(x: &[f64]) -> f64 {
    let sum: f64 = x.iter().map(|xi| xi * xi / 4000.0).sum();
    let product: f64 = x
        .iter()
        .enumerate()
        .map(|(i, xi)| (xi / ((i + 1) as f64).sqrt()).cos())
        .product();
    sum - product + 1.0
}

#[cfg(test)]
#[path = "benchmarks_tests.rs"]
mod tests;
