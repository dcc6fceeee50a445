//! External objective-evaluator capability.

use crate::error::Result;

/// Black-box fitness evaluator supplied by the caller.
///
/// Takes a position and an externally supplied "best known value" scalar
/// (for example a known global optimum used by the evaluator for
/// diagnostic scaling; the core never interprets it) and returns
/// `(fitness, std)`. Lower fitness is better. The standard deviation is
/// informational only; noisy evaluators report their spread there and
/// deterministic ones return `0.0`.
///
/// Plain closures work directly through the blanket implementation:
///
/// ```
/// use curioso::Objective;
///
/// let sphere = |x: &[f64], _best: f64| (x.iter().map(|xi| xi * xi).sum::<f64>(), 0.0);
/// let (fitness, std) = sphere.evaluate(&[0.0, 0.0], 0.0).unwrap();
/// assert_eq!(fitness, 0.0);
/// assert_eq!(std, 0.0);
/// ```
///
/// Fallible evaluators (simulators, remote services) implement the trait
/// by hand and return [`CuriosoError::Objective`] on failure; the core
/// propagates the error without retrying.
///
/// [`CuriosoError::Objective`]: crate::CuriosoError::Objective
pub trait Objective {
    /// Evaluate `position`, returning `(fitness, std)`.
    ///
    /// # Errors
    ///
    /// Evaluator failures surface as [`CuriosoError::Objective`] and abort
    /// only the affected particle's update for that generation.
    ///
    /// [`CuriosoError::Objective`]: crate::CuriosoError::Objective
    fn evaluate(&self, position: &[f64], best_known_value: f64) -> Result<(f64, f64)>;
}

impl<F> Objective for F
where
    F: Fn(&[f64], f64) -> (f64, f64),
{
    fn evaluate(&self, position: &[f64], best_known_value: f64) -> Result<(f64, f64)> {
        Ok(self(position, best_known_value))
    }
}
