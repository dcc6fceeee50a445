//! Search-domain bounds shared read-only across a swarm.

use crate::error::{CuriosoError, Result};

/// Per-dimension lower and upper limits of the search domain.
///
/// Validated eagerly at construction: every dimension must satisfy
/// `lower[i] < upper[i]`, so the derived `range` is strictly positive and
/// the curiosity geometry's per-dimension normalization is always defined.
/// Immutable for the lifetime of a swarm.
///
/// # Example
///
/// ```
/// use curioso::Bounds;
///
/// let bounds = Bounds::uniform(3, -5.0, 5.0).unwrap();
/// assert_eq!(bounds.dimension(), 3);
/// assert_eq!(bounds.range()[0], 10.0);
/// assert_eq!(bounds.half_range()[0], 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
    range: Vec<f64>,
    half_range: Vec<f64>,
}

impl Bounds {
    /// Build bounds from per-dimension limits.
    ///
    /// # Errors
    ///
    /// Returns [`CuriosoError::InvalidBounds`] when the two limit vectors
    /// differ in length, are empty, or any dimension has `lower[i] >= upper[i]`
    /// (a zero-width dimension would make range normalization undefined).
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if lower.len() != upper.len() {
            return Err(CuriosoError::InvalidBounds {
                reason: format!(
                    "lower has {} dimensions but upper has {}",
                    lower.len(),
                    upper.len()
                ),
            });
        }
        if lower.is_empty() {
            return Err(CuriosoError::InvalidBounds {
                reason: "bounds must have at least one dimension".to_string(),
            });
        }
        for (i, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
            // `!(hi > lo)` also rejects NaN limits.
            if !(hi > lo) {
                return Err(CuriosoError::InvalidBounds {
                    reason: format!("dimension {i}: lower ({lo}) must be strictly below upper ({hi})"),
                });
            }
        }

        let range: Vec<f64> = lower.iter().zip(upper.iter()).map(|(l, u)| u - l).collect();
        let half_range: Vec<f64> = range.iter().map(|r| r / 2.0).collect();
        Ok(Self {
            lower,
            upper,
            range,
            half_range,
        })
    }

    /// Build bounds with the same `[lower, upper]` limits in every dimension.
    ///
    /// # Errors
    ///
    /// Returns [`CuriosoError::InvalidBounds`] when `dim == 0` or
    /// `lower >= upper`.
    pub fn uniform(dim: usize, lower: f64, upper: f64) -> Result<Self> {
        Self::new(vec![lower; dim], vec![upper; dim])
    }

    /// Number of dimensions of the search domain.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Per-dimension lower limits.
    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Per-dimension upper limits.
    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Per-dimension widths, `upper[i] - lower[i]` (always > 0).
    #[must_use]
    pub fn range(&self) -> &[f64] {
        &self.range
    }

    /// Half of each dimension's width; the velocity magnitude cap.
    #[must_use]
    pub fn half_range(&self) -> &[f64] {
        &self.half_range
    }

    /// Whether `position` lies within the domain in every dimension.
    #[must_use]
    pub fn contains(&self, position: &[f64]) -> bool {
        position.len() == self.dimension()
            && position
                .iter()
                .zip(self.lower.iter().zip(self.upper.iter()))
                .all(|(&x, (&lo, &hi))| x >= lo && x <= hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bounds_derive_range() {
        let bounds = Bounds::new(vec![0.0, -2.0], vec![10.0, 2.0]).unwrap();
        assert_eq!(bounds.dimension(), 2);
        assert_eq!(bounds.range(), &[10.0, 4.0]);
        assert_eq!(bounds.half_range(), &[5.0, 2.0]);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = Bounds::new(vec![0.0, 0.0], vec![1.0]).unwrap_err();
        assert!(matches!(err, CuriosoError::InvalidBounds { .. }));
    }

    #[test]
    fn test_empty_bounds_rejected() {
        let err = Bounds::new(Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, CuriosoError::InvalidBounds { .. }));
    }

    #[test]
    fn test_inverted_limits_rejected() {
        let err = Bounds::new(vec![0.0, 5.0], vec![1.0, 3.0]).unwrap_err();
        assert!(err.to_string().contains("dimension 1"));
    }

    #[test]
    fn test_zero_width_dimension_rejected() {
        let err = Bounds::new(vec![0.0, 2.0], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, CuriosoError::InvalidBounds { .. }));
    }

    #[test]
    fn test_nan_limit_rejected() {
        let err = Bounds::new(vec![f64::NAN], vec![1.0]).unwrap_err();
        assert!(matches!(err, CuriosoError::InvalidBounds { .. }));
    }

    #[test]
    fn test_contains() {
        let bounds = Bounds::uniform(2, 0.0, 10.0).unwrap();
        assert!(bounds.contains(&[0.0, 10.0]));
        assert!(bounds.contains(&[5.0, 5.0]));
        assert!(!bounds.contains(&[5.0, 10.1]));
        assert!(!bounds.contains(&[5.0]));
    }
}
