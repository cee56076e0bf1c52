//! The N-dimensional Rosenbrock function.
//!
//! ```text
//! f(x) = sum_{i=0}^{n-2} [ 100 (x[i+1] - x[i]^2)^2 + (1 - x[i])^2 ]
//! ```
//!
//! The global minimum `f = 0` is attained only at `x = (1, 1, ..., 1)`.

use crate::error::EvaluationError;

/// The smallest dimension for which the function is defined (it sums over adjacent pairs).
pub const MIN_DIMENSIONS: usize = 2;

/// Evaluates the Rosenbrock function at `x`.
///
/// Returns `Err` if `x` has fewer than [`MIN_DIMENSIONS`] components or if any component is
/// `NAN` or infinite. Finite inputs large enough to overflow give a cost of `+inf`.
///
/// # Examples
///
/// ```
/// use rosenbrock_harness::rosenbrock_eval;
///
/// assert_eq!(rosenbrock_eval(&[1.0; 6]).unwrap(), 0.0);
/// assert_eq!(rosenbrock_eval(&[-1.0; 6]).unwrap(), 2020.0);
/// assert!(rosenbrock_eval(&[1.0]).is_err());
/// ```
pub fn rosenbrock_eval(x: &[f64]) -> Result<f64, EvaluationError> {
    validate(x, x.len().max(MIN_DIMENSIONS))?;
    Ok(rosenbrock_unchecked(x))
}

/// Checks that `x` has exactly `dimensions` finite components, and at least [`MIN_DIMENSIONS`].
pub(crate) fn validate(x: &[f64], dimensions: usize) -> Result<(), EvaluationError> {
    if x.len() < MIN_DIMENSIONS || x.len() != dimensions {
        return Err(EvaluationError::InvalidDimension {
            expected: dimensions,
            found: x.len(),
        });
    }

    match x.iter().position(|xi| !xi.is_finite()) {
        Some(index) => Err(EvaluationError::NonFiniteInput {
            index,
            value: x[index],
        }),
        None => Ok(()),
    }
}

/// Summed left to right over increasing `i` so results are reproducible bit for bit. `x` must
/// already have passed [`validate`].
///
/// Finite inputs with a magnitude around `1e155` or more overflow to a cost of `+inf`. The cost is
/// never `NAN`: `x[i + 1]` is finite, so `x[i + 1] - x[i]^2` cannot be `inf - inf`, and every term
/// is a sum of squares.
pub(crate) fn rosenbrock_unchecked(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|pair| 100.0 * (pair[1] - pair[0].powi(2)).powi(2) + (1.0 - pair[0]).powi(2))
        .fold(0.0, |sum, term| sum + term)
}
