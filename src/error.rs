//! Error types for evaluation, configuration and optimization.

use thiserror::Error;

/// A reason for an evaluation being rejected before the objective function is computed.
///
/// Every variant is a contract violation by the caller. The evaluation that produced it is
/// abandoned and no partial cost is returned.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvaluationError {
    /// The design vector has fewer than two components, or its length does not match the
    /// configured dimension.
    #[error("invalid dimension: expected {expected}, found {found}")]
    InvalidDimension { expected: usize, found: usize },
    /// A component of the design vector is `NAN` or infinite.
    #[error("non-finite input: x[{index}] = {value}")]
    NonFiniteInput { index: usize, value: f64 },
    /// A named entry is missing or has the wrong shape: the vector input of the named-field form,
    /// or a declared input or output a component is wired through.
    #[error("malformed named input: missing or mistyped entry `{name}`")]
    MalformedNamedInput { name: String },
}

/// Represents invalid options for a [`Problem`][crate::Problem].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InvalidOptionsError {
    /// The number of dimensions is less than two.
    #[error("the number of dimensions must be at least 2")]
    Dimensions,
    /// The lower or upper bound does not have one entry per dimension.
    #[error("the bounds do not match the number of dimensions")]
    BoundsDimensionMismatch,
    /// A lower bound is greater than its upper bound.
    #[error("a lower bound is greater than its upper bound")]
    InvertedBounds,
    /// A bound is `NAN` or infinite.
    #[error("the bounds must be finite")]
    NonFiniteBounds,
    /// The initial point does not have one entry per dimension.
    #[error("the initial point does not match the number of dimensions")]
    InitialPointDimensionMismatch,
    /// The target cost is `NAN`.
    #[error("the target cost must not be NAN")]
    FunTarget,
}

/// An error produced by an [`Optimizer`][crate::Optimizer] back-end.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum OptimizeError {
    /// The objective rejected a candidate vector. The run was stopped at that point.
    #[error("evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),
    /// The objective's dimension does not match the problem's.
    #[error("objective has {objective} dimensions but the problem has {problem}")]
    DimensionMismatch { problem: usize, objective: usize },
    /// The back-end rejected its options.
    #[error("invalid {backend} options: {reason}")]
    InvalidBackendOptions {
        backend: &'static str,
        reason: String,
    },
    /// The back-end terminated without producing any evaluated point.
    #[error("{backend} terminated without a solution ({termination})")]
    NoSolution {
        backend: &'static str,
        termination: String,
    },
}
