//! Types related to configuring a [`Problem`]. See [`ProblemOptions`] for full documentation.

use nalgebra::DVector;

use std::ops::RangeInclusive;

use crate::bounds::Bounds;
use crate::error::InvalidOptionsError;
use crate::harness::Harness;
use crate::rosenbrock::MIN_DIMENSIONS;

/// The default search range in every coordinate.
pub const DEFAULT_RANGE: RangeInclusive<f64> = -5.0..=5.0;

/// A builder for [`Problem`]. Used to set the dimension, bounds and stopping target of a
/// minimization of the Rosenbrock function.
///
/// # Examples
///
/// ```
/// use rosenbrock_harness::ProblemOptions;
///
/// let dim = 6;
/// let problem = ProblemOptions::new(dim)
///     .uniform_bounds(-10.0..=10.0)
///     .initial_point(vec![-1.0; dim])
///     .fun_target(1e-10)
///     .build()
///     .unwrap();
///
/// assert_eq!(problem.dimensions(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct ProblemOptions {
    /// Number of dimensions (`n`). Must be at least 2.
    pub dimensions: usize,
    /// Lower bound of each coordinate. Default value is `-5` in every coordinate.
    pub lower: DVector<f64>,
    /// Upper bound of each coordinate. Default value is `5` in every coordinate.
    pub upper: DVector<f64>,
    /// A cost at or below which an optimizer should stop. It is never checked by the harness
    /// itself. Default value is `None`.
    pub fun_target: Option<f64>,
    /// The first guess at the solution. If `None`, optimizers choose their own starting point
    /// from inside the bounds. Default value is `None`.
    pub initial_point: Option<DVector<f64>>,
}

impl ProblemOptions {
    /// Creates a new `ProblemOptions` with default values. Set individual options using the
    /// provided methods.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            lower: DVector::from_element(dimensions, *DEFAULT_RANGE.start()),
            upper: DVector::from_element(dimensions, *DEFAULT_RANGE.end()),
            fun_target: None,
            initial_point: None,
        }
    }

    /// Sets separate lower and upper bounds for each coordinate.
    pub fn bounds<V: Into<DVector<f64>>>(mut self, lower: V, upper: V) -> Self {
        self.lower = lower.into();
        self.upper = upper.into();
        self
    }

    /// Sets the same range in every coordinate. Flipped ranges are corrected.
    pub fn uniform_bounds(mut self, mut range: RangeInclusive<f64>) -> Self {
        if range.is_empty() {
            range = *range.end()..=*range.start();
        }
        self.lower = DVector::from_element(self.dimensions, *range.start());
        self.upper = DVector::from_element(self.dimensions, *range.end());
        self
    }

    /// Sets the target cost.
    pub fn fun_target(mut self, fun_target: f64) -> Self {
        self.fun_target = Some(fun_target);
        self
    }

    /// Sets the initial point.
    pub fn initial_point<V: Into<DVector<f64>>>(mut self, initial_point: V) -> Self {
        self.initial_point = Some(initial_point.into());
        self
    }

    /// Attempts to build the [`Problem`] using the chosen options.
    pub fn build(self) -> Result<Problem, InvalidOptionsError> {
        Problem::new(self)
    }
}

/// A validated configuration: dimension, bounds, and optional target cost and initial point. Set
/// once at setup and read-only afterwards. Use [`ProblemOptions`] to create a `Problem`.
#[derive(Clone, Debug, PartialEq)]
pub struct Problem {
    dimensions: usize,
    bounds: Bounds,
    fun_target: Option<f64>,
    initial_point: Option<DVector<f64>>,
}

impl Problem {
    /// Initializes a `Problem` from a set of [`ProblemOptions`]. [`ProblemOptions::build`] should
    /// generally be used instead.
    pub fn new(options: ProblemOptions) -> Result<Self, InvalidOptionsError> {
        if options.dimensions < MIN_DIMENSIONS {
            return Err(InvalidOptionsError::Dimensions);
        }

        if options.lower.len() != options.dimensions {
            return Err(InvalidOptionsError::BoundsDimensionMismatch);
        }

        let bounds = Bounds::new(options.lower, options.upper)?;

        if let Some(ref initial_point) = options.initial_point {
            if initial_point.len() != options.dimensions {
                return Err(InvalidOptionsError::InitialPointDimensionMismatch);
            }
        }

        if options.fun_target.map_or(false, f64::is_nan) {
            return Err(InvalidOptionsError::FunTarget);
        }

        Ok(Self {
            dimensions: options.dimensions,
            bounds,
            fun_target: options.fun_target,
            initial_point: options.initial_point,
        })
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn fun_target(&self) -> Option<f64> {
        self.fun_target
    }

    pub fn initial_point(&self) -> Option<&DVector<f64>> {
        self.initial_point.as_ref()
    }

    /// Returns the initial point if one was set, or a point sampled from inside the bounds using
    /// `seed` otherwise.
    pub fn starting_point(&self, seed: u64) -> DVector<f64> {
        match self.initial_point {
            Some(ref point) => point.clone(),
            None => self.bounds.sample(seed),
        }
    }

    /// Returns a harness that evaluates design vectors of this problem's dimension.
    pub fn harness(&self) -> Harness {
        Harness::new(self.dimensions)
    }
}
