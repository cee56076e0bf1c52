//! The evaluation harness: the Rosenbrock function under the calling conventions external
//! optimizers expect. See [`Harness`] for full documentation.

use nalgebra::DVector;
use rayon::prelude::*;

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::EvaluationError;
use crate::named::{NamedValues, INPUT_NAME, OUTPUT_NAME};
use crate::rosenbrock;

/// A type that can be minimized by an [`Optimizer`][crate::Optimizer].
///
/// Objectives must be `Sync` so that back-ends are free to evaluate a population in parallel.
pub trait Objective: Sync {
    /// The length of the design vectors accepted by [`evaluate`][Self::evaluate].
    fn dimensions(&self) -> usize;

    /// Returns the cost at `x`, or `Err` if `x` is rejected.
    fn evaluate(&self, x: &DVector<f64>) -> Result<f64, EvaluationError>;
}

impl<'a, O: Objective + ?Sized> Objective for &'a O {
    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn evaluate(&self, x: &DVector<f64>) -> Result<f64, EvaluationError> {
        (**self).evaluate(x)
    }
}

/// Presents the Rosenbrock function in a direct form and a named-field form. Both forms share a
/// single validated code path, so equal design vectors always produce bit-identical costs.
///
/// The harness is stateless. It does not count evaluations (see [`EvaluationCounter`]) and it
/// does not enforce bounds.
///
/// # Examples
///
/// ```
/// use rosenbrock_harness::{DVector, Harness, NamedValues};
///
/// let harness = Harness::new(3);
/// let x = DVector::from(vec![0.5, 0.25, 0.0]);
///
/// let direct = harness.evaluate(&x).unwrap();
/// let named = harness.evaluate_named(&NamedValues::design_vector(x)).unwrap();
///
/// assert_eq!(Some(direct), named.scalar("y"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Harness {
    dimensions: usize,
}

impl Harness {
    /// Creates a harness for design vectors of length `dimensions`. A `dimensions` below two is
    /// accepted here but every evaluation will fail with `InvalidDimension`.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Direct form: returns the cost of `x`.
    pub fn evaluate(&self, x: &DVector<f64>) -> Result<f64, EvaluationError> {
        self.evaluate_slice(x.as_slice())
    }

    /// Like [`evaluate`][Self::evaluate], but takes a plain slice.
    pub fn evaluate_slice(&self, x: &[f64]) -> Result<f64, EvaluationError> {
        rosenbrock::validate(x, self.dimensions)?;
        Ok(rosenbrock::rosenbrock_unchecked(x))
    }

    /// Named-field form: reads the design vector from the `"x"` entry of `inputs` and returns a
    /// collection holding only the cost under `"y"`.
    pub fn evaluate_named(&self, inputs: &NamedValues) -> Result<NamedValues, EvaluationError> {
        let mut outputs = NamedValues::new();
        self.compute_named(inputs, &mut outputs)?;
        Ok(outputs)
    }

    /// Like [`evaluate_named`][Self::evaluate_named], but writes the cost into an existing output
    /// collection. Other entries of `outputs` are left untouched, and nothing is written on
    /// failure.
    pub fn compute_named(
        &self,
        inputs: &NamedValues,
        outputs: &mut NamedValues,
    ) -> Result<(), EvaluationError> {
        let x = inputs
            .vector(INPUT_NAME)
            .ok_or_else(|| EvaluationError::MalformedNamedInput {
                name: INPUT_NAME.to_owned(),
            })?;

        let y = self.evaluate(x)?;
        outputs.insert(OUTPUT_NAME, y);
        Ok(())
    }

    /// Evaluates each point of a population in parallel. The results are in the same order as
    /// `population`.
    pub fn evaluate_population(
        &self,
        population: &[DVector<f64>],
    ) -> Vec<Result<f64, EvaluationError>> {
        population.par_iter().map(|x| self.evaluate(x)).collect()
    }
}

impl Objective for Harness {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn evaluate(&self, x: &DVector<f64>) -> Result<f64, EvaluationError> {
        Harness::evaluate(self, x)
    }
}

/// Wraps an objective and counts every call to it, including calls that are rejected. The
/// counter is atomic, so the wrapper can be shared between threads.
#[derive(Debug)]
pub struct EvaluationCounter<O> {
    objective: O,
    evaluations: AtomicUsize,
}

impl<O: Objective> EvaluationCounter<O> {
    pub fn new(objective: O) -> Self {
        Self {
            objective,
            evaluations: AtomicUsize::new(0),
        }
    }

    /// Returns the number of calls made so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }

    /// Consumes `self` and returns the wrapped objective.
    pub fn into_inner(self) -> O {
        self.objective
    }
}

impl<O: Objective> Objective for EvaluationCounter<O> {
    fn dimensions(&self) -> usize {
        self.objective.dimensions()
    }

    fn evaluate(&self, x: &DVector<f64>) -> Result<f64, EvaluationError> {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        self.objective.evaluate(x)
    }
}
