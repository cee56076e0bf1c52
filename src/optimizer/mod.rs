//! Interchangeable black-box optimizer back-ends.
//!
//! An [`Optimizer`] proposes design vectors, reads back costs from an [`Objective`] and returns
//! the best [`Solution`] it found. The back-ends here delegate the search itself to the `cmaes`
//! crate:
//!
//! - [`Cmaes`]: a single CMA-ES run started from the problem's initial point
//! - [`Bipop`]: the BIPOP restart strategy, searching the unit cube mapped onto the bounds

mod bipop;
mod cmaes;

pub use self::bipop::Bipop;
pub use self::cmaes::Cmaes;

use nalgebra::DVector;

use std::sync::{Mutex, PoisonError};

use crate::bounds::Bounds;
use crate::error::{EvaluationError, OptimizeError};
use crate::harness::Objective;
use crate::options::Problem;

/// A black-box minimizer.
pub trait Optimizer {
    /// A short name for the back-end, used in results and errors.
    fn name(&self) -> &'static str;

    /// Minimizes `objective` over `problem`.
    ///
    /// Returns `Err` if the objective rejects a candidate vector (the run is stopped at that
    /// point), if the dimensions of `objective` and `problem` differ, or if the back-end could not
    /// produce a solution.
    fn minimize<O: Objective>(
        &self,
        problem: &Problem,
        objective: &O,
    ) -> Result<Solution, OptimizeError>;
}

/// The best point found by an [`Optimizer`].
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub point: DVector<f64>,
    pub value: f64,
    /// The total number of times the objective was evaluated.
    pub function_evals: usize,
    /// The reason(s) the back-end gave for stopping.
    pub termination: String,
    /// The name of the back-end that produced the solution.
    pub backend: &'static str,
}

impl Solution {
    /// Returns whether the solution reached `fun_target` (always `false` if there is none).
    pub fn reached(&self, fun_target: Option<f64>) -> bool {
        fun_target.map_or(false, |target| self.value <= target)
    }

    /// Prints the results of the run.
    pub fn print_results(&self) {
        println!(
            "{} terminated in {} f-evals with reason: `{}`",
            self.backend, self.function_evals, self.termination
        );
        println!("Best function value: {:e}", self.value);
        println!("Best point: {}", self.point);
    }
}

fn check_dimensions<O: Objective>(problem: &Problem, objective: &O) -> Result<(), OptimizeError> {
    if problem.dimensions() == objective.dimensions() {
        Ok(())
    } else {
        Err(OptimizeError::DimensionMismatch {
            problem: problem.dimensions(),
            objective: objective.dimensions(),
        })
    }
}

/// Adapts an [`Objective`] to the infallible `&DVector<f64> -> f64` shape CMA-ES expects.
///
/// The first evaluation error is kept and `NAN` is returned in its place, which makes CMA-ES stop
/// with an invalid function value. Points can optionally be mapped from the unit cube onto a set of
/// bounds before evaluation. CMA-ES samples outside of the unit cube too, so mapped points are
/// clamped to the bounds and every evaluated point lies inside them.
struct Bridge<'a, O> {
    objective: &'a O,
    unit_cube: Option<&'a Bounds>,
    error: Mutex<Option<EvaluationError>>,
}

impl<'a, O: Objective> Bridge<'a, O> {
    fn new(objective: &'a O) -> Self {
        Self {
            objective,
            unit_cube: None,
            error: Mutex::new(None),
        }
    }

    /// Evaluated points are mapped from `[0, 1]^N` onto `bounds` first.
    fn over_unit_cube(objective: &'a O, bounds: &'a Bounds) -> Self {
        Self {
            unit_cube: Some(bounds),
            ..Self::new(objective)
        }
    }

    /// Maps a point from the optimizer's search space into the objective's.
    fn to_design_vector(&self, point: &DVector<f64>) -> DVector<f64> {
        match self.unit_cube {
            Some(bounds) => bounds.clamp(&bounds.from_unit(point)),
            None => point.clone(),
        }
    }

    fn evaluate(&self, point: &DVector<f64>) -> f64 {
        let result = match self.unit_cube {
            Some(_) => self.objective.evaluate(&self.to_design_vector(point)),
            None => self.objective.evaluate(point),
        };

        match result {
            Ok(value) => value,
            Err(error) => {
                self.error
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get_or_insert(error);
                f64::NAN
            }
        }
    }

    /// Returns the first evaluation error, if any occurred.
    fn take_error(&self) -> Option<EvaluationError> {
        self.error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}
