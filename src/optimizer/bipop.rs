//! BIPOP restarts over the bounds. See [`Bipop`] for full documentation.

use cmaes::restart::{RestartOptions, RestartStrategy};
use nalgebra::DVector;

use super::{check_dimensions, Bridge, Optimizer, Solution};
use crate::error::OptimizeError;
use crate::harness::Objective;
use crate::options::Problem;

const NAME: &str = "BIPOP-CMA-ES";

/// Minimizes with the BIPOP restart strategy of CMA-ES.
///
/// The restart strategy draws each run's starting point from a single range shared by every
/// coordinate. To respect per-coordinate bounds, the search runs over the unit cube `[0, 1]^N`.
/// Every candidate is mapped onto the problem's bounds and clamped to them before it is
/// evaluated, so neither evaluated points nor the returned solution leave the bounds. The
/// problem's initial point is not used.
///
/// # Examples
///
/// ```no_run
/// use rosenbrock_harness::{Bipop, Optimizer, ProblemOptions};
///
/// let problem = ProblemOptions::new(6)
///     .bounds(vec![-2.0; 6], vec![4.0; 6])
///     .fun_target(1e-10)
///     .build()
///     .unwrap();
///
/// let solution = Bipop::new()
///     .max_function_evals(1_000_000)
///     .enable_printing(true)
///     .minimize(&problem, &problem.harness())
///     .unwrap();
/// ```
#[derive(Clone, Debug, Default)]
pub struct Bipop {
    /// The maximum number of objective function evaluations across all runs. Default value is
    /// `None`.
    pub max_function_evals: Option<usize>,
    /// Seed for the restart strategy. A random seed is used if this is `None`.
    pub seed: Option<u64>,
    /// Whether to evaluate each generation in parallel. Default value is `false`.
    pub parallel: bool,
    /// Whether to print info about each run. Default value is `false`.
    pub enable_printing: bool,
}

impl Bipop {
    /// Creates a new `Bipop` with default values. Set individual options using the provided
    /// methods.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_function_evals(mut self, max_function_evals: usize) -> Self {
        self.max_function_evals = Some(max_function_evals);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn enable_printing(mut self, enable_printing: bool) -> Self {
        self.enable_printing = enable_printing;
        self
    }
}

impl Optimizer for Bipop {
    fn name(&self) -> &'static str {
        NAME
    }

    fn minimize<O: Objective>(
        &self,
        problem: &Problem,
        objective: &O,
    ) -> Result<Solution, OptimizeError> {
        check_dimensions(problem, objective)?;

        let strategy = RestartStrategy::BIPOP(Default::default());
        let mut options = RestartOptions::new(problem.dimensions(), 0.0..=1.0, strategy)
            .enable_printing(self.enable_printing);
        options.fun_target = problem.fun_target();
        options.max_function_evals = self.max_function_evals;
        options.seed = self.seed;

        let restarter = options
            .build()
            .map_err(|e| OptimizeError::InvalidBackendOptions {
                backend: NAME,
                reason: format!("{:?}", e),
            })?;

        let bridge = Bridge::over_unit_cube(objective, problem.bounds());
        let function = |t: &DVector<f64>| bridge.evaluate(t);
        let results = if self.parallel {
            restarter.run_parallel_with_reuse(function)
        } else {
            restarter.run_with_reuse(function)
        };

        if let Some(error) = bridge.take_error() {
            return Err(error.into());
        }

        let termination = format!("{} after {} runs", results.reason, results.runs);
        let best = results.best.ok_or_else(|| OptimizeError::NoSolution {
            backend: NAME,
            termination: termination.clone(),
        })?;

        Ok(Solution {
            point: bridge.to_design_vector(&best.point),
            value: best.value,
            function_evals: results.function_evals,
            termination,
            backend: NAME,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::bounds::Bounds;
    use crate::error::EvaluationError;
    use crate::harness::Harness;
    use crate::options::ProblemOptions;
    use crate::rosenbrock_eval;

    #[test]
    fn test_minimize_within_bounds() {
        let problem = ProblemOptions::new(4)
            .bounds(vec![-2.0, -3.0, 0.0, -1.0], vec![2.0, 3.0, 4.0, 5.0])
            .fun_target(1e-10)
            .build()
            .unwrap();
        let solution = Bipop::new()
            .seed(17)
            .max_function_evals(200_000)
            .minimize(&problem, &problem.harness())
            .unwrap();

        assert!(solution.value < 1e-8, "{:?}", solution);
        assert_eq!(solution.backend, "BIPOP-CMA-ES");
        // The reported point is in design space, not the unit cube
        assert_eq!(
            rosenbrock_eval(solution.point.as_slice()).unwrap(),
            solution.value
        );
        assert!(solution.termination.starts_with("FunTarget"));
    }

    /// Counts evaluations outside of a set of bounds
    struct OutsideCounter<'a> {
        harness: Harness,
        bounds: &'a Bounds,
        outside: AtomicUsize,
    }

    impl Objective for OutsideCounter<'_> {
        fn dimensions(&self) -> usize {
            self.harness.dimensions()
        }

        fn evaluate(&self, x: &DVector<f64>) -> Result<f64, EvaluationError> {
            if !self.bounds.contains(x) {
                self.outside.fetch_add(1, Ordering::SeqCst);
            }
            self.harness.evaluate(x)
        }
    }

    #[test]
    fn test_bounds_exclude_optimum() {
        // The unconstrained optimum (1, 1) is outside; the constrained one is f(2, 4) = 1
        let problem = ProblemOptions::new(2)
            .uniform_bounds(2.0..=4.0)
            .build()
            .unwrap();
        let objective = OutsideCounter {
            harness: problem.harness(),
            bounds: problem.bounds(),
            outside: AtomicUsize::new(0),
        };
        let solution = Bipop::new()
            .seed(1)
            .max_function_evals(20_000)
            .minimize(&problem, &objective)
            .unwrap();

        assert_eq!(objective.outside.load(Ordering::SeqCst), 0);
        assert!(problem.bounds().contains(&solution.point), "{:?}", solution);
        assert!(solution.value >= 1.0);
        assert!(solution.value < 1.0 + 1e-6, "{:?}", solution);
    }

    #[test]
    fn test_max_function_evals() {
        let problem = ProblemOptions::new(6).build().unwrap();
        let solution = Bipop::new()
            .seed(2)
            .parallel(true)
            .max_function_evals(500)
            .minimize(&problem, &problem.harness())
            .unwrap();

        assert!(solution.termination.starts_with("MaxFunctionEvals"));
        assert!(solution.function_evals >= 500);
    }

    #[test]
    fn test_dimension_mismatch() {
        let problem = ProblemOptions::new(3).build().unwrap();
        assert!(matches!(
            Bipop::new().minimize(&problem, &Harness::new(5)),
            Err(OptimizeError::DimensionMismatch { .. })
        ));
    }
}
