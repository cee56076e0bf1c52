//! A single CMA-ES run. See [`Cmaes`] for full documentation.

use cmaes::CMAESOptions;
use nalgebra::DVector;

use super::{check_dimensions, Bridge, Optimizer, Solution};
use crate::error::OptimizeError;
use crate::harness::Objective;
use crate::options::Problem;

const NAME: &str = "CMA-ES";

/// Minimizes with a single run of CMA-ES.
///
/// The run starts from the problem's initial point, or from a point sampled inside the bounds
/// with the run's seed if there is none. The problem's target cost is forwarded as the CMA-ES
/// `fun_target` termination criterion.
///
/// # Examples
///
/// ```no_run
/// use rosenbrock_harness::{Cmaes, Optimizer, ProblemOptions};
///
/// let problem = ProblemOptions::new(6)
///     .initial_point(vec![-1.0; 6])
///     .fun_target(1e-10)
///     .build()
///     .unwrap();
///
/// let solution = Cmaes::new()
///     .initial_step_size(0.5)
///     .enable_printing(500)
///     .minimize(&problem, &problem.harness())
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Cmaes {
    /// Initial step size of the search distribution. Default value is `0.5`.
    pub initial_step_size: f64,
    /// Number of points to sample each generation. Default value is `None` (the CMA-ES default,
    /// `4 + floor(3 ln(n))`).
    pub population_size: Option<usize>,
    /// Default value is `None`.
    pub max_function_evals: Option<usize>,
    /// Default value is `None`.
    pub max_generations: Option<usize>,
    /// The value for the CMA-ES `TolFun` termination criterion. Default value is `None` (the
    /// CMA-ES default).
    pub tol_fun: Option<f64>,
    /// Seed for the run. A random seed is used if this is `None`.
    pub seed: Option<u64>,
    /// Whether to evaluate each generation in parallel. Default value is `false`.
    pub parallel: bool,
    /// The minimum number of function evaluations between each printed progress line. Printing is
    /// disabled if this is `None`, which is the default.
    pub print_gap_evals: Option<usize>,
}

impl Default for Cmaes {
    fn default() -> Self {
        Self::new()
    }
}

impl Cmaes {
    /// Creates a new `Cmaes` with default values. Set individual options using the provided
    /// methods.
    pub fn new() -> Self {
        Self {
            initial_step_size: 0.5,
            population_size: None,
            max_function_evals: None,
            max_generations: None,
            tol_fun: None,
            seed: None,
            parallel: false,
            print_gap_evals: None,
        }
    }

    pub fn initial_step_size(mut self, initial_step_size: f64) -> Self {
        self.initial_step_size = initial_step_size;
        self
    }

    pub fn population_size(mut self, population_size: usize) -> Self {
        self.population_size = Some(population_size);
        self
    }

    pub fn max_function_evals(mut self, max_function_evals: usize) -> Self {
        self.max_function_evals = Some(max_function_evals);
        self
    }

    pub fn max_generations(mut self, max_generations: usize) -> Self {
        self.max_generations = Some(max_generations);
        self
    }

    pub fn tol_fun(mut self, tol_fun: f64) -> Self {
        self.tol_fun = Some(tol_fun);
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

    /// Enables printing of progress to the console every `min_gap_evals` function evaluations.
    pub fn enable_printing(mut self, min_gap_evals: usize) -> Self {
        self.print_gap_evals = Some(min_gap_evals);
        self
    }
}

impl Optimizer for Cmaes {
    fn name(&self) -> &'static str {
        NAME
    }

    fn minimize<O: Objective>(
        &self,
        problem: &Problem,
        objective: &O,
    ) -> Result<Solution, OptimizeError> {
        check_dimensions(problem, objective)?;

        let seed = self.seed.unwrap_or_else(rand::random);
        let mut options = CMAESOptions::new(problem.starting_point(seed), self.initial_step_size)
            .seed(seed);
        options.fun_target = problem.fun_target();
        options.max_function_evals = self.max_function_evals;
        options.max_generations = self.max_generations;

        if let Some(population_size) = self.population_size {
            options = options.population_size(population_size);
        }
        if let Some(tol_fun) = self.tol_fun {
            options = options.tol_fun(tol_fun);
        }
        if let Some(gap) = self.print_gap_evals {
            options = options.enable_printing(gap);
        }

        let bridge = Bridge::new(objective);
        let function = |x: &DVector<f64>| bridge.evaluate(x);
        let mut state = options
            .build(function)
            .map_err(|e| OptimizeError::InvalidBackendOptions {
                backend: NAME,
                reason: format!("{:?}", e),
            })?;

        let data = if self.parallel {
            state.run_parallel()
        } else {
            state.run()
        };

        if let Some(error) = bridge.take_error() {
            return Err(error.into());
        }

        let termination = data
            .reasons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let best = data
            .overall_best
            .ok_or_else(|| OptimizeError::NoSolution {
                backend: NAME,
                termination: termination.clone(),
            })?;

        Ok(Solution {
            point: best.point,
            value: best.value,
            function_evals: state.function_evals(),
            termination,
            backend: NAME,
        })
    }
}
