//! Convenience functions for easier use of the library.

use crate::component::{Component, ComponentObjective};
use crate::error::OptimizeError;
use crate::optimizer::{Cmaes, Optimizer, Solution};
use crate::options::Problem;

const PRINT_GAP_EVALS: usize = 200;

/// Minimizes the Rosenbrock function over `problem` and returns the best solution found.
///
/// Equivalent to a default [`Cmaes`] with printing enabled, driving [`Problem::harness`].
/// [`Cmaes`] should be used directly if further configuration is desired.
///
/// # Examples
///
/// ```no_run
/// use rosenbrock_harness::ProblemOptions;
///
/// let problem = ProblemOptions::new(6).initial_point(vec![-1.0; 6]).build().unwrap();
/// let solution = rosenbrock_harness::fmin(&problem).unwrap();
/// ```
pub fn fmin(problem: &Problem) -> Result<Solution, OptimizeError> {
    Cmaes::new()
        .enable_printing(PRINT_GAP_EVALS)
        .minimize(problem, &problem.harness())
}

/// Like [`fmin`], but evaluates each generation in parallel using multiple threads.
pub fn fmin_parallel(problem: &Problem) -> Result<Solution, OptimizeError> {
    Cmaes::new()
        .parallel(true)
        .enable_printing(PRINT_GAP_EVALS)
        .minimize(problem, &problem.harness())
}

/// Like [`fmin`], but drives `component` through its `"x"` input and `"y"` output the way a
/// component framework's driver would.
///
/// Returns `Err` with `MalformedNamedInput` naming the missing declaration if the component does
/// not declare a vector `"x"` input and a scalar `"y"` output.
///
/// # Examples
///
/// ```no_run
/// use rosenbrock_harness::{ProblemOptions, RosenbrockComponent};
///
/// let problem = ProblemOptions::new(6).initial_point(vec![-1.0; 6]).build().unwrap();
/// let solution = rosenbrock_harness::fmin_component(&problem, RosenbrockComponent::new(6));
/// ```
pub fn fmin_component<C: Component>(
    problem: &Problem,
    component: C,
) -> Result<Solution, OptimizeError> {
    let objective = ComponentObjective::with_default_names(component)?;

    Cmaes::new()
        .enable_printing(PRINT_GAP_EVALS)
        .minimize(problem, &objective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Declaration, RosenbrockComponent};
    use crate::error::EvaluationError;
    use crate::named::NamedValues;
    use crate::options::ProblemOptions;

    /// Renames the declared input and output of a Rosenbrock component
    struct Misnamed {
        input: &'static str,
        output: &'static str,
    }

    impl Component for Misnamed {
        fn options(&self) -> Vec<Declaration> {
            Vec::new()
        }

        fn inputs(&self) -> Vec<Declaration> {
            RosenbrockComponent::new(2)
                .inputs()
                .into_iter()
                .map(|d| Declaration {
                    name: self.input,
                    ..d
                })
                .collect()
        }

        fn outputs(&self) -> Vec<Declaration> {
            RosenbrockComponent::new(2)
                .outputs()
                .into_iter()
                .map(|d| Declaration {
                    name: self.output,
                    ..d
                })
                .collect()
        }

        fn compute(
            &self,
            inputs: &NamedValues,
            outputs: &mut NamedValues,
        ) -> Result<(), EvaluationError> {
            RosenbrockComponent::new(2).compute(inputs, outputs)
        }
    }

    fn problem() -> Problem {
        ProblemOptions::new(3)
            .initial_point(vec![0.0; 3])
            .fun_target(1e-10)
            .build()
            .unwrap()
    }

    #[test]
    fn test_fmin() {
        let solution = fmin(&problem()).unwrap();
        assert!(solution.value < 1e-8, "{:?}", solution);

        let solution = fmin_parallel(&problem()).unwrap();
        assert!(solution.value < 1e-8, "{:?}", solution);
    }

    #[test]
    fn test_fmin_component() {
        let solution = fmin_component(&problem(), RosenbrockComponent::new(3)).unwrap();
        assert!(solution.value < 1e-8, "{:?}", solution);

        let problem = ProblemOptions::new(2).build().unwrap();
        let cases = [("z", "y", "x"), ("x", "cost", "y")];
        for (input, output, missing) in cases {
            assert_eq!(
                Err(OptimizeError::Evaluation(
                    EvaluationError::MalformedNamedInput {
                        name: missing.to_owned()
                    }
                )),
                fmin_component(&problem, Misnamed { input, output }),
            );
        }
    }
}
