//! General tests

use assert_approx_eq::assert_approx_eq;
use nalgebra::DVector;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use rosenbrock_harness::{
    rosenbrock_eval, Bipop, Cmaes, ComponentObjective, EvaluationCounter, Harness, NamedValues,
    Objective, Optimizer, Problem, ProblemOptions, Recorder, RosenbrockComponent,
};

use std::collections::HashMap;

// Number of times to repeat each optimization test
// Necessary to account for the inherent randomness of the algorithm and the local minimum of the
// Rosenbrock function in 4 to 7 dimensions
const TEST_REPETITIONS: usize = 20;
// Maximum function evaluations per run
const MAX_FUNCTION_EVALS: usize = 100_000;
const FUN_TARGET: f64 = 1e-10;

fn random_points(dim: usize, count: usize, seed: u64) -> Vec<DVector<f64>> {
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| DVector::from_fn(dim, |_, _| rng.gen_range(-5.0..=5.0)))
        .collect()
}

fn run_test<O: Objective>(
    problem: &Problem,
    objective: &O,
    max_failures: usize,
) {
    let mut failures = Vec::new();
    let mut reasons = HashMap::new();
    let mut total_evals = 0;

    for seed in 0..TEST_REPETITIONS as u64 {
        let solution = Cmaes::new()
            .seed(seed)
            .max_function_evals(MAX_FUNCTION_EVALS)
            .minimize(problem, objective)
            .unwrap();

        if !solution.reached(Some(1e-8)) {
            failures.push((solution.termination.clone(), solution.value));
        }
        *reasons.entry(solution.termination).or_insert(0) += 1;
        total_evals += solution.function_evals;
    }

    println!("avg function evals: {}", total_evals / TEST_REPETITIONS);
    println!("failures: {:?}", failures);
    println!("reasons: {:?}", reasons);
    assert!(
        failures.len() <= max_failures,
        "max failures exceeded: {:?}",
        failures,
    );
}

fn six_dimensional_problem() -> Problem {
    ProblemOptions::new(6)
        .initial_point(vec![-1.0; 6])
        .fun_target(FUN_TARGET)
        .build()
        .unwrap()
}

#[test]
fn test_global_minimum() {
    for dim in 2..40 {
        assert_eq!(rosenbrock_eval(&vec![1.0; dim]).unwrap(), 0.0);
        assert_eq!(Harness::new(dim).evaluate(&DVector::repeat(dim, 1.0)).unwrap(), 0.0);
    }
}

#[test]
fn test_properties() {
    for dim in [2, 3, 6, 10, 30] {
        let harness = Harness::new(dim);
        for x in random_points(dim, 200, dim as u64) {
            let direct = harness.evaluate(&x).unwrap();
            assert!(direct >= 0.0);
            assert!(direct > 0.0 || x.iter().all(|xi| *xi == 1.0));

            // Repeated calls are identical
            assert_eq!(direct.to_bits(), harness.evaluate(&x).unwrap().to_bits());

            // Both forms agree exactly
            let named = harness
                .evaluate_named(&NamedValues::design_vector(x.clone()))
                .unwrap()
                .scalar("y")
                .unwrap();
            assert_eq!(direct.to_bits(), named.to_bits());
        }
    }
}

#[test]
fn test_two_dimensional_closed_form() {
    for x in random_points(2, 500, 99) {
        let expected = 100.0 * (x[1] - x[0].powi(2)).powi(2) + (1.0 - x[0]).powi(2);
        assert_approx_eq!(expected, rosenbrock_eval(x.as_slice()).unwrap(), 1e-9 * expected.max(1.0));
    }
}

#[test]
fn test_reference_values() {
    assert_eq!(rosenbrock_eval(&[-1.0; 6]).unwrap(), 2020.0);
    assert_approx_eq!(
        3.2992e-5,
        rosenbrock_eval(&[1.0, 1.0, 1.0, 1.0, 1.0, 0.99942561]).unwrap(),
        1e-8
    );
}

#[test]
fn test_population_matches_direct() {
    let harness = Harness::new(10);
    let points = random_points(10, 64, 7);
    let values = harness.evaluate_population(&points);

    assert_eq!(values.len(), points.len());
    for (x, value) in points.iter().zip(values) {
        assert_eq!(value.unwrap(), harness.evaluate(x).unwrap());
    }
}

#[test]
fn test_cmaes_direct() {
    let problem = six_dimensional_problem();
    run_test(&problem, &problem.harness(), TEST_REPETITIONS / 2);
}

#[test]
fn test_cmaes_component() {
    let problem = six_dimensional_problem();
    let objective = ComponentObjective::with_default_names(RosenbrockComponent::new(6)).unwrap();
    run_test(&problem, &objective, TEST_REPETITIONS / 2);
}

#[test]
fn test_component_matches_harness() {
    let harness = Harness::new(6);
    let objective = ComponentObjective::with_default_names(RosenbrockComponent::new(6)).unwrap();

    for x in random_points(6, 100, 3) {
        assert_eq!(
            harness.evaluate(&x).unwrap().to_bits(),
            objective.evaluate(&x).unwrap().to_bits()
        );
    }
}

#[test]
fn test_counter_counts_every_call() {
    let problem = six_dimensional_problem();
    let counter = EvaluationCounter::new(problem.harness());
    let solution = Cmaes::new()
        .seed(4)
        .parallel(true)
        .max_function_evals(2000)
        .minimize(&problem, &counter)
        .unwrap();

    assert_eq!(solution.function_evals, counter.evaluations());
}

#[test]
fn test_bipop_within_bounds() {
    let problem = ProblemOptions::new(6)
        .bounds(vec![-2.0; 6], vec![4.0; 6])
        .fun_target(FUN_TARGET)
        .build()
        .unwrap();
    let recorder = Recorder::new(problem.harness());
    let solution = Bipop::new()
        .seed(8)
        .max_function_evals(1_000_000)
        .minimize(&problem, &recorder)
        .unwrap();

    assert!(solution.value < 1e-8, "{:?}", solution);
    assert!(problem.bounds().contains(&solution.point));

    let history = recorder.into_history();
    assert_eq!(history.calls(), solution.function_evals);
    for record in history.records() {
        assert!(record.value.is_finite());
    }
    let summary = history.summary().unwrap();
    assert_eq!(summary.best_value, solution.value);
    assert!(summary.median_value >= summary.best_value);
}

#[cfg(feature = "plotters")]
#[test]
fn test_recorded_plot() {
    use rosenbrock_harness::Plot;

    let problem = ProblemOptions::new(3)
        .initial_point(vec![0.0; 3])
        .fun_target(FUN_TARGET)
        .build()
        .unwrap();
    let recorder = Recorder::new(problem.harness());
    let _ = Cmaes::new()
        .seed(6)
        .minimize(&problem, &recorder)
        .unwrap();

    let path = format!("{}/test_output/test_recorded_plot.png", env!("CARGO_MANIFEST_DIR"));
    let plot = Plot::from_history(&recorder.history(), "CMA-ES n=3", problem.fun_target());
    assert!(!plot.is_empty());
    assert!(plot.save_to_file(path, true).is_ok());
}
