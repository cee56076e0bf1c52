//! An example of minimizing within per-coordinate bounds using BIPOP restarts, recording every
//! evaluation and saving a convergence plot.

use rosenbrock_harness::{Bipop, Optimizer, Plot, ProblemOptions, Recorder};

fn main() {
    let dim = 6;
    let problem = ProblemOptions::new(dim)
        .bounds(
            vec![-2.0, -2.0, 0.0, 0.0, -5.0, -5.0],
            vec![2.0, 2.0, 3.0, 3.0, 5.0, 5.0],
        )
        .fun_target(1e-10)
        .build()
        .unwrap();

    let recorder = Recorder::new(problem.harness());
    let solution = Bipop::new()
        .max_function_evals(1_000_000)
        .enable_printing(true)
        .minimize(&problem, &recorder)
        .unwrap();

    solution.print_results();
    println!("Within bounds: {}", problem.bounds().contains(&solution.point));

    let history = recorder.into_history();
    if let Some(summary) = history.summary() {
        println!(
            "{} evaluations, best {:e}, median {:e}, last {:e}",
            summary.evaluations, summary.best_value, summary.median_value, summary.last_value
        );
    }

    // Save the plot
    Plot::from_history(&history, "BIPOP-CMA-ES", problem.fun_target())
        .save_to_file(
            format!("{}/test_output/bounded_restarts.png", env!("CARGO_MANIFEST_DIR")),
            true,
        )
        .unwrap();
}
