//! An example of the direct form: a plain closure over the design vector, handed to a single
//! CMA-ES run.

use rosenbrock_harness::{Cmaes, DVector, Harness, Optimizer, ProblemOptions};

fn main() {
    let dim = 6;
    let harness = Harness::new(dim);

    // The direct contract, as any functional optimizer interface expects it
    let function = |x: &DVector<f64>| harness.evaluate(x);
    println!("f([-1; {}]) = {}", dim, function(&DVector::repeat(dim, -1.0)).unwrap());

    let problem = ProblemOptions::new(dim)
        .initial_point(vec![-1.0; dim])
        .fun_target(1e-10)
        .build()
        .unwrap();

    let solution = Cmaes::new()
        .initial_step_size(0.5)
        .enable_printing(200)
        .minimize(&problem, &harness)
        .unwrap();

    solution.print_results();
    println!("Cost at the reported point: {:e}", harness.evaluate(&solution.point).unwrap());
    println!("Reached target: {}", solution.reached(problem.fun_target()));
}
