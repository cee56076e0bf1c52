//! An example bridging the two styles: the named-field component is driven directly by CMA-ES,
//! with every evaluation counted on the caller's side.

use rosenbrock_harness::{
    fmin_component, Cmaes, ComponentObjective, EvaluationCounter, NamedValues, Optimizer,
    ProblemOptions, RosenbrockComponent,
};

fn main() {
    let dim = 6;
    let problem = ProblemOptions::new(dim)
        .initial_point(vec![-1.0; dim])
        .fun_target(1e-10)
        .build()
        .unwrap();

    // Named-field form of a single evaluation
    let outputs = problem
        .harness()
        .evaluate_named(&NamedValues::design_vector(vec![-1.0; dim]))
        .unwrap();
    println!("y([-1; {}]) = {:?}", dim, outputs.scalar("y"));

    // With the component wrapped by hand
    let objective = ComponentObjective::with_default_names(RosenbrockComponent::new(dim)).unwrap();
    let counter = EvaluationCounter::new(objective);
    let solution = Cmaes::new()
        .parallel(true)
        .enable_printing(500)
        .minimize(&problem, &counter)
        .unwrap();

    solution.print_results();
    println!("Counted evaluations: {}", counter.evaluations());

    // Or in a single line
    let solution = fmin_component(&problem, RosenbrockComponent::new(dim)).unwrap();
    solution.print_results();
}
