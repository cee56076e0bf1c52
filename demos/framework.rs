//! An example of the component/driver pattern: the Rosenbrock function is declared as a component
//! with a vector input `x` and a scalar output `y`, and a driver minimizes `y` by varying `x`.

use rosenbrock_harness::{
    Cmaes, Component, ComponentObjective, Optimizer, ProblemOptions, RosenbrockComponent,
};

fn main() {
    let dim = 6;
    let component = RosenbrockComponent::new(dim);

    println!("Options:");
    for declaration in component.options() {
        println!("  {}: {:?}", declaration.name, declaration.default);
    }
    println!("Inputs:");
    for declaration in component.inputs() {
        println!("  {}: {:?}", declaration.name, declaration.shape);
    }
    println!("Outputs:");
    for declaration in component.outputs() {
        println!("  {}: {:?}", declaration.name, declaration.shape);
    }

    // Design variable `x` bounded to [-10, 10]^N, objective `y`
    let problem = ProblemOptions::new(dim)
        .uniform_bounds(-10.0..=10.0)
        .initial_point(vec![-1.0; dim])
        .fun_target(1e-10)
        .build()
        .unwrap();
    let driver = ComponentObjective::new(component, "x", "y").unwrap();

    let solution = Cmaes::new()
        .seed(42)
        .enable_printing(500)
        .minimize(&problem, &driver)
        .unwrap();

    solution.print_results();
}
