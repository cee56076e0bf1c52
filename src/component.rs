//! Component-style evaluation, for frameworks that wire named inputs and outputs between
//! components and let a driver read a named objective.
//!
//! A [`Component`] declares its options and its named inputs and outputs up front, then computes
//! outputs from inputs. [`RosenbrockComponent`] is the Rosenbrock function in this shape, and
//! [`ComponentObjective`] lets any [`Optimizer`][crate::Optimizer] drive a component.

use nalgebra::DVector;

use crate::error::EvaluationError;
use crate::harness::{Harness, Objective};
use crate::named::{NamedValues, Value, INPUT_NAME, OUTPUT_NAME};

/// The shape of a declared input or output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    Vector(usize),
}

/// A declared input, output, or option of a component.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub name: &'static str,
    pub shape: Shape,
    /// The default value (for inputs and options).
    pub default: Option<Value>,
}

/// A unit of computation with declared, named inputs and outputs.
pub trait Component: Sync {
    /// Options fixed when the component is created.
    fn options(&self) -> Vec<Declaration>;

    fn inputs(&self) -> Vec<Declaration>;

    fn outputs(&self) -> Vec<Declaration>;

    /// Computes the outputs from `inputs` and writes them into `outputs`.
    fn compute(&self, inputs: &NamedValues, outputs: &mut NamedValues)
        -> Result<(), EvaluationError>;
}

/// The Rosenbrock function as a component with one vector input `x` and one scalar output `y`.
///
/// # Examples
///
/// ```
/// use rosenbrock_harness::{Component, NamedValues, RosenbrockComponent};
///
/// let component = RosenbrockComponent::new(2);
/// let mut outputs = NamedValues::new();
/// component
///     .compute(&NamedValues::design_vector(vec![1.0, 1.0]), &mut outputs)
///     .unwrap();
///
/// assert_eq!(outputs.scalar("y"), Some(0.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RosenbrockComponent {
    harness: Harness,
}

impl RosenbrockComponent {
    /// The name of the dimension option.
    pub const DIMENSIONS_OPTION: &'static str = "vec_size";

    pub fn new(dimensions: usize) -> Self {
        Self {
            harness: Harness::new(dimensions),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.harness.dimensions()
    }
}

impl Component for RosenbrockComponent {
    fn options(&self) -> Vec<Declaration> {
        vec![Declaration {
            name: Self::DIMENSIONS_OPTION,
            shape: Shape::Scalar,
            default: Some(Value::Scalar(self.dimensions() as f64)),
        }]
    }

    fn inputs(&self) -> Vec<Declaration> {
        vec![Declaration {
            name: INPUT_NAME,
            shape: Shape::Vector(self.dimensions()),
            default: Some(Value::Vector(DVector::zeros(self.dimensions()))),
        }]
    }

    fn outputs(&self) -> Vec<Declaration> {
        vec![Declaration {
            name: OUTPUT_NAME,
            shape: Shape::Scalar,
            default: None,
        }]
    }

    fn compute(
        &self,
        inputs: &NamedValues,
        outputs: &mut NamedValues,
    ) -> Result<(), EvaluationError> {
        self.harness.compute_named(inputs, outputs)
    }
}

/// Adapts a [`Component`] into an [`Objective`] by feeding the candidate vector to a named
/// design variable and reading the cost back from a named objective output.
///
/// The design variable must be a declared vector input; any other declared input that has a
/// default keeps it.
#[derive(Clone, Debug)]
pub struct ComponentObjective<C> {
    component: C,
    design_var: &'static str,
    objective: &'static str,
    dimensions: usize,
    base_inputs: NamedValues,
}

impl<C: Component> ComponentObjective<C> {
    /// Wires `design_var` to the optimizer's candidate and `objective` to the cost. Returns
    /// `MalformedNamedInput` naming the failing declaration if the component does not declare a
    /// vector input named `design_var` or a scalar output named `objective`.
    pub fn new(
        component: C,
        design_var: &'static str,
        objective: &'static str,
    ) -> Result<Self, EvaluationError> {
        let malformed = |name: &str| EvaluationError::MalformedNamedInput {
            name: name.to_owned(),
        };

        let inputs = component.inputs();
        let dimensions = match inputs.iter().find(|d| d.name == design_var) {
            Some(Declaration {
                shape: Shape::Vector(dimensions),
                ..
            }) => *dimensions,
            _ => return Err(malformed(design_var)),
        };

        let has_objective = component
            .outputs()
            .iter()
            .any(|d| d.name == objective && d.shape == Shape::Scalar);
        if !has_objective {
            return Err(malformed(objective));
        }

        let mut base_inputs = NamedValues::new();
        for declaration in inputs {
            if let Some(default) = declaration.default {
                base_inputs.insert(declaration.name, default);
            }
        }

        Ok(Self {
            component,
            design_var,
            objective,
            dimensions,
            base_inputs,
        })
    }

    /// Returns a `ComponentObjective` using the conventional names `x` and `y`.
    pub fn with_default_names(component: C) -> Result<Self, EvaluationError> {
        Self::new(component, INPUT_NAME, OUTPUT_NAME)
    }

    pub fn component(&self) -> &C {
        &self.component
    }
}

impl<C: Component> Objective for ComponentObjective<C> {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn evaluate(&self, x: &DVector<f64>) -> Result<f64, EvaluationError> {
        let mut inputs = self.base_inputs.clone();
        inputs.insert(self.design_var, x.clone());

        let mut outputs = NamedValues::new();
        self.component.compute(&inputs, &mut outputs)?;

        // A declared scalar output that was not written is a broken component, not bad input
        outputs
            .scalar(self.objective)
            .ok_or_else(|| EvaluationError::MalformedNamedInput {
                name: self.objective.to_owned(),
            })
    }
}
