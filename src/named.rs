//! Labeled input/output collections for frameworks that pass data by name rather than by
//! position.

use nalgebra::DVector;

use std::collections::BTreeMap;

/// The name of the design vector in a named input collection.
pub const INPUT_NAME: &str = "x";
/// The name of the cost in a named output collection.
pub const OUTPUT_NAME: &str = "y";

/// A single named entry.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(f64),
    Vector(DVector<f64>),
}

impl Value {
    pub fn as_scalar(&self) -> Option<f64> {
        match *self {
            Value::Scalar(value) => Some(value),
            Value::Vector(_) => None,
        }
    }

    pub fn as_vector(&self) -> Option<&DVector<f64>> {
        match *self {
            Value::Scalar(_) => None,
            Value::Vector(ref value) => Some(value),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(value)
    }
}

impl From<DVector<f64>> for Value {
    fn from(value: DVector<f64>) -> Self {
        Value::Vector(value)
    }
}

impl From<Vec<f64>> for Value {
    fn from(value: Vec<f64>) -> Self {
        Value::Vector(value.into())
    }
}

/// An ordered collection of named values.
///
/// # Examples
///
/// ```
/// use rosenbrock_harness::NamedValues;
///
/// let inputs = NamedValues::new().with("x", vec![1.0, 1.0]);
/// assert!(inputs.vector("x").is_some());
/// assert!(inputs.scalar("x").is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NamedValues {
    values: BTreeMap<String, Value>,
}

impl NamedValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a `NamedValues` containing only the design vector `x` under [`INPUT_NAME`].
    pub fn design_vector<V: Into<DVector<f64>>>(x: V) -> Self {
        Self::new().with(INPUT_NAME, Value::Vector(x.into()))
    }

    /// Inserts `value` under `name` and returns `self`.
    pub fn with<V: Into<Value>>(mut self, name: &str, value: V) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts `value` under `name`, returning the previous value if there was one.
    pub fn insert<V: Into<Value>>(&mut self, name: &str, value: V) -> Option<Value> {
        self.values.insert(name.to_owned(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns the entry under `name` if it is a scalar.
    pub fn scalar(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_scalar)
    }

    /// Returns the entry under `name` if it is a vector.
    pub fn vector(&self, name: &str) -> Option<&DVector<f64>> {
        self.get(name).and_then(Value::as_vector)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}
