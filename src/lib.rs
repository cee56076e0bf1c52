//! The N-dimensional Rosenbrock function behind an evaluation harness, ready to be driven by
//! black-box optimizers.
//!
//! The objective itself is [`rosenbrock_eval`]. A [`Harness`] presents it under the two calling
//! conventions optimizers commonly expect: a direct form taking a design vector, and a
//! named-field form reading `"x"` and writing `"y"`. Both forms share one validated code path, so
//! they always agree.
//!
//! # Quick Start
//!
//! Describe the problem with [`ProblemOptions`], then hand its harness to any [`Optimizer`]:
//!
//! ```no_run
//! use rosenbrock_harness::{Cmaes, Optimizer, ProblemOptions};
//!
//! let dim = 6;
//! let problem = ProblemOptions::new(dim)
//!     .initial_point(vec![-1.0; dim])
//!     .fun_target(1e-10)
//!     .build()
//!     .unwrap();
//!
//! let solution = Cmaes::new()
//!     .enable_printing(200)
//!     .minimize(&problem, &problem.harness())
//!     .unwrap();
//!
//! solution.print_results();
//! ```
//!
//! The [`component`] module exposes the named-field form as a component with declared inputs
//! and outputs, for frameworks that wire components together. [`Recorder`] and [`Plot`] record
//! and draw the costs seen during a run.

// The objective lives in `rosenbrock` and is validated there. `harness` wraps it in the direct and
// named-field forms and defines the `Objective` trait that optimizers consume.
//
// `options` builds a validated `Problem` (dimension, bounds, target cost, initial point).
//
// The `optimizer` back-ends delegate the search to the `cmaes` crate. Evaluation errors cross
// that boundary through a bridge that stores the first error and stops the run.
//
// `history` and `plotting` are caller-side observers: they wrap an objective and never change
// the costs it returns.

mod bounds;
pub mod component;
pub mod error;
pub mod functions;
pub mod harness;
pub mod history;
pub mod named;
pub mod optimizer;
pub mod options;
#[cfg(feature = "plotters")]
pub mod plotting;
mod rosenbrock;

pub use nalgebra::DVector;

pub use crate::bounds::Bounds;
pub use crate::component::{Component, ComponentObjective, Declaration, RosenbrockComponent, Shape};
pub use crate::error::{EvaluationError, InvalidOptionsError, OptimizeError};
pub use crate::functions::{fmin, fmin_component, fmin_parallel};
pub use crate::harness::{EvaluationCounter, Harness, Objective};
pub use crate::history::{History, Record, Recorder, Summary};
pub use crate::named::{NamedValues, Value, INPUT_NAME, OUTPUT_NAME};
pub use crate::optimizer::{Bipop, Cmaes, Optimizer, Solution};
pub use crate::options::{Problem, ProblemOptions, DEFAULT_RANGE};
#[cfg(feature = "plotters")]
pub use crate::plotting::{Plot, PlotError};
pub use crate::rosenbrock::{rosenbrock_eval, MIN_DIMENSIONS};
