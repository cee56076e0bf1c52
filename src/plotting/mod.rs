//! Convergence plots. See [`Plot`] for usage and what is plotted.

mod draw;

use plotters::drawing::{DrawingAreaErrorKind, IntoDrawingArea};
use plotters::prelude::{BitMapBackend, DrawingBackend};
use plotters::style::colors;
use thiserror::Error;

use std::fs::DirBuilder;
use std::io;
use std::path::Path;

use crate::history::History;

/// The drawing backend to use for rendering the plot.
pub type Backend<'a> = BitMapBackend<'a>;
/// The error type returned by drawing functions.
pub type DrawingError<'a> = DrawingAreaErrorKind<<Backend<'a> as DrawingBackend>::ErrorType>;

/// The height of plot images in pixels.
pub const PLOT_HEIGHT: u32 = 900;
/// The width of plot images in pixels.
pub const PLOT_WIDTH: u32 = 1200;

/// A convergence plot built from a [`History`]. Should be saved with
/// [`save_to_file`][Self::save_to_file].
///
/// Plots against the number of function evaluations, on a log scale:
/// - Cost of each successful evaluation (blue)
/// - Best cost found so far (red)
/// - Target cost, if one is given (green)
///
/// The image has no text. Gray horizontal lines mark each power of ten. The title is kept with the
/// plot data for callers that label images themselves.
///
/// # Examples
///
/// ```no_run
/// use rosenbrock_harness::{Cmaes, Optimizer, Plot, ProblemOptions, Recorder};
///
/// let problem = ProblemOptions::new(6).build().unwrap();
/// let recorder = Recorder::new(problem.harness());
/// let _ = Cmaes::new().minimize(&problem, &recorder).unwrap();
///
/// Plot::from_history(&recorder.history(), "CMA-ES", problem.fun_target())
///     .save_to_file("plot.png", true)
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Plot {
    title: String,
    evaluations: Vec<usize>,
    values: Vec<f64>,
    best_values: Vec<f64>,
    fun_target: Option<f64>,
}

impl Plot {
    /// Copies the data points out of `history`.
    pub fn from_history(history: &History, title: &str, fun_target: Option<f64>) -> Self {
        let records = history.records();
        Self {
            title: title.to_owned(),
            evaluations: records.iter().map(|r| r.evaluation).collect(),
            values: records.iter().map(|r| r.value).collect(),
            best_values: records.iter().map(|r| r.best_value).collect(),
            fun_target,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the number of data points in the plot.
    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }

    /// Saves the plot to a bitmap image file. Recursively creates the necessary directories if
    /// `create_dirs` is `true`.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P, create_dirs: bool) -> Result<(), PlotError> {
        if self.is_empty() {
            return Err(PlotError::Empty);
        }

        let path = path.as_ref();
        if create_dirs {
            if let Some(parent) = path.parent() {
                DirBuilder::new().recursive(true).create(parent)?;
            }
        }

        let root_area = Backend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
        root_area.fill(&colors::WHITE)?;
        draw::draw_convergence(self, &root_area)?;
        root_area.present()?;
        Ok(())
    }
}

/// An error produced while creating or saving a plot.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("drawing error: {0}")]
    Drawing(#[from] DrawingError<'static>),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// The history had no successful evaluations.
    #[error("no data points to plot")]
    Empty,
}
