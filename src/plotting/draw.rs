//! Drawing of the recorded data points to the plot

use plotters::chart::ChartBuilder;
use plotters::coord;
use plotters::coord::combinators::{IntoLogRange, LogCoord};
use plotters::drawing::DrawingArea;
use plotters::element::Rectangle;
use plotters::series::LineSeries;
use plotters::style::{colors, Color};

use super::{Backend, DrawingError, Plot};

/// Costs are lifted to at least this value so an exact zero can be drawn on a log scale
const LOG_FLOOR: f64 = 1e-20;

/// Draws the cost, best cost and target cost against function evaluations.
///
/// No text is drawn, so no font backend is needed. Each power of ten gets a gray horizontal line
/// in place of axis labels.
pub fn draw_convergence<'a>(
    plot: &Plot,
    area: &DrawingArea<Backend<'a>, coord::Shift>,
) -> Result<(), DrawingError<'a>> {
    let values = plot.values.iter().map(|y| lift(*y));
    let best_values = plot.best_values.iter().map(|y| lift(*y));
    let target = plot.fun_target.filter(|t| *t > 0.0);

    let (log_min, log_max) = log_bounds(values.clone().chain(target));
    let (y_min, y_max) = (10f64.powf(log_min), 10f64.powf(log_max));
    let y_range: LogCoord<f64> = (y_min..y_max).log_scale().into();

    let x_end = *plot.evaluations.last().unwrap_or(&0);
    let x_max = ((x_end as f64 * 1.05) as usize).max(x_end + 1);

    let mut context = ChartBuilder::on(area)
        .margin(30)
        .build_cartesian_2d(0..x_max, y_range)?;

    for decade in decades(log_min, log_max) {
        let line = vec![(0, decade), (x_max, decade)];
        context.draw_series(LineSeries::new(line, &colors::BLACK.mix(0.15)))?;
    }

    let series = [
        (values.collect::<Vec<_>>(), colors::BLUE),
        (best_values.collect::<Vec<_>>(), colors::RED),
    ];
    for (ys, color) in series {
        let points = plot.evaluations.iter().cloned().zip(ys);
        context.draw_series(LineSeries::new(points, &color))?;
    }

    if let Some(target) = target {
        let line = vec![(0, target), (x_end, target)];
        context.draw_series(LineSeries::new(line, &colors::GREEN))?;
    }

    context.plotting_area().draw(&Rectangle::new(
        [(0, y_min), (x_max, y_max)],
        colors::BLACK.stroke_width(2),
    ))?;

    Ok(())
}

/// Returns the powers of ten between the two base-10 exponents.
fn decades(log_min: f64, log_max: f64) -> impl Iterator<Item = f64> {
    (log_min.ceil() as i32..=log_max.floor() as i32).map(|k| 10f64.powi(k))
}

/// Lifts a cost to at least `LOG_FLOOR`. Costs are never negative.
fn lift(y: f64) -> f64 {
    y.max(0.0) + LOG_FLOOR
}

/// Returns the base-10 exponents bounding all values, with a small margin at either end. Falls
/// back to a single decade around the floor if there are no finite values.
fn log_bounds<I: Iterator<Item = f64>>(iter: I) -> (f64, f64) {
    // Margin to be added to the top and bottom of the range
    let margin = 0.4;
    let (min, max) = iter
        .filter(|y| y.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), y| {
            (min.min(y), max.max(y))
        });

    if min > max {
        let floor = LOG_FLOOR.log10();
        (floor - margin, floor + 1.0 + margin)
    } else {
        (min.log10() - margin, max.log10() + margin)
    }
}
