//! Objective function value history tracking.

use nalgebra::DVector;
use statrs::statistics::{Data, Median};

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::EvaluationError;
use crate::harness::Objective;

/// A single successful evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Record {
    /// The 1-based position of the evaluation among all calls, including rejected ones.
    pub evaluation: usize,
    /// The cost returned by the evaluation.
    pub value: f64,
    /// The lowest cost seen up to and including this evaluation.
    pub best_value: f64,
}

/// Summary statistics of a [`History`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    /// The number of successful evaluations.
    pub evaluations: usize,
    pub best_value: f64,
    pub median_value: f64,
    /// The cost of the latest successful evaluation.
    pub last_value: f64,
}

/// The costs returned to an optimizer, in the order they were returned.
#[derive(Clone, Debug, Default)]
pub struct History {
    records: Vec<Record>,
    /// Calls made so far, successful or not
    calls: usize,
    /// The point with the lowest cost seen so far
    best_point: Option<DVector<f64>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the number of calls recorded, including rejected ones.
    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Always `Some` if at least one successful evaluation has been recorded
    pub fn best(&self) -> Option<(&DVector<f64>, f64)> {
        let best_value = self.records.last()?.best_value;
        self.best_point.as_ref().map(|point| (point, best_value))
    }

    /// Records the outcome of one call.
    pub fn push(&mut self, x: &DVector<f64>, result: &Result<f64, EvaluationError>) {
        self.calls += 1;

        let value = match *result {
            Ok(value) => value,
            Err(_) => return,
        };

        let best_value = match self.records.last() {
            Some(last) if last.best_value <= value => last.best_value,
            _ => {
                self.best_point = Some(x.clone());
                value
            }
        };

        self.records.push(Record {
            evaluation: self.calls,
            value,
            best_value,
        });
    }

    /// Always `Some` if at least one successful evaluation has been recorded
    pub fn summary(&self) -> Option<Summary> {
        let last = self.records.last()?;
        let values = Data::new(self.records.iter().map(|r| r.value).collect::<Vec<_>>());

        Some(Summary {
            evaluations: self.records.len(),
            best_value: last.best_value,
            median_value: values.median(),
            last_value: last.value,
        })
    }

    /// Clears the history.
    pub fn clear(&mut self) {
        self.records.clear();
        self.calls = 0;
        self.best_point = None;
    }
}

/// Wraps an objective and records every call into a [`History`]. The history is behind a mutex,
/// so the wrapper can be driven by parallel back-ends; records are then ordered by the time the
/// call finished.
#[derive(Debug)]
pub struct Recorder<O> {
    objective: O,
    history: Mutex<History>,
}

impl<O: Objective> Recorder<O> {
    pub fn new(objective: O) -> Self {
        Self {
            objective,
            history: Mutex::new(History::new()),
        }
    }

    /// Returns a guard to the history recorded so far.
    pub fn history(&self) -> MutexGuard<'_, History> {
        self.lock()
    }

    /// Consumes `self` and returns the recorded history.
    pub fn into_history(self) -> History {
        self.history
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, History> {
        // A panic while pushing cannot leave a record half-written
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<O: Objective> Objective for Recorder<O> {
    fn dimensions(&self) -> usize {
        self.objective.dimensions()
    }

    fn evaluate(&self, x: &DVector<f64>) -> Result<f64, EvaluationError> {
        let result = self.objective.evaluate(x);
        self.lock().push(x, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::Harness;

    #[test]
    fn test_push() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert!(history.best().is_none());
        assert!(history.summary().is_none());

        let a = DVector::from(vec![1.0]);
        let b = DVector::from(vec![2.0]);

        history.push(&a, &Ok(5.0));
        history.push(&b, &Ok(3.0));
        history.push(&a, &Err(EvaluationError::NonFiniteInput {
            index: 0,
            value: f64::NAN,
        }));
        history.push(&a, &Ok(4.0));

        assert_eq!(history.calls(), 4);
        assert_eq!(history.len(), 3);
        assert_eq!(
            history.records(),
            &[
                Record {
                    evaluation: 1,
                    value: 5.0,
                    best_value: 5.0
                },
                Record {
                    evaluation: 2,
                    value: 3.0,
                    best_value: 3.0
                },
                Record {
                    evaluation: 4,
                    value: 4.0,
                    best_value: 3.0
                },
            ]
        );
        assert_eq!(history.best(), Some((&b, 3.0)));

        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.calls(), 0);
        assert!(history.best().is_none());
    }

    #[test]
    fn test_summary() {
        let mut history = History::new();
        let x = DVector::from(vec![0.0]);
        for value in [9.0, 1.0, 4.0, 16.0] {
            history.push(&x, &Ok(value));
        }

        let summary = history.summary().unwrap();
        assert_eq!(summary.evaluations, 4);
        assert_eq!(summary.best_value, 1.0);
        assert_approx_eq!(summary.median_value, 6.5);
        assert_eq!(summary.last_value, 16.0);
    }

    #[test]
    fn test_recorder() {
        let recorder = Recorder::new(Harness::new(2));

        let _ = recorder.evaluate(&DVector::from(vec![-1.0, -1.0]));
        let _ = recorder.evaluate(&DVector::from(vec![1.0, 1.0]));
        let _ = recorder.evaluate(&DVector::from(vec![1.0]));

        {
            let history = recorder.history();
            assert_eq!(history.calls(), 3);
            assert_eq!(history.len(), 2);
        }

        let history = recorder.into_history();
        assert_eq!(history.records()[0].value, 404.0);
        assert_eq!(history.best(), Some((&DVector::from(vec![1.0, 1.0]), 0.0)));
    }
}
