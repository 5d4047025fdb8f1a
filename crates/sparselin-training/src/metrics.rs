//! Training metrics collection and recording.
//!
//! This module provides the per-epoch metrics snapshot produced by the
//! trainer and a recorder that accumulates per-example observations into
//! running averages.

use serde::{Deserialize, Serialize};

/// Metrics aggregated over a stretch of training.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metrics {
    /// The average loss over the recorded examples.
    pub loss: f64,
    /// Classification accuracy (0.0 to 1.0), when the loss defines one.
    pub accuracy: Option<f64>,
    /// The global step at which these metrics were recorded.
    pub global_step: u64,
}

impl Metrics {
    /// Creates a new `Metrics` instance with the given loss and step.
    pub fn new(loss: f64, global_step: u64) -> Self {
        Self {
            loss,
            accuracy: None,
            global_step,
        }
    }

    /// Sets the accuracy metric.
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }
}

/// Accumulates per-example observations into running averages.
#[derive(Debug, Clone, Default)]
pub struct MetricsRecorder {
    /// Accumulated loss values.
    loss_sum: f64,
    /// Number of correct predictions among accuracy-bearing examples.
    correct_count: u64,
    /// Number of examples that carried a correctness verdict.
    accuracy_count: u64,
    /// Total number of examples recorded.
    count: u64,
}

impl MetricsRecorder {
    /// Creates a new empty `MetricsRecorder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one example's loss and, when the loss defines one, its
    /// correctness verdict.
    pub fn record_example(&mut self, loss: f64, correct: Option<bool>) {
        self.loss_sum += loss;
        self.count += 1;

        if let Some(correct) = correct {
            self.accuracy_count += 1;
            if correct {
                self.correct_count += 1;
            }
        }
    }

    /// Returns the number of examples recorded.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the average loss.
    ///
    /// Returns 0.0 if no examples have been recorded.
    pub fn average_loss(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.loss_sum / self.count as f64
        }
    }

    /// Returns the accuracy, if any correctness verdicts were recorded.
    pub fn accuracy(&self) -> Option<f64> {
        if self.accuracy_count == 0 {
            None
        } else {
            Some(self.correct_count as f64 / self.accuracy_count as f64)
        }
    }

    /// Computes aggregate metrics at the given global step.
    pub fn aggregate(&self, global_step: u64) -> Metrics {
        let mut metrics = Metrics::new(self.average_loss(), global_step);
        if let Some(accuracy) = self.accuracy() {
            metrics = metrics.with_accuracy(accuracy);
        }
        metrics
    }

    /// Resets the recorder to its initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
