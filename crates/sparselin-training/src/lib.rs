//! Training loop, losses, and metrics for the sparselin linear learner.
//!
//! This crate drives the numeric core: it streams labelled sparse rows
//! through score computation, derives the per-example gradient signal
//! from a loss, and applies in-place updates to the parameter store.
//!
//! - **Losses**: [`LogisticLoss`] (binary classification, labels in
//!   `{-1, +1}`) and [`SquaredLoss`] (regression).
//! - **Metrics**: per-epoch average loss and accuracy via
//!   [`MetricsRecorder`].
//! - **Trainer**: the single-process online loop with up-front dataset
//!   validation, `tracing`-based progress logging, and parallel batch
//!   prediction.
//!
//! # Example
//!
//! ```
//! use sparselin_core::OptimizerConfig;
//! use sparselin_training::{LogisticLoss, Trainer};
//!
//! let config = OptimizerConfig::from_name("ftrl", 0.1, 0.0).unwrap();
//! let mut trainer = Trainer::new(&config, 50, Box::new(LogisticLoss));
//!
//! let dataset = vec![
//!     (vec![(0, 1.0)].into(), 1.0),
//!     (vec![(1, 1.0)].into(), -1.0),
//! ];
//! trainer.fit(&dataset, 10).unwrap();
//! let score = trainer.predict(&vec![(0, 1.0)].into());
//! # let _ = score;
//! ```

pub mod loss;
pub mod metrics;
pub mod trainer;

pub use loss::{LogisticLoss, Loss, SquaredLoss};
pub use metrics::{Metrics, MetricsRecorder};
pub use trainer::{Example, Trainer};
