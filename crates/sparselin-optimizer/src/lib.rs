//! Scoring and in-place gradient updates for sparselin.
//!
//! This crate is the numeric core of the learner. It computes linear
//! scores over sparse rows and mutates a [`ParameterStore`] in place with
//! one of two adaptive update rules, each implementing the [`Updater`]
//! trait:
//!
//! - [`AdagradUpdater`] - per-feature learning rates scaled by accumulated
//!   squared gradients (slot width 2)
//! - [`FtrlUpdater`] - FTRL-proximal with L1 soft-thresholding for sparse
//!   models (slot width 3)
//!
//! The variant is resolved from the configuration exactly once via
//! [`create_updater`]; the per-example hot path dispatches through the
//! resolved handle and never re-examines the configuration.
//!
//! # Example
//!
//! ```
//! use sparselin_core::{OptimizerConfig, SparseRow};
//! use sparselin_optimizer::{compute_score, create_updater};
//! use sparselin_store::ParameterStore;
//!
//! let config = OptimizerConfig::from_name("adagrad", 0.1, 0.0).unwrap();
//! let updater = create_updater(&config);
//!
//! let mut store = ParameterStore::new(100, config.variant);
//! let row: SparseRow = vec![(3, 2.0), (7, 1.0)].into();
//!
//! let score = compute_score(&row, &store);
//! updater.apply_gradient(&row, &mut store, score - 1.0);
//! ```

use thiserror::Error;

use sparselin_core::{OptimizerConfig, OptimizerVariant, SparseRow};
use sparselin_store::ParameterStore;

mod adagrad;
mod ftrl;
pub mod math;
mod score;

pub use adagrad::AdagradUpdater;
pub use ftrl::FtrlUpdater;
pub use score::compute_score;

/// Errors that can occur when constructing an updater.
#[derive(Debug, Error)]
pub enum UpdaterError {
    /// Configuration variant does not match the updater type.
    #[error("Config mismatch: expected {expected}, got {got}")]
    ConfigMismatch {
        /// The variant the updater requires.
        expected: &'static str,
        /// The variant the configuration carries.
        got: &'static str,
    },
}

/// Trait for gradient updaters.
///
/// An updater holds only its (validated, immutable) configuration; all
/// mutable state lives in the [`ParameterStore`] it is applied to. The
/// update call is a plain blocking function with no suspension points and
/// no failure path - numeric edge cases are defined results, and
/// capacity/width violations are prevented at construction time.
pub trait Updater: Sized {
    /// Creates a new updater from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UpdaterError::ConfigMismatch`] if the configuration's
    /// variant does not match the updater type.
    fn new(config: OptimizerConfig) -> Result<Self, UpdaterError>;

    /// Applies one example's gradient signal to the store, in place.
    ///
    /// Every feature entry in the row and the bias block are updated
    /// according to the updater's rule. Duplicate feature ids in the row
    /// are applied sequentially, each contributing its own accumulator
    /// increment.
    fn apply_gradient(&self, row: &SparseRow, store: &mut ParameterStore, pg: f32);

    /// Returns a reference to the updater's configuration.
    fn config(&self) -> &OptimizerConfig;

    /// Returns the per-feature slot width this updater requires of its
    /// parameter store.
    fn slot_width(&self) -> usize;
}

/// Creates an updater from the given configuration.
///
/// This is the once-per-model dispatch point: the closed variant
/// enumeration is matched here and nowhere on the per-example path.
///
/// # Example
///
/// ```
/// use sparselin_core::OptimizerConfig;
/// use sparselin_optimizer::create_updater;
///
/// let config = OptimizerConfig::from_name("ftrl", 0.1, 0.0).unwrap();
/// let updater = create_updater(&config);
/// assert_eq!(updater.slot_width(), 3);
/// ```
pub fn create_updater(config: &OptimizerConfig) -> Box<dyn UpdaterDyn + Send + Sync> {
    match config.variant {
        OptimizerVariant::Adagrad => Box::new(AdagradUpdater::with_params(
            config.learning_rate,
            config.l2_reg,
        )),
        OptimizerVariant::Ftrl => Box::new(FtrlUpdater::with_params(
            config.learning_rate,
            config.l2_reg,
        )),
    }
}

/// Dynamic dispatch version of the [`Updater`] trait.
///
/// This trait enables holding the resolved updater as a trait object once
/// the variant has been fixed.
pub trait UpdaterDyn {
    /// Applies one example's gradient signal to the store, in place.
    fn apply_gradient(&self, row: &SparseRow, store: &mut ParameterStore, pg: f32);

    /// Returns a reference to the updater's configuration.
    fn config(&self) -> &OptimizerConfig;

    /// Returns the per-feature slot width this updater requires.
    fn slot_width(&self) -> usize;
}

impl<T: Updater> UpdaterDyn for T {
    fn apply_gradient(&self, row: &SparseRow, store: &mut ParameterStore, pg: f32) {
        Updater::apply_gradient(self, row, store, pg)
    }

    fn config(&self) -> &OptimizerConfig {
        Updater::config(self)
    }

    fn slot_width(&self) -> usize {
        Updater::slot_width(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_updater_resolves_variant_once() {
        let adagrad = OptimizerConfig::from_name("adagrad", 0.1, 0.0).unwrap();
        let updater = create_updater(&adagrad);
        assert_eq!(updater.config().variant, OptimizerVariant::Adagrad);
        assert_eq!(updater.slot_width(), 2);

        let ftrl = OptimizerConfig::from_name("ftrl", 0.1, 0.0).unwrap();
        let updater = create_updater(&ftrl);
        assert_eq!(updater.config().variant, OptimizerVariant::Ftrl);
        assert_eq!(updater.slot_width(), 3);
    }

    #[test]
    fn test_updaters_keep_config() {
        let config = OptimizerConfig::from_name("adagrad", 0.05, 0.01).unwrap();
        let updater = AdagradUpdater::new(config).unwrap();
        assert_eq!(*Updater::config(&updater), config);
    }

    #[test]
    fn test_updater_serialization() {
        let updater = AdagradUpdater::with_params(0.1, 0.01);

        let serialized = serde_json::to_string(&updater).unwrap();
        let deserialized: AdagradUpdater = serde_json::from_str(&serialized).unwrap();

        assert_eq!(*Updater::config(&deserialized), *Updater::config(&updater));
    }

    #[test]
    fn test_update_through_dyn_handle() {
        let config = OptimizerConfig::from_name("adagrad", 0.1, 0.0).unwrap();
        let updater = create_updater(&config);
        let mut store = ParameterStore::new(4, config.variant);

        let row: SparseRow = vec![(0, 1.0)].into();
        updater.apply_gradient(&row, &mut store, 1.0);

        assert!(store.feature(0)[0] < 0.0);
    }
}
