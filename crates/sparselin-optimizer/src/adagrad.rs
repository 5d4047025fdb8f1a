//! Adaptive-gradient (Adagrad) update rule.
//!
//! Each feature carries a `[weight, accumulator]` slot pair. The
//! accumulator collects squared gradients, scaling every later step for
//! that feature by the inverse square root of the total:
//!
//! ```text
//! g    = pg * feature_value + l2_reg * weight
//! acc += g * g
//! w   -= learning_rate * g * inv_sqrt(acc)
//! ```
//!
//! The bias slot pair is updated the same way with an implicit feature
//! value of 1 and no l2 term.
//!
//! # Example
//!
//! ```
//! use sparselin_core::{OptimizerConfig, OptimizerVariant, SparseRow};
//! use sparselin_optimizer::{AdagradUpdater, Updater};
//! use sparselin_store::ParameterStore;
//!
//! let config = OptimizerConfig::new(OptimizerVariant::Adagrad, 0.1, 0.0).unwrap();
//! let updater = AdagradUpdater::new(config).unwrap();
//!
//! let mut store = ParameterStore::new(10, OptimizerVariant::Adagrad);
//! let row: SparseRow = vec![(3, 2.0)].into();
//! updater.apply_gradient(&row, &mut store, 0.3);
//! ```

use serde::{Deserialize, Serialize};

use sparselin_core::{OptimizerConfig, OptimizerVariant, SparseRow};
use sparselin_store::{ParameterStore, ACCUMULATOR, WEIGHT};

use crate::math::inv_sqrt;
use crate::{Updater, UpdaterError};

/// Adagrad updater for width-2 parameter stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdagradUpdater {
    /// Learning rate for gradient updates.
    learning_rate: f32,
    /// L2 regularization strength folded into feature gradients.
    l2_reg: f32,
    /// Configuration used to create this updater.
    config: OptimizerConfig,
}

impl AdagradUpdater {
    /// Creates a new Adagrad updater with the given parameters.
    pub fn with_params(learning_rate: f32, l2_reg: f32) -> Self {
        Self {
            learning_rate,
            l2_reg,
            config: OptimizerConfig {
                variant: OptimizerVariant::Adagrad,
                learning_rate,
                l2_reg,
            },
        }
    }
}

impl Updater for AdagradUpdater {
    fn new(config: OptimizerConfig) -> Result<Self, UpdaterError> {
        match config.variant {
            OptimizerVariant::Adagrad => Ok(Self {
                learning_rate: config.learning_rate,
                l2_reg: config.l2_reg,
                config,
            }),
            _ => Err(UpdaterError::ConfigMismatch {
                expected: OptimizerVariant::Adagrad.as_key(),
                got: config.variant.as_key(),
            }),
        }
    }

    fn apply_gradient(&self, row: &SparseRow, store: &mut ParameterStore, pg: f32) {
        debug_assert_eq!(store.slot_width(), self.slot_width());

        for entry in row {
            let slots = store.feature_mut(entry.feature_id);
            let g = pg * entry.feature_value + self.l2_reg * slots[WEIGHT];
            slots[ACCUMULATOR] += g * g;
            slots[WEIGHT] -= self.learning_rate * g * inv_sqrt(slots[ACCUMULATOR]);
        }

        // Bias: implicit feature value 1, no l2 term.
        let bias = store.bias_mut();
        bias[ACCUMULATOR] += pg * pg;
        bias[WEIGHT] -= self.learning_rate * pg * inv_sqrt(bias[ACCUMULATOR]);
    }

    fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    fn slot_width(&self) -> usize {
        OptimizerVariant::Adagrad.slot_width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_score;

    fn updater(learning_rate: f32, l2_reg: f32) -> AdagradUpdater {
        AdagradUpdater::with_params(learning_rate, l2_reg)
    }

    #[test]
    fn test_adagrad_concrete_scenario() {
        // row = [(3, 2.0)], feature 3 slots = [0.5, 0.0], bias = [0.1, 0.0].
        let mut store = ParameterStore::new(10, OptimizerVariant::Adagrad);
        store.feature_mut(3)[WEIGHT] = 0.5;
        store.bias_mut()[WEIGHT] = 0.1;

        let row: SparseRow = vec![(3, 2.0)].into();
        assert!((compute_score(&row, &store) - 1.1).abs() < 1e-6);

        // pg = 0.3, lr = 0.1, l2 = 0:
        //   feature: g = 0.6, acc = 0.36, w = 0.5 - 0.1*0.6/0.6 = 0.4
        //   bias:    g = 0.3, acc = 0.09, w = 0.1 - 0.1*0.3/0.3 = 0.0
        updater(0.1, 0.0).apply_gradient(&row, &mut store, 0.3);

        assert!((store.feature(3)[ACCUMULATOR] - 0.36).abs() < 1e-6);
        assert!((store.feature(3)[WEIGHT] - 0.4).abs() < 1e-6);
        assert!((store.bias()[ACCUMULATOR] - 0.09).abs() < 1e-6);
        assert!(store.bias()[WEIGHT].abs() < 1e-6);
    }

    #[test]
    fn test_zero_signal_zero_l2_is_noop() {
        let mut store = ParameterStore::new(4, OptimizerVariant::Adagrad);
        store.feature_mut(1)[WEIGHT] = 0.5;
        store.bias_mut()[WEIGHT] = 0.1;

        let row: SparseRow = vec![(1, 2.0)].into();
        updater(0.1, 0.0).apply_gradient(&row, &mut store, 0.0);

        // Weights bit-identical, accumulators incremented by zero; no NaN
        // from the zero-accumulator inverse square root.
        assert_eq!(store.feature(1)[WEIGHT], 0.5);
        assert_eq!(store.feature(1)[ACCUMULATOR], 0.0);
        assert_eq!(store.bias()[WEIGHT], 0.1);
        assert_eq!(store.bias()[ACCUMULATOR], 0.0);
    }

    #[test]
    fn test_second_update_is_smaller() {
        let mut store = ParameterStore::new(2, OptimizerVariant::Adagrad);
        let row: SparseRow = vec![(0, 1.0)].into();
        let upd = updater(0.1, 0.0);

        upd.apply_gradient(&row, &mut store, 1.0);
        let first_step = -store.feature(0)[WEIGHT];
        let after_first = store.feature(0)[WEIGHT];

        upd.apply_gradient(&row, &mut store, 1.0);
        let second_step = after_first - store.feature(0)[WEIGHT];

        // The growing accumulator shrinks later steps.
        assert!(second_step > 0.0);
        assert!(second_step < first_step);
    }

    #[test]
    fn test_l2_decays_weight_without_signal() {
        let mut store = ParameterStore::new(2, OptimizerVariant::Adagrad);
        store.feature_mut(0)[WEIGHT] = 1.0;

        let row: SparseRow = vec![(0, 1.0)].into();
        updater(0.1, 0.1).apply_gradient(&row, &mut store, 0.0);

        // g = 0.1 * 1.0, acc = 0.01, step = 0.1 * 0.1 / 0.1 = 0.1
        assert!((store.feature(0)[WEIGHT] - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_bias_ignores_l2() {
        let mut store = ParameterStore::new(2, OptimizerVariant::Adagrad);
        store.bias_mut()[WEIGHT] = 0.5;

        let row = SparseRow::new();
        updater(0.1, 0.5).apply_gradient(&row, &mut store, 1.0);

        // bias g = 1.0 (no l2 contribution), acc = 1.0, step = 0.1
        assert!((store.bias()[ACCUMULATOR] - 1.0).abs() < 1e-6);
        assert!((store.bias()[WEIGHT] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_duplicate_entries_update_sequentially() {
        let mut store = ParameterStore::new(2, OptimizerVariant::Adagrad);
        let row: SparseRow = vec![(0, 1.0), (0, 1.0)].into();

        updater(0.1, 0.0).apply_gradient(&row, &mut store, 1.0);

        // Each occurrence contributes its own accumulator increment.
        assert!((store.feature(0)[ACCUMULATOR] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_config_mismatch() {
        let config = OptimizerConfig::new(OptimizerVariant::Ftrl, 0.1, 0.0).unwrap();
        let result = AdagradUpdater::new(config);
        assert!(matches!(
            result,
            Err(UpdaterError::ConfigMismatch {
                expected: "adagrad",
                got: "ftrl"
            })
        ));
    }
}
