//! FTRL-proximal update rule.
//!
//! FTRL is an online learner that combines a lazily accumulated gradient
//! sum with L1 soft-thresholding, producing exact-zero weights for
//! features whose accumulated signal stays inside the threshold. Each
//! feature carries a `[weight, n, z]` slot triple:
//!
//! ```text
//! g     = pg * feature_value
//! old_n = n;  n += g*g
//! sigma = (sqrt(n) - sqrt(old_n)) / alpha
//! z    += g - sigma * weight
//! if |z| <= lambda1:
//!     weight = 0
//! else:
//!     smooth_lr = 1 / (lambda2 + (beta + sqrt(n)) / alpha)
//!     z -= sign(z) * lambda1
//!     weight = -smooth_lr * z
//! ```
//!
//! Note that `z` is shrunk toward zero in place: the stored value is the
//! post-threshold one.
//!
//! The bias slot triple is driven by the negated signal (`g = -pg`), has
//! no feature-value multiplier, and accumulates `z += g` without the
//! `sigma * weight` correction. This asymmetry is a fixed property of the
//! bias term; the thresholding and `smooth_lr` step are identical.

use serde::{Deserialize, Serialize};

use sparselin_core::{OptimizerConfig, OptimizerVariant, SparseRow};
use sparselin_store::{ParameterStore, ACCUMULATOR, LAZY, WEIGHT};

use crate::{Updater, UpdaterError};

/// Step-size constant of the adaptive schedule.
pub const ALPHA: f32 = 1e-2;

/// Smoothing constant of the adaptive schedule.
pub const BETA: f32 = 1.0;

/// L1 threshold; accumulated signals within it yield exact-zero weights.
pub const LAMBDA1: f32 = 1e-1;

/// L2 term of the smoothed learning rate.
pub const LAMBDA2: f32 = 0.0;

/// FTRL-proximal updater for width-3 parameter stores.
///
/// The schedule constants above are fixed, not configuration-driven; the
/// configured learning rate and l2 strength are not consumed by this
/// rule (alpha plays the step-size role).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FtrlUpdater {
    /// Configuration used to create this updater.
    config: OptimizerConfig,
}

impl FtrlUpdater {
    /// Creates a new FTRL updater with the given parameters.
    pub fn with_params(learning_rate: f32, l2_reg: f32) -> Self {
        Self {
            config: OptimizerConfig {
                variant: OptimizerVariant::Ftrl,
                learning_rate,
                l2_reg,
            },
        }
    }

    /// Helper function to compute sign.
    fn sign(x: f32) -> f32 {
        if x > 0.0 {
            1.0
        } else if x < 0.0 {
            -1.0
        } else {
            0.0
        }
    }

    /// Applies the thresholding step shared by the feature and bias
    /// paths: zeroes the weight inside the L1 band, otherwise shrinks
    /// `z` in place and takes the adaptively scaled step.
    #[inline]
    fn threshold(slots: &mut [f32]) {
        if slots[LAZY].abs() <= LAMBDA1 {
            slots[WEIGHT] = 0.0;
        } else {
            let smooth_lr = 1.0 / (LAMBDA2 + (BETA + slots[ACCUMULATOR].sqrt()) / ALPHA);
            slots[LAZY] -= Self::sign(slots[LAZY]) * LAMBDA1;
            slots[WEIGHT] = -smooth_lr * slots[LAZY];
        }
    }
}

impl Updater for FtrlUpdater {
    fn new(config: OptimizerConfig) -> Result<Self, UpdaterError> {
        match config.variant {
            OptimizerVariant::Ftrl => Ok(Self { config }),
            _ => Err(UpdaterError::ConfigMismatch {
                expected: OptimizerVariant::Ftrl.as_key(),
                got: config.variant.as_key(),
            }),
        }
    }

    fn apply_gradient(&self, row: &SparseRow, store: &mut ParameterStore, pg: f32) {
        debug_assert_eq!(store.slot_width(), self.slot_width());

        for entry in row {
            let g = pg * entry.feature_value;
            let slots = store.feature_mut(entry.feature_id);

            let old_n = slots[ACCUMULATOR];
            slots[ACCUMULATOR] += g * g;
            let sigma = (slots[ACCUMULATOR].sqrt() - old_n.sqrt()) / ALPHA;
            slots[LAZY] += g - sigma * slots[WEIGHT];

            Self::threshold(slots);
        }

        // Bias: negated signal, no sigma correction.
        let g = -pg;
        let bias = store.bias_mut();
        bias[ACCUMULATOR] += g * g;
        bias[LAZY] += g;

        Self::threshold(bias);
    }

    fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    fn slot_width(&self) -> usize {
        OptimizerVariant::Ftrl.slot_width()
    }
}
