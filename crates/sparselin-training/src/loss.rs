//! Per-example loss functions.
//!
//! A loss turns a raw linear score and a label into the scalar gradient
//! signal the updaters consume. The core update rules never see the loss;
//! they only receive the derived signal, so new losses plug in without
//! touching the numeric paths.
//!
//! - [`LogisticLoss`]: binary classification with labels in `{-1, +1}`.
//! - [`SquaredLoss`]: regression.

/// Trait for per-example losses.
pub trait Loss: Send + Sync {
    /// Returns the loss name.
    fn name(&self) -> &'static str;

    /// Computes the loss value for one example.
    fn loss(&self, score: f32, label: f32) -> f32;

    /// Computes the per-example gradient signal `d loss / d score`.
    fn gradient(&self, score: f32, label: f32) -> f32;

    /// Returns whether the score counts as a correct prediction, when the
    /// notion applies (classification losses only).
    fn correct(&self, _score: f32, _label: f32) -> Option<bool> {
        None
    }
}

/// Logistic loss for binary classification with labels in `{-1, +1}`:
/// `loss = ln(1 + exp(-y * score))`.
///
/// The gradient signal is `-y / (1 + exp(y * score))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogisticLoss;

impl Loss for LogisticLoss {
    fn name(&self) -> &'static str {
        "logistic"
    }

    fn loss(&self, score: f32, label: f32) -> f32 {
        let margin = label * score;
        // ln(1 + exp(-m)) without overflowing for large negative margins.
        if margin > 0.0 {
            (-margin).exp().ln_1p()
        } else {
            -margin + margin.exp().ln_1p()
        }
    }

    fn gradient(&self, score: f32, label: f32) -> f32 {
        -label / (1.0 + (label * score).exp())
    }

    fn correct(&self, score: f32, label: f32) -> Option<bool> {
        Some(score * label > 0.0)
    }
}

/// Squared loss for regression: `loss = 0.5 * (score - label)^2`.
///
/// The gradient signal is `score - label`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredLoss;

impl Loss for SquaredLoss {
    fn name(&self) -> &'static str {
        "squared"
    }

    fn loss(&self, score: f32, label: f32) -> f32 {
        let residual = score - label;
        0.5 * residual * residual
    }

    fn gradient(&self, score: f32, label: f32) -> f32 {
        score - label
    }
}
