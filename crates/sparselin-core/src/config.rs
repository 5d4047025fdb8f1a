//! Optimizer configuration and validation.
//!
//! The optimizer variant is a closed enumeration resolved exactly once,
//! when the configuration is validated. The per-example hot paths carry
//! the resolved [`OptimizerVariant`] and never compare strings.
//!
//! # Example
//!
//! ```
//! use sparselin_core::config::{OptimizerConfig, OptimizerVariant};
//!
//! let config = OptimizerConfig::from_name("ftrl", 0.1, 0.0).unwrap();
//! assert_eq!(config.variant, OptimizerVariant::Ftrl);
//! assert_eq!(config.variant.slot_width(), 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// The supported optimizer variants.
///
/// The variant determines both the update rule and the per-feature slot
/// width of the parameter store:
///
/// - [`Adagrad`](OptimizerVariant::Adagrad): width 2,
///   `[weight, squared-gradient accumulator]`.
/// - [`Ftrl`](OptimizerVariant::Ftrl): width 3,
///   `[weight, squared-gradient accumulator n, lazy accumulator z]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptimizerVariant {
    /// Adaptive gradient: per-feature learning rates scaled by the inverse
    /// square root of the accumulated squared gradient.
    Adagrad,

    /// FTRL-proximal: lazily accumulated gradients with L1
    /// soft-thresholding, producing exact-zero (sparse) weights.
    Ftrl,
}

impl OptimizerVariant {
    /// Parses an optimizer key (e.g. `"adagrad"`).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownOptimizer`] for any other name.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "adagrad" => Ok(Self::Adagrad),
            "ftrl" => Ok(Self::Ftrl),
            _ => Err(CoreError::UnknownOptimizer {
                name: s.to_string(),
            }),
        }
    }

    /// Returns the canonical key for this variant.
    pub fn as_key(&self) -> &'static str {
        match self {
            OptimizerVariant::Adagrad => "adagrad",
            OptimizerVariant::Ftrl => "ftrl",
        }
    }

    /// Returns the number of parameter slots each feature occupies.
    #[inline]
    pub fn slot_width(&self) -> usize {
        match self {
            OptimizerVariant::Adagrad => 2,
            OptimizerVariant::Ftrl => 3,
        }
    }
}

/// Immutable optimizer configuration, fixed once per model.
///
/// Validation happens at construction; the scoring and update paths
/// assume a valid configuration and never re-check it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// The resolved optimizer variant.
    pub variant: OptimizerVariant,

    /// Learning rate for gradient updates. Must be positive and finite.
    ///
    /// The FTRL update rule derives its step size from its own alpha
    /// constant and does not consume this field.
    pub learning_rate: f32,

    /// L2 regularization strength applied to feature gradients by the
    /// Adagrad rule. Must be non-negative and finite.
    pub l2_reg: f32,
}

impl OptimizerConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidLearningRate`] if the learning rate is
    /// non-positive or non-finite, and [`CoreError::InvalidRegularization`]
    /// if the regularization strength is negative or non-finite.
    pub fn new(variant: OptimizerVariant, learning_rate: f32, l2_reg: f32) -> Result<Self> {
        let config = Self {
            variant,
            learning_rate,
            l2_reg,
        };
        config.validate()?;
        Ok(config)
    }

    /// Creates a validated configuration from an optimizer name.
    ///
    /// This is the entry point for callers holding a user-supplied string;
    /// the name is resolved to an [`OptimizerVariant`] here, once.
    pub fn from_name(name: &str, learning_rate: f32, l2_reg: f32) -> Result<Self> {
        let variant = OptimizerVariant::parse(name)?;
        Self::new(variant, learning_rate, l2_reg)
    }

    /// Re-checks the configuration's range invariants.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(CoreError::InvalidLearningRate {
                value: self.learning_rate,
            });
        }
        if !(self.l2_reg >= 0.0 && self.l2_reg.is_finite()) {
            return Err(CoreError::InvalidRegularization { value: self.l2_reg });
        }
        Ok(())
    }

    /// Returns the per-feature slot width implied by the variant.
    #[inline]
    pub fn slot_width(&self) -> usize {
        self.variant.slot_width()
    }
}
