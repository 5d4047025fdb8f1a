//! Error types for the sparselin core library.
//!
//! This module defines the error types raised during configuration
//! validation. The scoring and update hot paths never produce errors;
//! everything that can go wrong is rejected here, once, before training
//! starts.

use thiserror::Error;

/// The main error type for sparselin-core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Error when an optimizer name is not one of the supported variants.
    #[error("Unknown optimizer: {name}")]
    UnknownOptimizer {
        /// The optimizer name that was provided.
        name: String,
    },

    /// Error when the learning rate is out of range.
    #[error("Invalid learning rate: {value} (must be positive and finite)")]
    InvalidLearningRate {
        /// The learning rate that was provided.
        value: f32,
    },

    /// Error when the regularization strength is out of range.
    #[error("Invalid regularization strength: {value} (must be non-negative and finite)")]
    InvalidRegularization {
        /// The regularization strength that was provided.
        value: f32,
    },

    /// Error during configuration parsing or validation.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// A description of the configuration error.
        message: String,
    },
}

/// A specialized Result type for sparselin-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
