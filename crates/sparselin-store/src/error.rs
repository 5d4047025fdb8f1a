//! Error types for parameter store operations.

use thiserror::Error;

use sparselin_core::FeatureId;

/// Errors that can occur when wiring a parameter store to a model.
///
/// These are construction-time errors only; the slot accessors on the hot
/// path perform no checked operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store's slot width doesn't match the optimizer variant in use.
    #[error("slot width mismatch: expected {expected}, got {actual}")]
    WidthMismatch {
        /// Slot width required by the optimizer variant.
        expected: usize,
        /// Slot width the store was built with.
        actual: usize,
    },

    /// A feature id exceeds the store's fixed capacity.
    #[error("feature id {feature_id} exceeds store capacity ({num_features} features)")]
    CapacityExceeded {
        /// The offending feature id.
        feature_id: FeatureId,
        /// Number of features the store was sized for.
        num_features: usize,
    },
}

/// A specialized Result type for parameter store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
