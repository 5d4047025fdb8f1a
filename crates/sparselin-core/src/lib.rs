//! Core types for the sparselin online linear learner.
//!
//! This crate provides the foundational types shared by the parameter
//! store, the scorer/updater, and the training loop:
//!
//! - **Feature ids**: dense, zero-based ids and the packed-slot index
//!   arithmetic built on them.
//! - **Sparse rows**: the ordered `(feature_id, feature_value)` list that
//!   represents one example's active features.
//! - **Optimizer configuration**: the closed variant enumeration and the
//!   validated `{variant, learning_rate, l2_reg}` triple, resolved once
//!   before training starts.
//! - **Error types**: structured configuration errors; the numeric hot
//!   paths themselves never fail.
//!
//! # Example
//!
//! ```
//! use sparselin_core::config::OptimizerConfig;
//! use sparselin_core::feature::SparseRow;
//!
//! let config = OptimizerConfig::from_name("adagrad", 0.1, 0.0).unwrap();
//! assert_eq!(config.slot_width(), 2);
//!
//! let mut row = SparseRow::new();
//! row.push(3, 2.0);
//! assert_eq!(row.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod feature;
pub mod fid;

pub use config::{OptimizerConfig, OptimizerVariant};
pub use error::{CoreError, Result};
pub use feature::{FeatureEntry, SparseRow};
pub use fid::FeatureId;
