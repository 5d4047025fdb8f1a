//! Packed parameter storage for the sparselin online linear learner.
//!
//! This crate owns the model's memory: a flat, cache-friendly array of
//! per-feature parameter blocks plus a small bias block, with slot width
//! fixed by the optimizer variant at construction time. It provides
//! indexed access and nothing else; the update rules live in
//! `sparselin-optimizer`.
//!
//! # Example
//!
//! ```
//! use sparselin_core::OptimizerVariant;
//! use sparselin_store::{ParameterStore, WEIGHT};
//!
//! let mut store = ParameterStore::new(100, OptimizerVariant::Ftrl);
//! store.feature_mut(42)[WEIGHT] = 0.5;
//! assert_eq!(store.active_weights(), 1);
//! ```

mod error;
mod store;

pub use error::{Result, StoreError};
pub use store::{ParameterStore, ACCUMULATOR, LAZY, WEIGHT};
