//! The packed parameter arena.
//!
//! All model parameters live in one contiguous `Vec<f32>`, partitioned
//! into per-feature blocks of a fixed slot width determined by the
//! optimizer variant, plus a separate bias block of the same width. The
//! block for feature `i` starts at flat index `i * slot_width`.
//!
//! Contiguity is the point: the update loop walks a row's features and
//! touches a handful of adjacent slots per feature, so the layout must
//! stay a flat owned buffer with index arithmetic, never a keyed map.

use sparselin_core::fid::slot_base;
use sparselin_core::{FeatureId, OptimizerVariant, SparseRow};

use crate::error::{Result, StoreError};

/// Slot offset of the weight within a feature's block (any variant).
pub const WEIGHT: usize = 0;

/// Slot offset of the squared-gradient accumulator (any variant).
pub const ACCUMULATOR: usize = 1;

/// Slot offset of the lazy accumulator `z` (FTRL variant only).
pub const LAZY: usize = 2;

/// A flat, fixed-capacity array of per-feature parameter blocks plus a
/// bias block.
///
/// The store is allocated once when the model is built, mutated in place
/// by every gradient application, and holds no behavior beyond indexed
/// access. Its slot width is fixed at construction and must match the
/// optimizer variant used for every subsequent update.
///
/// Indices are a construction-time responsibility: the store is sized for
/// a known feature space and the accessors do plain slice indexing. Use
/// [`ParameterStore::ensure_fits`] to validate a dataset once, before the
/// training loop starts.
///
/// # Example
///
/// ```
/// use sparselin_core::OptimizerVariant;
/// use sparselin_store::ParameterStore;
///
/// let mut store = ParameterStore::new(10, OptimizerVariant::Adagrad);
/// assert_eq!(store.slot_width(), 2);
///
/// store.feature_mut(3)[0] = 0.5;
/// assert_eq!(store.feature(3), &[0.5, 0.0]);
/// assert_eq!(store.bias(), &[0.0, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct ParameterStore {
    /// Per-feature slots, `num_features * slot_width` values.
    slots: Vec<f32>,

    /// The bias block, `slot_width` values.
    bias: Vec<f32>,

    /// Number of features the store is sized for.
    num_features: usize,

    /// Slots per feature (2 for Adagrad, 3 for FTRL).
    slot_width: usize,
}

impl ParameterStore {
    /// Allocates a zero-initialized store sized for `num_features`
    /// features, with the slot width implied by the optimizer variant.
    pub fn new(num_features: usize, variant: OptimizerVariant) -> Self {
        Self::with_slot_width(num_features, variant.slot_width())
    }

    /// Allocates a zero-initialized store with an explicit slot width.
    pub fn with_slot_width(num_features: usize, slot_width: usize) -> Self {
        Self {
            slots: vec![0.0; num_features * slot_width],
            bias: vec![0.0; slot_width],
            num_features,
            slot_width,
        }
    }

    /// Returns the slot block for one feature.
    #[inline]
    pub fn feature(&self, feature_id: FeatureId) -> &[f32] {
        let base = slot_base(feature_id, self.slot_width);
        &self.slots[base..base + self.slot_width]
    }

    /// Returns the mutable slot block for one feature.
    #[inline]
    pub fn feature_mut(&mut self, feature_id: FeatureId) -> &mut [f32] {
        let base = slot_base(feature_id, self.slot_width);
        &mut self.slots[base..base + self.slot_width]
    }

    /// Returns the bias block.
    #[inline]
    pub fn bias(&self) -> &[f32] {
        &self.bias
    }

    /// Returns the mutable bias block.
    #[inline]
    pub fn bias_mut(&mut self) -> &mut [f32] {
        &mut self.bias
    }

    /// Returns the number of features the store is sized for.
    #[inline]
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Returns the slots-per-feature width.
    #[inline]
    pub fn slot_width(&self) -> usize {
        self.slot_width
    }

    /// Returns a read-only view of the whole per-feature arena.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.slots
    }

    /// Returns whether a feature id is within the store's capacity.
    #[inline]
    pub fn contains(&self, feature_id: FeatureId) -> bool {
        (feature_id as usize) < self.num_features
    }

    /// Validates that every feature id in the row is within capacity.
    ///
    /// Intended to run once per dataset at model-construction time, not
    /// per update call.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CapacityExceeded`] naming the first
    /// out-of-range id.
    pub fn ensure_fits(&self, row: &SparseRow) -> Result<()> {
        for entry in row {
            if !self.contains(entry.feature_id) {
                return Err(StoreError::CapacityExceeded {
                    feature_id: entry.feature_id,
                    num_features: self.num_features,
                });
            }
        }
        Ok(())
    }

    /// Validates that the store's slot width matches an optimizer's
    /// expectation. Run once when store and updater are wired together.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::WidthMismatch`] if the widths differ.
    pub fn check_width(&self, expected: usize) -> Result<()> {
        if self.slot_width != expected {
            return Err(StoreError::WidthMismatch {
                expected,
                actual: self.slot_width,
            });
        }
        Ok(())
    }

    /// Returns the number of features with a nonzero weight slot.
    ///
    /// With the FTRL variant this measures the model's sparsity.
    pub fn active_weights(&self) -> usize {
        self.slots
            .chunks_exact(self.slot_width)
            .filter(|block| block[WEIGHT] != 0.0)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_layout_adagrad() {
        let store = ParameterStore::new(4, OptimizerVariant::Adagrad);
        assert_eq!(store.num_features(), 4);
        assert_eq!(store.slot_width(), 2);
        assert_eq!(store.values().len(), 8);
        assert_eq!(store.bias().len(), 2);
    }

    #[test]
    fn test_store_layout_ftrl() {
        let store = ParameterStore::new(4, OptimizerVariant::Ftrl);
        assert_eq!(store.slot_width(), 3);
        assert_eq!(store.values().len(), 12);
        assert_eq!(store.bias().len(), 3);
    }

    #[test]
    fn test_feature_blocks_are_disjoint() {
        let mut store = ParameterStore::new(3, OptimizerVariant::Adagrad);

        store.feature_mut(0)[WEIGHT] = 1.0;
        store.feature_mut(1)[WEIGHT] = 2.0;
        store.feature_mut(1)[ACCUMULATOR] = 0.5;
        store.feature_mut(2)[WEIGHT] = 3.0;

        assert_eq!(store.feature(0), &[1.0, 0.0]);
        assert_eq!(store.feature(1), &[2.0, 0.5]);
        assert_eq!(store.feature(2), &[3.0, 0.0]);
        assert_eq!(store.values(), &[1.0, 0.0, 2.0, 0.5, 3.0, 0.0]);
    }

    #[test]
    fn test_bias_block_independent_of_features() {
        let mut store = ParameterStore::new(2, OptimizerVariant::Ftrl);
        store.bias_mut()[WEIGHT] = 0.1;
        store.bias_mut()[LAZY] = -0.2;

        assert_eq!(store.bias(), &[0.1, 0.0, -0.2]);
        assert_eq!(store.feature(0), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_ensure_fits() {
        let store = ParameterStore::new(5, OptimizerVariant::Adagrad);

        let ok: SparseRow = vec![(0, 1.0), (4, 1.0)].into();
        assert!(store.ensure_fits(&ok).is_ok());

        let too_big: SparseRow = vec![(0, 1.0), (5, 1.0)].into();
        let err = store.ensure_fits(&too_big).unwrap_err();
        assert!(matches!(
            err,
            StoreError::CapacityExceeded {
                feature_id: 5,
                num_features: 5
            }
        ));
    }

    #[test]
    fn test_check_width() {
        let store = ParameterStore::new(2, OptimizerVariant::Adagrad);
        assert!(store.check_width(2).is_ok());
        assert!(matches!(
            store.check_width(3).unwrap_err(),
            StoreError::WidthMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_active_weights() {
        let mut store = ParameterStore::new(4, OptimizerVariant::Ftrl);
        assert_eq!(store.active_weights(), 0);

        store.feature_mut(1)[WEIGHT] = -0.25;
        store.feature_mut(3)[WEIGHT] = 0.5;
        // Auxiliary slots don't count.
        store.feature_mut(2)[ACCUMULATOR] = 1.0;

        assert_eq!(store.active_weights(), 2);
    }
}
