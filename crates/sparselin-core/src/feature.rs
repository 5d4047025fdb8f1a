//! Sparse row abstractions for sparselin.
//!
//! This module provides the per-example input representation used by the
//! scorer and updaters:
//!
//! - [`FeatureEntry`]: an immutable `(feature_id, feature_value)` pair.
//! - [`SparseRow`]: the ordered list of active (non-zero) features of one
//!   example.
//!
//! Rows preserve insertion order and do not deduplicate feature ids: each
//! occurrence of an id contributes independently to the score and to
//! gradient accumulation. Callers that want one contribution per feature
//! must deduplicate before building the row.

use serde::{Deserialize, Serialize};

use crate::fid::FeatureId;

/// A single active feature of one example.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureEntry {
    /// The dense, zero-based feature id.
    pub feature_id: FeatureId,

    /// The feature value.
    pub feature_value: f32,
}

impl FeatureEntry {
    /// Creates a new feature entry.
    #[inline]
    pub fn new(feature_id: FeatureId, feature_value: f32) -> Self {
        Self {
            feature_id,
            feature_value,
        }
    }
}

/// The active features of one example, in insertion order.
///
/// A `SparseRow` is a finite, restartable sequence: iterating it twice
/// yields the same entries in the same order.
///
/// # Examples
///
/// ```
/// use sparselin_core::feature::SparseRow;
///
/// let mut row = SparseRow::new();
/// row.push(3, 2.0);
/// row.push(7, -1.0);
/// assert_eq!(row.len(), 2);
/// assert_eq!(row.max_feature_id(), Some(7));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseRow {
    entries: Vec<FeatureEntry>,
}

impl SparseRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an empty row with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends a feature to the row.
    ///
    /// Duplicate ids are kept as-is; each occurrence contributes
    /// independently during scoring and updates.
    #[inline]
    pub fn push(&mut self, feature_id: FeatureId, feature_value: f32) {
        self.entries.push(FeatureEntry::new(feature_id, feature_value));
    }

    /// Returns the number of active features in the row.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the row has no active features.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the row's entries, in insertion order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, FeatureEntry> {
        self.entries.iter()
    }

    /// Returns the row's entries as a slice.
    #[inline]
    pub fn entries(&self) -> &[FeatureEntry] {
        &self.entries
    }

    /// Returns the largest feature id in the row, if any.
    ///
    /// Useful for sizing a parameter store from a dataset.
    pub fn max_feature_id(&self) -> Option<FeatureId> {
        self.entries.iter().map(|e| e.feature_id).max()
    }

    /// Removes all entries from the row, keeping its allocation.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl From<Vec<(FeatureId, f32)>> for SparseRow {
    fn from(pairs: Vec<(FeatureId, f32)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(id, value)| FeatureEntry::new(id, value))
                .collect(),
        }
    }
}

impl FromIterator<(FeatureId, f32)> for SparseRow {
    fn from_iter<T: IntoIterator<Item = (FeatureId, f32)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(id, value)| FeatureEntry::new(id, value))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SparseRow {
    type Item = &'a FeatureEntry;
    type IntoIter = std::slice::Iter<'a, FeatureEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_row_push() {
        let mut row = SparseRow::new();
        assert!(row.is_empty());

        row.push(0, 1.0);
        row.push(5, -2.5);

        assert_eq!(row.len(), 2);
        assert_eq!(row.entries()[0], FeatureEntry::new(0, 1.0));
        assert_eq!(row.entries()[1], FeatureEntry::new(5, -2.5));
    }

    #[test]
    fn test_sparse_row_preserves_order_and_duplicates() {
        let mut row = SparseRow::new();
        row.push(3, 1.0);
        row.push(1, 2.0);
        row.push(3, 4.0);

        let ids: Vec<_> = row.iter().map(|e| e.feature_id).collect();
        assert_eq!(ids, vec![3, 1, 3]);
    }

    #[test]
    fn test_sparse_row_restartable_iteration() {
        let row: SparseRow = vec![(1, 1.0), (2, 2.0)].into();

        let first: Vec<_> = row.iter().copied().collect();
        let second: Vec<_> = row.iter().copied().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sparse_row_max_feature_id() {
        let empty = SparseRow::new();
        assert_eq!(empty.max_feature_id(), None);

        let row: SparseRow = vec![(4, 1.0), (9, 1.0), (2, 1.0)].into();
        assert_eq!(row.max_feature_id(), Some(9));
    }

    #[test]
    fn test_sparse_row_from_iterator() {
        let row: SparseRow = (0..3).map(|i| (i, i as f32)).collect();
        assert_eq!(row.len(), 3);
        assert_eq!(row.entries()[2], FeatureEntry::new(2, 2.0));
    }

    #[test]
    fn test_sparse_row_clear() {
        let mut row: SparseRow = vec![(1, 1.0)].into();
        row.clear();
        assert!(row.is_empty());
    }

    #[test]
    fn test_sparse_row_serialization() {
        let row: SparseRow = vec![(1, 0.5), (2, -0.5)].into();
        let serialized = serde_json::to_string(&row).unwrap();
        let deserialized: SparseRow = serde_json::from_str(&serialized).unwrap();
        assert_eq!(row, deserialized);
    }
}
