//! Linear score computation.

use sparselin_core::SparseRow;
use sparselin_store::{ParameterStore, WEIGHT};

/// Computes the linear score `bias_weight + sum(weight * feature_value)`
/// over the row's entries.
///
/// This is a pure read: only each entry's weight slot and the bias weight
/// slot are touched, so the result is deterministic for a given row and
/// store state. Duplicate feature ids in the row accumulate additively.
/// An empty row scores the bias weight alone.
///
/// Works with either slot width; the weight is slot 0 of a feature's
/// block in both layouts.
///
/// # Example
///
/// ```
/// use sparselin_core::{OptimizerVariant, SparseRow};
/// use sparselin_optimizer::compute_score;
/// use sparselin_store::{ParameterStore, WEIGHT};
///
/// let mut store = ParameterStore::new(10, OptimizerVariant::Adagrad);
/// store.feature_mut(3)[WEIGHT] = 0.5;
/// store.bias_mut()[WEIGHT] = 0.1;
///
/// let row: SparseRow = vec![(3, 2.0)].into();
/// assert!((compute_score(&row, &store) - 1.1).abs() < 1e-6);
/// ```
pub fn compute_score(row: &SparseRow, store: &ParameterStore) -> f32 {
    let mut score = store.bias()[WEIGHT];
    for entry in row {
        score += store.feature(entry.feature_id)[WEIGHT] * entry.feature_value;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparselin_core::OptimizerVariant;

    #[test]
    fn test_empty_row_scores_bias_only() {
        let mut store = ParameterStore::new(4, OptimizerVariant::Adagrad);
        store.bias_mut()[WEIGHT] = 0.25;

        let row = SparseRow::new();
        assert_eq!(compute_score(&row, &store), 0.25);
    }

    #[test]
    fn test_score_sums_weight_times_value() {
        let mut store = ParameterStore::new(4, OptimizerVariant::Adagrad);
        store.feature_mut(0)[WEIGHT] = 1.0;
        store.feature_mut(2)[WEIGHT] = -0.5;
        store.bias_mut()[WEIGHT] = 0.1;

        let row: SparseRow = vec![(0, 2.0), (2, 4.0)].into();
        // 0.1 + 1.0*2.0 + (-0.5)*4.0
        assert!((compute_score(&row, &store) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_duplicate_ids_accumulate_additively() {
        let mut store = ParameterStore::new(4, OptimizerVariant::Adagrad);
        store.feature_mut(1)[WEIGHT] = 0.5;

        let once: SparseRow = vec![(1, 2.0)].into();
        let twice: SparseRow = vec![(1, 2.0), (1, 2.0)].into();

        let s1 = compute_score(&once, &store);
        let s2 = compute_score(&twice, &store);
        assert!((s2 - 2.0 * s1).abs() < 1e-6);
    }

    #[test]
    fn test_score_is_idempotent() {
        let mut store = ParameterStore::new(4, OptimizerVariant::Ftrl);
        store.feature_mut(3)[WEIGHT] = 0.7;
        store.bias_mut()[WEIGHT] = -0.2;

        let row: SparseRow = vec![(3, 1.5)].into();
        let first = compute_score(&row, &store);
        let second = compute_score(&row, &store);
        assert_eq!(first, second);
    }

    #[test]
    fn test_score_reads_weight_slot_in_ftrl_layout() {
        let mut store = ParameterStore::new(4, OptimizerVariant::Ftrl);
        store.feature_mut(2)[WEIGHT] = 0.5;
        // Auxiliary slots must not leak into the score.
        store.feature_mut(2)[1] = 99.0;
        store.feature_mut(2)[2] = 99.0;

        let row: SparseRow = vec![(2, 2.0)].into();
        assert!((compute_score(&row, &store) - 1.0).abs() < 1e-6);
    }
}
