//! Feature id types and slot index arithmetic.
//!
//! Feature ids in sparselin are dense, zero-based integers: an external
//! mapping component has already translated raw feature strings or hashes
//! into a compact id space before rows reach this crate. No hashing
//! happens here.
//!
//! The parameter store packs every feature's slots contiguously, so the
//! flat index of a feature's block is always `feature_id * slot_width`.

/// A dense, zero-based feature id.
pub type FeatureId = u32;

/// Returns the flat index of the first slot for `feature_id` in a packed
/// parameter array of the given slot width.
///
/// # Examples
///
/// ```
/// use sparselin_core::fid::slot_base;
///
/// // Width-2 layout: [w0, acc0, w1, acc1, ...]
/// assert_eq!(slot_base(0, 2), 0);
/// assert_eq!(slot_base(3, 2), 6);
/// // Width-3 layout: [w0, n0, z0, w1, n1, z1, ...]
/// assert_eq!(slot_base(3, 3), 9);
/// ```
#[inline]
pub fn slot_base(feature_id: FeatureId, slot_width: usize) -> usize {
    feature_id as usize * slot_width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_base() {
        assert_eq!(slot_base(0, 2), 0);
        assert_eq!(slot_base(1, 2), 2);
        assert_eq!(slot_base(7, 2), 14);
        assert_eq!(slot_base(7, 3), 21);
    }
}
