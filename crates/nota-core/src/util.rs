//! Shared utility functions used across multiple modules.

/// 32-bit string hash the original client used to pick placeholder accents.
///
/// `h = ((h << 5) - h) + unit`, truncated to 32 bits at every step, over
/// UTF-16 code units.
#[must_use]
pub fn string_hash(text: &str) -> i32 {
    let mut hash: i32 = 0;
    for unit in text.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    hash
}

/// Deterministic accent index for notes without an image.
#[must_use]
pub fn accent_index(id: &str, buckets: usize) -> usize {
    if buckets == 0 {
        return 0;
    }
    string_hash(id).unsigned_abs() as usize % buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn string_hash_matches_reference_values() {
        // h("a") = 97; h("ab") = 97 * 31 + 98
        assert_eq!(string_hash(""), 0);
        assert_eq!(string_hash("a"), 97);
        assert_eq!(string_hash("ab"), 97 * 31 + 98);
    }

    #[test]
    fn string_hash_truncates_to_32_bits() {
        // 97 * (31^6 + ... + 1) = 88_957_452_289, which wraps to a negative
        // 32-bit value instead of widening
        assert_eq!(string_hash("aaaaaaa"), -1_236_860_927);
    }

    #[test]
    fn accent_index_is_stable_and_bounded() {
        let index = accent_index("1718900000000", 5);
        assert!(index < 5);
        assert_eq!(accent_index("1718900000000", 5), index);
        assert_eq!(accent_index("anything", 0), 0);
    }
}
