//! Zig-zag mapping (spec §4.D / §8): reversibly folds signed residuals
//! onto non-negative integers so the entropy coders only ever see
//! unsigned symbols.

/// `v < 0 ? -2v - 1 : 2v`.
pub fn zigzag(v: i64) -> u64 {
    ((v.wrapping_shl(1)) ^ (v >> 63)) as u64
}

/// Inverse of [`zigzag`].
pub fn unzigzag(u: u64) -> i64 {
    ((u >> 1) as i64) ^ -((u & 1) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(-1)]
    #[case(2)]
    #[case(-2)]
    #[case(i32::MAX as i64)]
    #[case(i32::MIN as i64)]
    fn roundtrips(#[case] v: i64) {
        assert_eq!(unzigzag(zigzag(v)), v);
    }

    #[test]
    fn small_values_map_in_increasing_pairs() {
        assert_eq!(zigzag(0), 0);
        assert_eq!(zigzag(-1), 1);
        assert_eq!(zigzag(1), 2);
        assert_eq!(zigzag(-2), 3);
        assert_eq!(zigzag(2), 4);
    }
}
