//! Hamming-distance comparison of fingerprints.

use crate::error::CompareError;

use super::fingerprint::Fingerprint;

pub use crate::config::DEFAULT_SIMILARITY_THRESHOLD;

/// Count the bit positions at which `a` and `b` differ.
///
/// Fingerprints of different length are not comparable.
pub fn hamming_distance(a: &Fingerprint, b: &Fingerprint) -> Result<u32, CompareError> {
    if a.len_bits() != b.len_bits() {
        return Err(CompareError::LengthMismatch {
            left: a.len_bits(),
            right: b.len_bits(),
        });
    }
    Ok(a
        .as_bytes()
        .iter()
        .zip(b.as_bytes())
        .map(|(x, y)| (x ^ y).count_ones())
        .sum())
}

/// Whether two fingerprints are within `threshold` bits of each other.
///
/// Fails open: a comparison error is logged and reported as "not similar",
/// so a broken fingerprint can never block a submission.
pub fn are_similar(a: &Fingerprint, b: &Fingerprint, threshold: u32) -> bool {
    match hamming_distance(a, b) {
        Ok(distance) => distance <= threshold,
        Err(e) => {
            // Only reachable if the grid size changed mid-session
            tracing::error!("Fingerprint comparison failed, treating as distinct: {e}");
            false
        }
    }
}

/// [`are_similar`] for hex-encoded fingerprints. Malformed input is "not similar".
pub fn are_similar_hex(a: &str, b: &str, threshold: u32) -> bool {
    match (Fingerprint::from_hex(a), Fingerprint::from_hex(b)) {
        (Ok(a), Ok(b)) => are_similar(&a, &b, threshold),
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!("Fingerprint comparison failed, treating as distinct: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(hex: &str) -> Fingerprint {
        Fingerprint::from_hex(hex).unwrap()
    }

    fn full(byte: u8) -> Fingerprint {
        Fingerprint::from_bits((0..1024).map(|i| byte & (0x80 >> (i % 8)) != 0))
    }

    #[test]
    fn test_identical_distance_zero() {
        let a = full(0xA5);
        assert_eq!(hamming_distance(&a, &a), Ok(0));
    }

    #[test]
    fn test_distance_counts_differing_bits() {
        assert_eq!(hamming_distance(&fp("00"), &fp("ff")), Ok(8));
        assert_eq!(hamming_distance(&fp("0f00"), &fp("0f01")), Ok(1));
        assert_eq!(hamming_distance(&full(0x00), &full(0xFF)), Ok(1024));
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = fp("13579bdf");
        let b = fp("2468ace0");
        assert_eq!(hamming_distance(&a, &b), hamming_distance(&b, &a));
    }

    #[test]
    fn test_length_mismatch() {
        let long = full(0x00);
        let short = Fingerprint::from_bits((0..512).map(|_| false));
        assert_eq!(
            hamming_distance(&long, &short),
            Err(CompareError::LengthMismatch {
                left: 1024,
                right: 512
            })
        );
    }

    #[test]
    fn test_similar_fails_open_on_mismatch() {
        let long = full(0x00);
        let short = Fingerprint::from_bits((0..512).map(|_| false));
        assert!(!are_similar(&long, &short, 1024));
    }

    #[test]
    fn test_self_similar_at_zero_threshold() {
        let a = full(0x3C);
        assert!(are_similar(&a, &a, 0));
    }

    #[test]
    fn test_threshold_boundary_and_monotonicity() {
        // Distance 4
        let a = fp("0000");
        let b = fp("0f00");
        assert!(!are_similar(&a, &b, 3));
        for t in 4..=16 {
            assert!(are_similar(&a, &b, t));
        }
    }

    #[test]
    fn test_default_threshold() {
        assert_eq!(DEFAULT_SIMILARITY_THRESHOLD, 10);
    }

    #[test]
    fn test_similar_hex_malformed_is_false() {
        assert!(!are_similar_hex("zz", "zz", 10));
        assert!(are_similar_hex("ab", "ab", 0));
        assert!(!are_similar_hex("ab", "abcd", 10));
    }
}
