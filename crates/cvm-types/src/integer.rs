//! Canonical integer encoding.
//!
//! Integers are unbounded in the data model but bounded by the size of
//! their canonical encoding: the minimal little-endian two's-complement
//! byte sequence, with zero encoded as the empty sequence. Every size
//! limit in the guard layer is measured against [`encoded_len`].
//!
//! ```text
//!    0  → []
//!    1  → [01]
//!   -1  → [ff]
//!  127  → [7f]
//!  128  → [80 00]
//! -128  → [80]
//! -129  → [7f ff]
//! ```

use num_bigint::BigInt;
use num_traits::Zero;

/// Encode an integer into its canonical byte form.
pub fn encode(value: &BigInt) -> Vec<u8> {
    if value.is_zero() {
        return Vec::new();
    }
    value.to_signed_bytes_le()
}

/// Decode a little-endian two's-complement byte sequence.
///
/// Accepts non-minimal input (e.g. redundant sign bytes); the empty
/// sequence decodes to zero.
pub fn decode(bytes: &[u8]) -> BigInt {
    if bytes.is_empty() {
        return BigInt::zero();
    }
    BigInt::from_signed_bytes_le(bytes)
}

/// Length in bytes of the canonical encoding of `value`.
pub fn encoded_len(value: &BigInt) -> usize {
    encode(value).len()
}

/// Whether `value` encodes in at most `max_size` bytes.
pub fn within_size(value: &BigInt, max_size: usize) -> bool {
    encoded_len(value) <= max_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    fn int(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn test_zero_is_empty() {
        assert!(encode(&BigInt::zero()).is_empty());
        assert_eq!(encoded_len(&BigInt::zero()), 0);
        assert_eq!(decode(&[]), BigInt::zero());
    }

    #[test]
    fn test_small_values() {
        assert_eq!(encode(&int(1)), vec![0x01]);
        assert_eq!(encode(&int(-1)), vec![0xff]);
        assert_eq!(encode(&int(127)), vec![0x7f]);
        assert_eq!(encode(&int(128)), vec![0x80, 0x00]);
        assert_eq!(encode(&int(-128)), vec![0x80]);
        assert_eq!(encode(&int(-129)), vec![0x7f, 0xff]);
        assert_eq!(encode(&int(-256)), vec![0x00, 0xff]);
        assert_eq!(encode(&int(255)), vec![0xff, 0x00]);
    }

    #[test]
    fn test_decode_accepts_padding() {
        assert_eq!(decode(&[0x01, 0x00, 0x00]), int(1));
        assert_eq!(decode(&[0xff, 0xff]), int(-1));
        assert_eq!(decode(&[0x80, 0x00]), int(128));
    }

    #[test]
    fn test_size_boundary_at_32_bytes() {
        // 2^255 - 1 is the largest positive value that fits in 32 bytes.
        let max_positive = (BigInt::one() << 255u32) - 1;
        assert_eq!(encoded_len(&max_positive), 32);
        assert!(within_size(&max_positive, 32));

        let too_big = BigInt::one() << 255u32;
        assert_eq!(encoded_len(&too_big), 33);
        assert!(!within_size(&too_big, 32));

        let min_negative = -(BigInt::one() << 255u32);
        assert_eq!(encoded_len(&min_negative), 32);
        assert!(within_size(&min_negative, 32));
        assert!(!within_size(&(min_negative - 1), 32));
    }
}
