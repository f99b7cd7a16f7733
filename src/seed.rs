// src/seed.rs
//! Seed Sequences
//!
//! A seed sequence turns a short list of 32-bit words into an arbitrarily long,
//! well-mixed list of words suitable for filling an engine's state. The mixing
//! follows the `std::seed_seq::generate` algorithm:
//!
//! ```text
//! b[i] = 0x8b8b8b8b                                   (initial fill)
//! T(x) = x ⊕ (x >> 27)
//! r1   = 1664525 · T(b[k] ⊕ b[k+p] ⊕ b[k-1])          (first pass, adds input words)
//! r3   = 1566083941 · T(b[k] + b[k+p] + b[k-1])       (second pass, xor-mixing)
//! ```
//!
//! All arithmetic is modulo 2^32 and all indices are modulo the output length.

use crate::error::{RandomError, RandomResult};

const FILL: u32 = 0x8b8b_8b8b;
const MULT_ADD: u32 = 1_664_525;
const MULT_XOR: u32 = 1_566_083_941;

/// Immutable sequence of seed words with deterministic diffusion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeedSeq {
    values: Vec<u32>,
}

impl SeedSeq {
    pub fn new<I: IntoIterator<Item = u32>>(values: I) -> Self {
        SeedSeq {
            values: values.into_iter().collect(),
        }
    }

    /// Build a sequence from caller-supplied numbers.
    ///
    /// Each number must be finite, non-negative and no larger than `u32::MAX`;
    /// fractional parts are truncated.
    pub fn from_numbers(numbers: &[f64]) -> RandomResult<Self> {
        let values = numbers
            .iter()
            .map(|&x| {
                if x.is_finite() && (0.0..=u32::MAX as f64).contains(&x) {
                    Ok(x.trunc() as u32)
                } else {
                    Err(RandomError::InvalidParameters {
                        parameter: "seed".to_string(),
                        value: x,
                        constraint: format!("must be a finite number in [0, {}]", u32::MAX),
                    })
                }
            })
            .collect::<RandomResult<Vec<u32>>>()?;
        Ok(SeedSeq { values })
    }

    /// Number of input words.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// The original input words.
    pub fn param(&self) -> &[u32] {
        &self.values
    }

    /// Produce `count` diffused words.
    pub fn generate(&self, count: usize) -> Vec<u32> {
        let n = count;
        if n == 0 {
            return Vec::new();
        }

        let mut b = vec![FILL; n];
        let s = self.values.len();
        let t = if n >= 623 {
            11
        } else if n >= 68 {
            7
        } else if n >= 39 {
            5
        } else if n >= 7 {
            3
        } else {
            (n - 1) / 2
        };
        let p = (n - t) / 2;
        let q = p + t;
        let m = (s + 1).max(n);

        let tmix = |x: u32| x ^ (x >> 27);

        for k in 0..m {
            let r1 = MULT_ADD.wrapping_mul(tmix(b[k % n] ^ b[(k + p) % n] ^ b[(k + n - 1) % n]));
            let r2 = if k == 0 {
                r1.wrapping_add(s as u32)
            } else if k <= s {
                r1.wrapping_add((k % n) as u32).wrapping_add(self.values[k - 1])
            } else {
                r1.wrapping_add((k % n) as u32)
            };
            b[(k + p) % n] = b[(k + p) % n].wrapping_add(r1);
            b[(k + q) % n] = b[(k + q) % n].wrapping_add(r2);
            b[k % n] = r2;
        }

        for k in m..m + n {
            let r3 = MULT_XOR.wrapping_mul(tmix(
                b[k % n]
                    .wrapping_add(b[(k + p) % n])
                    .wrapping_add(b[(k + n - 1) % n]),
            ));
            let r4 = r3.wrapping_sub((k % n) as u32);
            b[(k + p) % n] ^= r3;
            b[(k + q) % n] ^= r4;
            b[k % n] = r4;
        }

        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let a = SeedSeq::new([1, 2, 3]);
        let b = SeedSeq::new([1, 2, 3]);
        assert_eq!(a.generate(10), b.generate(10));
        assert_eq!(a.generate(624), b.generate(624));
    }

    #[test]
    fn test_generate_reference_values() {
        // std::seed_seq{1, 2, 3}.generate over 8 words
        let words = SeedSeq::new([1, 2, 3]).generate(8);
        assert_eq!(
            words,
            [
                3_275_708_407,
                3_360_503_653,
                2_494_732_693,
                2_179_803_546,
                3_073_202_457,
                3_129_723_206,
                1_631_503_729,
                3_486_643_711,
            ]
        );
    }

    #[test]
    fn test_generate_depends_on_input() {
        let a = SeedSeq::new([1, 2, 3]);
        let b = SeedSeq::new([1, 2, 4]);
        assert_ne!(a.generate(8), b.generate(8));
    }

    #[test]
    fn test_generate_count() {
        let seq = SeedSeq::new([7]);
        assert!(seq.generate(0).is_empty());
        assert_eq!(seq.generate(1).len(), 1);
        assert_eq!(seq.generate(5).len(), 5);
    }

    #[test]
    fn test_param_round_trip() {
        let seq = SeedSeq::new([42, 7, 0xdead_beef]);
        assert_eq!(seq.param(), &[42, 7, 0xdead_beef]);
        assert_eq!(seq.size(), 3);
        assert_eq!(SeedSeq::new(seq.param().iter().copied()), seq);
    }

    #[test]
    fn test_from_numbers() {
        let seq = SeedSeq::from_numbers(&[1.0, 2.9, 4294967295.0]).unwrap();
        assert_eq!(seq.param(), &[1, 2, u32::MAX]);

        assert!(SeedSeq::from_numbers(&[-1.0]).is_err());
        assert!(SeedSeq::from_numbers(&[f64::NAN]).is_err());
        assert!(SeedSeq::from_numbers(&[4294967296.0]).is_err());
    }

    #[test]
    fn test_empty_sequence_still_generates() {
        let seq = SeedSeq::default();
        let words = seq.generate(4);
        assert_eq!(words.len(), 4);
        assert!(words.iter().any(|&w| w != FILL));
    }
}
