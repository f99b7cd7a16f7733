// src/engines/mersenne.rs
//! MT19937 and MT19937-64 on top of `rand_mt`.
//!
//! Scalar seeds use the reference `init_genrand` routine. A seed sequence
//! fills the state words directly, as `<random>` does: rand_mt only accepts
//! a raw state as the tempered outputs it would have produced, so each word
//! is tempered first and the state recovered from those outputs.

use super::RawEngine;
use crate::seed::SeedSeq;
use rand_mt::{Mt19937GenRand32, Mt19937GenRand64};

pub const DEFAULT_SEED: u64 = 5489;
const N32: usize = 624;
const N64: usize = 312;

fn temper32(mut y: u32) -> u32 {
    y ^= y >> 11;
    y ^= (y << 7) & 0x9d2c_5680;
    y ^= (y << 15) & 0xefc6_0000;
    y ^ (y >> 18)
}

fn temper64(mut y: u64) -> u64 {
    y ^= (y >> 29) & 0x5555_5555_5555_5555;
    y ^= (y << 17) & 0x71d6_7fff_eda6_0000;
    y ^= (y << 37) & 0xfff7_eee0_0000_0000;
    y ^ (y >> 43)
}

#[derive(Debug, Clone)]
pub struct Mt32(Mt19937GenRand32);

#[derive(Debug, Clone)]
pub struct Mt64(Mt19937GenRand64);

impl Mt32 {
    pub fn new(seed: u64) -> Self {
        Mt32(Mt19937GenRand32::new(seed as u32))
    }

    pub fn from_seed_seq(seq: &SeedSeq) -> Self {
        let mut outputs = [0u32; N32];
        for (slot, word) in outputs.iter_mut().zip(seq.generate(N32)) {
            *slot = temper32(word);
        }
        Mt32(Mt19937GenRand32::from(outputs))
    }
}

impl Mt64 {
    pub fn new(seed: u64) -> Self {
        Mt64(Mt19937GenRand64::new(seed))
    }

    /// Two generated words per state word, low word first.
    pub fn from_seed_seq(seq: &SeedSeq) -> Self {
        let words = seq.generate(2 * N64);
        let mut outputs = [0u64; N64];
        for (slot, pair) in outputs.iter_mut().zip(words.chunks_exact(2)) {
            *slot = temper64(u64::from(pair[0]) | (u64::from(pair[1]) << 32));
        }
        Mt64(Mt19937GenRand64::from(outputs))
    }
}

impl Default for Mt32 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Default for Mt64 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RawEngine for Mt32 {
    fn next_value(&mut self) -> u64 {
        u64::from(self.0.next_u32())
    }

    fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    fn reseed_with(&mut self, seq: &SeedSeq) {
        *self = Self::from_seed_seq(seq);
    }

    fn min_value(&self) -> u64 {
        0
    }

    fn max_value(&self) -> u64 {
        u64::from(u32::MAX)
    }
}

impl RawEngine for Mt64 {
    fn next_value(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    fn reseed_with(&mut self, seq: &SeedSeq) {
        *self = Self::from_seed_seq(seq);
    }

    fn min_value(&self) -> u64 {
        0
    }

    fn max_value(&self) -> u64 {
        u64::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mt32_first_output() {
        let mut mt = Mt32::default();
        assert_eq!(mt.next_value(), 3_499_211_612);
    }

    #[test]
    fn test_seed_is_reduced_to_32_bits() {
        let mut a = Mt32::new(1 << 32 | 17);
        let mut b = Mt32::new(17);
        for _ in 0..10 {
            assert_eq!(a.next_value(), b.next_value());
        }
    }

    #[test]
    fn test_seed_seq_construction_is_repeatable() {
        let seq = SeedSeq::new([1, 2, 3]);
        let mut a = Mt32::from_seed_seq(&seq);
        let mut b = Mt32::from_seed_seq(&seq);
        for _ in 0..700 {
            assert_eq!(a.next_value(), b.next_value());
        }

        let mut c = Mt64::from_seed_seq(&seq);
        let mut d = Mt64::from_seed_seq(&seq);
        for _ in 0..400 {
            assert_eq!(c.next_value(), d.next_value());
        }
    }

    #[test]
    fn test_temper_is_not_identity() {
        assert_eq!(temper32(0), 0);
        assert_ne!(temper32(1), 1);
        assert_ne!(temper64(1), 1);
    }

    #[test]
    fn test_seed_seq_differs_from_scalar() {
        let seq = SeedSeq::new([5489]);
        let mut a = Mt64::from_seed_seq(&seq);
        let mut b = Mt64::default();
        assert_ne!(a.next_value(), b.next_value());
    }
}
