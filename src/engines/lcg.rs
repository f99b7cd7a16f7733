// src/engines/lcg.rs
//! Multiplicative linear congruential engines (`minstd_rand0`, `minstd_rand`).
//!
//! ```text
//! x_{n+1} = a · x_n  mod m,   m = 2^31 - 1
//! ```
//!
//! The state is never zero, so the output range is [1, m - 1].

use super::RawEngine;
use crate::seed::SeedSeq;

pub const MODULUS: u64 = 2_147_483_647;
pub const DEFAULT_SEED: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearCongruential<const A: u64> {
    state: u64,
}

/// Park–Miller "minimal standard" with multiplier 16807.
pub type MinStdRand0 = LinearCongruential<16_807>;
/// Park–Miller revised multiplier 48271.
pub type MinStdRand = LinearCongruential<48_271>;

impl<const A: u64> LinearCongruential<A> {
    pub fn new(seed: u64) -> Self {
        let mut engine = LinearCongruential { state: 0 };
        engine.reseed(seed);
        engine
    }

    pub fn from_seed_seq(seq: &SeedSeq) -> Self {
        let mut engine = LinearCongruential { state: 0 };
        engine.reseed_with(seq);
        engine
    }

    fn normalize(value: u64) -> u64 {
        match value % MODULUS {
            0 => 1,
            s => s,
        }
    }
}

impl<const A: u64> Default for LinearCongruential<A> {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl<const A: u64> RawEngine for LinearCongruential<A> {
    fn next_value(&mut self) -> u64 {
        self.state = (A * self.state) % MODULUS;
        self.state
    }

    fn reseed(&mut self, seed: u64) {
        self.state = Self::normalize(seed);
    }

    fn reseed_with(&mut self, seq: &SeedSeq) {
        // One 32-bit word covers the modulus: generate(k + 3) with k = 1.
        let words = seq.generate(4);
        self.state = Self::normalize(u64::from(words[3]));
    }

    /// Jump ahead by multiplying with a^n mod m.
    fn discard(&mut self, n: u64) {
        self.state = (self.state * pow_mod(A, n, MODULUS)) % MODULUS;
    }

    fn min_value(&self) -> u64 {
        1
    }

    fn max_value(&self) -> u64 {
        MODULUS - 1
    }
}

fn pow_mod(mut base: u64, mut exp: u64, modulus: u64) -> u64 {
    let mut result = 1u64;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = (result * base) % modulus;
        }
        base = (base * base) % modulus;
        exp >>= 1;
    }
    result
}
