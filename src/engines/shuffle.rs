// src/engines/shuffle.rs
//! Shuffle-order engine (`knuth_b`): a table of 256 outputs from `minstd_rand0`
//! is drawn from at a position chosen by the previous output, and the slot is
//! refilled from the base engine.

use super::lcg::MinStdRand0;
use super::RawEngine;
use crate::seed::SeedSeq;

pub const TABLE_SIZE: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleOrder {
    base: MinStdRand0,
    table: Box<[u64; TABLE_SIZE]>,
    last: u64,
}

pub type KnuthB = ShuffleOrder;

impl ShuffleOrder {
    pub fn new(seed: u64) -> Self {
        Self::from_base(MinStdRand0::new(seed))
    }

    pub fn from_seed_seq(seq: &SeedSeq) -> Self {
        Self::from_base(MinStdRand0::from_seed_seq(seq))
    }

    fn from_base(base: MinStdRand0) -> Self {
        let mut engine = ShuffleOrder {
            base,
            table: Box::new([0; TABLE_SIZE]),
            last: 0,
        };
        engine.fill_table();
        engine
    }

    fn fill_table(&mut self) {
        for slot in self.table.iter_mut() {
            *slot = self.base.next_value();
        }
        self.last = self.base.next_value();
    }
}

impl Default for ShuffleOrder {
    fn default() -> Self {
        Self::from_base(MinStdRand0::default())
    }
}

impl RawEngine for ShuffleOrder {
    fn next_value(&mut self) -> u64 {
        let min = self.base.min_value();
        let range = self.base.max_value() - min + 1;
        let j = (TABLE_SIZE as u64 * (self.last - min) / range) as usize;
        self.last = self.table[j];
        self.table[j] = self.base.next_value();
        self.last
    }

    fn reseed(&mut self, seed: u64) {
        self.base.reseed(seed);
        self.fill_table();
    }

    fn reseed_with(&mut self, seq: &SeedSeq) {
        self.base.reseed_with(seq);
        self.fill_table();
    }

    fn min_value(&self) -> u64 {
        self.base.min_value()
    }

    fn max_value(&self) -> u64 {
        self.base.max_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reseed_matches_fresh_engine() {
        let mut engine = ShuffleOrder::new(99);
        for _ in 0..10 {
            engine.next_value();
        }
        engine.reseed(7);
        let mut fresh = ShuffleOrder::new(7);
        for _ in 0..50 {
            assert_eq!(engine.next_value(), fresh.next_value());
        }
    }

    #[test]
    fn test_outputs_stay_in_range() {
        let mut engine = KnuthB::default();
        for _ in 0..10_000 {
            let x = engine.next_value();
            assert!(x >= engine.min_value() && x <= engine.max_value());
        }
    }
}
