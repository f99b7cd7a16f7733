// src/engines/mod.rs
//! Random Engines
//!
//! # Design
//!
//! Every supported engine kind is one variant of a closed enum held inside
//! [`Engine`], so the handle table can store any of them behind one type
//! without trait objects. Each concrete engine implements [`RawEngine`] and
//! [`Engine`] forwards to it with a single `match`.
//!
//! Engines produce raw unsigned values in `[min, max]`. [`Engine`] also
//! implements [`rand::RngCore`], which is how distributions draw from it:
//!
//! ```text
//! full-range engines (MT19937, MT19937-64):  raw bits are used directly
//! 31-bit engines (LCG family, knuth_b):      top 16 bits of two draws → one u32
//! ```
//!
//! # Kinds
//!
//! | code | name                         | min | max      |
//! |------|------------------------------|-----|----------|
//! | 0    | `RANDOM_ENGINE_DEFAULT`      | 0   | 2^32 - 1 |
//! | 1    | `RANDOM_ENGINE_KNUTH_B`      | 1   | 2^31 - 2 |
//! | 2    | `RANDOM_ENGINE_MINSTD_RAND`  | 1   | 2^31 - 2 |
//! | 3    | `RANDOM_ENGINE_MINSTD_RAND0` | 1   | 2^31 - 2 |
//! | 4    | `RANDOM_ENGINE_MT19937`      | 0   | 2^32 - 1 |
//! | 5    | `RANDOM_ENGINE_MT19937_64`   | 0   | 2^64 - 1 |

pub mod lcg;
pub mod mersenne;
pub mod shuffle;

use crate::error::{RandomError, RandomResult};
use crate::handles::Category;
use crate::seed::SeedSeq;
use lcg::{MinStdRand, MinStdRand0};
use mersenne::{Mt32, Mt64};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use shuffle::KnuthB;
use std::fmt;
use std::str::FromStr;

/// Common interface of the concrete engines.
pub trait RawEngine {
    /// Advance the state and return one value in `[min_value, max_value]`.
    fn next_value(&mut self) -> u64;
    fn reseed(&mut self, seed: u64);
    fn reseed_with(&mut self, seq: &SeedSeq);

    /// Advance the state by `n` steps.
    fn discard(&mut self, n: u64) {
        for _ in 0..n {
            self.next_value();
        }
    }

    fn min_value(&self) -> u64;
    fn max_value(&self) -> u64;
}

/// Engine type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    #[default]
    Default,
    KnuthB,
    MinstdRand,
    MinstdRand0,
    Mt19937,
    #[serde(rename = "mt19937_64")]
    Mt19937_64,
}

/// One row of the engine dispatch table.
#[derive(Debug, Clone, Copy)]
pub struct EngineInfo {
    pub kind: EngineKind,
    pub name: &'static str,
    pub description: &'static str,
}

impl EngineKind {
    /// The engine dispatch table, ordered by code.
    pub const TABLE: &'static [EngineInfo] = &[
        EngineInfo {
            kind: EngineKind::Default,
            name: "RANDOM_ENGINE_DEFAULT",
            description: "Defaults to mt19937",
        },
        EngineInfo {
            kind: EngineKind::KnuthB,
            name: "RANDOM_ENGINE_KNUTH_B",
            description: "Shuffle order engine based on minstd_rand0",
        },
        EngineInfo {
            kind: EngineKind::MinstdRand,
            name: "RANDOM_ENGINE_MINSTD_RAND",
            description: "Generates a random sequence by the linear congruential algorithm.",
        },
        EngineInfo {
            kind: EngineKind::MinstdRand0,
            name: "RANDOM_ENGINE_MINSTD_RAND0",
            description: "Generates a random sequence by the linear congruential algorithm.",
        },
        EngineInfo {
            kind: EngineKind::Mt19937,
            name: "RANDOM_ENGINE_MT19937",
            description: "Generates a high quality random sequence of integers based on the Mersenne twister algorithm.",
        },
        EngineInfo {
            kind: EngineKind::Mt19937_64,
            name: "RANDOM_ENGINE_MT19937_64",
            description: "Generates a high quality 64-bit random sequence based on the Mersenne twister algorithm.",
        },
    ];

    pub const ALL: [EngineKind; 6] = [
        EngineKind::Default,
        EngineKind::KnuthB,
        EngineKind::MinstdRand,
        EngineKind::MinstdRand0,
        EngineKind::Mt19937,
        EngineKind::Mt19937_64,
    ];

    pub fn from_code(code: u16) -> RandomResult<Self> {
        Self::TABLE
            .get(usize::from(code))
            .map(|info| info.kind)
            .ok_or(RandomError::UnknownType {
                category: Category::Engine,
                code,
            })
    }

    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn info(self) -> &'static EngineInfo {
        &Self::TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn description(self) -> &'static str {
        self.info().description
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineKind {
    type Err = RandomError;

    /// Accepts `MT19937`, `mt19937`, or `RANDOM_ENGINE_MT19937`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let bare = upper.strip_prefix("RANDOM_ENGINE_").unwrap_or(&upper);
        Self::TABLE
            .iter()
            .find(|info| info.name.trim_start_matches("RANDOM_ENGINE_") == bare)
            .map(|info| info.kind)
            .ok_or_else(|| RandomError::InvalidConfiguration {
                field: "engine".to_string(),
                reason: format!("unknown engine name '{}'", s),
            })
    }
}

/// Seed material for engine construction.
#[derive(Debug, Clone, Copy, Default)]
pub enum Seed<'a> {
    /// The engine's standard default state.
    #[default]
    Default,
    Scalar(u64),
    Sequence(&'a SeedSeq),
}

#[derive(Debug, Clone)]
enum Core {
    KnuthB(KnuthB),
    MinstdRand(MinStdRand),
    MinstdRand0(MinStdRand0),
    Mt19937(Mt32),
    Mt19937_64(Mt64),
}

macro_rules! with_core {
    ($core:expr, $e:ident => $body:expr) => {
        match $core {
            Core::KnuthB($e) => $body,
            Core::MinstdRand($e) => $body,
            Core::MinstdRand0($e) => $body,
            Core::Mt19937($e) => $body,
            Core::Mt19937_64($e) => $body,
        }
    };
}

/// A pseudo-random engine of any supported kind.
#[derive(Debug, Clone)]
pub struct Engine {
    kind: EngineKind,
    core: Core,
}

impl Engine {
    pub fn new(kind: EngineKind, seed: Seed<'_>) -> Self {
        let core = match (kind, seed) {
            (EngineKind::Default | EngineKind::Mt19937, Seed::Default) => {
                Core::Mt19937(Mt32::default())
            }
            (EngineKind::Default | EngineKind::Mt19937, Seed::Scalar(s)) => {
                Core::Mt19937(Mt32::new(s))
            }
            (EngineKind::Default | EngineKind::Mt19937, Seed::Sequence(q)) => {
                Core::Mt19937(Mt32::from_seed_seq(q))
            }
            (EngineKind::Mt19937_64, Seed::Default) => Core::Mt19937_64(Mt64::default()),
            (EngineKind::Mt19937_64, Seed::Scalar(s)) => Core::Mt19937_64(Mt64::new(s)),
            (EngineKind::Mt19937_64, Seed::Sequence(q)) => Core::Mt19937_64(Mt64::from_seed_seq(q)),
            (EngineKind::MinstdRand, Seed::Default) => Core::MinstdRand(MinStdRand::default()),
            (EngineKind::MinstdRand, Seed::Scalar(s)) => Core::MinstdRand(MinStdRand::new(s)),
            (EngineKind::MinstdRand, Seed::Sequence(q)) => {
                Core::MinstdRand(MinStdRand::from_seed_seq(q))
            }
            (EngineKind::MinstdRand0, Seed::Default) => Core::MinstdRand0(MinStdRand0::default()),
            (EngineKind::MinstdRand0, Seed::Scalar(s)) => Core::MinstdRand0(MinStdRand0::new(s)),
            (EngineKind::MinstdRand0, Seed::Sequence(q)) => {
                Core::MinstdRand0(MinStdRand0::from_seed_seq(q))
            }
            (EngineKind::KnuthB, Seed::Default) => Core::KnuthB(KnuthB::default()),
            (EngineKind::KnuthB, Seed::Scalar(s)) => Core::KnuthB(KnuthB::new(s)),
            (EngineKind::KnuthB, Seed::Sequence(q)) => Core::KnuthB(KnuthB::from_seed_seq(q)),
        };
        Engine { kind, core }
    }

    /// Construct from a type code.
    pub fn from_code(code: u16, seed: Seed<'_>) -> RandomResult<Self> {
        Ok(Self::new(EngineKind::from_code(code)?, seed))
    }

    pub fn kind(&self) -> EngineKind {
        self.kind
    }

    pub fn next_value(&mut self) -> u64 {
        with_core!(&mut self.core, e => e.next_value())
    }

    pub fn reseed(&mut self, seed: u64) {
        with_core!(&mut self.core, e => e.reseed(seed))
    }

    pub fn reseed_with(&mut self, seq: &SeedSeq) {
        with_core!(&mut self.core, e => e.reseed_with(seq))
    }

    /// Same observable effect as `n` calls to [`Engine::next_value`].
    pub fn discard(&mut self, n: u64) {
        with_core!(&mut self.core, e => e.discard(n))
    }

    pub fn min(&self) -> u64 {
        with_core!(&self.core, e => e.min_value())
    }

    pub fn max(&self) -> u64 {
        with_core!(&self.core, e => e.max_value())
    }

    fn next_bits16(&mut self) -> u32 {
        let min = self.min();
        let x = self.next_value() - min;
        // 31-bit range: bits 15..30 are the strongest
        ((x >> 15) & 0xffff) as u32
    }
}

impl RngCore for Engine {
    fn next_u32(&mut self) -> u32 {
        match &mut self.core {
            Core::Mt19937(e) => return e.next_value() as u32,
            Core::Mt19937_64(e) => return (e.next_value() >> 32) as u32,
            _ => {}
        }
        let hi = self.next_bits16();
        let lo = self.next_bits16();
        (hi << 16) | lo
    }

    fn next_u64(&mut self) -> u64 {
        if let Core::Mt19937_64(e) = &mut self.core {
            return e.next_value();
        }
        let lo = u64::from(self.next_u32());
        let hi = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut chunks = dest.chunks_exact_mut(4);
        for chunk in &mut chunks {
            chunk.copy_from_slice(&self.next_u32().to_le_bytes());
        }
        let rest = chunks.into_remainder();
        if !rest.is_empty() {
            let bytes = self.next_u32().to_le_bytes();
            rest.copy_from_slice(&bytes[..rest.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_ordered_by_code() {
        for (i, info) in EngineKind::TABLE.iter().enumerate() {
            assert_eq!(info.kind.code() as usize, i);
            assert_eq!(EngineKind::ALL[i], info.kind);
        }
        assert_eq!(EngineKind::TABLE.len(), EngineKind::ALL.len());
    }

    #[test]
    fn test_from_code_round_trip() {
        for kind in EngineKind::ALL {
            assert_eq!(EngineKind::from_code(kind.code()).unwrap(), kind);
        }
        assert_eq!(
            EngineKind::from_code(6),
            Err(RandomError::UnknownType {
                category: Category::Engine,
                code: 6
            })
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("mt19937".parse::<EngineKind>().unwrap(), EngineKind::Mt19937);
        assert_eq!(
            "RANDOM_ENGINE_MT19937_64".parse::<EngineKind>().unwrap(),
            EngineKind::Mt19937_64
        );
        assert_eq!("knuth_b".parse::<EngineKind>().unwrap(), EngineKind::KnuthB);
        assert!("ranlux24".parse::<EngineKind>().is_err());
    }

    #[test]
    fn test_default_kind_is_mt19937() {
        let mut a = Engine::new(EngineKind::Default, Seed::Scalar(7));
        let mut b = Engine::new(EngineKind::Mt19937, Seed::Scalar(7));
        for _ in 0..100 {
            assert_eq!(a.next_value(), b.next_value());
        }
        assert_eq!(a.kind(), EngineKind::Default);
    }

    #[test]
    fn test_rng_core_uses_full_u32_range_for_lcg() {
        let mut engine = Engine::new(EngineKind::MinstdRand, Seed::Scalar(3));
        let high = (0..1_000).any(|_| engine.next_u32() > u32::MAX / 2);
        assert!(high, "31-bit engine should still fill the top bit");
    }

    #[test]
    fn test_fill_bytes_partial_chunk() {
        let mut a = Engine::new(EngineKind::Mt19937, Seed::Default);
        let mut b = Engine::new(EngineKind::Mt19937, Seed::Default);
        let mut buf = [0u8; 7];
        a.fill_bytes(&mut buf);
        let first = b.next_u32().to_le_bytes();
        assert_eq!(&buf[..4], &first);
    }
}
