//! # rand-registry: Random Engines and Distributions Behind Handles
//!
//! A Rust library that exposes the standard pseudo-random engines and
//! probability distributions through opaque numeric handles, the shape a
//! spreadsheet or scripting binding consumes.
//!
//! ## Key Features
//!
//! - **Six Engines**: Mersenne Twister (32/64-bit), minstd_rand, minstd_rand0,
//!   knuth_b, reproducing the reference output streams
//! - **Twenty Distributions**: selected by a stable type code, backed by
//!   `rand_distr` wherever it has the distribution
//! - **Seed Sequences**: `seed_seq`-compatible diffusion for engine seeding
//! - **Handles**: reference-counted objects, aliasable, released explicitly
//! - **Default Engine**: created lazily from configuration, reseedable
//!
//! ## Quick Start
//!
//! ```rust
//! use rand_registry::{
//!     Args, DistributionKind, EngineKind, EngineSeed, Registry, RegistryConfig, Variate,
//! };
//!
//! let mut registry = Registry::new(RegistryConfig::default());
//!
//! // Default-seeded Mersenne Twister
//! let engine = registry.create_engine(EngineKind::Mt19937.code(), EngineSeed::Default).unwrap();
//! assert_eq!(registry.engine_next(engine).unwrap(), 3_499_211_612);
//!
//! // Fair six-sided die as a discrete distribution
//! let die = registry
//!     .create_distribution(DistributionKind::Discrete.code(), Args::Array(&[1.0; 6]))
//!     .unwrap();
//! match registry.variate(Some(die), Some(engine)).unwrap() {
//!     Variate::Int(face) => assert!((0..6).contains(&face)),
//!     other => panic!("unexpected {:?}", other),
//! }
//!
//! registry.release(die).unwrap();
//! registry.release(engine).unwrap();
//! ```

// Module declarations
pub mod brownian;
pub mod config;
pub mod distributions;
pub mod engines;
pub mod error;
pub mod handles;
pub mod registry;
pub mod seed;

// Re-export commonly used types for convenience
pub use config::RegistryConfig;
pub use distributions::{Args, Distribution, DistributionKind, ResultDomain, Variate};
pub use engines::{Engine, EngineKind, Seed};
pub use error::{RandomError, RandomResult};
pub use handles::{Category, Handle};
pub use registry::{EngineSeed, KindSummary, Registry};
pub use seed::SeedSeq;
