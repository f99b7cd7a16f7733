// src/registry.rs
//! Registry context
//!
//! [`Registry`] owns the handle table and the default engine. Every
//! operation a binding layer needs goes through it: construct an engine,
//! distribution or seed sequence and get a [`Handle`] back, then sample,
//! query or release by handle.
//!
//! The default engine is created on first use from [`RegistryConfig`] and
//! lives as long as the registry. Calls that omit an engine handle draw from
//! it, so a `&mut Registry` serializes every use of the default stream.
//!
//! ```
//! use rand_registry::{Args, DistributionKind, EngineKind, EngineSeed, Registry, RegistryConfig};
//!
//! let mut registry = Registry::new(RegistryConfig::seeded(EngineKind::Mt19937, 42));
//! let engine = registry
//!     .create_engine(EngineKind::Mt19937.code(), EngineSeed::Scalar(5489))
//!     .unwrap();
//! let normal = registry
//!     .create_distribution(DistributionKind::Normal.code(), Args::Scalars(&[0.0, 1.0]))
//!     .unwrap();
//! let x = registry.variate(Some(normal), Some(engine)).unwrap();
//! assert!(x.as_f64().is_finite());
//! ```

use crate::brownian::BrownianMotion;
use crate::config::RegistryConfig;
use crate::distributions::{Args, Distribution, DistributionKind, Variate};
use crate::engines::{Engine, EngineKind, Seed};
use crate::error::RandomResult;
use crate::handles::{Handle, HandleTable};
use crate::seed::SeedSeq;
use rand::rngs::OsRng;
use rand::RngCore;
use std::rc::Rc;
use tracing::debug;

/// Seed material for engine construction and reseeding by handle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum EngineSeed<'a> {
    #[default]
    Default,
    Scalar(u64),
    /// Inline values, treated as a seed sequence built from them.
    Values(&'a [u32]),
    /// A seed sequence previously registered with the registry.
    Sequence(Handle),
}

/// Catalogue entry for one engine or distribution kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindSummary {
    pub code: u16,
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<&'static str>,
}

#[derive(Debug)]
struct DefaultEngine {
    engine: Engine,
    seed: u64,
}

impl DefaultEngine {
    fn create(kind: EngineKind, seed: u64) -> Self {
        DefaultEngine {
            engine: Engine::new(kind, Seed::Scalar(seed)),
            seed,
        }
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    config: RegistryConfig,
    handles: HandleTable,
    default_engine: Option<DefaultEngine>,
}

impl Registry {
    pub fn new(config: RegistryConfig) -> Self {
        Registry {
            config,
            handles: HandleTable::new(),
            default_engine: None,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    // ---- construction ----

    pub fn create_engine(&mut self, code: u16, seed: EngineSeed<'_>) -> RandomResult<Handle> {
        let kind = EngineKind::from_code(code)?;
        let engine = match seed {
            EngineSeed::Default => Engine::new(kind, Seed::Default),
            EngineSeed::Scalar(s) => Engine::new(kind, Seed::Scalar(s)),
            EngineSeed::Values(values) => {
                Engine::new(kind, Seed::Sequence(&SeedSeq::new(values.iter().copied())))
            }
            EngineSeed::Sequence(h) => {
                let seq = self.handles.seed_sequence(h)?;
                Engine::new(kind, Seed::Sequence(&seq))
            }
        };
        let handle = self.handles.register(engine);
        debug!(handle = %handle, kind = %kind, seed = ?seed, "engine created");
        Ok(handle)
    }

    pub fn create_distribution(&mut self, code: u16, args: Args<'_>) -> RandomResult<Handle> {
        let dist = Distribution::from_code(code, args)?;
        let kind = dist.kind();
        let handle = self.handles.register(dist);
        debug!(handle = %handle, kind = %kind, "distribution created");
        Ok(handle)
    }

    /// Register a seed sequence from caller numbers (finite, within
    /// `[0, u32::MAX]`, truncated).
    pub fn create_seed_sequence(&mut self, values: &[f64]) -> RandomResult<Handle> {
        let seq = SeedSeq::from_numbers(values)?;
        let size = seq.size();
        let handle = self.handles.register(seq);
        debug!(handle = %handle, size, "seed sequence created");
        Ok(handle)
    }

    pub fn alias(&mut self, handle: Handle) -> RandomResult<Handle> {
        let alias = self.handles.alias(handle)?;
        debug!(handle = %handle, alias = %alias, "aliased");
        Ok(alias)
    }

    pub fn release(&mut self, handle: Handle) -> RandomResult<()> {
        self.handles.release(handle)
    }

    // ---- seed sequences ----

    /// Diffuse the sequence into `count` words; a count of zero yields one.
    pub fn seed_sequence_generate(&self, handle: Handle, count: usize) -> RandomResult<Vec<u32>> {
        let seq = self.handles.seed_sequence(handle)?;
        Ok(seq.generate(count.max(1)))
    }

    pub fn seed_sequence_param(&self, handle: Handle) -> RandomResult<Vec<u32>> {
        Ok(self.handles.seed_sequence(handle)?.param().to_vec())
    }

    // ---- engines ----

    pub fn engine_next(&self, handle: Handle) -> RandomResult<u64> {
        let engine = self.handles.engine(handle)?;
        let value = engine.borrow_mut().next_value();
        Ok(value)
    }

    pub fn engine_discard(&self, handle: Handle, n: u64) -> RandomResult<()> {
        self.handles.engine(handle)?.borrow_mut().discard(n);
        Ok(())
    }

    pub fn engine_reseed(&self, handle: Handle, seed: EngineSeed<'_>) -> RandomResult<()> {
        let engine = self.handles.engine(handle)?;
        match seed {
            EngineSeed::Default => {
                let kind = engine.borrow().kind();
                *engine.borrow_mut() = Engine::new(kind, Seed::Default);
            }
            EngineSeed::Scalar(s) => engine.borrow_mut().reseed(s),
            EngineSeed::Values(values) => {
                engine.borrow_mut().reseed_with(&SeedSeq::new(values.iter().copied()))
            }
            EngineSeed::Sequence(h) => {
                let seq = self.handles.seed_sequence(h)?;
                engine.borrow_mut().reseed_with(&seq);
            }
        }
        debug!(handle = %handle, seed = ?seed, "engine reseeded");
        Ok(())
    }

    pub fn engine_min(&self, handle: Handle) -> RandomResult<u64> {
        Ok(self.handles.engine(handle)?.borrow().min())
    }

    pub fn engine_max(&self, handle: Handle) -> RandomResult<u64> {
        Ok(self.handles.engine(handle)?.borrow().max())
    }

    // ---- distributions ----

    pub fn distribution_min(&self, handle: Handle) -> RandomResult<Variate> {
        Ok(self.handles.distribution(handle)?.min())
    }

    pub fn distribution_max(&self, handle: Handle) -> RandomResult<Variate> {
        Ok(self.handles.distribution(handle)?.max())
    }

    // ---- generation ----

    /// Draw one variate.
    ///
    /// A missing distribution means uniform on [0, 1); a missing engine means
    /// the default engine.
    pub fn variate(
        &mut self,
        dist: Option<Handle>,
        engine: Option<Handle>,
    ) -> RandomResult<Variate> {
        let dist = self.resolve_distribution(dist)?;
        self.with_engine(engine, |e| dist.sample(e))
    }

    /// Draw `n` variates from one distribution and engine.
    pub fn fill(
        &mut self,
        dist: Option<Handle>,
        engine: Option<Handle>,
        n: usize,
    ) -> RandomResult<Vec<Variate>> {
        let dist = self.resolve_distribution(dist)?;
        self.with_engine(engine, |e| (0..n).map(|_| dist.sample(e)).collect())
    }

    /// Sample a drifted Brownian path on `times` from the default engine.
    /// With `reset`, the default engine first returns to its creation seed.
    pub fn brownian(
        &mut self,
        times: &[f64],
        mu: f64,
        sigma: f64,
        reset: bool,
    ) -> RandomResult<Vec<f64>> {
        let motion = BrownianMotion::new(mu, sigma)?;
        if reset {
            let default = self.default_state();
            let seed = default.seed;
            *default = DefaultEngine::create(default.engine.kind(), seed);
            debug!(seed, "default engine reset");
        }
        motion.sample_path(times, self.default_engine())
    }

    // ---- default engine ----

    /// The default engine, created on first use.
    pub fn default_engine(&mut self) -> &mut Engine {
        &mut self.default_state().engine
    }

    /// Seed the default engine was last created or reseeded with.
    pub fn default_engine_seed(&mut self) -> u64 {
        self.default_state().seed
    }

    pub fn reseed_default_engine(&mut self, seed: u64) {
        let kind = self.config.default_engine;
        self.default_engine = Some(DefaultEngine::create(kind, seed));
        debug!(kind = %kind, seed, "default engine reseeded");
    }

    fn default_state(&mut self) -> &mut DefaultEngine {
        let config = &self.config;
        self.default_engine.get_or_insert_with(|| {
            let seed = config.default_seed.unwrap_or_else(|| OsRng.next_u64());
            debug!(kind = %config.default_engine, seed, "default engine created");
            DefaultEngine::create(config.default_engine, seed)
        })
    }

    fn resolve_distribution(&self, dist: Option<Handle>) -> RandomResult<Rc<Distribution>> {
        match dist {
            Some(h) => self.handles.distribution(h),
            None => Ok(Rc::new(Distribution::unit_uniform())),
        }
    }

    fn with_engine<T>(
        &mut self,
        engine: Option<Handle>,
        f: impl FnOnce(&mut Engine) -> T,
    ) -> RandomResult<T> {
        match engine {
            Some(h) => {
                let cell = self.handles.engine(h)?;
                let mut engine = cell.borrow_mut();
                Ok(f(&mut *engine))
            }
            None => Ok(f(self.default_engine())),
        }
    }

    // ---- catalogues ----

    pub fn engine_kinds() -> Vec<KindSummary> {
        EngineKind::TABLE
            .iter()
            .map(|info| KindSummary {
                code: info.kind.code(),
                name: info.name,
                description: info.description,
                params: Vec::new(),
            })
            .collect()
    }

    pub fn distribution_kinds() -> Vec<KindSummary> {
        DistributionKind::TABLE
            .iter()
            .map(|info| KindSummary {
                code: info.kind.code(),
                name: info.name,
                description: info.description,
                params: info.shape.names(),
            })
            .collect()
    }
}
