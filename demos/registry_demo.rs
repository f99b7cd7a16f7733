// demos/registry_demo.rs
//! Walk through the registry: engines, seed sequences, distributions, the
//! default engine and a Brownian path.
//!
//! Run with `RUST_LOG=rand_registry=debug` to see handle lifecycle events.

use rand_registry::{
    Args, DistributionKind, EngineKind, EngineSeed, RandomResult, Registry, RegistryConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> RandomResult<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = RegistryConfig::from_env()?;
    println!("Configuration: {:?}", config);
    let mut registry = Registry::new(config);

    println!("\nEngines:");
    for kind in Registry::engine_kinds() {
        println!("  {:>2}  {:<28} {}", kind.code, kind.name, kind.description);
    }

    println!("\nDistributions:");
    for kind in Registry::distribution_kinds() {
        println!("  {:>2}  {:<40} ({})", kind.code, kind.name, kind.params.join(", "));
    }

    // Engines from a scalar seed and from a seed sequence
    let mt = registry.create_engine(EngineKind::Mt19937.code(), EngineSeed::Default)?;
    let seq = registry.create_seed_sequence(&[1.0, 2.0, 3.0])?;
    let knuth = registry.create_engine(EngineKind::KnuthB.code(), EngineSeed::Sequence(seq))?;
    println!("\nseed_seq(1, 2, 3).generate(4) = {:?}", registry.seed_sequence_generate(seq, 4)?);

    println!("\nmt19937 first outputs:");
    for _ in 0..3 {
        println!("  {}", registry.engine_next(mt)?);
    }
    registry.engine_discard(mt, 9_996)?;
    println!("  ... 10000th: {}", registry.engine_next(mt)?);
    println!(
        "knuth_b range [{}, {}], next {}",
        registry.engine_min(knuth)?,
        registry.engine_max(knuth)?,
        registry.engine_next(knuth)?
    );

    // Distributions
    let normal = registry
        .create_distribution(DistributionKind::Normal.code(), Args::Scalars(&[100.0, 15.0]))?;
    let die =
        registry.create_distribution(DistributionKind::Discrete.code(), Args::Array(&[1.0; 6]))?;
    let ramp = registry.create_distribution(
        DistributionKind::PiecewiseLinear.code(),
        Args::Array(&[0.0, 1.0, 2.0, 0.0, 1.0, 0.0]),
    )?;

    println!("\nNormal(100, 15) on knuth_b: {}", registry.variate(Some(normal), Some(knuth))?);
    let rolls: Vec<String> = registry
        .fill(Some(die), Some(mt), 10)?
        .iter()
        .map(|v| (v.as_f64() as i64 + 1).to_string())
        .collect();
    println!("Ten die rolls: {}", rolls.join(" "));
    println!(
        "Triangle on [{}, {}]: {}",
        registry.distribution_min(ramp)?,
        registry.distribution_max(ramp)?,
        registry.variate(Some(ramp), None)?
    );
    println!("Default uniform: {}", registry.variate(None, None)?);

    // Brownian path from the default engine
    println!("\nDefault engine seed: {}", registry.default_engine_seed());
    let times: Vec<f64> = (0..=10).map(|i| i as f64 * 0.1).collect();
    let path = registry.brownian(&times, 0.05, 0.2, true)?;
    for (t, x) in times.iter().zip(&path) {
        println!("  X({:.1}) = {:+.5}", t, x);
    }

    // Handles are shared until the last one is released
    let alias = registry.alias(normal)?;
    registry.release(normal)?;
    println!("\nThrough alias after release: {}", registry.variate(Some(alias), None)?);
    registry.release(alias)?;
    if let Err(e) = registry.variate(Some(alias), None) {
        println!("After releasing the alias: {}", e);
    }

    println!("\nLive handles: {}", registry.len());
    Ok(())
}
