// scripts/benchmark.rs
use rand_registry::{
    Args, Distribution, DistributionKind, Engine, EngineKind, EngineSeed, Registry, RegistryConfig,
    Seed,
};
use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::process::Command;
use std::time::Instant;

struct Timer {
    start_time: Instant,
}

impl Timer {
    fn new() -> Timer {
        Timer {
            start_time: Instant::now(),
        }
    }

    fn start(&mut self) {
        self.start_time = Instant::now();
    }

    fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_model: String,
    rust_version: String,
    rustc_flags: String,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_model: Self::get_cpu_model(),
            rust_version: Self::get_rust_version(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
        }
    }

    fn get_cpu_model() -> String {
        #[cfg(target_os = "linux")]
        {
            std::fs::read_to_string("/proc/cpuinfo")
                .ok()
                .and_then(|content| {
                    content
                        .lines()
                        .find(|line| line.starts_with("model name"))
                        .and_then(|line| line.split(':').nth(1))
                        .map(|s| s.trim().to_string())
                })
                .unwrap_or_else(|| "Unknown CPU".to_string())
        }

        #[cfg(target_os = "macos")]
        {
            Command::new("sysctl")
                .args(["-n", "machdep.cpu.brand_string"])
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .unwrap_or_else(|_| "Unknown CPU".to_string())
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            "Unknown CPU".to_string()
        }
    }

    fn get_rust_version() -> String {
        Command::new("rustc")
            .arg("--version")
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
            .unwrap_or_else(|_| "Unknown Rust version".to_string())
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    draws: usize,
    time_ms: f64,
    draws_per_sec: f64,
    /// Mean of the draws, printed so the work cannot be optimized away.
    mean: f64,
}

impl BenchmarkResult {
    fn new(name: String, draws: usize, time_ms: f64, sum: f64) -> Self {
        BenchmarkResult {
            name,
            draws,
            time_ms,
            draws_per_sec: draws as f64 / (time_ms / 1000.0),
            mean: sum / draws as f64,
        }
    }
}

fn run_engine_benchmarks(draws: usize) -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let mut timer = Timer::new();

    for kind in EngineKind::ALL {
        println!("Benchmarking engine {}...", kind);
        let mut engine = Engine::new(kind, Seed::Scalar(42));

        timer.start();
        let mut sum = 0.0;
        for _ in 0..draws {
            sum += engine.next_value() as f64;
        }
        results.push(BenchmarkResult::new(kind.name().to_string(), draws, timer.elapsed_ms(), sum));
    }

    println!("Benchmarking engine discard...");
    let mut engine = Engine::new(EngineKind::MinstdRand, Seed::Default);
    timer.start();
    engine.discard(draws as u64);
    let value = engine.next_value() as f64;
    results.push(BenchmarkResult::new(
        "RANDOM_ENGINE_MINSTD_RAND discard".to_string(),
        draws,
        timer.elapsed_ms(),
        value * draws as f64,
    ));

    results
}

fn benchmark_args(kind: DistributionKind) -> Args<'static> {
    match kind {
        DistributionKind::Bernoulli => Args::Scalars(&[0.5]),
        DistributionKind::Binomial => Args::Scalars(&[100.0, 0.3]),
        DistributionKind::Cauchy
        | DistributionKind::ExtremeValue
        | DistributionKind::Normal
        | DistributionKind::Lognormal => Args::Scalars(&[0.0, 1.0]),
        DistributionKind::ChiSquared | DistributionKind::StudentT => Args::Scalars(&[4.0]),
        DistributionKind::Discrete => Args::Array(&[1.0, 2.0, 3.0, 4.0]),
        DistributionKind::Exponential | DistributionKind::Poisson => Args::Scalars(&[2.0]),
        DistributionKind::FisherF | DistributionKind::Gamma | DistributionKind::Weibull => {
            Args::Scalars(&[2.0, 3.0])
        }
        DistributionKind::Geometric => Args::Scalars(&[0.2]),
        DistributionKind::NegativeBinomial => Args::Scalars(&[5.0, 0.5]),
        DistributionKind::PiecewiseConstant | DistributionKind::PiecewiseLinear => {
            Args::Array(&[0.0, 1.0, 2.0, 3.0, 1.0, 3.0, 2.0, 1.0])
        }
        DistributionKind::UniformReal => Args::Scalars(&[0.0, 1.0]),
        DistributionKind::Tukey => Args::Scalars(&[0.14]),
    }
}

fn run_distribution_benchmarks(draws: usize) -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let mut timer = Timer::new();
    let mut engine = Engine::new(EngineKind::Mt19937_64, Seed::Scalar(42));

    for kind in DistributionKind::all() {
        let dist = match Distribution::new(kind, benchmark_args(kind)) {
            Ok(dist) => dist,
            Err(e) => {
                eprintln!("Skipping {}: {}", kind, e);
                continue;
            }
        };
        println!("Benchmarking distribution {}...", kind);

        timer.start();
        let mut sum = 0.0;
        for _ in 0..draws {
            sum += dist.sample(&mut engine).as_f64();
        }
        results.push(BenchmarkResult::new(kind.name().to_string(), draws, timer.elapsed_ms(), sum));
    }

    results
}

fn run_registry_benchmarks(draws: usize) -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let mut timer = Timer::new();
    let mut registry = Registry::new(RegistryConfig::seeded(EngineKind::Mt19937, 42));

    let normal = Args::Scalars(&[0.0, 1.0]);
    let setup = registry
        .create_engine(EngineKind::Mt19937.code(), EngineSeed::Scalar(42))
        .and_then(|engine| {
            let dist = registry.create_distribution(DistributionKind::Normal.code(), normal)?;
            Ok((engine, dist))
        });
    let (engine, dist) = match setup {
        Ok(handles) => handles,
        Err(e) => {
            eprintln!("Skipping registry benchmarks: {}", e);
            return results;
        }
    };

    println!("Benchmarking variate by handle...");
    timer.start();
    let mut sum = 0.0;
    for _ in 0..draws {
        if let Ok(x) = registry.variate(Some(dist), Some(engine)) {
            sum += x.as_f64();
        }
    }
    let elapsed = timer.elapsed_ms();
    results.push(BenchmarkResult::new("variate (handles)".to_string(), draws, elapsed, sum));

    println!("Benchmarking fill by handle...");
    timer.start();
    let sum = registry
        .fill(Some(dist), Some(engine), draws)
        .map(|xs| xs.iter().map(|x| x.as_f64()).sum())
        .unwrap_or(0.0);
    let elapsed = timer.elapsed_ms();
    results.push(BenchmarkResult::new("fill (handles)".to_string(), draws, elapsed, sum));

    println!("Benchmarking Brownian path on the default engine...");
    let times: Vec<f64> = (0..draws).map(|i| i as f64 / draws as f64).collect();
    timer.start();
    let sum = registry
        .brownian(&times, 0.05, 0.2, true)
        .map(|path| path.iter().sum())
        .unwrap_or(0.0);
    results.push(BenchmarkResult::new("brownian path".to_string(), draws, timer.elapsed_ms(), sum));

    results
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    system_info: &SystemInfo,
    filename: &str,
) -> io::Result<()> {
    let mut file = File::create(filename)?;

    // Write system information as comments
    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU: {}", system_info.cpu_model)?;
    writeln!(file, "# Rust Version: {}", system_info.rust_version)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(file, "#")?;

    writeln!(file, "Benchmark,Draws,Time_ms,Draws_per_sec,Mean")?;
    for result in results {
        writeln!(
            file,
            "{},{},{:.2},{:.0},{:.6}",
            result.name, result.draws, result.time_ms, result.draws_per_sec, result.mean
        )?;
    }

    println!("Results written to {}", filename);
    Ok(())
}

fn main() -> io::Result<()> {
    println!("rand-registry Benchmark Suite");
    println!("=============================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU: {}", system_info.cpu_model);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!();

    let draws = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1_000_000);

    let mut results = run_engine_benchmarks(draws);
    results.extend(run_distribution_benchmarks(draws));
    results.extend(run_registry_benchmarks(draws / 10));

    println!();
    println!("{:<45} {:>12} {:>12} {:>16}", "Benchmark", "Draws", "Time (ms)", "Draws/sec");
    for result in &results {
        println!(
            "{:<45} {:>12} {:>12.2} {:>16.0}",
            result.name, result.draws, result.time_ms, result.draws_per_sec
        );
    }
    println!();

    write_results_to_csv(&results, &system_info, "benchmark_results.csv")
}
