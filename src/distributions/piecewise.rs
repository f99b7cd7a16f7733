// src/distributions/piecewise.rs
//! Piecewise constant and piecewise linear densities over a set of
//! breakpoints `b_0 < b_1 < ... < b_n`.
//!
//! A cell is chosen with probability proportional to its mass, then a point is
//! placed inside it:
//!
//! ```text
//! constant: mass_i = d_i · (b_{i+1} - b_i),               x = b_i + u · w
//! linear:   mass_i = (d_i + d_{i+1})/2 · (b_{i+1} - b_i), x = b_i + t · w
//!           t = u(d_i + d_{i+1}) / (d_i + sqrt(d_i² + u(d_{i+1}² - d_i²)))
//! ```
//!
//! where `t` inverts the CDF of the linear density inside the cell.

use crate::error::{validation::*, RandomError, RandomResult};
use rand::distributions::WeightedIndex;
use rand::Rng;
use rand_distr::Distribution;

#[derive(Debug, Clone)]
pub struct PiecewiseConstant {
    breakpoints: Vec<f64>,
    densities: Vec<f64>,
    cells: WeightedIndex<f64>,
}

#[derive(Debug, Clone)]
pub struct PiecewiseLinear {
    breakpoints: Vec<f64>,
    densities: Vec<f64>,
    cells: WeightedIndex<f64>,
}

fn validate(kind: &str, breakpoints: &[f64], densities: &[f64]) -> RandomResult<()> {
    for &b in breakpoints {
        validate_finite("intervals", b)?;
    }
    validate_increasing("intervals", breakpoints)?;
    for &d in densities {
        validate_finite("densities", d)?;
        validate_non_negative("densities", d)?;
    }
    if densities.iter().all(|&d| d == 0.0) {
        return Err(RandomError::RejectedParameters {
            kind: kind.to_string(),
            reason: "all densities are zero".to_string(),
        });
    }
    Ok(())
}

/// Index sampler over `masses`, which must each be finite and non-negative
/// with a finite, non-zero total.
pub(crate) fn weighted_index(kind: &str, masses: Vec<f64>) -> RandomResult<WeightedIndex<f64>> {
    let reject = |reason: String| RandomError::RejectedParameters {
        kind: kind.to_string(),
        reason,
    };
    let total: f64 = masses.iter().sum();
    if !total.is_finite() || masses.iter().any(|m| !m.is_finite()) {
        return Err(reject(format!("total weight {} is not finite", total)));
    }
    WeightedIndex::new(masses).map_err(|e| reject(e.to_string()))
}

impl PiecewiseConstant {
    /// `densities[i]` applies to `[breakpoints[i], breakpoints[i+1])`; a
    /// trailing density with no cell is ignored.
    pub fn new(breakpoints: &[f64], densities: &[f64]) -> RandomResult<Self> {
        const KIND: &str = "RANDOM_DISTRIBUTION_PIECEWISE_CONSTANT";
        let cells = breakpoints.len().saturating_sub(1);
        let densities = &densities[..cells.min(densities.len())];
        validate(KIND, breakpoints, densities)?;

        let masses = breakpoints
            .windows(2)
            .zip(densities)
            .map(|(b, &d)| d * (b[1] - b[0]))
            .collect();
        Ok(PiecewiseConstant {
            breakpoints: breakpoints.to_vec(),
            densities: densities.to_vec(),
            cells: weighted_index(KIND, masses)?,
        })
    }

    pub fn intervals(&self) -> &[f64] {
        &self.breakpoints
    }

    pub fn densities(&self) -> &[f64] {
        &self.densities
    }
}

impl Distribution<f64> for PiecewiseConstant {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let i = self.cells.sample(rng);
        let (lo, hi) = (self.breakpoints[i], self.breakpoints[i + 1]);
        let u: f64 = rng.gen();
        lo + u * (hi - lo)
    }
}

impl PiecewiseLinear {
    /// `densities[i]` is the density at `breakpoints[i]`.
    pub fn new(breakpoints: &[f64], densities: &[f64]) -> RandomResult<Self> {
        const KIND: &str = "RANDOM_DISTRIBUTION_PIECEWISE_LINEAR";
        validate(KIND, breakpoints, densities)?;

        let masses = breakpoints
            .windows(2)
            .zip(densities.windows(2))
            .map(|(b, d)| 0.5 * (d[0] + d[1]) * (b[1] - b[0]))
            .collect();
        Ok(PiecewiseLinear {
            breakpoints: breakpoints.to_vec(),
            densities: densities.to_vec(),
            cells: weighted_index(KIND, masses)?,
        })
    }

    pub fn intervals(&self) -> &[f64] {
        &self.breakpoints
    }

    pub fn densities(&self) -> &[f64] {
        &self.densities
    }
}

impl Distribution<f64> for PiecewiseLinear {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let i = self.cells.sample(rng);
        let (lo, hi) = (self.breakpoints[i], self.breakpoints[i + 1]);
        let (d0, d1) = (self.densities[i], self.densities[i + 1]);
        let u: f64 = rng.gen();

        let denom = d0 + (d0 * d0 + u * (d1 * d1 - d0 * d0)).sqrt();
        let t = if denom > 0.0 { u * (d0 + d1) / denom } else { 0.0 };
        lo + t * (hi - lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::{Engine, EngineKind, Seed};

    #[test]
    fn test_constant_samples_stay_inside_support() {
        let dist = PiecewiseConstant::new(&[0.0, 1.0, 3.0], &[1.0, 2.0, 99.0]).unwrap();
        assert_eq!(dist.densities(), &[1.0, 2.0]);

        let mut engine = Engine::new(EngineKind::Mt19937, Seed::Scalar(11));
        for _ in 0..5_000 {
            let x = dist.sample(&mut engine);
            assert!((0.0..3.0).contains(&x), "sample {} outside [0, 3)", x);
        }
    }

    #[test]
    fn test_constant_cell_frequencies() {
        // masses 1·1 and 1·3: P(x >= 1) = 0.75
        let dist = PiecewiseConstant::new(&[0.0, 1.0, 4.0], &[1.0, 1.0, 0.0]).unwrap();
        let mut engine = Engine::new(EngineKind::Mt19937, Seed::Scalar(5));
        let n = 40_000;
        let upper = (0..n).filter(|_| dist.sample(&mut engine) >= 1.0).count();
        let freq = upper as f64 / n as f64;
        assert!((freq - 0.75).abs() < 0.02, "upper cell frequency {}", freq);
    }

    #[test]
    fn test_linear_ramp_mean() {
        // density rising linearly on [0, 1]: mean 2/3
        let dist = PiecewiseLinear::new(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        let mut engine = Engine::new(EngineKind::Mt19937_64, Seed::Scalar(9));
        let n = 50_000;
        let mean = (0..n).map(|_| dist.sample(&mut engine)).sum::<f64>() / n as f64;
        assert!((mean - 2.0 / 3.0).abs() < 0.01, "mean {}", mean);
    }

    #[test]
    fn test_rejects_bad_breakpoints() {
        assert!(PiecewiseLinear::new(&[0.0, 0.0], &[1.0, 1.0]).is_err());
        assert!(PiecewiseLinear::new(&[1.0, 0.0], &[1.0, 1.0]).is_err());
        assert!(PiecewiseConstant::new(&[0.0, 1.0], &[-1.0, 1.0]).is_err());
        assert!(PiecewiseConstant::new(&[0.0, 1.0], &[0.0, 0.0]).is_err());
    }

    #[test]
    fn test_overflowing_mass_is_rejected() {
        // each breakpoint is finite but the cell width is not
        let err = PiecewiseConstant::new(&[-1e308, 1e308], &[1.0, 1.0]).unwrap_err();
        assert!(matches!(err, RandomError::RejectedParameters { .. }), "{:?}", err);

        let err = PiecewiseLinear::new(&[-1e308, 1e308], &[1.0, 1.0]).unwrap_err();
        assert!(matches!(err, RandomError::RejectedParameters { .. }), "{:?}", err);

        // finite cells whose masses sum past f64::MAX
        let err = PiecewiseConstant::new(&[0.0, 1.0, 2.0], &[1e308, 1e308]).unwrap_err();
        assert!(matches!(err, RandomError::RejectedParameters { .. }), "{:?}", err);
    }

    #[test]
    fn test_weighted_index_checks_total() {
        assert!(weighted_index("test", vec![1.0, 3.0]).is_ok());
        assert!(weighted_index("test", vec![f64::MAX, f64::MAX]).is_err());
        assert!(weighted_index("test", vec![0.0, 0.0]).is_err());
    }
}
