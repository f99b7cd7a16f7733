// src/brownian.rs
//! Brownian motion with drift sampled on a caller-supplied time grid.
//!
//! ```text
//! X(t_0) = mu * t_0 + sigma * sqrt(t_0) * Z_0
//! X(t_i) = X(t_{i-1}) + mu * dt + sigma * sqrt(dt) * Z_i,   dt = t_i - t_{i-1}
//! ```
//!
//! A volatility of exactly zero selects the standard volatility of one.

use crate::error::{validation::*, RandomResult};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrownianMotion {
    pub mu: f64,
    pub sigma: f64,
}

impl BrownianMotion {
    pub fn new(mu: f64, sigma: f64) -> RandomResult<Self> {
        validate_finite("mu", mu)?;
        validate_finite("sigma", sigma)?;
        let sigma = if sigma == 0.0 { 1.0 } else { sigma };
        Ok(BrownianMotion { mu, sigma })
    }

    /// Sample the path at each of `times`, which must start at or after zero
    /// and be strictly increasing.
    pub fn sample_path<R: Rng + ?Sized>(
        &self,
        times: &[f64],
        rng: &mut R,
    ) -> RandomResult<Vec<f64>> {
        let Some(&t0) = times.first() else {
            return Ok(Vec::new());
        };
        for &t in times {
            validate_finite("times", t)?;
        }
        validate_non_negative("times[0]", t0)?;
        validate_increasing("times", times)?;

        let mut path = Vec::with_capacity(times.len());
        let mut x = self.mu * t0;
        if t0 > 0.0 {
            x += self.sigma * t0.sqrt() * self.draw(rng);
        }
        path.push(x);

        for w in times.windows(2) {
            let dt = w[1] - w[0];
            x += self.mu * dt + self.sigma * dt.sqrt() * self.draw(rng);
            path.push(x);
        }
        Ok(path)
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        StandardNormal.sample(rng)
    }
}

/// Convenience wrapper for a one-off path.
pub fn brownian_path<R: Rng + ?Sized>(
    times: &[f64],
    mu: f64,
    sigma: f64,
    rng: &mut R,
) -> RandomResult<Vec<f64>> {
    BrownianMotion::new(mu, sigma)?.sample_path(times, rng)
}
