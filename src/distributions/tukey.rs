// src/distributions/tukey.rs
//! Tukey lambda distribution, sampled through its quantile function.
//!
//! ```text
//! Q(q) = (q^λ - (1-q)^λ) / λ      if 1 + λ ≠ 1
//! Q(q) = ln(q) / (1 - q)          if 1 + λ = 1
//! ```
//!
//! The branch test is the literal floating-point comparison `1.0 + λ == 1.0`,
//! so it fires for λ = 0 and for |λ| below half an ulp of 1, not on a
//! tolerance band.

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TukeyLambda {
    lambda: f64,
}

impl TukeyLambda {
    pub fn new(lambda: f64) -> Self {
        TukeyLambda { lambda }
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn quantile(&self, q: f64) -> f64 {
        let l = self.lambda;
        if 1.0 + l == 1.0 {
            q.ln() / (1.0 - q)
        } else {
            (q.powf(l) - (1.0 - q).powf(l)) / l
        }
    }
}

impl rand_distr::Distribution<f64> for TukeyLambda {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let q: f64 = rng.gen();
        self.quantile(q)
    }
}
