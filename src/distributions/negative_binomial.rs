// src/distributions/negative_binomial.rs
use crate::error::{validation::*, RandomError, RandomResult};
use rand::Rng;
use rand_distr::{Distribution, Gamma, Poisson};

/// Number of failures before the `k`-th success, drawn as a Gamma–Poisson
/// mixture: `Y ~ Gamma(k, (1-p)/p)`, `X ~ Poisson(Y)`.
#[derive(Debug, Clone)]
pub struct NegativeBinomial {
    k: u64,
    p: f64,
    gamma: Option<Gamma<f64>>,
}

impl NegativeBinomial {
    pub fn new(k: i64, p: f64) -> RandomResult<Self> {
        validate_positive("k", k as f64)?;
        validate_probability("p", p)?;
        validate_positive("p", p)?;

        // p == 1 never fails, so no mixing distribution is needed.
        let gamma = if p < 1.0 {
            let g = Gamma::new(k as f64, (1.0 - p) / p).map_err(|e| {
                RandomError::RejectedParameters {
                    kind: "RANDOM_DISTRIBUTION_NEGATIVE_BINOMIAL".to_string(),
                    reason: e.to_string(),
                }
            })?;
            Some(g)
        } else {
            None
        };

        Ok(NegativeBinomial { k: k as u64, p, gamma })
    }

    pub fn k(&self) -> u64 {
        self.k
    }

    pub fn p(&self) -> f64 {
        self.p
    }
}

impl Distribution<u64> for NegativeBinomial {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        let Some(gamma) = &self.gamma else {
            return 0;
        };
        let rate = gamma.sample(rng);
        match Poisson::new(rate) {
            Ok(poisson) => {
                let x: f64 = poisson.sample(rng);
                x as u64
            }
            // rate underflowed to zero
            Err(_) => 0,
        }
    }
}
