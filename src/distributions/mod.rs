// src/distributions/mod.rs
//! Probability Distributions
//!
//! # Design
//!
//! A [`Distribution`] is an immutable parameter set of one of twenty kinds,
//! held as a variant of a closed enum. Sampling takes any [`rand::Rng`] (in
//! practice an [`Engine`](crate::engines::Engine)) and returns a [`Variate`]
//! in the kind's fixed [`ResultDomain`].
//!
//! # Construction
//!
//! ```text
//! code ──► DistributionKind ──► ParamShape ──► decode(Args) ──► concrete constructor
//! ```
//!
//! [`DistributionKind::TABLE`] is the only place kinds are enumerated: it
//! carries the public name, description, domain and parameter shape used both
//! for the caller-facing catalogue and for construction.
//!
//! Every kind with a counterpart in `rand` / `rand_distr` delegates to it;
//! Tukey lambda, the piecewise densities and the negative binomial are built
//! on top of those primitives.

pub mod negative_binomial;
pub mod params;
pub mod piecewise;
pub mod tukey;

use crate::error::{validation::*, RandomError, RandomResult};
use crate::handles::Category;
use negative_binomial::NegativeBinomial;
use params::{decode, Decoded, ParamShape, ParamSpec, Value};
use piecewise::{weighted_index, PiecewiseConstant, PiecewiseLinear};
use rand::distributions::{Bernoulli, Uniform, WeightedIndex};
use rand::Rng;
use rand_distr::{
    Binomial, Cauchy, ChiSquared, Distribution as _, Exp, FisherF, Gamma, Geometric, Gumbel,
    LogNormal, Normal, Poisson, StudentT, Weibull,
};
use std::fmt;
use tukey::TukeyLambda;

pub use params::Args;

/// Value type produced by a distribution kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultDomain {
    Boolean,
    Integer,
    Real,
}

/// One sampled value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Variate {
    Bool(bool),
    Int(i64),
    Real(f64),
}

impl Variate {
    pub fn domain(&self) -> ResultDomain {
        match self {
            Variate::Bool(_) => ResultDomain::Boolean,
            Variate::Int(_) => ResultDomain::Integer,
            Variate::Real(_) => ResultDomain::Real,
        }
    }

    /// Numeric view, as a spreadsheet cell would hold it.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Variate::Bool(b) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
            Variate::Int(i) => i as f64,
            Variate::Real(x) => x,
        }
    }
}

impl fmt::Display for Variate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variate::Bool(b) => write!(f, "{}", b),
            Variate::Int(i) => write!(f, "{}", i),
            Variate::Real(x) => write!(f, "{}", x),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistributionKind {
    Bernoulli,
    Binomial,
    Cauchy,
    ChiSquared,
    Discrete,
    Exponential,
    ExtremeValue,
    FisherF,
    Gamma,
    Geometric,
    Lognormal,
    NegativeBinomial,
    Normal,
    PiecewiseConstant,
    PiecewiseLinear,
    Poisson,
    StudentT,
    UniformReal,
    Weibull,
    Tukey,
}

/// One row of the distribution dispatch table.
#[derive(Debug, Clone, Copy)]
pub struct DistributionInfo {
    pub kind: DistributionKind,
    pub name: &'static str,
    pub description: &'static str,
    pub domain: ResultDomain,
    pub shape: ParamShape,
}

const P: &[ParamSpec] = &[ParamSpec::real("p")];
const T_P: &[ParamSpec] = &[ParamSpec::int("t"), ParamSpec::real("p")];
const K_P: &[ParamSpec] = &[ParamSpec::int("k"), ParamSpec::real("p")];
const A_B: &[ParamSpec] = &[ParamSpec::real("a"), ParamSpec::real("b")];
const N: &[ParamSpec] = &[ParamSpec::real("n")];
const M_N: &[ParamSpec] = &[ParamSpec::real("m"), ParamSpec::real("n")];
const M_S: &[ParamSpec] = &[ParamSpec::real("m"), ParamSpec::real("s")];
const LAMBDA: &[ParamSpec] = &[ParamSpec::real("lambda")];
const ALPHA_BETA: &[ParamSpec] = &[ParamSpec::real("alpha"), ParamSpec::real("beta")];
const MEAN: &[ParamSpec] = &[ParamSpec::real("mean")];
const MEAN_STDDEV: &[ParamSpec] = &[ParamSpec::real("mean"), ParamSpec::real("stddev")];

impl DistributionKind {
    /// The distribution dispatch table, ordered by code.
    pub const TABLE: &'static [DistributionInfo] = &[
        DistributionInfo {
            kind: DistributionKind::Bernoulli,
            name: "RANDOM_DISTRIBUTION_BERNOULLI",
            description: "Return true with probability p, false with probability 1 - p",
            domain: ResultDomain::Boolean,
            shape: ParamShape::Scalars(P),
        },
        DistributionInfo {
            kind: DistributionKind::Binomial,
            name: "RANDOM_DISTRIBUTION_BINOMIAL",
            description: "Return i with probability C(t,i) p^i (1 - p)^(t - i)",
            domain: ResultDomain::Integer,
            shape: ParamShape::Scalars(T_P),
        },
        DistributionInfo {
            kind: DistributionKind::Cauchy,
            name: "RANDOM_DISTRIBUTION_CAUCHY",
            description: "Density 1/(pi b (1 + ((x - a)/b)^2))",
            domain: ResultDomain::Real,
            shape: ParamShape::Scalars(A_B),
        },
        DistributionInfo {
            kind: DistributionKind::ChiSquared,
            name: "RANDOM_DISTRIBUTION_CHI_SQUARED",
            description: "Sum of the squares of n standard normal random variables",
            domain: ResultDomain::Real,
            shape: ParamShape::Scalars(N),
        },
        DistributionInfo {
            kind: DistributionKind::Discrete,
            name: "RANDOM_DISTRIBUTION_DISCRETE",
            description: "Return i with probability proportional to p[i]",
            domain: ResultDomain::Integer,
            shape: ParamShape::Weights,
        },
        DistributionInfo {
            kind: DistributionKind::Exponential,
            name: "RANDOM_DISTRIBUTION_EXPONENTIAL",
            description: "Cumulative distribution 1 - exp(-lambda x), x > 0",
            domain: ResultDomain::Real,
            shape: ParamShape::Scalars(LAMBDA),
        },
        DistributionInfo {
            kind: DistributionKind::ExtremeValue,
            name: "RANDOM_DISTRIBUTION_EXTREME_VALUE",
            description: "Cumulative distribution exp(-exp(-(x - a)/b))",
            domain: ResultDomain::Real,
            shape: ParamShape::Scalars(A_B),
        },
        DistributionInfo {
            kind: DistributionKind::FisherF,
            name: "RANDOM_DISTRIBUTION_FISHER_F",
            description: "Quotient of chi squared distributions",
            domain: ResultDomain::Real,
            shape: ParamShape::Scalars(M_N),
        },
        DistributionInfo {
            kind: DistributionKind::Gamma,
            name: "RANDOM_DISTRIBUTION_GAMMA",
            description: "Density x^(alpha-1) exp(-x/beta)/(Gamma(alpha) beta^alpha), x > 0",
            domain: ResultDomain::Real,
            shape: ParamShape::Scalars(ALPHA_BETA),
        },
        DistributionInfo {
            kind: DistributionKind::Geometric,
            name: "RANDOM_DISTRIBUTION_GEOMETRIC",
            description: "Return i with probability p (1 - p)^i",
            domain: ResultDomain::Integer,
            shape: ParamShape::Scalars(P),
        },
        DistributionInfo {
            kind: DistributionKind::Lognormal,
            name: "RANDOM_DISTRIBUTION_LOGNORMAL",
            description: "Exponential of normal distribution",
            domain: ResultDomain::Real,
            shape: ParamShape::Scalars(M_S),
        },
        DistributionInfo {
            kind: DistributionKind::NegativeBinomial,
            name: "RANDOM_DISTRIBUTION_NEGATIVE_BINOMIAL",
            description: "Number of failures before the k-th success",
            domain: ResultDomain::Integer,
            shape: ParamShape::Scalars(K_P),
        },
        DistributionInfo {
            kind: DistributionKind::Normal,
            name: "RANDOM_DISTRIBUTION_NORMAL",
            description: "Density exp(-((x - mean)/stddev)^2/2)/(stddev sqrt(2 pi))",
            domain: ResultDomain::Real,
            shape: ParamShape::Scalars(MEAN_STDDEV),
        },
        DistributionInfo {
            kind: DistributionKind::PiecewiseConstant,
            name: "RANDOM_DISTRIBUTION_PIECEWISE_CONSTANT",
            description: "Constant density on each interval",
            domain: ResultDomain::Real,
            shape: ParamShape::Breakpoints,
        },
        DistributionInfo {
            kind: DistributionKind::PiecewiseLinear,
            name: "RANDOM_DISTRIBUTION_PIECEWISE_LINEAR",
            description: "Density linear between breakpoints",
            domain: ResultDomain::Real,
            shape: ParamShape::Breakpoints,
        },
        DistributionInfo {
            kind: DistributionKind::Poisson,
            name: "RANDOM_DISTRIBUTION_POISSON",
            description: "Return i with probability m^i exp(-m)/i!",
            domain: ResultDomain::Integer,
            shape: ParamShape::Scalars(MEAN),
        },
        DistributionInfo {
            kind: DistributionKind::StudentT,
            name: "RANDOM_DISTRIBUTION_STUDENT_T",
            description: "Density proportional to (1 + x^2/n)^(-(n+1)/2)",
            domain: ResultDomain::Real,
            shape: ParamShape::Scalars(N),
        },
        DistributionInfo {
            kind: DistributionKind::UniformReal,
            name: "RANDOM_DISTRIBUTION_UNIFORM_REAL",
            description: "Uniform reals on [a,b)",
            domain: ResultDomain::Real,
            shape: ParamShape::Scalars(A_B),
        },
        DistributionInfo {
            kind: DistributionKind::Weibull,
            name: "RANDOM_DISTRIBUTION_WEIBULL",
            description: "Density a/b (x/b)^(a-1) exp(-(x/b)^a), x > 0",
            domain: ResultDomain::Real,
            shape: ParamShape::Scalars(A_B),
        },
        DistributionInfo {
            kind: DistributionKind::Tukey,
            name: "RANDOM_DISTRIBUTION_TUKEY",
            description: "Quantile (q^lambda - (1-q)^lambda)/lambda",
            domain: ResultDomain::Real,
            shape: ParamShape::Scalars(LAMBDA),
        },
    ];

    pub fn all() -> impl Iterator<Item = DistributionKind> {
        Self::TABLE.iter().map(|info| info.kind)
    }

    pub fn from_code(code: u16) -> RandomResult<Self> {
        Self::TABLE
            .get(usize::from(code))
            .map(|info| info.kind)
            .ok_or(RandomError::UnknownType {
                category: Category::Distribution,
                code,
            })
    }

    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn info(self) -> &'static DistributionInfo {
        &Self::TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn description(self) -> &'static str {
        self.info().description
    }

    pub fn domain(self) -> ResultDomain {
        self.info().domain
    }

    pub fn shape(self) -> ParamShape {
        self.info().shape
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
enum Inner {
    Bernoulli(Bernoulli),
    Binomial(Binomial, u64),
    Cauchy(Cauchy<f64>),
    ChiSquared(ChiSquared<f64>),
    Discrete(WeightedIndex<f64>, usize),
    Exponential(Exp<f64>),
    ExtremeValue(Gumbel<f64>),
    FisherF(FisherF<f64>),
    Gamma(Gamma<f64>),
    Geometric(Geometric),
    Lognormal(LogNormal<f64>),
    NegativeBinomial(NegativeBinomial),
    Normal(Normal<f64>),
    PiecewiseConstant(PiecewiseConstant),
    PiecewiseLinear(PiecewiseLinear),
    Poisson(Poisson<f64>),
    StudentT(StudentT<f64>),
    UniformReal(Uniform<f64>, f64, f64),
    Weibull(Weibull<f64>),
    Tukey(TukeyLambda),
}

/// A configured distribution of any supported kind.
#[derive(Debug, Clone)]
pub struct Distribution {
    kind: DistributionKind,
    inner: Inner,
}

fn rejected<E: fmt::Display>(kind: DistributionKind) -> impl FnOnce(E) -> RandomError {
    move |e| RandomError::RejectedParameters {
        kind: kind.name().to_string(),
        reason: e.to_string(),
    }
}

impl Distribution {
    /// Validate `args` against the kind's declared parameters and build the
    /// distribution. Parameter errors surface here, never at sampling time.
    pub fn new(kind: DistributionKind, args: Args<'_>) -> RandomResult<Self> {
        let decoded = decode(kind.name(), kind.shape(), args)?;
        let inner = match decoded {
            Decoded::Scalars(values) => Self::from_scalars(kind, &values)?,
            Decoded::Weights(weights) => {
                for &w in weights {
                    validate_finite("probabilities", w)?;
                    validate_non_negative("probabilities", w)?;
                }
                let index = weighted_index(kind.name(), weights.to_vec())?;
                Inner::Discrete(index, weights.len())
            }
            Decoded::Breakpoints {
                breakpoints,
                densities,
            } => match kind {
                DistributionKind::PiecewiseConstant => {
                    Inner::PiecewiseConstant(PiecewiseConstant::new(breakpoints, densities)?)
                }
                _ => Inner::PiecewiseLinear(PiecewiseLinear::new(breakpoints, densities)?),
            },
        };
        Ok(Distribution { kind, inner })
    }

    /// Construct from a type code and caller arguments.
    pub fn from_code(code: u16, args: Args<'_>) -> RandomResult<Self> {
        Self::new(DistributionKind::from_code(code)?, args)
    }

    /// Uniform reals on [0, 1).
    pub fn unit_uniform() -> Self {
        Distribution {
            kind: DistributionKind::UniformReal,
            inner: Inner::UniformReal(Uniform::new(0.0, 1.0), 0.0, 1.0),
        }
    }

    fn from_scalars(kind: DistributionKind, v: &[Value]) -> RandomResult<Inner> {
        let real = |i: usize| v[i].as_f64();
        let inner = match kind {
            DistributionKind::Bernoulli => {
                validate_probability("p", real(0))?;
                Inner::Bernoulli(Bernoulli::new(real(0)).map_err(rejected(kind))?)
            }
            DistributionKind::Binomial => {
                let t = v[0].as_i64();
                validate_non_negative("t", t as f64)?;
                validate_probability("p", real(1))?;
                Inner::Binomial(Binomial::new(t as u64, real(1)).map_err(rejected(kind))?, t as u64)
            }
            DistributionKind::Cauchy => {
                Inner::Cauchy(Cauchy::new(real(0), real(1)).map_err(rejected(kind))?)
            }
            DistributionKind::ChiSquared => {
                Inner::ChiSquared(ChiSquared::new(real(0)).map_err(rejected(kind))?)
            }
            DistributionKind::Exponential => {
                Inner::Exponential(Exp::new(real(0)).map_err(rejected(kind))?)
            }
            DistributionKind::ExtremeValue => {
                Inner::ExtremeValue(Gumbel::new(real(0), real(1)).map_err(rejected(kind))?)
            }
            DistributionKind::FisherF => {
                Inner::FisherF(FisherF::new(real(0), real(1)).map_err(rejected(kind))?)
            }
            DistributionKind::Gamma => {
                Inner::Gamma(Gamma::new(real(0), real(1)).map_err(rejected(kind))?)
            }
            DistributionKind::Geometric => {
                validate_probability("p", real(0))?;
                Inner::Geometric(Geometric::new(real(0)).map_err(rejected(kind))?)
            }
            DistributionKind::Lognormal => {
                Inner::Lognormal(LogNormal::new(real(0), real(1)).map_err(rejected(kind))?)
            }
            DistributionKind::NegativeBinomial => {
                Inner::NegativeBinomial(NegativeBinomial::new(v[0].as_i64(), real(1))?)
            }
            DistributionKind::Normal => {
                Inner::Normal(Normal::new(real(0), real(1)).map_err(rejected(kind))?)
            }
            DistributionKind::Poisson => {
                Inner::Poisson(Poisson::new(real(0)).map_err(rejected(kind))?)
            }
            DistributionKind::StudentT => {
                Inner::StudentT(StudentT::new(real(0)).map_err(rejected(kind))?)
            }
            DistributionKind::UniformReal => {
                let (a, mut b) = (real(0), real(1));
                // (0, 0) selects the unit interval
                if a == 0.0 && b == 0.0 {
                    b = 1.0;
                }
                if !(a < b) || !(b - a).is_finite() {
                    return Err(RandomError::InvalidParameters {
                        parameter: "b".to_string(),
                        value: b,
                        constraint: format!("must be greater than a = {} with a finite width", a),
                    });
                }
                Inner::UniformReal(Uniform::new(a, b), a, b)
            }
            // C++ orders Weibull parameters (shape, scale); rand_distr takes (scale, shape).
            DistributionKind::Weibull => {
                Inner::Weibull(Weibull::new(real(1), real(0)).map_err(rejected(kind))?)
            }
            DistributionKind::Tukey => Inner::Tukey(TukeyLambda::new(real(0))),
            DistributionKind::Discrete
            | DistributionKind::PiecewiseConstant
            | DistributionKind::PiecewiseLinear => {
                unreachable!("array-shaped kinds are decoded as arrays")
            }
        };
        Ok(inner)
    }

    pub fn kind(&self) -> DistributionKind {
        self.kind
    }

    pub fn domain(&self) -> ResultDomain {
        self.kind.domain()
    }

    /// Draw one variate, consuming entropy from `rng`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Variate {
        match &self.inner {
            Inner::Bernoulli(d) => Variate::Bool(d.sample(rng)),
            Inner::Binomial(d, _) => Variate::Int(saturate(d.sample(rng))),
            Inner::Cauchy(d) => Variate::Real(d.sample(rng)),
            Inner::ChiSquared(d) => Variate::Real(d.sample(rng)),
            Inner::Discrete(d, _) => Variate::Int(d.sample(rng) as i64),
            Inner::Exponential(d) => Variate::Real(d.sample(rng)),
            Inner::ExtremeValue(d) => Variate::Real(d.sample(rng)),
            Inner::FisherF(d) => Variate::Real(d.sample(rng)),
            Inner::Gamma(d) => Variate::Real(d.sample(rng)),
            Inner::Geometric(d) => Variate::Int(saturate(d.sample(rng))),
            Inner::Lognormal(d) => Variate::Real(d.sample(rng)),
            Inner::NegativeBinomial(d) => Variate::Int(saturate(d.sample(rng))),
            Inner::Normal(d) => Variate::Real(d.sample(rng)),
            Inner::PiecewiseConstant(d) => Variate::Real(d.sample(rng)),
            Inner::PiecewiseLinear(d) => Variate::Real(d.sample(rng)),
            Inner::Poisson(d) => {
                let x: f64 = d.sample(rng);
                Variate::Int(x as i64)
            }
            Inner::StudentT(d) => Variate::Real(d.sample(rng)),
            Inner::UniformReal(d, _, _) => Variate::Real(d.sample(rng)),
            Inner::Weibull(d) => Variate::Real(d.sample(rng)),
            Inner::Tukey(d) => Variate::Real(d.sample(rng)),
        }
    }

    /// Smallest value the configured distribution can produce.
    pub fn min(&self) -> Variate {
        match &self.inner {
            Inner::Bernoulli(_) => Variate::Bool(false),
            Inner::Binomial(..)
            | Inner::Discrete(..)
            | Inner::Geometric(_)
            | Inner::NegativeBinomial(_)
            | Inner::Poisson(_) => Variate::Int(0),
            Inner::ChiSquared(_)
            | Inner::Exponential(_)
            | Inner::FisherF(_)
            | Inner::Gamma(_)
            | Inner::Lognormal(_)
            | Inner::Weibull(_) => Variate::Real(0.0),
            Inner::Cauchy(_)
            | Inner::ExtremeValue(_)
            | Inner::Normal(_)
            | Inner::StudentT(_)
            | Inner::Tukey(_) => {
                Variate::Real(f64::MIN)
            }
            Inner::PiecewiseConstant(d) => Variate::Real(d.intervals()[0]),
            Inner::PiecewiseLinear(d) => Variate::Real(d.intervals()[0]),
            Inner::UniformReal(_, a, _) => Variate::Real(*a),
        }
    }

    /// Largest value the configured distribution can produce.
    pub fn max(&self) -> Variate {
        match &self.inner {
            Inner::Bernoulli(_) => Variate::Bool(true),
            Inner::Binomial(_, t) => Variate::Int(saturate(*t)),
            Inner::Discrete(_, n) => Variate::Int(*n as i64 - 1),
            Inner::Geometric(_) | Inner::NegativeBinomial(_) | Inner::Poisson(_) => {
                Variate::Int(i64::MAX)
            }
            Inner::Cauchy(_)
            | Inner::ChiSquared(_)
            | Inner::Exponential(_)
            | Inner::ExtremeValue(_)
            | Inner::FisherF(_)
            | Inner::Gamma(_)
            | Inner::Lognormal(_)
            | Inner::Normal(_)
            | Inner::StudentT(_)
            | Inner::Weibull(_)
            | Inner::Tukey(_) => Variate::Real(f64::MAX),
            Inner::PiecewiseConstant(d) => Variate::Real(last(d.intervals())),
            Inner::PiecewiseLinear(d) => Variate::Real(last(d.intervals())),
            Inner::UniformReal(_, _, b) => Variate::Real(*b),
        }
    }
}

fn saturate(x: u64) -> i64 {
    i64::try_from(x).unwrap_or(i64::MAX)
}

fn last(values: &[f64]) -> f64 {
    values.last().copied().unwrap_or(f64::MAX)
}
