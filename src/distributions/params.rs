// src/distributions/params.rs
//! Positional parameter decoding.
//!
//! Each distribution kind declares its parameters once as a [`ParamShape`].
//! The same declaration validates incoming argument counts and drives
//! conversion of each positional value.

use crate::error::{validation::validate_finite, RandomError, RandomResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// Truncated toward zero.
    Int,
    Real,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub ty: ParamType,
}

impl ParamSpec {
    pub const fn int(name: &'static str) -> Self {
        ParamSpec {
            name,
            ty: ParamType::Int,
        }
    }

    pub const fn real(name: &'static str) -> Self {
        ParamSpec {
            name,
            ty: ParamType::Real,
        }
    }
}

/// Declared construction arguments of a distribution kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamShape {
    /// Fixed list of positional scalars.
    Scalars(&'static [ParamSpec]),
    /// One array of outcome weights.
    Weights,
    /// One array: breakpoints in the first half, densities in the second.
    Breakpoints,
}

impl ParamShape {
    /// Parameter names, as shown to callers.
    pub fn names(&self) -> Vec<&'static str> {
        match self {
            ParamShape::Scalars(specs) => specs.iter().map(|s| s.name).collect(),
            ParamShape::Weights => vec!["probabilities"],
            ParamShape::Breakpoints => vec!["intervals", "densities"],
        }
    }

    fn expected(&self) -> String {
        match self {
            ParamShape::Scalars(specs) => format!(
                "{} scalar parameter(s) ({})",
                specs.len(),
                self.names().join(", ")
            ),
            ParamShape::Weights => "a non-empty array of weights".to_string(),
            ParamShape::Breakpoints => {
                "an array of even length >= 4 (breakpoints followed by densities)".to_string()
            }
        }
    }
}

/// Caller-supplied construction arguments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Args<'a> {
    Scalars(&'a [f64]),
    Array(&'a [f64]),
}

impl Args<'_> {
    fn describe(&self) -> String {
        match self {
            Args::Scalars(v) => format!("{} scalar(s)", v.len()),
            Args::Array(v) => format!("an array of length {}", v.len()),
        }
    }
}

/// Arguments after shape validation and per-parameter conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<'a> {
    Scalars(Vec<Value>),
    Weights(&'a [f64]),
    Breakpoints {
        breakpoints: &'a [f64],
        densities: &'a [f64],
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Real(f64),
}

impl Value {
    pub fn as_f64(self) -> f64 {
        match self {
            Value::Int(i) => i as f64,
            Value::Real(x) => x,
        }
    }

    pub fn as_i64(self) -> i64 {
        match self {
            Value::Int(i) => i,
            Value::Real(x) => x as i64,
        }
    }
}

/// Check `args` against `shape` and convert each positional value.
pub fn decode<'a>(kind: &str, shape: ParamShape, args: Args<'a>) -> RandomResult<Decoded<'a>> {
    let mismatch = || RandomError::ArityMismatch {
        kind: kind.to_string(),
        expected: shape.expected(),
        found: args.describe(),
    };

    match (shape, args) {
        (ParamShape::Scalars(specs), Args::Scalars(values)) => {
            if values.len() != specs.len() {
                return Err(mismatch());
            }
            specs
                .iter()
                .zip(values)
                .map(|(spec, &x)| convert(spec, x))
                .collect::<RandomResult<Vec<_>>>()
                .map(Decoded::Scalars)
        }
        (ParamShape::Weights, Args::Array(values)) if !values.is_empty() => {
            Ok(Decoded::Weights(values))
        }
        (ParamShape::Breakpoints, Args::Array(values))
            if values.len() >= 4 && values.len() % 2 == 0 =>
        {
            let (breakpoints, densities) = values.split_at(values.len() / 2);
            Ok(Decoded::Breakpoints {
                breakpoints,
                densities,
            })
        }
        _ => Err(mismatch()),
    }
}

fn convert(spec: &ParamSpec, x: f64) -> RandomResult<Value> {
    match spec.ty {
        ParamType::Real => {
            validate_finite(spec.name, x)?;
            Ok(Value::Real(x))
        }
        ParamType::Int => {
            let t = x.trunc();
            if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
                Ok(Value::Int(t as i64))
            } else {
                Err(RandomError::InvalidParameters {
                    parameter: spec.name.to_string(),
                    value: x,
                    constraint: "must be a finite integer".to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BINOMIAL_SPECS: &[ParamSpec] = &[ParamSpec::int("t"), ParamSpec::real("p")];
    const BINOMIAL: ParamShape = ParamShape::Scalars(BINOMIAL_SPECS);

    #[test]
    fn test_int_parameters_truncate() {
        let decoded = decode("binomial", BINOMIAL, Args::Scalars(&[10.9, 0.25])).unwrap();
        assert_eq!(decoded, Decoded::Scalars(vec![Value::Int(10), Value::Real(0.25)]));

        let decoded = decode("binomial", BINOMIAL, Args::Scalars(&[-2.7, 0.25])).unwrap();
        assert_eq!(decoded, Decoded::Scalars(vec![Value::Int(-2), Value::Real(0.25)]));
    }

    #[test]
    fn test_count_mismatch_is_rejected() {
        for values in [&[][..], &[1.0][..], &[1.0, 0.5, 3.0][..]] {
            let err = decode("binomial", BINOMIAL, Args::Scalars(values)).unwrap_err();
            assert!(matches!(err, RandomError::ArityMismatch { .. }), "{:?}", err);
        }
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let err = decode("binomial", BINOMIAL, Args::Array(&[10.0, 0.5])).unwrap_err();
        assert!(matches!(err, RandomError::ArityMismatch { .. }));

        let err = decode("discrete", ParamShape::Weights, Args::Scalars(&[1.0])).unwrap_err();
        assert!(matches!(err, RandomError::ArityMismatch { .. }));
    }

    #[test]
    fn test_non_finite_int_is_invalid() {
        let err = decode("binomial", BINOMIAL, Args::Scalars(&[f64::NAN, 0.5])).unwrap_err();
        assert!(matches!(err, RandomError::InvalidParameters { .. }));
    }

    #[test]
    fn test_non_finite_real_is_invalid() {
        for p in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = decode("binomial", BINOMIAL, Args::Scalars(&[10.0, p])).unwrap_err();
            match err {
                RandomError::InvalidParameters { parameter, .. } => assert_eq!(parameter, "p"),
                other => panic!("p = {} gave {:?}", p, other),
            }
        }
    }

    #[test]
    fn test_breakpoints_split_in_half() {
        let values = [0.0, 1.0, 2.0, 1.0, 3.0, 0.0];
        let decoded = decode("piecewise", ParamShape::Breakpoints, Args::Array(&values)).unwrap();
        assert_eq!(
            decoded,
            Decoded::Breakpoints {
                breakpoints: &[0.0, 1.0, 2.0],
                densities: &[1.0, 3.0, 0.0],
            }
        );

        for bad in [&[0.0, 1.0][..], &[0.0, 1.0, 2.0, 3.0, 4.0][..]] {
            assert!(decode("piecewise", ParamShape::Breakpoints, Args::Array(bad)).is_err());
        }
    }

    #[test]
    fn test_empty_weights_rejected() {
        assert!(decode("discrete", ParamShape::Weights, Args::Array(&[])).is_err());
        assert!(decode("discrete", ParamShape::Weights, Args::Array(&[1.0])).is_ok());
    }
}
