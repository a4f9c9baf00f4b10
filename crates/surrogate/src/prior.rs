//! Prior transforms from the unit hypercube to parameter space.
//!
//! A nested sampler proposes points in `[0, 1]^n`; a [`PriorBox`] maps each
//! coordinate through its own [`Prior`] before the likelihood is evaluated.

use crate::error::SurrogateError;

/// A one-dimensional prior, expressed as its inverse CDF on `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Prior {
    /// Uniform on `[min, max]`: `(max - min)·x + min`.
    Linear {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// Log-uniform on `[min, max]`: `min·(max/min)^x`. Requires `min > 0`.
    Log {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// Log-uniform magnitude with either sign.
    ///
    /// `x < 0.5` maps to `-min·(max/min)^(2x)` and `x >= 0.5` to
    /// `min·(max/min)^f` with `f = 2x - 1` above one half and `f = 2x` at it.
    SignedLog {
        /// Smallest magnitude.
        min: f64,
        /// Largest magnitude.
        max: f64,
    },
}

impl Prior {
    /// Maps a unit-interval coordinate to the parameter value.
    pub fn transform(&self, x: f64) -> f64 {
        match *self {
            Prior::Linear { min, max } => (max - min) * x + min,
            Prior::Log { min, max } => min * (max / min).powf(x),
            Prior::SignedLog { min, max } => {
                let sign = if x < 0.5 { -1.0 } else { 1.0 };
                let frac = if x > 0.5 { 2.0 * x - 1.0 } else { 2.0 * x };
                sign * min * (max / min).powf(frac)
            }
        }
    }

    /// Checks that the bounds are finite and ordered, and positive for log priors.
    fn validate(&self, dim: usize) -> Result<(), SurrogateError> {
        let (min, max, positive) = match *self {
            Prior::Linear { min, max } => (min, max, false),
            Prior::Log { min, max } | Prior::SignedLog { min, max } => (min, max, true),
        };
        let invalid = |reason: String| Err(SurrogateError::InvalidPrior { dim, reason });
        if !min.is_finite() || !max.is_finite() {
            return invalid(format!("bounds must be finite, got [{min}, {max}]"));
        }
        if min >= max {
            return invalid(format!("min must be < max, got [{min}, {max}]"));
        }
        if positive && min <= 0.0 {
            return invalid(format!("log prior needs min > 0, got {min}"));
        }
        Ok(())
    }
}

/// One prior per parameter dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorBox {
    priors: Vec<Prior>,
}

impl PriorBox {
    /// Creates a prior box, validating every prior.
    ///
    /// # Errors
    ///
    /// Returns [`SurrogateError::InvalidPrior`] for the first unusable prior.
    pub fn new(priors: Vec<Prior>) -> Result<Self, SurrogateError> {
        for (dim, p) in priors.iter().enumerate() {
            p.validate(dim)?;
        }
        Ok(Self { priors })
    }

    /// Log priors for (M1, M2, μ, tan β).
    ///
    /// Signed log on `[1, 2000]` for M1 and μ, log on `[1, 2000]` for M2 and
    /// linear on `[1, 70]` for tan β.
    pub fn electroweak_log() -> Self {
        Self {
            priors: vec![
                Prior::SignedLog {
                    min: 1.0,
                    max: 2000.0,
                },
                Prior::Log {
                    min: 1.0,
                    max: 2000.0,
                },
                Prior::SignedLog {
                    min: 1.0,
                    max: 2000.0,
                },
                Prior::Linear {
                    min: 1.0,
                    max: 70.0,
                },
            ],
        }
    }

    /// Linear priors for (M1, M2, μ, tan β).
    pub fn electroweak_linear() -> Self {
        Self {
            priors: vec![
                Prior::Linear {
                    min: -2000.0,
                    max: 2000.0,
                },
                Prior::Linear {
                    min: 1.0,
                    max: 2000.0,
                },
                Prior::Linear {
                    min: -2000.0,
                    max: 2000.0,
                },
                Prior::Linear {
                    min: 1.0,
                    max: 70.0,
                },
            ],
        }
    }

    /// Number of dimensions.
    pub fn dim(&self) -> usize {
        self.priors.len()
    }

    /// The per-dimension priors.
    pub fn priors(&self) -> &[Prior] {
        &self.priors
    }

    /// Maps a unit-cube point to parameter space in place.
    ///
    /// # Errors
    ///
    /// Returns [`SurrogateError::DimensionMismatch`] if `cube` has the wrong length.
    pub fn apply(&self, cube: &mut [f64]) -> Result<(), SurrogateError> {
        if cube.len() != self.dim() {
            return Err(SurrogateError::DimensionMismatch {
                point: cube.len(),
                dim: self.dim(),
            });
        }
        for (x, p) in cube.iter_mut().zip(&self.priors) {
            *x = p.transform(*x);
        }
        Ok(())
    }
}
