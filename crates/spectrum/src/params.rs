//! The four electroweak-ino parameters.

use crate::error::SpectrumError;

/// Bino mass `M1`, wino mass `M2`, higgsino mass `μ` and `tan β`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectroweakParams {
    /// Bino mass parameter (GeV).
    pub m1: f64,
    /// Wino mass parameter (GeV).
    pub m2: f64,
    /// Higgsino mass parameter (GeV).
    pub mu: f64,
    /// Ratio of Higgs vacuum expectation values.
    pub tan_beta: f64,
}

impl ElectroweakParams {
    /// Number of parameters in a row.
    pub const LEN: usize = 4;

    /// Reads `[M1, M2, μ, tan β]`.
    ///
    /// # Errors
    ///
    /// Returns [`SpectrumError::ParamCount`] unless `values` has four
    /// elements, and [`SpectrumError::NonFiniteParam`] for NaN or infinity.
    pub fn from_slice(values: &[f64]) -> Result<Self, SpectrumError> {
        let &[m1, m2, mu, tan_beta] = values else {
            return Err(SpectrumError::ParamCount {
                len: values.len(),
                expected: Self::LEN,
            });
        };
        for (name, value) in [("M1", m1), ("M2", m2), ("mu", mu), ("tan_beta", tan_beta)] {
            if !value.is_finite() {
                return Err(SpectrumError::NonFiniteParam { name, value });
            }
        }
        Ok(Self {
            m1,
            m2,
            mu,
            tan_beta,
        })
    }

    /// `β = atan(tan β)`.
    pub fn beta(&self) -> f64 {
        self.tan_beta.atan()
    }
}
