//! Tree-level neutralino and chargino masses.
//!
//! Masses are the absolute eigenvalues of the neutralino mass matrix and the
//! singular values of the chargino mass matrix, each in ascending order.

use knnlike_chain::DerivedQuantity;
use nalgebra::{Matrix2, Matrix4};

use crate::error::SpectrumError;
use crate::params::ElectroweakParams;

/// Z boson mass (GeV).
pub const MZ: f64 = 91.1876;
/// W boson mass (GeV).
pub const MW: f64 = 80.385;

/// Number of masses returned: four neutralinos then two charginos.
pub const N_MASSES: usize = 6;

fn cos_w() -> f64 {
    MW / MZ
}

fn sin_w() -> f64 {
    (1.0 - cos_w().powi(2)).sqrt()
}

/// The symmetric neutralino mass matrix in the (bino, wino, higgsino_d,
/// higgsino_u) basis.
pub fn neutralino_matrix(p: &ElectroweakParams) -> Matrix4<f64> {
    let (sb, cb) = p.beta().sin_cos();
    let (sw, cw) = (sin_w(), cos_w());
    #[rustfmt::skip]
    let m = Matrix4::new(
        p.m1,           0.0,            -cb * sw * MZ,  sb * sw * MZ,
        0.0,            p.m2,           cb * cw * MZ,   -sb * cw * MZ,
        -cb * sw * MZ,  cb * cw * MZ,   0.0,            -p.mu,
        sb * sw * MZ,   -sb * cw * MZ,  -p.mu,          0.0,
    );
    m
}

/// The chargino mass matrix `X`.
pub fn chargino_matrix(p: &ElectroweakParams) -> Matrix2<f64> {
    let (sb, cb) = p.beta().sin_cos();
    let r2 = std::f64::consts::SQRT_2;
    Matrix2::new(p.m2, r2 * MW * sb, r2 * MW * cb, p.mu)
}

/// Neutralino masses, ascending.
pub fn neutralino_masses(p: &ElectroweakParams) -> [f64; 4] {
    let eig = neutralino_matrix(p).symmetric_eigenvalues();
    let mut out = [eig[0].abs(), eig[1].abs(), eig[2].abs(), eig[3].abs()];
    out.sort_by(f64::total_cmp);
    out
}

/// Chargino masses, ascending.
pub fn chargino_masses(p: &ElectroweakParams) -> [f64; 2] {
    let x = chargino_matrix(p);
    let eig = (x * x.transpose()).symmetric_eigenvalues();
    let mut out = [eig[0].abs().sqrt(), eig[1].abs().sqrt()];
    out.sort_by(f64::total_cmp);
    out
}

/// Four neutralino masses then two chargino masses.
pub fn masses(p: &ElectroweakParams) -> [f64; N_MASSES] {
    let n = neutralino_masses(p);
    let c = chargino_masses(p);
    [n[0], n[1], n[2], n[3], c[0], c[1]]
}

/// [`masses`] as a chain [`DerivedQuantity`] over `[M1, M2, μ, tan β]` rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeLevelMasses;

impl DerivedQuantity for TreeLevelMasses {
    type Error = SpectrumError;

    fn derive(&self, params: &[f64]) -> Result<Vec<f64>, Self::Error> {
        let p = ElectroweakParams::from_slice(params)?;
        Ok(masses(&p).to_vec())
    }
}
