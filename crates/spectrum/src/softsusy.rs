//! Running an external SLHA spectrum generator (SOFTSUSY's `softpoint.x`).
//!
//! Each call spawns its own child process and talks to it only over stdin
//! and stdout, so calls from many threads do not interfere.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use knnlike_chain::DerivedQuantity;
use tracing::{debug, warn};

use crate::error::SpectrumError;
use crate::params::ElectroweakParams;
use crate::slha::Slha;
use crate::tree_level::{self, N_MASSES};

/// PDG codes of the four neutralinos and two charginos, in output order.
pub const MASS_CODES: [i64; N_MASSES] = [1000022, 1000023, 1000025, 1000035, 1000024, 1000037];

/// Where to find the spectrum generator.
///
/// # Example
///
/// ```
/// use knnlike_spectrum::SoftsusyConfig;
///
/// let config = SoftsusyConfig::new().with_program("/opt/softsusy/softpoint.x");
/// assert_eq!(config.program().to_str(), Some("/opt/softsusy/softpoint.x"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SoftsusyConfig {
    /// Executable, called as `<program> leshouches`.
    program: PathBuf,
}

impl SoftsusyConfig {
    /// Creates a new configuration.
    ///
    /// Default: `program = "softpoint.x"`, looked up on `PATH`.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("softpoint.x"),
        }
    }

    /// Sets the executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Returns the executable.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for SoftsusyConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// SLHA input for a point: Standard-Model inputs, `tan β`, and `M1`, `M2`,
/// `μ` with every other soft mass at about 3 TeV.
pub fn slha_input(p: &ElectroweakParams) -> String {
    format!(
        "\
Block MODSEL                 # Select model
    1    0
Block SMINPUTS               # Standard Model inputs
    1   1.279340000e+02      # alpha^(-1) SM MSbar(MZ)
    2   1.166370000e-05      # G_Fermi
    3   1.172000000e-01      # alpha_s(MZ) SM MSbar
    4   9.118760000e+01      # MZ(pole)
    5   4.250000000e+00      # mb(mb) SM MSbar
    6   1.743000000e+02      # mtop(pole)
    7   1.777000000e+00      # mtau(pole)
Block MINPAR
    3   {tan_beta:.15e}   # tanbeta(mZ)^DRbar
Block EXTPAR     Q=  3.002744880346726e+03
    1   {m1:.15e}   # bino mass parameter M1
    2   {m2:.15e}   # wino mass parameter M2
    3   4.999835372666907e+03   # gluino mass parameter M3
   23   {mu:.15e}   # mu parameter
   26   3.000003548804418e+03   # mA pole mass
   31   3.000003548804418e+03   # sqrt(ml2(1,1))
   32   3.000003575648636e+03   # sqrt(ml2(2,2))
   33   3.000011270101646e+03   # sqrt(ml2(3,3))
   34   2.999993744299581e+03   # sqrt(me2(1,1))
   35   2.999993798271672e+03   # sqrt(me2(2,2))
   36   3.000009286843936e+03   # sqrt(me2(3,3))
   41   2.999738724081019e+03   # sqrt(mq2(1,1))
   42   2.999738731883629e+03   # sqrt(mq2(2,2))
   43   2.999779948524007e+03   # sqrt(mq2(3,3))
   44   2.999741981728408e+03   # sqrt(mu2(1,1))
   45   2.999741982627098e+03   # sqrt(mu2(2,2))
   46   2.999796825865484e+03   # sqrt(mu2(3,3))
   47   2.999735317691816e+03   # sqrt(md2(1,1))
   48   2.999735332514917e+03   # sqrt(md2(2,2))
   49   2.999763723561374e+03   # sqrt(md2(3,3))
",
        tan_beta = p.tan_beta,
        m1 = p.m1,
        m2 = p.m2,
        mu = p.mu,
    )
}

/// Absolute neutralino and chargino masses from the `MASS` block.
///
/// # Errors
///
/// Returns [`SpectrumError::MissingEntry`] if any of [`MASS_CODES`] is absent.
pub fn masses_from_slha(slha: &Slha) -> Result<[f64; N_MASSES], SpectrumError> {
    let mut out = [0.0; N_MASSES];
    for (m, &code) in out.iter_mut().zip(&MASS_CODES) {
        *m = slha.value("MASS", code)?.abs();
    }
    Ok(out)
}

/// Loop-corrected masses from the spectrum generator, with tree-level
/// fallback.
#[derive(Debug, Clone)]
pub struct Softsusy {
    config: SoftsusyConfig,
}

impl Softsusy {
    /// Creates a runner for `config.program()`.
    pub fn new(config: SoftsusyConfig) -> Self {
        Self { config }
    }

    /// The runner's configuration.
    pub fn config(&self) -> &SoftsusyConfig {
        &self.config
    }

    /// Runs the generator on `p` and returns its standard output.
    ///
    /// Once the process is running, nothing it does is an error here: a
    /// generator that closes stdin early, exits non-zero or cannot be waited
    /// on yields whatever it printed (possibly nothing) for the caller to
    /// judge.
    ///
    /// # Errors
    ///
    /// Returns [`SpectrumError::Program`] if the process cannot be spawned.
    pub fn run(&self, p: &ElectroweakParams) -> Result<String, SpectrumError> {
        let program = self.config.program();
        let mut child = Command::new(program)
            .arg("leshouches")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SpectrumError::Program {
                program: program.to_path_buf(),
                reason: e.to_string(),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(slha_input(p).as_bytes()) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    debug!("spectrum generator closed stdin before reading its input");
                }
                Err(e) => warn!(reason = %e, "failed to send input to spectrum generator"),
            }
        }
        let output = match child.wait_with_output() {
            Ok(output) => output,
            Err(e) => {
                warn!(reason = %e, "failed to collect spectrum generator output");
                return Ok(String::new());
            }
        };

        if !output.status.success() {
            debug!(
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "spectrum generator exited unsuccessfully"
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Neutralino then chargino masses for `p`.
    ///
    /// If the generator's output cannot be parsed or lacks a mass, a warning
    /// is logged and the tree-level masses are returned instead.
    ///
    /// # Errors
    ///
    /// Returns [`SpectrumError::Program`] only if the generator cannot be run.
    pub fn masses(&self, p: &ElectroweakParams) -> Result<[f64; N_MASSES], SpectrumError> {
        let stdout = self.run(p)?;
        match Slha::parse(&stdout).and_then(|slha| masses_from_slha(&slha)) {
            Ok(m) => Ok(m),
            Err(e) => {
                warn!(
                    reason = %e,
                    m1 = p.m1,
                    m2 = p.m2,
                    mu = p.mu,
                    tan_beta = p.tan_beta,
                    "using tree-level formulas"
                );
                Ok(tree_level::masses(p))
            }
        }
    }
}

impl DerivedQuantity for Softsusy {
    type Error = SpectrumError;

    fn derive(&self, params: &[f64]) -> Result<Vec<f64>, Self::Error> {
        let p = ElectroweakParams::from_slice(params)?;
        Ok(self.masses(&p)?.to_vec())
    }
}
