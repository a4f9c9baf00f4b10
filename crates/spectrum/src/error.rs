//! Error types for the knnlike-spectrum crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the knnlike-spectrum crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SpectrumError {
    /// Returned when a parameter row has the wrong length.
    #[error("expected {expected} parameters (M1, M2, mu, tan beta), got {len}")]
    ParamCount {
        /// Number of values supplied.
        len: usize,
        /// Number of values required.
        expected: usize,
    },

    /// Returned when a parameter is NaN or infinite.
    #[error("parameter {name} is not finite: {value}")]
    NonFiniteParam {
        /// Parameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Returned when the spectrum generator cannot be started or talked to.
    #[error("failed to run {}: {reason}", program.display())]
    Program {
        /// Path of the spectrum generator.
        program: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when SLHA text is malformed.
    #[error("SLHA line {line}: {reason}")]
    SlhaParse {
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// Returned when a required SLHA block or entry is absent.
    #[error("SLHA block {block} has no entry {code}")]
    MissingEntry {
        /// Block name, upper case.
        block: String,
        /// The missing entry key.
        code: i64,
    },
}
