//! Reading and writing whitespace-delimited chain files.
//!
//! One row per sample. Column 0 is the sample weight, column 1 is
//! `-2·loglike` (chi-square), the parameters follow and any further columns
//! hold previously derived quantities. Blank lines and lines starting with
//! `#` are skipped.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::ChainError;

/// A rectangular table of chain samples, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    data: Vec<f64>,
    n_cols: usize,
}

impl Chain {
    /// Builds a chain from rows of equal width.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::EmptyChain`] for no rows (or zero-width rows) and
    /// [`ChainError::RaggedRow`] if widths differ.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, ChainError> {
        let n_cols = rows.first().map_or(0, |r| r.as_ref().len());
        if n_cols == 0 {
            return Err(ChainError::EmptyChain);
        }
        let mut data = Vec::with_capacity(rows.len() * n_cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n_cols {
                return Err(ChainError::RaggedRow {
                    line: i + 1,
                    len: row.len(),
                    expected: n_cols,
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, n_cols })
    }

    /// Parses chain text.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::Parse`] for a non-numeric token,
    /// [`ChainError::RaggedRow`] for a row of the wrong width and
    /// [`ChainError::EmptyChain`] if there are no data rows.
    pub fn parse(text: &str) -> Result<Self, ChainError> {
        let mut data = Vec::new();
        let mut n_cols = 0;
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let start = data.len();
            for (column, token) in line.split_whitespace().enumerate() {
                let value = token.parse::<f64>().map_err(|_| ChainError::Parse {
                    line: i + 1,
                    column,
                    token: token.to_string(),
                })?;
                data.push(value);
            }
            let len = data.len() - start;
            if n_cols == 0 {
                n_cols = len;
            } else if len != n_cols {
                return Err(ChainError::RaggedRow {
                    line: i + 1,
                    len,
                    expected: n_cols,
                });
            }
        }
        if data.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        Ok(Self { data, n_cols })
    }

    /// Reads a chain file.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::Io`] if the file cannot be read, plus the
    /// errors of [`Chain::parse`].
    pub fn read(path: &Path) -> Result<Self, ChainError> {
        let text = fs::read_to_string(path).map_err(|e| io_err(path, &e))?;
        let chain = Self::parse(&text)?;
        tracing::debug!(
            path = %path.display(),
            rows = chain.n_rows(),
            cols = chain.n_cols(),
            "read chain"
        );
        Ok(chain)
    }

    /// Writes the chain, one row per line, values in scientific notation
    /// separated by single spaces.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::Io`] if the file cannot be created or written.
    pub fn write(&self, path: &Path) -> Result<(), ChainError> {
        let file = fs::File::create(path).map_err(|e| io_err(path, &e))?;
        let mut out = BufWriter::new(file);
        for row in self.rows() {
            let line = row
                .iter()
                .map(|&v| format_sci(v))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(out, "{line}").map_err(|e| io_err(path, &e))?;
        }
        out.flush().map_err(|e| io_err(path, &e))?;
        Ok(())
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.data.len() / self.n_cols
    }

    /// Number of columns per row.
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Row `i`. Panics if out of range.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n_cols..(i + 1) * self.n_cols]
    }

    /// Iterator over rows.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> {
        self.data.chunks_exact(self.n_cols)
    }

    /// Values of column `j`, or `None` if the chain has no such column.
    pub fn column(&self, j: usize) -> Option<impl ExactSizeIterator<Item = f64> + '_> {
        (j < self.n_cols).then(|| self.rows().map(move |r| r[j]))
    }

    /// Returns a new chain with `extra[i]` appended to row `i`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::DerivedWidth`] if the extra rows differ in
    /// width, or their count differs from the row count.
    pub fn with_columns(&self, extra: &[Vec<f64>]) -> Result<Self, ChainError> {
        if extra.len() != self.n_rows() {
            return Err(ChainError::DerivedWidth {
                row: extra.len().min(self.n_rows()),
                len: 0,
                expected: extra.first().map_or(0, Vec::len),
            });
        }
        let width = extra.first().map_or(0, Vec::len);
        let n_cols = self.n_cols + width;
        let mut data = Vec::with_capacity(self.n_rows() * n_cols);
        for (row, (orig, add)) in self.rows().zip(extra).enumerate() {
            if add.len() != width {
                return Err(ChainError::DerivedWidth {
                    row,
                    len: add.len(),
                    expected: width,
                });
            }
            data.extend_from_slice(orig);
            data.extend_from_slice(add);
        }
        Ok(Self { data, n_cols })
    }
}

/// The file name an augmented chain is written to when none is given.
///
/// Strips a trailing `.txt`, then any trailing underscores, and appends
/// `_modified.txt`: `scan_.txt` becomes `scan_modified.txt`.
pub fn default_output_name(input: &Path) -> PathBuf {
    let name = input.to_string_lossy();
    let stem = name.strip_suffix(".txt").unwrap_or(&name);
    let stem = stem.trim_end_matches('_');
    PathBuf::from(format!("{stem}_modified.txt"))
}

/// `%.18e` with a signed, at least two-digit exponent.
fn format_sci(v: f64) -> String {
    let s = format!("{v:.18e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => s,
    }
}

fn io_err(path: &Path, e: &std::io::Error) -> ChainError {
    ChainError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}
