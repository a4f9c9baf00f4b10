//! A small SLHA (SUSY Les Houches Accord) reader.
//!
//! Only `BLOCK` sections are kept. Block names are case-insensitive and
//! stored upper case. An entry is a line of leading integer keys followed by
//! a numeric value; entries with text values (as in `SPINFO`) are skipped.
//! A `DECAY` line ends the current block and its table is ignored.

use std::collections::BTreeMap;

use crate::error::SpectrumError;

/// One SLHA block: numeric entries keyed by their integer indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    scale: Option<f64>,
    entries: BTreeMap<Vec<i64>, f64>,
}

impl Block {
    /// Renormalisation scale from a `Q=` header, if any.
    pub fn scale(&self) -> Option<f64> {
        self.scale
    }

    /// Value of a single-index entry such as a PDG code in `MASS`.
    pub fn get(&self, code: i64) -> Option<f64> {
        self.entries.get([code].as_slice()).copied()
    }

    /// Value of a multi-index entry such as `NMIX 1 2`.
    pub fn get_indexed(&self, key: &[i64]) -> Option<f64> {
        self.entries.get(key).copied()
    }

    /// Number of numeric entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the block has no numeric entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parsed SLHA document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slha {
    blocks: BTreeMap<String, Block>,
}

impl Slha {
    /// Parses SLHA text.
    ///
    /// # Errors
    ///
    /// Returns [`SpectrumError::SlhaParse`] for a data line outside any
    /// block, a line that does not start with a number, or a `BLOCK`
    /// header without a name.
    pub fn parse(text: &str) -> Result<Self, SpectrumError> {
        let mut blocks = BTreeMap::new();
        let mut current: Option<(String, Block)> = None;
        let mut in_decay = false;

        for (i, raw) in text.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let mut tokens = line.split_whitespace();
            let first = tokens.next().unwrap_or_default();

            if first.eq_ignore_ascii_case("BLOCK") {
                if let Some((name, block)) = current.take() {
                    blocks.insert(name, block);
                }
                let name = tokens.next().ok_or_else(|| SpectrumError::SlhaParse {
                    line: line_no,
                    reason: "BLOCK without a name".to_string(),
                })?;
                let scale = parse_scale(tokens);
                current = Some((
                    name.to_ascii_uppercase(),
                    Block {
                        scale,
                        entries: BTreeMap::new(),
                    },
                ));
                in_decay = false;
                continue;
            }
            if first.eq_ignore_ascii_case("DECAY") {
                if let Some((name, block)) = current.take() {
                    blocks.insert(name, block);
                }
                in_decay = true;
                continue;
            }
            if in_decay {
                continue;
            }

            let Some((_, block)) = current.as_mut() else {
                return Err(SpectrumError::SlhaParse {
                    line: line_no,
                    reason: format!("'{line}' is outside a block"),
                });
            };
            if let Some((key, value)) = parse_entry(line, line_no)? {
                block.entries.insert(key, value);
            }
        }
        if let Some((name, block)) = current {
            blocks.insert(name, block);
        }
        Ok(Self { blocks })
    }

    /// Block by name, case-insensitive.
    pub fn block(&self, name: &str) -> Option<&Block> {
        self.blocks.get(&name.to_ascii_uppercase())
    }

    /// Names of all blocks, upper case.
    pub fn block_names(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }

    /// Looks up `code` in block `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SpectrumError::MissingEntry`] if the block or entry is absent.
    pub fn value(&self, name: &str, code: i64) -> Result<f64, SpectrumError> {
        self.block(name)
            .and_then(|b| b.get(code))
            .ok_or_else(|| SpectrumError::MissingEntry {
                block: name.to_ascii_uppercase(),
                code,
            })
    }
}

/// Reads `Q= <value>` (or `Q=<value>`) from the rest of a BLOCK header.
fn parse_scale<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Option<f64> {
    while let Some(tok) = tokens.next() {
        let Some(rest) = tok
            .strip_prefix("Q=")
            .or_else(|| tok.strip_prefix("q="))
        else {
            continue;
        };
        let value = if rest.is_empty() { tokens.next()? } else { rest };
        return value.parse().ok();
    }
    None
}

/// Leading integers are the key and the next token the value. A line made
/// only of integers uses the last one as the value.
fn parse_entry(line: &str, line_no: usize) -> Result<Option<(Vec<i64>, f64)>, SpectrumError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let n_int = tokens
        .iter()
        .take_while(|t| t.parse::<i64>().is_ok())
        .count();

    if n_int == tokens.len() {
        let Some((value, key)) = tokens.split_last() else {
            return Ok(None);
        };
        let key = key.iter().filter_map(|t| t.parse().ok()).collect();
        return Ok(value.parse().ok().map(|v| (key, v)));
    }

    let key: Vec<i64> = tokens[..n_int]
        .iter()
        .filter_map(|t| t.parse().ok())
        .collect();
    match tokens[n_int].parse::<f64>() {
        Ok(value) => Ok(Some((key, value))),
        Err(_) if n_int > 0 => Ok(None),
        Err(_) => Err(SpectrumError::SlhaParse {
            line: line_no,
            reason: format!("expected a numeric entry, got '{line}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# SOFTSUSY-style output
Block SPINFO          # Program information
     1    SOFTSUSY    # spectrum calculator
     2    4.1.6       # version number
Block MODSEL  # Select model
     1    0   # general MSSM
Block alpha   # Effective Higgs mixing parameter
          -1.05e-01       # alpha
Block mass   # Mass spectrum
# PDG code      mass                 particle
   1000022     1.00123456e+01   # ~neutralino(1)
   1000023    -5.20000000e+01   # ~neutralino(2)
BLOCK nmix Q= 9.11876000e+01
  1  1     9.9e-01   # N_11
  1  2    -1.2e-02   # N_12
DECAY   1000023     1.0e-03   # ~neutralino(2) decays
     5.0e-01    2     1000022   23
Block gauge Q=3.0e+03
     1     3.6e-01   # g'(Q)MSSM DRbar
";

    #[test]
    fn test_parse_blocks() {
        let slha = Slha::parse(SAMPLE).unwrap();
        let names: Vec<&str> = slha.block_names().collect();
        assert_eq!(names, ["ALPHA", "GAUGE", "MASS", "MODSEL", "NMIX", "SPINFO"]);
    }

    #[test]
    fn test_mass_entries() {
        let slha = Slha::parse(SAMPLE).unwrap();
        assert_eq!(slha.value("MASS", 1000022).unwrap(), 1.00123456e+01);
        assert_eq!(slha.value("mass", 1000023).unwrap(), -5.2e+01);
        assert!(matches!(
            slha.value("MASS", 1000024),
            Err(SpectrumError::MissingEntry { code: 1000024, .. })
        ));
    }

    #[test]
    fn test_keyless_and_integer_entries() {
        let slha = Slha::parse(SAMPLE).unwrap();
        assert_eq!(slha.block("ALPHA").unwrap().get_indexed(&[]), Some(-0.105));
        assert_eq!(slha.value("MODSEL", 1).unwrap(), 0.0);
    }

    #[test]
    fn test_text_entries_skipped() {
        let slha = Slha::parse(SAMPLE).unwrap();
        assert!(slha.block("SPINFO").unwrap().is_empty());
    }

    #[test]
    fn test_matrix_entries_and_scale() {
        let slha = Slha::parse(SAMPLE).unwrap();
        let nmix = slha.block("NMIX").unwrap();
        assert_eq!(nmix.get_indexed(&[1, 2]), Some(-1.2e-2));
        assert_eq!(nmix.scale(), Some(91.1876));
        assert_eq!(slha.block("GAUGE").unwrap().scale(), Some(3000.0));
    }

    #[test]
    fn test_decay_table_ignored() {
        let slha = Slha::parse(SAMPLE).unwrap();
        assert_eq!(slha.block("NMIX").unwrap().len(), 2);
        assert_eq!(slha.value("GAUGE", 1).unwrap(), 0.36);
    }

    #[test]
    fn test_entry_outside_block() {
        let err = Slha::parse("  1  2.0\nBlock MASS\n").unwrap_err();
        assert!(matches!(err, SpectrumError::SlhaParse { line: 1, .. }));
    }

    #[test]
    fn test_garbage_is_error() {
        let err = Slha::parse("Block MASS\nsegmentation fault\n").unwrap_err();
        assert!(matches!(err, SpectrumError::SlhaParse { line: 2, .. }));
    }

    #[test]
    fn test_empty_text() {
        let slha = Slha::parse("").unwrap();
        assert_eq!(slha.block_names().count(), 0);
        assert!(slha.value("MASS", 1000022).is_err());
    }
}
