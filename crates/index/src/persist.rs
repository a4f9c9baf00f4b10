//! On-disk persistence for search indices.
//!
//! Index files are bincode payloads followed by a footer:
//!
//! ```text
//! [bincode (Header, index)][magic "KNX1"][CRC32 of payload, big-endian]
//! ```
//!
//! The header records the index kind and the size, dimension and fingerprint
//! of the point set, so a file built over a different pool is rejected on
//! load. Writes go to a uniquely named temp file in the destination directory
//! and are renamed into place, so an interrupted build never leaves a file
//! that passes these checks.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::IndexError;
use crate::points::Points;

/// Magic bytes preceding the CRC32 footer.
const FOOTER_MAGIC: &[u8; 4] = b"KNX1";
const FOOTER_LEN: usize = 8;

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    kind: String,
    n_points: u64,
    dim: u64,
    fingerprint: u32,
}

impl Header {
    fn describe(kind: &str, points: &Points) -> Self {
        Self {
            kind: kind.to_string(),
            n_points: points.len() as u64,
            dim: points.dim() as u64,
            fingerprint: points.fingerprint(),
        }
    }
}

/// Serializes `index` with a header describing `points` and publishes it at `path`.
pub(crate) fn write_index<T: Serialize>(
    path: &Path,
    kind: &str,
    points: &Points,
    index: &T,
) -> Result<(), IndexError> {
    let io_err = |e: io::Error| IndexError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let header = Header::describe(kind, points);
    let payload = bincode::serialize(&(&header, index)).map_err(|e| IndexError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let crc = crc32fast::hash(&payload);

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(io_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(&payload).map_err(io_err)?;
    tmp.write_all(FOOTER_MAGIC).map_err(io_err)?;
    tmp.write_all(&crc.to_be_bytes()).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    tracing::info!(
        path = %path.display(),
        kind,
        bytes = payload.len(),
        crc = %format!("{crc:#010x}"),
        "saved index"
    );
    Ok(())
}

/// Reads an index of the given kind, verifying checksum and pool identity.
pub(crate) fn read_index<T: DeserializeOwned>(
    path: &Path,
    kind: &str,
    points: &Points,
) -> Result<T, IndexError> {
    let raw = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => IndexError::NotFound {
            path: path.to_path_buf(),
        },
        _ => IndexError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;
    let corrupt = |reason: String| IndexError::Corrupt {
        path: path.to_path_buf(),
        reason,
    };

    if raw.len() < FOOTER_LEN || &raw[raw.len() - 8..raw.len() - 4] != FOOTER_MAGIC {
        return Err(corrupt("missing checksum footer".to_string()));
    }
    let (payload, footer) = raw.split_at(raw.len() - FOOTER_LEN);
    let stored = u32::from_be_bytes([footer[4], footer[5], footer[6], footer[7]]);
    let computed = crc32fast::hash(payload);
    if stored != computed {
        return Err(corrupt(format!(
            "CRC32 mismatch: expected {stored:#010x}, got {computed:#010x}"
        )));
    }

    let (header, index): (Header, T) =
        bincode::deserialize(payload).map_err(|e| corrupt(e.to_string()))?;

    let expected = Header::describe(kind, points);
    let stale = |reason: String| IndexError::Stale {
        path: path.to_path_buf(),
        reason,
    };
    if header.kind != expected.kind {
        return Err(stale(format!(
            "index kind {:?}, expected {:?}",
            header.kind, expected.kind
        )));
    }
    if header.n_points != expected.n_points || header.dim != expected.dim {
        return Err(stale(format!(
            "built over {}x{} points, pool is {}x{}",
            header.n_points, header.dim, expected.n_points, expected.dim
        )));
    }
    if header.fingerprint != expected.fingerprint {
        return Err(stale("pool fingerprint differs".to_string()));
    }

    tracing::debug!(path = %path.display(), kind, "index checksum verified");
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Points {
        Points::from_rows(&[[0.0, 0.0], [1.0, 1.0]]).unwrap()
    }

    #[test]
    fn test_round_trip_payload() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("payload.index");
        write_index(&path, "test", &points(), &vec![3u32, 1, 2]).unwrap();
        let back: Vec<u32> = read_index(&path, "test", &points()).unwrap();
        assert_eq!(back, vec![3, 1, 2]);
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("nested").join("deeper").join("x.index");
        write_index(&path, "test", &points(), &1u8).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("absent.index");
        let err = read_index::<u8>(&path, "test", &points()).unwrap_err();
        assert!(matches!(err, IndexError::NotFound { .. }));
    }

    #[test]
    fn test_flipped_byte_is_corrupt() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("flip.index");
        write_index(&path, "test", &points(), &vec![0u32; 16]).unwrap();
        let mut raw = fs::read(&path).unwrap();
        raw[3] ^= 0xFF;
        fs::write(&path, &raw).unwrap();
        let err = read_index::<Vec<u32>>(&path, "test", &points()).unwrap_err();
        assert!(matches!(err, IndexError::Corrupt { .. }), "got {err:?}");
    }

    #[test]
    fn test_truncated_is_corrupt() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("trunc.index");
        write_index(&path, "test", &points(), &vec![0u32; 16]).unwrap();
        let raw = fs::read(&path).unwrap();
        fs::write(&path, &raw[..raw.len() / 2]).unwrap();
        let err = read_index::<Vec<u32>>(&path, "test", &points()).unwrap_err();
        assert!(matches!(err, IndexError::Corrupt { .. }));
    }

    #[test]
    fn test_other_pool_is_stale() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("stale.index");
        write_index(&path, "test", &points(), &1u8).unwrap();

        let shifted = Points::from_rows(&[[0.0, 0.0], [1.0, 0.5]]).unwrap();
        let err = read_index::<u8>(&path, "test", &shifted).unwrap_err();
        assert!(matches!(err, IndexError::Stale { .. }));

        let bigger = Points::from_rows(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]).unwrap();
        let err = read_index::<u8>(&path, "test", &bigger).unwrap_err();
        assert!(matches!(err, IndexError::Stale { .. }));

        let err = read_index::<u8>(&path, "other", &points()).unwrap_err();
        assert!(matches!(err, IndexError::Stale { .. }));
    }
}
