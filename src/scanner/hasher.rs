//! Two-mode file hasher.
//!
//! # Overview
//!
//! [`digest`] computes the [`FileDigest`] of a regular file:
//!
//! - **Thorough mode**: SHA-256 over the entire file, no prefix.
//! - **Fast mode, small files** (≤ [`THRESHOLD_FILE_SIZE`]): CRC32 over the
//!   entire file, prefixed with `f`.
//! - **Fast mode, large files**: CRC32 over the "crucial bytes" (head, middle
//!   and tail samples, see [`read_crucial_bytes`]), prefixed with `s`.
//!
//! The prefixes keep fast-mode and thorough-mode digests from ever colliding.
//!
//! # Limitations
//!
//! The sampled hash only looks at 16 KiB of a large file. Two different
//! files that agree on size, extension and all three sampled regions are
//! reported as duplicates. Use thorough mode when that matters.

use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use sha2::{Digest, Sha256};

use super::digest::{file_extension, FileDigest};
use super::HashError;

/// Files up to this size are hashed in full in fast mode.
pub const THRESHOLD_FILE_SIZE: u64 = 16 * 1024;

/// Length of the sample taken from the start of the file.
const HEAD_LEN: usize = (THRESHOLD_FILE_SIZE / 2) as usize;
/// Length of the sample taken at the midpoint.
const MIDDLE_LEN: usize = (THRESHOLD_FILE_SIZE / 4) as usize;
/// Length of the sample taken from the end of the file.
const TAIL_LEN: usize = (THRESHOLD_FILE_SIZE / 4) as usize;

/// Read buffer for streaming whole-file hashes.
const BUFFER_SIZE: usize = 64 * 1024;

/// Hash prefix for CRC32 over the full content of a small file.
const PREFIX_FULL: &str = "f";
/// Hash prefix for CRC32 over the sampled bytes of a large file.
const PREFIX_SAMPLED: &str = "s";

/// Compute the fingerprint of the file at `path`.
///
/// Uses `lstat` semantics: a symlink is rejected rather than followed.
///
/// # Errors
///
/// - [`HashError::NotRegularFile`] for symlinks, directories and special files
/// - [`HashError::Truncated`] if a sampled region can't be read in full
/// - [`HashError::NotFound`], [`HashError::PermissionDenied`] or
///   [`HashError::Io`] for other I/O failures
///
/// # Example
///
/// ```no_run
/// use dupscan::scanner::digest;
/// use std::path::Path;
///
/// let fast = digest(Path::new("photo.jpg"), false).unwrap();
/// let thorough = digest(Path::new("photo.jpg"), true).unwrap();
/// assert_ne!(fast.hash, thorough.hash);
/// ```
pub fn digest(path: &Path, thorough: bool) -> Result<FileDigest, HashError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| HashError::from_io(path, e))?;
    if !metadata.file_type().is_file() {
        return Err(HashError::NotRegularFile(path.to_path_buf()));
    }
    let size = metadata.len();

    let hash = if thorough {
        sha256_file(path)?
    } else if size <= THRESHOLD_FILE_SIZE {
        format!("{PREFIX_FULL}{}", crc32_file(path)?)
    } else {
        let bytes = read_crucial_bytes(path, size)?;
        format!("{PREFIX_SAMPLED}{}", crc32_hex(&bytes))
    };

    log::trace!("Hashed {} -> {}", path.display(), hash);

    Ok(FileDigest {
        extension: file_extension(path),
        size,
        hash,
    })
}

/// Read the head, middle and tail samples of a file.
///
/// Returns the first `THRESHOLD_FILE_SIZE / 2` bytes, the
/// `THRESHOLD_FILE_SIZE / 4` bytes starting at `size / 2`, and the last
/// `THRESHOLD_FILE_SIZE / 4` bytes, concatenated in that order. The result
/// is always exactly [`THRESHOLD_FILE_SIZE`] bytes long.
///
/// # Errors
///
/// Returns [`HashError::Truncated`] if any region lies (partly) outside the
/// file, e.g. because it shrank after `size` was taken.
pub fn read_crucial_bytes(path: &Path, size: u64) -> Result<Vec<u8>, HashError> {
    let mut file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
    let mut bytes = vec![0u8; HEAD_LEN + MIDDLE_LEN + TAIL_LEN];

    let tail_offset = size
        .checked_sub(TAIL_LEN as u64)
        .ok_or_else(|| HashError::Truncated {
            path: path.to_path_buf(),
            region: "end",
        })?;

    let (head, rest) = bytes.split_at_mut(HEAD_LEN);
    let (middle, tail) = rest.split_at_mut(MIDDLE_LEN);
    read_region(&mut file, path, 0, head, "first")?;
    read_region(&mut file, path, size / 2, middle, "middle")?;
    read_region(&mut file, path, tail_offset, tail, "end")?;

    Ok(bytes)
}

/// Fill `buf` from `offset`, failing if the file ends early.
fn read_region(
    file: &mut File,
    path: &Path,
    offset: u64,
    buf: &mut [u8],
    region: &'static str,
) -> Result<(), HashError> {
    file.seek(SeekFrom::Start(offset))
        .map_err(|e| HashError::from_io(path, e))?;
    file.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            HashError::Truncated {
                path: path.to_path_buf(),
                region,
            }
        } else {
            HashError::from_io(path, e)
        }
    })
}

/// Stream the whole file through `update`.
fn stream_file(path: &Path, mut update: impl FnMut(&[u8])) -> Result<(), HashError> {
    let mut file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
    let mut buffer = vec![0u8; BUFFER_SIZE];
    loop {
        let n = match file.read(&mut buffer) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(HashError::from_io(path, e)),
        };
        update(&buffer[..n]);
    }
}

fn sha256_file(path: &Path) -> Result<String, HashError> {
    let mut hasher = Sha256::new();
    stream_file(path, |chunk| hasher.update(chunk))?;
    Ok(hex::encode(hasher.finalize()))
}

fn crc32_file(path: &Path) -> Result<String, HashError> {
    let mut hasher = crc32fast::Hasher::new();
    stream_file(path, |chunk| hasher.update(chunk))?;
    Ok(hex::encode(hasher.finalize().to_be_bytes()))
}

/// CRC32 (IEEE) of `bytes` as 8 lowercase hex characters, big-endian.
fn crc32_hex(bytes: &[u8]) -> String {
    hex::encode(crc32fast::hash(bytes).to_be_bytes())
}
