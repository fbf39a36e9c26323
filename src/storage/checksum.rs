//! Content hashing and UUID derivation

use eyre::{Context, Result};
use md5::{Digest, Md5};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use uuid::Uuid;

const CHUNK_SIZE: usize = 4096;

/// Hex encoded MD5 digest of a file's contents.
pub fn md5sum(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let mut file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;

    let mut hasher = Md5::new();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = file
            .read(&mut buf)
            .with_context(|| format!("Failed to read while hashing: {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// File size in bytes.
pub fn size(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let meta = std::fs::metadata(path)
        .with_context(|| format!("Failed to stat file: {}", path.display()))?;
    Ok(meta.len())
}

/// Repeatable UUID built from the MD5 digest of a string.
///
/// The same input always yields the same UUID, which makes it usable for
/// identities that must survive a rerun (iterations, realizations).
///
/// # Example
/// ```
/// use fmu_dataio::storage::uuid_from_string;
///
/// let a = uuid_from_string("mycase-iter-0");
/// assert_eq!(a, uuid_from_string("mycase-iter-0"));
/// assert_ne!(a, uuid_from_string("mycase-iter-1"));
/// ```
pub fn uuid_from_string(input: &str) -> Uuid {
    let digest = Md5::digest(input.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);
    Uuid::from_bytes(bytes)
}
