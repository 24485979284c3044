//! Hashing for content checksum assertions.

use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// Hex SHA256 digest of a file's contents, streamed in chunks so large
/// files are not pulled into memory.
pub fn sha256_file(path: &Path) -> std::io::Result<String> {
    sha256_reader(std::fs::File::open(path)?)
}

/// Hex SHA256 digest of everything a reader yields.
pub fn sha256_reader<R: Read>(mut reader: R) -> std::io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
