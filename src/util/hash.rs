//! Hashing utilities for compiler checksums.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

/// Compute SHA256 hash of a file, streaming it in blocks.
///
/// Compiler executables can be large, so the file is never read whole.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path)
        .with_context(|| format!("failed to open file for hashing: {}", path.display()))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HELLO: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn test_sha256_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("icc");
        std::fs::write(&path, "hello").unwrap();

        assert_eq!(sha256_file(&path).unwrap(), HELLO);
    }

    #[test]
    fn test_sha256_file_larger_than_buffer() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big");
        let data = vec![0x5au8; 20_000];
        std::fs::write(&path, &data).unwrap();

        assert_eq!(sha256_file(&path).unwrap(), hex::encode(Sha256::digest(&data)));
    }

    #[test]
    fn test_sha256_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = sha256_file(&tmp.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("failed to open file for hashing"));
    }
}
