//! Content digests for staged files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{IngestError, IngestResult};

const HASH_CHUNK_LEN: usize = 8192;

/// Compute the SHA-256 digest of the file at `path` as lowercase hex.
///
/// The file is consumed in fixed-size chunks, so memory use is independent
/// of file size.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read; the caller must
/// surface this before any relocation takes place.
pub fn sha256_hex(path: &Path) -> IngestResult<String> {
    let mut file =
        File::open(path).map_err(|source| IngestError::io("hash.open", path, source))?;
    let mut hasher = Sha256::new();
    let mut chunk = [0_u8; HASH_CHUNK_LEN];
    loop {
        let read = file
            .read(&mut chunk)
            .map_err(|source| IngestError::io("hash.read", path, source))?;
        if read == 0 {
            break;
        }
        hasher.update(&chunk[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn digest_of_single_byte_content_is_stable() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("a.txt");
        fs::write(&path, "a")?;

        assert_eq!(
            sha256_hex(&path)?,
            "ca978112ca1bbdcafac231b39a23dc4da786eff8147c4e72b9807785afee48bb"
        );
        Ok(())
    }

    #[test]
    fn digest_of_empty_file_matches_known_vector() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("empty");
        fs::write(&path, "")?;

        assert_eq!(
            sha256_hex(&path)?,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        Ok(())
    }

    #[test]
    fn chunked_digest_matches_million_a_vector() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("big");
        fs::write(&path, "a".repeat(1_000_000))?;

        assert_eq!(
            sha256_hex(&path)?,
            "cdc76e5c9914fb9281a1c7e284d73e67f1809a48a497200e046d39ccc7112cd0"
        );
        Ok(())
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let temp = TempDir::new().expect("tempdir");
        let err = sha256_hex(&temp.path().join("absent")).expect_err("open should fail");
        assert!(matches!(
            err,
            IngestError::Io {
                operation: "hash.open",
                ..
            }
        ));
    }
}
