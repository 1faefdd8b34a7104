use crate::error::{Result, SortError};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub fn compute_blake3_hash<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        log::error!("Failed to open file for hashing: {}: {}", path.display(), e);
        e
    })?;

    let mut reader = BufReader::new(file);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize().to_hex().to_string())
}

/// Check that `copy` holds the same bytes as `original`.
pub fn verify_copy<S: AsRef<Path>, D: AsRef<Path>>(original: S, copy: D) -> Result<()> {
    let expected = compute_blake3_hash(original)?;
    let actual = compute_blake3_hash(copy.as_ref())?;

    if !expected.eq_ignore_ascii_case(&actual) {
        return Err(SortError::HashMismatch {
            path: copy.as_ref().to_path_buf(),
            expected,
            actual,
        });
    }

    Ok(())
}
