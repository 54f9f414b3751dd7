//! Common utilities

use sha1::{Digest, Sha1};
use std::path::Path;
use std::time::SystemTime;
use xxhash_rust::xxh3::xxh3_64;

/// Hash algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    #[default]
    Xxh3,
    Sha1,
}

impl std::str::FromStr for HashAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xxh3" | "xxhash" => Ok(HashAlgorithm::Xxh3),
            "sha1" | "sha-1" => Ok(HashAlgorithm::Sha1),
            _ => Err(format!("Unknown hash algorithm: {}", s)),
        }
    }
}

/// Compute hash of bytes
pub fn hash_bytes(data: &[u8], algorithm: HashAlgorithm) -> String {
    match algorithm {
        HashAlgorithm::Xxh3 => format!("{:016x}", xxh3_64(data)),
        HashAlgorithm::Sha1 => {
            let mut hasher = Sha1::new();
            hasher.update(data);
            format!("{:x}", hasher.finalize())
        }
    }
}

/// Get file modification time in milliseconds since epoch
pub fn get_mtime_ms(path: &Path) -> std::io::Result<i64> {
    let metadata = std::fs::metadata(path)?;
    let mtime = metadata.modified()?;
    let duration = mtime
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    Ok(duration.as_millis() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_bytes() {
        let data = b"hello world";
        let hash = hash_bytes(data, HashAlgorithm::Xxh3);
        assert_eq!(hash.len(), 16); // 64-bit hex
        assert_eq!(hash, hash_bytes(data, HashAlgorithm::Xxh3));

        let sha1_hash = hash_bytes(data, HashAlgorithm::Sha1);
        assert_eq!(sha1_hash.len(), 40); // 160-bit hex
    }

    #[test]
    fn test_hash_algorithm_parse() {
        assert_eq!("xxh3".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Xxh3);
        assert_eq!("SHA1".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha1);
        assert!("md5".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn test_mtime_missing_file() {
        assert!(get_mtime_ms(Path::new("/nonexistent/file.txt")).is_err());
    }
}
