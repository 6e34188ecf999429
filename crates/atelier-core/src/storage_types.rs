//! Storage backend selection shared between config and the storage crate.

use serde::{Deserialize, Serialize};

/// Which object-storage backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Local filesystem, served under a configured base URL.
    Local,
    /// In-memory store for tests and throwaway local runs.
    Memory,
}

impl StorageBackend {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "local" => Some(StorageBackend::Local),
            "memory" => Some(StorageBackend::Memory),
            _ => None,
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend() {
        assert_eq!(StorageBackend::parse("local"), Some(StorageBackend::Local));
        assert_eq!(StorageBackend::parse("LOCAL"), Some(StorageBackend::Local));
        assert_eq!(
            StorageBackend::parse("memory"),
            Some(StorageBackend::Memory)
        );
        assert_eq!(StorageBackend::parse("s3"), None);
    }
}
