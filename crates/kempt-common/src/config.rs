//! Loading JSONC configuration files from disk.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::jsonc::{JsoncError, parse_jsonc};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: JsoncError,
    },
    #[error("config extends cycle detected at {}", path.display())]
    ExtendsCycle { path: PathBuf },
    #[error("config extends chain deeper than {limit} at {}", path.display())]
    ExtendsTooDeep { path: PathBuf, limit: u32 },
}

/// Read and parse a JSONC file.
pub fn read_jsonc_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_jsonc(&source).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        name: String,
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let err = read_jsonc_file::<Sample>(Path::new("/nonexistent/kempt/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/kempt/config.json"));
    }

    #[test]
    fn test_read_jsonc_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.json");
        std::fs::write(&path, "{\n  // comment\n  \"name\": \"x\",\n}\n").unwrap();

        let sample: Sample = read_jsonc_file(&path).unwrap();
        assert_eq!(sample, Sample { name: "x".into() });

        std::fs::write(&path, "{ name }").unwrap();
        assert!(matches!(read_jsonc_file::<Sample>(&path), Err(ConfigError::Parse { .. })));
    }
}
