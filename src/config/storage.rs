//! Image object storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding image originals and thumbnails.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.root_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__ROOT_DIR"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
        }
    }
}

fn default_root_dir() -> PathBuf {
    PathBuf::from("./data/objects")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_root_is_relative_data_dir() {
        assert_eq!(StorageConfig::default().root_dir, PathBuf::from("./data/objects"));
    }

    #[test]
    fn empty_root_is_rejected() {
        let config = StorageConfig {
            root_dir: PathBuf::new(),
        };
        assert!(config.validate().is_err());
    }
}
