//! grid.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub directory: DirectoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Path of the embedded region database.
    pub store_path: PathBuf,
}

impl GridConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: GridConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.toml");
        std::fs::write(
            &path,
            r#"
[directory]
store_path = "/var/lib/gridplane/regions.redb"
"#,
        )
        .unwrap();

        let config = GridConfig::from_file(&path).unwrap();
        assert_eq!(
            config.directory.store_path,
            PathBuf::from("/var/lib/gridplane/regions.redb")
        );
    }

    #[test]
    fn round_trips_through_toml() {
        let config = GridConfig {
            directory: DirectoryConfig {
                store_path: PathBuf::from("regions.redb"),
            },
        };
        let rendered = config.to_toml_string().unwrap();
        let reparsed: GridConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(reparsed.directory.store_path, config.directory.store_path);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GridConfig::from_file(Path::new("/nonexistent/grid.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
