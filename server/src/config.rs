use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Socket address to listen on.
    pub bind: String,
    pub database_path: PathBuf,
    /// Directory holding the built client; served under `/pkg`.
    pub static_dir: PathBuf,
    /// Fallback `EnvFilter` directive when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            database_path: PathBuf::from("pagesmith.sqlite"),
            static_dir: PathBuf::from("pkg"),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// `Ok(None)` when the file does not exist.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Ok(Self::load_from_path(path)?.unwrap_or_default()),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load_from_path(temp_dir.path().join("absent.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pagesmith.toml");
        std::fs::write(&path, "bind = \"0.0.0.0:8080\"\n").unwrap();

        let config = Config::load_or_default(Some(&path)).unwrap();
        assert_eq!(
            config,
            Config {
                bind: "0.0.0.0:8080".to_string(),
                ..Config::default()
            }
        );
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        std::fs::write(&path, "bind = [").unwrap();

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let original = Config {
            database_path: PathBuf::from("/var/lib/pagesmith/db.sqlite"),
            log_level: "debug".to_string(),
            ..Config::default()
        };
        let toml_str = toml::to_string(&original).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(original, parsed);
    }
}
