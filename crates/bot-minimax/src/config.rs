//! Configuration loading for bot-minimax.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("search depth must be at least 1")]
    ZeroDepth,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Name reported in `id name`.
    pub name: String,
    /// Author reported in `id author`.
    pub author: String,
    /// Depth searched when `go` carries none.
    pub depth: u32,
    /// Filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            name: "MinimaxBot".to_string(),
            author: "Chess Devtools".to_string(),
            depth: 4,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Reads and validates a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses config text; missing keys take their defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        if config.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::parse("depth = 6\nname = \"Tester\"\n").unwrap();
        assert_eq!(config.depth, 6);
        assert_eq!(config.name, "Tester");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn zero_depth_is_rejected() {
        assert!(matches!(
            Config::parse("depth = 0"),
            Err(ConfigError::ZeroDepth)
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Config::parse("dpeth = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Config::load(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
