use std::fs;
use std::path::Path;

use thiserror::Error;

use super::types::EngineConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    Read(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    Parse(String, #[source] toml::de::Error),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file, or defaults when no path is
    /// given.
    pub fn load(config_path: Option<&Path>) -> Result<EngineConfig, ConfigError> {
        let Some(path) = config_path else {
            return Ok(EngineConfig::default());
        };

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let raw = fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e))?;

        toml::from_str(&raw)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let cfg = ConfigLoader::load(None).unwrap();
        assert_eq!(cfg.detection.field_value, "moc");
        assert_eq!(cfg.markers.begin, "<!-- BEGIN AUTO -->");
        assert_eq!(cfg.watch.debounce_ms, 5_000);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mdhub.toml");
        fs::write(
            &path,
            "[detection]\nfield_value = \"atlas\"\n\n[watch]\ndebounce_ms = 250\n",
        )
        .unwrap();

        let cfg = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(cfg.detection.field_value, "atlas");
        assert_eq!(cfg.detection.tag, "moc");
        assert_eq!(cfg.watch.debounce_ms, 250);
        assert_eq!(cfg.markers.end, "<!-- END AUTO -->");
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mdhub.toml");
        fs::write(&path, "[detection\nbroken").unwrap();
        assert!(matches!(
            ConfigLoader::load(Some(&path)),
            Err(ConfigError::Parse(_, _))
        ));
    }
}
