use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::IrefError;
use crate::expand::{DEFAULT_COMPLEX_MARKER, RepresentativeRule};
use crate::filter::Sentinels;
use crate::schema::SCHEMA_VERSION;

pub const DEFAULT_CONFIG_FILE: &str = "iref-clean.json";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub complex_marker: Option<String>,
    #[serde(default)]
    pub representative: Option<RepresentativeRule>,
    #[serde(default)]
    pub extra_sentinels: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub schema_version: u32,
    pub complex_marker: String,
    pub representative: RepresentativeRule,
    pub sentinels: Sentinels,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            complex_marker: DEFAULT_COMPLEX_MARKER.to_string(),
            representative: RepresentativeRule::default(),
            sentinels: Sentinels::default(),
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `path` when given (it must exist), otherwise `iref-clean.json`
    /// in the current directory if present, otherwise the defaults.
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, IrefError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            debug!("no config file, using defaults");
            return Ok(ResolvedConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| IrefError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| IrefError::ConfigParse(err.to_string()))?;
        debug!(path = %config_path.display(), "loaded config");

        Self::resolve_config(config)
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, IrefError> {
        let schema_version = config.schema_version.unwrap_or(SCHEMA_VERSION);
        if schema_version != SCHEMA_VERSION {
            return Err(IrefError::InvalidConfig(format!(
                "unsupported schema_version {schema_version} (expected {SCHEMA_VERSION})"
            )));
        }

        let complex_marker = config
            .complex_marker
            .unwrap_or_else(|| DEFAULT_COMPLEX_MARKER.to_string());
        if complex_marker.is_empty() {
            return Err(IrefError::InvalidConfig(
                "complex_marker must not be empty".to_string(),
            ));
        }

        Ok(ResolvedConfig {
            schema_version,
            complex_marker,
            representative: config.representative.unwrap_or_default(),
            sentinels: Sentinels::new(config.extra_sentinels),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_resolves_to_defaults() {
        let resolved = ConfigLoader::resolve_config(Config::default()).unwrap();
        assert_eq!(resolved.schema_version, SCHEMA_VERSION);
        assert_eq!(resolved.complex_marker, "complex");
        assert_eq!(resolved.representative, RepresentativeRule::First);
        assert_eq!(resolved.sentinels, Sentinels::default());
    }

    #[test]
    fn parse_full_config() {
        let config: Config = serde_json::from_str(
            r#"{"schema_version": 1, "complex_marker": "complex:", "representative": "second", "extra_sentinels": ["-"]}"#,
        )
        .unwrap();
        let resolved = ConfigLoader::resolve_config(config).unwrap();
        assert_eq!(resolved.complex_marker, "complex:");
        assert_eq!(resolved.representative, RepresentativeRule::Second);
        assert!(resolved.sentinels.contains_text("-"));
    }
}
