//! Application configuration.
//!
//! Read from a JSON file through the injected [`FileIo`] and validated once
//! after loading, so a bad timestamp pattern or a duplicated entity is
//! reported before any request is sent.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use serde::Deserialize;
use thiserror::Error;

use nozbe_core::traits::FileIo;
use nozbe_core::{Endpoint, EntityType, SupportedEntities};

fn default_datetime_format() -> String {
    "%Y%m%d_%H%M%S".to_string()
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or is not JSON.
    #[error(transparent)]
    Read(#[from] nozbe_core::Error),

    /// The JSON does not have the expected shape.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is present but unusable.
    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub nozbe: NozbeConfig,
    pub general: GeneralConfig,
}

/// Settings for the Nozbe API.
#[derive(Debug, Clone, Deserialize)]
pub struct NozbeConfig {
    pub credentials_file: CredentialsFileConfig,
    /// Entity types to fetch, in order. Also the client's allow-list.
    pub entities: Vec<EntityType>,
    pub endpoints: EndpointsConfig,
}

/// Where the credentials file lives, relative to the base directory.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsFileConfig {
    pub directory: String,
    pub file_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndpointsConfig {
    pub refresh_token: Endpoint,
    pub data: Endpoint,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    pub data: DataConfig,
    /// strftime pattern for output file timestamps.
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub directory: String,
}

impl AppConfig {
    /// Load and validate the configuration file at `path`.
    pub fn load(files: &dyn FileIo, path: &Path) -> Result<Self, ConfigError> {
        let value = files.read_json_file(path)?;
        Self::from_value(value)
    }

    /// Build from an already decoded JSON document.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// The configured entities as an allow-list.
    pub fn supported_entities(&self) -> SupportedEntities {
        self.nozbe.entities.iter().cloned().collect()
    }

    /// Directory output files are written to.
    pub fn data_dir(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.general.data.directory)
    }

    /// Format `time` with the configured pattern.
    pub fn timestamp<Tz>(&self, time: &DateTime<Tz>) -> Result<String, ConfigError>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        render_timestamp(time, &self.general.datetime_format)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.nozbe.entities.is_empty() {
            return Err(ConfigError::Invalid {
                message: "'nozbe.entities' must list at least one entity type".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for entity in &self.nozbe.entities {
            if !seen.insert(entity) {
                return Err(ConfigError::Invalid {
                    message: format!("entity type '{}' is listed twice", entity),
                });
            }
        }

        if self.nozbe.credentials_file.file_name.is_empty() {
            return Err(ConfigError::Invalid {
                message: "'nozbe.credentials_file.file_name' cannot be empty".to_string(),
            });
        }

        render_timestamp(&Local::now(), &self.general.datetime_format)?;
        Ok(())
    }
}

/// Render `time` with a strftime `pattern`, rejecting patterns chrono cannot
/// format and results that are unusable in a file name.
fn render_timestamp<Tz>(time: &DateTime<Tz>, pattern: &str) -> Result<String, ConfigError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut rendered = String::new();
    write!(rendered, "{}", time.format(pattern)).map_err(|_| ConfigError::Invalid {
        message: format!("'general.datetime_format' is not a valid pattern: {:?}", pattern),
    })?;

    if rendered.is_empty() || rendered.contains(['/', '\\']) {
        return Err(ConfigError::Invalid {
            message: format!(
                "'general.datetime_format' must produce a non-empty file name part: {:?}",
                pattern
            ),
        });
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "nozbe": {
                "credentials_file": { "directory": "secrets", "file_name": "credentials.json" },
                "entities": ["task", "project"],
                "endpoints": {
                    "refresh_token": "https://api.nozbe.com:3000/oauth/secret/refresh",
                    "data": "https://api.nozbe.com:3000/list"
                }
            },
            "general": {
                "data": { "directory": "data" },
                "datetime_format": "%Y-%m-%d_%H-%M-%S"
            }
        })
    }

    #[test]
    fn parses_sample() {
        let config = AppConfig::from_value(sample()).unwrap();
        assert_eq!(config.nozbe.credentials_file.directory, "secrets");
        assert_eq!(config.nozbe.entities.len(), 2);
        assert_eq!(config.supported_entities().len(), 2);
        assert_eq!(
            config.nozbe.endpoints.data.as_str(),
            "https://api.nozbe.com:3000/list"
        );
        assert_eq!(
            config.data_dir(Path::new("/srv/nozbe")),
            PathBuf::from("/srv/nozbe/data")
        );
    }

    #[test]
    fn datetime_format_defaults() {
        let mut value = sample();
        value["general"]
            .as_object_mut()
            .unwrap()
            .remove("datetime_format");

        let config = AppConfig::from_value(value).unwrap();
        assert_eq!(config.general.datetime_format, "%Y%m%d_%H%M%S");
    }

    #[test]
    fn timestamp_uses_pattern() {
        let config = AppConfig::from_value(sample()).unwrap();
        let time = Local.with_ymd_and_hms(2021, 3, 14, 15, 9, 26).unwrap();
        assert_eq!(config.timestamp(&time).unwrap(), "2021-03-14_15-09-26");
    }

    #[test]
    fn rejects_invalid_pattern() {
        let mut value = sample();
        value["general"]["datetime_format"] = json!("%Y-%Q");
        assert!(matches!(
            AppConfig::from_value(value),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_pattern_with_separator() {
        let mut value = sample();
        value["general"]["datetime_format"] = json!("%Y/%m/%d");
        assert!(AppConfig::from_value(value).is_err());
    }

    #[test]
    fn rejects_empty_entities() {
        let mut value = sample();
        value["nozbe"]["entities"] = json!([]);
        assert!(AppConfig::from_value(value).is_err());
    }

    #[test]
    fn rejects_duplicate_entities() {
        let mut value = sample();
        value["nozbe"]["entities"] = json!(["task", "task"]);
        let err = AppConfig::from_value(value).unwrap_err();
        assert!(err.to_string().contains("listed twice"));
    }

    #[test]
    fn accepts_plain_http_endpoint() {
        let mut value = sample();
        value["nozbe"]["endpoints"]["data"] = json!("http://api.nozbe.com:3000/list");
        let config = AppConfig::from_value(value).unwrap();
        assert_eq!(
            config.nozbe.endpoints.data.as_str(),
            "http://api.nozbe.com:3000/list"
        );
    }

    #[test]
    fn rejects_bad_endpoint() {
        let mut value = sample();
        value["nozbe"]["endpoints"]["data"] = json!("ftp://api.nozbe.com/list");
        assert!(matches!(
            AppConfig::from_value(value),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn rejects_missing_section() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("general");
        assert!(matches!(
            AppConfig::from_value(value),
            Err(ConfigError::Parse(_))
        ));
    }
}
