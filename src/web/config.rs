use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub web: WebConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub tle_file: PathBuf,
}

/// Knobs for the proximity matcher. All optional in the file.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    #[serde(default = "default_tolerance_km")]
    pub tolerance_km: f64,
    #[serde(default = "default_track_hours")]
    pub track_hours: u32,
    #[serde(default = "default_scan_hours")]
    pub scan_hours: u32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            tolerance_km: default_tolerance_km(),
            track_hours: default_track_hours(),
            scan_hours: default_scan_hours(),
        }
    }
}

fn default_tolerance_km() -> f64 {
    1.0
}

fn default_track_hours() -> u32 {
    24
}

fn default_scan_hours() -> u32 {
    24
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_config() {
        let yaml = "
web:
  bind: \"127.0.0.1:9000\"
catalog:
  tle_file: data/tle.dat
matching:
  tolerance_km: 2.5
  track_hours: 12
  scan_hours: 6
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.web.bind, "127.0.0.1:9000");
        assert_eq!(config.catalog.tle_file, PathBuf::from("data/tle.dat"));
        assert_eq!(config.matching.tolerance_km, 2.5);
        assert_eq!(config.matching.track_hours, 12);
        assert_eq!(config.matching.scan_hours, 6);
    }

    #[test]
    fn missing_sections_take_defaults() {
        let yaml = "
web: {}
catalog:
  tle_file: /var/lib/starcrossed/tle.dat
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert_eq!(config.matching.tolerance_km, 1.0);
        assert_eq!(config.matching.track_hours, 24);
        assert_eq!(config.matching.scan_hours, 24);
    }
}
