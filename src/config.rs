//! Decoration config files
//!
//! A config file holds a complete [`DecorationConfig`] in YAML (`.yaml`,
//! `.yml`) or JSON (`.json`). Unknown keys and missing keys are errors, and
//! the loaded config is validated before it is returned.
//!
//! The precomputed-score pipeline reads a [`PrecomputedConfig`] from the same
//! kind of file. Its `scoring` block is optional.

use crate::decorate::{DecorationConfig, PrecomputedConfig};
use crate::graph::DecorError;
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Invalid(#[from] DecorError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Serialization format of a config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

fn parse_document<T: DeserializeOwned>(text: &str, format: ConfigFormat) -> ConfigResult<T> {
    Ok(match format {
        ConfigFormat::Yaml => serde_yaml::from_str(text)?,
        ConfigFormat::Json => serde_json::from_str(text)?,
    })
}

fn read_document(path: &Path) -> ConfigResult<(String, ConfigFormat)> {
    let format = ConfigFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    Ok((text, format))
}

/// Parse and validate a config document
pub fn parse_config(text: &str, format: ConfigFormat) -> ConfigResult<DecorationConfig> {
    let config: DecorationConfig = parse_document(text, format)?;
    config.validate()?;
    Ok(config)
}

/// Load, parse and validate a config file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<DecorationConfig> {
    let (text, format) = read_document(path.as_ref())?;
    parse_config(&text, format)
}

/// Parse and validate a precomputed-score config document
pub fn parse_precomputed_config(
    text: &str,
    format: ConfigFormat,
) -> ConfigResult<PrecomputedConfig> {
    let config: PrecomputedConfig = parse_document(text, format)?;
    config.validate()?;
    Ok(config)
}

/// Load, parse and validate a precomputed-score config file
pub fn load_precomputed_config(path: impl AsRef<Path>) -> ConfigResult<PrecomputedConfig> {
    let (text, format) = read_document(path.as_ref())?;
    parse_precomputed_config(&text, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringMode;
    use std::io::Write;

    const YAML: &str = r#"
scoring:
  mode: global
  alpha: 0.5
  beta: 0.3
  gamma: 0.2
  damping_factor: 0.85
  iterations: 20
mapping:
  exponent: 0.7
  size_min: 2
  size_max: 12
  label_min: 8
  label_max: 18
cluster: true
"#;

    #[test]
    fn test_parse_yaml() {
        let config = parse_config(YAML, ConfigFormat::Yaml).unwrap();
        assert!(config.cluster);
        assert!(matches!(config.scoring, ScoringMode::Global(ref g) if g.iterations == 20));
        assert_eq!(config.mapping.size_max, 12.0);
    }

    #[test]
    fn test_missing_key_rejected() {
        let yaml = YAML.replace("cluster: true\n", "");
        assert!(matches!(parse_config(&yaml, ConfigFormat::Yaml), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let yaml = YAML.replace("cluster: true", "cluster: true\nextra: 1");
        assert!(parse_config(&yaml, ConfigFormat::Yaml).is_err());
    }

    #[test]
    fn test_out_of_range_value_rejected() {
        let yaml = YAML.replace("damping_factor: 0.85", "damping_factor: 1.0");
        match parse_config(&yaml, ConfigFormat::Yaml) {
            Err(ConfigError::Invalid(DecorError::InvalidParameter { field, .. })) => {
                assert_eq!(field, "damping_factor")
            }
            other => panic!("expected parameter error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_json_file() {
        let config = parse_config(YAML, ConfigFormat::Yaml).unwrap();
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(serde_json::to_string(&config).unwrap().as_bytes()).unwrap();

        let loaded = load_config(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_config("decor.ini").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ref ext) if ext == "ini"));
    }

    #[test]
    fn test_integer_seeds_accepted() {
        let yaml = r#"
scoring:
  mode: personalized
  alpha: 0.4
  beta: 0.2
  gamma: 0.4
  lambda: 0.5
  damping_factor: 0.85
  iterations: 20
  seeds: [1, "n2", 3]
mapping:
  exponent: 1.0
  size_min: 2
  size_max: 12
  label_min: 8
  label_max: 18
cluster: false
"#;
        let config = parse_config(yaml, ConfigFormat::Yaml).unwrap();
        match config.scoring {
            ScoringMode::Personalized(ref p) => assert_eq!(p.seeds, vec!["1", "n2", "3"]),
            ref other => panic!("expected personalized mode, got {:?}", other),
        }

        let json = r#"{
            "scoring": {"mode": "personalized", "alpha": 0.4, "beta": 0.2, "gamma": 0.4,
                        "lambda": 0.5, "damping_factor": 0.85, "iterations": 20,
                        "seeds": [1, 2]},
            "mapping": {"exponent": 1.0, "size_min": 2, "size_max": 12,
                        "label_min": 8, "label_max": 18},
            "cluster": false
        }"#;
        let config = parse_config(json, ConfigFormat::Json).unwrap();
        match config.scoring {
            ScoringMode::Personalized(ref p) => assert_eq!(p.seeds, vec!["1", "2"]),
            ref other => panic!("expected personalized mode, got {:?}", other),
        }
    }

    #[test]
    fn test_precomputed_config_without_scoring() {
        let yaml = YAML.split("mapping:").nth(1).map(|rest| format!("mapping:{}", rest)).unwrap();
        let config = parse_precomputed_config(&yaml, ConfigFormat::Yaml).unwrap();
        assert!(config.scoring.is_none());
        assert!(config.cluster);

        // The full decoration config is also a valid precomputed config
        let full = parse_precomputed_config(YAML, ConfigFormat::Yaml).unwrap();
        assert_eq!(full.mapping, config.mapping);

        let bad = yaml.replace("exponent: 0.7", "exponent: -1");
        assert!(matches!(
            parse_precomputed_config(&bad, ConfigFormat::Yaml),
            Err(ConfigError::Invalid(DecorError::InvalidParameter { .. }))
        ));
    }
}
