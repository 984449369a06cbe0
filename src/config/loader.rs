//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ShippingConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format '{0}' (expected .toml or .json)")]
    UnsupportedFormat(String),

    #[error("Invalid shipping configuration: {}", join_errors(.0))]
    InvalidConfig(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Config file formats, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parse and validate a shipping table from an in-memory string.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<ShippingConfig, ConfigError> {
    let config: ShippingConfig = match format {
        ConfigFormat::Toml => toml::from_str(content)?,
        ConfigFormat::Json => serde_json::from_str(content)?,
    };

    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            tracing::warn!(%error, "Shipping config validation failed");
        }
        return Err(ConfigError::InvalidConfig(errors));
    }

    Ok(config)
}

/// Load and validate a shipping table from a TOML or JSON file.
pub fn load_config(path: &Path) -> Result<ShippingConfig, ConfigError> {
    let format = ConfigFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content, format)?;

    tracing::info!(
        path = %path.display(),
        countries = config.available_countries.len(),
        methods = config.shipping_methods.len(),
        tiers = config.express_tiers.len(),
        "Shipping config loaded"
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
        available_countries = ["Germany"]
        free_shipping_threshold = 500
        free_max_weight = 5

        [[shipping_methods]]
        id = "standard"
        name = "Standard"
        base_price = 9.99
        is_free_eligible = true
    "#;

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/b.toml")).unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("b.JSON")).unwrap(), ConfigFormat::Json);
        assert!(matches!(
            ConfigFormat::from_path(Path::new("shipping.yaml")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.shipping_methods.len(), 1);
        assert!(config.cod_countries.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/shipping.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_config("available_countries = [", ConfigFormat::Toml).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));

        let err = parse_config("{", ConfigFormat::Json).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_invalid_config_reports_every_error() {
        let raw = MINIMAL
            .replace("is_free_eligible = true", "")
            .replace("free_max_weight = 5", "free_max_weight = 0");

        let err = parse_config(&raw, ConfigFormat::Toml).unwrap_err();
        let ConfigError::InvalidConfig(errors) = &err else {
            panic!("expected InvalidConfig, got {err:?}");
        };
        assert_eq!(errors.len(), 2);
        assert!(err.to_string().starts_with("Invalid shipping configuration: "));
    }
}
