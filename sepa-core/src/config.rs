//! Configuration for message rendering and validation

use crate::types::IbanCheck;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Toolkit configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Service name (reported in logs)
    pub service_name: String,

    /// Directory rendered messages are written to when no output file is given
    pub output_dir: PathBuf,

    /// XML output configuration
    pub render: RenderConfig,

    /// Identifier validation configuration
    pub validation: ValidationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "sepa".to_string(),
            output_dir: PathBuf::from("./out"),
            render: RenderConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

/// XML output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Spaces per nesting level, 0 for compact output
    pub indent: usize,

    /// Prepend `<?xml version="1.0" encoding="UTF-8"?>`
    pub xml_declaration: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            xml_declaration: true,
        }
    }
}

/// Identifier validation configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Enforce the Mod-97 checksum on every IBAN, not only its structure
    pub iban_checksum: bool,
}

impl ValidationConfig {
    /// IBAN policy the builders apply
    pub fn iban_check(&self) -> IbanCheck {
        if self.iban_checksum {
            IbanCheck::Checksum
        } else {
            IbanCheck::Structure
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields from `SEPA_*` environment variables
    pub fn apply_env(&mut self) -> crate::Result<()> {
        if let Ok(value) = std::env::var("SEPA_IBAN_CHECKSUM") {
            self.validation.iban_checksum = parse_bool("SEPA_IBAN_CHECKSUM", &value)?;
        }

        if let Ok(value) = std::env::var("SEPA_XML_INDENT") {
            self.render.indent = value.parse().map_err(|e| {
                crate::Error::Config(format!("SEPA_XML_INDENT '{}': {}", value, e))
            })?;
        }

        if let Ok(dir) = std::env::var("SEPA_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }

        Ok(())
    }
}

fn parse_bool(name: &str, value: &str) -> crate::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(crate::Error::Config(format!(
            "{} must be a boolean, got '{}'",
            name, other
        ))),
    }
}
