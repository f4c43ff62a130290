//! Configuration system for the lookup tool host
//!
//! A single TOML file lists which tools to enable and optional per-tool
//! settings. Without a file every builtin tool is enabled against its public
//! upstream.

use crate::tools::builtin::BUILTIN_TOOLS;
use crate::tools::upstream::parse_base_url;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

static TOOL_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9_]+(\.[a-z0-9_]+)*$").expect("tool name pattern is valid")
});

/// Per-tool config keys understood by the builtin tools
const TOOL_CONFIG_KEYS: &[&str] = &["base_url"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LookupConfig {
    #[serde(default = "default_tools")]
    pub tools: HashMap<String, ToolConfig>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            tools: default_tools(),
        }
    }
}

fn default_tools() -> HashMap<String, ToolConfig> {
    BUILTIN_TOOLS
        .iter()
        .map(|name| (name.to_string(), ToolConfig::Simple("builtin".to_string())))
        .collect()
}

/// Tool configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ToolConfig {
    /// Simple form: tool_name = "builtin"
    Simple(String),
    /// Complex form: tool_name = { impl = "builtin", config = { ... } }
    Complex {
        #[serde(rename = "impl")]
        implementation: String,
        #[serde(default)]
        config: HashMap<String, serde_json::Value>,
    },
}

impl ToolConfig {
    pub fn implementation(&self) -> &str {
        match self {
            ToolConfig::Simple(implementation) => implementation,
            ToolConfig::Complex { implementation, .. } => implementation,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Invalid tool name: {0}")]
    InvalidToolName(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl LookupConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: LookupConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate tool names and per-tool settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, tool) in &self.tools {
            validate_tool_name(name)?;

            let ToolConfig::Complex { config, .. } = tool else {
                continue;
            };
            for (key, value) in config {
                if !TOOL_CONFIG_KEYS.contains(&key.as_str()) {
                    return Err(ConfigError::InvalidConfig(format!(
                        "unknown setting '{key}' for tool '{name}'"
                    )));
                }
                if key == "base_url" {
                    let url = value.as_str().ok_or_else(|| {
                        ConfigError::InvalidConfig(format!(
                            "base_url for tool '{name}' must be a string"
                        ))
                    })?;
                    parse_base_url(url).map_err(ConfigError::InvalidConfig)?;
                }
            }
        }
        Ok(())
    }
}

/// Tool names are dotted lowercase identifiers, e.g. `pokemon.ability.get`
fn validate_tool_name(name: &str) -> Result<(), ConfigError> {
    if TOOL_NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidToolName(format!(
            "Tool name '{name}' must match pattern [a-z0-9_]+(.[a-z0-9_]+)*"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let toml_content = r#"
[tools]
"pokemon.get" = "builtin"
"binance.ticker_price.get" = { impl = "builtin", config = { base_url = "https://api.binance.us" } }
"#;

        let config = LookupConfig::from_toml(toml_content).unwrap();
        assert_eq!(config.tools.len(), 2);
        assert_eq!(
            config.tools["pokemon.get"],
            ToolConfig::Simple("builtin".to_string())
        );
        match &config.tools["binance.ticker_price.get"] {
            ToolConfig::Complex {
                implementation,
                config,
            } => {
                assert_eq!(implementation, "builtin");
                assert_eq!(config["base_url"], "https://api.binance.us");
            }
            other => panic!("expected complex config, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_tools_table_enables_all_builtins() {
        let config = LookupConfig::from_toml("").unwrap();
        assert_eq!(config, LookupConfig::default());
        assert_eq!(config.tools.len(), BUILTIN_TOOLS.len());
    }

    #[test]
    fn test_empty_tools_table_enables_nothing() {
        let config = LookupConfig::from_toml("[tools]\n").unwrap();
        assert!(config.tools.is_empty());
    }

    #[test]
    fn test_invalid_tool_name() {
        assert!(validate_tool_name("Pokemon.Get").is_err());
        assert!(validate_tool_name("pokemon..get").is_err());
        assert!(validate_tool_name("").is_err());
        assert!(validate_tool_name("binance.ticker_price.get").is_ok());
    }

    #[test]
    fn test_unknown_tool_setting_rejected() {
        let toml_content = r#"
[tools]
"pokemon.get" = { impl = "builtin", config = { retries = 3 } }
"#;
        let result = LookupConfig::from_toml(toml_content);
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let toml_content = r#"
[tools]
"pokemon.get" = { impl = "builtin", config = { base_url = "pokeapi" } }
"#;
        let result = LookupConfig::from_toml(toml_content);
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn test_implementation_accessor() {
        assert_eq!(ToolConfig::Simple("builtin".into()).implementation(), "builtin");
        let complex = ToolConfig::Complex {
            implementation: "wasm".into(),
            config: HashMap::new(),
        };
        assert_eq!(complex.implementation(), "wasm");
    }
}
