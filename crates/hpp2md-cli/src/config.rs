//! Configuration file support for hpp2md CLI
//!
//! Loads settings from `_hpp2md.toml` configuration file.

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "_hpp2md.toml";

/// Schema URL for the configuration file
pub const SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/measurement-kit/hpp2md/main/crates/hpp2md-cli/schema/hpp2md.schema.json";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Page content configuration
    #[serde(skip_serializing_if = "PageConfig::is_empty")]
    pub page: PageConfig,
    /// Input/output path mapping configuration
    #[serde(skip_serializing_if = "PathsConfig::is_empty")]
    pub paths: PathsConfig,
    /// Description extraction configuration
    #[serde(skip_serializing_if = "DescriptionConfig::is_empty")]
    pub description: DescriptionConfig,
    /// Synopsis formatter configuration
    #[serde(skip_serializing_if = "FormatterConfig::is_empty")]
    pub formatter: FormatterConfig,
}

/// Page content configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct PageConfig {
    /// Text of the LIBRARY section
    /// (default: "measurement-kit (`libmeasurement_kit`, `-lmeasurement_kit`)")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
    /// Language tag of the SYNOPSIS code fence (default: "C++")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl PageConfig {
    fn is_empty(&self) -> bool {
        self.library.is_none() && self.language.is_none()
    }
}

/// Input/output path mapping configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct PathsConfig {
    /// Segment removed from the input path to form the page name (default: "include/")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strip_prefix: Option<String>,
    /// Segment of the input path replaced by `output_prefix` (default: "include/mk")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_prefix: Option<String>,
    /// Replacement for `source_prefix` in the output path (default: "doc/api")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_prefix: Option<String>,
    /// Extension replacing `.hpp`/`.h` in the output path (default: "md")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_extension: Option<String>,
}

impl PathsConfig {
    fn is_empty(&self) -> bool {
        self.strip_prefix.is_none()
            && self.source_prefix.is_none()
            && self.output_prefix.is_none()
            && self.output_extension.is_none()
    }
}

/// Description extraction configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct DescriptionConfig {
    /// Number of license banner lines skipped before reading comments (default: 4)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_lines: Option<usize>,
    /// Which comments form the description: "leading" (the block right after
    /// the banner) or "file" (every comment run) (default: "leading")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl DescriptionConfig {
    fn is_empty(&self) -> bool {
        self.banner_lines.is_none() && self.scope.is_none()
    }
}

/// Synopsis formatter configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct FormatterConfig {
    /// Run the synopsis through the formatter; when false the code is used verbatim (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Formatter executable, fed through stdin (default: "clang-format")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Extra arguments passed to the formatter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
}

impl FormatterConfig {
    fn is_empty(&self) -> bool {
        self.enabled.is_none() && self.command.is_none() && self.args.is_none()
    }
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Try to load configuration from a directory (looks for `_hpp2md.toml`)
    ///
    /// Returns `Ok(None)` if the config file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Generate JSON schema for the configuration
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Generate JSON schema as a string
    pub fn json_schema_string() -> Result<String> {
        let schema = Self::json_schema();
        serde_json::to_string_pretty(&schema).context("Failed to serialize JSON schema")
    }

    /// Serialize configuration to TOML string with schema directive
    pub fn to_toml_with_schema(&self) -> Result<String> {
        let toml_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        Ok(format!("#:schema {}\n\n{}", SCHEMA_URL, toml_content))
    }

    /// Create a sample configuration with the built-in defaults for init command
    pub fn sample() -> Self {
        Config {
            page: PageConfig {
                library: Some(hpp2md_core::page::DEFAULT_LIBRARY.to_string()),
                language: Some(hpp2md_core::page::DEFAULT_LANGUAGE.to_string()),
            },
            paths: PathsConfig {
                strip_prefix: Some("include/".to_string()),
                source_prefix: Some("include/mk".to_string()),
                output_prefix: Some("doc/api".to_string()),
                output_extension: Some("md".to_string()),
            },
            description: DescriptionConfig {
                banner_lines: Some(hpp2md_core::description::DEFAULT_BANNER_LINES),
                scope: Some("leading".to_string()),
            },
            formatter: FormatterConfig {
                enabled: Some(true),
                command: Some(hpp2md_core::synopsis::DEFAULT_FORMATTER.to_string()),
                args: None, // clang-format picks up .clang-format by itself
            },
        }
    }
}
