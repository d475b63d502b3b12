#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Metagen Configuration
//!
//! Loads and saves the TOML file that tells the generator:
//! - where the schema root and the output root are
//! - which acronyms the naming rules preserve
//! - the runtime import paths and the default timestamp layout of emitted Go
//! - whether the emitted limiter table is guarded by a mutex
//! - the log level
//!
//! Every section is optional; a missing section or key takes its default.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use codegen::{GoImports, GoSettings};
use naming::{Inflector, InflectorConfig, DEFAULT_ACRONYMS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Could not locate the user's configuration directory
    #[error("Could not find user config directory")]
    ConfigDirUnavailable,
    /// A formatter name other than `goimports` or `none`
    #[error("Unknown formatter `{0}` (expected `goimports` or `none`)")]
    UnknownFormatter(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Schema input settings
    pub schema: SchemaConfig,
    /// Output settings
    pub output: OutputConfig,
    /// Naming rules
    pub naming: NamingConfig,
    /// Comment wrapping
    pub comments: CommentsConfig,
    /// Emitted Go settings
    pub go: GoConfig,
    /// Emitted rate limiter settings
    pub ratelimiter: RatelimiterConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Where schema documents are read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Schema root, one sub-directory per api
    pub dir: PathBuf,
}

impl Default for SchemaConfig {
    fn default() -> Self { Self { dir: PathBuf::from("schema") } }
}

/// The post-processing step run on each written file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    /// Run `goimports -w` on every written file
    #[default]
    Goimports,
    /// Leave files as rendered
    None,
}

impl FromStr for FormatterKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "goimports" => Ok(FormatterKind::Goimports),
            "none" => Ok(FormatterKind::None),
            _ => Err(ConfigError::UnknownFormatter(s.to_string())),
        }
    }
}

impl fmt::Display for FormatterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatterKind::Goimports => f.write_str("goimports"),
            FormatterKind::None => f.write_str("none"),
        }
    }
}

/// Where generated packages are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output root; each api becomes `<dir>/<api>/`
    pub dir: PathBuf,
    /// Formatter run on written files
    pub formatter: FormatterKind,
}

impl Default for OutputConfig {
    fn default() -> Self { Self { dir: PathBuf::from("web"), formatter: FormatterKind::default() } }
}

/// Naming rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Tokens kept in this exact spelling in generated names
    pub acronyms: Vec<String>,
}

impl Default for NamingConfig {
    fn default() -> Self { Self { acronyms: DEFAULT_ACRONYMS.iter().map(|a| a.to_string()).collect() } }
}

/// Comment wrapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// Column budget for wrapped comments
    pub width: usize,
}

impl Default for CommentsConfig {
    fn default() -> Self { Self { width: codegen::generators::doc_comment::DEFAULT_WIDTH } }
}

/// Emitted Go settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoConfig {
    /// Runtime import paths
    #[serde(flatten)]
    pub imports: GoImports,
    /// Go expression naming the layout of timestamps without an explicit one
    pub default_layout: String,
}

impl Default for GoConfig {
    fn default() -> Self {
        Self { imports: GoImports::default(), default_layout: ir::DEFAULT_DATETIME_LAYOUT.to_string() }
    }
}

/// Emitted rate limiter settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatelimiterConfig {
    /// Guard the lazily filled limiter table with a mutex
    pub synchronized: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: "info".to_string() } }
}

impl Config {
    /// Load configuration from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save this configuration as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Returns the default config file path:
    /// `{config_dir()}/metagen/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir =
            dirs::config_dir().ok_or(ConfigError::ConfigDirUnavailable)?.join("metagen");
        Ok(config_dir.join("config.toml"))
    }

    /// Naming rules built from the `[naming]` section
    pub fn inflector(&self) -> Inflector {
        Inflector::new(&InflectorConfig::with_acronyms(self.naming.acronyms.iter().cloned()))
    }

    /// Emission settings built from the `[go]`, `[comments]` and `[ratelimiter]` sections
    pub fn go_settings(&self) -> GoSettings {
        GoSettings {
            imports: self.go.imports.clone(),
            comment_width: self.comments.width,
            synchronized_ratelimiters: self.ratelimiter.synchronized,
            inflector: self.inflector(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_from_file() {
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        let toml_content = r#"
            [schema]
            dir = "scripts/meta/schema"

            [output]
            dir = "web"
            formatter = "none"

            [naming]
            acronyms = ["ID", "URL"]

            [comments]
            width = 100

            [go]
            internal = "example.com/client/internal"
            default_layout = "time.RFC3339"

            [ratelimiter]
            synchronized = true

            [logging]
            level = "debug"
        "#;
        fs::write(&temp_file, toml_content).expect("Failed to write TOML content to temporary file");

        let config = Config::from_file(&temp_file).expect("Failed to load config from temporary file");
        assert_eq!(config.schema.dir, PathBuf::from("scripts/meta/schema"));
        assert_eq!(config.output.dir, PathBuf::from("web"));
        assert_eq!(config.output.formatter, FormatterKind::None);
        assert_eq!(config.naming.acronyms, vec!["ID".to_string(), "URL".to_string()]);
        assert_eq!(config.comments.width, 100);
        assert_eq!(config.go.imports.internal, "example.com/client/internal");
        assert_eq!(config.go.imports.rate, GoImports::default().rate);
        assert_eq!(config.go.default_layout, "time.RFC3339");
        assert!(config.ratelimiter.synchronized);
        assert_eq!(config.logging.level, "debug");

        // Test file not found error
        match Config::from_file("nonexistent_file.toml").expect_err("Expected error for nonexistent file") {
            ConfigError::FileRead(_) => {}
            other => panic!("Expected FileRead error, got {:?}", other),
        }

        // Test parse error
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file for parse error test");
        fs::write(&temp_file, "invalid toml content").expect("Failed to write invalid TOML content");
        match Config::from_file(&temp_file).expect_err("Expected parse error for invalid TOML") {
            ConfigError::Parse(_) => {}
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_sections_take_defaults() {
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        fs::write(&temp_file, "[output]\ndir = \"generated\"\n").expect("Failed to write TOML content");

        let config = Config::from_file(&temp_file).expect("Failed to load partial config");
        assert_eq!(config.output.dir, PathBuf::from("generated"));
        assert_eq!(config.output.formatter, FormatterKind::Goimports);
        assert_eq!(config.schema, SchemaConfig::default());
        assert_eq!(config.go, GoConfig::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_save() {
        let config = Config::default();
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file for save test");
        config.save(&temp_file).expect("Failed to save config");

        let contents = fs::read_to_string(&temp_file).expect("Failed to read saved config file");
        assert!(contents.contains("[ratelimiter]"));
        assert!(contents.contains("goimports"));
        assert_eq!(Config::from_file(&temp_file).expect("Failed to reload saved config"), config);

        // Saving into a missing directory surfaces the io error
        let temp_dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let non_existent_subdir = temp_dir.path().join("nonexistent").join("config.toml");
        match config.save(&non_existent_subdir).expect_err("Expected file write error") {
            ConfigError::FileRead(_) => (),
            other => panic!("Expected FileRead error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_path() {
        let path = Config::default_path().expect("Failed to get default config path");
        let path_str = path.to_str().expect("Path should be valid UTF-8");
        assert!(path_str.contains("metagen"));
        assert!(path_str.ends_with("config.toml"));
    }

    #[test]
    fn test_formatter_kind_from_str() {
        assert_eq!("goimports".parse::<FormatterKind>().expect("goimports"), FormatterKind::Goimports);
        assert_eq!("NONE".parse::<FormatterKind>().expect("none"), FormatterKind::None);
        assert!(matches!("gofmt".parse::<FormatterKind>(), Err(ConfigError::UnknownFormatter(_))));
    }

    #[test]
    fn test_go_settings() {
        let mut config = Config::default();
        config.comments.width = 80;
        config.ratelimiter.synchronized = true;
        config.naming.acronyms = vec!["ID".to_string()];

        let settings = config.go_settings();
        assert_eq!(settings.comment_width, 80);
        assert!(settings.synchronized_ratelimiters);
        assert_eq!(settings.inflector.pascal("product_url").expect("pascal"), "ProductUrl");
        assert_eq!(settings.inflector.pascal("product_id").expect("pascal"), "ProductID");
    }
}
