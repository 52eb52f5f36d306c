//! Shared configuration loader for the chatmark toolchain.
//!
//! `defaults/chatmark.default.toml` is embedded into every binary so that
//! docs and runtime behavior stay in sync. Applications layer user-specific
//! files on top of those defaults via [`Loader`] before deserializing into
//! [`ChatmarkConfig`].

use chatmark::{Dialect, MarkdownTemplates, RenderCapabilities};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/chatmark.default.toml");

/// Top-level configuration consumed by chatmark applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatmarkConfig {
    pub parse: ParseConfig,
    pub render: RenderConfig,
    pub templates: TemplatesConfig,
}

/// Parsing knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ParseConfig {
    pub dialect: DialectName,
}

/// Named grammar variant, the configuration-file spelling of [`Dialect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DialectName {
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "chat")]
    Chat,
}

impl From<DialectName> for Dialect {
    fn from(name: DialectName) -> Self {
        match name {
            DialectName::Standard => Dialect::Standard,
            DialectName::Chat => Dialect::Chat,
        }
    }
}

/// Rendering knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub inline_images: bool,
}

impl From<&RenderConfig> for RenderCapabilities {
    fn from(config: &RenderConfig) -> Self {
        RenderCapabilities {
            supports_inline_images: config.inline_images,
        }
    }
}

/// Template table for the HTML to markdown converter.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesConfig {
    pub bold: String,
    pub italic: String,
    pub underline: String,
    pub strikethrough: String,
    pub inline_code: String,
    pub fenced_code: String,
    pub quote_line: String,
    pub quote_inline: String,
    pub link: String,
    pub spoiler: String,
    pub code_title_class: String,
}

impl From<TemplatesConfig> for MarkdownTemplates {
    fn from(config: TemplatesConfig) -> Self {
        MarkdownTemplates {
            bold: config.bold,
            italic: config.italic,
            underline: config.underline,
            strikethrough: config.strikethrough,
            inline_code: config.inline_code,
            fenced_code: config.fenced_code,
            quote_line: config.quote_line,
            quote_inline: config.quote_inline,
            link: config.link,
            spoiler: config.spoiler,
            code_title_class: config.code_title_class,
        }
    }
}

impl From<&TemplatesConfig> for MarkdownTemplates {
    fn from(config: &TemplatesConfig) -> Self {
        config.clone().into()
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ChatmarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ChatmarkConfig, ConfigError> {
    Loader::new().build()
}
