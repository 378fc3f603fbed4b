//! Settings parser
//!
//! Parses `tmplbind.toml` into preview and logging settings.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::template::render::{PreviewRenderer, DEFAULT_CONTACT_NAME, DEFAULT_EMPTY_TEXT};

/// Preview display texts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewSettings {
    /// Text shown in the contact-name slot (default: "Contact name")
    #[serde(default = "default_contact_name")]
    pub contact_name: String,
    /// Text shown when there is nothing to preview (default: "No content")
    #[serde(default = "default_empty_text")]
    pub empty_text: String,
}

fn default_contact_name() -> String {
    DEFAULT_CONTACT_NAME.to_string()
}

fn default_empty_text() -> String {
    DEFAULT_EMPTY_TEXT.to_string()
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            contact_name: default_contact_name(),
            empty_text: default_empty_text(),
        }
    }
}

/// Session log location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogSettings {
    /// Directory holding `sessions.jsonl` (default: `.tmplbind`)
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(".tmplbind")
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
        }
    }
}

/// Top-level settings parsed from tmplbind.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Preview settings
    #[serde(default)]
    pub preview: PreviewSettings,
    /// Logging settings
    #[serde(default)]
    pub log: LogSettings,
}

impl Settings {
    /// Parse a tmplbind.toml file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Load settings from `path` if it exists, otherwise use defaults
    pub fn from_path_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse tmplbind.toml content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content).context("Failed to parse tmplbind.toml")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Build a preview renderer from these settings
    #[must_use]
    pub fn renderer(&self) -> PreviewRenderer {
        PreviewRenderer::new(&self.preview.contact_name, &self.preview.empty_text)
    }

    /// Validate the settings
    fn validate(&self) -> Result<()> {
        if self.preview.contact_name.trim().is_empty() {
            bail!("preview.contact_name cannot be empty");
        }

        // The contact name is shown inside the rendered body; a token in it
        // would read as an unresolved slot
        if self.preview.contact_name.contains("{{") {
            bail!(
                "Invalid preview.contact_name '{}': must not contain '{{{{'",
                self.preview.contact_name
            );
        }

        if self.preview.empty_text.trim().is_empty() {
            bail!("preview.empty_text cannot be empty");
        }

        if self.log.dir.as_os_str().is_empty() {
            bail!("log.dir cannot be empty");
        }

        Ok(())
    }
}
