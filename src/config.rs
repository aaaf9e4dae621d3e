//! Configuration loading
//!
//! Settings come from a TOML file. Every section falls back to its defaults,
//! so a partial file (or none at all) is valid.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{HeadingStyles, LoadOptions};
use crate::extract::{DocumentParser, MarkerConfig};

const CONFIG_DIR_NAME: &str = "assessment-extractor";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub markers: MarkerConfig,
    pub headings: HeadingStyles,
    pub load: LoadOptions,
    pub export: ExportConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub include_style_columns: bool,
    pub clean: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            include_style_columns: false,
            clean: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Worker count; 0 uses the number of available CPUs
    pub workers: usize,
}

impl Config {
    /// Default config file location under the user's config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, or from the default location if it exists.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file just means built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(default_path) => Self::from_file(&default_path)?,
                None => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.markers.question.trim().is_empty() {
            bail!("markers.question must not be empty");
        }
        if self.markers.answer.trim().is_empty() {
            bail!("markers.answer must not be empty");
        }
        Ok(())
    }

    /// Worker count with 0 resolved to the available parallelism
    pub fn worker_count(&self) -> usize {
        match self.batch.workers {
            0 => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            n => n,
        }
    }

    pub fn parser(&self) -> DocumentParser {
        DocumentParser::new(self.headings.clone(), self.markers.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.markers.question, "ASK participants:");
        assert_eq!(config.markers.answer, "ANSWER:");
        assert_eq!(config.headings.chapter, vec!["Heading 1", "Header 2"]);
        assert_eq!(config.load.default_paragraph_style, "Normal");
        assert!(config.export.clean);
        assert!(!config.export.include_style_columns);
        assert!(config.worker_count() >= 1);
    }

    #[test]
    fn test_partial_sections_keep_remaining_defaults() {
        let config = Config::from_toml(
            r#"
            [markers]
            question = "ASK learners:"

            [headings]
            chapter = ["Module Title"]

            [batch]
            workers = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.markers.question, "ASK learners:");
        assert_eq!(config.markers.answer, "ANSWER:");
        assert_eq!(config.headings.chapter, vec!["Module Title"]);
        assert_eq!(config.headings.process, vec!["Heading 2", "Header 3"]);
        assert_eq!(config.worker_count(), 3);
    }

    #[test]
    fn test_empty_markers_are_rejected() {
        let config = Config::from_toml("[markers]\nanswer = \"  \"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        assert!(Config::load(Some(Path::new("/nonexistent/assessment.toml"))).is_err());
    }
}
