//! Configuration system for quarry.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{QuarryError, QuarryResult};
use crate::output::ResultsFormat;
use crate::query::PathQuery;

const ENV_PREFIX: &str = "QUARRY_";

/// Run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuarryConfig {
    /// Files or directories to search.
    pub inputs: Vec<PathBuf>,
    /// Root directory for results artifacts.
    pub output_dir: PathBuf,
    /// Descend into subdirectories of directory inputs.
    pub recursive: bool,
    /// Extensions to accept from directories. Empty accepts every known one.
    pub extensions: Vec<String>,
    /// Path query to run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Regular expression to match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Artifact format.
    pub format: ResultsFormat,
}

impl Default for QuarryConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_dir: PathBuf::from("quarry-output"),
            recursive: false,
            extensions: Vec::new(),
            query: None,
            pattern: None,
            format: ResultsFormat::Xml,
        }
    }
}

fn invalid(err: impl std::fmt::Display) -> QuarryError {
    QuarryError::Configuration(err.to_string())
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

impl QuarryConfig {
    /// Load configuration from a TOML, JSON or YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> QuarryResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => toml::from_str(&content).map_err(invalid),
            Some("json") => serde_json::from_str(&content).map_err(invalid),
            Some("yaml" | "yml") => serde_yaml::from_str(&content).map_err(invalid),
            _ => Err(QuarryError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from `QUARRY_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));
        let mut config = Self::default();

        if let Some(inputs) = var("INPUTS") {
            config.inputs = split_list(&inputs).map(PathBuf::from).collect();
        }
        if let Some(dir) = var("OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(recursive) = var("RECURSIVE") {
            config.recursive = matches!(recursive.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(extensions) = var("EXTENSIONS") {
            config.extensions = split_list(&extensions).map(str::to_string).collect();
        }
        config.query = var("XPATH").or(config.query);
        config.pattern = var("PATTERN").or(config.pattern);
        if let Some(format) = var("FORMAT") {
            match format.parse() {
                Ok(format) => config.format = format,
                Err(_) => tracing::warn!("Ignoring unknown {}FORMAT '{}'", ENV_PREFIX, format),
            }
        }

        config
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> QuarryConfigBuilder {
        QuarryConfigBuilder::default()
    }

    /// Check that the configuration describes a runnable search.
    pub fn validate(&self) -> QuarryResult<()> {
        if self.inputs.is_empty() {
            return Err(QuarryError::Configuration("no inputs given".to_string()));
        }
        if let Some(url) = self.inputs.iter().find(|p| p.to_string_lossy().contains("://")) {
            return Err(QuarryError::Configuration(format!(
                "URL inputs are not supported: {}",
                url.display()
            )));
        }
        if self.query.is_none() && self.pattern.is_none() {
            return Err(QuarryError::Configuration(
                "either a query or a pattern is required".to_string(),
            ));
        }
        if let Some(query) = &self.query {
            PathQuery::parse(query)?;
        }
        if let Some(pattern) = &self.pattern {
            Regex::new(pattern)?;
        }
        Ok(())
    }
}

/// Builder for QuarryConfig.
#[derive(Default)]
pub struct QuarryConfigBuilder {
    config: QuarryConfig,
}

impl QuarryConfigBuilder {
    /// Add an input file or directory.
    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.inputs.push(path.into());
        self
    }

    /// Set the output directory.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_dir = path.into();
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.config.recursive = recursive;
        self
    }

    /// Accept only these extensions from directories.
    pub fn extensions<S: Into<String>>(mut self, extensions: impl IntoIterator<Item = S>) -> Self {
        self.config.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.config.query = Some(query.into());
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.pattern = Some(pattern.into());
        self
    }

    pub fn format(mut self, format: ResultsFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> QuarryConfig {
        self.config
    }
}
