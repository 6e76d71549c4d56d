//! Command-line arguments and their merge into the run configuration.

use clap::Parser;
use std::path::PathBuf;

use quarry_core::{QuarryConfig, QuarryResult, ResultsFormat, VisitableKind};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Files or directories to search
    #[arg(short, long = "input", num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Directory receiving results artifacts
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Descend into subdirectories of directory inputs
    #[arg(short, long)]
    pub recursive: bool,

    /// Only accept these extensions from directories (e.g. html pdf)
    #[arg(short, long, num_args = 1..)]
    pub extensions: Vec<String>,

    /// Path query to run, e.g. "//p[@class='abstract']"
    #[arg(short = 'x', long = "xpath")]
    pub query: Option<String>,

    /// Regular expression to match; narrows --xpath results when both are given
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Load every input as this format (html, xml, svg, image, pdf)
    #[arg(short, long)]
    pub kind: Option<String>,

    /// Results format
    #[arg(long)]
    pub format: Option<ResultsFormat>,

    /// Configuration file (.toml, .json or .yaml); QUARRY_* variables are used otherwise
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Load the base configuration and apply command-line overrides.
    pub fn settings(&self) -> QuarryResult<QuarryConfig> {
        let mut config = match &self.config {
            Some(path) => QuarryConfig::from_file(path)?,
            None => QuarryConfig::from_env(),
        };

        if !self.inputs.is_empty() {
            config.inputs = self.inputs.clone();
        }
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if self.recursive {
            config.recursive = true;
        }
        if !self.extensions.is_empty() {
            config.extensions = self.extensions.clone();
        }
        if self.query.is_some() {
            config.query = self.query.clone();
        }
        if self.pattern.is_some() {
            config.pattern = self.pattern.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }

        config.validate()?;
        Ok(config)
    }

    /// Forced input format, if one was given.
    pub fn forced_kind(&self) -> QuarryResult<Option<VisitableKind>> {
        self.kind.as_deref().map(VisitableKind::parse_tag).transpose()
    }
}
