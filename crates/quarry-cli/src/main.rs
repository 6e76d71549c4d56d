//! quarry - search document corpora with path queries and patterns.
//!
//! # Usage
//!
//! ```text
//! quarry -i papers/ -r -e html pdf -x "//p[contains(., 'growth')]" -o out
//! quarry -i figure.svg -p "[A-Z]\. [a-z]+" --format json
//! ```
//!
//! Settings come from `--config` (or `QUARRY_*` environment variables when
//! no file is given); command-line flags override them.

use anyhow::Result;
use clap::Parser;
use regex::Regex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

use cli::Cli;
use quarry_core::{
    OutputPlacer, PathQuery, PatternVisitor, QuarryConfig, QuarryError, RunSummary, Runner,
    Visitable, Visitor, XPathVisitor,
};
use quarry_extractors::VisitableInput;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    let config = cli.settings().map_err(reported)?;
    let mut input = VisitableInput::from_config(&config);
    if let Some(kind) = cli.forced_kind().map_err(reported)? {
        input = input.with_kind(kind);
    }
    let visitables = input.resolve().map_err(reported)?;

    let summary = match (&config.query, &config.pattern) {
        (Some(query), pattern) => {
            let mut visitor = XPathVisitor::new(PathQuery::parse(query).map_err(reported)?);
            if let Some(pattern) = pattern {
                let pattern = Regex::new(pattern)
                    .map_err(QuarryError::from)
                    .map_err(reported)?;
                visitor = visitor.with_pattern(pattern);
            }
            execute(visitor, &config, &visitables)
        }
        (None, Some(pattern)) => {
            let visitor = PatternVisitor::from_pattern(pattern).map_err(reported)?;
            execute(visitor, &config, &visitables)
        }
        (None, None) => Err(QuarryError::Configuration(
            "either --xpath or --pattern is required".to_string(),
        )),
    }
    .map_err(reported)?;

    println!(
        "{} matches in {} visitable(s); {} artifact(s) written under {}",
        summary.match_count(),
        summary.visited,
        summary.written_count(),
        config.output_dir.display()
    );
    if summary.failure_count() > 0 {
        tracing::warn!("{} artifact(s) could not be written", summary.failure_count());
    }
    Ok(())
}

fn execute<V: Visitor>(
    visitor: V,
    config: &QuarryConfig,
    visitables: &[Visitable],
) -> quarry_core::QuarryResult<RunSummary> {
    let runner = Runner::new(visitor, OutputPlacer::new(&config.output_dir, config.format));
    tracing::info!("Running {}", runner.dispatcher().visitor().name());
    runner.run(visitables)
}

fn reported(err: QuarryError) -> QuarryError {
    if err.is_fatal() {
        tracing::error!("[{}] {}", err.code().as_str(), err);
    } else {
        tracing::warn!("[{}] {}", err.code().as_str(), err);
    }
    if let Some(suggestion) = err.suggestion() {
        tracing::info!("Hint: {}", suggestion);
    }
    err
}
