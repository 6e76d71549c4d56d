//! Decides where a visitable's results go and writes them.

use std::fs;
use std::path::{Component, Path, PathBuf};

use super::ResultsFormat;
use crate::error::{QuarryError, QuarryResult};
use crate::types::ResultsTree;

/// Marker written next to each mirrored results file.
pub const ABOUT_FILE: &str = "about.txt";
const ABOUT_TEXT: &str = "created";

/// One mirrored output location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorEntry {
    /// Source file the directory mirrors.
    pub source: PathBuf,
    /// Directory receiving the marker and results.
    pub dir: PathBuf,
}

/// Where results for one visitable are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// One aggregated artifact.
    Single(PathBuf),
    /// One directory per backing file.
    Mirrored(Vec<MirrorEntry>),
}

impl OutputTarget {
    /// Compute the target for a set of backing files.
    ///
    /// Zero or one file yields a single artifact; two or more are mirrored.
    pub fn for_files(output_dir: &Path, files: &[PathBuf], format: ResultsFormat) -> Self {
        if files.len() <= 1 {
            return OutputTarget::Single(output_dir.join(format.file_name()));
        }
        OutputTarget::Mirrored(
            files
                .iter()
                .map(|source| MirrorEntry {
                    source: source.clone(),
                    dir: output_dir.join(relative_to_output(source)),
                })
                .collect(),
        )
    }
}

/// Strip root, prefix and parent components so the path stays under the
/// output directory.
fn relative_to_output(source: &Path) -> PathBuf {
    source
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            Component::Prefix(_)
            | Component::RootDir
            | Component::CurDir
            | Component::ParentDir => None,
        })
        .collect()
}

/// What a placement pass wrote.
#[derive(Debug, Default)]
pub struct PlacementReport {
    /// Artifacts written, in write order.
    pub written: Vec<PathBuf>,
    /// Writes that failed; the pass continued past each one.
    pub failures: Vec<QuarryError>,
    /// The tree had no root, so nothing was written.
    pub missing_results: bool,
}

impl PlacementReport {
    fn record(&mut self, path: PathBuf, text: &str) {
        match write_artifact(&path, text) {
            Ok(()) => {
                tracing::debug!("Wrote {}", path.display());
                self.written.push(path);
            }
            Err(e) => {
                tracing::error!("{}", e);
                self.failures.push(e);
            }
        }
    }

    /// Whether every attempted write succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

fn write_artifact(path: &Path, text: &str) -> QuarryResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| QuarryError::artifact_write(path, e))?;
    }
    fs::write(path, text).map_err(|e| QuarryError::artifact_write(path, e))
}

/// Writes results trees under an output directory.
#[derive(Debug, Clone)]
pub struct OutputPlacer {
    output_dir: PathBuf,
    format: ResultsFormat,
}

impl OutputPlacer {
    pub fn new(output_dir: impl Into<PathBuf>, format: ResultsFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn format(&self) -> ResultsFormat {
        self.format
    }

    /// Write `tree` for a visitable backed by `files`.
    ///
    /// Individual write failures are logged and recorded in the report; only
    /// a serialization failure is returned as an error.
    pub fn place(&self, tree: &ResultsTree, files: &[PathBuf]) -> QuarryResult<PlacementReport> {
        let mut report = PlacementReport::default();
        if tree.is_empty() {
            tracing::warn!("{}", QuarryError::MissingResults);
            report.missing_results = true;
            return Ok(report);
        }

        let text = self.format.serialize(tree)?;
        match OutputTarget::for_files(&self.output_dir, files, self.format) {
            OutputTarget::Single(path) => {
                tracing::info!("{} backing file(s); writing single artifact", files.len());
                report.record(path, &text);
            }
            OutputTarget::Mirrored(entries) => {
                tracing::info!("{} backing files; mirroring output", entries.len());
                for entry in entries {
                    tracing::debug!("Mirroring {}", entry.source.display());
                    report.record(entry.dir.join(ABOUT_FILE), ABOUT_TEXT);
                    report.record(entry.dir.join(self.format.file_name()), &text);
                }
            }
        }
        Ok(report)
    }
}
