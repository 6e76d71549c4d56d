//! Input resolution: files and directories to visitables.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use quarry_core::types::Visitable;
use quarry_core::{QuarryConfig, QuarryError, QuarryResult, VisitableKind};

use crate::registry::LoaderRegistry;
use crate::types::{Grouped, LoadedContainer};

fn is_url(input: &Path) -> bool {
    input.to_string_lossy().contains("://")
}

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_lowercase()
}

/// Resolves input paths into the visitables to search.
///
/// A file becomes a visitable of its own. A directory's files are grouped
/// into one visitable per format, emitted in [`VisitableKind`] order.
#[derive(Clone)]
pub struct VisitableInput {
    inputs: Vec<PathBuf>,
    extensions: Vec<String>,
    recursive: bool,
    kind: Option<VisitableKind>,
    registry: LoaderRegistry,
}

impl VisitableInput {
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            extensions: Vec::new(),
            recursive: false,
            kind: None,
            registry: LoaderRegistry::with_defaults(),
        }
    }

    /// Build from the input settings of a run configuration.
    pub fn from_config(config: &QuarryConfig) -> Self {
        Self::new(config.inputs.clone())
            .with_extensions(config.extensions.iter().map(String::as_str))
            .recursive(config.recursive)
    }

    /// Accept only these extensions from directories.
    pub fn with_extensions<'a>(mut self, extensions: impl IntoIterator<Item = &'a str>) -> Self {
        self.extensions = extensions.into_iter().map(normalize_extension).collect();
        self
    }

    /// Descend into subdirectories.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Load every file as `kind`, ignoring extensions.
    pub fn with_kind(mut self, kind: VisitableKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Resolve every input in order.
    ///
    /// A URL or missing input is a configuration error, and forcing a format
    /// no loader builds is a malformed visitable. A file that cannot be read
    /// or parsed is logged and skipped.
    pub fn resolve(&self) -> QuarryResult<Vec<Visitable>> {
        let mut visitables = Vec::new();
        for input in &self.inputs {
            if is_url(input) {
                return Err(QuarryError::Configuration(format!(
                    "URL inputs are not supported: {}",
                    input.display()
                )));
            }

            if input.is_file() {
                if let Some(container) = self.load_file(input)? {
                    visitables.push(container.into_visitable());
                }
            } else if input.is_dir() {
                let mut grouped = Grouped::default();
                for path in self.list_dir(input) {
                    if let Some(container) = self.load_file(&path)? {
                        grouped.push(container);
                    }
                }
                visitables.extend(grouped.into_visitables());
            } else {
                return Err(QuarryError::Configuration(format!(
                    "input does not exist: {}",
                    input.display()
                )));
            }
        }

        tracing::info!(
            "Resolved {} visitable(s) from {} input(s)",
            visitables.len(),
            self.inputs.len()
        );
        Ok(visitables)
    }

    fn accepts(&self, path: &Path) -> bool {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(normalize_extension);
        match (&extension, self.kind) {
            (Some(ext), _) if !self.extensions.is_empty() => self.extensions.contains(ext),
            (_, Some(_)) => true,
            (Some(ext), None) => self.registry.for_extension(ext).is_some(),
            (None, None) => false,
        }
    }

    fn list_dir(&self, dir: &Path) -> Vec<PathBuf> {
        let depth = if self.recursive { usize::MAX } else { 1 };
        WalkDir::new(dir)
            .follow_links(false)
            .max_depth(depth)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| self.accepts(path))
            .collect()
    }

    fn load_file(&self, path: &Path) -> QuarryResult<Option<LoadedContainer>> {
        let loader = match self.kind {
            Some(kind) => self.registry.for_kind(kind)?,
            None => match self.registry.for_path(path) {
                Some(loader) => loader,
                None => {
                    tracing::warn!("No loader for {}; skipping", path.display());
                    return Ok(None);
                }
            },
        };

        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Cannot read {}: {}", path.display(), e);
                return Ok(None);
            }
        };

        match loader.load(&content, path) {
            Ok(container) => {
                tracing::debug!("Loaded {} with {} loader", path.display(), loader.name());
                Ok(Some(container))
            }
            Err(e) => {
                let e = QuarryError::from(e);
                tracing::warn!("Skipping {} [{}]: {}", path.display(), e.code().as_str(), e);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_is_rejected() {
        let input = VisitableInput::new(vec![PathBuf::from("https://example.org/a.html")]);
        assert!(matches!(input.resolve(), Err(QuarryError::Configuration(_))));
    }

    #[test]
    fn test_missing_path_is_rejected() {
        let input = VisitableInput::new(vec![PathBuf::from("/definitely/not/here.html")]);
        assert!(matches!(input.resolve(), Err(QuarryError::Configuration(_))));
    }

    #[test]
    fn test_extension_filter_normalizes() {
        let input = VisitableInput::new(Vec::new()).with_extensions([".HTML", "svg"]);
        assert!(input.accepts(Path::new("a.html")));
        assert!(input.accepts(Path::new("b.SVG")));
        assert!(!input.accepts(Path::new("c.xml")));
        assert!(!input.accepts(Path::new("README")));
    }

    #[test]
    fn test_default_filter_is_known_extensions() {
        let input = VisitableInput::new(Vec::new());
        assert!(input.accepts(Path::new("a.xml")));
        assert!(!input.accepts(Path::new("notes.txt")));
    }
}
