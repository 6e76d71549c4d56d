//! Registry routing files to loaders by extension.

use std::path::Path;
use std::sync::Arc;

use quarry_core::VisitableKind;

use crate::error::{ExtractError, ExtractResult};
use crate::types::LoadedContainer;
use crate::Loader;

/// Loaders available to input resolution.
///
/// The first registered loader that supports an extension wins.
#[derive(Clone)]
pub struct LoaderRegistry {
    loaders: Vec<Arc<dyn Loader>>,
}

impl LoaderRegistry {
    /// Create new empty registry.
    pub fn new() -> Self {
        Self {
            loaders: Vec::new(),
        }
    }

    /// Create registry with all available loaders.
    pub fn with_defaults() -> Self {
        Self {
            loaders: crate::LoaderFactory::all(),
        }
    }

    /// Add a loader to the registry.
    pub fn register(&mut self, loader: Arc<dyn Loader>) {
        self.loaders.push(loader);
    }

    /// Find the loader for an extension, ignoring case.
    pub fn for_extension(&self, extension: &str) -> Option<Arc<dyn Loader>> {
        self.loaders.iter().find(|l| l.supports(extension)).cloned()
    }

    /// Find the loader for a file by its extension.
    pub fn for_path(&self, path: &Path) -> Option<Arc<dyn Loader>> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| self.for_extension(e))
    }

    /// Find the loader that builds a format.
    pub fn for_kind(&self, kind: VisitableKind) -> ExtractResult<Arc<dyn Loader>> {
        self.loaders
            .iter()
            .find(|l| l.kind() == kind)
            .cloned()
            .ok_or(ExtractError::NoLoader(kind))
    }

    /// Every extension some loader handles.
    pub fn extensions(&self) -> Vec<&str> {
        self.loaders
            .iter()
            .flat_map(|l| l.extensions().iter().copied())
            .collect()
    }

    /// Load bytes using the loader for `source`'s extension.
    pub fn load(&self, content: &[u8], source: &Path) -> ExtractResult<LoadedContainer> {
        let loader = self.for_path(source).ok_or_else(|| {
            ExtractError::UnsupportedExtension(
                source
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            )
        })?;
        loader.load(content, source)
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
