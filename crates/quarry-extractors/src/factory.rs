//! Factory for creating loaders.

use std::sync::Arc;

use quarry_core::VisitableKind;

use crate::error::{ExtractError, ExtractResult};
use crate::html::HtmlLoader;
use crate::xml::{SvgLoader, XmlLoader};
use crate::Loader;

#[cfg(feature = "image")]
use crate::image::ImageLoader;

#[cfg(feature = "pdf")]
use crate::pdf::PdfLoader;

/// Factory for creating format loaders.
pub struct LoaderFactory;

impl LoaderFactory {
    /// Create an HTML loader.
    pub fn html() -> Arc<dyn Loader> {
        Arc::new(HtmlLoader::new())
    }

    /// Create an XML loader.
    pub fn xml() -> Arc<dyn Loader> {
        Arc::new(XmlLoader)
    }

    /// Create an SVG loader.
    pub fn svg() -> Arc<dyn Loader> {
        Arc::new(SvgLoader)
    }

    /// Create an image metadata loader.
    #[cfg(feature = "image")]
    pub fn image() -> Arc<dyn Loader> {
        Arc::new(ImageLoader::new())
    }

    /// Create a PDF loader backed by the text converter.
    #[cfg(feature = "pdf")]
    pub fn pdf() -> Arc<dyn Loader> {
        Arc::new(PdfLoader::new())
    }

    /// Create the loader for a format.
    pub fn for_kind(kind: VisitableKind) -> ExtractResult<Arc<dyn Loader>> {
        match kind {
            VisitableKind::Html => Ok(Self::html()),
            VisitableKind::Xml => Ok(Self::xml()),
            VisitableKind::Svg => Ok(Self::svg()),

            #[cfg(feature = "image")]
            VisitableKind::Image => Ok(Self::image()),

            #[cfg(feature = "pdf")]
            VisitableKind::Pdf => Ok(Self::pdf()),

            other => Err(ExtractError::NoLoader(other)),
        }
    }

    /// Get all available loaders.
    #[allow(clippy::vec_init_then_push)]
    pub fn all() -> Vec<Arc<dyn Loader>> {
        let mut loaders: Vec<Arc<dyn Loader>> = Vec::new();

        loaders.push(Self::html());
        loaders.push(Self::xml());
        loaders.push(Self::svg());

        #[cfg(feature = "image")]
        loaders.push(Self::image());

        #[cfg(feature = "pdf")]
        loaders.push(Self::pdf());

        loaders
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_all_loaders() {
        let loaders = LoaderFactory::all();

        #[cfg(all(feature = "pdf", feature = "image"))]
        assert_eq!(loaders.len(), 5);

        #[cfg(not(any(feature = "pdf", feature = "image")))]
        assert_eq!(loaders.len(), 3);
    }

    #[test]
    fn test_factory_for_kind() {
        assert_eq!(LoaderFactory::for_kind(VisitableKind::Svg).unwrap().kind(), VisitableKind::Svg);
        assert!(matches!(
            LoaderFactory::for_kind(VisitableKind::Table),
            Err(ExtractError::NoLoader(VisitableKind::Table))
        ));
    }

    #[cfg(feature = "image")]
    #[test]
    fn test_factory_image() {
        let loader = LoaderFactory::image();
        assert!(loader.supports("png"));
        assert!(loader.supports("JPG"));
    }
}
