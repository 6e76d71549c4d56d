//! quarry-extractors - Format loaders and input resolution for quarry.
//!
//! Loaders turn file bytes into the containers quarry-core searches, and
//! [`VisitableInput`] turns input paths into visitables.
//!
//! # Features
//!
//! - `pdf` (default) - PDF text extraction via pdf-extract
//! - `image` (default) - Image metadata via the image crate
//!
//! # Example
//!
//! ```ignore
//! use quarry_core::{OutputPlacer, PathQuery, ResultsFormat, Runner, XPathVisitor};
//! use quarry_extractors::VisitableInput;
//!
//! let visitables = VisitableInput::new(vec!["papers".into()])
//!     .with_extensions(["html", "pdf"])
//!     .recursive(true)
//!     .resolve()?;
//!
//! let runner = Runner::new(
//!     XPathVisitor::new(PathQuery::parse("//p")?),
//!     OutputPlacer::new("out", ResultsFormat::Xml),
//! );
//! runner.run(&visitables)?;
//! ```

mod error;
mod factory;
mod html;
mod input;
mod registry;
mod types;
mod xml;

#[cfg(feature = "image")]
pub mod image;

#[cfg(feature = "pdf")]
pub mod pdf;

pub use error::{ExtractError, ExtractResult};
pub use factory::LoaderFactory;
pub use html::HtmlLoader;
pub use input::VisitableInput;
pub use registry::LoaderRegistry;
pub use types::LoadedContainer;
pub use xml::{parse_xml, SvgLoader, XmlLoader};

#[cfg(feature = "image")]
pub use crate::image::ImageLoader;

#[cfg(feature = "pdf")]
pub use crate::pdf::{PdfLoader, TextPdfConverter};

use quarry_core::VisitableKind;
use std::path::Path;

/// Core Loader trait - every format loader implements this.
///
/// Same shape as quarry-core's collaborator traits: synchronous, shared
/// behind `Arc`.
pub trait Loader: Send + Sync {
    /// Format this loader builds.
    fn kind(&self) -> VisitableKind;

    /// File extensions this loader handles, lower-case without a dot.
    fn extensions(&self) -> &[&str];

    /// Check if this loader handles the given extension, ignoring case.
    fn supports(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        self.extensions()
            .iter()
            .any(|known| known.eq_ignore_ascii_case(extension))
    }

    /// Build a container from file content.
    fn load(&self, content: &[u8], source: &Path) -> ExtractResult<LoadedContainer>;

    /// Human-readable name for this loader.
    fn name(&self) -> &str;
}
