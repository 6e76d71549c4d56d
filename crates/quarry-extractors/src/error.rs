//! Loading error types.

use quarry_core::{ErrorCode, QuarryError, VisitableKind};
use thiserror::Error;

/// Errors that can occur while loading documents.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// No loader handles the file extension.
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),

    /// No loader is registered for the format.
    #[error("No loader for {0} documents")]
    NoLoader(VisitableKind),

    /// HTML could not be loaded.
    #[error("HTML loading error: {0}")]
    Html(String),

    /// XML or SVG could not be parsed.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// Image could not be decoded.
    #[cfg(feature = "image")]
    #[error("Image decoding error: {0}")]
    Image(String),

    /// PDF-specific loading error.
    #[cfg(feature = "pdf")]
    #[error("PDF loading error: {0}")]
    Pdf(String),
}

/// Result type for loading operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

impl From<ExtractError> for QuarryError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedExtension(ext) => {
                QuarryError::Configuration(format!("unsupported file extension '{}'", ext))
            }
            ExtractError::NoLoader(kind) => {
                QuarryError::MalformedVisitable(format!("no loader builds {}", kind.type_name()))
            }
            ExtractError::Html(message) => QuarryError::parse(message, ErrorCode::ParseHtml),
            ExtractError::Xml(message) => QuarryError::parse(message, ErrorCode::ParseXml),
            #[cfg(feature = "image")]
            ExtractError::Image(message) => QuarryError::parse(message, ErrorCode::ParseImage),
            #[cfg(feature = "pdf")]
            ExtractError::Pdf(message) => QuarryError::parse(message, ErrorCode::ParsePdf),
        }
    }
}
