//! PDF derived-representation provider.

use std::path::Path;

use crate::error::QuarryResult;
use crate::types::{HtmlContainer, SvgContainer};

/// Turns a PDF into searchable representations.
///
/// Both methods may return `Ok(None)` when the representation cannot be
/// produced; absence is not an error for the caller.
pub trait PdfConverter: Send + Sync {
    /// Derive an HTML representation.
    fn to_html(&self, source: Option<&Path>, pdf: &[u8]) -> QuarryResult<Option<HtmlContainer>>;

    /// Derive one SVG drawing per page.
    fn to_svg(&self, source: Option<&Path>, pdf: &[u8]) -> QuarryResult<Option<Vec<SvgContainer>>>;

    /// Human-readable name for this converter.
    fn name(&self) -> &str;
}
