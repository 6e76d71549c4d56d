//! PDF loading and text-derived representations using pdf-extract.

use std::panic;
use std::path::Path;
use std::sync::Arc;

use quarry_core::types::{Element, HtmlContainer, PdfContainer, SvgContainer};
use quarry_core::{ErrorCode, PdfConverter, QuarryError, QuarryResult, VisitableKind};

use crate::error::{ExtractError, ExtractResult};
use crate::{LoadedContainer, Loader};

const PDF_MAGIC: &[u8] = b"%PDF";

/// Converter that derives an HTML page from a PDF's extracted text.
///
/// Pages are split on form feeds and paragraphs on blank lines. No SVG
/// representation is produced.
#[derive(Debug, Clone, Default)]
pub struct TextPdfConverter;

impl TextPdfConverter {
    pub fn new() -> Self {
        Self
    }

    fn extract_text(pdf: &[u8]) -> QuarryResult<String> {
        // pdf-extract panics on some malformed files.
        let extracted = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(pdf))
            .map_err(|_| QuarryError::parse("pdf-extract panicked", ErrorCode::ParsePdf))?;
        extracted.map_err(|e| QuarryError::parse(e.to_string(), ErrorCode::ParsePdf))
    }
}

/// Build `<html><body><div class="page" id="page-N"><p>..</p></div></body></html>`
/// from extracted text.
pub fn text_to_html(text: &str) -> Element {
    let mut body = Element::new("body");
    for (index, page) in text.split('\x0c').enumerate() {
        let mut div = Element::new("div")
            .with_attribute("class", "page")
            .with_attribute("id", format!("page-{}", index + 1));

        let mut paragraph: Vec<&str> = Vec::new();
        for line in page.lines().map(str::trim).chain(std::iter::once("")) {
            if line.is_empty() {
                if !paragraph.is_empty() {
                    div = div.with_child(Element::new("p").with_text(paragraph.join(" ")));
                    paragraph.clear();
                }
            } else {
                paragraph.push(line);
            }
        }

        if !div.children.is_empty() {
            body = body.with_child(div);
        }
    }
    Element::new("html").with_child(body)
}

impl PdfConverter for TextPdfConverter {
    fn to_html(&self, source: Option<&Path>, pdf: &[u8]) -> QuarryResult<Option<HtmlContainer>> {
        let text = Self::extract_text(pdf)?;
        if text.trim().is_empty() {
            tracing::debug!("{:?} has no extractable text", source);
            return Ok(None);
        }
        Ok(Some(HtmlContainer::new(
            source.map(Path::to_path_buf),
            text_to_html(&text),
        )))
    }

    fn to_svg(
        &self,
        _source: Option<&Path>,
        _pdf: &[u8],
    ) -> QuarryResult<Option<Vec<SvgContainer>>> {
        Ok(None)
    }

    fn name(&self) -> &str {
        "pdf-extract"
    }
}

/// PDF loader. Conversion is deferred until the container is searched.
#[derive(Clone)]
pub struct PdfLoader {
    converter: Arc<dyn PdfConverter>,
}

impl PdfLoader {
    /// Create a loader using [`TextPdfConverter`].
    pub fn new() -> Self {
        Self::with_converter(Arc::new(TextPdfConverter::new()))
    }

    /// Create a loader using a custom converter.
    pub fn with_converter(converter: Arc<dyn PdfConverter>) -> Self {
        Self { converter }
    }
}

impl std::fmt::Debug for PdfLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfLoader")
            .field("converter", &self.converter.name())
            .finish()
    }
}

impl Default for PdfLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader for PdfLoader {
    fn kind(&self) -> VisitableKind {
        VisitableKind::Pdf
    }

    fn extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn load(&self, content: &[u8], source: &Path) -> ExtractResult<LoadedContainer> {
        if !content.starts_with(PDF_MAGIC) {
            return Err(ExtractError::Pdf(format!("{} has no PDF header", source.display())));
        }
        Ok(LoadedContainer::Pdf(PdfContainer::new(
            Some(source.to_path_buf()),
            content.to_vec(),
            Arc::clone(&self.converter),
        )))
    }

    fn name(&self) -> &str {
        "pdf"
    }
}
