//! Containers: the searchable sub-units of a visitable.

use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::content::Element;
use super::visitable::VisitableKind;
use crate::traits::PdfConverter;

/// A unit of searchable content.
pub trait Container: std::fmt::Debug {
    /// Format of this container.
    fn kind(&self) -> VisitableKind;

    /// File the container was loaded from, if any.
    fn source(&self) -> Option<&Path>;

    /// Root of the content model. `None` when the container has no
    /// searchable content of its own.
    fn content(&self) -> Option<&Element>;
}

macro_rules! document_container {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            source: Option<PathBuf>,
            root: Element,
        }

        impl $name {
            /// Create a container from its content model root.
            pub fn new(source: Option<PathBuf>, root: Element) -> Self {
                Self { source, root }
            }

            /// Root element of the content model.
            pub fn root(&self) -> &Element {
                &self.root
            }
        }

        impl Container for $name {
            fn kind(&self) -> VisitableKind {
                $kind
            }

            fn source(&self) -> Option<&Path> {
                self.source.as_deref()
            }

            fn content(&self) -> Option<&Element> {
                Some(&self.root)
            }
        }
    };
}

document_container!(
    /// One HTML page.
    HtmlContainer,
    VisitableKind::Html
);
document_container!(
    /// One XML document.
    XmlContainer,
    VisitableKind::Xml
);
document_container!(
    /// One SVG drawing.
    SvgContainer,
    VisitableKind::Svg
);
document_container!(
    /// One raster image, modelled as its metadata element.
    ImageContainer,
    VisitableKind::Image
);
document_container!(
    /// One table. No visitor handles tables yet.
    TableContainer,
    VisitableKind::Table
);

/// One PDF document.
///
/// A PDF is never searched directly. Its derived HTML and SVG representations
/// are produced by a [`PdfConverter`] on first access and cached; either may
/// be absent.
pub struct PdfContainer {
    source: Option<PathBuf>,
    bytes: Vec<u8>,
    converter: Option<Arc<dyn PdfConverter>>,
    html: OnceCell<Option<HtmlContainer>>,
    svg: OnceCell<Option<Vec<SvgContainer>>>,
}

impl PdfContainer {
    /// Create a container that converts lazily.
    pub fn new(
        source: Option<PathBuf>,
        bytes: Vec<u8>,
        converter: Arc<dyn PdfConverter>,
    ) -> Self {
        Self {
            source,
            bytes,
            converter: Some(converter),
            html: OnceCell::new(),
            svg: OnceCell::new(),
        }
    }

    /// Create a container with already-derived representations.
    pub fn with_derived(
        source: Option<PathBuf>,
        html: Option<HtmlContainer>,
        svg: Option<Vec<SvgContainer>>,
    ) -> Self {
        Self {
            source,
            bytes: Vec::new(),
            converter: None,
            html: OnceCell::with_value(html),
            svg: OnceCell::with_value(svg),
        }
    }

    /// Derived HTML representation, converting on first call.
    pub fn html_container(&self) -> Option<&HtmlContainer> {
        self.html
            .get_or_init(|| {
                let converter = self.converter.as_ref()?;
                match converter.to_html(self.source.as_deref(), &self.bytes) {
                    Ok(html) => html,
                    Err(e) => {
                        tracing::warn!(
                            "PDF to HTML conversion failed for {:?}: {}",
                            self.source,
                            e
                        );
                        None
                    }
                }
            })
            .as_ref()
    }

    /// Derived SVG pages, converting on first call.
    pub fn svg_containers(&self) -> Option<&[SvgContainer]> {
        self.svg
            .get_or_init(|| {
                let converter = self.converter.as_ref()?;
                match converter.to_svg(self.source.as_deref(), &self.bytes) {
                    Ok(svg) => svg,
                    Err(e) => {
                        tracing::warn!("PDF to SVG conversion failed for {:?}: {}", self.source, e);
                        None
                    }
                }
            })
            .as_deref()
    }
}

impl std::fmt::Debug for PdfContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfContainer")
            .field("source", &self.source)
            .field("bytes", &self.bytes.len())
            .field("converter", &self.converter.as_ref().map(|c| c.name()))
            .finish()
    }
}

impl Container for PdfContainer {
    fn kind(&self) -> VisitableKind {
        VisitableKind::Pdf
    }

    fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn content(&self) -> Option<&Element> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{QuarryError, QuarryResult};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingConverter {
        calls: AtomicUsize,
    }

    impl PdfConverter for CountingConverter {
        fn to_html(
            &self,
            source: Option<&Path>,
            _pdf: &[u8],
        ) -> QuarryResult<Option<HtmlContainer>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(HtmlContainer::new(
                source.map(Path::to_path_buf),
                Element::new("html"),
            )))
        }

        fn to_svg(
            &self,
            _source: Option<&Path>,
            _pdf: &[u8],
        ) -> QuarryResult<Option<Vec<SvgContainer>>> {
            Err(QuarryError::Configuration("no svg backend".to_string()))
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn test_conversion_runs_once() {
        let converter = Arc::new(CountingConverter::default());
        let pdf = PdfContainer::new(Some("a.pdf".into()), b"%PDF".to_vec(), converter.clone());

        assert!(pdf.html_container().is_some());
        assert!(pdf.html_container().is_some());
        assert_eq!(converter.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_conversion_is_absent() {
        let pdf = PdfContainer::new(None, Vec::new(), Arc::new(CountingConverter::default()));
        assert!(pdf.svg_containers().is_none());
    }

    #[test]
    fn test_pdf_has_no_content_of_its_own() {
        let pdf = PdfContainer::with_derived(None, None, None);
        assert!(pdf.content().is_none());
        assert_eq!(pdf.kind(), VisitableKind::Pdf);
    }
}
