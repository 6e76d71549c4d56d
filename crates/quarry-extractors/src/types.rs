//! Loaded containers and their grouping into visitables.

use quarry_core::types::{
    HtmlContainer, ImageContainer, PdfContainer, SvgContainer, Visitable, XmlContainer,
};
use quarry_core::VisitableKind;

/// A container produced by a loader, tagged by format.
#[derive(Debug)]
pub enum LoadedContainer {
    Html(HtmlContainer),
    Xml(XmlContainer),
    Svg(SvgContainer),
    Image(ImageContainer),
    Pdf(PdfContainer),
}

impl LoadedContainer {
    pub fn kind(&self) -> VisitableKind {
        match self {
            LoadedContainer::Html(_) => VisitableKind::Html,
            LoadedContainer::Xml(_) => VisitableKind::Xml,
            LoadedContainer::Svg(_) => VisitableKind::Svg,
            LoadedContainer::Image(_) => VisitableKind::Image,
            LoadedContainer::Pdf(_) => VisitableKind::Pdf,
        }
    }

    /// Wrap as a single-container visitable.
    pub fn into_visitable(self) -> Visitable {
        match self {
            LoadedContainer::Html(c) => Visitable::html(vec![c]),
            LoadedContainer::Xml(c) => Visitable::xml(vec![c]),
            LoadedContainer::Svg(c) => Visitable::svg(vec![c]),
            LoadedContainer::Image(c) => Visitable::image(vec![c]),
            LoadedContainer::Pdf(c) => Visitable::pdf(vec![c]),
        }
    }
}

/// Containers collected from one directory, bucketed by format.
#[derive(Debug, Default)]
pub(crate) struct Grouped {
    html: Vec<HtmlContainer>,
    xml: Vec<XmlContainer>,
    svg: Vec<SvgContainer>,
    image: Vec<ImageContainer>,
    pdf: Vec<PdfContainer>,
}

impl Grouped {
    pub(crate) fn push(&mut self, container: LoadedContainer) {
        match container {
            LoadedContainer::Html(c) => self.html.push(c),
            LoadedContainer::Xml(c) => self.xml.push(c),
            LoadedContainer::Svg(c) => self.svg.push(c),
            LoadedContainer::Image(c) => self.image.push(c),
            LoadedContainer::Pdf(c) => self.pdf.push(c),
        }
    }

    /// One visitable per non-empty bucket, in format order.
    pub(crate) fn into_visitables(self) -> Vec<Visitable> {
        let mut visitables = Vec::new();
        if !self.html.is_empty() {
            visitables.push(Visitable::html(self.html));
        }
        if !self.xml.is_empty() {
            visitables.push(Visitable::xml(self.xml));
        }
        if !self.svg.is_empty() {
            visitables.push(Visitable::svg(self.svg));
        }
        if !self.image.is_empty() {
            visitables.push(Visitable::image(self.image));
        }
        if !self.pdf.is_empty() {
            visitables.push(Visitable::pdf(self.pdf));
        }
        visitables
    }
}
