//! Visitables: one logical input document, tagged by format.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::container::{
    Container, HtmlContainer, ImageContainer, PdfContainer, SvgContainer, TableContainer,
    XmlContainer,
};
use crate::error::{QuarryError, QuarryResult};

/// The closed set of document formats.
///
/// Variant order is the order in which input resolution emits grouped
/// visitables.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum VisitableKind {
    Html,
    Xml,
    Svg,
    Image,
    Pdf,
    Table,
}

impl VisitableKind {
    /// Type name used in dispatch diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            VisitableKind::Html => "HtmlVisitable",
            VisitableKind::Xml => "XmlVisitable",
            VisitableKind::Svg => "SvgVisitable",
            VisitableKind::Image => "ImageVisitable",
            VisitableKind::Pdf => "PdfVisitable",
            VisitableKind::Table => "TableVisitable",
        }
    }

    /// Parse a tag, mapping anything outside the closed set to
    /// [`QuarryError::MalformedVisitable`].
    pub fn parse_tag(tag: &str) -> QuarryResult<Self> {
        Self::from_str(tag).map_err(|_| {
            QuarryError::MalformedVisitable(format!("unknown visitable tag '{}'", tag))
        })
    }
}

/// Containers of one format plus the files that back them.
#[derive(Debug)]
pub struct Documents<C> {
    containers: Vec<C>,
    files: Vec<PathBuf>,
}

impl<C> Documents<C> {
    /// Containers in the order they will be visited.
    pub fn containers(&self) -> &[C] {
        &self.containers
    }

    /// Backing source files.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl<C: Container> Documents<C> {
    /// Build a document set whose backing files are the containers' sources.
    pub fn from_containers(containers: Vec<C>) -> Self {
        let files = containers
            .iter()
            .filter_map(|c| c.source().map(Path::to_path_buf))
            .collect();
        Self { containers, files }
    }
}

/// One logical input document.
///
/// The container type is fixed by the variant, so a dispatcher can never see
/// SVG containers on the HTML path.
#[derive(Debug)]
pub enum Visitable {
    Html(Documents<HtmlContainer>),
    Xml(Documents<XmlContainer>),
    Svg(Documents<SvgContainer>),
    Image(Documents<ImageContainer>),
    Pdf(Documents<PdfContainer>),
    Table(Documents<TableContainer>),
}

impl Visitable {
    /// The format tag.
    pub fn kind(&self) -> VisitableKind {
        match self {
            Visitable::Html(_) => VisitableKind::Html,
            Visitable::Xml(_) => VisitableKind::Xml,
            Visitable::Svg(_) => VisitableKind::Svg,
            Visitable::Image(_) => VisitableKind::Image,
            Visitable::Pdf(_) => VisitableKind::Pdf,
            Visitable::Table(_) => VisitableKind::Table,
        }
    }

    /// Backing source files.
    pub fn files(&self) -> &[PathBuf] {
        match self {
            Visitable::Html(docs) => docs.files(),
            Visitable::Xml(docs) => docs.files(),
            Visitable::Svg(docs) => docs.files(),
            Visitable::Image(docs) => docs.files(),
            Visitable::Pdf(docs) => docs.files(),
            Visitable::Table(docs) => docs.files(),
        }
    }

    /// Number of containers.
    pub fn container_count(&self) -> usize {
        match self {
            Visitable::Html(docs) => docs.containers().len(),
            Visitable::Xml(docs) => docs.containers().len(),
            Visitable::Svg(docs) => docs.containers().len(),
            Visitable::Image(docs) => docs.containers().len(),
            Visitable::Pdf(docs) => docs.containers().len(),
            Visitable::Table(docs) => docs.containers().len(),
        }
    }

    /// HTML visitable backed by the containers' sources.
    pub fn html(containers: Vec<HtmlContainer>) -> Self {
        Visitable::Html(Documents::from_containers(containers))
    }

    /// XML visitable backed by the containers' sources.
    pub fn xml(containers: Vec<XmlContainer>) -> Self {
        Visitable::Xml(Documents::from_containers(containers))
    }

    /// SVG visitable backed by the containers' sources.
    pub fn svg(containers: Vec<SvgContainer>) -> Self {
        Visitable::Svg(Documents::from_containers(containers))
    }

    /// Image visitable backed by the containers' sources.
    pub fn image(containers: Vec<ImageContainer>) -> Self {
        Visitable::Image(Documents::from_containers(containers))
    }

    /// PDF visitable backed by the containers' sources.
    pub fn pdf(containers: Vec<PdfContainer>) -> Self {
        Visitable::Pdf(Documents::from_containers(containers))
    }

    /// Table visitable backed by the containers' sources.
    pub fn table(containers: Vec<TableContainer>) -> Self {
        Visitable::Table(Documents::from_containers(containers))
    }
}

impl std::fmt::Display for Visitable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} containers, {} files)",
            self.kind().type_name(),
            self.container_count(),
            self.files().len()
        )
    }
}
