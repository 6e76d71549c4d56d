//! Visitors and the dispatcher that routes visitables to them.
//!
//! A visitor declares which formats it handles in a [`HandlerTable`]. The
//! [`Dispatcher`] looks the visitable's kind up in that table: a missing
//! entry is [`QuarryError::UnsupportedVariant`] (a gap to fill), an explicit
//! [`Handling::Refuse`] is [`QuarryError::NotApplicable`] (an intentional
//! restriction).
//!
//! # Example
//!
//! ```
//! use quarry_core::query::PathQuery;
//! use quarry_core::types::{Element, HtmlContainer, Visitable};
//! use quarry_core::visitor::{Dispatcher, XPathVisitor};
//!
//! let page = HtmlContainer::new(
//!     Some("a.html".into()),
//!     Element::new("html").with_child(Element::new("p").with_text("hi")),
//! );
//! let dispatcher = Dispatcher::new(XPathVisitor::new(PathQuery::parse("//p").unwrap()));
//! let tree = dispatcher.visit(&Visitable::html(vec![page])).unwrap();
//! assert_eq!(tree.match_count(), 1);
//! ```

mod pattern;
mod xpath;

pub use pattern::PatternVisitor;
pub use xpath::XPathVisitor;

use std::collections::HashMap;

use crate::error::{QuarryError, QuarryResult};
use crate::query::PathQuery;
use crate::search::PathSearcher;
use crate::traits::Searcher;
use crate::types::{Container, PdfContainer, ResultsTree, Visitable, VisitableKind};

/// How a visitor treats a format it lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handling {
    /// Search the visitable's containers.
    Search,
    /// Recognize the format but refuse it.
    Refuse,
}

/// The set of formats a visitor handles.
#[derive(Debug, Clone, Default)]
pub struct HandlerTable {
    entries: HashMap<VisitableKind, Handling>,
}

impl HandlerTable {
    /// Create an empty table: every format is unsupported.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle these formats by searching.
    pub fn search(mut self, kinds: &[VisitableKind]) -> Self {
        for kind in kinds {
            self.entries.insert(*kind, Handling::Search);
        }
        self
    }

    /// Refuse these formats.
    pub fn refuse(mut self, kinds: &[VisitableKind]) -> Self {
        for kind in kinds {
            self.entries.insert(*kind, Handling::Refuse);
        }
        self
    }

    /// Look up a format.
    pub fn lookup(&self, kind: VisitableKind) -> Option<Handling> {
        self.entries.get(&kind).copied()
    }
}

/// Core Visitor trait - every concrete visitor implements this.
pub trait Visitor {
    /// Visitor type name used in diagnostics.
    fn name(&self) -> &str;

    /// Formats this visitor handles.
    fn handlers(&self) -> &HandlerTable;

    /// Query bound into default searchers.
    fn query(&self) -> &PathQuery;

    /// Create the visitor's configured searcher.
    fn create_searcher(&self) -> Box<dyn Searcher>;

    /// Create a fresh searcher for containers searched outside the normal
    /// per-visitable loop, such as PDF-derived pages.
    fn create_default_searcher(&self) -> Box<dyn Searcher> {
        Box::new(PathSearcher::new(self.query().clone()))
    }
}

/// Routes visitables to a visitor and aggregates their results.
pub struct Dispatcher<V: Visitor> {
    visitor: V,
}

impl<V: Visitor> Dispatcher<V> {
    /// Create a dispatcher for a visitor.
    pub fn new(visitor: V) -> Self {
        Self { visitor }
    }

    /// The wrapped visitor.
    pub fn visitor(&self) -> &V {
        &self.visitor
    }

    /// Visit one visitable and return its results tree.
    ///
    /// The tree's root is created on the first append, so a visitable with
    /// no containers yields an empty tree.
    pub fn visit(&self, visitable: &Visitable) -> QuarryResult<ResultsTree> {
        let kind = visitable.kind();
        match self.visitor.handlers().lookup(kind) {
            None => return Err(self.not_yet_implemented(kind)),
            Some(Handling::Refuse) => {
                return Err(QuarryError::not_applicable(
                    self.visitor.name(),
                    kind.type_name(),
                ))
            }
            Some(Handling::Search) => {}
        }

        tracing::debug!("{} visiting {}", self.visitor.name(), visitable);
        let mut tree = ResultsTree::new();
        match visitable {
            Visitable::Html(docs) => self.search_each(docs.containers(), &mut tree)?,
            Visitable::Xml(docs) => self.search_each(docs.containers(), &mut tree)?,
            Visitable::Svg(docs) => self.search_each(docs.containers(), &mut tree)?,
            Visitable::Image(docs) => self.search_each(docs.containers(), &mut tree)?,
            Visitable::Pdf(docs) => self.search_derived(docs.containers(), &mut tree)?,
            // Reserved: no table search exists yet.
            Visitable::Table(_) => return Err(self.not_yet_implemented(kind)),
        }
        Ok(tree)
    }

    /// Search an arbitrary container with a fresh default searcher and append
    /// its results to `tree`.
    pub fn search_container(
        &self,
        container: &dyn Container,
        tree: &mut ResultsTree,
    ) -> QuarryResult<()> {
        let searcher = self.visitor.create_default_searcher();
        tree.append(searcher.search(container)?);
        Ok(())
    }

    fn search_each<C: Container>(
        &self,
        containers: &[C],
        tree: &mut ResultsTree,
    ) -> QuarryResult<()> {
        for container in containers {
            let searcher = self.visitor.create_searcher();
            tree.append(searcher.search(container)?);
        }
        Ok(())
    }

    fn search_derived(&self, pdfs: &[PdfContainer], tree: &mut ResultsTree) -> QuarryResult<()> {
        for pdf in pdfs {
            match pdf.html_container() {
                Some(html) => self.search_container(html, tree)?,
                None => tracing::debug!("No derived HTML for {:?}", pdf.source()),
            }
            match pdf.svg_containers() {
                Some(pages) => {
                    for svg in pages {
                        self.search_container(svg, tree)?;
                    }
                }
                None => tracing::debug!("No derived SVG for {:?}", pdf.source()),
            }
        }
        Ok(())
    }

    fn not_yet_implemented(&self, kind: VisitableKind) -> QuarryError {
        QuarryError::unsupported(self.visitor.name(), kind.type_name())
    }
}
