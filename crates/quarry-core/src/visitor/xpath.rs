//! Visitor that searches with a user-supplied path query.

use regex::Regex;

use super::{HandlerTable, Visitor};
use crate::query::PathQuery;
use crate::search::PathSearcher;
use crate::traits::Searcher;
use crate::types::VisitableKind;

/// Runs one path query over HTML, XML, SVG, image and PDF content.
///
/// Tables are not listed, so visiting one reports an unsupported variant.
#[derive(Debug, Clone)]
pub struct XPathVisitor {
    query: PathQuery,
    pattern: Option<Regex>,
    handlers: HandlerTable,
}

impl XPathVisitor {
    pub fn new(query: PathQuery) -> Self {
        Self {
            query,
            pattern: None,
            handlers: HandlerTable::new().search(&[
                VisitableKind::Html,
                VisitableKind::Xml,
                VisitableKind::Svg,
                VisitableKind::Image,
                VisitableKind::Pdf,
            ]),
        }
    }

    /// Narrow each selected node to the regex matches inside it.
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }
}

impl Visitor for XPathVisitor {
    fn name(&self) -> &str {
        "XPathVisitor"
    }

    fn handlers(&self) -> &HandlerTable {
        &self.handlers
    }

    fn query(&self) -> &PathQuery {
        &self.query
    }

    fn create_searcher(&self) -> Box<dyn Searcher> {
        let searcher = PathSearcher::new(self.query.clone());
        match &self.pattern {
            Some(pattern) => Box::new(searcher.with_pattern(pattern.clone())),
            None => Box::new(searcher),
        }
    }

    /// Derived PDF pages are narrowed by the same pattern as native content.
    fn create_default_searcher(&self) -> Box<dyn Searcher> {
        self.create_searcher()
    }
}
