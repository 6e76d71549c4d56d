//! Visitor that finds regular-expression matches in document text.

use regex::Regex;

use super::{HandlerTable, Visitor};
use crate::error::QuarryResult;
use crate::query::PathQuery;
use crate::search::PathSearcher;
use crate::traits::Searcher;
use crate::types::VisitableKind;

/// Searches every text run for a regular expression.
///
/// Images carry no text, so they are refused rather than left unsupported.
#[derive(Debug, Clone)]
pub struct PatternVisitor {
    query: PathQuery,
    pattern: Regex,
    handlers: HandlerTable,
}

impl PatternVisitor {
    pub fn new(pattern: Regex) -> Self {
        Self {
            query: PathQuery::all_text(),
            pattern,
            handlers: HandlerTable::new()
                .search(&[
                    VisitableKind::Html,
                    VisitableKind::Xml,
                    VisitableKind::Svg,
                    VisitableKind::Pdf,
                ])
                .refuse(&[VisitableKind::Image]),
        }
    }

    /// Compile `pattern` and create a visitor for it.
    pub fn from_pattern(pattern: &str) -> QuarryResult<Self> {
        Ok(Self::new(Regex::new(pattern)?))
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    fn searcher(&self) -> PathSearcher {
        PathSearcher::new(self.query.clone()).with_pattern(self.pattern.clone())
    }
}

impl Visitor for PatternVisitor {
    fn name(&self) -> &str {
        "PatternVisitor"
    }

    fn handlers(&self) -> &HandlerTable {
        &self.handlers
    }

    fn query(&self) -> &PathQuery {
        &self.query
    }

    fn create_searcher(&self) -> Box<dyn Searcher> {
        Box::new(self.searcher())
    }

    // A bare text query would return every run, so derived pages keep the pattern.
    fn create_default_searcher(&self) -> Box<dyn Searcher> {
        Box::new(self.searcher())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuarryError;
    use crate::types::{Element, HtmlContainer, ImageContainer, PdfContainer, Visitable};
    use crate::visitor::Dispatcher;

    fn species() -> Dispatcher<PatternVisitor> {
        Dispatcher::new(PatternVisitor::from_pattern(r"[A-Z]\. [a-z]+").unwrap())
    }

    #[test]
    fn test_finds_matches_in_text_runs() {
        let page = HtmlContainer::new(
            Some("paper.html".into()),
            Element::new("html").with_child(
                Element::new("body")
                    .with_child(Element::new("p").with_text("Grown with E. coli"))
                    .with_child(Element::new("p").with_text("and B. subtilis, then E. coli again")),
            ),
        );
        let tree = species().visit(&Visitable::html(vec![page])).unwrap();

        let list = &tree.root().unwrap().children()[0];
        let values: Vec<_> = list.children().iter().map(|m| m.value().unwrap()).collect();
        assert_eq!(values, vec!["E. coli", "B. subtilis", "E. coli"]);
        assert_eq!(list.children()[1].location(), Some("/html[1]/body[1]/p[2]/text()[1]"));
    }

    #[test]
    fn test_image_is_not_applicable() {
        let image = Visitable::image(vec![ImageContainer::new(None, Element::new("image"))]);
        match species().visit(&image).unwrap_err() {
            QuarryError::NotApplicable { visitor, visitable } => {
                assert_eq!(visitor, "PatternVisitor");
                assert_eq!(visitable, "ImageVisitable");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_derived_pdf_text_keeps_pattern() {
        let html = HtmlContainer::new(
            Some("doc.pdf".into()),
            Element::new("html")
                .with_child(Element::new("p").with_text("no species, then E. coli")),
        );
        let pdf = PdfContainer::with_derived(Some("doc.pdf".into()), Some(html), None);
        let tree = species().visit(&Visitable::pdf(vec![pdf])).unwrap();
        assert_eq!(tree.match_count(), 1);
        assert_eq!(tree.root().unwrap().children()[0].children()[0].value(), Some("E. coli"));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        assert!(matches!(
            PatternVisitor::from_pattern("(unclosed"),
            Err(QuarryError::Regex(_))
        ));
    }
}
