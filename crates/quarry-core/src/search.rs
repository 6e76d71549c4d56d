//! Path-query search engine.

use regex::Regex;

use crate::error::QuarryResult;
use crate::query::PathQuery;
use crate::traits::Searcher;
use crate::types::{Container, ResultNode};

/// Searcher that runs a pre-bound path query, optionally narrowed by a
/// regular expression.
///
/// Without a pattern every selected node becomes one match. With a pattern
/// every regex match inside a selected node's value becomes one match, located
/// at that node.
#[derive(Debug, Clone)]
pub struct PathSearcher {
    query: PathQuery,
    pattern: Option<Regex>,
}

impl PathSearcher {
    /// Create a searcher for a compiled query.
    pub fn new(query: PathQuery) -> Self {
        Self {
            query,
            pattern: None,
        }
    }

    /// Narrow matches with a regular expression.
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// The bound query.
    pub fn query(&self) -> &PathQuery {
        &self.query
    }

    /// The bound pattern, if any.
    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }
}

impl Searcher for PathSearcher {
    fn search(&self, container: &dyn Container) -> QuarryResult<ResultNode> {
        let source = container.source().map(|p| p.display().to_string());
        let mut list = ResultNode::container_results(source, container.kind().to_string());

        let Some(root) = container.content() else {
            tracing::debug!("{:?} has no searchable content", container.source());
            return Ok(list);
        };

        for found in self.query.evaluate(root) {
            match &self.pattern {
                None => list.append_child(ResultNode::matched(found.value, found.location)),
                Some(pattern) => {
                    for hit in pattern.find_iter(&found.value) {
                        let location = found.location.as_str();
                        list.append_child(ResultNode::matched(hit.as_str(), location));
                    }
                }
            }
        }

        tracing::debug!(
            "'{}' matched {} nodes in {:?}",
            self.query,
            list.children().len(),
            container.source()
        );
        Ok(list)
    }

    fn name(&self) -> &str {
        "path"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Element, HtmlContainer, PdfContainer, ResultKind, SvgContainer};

    fn html() -> HtmlContainer {
        HtmlContainer::new(
            Some("page.html".into()),
            Element::new("html").with_child(
                Element::new("body")
                    .with_child(Element::new("p").with_text("E. coli and B. subtilis"))
                    .with_child(Element::new("p").with_text("nothing here")),
            ),
        )
    }

    #[test]
    fn test_one_match_per_node() {
        let searcher = PathSearcher::new(PathQuery::parse("//p").unwrap());
        let node = searcher.search(&html()).unwrap();

        assert_eq!(node.kind(), ResultKind::ContainerResults);
        assert_eq!(node.source(), Some("page.html"));
        assert_eq!(node.format(), Some("html"));
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.children()[1].value(), Some("nothing here"));
        assert_eq!(node.children()[1].location(), Some("/html[1]/body[1]/p[2]"));
    }

    #[test]
    fn test_pattern_splits_into_regex_hits() {
        let searcher = PathSearcher::new(PathQuery::parse("//p").unwrap())
            .with_pattern(Regex::new(r"[A-Z]\. [a-z]+").unwrap());
        let node = searcher.search(&html()).unwrap();

        let values: Vec<_> = node.children().iter().map(|c| c.value().unwrap()).collect();
        assert_eq!(values, vec!["E. coli", "B. subtilis"]);
        assert!(node
            .children()
            .iter()
            .all(|c| c.location() == Some("/html[1]/body[1]/p[1]")));
    }

    #[test]
    fn test_format_follows_container() {
        let svg = SvgContainer::new(
            None,
            Element::new("svg").with_child(Element::new("text").with_text("axis")),
        );
        let node = PathSearcher::new(PathQuery::parse("//text").unwrap()).search(&svg).unwrap();
        assert_eq!(node.format(), Some("svg"));
        assert_eq!(node.source(), None);
        assert_eq!(node.match_count(), 1);
    }

    #[test]
    fn test_container_without_content_yields_empty_list() {
        let pdf = PdfContainer::with_derived(Some("doc.pdf".into()), None, None);
        let node = PathSearcher::new(PathQuery::all_text()).search(&pdf).unwrap();
        assert!(node.children().is_empty());
        assert_eq!(node.format(), Some("pdf"));
    }
}
