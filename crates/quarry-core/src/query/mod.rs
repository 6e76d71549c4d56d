//! Path queries over the content model.
//!
//! A small XPath subset: absolute (`/a/b`) and descendant (`//b`) steps,
//! name and wildcard tests, `@attr`, `text()`, `node()`, `.`, positional
//! and `last()` predicates, `[@a]`, `[@a='v']`, `[child]`, `[child='v']`,
//! `contains(., 'v')` and unions with `|`.
//!
//! # Example
//!
//! ```
//! use quarry_core::query::PathQuery;
//! use quarry_core::types::Element;
//!
//! let page = Element::new("html").with_child(
//!     Element::new("body").with_child(Element::new("p").with_text("hello")),
//! );
//! let query = PathQuery::parse("//p").unwrap();
//! let matches = query.evaluate(&page);
//! assert_eq!(matches[0].value, "hello");
//! assert_eq!(matches[0].location, "/html[1]/body[1]/p[1]");
//! ```

mod eval;
mod parser;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{QuarryError, QuarryResult};
use crate::types::{normalize_space, Element};
use parser::{LocationPath, NodeTest, Step};

/// Query selecting every text run, used by pattern searches.
pub const ALL_TEXT: &str = "//text()";

/// One node selected by a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryMatch {
    /// Whitespace-normalized string value.
    pub value: String,
    /// Canonical location, e.g. `/html[1]/body[1]/p[2]`.
    pub location: String,
}

/// A compiled path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery {
    expression: String,
    paths: Vec<LocationPath>,
}

impl PathQuery {
    /// Compile a query expression.
    pub fn parse(expression: &str) -> QuarryResult<Self> {
        let paths = parser::parse(expression)?;
        Ok(Self {
            expression: expression.trim().to_string(),
            paths,
        })
    }

    /// Query selecting every text run.
    pub fn all_text() -> Self {
        Self {
            expression: ALL_TEXT.to_string(),
            paths: vec![LocationPath {
                steps: vec![Step {
                    descendant: true,
                    test: NodeTest::Text,
                    predicates: Vec::new(),
                }],
            }],
        }
    }

    /// The source expression.
    pub fn as_str(&self) -> &str {
        &self.expression
    }

    /// Evaluate against a content root.
    ///
    /// Each path of a union contributes its matches in document order; the
    /// union concatenates them in path order without removing duplicates.
    pub fn evaluate(&self, root: &Element) -> Vec<QueryMatch> {
        self.paths
            .iter()
            .flat_map(|path| eval::evaluate_path(path, root))
            .map(|item| QueryMatch {
                value: normalize_space(&item.string_value()),
                location: item.location().to_string(),
            })
            .collect()
    }
}

impl FromStr for PathQuery {
    type Err = QuarryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for PathQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Element {
        Element::new("html")
            .with_child(Element::new("head").with_child(Element::new("title").with_text("Report")))
            .with_child(
                Element::new("body")
                    .with_child(
                        Element::new("p")
                            .with_attribute("class", "intro")
                            .with_text("First   paragraph"),
                    )
                    .with_child(
                        Element::new("p")
                            .with_attribute("id", "p2")
                            .with_text("Second ")
                            .with_child(
                                Element::new("a")
                                    .with_attribute("href", "x.html")
                                    .with_text("link"),
                            ),
                    )
                    .with_child(
                        Element::new("div").with_child(Element::new("p").with_text("Nested")),
                    ),
            )
    }

    fn values(query: &str) -> Vec<String> {
        PathQuery::parse(query)
            .unwrap()
            .evaluate(&page())
            .into_iter()
            .map(|m| m.value)
            .collect()
    }

    fn locations(query: &str) -> Vec<String> {
        PathQuery::parse(query)
            .unwrap()
            .evaluate(&page())
            .into_iter()
            .map(|m| m.location)
            .collect()
    }

    #[test]
    fn test_absolute_path() {
        assert_eq!(values("/html/head/title"), vec!["Report"]);
        assert!(values("/body").is_empty());
    }

    #[test]
    fn test_descendant_in_document_order() {
        assert_eq!(values("//p"), vec!["First paragraph", "Second link", "Nested"]);
        assert_eq!(
            locations("//p"),
            vec![
                "/html[1]/body[1]/p[1]",
                "/html[1]/body[1]/p[2]",
                "/html[1]/body[1]/div[1]/p[1]",
            ]
        );
    }

    #[test]
    fn test_attributes() {
        assert_eq!(values("//a/@href"), vec!["x.html"]);
        assert_eq!(locations("//a/@href"), vec!["/html[1]/body[1]/p[2]/a[1]/@href"]);
        assert_eq!(values("//p/@*"), vec!["intro", "p2"]);
    }

    #[test]
    fn test_text_nodes() {
        assert_eq!(values("//p/text()"), vec!["First paragraph", "Second", "Nested"]);
        assert_eq!(
            locations("/html/head/title/text()"),
            vec!["/html[1]/head[1]/title[1]/text()[1]"]
        );
    }

    #[test]
    fn test_predicates() {
        assert_eq!(values("//p[@class='intro']"), vec!["First paragraph"]);
        assert_eq!(values("//p[@id]"), vec!["Second link"]);
        assert_eq!(values("/html/body/p[2]"), vec!["Second link"]);
        assert_eq!(values("/html/body/p[last()]"), vec!["Second link"]);
        assert_eq!(values("//p[a]"), vec!["Second link"]);
        assert_eq!(values("//p[a='link']"), vec!["Second link"]);
        assert_eq!(values("//p[contains(., 'Nest')]"), vec!["Nested"]);
        assert_eq!(values("//p[contains(@class, 'int')]"), vec!["First paragraph"]);
    }

    #[test]
    fn test_positional_predicate_is_per_parent() {
        // `//p[1]` is the first p of each parent, not the first overall.
        assert_eq!(values("//p[1]"), vec!["First paragraph", "Nested"]);
    }

    #[test]
    fn test_wildcard_and_union() {
        assert_eq!(values("/html/*").len(), 2);
        assert_eq!(values("//title | //a"), vec!["Report", "link"]);
    }

    #[test]
    fn test_namespace_prefix_matches_local_name() {
        let svg = Element::new("svg:svg").with_child(Element::new("svg:text").with_text("label"));
        let matches = PathQuery::parse("//text").unwrap().evaluate(&svg);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].location, "/svg:svg[1]/svg:text[1]");
        assert_eq!(PathQuery::parse("//svg:text").unwrap().evaluate(&svg).len(), 1);
    }

    #[test]
    fn test_display_and_from_str() {
        let query: PathQuery = " //p ".parse().unwrap();
        assert_eq!(query.to_string(), "//p");
        assert_eq!(PathQuery::all_text().as_str(), ALL_TEXT);
        assert_eq!(PathQuery::all_text(), PathQuery::parse(ALL_TEXT).unwrap());
    }
}
