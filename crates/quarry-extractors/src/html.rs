//! HTML loading using scraper.
//!
//! The parsed DOM is converted into the shared content model: elements and
//! text are kept, comments and whitespace-only text are dropped.

use scraper::{ElementRef, Html, Node};
use std::path::Path;

use quarry_core::types::{ContentNode, Element, HtmlContainer};
use quarry_core::VisitableKind;

use crate::error::{ExtractError, ExtractResult};
use crate::{LoadedContainer, Loader};

/// HTML loader using the scraper (html5ever) parser.
#[derive(Debug, Clone, Default)]
pub struct HtmlLoader;

impl HtmlLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse markup into a content model root.
    pub fn parse(markup: &str) -> Element {
        let document = Html::parse_document(markup);
        convert(document.root_element())
    }
}

fn convert(element: ElementRef<'_>) -> Element {
    let value = element.value();
    let mut out = Element::new(value.name());
    for (name, attribute) in value.attrs() {
        out.attributes.push((name.to_string(), attribute.to_string()));
    }

    for child in element.children() {
        match child.value() {
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    out.children.push(ContentNode::Element(convert(child_element)));
                }
            }
            Node::Text(text) => {
                let text: &str = text;
                if !text.trim().is_empty() {
                    out.children.push(ContentNode::Text(text.to_string()));
                }
            }
            _ => {}
        }
    }
    out
}

impl Loader for HtmlLoader {
    fn kind(&self) -> VisitableKind {
        VisitableKind::Html
    }

    fn extensions(&self) -> &[&str] {
        &["html", "htm", "xhtml"]
    }

    fn load(&self, content: &[u8], source: &Path) -> ExtractResult<LoadedContainer> {
        let markup = String::from_utf8_lossy(content);
        if markup.trim().is_empty() {
            return Err(ExtractError::Html(format!("{} is empty", source.display())));
        }
        Ok(LoadedContainer::Html(HtmlContainer::new(
            Some(source.to_path_buf()),
            Self::parse(&markup),
        )))
    }

    fn name(&self) -> &str {
        "html"
    }
}
