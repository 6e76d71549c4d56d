//! Evaluation of parsed location paths over the content model.

use super::parser::{LocationPath, NodeTest, Operand, Predicate, Step};
use crate::types::{local_name, normalize_space, ContentNode, Element};

/// A node selected during evaluation.
#[derive(Debug, Clone)]
pub(crate) enum Item<'a> {
    /// Virtual parent of the root element.
    Document(&'a Element),
    Element { element: &'a Element, location: String },
    Attribute { value: &'a str, location: String },
    Text { value: &'a str, location: String },
}

impl<'a> Item<'a> {
    fn element(&self) -> Option<&'a Element> {
        match self {
            Item::Element { element, .. } => Some(*element),
            _ => None,
        }
    }

    pub(crate) fn location(&self) -> &str {
        match self {
            Item::Document(_) => "/",
            Item::Element { location, .. }
            | Item::Attribute { location, .. }
            | Item::Text { location, .. } => location.as_str(),
        }
    }

    /// Raw string value.
    pub(crate) fn string_value(&self) -> String {
        match self {
            Item::Document(root) => root.string_value(),
            Item::Element { element, .. } => element.string_value(),
            Item::Attribute { value, .. } | Item::Text { value, .. } => (*value).to_string(),
        }
    }

    fn base_location(&self) -> &str {
        match self {
            Item::Document(_) => "",
            other => other.location(),
        }
    }

    /// Child elements and text runs with their canonical locations.
    fn children(&self) -> Vec<Item<'a>> {
        match self {
            Item::Document(root) => vec![Item::Element {
                element: *root,
                location: format!("/{}[1]", root.name),
            }],
            Item::Element { element, location } => {
                let element: &'a Element = *element;
                let mut out = Vec::new();
                let mut text_index = 0;
                for (i, child) in element.children.iter().enumerate() {
                    match child {
                        ContentNode::Element(child_element) => {
                            let position = 1 + element.children[..i]
                                .iter()
                                .filter_map(ContentNode::as_element)
                                .filter(|sibling| sibling.name == child_element.name)
                                .count();
                            out.push(Item::Element {
                                element: child_element,
                                location: format!(
                                    "{}/{}[{}]",
                                    location, child_element.name, position
                                ),
                            });
                        }
                        ContentNode::Text(text) => {
                            text_index += 1;
                            out.push(Item::Text {
                                value: text,
                                location: format!("{}/text()[{}]", location, text_index),
                            });
                        }
                    }
                }
                out
            }
            Item::Attribute { .. } | Item::Text { .. } => Vec::new(),
        }
    }

    fn attributes(&self) -> Vec<(&'a str, Item<'a>)> {
        match self.element() {
            Some(element) => element
                .attributes
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str(),
                        Item::Attribute {
                            value,
                            location: format!("{}/@{}", self.base_location(), name),
                        },
                    )
                })
                .collect(),
            None => Vec::new(),
        }
    }

    /// This item followed by every descendant element, in document order.
    fn descendants_or_self(&self) -> Vec<Item<'a>> {
        let mut out = Vec::new();
        match self {
            Item::Document(_) | Item::Element { .. } => self.collect_descendants(&mut out),
            Item::Attribute { .. } | Item::Text { .. } => {}
        }
        out
    }

    fn collect_descendants(&self, out: &mut Vec<Item<'a>>) {
        out.push(self.clone());
        for child in self.children() {
            if let Item::Element { .. } = child {
                child.collect_descendants(out);
            }
        }
    }
}

fn name_matches(test: &str, name: &str) -> bool {
    test == name || (!test.contains(':') && test == local_name(name))
}

fn axis<'a>(base: &Item<'a>, test: &NodeTest) -> Vec<Item<'a>> {
    match test {
        NodeTest::SelfNode => vec![base.clone()],
        NodeTest::Name(name) => base
            .children()
            .into_iter()
            .filter(|item| item.element().is_some_and(|e| name_matches(name, &e.name)))
            .collect(),
        NodeTest::AnyElement => base
            .children()
            .into_iter()
            .filter(|item| item.element().is_some())
            .collect(),
        NodeTest::Text => base
            .children()
            .into_iter()
            .filter(|item| matches!(item, Item::Text { .. }))
            .collect(),
        NodeTest::Node => base.children(),
        NodeTest::Attribute(name) => base
            .attributes()
            .into_iter()
            .filter(|(attr, _)| name_matches(name, attr))
            .map(|(_, item)| item)
            .collect(),
        NodeTest::AnyAttribute => base.attributes().into_iter().map(|(_, item)| item).collect(),
    }
}

fn direct_text(element: &Element) -> String {
    element
        .children
        .iter()
        .filter_map(ContentNode::as_text)
        .collect::<String>()
}

fn child_named<'e>(element: &'e Element, name: &'e str) -> impl Iterator<Item = &'e Element> {
    element
        .child_elements()
        .filter(move |child| name_matches(name, &child.name))
}

fn keep(item: &Item<'_>, predicate: &Predicate) -> bool {
    let element = item.element();
    match predicate {
        Predicate::Position(_) | Predicate::Last => true,
        Predicate::HasAttribute(name) => element.is_some_and(|e| e.attribute(name).is_some()),
        Predicate::AttributeEquals(name, value) => {
            element.is_some_and(|e| e.attribute(name) == Some(value.as_str()))
        }
        Predicate::HasChild(name) => element.is_some_and(|e| child_named(e, name).next().is_some()),
        Predicate::ChildEquals(name, value) => element.is_some_and(|e| {
            child_named(e, name).any(|child| normalize_space(&child.string_value()) == *value)
        }),
        Predicate::Contains(operand, needle) => {
            let haystack = match operand {
                Operand::Context => Some(item.string_value()),
                Operand::Text => element.map(direct_text),
                Operand::Attribute(name) => {
                    element.and_then(|e| e.attribute(name)).map(str::to_string)
                }
            };
            haystack.is_some_and(|h| h.contains(needle.as_str()))
        }
    }
}

fn apply_predicates<'a>(mut items: Vec<Item<'a>>, predicates: &[Predicate]) -> Vec<Item<'a>> {
    for predicate in predicates {
        items = match predicate {
            Predicate::Position(n) => items.into_iter().nth(n - 1).into_iter().collect(),
            Predicate::Last => items.pop().into_iter().collect(),
            other => items.into_iter().filter(|item| keep(item, other)).collect(),
        };
    }
    items
}

fn apply_step<'a>(contexts: Vec<Item<'a>>, step: &Step) -> Vec<Item<'a>> {
    let mut out = Vec::new();
    for context in contexts {
        let bases = if step.descendant {
            context.descendants_or_self()
        } else {
            vec![context]
        };
        for base in bases {
            out.extend(apply_predicates(axis(&base, &step.test), &step.predicates));
        }
    }
    out
}

/// Evaluate one location path starting from the document node.
pub(crate) fn evaluate_path<'a>(path: &LocationPath, root: &'a Element) -> Vec<Item<'a>> {
    path.steps
        .iter()
        .fold(vec![Item::Document(root)], |contexts, step| apply_step(contexts, step))
}
