//! Result nodes and the per-visitable results tree.

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

/// Role of a node in the results tree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    /// The tree root.
    Root,
    /// Results of searching one container.
    ContainerResults,
    /// A single match.
    Match,
}

/// A node in the results tree.
///
/// Children keep discovery order. Appending is the only mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultNode {
    kind: ResultKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<ResultNode>,
}

impl ResultNode {
    fn empty(kind: ResultKind) -> Self {
        Self {
            kind,
            source: None,
            format: None,
            location: None,
            value: None,
            children: Vec::new(),
        }
    }

    /// Create a root node.
    pub fn root() -> Self {
        Self::empty(ResultKind::Root)
    }

    /// Create the node holding one container's matches.
    pub fn container_results(source: Option<String>, format: impl Into<String>) -> Self {
        Self {
            source,
            format: Some(format.into()),
            ..Self::empty(ResultKind::ContainerResults)
        }
    }

    /// Create a match node.
    pub fn matched(value: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            location: Some(location.into()),
            ..Self::empty(ResultKind::Match)
        }
    }

    /// Append a child at the end.
    pub fn append_child(&mut self, child: ResultNode) {
        self.children.push(child);
    }

    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn children(&self) -> &[ResultNode] {
        &self.children
    }

    /// Number of match nodes in this subtree.
    pub fn match_count(&self) -> usize {
        let own = usize::from(self.kind == ResultKind::Match);
        own + self.children.iter().map(ResultNode::match_count).sum::<usize>()
    }
}

/// Results for one visitable.
///
/// The root is created on the first append, so a visitable with no containers
/// leaves the tree empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsTree {
    root: Option<ResultNode>,
}

impl ResultsTree {
    /// Create a tree with no root yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the root, creating it if needed.
    pub fn ensure_root(&mut self) -> &mut ResultNode {
        self.root.get_or_insert_with(ResultNode::root)
    }

    /// Append a subtree to the root.
    pub fn append(&mut self, node: ResultNode) {
        self.ensure_root().append_child(node);
    }

    /// The root, if one was created.
    pub fn root(&self) -> Option<&ResultNode> {
        self.root.as_ref()
    }

    /// Whether no root was ever created.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total matches in the tree.
    pub fn match_count(&self) -> usize {
        self.root.as_ref().map_or(0, ResultNode::match_count)
    }
}
