//! # Statute Document Tree
//!
//! The statute API returns full text as a JSON tree in which every node is
//! either a bare string or an object `{ "tag", "attr", "children" }`:
//!
//! ```json
//! { "tag": "Article", "attr": { "Num": "1" }, "children": [
//!     { "tag": "ArticleTitle", "attr": {}, "children": ["第一条"] },
//!     "…"
//! ] }
//! ```
//!
//! Tags come from the statute XML schema and are not validated here; an
//! unfamiliar tag is simply an element with that tag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A node of the statute full-text tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatuteNode {
    /// A run of text. Never has children.
    Text(String),
    /// A structural element.
    Element {
        /// Schema tag, e.g. `Article`.
        tag: String,
        /// Schema attributes, passed through untouched.
        #[serde(default)]
        attr: BTreeMap<String, serde_json::Value>,
        /// Child nodes in document order.
        #[serde(default)]
        children: Vec<StatuteNode>,
    },
}

impl StatuteNode {
    /// A text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// An element without attributes.
    pub fn element(tag: impl Into<String>, children: Vec<StatuteNode>) -> Self {
        Self::Element {
            tag: tag.into(),
            attr: BTreeMap::new(),
            children,
        }
    }

    /// The tag of an element, `None` for text.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Element { tag, .. } => Some(tag.as_str()),
        }
    }

    /// Children of an element; text has none.
    pub fn children(&self) -> &[StatuteNode] {
        match self {
            Self::Text(_) => &[],
            Self::Element { children, .. } => children.as_slice(),
        }
    }

    /// Total number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Self::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mixed_tree() {
        let json = serde_json::json!({
            "tag": "Article",
            "attr": { "Num": "1" },
            "children": [
                { "tag": "ArticleTitle", "attr": {}, "children": ["第一条"] },
                { "tag": "Paragraph", "children": ["本文"] },
                "tail"
            ]
        });
        let node: StatuteNode = serde_json::from_value(json).unwrap();
        assert_eq!(node.tag(), Some("Article"));
        assert_eq!(node.children().len(), 3);
        assert_eq!(node.children()[2], StatuteNode::text("tail"));
        assert_eq!(node.node_count(), 6);
    }

    #[test]
    fn element_without_children_defaults_empty() {
        let node: StatuteNode = serde_json::from_str(r#"{"tag":"Sentence"}"#).unwrap();
        assert_eq!(node, StatuteNode::element("Sentence", vec![]));
    }

    #[test]
    fn rejects_non_tree_values() {
        assert!(serde_json::from_str::<StatuteNode>("42").is_err());
        assert!(serde_json::from_str::<StatuteNode>(r#"{"children":[]}"#).is_err());
    }
}
