//! # Structural-to-Presentational Rendering
//!
//! ## Role Table
//!
//! | Tag | Role |
//! |-----|------|
//! | `LawTitle`, `PartTitle`, `ChapterTitle`, `SectionTitle`, `SubsectionTitle`, `ArticleTitle` | `Title` |
//! | `Article` | `Article` |
//! | `Paragraph` | `Paragraph` |
//! | `Item` | `Item` |
//! | `Sentence` | `Sentence` |
//! | anything else | `Generic` |
//!
//! The table is exhaustive by construction: `Role::for_tag` has a fallback
//! arm, so an unfamiliar tag is a generic container, never an error.

use serde::Serialize;

use lawlens_core::StatuteNode;

/// Presentational role of a rendered container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Heading of a law, part, chapter, section, subsection, or article.
    Title,
    /// An article body.
    Article,
    /// A numbered paragraph within an article.
    Paragraph,
    /// A numbered item within a paragraph.
    Item,
    /// A sentence run.
    Sentence,
    /// Any other structure.
    Generic,
}

impl Role {
    /// Map a statute schema tag to its role.
    pub fn for_tag(tag: &str) -> Self {
        match tag {
            "LawTitle" | "PartTitle" | "ChapterTitle" | "SectionTitle" | "SubsectionTitle"
            | "ArticleTitle" => Self::Title,
            "Article" => Self::Article,
            "Paragraph" => Self::Paragraph,
            "Item" => Self::Item,
            "Sentence" => Self::Sentence,
            _ => Self::Generic,
        }
    }

    /// Class-style name of the role, e.g. for a container's CSS class.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Article => "article",
            Self::Paragraph => "paragraph",
            Self::Item => "item",
            Self::Sentence => "sentence",
            Self::Generic => "generic",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A renderable fragment tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderTree {
    /// Verbatim text.
    Text {
        /// The text.
        text: String,
    },
    /// A container tagged with its role.
    Container {
        /// Presentational role.
        role: Role,
        /// Source schema tag, kept for consumers that need more detail.
        tag: String,
        /// Rendered children in source order.
        children: Vec<RenderTree>,
    },
}

impl RenderTree {
    /// A text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Role of a container, `None` for text.
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Text { .. } => None,
            Self::Container { role, .. } => Some(*role),
        }
    }

    /// Children of a container; text has none.
    pub fn children(&self) -> &[RenderTree] {
        match self {
            Self::Text { .. } => &[],
            Self::Container { children, .. } => children.as_slice(),
        }
    }

    /// Concatenation of every text node, in order, without layout.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text { text } => out.push_str(text),
            Self::Container { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// Render a statute node into a fragment tree.
pub fn render(node: &StatuteNode) -> RenderTree {
    match node {
        StatuteNode::Text(text) => RenderTree::text(text.clone()),
        StatuteNode::Element { tag, children, .. } => RenderTree::Container {
            role: Role::for_tag(tag),
            tag: tag.clone(),
            children: children.iter().map(render).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> StatuteNode {
        StatuteNode::element(
            "Article",
            vec![
                StatuteNode::element("ArticleCaption", vec![StatuteNode::text("（定義）")]),
                StatuteNode::element("ArticleTitle", vec![StatuteNode::text("第二条")]),
                StatuteNode::element(
                    "Paragraph",
                    vec![StatuteNode::element(
                        "ParagraphSentence",
                        vec![StatuteNode::element("Sentence", vec![StatuteNode::text("本文")])],
                    )],
                ),
            ],
        )
    }

    #[test]
    fn text_leaf_is_verbatim() {
        assert_eq!(render(&StatuteNode::text(" 第一条 ")), RenderTree::text(" 第一条 "));
    }

    #[test]
    fn roles_follow_the_tag_table() {
        let tree = render(&article());
        assert_eq!(tree.role(), Some(Role::Article));
        let roles: Vec<_> = tree.children().iter().map(|c| c.role()).collect();
        assert_eq!(roles, vec![Some(Role::Generic), Some(Role::Title), Some(Role::Paragraph)]);
        let sentence = &tree.children()[2].children()[0].children()[0];
        assert_eq!(sentence.role(), Some(Role::Sentence));
    }

    #[test]
    fn every_title_tag_is_a_title() {
        for tag in [
            "LawTitle",
            "PartTitle",
            "ChapterTitle",
            "SectionTitle",
            "SubsectionTitle",
            "ArticleTitle",
        ] {
            assert_eq!(Role::for_tag(tag), Role::Title, "{tag}");
        }
        assert_eq!(Role::for_tag("DivisionTitle"), Role::Generic);
        assert_eq!(Role::for_tag("Item"), Role::Item);
    }

    #[test]
    fn unknown_tags_are_generic_containers() {
        let tree = render(&StatuteNode::element("SomethingNew", vec![StatuteNode::text("x")]));
        assert_eq!(
            tree,
            RenderTree::Container {
                role: Role::Generic,
                tag: "SomethingNew".into(),
                children: vec![RenderTree::text("x")],
            }
        );
    }

    #[test]
    fn text_content_keeps_order() {
        assert_eq!(render(&article()).text_content(), "（定義）第二条本文");
    }

    #[test]
    fn wide_trees_are_not_truncated() {
        let children = (0..5_000).map(|i| StatuteNode::text(i.to_string())).collect();
        let tree = render(&StatuteNode::element("Paragraph", children));
        assert_eq!(tree.children().len(), 5_000);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(render(&StatuteNode::element("Item", vec![StatuteNode::text("a")]))).unwrap();
        assert_eq!(json["kind"], "container");
        assert_eq!(json["role"], "item");
        assert_eq!(json["children"][0]["kind"], "text");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn statute_node() -> impl Strategy<Value = StatuteNode> {
        let leaf = "[a-z第条 ]{0,12}".prop_map(StatuteNode::Text);
        leaf.prop_recursive(5, 64, 6, |inner| {
            (
                prop_oneof![
                    Just("Article".to_string()),
                    Just("Paragraph".to_string()),
                    Just("Item".to_string()),
                    Just("Sentence".to_string()),
                    Just("ArticleTitle".to_string()),
                    "[A-Z][a-z]{1,8}",
                ],
                prop::collection::vec(inner, 0..6),
            )
                .prop_map(|(tag, children)| StatuteNode::element(tag, children))
        })
    }

    fn count(tree: &RenderTree) -> usize {
        1 + tree.children().iter().map(count).sum::<usize>()
    }

    proptest! {
        /// Rendering twice yields equal trees and leaves the input untouched.
        #[test]
        fn render_is_pure(node in statute_node()) {
            let before = node.clone();
            let a = render(&node);
            let b = render(&node);
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(node, before);
        }

        /// Every source node has exactly one rendered counterpart.
        #[test]
        fn render_preserves_node_count(node in statute_node()) {
            prop_assert_eq!(count(&render(&node)), node.node_count());
        }
    }
}
