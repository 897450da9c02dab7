//! # Plain-Text Export
//!
//! Flattens a rendered tree into a reading layout for terminals and
//! clipboard export. Layout is decided purely by role:
//!
//! | Role | Before | After |
//! |------|--------|-------|
//! | `Title` | blank line | newline |
//! | `Article`, `Paragraph` | newline | newline |
//! | `Item` | newline + `"  ・"` | |
//! | `Sentence`, `Generic` | | |

use crate::render::{RenderTree, Role};

/// Render a tree to plain text.
pub fn to_plain_text(tree: &RenderTree) -> String {
    let mut out = String::new();
    write_node(tree, &mut out);
    out
}

fn write_node(tree: &RenderTree, out: &mut String) {
    match tree {
        RenderTree::Text { text } => out.push_str(text),
        RenderTree::Container { role, children, .. } => {
            let (prefix, suffix) = layout(*role);
            out.push_str(prefix);
            for child in children {
                write_node(child, out);
            }
            out.push_str(suffix);
        }
    }
}

fn layout(role: Role) -> (&'static str, &'static str) {
    match role {
        Role::Title => ("\n\n", "\n"),
        Role::Article | Role::Paragraph => ("\n", "\n"),
        Role::Item => ("\n  ・", ""),
        Role::Sentence | Role::Generic => ("", ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use lawlens_core::StatuteNode;

    #[test]
    fn plain_text_layout() {
        let node = StatuteNode::element(
            "Article",
            vec![
                StatuteNode::element("ArticleTitle", vec![StatuteNode::text("第一条")]),
                StatuteNode::element(
                    "Paragraph",
                    vec![
                        StatuteNode::element("Sentence", vec![StatuteNode::text("次に掲げる者")]),
                        StatuteNode::element("Item", vec![StatuteNode::text("一 甲")]),
                    ],
                ),
            ],
        );
        let text = to_plain_text(&render(&node));
        assert_eq!(text, "\n\n\n第一条\n\n次に掲げる者\n  ・一 甲\n\n");
    }

    #[test]
    fn bare_text_passes_through() {
        assert_eq!(to_plain_text(&RenderTree::text("abc")), "abc");
    }
}
