//! # Render Subcommand
//!
//! Renders a saved statute payload without touching the network. Accepts
//! either a full `law_data` response or a bare `law_full_text` tree.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;

use lawlens_core::StatuteNode;
use lawlens_fetch::StatuteDocument;
use lawlens_render::{render, to_plain_text};

/// Arguments for the `lawlens render` subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// JSON file holding a `law_data` response or a `law_full_text` tree.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Print the rendered tree as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Document(StatuteDocument),
    Tree(StatuteNode),
}

impl Payload {
    fn into_tree(self) -> StatuteNode {
        match self {
            Self::Document(doc) => doc.law_full_text,
            Self::Tree(node) => node,
        }
    }
}

/// Execute the render subcommand.
pub fn run_render(args: &RenderArgs, out: &mut impl Write) -> Result<u8> {
    let content = std::fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let payload: Payload = serde_json::from_str(&content)
        .with_context(|| format!("not a statute payload: {}", args.path.display()))?;
    let node = payload.into_tree();
    tracing::debug!(nodes = node.node_count(), "payload loaded");

    let tree = render(&node);
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&tree)?)?;
    } else {
        write!(out, "{}", to_plain_text(&tree))?;
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_on(content: &str, json: bool) -> Result<String> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.json");
        std::fs::write(&path, content).unwrap();

        let mut out = Vec::new();
        run_render(&RenderArgs { path, json }, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn renders_bare_tree() {
        let out = run_on(
            r#"{"tag":"Item","attr":{"Num":"1"},"children":[{"tag":"Sentence","children":["甲"]}]}"#,
            false,
        )
        .unwrap();
        assert_eq!(out, "\n  ・甲");
    }

    #[test]
    fn renders_full_response() {
        let out = run_on(
            r#"{"law_info":{},"law_full_text":{"tag":"ArticleTitle","children":["第二条"]}}"#,
            false,
        )
        .unwrap();
        assert_eq!(out, "\n\n第二条\n");
    }

    #[test]
    fn json_output_keeps_tags() {
        let out = run_on(r#"{"tag":"Remarks","children":["備考"]}"#, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["role"], "generic");
        assert_eq!(value["tag"], "Remarks");
    }

    #[test]
    fn invalid_payload_is_an_error() {
        let err = run_on("[1, 2]", false).unwrap_err();
        assert!(err.to_string().starts_with("not a statute payload"));
    }
}
