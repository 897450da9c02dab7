//! # Link Subcommand
//!
//! Classifies an anchor reference the way the overlay controller does and
//! shows the statute API request it would lead to.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use url::Url;

use lawlens_core::{FragmentLocator, LinkClassifier, LinkTarget, DEFAULT_STATUTE_LINK_PREFIX};
use lawlens_fetch::{LawApiClient, LawApiConfig};

use crate::EXIT_UNRESOLVED;

/// Page that relative references are resolved against by default.
pub const DEFAULT_PAGE_URL: &str = "https://laws.e-gov.go.jp/law/";

/// Arguments for the `lawlens link` subcommand.
#[derive(Args, Debug)]
pub struct LinkArgs {
    /// The anchor's `href` value.
    #[arg(value_name = "HREF")]
    pub href: String,

    /// URL of the page containing the anchor.
    #[arg(long, default_value = DEFAULT_PAGE_URL)]
    pub page_url: String,
}

/// Execute the link subcommand.
///
/// Returns exit code: 0 for statute and same-document links, 2 for links
/// that are not statute references or whose fragment does not resolve.
pub fn run_link(args: &LinkArgs, config: &LawApiConfig, out: &mut impl Write) -> Result<u8> {
    let page_url = Url::parse(&args.page_url)
        .with_context(|| format!("invalid page URL: {}", args.page_url))?;
    let classifier = LinkClassifier::new(page_url, DEFAULT_STATUTE_LINK_PREFIX);

    let target = match classifier.classify(&args.href) {
        Ok(target) => target,
        Err(e) => {
            writeln!(out, "not a trigger: {e}")?;
            return Ok(EXIT_UNRESOLVED);
        }
    };

    match target {
        LinkTarget::Local { fragment } => {
            writeln!(out, "same-document reference to #{fragment}")?;
            Ok(0)
        }
        LinkTarget::Statute {
            statute_id,
            fragment,
        } => {
            writeln!(out, "statute: {statute_id}")?;
            let query = match FragmentLocator::default().query_for(statute_id, fragment.as_deref()) {
                Ok(query) => query,
                Err(e) => {
                    writeln!(out, "unresolved: {e}")?;
                    return Ok(EXIT_UNRESOLVED);
                }
            };
            match query.element_path() {
                Some(path) => writeln!(out, "element: {path}")?,
                None => writeln!(out, "element: (whole statute)")?,
            }
            let client = LawApiClient::new(config).context("failed to build statute API client")?;
            writeln!(out, "request: {}", client.request_url(&query))?;
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(href: &str) -> (u8, String) {
        let args = LinkArgs {
            href: href.to_string(),
            page_url: DEFAULT_PAGE_URL.to_string(),
        };
        let mut out = Vec::new();
        let code = run_link(&args, &LawApiConfig::default(), &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn statute_link_shows_request() {
        let (code, out) = run("/law/405AC0000000088#Mp-At_36");
        assert_eq!(code, 0);
        assert_eq!(
            out,
            "statute: 405AC0000000088\n\
             element: MainProvision-Article_36\n\
             request: https://laws.e-gov.go.jp/api/2/law_data/405AC0000000088\
             ?response_format=json&law_full_text_format=json&elm=MainProvision-Article_36\n"
        );
    }

    #[test]
    fn link_without_fragment_targets_whole_statute() {
        let (code, out) = run("405AC0000000088");
        assert_eq!(code, 0);
        assert!(out.contains("element: (whole statute)"));
        assert!(!out.contains("elm="));
    }

    #[test]
    fn local_reference() {
        let (code, out) = run("#Mp-At_2");
        assert_eq!(code, 0);
        assert_eq!(out, "same-document reference to #Mp-At_2\n");
    }

    #[test]
    fn foreign_link_is_not_a_trigger() {
        let (code, out) = run("https://example.com/law/405AC0000000088");
        assert_eq!(code, EXIT_UNRESOLVED);
        assert!(out.starts_with("not a trigger:"));
    }

    #[test]
    fn unknown_code_is_unresolved() {
        let (code, out) = run("/law/405AC0000000088#Zz_1");
        assert_eq!(code, EXIT_UNRESOLVED);
        assert!(out.contains("unresolved:"));
    }
}
