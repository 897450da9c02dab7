//! # Fetch Subcommand
//!
//! Retrieves a statute (or one element of it) from the statute API and
//! prints it in reading layout, or as the rendered tree in JSON.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use lawlens_core::{FragmentLocator, StatuteId};
use lawlens_fetch::{LawApiConfig, StatuteFetcher};
use lawlens_render::{render, to_plain_text};

use crate::EXIT_UNRESOLVED;

/// Arguments for the `lawlens fetch` subcommand.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Law id, law number, or revision id.
    #[arg(value_name = "STATUTE_ID")]
    pub statute_id: String,

    /// Citation fragment narrowing the request to one element.
    #[arg(long)]
    pub fragment: Option<String>,

    /// Print the rendered tree as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Execute the fetch subcommand.
///
/// Returns exit code: 0 on success, 2 when the fragment does not resolve.
/// Network and service failures are errors.
pub async fn run_fetch(args: &FetchArgs, config: &LawApiConfig, out: &mut impl Write) -> Result<u8> {
    let statute_id = StatuteId::new(&args.statute_id).context("invalid statute id")?;
    let query = match FragmentLocator::default().query_for(statute_id, args.fragment.as_deref()) {
        Ok(query) => query,
        Err(e) => {
            writeln!(out, "unresolved: {e}")?;
            return Ok(EXIT_UNRESOLVED);
        }
    };

    let fetcher = StatuteFetcher::new(config).context("failed to build statute API client")?;
    let document = fetcher
        .fetch(&query)
        .await
        .with_context(|| format!("failed to fetch {query}"))?;
    tracing::info!(%query, title = ?document.law_title(), "statute fetched");

    let tree = render(&document.law_full_text);
    if args.json {
        let json = serde_json::to_string_pretty(&tree).context("failed to serialize rendered tree")?;
        writeln!(out, "{json}")?;
    } else {
        if let Some(title) = document.law_title() {
            writeln!(out, "{title}")?;
        }
        write!(out, "{}", to_plain_text(&tree))?;
    }
    Ok(0)
}
