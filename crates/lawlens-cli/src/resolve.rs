//! # Resolve Subcommand
//!
//! Expands an abbreviated citation fragment into the element path sent to
//! the statute API, e.g. `Mp-At_36-Pr_1` → `MainProvision-Article_36-Paragraph_1`.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use lawlens_core::FragmentLocator;

use crate::EXIT_UNRESOLVED;

/// Arguments for the `lawlens resolve` subcommand.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Citation fragment, with or without the leading `#`.
    #[arg(value_name = "FRAGMENT")]
    pub fragment: String,
}

/// Execute the resolve subcommand.
///
/// Returns exit code: 0 when the fragment resolves, 2 otherwise.
pub fn run_resolve(args: &ResolveArgs, out: &mut impl Write) -> Result<u8> {
    match FragmentLocator::default().try_resolve(&args.fragment) {
        Ok(path) => {
            writeln!(out, "{path}")?;
            Ok(0)
        }
        Err(e) => {
            writeln!(out, "unresolved: {e}")?;
            Ok(EXIT_UNRESOLVED)
        }
    }
}
