//! # lawlens-cli: Command-Line Interface
//!
//! Exercises the lawlens pipeline outside a browser.
//!
//! ## Subcommands
//!
//! - `resolve`: Expand a citation fragment into an element path
//! - `link`: Classify an anchor reference and show the request it implies
//! - `fetch`: Retrieve statute text and print it as text or JSON
//! - `render`: Render a saved `law_full_text` payload
//!
//! ## Exit Codes
//!
//! `0` on success, `1` on operational error (network, I/O, bad config),
//! `2` when the input does not resolve to a statute element.
//!
//! Handlers write to the `out` they are given so tests can capture output.

pub mod config;
pub mod fetch;
pub mod link;
pub mod render;
pub mod resolve;

/// Exit code for inputs that do not resolve.
pub const EXIT_UNRESOLVED: u8 = 2;
