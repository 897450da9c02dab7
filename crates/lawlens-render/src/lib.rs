//! # lawlens-render: Statute Tree Rendering
//!
//! Converts the statute API's hierarchical full text ([`StatuteNode`]) into a
//! presentational tree ([`RenderTree`]) whose containers carry a structural
//! [`Role`]. Overlays inject the tree; the CLI flattens it to text with
//! [`to_plain_text`].
//!
//! ## Crate Policy
//!
//! - Everything here is pure: no I/O, no interior mutability, no globals.
//!   The same input always yields a structurally equal output and the input
//!   is never modified.
//! - Nothing is filtered or truncated, whatever the tree size.
//!
//! [`StatuteNode`]: lawlens_core::StatuteNode

pub mod render;
pub mod text;

pub use render::{render, RenderTree, Role};
pub use text::to_plain_text;
