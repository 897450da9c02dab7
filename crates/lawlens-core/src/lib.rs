//! # lawlens-core: Foundational Types for Statute Previews
//!
//! Everything the other `lawlens-*` crates agree on lives here: the statute
//! identifier newtype, the citation abbreviation table, the fragment locator
//! that turns a page anchor into an API element path, link classification,
//! and the hierarchical statute document tree.
//!
//! ## Key Design Principles
//!
//! 1. **Fail-closed address translation.** A fragment either resolves
//!    completely or not at all. `FragmentLocator` never returns a partial
//!    `ElementPath`; an unknown abbreviation code invalidates the whole call.
//!
//! 2. **Injected lookup configuration.** The abbreviation table is an
//!    immutable value shared behind an `Arc`, not a module-level constant.
//!    Several locators may share one table.
//!
//! 3. **No bare strings for identifiers.** `StatuteId` is validated on
//!    construction; `LawQuery` is immutable once built.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `lawlens-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod abbreviation;
pub mod error;
pub mod identity;
pub mod link;
pub mod locator;
pub mod query;
pub mod statute;

// Re-export primary types for ergonomic imports.
pub use abbreviation::AbbreviationTable;
pub use error::{CoreError, IdentityError, LinkError, LocateError, TableError};
pub use identity::StatuteId;
pub use link::{LinkClassifier, LinkTarget, DEFAULT_STATUTE_LINK_PREFIX};
pub use locator::{ElementPath, FragmentLocator, PathSegment};
pub use query::LawQuery;
pub use statute::StatuteNode;
