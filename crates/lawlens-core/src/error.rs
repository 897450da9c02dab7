//! # Error Types
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations. Each concern gets its own enum so callers can match on
//! exactly what they handle; [`CoreError`] wraps them for callers that only
//! propagate.

use thiserror::Error;

/// Top-level error type for `lawlens-core`.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Fragment could not be translated into an element path.
    #[error("address resolution failed: {0}")]
    Locate(#[from] LocateError),

    /// Link reference could not be classified.
    #[error("link classification failed: {0}")]
    Link(#[from] LinkError),

    /// Abbreviation table construction failed.
    #[error("abbreviation table error: {0}")]
    Table(#[from] TableError),

    /// Identifier validation failed.
    #[error("identifier error: {0}")]
    Identity(#[from] IdentityError),
}

/// Error translating a citation fragment into an element path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    /// A segment's abbreviation code is not in the table.
    #[error("unknown structural code {code:?} in fragment {fragment:?}")]
    UnknownCode {
        /// The offending abbreviation code.
        code: String,
        /// The complete fragment as supplied by the caller.
        fragment: String,
    },
}

/// Error classifying an anchor reference.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// The reference could not be parsed against the page URL.
    #[error("invalid link reference {href:?}: {source}")]
    InvalidUrl {
        /// The raw reference.
        href: String,
        /// Parser failure.
        source: url::ParseError,
    },

    /// The reference neither targets the statute service nor this document.
    #[error("{0:?} is not a statute link")]
    NotAStatuteLink(String),

    /// A same-document reference with nothing after `#`.
    #[error("same-document reference has an empty fragment")]
    EmptyFragment,

    /// The statute path prefix is present but no identifier follows it.
    #[error("statute link {0:?} carries no statute identifier")]
    MissingStatuteId(String),
}

/// Error building an abbreviation table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The same code was mapped twice.
    #[error("duplicate abbreviation code {0:?}")]
    DuplicateCode(String),

    /// A code or full name was empty.
    #[error("abbreviation entries must have a non-empty code and name")]
    EmptyEntry,
}

/// Error constructing a domain identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Statute identifiers must contain at least one non-whitespace character.
    #[error("statute identifier must not be empty")]
    EmptyStatuteId,
}
