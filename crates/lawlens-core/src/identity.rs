//! # Statute Identifier
//!
//! The statute service addresses a law by its law id, law number, or
//! revision id. All three are opaque strings to us; the newtype only
//! guarantees the value is trimmed and non-empty.

use serde::{Deserialize, Serialize};

use crate::error::IdentityError;

/// Identifier of a statute on the remote statute service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StatuteId(String);

impl StatuteId {
    /// Create a statute identifier, trimming surrounding whitespace.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, IdentityError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IdentityError::EmptyStatuteId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StatuteId {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StatuteId> for String {
    fn from(id: StatuteId) -> Self {
        id.0
    }
}

impl std::fmt::Display for StatuteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
