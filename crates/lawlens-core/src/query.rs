//! # Law Query
//!
//! The pair the statute service is asked for: which statute, and optionally
//! which element within it. Built once when an overlay opens and never
//! mutated afterwards; equality drives both the fetch cache key and stale
//! result detection.

use crate::identity::StatuteId;
use crate::locator::ElementPath;

/// An immutable request for statute content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LawQuery {
    statute_id: StatuteId,
    element_path: Option<ElementPath>,
}

impl LawQuery {
    /// Query a statute, optionally scoped to one element.
    pub fn new(statute_id: StatuteId, element_path: Option<ElementPath>) -> Self {
        Self {
            statute_id,
            element_path,
        }
    }

    /// Query the whole statute.
    pub fn whole(statute_id: StatuteId) -> Self {
        Self::new(statute_id, None)
    }

    /// The statute being queried.
    pub fn statute_id(&self) -> &StatuteId {
        &self.statute_id
    }

    /// The element within the statute, if scoped.
    pub fn element_path(&self) -> Option<&ElementPath> {
        self.element_path.as_ref()
    }
}

impl std::fmt::Display for LawQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.element_path {
            Some(path) => write!(f, "{}#{}", self.statute_id, path),
            None => write!(f, "{}", self.statute_id),
        }
    }
}
