//! Response envelope of `GET /law_data/{id}`.

use serde::{Deserialize, Serialize};

use lawlens_core::StatuteNode;

/// Statute document as returned by the statute API.
///
/// Only `law_full_text` is required. The metadata objects are passed through
/// as JSON so schema additions on the service side never break parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatuteDocument {
    /// Hierarchical full text (or the addressed element when `elm` was set).
    pub law_full_text: StatuteNode,
    /// Law metadata (id, number, promulgation date).
    #[serde(default)]
    pub law_info: Option<serde_json::Value>,
    /// Revision metadata, including `law_title`.
    #[serde(default)]
    pub revision_info: Option<serde_json::Value>,
}

impl StatuteDocument {
    /// Wrap a bare full-text tree.
    pub fn from_full_text(law_full_text: StatuteNode) -> Self {
        Self {
            law_full_text,
            law_info: None,
            revision_info: None,
        }
    }

    /// The statute title from the revision metadata, if present.
    pub fn law_title(&self) -> Option<&str> {
        self.revision_info.as_ref()?.get("law_title")?.as_str()
    }
}
