//! # Overlay Content
//!
//! Every failure an overlay can meet ends up here as a content variant with
//! a fixed message. The controller never surfaces an error to the host.

use lawlens_render::RenderTree;

/// Shown while content is being resolved.
pub const LOADING_MESSAGE: &str = "Loading…";

/// Why an overlay could not show its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The citation fragment references an unknown structural code.
    Unresolved,
    /// The statute service failed or answered with something unusable.
    Unavailable,
    /// A same-document reference points at a missing element.
    MissingTarget,
}

impl FailureKind {
    /// Fixed human-readable message for the failure.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Unresolved => "This reference could not be resolved.",
            Self::Unavailable => {
                "The content could not be retrieved. The statute may have been repealed or relocated."
            }
            Self::MissingTarget => "The referenced provision was not found on this page.",
        }
    }
}

/// What an overlay container currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayContent {
    /// Resolution in progress.
    Loading,
    /// Rendered content.
    Populated(RenderTree),
    /// Resolution failed.
    Failed(FailureKind),
}

impl OverlayContent {
    /// The fixed message for non-populated content.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Loading => Some(LOADING_MESSAGE),
            Self::Populated(_) => None,
            Self::Failed(kind) => Some(kind.message()),
        }
    }

    /// The rendered tree, if populated.
    pub fn tree(&self) -> Option<&RenderTree> {
        match self {
            Self::Populated(tree) => Some(tree),
            _ => None,
        }
    }
}
