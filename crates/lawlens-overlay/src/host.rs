//! # Host Boundary
//!
//! The controller never touches a document directly. Everything it needs
//! from the page (element geometry, container lifecycle, same-document
//! excerpts) goes through [`OverlayHost`]. A browser binding implements it
//! over the DOM; tests implement it over plain vectors.

use lawlens_render::RenderTree;

use crate::content::OverlayContent;
use crate::ids::{ElementId, OverlayId};
use crate::placement::{Point, Rect, Size, Viewport};

/// An anchor found in the document or inside injected overlay content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCandidate {
    /// Host identity of the anchor element.
    pub element: ElementId,
    /// Raw `href` attribute value.
    pub href: String,
}

impl LinkCandidate {
    /// Convenience constructor.
    pub fn new(element: ElementId, href: impl Into<String>) -> Self {
        Self {
            element,
            href: href.into(),
        }
    }
}

/// What the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoverTarget {
    /// A registered trigger element.
    Trigger(ElementId),
    /// An overlay container.
    Overlay(OverlayId),
}

/// Document operations the controller depends on.
pub trait OverlayHost {
    /// Create an empty, absolutely positioned container for `overlay`.
    fn create_container(&mut self, overlay: OverlayId, size: Size);

    /// Replace the container's content. Returns the anchors present in the
    /// new content so the controller can register them as nested triggers.
    fn replace_content(&mut self, overlay: OverlayId, content: &OverlayContent) -> Vec<LinkCandidate>;

    /// Move the container to a document position.
    fn place(&mut self, overlay: OverlayId, at: Point);

    /// Detach the container and everything in it.
    fn remove_container(&mut self, overlay: OverlayId);

    /// Client rectangle of a trigger, or `None` if it left the document.
    fn trigger_rect(&self, trigger: ElementId) -> Option<Rect>;

    /// Current viewport dimensions and scroll offset.
    fn viewport(&self) -> Viewport;

    /// A copy of the element with id `fragment` in the current document.
    fn fragment_content(&self, fragment: &str) -> Option<RenderTree>;
}
