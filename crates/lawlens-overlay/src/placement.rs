//! # Overlay Placement
//!
//! Pure coordinate math. Rectangles come from the host in client (viewport)
//! coordinates; the returned point is in document coordinates, ready for
//! absolute positioning.
//!
//! - **Below** (top-level overlays): left-aligned with the trigger, `gap`
//!   under its bottom edge. If the overlay's bottom edge would pass the
//!   viewport bottom, it flips above the trigger.
//! - **Beside** (nested overlays): top-aligned with the trigger, `gap` right
//!   of its right edge. If the overlay's right edge would pass the viewport's
//!   right edge, it flips to the left of the trigger.

/// Axis-aligned rectangle in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Width and height of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Visible area of the page and its scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

/// Top-left corner in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub left: f64,
    pub top: f64,
}

/// Where an overlay sits relative to its trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchoring {
    /// Under the trigger; used for top-level overlays.
    Below,
    /// To the right of the trigger; used for nested overlays.
    Beside,
}

/// Compute the document position of an overlay.
pub fn place(trigger: Rect, size: Size, viewport: Viewport, anchoring: Anchoring, gap: f64) -> Point {
    match anchoring {
        Anchoring::Below => {
            let left = trigger.left + viewport.scroll_x;
            let top = if trigger.bottom + gap + size.height > viewport.height {
                trigger.top - gap - size.height
            } else {
                trigger.bottom + gap
            };
            Point {
                left,
                top: top + viewport.scroll_y,
            }
        }
        Anchoring::Beside => {
            let left = if trigger.right + gap + size.width > viewport.width {
                trigger.left - gap - size.width
            } else {
                trigger.right + gap
            };
            Point {
                left: left + viewport.scroll_x,
                top: trigger.top + viewport.scroll_y,
            }
        }
    }
}
