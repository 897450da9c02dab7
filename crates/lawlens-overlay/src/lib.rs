//! # lawlens-overlay
//!
//! Hover previews for statute citations. Anchors on a page (and inside
//! previews) become triggers; resting the pointer on one opens an overlay
//! with the cited provision, fetched and rendered, or with a fixed message
//! when that fails. Overlays nest to any depth and close when the pointer
//! has left them for the hide delay.
//!
//! ## Architecture
//!
//! - [`OverlayController`] is a sans-IO state machine: events in, effects
//!   out. It reaches the document only through [`OverlayHost`].
//! - [`OverlayRuntime`] executes effects on a single-threaded tokio runtime
//!   and feeds timer firings and fetch results back to the controller.

pub mod config;
pub mod content;
pub mod controller;
pub mod effect;
pub mod forest;
pub mod host;
pub mod ids;
pub mod placement;
pub mod registry;
pub mod runtime;
pub mod timer;

pub use config::ControllerConfig;
pub use content::{FailureKind, OverlayContent, LOADING_MESSAGE};
pub use controller::OverlayController;
pub use effect::{Effect, Event};
pub use forest::{Overlay, OverlayForest, Phase};
pub use host::{HoverTarget, LinkCandidate, OverlayHost};
pub use ids::{ElementId, FetchTicket, OverlayId};
pub use placement::{place, Anchoring, Point, Rect, Size, Viewport};
pub use registry::{AddedSubtree, MutationBatch, ScanReport, Trigger, TriggerRegistry};
pub use runtime::OverlayRuntime;
pub use timer::{TimerKey, TimerKind, TimerToken};
