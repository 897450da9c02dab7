//! Controller inputs and outputs.

use std::sync::Arc;
use std::time::Duration;

use lawlens_core::LawQuery;
use lawlens_fetch::{FetchError, StatuteDocument};

use crate::host::HoverTarget;
use crate::ids::{ElementId, FetchTicket, OverlayId};
use crate::registry::MutationBatch;
use crate::timer::{TimerKey, TimerToken};

/// Everything that can happen to the controller.
#[derive(Debug)]
pub enum Event {
    /// The pointer entered a trigger or an overlay.
    PointerEnter(HoverTarget),
    /// The pointer left `from`; `to` is where it went, if known.
    PointerLeave {
        from: HoverTarget,
        to: Option<HoverTarget>,
    },
    /// A trigger was clicked or tapped.
    Click(ElementId),
    /// The document gained new subtrees.
    Mutations(MutationBatch),
    /// A timer armed by [`Effect::ArmTimer`] elapsed.
    TimerFired { key: TimerKey, token: TimerToken },
    /// A fetch requested by [`Effect::Fetch`] finished.
    FetchCompleted {
        ticket: FetchTicket,
        overlay: OverlayId,
        query: LawQuery,
        result: Result<Arc<StatuteDocument>, FetchError>,
    },
}

/// Work the driver must perform on the controller's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start (or restart) the timer for `key`; deliver
    /// [`Event::TimerFired`] with `token` after `delay`.
    ArmTimer {
        key: TimerKey,
        token: TimerToken,
        delay: Duration,
    },
    /// Stop the timer for `key` if it is still running.
    CancelTimer { key: TimerKey },
    /// Resolve `query` and deliver [`Event::FetchCompleted`].
    Fetch {
        ticket: FetchTicket,
        overlay: OverlayId,
        query: LawQuery,
    },
}
