//! # Identifiers
//!
//! `ElementId` is issued by the host and names a DOM element for as long as
//! it exists. `OverlayId` and `FetchTicket` are issued by the controller and
//! never reused within one controller.

/// Host-issued identity of a document element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Controller-issued identity of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub(crate) u64);

/// Tag of one content request; a result is applied only if its ticket is
/// still the overlay's pending ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchTicket(pub(crate) u64);

impl OverlayId {
    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "element-{}", self.0)
    }
}

impl std::fmt::Display for OverlayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "law-overlay-{}", self.0)
    }
}

impl std::fmt::Display for FetchTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fetch-{}", self.0)
    }
}

/// Monotonic issuer for controller-side identifiers.
#[derive(Debug, Default)]
pub(crate) struct IdIssuer {
    next_overlay: u64,
    next_ticket: u64,
}

impl IdIssuer {
    pub(crate) fn overlay(&mut self) -> OverlayId {
        self.next_overlay += 1;
        OverlayId(self.next_overlay)
    }

    pub(crate) fn ticket(&mut self) -> FetchTicket {
        self.next_ticket += 1;
        FetchTicket(self.next_ticket)
    }
}
