//! # Overlay Forest
//!
//! Overlays form a forest: a top-level overlay belongs to a page anchor, a
//! nested overlay to an anchor inside its parent's content. The forest owns
//! every overlay that is not idle; an overlay returning to idle is removed.
//!
//! ## Phases
//!
//! (Idle) → HOVER_PENDING → VISIBLE ⇄ HIDE_SCHEDULED → (Idle)
//!
//! HOVER_PENDING overlays have no container yet. VISIBLE and HIDE_SCHEDULED
//! overlays are materialized: their container exists in the document.

use std::collections::BTreeMap;

use lawlens_core::LawQuery;

use crate::content::OverlayContent;
use crate::ids::{ElementId, FetchTicket, OverlayId};

/// Lifecycle phase of a live overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Pointer is on the trigger; the intent timer is running.
    HoverPending,
    /// Container shown.
    Visible,
    /// Container shown; the hide timer is running.
    HideScheduled,
}

impl Phase {
    /// Whether a container exists for this phase.
    pub fn is_materialized(&self) -> bool {
        !matches!(self, Self::HoverPending)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::HoverPending => "HOVER_PENDING",
            Self::Visible => "VISIBLE",
            Self::HideScheduled => "HIDE_SCHEDULED",
        };
        f.write_str(s)
    }
}

/// One overlay and its hover bookkeeping.
#[derive(Debug, Clone)]
pub struct Overlay {
    pub(crate) id: OverlayId,
    pub(crate) trigger: ElementId,
    pub(crate) parent: Option<OverlayId>,
    pub(crate) children: Vec<OverlayId>,
    pub(crate) phase: Phase,
    pub(crate) over_trigger: bool,
    pub(crate) over_overlay: bool,
    pub(crate) content: OverlayContent,
    pub(crate) pending: Option<(FetchTicket, LawQuery)>,
}

impl Overlay {
    pub(crate) fn new(id: OverlayId, trigger: ElementId, parent: Option<OverlayId>) -> Self {
        Self {
            id,
            trigger,
            parent,
            children: Vec::new(),
            phase: Phase::HoverPending,
            over_trigger: false,
            over_overlay: false,
            content: OverlayContent::Loading,
            pending: None,
        }
    }

    pub fn id(&self) -> OverlayId {
        self.id
    }

    pub fn trigger(&self) -> ElementId {
        self.trigger
    }

    pub fn parent(&self) -> Option<OverlayId> {
        self.parent
    }

    pub fn children(&self) -> &[OverlayId] {
        &self.children
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn content(&self) -> &OverlayContent {
        &self.content
    }

    /// Ticket of the outstanding content request, if any.
    pub fn pending_ticket(&self) -> Option<FetchTicket> {
        self.pending.as_ref().map(|(ticket, _)| *ticket)
    }

    /// Whether the pointer is over the trigger or the container.
    pub fn is_hovered(&self) -> bool {
        self.over_trigger || self.over_overlay
    }
}

/// All live overlays.
#[derive(Debug, Default)]
pub struct OverlayForest {
    overlays: BTreeMap<OverlayId, Overlay>,
}

impl OverlayForest {
    pub fn get(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: OverlayId) -> Option<&mut Overlay> {
        self.overlays.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.values()
    }

    /// Insert an overlay and link it under its parent.
    pub(crate) fn insert(&mut self, overlay: Overlay) {
        if let Some(parent) = overlay.parent.and_then(|p| self.overlays.get_mut(&p)) {
            parent.children.push(overlay.id);
        }
        self.overlays.insert(overlay.id, overlay);
    }

    /// Remove a single overlay and unlink it from its parent.
    ///
    /// Children are left in place; callers remove subtrees bottom-up.
    pub(crate) fn remove(&mut self, id: OverlayId) -> Option<Overlay> {
        let overlay = self.overlays.remove(&id)?;
        if let Some(parent) = overlay.parent.and_then(|p| self.overlays.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }
        Some(overlay)
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: OverlayId) -> Vec<OverlayId> {
        let mut out = Vec::new();
        let mut cursor = self.overlays.get(&id).and_then(|o| o.parent);
        while let Some(parent) = cursor {
            out.push(parent);
            cursor = self.overlays.get(&parent).and_then(|o| o.parent);
        }
        out
    }

    /// Whether `id` is `root` or one of its descendants.
    pub fn is_within(&self, id: OverlayId, root: OverlayId) -> bool {
        id == root || self.ancestors(id).contains(&root)
    }

    /// `root` and all its descendants, children before parents.
    pub fn subtree_postorder(&self, root: OverlayId) -> Vec<OverlayId> {
        let mut out = Vec::new();
        self.collect_postorder(root, &mut out);
        out
    }

    fn collect_postorder(&self, id: OverlayId, out: &mut Vec<OverlayId>) {
        let Some(overlay) = self.overlays.get(&id) else {
            return;
        };
        for child in &overlay.children {
            self.collect_postorder(*child, out);
        }
        out.push(id);
    }

    /// Whether any child of `id` has a container.
    pub fn has_live_child(&self, id: OverlayId) -> bool {
        self.overlays.get(&id).is_some_and(|o| {
            o.children
                .iter()
                .filter_map(|c| self.overlays.get(c))
                .any(|c| c.phase.is_materialized())
        })
    }

    /// Ids of all materialized overlays.
    pub fn materialized(&self) -> Vec<OverlayId> {
        self.overlays
            .values()
            .filter(|o| o.phase.is_materialized())
            .map(|o| o.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest() -> OverlayForest {
        // 1 ─ 2 ─ 3
        //  └─ 4
        let mut forest = OverlayForest::default();
        forest.insert(Overlay::new(OverlayId(1), ElementId(10), None));
        forest.insert(Overlay::new(OverlayId(2), ElementId(20), Some(OverlayId(1))));
        forest.insert(Overlay::new(OverlayId(3), ElementId(30), Some(OverlayId(2))));
        forest.insert(Overlay::new(OverlayId(4), ElementId(40), Some(OverlayId(1))));
        forest
    }

    #[test]
    fn ancestors_nearest_first() {
        assert_eq!(forest().ancestors(OverlayId(3)), vec![OverlayId(2), OverlayId(1)]);
        assert!(forest().ancestors(OverlayId(1)).is_empty());
    }

    #[test]
    fn within_subtree() {
        let f = forest();
        assert!(f.is_within(OverlayId(3), OverlayId(1)));
        assert!(f.is_within(OverlayId(2), OverlayId(2)));
        assert!(!f.is_within(OverlayId(4), OverlayId(2)));
    }

    #[test]
    fn postorder_lists_children_first() {
        let order = forest().subtree_postorder(OverlayId(1));
        assert_eq!(order, vec![OverlayId(3), OverlayId(2), OverlayId(4), OverlayId(1)]);
    }

    #[test]
    fn remove_unlinks_from_parent() {
        let mut f = forest();
        f.remove(OverlayId(4));
        assert_eq!(f.get(OverlayId(1)).unwrap().children(), &[OverlayId(2)]);
    }

    #[test]
    fn live_child_requires_materialized_phase() {
        let mut f = forest();
        assert!(!f.has_live_child(OverlayId(1)));
        f.get_mut(OverlayId(4)).unwrap().phase = Phase::Visible;
        assert!(f.has_live_child(OverlayId(1)));
        assert_eq!(f.materialized(), vec![OverlayId(4)]);
    }
}
