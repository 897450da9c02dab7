//! # Overlay Controller
//!
//! A sans-IO state machine. [`OverlayController::handle`] takes one
//! [`Event`], performs synchronous document work through the
//! [`OverlayHost`], and returns the [`Effect`]s (timers, fetches) the driver
//! must carry out. All overlay state lives here and is mutated from one
//! place only.
//!
//! ## Hover Rules
//!
//! - Entering a trigger starts the intent timer; leaving before it fires
//!   abandons the overlay. Clicking shows at once.
//! - Leaving an overlay or its trigger schedules hide, unless the pointer
//!   moved into that overlay or one of its descendants.
//! - Entering an overlay cancels pending hides on it and its ancestors.
//! - When hide fires, a hovered overlay or one with a live child stays.
//!   Otherwise it closes with its subtree and the parent is scheduled for
//!   hide.
//! - Showing an overlay closes every shown overlay that is not one of its
//!   ancestors.
//!
//! ## Content
//!
//! Content resolution is fail-closed: an unknown citation code, a missing
//! same-document target and a failed fetch each become a fixed message in
//! the overlay. A fetch result is applied only when its ticket and query
//! still match the overlay's outstanding request.

use lawlens_core::{FragmentLocator, LinkClassifier, LinkTarget};
use lawlens_render::render;
use url::Url;

use crate::config::ControllerConfig;
use crate::content::{FailureKind, OverlayContent};
use crate::effect::{Effect, Event};
use crate::forest::{Overlay, OverlayForest, Phase};
use crate::host::{HoverTarget, LinkCandidate, OverlayHost};
use crate::ids::{ElementId, IdIssuer, OverlayId};
use crate::placement::{place, Anchoring};
use crate::registry::{MutationBatch, ScanReport, TriggerRegistry};
use crate::timer::{TimerKey, TimerKind, TimerTable, TimerToken};

/// Owns triggers, overlays and timer bookkeeping for one page.
#[derive(Debug)]
pub struct OverlayController {
    config: ControllerConfig,
    locator: FragmentLocator,
    classifier: LinkClassifier,
    registry: TriggerRegistry,
    forest: OverlayForest,
    timers: TimerTable,
    ids: IdIssuer,
}

impl OverlayController {
    /// Create a controller for the page at `page_url`.
    pub fn new(config: ControllerConfig, page_url: Url, locator: FragmentLocator) -> Self {
        let classifier = LinkClassifier::new(page_url, config.statute_link_prefix.clone());
        Self {
            config,
            locator,
            classifier,
            registry: TriggerRegistry::new(),
            forest: OverlayForest::default(),
            timers: TimerTable::default(),
            ids: IdIssuer::default(),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn registry(&self) -> &TriggerRegistry {
        &self.registry
    }

    pub fn forest(&self) -> &OverlayForest {
        &self.forest
    }

    pub fn overlay(&self, id: OverlayId) -> Option<&Overlay> {
        self.forest.get(id)
    }

    /// The live overlay belonging to a trigger, if any.
    pub fn overlay_for(&self, trigger: ElementId) -> Option<&Overlay> {
        self.registry
            .get(trigger)
            .and_then(|t| t.overlay)
            .and_then(|id| self.forest.get(id))
    }

    /// Whether a timer is currently expected to fire for `key`.
    pub fn is_timer_armed(&self, key: TimerKey) -> bool {
        self.timers.is_armed(key)
    }

    // ── Scanning ─────────────────────────────────────────────────────

    /// Register qualifying anchors found in the page itself.
    pub fn scan(&mut self, links: &[LinkCandidate]) -> ScanReport {
        let report = self.registry.scan(links, None, &self.classifier);
        tracing::debug!(
            registered = report.registered,
            already_known = report.already_known,
            ignored = report.ignored,
            "page scanned"
        );
        report
    }

    /// Register anchors from a batch of added subtrees.
    ///
    /// Batches larger than `max_mutation_burst` are ignored wholesale.
    /// Records inside an overlay that has since closed are dropped. Removals
    /// are applied by [`handle`](Self::handle), since they may close
    /// overlays.
    pub fn observe(&mut self, batch: &MutationBatch) -> ScanReport {
        if batch.records.len() > self.config.max_mutation_burst {
            tracing::warn!(
                records = batch.records.len(),
                limit = self.config.max_mutation_burst,
                "mutation burst ignored"
            );
            return ScanReport::default();
        }

        let mut report = ScanReport::default();
        for record in &batch.records {
            if let Some(container) = record.container {
                if self.forest.get(container).is_none() {
                    tracing::debug!(overlay = %container, "mutation inside closed overlay dropped");
                    continue;
                }
            }
            report.merge(self.registry.scan(&record.links, record.container, &self.classifier));
        }
        if report.registered > 0 {
            tracing::debug!(registered = report.registered, "triggers added by mutation");
        }
        report
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Apply one event and return the effects it requires.
    pub fn handle<H: OverlayHost>(&mut self, event: Event, host: &mut H) -> Vec<Effect> {
        let mut fx = Vec::new();
        match event {
            Event::PointerEnter(HoverTarget::Trigger(element)) => self.enter_trigger(element, &mut fx),
            Event::PointerEnter(HoverTarget::Overlay(id)) => self.enter_overlay(id, &mut fx),
            Event::PointerLeave { from, to } => self.leave(from, to, &mut fx),
            Event::Click(element) => self.click(element, host, &mut fx),
            Event::Mutations(batch) => {
                self.forget_removed(&batch.removed, host, &mut fx);
                self.observe(&batch);
            }
            Event::TimerFired { key, token } => self.timer_fired(key, token, host, &mut fx),
            Event::FetchCompleted {
                ticket,
                overlay,
                query,
                result,
            } => {
                let current = self
                    .forest
                    .get(overlay)
                    .and_then(|o| o.pending.as_ref())
                    .is_some_and(|(t, q)| *t == ticket && *q == query);
                if !current {
                    tracing::debug!(%overlay, %ticket, "discarding stale fetch result");
                    return fx;
                }
                if let Some(o) = self.forest.get_mut(overlay) {
                    o.pending = None;
                }
                let content = match result {
                    Ok(doc) => OverlayContent::Populated(render(&doc.law_full_text)),
                    Err(err) => {
                        tracing::warn!(%overlay, %query, error = %err, "statute fetch failed");
                        OverlayContent::Failed(FailureKind::Unavailable)
                    }
                };
                self.populate(overlay, content, host);
            }
        }
        fx
    }

    fn enter_trigger(&mut self, element: ElementId, fx: &mut Vec<Effect>) {
        let Some(trigger) = self.registry.get(element) else {
            return;
        };
        let (existing, owner) = (trigger.overlay, trigger.owner);

        if let Some(id) = existing.filter(|id| self.forest.get(*id).is_some()) {
            if let Some(o) = self.forest.get_mut(id) {
                o.over_trigger = true;
            }
            self.keep_visible(id, fx);
            return;
        }

        let id = self.allocate(element, owner, true);
        self.timers.arm(TimerKey::intent(id), self.config.intent_delay(), fx);
        tracing::trace!(overlay = %id, trigger = %element, "hover intent started");
    }

    fn enter_overlay(&mut self, id: OverlayId, fx: &mut Vec<Effect>) {
        let Some(o) = self.forest.get_mut(id) else {
            return;
        };
        o.over_overlay = true;
        self.keep_visible(id, fx);
        for ancestor in self.forest.ancestors(id) {
            self.keep_visible(ancestor, fx);
        }
    }

    fn leave(&mut self, from: HoverTarget, to: Option<HoverTarget>, fx: &mut Vec<Effect>) {
        match from {
            HoverTarget::Trigger(element) => {
                let Some(id) = self.registry.get(element).and_then(|t| t.overlay) else {
                    return;
                };
                let Some(o) = self.forest.get_mut(id) else {
                    return;
                };
                o.over_trigger = false;
                if o.phase == Phase::HoverPending {
                    self.timers.cancel(TimerKey::intent(id), fx);
                    self.forest.remove(id);
                    self.detach_trigger(element, id);
                    tracing::trace!(overlay = %id, "hover abandoned");
                    return;
                }
                self.schedule_hide(id, to, fx);
            }
            HoverTarget::Overlay(id) => {
                let Some(o) = self.forest.get_mut(id) else {
                    return;
                };
                o.over_overlay = false;
                self.schedule_hide(id, to, fx);
            }
        }
    }

    fn click<H: OverlayHost>(&mut self, element: ElementId, host: &mut H, fx: &mut Vec<Effect>) {
        let Some(trigger) = self.registry.get(element) else {
            return;
        };
        let (existing, owner) = (trigger.overlay, trigger.owner);
        let id = match existing.filter(|id| self.forest.get(*id).is_some()) {
            Some(id) => id,
            None => self.allocate(element, owner, false),
        };
        self.show(id, host, fx);
    }

    fn timer_fired<H: OverlayHost>(
        &mut self,
        key: TimerKey,
        token: TimerToken,
        host: &mut H,
        fx: &mut Vec<Effect>,
    ) {
        if !self.timers.fire(key, token) {
            tracing::trace!(overlay = %key.overlay, kind = %key.kind, "stale timer ignored");
            return;
        }
        let Some(o) = self.forest.get(key.overlay) else {
            return;
        };
        match key.kind {
            TimerKind::Intent => {
                if o.phase == Phase::HoverPending && o.over_trigger {
                    self.show(key.overlay, host, fx);
                }
            }
            TimerKind::Hide => {
                if o.phase != Phase::HideScheduled {
                    return;
                }
                let parent = o.parent;
                if o.is_hovered() || self.forest.has_live_child(key.overlay) {
                    if let Some(o) = self.forest.get_mut(key.overlay) {
                        o.phase = Phase::Visible;
                    }
                    return;
                }
                self.close(key.overlay, host, fx);
                if let Some(parent) = parent {
                    self.schedule_hide(parent, None, fx);
                }
            }
        }
    }

    fn forget_removed<H: OverlayHost>(&mut self, removed: &[ElementId], host: &mut H, fx: &mut Vec<Effect>) {
        if removed.is_empty() {
            return;
        }
        let released = self.registry.forget(removed);
        tracing::debug!(removed = removed.len(), released = released.len(), "elements left the document");
        for trigger in released {
            if let Some(id) = trigger.overlay.filter(|id| self.forest.get(*id).is_some()) {
                self.close(id, host, fx);
            }
        }
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Start tracking an overlay for `element`. `over_trigger` is true only
    /// when the pointer is actually on the trigger; clicks and taps arrive
    /// without a pointer entry.
    fn allocate(&mut self, element: ElementId, owner: Option<OverlayId>, over_trigger: bool) -> OverlayId {
        let parent = owner.filter(|p| self.forest.get(*p).is_some_and(|o| o.phase.is_materialized()));
        let id = self.ids.overlay();
        let mut overlay = Overlay::new(id, element, parent);
        overlay.over_trigger = over_trigger;
        self.forest.insert(overlay);
        if let Some(t) = self.registry.get_mut(element) {
            t.overlay = Some(id);
        }
        id
    }

    fn detach_trigger(&mut self, element: ElementId, id: OverlayId) {
        if let Some(t) = self.registry.get_mut(element) {
            if t.overlay == Some(id) {
                t.overlay = None;
            }
        }
    }

    fn keep_visible(&mut self, id: OverlayId, fx: &mut Vec<Effect>) {
        if let Some(o) = self.forest.get_mut(id) {
            if o.phase == Phase::HideScheduled {
                o.phase = Phase::Visible;
                self.timers.cancel(TimerKey::hide(id), fx);
            }
        }
    }

    fn schedule_hide(&mut self, id: OverlayId, to: Option<HoverTarget>, fx: &mut Vec<Effect>) {
        let Some(o) = self.forest.get(id) else {
            return;
        };
        if !o.phase.is_materialized() || o.is_hovered() {
            return;
        }
        if to.is_some_and(|dest| self.leads_into(dest, id)) {
            return;
        }
        if let Some(o) = self.forest.get_mut(id) {
            o.phase = Phase::HideScheduled;
        }
        self.timers.arm(TimerKey::hide(id), self.config.hide_delay(), fx);
    }

    /// Whether `dest` is `id`'s trigger, `id` itself, or inside its subtree.
    fn leads_into(&self, dest: HoverTarget, id: OverlayId) -> bool {
        match dest {
            HoverTarget::Overlay(other) => self.forest.is_within(other, id),
            HoverTarget::Trigger(element) => {
                self.forest.get(id).is_some_and(|o| o.trigger == element)
                    || self
                        .registry
                        .get(element)
                        .and_then(|t| t.owner)
                        .is_some_and(|owner| self.forest.is_within(owner, id))
            }
        }
    }

    fn show<H: OverlayHost>(&mut self, id: OverlayId, host: &mut H, fx: &mut Vec<Effect>) {
        let mut keep = self.forest.ancestors(id);
        keep.push(id);
        for other in self.forest.materialized() {
            if !keep.contains(&other) && self.forest.get(other).is_some() {
                self.close(other, host, fx);
            }
        }
        // Re-showing an overlay also drops its own descendants.
        let children: Vec<OverlayId> = self
            .forest
            .get(id)
            .map(|o| o.children.clone())
            .unwrap_or_default();
        for child in children {
            self.close(child, host, fx);
        }

        let Some(o) = self.forest.get(id) else {
            return;
        };
        let (trigger, parent, materialized) = (o.trigger, o.parent, o.phase.is_materialized());

        let Some(rect) = host.trigger_rect(trigger) else {
            tracing::warn!(overlay = %id, %trigger, "trigger left the document");
            self.close(id, host, fx);
            return;
        };

        self.timers.cancel_all(id, fx);
        let size = self.config.overlay_size();
        if !materialized {
            host.create_container(id, size);
        }
        if let Some(o) = self.forest.get_mut(id) {
            o.phase = Phase::Visible;
        }
        self.populate(id, OverlayContent::Loading, host);

        let (anchoring, gap) = match parent {
            Some(_) => (Anchoring::Beside, self.config.gap_side),
            None => (Anchoring::Below, self.config.gap_below),
        };
        let viewport = host.viewport();
        host.place(id, place(rect, size, viewport, anchoring, gap));
        tracing::info!(overlay = %id, %trigger, nested = parent.is_some(), "overlay shown");

        self.request_content(id, trigger, host, fx);
    }

    fn request_content<H: OverlayHost>(
        &mut self,
        id: OverlayId,
        trigger: ElementId,
        host: &mut H,
        fx: &mut Vec<Effect>,
    ) {
        let Some(target) = self.registry.get(trigger).map(|t| t.target.clone()) else {
            return;
        };
        if let Some(o) = self.forest.get_mut(id) {
            o.pending = None;
        }

        match target {
            LinkTarget::Local { fragment } => {
                let content = match host.fragment_content(&fragment) {
                    Some(tree) => OverlayContent::Populated(tree),
                    None => {
                        tracing::debug!(overlay = %id, %fragment, "same-document target missing");
                        OverlayContent::Failed(FailureKind::MissingTarget)
                    }
                };
                self.populate(id, content, host);
            }
            LinkTarget::Statute {
                statute_id,
                fragment,
            } => match self.locator.query_for(statute_id, fragment.as_deref()) {
                Ok(query) => {
                    let ticket = self.ids.ticket();
                    if let Some(o) = self.forest.get_mut(id) {
                        o.pending = Some((ticket, query.clone()));
                    }
                    tracing::debug!(overlay = %id, %ticket, %query, "content requested");
                    fx.push(Effect::Fetch {
                        ticket,
                        overlay: id,
                        query,
                    });
                }
                Err(err) => {
                    tracing::warn!(overlay = %id, error = %err, "citation fragment unresolved");
                    self.populate(id, OverlayContent::Failed(FailureKind::Unresolved), host);
                }
            },
        }
    }

    /// Replace an overlay's content and register anchors inside it.
    fn populate<H: OverlayHost>(&mut self, id: OverlayId, content: OverlayContent, host: &mut H) {
        self.registry.release_owned(id);
        let links = host.replace_content(id, &content);
        if let Some(o) = self.forest.get_mut(id) {
            o.content = content;
        }
        let report = self.registry.scan(&links, Some(id), &self.classifier);
        if report.registered > 0 {
            tracing::debug!(overlay = %id, registered = report.registered, "nested triggers registered");
        }
    }

    /// Close `id` and its descendants, deepest first.
    fn close<H: OverlayHost>(&mut self, id: OverlayId, host: &mut H, fx: &mut Vec<Effect>) {
        for oid in self.forest.subtree_postorder(id) {
            self.timers.cancel_all(oid, fx);
            let Some(o) = self.forest.remove(oid) else {
                continue;
            };
            if o.phase.is_materialized() {
                host.remove_container(oid);
            }
            self.registry.release_owned(oid);
            self.detach_trigger(o.trigger, oid);
            tracing::info!(overlay = %oid, "overlay closed");
        }
    }
}
