//! # Overlay Runtime
//!
//! Drives an [`OverlayController`] on a single-threaded tokio runtime. Host
//! events arrive on a channel; timer firings and fetch completions are fed
//! back through an internal channel, so every state change happens inside
//! [`OverlayRuntime::dispatch`] on one task.
//!
//! Timers and fetches are spawned with `spawn_local`, so the runtime must be
//! used from within a [`tokio::task::LocalSet`]. Cancelled timers are
//! aborted; in-flight fetches are never cancelled and their results are
//! discarded by the controller when stale.

use std::collections::HashMap;
use std::rc::Rc;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use lawlens_fetch::StatuteSource;

use crate::controller::OverlayController;
use crate::effect::{Effect, Event};
use crate::host::{LinkCandidate, OverlayHost};
use crate::registry::ScanReport;
use crate::timer::{TimerKey, TimerToken};

/// Event loop around a controller, its host, and a statute source.
pub struct OverlayRuntime<H, S> {
    controller: OverlayController,
    host: H,
    source: Rc<S>,
    timers: HashMap<TimerKey, (TimerToken, AbortHandle)>,
    feedback_tx: mpsc::UnboundedSender<Event>,
    feedback_rx: mpsc::UnboundedReceiver<Event>,
}

impl<H, S> OverlayRuntime<H, S>
where
    H: OverlayHost,
    S: StatuteSource + 'static,
{
    pub fn new(controller: OverlayController, host: H, source: S) -> Self {
        let (feedback_tx, feedback_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            host,
            source: Rc::new(source),
            timers: HashMap::new(),
            feedback_tx,
            feedback_rx,
        }
    }

    pub fn controller(&self) -> &OverlayController {
        &self.controller
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Register the page's initial anchors.
    pub fn scan(&mut self, links: &[LinkCandidate]) -> ScanReport {
        self.controller.scan(links)
    }

    /// Apply one event and execute the resulting effects.
    pub fn dispatch(&mut self, event: Event) {
        if let Event::TimerFired { key, token } = &event {
            if self.timers.get(key).is_some_and(|(t, _)| t == token) {
                self.timers.remove(key);
            }
        }
        let effects = self.controller.handle(event, &mut self.host);
        for effect in effects {
            self.execute(effect);
        }
    }

    /// Process host events until the sender side is dropped.
    pub async fn run(&mut self, mut events: mpsc::UnboundedReceiver<Event>) {
        loop {
            tokio::select! {
                Some(event) = self.feedback_rx.recv() => self.dispatch(event),
                incoming = events.recv() => match incoming {
                    Some(event) => self.dispatch(event),
                    None => break,
                },
            }
        }
        for (_, (_, handle)) in self.timers.drain() {
            handle.abort();
        }
        tracing::debug!("overlay runtime stopped");
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::ArmTimer { key, token, delay } => {
                let tx = self.feedback_tx.clone();
                let task = tokio::task::spawn_local(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(Event::TimerFired { key, token });
                });
                if let Some((_, previous)) = self.timers.insert(key, (token, task.abort_handle())) {
                    previous.abort();
                }
            }
            Effect::CancelTimer { key } => {
                if let Some((_, handle)) = self.timers.remove(&key) {
                    handle.abort();
                }
            }
            Effect::Fetch {
                ticket,
                overlay,
                query,
            } => {
                let source = Rc::clone(&self.source);
                let tx = self.feedback_tx.clone();
                tokio::task::spawn_local(async move {
                    let result = source.fetch(&query).await;
                    let _ = tx.send(Event::FetchCompleted {
                        ticket,
                        overlay,
                        query,
                        result,
                    });
                });
            }
        }
    }
}
