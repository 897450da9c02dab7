//! # Timer Bookkeeping
//!
//! The controller never sleeps. It asks the driver to arm and cancel timers
//! through effects and records which token each key currently expects. A
//! firing whose token does not match is stale and ignored, so a timer that
//! slips past its cancellation can never act.

use std::collections::HashMap;
use std::time::Duration;

use crate::effect::Effect;
use crate::ids::OverlayId;

/// What a timer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Hover-intent delay before an overlay opens.
    Intent,
    /// Delay before an unhovered overlay closes.
    Hide,
}

impl std::fmt::Display for TimerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Intent => "intent",
            Self::Hide => "hide",
        })
    }
}

/// Timer identity: one timer per kind per overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerKey {
    pub overlay: OverlayId,
    pub kind: TimerKind,
}

impl TimerKey {
    pub fn intent(overlay: OverlayId) -> Self {
        Self {
            overlay,
            kind: TimerKind::Intent,
        }
    }

    pub fn hide(overlay: OverlayId) -> Self {
        Self {
            overlay,
            kind: TimerKind::Hide,
        }
    }
}

/// Generation tag of one arming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub(crate) u64);

#[derive(Debug, Default)]
pub(crate) struct TimerTable {
    armed: HashMap<TimerKey, TimerToken>,
    next: u64,
}

impl TimerTable {
    /// Arm (or re-arm) `key`, superseding any earlier arming.
    pub(crate) fn arm(&mut self, key: TimerKey, delay: Duration, fx: &mut Vec<Effect>) {
        self.next += 1;
        let token = TimerToken(self.next);
        self.armed.insert(key, token);
        fx.push(Effect::ArmTimer { key, token, delay });
    }

    pub(crate) fn cancel(&mut self, key: TimerKey, fx: &mut Vec<Effect>) {
        if self.armed.remove(&key).is_some() {
            fx.push(Effect::CancelTimer { key });
        }
    }

    pub(crate) fn cancel_all(&mut self, overlay: OverlayId, fx: &mut Vec<Effect>) {
        self.cancel(TimerKey::intent(overlay), fx);
        self.cancel(TimerKey::hide(overlay), fx);
    }

    /// Consume a firing. Returns `false` for stale or unknown firings.
    pub(crate) fn fire(&mut self, key: TimerKey, token: TimerToken) -> bool {
        if self.armed.get(&key) == Some(&token) {
            self.armed.remove(&key);
            true
        } else {
            false
        }
    }

    pub(crate) fn is_armed(&self, key: TimerKey) -> bool {
        self.armed_token(key).is_some()
    }

    pub(crate) fn armed_token(&self, key: TimerKey) -> Option<TimerToken> {
        self.armed.get(&key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(10);

    fn token_of(fx: &[Effect]) -> TimerToken {
        match fx.last() {
            Some(Effect::ArmTimer { token, .. }) => *token,
            other => panic!("expected ArmTimer, got {other:?}"),
        }
    }

    #[test]
    fn rearm_makes_earlier_token_stale() {
        let mut table = TimerTable::default();
        let key = TimerKey::hide(OverlayId(1));
        let mut fx = Vec::new();

        table.arm(key, DELAY, &mut fx);
        let first = token_of(&fx);
        table.arm(key, DELAY, &mut fx);
        let second = token_of(&fx);

        assert!(!table.fire(key, first));
        assert!(table.fire(key, second));
        assert!(!table.fire(key, second));
    }

    #[test]
    fn cancel_only_emits_for_armed_keys() {
        let mut table = TimerTable::default();
        let key = TimerKey::intent(OverlayId(1));
        let mut fx = Vec::new();

        table.cancel(key, &mut fx);
        assert!(fx.is_empty());

        table.arm(key, DELAY, &mut fx);
        let token = token_of(&fx);
        table.cancel(key, &mut fx);
        assert_eq!(fx.last(), Some(&Effect::CancelTimer { key }));
        assert!(!table.fire(key, token));
    }
}
