//! Delayed navigation to the win/lose page

use crate::settings::Settings;
use crate::sim::Outcome;

/// A navigation waiting for its delay to elapse
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRedirect {
    pub outcome: Outcome,
    pub url: String,
    /// Timestamp (ms, same clock as `now_ms`) when the redirect fires
    pub due_ms: f64,
}

impl PendingRedirect {
    pub fn schedule(outcome: Outcome, now_ms: f64, settings: &Settings) -> Self {
        Self {
            outcome,
            url: settings.url_for(outcome).to_string(),
            due_ms: now_ms + settings.redirect_delay_ms.max(0.0),
        }
    }

    pub fn is_due(&self, now_ms: f64) -> bool {
        now_ms >= self.due_ms
    }

    /// Take the URL out of `slot` once due. Fires at most once.
    pub fn poll(slot: &mut Option<PendingRedirect>, now_ms: f64) -> Option<String> {
        slot.take_if(|r| r.is_due(now_ms)).map(|r| r.url)
    }
}
