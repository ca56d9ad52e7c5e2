//! Alarm playback state

use chrono::{DateTime, Utc};
use tracing::info;

/// Tracks whether the session-finished alarm is sounding.
///
/// Audio output belongs to the client; the host only keeps the ringing
/// state so clients and notifications can offer to stop it.
#[derive(Debug, Default)]
pub struct Alarm {
    ringing_since: Option<DateTime<Utc>>,
}

impl Alarm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart from the beginning) the alarm
    pub fn start(&mut self) {
        let now = Utc::now();
        info!("Alarm ringing");
        self.ringing_since = Some(now);
    }

    /// Silence the alarm. Returns whether it was ringing.
    pub fn stop(&mut self) -> bool {
        match self.ringing_since.take() {
            Some(since) => {
                info!("Alarm stopped after {}s", (Utc::now() - since).num_seconds());
                true
            }
            None => false,
        }
    }

    pub fn is_ringing(&self) -> bool {
        self.ringing_since.is_some()
    }

    pub fn ringing_since(&self) -> Option<DateTime<Utc>> {
        self.ringing_since
    }
}
