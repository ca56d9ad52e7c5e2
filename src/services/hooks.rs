//! Host collaborators wired into the dial controller

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::dial::DialHooks;
use crate::state::DialEvent;
use super::{alarm::Alarm, settings::JsonSettings};

/// Alarm, persistence, background hold and event publishing for the dial
#[derive(Debug)]
pub struct HostHooks {
    settings: JsonSettings,
    alarm: Alarm,
    events: broadcast::Sender<DialEvent>,
    redraw_pending: bool,
    held: bool,
}

impl HostHooks {
    pub fn new(settings: JsonSettings, events: broadcast::Sender<DialEvent>) -> Self {
        Self {
            settings,
            alarm: Alarm::new(),
            events,
            redraw_pending: false,
            held: false,
        }
    }

    pub fn alarm(&self) -> &Alarm {
        &self.alarm
    }

    /// Whether the process is kept alive for a running session
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Consume a pending redraw request
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }

    /// Silence the alarm from the notification or a client button
    pub fn stop_alarm(&mut self) {
        if self.alarm.stop() {
            self.publish(DialEvent::AlarmStopped { at: Utc::now() });
            self.redraw_pending = true;
        }
    }

    fn hold(&mut self) {
        if !self.held {
            self.held = true;
            info!("Holding application while the timer runs");
        }
    }

    fn release(&mut self) {
        if self.held {
            self.held = false;
            info!("Releasing application hold");
        }
    }

    fn publish(&self, event: DialEvent) {
        if let Err(e) = self.events.send(event) {
            debug!("No listeners for dial event: {}", e);
        }
    }
}

impl DialHooks for HostHooks {
    fn load_initial_total_seconds(&mut self) -> Option<i64> {
        match self.settings.load() {
            Ok(settings) => settings.last_position,
            Err(e) => {
                warn!("Failed to load settings: {}", e);
                None
            }
        }
    }

    fn request_redraw(&mut self) {
        self.redraw_pending = true;
    }

    fn total_seconds_changed(&mut self, total_seconds: u32) {
        if let Err(e) = self.settings.save_last_position(total_seconds) {
            warn!("Failed to persist dial position: {}", e);
        }
    }

    fn session_started(&mut self) {
        self.alarm.stop();
        self.hold();
        self.publish(DialEvent::SessionStarted { at: Utc::now() });
    }

    fn session_stopped(&mut self) {
        self.alarm.stop();
        self.release();
        self.publish(DialEvent::SessionStopped { at: Utc::now() });
    }

    fn session_complete(&mut self) {
        self.alarm.start();
        self.release();
        self.publish(DialEvent::SessionFinished { at: Utc::now() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hooks() -> (HostHooks, broadcast::Receiver<DialEvent>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let (tx, rx) = broadcast::channel(16);
        let hooks = HostHooks::new(JsonSettings::new(dir.path().join("settings.json")), tx);
        (hooks, rx, dir)
    }

    #[test]
    fn test_session_lifecycle_events() {
        let (mut hooks, mut rx, _dir) = hooks();

        hooks.session_started();
        assert!(hooks.is_held());
        assert!(matches!(rx.try_recv(), Ok(DialEvent::SessionStarted { .. })));

        hooks.session_complete();
        assert!(!hooks.is_held());
        assert!(hooks.alarm().is_ringing());
        assert!(matches!(rx.try_recv(), Ok(DialEvent::SessionFinished { .. })));

        hooks.stop_alarm();
        assert!(!hooks.alarm().is_ringing());
        assert!(hooks.take_redraw());
        assert!(!hooks.take_redraw());
        assert!(matches!(rx.try_recv(), Ok(DialEvent::AlarmStopped { .. })));

        // Nothing ringing, nothing published
        hooks.stop_alarm();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_new_session_silences_alarm() {
        let (mut hooks, _rx, _dir) = hooks();
        hooks.session_complete();
        hooks.session_started();
        assert!(!hooks.alarm().is_ringing());
    }

    #[test]
    fn test_position_round_trips_through_settings() {
        let (mut hooks, _rx, _dir) = hooks();
        assert_eq!(hooks.load_initial_total_seconds(), None);
        hooks.total_seconds_changed(2400);
        assert_eq!(hooks.load_initial_total_seconds(), Some(2400));
    }
}
