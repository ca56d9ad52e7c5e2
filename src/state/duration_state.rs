//! Duration state record and its invariants

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Shortest session the dial can hold, also the adjustment step
pub const MIN_TOTAL_SECONDS: u32 = 30;
/// Longest session the dial can hold (one full turn)
pub const MAX_TOTAL_SECONDS: u32 = 3600;
/// Granularity of every accepted duration
pub const STEP_SECONDS: u32 = 30;
/// Duration shown on a freshly created dial
pub const DEFAULT_TOTAL_SECONDS: u32 = 300;

/// Lifecycle phase derived from the `running`/`paused` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
}

/// Authoritative record of the configured duration and countdown progress.
///
/// Readable by anyone; only the controller and the countdown scheduler
/// mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationState {
    total_seconds: u32,
    remaining: Duration,
    running: bool,
    paused: bool,
    dragging: bool,
}

impl DurationState {
    /// Create a new idle state holding the default duration
    pub fn new() -> Self {
        Self {
            total_seconds: DEFAULT_TOTAL_SECONDS,
            remaining: Duration::ZERO,
            running: false,
            paused: false,
            dragging: false,
        }
    }

    /// Create an idle state from a persisted duration.
    ///
    /// Values that fail [`is_valid_total_seconds`] are ignored and the
    /// default is used instead.
    pub fn with_persisted(persisted: Option<i64>) -> Self {
        let mut state = Self::new();
        if let Some(value) = persisted.filter(|v| is_valid_total_seconds(*v)) {
            state.total_seconds = value as u32;
        }
        state
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn total(&self) -> Duration {
        Duration::from_secs(u64::from(self.total_seconds))
    }

    /// Time left in the active countdown; zero when idle
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Ticks are only consumed in this state
    pub fn is_ticking(&self) -> bool {
        self.running && !self.paused
    }

    pub fn phase(&self) -> Phase {
        match (self.running, self.paused) {
            (true, true) => Phase::Paused,
            (true, false) => Phase::Running,
            _ => Phase::Idle,
        }
    }

    pub fn can_add_time(&self) -> bool {
        self.total_seconds < MAX_TOTAL_SECONDS
    }

    pub fn can_remove_time(&self) -> bool {
        self.total_seconds > MIN_TOTAL_SECONDS
    }

    /// `MM:SS` text for the dial label: remaining time while a session is
    /// active, the configured duration otherwise
    pub fn label(&self) -> String {
        let secs = if self.running {
            self.remaining.as_secs()
        } else {
            u64::from(self.total_seconds)
        };
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// Replace the configured duration. Returns false (and changes nothing)
    /// when the value is invalid or equal to the current one.
    pub(crate) fn set_total_seconds(&mut self, value: u32) -> bool {
        if !is_valid_total_seconds(i64::from(value)) || value == self.total_seconds {
            return false;
        }
        self.total_seconds = value;
        true
    }

    /// Reset `remaining` to the full configured duration
    pub(crate) fn rebase_remaining(&mut self) {
        self.remaining = self.total();
    }

    pub(crate) fn begin_session(&mut self) {
        self.running = true;
        self.paused = false;
        self.rebase_remaining();
    }

    pub(crate) fn end_session(&mut self) {
        self.running = false;
        self.paused = false;
        self.remaining = Duration::ZERO;
    }

    pub(crate) fn set_paused(&mut self, paused: bool) {
        self.paused = paused && self.running;
    }

    pub(crate) fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Take one second off the countdown, saturating at zero.
    /// Returns the time left afterwards.
    pub(crate) fn consume_second(&mut self) -> Duration {
        self.remaining = self.remaining.saturating_sub(Duration::from_secs(1));
        self.remaining
    }
}

impl Default for DurationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Check a duration against the `[30, 3600]`, step-30 rule
pub fn is_valid_total_seconds(value: i64) -> bool {
    (i64::from(MIN_TOTAL_SECONDS)..=i64::from(MAX_TOTAL_SECONDS)).contains(&value)
        && value % i64::from(STEP_SECONDS) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = DurationState::new();
        assert_eq!(state.total_seconds(), 300);
        assert_eq!(state.remaining(), Duration::ZERO);
        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.is_dragging());
        assert_eq!(state.label(), "05:00");
    }

    #[test]
    fn test_persisted_value_validation() {
        assert_eq!(DurationState::with_persisted(Some(600)).total_seconds(), 600);
        assert_eq!(DurationState::with_persisted(Some(3600)).total_seconds(), 3600);
        assert_eq!(DurationState::with_persisted(Some(30)).total_seconds(), 30);
        // Out of range or off-step values fall back to the default
        assert_eq!(DurationState::with_persisted(Some(0)).total_seconds(), 300);
        assert_eq!(DurationState::with_persisted(Some(3630)).total_seconds(), 300);
        assert_eq!(DurationState::with_persisted(Some(45)).total_seconds(), 300);
        assert_eq!(DurationState::with_persisted(Some(-30)).total_seconds(), 300);
        assert_eq!(DurationState::with_persisted(None).total_seconds(), 300);
    }

    #[test]
    fn test_phase_derivation() {
        let mut state = DurationState::new();
        state.set_paused(true);
        assert_eq!(state.phase(), Phase::Idle, "cannot pause an idle session");

        state.begin_session();
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.remaining(), Duration::from_secs(300));

        state.set_paused(true);
        assert_eq!(state.phase(), Phase::Paused);
        assert!(!state.is_ticking());

        state.end_session();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_label_tracks_remaining_while_running() {
        let mut state = DurationState::with_persisted(Some(3600));
        assert_eq!(state.label(), "60:00");
        state.begin_session();
        state.consume_second();
        assert_eq!(state.label(), "59:59");
    }

    #[test]
    fn test_set_total_rejects_invalid_and_unchanged() {
        let mut state = DurationState::new();
        assert!(!state.set_total_seconds(300));
        assert!(!state.set_total_seconds(0));
        assert!(!state.set_total_seconds(31));
        assert!(state.set_total_seconds(330));
        assert_eq!(state.total_seconds(), 330);
    }

    #[test]
    fn test_consume_second_saturates() {
        let mut state = DurationState::with_persisted(Some(30));
        state.begin_session();
        for _ in 0..40 {
            state.consume_second();
        }
        assert_eq!(state.remaining(), Duration::ZERO);
    }
}
