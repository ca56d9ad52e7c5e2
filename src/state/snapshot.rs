//! Serializable view of the dial handed to clients

use serde::{Deserialize, Serialize};

use crate::dial::quantizer::Bounds;
use crate::dial::renderer::{dial_radius, render_with, Primitive, RenderOptions};
use super::{DurationState, Phase};

/// What the primary action button does next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerAction {
    Start,
    Stop,
}

/// Everything a client needs to draw the dial and its controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialSnapshot {
    pub total_seconds: u32,
    pub remaining_seconds: u64,
    pub phase: Phase,
    pub dragging: bool,
    /// `MM:SS` text shown in the middle of the dial
    pub label: String,
    pub action: TimerAction,
    pub can_add_time: bool,
    pub can_remove_time: bool,
    pub alarm_ringing: bool,
    pub bounds: Bounds,
    pub radius: f64,
    /// Drawing primitives relative to the dial center
    pub primitives: Vec<Primitive>,
}

impl DialSnapshot {
    pub fn capture(
        state: &DurationState,
        bounds: Bounds,
        alarm_ringing: bool,
        options: RenderOptions,
    ) -> Self {
        let radius = dial_radius(bounds);
        Self {
            total_seconds: state.total_seconds(),
            remaining_seconds: state.remaining().as_secs(),
            phase: state.phase(),
            dragging: state.is_dragging(),
            label: state.label(),
            action: if state.is_running() { TimerAction::Stop } else { TimerAction::Start },
            can_add_time: state.can_add_time(),
            can_remove_time: state.can_remove_time(),
            alarm_ringing,
            bounds,
            radius,
            primitives: render_with(state, radius, options),
        }
    }
}

impl Default for DialSnapshot {
    fn default() -> Self {
        Self::capture(
            &DurationState::new(),
            Bounds::new(0.0, 0.0),
            false,
            RenderOptions::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_snapshot_controls() {
        let state = DurationState::with_persisted(Some(3600));
        let snapshot = DialSnapshot::capture(&state, Bounds::new(300.0, 300.0), false, RenderOptions::default());
        assert_eq!(snapshot.action, TimerAction::Start);
        assert!(!snapshot.can_add_time);
        assert!(snapshot.can_remove_time);
        assert_eq!(snapshot.label, "60:00");
        assert_eq!(snapshot.radius, 135.0);
        assert_eq!(snapshot.phase, Phase::Idle);
    }

    #[test]
    fn test_snapshot_serializes_tagged_primitives() {
        let snapshot = DialSnapshot::capture(
            &DurationState::new(),
            Bounds::new(200.0, 200.0),
            true,
            RenderOptions::default(),
        );
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["phase"], "idle");
        assert_eq!(json["action"], "start");
        assert_eq!(json["alarm_ringing"], true);
        assert_eq!(json["primitives"][0]["kind"], "circle");
        assert_eq!(json["primitives"][0]["color"], "track");
    }
}
