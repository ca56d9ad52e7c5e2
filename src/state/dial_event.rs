//! Events published by the host for notification consumers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DialEvent {
    SessionStarted { at: DateTime<Utc> },
    SessionStopped { at: DateTime<Utc> },
    /// The countdown ran out and the alarm is ringing
    SessionFinished { at: DateTime<Utc> },
    AlarmStopped { at: DateTime<Utc> },
}
