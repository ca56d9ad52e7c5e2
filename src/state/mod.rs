//! State management module
//! 
//! This module contains the dial's duration record and the host-side
//! application state that routes requests to it.

pub mod app_state;
pub mod dial_event;
pub mod duration_state;
pub mod snapshot;

// Re-export main types
pub use app_state::AppState;
pub use dial_event::DialEvent;
pub use duration_state::{DurationState, Phase};
pub use snapshot::{DialSnapshot, TimerAction};
