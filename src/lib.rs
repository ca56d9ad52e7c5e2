//! Sessions - a dial countdown timer
//! 
//! The dial turns a pointer angle into a session length between 30
//! seconds and one hour, counts it down once per second and renders the
//! progress as an arc. The engine lives in [`dial`]; the rest of the crate
//! hosts it behind an HTTP API.

pub mod api;
pub mod config;
pub mod dial;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use dial::{DialHooks, InteractionController};
pub use state::{AppState, DurationState};
pub use utils::signals::shutdown_signal;
