//! Host collaborators module
//! 
//! This module contains the pieces the dial core talks to through its
//! hooks: the settings file, the alarm and the event publisher.

pub mod alarm;
pub mod hooks;
pub mod settings;

// Re-export main types
pub use alarm::Alarm;
pub use hooks::HostHooks;
pub use settings::{JsonSettings, Settings, SettingsError};
