//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::dial::{Bounds, RenderOptions};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "sessions")]
#[command(about = "A dial countdown timer served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// JSON file the last dial position is stored in
    #[arg(short, long, default_value = "sessions-settings.json")]
    pub settings: PathBuf,

    /// Edge length in pixels of the square dial widget
    #[arg(long, default_value = "300")]
    pub dial_size: f64,

    /// Add outlines around the dial for high contrast themes
    #[arg(long)]
    pub high_contrast: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn dial_bounds(&self) -> Bounds {
        Bounds::new(self.dial_size, self.dial_size)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            high_contrast: self.high_contrast,
        }
    }
}
