//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;
use tracing::warn;

use crate::tracker::TrackerConfig;

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "idle-sentinel")]
#[command(about = "A state-managed HTTP service for tracking user session idleness")]
#[command(version = "1.1.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20877")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Inactivity duration in seconds before the session goes idle
    #[arg(short, long, default_value = "900")]
    pub timeout: u64,

    /// Lead time in seconds before idle at which the warning fires
    #[arg(short, long, default_value = "300")]
    pub warning: u64,

    /// Minimum spacing in milliseconds between processed activity events
    #[arg(long, default_value = "1000")]
    pub throttle_ms: u64,

    /// Start with tracking disabled
    #[arg(long)]
    pub disabled: bool,

    /// Shell command to run when the session goes idle
    #[arg(long)]
    pub on_idle_cmd: Option<String>,

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

    /// Tracker configuration derived from the CLI arguments
    pub fn tracker(&self) -> TrackerConfig {
        TrackerConfig {
            timeout: Duration::from_secs(self.timeout),
            warning_time: Duration::from_secs(self.warning),
            throttle: Duration::from_millis(self.throttle_ms),
            disabled: self.disabled,
        }
    }

    /// Log degenerate but accepted configurations at startup
    pub fn warn_on_degenerate_values(&self) {
        if self.timeout == 0 {
            warn!("Timeout is 0s: the session goes idle on the first scheduling pass");
        }
        if self.warning >= self.timeout {
            warn!(
                "Warning lead ({}s) covers the whole timeout ({}s): no warning will fire",
                self.warning, self.timeout
            );
        }
    }
}
