//! Server configuration from flags and environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

/// Value of `VERBOSE` that turns on debug logging.
const VERBOSE_ENABLED: &str = "enabled";

/// Mock Kubernetes TokenReview server for integration tests.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "kubemock",
    about = "Mock Kubernetes TokenReview server",
    version,
    long_about = "kubemock: mock Kubernetes TokenReview server\n\nIssues throwaway service account JWTs on request and answers\ntoken reviews for them from an in-memory registry."
)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "KUBEMOCK_LISTEN_ADDR", default_value = "0.0.0.0:6443")]
    pub listen: SocketAddr,

    /// Deadline in seconds for reading a request body
    #[arg(long, env = "KUBEMOCK_READ_TIMEOUT_SECS", default_value_t = 5)]
    pub read_timeout_secs: u64,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Set to "enabled" to turn on debug logging
    #[arg(long = "verbose-env", env = "VERBOSE", hide = true)]
    verbose_env: Option<String>,
}

impl Config {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// Debug when `--verbose` is passed or `VERBOSE=enabled`, info otherwise.
    pub fn log_level(&self) -> tracing::Level {
        let from_env = self
            .verbose_env
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case(VERBOSE_ENABLED));
        if self.verbose || from_env {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
