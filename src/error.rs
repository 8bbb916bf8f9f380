//! Error types for the smoke probe
//!
//! This module provides the error hierarchy using `thiserror`. Session
//! errors are environmental and fatal; flow errors describe which step of
//! the portal flow failed and are rendered as a single test-failure line at
//! the binary boundary.

use crate::flow::Step;
use crate::locator::Locator;
use thiserror::Error;

/// The main error type for smoke probe operations
#[derive(Error, Debug)]
pub enum Error {
    /// Browser session lifecycle errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Flow execution errors (timeouts, missing elements, failed assertion)
    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ChromiumOxide errors
    #[error("CDP error: {0}")]
    Cdp(String),
}

/// Browser session lifecycle errors
///
/// These correspond to environment problems (no Chrome binary, bad launch
/// flags) rather than flow outcomes. They are never converted into a test
/// verdict; they abort the run as-is.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Failed to launch the browser process
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Invalid launch configuration
    #[error("Invalid session configuration: {0}")]
    ConfigError(String),

    /// Failed to open the probe page
    #[error("Failed to open page: {0}")]
    PageCreationFailed(String),

    /// Browser did not shut down cleanly
    #[error("Failed to close browser: {0}")]
    CloseFailed(String),
}

/// Flow execution errors
///
/// Every variant carries the step it originated from and the locator
/// involved, so a failed run reports exactly which wait or lookup broke.
#[derive(Error, Debug)]
pub enum FlowError {
    /// An expected UI condition did not occur within its bounded wait
    #[error("step {step} timed out after {timeout_ms}ms waiting for {locator}")]
    Timeout {
        /// Step that was waiting
        step: Step,
        /// Locator the wait was polling
        locator: Locator,
        /// Bounded wait that elapsed
        timeout_ms: u64,
    },

    /// A locator resolved to zero elements when one was required
    #[error("step {step}: no element matched {locator}")]
    ElementNotFound {
        /// Step that performed the lookup
        step: Step,
        /// Locator that matched nothing
        locator: Locator,
    },

    /// The initial page load failed (network, DNS, bad URL)
    #[error("failed to load {url}: {reason}")]
    NavigationFailed {
        /// URL that did not load
        url: String,
        /// Underlying failure
        reason: String,
    },

    /// The record list rendered but contained zero records
    #[error("No service request records were found in the list (locator: {locator})")]
    NoRecords {
        /// Per-record locator that produced zero matches
        locator: Locator,
    },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config file {path}: {source}")]
    ReadFailed {
        /// Path that was attempted
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Config file is not valid JSON for the expected schema
    #[error("invalid config file {path}: {source}")]
    ParseFailed {
        /// Path that was parsed
        path: String,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// A required credential is absent from both file and environment
    #[error("missing credential: {0} (set PROBE_USERNAME/PROBE_PASSWORD or add credentials to the config file)")]
    MissingCredential(&'static str),
}

/// Result type alias for smoke probe operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a CDP error from a string
    pub fn cdp<S: Into<String>>(msg: S) -> Self {
        Error::Cdp(msg.into())
    }

    /// True if this error is an expected flow failure (timeout, missing
    /// element, empty list) rather than an environment or harness problem.
    pub fn is_flow_failure(&self) -> bool {
        matches!(self, Error::Flow(_))
    }
}

/// Convert chromiumoxide errors
impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}
