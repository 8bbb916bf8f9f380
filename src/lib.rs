//! Experience Smoke - Service-Request Portal Smoke Probe
//!
//! This crate drives a headless Chromium browser (over CDP via
//! ChromiumOxide) through one fixed end-to-end flow against a Salesforce
//! Experience Cloud site: log in, open the App Launcher, navigate to the
//! Service Requests page, and assert that at least one record renders in
//! the list container.
//!
//! # Architecture
//!
//! ```text
//! CLI ──▶ ProbeConfig (file + env) ──▶ Session::scoped
//!                                          │
//!                                          ▼
//!                                    Flow Executor
//!                            Navigate ▶ Authenticate ▶ ...
//!                                   │            │
//!                                   ▼            ▼
//!                             explicit waits  interactions
//!                             (poll + budget) (click, type, count)
//! ```
//!
//! The session is released exactly once per run, on every exit path.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use experience_smoke::{flow, ProbeConfig, Session};
//!
//! #[tokio::main]
//! async fn main() -> experience_smoke::Result<()> {
//!     let config = ProbeConfig::load(None)?;
//!     let session_config = config.session.clone();
//!
//!     let report = Session::scoped(session_config, |page| async move {
//!         flow::run(&page, &config).await
//!     })
//!     .await?;
//!
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod flow;
pub mod interact;
pub mod locator;
pub mod session;
pub mod wait;

// Re-exports for convenience
pub use config::{Credentials, LocatorSet, ProbeConfig, Timeouts};
pub use error::{Error, Result};
pub use flow::{FlowReport, Step};
pub use locator::{Locator, Strategy};
pub use session::{Session, SessionConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
