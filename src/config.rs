//! Probe configuration
//!
//! Site URL, credentials, locators, and wait timeouts are injected
//! configuration, never literals in the flow. Values come from an optional
//! JSON config file with environment-variable overrides layered on top, so
//! credentials can stay out of the file entirely.
//!
//! Environment overrides: `PROBE_SITE_URL`, `PROBE_USERNAME`,
//! `PROBE_PASSWORD`, `PROBE_HEADLESS`, `PROBE_CHROME_PATH`.

use crate::error::{ConfigError, Result};
use crate::locator::Locator;
use crate::session::SessionConfig;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Login credentials, held in process memory only
///
/// The secret is redacted from `Debug` output so it can never leak through
/// logs or error reports.
#[derive(Clone, Default, Deserialize)]
pub struct Credentials {
    /// Login identifier (username/email)
    pub username: String,
    /// Login secret
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Every element the flow touches, one locator per target
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LocatorSet {
    /// Username input on the login form
    pub username_input: Locator,
    /// Password input on the login form
    pub password_input: Locator,
    /// Login submit control
    pub login_button: Locator,
    /// Element that only renders once authenticated
    pub post_login_marker: Locator,
    /// App Launcher control (the grid of nine dots)
    pub app_launcher: Locator,
    /// Navigation link to the Service Requests page
    pub records_page_link: Locator,
    /// Container wrapping the record list
    pub list_container: Locator,
    /// A single record within the container
    pub record_item: Locator,
}

impl Default for LocatorSet {
    fn default() -> Self {
        Self {
            username_input: Locator::css("#username"),
            password_input: Locator::css("#password"),
            login_button: Locator::css("input[name='Login']"),
            post_login_marker: Locator::xpath("//div[contains(@class, 'slds-page-header')]"),
            app_launcher: Locator::xpath("//button[contains(@class, 'slds-context-bar__button')]"),
            records_page_link: Locator::xpath("//a[@title='Service']"),
            list_container: Locator::xpath(
                "//div[contains(@class, 'service-request-list-container')]",
            ),
            record_item: Locator::xpath(".//li[contains(@class, 'service-request-item')]"),
        }
    }
}

/// Per-step explicit wait budgets
///
/// There is no implicit wait; every step composes exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Wait budget for interactive controls (ms)
    pub interactive_ms: u64,
    /// Wait budget for page-load-dependent markers (ms)
    pub page_marker_ms: u64,
    /// Fixed poll interval for all waits (ms)
    pub poll_interval_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            interactive_ms: 20_000,
            page_marker_ms: 30_000,
            poll_interval_ms: 500,
        }
    }
}

impl Timeouts {
    /// Wait budget for interactive controls
    pub fn interactive(&self) -> Duration {
        Duration::from_millis(self.interactive_ms)
    }

    /// Wait budget for page-load-dependent markers
    pub fn page_marker(&self) -> Duration {
        Duration::from_millis(self.page_marker_ms)
    }

    /// Poll interval shared by all waits
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Complete probe configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Entry URL of the Experience Cloud site
    pub site_url: String,
    /// Login credentials
    pub credentials: Credentials,
    /// Browser session options
    pub session: SessionConfig,
    /// Element locators
    pub locators: LocatorSet,
    /// Explicit wait budgets
    pub timeouts: Timeouts,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            site_url: "https://login.salesforce.com/".to_string(),
            credentials: Credentials::default(),
            session: SessionConfig::default(),
            locators: LocatorSet::default(),
            timeouts: Timeouts::default(),
        }
    }
}

impl ProbeConfig {
    /// Parse a config from a JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load configuration: file (when given) -> defaults, then environment
    /// overrides, then credential validation.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => {
                let text =
                    std::fs::read_to_string(p).map_err(|source| ConfigError::ReadFailed {
                        path: p.display().to_string(),
                        source,
                    })?;
                Self::from_json(&text).map_err(|source| ConfigError::ParseFailed {
                    path: p.display().to_string(),
                    source,
                })?
            }
            None => Self::default(),
        };
        config.apply_overrides(std::env::vars());
        config.validate()?;
        Ok(config)
    }

    /// Apply `PROBE_*` overrides from the given variable set
    ///
    /// Separated from `std::env` so override precedence is testable without
    /// mutating process state.
    pub fn apply_overrides<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            match key.as_str() {
                "PROBE_SITE_URL" => self.site_url = value,
                "PROBE_USERNAME" => self.credentials.username = value,
                "PROBE_PASSWORD" => self.credentials.password = value,
                "PROBE_HEADLESS" => {
                    if let Some(flag) = parse_bool(&value) {
                        self.session.headless = flag;
                    }
                }
                "PROBE_CHROME_PATH" => self.session.chrome_path = Some(value),
                _ => {}
            }
        }
    }

    /// Ensure both credentials are present after overrides
    pub fn validate(&self) -> Result<()> {
        if self.credentials.username.is_empty() {
            return Err(ConfigError::MissingCredential("username").into());
        }
        if self.credentials.password.is_empty() {
            return Err(ConfigError::MissingCredential("password").into());
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Strategy;

    #[test]
    fn test_default_locators_match_portal() {
        let locators = LocatorSet::default();
        assert_eq!(locators.username_input, Locator::css("#username"));
        assert_eq!(locators.login_button, Locator::css("input[name='Login']"));
        assert_eq!(locators.app_launcher.strategy(), Strategy::XPath);
        assert!(locators
            .record_item
            .selector()
            .starts_with(".//"));
    }

    #[test]
    fn test_default_timeouts() {
        let timeouts = Timeouts::default();
        assert_eq!(timeouts.interactive(), Duration::from_secs(20));
        assert_eq!(timeouts.page_marker(), Duration::from_secs(30));
        assert_eq!(timeouts.poll_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials {
            username: "probe@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{:?}", creds);
        assert!(debug.contains("probe@example.com"));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_from_json_partial_file_keeps_defaults() {
        let config = ProbeConfig::from_json(
            r#"{
                "site_url": "https://portal.example.com/",
                "credentials": {"username": "u@example.com", "password": "pw"},
                "timeouts": {"interactive_ms": 5000}
            }"#,
        )
        .unwrap();

        assert_eq!(config.site_url, "https://portal.example.com/");
        assert_eq!(config.timeouts.interactive_ms, 5000);
        // Unspecified sections fall back to defaults.
        assert_eq!(config.timeouts.page_marker_ms, 30_000);
        assert_eq!(config.locators, LocatorSet::default());
    }

    #[test]
    fn test_locator_override_in_file() {
        let config = ProbeConfig::from_json(
            r#"{
                "locators": {
                    "records_page_link": {"strategy": "xpath", "selector": "//a[@title='Support']"}
                }
            }"#,
        )
        .unwrap();
        assert_eq!(
            config.locators.records_page_link,
            Locator::xpath("//a[@title='Support']")
        );
        assert_eq!(config.locators.username_input, Locator::css("#username"));
    }

    #[test]
    fn test_env_overrides_beat_file_values() {
        let mut config = ProbeConfig::from_json(
            r#"{"credentials": {"username": "file-user", "password": "file-pass"}}"#,
        )
        .unwrap();

        config.apply_overrides(vec![
            ("PROBE_USERNAME".to_string(), "env-user".to_string()),
            ("PROBE_HEADLESS".to_string(), "false".to_string()),
            ("UNRELATED".to_string(), "ignored".to_string()),
        ]);

        assert_eq!(config.credentials.username, "env-user");
        assert_eq!(config.credentials.password, "file-pass");
        assert!(!config.session.headless);
    }

    #[test]
    fn test_validate_requires_credentials() {
        let mut config = ProbeConfig::default();
        assert!(config.validate().is_err());

        config.credentials.username = "u".to_string();
        assert!(config.validate().is_err());

        config.credentials.password = "p".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_bool_values() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool("maybe"), None);
    }
}
