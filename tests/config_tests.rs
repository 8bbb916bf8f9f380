//! Configuration loading tests
//!
//! File parsing, environment-override precedence, credential validation,
//! and the default locator set.

use experience_smoke::{Locator, ProbeConfig, Strategy};
use pretty_assertions::assert_eq;

#[test]
fn test_defaults_mirror_the_portal() {
    let config = ProbeConfig::default();

    assert_eq!(config.site_url, "https://login.salesforce.com/");
    assert_eq!(config.locators.username_input, Locator::css("#username"));
    assert_eq!(config.locators.password_input, Locator::css("#password"));
    assert_eq!(
        config.locators.login_button,
        Locator::css("input[name='Login']")
    );
    assert_eq!(
        config.locators.post_login_marker,
        Locator::xpath("//div[contains(@class, 'slds-page-header')]")
    );
    assert_eq!(
        config.locators.app_launcher,
        Locator::xpath("//button[contains(@class, 'slds-context-bar__button')]")
    );
    assert_eq!(
        config.locators.records_page_link,
        Locator::xpath("//a[@title='Service']")
    );
    assert_eq!(config.timeouts.interactive_ms, 20_000);
    assert_eq!(config.timeouts.page_marker_ms, 30_000);
    assert!(config.session.headless);
}

#[test]
fn test_full_file_round_trip() {
    let config = ProbeConfig::from_json(
        r#"{
            "site_url": "https://portal.example.com/s/",
            "credentials": {"username": "probe@example.com", "password": "pw"},
            "session": {"headless": false, "sandbox": false},
            "locators": {
                "list_container": {"strategy": "css", "selector": "div.request-list"},
                "record_item": {"strategy": "css", "selector": "li.request-row"}
            },
            "timeouts": {"interactive_ms": 10000, "page_marker_ms": 15000, "poll_interval_ms": 250}
        }"#,
    )
    .unwrap();

    assert_eq!(config.site_url, "https://portal.example.com/s/");
    assert!(!config.session.headless);
    assert!(!config.session.sandbox);
    assert_eq!(config.locators.list_container.strategy(), Strategy::Css);
    assert_eq!(config.locators.record_item.selector(), "li.request-row");
    assert_eq!(config.timeouts.poll_interval_ms, 250);
    assert!(config.validate().is_ok());
}

#[test]
fn test_env_overrides_win_and_unknown_keys_are_ignored() {
    let mut config = ProbeConfig::from_json(
        r#"{
            "site_url": "https://file.example.com/",
            "credentials": {"username": "file-user", "password": "file-pass"}
        }"#,
    )
    .unwrap();

    config.apply_overrides(vec![
        ("PROBE_SITE_URL".to_string(), "https://env.example.com/".to_string()),
        ("PROBE_PASSWORD".to_string(), "env-pass".to_string()),
        ("PROBE_CHROME_PATH".to_string(), "/opt/chrome".to_string()),
        ("PATH".to_string(), "/usr/bin".to_string()),
    ]);

    assert_eq!(config.site_url, "https://env.example.com/");
    assert_eq!(config.credentials.username, "file-user");
    assert_eq!(config.credentials.password, "env-pass");
    assert_eq!(config.session.chrome_path.as_deref(), Some("/opt/chrome"));
}

#[test]
fn test_missing_credentials_rejected() {
    let config = ProbeConfig::default();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("missing credential"));
}

#[test]
fn test_invalid_json_is_a_parse_error() {
    assert!(ProbeConfig::from_json("{not json").is_err());
}

#[test]
fn test_debug_output_never_contains_password() {
    let mut config = ProbeConfig::default();
    config.credentials.username = "probe@example.com".to_string();
    config.credentials.password = "s3cret-value".to_string();

    let debug = format!("{:?}", config);
    assert!(debug.contains("probe@example.com"));
    assert!(!debug.contains("s3cret-value"));
}
