//! The service-request flow
//!
//! A linear state machine over one page: navigate, authenticate, confirm
//! the authenticated chrome, open the App Launcher, follow the Service
//! Requests link, locate the record list, count the records, and assert
//! the count is non-zero. The first failing step aborts the run; there is
//! no retry and no continuation.

use crate::config::ProbeConfig;
use crate::error::{FlowError, Result};
use crate::interact;
use crate::locator::Locator;
use crate::wait::{wait_for_clickable, wait_for_present};
use chromiumoxide::Page;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{info, instrument};

/// Steps of the flow, in execution order
///
/// Carried inside flow errors so a failed run names the step that broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Load the site URL
    Navigate,
    /// Enter credentials and submit the login form
    Authenticate,
    /// Wait for the post-login page marker
    ConfirmAuthenticated,
    /// Click the App Launcher control
    OpenAppLauncher,
    /// Click the Service Requests navigation link
    NavigateToTargetPage,
    /// Wait for the record list container
    LocateListContainer,
    /// Snapshot-count records inside the container
    EnumerateRecords,
    /// Pass iff at least one record was found
    Assert,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Navigate => "Navigate",
            Step::Authenticate => "Authenticate",
            Step::ConfirmAuthenticated => "ConfirmAuthenticated",
            Step::OpenAppLauncher => "OpenAppLauncher",
            Step::NavigateToTargetPage => "NavigateToTargetPage",
            Step::LocateListContainer => "LocateListContainer",
            Step::EnumerateRecords => "EnumerateRecords",
            Step::Assert => "Assert",
        };
        f.write_str(name)
    }
}

/// Outcome of a passing run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowReport {
    /// Number of records found in the list container
    pub records_found: usize,
    /// Wall-clock duration of the whole flow
    pub duration: Duration,
}

impl FlowReport {
    /// One-line pass summary
    pub fn summary(&self) -> String {
        format!("Found {} service request records.", self.records_found)
    }
}

/// Pass iff at least one record matched; the failure names the locator
/// that produced zero matches.
pub fn verdict(records_found: usize, record_locator: &Locator) -> Result<()> {
    if records_found > 0 {
        Ok(())
    } else {
        Err(FlowError::NoRecords {
            locator: record_locator.clone(),
        }
        .into())
    }
}

/// Run the whole flow against an already-launched page
#[instrument(skip(page, config))]
pub async fn run(page: &Page, config: &ProbeConfig) -> Result<FlowReport> {
    let start = Instant::now();
    let locators = &config.locators;
    let timeouts = &config.timeouts;
    let poll = timeouts.poll_interval();

    info!("Starting Experience Cloud service-request flow");

    // 1. Navigate. A network or DNS failure surfaces here, unretried.
    info!("Navigating to {}", config.site_url);
    navigate(page, &config.site_url, timeouts.page_marker()).await?;

    // 2. Authenticate.
    info!("Attempting to log in");
    wait_for_present(
        page,
        Step::Authenticate,
        &locators.username_input,
        timeouts.interactive(),
        poll,
    )
    .await?;
    interact::type_text(
        page,
        Step::Authenticate,
        &locators.username_input,
        &config.credentials.username,
    )
    .await?;
    // Login forms can render their fields in stages; the password input
    // gets its own bounded wait rather than an immediate lookup.
    wait_for_present(
        page,
        Step::Authenticate,
        &locators.password_input,
        timeouts.interactive(),
        poll,
    )
    .await?;
    interact::type_text(
        page,
        Step::Authenticate,
        &locators.password_input,
        &config.credentials.password,
    )
    .await?;
    interact::click(page, Step::Authenticate, &locators.login_button).await?;

    // 3. Confirm the authenticated page rendered.
    wait_for_present(
        page,
        Step::ConfirmAuthenticated,
        &locators.post_login_marker,
        timeouts.page_marker(),
        poll,
    )
    .await?;
    info!("Successfully logged in");

    // 4. Open the App Launcher.
    info!("Opening the App Launcher");
    wait_for_clickable(
        page,
        Step::OpenAppLauncher,
        &locators.app_launcher,
        timeouts.interactive(),
        poll,
    )
    .await?;
    interact::click(page, Step::OpenAppLauncher, &locators.app_launcher).await?;

    // 5. Follow the link to the Service Requests page.
    info!("Navigating to the Service Requests page");
    wait_for_clickable(
        page,
        Step::NavigateToTargetPage,
        &locators.records_page_link,
        timeouts.interactive(),
        poll,
    )
    .await?;
    interact::click(page, Step::NavigateToTargetPage, &locators.records_page_link).await?;

    // 6. Locate the record list container.
    info!("Locating the service request list");
    wait_for_present(
        page,
        Step::LocateListContainer,
        &locators.list_container,
        timeouts.page_marker(),
        poll,
    )
    .await?;

    // 7. Snapshot the records inside the container.
    let records_found = interact::count_within(
        page,
        Step::EnumerateRecords,
        &locators.list_container,
        &locators.record_item,
    )
    .await?;

    // 8. Verdict.
    verdict(records_found, &locators.record_item)?;

    let report = FlowReport {
        records_found,
        duration: start.elapsed(),
    };
    info!("{}", report.summary());
    Ok(report)
}

async fn navigate(page: &Page, url: &str, timeout: Duration) -> Result<()> {
    let nav = page.goto(url);
    tokio::time::timeout(timeout, nav)
        .await
        .map_err(|_| FlowError::NavigationFailed {
            url: url.to_string(),
            reason: format!("page load exceeded {}ms", timeout.as_millis()),
        })?
        .map_err(|e| FlowError::NavigationFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_step_display_order() {
        let steps = [
            Step::Navigate,
            Step::Authenticate,
            Step::ConfirmAuthenticated,
            Step::OpenAppLauncher,
            Step::NavigateToTargetPage,
            Step::LocateListContainer,
            Step::EnumerateRecords,
            Step::Assert,
        ];
        let names: Vec<String> = steps.iter().map(|s| s.to_string()).collect();
        assert_eq!(names[0], "Navigate");
        assert_eq!(names[7], "Assert");
    }

    #[test]
    fn test_verdict_passes_on_nonempty() {
        let locator = Locator::xpath(".//li[contains(@class, 'service-request-item')]");
        assert!(verdict(3, &locator).is_ok());
        assert!(verdict(1, &locator).is_ok());
    }

    #[test]
    fn test_verdict_fails_on_empty() {
        let locator = Locator::xpath(".//li[contains(@class, 'service-request-item')]");
        let err = verdict(0, &locator).unwrap_err();
        assert!(matches!(
            err,
            Error::Flow(FlowError::NoRecords { .. })
        ));
        assert!(err
            .to_string()
            .contains("No service request records were found in the list"));
        assert!(err.to_string().contains("service-request-item"));
    }

    #[test]
    fn test_report_summary() {
        let report = FlowReport {
            records_found: 3,
            duration: Duration::from_secs(12),
        };
        assert_eq!(report.summary(), "Found 3 service request records.");
    }
}
