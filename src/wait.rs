//! Explicit waits
//!
//! Every wait polls one locator condition at a fixed interval until it holds
//! or the per-step budget elapses. There is no implicit wait layered
//! underneath; a step's timeout is the whole wait.
//!
//! Evaluation errors during polling are treated as "condition not yet met":
//! mid-navigation the execution context is routinely torn down and the next
//! poll lands on the new document.

use crate::error::{FlowError, Result};
use crate::flow::Step;
use crate::locator::Locator;
use chromiumoxide::Page;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Wait until `locator` matches at least one element
pub async fn wait_for_present(
    page: &Page,
    step: Step,
    locator: &Locator,
    timeout: Duration,
    poll: Duration,
) -> Result<()> {
    wait_for(page, step, locator, locator.presence_expr(), timeout, poll).await
}

/// Wait until `locator` matches an element that is visible and enabled
pub async fn wait_for_clickable(
    page: &Page,
    step: Step,
    locator: &Locator,
    timeout: Duration,
    poll: Duration,
) -> Result<()> {
    wait_for(page, step, locator, locator.clickable_expr(), timeout, poll).await
}

async fn wait_for(
    page: &Page,
    step: Step,
    locator: &Locator,
    condition: String,
    timeout: Duration,
    poll: Duration,
) -> Result<()> {
    let deadline = Instant::now() + timeout;
    debug!("step {}: waiting up to {:?} for {}", step, timeout, locator);

    loop {
        let holds = page
            .evaluate(condition.clone())
            .await
            .ok()
            .and_then(|value| value.into_value::<bool>().ok())
            .unwrap_or(false);

        if holds {
            debug!("step {}: condition met for {}", step, locator);
            return Ok(());
        }

        if Instant::now() >= deadline {
            return Err(FlowError::Timeout {
                step,
                locator: locator.clone(),
                timeout_ms: timeout.as_millis() as u64,
            }
            .into());
        }

        tokio::time::sleep(poll).await;
    }
}
