//! Page interaction
//!
//! Click, type, and count against a resolved locator. CSS locators use the
//! native CDP element APIs; XPath locators go through the locator's
//! JavaScript expressions since CDP selectors are CSS-only.

use crate::error::{Error, FlowError, Result};
use crate::flow::Step;
use crate::locator::{Locator, Strategy};
use chromiumoxide::Page;
use tracing::{debug, instrument};

/// Click the first element matching `locator`
#[instrument(skip(page))]
pub async fn click(page: &Page, step: Step, locator: &Locator) -> Result<()> {
    debug!("step {}: clicking {}", step, locator);

    match locator.strategy() {
        Strategy::Css => {
            let element = page
                .find_element(locator.selector())
                .await
                .map_err(|_| FlowError::ElementNotFound {
                    step,
                    locator: locator.clone(),
                })?;
            element.click().await.map_err(|e| Error::cdp(e.to_string()))?;
        }
        Strategy::XPath => {
            let clicked: bool = page
                .evaluate(locator.click_expr())
                .await?
                .into_value()
                .map_err(|e| Error::cdp(e.to_string()))?;
            if !clicked {
                return Err(FlowError::ElementNotFound {
                    step,
                    locator: locator.clone(),
                }
                .into());
            }
        }
    }

    Ok(())
}

/// Type text into the first element matching `locator`
///
/// The secret path runs through here; the text is never logged.
#[instrument(skip(page, text))]
pub async fn type_text(page: &Page, step: Step, locator: &Locator, text: &str) -> Result<()> {
    debug!("step {}: typing into {}", step, locator);

    match locator.strategy() {
        Strategy::Css => {
            let element = page
                .find_element(locator.selector())
                .await
                .map_err(|_| FlowError::ElementNotFound {
                    step,
                    locator: locator.clone(),
                })?;
            element
                .click()
                .await
                .map_err(|e| Error::cdp(e.to_string()))?;
            element
                .type_str(text)
                .await
                .map_err(|e| Error::cdp(e.to_string()))?;
        }
        Strategy::XPath => {
            let set: bool = page
                .evaluate(locator.set_value_expr(text))
                .await?
                .into_value()
                .map_err(|e| Error::cdp(e.to_string()))?;
            if !set {
                return Err(FlowError::ElementNotFound {
                    step,
                    locator: locator.clone(),
                }
                .into());
            }
        }
    }

    Ok(())
}

/// Snapshot count of `item` matches inside the first `container` match
///
/// The count is recomputed on every call, never cached. A vanished
/// container surfaces as `ElementNotFound` for the container locator.
#[instrument(skip(page))]
pub async fn count_within(
    page: &Page,
    step: Step,
    container: &Locator,
    item: &Locator,
) -> Result<usize> {
    let count: i64 = page
        .evaluate(container.count_within_expr(item))
        .await?
        .into_value()
        .map_err(|e| Error::cdp(e.to_string()))?;

    if count < 0 {
        return Err(FlowError::ElementNotFound {
            step,
            locator: container.clone(),
        }
        .into());
    }

    debug!("step {}: {} matched {} elements", step, item, count);
    Ok(count as usize)
}
