//! Locator model
//!
//! A locator is an immutable (strategy, selector) pair identifying one UI
//! element. Locators render the JavaScript expressions the wait and
//! interaction layers evaluate over CDP: presence, clickability, click, and
//! counting within a container. CSS locators can also be resolved natively through
//! `Page::find_element`; XPath locators always go through `document.evaluate`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Element resolution strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// CSS selector, resolved with `querySelector`
    Css,
    /// XPath expression, resolved with `document.evaluate`
    XPath,
}

/// A (strategy, selector) pair identifying a UI element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    strategy: Strategy,
    selector: String,
}

impl Locator {
    /// Create a CSS locator
    pub fn css<S: Into<String>>(selector: S) -> Self {
        Self {
            strategy: Strategy::Css,
            selector: selector.into(),
        }
    }

    /// Create an XPath locator
    pub fn xpath<S: Into<String>>(selector: S) -> Self {
        Self {
            strategy: Strategy::XPath,
            selector: selector.into(),
        }
    }

    /// The resolution strategy
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The raw selector string
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Selector quoted as a JavaScript string literal
    fn js_literal(&self) -> String {
        format!("{:?}", self.selector)
    }

    /// Expression evaluating to the first matching element, or null
    pub fn node_expr(&self) -> String {
        match self.strategy {
            Strategy::Css => format!("document.querySelector({})", self.js_literal()),
            Strategy::XPath => format!(
                "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
                self.js_literal()
            ),
        }
    }

    /// Expression evaluating to true iff at least one element matches
    pub fn presence_expr(&self) -> String {
        format!("({}) !== null", self.node_expr())
    }

    /// Expression evaluating to true iff the element is present, visible,
    /// and not disabled (the clickability condition used by interactive
    /// waits).
    pub fn clickable_expr(&self) -> String {
        format!(
            "(() => {{ const n = {}; return !!(n && !n.disabled && n.getClientRects().length > 0); }})()",
            self.node_expr()
        )
    }

    /// Expression that clicks the element if present; evaluates to true on
    /// click, false when no element matched.
    pub fn click_expr(&self) -> String {
        format!(
            "(() => {{ const n = {}; if (!n) return false; n.click(); return true; }})()",
            self.node_expr()
        )
    }

    /// Expression that focuses the element and sets its value, dispatching
    /// input/change events so framework listeners fire; evaluates to true on
    /// success, false when no element matched.
    pub fn set_value_expr(&self, text: &str) -> String {
        format!(
            "(() => {{ const n = {}; if (!n) return false; n.focus(); n.value = {:?}; \
             n.dispatchEvent(new Event('input', {{bubbles: true}})); \
             n.dispatchEvent(new Event('change', {{bubbles: true}})); return true; }})()",
            self.node_expr(),
            text
        )
    }

    /// Expression counting `item` matches inside the first element matching
    /// `self`; evaluates to -1 when the container itself is missing.
    ///
    /// Relative XPath items (`.//...`) are evaluated with the container as
    /// context node.
    pub fn count_within_expr(&self, item: &Locator) -> String {
        let inner = match item.strategy {
            Strategy::Css => format!("c.querySelectorAll({}).length", item.js_literal()),
            Strategy::XPath => format!(
                "document.evaluate({}, c, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength",
                item.js_literal()
            ),
        };
        format!(
            "(() => {{ const c = {}; if (!c) return -1; return {}; }})()",
            self.node_expr(),
            inner
        )
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.strategy {
            Strategy::Css => write!(f, "css={}", self.selector),
            Strategy::XPath => write!(f, "xpath={}", self.selector),
        }
    }
}
