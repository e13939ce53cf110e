//! Esperar: Fluent Browser Automation Facade
//!
//! Esperar (Spanish: "to wait/hope") wraps a page driver behind a
//! thread-confined fluent API where every element lookup and expectation
//! is implicitly retried until it succeeds or a timeout elapses.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    ESPERAR Architecture                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Session    │    │ Waiter     │    │ PageDriver │            │
//! │   │ (fluent    │───►│ (implicit  │───►│ (browser / │            │
//! │   │  facade)   │    │  retry)    │    │  mock)     │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Finds return [`Element`] handles that stay bound to the locator that
//! produced them, so follow-up commands retried by a [`Waiter`] re-resolve
//! against a live page rather than a cached node. `element.should()`
//! converts retry exhaustion into an assertion failure naming the
//! predicate and the locator.
//!
//! # Example
//!
//! ```
//! use esperar::prelude::*;
//!
//! let page = MockPage::new();
//! page.append(MockNode::new("button").with_attr("id", "go").with_text("Go"));
//!
//! let session = Session::start(Box::new(page));
//! session.get("#go")?.click(false)?;
//! session.get("#go")?.should().be_displayed()?;
//! # Ok::<(), EsperarError>(())
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

mod driver;
mod element;
mod elements;
mod locator;
pub mod logging;
#[allow(clippy::missing_errors_doc)]
pub mod mock;
mod result;
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
mod session;
mod should;
#[allow(clippy::cast_possible_truncation)]
mod wait;

pub use driver::{Cookie, ElementId, PageDriver, Scope, ScriptArg, ScriptValue};
pub use element::Element;
pub use elements::Elements;
pub use locator::{Locator, LocatorKind};
pub use mock::{MockNode, MockPage};
pub use result::{EsperarError, EsperarResult, FailureKind};
pub use session::Session;
pub use should::Should;
pub use wait::{Waiter, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_SECS};

/// Convenience re-exports for test and page-object code
pub mod prelude {
    pub use crate::driver::{Cookie, ElementId, PageDriver, Scope, ScriptArg, ScriptValue};
    pub use crate::element::Element;
    pub use crate::elements::Elements;
    pub use crate::locator::{Locator, LocatorKind};
    pub use crate::mock::{MockNode, MockPage};
    pub use crate::result::{EsperarError, EsperarResult, FailureKind};
    pub use crate::session::Session;
    pub use crate::should::Should;
    pub use crate::wait::Waiter;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod facade_smoke_tests {
        use super::*;

        #[test]
        fn test_start_find_click_quit() {
            let page = MockPage::new();
            let button = page.append(MockNode::new("button").with_attr("id", "go"));
            let session = Session::start(Box::new(page));

            session.get("#go").unwrap().click(false).unwrap();

            let driver = session.driver();
            assert_eq!(driver.tag_name(&button).unwrap(), "button");
            session.quit().unwrap();
        }

        #[test]
        fn test_prelude_covers_public_surface() {
            use crate::prelude::*;

            let waiter = Waiter::new(2);
            assert_eq!(waiter.timeout().as_secs(), 2);
            let locator = Locator::css("#x");
            assert_eq!(locator.kind(), LocatorKind::Css);
        }
    }
}
