//! The session facade: per-thread entry point over one driver.
//!
//! A [`Session`] owns exactly one [`PageDriver`] and the default [`Waiter`]
//! for the thread that created it. All top-level finds route through the
//! wait engine; one-shot accessors (navigation, title, cookies, window
//! management) pass straight through with no retry semantics.
//!
//! The session is thread-confined by contract: it must not outlive the
//! thread that created it and no two threads may share one. Starting a
//! second session without quitting the first leaks the prior driver; that
//! is deliberately a caller responsibility, not guarded here.

use std::borrow::Cow;

use tracing::{debug, info};

use crate::driver::{Cookie, ElementId, PageDriver, Scope, ScriptArg, ScriptValue};
use crate::element::Element;
use crate::elements::Elements;
use crate::locator::Locator;
use crate::result::{EsperarError, EsperarResult, FailureKind};
use crate::wait::Waiter;

/// Thread-confined facade owning one browser session and its default waiter
pub struct Session {
    driver: Box<dyn PageDriver>,
    waiter: Waiter,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("waiter", &self.waiter)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Start a session over the given driver with the default 10s waiter
    #[must_use]
    pub fn start(driver: Box<dyn PageDriver>) -> Self {
        Self::start_with(driver, Waiter::default())
    }

    /// Start a session with a custom default waiter
    #[must_use]
    pub fn start_with(driver: Box<dyn PageDriver>, waiter: Waiter) -> Self {
        info!(timeout_ms = waiter.timeout().as_millis() as u64, "session started");
        Self { driver, waiter }
    }

    /// The underlying driver
    #[must_use]
    pub fn driver(&self) -> &dyn PageDriver {
        self.driver.as_ref()
    }

    /// The session's default waiter
    #[must_use]
    pub const fn default_waiter(&self) -> &Waiter {
        &self.waiter
    }

    /// Resolve a per-call timeout to a waiter.
    ///
    /// `secs <= 0` returns the session's current default waiter by
    /// reference without constructing a new one (the ignore-list is not
    /// consulted on that path; a negative value is explicitly not an
    /// error). `secs >= 1` builds a waiter with exactly that timeout,
    /// inheriting `ignored` from the call.
    #[must_use]
    pub fn waiter(&self, secs: i64, ignored: &[FailureKind]) -> Cow<'_, Waiter> {
        if secs <= 0 {
            Cow::Borrowed(&self.waiter)
        } else {
            Cow::Owned(
                Waiter::new(secs as u64)
                    .with_poll_interval(self.waiter.poll_interval().as_millis() as u64)
                    .with_ignored(ignored),
            )
        }
    }

    /// Alias for [`Session::waiter`], the public custom-wait entry point
    #[must_use]
    pub fn wait(&self, secs: i64, ignored: &[FailureKind]) -> Cow<'_, Waiter> {
        self.waiter(secs, ignored)
    }

    // =========================================================================
    // FINDING ELEMENTS
    // =========================================================================

    /// Find the element matching the CSS selector, polling with the
    /// default waiter
    pub fn get(&self, css: &str) -> EsperarResult<Element<'_>> {
        self.resolve_one(Locator::css(css), -1)
    }

    /// [`Session::get`] with a per-call timeout in seconds (`<= 0` uses the
    /// default waiter)
    pub fn get_within(&self, css: &str, secs: i64) -> EsperarResult<Element<'_>> {
        self.resolve_one(Locator::css(css), secs)
    }

    /// Find the element matching the XPath expression
    pub fn xpath(&self, xpath: &str) -> EsperarResult<Element<'_>> {
        self.resolve_one(Locator::xpath(xpath), -1)
    }

    /// [`Session::xpath`] with a per-call timeout in seconds
    pub fn xpath_within(&self, xpath: &str, secs: i64) -> EsperarResult<Element<'_>> {
        self.resolve_one(Locator::xpath(xpath), secs)
    }

    /// Find the element that contains the given text
    pub fn contains(&self, text: &str) -> EsperarResult<Element<'_>> {
        self.resolve_one(Locator::contains_text(text), -1)
    }

    /// [`Session::contains`] with a per-call timeout in seconds
    pub fn contains_within(&self, text: &str, secs: i64) -> EsperarResult<Element<'_>> {
        self.resolve_one(Locator::contains_text(text), secs)
    }

    /// Find the elements matching the CSS selector.
    ///
    /// With `at_least_one`, polls until the count is >= 1; otherwise
    /// returns immediately, possibly empty.
    pub fn find(&self, css: &str, at_least_one: bool) -> EsperarResult<Elements<'_>> {
        self.resolve_all(Locator::css(css), at_least_one, -1)
    }

    /// [`Session::find`] with a per-call timeout in seconds
    pub fn find_within(
        &self,
        css: &str,
        at_least_one: bool,
        secs: i64,
    ) -> EsperarResult<Elements<'_>> {
        self.resolve_all(Locator::css(css), at_least_one, secs)
    }

    /// Find the elements matching the XPath expression
    pub fn find_xpath(&self, xpath: &str, at_least_one: bool) -> EsperarResult<Elements<'_>> {
        self.resolve_all(Locator::xpath(xpath), at_least_one, -1)
    }

    /// [`Session::find_xpath`] with a per-call timeout in seconds
    pub fn find_xpath_within(
        &self,
        xpath: &str,
        at_least_one: bool,
        secs: i64,
    ) -> EsperarResult<Elements<'_>> {
        self.resolve_all(Locator::xpath(xpath), at_least_one, secs)
    }

    fn resolve_one(&self, locator: Locator, secs: i64) -> EsperarResult<Element<'_>> {
        let waiter = self.waiter(secs, &[]);
        let id = waiter.until(|| self.driver.find_one(&Scope::Document, &locator))?;
        Ok(Element::new(self, id, Some(locator)))
    }

    fn resolve_all(
        &self,
        locator: Locator,
        at_least_one: bool,
        secs: i64,
    ) -> EsperarResult<Elements<'_>> {
        let ids = if at_least_one {
            let waiter = self.waiter(secs, &[]);
            waiter.until(|| {
                let found = self.driver.find_all(&Scope::Document, &locator)?;
                if found.is_empty() {
                    Err(EsperarError::NotFound {
                        locator: locator.to_string(),
                    })
                } else {
                    Ok(found)
                }
            })?
        } else {
            self.driver.find_all(&Scope::Document, &locator)?
        };
        let shared = Some(locator);
        let items = ids
            .into_iter()
            .map(|id| Element::new(self, id, shared.clone()))
            .collect();
        Ok(Elements::new(shared, items))
    }

    /// Wrap a raw driver reference in an element handle.
    ///
    /// The handle carries no locator and is not independently re-findable;
    /// intended for ids returned by custom scripts.
    #[must_use]
    pub fn element_for(&self, id: ElementId) -> Element<'_> {
        Element::new(self, id, None)
    }

    // =========================================================================
    // ONE-SHOT PASS-THROUGHS (no retry semantics)
    // =========================================================================

    /// Navigate to the given URL
    pub fn visit(&self, url: &str) -> EsperarResult<&Self> {
        debug!(url, "navigating");
        self.driver.navigate(url)?;
        Ok(self)
    }

    /// The current URL
    pub fn url(&self) -> EsperarResult<String> {
        self.driver.current_url()
    }

    /// The current page title
    pub fn title(&self) -> EsperarResult<String> {
        self.driver.title()
    }

    /// Run a script in page context
    pub fn execute(&self, script: &str, args: &[ScriptArg]) -> EsperarResult<ScriptValue> {
        self.driver.execute(script, args)
    }

    /// Maximize the window
    pub fn maximize(&self) -> EsperarResult<&Self> {
        self.driver.maximize()?;
        Ok(self)
    }

    /// Enumerate open window handles
    pub fn window_handles(&self) -> EsperarResult<Vec<String>> {
        self.driver.window_handles()
    }

    /// Read a cookie by name
    pub fn cookie(&self, name: &str) -> EsperarResult<Option<Cookie>> {
        self.driver.cookie(name)
    }

    /// Set a cookie
    pub fn set_cookie(&self, cookie: Cookie) -> EsperarResult<&Self> {
        self.driver.set_cookie(cookie)?;
        Ok(self)
    }

    /// Delete a cookie by name
    pub fn delete_cookie(&self, name: &str) -> EsperarResult<&Self> {
        self.driver.delete_cookie(name)?;
        Ok(self)
    }

    /// Delete all cookies
    pub fn delete_all_cookies(&self) -> EsperarResult<&Self> {
        self.driver.delete_all_cookies()?;
        Ok(self)
    }

    /// Tear down the session, consuming it
    pub fn quit(self) -> EsperarResult<()> {
        info!("session quitting");
        self.driver.quit()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::{MockNode, MockPage};
    use proptest::prelude::*;

    fn empty_session() -> Session {
        Session::start(Box::new(MockPage::new()))
    }

    mod waiter_resolution_tests {
        use super::*;

        #[test]
        fn test_zero_timeout_borrows_default_waiter() {
            let session = empty_session();
            let waiter = session.waiter(0, &[]);
            assert!(std::ptr::eq(waiter.as_ref(), session.default_waiter()));
        }

        #[test]
        fn test_negative_timeout_borrows_default_waiter() {
            let session = empty_session();
            let waiter = session.waiter(-5, &[]);
            assert!(std::ptr::eq(waiter.as_ref(), session.default_waiter()));
        }

        #[test]
        fn test_negative_timeout_ignores_ignore_list() {
            // Custom ignore kinds only apply when a new waiter is built
            let session = empty_session();
            let waiter = session.waiter(-1, &[FailureKind::Driver]);
            assert!(std::ptr::eq(waiter.as_ref(), session.default_waiter()));
            assert!(waiter.ignored().is_empty());
        }

        #[test]
        fn test_positive_timeout_builds_owned_waiter() {
            let session = empty_session();
            let waiter = session.waiter(3, &[FailureKind::Driver]);
            assert!(!std::ptr::eq(waiter.as_ref(), session.default_waiter()));
            assert_eq!(waiter.timeout(), std::time::Duration::from_secs(3));
            assert_eq!(waiter.ignored(), &[FailureKind::Driver]);
        }

        #[test]
        fn test_owned_waiter_inherits_poll_interval() {
            let session = Session::start_with(
                Box::new(MockPage::new()),
                Waiter::default().with_poll_interval(25),
            );
            let waiter = session.waiter(2, &[]);
            assert_eq!(waiter.poll_interval(), std::time::Duration::from_millis(25));
        }

        proptest! {
            #[test]
            fn prop_non_positive_always_borrows(secs in i64::MIN..=0i64) {
                let session = empty_session();
                let waiter = session.waiter(secs, &[]);
                prop_assert!(std::ptr::eq(waiter.as_ref(), session.default_waiter()));
            }

            #[test]
            fn prop_positive_timeout_is_exact(secs in 1i64..=3600) {
                let session = empty_session();
                let waiter = session.waiter(secs, &[]);
                prop_assert_eq!(
                    waiter.timeout(),
                    std::time::Duration::from_secs(secs as u64)
                );
            }
        }
    }

    mod find_tests {
        use super::*;

        #[test]
        fn test_get_binds_locator() {
            let page = MockPage::new();
            page.append(MockNode::new("button").with_attr("id", "go"));
            let session = Session::start(Box::new(page));
            let element = session.get("#go").unwrap();
            assert_eq!(element.locator().unwrap().expression(), "#go");
        }

        #[test]
        fn test_find_without_at_least_one_returns_empty() {
            let session = empty_session();
            let found = session.find(".missing", false).unwrap();
            assert!(found.is_empty());
        }

        #[test]
        fn test_find_members_share_locator() {
            let page = MockPage::new();
            let list = page.append(MockNode::new("ul"));
            page.append_to(&list, MockNode::new("li"));
            page.append_to(&list, MockNode::new("li"));
            let session = Session::start(Box::new(page));
            let found = session.find("li", true).unwrap();
            assert_eq!(found.len(), 2);
            for element in &found {
                assert_eq!(element.locator().unwrap().expression(), "li");
            }
        }

        #[test]
        fn test_element_for_has_no_locator() {
            let page = MockPage::new();
            let id = page.append(MockNode::new("div"));
            let session = Session::start(Box::new(page));
            let element = session.element_for(id);
            assert!(element.locator().is_none());
        }
    }

    mod pass_through_tests {
        use super::*;
        use crate::driver::Cookie;

        #[test]
        fn test_visit_and_url() {
            let session = empty_session();
            session.visit("https://example.test/login").unwrap();
            assert_eq!(session.url().unwrap(), "https://example.test/login");
        }

        #[test]
        fn test_title() {
            let page = MockPage::new();
            page.set_title("Dashboard");
            let session = Session::start(Box::new(page));
            assert_eq!(session.title().unwrap(), "Dashboard");
        }

        #[test]
        fn test_cookie_round_trip() {
            let session = empty_session();
            session
                .set_cookie(Cookie::new("token", "abc123"))
                .unwrap()
                .set_cookie(Cookie::new("theme", "dark"))
                .unwrap();
            assert_eq!(session.cookie("token").unwrap().unwrap().value, "abc123");
            session.delete_cookie("token").unwrap();
            assert!(session.cookie("token").unwrap().is_none());
            session.delete_all_cookies().unwrap();
            assert!(session.cookie("theme").unwrap().is_none());
        }

        #[test]
        fn test_window_handles() {
            let session = empty_session();
            assert_eq!(session.window_handles().unwrap(), vec!["main".to_string()]);
        }
    }
}
