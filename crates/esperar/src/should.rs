//! The expectation engine: named, retried boolean checks.
//!
//! `element.should().be_displayed()` polls the corresponding check via the
//! wait engine until it holds or the timeout elapses; exhaustion surfaces
//! as a descriptive assertion failure naming the predicate and the
//! element's locator, never as a raw timeout.

use crate::element::Element;
use crate::result::{EsperarError, EsperarResult, FailureKind};
use crate::wait::Waiter;

/// A retried expectation bound to one element handle.
///
/// Built by [`Element::should`] / [`Element::should_within`]. Each
/// predicate returns the element on success so expectations chain into
/// further commands.
#[derive(Debug)]
pub struct Should<'s> {
    element: Element<'s>,
    waiter: Waiter,
}

impl<'s> Should<'s> {
    pub(crate) fn new(element: Element<'s>, waiter: Waiter) -> Self {
        Self { element, waiter }
    }

    /// Expect the element to exist in the DOM and be visible
    pub fn be_displayed(self) -> EsperarResult<Element<'s>> {
        self.expect("displayed", |element| element.is_displayed())
    }

    /// Expect the element to be checked
    pub fn be_checked(self) -> EsperarResult<Element<'s>> {
        self.expect("checked", |element| element.is_checked())
    }

    /// Expect the element to be clickable (displayed and enabled)
    pub fn be_clickable(self) -> EsperarResult<Element<'s>> {
        self.expect("clickable", |element| {
            Ok(element.is_displayed()? && element.is_enabled()?)
        })
    }

    /// Expect the element to be enabled
    pub fn be_enabled(self) -> EsperarResult<Element<'s>> {
        self.expect("enabled", |element| element.is_enabled())
    }

    /// Expect the element to be disabled
    pub fn be_disabled(self) -> EsperarResult<Element<'s>> {
        self.expect("disabled", |element| Ok(!element.is_enabled()?))
    }

    fn expect<F>(self, predicate: &str, check: F) -> EsperarResult<Element<'s>>
    where
        F: Fn(&Element<'s>) -> EsperarResult<bool>,
    {
        match self.waiter.until_true(|| check(&self.element)) {
            Ok(()) => Ok(self.element),
            Err(error) if error.kind() == FailureKind::Timeout => Err(EsperarError::Assertion {
                message: format!(
                    "Element was not {predicate} - Locator: `{}`",
                    self.element.locator_label()
                ),
            }),
            Err(error) => Err(error),
        }
    }
}
