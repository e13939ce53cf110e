//! Locator value types: an immutable description of how to find element(s).
//!
//! A locator never talks to the driver itself; it is carried by element
//! handles so they can be re-found, and printed in assertion failures so a
//! timeout names what was being looked for.

use std::fmt;

/// The selection language a locator expression is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocatorKind {
    /// CSS selector (e.g., "button.primary")
    Css,
    /// XPath expression (e.g., "//button[@id='save']")
    XPath,
}

impl LocatorKind {
    /// Short name used when formatting a locator
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::XPath => "xpath",
        }
    }
}

/// An immutable description of how to find element(s) in a document.
///
/// Two locators are equal iff kind and expression match. Element handles
/// obtained by script traversal (parent/sibling lookup) carry no locator
/// and are not independently re-findable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    kind: LocatorKind,
    expression: String,
}

impl Locator {
    /// Create a CSS locator
    #[must_use]
    pub fn css(expression: impl Into<String>) -> Self {
        Self {
            kind: LocatorKind::Css,
            expression: expression.into(),
        }
    }

    /// Create an XPath locator
    #[must_use]
    pub fn xpath(expression: impl Into<String>) -> Self {
        Self {
            kind: LocatorKind::XPath,
            expression: expression.into(),
        }
    }

    /// Create a text-containment locator (XPath under the hood).
    ///
    /// Matches any element whose text contains `text`, scoped to whatever
    /// search scope it is evaluated in.
    #[must_use]
    pub fn contains_text(text: &str) -> Self {
        Self::xpath(format!("//*[contains(text(), '{text}')]"))
    }

    /// The selection language of this locator
    #[must_use]
    pub const fn kind(&self) -> LocatorKind {
        self.kind
    }

    /// The selector expression
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.kind.as_str(), self.expression)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_css_locator() {
        let locator = Locator::css("button.primary");
        assert_eq!(locator.kind(), LocatorKind::Css);
        assert_eq!(locator.expression(), "button.primary");
    }

    #[test]
    fn test_xpath_locator() {
        let locator = Locator::xpath("//button[@id='save']");
        assert_eq!(locator.kind(), LocatorKind::XPath);
    }

    #[test]
    fn test_contains_text_builds_xpath() {
        let locator = Locator::contains_text("Sign in");
        assert_eq!(locator.kind(), LocatorKind::XPath);
        assert_eq!(locator.expression(), "//*[contains(text(), 'Sign in')]");
    }

    #[test]
    fn test_equality_requires_kind_and_expression() {
        assert_eq!(Locator::css("a"), Locator::css("a"));
        assert_ne!(Locator::css("a"), Locator::xpath("a"));
        assert_ne!(Locator::css("a"), Locator::css("b"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Locator::css("#login").to_string(), "css=#login");
        assert_eq!(Locator::xpath("//a").to_string(), "xpath=//a");
    }

    #[test]
    fn test_hashable() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Locator::css("a"));
        set.insert(Locator::css("a"));
        assert_eq!(set.len(), 1);
    }
}
