//! The driver boundary: what this crate requires from a browser-session layer.
//!
//! Everything above this trait is protocol-agnostic. A [`PageDriver`]
//! implementation owns the wire protocol (WebDriver, CDP, an in-memory fake)
//! and exposes synchronous find/act/script commands over opaque element
//! references. The fluent layer never retries inside the driver; retry
//! semantics live entirely in [`crate::wait::Waiter`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::locator::Locator;
use crate::result::EsperarResult;

/// Opaque reference to one remote document element.
///
/// The association is weak: the remote node may detach at any time, after
/// which every command taking this id fails with a stale condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(String);

impl ElementId {
    /// Create an element id from the driver's wire representation
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The wire representation
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Search scope for a find command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Search the whole document
    Document,
    /// Search the subtree (descendants) of one element
    Within(ElementId),
}

/// A positional argument passed to an injected script
#[derive(Debug, Clone)]
pub enum ScriptArg {
    /// An element reference, bound as a live node in page context
    Node(ElementId),
    /// A plain JSON value
    Json(serde_json::Value),
}

/// The value an injected script evaluated to
#[derive(Debug, Clone)]
pub enum ScriptValue {
    /// A plain JSON value (null, bool, number, string, array, object)
    Json(serde_json::Value),
    /// A single node reference
    Node(ElementId),
    /// An ordered list of node references (document order)
    Nodes(Vec<ElementId>),
}

impl ScriptValue {
    /// The JSON value, if this is a plain value
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// True if the script returned JSON null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Json(serde_json::Value::Null))
    }
}

/// A browser cookie (pass-through surface, no retry semantics)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
}

impl Cookie {
    /// Create a cookie
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Capability contract this crate requires from the browser-session layer.
///
/// All commands are synchronous and take `&self`; implementations use
/// interior mutability where they track state. Find commands report absence
/// as [`crate::result::EsperarError::NotFound`] (single) or an empty vec
/// (multi); commands on a detached node report
/// [`crate::result::EsperarError::Stale`].
pub trait PageDriver {
    /// Find the first element matching `locator` within `scope`
    fn find_one(&self, scope: &Scope, locator: &Locator) -> EsperarResult<ElementId>;

    /// Find all elements matching `locator` within `scope`, in document
    /// order; never fails on zero matches
    fn find_all(&self, scope: &Scope, locator: &Locator) -> EsperarResult<Vec<ElementId>>;

    /// Run a script in page context with the given positional arguments
    fn execute(&self, script: &str, args: &[ScriptArg]) -> EsperarResult<ScriptValue>;

    /// Standard pointer click; fails if the element is not interactable
    fn click(&self, id: &ElementId) -> EsperarResult<()>;

    /// Pointer double-click at the element's position
    fn double_click(&self, id: &ElementId) -> EsperarResult<()>;

    /// Pointer right-click at the element's position
    fn context_click(&self, id: &ElementId) -> EsperarResult<()>;

    /// Move the pointer over the element
    fn hover(&self, id: &ElementId) -> EsperarResult<()>;

    /// Send keystrokes to the element
    fn type_text(&self, id: &ElementId, text: &str) -> EsperarResult<()>;

    /// Submit the form the element belongs to
    fn submit(&self, id: &ElementId) -> EsperarResult<()>;

    /// Read an attribute; `None` if absent
    fn attribute(&self, id: &ElementId, name: &str) -> EsperarResult<Option<String>>;

    /// Lowercase tag name
    fn tag_name(&self, id: &ElementId) -> EsperarResult<String>;

    /// Visible text content
    fn text(&self, id: &ElementId) -> EsperarResult<String>;

    /// Whether the element is rendered and visible
    fn is_displayed(&self, id: &ElementId) -> EsperarResult<bool>;

    /// Whether the element is enabled
    fn is_enabled(&self, id: &ElementId) -> EsperarResult<bool>;

    /// Driver-native selected state (options, checkboxes)
    fn is_selected(&self, id: &ElementId) -> EsperarResult<bool>;

    /// Navigate to a URL
    fn navigate(&self, url: &str) -> EsperarResult<()>;

    /// The current URL
    fn current_url(&self) -> EsperarResult<String>;

    /// The current page title
    fn title(&self) -> EsperarResult<String>;

    /// Maximize the window
    fn maximize(&self) -> EsperarResult<()>;

    /// Enumerate open window handles
    fn window_handles(&self) -> EsperarResult<Vec<String>>;

    /// Read a cookie by name
    fn cookie(&self, name: &str) -> EsperarResult<Option<Cookie>>;

    /// Set a cookie
    fn set_cookie(&self, cookie: Cookie) -> EsperarResult<()>;

    /// Delete a cookie by name
    fn delete_cookie(&self, name: &str) -> EsperarResult<()>;

    /// Delete all cookies
    fn delete_all_cookies(&self) -> EsperarResult<()>;

    /// Tear down the underlying browser session
    fn quit(&self) -> EsperarResult<()>;
}

/// Shared-ownership delegation. Sessions are thread-confined, so `Rc` is
/// the natural way to keep an inspection handle on a driver a session owns.
impl<D: PageDriver + ?Sized> PageDriver for std::rc::Rc<D> {
    fn find_one(&self, scope: &Scope, locator: &Locator) -> EsperarResult<ElementId> {
        (**self).find_one(scope, locator)
    }

    fn find_all(&self, scope: &Scope, locator: &Locator) -> EsperarResult<Vec<ElementId>> {
        (**self).find_all(scope, locator)
    }

    fn execute(&self, script: &str, args: &[ScriptArg]) -> EsperarResult<ScriptValue> {
        (**self).execute(script, args)
    }

    fn click(&self, id: &ElementId) -> EsperarResult<()> {
        (**self).click(id)
    }

    fn double_click(&self, id: &ElementId) -> EsperarResult<()> {
        (**self).double_click(id)
    }

    fn context_click(&self, id: &ElementId) -> EsperarResult<()> {
        (**self).context_click(id)
    }

    fn hover(&self, id: &ElementId) -> EsperarResult<()> {
        (**self).hover(id)
    }

    fn type_text(&self, id: &ElementId, text: &str) -> EsperarResult<()> {
        (**self).type_text(id, text)
    }

    fn submit(&self, id: &ElementId) -> EsperarResult<()> {
        (**self).submit(id)
    }

    fn attribute(&self, id: &ElementId, name: &str) -> EsperarResult<Option<String>> {
        (**self).attribute(id, name)
    }

    fn tag_name(&self, id: &ElementId) -> EsperarResult<String> {
        (**self).tag_name(id)
    }

    fn text(&self, id: &ElementId) -> EsperarResult<String> {
        (**self).text(id)
    }

    fn is_displayed(&self, id: &ElementId) -> EsperarResult<bool> {
        (**self).is_displayed(id)
    }

    fn is_enabled(&self, id: &ElementId) -> EsperarResult<bool> {
        (**self).is_enabled(id)
    }

    fn is_selected(&self, id: &ElementId) -> EsperarResult<bool> {
        (**self).is_selected(id)
    }

    fn navigate(&self, url: &str) -> EsperarResult<()> {
        (**self).navigate(url)
    }

    fn current_url(&self) -> EsperarResult<String> {
        (**self).current_url()
    }

    fn title(&self) -> EsperarResult<String> {
        (**self).title()
    }

    fn maximize(&self) -> EsperarResult<()> {
        (**self).maximize()
    }

    fn window_handles(&self) -> EsperarResult<Vec<String>> {
        (**self).window_handles()
    }

    fn cookie(&self, name: &str) -> EsperarResult<Option<Cookie>> {
        (**self).cookie(name)
    }

    fn set_cookie(&self, cookie: Cookie) -> EsperarResult<()> {
        (**self).set_cookie(cookie)
    }

    fn delete_cookie(&self, name: &str) -> EsperarResult<()> {
        (**self).delete_cookie(name)
    }

    fn delete_all_cookies(&self) -> EsperarResult<()> {
        (**self).delete_all_cookies()
    }

    fn quit(&self) -> EsperarResult<()> {
        (**self).quit()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_element_id_roundtrip() {
        let id = ElementId::new("node-7");
        assert_eq!(id.as_str(), "node-7");
        assert_eq!(id.to_string(), "node-7");
    }

    #[test]
    fn test_scope_equality() {
        let id = ElementId::new("a");
        assert_eq!(Scope::Within(id.clone()), Scope::Within(id));
        assert_ne!(Scope::Document, Scope::Within(ElementId::new("a")));
    }

    #[test]
    fn test_script_value_json_accessor() {
        let value = ScriptValue::Json(serde_json::json!(3));
        assert_eq!(value.as_json().unwrap(), &serde_json::json!(3));
        assert!(ScriptValue::Node(ElementId::new("n")).as_json().is_none());
    }

    #[test]
    fn test_script_value_null() {
        assert!(ScriptValue::Json(serde_json::Value::Null).is_null());
        assert!(!ScriptValue::Json(serde_json::json!(false)).is_null());
    }

    #[test]
    fn test_cookie_serde() {
        let cookie = Cookie::new("session", "abc123");
        let json = serde_json::to_string(&cookie).unwrap();
        let back: Cookie = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cookie);
    }
}
