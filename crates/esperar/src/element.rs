//! Locator-bound element handles.
//!
//! An [`Element`] wraps one remote node reference plus the [`Locator`] that
//! produced it (absent for handles obtained by structural traversal).
//! Characteristics and actions operate on the already-resolved reference and
//! fail immediately if it went stale; nested finds are routed through the
//! wait engine, scoped to this element's subtree.

use serde_json::Value;

use crate::driver::{ElementId, PageDriver, Scope, ScriptArg, ScriptValue};
use crate::elements::Elements;
use crate::locator::Locator;
use crate::result::{EsperarError, EsperarResult, FailureKind};
use crate::session::Session;
use crate::should::Should;

/// Scripts injected by the element layer.
///
/// Drivers that special-case script execution (such as
/// [`crate::mock::MockPage`]) dispatch on these exact strings.
pub mod scripts {
    /// Click the node directly, bypassing visibility/overlap checks
    pub const FORCE_CLICK: &str = "arguments[0].click();";
    /// Read an arbitrary DOM/JS property: `arguments[1]` is the name
    pub const PROPERTY: &str = "return arguments[0][arguments[1]];";
    /// Probe the checked state (property read, not driver-native selection,
    /// to accommodate custom checkbox widgets)
    pub const CHECKED: &str = "return arguments[0].checked;";
    /// Structural parent lookup
    pub const PARENT: &str = "return arguments[0].parentElement;";
    /// Structural children lookup
    pub const CHILDREN: &str = "return arguments[0].children;";
    /// Structural siblings lookup (excludes the node itself)
    pub const SIBLINGS: &str =
        "return Array.from(arguments[0].parentElement.children).filter(e => e !== arguments[0]);";
    /// Scroll the node into the viewport
    pub const SCROLL_INTO_VIEW: &str = "arguments[0].scrollIntoView(true);";
}

/// A live, possibly-stale reference to one remote document element.
///
/// Cheap to clone; all methods that can transiently fail surface
/// [`EsperarError::NotFound`]/[`EsperarError::Stale`], which the wait engine
/// treats as retryable when the call site polls.
#[derive(Debug, Clone)]
pub struct Element<'s> {
    session: &'s Session,
    id: ElementId,
    locator: Option<Locator>,
}

impl<'s> Element<'s> {
    pub(crate) fn new(session: &'s Session, id: ElementId, locator: Option<Locator>) -> Self {
        Self {
            session,
            id,
            locator,
        }
    }

    /// The remote reference this handle wraps
    #[must_use]
    pub const fn id(&self) -> &ElementId {
        &self.id
    }

    /// The locator that produced this handle, if it is re-findable
    #[must_use]
    pub const fn locator(&self) -> Option<&Locator> {
        self.locator.as_ref()
    }

    /// The owning session
    #[must_use]
    pub const fn session(&self) -> &'s Session {
        self.session
    }

    pub(crate) fn locator_label(&self) -> String {
        self.locator
            .as_ref()
            .map_or_else(|| "<derived by traversal>".to_string(), Locator::to_string)
    }

    fn driver(&self) -> &dyn PageDriver {
        self.session.driver()
    }

    fn scope(&self) -> Scope {
        Scope::Within(self.id.clone())
    }

    // =========================================================================
    // CHARACTERISTICS
    // =========================================================================

    /// Read an attribute; `None` if absent
    pub fn attribute(&self, name: &str) -> EsperarResult<Option<String>> {
        self.driver().attribute(&self.id, name)
    }

    /// Lowercase tag name
    pub fn tag_name(&self) -> EsperarResult<String> {
        self.driver().tag_name(&self.id)
    }

    /// Visible text content
    pub fn text(&self) -> EsperarResult<String> {
        self.driver().text(&self.id)
    }

    /// Read a DOM/JS property, normalized to a string.
    ///
    /// Absent/null properties yield `None`; booleans stringify to
    /// `"True"`/`"False"`; numbers to their decimal representation.
    pub fn property(&self, name: &str) -> EsperarResult<Option<String>> {
        let value = self.driver().execute(
            scripts::PROPERTY,
            &[
                ScriptArg::Node(self.id.clone()),
                ScriptArg::Json(Value::String(name.to_string())),
            ],
        )?;
        Ok(normalize_property(value))
    }

    // =========================================================================
    // ACTIONS
    // =========================================================================

    /// Click the element.
    ///
    /// With `force`, the click is performed by direct script invocation on
    /// the node, bypassing visibility/overlap checks; otherwise a standard
    /// pointer click, which fails if the element is not interactable.
    pub fn click(&self, force: bool) -> EsperarResult<&Self> {
        if force {
            self.driver()
                .execute(scripts::FORCE_CLICK, &[ScriptArg::Node(self.id.clone())])?;
        } else {
            self.driver().click(&self.id)?;
        }
        Ok(self)
    }

    /// Double-click the element
    pub fn double_click(&self) -> EsperarResult<&Self> {
        self.driver().double_click(&self.id)?;
        Ok(self)
    }

    /// Move the pointer over the element
    pub fn hover(&self) -> EsperarResult<&Self> {
        self.driver().hover(&self.id)?;
        Ok(self)
    }

    /// Right-click the element
    pub fn right_click(&self) -> EsperarResult<&Self> {
        self.driver().context_click(&self.id)?;
        Ok(self)
    }

    /// Check a checkbox or radio input; no-op if already checked
    pub fn check(&self) -> EsperarResult<&Self> {
        self.set_checked(true, "check()")
    }

    /// Uncheck a checkbox or radio input; no-op if already unchecked
    pub fn uncheck(&self) -> EsperarResult<&Self> {
        self.set_checked(false, "uncheck()")
    }

    fn set_checked(&self, target: bool, action: &str) -> EsperarResult<&Self> {
        let input_type = self.attribute("type")?.unwrap_or_default();
        if input_type != "checkbox" && input_type != "radio" {
            return Err(EsperarError::TypeMismatch {
                message: format!(
                    "{action} requires an element with type 'checkbox' or 'radio', found '{input_type}'"
                ),
            });
        }
        if self.is_checked()? != target {
            self.driver().click(&self.id)?;
        }
        Ok(self)
    }

    /// Select an option by visible text, falling back to the value
    /// attribute when no option's text matches.
    ///
    /// Requires tag name `select`. Only "no option with that text" triggers
    /// the value fallback; any other failure during the text scan propagates.
    pub fn select(&self, text_or_value: &str) -> EsperarResult<&Self> {
        self.require_select("select()")?;
        let option = self.find_option(text_or_value)?;
        if !self.driver().is_selected(&option)? {
            self.driver().click(&option)?;
        }
        Ok(self)
    }

    /// Select the option at `index` (document order)
    pub fn select_index(&self, index: usize) -> EsperarResult<&Self> {
        self.require_select("select_index()")?;
        let option = self.option_at(index)?;
        if !self.driver().is_selected(&option)? {
            self.driver().click(&option)?;
        }
        Ok(self)
    }

    /// Deselect an option by visible text (value-attribute fallback).
    ///
    /// Requires a multi-select control; single selects raise a type
    /// mismatch.
    pub fn deselect(&self, text_or_value: &str) -> EsperarResult<&Self> {
        self.require_multi_select("deselect()")?;
        let option = self.find_option(text_or_value)?;
        if self.driver().is_selected(&option)? {
            self.driver().click(&option)?;
        }
        Ok(self)
    }

    /// Deselect the option at `index` (document order)
    pub fn deselect_index(&self, index: usize) -> EsperarResult<&Self> {
        self.require_multi_select("deselect_index()")?;
        let option = self.option_at(index)?;
        if self.driver().is_selected(&option)? {
            self.driver().click(&option)?;
        }
        Ok(self)
    }

    /// Submit the form this element belongs to
    pub fn submit(&self) -> EsperarResult<&Self> {
        self.driver().submit(&self.id)?;
        Ok(self)
    }

    /// Send keystrokes to the element
    pub fn type_text(&self, text: &str) -> EsperarResult<&Self> {
        self.driver().type_text(&self.id, text)?;
        Ok(self)
    }

    /// Scroll the element into the viewport
    pub fn scroll_into_view(&self) -> EsperarResult<&Self> {
        self.driver()
            .execute(scripts::SCROLL_INTO_VIEW, &[ScriptArg::Node(self.id.clone())])?;
        Ok(self)
    }

    fn require_select(&self, action: &str) -> EsperarResult<()> {
        let tag = self.tag_name()?;
        if tag != "select" {
            return Err(EsperarError::TypeMismatch {
                message: format!("{action} requires a 'select' element, found '{tag}'"),
            });
        }
        Ok(())
    }

    fn require_multi_select(&self, action: &str) -> EsperarResult<()> {
        self.require_select(action)?;
        if self.attribute("multiple")?.is_none() {
            return Err(EsperarError::TypeMismatch {
                message: format!("{action} requires a multi-select element"),
            });
        }
        Ok(())
    }

    /// Exact visible-text match first; value-attribute match only when no
    /// text matched.
    fn find_option(&self, text_or_value: &str) -> EsperarResult<ElementId> {
        let options = self
            .driver()
            .find_all(&self.scope(), &Locator::css("option"))?;
        for id in &options {
            if self.driver().text(id)? == text_or_value {
                return Ok(id.clone());
            }
        }
        for id in &options {
            if self.driver().attribute(id, "value")?.as_deref() == Some(text_or_value) {
                return Ok(id.clone());
            }
        }
        Err(EsperarError::NotFound {
            locator: format!("option with text or value '{text_or_value}'"),
        })
    }

    fn option_at(&self, index: usize) -> EsperarResult<ElementId> {
        let options = self
            .driver()
            .find_all(&self.scope(), &Locator::css("option"))?;
        options
            .get(index)
            .cloned()
            .ok_or_else(|| EsperarError::NotFound {
                locator: format!("option at index {index} ({} present)", options.len()),
            })
    }

    // =========================================================================
    // NESTED FINDING (subtree-scoped, wait-engine routed)
    // =========================================================================

    /// Find all descendants matching the CSS selector.
    ///
    /// With `at_least_one`, polls (session default timeout) until the
    /// subtree count is >= 1; otherwise returns immediately, possibly empty.
    pub fn find(&self, css: &str, at_least_one: bool) -> EsperarResult<Elements<'s>> {
        self.subtree_find_all(Locator::css(css), at_least_one, -1)
    }

    /// [`Element::find`] with a per-call timeout in seconds
    pub fn find_within(
        &self,
        css: &str,
        at_least_one: bool,
        secs: i64,
    ) -> EsperarResult<Elements<'s>> {
        self.subtree_find_all(Locator::css(css), at_least_one, secs)
    }

    /// Find all descendants matching the XPath expression
    pub fn find_xpath(&self, xpath: &str, at_least_one: bool) -> EsperarResult<Elements<'s>> {
        self.subtree_find_all(Locator::xpath(xpath), at_least_one, -1)
    }

    /// [`Element::find_xpath`] with a per-call timeout in seconds
    pub fn find_xpath_within(
        &self,
        xpath: &str,
        at_least_one: bool,
        secs: i64,
    ) -> EsperarResult<Elements<'s>> {
        self.subtree_find_all(Locator::xpath(xpath), at_least_one, secs)
    }

    /// Find exactly one descendant matching the CSS selector, polling with
    /// the session default timeout
    pub fn get(&self, css: &str) -> EsperarResult<Element<'s>> {
        self.subtree_find_one(Locator::css(css), -1)
    }

    /// [`Element::get`] with a per-call timeout in seconds.
    ///
    /// `secs == 0` resolves synchronously and fails immediately if absent;
    /// a negative value uses the session default.
    pub fn get_within(&self, css: &str, secs: i64) -> EsperarResult<Element<'s>> {
        self.subtree_find_one(Locator::css(css), secs)
    }

    /// Find exactly one descendant matching the XPath expression
    pub fn xpath(&self, xpath: &str) -> EsperarResult<Element<'s>> {
        self.subtree_find_one(Locator::xpath(xpath), -1)
    }

    /// [`Element::xpath`] with a per-call timeout in seconds
    pub fn xpath_within(&self, xpath: &str, secs: i64) -> EsperarResult<Element<'s>> {
        self.subtree_find_one(Locator::xpath(xpath), secs)
    }

    /// Find the descendant containing the given text
    pub fn contains(&self, text: &str) -> EsperarResult<Element<'s>> {
        self.subtree_find_one(Locator::contains_text(text), -1)
    }

    /// [`Element::contains`] with a per-call timeout in seconds (same
    /// semantics as [`Element::get_within`])
    pub fn contains_within(&self, text: &str, secs: i64) -> EsperarResult<Element<'s>> {
        self.subtree_find_one(Locator::contains_text(text), secs)
    }

    fn subtree_find_one(&self, locator: Locator, secs: i64) -> EsperarResult<Element<'s>> {
        let scope = self.scope();
        let id = if secs == 0 {
            self.driver().find_one(&scope, &locator)?
        } else {
            let waiter = self.session.waiter(secs, &[]);
            waiter.until(|| self.driver().find_one(&scope, &locator))?
        };
        Ok(Element::new(self.session, id, Some(locator)))
    }

    fn subtree_find_all(
        &self,
        locator: Locator,
        at_least_one: bool,
        secs: i64,
    ) -> EsperarResult<Elements<'s>> {
        let scope = self.scope();
        let ids = if at_least_one && secs != 0 {
            let waiter = self.session.waiter(secs, &[]);
            waiter.until(|| {
                let found = self.driver().find_all(&scope, &locator)?;
                if found.is_empty() {
                    Err(EsperarError::NotFound {
                        locator: locator.to_string(),
                    })
                } else {
                    Ok(found)
                }
            })?
        } else {
            let found = self.driver().find_all(&scope, &locator)?;
            if at_least_one && found.is_empty() {
                return Err(EsperarError::NotFound {
                    locator: locator.to_string(),
                });
            }
            found
        };
        let shared = Some(locator);
        let items = ids
            .into_iter()
            .map(|id| Element::new(self.session, id, shared.clone()))
            .collect();
        Ok(Elements::new(shared, items))
    }

    // =========================================================================
    // STRUCTURAL TRAVERSAL
    // =========================================================================

    /// The parent element. The returned handle carries no locator (one-shot
    /// snapshot, not independently re-findable).
    pub fn parent(&self) -> EsperarResult<Element<'s>> {
        let value = self
            .driver()
            .execute(scripts::PARENT, &[ScriptArg::Node(self.id.clone())])?;
        match value {
            ScriptValue::Node(id) => Ok(Element::new(self.session, id, None)),
            _ => Err(EsperarError::NotFound {
                locator: format!("parent of {}", self.locator_label()),
            }),
        }
    }

    /// The child elements, in document order.
    ///
    /// The returned handles carry the *same* locator as this element: they
    /// remain re-findable as "children of whatever re-resolves this
    /// locator".
    pub fn children(&self) -> EsperarResult<Elements<'s>> {
        let value = self
            .driver()
            .execute(scripts::CHILDREN, &[ScriptArg::Node(self.id.clone())])?;
        let ids = match value {
            ScriptValue::Nodes(ids) => ids,
            _ => Vec::new(),
        };
        let items = ids
            .into_iter()
            .map(|id| Element::new(self.session, id, self.locator.clone()))
            .collect();
        Ok(Elements::new(self.locator.clone(), items))
    }

    /// The sibling elements (excluding this one), in document order.
    /// One-shot snapshot; the handles carry no locator.
    pub fn siblings(&self) -> EsperarResult<Elements<'s>> {
        let value = self
            .driver()
            .execute(scripts::SIBLINGS, &[ScriptArg::Node(self.id.clone())])?;
        let ids = match value {
            ScriptValue::Nodes(ids) => ids,
            _ => Vec::new(),
        };
        let items = ids
            .into_iter()
            .map(|id| Element::new(self.session, id, None))
            .collect();
        Ok(Elements::new(None, items))
    }

    // =========================================================================
    // CHECKS
    // =========================================================================

    /// Whether the element exists in the DOM and is visible
    pub fn is_displayed(&self) -> EsperarResult<bool> {
        self.driver().is_displayed(&self.id)
    }

    /// Whether the element is enabled
    pub fn is_enabled(&self) -> EsperarResult<bool> {
        self.driver().is_enabled(&self.id)
    }

    /// Driver-native selected state
    pub fn is_selected(&self) -> EsperarResult<bool> {
        self.driver().is_selected(&self.id)
    }

    /// Checked state, probed via a DOM property read rather than the
    /// driver's native selection so custom checkbox widgets report
    /// correctly
    pub fn is_checked(&self) -> EsperarResult<bool> {
        let value = self
            .driver()
            .execute(scripts::CHECKED, &[ScriptArg::Node(self.id.clone())])?;
        Ok(matches!(
            value,
            ScriptValue::Json(Value::Bool(true))
        ))
    }

    // =========================================================================
    // EXPECTATIONS
    // =========================================================================

    /// Build a retried expectation over this element using the session
    /// default timeout
    #[must_use]
    pub fn should(&self) -> Should<'s> {
        Should::new(self.clone(), self.session.waiter(-1, &[]).into_owned())
    }

    /// Build a retried expectation with a per-call timeout and ignore-list
    #[must_use]
    pub fn should_within(&self, secs: i64, ignored: &[FailureKind]) -> Should<'s> {
        Should::new(self.clone(), self.session.waiter(secs, ignored).into_owned())
    }
}

/// Normalize a script-returned property value per the facade contract:
/// null/absent -> `None`; booleans -> `"True"`/`"False"`; numbers -> decimal
/// strings; node references -> their wire id.
fn normalize_property(value: ScriptValue) -> Option<String> {
    match value {
        ScriptValue::Json(Value::Null) => None,
        ScriptValue::Json(Value::Bool(true)) => Some("True".to_string()),
        ScriptValue::Json(Value::Bool(false)) => Some("False".to_string()),
        ScriptValue::Json(Value::Number(n)) => Some(format_number(&n)),
        ScriptValue::Json(Value::String(s)) => Some(s),
        ScriptValue::Json(other) => Some(other.to_string()),
        ScriptValue::Node(id) => Some(id.to_string()),
        ScriptValue::Nodes(ids) => Some(
            ids.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(","),
        ),
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().unwrap_or(0.0).to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod normalize_tests {
        use super::*;
        use serde_json::json;

        #[test]
        fn test_null_is_none() {
            assert_eq!(normalize_property(ScriptValue::Json(Value::Null)), None);
        }

        #[test]
        fn test_booleans_stringify_capitalized() {
            assert_eq!(
                normalize_property(ScriptValue::Json(json!(true))),
                Some("True".to_string())
            );
            assert_eq!(
                normalize_property(ScriptValue::Json(json!(false))),
                Some("False".to_string())
            );
        }

        #[test]
        fn test_integers_have_no_fraction() {
            assert_eq!(
                normalize_property(ScriptValue::Json(json!(42))),
                Some("42".to_string())
            );
            assert_eq!(
                normalize_property(ScriptValue::Json(json!(-3))),
                Some("-3".to_string())
            );
        }

        #[test]
        fn test_fractional_numbers_keep_fraction() {
            assert_eq!(
                normalize_property(ScriptValue::Json(json!(1.5))),
                Some("1.5".to_string())
            );
        }

        #[test]
        fn test_strings_pass_through() {
            assert_eq!(
                normalize_property(ScriptValue::Json(json!("hello"))),
                Some("hello".to_string())
            );
        }

        #[test]
        fn test_node_yields_wire_id() {
            assert_eq!(
                normalize_property(ScriptValue::Node(ElementId::new("n-1"))),
                Some("n-1".to_string())
            );
        }
    }
}
