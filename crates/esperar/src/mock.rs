//! In-memory mock driver.
//!
//! [`MockPage`] implements [`PageDriver`] over an in-memory node tree so
//! page flows and every retry-engine property can be exercised without a
//! browser. It supports a practical selector subset (tag, `#id`, `.class`,
//! `[attr]`, `[attr=value]` and compound forms; XPath `//tag`, `//*`, and
//! the text-containment predicate the facade generates), time-scheduled
//! insertion for implicit-wait scenarios, and node detachment producing
//! stale handles. Scripts are dispatched on the exact strings in
//! [`crate::element::scripts`].

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use crate::driver::{Cookie, ElementId, PageDriver, Scope, ScriptArg, ScriptValue};
use crate::element::scripts;
use crate::locator::{Locator, LocatorKind};
use crate::result::{EsperarError, EsperarResult};

/// Builder for one mock DOM node
#[derive(Debug, Clone)]
pub struct MockNode {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    displayed: bool,
    enabled: bool,
    checked: bool,
    selected: bool,
    properties: HashMap<String, Value>,
}

impl MockNode {
    /// Create a node with the given tag
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_lowercase(),
            attributes: BTreeMap::new(),
            text: String::new(),
            displayed: true,
            enabled: true,
            checked: false,
            selected: false,
            properties: HashMap::new(),
        }
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the direct text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set a script-visible DOM property
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Mark the node as not visible
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    /// Mark the node as disabled
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Mark the node as checked
    #[must_use]
    pub const fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    /// Mark the node as selected
    #[must_use]
    pub const fn selected(mut self) -> Self {
        self.selected = true;
        self
    }
}

#[derive(Debug)]
struct NodeState {
    node: MockNode,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    present_after: Option<Instant>,
    detached: bool,
}

#[derive(Debug, Default)]
struct Inner {
    nodes: HashMap<ElementId, NodeState>,
    roots: Vec<ElementId>,
    url: String,
    title: String,
    cookies: BTreeMap<String, String>,
    click_log: Vec<ElementId>,
    submit_log: Vec<ElementId>,
    maximized: bool,
    quit: bool,
}

/// In-memory DOM implementing [`PageDriver`]
#[derive(Debug, Default)]
pub struct MockPage {
    inner: RefCell<Inner>,
}

impl MockPage {
    /// Create an empty page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node at document root; returns its reference
    pub fn append(&self, node: MockNode) -> ElementId {
        let id = fresh_id();
        let mut inner = self.inner.borrow_mut();
        inner.nodes.insert(
            id.clone(),
            NodeState {
                node,
                parent: None,
                children: Vec::new(),
                present_after: None,
                detached: false,
            },
        );
        inner.roots.push(id.clone());
        id
    }

    /// Append a child node under `parent`; returns its reference
    pub fn append_to(&self, parent: &ElementId, node: MockNode) -> ElementId {
        self.insert_child(parent, node, None)
    }

    /// Append a child node that only becomes present after `delay`.
    ///
    /// Until the delay elapses, finds do not see the node (or its
    /// subtree); the reference itself is valid immediately.
    pub fn append_to_after(&self, parent: &ElementId, node: MockNode, delay: Duration) -> ElementId {
        self.insert_child(parent, node, Some(Instant::now() + delay))
    }

    fn insert_child(
        &self,
        parent: &ElementId,
        node: MockNode,
        present_after: Option<Instant>,
    ) -> ElementId {
        let id = fresh_id();
        let mut inner = self.inner.borrow_mut();
        inner.nodes.insert(
            id.clone(),
            NodeState {
                node,
                parent: Some(parent.clone()),
                children: Vec::new(),
                present_after,
                detached: false,
            },
        );
        if let Some(state) = inner.nodes.get_mut(parent) {
            state.children.push(id.clone());
        }
        id
    }

    /// Detach a node from the document; subsequent commands on its
    /// reference (and its descendants') fail stale
    pub fn detach(&self, id: &ElementId) {
        let mut inner = self.inner.borrow_mut();
        if let Some(state) = inner.nodes.get_mut(id) {
            state.detached = true;
            let parent = state.parent.clone();
            if let Some(parent) = parent {
                if let Some(parent_state) = inner.nodes.get_mut(&parent) {
                    parent_state.children.retain(|child| child != id);
                }
            }
        }
        inner.roots.retain(|root| root != id);
    }

    /// Set a node's visibility
    pub fn set_displayed(&self, id: &ElementId, displayed: bool) {
        if let Some(state) = self.inner.borrow_mut().nodes.get_mut(id) {
            state.node.displayed = displayed;
        }
    }

    /// Set a node's enabled flag
    pub fn set_enabled(&self, id: &ElementId, enabled: bool) {
        if let Some(state) = self.inner.borrow_mut().nodes.get_mut(id) {
            state.node.enabled = enabled;
        }
    }

    /// Set a node's checked flag
    pub fn set_checked(&self, id: &ElementId, checked: bool) {
        if let Some(state) = self.inner.borrow_mut().nodes.get_mut(id) {
            state.node.checked = checked;
        }
    }

    /// Set the page title
    pub fn set_title(&self, title: impl Into<String>) {
        self.inner.borrow_mut().title = title.into();
    }

    /// Number of clicks (pointer and script-invoked) a node received
    #[must_use]
    pub fn click_count(&self, id: &ElementId) -> usize {
        self.inner
            .borrow()
            .click_log
            .iter()
            .filter(|clicked| *clicked == id)
            .count()
    }

    /// Total clicks across the page
    #[must_use]
    pub fn total_clicks(&self) -> usize {
        self.inner.borrow().click_log.len()
    }

    /// Whether a node's form was submitted
    #[must_use]
    pub fn submit_count(&self, id: &ElementId) -> usize {
        self.inner
            .borrow()
            .submit_log
            .iter()
            .filter(|submitted| *submitted == id)
            .count()
    }

    /// Whether `quit` was called
    #[must_use]
    pub fn was_quit(&self) -> bool {
        self.inner.borrow().quit
    }

    /// Whether the window was maximized
    #[must_use]
    pub fn was_maximized(&self) -> bool {
        self.inner.borrow().maximized
    }
}

fn fresh_id() -> ElementId {
    ElementId::new(Uuid::new_v4().to_string())
}

// =============================================================================
// TREE QUERIES
// =============================================================================

impl Inner {
    fn alive(&self, id: &ElementId) -> EsperarResult<&NodeState> {
        match self.nodes.get(id) {
            Some(state) if !self.is_detached(id) => Ok(state),
            Some(_) => Err(EsperarError::Stale { id: id.to_string() }),
            None => Err(EsperarError::Stale { id: id.to_string() }),
        }
    }

    fn is_detached(&self, id: &ElementId) -> bool {
        let mut current = Some(id.clone());
        while let Some(cursor) = current {
            match self.nodes.get(&cursor) {
                Some(state) if state.detached => return true,
                Some(state) => current = state.parent.clone(),
                None => return true,
            }
        }
        false
    }

    fn is_present(&self, id: &ElementId) -> bool {
        let mut current = Some(id.clone());
        while let Some(cursor) = current {
            match self.nodes.get(&cursor) {
                Some(state) => {
                    if state.detached {
                        return false;
                    }
                    if let Some(at) = state.present_after {
                        if Instant::now() < at {
                            return false;
                        }
                    }
                    current = state.parent.clone();
                }
                None => return false,
            }
        }
        true
    }

    fn effectively_displayed(&self, id: &ElementId) -> bool {
        let mut current = Some(id.clone());
        while let Some(cursor) = current {
            match self.nodes.get(&cursor) {
                Some(state) => {
                    if !state.node.displayed {
                        return false;
                    }
                    current = state.parent.clone();
                }
                None => return false,
            }
        }
        true
    }

    /// Present nodes in document order within a scope (descendants only for
    /// element scopes)
    fn doc_order(&self, scope: &Scope) -> Vec<ElementId> {
        let mut out = Vec::new();
        match scope {
            Scope::Document => {
                for root in self.roots.clone() {
                    self.descend(&root, true, &mut out);
                }
            }
            Scope::Within(id) => {
                if let Some(state) = self.nodes.get(id) {
                    for child in state.children.clone() {
                        self.descend(&child, true, &mut out);
                    }
                }
            }
        }
        out
    }

    fn descend(&self, id: &ElementId, include_self: bool, out: &mut Vec<ElementId>) {
        if !self.is_present(id) {
            return;
        }
        if include_self {
            out.push(id.clone());
        }
        if let Some(state) = self.nodes.get(id) {
            for child in state.children.clone() {
                self.descend(&child, true, out);
            }
        }
    }

    fn matches(&self, id: &ElementId, locator: &Locator) -> EsperarResult<bool> {
        let Some(state) = self.nodes.get(id) else {
            return Ok(false);
        };
        match locator.kind() {
            LocatorKind::Css => {
                let pattern = CssPattern::parse(locator.expression())?;
                Ok(pattern.matches(&state.node))
            }
            LocatorKind::XPath => {
                let pattern = XPathPattern::parse(locator.expression())?;
                Ok(pattern.matches(&state.node))
            }
        }
    }

    fn do_click(&mut self, id: &ElementId) {
        self.click_log.push(id.clone());
        let (tag, input_type) = {
            let Some(state) = self.nodes.get(id) else {
                return;
            };
            (
                state.node.tag.clone(),
                state.node.attributes.get("type").cloned().unwrap_or_default(),
            )
        };
        if tag == "input" && input_type == "checkbox" {
            if let Some(state) = self.nodes.get_mut(id) {
                state.node.checked = !state.node.checked;
            }
        } else if tag == "input" && input_type == "radio" {
            if let Some(state) = self.nodes.get_mut(id) {
                state.node.checked = true;
            }
        } else if tag == "option" {
            self.click_option(id);
        }
    }

    /// Clicking an option mirrors real single/multi select semantics
    fn click_option(&mut self, id: &ElementId) {
        let Some(select) = self.enclosing_select(id) else {
            return;
        };
        let multiple = self
            .nodes
            .get(&select)
            .is_some_and(|state| state.node.attributes.contains_key("multiple"));
        if multiple {
            if let Some(state) = self.nodes.get_mut(id) {
                state.node.selected = !state.node.selected;
            }
        } else {
            let options: Vec<ElementId> = {
                let mut out = Vec::new();
                self.descend(&select, false, &mut out);
                out.retain(|candidate| {
                    self.nodes
                        .get(candidate)
                        .is_some_and(|state| state.node.tag == "option")
                });
                out
            };
            for option in options {
                if let Some(state) = self.nodes.get_mut(&option) {
                    state.node.selected = option == *id;
                }
            }
        }
    }

    fn enclosing_select(&self, id: &ElementId) -> Option<ElementId> {
        let mut current = self.nodes.get(id).and_then(|state| state.parent.clone());
        while let Some(cursor) = current {
            let state = self.nodes.get(&cursor)?;
            if state.node.tag == "select" {
                return Some(cursor);
            }
            current = state.parent.clone();
        }
        None
    }

    fn full_text(&self, id: &ElementId) -> String {
        let mut parts = Vec::new();
        self.collect_text(id, &mut parts);
        parts.join(" ").trim().to_string()
    }

    fn collect_text(&self, id: &ElementId, parts: &mut Vec<String>) {
        if let Some(state) = self.nodes.get(id) {
            if !state.node.text.is_empty() {
                parts.push(state.node.text.clone());
            }
            for child in &state.children {
                self.collect_text(child, parts);
            }
        }
    }
}

// =============================================================================
// SELECTOR SUBSET
// =============================================================================

#[derive(Debug, Default)]
struct CssPattern {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

impl CssPattern {
    fn parse(expression: &str) -> EsperarResult<Self> {
        static COMPOUND: OnceLock<Regex> = OnceLock::new();
        static PART: OnceLock<Regex> = OnceLock::new();
        let compound = COMPOUND.get_or_init(|| {
            Regex::new(r"^([A-Za-z][A-Za-z0-9-]*|\*)?((?:[#.][A-Za-z0-9_-]+|\[[^\]]+\])*)$")
                .expect("compound selector regex")
        });
        let part = PART.get_or_init(|| {
            Regex::new(r"[#.][A-Za-z0-9_-]+|\[[^\]]+\]").expect("selector part regex")
        });

        let captures = compound
            .captures(expression.trim())
            .ok_or_else(|| unsupported_selector(expression))?;
        let mut pattern = Self {
            tag: captures
                .get(1)
                .map(|m| m.as_str().to_lowercase())
                .filter(|tag| tag != "*"),
            ..Self::default()
        };
        let rest = captures.get(2).map_or("", |m| m.as_str());
        for piece in part.find_iter(rest) {
            let piece = piece.as_str();
            if let Some(id) = piece.strip_prefix('#') {
                pattern.id = Some(id.to_string());
            } else if let Some(class) = piece.strip_prefix('.') {
                pattern.classes.push(class.to_string());
            } else {
                let body = &piece[1..piece.len() - 1];
                match body.split_once('=') {
                    Some((name, value)) => {
                        let value = value.trim_matches(|c| c == '\'' || c == '"');
                        pattern
                            .attrs
                            .push((name.trim().to_string(), Some(value.to_string())));
                    }
                    None => pattern.attrs.push((body.trim().to_string(), None)),
                }
            }
        }
        Ok(pattern)
    }

    fn matches(&self, node: &MockNode) -> bool {
        if let Some(ref tag) = self.tag {
            if node.tag != *tag {
                return false;
            }
        }
        if let Some(ref id) = self.id {
            if node.attributes.get("id") != Some(id) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let class_attr = node.attributes.get("class").cloned().unwrap_or_default();
            let classes: Vec<&str> = class_attr.split_whitespace().collect();
            if !self.classes.iter().all(|c| classes.contains(&c.as_str())) {
                return false;
            }
        }
        for (name, expected) in &self.attrs {
            match (node.attributes.get(name), expected) {
                (Some(actual), Some(expected)) if actual == expected => {}
                (Some(_), None) => {}
                _ => return false,
            }
        }
        true
    }
}

#[derive(Debug)]
struct XPathPattern {
    tag: Option<String>,
    text_contains: Option<String>,
}

impl XPathPattern {
    fn parse(expression: &str) -> EsperarResult<Self> {
        static XPATH: OnceLock<Regex> = OnceLock::new();
        let re = XPATH.get_or_init(|| {
            Regex::new(
                r"^\.?//([A-Za-z][A-Za-z0-9-]*|\*)(?:\[contains\(text\(\), '([^']*)'\)\])?$",
            )
            .expect("xpath subset regex")
        });
        let captures = re
            .captures(expression.trim())
            .ok_or_else(|| unsupported_selector(expression))?;
        Ok(Self {
            tag: captures
                .get(1)
                .map(|m| m.as_str().to_lowercase())
                .filter(|tag| tag != "*"),
            text_contains: captures.get(2).map(|m| m.as_str().to_string()),
        })
    }

    fn matches(&self, node: &MockNode) -> bool {
        if let Some(ref tag) = self.tag {
            if node.tag != *tag {
                return false;
            }
        }
        if let Some(ref needle) = self.text_contains {
            // XPath text() matches direct text nodes only
            if !node.text.contains(needle.as_str()) {
                return false;
            }
        }
        true
    }
}

fn unsupported_selector(expression: &str) -> EsperarError {
    EsperarError::InvalidArgument {
        message: format!("unsupported selector in mock driver: '{expression}'"),
    }
}

// =============================================================================
// DRIVER IMPLEMENTATION
// =============================================================================

impl PageDriver for MockPage {
    fn find_one(&self, scope: &Scope, locator: &Locator) -> EsperarResult<ElementId> {
        let inner = self.inner.borrow();
        if let Scope::Within(id) = scope {
            inner.alive(id)?;
        }
        for candidate in inner.doc_order(scope) {
            if inner.matches(&candidate, locator)? {
                return Ok(candidate);
            }
        }
        Err(EsperarError::NotFound {
            locator: locator.to_string(),
        })
    }

    fn find_all(&self, scope: &Scope, locator: &Locator) -> EsperarResult<Vec<ElementId>> {
        let inner = self.inner.borrow();
        if let Scope::Within(id) = scope {
            inner.alive(id)?;
        }
        let mut found = Vec::new();
        for candidate in inner.doc_order(scope) {
            if inner.matches(&candidate, locator)? {
                found.push(candidate);
            }
        }
        Ok(found)
    }

    fn execute(&self, script: &str, args: &[ScriptArg]) -> EsperarResult<ScriptValue> {
        let node_arg = |index: usize| -> EsperarResult<ElementId> {
            match args.get(index) {
                Some(ScriptArg::Node(id)) => Ok(id.clone()),
                _ => Err(EsperarError::InvalidArgument {
                    message: format!("script expected a node at argument {index}"),
                }),
            }
        };

        match script {
            scripts::FORCE_CLICK => {
                let id = node_arg(0)?;
                let mut inner = self.inner.borrow_mut();
                inner.alive(&id)?;
                inner.do_click(&id);
                Ok(ScriptValue::Json(Value::Null))
            }
            scripts::PROPERTY => {
                let id = node_arg(0)?;
                let name = match args.get(1) {
                    Some(ScriptArg::Json(Value::String(name))) => name.clone(),
                    _ => {
                        return Err(EsperarError::InvalidArgument {
                            message: "property script expects a name argument".to_string(),
                        })
                    }
                };
                let inner = self.inner.borrow();
                let state = inner.alive(&id)?;
                if let Some(value) = state.node.properties.get(&name) {
                    return Ok(ScriptValue::Json(value.clone()));
                }
                let value = match name.as_str() {
                    "checked" => Value::Bool(state.node.checked),
                    _ => state
                        .node
                        .attributes
                        .get(&name)
                        .map_or(Value::Null, |v| Value::String(v.clone())),
                };
                Ok(ScriptValue::Json(value))
            }
            scripts::CHECKED => {
                let id = node_arg(0)?;
                let inner = self.inner.borrow();
                let state = inner.alive(&id)?;
                Ok(ScriptValue::Json(Value::Bool(state.node.checked)))
            }
            scripts::PARENT => {
                let id = node_arg(0)?;
                let inner = self.inner.borrow();
                let state = inner.alive(&id)?;
                Ok(state.parent.clone().map_or(
                    ScriptValue::Json(Value::Null),
                    ScriptValue::Node,
                ))
            }
            scripts::CHILDREN => {
                let id = node_arg(0)?;
                let inner = self.inner.borrow();
                let state = inner.alive(&id)?;
                let children = state
                    .children
                    .iter()
                    .filter(|child| inner.is_present(child))
                    .cloned()
                    .collect();
                Ok(ScriptValue::Nodes(children))
            }
            scripts::SIBLINGS => {
                let id = node_arg(0)?;
                let inner = self.inner.borrow();
                let state = inner.alive(&id)?;
                let siblings = match &state.parent {
                    Some(parent) => inner
                        .nodes
                        .get(parent)
                        .map(|parent_state| {
                            parent_state
                                .children
                                .iter()
                                .filter(|child| **child != id && inner.is_present(child))
                                .cloned()
                                .collect()
                        })
                        .unwrap_or_default(),
                    None => Vec::new(),
                };
                Ok(ScriptValue::Nodes(siblings))
            }
            scripts::SCROLL_INTO_VIEW => {
                let id = node_arg(0)?;
                self.inner.borrow().alive(&id)?;
                Ok(ScriptValue::Json(Value::Null))
            }
            _ => Err(EsperarError::Driver {
                message: format!("mock driver does not implement script: '{script}'"),
            }),
        }
    }

    fn click(&self, id: &ElementId) -> EsperarResult<()> {
        let mut inner = self.inner.borrow_mut();
        inner.alive(id)?;
        if !inner.effectively_displayed(id) {
            return Err(EsperarError::Driver {
                message: format!("element not interactable: {id}"),
            });
        }
        inner.do_click(id);
        Ok(())
    }

    fn double_click(&self, id: &ElementId) -> EsperarResult<()> {
        let mut inner = self.inner.borrow_mut();
        inner.alive(id)?;
        if !inner.effectively_displayed(id) {
            return Err(EsperarError::Driver {
                message: format!("element not interactable: {id}"),
            });
        }
        inner.do_click(id);
        inner.do_click(id);
        Ok(())
    }

    fn context_click(&self, id: &ElementId) -> EsperarResult<()> {
        let inner = self.inner.borrow();
        inner.alive(id)?;
        if !inner.effectively_displayed(id) {
            return Err(EsperarError::Driver {
                message: format!("element not interactable: {id}"),
            });
        }
        Ok(())
    }

    fn hover(&self, id: &ElementId) -> EsperarResult<()> {
        let inner = self.inner.borrow();
        inner.alive(id)?;
        if !inner.effectively_displayed(id) {
            return Err(EsperarError::Driver {
                message: format!("element not interactable: {id}"),
            });
        }
        Ok(())
    }

    fn type_text(&self, id: &ElementId, text: &str) -> EsperarResult<()> {
        let mut inner = self.inner.borrow_mut();
        let initial = {
            let state = inner.alive(id)?;
            match state.node.properties.get("value") {
                Some(Value::String(existing)) => existing.clone(),
                _ => state
                    .node
                    .attributes
                    .get("value")
                    .cloned()
                    .unwrap_or_default(),
            }
        };
        if let Some(state) = inner.nodes.get_mut(id) {
            state
                .node
                .properties
                .insert("value".to_string(), Value::String(initial + text));
        }
        Ok(())
    }

    fn submit(&self, id: &ElementId) -> EsperarResult<()> {
        let mut inner = self.inner.borrow_mut();
        inner.alive(id)?;
        inner.submit_log.push(id.clone());
        Ok(())
    }

    fn attribute(&self, id: &ElementId, name: &str) -> EsperarResult<Option<String>> {
        let inner = self.inner.borrow();
        let state = inner.alive(id)?;
        Ok(state.node.attributes.get(name).cloned())
    }

    fn tag_name(&self, id: &ElementId) -> EsperarResult<String> {
        let inner = self.inner.borrow();
        Ok(inner.alive(id)?.node.tag.clone())
    }

    fn text(&self, id: &ElementId) -> EsperarResult<String> {
        let inner = self.inner.borrow();
        inner.alive(id)?;
        Ok(inner.full_text(id))
    }

    fn is_displayed(&self, id: &ElementId) -> EsperarResult<bool> {
        let inner = self.inner.borrow();
        inner.alive(id)?;
        Ok(inner.effectively_displayed(id))
    }

    fn is_enabled(&self, id: &ElementId) -> EsperarResult<bool> {
        let inner = self.inner.borrow();
        Ok(inner.alive(id)?.node.enabled)
    }

    fn is_selected(&self, id: &ElementId) -> EsperarResult<bool> {
        let inner = self.inner.borrow();
        let state = inner.alive(id)?;
        let input_type = state.node.attributes.get("type").map(String::as_str);
        if state.node.tag == "input" && matches!(input_type, Some("checkbox" | "radio")) {
            Ok(state.node.checked)
        } else {
            Ok(state.node.selected)
        }
    }

    fn navigate(&self, url: &str) -> EsperarResult<()> {
        self.inner.borrow_mut().url = url.to_string();
        Ok(())
    }

    fn current_url(&self) -> EsperarResult<String> {
        Ok(self.inner.borrow().url.clone())
    }

    fn title(&self) -> EsperarResult<String> {
        Ok(self.inner.borrow().title.clone())
    }

    fn maximize(&self) -> EsperarResult<()> {
        self.inner.borrow_mut().maximized = true;
        Ok(())
    }

    fn window_handles(&self) -> EsperarResult<Vec<String>> {
        Ok(vec!["main".to_string()])
    }

    fn cookie(&self, name: &str) -> EsperarResult<Option<Cookie>> {
        Ok(self
            .inner
            .borrow()
            .cookies
            .get(name)
            .map(|value| Cookie::new(name, value.clone())))
    }

    fn set_cookie(&self, cookie: Cookie) -> EsperarResult<()> {
        self.inner.borrow_mut().cookies.insert(cookie.name, cookie.value);
        Ok(())
    }

    fn delete_cookie(&self, name: &str) -> EsperarResult<()> {
        self.inner.borrow_mut().cookies.remove(name);
        Ok(())
    }

    fn delete_all_cookies(&self) -> EsperarResult<()> {
        self.inner.borrow_mut().cookies.clear();
        Ok(())
    }

    fn quit(&self) -> EsperarResult<()> {
        self.inner.borrow_mut().quit = true;
        Ok(())
    }
}
