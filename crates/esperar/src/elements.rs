//! Ordered element collections.

use std::ops::Index;

use crate::element::Element;
use crate::locator::Locator;
use crate::result::{EsperarError, EsperarResult};

/// An ordered, index-addressable, iterable group of element handles sharing
/// one originating locator context.
///
/// Insertion order is document order at the time of discovery; it is not
/// guaranteed stable across re-discovery. The collection as a whole is not
/// re-findable; each member carries its own (possibly shared) locator.
#[derive(Debug, Clone)]
pub struct Elements<'s> {
    locator: Option<Locator>,
    items: Vec<Element<'s>>,
}

impl<'s> Elements<'s> {
    pub(crate) fn new(locator: Option<Locator>, items: Vec<Element<'s>>) -> Self {
        Self { locator, items }
    }

    /// The locator shared by the members, if any
    #[must_use]
    pub const fn locator(&self) -> Option<&Locator> {
        self.locator.as_ref()
    }

    /// Number of elements discovered
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if nothing was discovered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The first element; fails if the collection is empty
    pub fn first(&self) -> EsperarResult<&Element<'s>> {
        self.items.first().ok_or_else(|| self.empty_error("first()"))
    }

    /// The last element; fails if the collection is empty
    pub fn last(&self) -> EsperarResult<&Element<'s>> {
        self.items.last().ok_or_else(|| self.empty_error("last()"))
    }

    /// The element at `index`, or `None` if out of range
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Element<'s>> {
        self.items.get(index)
    }

    /// Iterate over the elements in discovery order
    pub fn iter(&self) -> std::slice::Iter<'_, Element<'s>> {
        self.items.iter()
    }

    fn empty_error(&self, accessor: &str) -> EsperarError {
        let label = self
            .locator
            .as_ref()
            .map_or_else(|| "<derived by traversal>".to_string(), Locator::to_string);
        EsperarError::NotFound {
            locator: format!("{accessor} on empty collection for {label}"),
        }
    }
}

impl<'s> Index<usize> for Elements<'s> {
    type Output = Element<'s>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'s> IntoIterator for Elements<'s> {
    type Item = Element<'s>;
    type IntoIter = std::vec::IntoIter<Element<'s>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, 's> IntoIterator for &'a Elements<'s> {
    type Item = &'a Element<'s>;
    type IntoIter = std::slice::Iter<'a, Element<'s>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
