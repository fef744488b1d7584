//! Cyclic next/previous navigation over the browse order.

use crate::grouping::IdiomGroups;
use crate::model::Idiom;

/// Cursor over idioms in browse order that wraps at both ends.
///
/// Stepping forward `len()` times from any position returns to that
/// position after visiting every idiom exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseCursor {
    order: Vec<Idiom>,
    position: Option<usize>,
}

impl BrowseCursor {
    /// Build a cursor over an already ordered list, positioned on the first
    /// idiom.
    #[must_use]
    pub fn new(order: Vec<Idiom>) -> Self {
        let position = (!order.is_empty()).then_some(0);
        Self { order, position }
    }

    /// Build a cursor over the flattened browse order of `groups`.
    #[must_use]
    pub fn from_groups(groups: &IdiomGroups) -> Self {
        Self::new(groups.iter().cloned().collect())
    }

    /// Number of idioms in the cycle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the cycle is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Idioms in browse order.
    #[must_use]
    pub fn order(&self) -> &[Idiom] {
        &self.order
    }

    /// Index of the current idiom.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// The idiom under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&Idiom> {
        self.position.and_then(|index| self.order.get(index))
    }

    /// Move to the idiom with the given text.
    ///
    /// Leaves the cursor untouched and returns `None` when no idiom matches.
    pub fn select(&mut self, name: &str) -> Option<&Idiom> {
        let index = self.order.iter().position(|idiom| idiom.idiom == name)?;
        self.position = Some(index);
        self.current()
    }

    /// Advance to the next idiom, wrapping after the last one.
    pub fn next_idiom(&mut self) -> Option<&Idiom> {
        let len = self.order.len();
        self.position = self.position.map(|index| {
            let next = index.saturating_add(1);
            if next >= len { 0 } else { next }
        });
        self.current()
    }

    /// Step back to the previous idiom, wrapping before the first one.
    pub fn previous_idiom(&mut self) -> Option<&Idiom> {
        let last = self.order.len().saturating_sub(1);
        self.position = self
            .position
            .map(|index| index.checked_sub(1).unwrap_or(last));
        self.current()
    }
}
