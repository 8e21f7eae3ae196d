//! Evaluation stack.

use cvm_types::StackItem;

/// LIFO stack of [`StackItem`]s.
///
/// Positions passed to [`peek`](EvaluationStack::peek) count down from
/// the top: `0` is the most recently pushed item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationStack {
    items: Vec<StackItem>,
}

impl EvaluationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: impl Into<StackItem>) {
        self.items.push(item.into());
    }

    pub fn pop(&mut self) -> Option<StackItem> {
        self.items.pop()
    }

    /// The item `n` positions below the top, without removing it.
    pub fn peek(&self, n: usize) -> Option<&StackItem> {
        let idx = self.items.len().checked_sub(n.checked_add(1)?)?;
        self.items.get(idx)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items from bottom to top.
    pub fn as_slice(&self) -> &[StackItem] {
        &self.items
    }
}

impl FromIterator<StackItem> for EvaluationStack {
    fn from_iter<I: IntoIterator<Item = StackItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
