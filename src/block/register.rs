//! Pending class name for the next definition list.

use crate::Range;

/// Holds the class set by a `~~dlist:name~~` token until the next list
/// opens.
///
/// One register belongs to one document pass; a fresh parser starts empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleRegister {
    pending: Option<Range>,
}

impl StyleRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a class name. An empty name leaves the register empty.
    pub fn set(&mut self, name: Range) {
        self.pending = (!name.is_empty()).then_some(name);
    }

    /// Consume the pending class name.
    pub fn take(&mut self) -> Option<Range> {
        self.pending.take()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<Range> {
        self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}
