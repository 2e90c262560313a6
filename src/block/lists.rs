//! Nesting of host bullet and ordered lists.
//!
//! Lists appear both at document level and inside definition list items.
//! A deeper item opens a child list inside the current item; a shallower
//! one closes lists until its level is reached.

use smallvec::SmallVec;

use super::event::{BlockEvent, ListKind};
use super::scanner::ListItemLine;

#[derive(Debug, Clone, Copy)]
struct OpenList {
    kind: ListKind,
    level: u8,
}

/// Open host lists, innermost last.
#[derive(Debug, Default)]
pub struct ListNesting {
    stack: SmallVec<[OpenList; 4]>,
}

impl ListNesting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Add an item, opening and closing lists as its level requires.
    pub fn item(&mut self, item: &ListItemLine, events: &mut Vec<BlockEvent>) {
        while let Some(top) = self.stack.last() {
            if top.level <= item.level || self.stack.len() == 1 {
                break;
            }
            events.push(BlockEvent::ListItemEnd);
            events.push(BlockEvent::ListEnd { kind: top.kind });
            self.stack.pop();
        }

        let deeper = self.stack.last().is_some_and(|top| item.level > top.level);
        if deeper || self.stack.is_empty() {
            self.open(item, events);
        } else if let Some(top) = self.stack.last_mut() {
            events.push(BlockEvent::ListItemEnd);
            if top.kind != item.kind {
                events.push(BlockEvent::ListEnd { kind: top.kind });
                events.push(BlockEvent::ListStart { kind: item.kind });
                top.kind = item.kind;
            }
            top.level = item.level;
        }

        events.push(BlockEvent::ListItemStart { level: item.level });
        if !item.text.is_empty() {
            events.push(BlockEvent::Text(item.text));
        }
    }

    /// Close every open list.
    pub fn close(&mut self, events: &mut Vec<BlockEvent>) {
        while let Some(top) = self.stack.pop() {
            events.push(BlockEvent::ListItemEnd);
            events.push(BlockEvent::ListEnd { kind: top.kind });
        }
    }

    fn open(&mut self, item: &ListItemLine, events: &mut Vec<BlockEvent>) {
        events.push(BlockEvent::ListStart { kind: item.kind });
        self.stack.push(OpenList {
            kind: item.kind,
            level: item.level,
        });
    }
}
