//! Definition list event builder.
//!
//! Turns scanner boundaries into `dl`/`dt`/`dd` enter and exit events. Open
//! items live on an explicit stack: a new sibling pops the previous item,
//! and the block exit drains whatever is left before closing the `dl`.
//!
//! Only the event that consumed a boundary carries its source text: item
//! enters hold their marker, the `dl` exit holds the blank-line newline and
//! every other event has an empty span at its position.

use smallvec::SmallVec;

use super::event::{BlockEvent, ClassAttr, DlEvent, EventKind, Tag};
use super::register::StyleRegister;
use super::scanner::Boundary;
use crate::{Options, Range};

/// Builds the events of one definition list block at a time.
#[derive(Debug)]
pub struct EventBuilder<'a> {
    input: &'a [u8],
    options: &'a Options,
    /// Open `dt`/`dd` elements, innermost last.
    stack: SmallVec<[Tag; 4]>,
    /// Whether a `dl` is open.
    in_list: bool,
    /// Index of the first content event of the innermost open item.
    content_start: usize,
}

impl<'a> EventBuilder<'a> {
    pub fn new(input: &'a [u8], options: &'a Options) -> Self {
        Self {
            input,
            options,
            stack: SmallVec::new(),
            in_list: false,
            content_start: 0,
        }
    }

    /// Whether a block is currently open.
    pub fn is_open(&self) -> bool {
        self.in_list
    }

    /// Number of open `dt`/`dd` elements.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Open a block at its entry term line.
    pub fn enter(
        &mut self,
        boundary: &Boundary,
        register: &mut StyleRegister,
        events: &mut Vec<BlockEvent>,
    ) {
        debug_assert!(!self.in_list && self.stack.is_empty());

        let class = match register.take() {
            Some(name) => ClassAttr::Source(name),
            None if self.options.class_name.is_empty() => ClassAttr::None,
            None => ClassAttr::Configured,
        };
        log::debug!("definition list opened at byte {} ({:?})", boundary.span.start, class);

        events.push(BlockEvent::DefinitionList(DlEvent {
            tag: Tag::List,
            kind: EventKind::Enter,
            class,
            span: Range::empty_at(boundary.span.start),
        }));
        self.in_list = true;
        self.open_item(Tag::Term, boundary, events);
    }

    /// Close the current item and open the one a continuation boundary starts.
    pub fn matched(&mut self, boundary: &Boundary, events: &mut Vec<BlockEvent>) {
        debug_assert!(self.in_list);

        if let Some(tag) = self.stack.pop() {
            self.close_item(tag, boundary.span.start, events);
        }
        self.open_item(boundary.tag(), boundary, events);
    }

    /// Close every open item and the list itself.
    ///
    /// The register is cleared whether or not this block consumed it.
    pub fn exit(&mut self, span: Range, register: &mut StyleRegister, events: &mut Vec<BlockEvent>) {
        while let Some(tag) = self.stack.pop() {
            self.close_item(tag, span.start, events);
        }

        if self.in_list {
            events.push(BlockEvent::DefinitionList(DlEvent {
                tag: Tag::List,
                kind: EventKind::Exit,
                class: ClassAttr::None,
                span,
            }));
            log::debug!("definition list closed at byte {}", span.start);
        }
        self.in_list = false;
        register.clear();
    }

    fn open_item(&mut self, tag: Tag, boundary: &Boundary, events: &mut Vec<BlockEvent>) {
        log::trace!("open {} at byte {}", tag.as_str(), boundary.span.start);
        events.push(BlockEvent::DefinitionList(DlEvent {
            tag,
            kind: EventKind::Enter,
            class: ClassAttr::from_range(boundary.class),
            span: boundary.span,
        }));
        self.stack.push(tag);
        self.content_start = events.len();
    }

    fn close_item(&mut self, tag: Tag, pos: u32, events: &mut Vec<BlockEvent>) {
        self.trim_content(events);
        events.push(BlockEvent::DefinitionList(DlEvent {
            tag,
            kind: EventKind::Exit,
            class: ClassAttr::None,
            span: Range::empty_at(pos),
        }));
    }

    /// Strip whitespace and line breaks from both ends of the item body.
    fn trim_content(&self, events: &mut Vec<BlockEvent>) {
        let start = self.content_start.min(events.len());

        while events.len() > start {
            let last = events.len() - 1;
            match events[last] {
                BlockEvent::SoftBreak => {
                    events.pop();
                }
                BlockEvent::Text(range) => {
                    let trimmed = range.trim_end(self.input);
                    if trimmed.is_empty() {
                        events.pop();
                    } else {
                        events[last] = BlockEvent::Text(trimmed);
                        break;
                    }
                }
                _ => break,
            }
        }

        while events.len() > start {
            match events[start] {
                BlockEvent::SoftBreak => {
                    events.remove(start);
                }
                BlockEvent::Text(range) => {
                    let trimmed = range.trim_start(self.input);
                    if trimmed.is_empty() {
                        events.remove(start);
                    } else {
                        events[start] = BlockEvent::Text(trimmed);
                        break;
                    }
                }
                _ => break,
            }
        }
    }
}
