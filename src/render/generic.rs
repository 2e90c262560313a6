//! Plain text fallback for formats without a dedicated renderer.
//!
//! There is no container for definition lists here: every `dt` and `dd` is
//! a paragraph of its own, so a new sibling is just a paragraph close
//! followed by an open.

use smallvec::SmallVec;

use super::{HtmlWriter, ListState, Renderer};
use crate::block::{DlEvent, EventKind, ListKind, Tag};

/// Renders events as plain text paragraphs separated by blank lines.
#[derive(Debug, Default)]
pub struct GenericRenderer {
    out: HtmlWriter,
    state: ListState,
    lists: SmallVec<[ListKind; 4]>,
}

impl GenericRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn end_line(&mut self) {
        if self.out.last_byte().is_some_and(|b| b != b'\n') {
            self.out.newline();
        }
    }

    fn block_start(&mut self) {
        self.end_line();
        if !self.out.is_empty() {
            self.out.newline();
        }
    }
}

impl Renderer for GenericRenderer {
    fn paragraph_start(&mut self) {
        self.block_start();
    }

    fn paragraph_end(&mut self) {
        self.end_line();
    }

    fn preformatted_start(&mut self) {
        self.block_start();
    }

    fn preformatted_end(&mut self) {}

    fn code(&mut self, line: &[u8]) {
        self.out.write_str("  ");
        self.out.write_bytes(line);
        self.out.newline();
    }

    fn list_start(&mut self, kind: ListKind) {
        if self.lists.is_empty() && !self.state.in_item() {
            self.block_start();
        }
        self.lists.push(kind);
    }

    fn list_end(&mut self, _kind: ListKind) {
        self.lists.pop();
    }

    fn list_item_start(&mut self, level: u8) {
        self.end_line();
        for _ in 0..level {
            self.out.write_str("  ");
        }
        self.out.write_byte(match self.lists.last() {
            Some(ListKind::Ordered) => b'-',
            _ => b'*',
        });
    }

    fn list_item_end(&mut self) {
        self.end_line();
    }

    fn text(&mut self, text: &[u8]) {
        self.out.write_bytes(text);
    }

    fn soft_break(&mut self) {
        self.out.newline();
    }

    fn definition_list(&mut self, event: &DlEvent, _class: Option<&str>) -> bool {
        self.state.advance(event);

        match (event.tag, event.kind) {
            (Tag::List, _) => {}
            (_, EventKind::Enter) => self.block_start(),
            (_, EventKind::Exit) => self.end_line(),
        }
        true
    }

    fn finish(self) -> String {
        self.out.into_string()
    }
}
