//! Block parser implementation.
//!
//! Walks the input one line at a time in one of two modes. Outside a
//! definition list the line is classified as an entry term, a host list
//! item, preformatted text, a paragraph line or a blank line. Inside a list
//! it is a boundary (continuation or exit), an embedded list item, or
//! content of the open item.

use crate::cursor::Cursor;
use crate::{Options, Range};

use super::builder::EventBuilder;
use super::event::BlockEvent;
use super::lists::ListNesting;
use super::register::StyleRegister;
use super::scanner::{self, Mode, Pattern};

/// Block parser state.
pub struct BlockParser<'a> {
    /// Input bytes.
    input: &'a [u8],
    /// Current cursor position.
    cursor: Cursor<'a>,
    /// Outside or inside a definition list.
    mode: Mode,
    /// Definition list events.
    builder: EventBuilder<'a>,
    /// Class for the next definition list.
    register: StyleRegister,
    /// Host lists, at document level or inside the open item.
    lists: ListNesting,
    /// Whether we're currently in a paragraph.
    in_paragraph: bool,
    /// Content of the open paragraph.
    paragraph: Vec<BlockEvent>,
    /// Whether we're currently in a preformatted block.
    in_preformatted: bool,
}

impl<'a> BlockParser<'a> {
    /// Create a new block parser.
    pub fn new(input: &'a [u8], options: &'a Options) -> Self {
        Self {
            input,
            cursor: Cursor::new(input),
            mode: Mode::Outside,
            builder: EventBuilder::new(input, options),
            register: StyleRegister::new(),
            lists: ListNesting::new(),
            in_paragraph: false,
            paragraph: Vec::new(),
            in_preformatted: false,
        }
    }

    /// The pending class for the next definition list.
    pub fn register(&self) -> &StyleRegister {
        &self.register
    }

    /// Parse all blocks and collect events.
    pub fn parse(&mut self, events: &mut Vec<BlockEvent>) {
        while !self.cursor.is_eof() {
            let line = self.next_line();
            match self.mode {
                Mode::Outside => self.parse_outside_line(line, events),
                Mode::InBlock => self.parse_block_line(line, events),
            }
        }

        // End of input is an implicit exit boundary
        if self.mode == Mode::InBlock {
            self.exit_block(Range::empty_at(self.input.len() as u32), events);
        }
        self.close_host_blocks(events);
    }

    /// Consume the next line, without its line terminator.
    fn next_line(&mut self) -> Range {
        let line = self.cursor.consume_line();
        if line.end > line.start && self.input[line.end_usize() - 1] == b'\r' {
            Range::new(line.start, line.end - 1)
        } else {
            line
        }
    }

    fn parse_outside_line(&mut self, line: Range, events: &mut Vec<BlockEvent>) {
        if scanner::is_blank_line(self.input, line) {
            self.close_host_blocks(events);
            return;
        }

        if let Some(boundary) = scanner::scan_line(self.input, line, Mode::Outside) {
            self.close_host_blocks(events);
            self.builder.enter(&boundary, &mut self.register, events);
            self.mode = Mode::InBlock;
            self.item_text(Range::from_usize(boundary.text_start(), line.end_usize()), events);
            return;
        }

        if let Some(item) = scanner::scan_list_item(self.input, line) {
            self.close_paragraph(events);
            self.close_preformatted(events);
            self.lists.item(&item, events);
            return;
        }
        self.lists.close(events);

        if let Some(code) = scanner::scan_preformatted(self.input, line) {
            self.close_paragraph(events);
            if !self.in_preformatted {
                self.in_preformatted = true;
                events.push(BlockEvent::PreformattedStart);
            }
            events.push(BlockEvent::Code(code));
            return;
        }
        self.close_preformatted(events);

        self.parse_paragraph_line(line);
    }

    fn parse_block_line(&mut self, line: Range, events: &mut Vec<BlockEvent>) {
        if let Some(boundary) = scanner::scan_line(self.input, line, Mode::InBlock) {
            self.lists.close(events);
            if boundary.pattern == Pattern::Exit {
                self.exit_block(boundary.span, events);
                // The blank line itself still ends host blocks
                self.parse_outside_line(line, events);
            } else {
                self.builder.matched(&boundary, events);
                self.item_text(Range::from_usize(boundary.text_start(), line.end_usize()), events);
            }
            return;
        }

        if let Some(item) = scanner::scan_list_item(self.input, line) {
            self.lists.item(&item, events);
            return;
        }

        if self.lists.is_open() {
            self.lists.close(events);
        } else {
            events.push(BlockEvent::SoftBreak);
        }
        self.item_text(line, events);
    }

    /// Emit item content, splitting off definitions at `" : "`.
    fn item_text(&mut self, mut content: Range, events: &mut Vec<BlockEvent>) {
        while let Some(boundary) = scanner::scan_inline_definition(self.input, content) {
            self.item_segment(Range::new(content.start, boundary.span.start), events);
            self.builder.matched(&boundary, events);
            content = Range::new(boundary.span.end, content.end);
        }
        self.item_segment(content, events);
    }

    /// Push one piece of item text with `~~dlist:name~~` tokens removed.
    ///
    /// The name is dropped: the register is cleared when the block exits,
    /// so a class set from inside a block could never reach a list.
    fn item_segment(&self, mut rest: Range, events: &mut Vec<BlockEvent>) {
        let mut stripped = false;
        while let Some(token) = scanner::scan_macro(self.input, rest) {
            push_text(events, Range::new(rest.start, token.span.start));
            log::trace!("ignoring class token inside definition list at byte {}", token.span.start);
            rest = Range::new(token.span.end, rest.end);
            stripped = true;
        }

        if stripped && rest.trim_end(self.input).is_empty() {
            if let Some(BlockEvent::Text(last)) = events.last().cloned() {
                events.pop();
                push_text(events, last.trim_end(self.input));
            }
            return;
        }
        push_text(events, rest);
    }

    fn exit_block(&mut self, span: Range, events: &mut Vec<BlockEvent>) {
        self.lists.close(events);
        self.builder.exit(span, &mut self.register, events);
        self.mode = Mode::Outside;
    }

    /// Add a paragraph line, pulling out any `~~dlist:name~~` tokens.
    fn parse_paragraph_line(&mut self, line: Range) {
        let mut rest = line.trim_end(self.input);

        if self.in_paragraph {
            self.paragraph.push(BlockEvent::SoftBreak);
        }
        self.in_paragraph = true;

        while let Some(token) = scanner::scan_macro(self.input, rest) {
            push_text(&mut self.paragraph, Range::new(rest.start, token.span.start));
            self.register.set(token.name);
            log::trace!("pending definition list class at byte {}", token.name.start);
            rest = Range::new(token.span.end, rest.end);
        }
        push_text(&mut self.paragraph, rest);

        // A token at the end of the line leaves the text before it trailing
        if rest.is_empty() {
            if let Some(BlockEvent::Text(last)) = self.paragraph.last().cloned() {
                self.paragraph.pop();
                push_text(&mut self.paragraph, last.trim_end(self.input));
            }
        }
    }

    fn close_host_blocks(&mut self, events: &mut Vec<BlockEvent>) {
        self.close_paragraph(events);
        self.close_preformatted(events);
        self.lists.close(events);
    }

    /// Close an open paragraph. A paragraph without text is dropped.
    fn close_paragraph(&mut self, events: &mut Vec<BlockEvent>) {
        if !self.in_paragraph {
            return;
        }
        self.in_paragraph = false;

        let has_text = self
            .paragraph
            .iter()
            .any(|e| matches!(e, BlockEvent::Text(r) if !r.trim(self.input).is_empty()));
        if !has_text {
            self.paragraph.clear();
            return;
        }

        // Breaks left behind by token-only lines
        while matches!(self.paragraph.last(), Some(BlockEvent::SoftBreak)) {
            self.paragraph.pop();
        }
        let leading = self
            .paragraph
            .iter()
            .take_while(|e| matches!(e, BlockEvent::SoftBreak))
            .count();

        events.push(BlockEvent::ParagraphStart);
        events.extend(self.paragraph.drain(..).skip(leading));
        events.push(BlockEvent::ParagraphEnd);
    }

    fn close_preformatted(&mut self, events: &mut Vec<BlockEvent>) {
        if self.in_preformatted {
            self.in_preformatted = false;
            events.push(BlockEvent::PreformattedEnd);
        }
    }
}

fn push_text(events: &mut Vec<BlockEvent>, range: Range) {
    if !range.is_empty() {
        events.push(BlockEvent::Text(range));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{DlEvent, EventKind, ListKind, Tag};

    fn parse_with(input: &str, options: &Options) -> Vec<BlockEvent> {
        let mut parser = BlockParser::new(input.as_bytes(), options);
        let mut events = Vec::new();
        parser.parse(&mut events);
        events
    }

    fn parse(input: &str) -> Vec<BlockEvent> {
        parse_with(input, &Options::default())
    }

    fn dl(events: &[BlockEvent]) -> Vec<(Tag, EventKind)> {
        events
            .iter()
            .filter_map(|e| match e {
                BlockEvent::DefinitionList(d) => Some((d.tag, d.kind)),
                _ => None,
            })
            .collect()
    }

    fn texts<'a>(input: &'a str, events: &[BlockEvent]) -> Vec<&'a str> {
        events
            .iter()
            .filter_map(|e| match e {
                BlockEvent::Text(r) => r.as_str(input.as_bytes()),
                _ => None,
            })
            .collect()
    }

    use EventKind::{Enter, Exit};

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n\n").is_empty());
    }

    #[test]
    fn test_basic_block() {
        let input = "\n  ; Term\n  : Definition\n";
        let events = parse(input);
        assert_eq!(
            dl(&events),
            vec![
                (Tag::List, Enter),
                (Tag::Term, Enter),
                (Tag::Term, Exit),
                (Tag::Definition, Enter),
                (Tag::Definition, Exit),
                (Tag::List, Exit),
            ]
        );
        assert_eq!(texts(input, &events), vec!["Term", "Definition"]);
    }

    #[test]
    fn test_shorthand_matches_multiline_form() {
        let long = "\n  ; Term\n  : Definition\n";
        let short = "\n  ; Term : Definition\n";
        let long_events = parse(long);
        let short_events = parse(short);
        assert_eq!(dl(&long_events), dl(&short_events));
        assert_eq!(texts(long, &long_events), texts(short, &short_events));
    }

    #[test]
    fn test_shorthand_chain() {
        let input = "  ; Term : One : Two";
        let events = parse(input);
        let dds = dl(&events)
            .into_iter()
            .filter(|&t| t == (Tag::Definition, Enter))
            .count();
        assert_eq!(dds, 2);
        assert_eq!(texts(input, &events), vec!["Term", "One", "Two"]);
    }

    #[test]
    fn test_multiple_definitions() {
        let input = "  ; Term\n  : One\n  : Two\n  : Three\n";
        let events = parse(input);
        let tags = dl(&events);
        assert_eq!(tags.iter().filter(|&&t| t == (Tag::Term, Enter)).count(), 1);
        assert_eq!(tags.iter().filter(|&&t| t == (Tag::Definition, Enter)).count(), 3);
    }

    #[test]
    fn test_terms_without_definitions() {
        let input = "  ; One\n  ; Two\n";
        let tags = dl(&parse(input));
        assert_eq!(tags.iter().filter(|&&t| t == (Tag::Term, Enter)).count(), 2);
        assert_eq!(tags.iter().filter(|&&t| t.0 == Tag::Definition).count(), 0);
    }

    #[test]
    fn test_continuation_line() {
        let input = "  ; Term\n  : Definition one\ncontinues\n";
        let events = parse(input);
        let dd = events
            .iter()
            .position(|e| matches!(e, BlockEvent::DefinitionList(DlEvent { tag: Tag::Definition, kind: Enter, .. })))
            .unwrap();
        assert!(matches!(events[dd + 1], BlockEvent::Text(_)));
        assert_eq!(events[dd + 2], BlockEvent::SoftBreak);
        assert!(matches!(events[dd + 3], BlockEvent::Text(_)));
        assert_eq!(texts(input, &events), vec!["Term", "Definition one", "continues"]);
    }

    #[test]
    fn test_blank_line_exits_to_paragraph() {
        let input = "  ; Term\n  : Def\n\nThen new paragraph.\n";
        let events = parse(input);
        let exit = events
            .iter()
            .position(|e| matches!(e, BlockEvent::DefinitionList(DlEvent { tag: Tag::List, kind: Exit, .. })))
            .unwrap();
        assert_eq!(events[exit + 1], BlockEvent::ParagraphStart);
        assert_eq!(events.last(), Some(&BlockEvent::ParagraphEnd));
    }

    #[test]
    fn test_exit_span_is_newline() {
        let input = "  ; T\n\nx";
        let events = parse(input);
        let span = events
            .iter()
            .find_map(|e| match e {
                BlockEvent::DefinitionList(d) if d.tag == Tag::List && d.kind == Exit => Some(d.span),
                _ => None,
            })
            .unwrap();
        assert_eq!(span.slice(input.as_bytes()), b"\n");
    }

    #[test]
    fn test_end_of_input_drains() {
        let events = parse("  ; Term : Def");
        assert_eq!(dl(&events).last(), Some(&(Tag::List, Exit)));
        assert_eq!(dl(&events).len(), 6);
    }

    #[test]
    fn test_preformatted_after_block() {
        let input = "  ; Term\n  : Def\n\n  Preformatted\n";
        let events = parse(input);
        let pre = events
            .iter()
            .position(|e| *e == BlockEvent::PreformattedStart)
            .unwrap();
        match events[pre + 1] {
            BlockEvent::Code(r) => assert_eq!(r.slice(input.as_bytes()), b"Preformatted"),
            ref other => panic!("expected code, got {other:?}"),
        }
        assert_eq!(events[pre + 2], BlockEvent::PreformattedEnd);
    }

    #[test]
    fn test_embedded_list() {
        let input = "  ; Term\n  : Some parts:\n  * Part 1\n  * Part 2\n  ; Term 2\n  : Def\n";
        let events = parse(input);
        let start = events
            .iter()
            .position(|e| matches!(e, BlockEvent::ListStart { .. }))
            .unwrap();
        // No break between the definition text and its list
        assert!(matches!(events[start - 1], BlockEvent::Text(_)));
        let end = events
            .iter()
            .position(|e| matches!(e, BlockEvent::ListEnd { .. }))
            .unwrap();
        assert!(matches!(
            events[end + 1],
            BlockEvent::DefinitionList(DlEvent { tag: Tag::Definition, kind: Exit, .. })
        ));
        assert_eq!(dl(&events).iter().filter(|&&t| t == (Tag::Term, Enter)).count(), 2);
    }

    #[test]
    fn test_list_after_block() {
        let input = "  ; Term\n  : Parts:\n  * Part\n\n  - Item\n";
        let events = parse(input);
        let exit = events
            .iter()
            .position(|e| matches!(e, BlockEvent::DefinitionList(DlEvent { tag: Tag::List, kind: Exit, .. })))
            .unwrap();
        assert_eq!(events[exit + 1], BlockEvent::ListStart { kind: ListKind::Ordered });
    }

    #[test]
    fn test_shorthand_not_split_in_list_item() {
        let input = "  ; Term\n  * a : b\n";
        let events = parse(input);
        assert_eq!(dl(&events).iter().filter(|&&t| t.0 == Tag::Definition).count(), 0);
        assert!(texts(input, &events).contains(&" a : b"));
    }

    #[test]
    fn test_macro_sets_class() {
        let input = "~~dlist:wide~~\n  ; Term : Def\n";
        let events = parse(input);
        assert!(!events.contains(&BlockEvent::ParagraphStart));
        match &events[0] {
            BlockEvent::DefinitionList(d) => {
                assert_eq!(d.class.resolve(input.as_bytes(), &Options::default()), Some("wide"));
            }
            other => panic!("expected dl, got {other:?}"),
        }
    }

    #[test]
    fn test_macro_last_token_wins() {
        let input = "~~dlist:a~~ ~~dlist:b~~\n  ; T\n";
        let events = parse(input);
        match &events[0] {
            BlockEvent::DefinitionList(d) => {
                assert_eq!(d.class.resolve(input.as_bytes(), &Options::default()), Some("b"));
            }
            other => panic!("expected dl, got {other:?}"),
        }
    }

    #[test]
    fn test_macro_removed_from_paragraph() {
        let input = "before ~~dlist:x~~ after";
        let events = parse(input);
        assert_eq!(texts(input, &events), vec!["before ", " after"]);
    }

    #[test]
    fn test_register_does_not_leak() {
        let input = "~~dlist:wide~~\n  ; A\n\n  ; B\n";
        let options = Options::default();
        let events = parse_with(input, &options);
        let classes: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                BlockEvent::DefinitionList(d) if d.tag == Tag::List && d.kind == Enter => {
                    d.class.resolve(input.as_bytes(), &options)
                }
                _ => None,
            })
            .collect();
        assert_eq!(classes, vec!["wide", "plugin_definitionlist"]);
    }

    #[test]
    fn test_unconsumed_macro_stays_pending() {
        let input = "~~dlist:wide~~";
        let options = Options::default();
        let mut parser = BlockParser::new(input.as_bytes(), &options);
        let mut events = Vec::new();
        parser.parse(&mut events);
        assert!(events.is_empty());
        assert_eq!(parser.register().pending(), Some(Range::new(8, 12)));
    }

    #[test]
    fn test_macro_inside_block_is_removed() {
        let input = "  ; T\n  : ~~dlist:x~~ def\n";
        let events = parse(input);
        assert_eq!(texts(input, &events), vec!["T", "def"]);
    }

    #[test]
    fn test_macro_inside_block_does_not_set_class() {
        let input = "  ; T : a ~~dlist:x~~\ncontinued\n\n  ; Next\n";
        let options = Options::default();
        let mut parser = BlockParser::new(input.as_bytes(), &options);
        let mut events = Vec::new();
        parser.parse(&mut events);
        assert_eq!(texts(input, &events), vec!["T", "a", "continued", "Next"]);
        assert_eq!(parser.register().pending(), None);

        let classes: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                BlockEvent::DefinitionList(d) if d.tag == Tag::List && d.kind == Enter => {
                    d.class.resolve(input.as_bytes(), &options)
                }
                _ => None,
            })
            .collect();
        assert_eq!(classes, vec!["plugin_definitionlist", "plugin_definitionlist"]);
    }

    #[test]
    fn test_crlf_lines() {
        let input = "  ; Term\r\n  : Def\r\n";
        let events = parse(input);
        assert_eq!(texts(input, &events), vec!["Term", "Def"]);
    }

    #[test]
    fn test_entry_closes_paragraph() {
        let input = "Intro\n  ; Term\n";
        let events = parse(input);
        assert_eq!(events[0], BlockEvent::ParagraphStart);
        assert_eq!(events[2], BlockEvent::ParagraphEnd);
        assert!(matches!(events[3], BlockEvent::DefinitionList(_)));
    }
}
