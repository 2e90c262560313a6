//! Line scanner for definition list boundaries.
//!
//! Recognized line shapes (indentation is two-or-more spaces or one-or-more
//! tabs, never mixed):
//!
//! ```text
//!   ; term            entry (outside a block) or continuation term
//!   ;class| term      same, with a class for the dt
//!   : definition      continuation definition
//!   ; term : def      " : " splits a term from its first definition
//!                     a whitespace-only line ends the block
//! ```
//!
//! Scanners only look at one line and never move past it, so the parser
//! can commit to a match without backtracking.

use memchr::memmem;

use super::event::{ListKind, Tag};
use crate::cursor::Cursor;
use crate::Range;

/// Marker opening a term line.
pub const TERM_MARKER: u8 = b';';
/// Marker opening a definition line.
pub const DEFINITION_MARKER: u8 = b':';
/// Separates a per-item class from the item text.
pub const CLASS_SEPARATOR: u8 = b'|';

const INLINE_DEFINITION: &[u8] = b" : ";
const MACRO_OPEN: &[u8] = b"~~dlist:";
const MACRO_CLOSE: &[u8] = b"~~";

/// Whether the scanner is outside or inside a definition list block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Outside,
    InBlock,
}

/// The boundary shapes the scanner recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Term line that opens a block.
    EntryTerm,
    /// Term line inside an open block.
    ContTerm,
    /// Definition line inside an open block.
    ContDef,
    /// `" : "` inside a line of an open block.
    InlineDef,
    /// Blank line closing the block.
    Exit,
}

/// A matched boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub pattern: Pattern,
    /// The matched marker text (indentation, marker and optional `class|`).
    pub span: Range,
    /// Class given between the marker and `|`, trimmed. Empty if absent.
    pub class: Range,
}

impl Boundary {
    /// The element this boundary opens.
    pub fn tag(&self) -> Tag {
        match self.pattern {
            Pattern::EntryTerm | Pattern::ContTerm => Tag::Term,
            Pattern::ContDef | Pattern::InlineDef => Tag::Definition,
            Pattern::Exit => Tag::List,
        }
    }

    /// Offset where the item text following the marker begins.
    #[inline]
    pub fn text_start(&self) -> usize {
        self.span.end_usize()
    }
}

/// A `~~dlist:name~~` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroToken {
    /// The whole token.
    pub span: Range,
    /// The class name, trimmed.
    pub name: Range,
}

/// A host list item line (`  * item` or `  - item`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItemLine {
    pub kind: ListKind,
    pub level: u8,
    /// Everything after the marker.
    pub text: Range,
}

/// Scan the start of a line for a boundary.
///
/// Outside a block only a term line matches. Inside a block, term and
/// definition lines continue it and a blank line ends it.
pub fn scan_line(input: &[u8], line: Range, mode: Mode) -> Option<Boundary> {
    if mode == Mode::InBlock && is_blank_line(input, line) {
        let span = match line.start {
            0 => Range::empty_at(0),
            start => Range::new(start - 1, start),
        };
        return Some(Boundary {
            pattern: Pattern::Exit,
            span,
            class: Range::empty_at(line.start),
        });
    }

    let mut cursor = Cursor::new_at(&input[..line.end_usize()], line.start_usize());
    scan_indent(&mut cursor)?;

    let pattern = match (cursor.peek()?, mode) {
        (TERM_MARKER, Mode::Outside) => Pattern::EntryTerm,
        (TERM_MARKER, Mode::InBlock) => Pattern::ContTerm,
        (DEFINITION_MARKER, Mode::InBlock) => Pattern::ContDef,
        _ => return None,
    };
    cursor.bump();

    let after_marker = cursor.offset();
    let (class, span_end) = match cursor.find(CLASS_SEPARATOR) {
        Some(len) => {
            let class = Range::from_usize(after_marker, after_marker + len).trim(input);
            (class, after_marker + len + 1)
        }
        None => (Range::empty_at(after_marker as u32), after_marker),
    };

    Some(Boundary {
        pattern,
        span: Range::from_usize(line.start_usize(), span_end),
        class,
    })
}

/// Find the first `" : "` shorthand inside a content range.
pub fn scan_inline_definition(input: &[u8], content: Range) -> Option<Boundary> {
    let at = content.start_usize() + memmem::find(content.slice(input), INLINE_DEFINITION)?;
    let end = at + INLINE_DEFINITION.len();
    Some(Boundary {
        pattern: Pattern::InlineDef,
        span: Range::from_usize(at, end),
        class: Range::empty_at(end as u32),
    })
}

/// Find the first `~~dlist:name~~` token inside a content range.
pub fn scan_macro(input: &[u8], content: Range) -> Option<MacroToken> {
    let haystack = content.slice(input);
    let open = memmem::find(haystack, MACRO_OPEN)?;
    let name_start = open + MACRO_OPEN.len();
    let name_len = memmem::find(&haystack[name_start..], MACRO_CLOSE)?;
    let name_end = name_start + name_len;

    let base = content.start_usize();
    Some(MacroToken {
        span: Range::from_usize(base + open, base + name_end + MACRO_CLOSE.len()),
        name: Range::from_usize(base + name_start, base + name_end).trim(input),
    })
}

/// Scan a host list item line.
pub fn scan_list_item(input: &[u8], line: Range) -> Option<ListItemLine> {
    let mut cursor = Cursor::new_at(&input[..line.end_usize()], line.start_usize());
    let columns = scan_indent(&mut cursor)?;
    let kind = match cursor.peek()? {
        b'*' => ListKind::Unordered,
        b'-' => ListKind::Ordered,
        _ => return None,
    };
    cursor.bump();

    Some(ListItemLine {
        kind,
        level: (columns / 2).clamp(1, u8::MAX as usize) as u8,
        text: Range::from_usize(cursor.offset(), line.end_usize()),
    })
}

/// Text of a preformatted line: the line minus two leading spaces or one tab.
pub fn scan_preformatted(input: &[u8], line: Range) -> Option<Range> {
    let mut cursor = Cursor::new_at(&input[..line.end_usize()], line.start_usize());
    if cursor.eat_bytes(b"  ") || cursor.eat(b'\t') {
        Some(Range::from_usize(cursor.offset(), line.end_usize()))
    } else {
        None
    }
}

/// A line holding nothing but spaces and tabs.
pub fn is_blank_line(input: &[u8], line: Range) -> bool {
    line.slice(input)
        .iter()
        .all(|&b| b == b' ' || b == b'\t' || b == b'\r')
}

/// Skip list-style indentation, returning its width in columns (tab = 2).
fn scan_indent(cursor: &mut Cursor<'_>) -> Option<usize> {
    match cursor.skip_spaces() {
        0 => match cursor.skip_tabs() {
            0 => None,
            tabs => Some(tabs * 2),
        },
        1 => None,
        spaces => Some(spaces),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(input: &str) -> Range {
        Range::from_usize(0, input.len())
    }

    fn scan(input: &str, mode: Mode) -> Option<Boundary> {
        scan_line(input.as_bytes(), line(input), mode)
    }

    #[test]
    fn test_entry_with_spaces() {
        let b = scan("  ; Term", Mode::Outside).unwrap();
        assert_eq!(b.pattern, Pattern::EntryTerm);
        assert_eq!(b.tag(), Tag::Term);
        assert_eq!(b.text_start(), 3);
        assert!(b.class.is_empty());
    }

    #[test]
    fn test_entry_with_tabs() {
        let b = scan("\t\t;Term", Mode::Outside).unwrap();
        assert_eq!(b.pattern, Pattern::EntryTerm);
        assert_eq!(b.text_start(), 3);
    }

    #[test]
    fn test_single_space_is_not_entry() {
        assert_eq!(scan(" ; Term", Mode::Outside), None);
        assert_eq!(scan("; Term", Mode::Outside), None);
    }

    #[test]
    fn test_mixed_indentation_is_not_entry() {
        assert_eq!(scan("  \t; Term", Mode::Outside), None);
        assert_eq!(scan("\t  ; Term", Mode::Outside), None);
    }

    #[test]
    fn test_definition_never_opens_block() {
        assert_eq!(scan("  : Definition", Mode::Outside), None);
    }

    #[test]
    fn test_continuation_lines() {
        assert_eq!(scan("  ; Next", Mode::InBlock).unwrap().pattern, Pattern::ContTerm);
        let dd = scan("    : Def", Mode::InBlock).unwrap();
        assert_eq!(dd.pattern, Pattern::ContDef);
        assert_eq!(dd.tag(), Tag::Definition);
    }

    #[test]
    fn test_other_marker_is_content() {
        assert_eq!(scan("  = Term", Mode::InBlock), None);
        assert_eq!(scan("continues", Mode::InBlock), None);
    }

    #[test]
    fn test_class_before_pipe() {
        let input = "  ;dtclass| term";
        let b = scan(input, Mode::Outside).unwrap();
        assert_eq!(b.class.slice(input.as_bytes()), b"dtclass");
        assert_eq!(&input[b.text_start()..], " term");
        assert_eq!(b.span.slice(input.as_bytes()), b"  ;dtclass|");
    }

    #[test]
    fn test_class_is_trimmed() {
        let input = "  : wide |def";
        let b = scan(input, Mode::InBlock).unwrap();
        assert_eq!(b.class.slice(input.as_bytes()), b"wide");
        assert_eq!(&input[b.text_start()..], "def");
    }

    #[test]
    fn test_blank_line_exits_block() {
        let input = "  ; Term\n   \t";
        let blank = Range::from_usize(9, input.len());
        let b = scan_line(input.as_bytes(), blank, Mode::InBlock).unwrap();
        assert_eq!(b.pattern, Pattern::Exit);
        assert_eq!(b.span.slice(input.as_bytes()), b"\n");
    }

    #[test]
    fn test_blank_line_outside_is_not_boundary() {
        assert_eq!(scan("", Mode::Outside), None);
    }

    #[test]
    fn test_inline_definition() {
        let input = "  ; Term : Definition";
        let content = Range::from_usize(3, input.len());
        let b = scan_inline_definition(input.as_bytes(), content).unwrap();
        assert_eq!(b.pattern, Pattern::InlineDef);
        assert_eq!(b.span.slice(input.as_bytes()), b" : ");
        assert_eq!(&input[b.text_start()..], "Definition");
    }

    #[test]
    fn test_inline_definition_needs_single_spaces() {
        let input = "Term: Definition and a:b";
        assert_eq!(scan_inline_definition(input.as_bytes(), line(input)), None);
    }

    #[test]
    fn test_macro_token() {
        let input = "before ~~dlist: wide ~~ after";
        let token = scan_macro(input.as_bytes(), line(input)).unwrap();
        assert_eq!(token.span.slice(input.as_bytes()), b"~~dlist: wide ~~");
        assert_eq!(token.name.slice(input.as_bytes()), b"wide");
    }

    #[test]
    fn test_macro_needs_closing() {
        let input = "~~dlist:wide";
        assert_eq!(scan_macro(input.as_bytes(), line(input)), None);
    }

    #[test]
    fn test_macro_empty_name() {
        let input = "~~dlist:~~";
        let token = scan_macro(input.as_bytes(), line(input)).unwrap();
        assert!(token.name.is_empty());
    }

    #[test]
    fn test_list_items() {
        let input = "  * Part 1";
        let item = scan_list_item(input.as_bytes(), line(input)).unwrap();
        assert_eq!(item.kind, ListKind::Unordered);
        assert_eq!(item.level, 1);
        assert_eq!(item.text.slice(input.as_bytes()), b" Part 1");

        let input = "\t\t- Nested";
        let item = scan_list_item(input.as_bytes(), line(input)).unwrap();
        assert_eq!(item.kind, ListKind::Ordered);
        assert_eq!(item.level, 2);
    }

    #[test]
    fn test_list_item_odd_indent() {
        let input = "   * three spaces";
        assert_eq!(scan_list_item(input.as_bytes(), line(input)).unwrap().level, 1);
    }

    #[test]
    fn test_preformatted_strips_one_indent() {
        let input = "    code";
        let text = scan_preformatted(input.as_bytes(), line(input)).unwrap();
        assert_eq!(text.slice(input.as_bytes()), b"  code");
        assert_eq!(scan_preformatted(b" x", Range::new(0, 2)), None);
    }
}
