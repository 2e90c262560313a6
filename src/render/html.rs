//! XHTML output.
//!
//! [`HtmlWriter`] is the byte buffer with escaping helpers, [`HtmlRenderer`]
//! maps events onto it.

use super::{ListState, Renderer};
use crate::block::{DlEvent, EventKind, ListKind, Tag};
use crate::escape;
use crate::Options;

/// HTML output writer with pre-allocated, reusable buffer.
///
/// # Example
/// ```
/// use deflist::HtmlWriter;
///
/// let mut writer = HtmlWriter::with_capacity_for(1000);
/// writer.write_str("<dd>");
/// writer.write_escaped_text(b"a <b>");
/// writer.write_str("</dd>");
///
/// assert_eq!(writer.into_string(), "<dd>a &lt;b&gt;</dd>");
/// ```
#[derive(Debug)]
pub struct HtmlWriter {
    out: Vec<u8>,
}

impl HtmlWriter {
    /// Create a new writer with default capacity.
    #[inline]
    pub fn new() -> Self {
        Self {
            out: Vec::with_capacity(1024),
        }
    }

    /// Create with pre-allocated capacity based on expected input size.
    ///
    /// Markup roughly doubles short definition lists; reserve for that.
    #[inline]
    pub fn with_capacity_for(input_len: usize) -> Self {
        Self {
            out: Vec::with_capacity(input_len * 2 + 64),
        }
    }

    /// Write raw bytes without escaping.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(bytes);
    }

    /// Write a static string (compile-time known).
    #[inline]
    pub fn write_str(&mut self, s: &'static str) {
        self.out.extend_from_slice(s.as_bytes());
    }

    /// Write a single byte.
    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        self.out.push(b);
    }

    /// Write a newline.
    #[inline]
    pub fn newline(&mut self) {
        self.out.push(b'\n');
    }

    /// Write text with escaping (for element content).
    #[inline]
    pub fn write_escaped_text(&mut self, text: &[u8]) {
        escape::escape_text_into(&mut self.out, text);
    }

    /// Write ` class="..."`, escaped.
    #[inline]
    pub fn write_class_attr(&mut self, class: &str) {
        self.write_str(" class=\"");
        escape::escape_attr_into(&mut self.out, class);
        self.write_byte(b'"');
    }

    /// Write a decimal number.
    pub fn write_u32(&mut self, mut n: u32) {
        let mut digits = [0u8; 10];
        let mut i = digits.len();
        loop {
            i -= 1;
            digits[i] = b'0' + (n % 10) as u8;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        self.write_bytes(&digits[i..]);
    }

    /// Last byte written, if any.
    #[inline]
    pub fn last_byte(&self) -> Option<u8> {
        self.out.last().copied()
    }

    /// Current output length.
    #[inline]
    pub fn len(&self) -> usize {
        self.out.len()
    }

    /// Check if output is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Get output as byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.out
    }

    /// Take ownership as String.
    ///
    /// Tags and escapes are ASCII and text is copied from a `&str`, so the
    /// lossy path only triggers if a range was cut mid-character.
    pub fn into_string(self) -> String {
        match String::from_utf8(self.out) {
            Ok(s) => s,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }

    // --- HTML Tag Helpers ---

    /// Write opening tag with optional class: `<tagname class="...">`
    #[inline]
    pub fn open_tag(&mut self, tag: &'static str, class: Option<&str>) {
        self.write_byte(b'<');
        self.write_str(tag);
        if let Some(class) = class {
            self.write_class_attr(class);
        }
        self.write_byte(b'>');
    }

    /// Write closing tag: `</tagname>`
    #[inline]
    pub fn close_tag(&mut self, tag: &'static str) {
        self.write_str("</");
        self.write_str(tag);
        self.write_byte(b'>');
    }

    /// Write closing tag with newline: `</tagname>\n`
    #[inline]
    pub fn close_tag_nl(&mut self, tag: &'static str) {
        self.close_tag(tag);
        self.newline();
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders events as XHTML.
#[derive(Debug)]
pub struct HtmlRenderer {
    writer: HtmlWriter,
    dt_fancy: bool,
    state: ListState,
    /// Open host lists.
    list_depth: usize,
    /// Whether the innermost `<li>` still has its `<div class="li">` open.
    li_div_open: bool,
    /// Whether the next preformatted line is the first of its block.
    first_code_line: bool,
}

impl HtmlRenderer {
    pub fn new(options: &Options) -> Self {
        Self::with_writer(HtmlWriter::new(), options)
    }

    /// Create a renderer sized for an input of `input_len` bytes.
    pub fn with_capacity_for(input_len: usize, options: &Options) -> Self {
        Self::with_writer(HtmlWriter::with_capacity_for(input_len), options)
    }

    fn with_writer(writer: HtmlWriter, options: &Options) -> Self {
        Self {
            writer,
            dt_fancy: options.dt_fancy,
            state: ListState::default(),
            list_depth: 0,
            li_div_open: false,
            first_code_line: true,
        }
    }

    fn close_li_div(&mut self) {
        if self.li_div_open {
            self.writer.write_str("</div>\n");
            self.li_div_open = false;
        }
    }

    fn list_tag(kind: ListKind) -> &'static str {
        match kind {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

impl Renderer for HtmlRenderer {
    fn paragraph_start(&mut self) {
        self.writer.write_str("\n<p>\n");
    }

    fn paragraph_end(&mut self) {
        self.writer.write_str("\n</p>\n");
    }

    fn preformatted_start(&mut self) {
        self.writer.write_str("<pre class=\"code\">");
        self.first_code_line = true;
    }

    fn preformatted_end(&mut self) {
        self.writer.close_tag_nl("pre");
    }

    fn code(&mut self, line: &[u8]) {
        if !self.first_code_line {
            self.writer.newline();
        }
        self.first_code_line = false;
        self.writer.write_escaped_text(line);
    }

    fn list_start(&mut self, kind: ListKind) {
        if self.list_depth == 0 && !self.state.in_item() {
            self.writer.newline();
        }
        self.close_li_div();
        self.list_depth += 1;
        self.writer.open_tag(Self::list_tag(kind), None);
        self.writer.newline();
    }

    fn list_end(&mut self, kind: ListKind) {
        self.list_depth = self.list_depth.saturating_sub(1);
        self.writer.close_tag_nl(Self::list_tag(kind));
    }

    fn list_item_start(&mut self, level: u8) {
        self.writer.write_str("<li class=\"level");
        self.writer.write_u32(u32::from(level));
        self.writer.write_str("\"><div class=\"li\">");
        self.li_div_open = true;
    }

    fn list_item_end(&mut self) {
        self.close_li_div();
        self.writer.close_tag_nl("li");
    }

    fn text(&mut self, text: &[u8]) {
        self.writer.write_escaped_text(text);
    }

    fn soft_break(&mut self) {
        self.writer.newline();
    }

    fn definition_list(&mut self, event: &DlEvent, class: Option<&str>) -> bool {
        self.state.advance(event);

        match (event.tag, event.kind) {
            (Tag::List, EventKind::Enter) => {
                self.writer.newline();
                self.writer.open_tag("dl", class);
                self.writer.newline();
            }
            (Tag::List, EventKind::Exit) => self.writer.close_tag_nl("dl"),
            (Tag::Term, EventKind::Enter) => {
                self.writer.open_tag("dt", class);
                if self.dt_fancy {
                    self.writer.write_str("<span class=\"term\">");
                }
            }
            (Tag::Term, EventKind::Exit) => {
                if self.dt_fancy {
                    self.writer.close_tag("span");
                }
                self.writer.close_tag_nl("dt");
            }
            (Tag::Definition, EventKind::Enter) => self.writer.open_tag("dd", class),
            (Tag::Definition, EventKind::Exit) => self.writer.close_tag_nl("dd"),
        }
        true
    }

    fn finish(self) -> String {
        self.writer.into_string()
    }
}
