//! OpenDocument text output.
//!
//! Definition lists have no container element in ODF. A `dl` closes the
//! current paragraph, each `dt`/`dd` becomes a paragraph with its own
//! automatic style, and the list exit resumes ordinary body paragraphs.
//!
//! Paragraphs open lazily: `p_open` only records the style and the element
//! is written with the first content, so a paragraph that never receives
//! any is dropped.

use rustc_hash::FxHashSet;

use super::{HtmlWriter, ListState, Renderer};
use crate::block::{DlEvent, EventKind, ListKind, Tag};

/// Paragraph style for definition terms.
pub const TERM_STYLE: &str = "def_term";
/// Paragraph style for definitions.
pub const DEFINITION_STYLE: &str = "def_list";

const BODY_STYLE: &str = "Text_20_body";
const PREFORMATTED_STYLE: &str = "Preformatted_20_Text";

const TERM_STYLE_XML: &str = r#"<style:style style:name="def_term" style:display-name="def_term" style:family="paragraph"><style:paragraph-properties fo:margin-top="0.18cm" fo:margin-bottom="0cm" fo:keep-together="always" style:page-number="auto" fo:keep-with-next="always"/><style:text-properties fo:font-weight="bold"/></style:style>"#;
const DEFINITION_STYLE_XML: &str = r#"<style:style style:name="def_list" style:display-name="def_list" style:family="paragraph"><style:paragraph-properties fo:margin-left="0.25cm" fo:margin-right="0cm" fo:text-indent="0cm" style:auto-text-indent="false"/></style:style>"#;

const DOCUMENT_START: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    "\n",
    r#"<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" xmlns:fo="urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0" office:version="1.2">"#,
    "\n",
);

/// Automatic styles of one document, each written once in registration
/// order.
#[derive(Debug, Default)]
pub struct AutoStyles {
    seen: FxHashSet<&'static str>,
    definitions: Vec<&'static str>,
}

impl AutoStyles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a style definition under `name`. Returns `false` if a style of
    /// that name was already registered.
    pub fn register(&mut self, name: &'static str, definition: &'static str) -> bool {
        if !self.seen.insert(name) {
            return false;
        }
        self.definitions.push(definition);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    fn write_into(&self, writer: &mut HtmlWriter) {
        writer.write_str("<office:automatic-styles>\n");
        for &definition in &self.definitions {
            writer.write_str(definition);
            writer.newline();
        }
        writer.write_str("</office:automatic-styles>\n");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paragraph {
    Closed,
    Pending(&'static str),
    Open,
}

/// Renders events as an ODF `content.xml` document.
#[derive(Debug)]
pub struct OdtRenderer {
    body: HtmlWriter,
    styles: AutoStyles,
    state: ListState,
    paragraph: Paragraph,
    first_code_line: bool,
    list_depth: usize,
}

impl OdtRenderer {
    pub fn new() -> Self {
        Self {
            body: HtmlWriter::new(),
            styles: AutoStyles::new(),
            state: ListState::default(),
            paragraph: Paragraph::Closed,
            first_code_line: true,
            list_depth: 0,
        }
    }

    /// Styles registered so far.
    pub fn styles(&self) -> &AutoStyles {
        &self.styles
    }

    fn p_open(&mut self, style: &'static str) {
        self.p_close();
        self.paragraph = Paragraph::Pending(style);
    }

    fn p_close(&mut self) {
        if self.paragraph == Paragraph::Open {
            self.body.write_str("</text:p>\n");
        }
        self.paragraph = Paragraph::Closed;
    }

    /// Write the pending paragraph element before content.
    fn ensure_paragraph(&mut self) {
        let style = match self.paragraph {
            Paragraph::Open => return,
            Paragraph::Pending(style) => style,
            Paragraph::Closed => BODY_STYLE,
        };
        self.body.write_str("<text:p text:style-name=\"");
        self.body.write_str(style);
        self.body.write_str("\">");
        self.paragraph = Paragraph::Open;
    }

    fn register_styles(&mut self) {
        if self.styles.register(TERM_STYLE, TERM_STYLE_XML) {
            log::debug!("registered ODT style {TERM_STYLE}");
        }
        if self.styles.register(DEFINITION_STYLE, DEFINITION_STYLE_XML) {
            log::debug!("registered ODT style {DEFINITION_STYLE}");
        }
    }

    fn item_style(tag: Tag) -> &'static str {
        match tag {
            Tag::Term => TERM_STYLE,
            _ => DEFINITION_STYLE,
        }
    }
}

impl Default for OdtRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for OdtRenderer {
    fn paragraph_start(&mut self) {
        self.p_open(BODY_STYLE);
    }

    fn paragraph_end(&mut self) {
        self.p_close();
    }

    fn preformatted_start(&mut self) {
        self.p_open(PREFORMATTED_STYLE);
        self.first_code_line = true;
    }

    fn preformatted_end(&mut self) {
        self.p_close();
    }

    fn code(&mut self, line: &[u8]) {
        self.ensure_paragraph();
        if !self.first_code_line {
            self.body.write_str("<text:line-break/>");
        }
        self.first_code_line = false;
        self.body.write_escaped_text(line);
    }

    fn list_start(&mut self, _kind: ListKind) {
        self.p_close();
        self.list_depth += 1;
        self.body.write_str("<text:list>\n");
    }

    fn list_end(&mut self, _kind: ListKind) {
        self.list_depth = self.list_depth.saturating_sub(1);
        self.body.write_str("</text:list>\n");
        // Text after an embedded list continues the definition item
        if let (0, ListState::ItemOpen(tag)) = (self.list_depth, self.state) {
            self.paragraph = Paragraph::Pending(Self::item_style(tag));
        }
    }

    fn list_item_start(&mut self, _level: u8) {
        self.body.write_str("<text:list-item>");
        self.paragraph = Paragraph::Pending(BODY_STYLE);
    }

    fn list_item_end(&mut self) {
        self.p_close();
        self.body.write_str("</text:list-item>\n");
    }

    fn text(&mut self, text: &[u8]) {
        self.ensure_paragraph();
        self.body.write_escaped_text(text);
    }

    fn soft_break(&mut self) {
        self.ensure_paragraph();
        if self.state.in_item() {
            self.body.write_str("<text:line-break/>");
        } else {
            self.body.write_byte(b' ');
        }
    }

    fn definition_list(&mut self, event: &DlEvent, _class: Option<&str>) -> bool {
        self.register_styles();
        self.state.advance(event);

        match (event.tag, event.kind) {
            (Tag::List, EventKind::Enter) => self.p_close(),
            (Tag::List, EventKind::Exit) => self.p_open(BODY_STYLE),
            (tag, EventKind::Enter) => self.p_open(Self::item_style(tag)),
            (_, EventKind::Exit) => self.p_close(),
        }
        true
    }

    fn finish(mut self) -> String {
        self.p_close();

        let mut out = HtmlWriter::with_capacity_for(self.body.len());
        out.write_str(DOCUMENT_START);
        self.styles.write_into(&mut out);
        out.write_str("<office:body>\n<office:text>\n");
        out.write_bytes(self.body.as_bytes());
        out.write_str("</office:text>\n</office:body>\n</office:document-content>\n");
        out.into_string()
    }
}
