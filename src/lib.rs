//! deflist: definition lists for line-oriented wiki markup
//!
//! Recognizes indented `; term` / `: definition` blocks inside a wiki
//! document and renders them as XHTML `dl` lists, ODF styled paragraphs or
//! plain text.
//!
//! ```text
//!   ~~dlist:glossary~~
//!   ; Term
//!   : Definition, which may
//! continue on the next line
//!   ;wide| Another term : its definition
//! ```
//!
//! # Design Principles
//! - No AST: a flat stream of open/close events
//! - No regex: byte-level line scanning
//! - No backtracking: a boundary, once consumed, is never revisited
//! - Minimal allocations: ranges into the input buffer

pub mod block;
pub mod cursor;
pub mod error;
pub mod escape;
pub mod range;
pub mod render;

// Re-export primary types
pub use block::{BlockEvent, BlockParser, DlEvent, EventKind, Tag};
pub use error::{Error, Result};
pub use range::Range;
pub use render::{
    render_events, Format, GenericRenderer, HtmlRenderer, HtmlWriter, OdtRenderer, Renderer,
};

/// Class given to `dl` elements unless a `~~dlist:name~~` token overrides it.
pub const DEFAULT_CLASS_NAME: &str = "plugin_definitionlist";

/// Parsing/rendering options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Wrap term content in `<span class="term">`.
    pub dt_fancy: bool,
    /// Class of `dl` elements without an override. Empty means no class
    /// attribute.
    pub class_name: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dt_fancy: true,
            class_name: DEFAULT_CLASS_NAME.to_string(),
        }
    }
}

impl Options {
    /// Set an option by its configuration key (`dt_fancy` or `classname`).
    ///
    /// # Example
    /// ```
    /// let mut options = deflist::Options::default();
    /// options.set("dt_fancy", "off").unwrap();
    /// options.set("classname", "glossary").unwrap();
    /// assert!(!options.dt_fancy);
    /// assert_eq!(options.class_name, "glossary");
    /// ```
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key.trim() {
            "dt_fancy" => {
                self.dt_fancy = parse_bool(value).ok_or_else(|| Error::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })?;
            }
            "classname" => self.class_name = value.trim().to_string(),
            other => return Err(Error::UnknownOption(other.to_string())),
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Parse a document into block events.
///
/// Each call uses a fresh style register, so a `~~dlist:name~~` token never
/// carries over into another document.
pub fn parse(input: &str, options: &Options) -> Vec<BlockEvent> {
    let mut events = Vec::with_capacity(input.len() / 8 + 8);
    BlockParser::new(input.as_bytes(), options).parse(&mut events);
    events
}

/// Convert a document to XHTML.
///
/// # Example
/// ```
/// let html = deflist::to_html("  ; Term : Definition\n");
/// assert!(html.contains("<dt><span class=\"term\">Term</span></dt>"));
/// assert!(html.contains("<dd>Definition</dd>"));
/// ```
pub fn to_html(input: &str) -> String {
    to_html_with_options(input, &Options::default())
}

/// Convert a document to XHTML with options.
pub fn to_html_with_options(input: &str, options: &Options) -> String {
    render(input, Format::Xhtml, options)
}

/// Convert a document to the given output format.
pub fn render(input: &str, format: Format, options: &Options) -> String {
    let events = parse(input, options);
    let bytes = input.as_bytes();

    match format {
        Format::Xhtml => {
            let mut renderer = HtmlRenderer::with_capacity_for(input.len(), options);
            render_events(bytes, &events, options, &mut renderer);
            renderer.finish()
        }
        Format::Odt => {
            let mut renderer = OdtRenderer::new();
            render_events(bytes, &events, options, &mut renderer);
            renderer.finish()
        }
        Format::Generic => {
            let mut renderer = GenericRenderer::new();
            render_events(bytes, &events, options, &mut renderer);
            renderer.finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = "\n<dl class=\"plugin_definitionlist\">\n\
                         <dt><span class=\"term\">Term</span></dt>\n\
                         <dd>Definition</dd>\n\
                         </dl>\n";

    #[test]
    fn test_basic() {
        assert_eq!(to_html("\n  ; Term\n  : Definition\n"), BASIC);
    }

    #[test]
    fn test_basic_shorthand() {
        assert_eq!(to_html("\n  ; Term : Definition\n"), BASIC);
    }

    #[test]
    fn test_tabs_indent() {
        assert_eq!(to_html("\n\t; Term\n\t: Definition\n"), BASIC);
    }

    #[test]
    fn test_plain_terms() {
        let options = Options {
            dt_fancy: false,
            ..Options::default()
        };
        let html = to_html_with_options("\n  ; Term : Definition\n", &options);
        assert!(html.contains("<dt>Term</dt>\n"));
        assert!(!html.contains("<span"));
    }

    #[test]
    fn test_empty_class_name_omits_attribute() {
        let options = Options {
            class_name: String::new(),
            ..Options::default()
        };
        let html = to_html_with_options("  ; Term\n", &options);
        assert!(html.starts_with("\n<dl>\n"));
        assert!(!html.contains("class=\"\""));
    }

    #[test]
    fn test_item_classes() {
        let html = to_html("  ;dtclass| term\n  :ddclass| definition\n");
        assert!(html.contains("<dt class=\"dtclass\"><span class=\"term\">term</span></dt>\n"));
        assert!(html.contains("<dd class=\"ddclass\">definition</dd>\n"));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = to_html("  ; a < b : \"c\" & d\n");
        assert!(html.contains("a &lt; b"));
        assert!(html.contains("<dd>&quot;c&quot; &amp; d</dd>"));
    }

    #[test]
    fn test_macro_class_is_escaped() {
        let html = to_html("~~dlist:a\"b~~\n  ; T\n");
        assert!(html.contains("<dl class=\"a&quot;b\">"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(to_html(""), "");
    }

    #[test]
    fn test_options_set() {
        let mut options = Options::default();
        options.set("dt_fancy", "0").unwrap();
        assert!(!options.dt_fancy);
        options.set("dt_fancy", "Yes").unwrap();
        assert!(options.dt_fancy);
        options.set("classname", " lorem-ipsum ").unwrap();
        assert_eq!(options.class_name, "lorem-ipsum");
    }

    #[test]
    fn test_options_set_errors() {
        let mut options = Options::default();
        assert!(matches!(
            options.set("dt_fancy", "maybe"),
            Err(Error::InvalidValue { .. })
        ));
        assert!(matches!(
            options.set("colour", "red"),
            Err(Error::UnknownOption(key)) if key == "colour"
        ));
        assert_eq!(options, Options::default());
    }

    #[test]
    fn test_render_generic() {
        let out = render("  ; Term : Def\n", Format::Generic, &Options::default());
        assert_eq!(out, "Term\n\nDef\n");
    }
}
