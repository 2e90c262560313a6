//! Rendering of block events.
//!
//! Every output format implements [`Renderer`]. [`render_events`] walks the
//! event stream and dispatches to it; definition list events go through a
//! single hook so a renderer can decline them and have the source markup
//! passed through as text instead.

mod generic;
mod html;
mod odt;

pub use generic::GenericRenderer;
pub use html::{HtmlRenderer, HtmlWriter};
pub use odt::{AutoStyles, OdtRenderer};

use crate::block::{BlockEvent, DlEvent, EventKind, ListKind, Tag};
use crate::Options;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Nested `dl`/`dt`/`dd` markup.
    #[default]
    Xhtml,
    /// OpenDocument text with styled paragraphs.
    Odt,
    /// Plain text, one paragraph per item.
    Generic,
}

impl Format {
    /// Select a format by name. Unknown names fall back to [`Format::Generic`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "xhtml" | "html" => Self::Xhtml,
            "odt" => Self::Odt,
            other => {
                log::debug!("no dedicated renderer for format {other:?}, using generic");
                Self::Generic
            }
        }
    }
}

/// A consumer of block events.
///
/// Text is passed as raw source bytes; escaping is up to the renderer.
pub trait Renderer {
    fn paragraph_start(&mut self);
    fn paragraph_end(&mut self);

    fn preformatted_start(&mut self);
    fn preformatted_end(&mut self);
    /// One line of preformatted text.
    fn code(&mut self, line: &[u8]);

    fn list_start(&mut self, kind: ListKind);
    fn list_end(&mut self, kind: ListKind);
    fn list_item_start(&mut self, level: u8);
    fn list_item_end(&mut self);

    fn text(&mut self, text: &[u8]);
    fn soft_break(&mut self);

    /// Render a definition list event.
    ///
    /// `class` is the resolved class attribute, if any. Returns `false` when
    /// nothing was rendered, in which case the matched source text is
    /// written as plain text.
    fn definition_list(&mut self, event: &DlEvent, class: Option<&str>) -> bool {
        let _ = (event, class);
        false
    }

    /// Consume the renderer and return the output.
    fn finish(self) -> String
    where
        Self: Sized;
}

/// Position of a renderer within a definition list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListState {
    #[default]
    Outside,
    ListOpen,
    ItemOpen(Tag),
}

impl ListState {
    /// Apply an event. Returns `false` if the event was out of order; the
    /// state still follows the event so rendering can carry on.
    pub fn advance(&mut self, event: &DlEvent) -> bool {
        let next = match (event.tag, event.kind) {
            (Tag::List, EventKind::Enter) => Self::ListOpen,
            (Tag::List, EventKind::Exit) => Self::Outside,
            (tag, EventKind::Enter) => Self::ItemOpen(tag),
            (_, EventKind::Exit) => Self::ListOpen,
        };

        let valid = match (*self, event.tag, event.kind) {
            (Self::Outside, Tag::List, EventKind::Enter) => true,
            (Self::ListOpen, Tag::List, EventKind::Exit) => true,
            (Self::ListOpen | Self::ItemOpen(_), Tag::Term | Tag::Definition, EventKind::Enter) => {
                true
            }
            (Self::ItemOpen(open), tag, EventKind::Exit) => open == tag,
            _ => false,
        };
        if !valid {
            log::warn!(
                "unexpected {} {:?} at byte {} while {:?}",
                event.tag.as_str(),
                event.kind,
                event.pos(),
                self
            );
        }

        *self = next;
        valid
    }

    /// Whether a `dt` or `dd` is open.
    pub fn in_item(&self) -> bool {
        matches!(self, Self::ItemOpen(_))
    }
}

/// Feed an event stream to a renderer.
pub fn render_events<R: Renderer>(
    input: &[u8],
    events: &[BlockEvent],
    options: &Options,
    renderer: &mut R,
) {
    for event in events {
        match event {
            BlockEvent::ParagraphStart => renderer.paragraph_start(),
            BlockEvent::ParagraphEnd => renderer.paragraph_end(),
            BlockEvent::PreformattedStart => renderer.preformatted_start(),
            BlockEvent::PreformattedEnd => renderer.preformatted_end(),
            BlockEvent::Code(range) => renderer.code(range.slice(input)),
            BlockEvent::ListStart { kind } => renderer.list_start(*kind),
            BlockEvent::ListEnd { kind } => renderer.list_end(*kind),
            BlockEvent::ListItemStart { level } => renderer.list_item_start(*level),
            BlockEvent::ListItemEnd => renderer.list_item_end(),
            BlockEvent::SoftBreak => renderer.soft_break(),
            BlockEvent::Text(range) => renderer.text(range.slice(input)),
            BlockEvent::DefinitionList(dl) => {
                let class = dl.class.resolve(input, options);
                if !renderer.definition_list(dl, class) {
                    renderer.text(dl.span.slice(input));
                }
            }
        }
    }
}
