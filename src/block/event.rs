//! Block-level event types.

use crate::{Options, Range};

/// Element of a definition list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// The `dl` container.
    List,
    /// A term (`dt`).
    Term,
    /// A definition (`dd`).
    Definition,
}

impl Tag {
    /// HTML element name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "dl",
            Self::Term => "dt",
            Self::Definition => "dd",
        }
    }
}

/// Whether an element opens or closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Enter,
    Exit,
}

/// Class attribute carried by a definition list event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassAttr {
    /// No class attribute.
    #[default]
    None,
    /// The configured default class name (`Options::class_name`).
    Configured,
    /// A class name taken from the source text.
    Source(Range),
}

impl ClassAttr {
    /// Class from a source range; an empty range means no class.
    pub fn from_range(range: Range) -> Self {
        if range.is_empty() {
            Self::None
        } else {
            Self::Source(range)
        }
    }

    /// Resolve to the class name, or `None` when no attribute should be written.
    pub fn resolve<'a>(&self, input: &'a [u8], options: &'a Options) -> Option<&'a str> {
        let name = match self {
            Self::None => return None,
            Self::Configured => options.class_name.as_str(),
            Self::Source(range) => range.as_str(input)?,
        };
        (!name.is_empty()).then_some(name)
    }
}

/// A structural definition list event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DlEvent {
    pub tag: Tag,
    pub kind: EventKind,
    pub class: ClassAttr,
    /// Source text of the boundary that produced this event.
    pub span: Range,
}

impl DlEvent {
    /// Byte offset of the boundary in the input.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.span.start
    }
}

/// Type of host list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `*` items.
    Unordered,
    /// `-` items.
    Ordered,
}

/// Events emitted by the block parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockEvent {
    /// Start of a paragraph.
    ParagraphStart,
    /// End of a paragraph.
    ParagraphEnd,

    /// Start of a preformatted block.
    PreformattedStart,
    /// End of a preformatted block.
    PreformattedEnd,
    /// One line of preformatted content.
    Code(Range),

    /// Start of a bullet or ordered list.
    ListStart { kind: ListKind },
    /// End of a bullet or ordered list.
    ListEnd { kind: ListKind },
    /// Start of a list item.
    ListItemStart {
        /// Nesting level, starting at 1.
        level: u8,
    },
    /// End of a list item.
    ListItemEnd,

    /// Line break inside content.
    SoftBreak,
    /// Text content, passed through to the renderer.
    Text(Range),

    /// Definition list structure.
    DefinitionList(DlEvent),
}
