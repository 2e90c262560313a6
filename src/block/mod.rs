//! Block-level parsing.
//!
//! The parser is line-oriented. It recognizes definition lists plus the
//! minimal host blocks around them:
//! - Definition lists (`  ; term`, `  : definition`, `  ; term : definition`)
//! - `~~dlist:class~~` tokens
//! - Paragraphs
//! - Preformatted lines
//! - Bullet and ordered lists

mod builder;
mod event;
mod lists;
mod parser;
mod register;
pub mod scanner;

pub use builder::EventBuilder;
pub use event::{BlockEvent, ClassAttr, DlEvent, EventKind, ListKind, Tag};
pub use lists::ListNesting;
pub use parser::BlockParser;
pub use register::StyleRegister;
