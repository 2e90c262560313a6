//! Error types.
//!
//! Converting markup never fails; malformed definition lists degrade to
//! plain content. Errors only come from option handling and the binary's I/O.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("invalid value {value:?} for option {key}")]
    InvalidValue { key: String, value: String },

    #[error("usage: {0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, Error>;
