//! Crate-wide error type.
//!
//! Every fallible operation in this crate returns `Result<T, Error>`. There
//! is no recovery inside a parser: the first invariant violation aborts the
//! whole parse and the caller gets a typed reason.

use failure::Fail;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "unexpected end of input")]
    UnexpectedEof,

    #[fail(display = "unknown section tag {:?}", _0)]
    UnknownSection(String),

    #[fail(display = "section length mismatch")]
    SectionLengthMismatch,

    #[fail(display = "invalid TWS signature {:#010x}", _0)]
    InvalidSignature(u32),

    #[fail(display = "invalid tile code {}", _0)]
    InvalidTileCode(u16),

    #[fail(display = "invalid direction byte {}", _0)]
    InvalidDirection(u8),

    #[fail(display = "invalid modifier: {}", _0)]
    InvalidModifier(String),

    #[fail(display = "invalid password byte {:#04x}", _0)]
    InvalidPassword(u8),

    #[fail(display = "movement list exceeds 127 entries ({})", _0)]
    MovementCapacity(usize),

    #[fail(display = "text field contains a byte not in windows-1252: {:#04x}", _0)]
    TextDecode(u8),

    #[fail(display = "i/o error: {}", _0)]
    Io(#[fail(cause)] std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::UnexpectedEof,
            _ => Error::Io(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
