//! Error types for the HPACK Huffman codec.
//!
//! Malformed input and undersized destinations are reported as structured
//! errors. Contract violations (a symbol outside the alphabet, a range
//! outside the source slice) are programming errors and panic instead.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a specific failure domain:
/// - Decoding: the input is not valid Huffman-coded data under the alphabet
/// - Capacity: the caller's destination buffer is too small
/// - Table: a code table failed canonical validation
/// - I/O and configuration: used by the command-line driver
#[derive(Debug, Error)]
pub enum Error {
    /// Input bits do not form a valid encoded string
    #[error("huffman decoding error: {0}")]
    Decoding(#[from] DecodingError),

    /// Decoded output does not fit in the destination buffer
    #[error("destination too small: capacity {capacity} bytes exhausted")]
    DestinationTooSmall { capacity: usize },

    /// Code table is not a valid canonical Huffman table
    #[error("code table error: {0}")]
    Table(#[from] TableError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for errors caused by malformed input rather than by the caller.
    pub fn is_decoding(&self) -> bool {
        matches!(self, Error::Decoding(_))
    }
}

/// Malformed-input errors. Positions are bit offsets from the start of the
/// decoded range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodingError {
    /// No code in the table matches the bits at this position
    #[error("invalid huffman code at bit position {position}")]
    InvalidCode { position: usize },

    /// The end-of-stream symbol appeared in the data
    #[error("end-of-stream symbol at bit position {position}")]
    EndOfStream { position: usize },

    /// Trailing bits in the final byte are not an all-ones padding
    #[error("invalid padding at bit position {position}")]
    InvalidPadding { position: usize },
}

impl DecodingError {
    /// Bit position at which decoding failed.
    pub fn position(&self) -> usize {
        match *self {
            DecodingError::InvalidCode { position }
            | DecodingError::EndOfStream { position }
            | DecodingError::InvalidPadding { position } => position,
        }
    }
}

/// Canonical table validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// The table has no symbols
    #[error("empty code table")]
    Empty,

    /// The table has more symbols than a `u16` can index
    #[error("code table has {count} symbols, more than a u16 can address")]
    TooManySymbols { count: usize },

    /// Code length is zero or longer than the decoder supports
    #[error("symbol {symbol} has code length {length}, expected 1..={max}")]
    CodeLengthOutOfRange { symbol: u16, length: u8, max: u8 },

    /// Code value has bits set below its length
    #[error("symbol {symbol} has bits set below its {length}-bit code")]
    UnalignedCode { symbol: u16, length: u8 },

    /// Code value is not where canonical assignment puts it
    #[error("symbol {symbol} has code {actual:#x}, canonical order requires {expected:#x}")]
    NonCanonical {
        symbol: u16,
        expected: u32,
        actual: u32,
    },

    /// More codes of some length than the code space allows
    #[error("code space exhausted at length {length}")]
    Oversubscribed { length: u8 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
