//! Error types for minimization.

use std::fmt;

/// Malformed input rejected before any work is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    /// A character other than `0`, `1` or `-` (or `-` where only bits are allowed).
    InvalidChar { input: String, position: usize, ch: char },
    /// Implicants processed together must share one width.
    WidthMismatch { expected: usize, found: usize },
    /// Implicants must have at least one position.
    ZeroWidth,
    /// A required minterm is not covered by any of the supplied primes.
    UncoveredMinterm { minterm: String },
    /// A decimal value does not fit into the requested number of bits.
    ValueTooWide { value: u64, width: usize },
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInput::InvalidChar { input, position, ch } => {
                write!(f, "invalid character '{}' at position {} in '{}'", ch, position, input)
            }
            InvalidInput::WidthMismatch { expected, found } => {
                write!(f, "width mismatch: expected {} bits, found {}", expected, found)
            }
            InvalidInput::ZeroWidth => write!(f, "implicants must have at least one bit"),
            InvalidInput::UncoveredMinterm { minterm } => {
                write!(f, "minterm {} is not covered by any prime implicant", minterm)
            }
            InvalidInput::ValueTooWide { value, width } => {
                write!(f, "value {} does not fit into {} bits", value, width)
            }
        }
    }
}

/// Errors returned by the minimization entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No minterms were supplied.
    EmptyInput,
    /// Precondition violation.
    InvalidInput(InvalidInput),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "no minterms supplied"),
            Error::InvalidInput(e) => write!(f, "invalid input: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<InvalidInput> for Error {
    fn from(err: InvalidInput) -> Self {
        Error::InvalidInput(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
