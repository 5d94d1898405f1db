use std::result;

use thiserror::Error;

/// Errors that can occur when mutating a [`TextBuilder`][crate::TextBuilder] or when expanding
/// a composite format string into one.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The caller passed a position, length or capacity that is not valid for the builder in
    /// its current state. Nothing was modified.
    #[error("argument '{parameter}' is out of range: {value} ({problem})")]
    OutOfRange {
        /// Name of the offending parameter, e.g. `"length"` or `"capacity"`.
        parameter: &'static str,

        /// The value the caller provided.
        value: isize,

        /// A human-readable description of the violated bound.
        problem: &'static str,
    },

    /// A composite format string was malformed or referenced an argument that does not exist.
    ///
    /// Any text appended before the problem was detected remains in the builder.
    #[error("invalid format string at offset {offset}: {problem}")]
    InvalidFormat {
        /// Byte offset into the format string at which the problem was detected.
        offset: usize,

        /// What exactly was wrong.
        problem: FormatProblem,
    },
}

/// The specific violation behind an [`Error::InvalidFormat`].
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum FormatProblem {
    /// A `}` appeared outside of an argument hole without being doubled as `}}`.
    #[error("unexpected closing brace")]
    UnexpectedClosingBrace,

    /// An argument index or width was expected to start with an ASCII digit.
    #[error("expected an ASCII digit")]
    ExpectedAsciiDigit,

    /// An argument hole was not terminated by `}` or contained an unexpected character.
    #[error("unclosed format item")]
    UnclosedFormatItem,

    /// An argument hole referenced an index that is not present in the argument list.
    #[error("argument index {index} is out of range, only {count} arguments were supplied")]
    ArgumentIndexOutOfRange {
        /// The index named by the argument hole.
        index: usize,

        /// The number of arguments supplied.
        count: usize,
    },
}

impl Error {
    pub(crate) fn out_of_range(parameter: &'static str, value: isize, problem: &'static str) -> Self {
        Self::OutOfRange {
            parameter,
            value,
            problem,
        }
    }

    pub(crate) fn invalid_format(offset: usize, problem: FormatProblem) -> Self {
        Self::InvalidFormat { offset, problem }
    }
}

/// Converts a caller-provided signed position, length or capacity, rejecting negative values.
pub(crate) fn non_negative(parameter: &'static str, value: isize) -> Result<usize> {
    usize::try_from(value)
        .ok()
        .ok_or_else(|| Error::out_of_range(parameter, value, "must be non-negative"))
}

/// A specialized `Result` type for text builder operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = result::Result<T, Error>;
