//! Error types for the vocab-terms parser.

use thiserror::Error;

/// Errors that can occur while tokenizing or parsing fact text.
///
/// Every variant carries the byte offset into the input at which the problem
/// was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A character that cannot start any token.
    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedCharacter { found: char, offset: usize },

    /// A string literal was opened but never closed.
    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    /// A backslash escape other than `\"`, `\\`, `\n` or `\t`.
    #[error("invalid escape sequence \\{found} at offset {offset}")]
    InvalidEscape { found: char, offset: usize },

    /// Expected a particular token or construct but found something else.
    #[error("expected {expected}, found {found} at offset {offset}")]
    Expected {
        expected: String,
        found: String,
        offset: usize,
    },

    /// The input ended in the middle of a term or fact.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },

    /// Compound terms nested more than `limit` levels deep.
    #[error("term nested deeper than {limit} levels at offset {offset}")]
    TooDeep { limit: usize, offset: usize },

    /// The input contained no facts at all.
    #[error("input contains no facts")]
    EmptyInput,
}

impl ParseError {
    /// Byte offset at which the error was detected, if it is tied to a
    /// position in the input.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedCharacter { offset, .. }
            | ParseError::UnterminatedString { offset }
            | ParseError::InvalidEscape { offset, .. }
            | ParseError::Expected { offset, .. }
            | ParseError::TooDeep { offset, .. } => Some(*offset),
            ParseError::UnexpectedEnd { .. } | ParseError::EmptyInput => None,
        }
    }
}
