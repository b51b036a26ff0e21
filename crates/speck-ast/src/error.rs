//! Parse error types.

use thiserror::Error;

use crate::node::Position;

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error raised while parsing a Speck source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at line {line}, column {column}")]
pub struct ParseError {
	/// Human readable description
	pub message: String,
	/// 1-based line
	pub line: usize,
	/// 1-based column
	pub column: usize,
}

impl ParseError {
	/// Creates a new parse error at the given position.
	pub fn new(message: impl Into<String>, position: Position) -> Self {
		Self {
			message: message.into(),
			line: position.line,
			column: position.column,
		}
	}
}
