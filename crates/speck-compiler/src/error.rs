//! Compile error types.

use speck_ast::ParseError;
use thiserror::Error;

/// Result type for compile operations.
pub type CompileResult<T> = Result<T, CompileError>;

/// A fatal error for a single source file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
	/// The source is not well-formed markup
	#[error("parse error: {0}")]
	Parse(#[from] ParseError),

	/// The source contains no markup at all
	#[error("no markup found in source")]
	EmptyDocument,

	/// A `<state>` tag without an attribute naming the state
	#[error("missing state name at line {line}, column {column}")]
	MissingStateName { line: usize, column: usize },

	/// The component name cannot be used as a JavaScript function name
	#[error("invalid component name '{0}'")]
	InvalidComponentName(String),
}
