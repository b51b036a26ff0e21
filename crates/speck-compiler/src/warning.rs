//! Non-fatal diagnostics.

use std::fmt;

use speck_ast::Position;

/// A lenient degradation applied while compiling. Warnings never fail a
/// compile; they are reported next to the file that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileWarning {
	pub message: String,
	/// Where the offending tag starts, when known
	pub position: Option<Position>,
}

impl CompileWarning {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			position: None,
		}
	}

	pub fn at(message: impl Into<String>, position: Position) -> Self {
		Self {
			message: message.into(),
			position: Some(position),
		}
	}
}

impl fmt::Display for CompileWarning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.position {
			Some(position) => write!(
				f,
				"{} (line {}, column {})",
				self.message, position.line, position.column
			),
			None => f.write_str(&self.message),
		}
	}
}
