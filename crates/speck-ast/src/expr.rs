//! Opaque embedded expressions.
//!
//! Expressions inside `{...}` are never rewritten. They are stored as the
//! source text the author wrote and re-emitted verbatim; only the outermost
//! AST node is classified so that later passes can tell a literal initializer
//! from a computed one, or a call from a plain identifier.

use std::fmt;

use oxc_allocator::Allocator;
use oxc_ast::ast;
use oxc_parser::Parser;
use oxc_span::SourceType;
use serde::Serialize;

/// Outermost syntactic shape of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionKind {
	/// `"text"` or `'text'`
	StringLiteral,
	/// `42`, `1.5e3`, `0xff`, `10n`
	NumericLiteral,
	/// `true` / `false`
	BooleanLiteral,
	/// `null`
	NullLiteral,
	/// A bare identifier such as `items`
	Identifier,
	/// `f()`, `api.load(id)`, `load?.()`
	Call,
	/// `await expr`
	Await,
	/// `(x) => ...`
	Arrow,
	/// Nothing but whitespace or comments
	Empty,
	/// Any other expression (members, operators, literals of other kinds, ...)
	Other,
}

/// An embedded expression kept as source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Expression {
	source: String,
	kind: ExpressionKind,
	/// Cooked string value, boolean text or identifier name
	#[serde(skip)]
	value: Option<String>,
}

impl Expression {
	/// Parses the given source text, trimming surrounding whitespace.
	///
	/// Text that does not parse as a single expression is kept with
	/// [`ExpressionKind::Other`].
	pub fn new(source: impl AsRef<str>) -> Self {
		let source = source.as_ref().trim();
		let allocator = Allocator::default();
		match Parser::new(&allocator, source, SourceType::jsx()).parse_expression() {
			Ok(expression) => Self::from_ast(source, &expression),
			Err(_) if is_blank(source) => Self::empty(source),
			Err(_) => Self {
				source: source.to_string(),
				kind: ExpressionKind::Other,
				value: None,
			},
		}
	}

	/// Builds an expression consisting of a single identifier or keyword literal.
	pub fn identifier(name: &str) -> Self {
		Self::new(name)
	}

	/// Wraps an already parsed node whose text is `source`.
	pub(crate) fn from_ast(source: &str, expression: &ast::Expression<'_>) -> Self {
		let (kind, value) = classify(expression);
		Self {
			source: source.trim().to_string(),
			kind,
			value,
		}
	}

	/// An empty container, keeping whatever comment it held.
	pub(crate) fn empty(source: &str) -> Self {
		Self {
			source: source.trim().to_string(),
			kind: ExpressionKind::Empty,
			value: None,
		}
	}

	/// Markup nested in an attribute value, kept as opaque source.
	pub(crate) fn opaque(source: &str) -> Self {
		Self {
			source: source.trim().to_string(),
			kind: ExpressionKind::Other,
			value: None,
		}
	}

	/// The trimmed source text.
	pub fn source(&self) -> &str {
		&self.source
	}

	/// The classified shape.
	pub fn kind(&self) -> ExpressionKind {
		self.kind
	}

	/// Whether the container held nothing but whitespace or comments.
	pub fn is_empty(&self) -> bool {
		self.kind == ExpressionKind::Empty
	}

	/// Whether this is a string, numeric or boolean literal.
	pub fn is_literal(&self) -> bool {
		matches!(
			self.kind,
			ExpressionKind::StringLiteral
				| ExpressionKind::NumericLiteral
				| ExpressionKind::BooleanLiteral
		)
	}

	/// Returns the identifier name if the expression is a bare identifier.
	pub fn as_identifier(&self) -> Option<&str> {
		match self.kind {
			ExpressionKind::Identifier => self.value.as_deref(),
			_ => None,
		}
	}

	/// Whether the expression produces a value that has to be awaited
	/// (a call or an `await` expression).
	pub fn is_async_source(&self) -> bool {
		matches!(self.kind, ExpressionKind::Call | ExpressionKind::Await)
	}

	/// The cooked value of a string literal.
	pub fn string_value(&self) -> Option<String> {
		match self.kind {
			ExpressionKind::StringLiteral => self.value.clone(),
			_ => None,
		}
	}

	/// Returns the value of a boolean literal.
	pub fn boolean_value(&self) -> Option<bool> {
		match (self.kind, self.value.as_deref()) {
			(ExpressionKind::BooleanLiteral, Some("true")) => Some(true),
			(ExpressionKind::BooleanLiteral, Some("false")) => Some(false),
			_ => None,
		}
	}
}

impl fmt::Display for Expression {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.source)
	}
}

/// Strips any number of wrapping parentheses.
pub(crate) fn unparenthesized<'e, 'a>(expression: &'e ast::Expression<'a>) -> &'e ast::Expression<'a> {
	let mut inner = expression;
	while let ast::Expression::ParenthesizedExpression(paren) = inner {
		inner = &paren.expression;
	}
	inner
}

fn classify(expression: &ast::Expression<'_>) -> (ExpressionKind, Option<String>) {
	match unparenthesized(expression) {
		ast::Expression::StringLiteral(literal) => {
			(ExpressionKind::StringLiteral, Some(literal.value.to_string()))
		}
		ast::Expression::NumericLiteral(_) | ast::Expression::BigIntLiteral(_) => {
			(ExpressionKind::NumericLiteral, None)
		}
		ast::Expression::BooleanLiteral(literal) => {
			(ExpressionKind::BooleanLiteral, Some(literal.value.to_string()))
		}
		ast::Expression::NullLiteral(_) => (ExpressionKind::NullLiteral, None),
		ast::Expression::Identifier(ident) => {
			(ExpressionKind::Identifier, Some(ident.name.to_string()))
		}
		ast::Expression::CallExpression(_) => (ExpressionKind::Call, None),
		ast::Expression::ChainExpression(chain)
			if matches!(chain.expression, ast::ChainElement::CallExpression(_)) =>
		{
			(ExpressionKind::Call, None)
		}
		ast::Expression::AwaitExpression(_) => (ExpressionKind::Await, None),
		ast::Expression::ArrowFunctionExpression(_) => (ExpressionKind::Arrow, None),
		_ => (ExpressionKind::Other, None),
	}
}

/// Whether `text` holds nothing but whitespace and comments.
fn is_blank(text: &str) -> bool {
	let allocator = Allocator::default();
	let ret = Parser::new(&allocator, text, SourceType::jsx()).parse();
	ret.errors.is_empty() && ret.program.body.is_empty() && ret.program.directives.is_empty()
}
