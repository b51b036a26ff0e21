//! Attribute value normalization.

use serde::Serialize;
use speck_ast::{AttributeValue, Expression, ExpressionKind};

use crate::ir::js_string;

/// Uniform representation of an attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AttrValue {
	/// Bare attribute (`<input disabled />`)
	True,
	/// `name="text"`
	Str(String),
	/// `name={42}`, kept as written
	Number(String),
	/// `name={true}`
	Bool(bool),
	/// Any other `name={expr}`
	Expr(Expression),
}

impl AttrValue {
	/// Normalizes a raw attribute value; `None` means no value was written.
	pub fn normalize(value: Option<&AttributeValue>) -> Self {
		match value {
			None => AttrValue::True,
			Some(AttributeValue::StringLiteral(text)) => AttrValue::Str(text.clone()),
			Some(AttributeValue::ExpressionContainer(expr)) => match expr.kind() {
				ExpressionKind::NumericLiteral => AttrValue::Number(expr.source().to_string()),
				ExpressionKind::BooleanLiteral => {
					AttrValue::Bool(expr.boolean_value().unwrap_or_default())
				}
				_ => AttrValue::Expr(expr.clone()),
			},
		}
	}

	/// Whether the value is a literal (string, number, boolean or bare).
	pub fn is_literal(&self) -> bool {
		match self {
			AttrValue::Expr(expr) => expr.is_literal(),
			_ => true,
		}
	}

	/// Source text that ends up evaluated as script: any expression, and
	/// string values holding an inline `() =>` handler.
	pub fn script_source(&self) -> Option<&str> {
		match self {
			AttrValue::Expr(expr) => Some(expr.source()),
			AttrValue::Str(text) if text.trim_start().starts_with("() =>") => Some(text),
			_ => None,
		}
	}

	/// The text of a string value, whether written as `"x"` or `{"x"}`.
	pub fn as_static_str(&self) -> Option<String> {
		match self {
			AttrValue::Str(text) => Some(text.clone()),
			AttrValue::Expr(expr) => expr.string_value(),
			_ => None,
		}
	}

	/// A binding name given either as `let="x"` or `let={x}`.
	pub fn as_binding(&self) -> Option<String> {
		match self {
			AttrValue::Str(text) => {
				let name = text.trim();
				(!name.is_empty()).then(|| name.to_string())
			}
			AttrValue::Expr(expr) => expr.as_identifier().map(str::to_string),
			_ => None,
		}
	}

	/// Renders the value as a JavaScript expression.
	pub fn to_js(&self) -> String {
		match self {
			AttrValue::True => "true".to_string(),
			AttrValue::Str(text) => js_string(text),
			AttrValue::Number(number) => number.clone(),
			AttrValue::Bool(value) => value.to_string(),
			AttrValue::Expr(expr) => expr.source().to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn container(source: &str) -> AttributeValue {
		AttributeValue::ExpressionContainer(Expression::new(source))
	}

	#[rstest]
	fn test_normalize_forms() {
		assert_eq!(AttrValue::normalize(None), AttrValue::True);
		assert_eq!(
			AttrValue::normalize(Some(&AttributeValue::StringLiteral("hi".to_string()))),
			AttrValue::Str("hi".to_string())
		);
		assert_eq!(
			AttrValue::normalize(Some(&container("5"))),
			AttrValue::Number("5".to_string())
		);
		assert_eq!(
			AttrValue::normalize(Some(&container("false"))),
			AttrValue::Bool(false)
		);
		assert_eq!(
			AttrValue::normalize(Some(&container("user.name"))),
			AttrValue::Expr(Expression::new("user.name"))
		);
	}

	#[rstest]
	#[case(None, true)]
	#[case(Some("0"), true)]
	#[case(Some("'x'"), true)]
	#[case(Some("null"), false)]
	#[case(Some("[]"), false)]
	#[case(Some("load()"), false)]
	fn test_is_literal(#[case] source: Option<&str>, #[case] expected: bool) {
		let raw = source.map(container);
		assert_eq!(AttrValue::normalize(raw.as_ref()).is_literal(), expected);
	}

	#[rstest]
	fn test_as_binding() {
		assert_eq!(
			AttrValue::Str(" row ".to_string()).as_binding(),
			Some("row".to_string())
		);
		assert_eq!(
			AttrValue::Expr(Expression::new("row")).as_binding(),
			Some("row".to_string())
		);
		assert_eq!(AttrValue::Expr(Expression::new("a.b")).as_binding(), None);
		assert_eq!(AttrValue::True.as_binding(), None);
	}

	#[rstest]
	fn test_to_js_quotes_strings() {
		assert_eq!(AttrValue::Str("say \"hi\"".to_string()).to_js(), r#""say \"hi\"""#);
		assert_eq!(AttrValue::Number("0".to_string()).to_js(), "0");
		assert_eq!(AttrValue::True.to_js(), "true");
	}
}
