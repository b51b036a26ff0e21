//! Builds the generic markup tree from the oxc JSX AST.
//!
//! The source is parsed as a JSX module. Top-level expression statements that
//! are elements or fragments become [`Statement::Markup`]; every other
//! statement is kept as its source text. Embedded expressions keep their span
//! text and are classified from their AST node.

use oxc_allocator::Allocator;
use oxc_ast::ast;
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType, Span};

use crate::error::{ParseError, ParseResult};
use crate::expr::{Expression, unparenthesized};
use crate::node::{
	Attribute, AttributeValue, Child, Element, Fragment, Markup, NamedAttribute, Position, Program,
	SpreadAttribute, Statement,
};

/// Parses a Speck source file.
///
/// Adjacent top-level markup statements must be separated with `;`.
///
/// # Examples
///
/// ```
/// use speck_ast::{Statement, parse};
///
/// let program = parse("import x from './x.js';\n<div />").unwrap();
/// assert!(matches!(program.body[0], Statement::Other(_)));
/// assert_eq!(program.markup().count(), 1);
/// ```
pub fn parse(source: &str) -> ParseResult<Program> {
	let allocator = Allocator::default();
	let ret = Parser::new(&allocator, source, SourceType::jsx()).parse();

	if let Some(error) = ret.errors.first() {
		let offset = error
			.labels
			.as_ref()
			.and_then(|labels| labels.first())
			.map_or(0, |label| label.offset());
		return Err(ParseError::new(
			error.message.to_string(),
			position_at(source, offset),
		));
	}
	if ret.panicked {
		return Err(ParseError::new(
			"unrecoverable syntax error",
			Position { line: 1, column: 1 },
		));
	}

	let builder = TreeBuilder { source };
	let directives = ret
		.program
		.directives
		.iter()
		.map(|directive| Statement::Other(builder.text(directive.span).to_string()));
	let statements = ret
		.program
		.body
		.iter()
		.map(|statement| builder.statement(statement));

	Ok(Program {
		body: directives.chain(statements).collect(),
	})
}

struct TreeBuilder<'s> {
	source: &'s str,
}

impl<'s> TreeBuilder<'s> {
	fn statement(&self, statement: &ast::Statement<'_>) -> Statement {
		if let ast::Statement::ExpressionStatement(stmt) = statement {
			match unparenthesized(&stmt.expression) {
				ast::Expression::JSXElement(element) => {
					return Statement::Markup(Markup::Element(self.element(element)));
				}
				ast::Expression::JSXFragment(fragment) => {
					return Statement::Markup(Markup::Fragment(self.fragment(fragment)));
				}
				_ => {}
			}
		}
		Statement::Other(self.text(statement.span()).to_string())
	}

	fn element(&self, element: &ast::JSXElement<'_>) -> Element {
		let opening = &element.opening_element;
		Element {
			name: self.text(opening.name.span()).to_string(),
			attributes: opening
				.attributes
				.iter()
				.map(|attribute| self.attribute(attribute))
				.collect(),
			children: self.children(&element.children),
			self_closing: element.closing_element.is_none(),
			position: self.position(element.span),
		}
	}

	fn fragment(&self, fragment: &ast::JSXFragment<'_>) -> Fragment {
		Fragment {
			children: self.children(&fragment.children),
			position: self.position(fragment.span),
		}
	}

	fn attribute(&self, item: &ast::JSXAttributeItem<'_>) -> Attribute {
		match item {
			ast::JSXAttributeItem::Attribute(attribute) => Attribute::Named(NamedAttribute {
				name: self.text(attribute.name.span()).to_string(),
				value: attribute
					.value
					.as_ref()
					.map(|value| self.attribute_value(value)),
				position: self.position(attribute.span),
			}),
			ast::JSXAttributeItem::SpreadAttribute(spread) => {
				Attribute::Spread(SpreadAttribute {
					argument: self.expression(&spread.argument),
					position: self.position(spread.span),
				})
			}
		}
	}

	fn attribute_value(&self, value: &ast::JSXAttributeValue<'_>) -> AttributeValue {
		match value {
			ast::JSXAttributeValue::StringLiteral(literal) => {
				AttributeValue::StringLiteral(literal.value.to_string())
			}
			ast::JSXAttributeValue::ExpressionContainer(container) => {
				AttributeValue::ExpressionContainer(self.container(container))
			}
			ast::JSXAttributeValue::Element(element) => {
				AttributeValue::ExpressionContainer(Expression::opaque(self.text(element.span)))
			}
			ast::JSXAttributeValue::Fragment(fragment) => {
				AttributeValue::ExpressionContainer(Expression::opaque(self.text(fragment.span)))
			}
		}
	}

	fn children(&self, children: &[ast::JSXChild<'_>]) -> Vec<Child> {
		children
			.iter()
			.map(|child| match child {
				ast::JSXChild::Text(text) => Child::Text(self.text(text.span).to_string()),
				ast::JSXChild::Element(element) => Child::Element(self.element(element)),
				ast::JSXChild::Fragment(fragment) => Child::Fragment(self.fragment(fragment)),
				ast::JSXChild::ExpressionContainer(container) => {
					Child::ExpressionContainer(self.container(container))
				}
				ast::JSXChild::Spread(spread) => {
					Child::ExpressionContainer(self.expression(&spread.expression))
				}
			})
			.collect()
	}

	fn container(&self, container: &ast::JSXExpressionContainer<'_>) -> Expression {
		match container.expression.as_expression() {
			Some(expression) => self.expression(expression),
			None => {
				let text = self.text(container.span);
				let inner = text
					.strip_prefix('{')
					.and_then(|rest| rest.strip_suffix('}'))
					.unwrap_or(text);
				Expression::empty(inner)
			}
		}
	}

	fn expression(&self, expression: &ast::Expression<'_>) -> Expression {
		Expression::from_ast(self.text(expression.span()), expression)
	}

	fn text(&self, span: Span) -> &'s str {
		self.source
			.get(span.start as usize..span.end as usize)
			.unwrap_or_default()
	}

	fn position(&self, span: Span) -> Position {
		position_at(self.source, span.start as usize)
	}
}

fn position_at(source: &str, offset: usize) -> Position {
	let mut offset = offset.min(source.len());
	while !source.is_char_boundary(offset) {
		offset -= 1;
	}
	let before = &source[..offset];
	let line = before.matches('\n').count() + 1;
	let line_start = before.rfind('\n').map_or(0, |i| i + 1);
	Position {
		line,
		column: before[line_start..].chars().count() + 1,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::expr::ExpressionKind;
	use rstest::rstest;

	fn root_element(source: &str) -> Element {
		let program = parse(source).unwrap();
		match program.markup().next() {
			Some(Markup::Element(element)) => element.clone(),
			other => panic!("expected a root element, got {other:?}"),
		}
	}

	#[rstest]
	fn test_parse_self_closing_element() {
		// Arrange
		let source = "<state count={0} />";

		// Act
		let element = root_element(source);

		// Assert
		assert_eq!(element.name, "state");
		assert!(element.self_closing);
		assert!(element.children.is_empty());
		let attr = element.attribute("count").unwrap();
		let Some(AttributeValue::ExpressionContainer(expr)) = &attr.value else {
			panic!("expected expression value");
		};
		assert_eq!(expr.kind(), ExpressionKind::NumericLiteral);
	}

	#[rstest]
	fn test_parse_attribute_forms() {
		let element = root_element(r#"<input disabled type="text" value={name} {...rest} />"#);

		assert_eq!(element.attributes.len(), 4);
		assert_eq!(element.attribute("disabled").unwrap().value, None);
		assert_eq!(
			element.attribute("type").unwrap().value,
			Some(AttributeValue::StringLiteral("text".to_string()))
		);
		assert!(matches!(
			&element.attributes[3],
			Attribute::Spread(spread) if spread.argument.source() == "rest"
		));
	}

	#[rstest]
	fn test_parse_children_in_order() {
		let element = root_element("<p>Hello {name}, <b>welcome</b>!</p>");

		assert_eq!(element.children.len(), 5);
		assert_eq!(element.children[0], Child::Text("Hello ".to_string()));
		assert!(matches!(&element.children[1], Child::ExpressionContainer(e) if e.source() == "name"));
		assert!(matches!(&element.children[3], Child::Element(b) if b.name == "b"));
		assert_eq!(element.children[4], Child::Text("!".to_string()));
	}

	#[rstest]
	fn test_parse_fragment() {
		let program = parse("<><a /><b /></>").unwrap();
		let Some(Markup::Fragment(fragment)) = program.markup().next() else {
			panic!("expected fragment");
		};
		assert_eq!(fragment.children.len(), 2);
	}

	#[rstest]
	fn test_expression_with_embedded_markup() {
		let source = r#"<ul>{items.map((item) => <li key={item.id}>Don't {"}"} stop</li>)}</ul>"#;

		let element = root_element(source);

		assert_eq!(element.children.len(), 1);
		let Child::ExpressionContainer(expr) = &element.children[0] else {
			panic!("expected expression");
		};
		assert!(expr.source().starts_with("items.map("));
		assert!(expr.source().ends_with("</li>)"));
		assert_eq!(expr.kind(), ExpressionKind::Call);
	}

	#[rstest]
	fn test_expression_with_strings_and_templates() {
		let element = root_element(r#"<p>{`a ${ {x: "}"}.x } b` + '{'}</p>"#);

		let Child::ExpressionContainer(expr) = &element.children[0] else {
			panic!("expected expression");
		};
		assert_eq!(expr.source(), r#"`a ${ {x: "}"}.x } b` + '{'"#);
	}

	#[rstest]
	fn test_regex_literal_in_expression() {
		// Arrange
		let source = r#"<p>{/[{]/.test(s) ? "y" : "n"}</p>"#;

		// Act
		let element = root_element(source);

		// Assert
		let Child::ExpressionContainer(expr) = &element.children[0] else {
			panic!("expected expression");
		};
		assert_eq!(expr.source(), r#"/[{]/.test(s) ? "y" : "n""#);
		assert_eq!(expr.kind(), ExpressionKind::Other);
	}

	#[rstest]
	fn test_comparison_is_not_markup() {
		let element = root_element("<if condition={a < b && c <d} />");
		let attr = element.attribute("condition").unwrap();
		let Some(AttributeValue::ExpressionContainer(expr)) = &attr.value else {
			panic!("expected expression value");
		};
		assert_eq!(expr.source(), "a < b && c <d");
	}

	#[rstest]
	fn test_comment_only_container_is_empty() {
		let element = root_element("<div>{/* note */}</div>");
		assert!(matches!(&element.children[0], Child::ExpressionContainer(e) if e.is_empty()));
	}

	#[rstest]
	fn test_markup_attribute_value_is_kept_as_expression() {
		let element = root_element("<slot fallback=<em>none</em> />");
		let attr = element.attribute("fallback").unwrap();
		let Some(AttributeValue::ExpressionContainer(expr)) = &attr.value else {
			panic!("expected expression value");
		};
		assert_eq!(expr.source(), "<em>none</em>");
	}

	#[rstest]
	fn test_top_level_statements_are_kept() {
		let source = "import Card from './Card.jsx';\nconst limit = 10;\n<div />\n";

		let program = parse(source).unwrap();

		assert_eq!(program.body.len(), 3);
		assert_eq!(
			program.body[0],
			Statement::Other("import Card from './Card.jsx';".to_string())
		);
		assert_eq!(program.body[1], Statement::Other("const limit = 10;".to_string()));
		assert!(matches!(program.body[2], Statement::Markup(_)));
	}

	#[rstest]
	fn test_parenthesized_markup_statement() {
		let program = parse("(\n  <main />\n);").unwrap();
		assert_eq!(program.markup().count(), 1);
	}

	#[rstest]
	fn test_position_is_recorded() {
		let element = root_element("\n\n  <div>\n    <span />\n  </div>");
		assert_eq!(element.position, Position { line: 3, column: 3 });
		let span = element.child_elements().next().unwrap();
		assert_eq!(span.position, Position { line: 4, column: 5 });
	}

	#[rstest]
	#[case("<div>")]
	#[case("<div></span>")]
	#[case("<div>{count</div>")]
	#[case("<div class=></div>")]
	#[case("</div>")]
	#[case("<a href=\"x></a>")]
	#[case("<p>a</p>\n<p>b</p>")]
	fn test_parse_errors(#[case] source: &str) {
		let error = parse(source).unwrap_err();
		assert!(!error.message.is_empty());
		assert!(error.line >= 1 && error.column >= 1);
	}

	#[rstest]
	fn test_error_position_points_into_source() {
		let error = parse("<ul>\n  <li>one</li>\n  <li>two</ul>").unwrap_err();
		assert_eq!(error.line, 3);
	}

	#[rstest]
	fn test_names_with_dashes_and_namespaces() {
		let element = root_element(r##"<svg xlink:href="#a" data-id="1"></svg>"##);
		assert!(element.attribute("xlink:href").is_some());
		assert!(element.attribute("data-id").is_some());
	}
}
