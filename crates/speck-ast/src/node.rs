//! Node types of the generic markup tree.

use crate::expr::Expression;

/// A position in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
	/// 1-based line
	pub line: usize,
	/// 1-based column, counted in characters
	pub column: usize,
}

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
	/// Top-level statements in source order
	pub body: Vec<Statement>,
}

impl Program {
	/// Iterates over the top-level markup statements, skipping everything else.
	pub fn markup(&self) -> impl Iterator<Item = &Markup> {
		self.body.iter().filter_map(|statement| match statement {
			Statement::Markup(markup) => Some(markup),
			Statement::Other(_) => None,
		})
	}
}

/// A top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
	/// An element or fragment
	Markup(Markup),
	/// Anything that is not markup (imports, declarations, ...), kept verbatim
	Other(String),
}

/// An element or a fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Markup {
	/// `<tag ...>...</tag>`
	Element(Element),
	/// `<>...</>`
	Fragment(Fragment),
}

impl Markup {
	/// Returns the element, if this markup is one.
	pub fn as_element(&self) -> Option<&Element> {
		match self {
			Markup::Element(element) => Some(element),
			Markup::Fragment(_) => None,
		}
	}
}

/// A markup element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
	/// Tag name as written
	pub name: String,
	/// Attributes in source order
	pub attributes: Vec<Attribute>,
	/// Children in source order
	pub children: Vec<Child>,
	/// Whether the element was written as `<tag />`
	pub self_closing: bool,
	/// Position of the opening `<`
	pub position: Position,
}

impl Element {
	/// Finds the first named attribute called `name`.
	pub fn attribute(&self, name: &str) -> Option<&NamedAttribute> {
		self.attributes.iter().find_map(|attr| match attr {
			Attribute::Named(named) if named.name == name => Some(named),
			_ => None,
		})
	}

	/// Iterates over the element children.
	pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
		self.children.iter().filter_map(|child| match child {
			Child::Element(element) => Some(element),
			_ => None,
		})
	}
}

/// A `<>...</>` fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
	/// Children in source order
	pub children: Vec<Child>,
	/// Position of the opening `<`
	pub position: Position,
}

/// An attribute of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
	/// `name`, `name="text"` or `name={expr}`
	Named(NamedAttribute),
	/// `{...expr}`
	Spread(SpreadAttribute),
}

/// A named attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedAttribute {
	/// Attribute name as written
	pub name: String,
	/// Value, or `None` for a bare attribute
	pub value: Option<AttributeValue>,
	/// Position of the attribute name
	pub position: Position,
}

/// A `{...expr}` attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadAttribute {
	/// The spread argument
	pub argument: Expression,
	/// Position of the opening `{`
	pub position: Position,
}

/// The value of a named attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
	/// `"text"` or `'text'`, without the quotes
	StringLiteral(String),
	/// `{expr}`
	ExpressionContainer(Expression),
}

/// A child of an element or fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
	/// Nested element
	Element(Element),
	/// Nested fragment
	Fragment(Fragment),
	/// Raw text, whitespace included
	Text(String),
	/// `{expr}`
	ExpressionContainer(Expression),
}
