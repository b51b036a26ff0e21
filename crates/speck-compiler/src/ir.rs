//! Speck intermediate representation.
//!
//! The IR is the typed tree produced by lowering: reserved tags become
//! dedicated variants, every other tag becomes a [`Component`]. Nodes are
//! built once per compile and never mutated afterwards.

use serde::Serialize;
use speck_ast::{Expression, Position};

use crate::attr::AttrValue;

/// A lowered source file.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Document {
	/// Top-level nodes in source order
	pub body: Vec<Node>,
}

impl Document {
	/// Returns the first top-level generic component, which becomes the
	/// root of the generated function body.
	pub fn root_component(&self) -> Option<&Component> {
		self.body.iter().find_map(|node| match node {
			Node::Component(component) => Some(component),
			_ => None,
		})
	}
}

/// A Speck IR node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Node {
	StateDeclaration(StateDeclaration),
	Props(Props),
	IfBlock(IfBlock),
	LoopBlock(LoopBlock),
	AsyncBlock(AsyncBlock),
	RouterBlock(RouterBlock),
	SwitchBlock(SwitchBlock),
	Slot(Slot),
	NamedSlotContent(NamedSlotContent),
	OnMount(OnMount),
	Component(Component),
	Fragment(Fragment),
	Text(Text),
	#[serde(rename = "JSExpression")]
	JsExpression(JsExpression),
}

impl Node {
	/// Whether this node only declares component setup (props, state, mount
	/// effects) and renders nothing by itself.
	pub fn is_declaration(&self) -> bool {
		matches!(
			self,
			Node::StateDeclaration(_) | Node::Props(_) | Node::OnMount(_)
		)
	}

	/// Short name used in diagnostics.
	pub fn type_name(&self) -> &'static str {
		match self {
			Node::StateDeclaration(_) => "StateDeclaration",
			Node::Props(_) => "Props",
			Node::IfBlock(_) => "IfBlock",
			Node::LoopBlock(_) => "LoopBlock",
			Node::AsyncBlock(_) => "AsyncBlock",
			Node::RouterBlock(_) => "RouterBlock",
			Node::SwitchBlock(_) => "SwitchBlock",
			Node::Slot(_) => "Slot",
			Node::NamedSlotContent(_) => "NamedSlotContent",
			Node::OnMount(_) => "OnMount",
			Node::Component(_) => "Component",
			Node::Fragment(_) => "Fragment",
			Node::Text(_) => "Text",
			Node::JsExpression(_) => "JSExpression",
		}
	}
}

/// `<state name={value} />`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateDeclaration {
	/// Identifier declared by the state, `None` when no attribute was given
	pub name: Option<String>,
	/// Initial value
	pub value: AttrValue,
	/// Whether the initializer alone requires a reactive state slot
	pub is_hook: bool,
	/// Position of the `<state>` tag
	#[serde(skip)]
	pub position: Position,
}

/// `<props />` or `<props>a b c</props>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Props {
	/// Accept the whole props object
	pub spread: bool,
	/// Destructured prop names
	pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfBlock {
	pub condition: Expression,
	pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoopBlock {
	/// Iterable source
	pub items: Expression,
	/// Name bound to each item
	pub loop_var: String,
	pub children: Vec<Node>,
}

/// Generated local holding the settled value of an async block.
pub const SETTLED_VALUE: &str = "_data";

/// Generated local holding the rejection reason of an async block.
pub const SETTLED_ERROR: &str = "_error";

/// A pending/fulfilled/rejected region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsyncBlock {
	pub promise: Expression,
	/// Re-runs the promise whenever its value changes
	pub key: Option<Expression>,
	pub then: Vec<Node>,
	pub catch: Vec<Node>,
	pub loading: Vec<Node>,
	/// Name of the settled value inside `then`
	pub then_alias: String,
	/// Name of the rejection reason inside `catch`
	pub catch_alias: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouterBlock {
	/// Routes in match order
	pub routes: Vec<RouteBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteBlock {
	/// Path pattern, `:name` segments capture
	pub path: String,
	/// Name bound to the captured parameters
	pub let_var: Option<String>,
	pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchBlock {
	/// Discriminant
	pub value: Expression,
	/// Cases in declaration order
	pub cases: Vec<CaseBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseBlock {
	pub value: CaseValue,
	pub children: Vec<Node>,
}

/// Literal a `case` matches against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CaseValue {
	Str(String),
	/// Numeric literal as written
	Number(String),
	Bool(bool),
	Null,
}

impl CaseValue {
	/// Renders the value as a JavaScript literal.
	pub fn to_js(&self) -> String {
		match self {
			CaseValue::Str(value) => js_string(value),
			CaseValue::Number(value) => value.clone(),
			CaseValue::Bool(value) => value.to_string(),
			CaseValue::Null => "null".to_string(),
		}
	}
}

/// `<slot />` or `<slot name="header" />`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
	/// `None` for the default children slot
	pub name: Option<String>,
}

/// An element passed to a named slot of its parent component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedSlotContent {
	pub name: String,
	pub element: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnMount {
	pub children: Vec<Node>,
}

impl OnMount {
	/// The expressions run by the effect; other children generate nothing.
	pub fn expressions(&self) -> impl Iterator<Item = &Expression> {
		self.children.iter().filter_map(|child| match child {
			Node::JsExpression(expr) => Some(&expr.expression),
			_ => None,
		})
	}
}

/// Any tag that is not reserved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
	/// Tag name; uppercase names reference user components
	pub name: String,
	pub attributes: Vec<ComponentAttr>,
	pub children: Vec<Node>,
}

impl Component {
	/// Whether the tag refers to a user-defined component.
	pub fn is_custom(&self) -> bool {
		self.name.chars().next().is_some_and(char::is_uppercase)
	}
}

/// An attribute of a generic component.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentAttr {
	Named { key: String, value: AttrValue },
	Spread { argument: Expression },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fragment {
	pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Text {
	pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsExpression {
	pub expression: Expression,
}

/// Quotes a string as a JavaScript string literal.
pub(crate) fn js_string(value: &str) -> String {
	serde_json::Value::String(value.to_string()).to_string()
}
