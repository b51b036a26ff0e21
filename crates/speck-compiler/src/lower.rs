//! Lowering from the generic markup tree to Speck IR.
//!
//! Reserved tag names are matched once, through [`ReservedTag`], and turned
//! into typed nodes. Every other tag becomes a generic [`Component`].
//! Lowering never fails: malformed control-flow tags degrade to documented
//! defaults and the degradation is reported as a [`CompileWarning`].

use speck_ast::{
	Attribute, AttributeValue, Child, Element, Expression, ExpressionKind, Markup, Position,
	Program,
};
use tracing::{debug, warn};

use crate::attr::AttrValue;
use crate::ir::{
	AsyncBlock, CaseBlock, CaseValue, Component, ComponentAttr, Document, Fragment, IfBlock,
	JsExpression, LoopBlock, NamedSlotContent, Node, OnMount, Props, RouteBlock, RouterBlock,
	SETTLED_ERROR, SETTLED_VALUE, Slot, StateDeclaration, SwitchBlock, Text,
};
use crate::route::RoutePattern;
use crate::tags::{AsyncBranch, CASE_TAG, ReservedTag};
use crate::warning::CompileWarning;

const DEFAULT_LOOP_VAR: &str = "item";
const DEFAULT_THEN_ALIAS: &str = "data";
const DEFAULT_CATCH_ALIAS: &str = "error";
const DEFAULT_ROUTE_PATH: &str = "/";

/// Result of lowering a program.
#[derive(Debug, Clone, PartialEq)]
pub struct Lowered {
	pub document: Document,
	pub warnings: Vec<CompileWarning>,
}

/// Lowers a parsed program. Top-level statements that are not markup are
/// skipped.
pub fn lower(program: &Program) -> Lowered {
	let mut lowerer = Lowerer::default();
	let body = program
		.markup()
		.map(|markup| lowerer.lower_markup(markup))
		.collect();
	Lowered {
		document: Document { body },
		warnings: lowerer.warnings,
	}
}

#[derive(Default)]
struct Lowerer {
	warnings: Vec<CompileWarning>,
}

impl Lowerer {
	fn warn(&mut self, message: String, position: Position) {
		warn!(line = position.line, column = position.column, "{message}");
		self.warnings.push(CompileWarning::at(message, position));
	}

	fn lower_markup(&mut self, markup: &Markup) -> Node {
		match markup {
			Markup::Element(element) => self.lower_element(element),
			Markup::Fragment(fragment) => Node::Fragment(Fragment {
				children: self.lower_children(&fragment.children),
			}),
		}
	}

	fn lower_element(&mut self, element: &Element) -> Node {
		let Some(tag) = ReservedTag::from_name(&element.name) else {
			return self.lower_component(element);
		};
		debug!(
			tag = %tag,
			line = element.position.line,
			column = element.position.column,
			"lowering reserved tag"
		);
		match tag {
			ReservedTag::State => self.lower_state(element),
			ReservedTag::Props => self.lower_props(element),
			ReservedTag::If => self.lower_if(element),
			ReservedTag::Loop => self.lower_loop(element),
			ReservedTag::Slot => self.lower_slot(element),
			ReservedTag::OnMount => self.lower_on_mount(element),
			ReservedTag::Async => self.lower_async(element),
			ReservedTag::Switch => self.lower_switch(element),
			ReservedTag::Router => self.lower_router(element),
			ReservedTag::Route => Node::RouterBlock(RouterBlock {
				routes: vec![self.lower_route(element)],
			}),
		}
	}

	fn lower_children(&mut self, children: &[Child]) -> Vec<Node> {
		children
			.iter()
			.filter_map(|child| self.lower_child(child))
			.collect()
	}

	fn lower_child(&mut self, child: &Child) -> Option<Node> {
		match child {
			Child::Element(element) => Some(match slot_target(element) {
				Some(name) => {
					let mut target = element.clone();
					target.attributes.retain(|attr| !is_named(attr, "slot"));
					Node::NamedSlotContent(NamedSlotContent {
						name,
						element: Box::new(self.lower_element(&target)),
					})
				}
				None => self.lower_element(element),
			}),
			Child::Fragment(fragment) => Some(Node::Fragment(Fragment {
				children: self.lower_children(&fragment.children),
			})),
			Child::Text(raw) => clean_text(raw).map(|value| Node::Text(Text { value })),
			Child::ExpressionContainer(expression) if expression.is_empty() => None,
			Child::ExpressionContainer(expression) => Some(Node::JsExpression(JsExpression {
				expression: expression.clone(),
			})),
		}
	}

	fn lower_state(&mut self, element: &Element) -> Node {
		let (name, value) = match element.attributes.first() {
			Some(Attribute::Named(attr)) => (
				Some(attr.name.clone()),
				AttrValue::normalize(attr.value.as_ref()),
			),
			Some(Attribute::Spread(_)) | None => (None, AttrValue::True),
		};
		if element.attributes.len() > 1 {
			self.warn(
				"<state> declares one value; extra attributes are ignored".to_string(),
				element.position,
			);
		}
		let is_hook = !value.is_literal();
		Node::StateDeclaration(StateDeclaration {
			name,
			value,
			is_hook,
			position: element.position,
		})
	}

	fn lower_props(&mut self, element: &Element) -> Node {
		if element.children.is_empty() {
			return Node::Props(Props {
				spread: true,
				names: Vec::new(),
			});
		}
		let mut names: Vec<String> = Vec::new();
		for child in &element.children {
			match child {
				Child::Text(text) => {
					for name in text.split_whitespace() {
						if names.iter().any(|known| known == name) {
							self.warn(
								format!("prop '{name}' is listed more than once"),
								element.position,
							);
						} else {
							names.push(name.to_string());
						}
					}
				}
				_ => self.warn(
					"<props> only lists names; other children are ignored".to_string(),
					element.position,
				),
			}
		}
		Node::Props(Props {
			spread: false,
			names,
		})
	}

	fn lower_if(&mut self, element: &Element) -> Node {
		let condition = match element.attributes.first() {
			Some(Attribute::Named(attr)) => match &attr.value {
				Some(AttributeValue::ExpressionContainer(expr)) if !expr.is_empty() => {
					Some(expr.clone())
				}
				_ => None,
			},
			_ => None,
		};
		let condition = condition.unwrap_or_else(|| {
			self.warn(
				"<if> without a condition expression never renders".to_string(),
				element.position,
			);
			Expression::identifier("false")
		});
		Node::IfBlock(IfBlock {
			condition,
			children: self.lower_children(&element.children),
		})
	}

	fn lower_loop(&mut self, element: &Element) -> Node {
		let items = expression_attribute(element, "of").unwrap_or_else(|| {
			self.warn(
				"<loop> without an 'of' expression iterates nothing".to_string(),
				element.position,
			);
			Expression::new("[]")
		});
		let loop_var = binding_attribute(element, "let").unwrap_or_else(|| DEFAULT_LOOP_VAR.to_string());
		let children = self.lower_children(&element.children);

		if items.is_async_source() {
			// Calls and awaits resolve first; the loop then runs over the
			// settled value without binding any user-visible name.
			return Node::AsyncBlock(AsyncBlock {
				promise: items,
				key: None,
				then: vec![Node::LoopBlock(LoopBlock {
					items: Expression::identifier(SETTLED_VALUE),
					loop_var,
					children,
				})],
				catch: Vec::new(),
				loading: Vec::new(),
				then_alias: SETTLED_VALUE.to_string(),
				catch_alias: SETTLED_ERROR.to_string(),
			});
		}

		Node::LoopBlock(LoopBlock {
			items,
			loop_var,
			children,
		})
	}

	fn lower_slot(&mut self, element: &Element) -> Node {
		let name = match element.attribute("name") {
			Some(attr) => {
				let name = AttrValue::normalize(attr.value.as_ref()).as_static_str();
				if name.is_none() {
					self.warn(
						"slot name must be a string; using the default slot".to_string(),
						attr.position,
					);
				}
				name
			}
			None => None,
		};
		Node::Slot(Slot { name })
	}

	fn lower_on_mount(&mut self, element: &Element) -> Node {
		let children = self.lower_children(&element.children);
		if children
			.iter()
			.any(|child| !matches!(child, Node::JsExpression(_)))
		{
			self.warn(
				"<onMount> only runs expressions; other children are ignored".to_string(),
				element.position,
			);
		}
		Node::OnMount(OnMount { children })
	}

	fn lower_async(&mut self, element: &Element) -> Node {
		let key = expression_attribute(element, "key");
		let promise = expression_attribute(element, "promise").unwrap_or_else(|| {
			self.warn(
				"<async> without a 'promise' expression resolves to undefined".to_string(),
				element.position,
			);
			Expression::identifier("undefined")
		});

		let mut then = None;
		let mut catch = None;
		let mut loading = None;
		let mut then_alias = DEFAULT_THEN_ALIAS.to_string();
		let mut catch_alias = DEFAULT_CATCH_ALIAS.to_string();

		for child in &element.children {
			let Child::Element(branch_element) = child else {
				if is_content(child) {
					self.warn(
						"<async> content outside <then>, <catch> or <loading> is ignored"
							.to_string(),
						element.position,
					);
				}
				continue;
			};
			let Some(branch) = AsyncBranch::from_name(&branch_element.name) else {
				self.warn(
					format!(
						"<{}> inside <async> is ignored; expected <then>, <catch> or <loading>",
						branch_element.name
					),
					branch_element.position,
				);
				continue;
			};
			let slot = match branch {
				AsyncBranch::Then => &mut then,
				AsyncBranch::Catch => &mut catch,
				AsyncBranch::Loading => &mut loading,
			};
			if slot.is_some() {
				self.warn(
					format!("duplicate <{}> ignored; the first one wins", branch.as_str()),
					branch_element.position,
				);
				continue;
			}
			match branch {
				AsyncBranch::Then => {
					if let Some(alias) = binding_attribute(branch_element, "let") {
						then_alias = alias;
					}
				}
				AsyncBranch::Catch => {
					if let Some(alias) = binding_attribute(branch_element, "let") {
						catch_alias = alias;
					}
				}
				AsyncBranch::Loading => {}
			}
			*slot = Some(branch_element);
		}

		Node::AsyncBlock(AsyncBlock {
			promise,
			key,
			then: self.lower_branch(then),
			catch: self.lower_branch(catch),
			loading: self.lower_branch(loading),
			then_alias,
			catch_alias,
		})
	}

	fn lower_branch(&mut self, branch: Option<&Element>) -> Vec<Node> {
		branch
			.map(|element| self.lower_children(&element.children))
			.unwrap_or_default()
	}

	fn lower_switch(&mut self, element: &Element) -> Node {
		let value = expression_attribute(element, "on").unwrap_or_else(|| {
			self.warn(
				"<switch> without an 'on' expression matches undefined".to_string(),
				element.position,
			);
			Expression::identifier("undefined")
		});

		let mut cases: Vec<CaseBlock> = Vec::new();
		for child in &element.children {
			match child {
				Child::Element(case) if case.name == CASE_TAG => {
					let value = self.case_value(case);
					if cases.iter().any(|known| known.value == value) {
						self.warn(
							format!(
								"duplicate case {} ignored; the first one wins",
								value.to_js()
							),
							case.position,
						);
						continue;
					}
					cases.push(CaseBlock {
						value,
						children: self.lower_children(&case.children),
					});
				}
				other if is_content(other) => self.warn(
					"<switch> only contains <case> blocks; other content is ignored".to_string(),
					element.position,
				),
				_ => {}
			}
		}

		Node::SwitchBlock(SwitchBlock { value, cases })
	}

	fn case_value(&mut self, case: &Element) -> CaseValue {
		let value = case.attribute("when").and_then(|attr| match &attr.value {
			Some(AttributeValue::StringLiteral(text)) => Some(CaseValue::Str(text.clone())),
			Some(AttributeValue::ExpressionContainer(expr)) => literal_case_value(expr),
			None => None,
		});
		value.unwrap_or_else(|| {
			self.warn(
				"<case> needs a literal 'when' value; matching null".to_string(),
				case.position,
			);
			CaseValue::Null
		})
	}

	fn lower_router(&mut self, element: &Element) -> Node {
		let mut routes = Vec::new();
		for child in &element.children {
			match child {
				Child::Element(route)
					if ReservedTag::from_name(&route.name) == Some(ReservedTag::Route) =>
				{
					routes.push(self.lower_route(route));
				}
				other if is_content(other) => self.warn(
					"<Router> only contains <route> blocks; other content is ignored".to_string(),
					element.position,
				),
				_ => {}
			}
		}
		Node::RouterBlock(RouterBlock { routes })
	}

	fn lower_route(&mut self, element: &Element) -> RouteBlock {
		let path = match element.attribute("path") {
			Some(attr) => match AttrValue::normalize(attr.value.as_ref()).as_static_str() {
				Some(path) => path,
				None => {
					self.warn(
						"<route> needs a literal 'path'; matching '/' instead".to_string(),
						attr.position,
					);
					DEFAULT_ROUTE_PATH.to_string()
				}
			},
			None => DEFAULT_ROUTE_PATH.to_string(),
		};
		for name in RoutePattern::parse(&path).duplicate_params() {
			self.warn(
				format!("route '{path}' captures ':{name}' more than once; the last match wins"),
				element.position,
			);
		}
		RouteBlock {
			let_var: binding_attribute(element, "let"),
			children: self.lower_children(&element.children),
			path,
		}
	}

	fn lower_component(&mut self, element: &Element) -> Node {
		let attributes = element
			.attributes
			.iter()
			.map(|attr| match attr {
				Attribute::Named(named) => ComponentAttr::Named {
					key: named.name.clone(),
					value: AttrValue::normalize(named.value.as_ref()),
				},
				Attribute::Spread(spread) => ComponentAttr::Spread {
					argument: spread.argument.clone(),
				},
			})
			.collect();
		Node::Component(Component {
			name: element.name.clone(),
			attributes,
			children: self.lower_children(&element.children),
		})
	}
}

/// Name of the slot an element is addressed to via `slot="name"`.
fn slot_target(element: &Element) -> Option<String> {
	match &element.attribute("slot")?.value {
		Some(AttributeValue::StringLiteral(name)) => Some(name.clone()),
		_ => None,
	}
}

fn is_named(attr: &Attribute, name: &str) -> bool {
	matches!(attr, Attribute::Named(named) if named.name == name)
}

/// The expression of `name={expr}`, if present and not empty.
fn expression_attribute(element: &Element, name: &str) -> Option<Expression> {
	match &element.attribute(name)?.value {
		Some(AttributeValue::ExpressionContainer(expr)) if !expr.is_empty() => Some(expr.clone()),
		_ => None,
	}
}

/// A binding name written as `name="x"` or `name={x}`.
fn binding_attribute(element: &Element, name: &str) -> Option<String> {
	AttrValue::normalize(element.attribute(name)?.value.as_ref()).as_binding()
}

fn literal_case_value(expr: &Expression) -> Option<CaseValue> {
	match expr.kind() {
		ExpressionKind::StringLiteral => expr.string_value().map(CaseValue::Str),
		ExpressionKind::NumericLiteral => Some(CaseValue::Number(expr.source().to_string())),
		ExpressionKind::BooleanLiteral => expr.boolean_value().map(CaseValue::Bool),
		ExpressionKind::NullLiteral => Some(CaseValue::Null),
		_ => None,
	}
}

/// Whether a child carries content (anything but whitespace or an empty
/// expression).
fn is_content(child: &Child) -> bool {
	match child {
		Child::Text(text) => !text.trim().is_empty(),
		Child::ExpressionContainer(expr) => !expr.is_empty(),
		Child::Element(_) | Child::Fragment(_) => true,
	}
}

/// Normalizes markup text the way JSX does: lines are trimmed, blank lines
/// dropped and the rest joined by single spaces. Whitespace-only text yields
/// `None`.
fn clean_text(raw: &str) -> Option<String> {
	let lines: Vec<&str> = raw.split('\n').map(|line| line.trim_end_matches('\r')).collect();
	let last = lines.len().saturating_sub(1);
	let mut text = String::new();
	for (index, line) in lines.iter().enumerate() {
		let mut line = *line;
		if index > 0 {
			line = line.trim_start();
		}
		if index < last {
			line = line.trim_end();
		}
		if line.is_empty() {
			continue;
		}
		if !text.is_empty() {
			text.push(' ');
		}
		text.push_str(line);
	}
	if text.trim().is_empty() {
		None
	} else {
		Some(text)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use speck_ast::parse;

	fn lower_source(source: &str) -> Lowered {
		lower(&parse(source).unwrap())
	}

	fn single(source: &str) -> Node {
		let lowered = lower_source(source);
		assert_eq!(lowered.document.body.len(), 1, "{:?}", lowered.document);
		lowered.document.body.into_iter().next().unwrap()
	}

	#[rstest]
	#[case("<state count={0} />", "count", AttrValue::Number("0".to_string()), false)]
	#[case("<state name=\"Ada\" />", "name", AttrValue::Str("Ada".to_string()), false)]
	#[case("<state open={false} />", "open", AttrValue::Bool(false), false)]
	#[case("<state ready />", "ready", AttrValue::True, false)]
	#[case("<state items={[]} />", "items", AttrValue::Expr(Expression::new("[]")), true)]
	#[case("<state user={null} />", "user", AttrValue::Expr(Expression::new("null")), true)]
	fn test_lower_state(
		#[case] source: &str,
		#[case] name: &str,
		#[case] value: AttrValue,
		#[case] is_hook: bool,
	) {
		let Node::StateDeclaration(state) = single(source) else {
			panic!("expected a state declaration");
		};
		assert_eq!(state.name.as_deref(), Some(name));
		assert_eq!(state.value, value);
		assert_eq!(state.is_hook, is_hook);
	}

	#[rstest]
	fn test_state_without_attribute_has_no_name() {
		let Node::StateDeclaration(state) = single("<state />") else {
			panic!("expected a state declaration");
		};
		assert_eq!(state.name, None);
	}

	#[rstest]
	#[case("<props />", true, &[])]
	#[case("<props></props>", true, &[])]
	#[case("<props>title\n  body  footer</props>", false, &["title", "body", "footer"])]
	fn test_lower_props(#[case] source: &str, #[case] spread: bool, #[case] names: &[&str]) {
		let Node::Props(props) = single(source) else {
			panic!("expected props");
		};
		assert_eq!(props.spread, spread);
		assert_eq!(props.names, names);
	}

	#[rstest]
	fn test_if_without_condition_defaults_to_false() {
		// Act
		let lowered = lower_source("<if><p>never</p></if>");

		// Assert
		let Node::IfBlock(block) = &lowered.document.body[0] else {
			panic!("expected if block");
		};
		assert_eq!(block.condition.source(), "false");
		assert_eq!(lowered.warnings.len(), 1);
	}

	#[rstest]
	fn test_if_uses_first_attribute() {
		let Node::IfBlock(block) = single("<if when={user && user.admin}>x</if>") else {
			panic!("expected if block");
		};
		assert_eq!(block.condition.source(), "user && user.admin");
		assert_eq!(block.children.len(), 1);
	}

	#[rstest]
	#[case("<loop of={items} let=\"row\" />", "row")]
	#[case("<loop of={items} let={row} />", "row")]
	#[case("<loop of={items} />", "item")]
	fn test_loop_binding(#[case] source: &str, #[case] expected: &str) {
		let Node::LoopBlock(block) = single(source) else {
			panic!("expected loop block");
		};
		assert_eq!(block.items.source(), "items");
		assert_eq!(block.loop_var, expected);
	}

	#[rstest]
	#[case("<loop of={fetchTodos()} let={todo}><li>{todo}</li></loop>")]
	#[case("<loop of={await fetchTodos()} let={todo}><li>{todo}</li></loop>")]
	fn test_loop_over_call_is_wrapped_in_async(#[case] source: &str) {
		// Act
		let node = single(source);

		// Assert
		let Node::AsyncBlock(block) = node else {
			panic!("expected async block");
		};
		assert!(block.promise.source().contains("fetchTodos()"));
		assert_eq!(block.key, None);
		assert!(block.catch.is_empty() && block.loading.is_empty());
		assert_eq!(block.then_alias, "_data");
		let [Node::LoopBlock(inner)] = block.then.as_slice() else {
			panic!("expected a single loop in then");
		};
		assert_eq!(inner.items.source(), "_data");
		assert_eq!(inner.loop_var, "todo");
		assert_eq!(inner.children.len(), 1);
	}

	#[rstest]
	fn test_slot_names() {
		assert_eq!(single("<slot />"), Node::Slot(Slot { name: None }));
		assert_eq!(
			single("<slot name=\"header\" />"),
			Node::Slot(Slot {
				name: Some("header".to_string())
			})
		);
	}

	#[rstest]
	fn test_async_branches_and_aliases() {
		// Arrange
		let source = r#"<async promise={fetchUser(id)} key={id}>
			<loading>Loading</loading>
			<then let={user}><p>{user.name}</p></then>
			<catch let="err">{err.message}</catch>
		</async>"#;

		// Act
		let Node::AsyncBlock(block) = single(source) else {
			panic!("expected async block");
		};

		// Assert
		assert_eq!(block.promise.source(), "fetchUser(id)");
		assert_eq!(block.key.as_ref().map(Expression::source), Some("id"));
		assert_eq!(block.then_alias, "user");
		assert_eq!(block.catch_alias, "err");
		assert_eq!(block.then.len(), 1);
		assert_eq!(block.catch.len(), 1);
		assert_eq!(
			block.loading,
			vec![Node::Text(Text {
				value: "Loading".to_string()
			})]
		);
	}

	#[rstest]
	fn test_duplicate_async_branch_first_wins() {
		let lowered = lower_source(
			"<async promise={load()}><then>first</then><then let={x}>second</then></async>",
		);

		let Node::AsyncBlock(block) = &lowered.document.body[0] else {
			panic!("expected async block");
		};
		assert_eq!(
			block.then,
			vec![Node::Text(Text {
				value: "first".to_string()
			})]
		);
		assert_eq!(block.then_alias, "data");
		assert_eq!(lowered.warnings.len(), 1);
		assert!(lowered.warnings[0].message.contains("duplicate <then>"));
	}

	#[rstest]
	fn test_async_without_promise_degrades() {
		let lowered = lower_source("<async><then>ok</then></async>");
		let Node::AsyncBlock(block) = &lowered.document.body[0] else {
			panic!("expected async block");
		};
		assert_eq!(block.promise.source(), "undefined");
		assert_eq!(lowered.warnings.len(), 1);
	}

	#[rstest]
	fn test_switch_cases() {
		// Arrange
		let source = r#"<switch on={tab}>
			<case when="a">A</case>
			<case when={2}>B</case>
			<case when={true}>C</case>
			<case when={null}>D</case>
		</switch>"#;

		// Act
		let Node::SwitchBlock(block) = single(source) else {
			panic!("expected switch block");
		};

		// Assert
		assert_eq!(block.value.source(), "tab");
		let values: Vec<CaseValue> = block.cases.iter().map(|c| c.value.clone()).collect();
		assert_eq!(
			values,
			vec![
				CaseValue::Str("a".to_string()),
				CaseValue::Number("2".to_string()),
				CaseValue::Bool(true),
				CaseValue::Null,
			]
		);
	}

	#[rstest]
	fn test_switch_non_literal_when_becomes_null() {
		let lowered = lower_source("<switch on={x}><case when={y}>Y</case></switch>");
		let Node::SwitchBlock(block) = &lowered.document.body[0] else {
			panic!("expected switch block");
		};
		assert_eq!(block.cases[0].value, CaseValue::Null);
		assert_eq!(lowered.warnings.len(), 1);
	}

	#[rstest]
	fn test_switch_duplicate_case_first_wins() {
		let lowered = lower_source(
			r#"<switch on={x}><case when="a">first</case><case when={"a"}>second</case></switch>"#,
		);
		let Node::SwitchBlock(block) = &lowered.document.body[0] else {
			panic!("expected switch block");
		};
		assert_eq!(block.cases.len(), 1);
		assert_eq!(
			block.cases[0].children,
			vec![Node::Text(Text {
				value: "first".to_string()
			})]
		);
		assert_eq!(lowered.warnings.len(), 1);
	}

	#[rstest]
	fn test_router_keeps_route_order_and_drops_other_content() {
		// Arrange
		let source = r#"<Router>
			<route path="/">Home</route>
			<p>stray</p>
			<route path="/users/:id" let={params}>{params.id}</route>
			<route>Fallback</route>
		</Router>"#;

		// Act
		let lowered = lower_source(source);

		// Assert
		let Node::RouterBlock(router) = &lowered.document.body[0] else {
			panic!("expected router block");
		};
		let paths: Vec<&str> = router.routes.iter().map(|r| r.path.as_str()).collect();
		assert_eq!(paths, vec!["/", "/users/:id", "/"]);
		assert_eq!(router.routes[1].let_var.as_deref(), Some("params"));
		assert_eq!(router.routes[0].let_var, None);
		assert_eq!(lowered.warnings.len(), 1);
	}

	#[rstest]
	fn test_route_outside_router_is_wrapped() {
		let Node::RouterBlock(router) = single("<route path=\"/about\">About</route>") else {
			panic!("expected router block");
		};
		assert_eq!(router.routes.len(), 1);
		assert_eq!(router.routes[0].path, "/about");
	}

	#[rstest]
	#[case(r#"<route path={base + "/x"}>X</route>"#)]
	#[case("<route path={page}>X</route>")]
	#[case("<route path>X</route>")]
	fn test_non_literal_route_path_warns(#[case] source: &str) {
		// Act
		let lowered = lower_source(source);

		// Assert
		let Node::RouterBlock(router) = &lowered.document.body[0] else {
			panic!("expected router block");
		};
		assert_eq!(router.routes[0].path, "/");
		assert_eq!(lowered.warnings.len(), 1);
		assert!(lowered.warnings[0].message.contains("literal 'path'"));
	}

	#[rstest]
	fn test_literal_route_path_in_container_is_accepted() {
		let lowered = lower_source(r#"<route path={"/about"}>About</route>"#);
		assert!(lowered.warnings.is_empty());
	}

	#[rstest]
	fn test_on_mount_keeps_children() {
		let lowered = lower_source("<onMount>{load()}<p>ignored</p></onMount>");
		let Node::OnMount(mount) = &lowered.document.body[0] else {
			panic!("expected on mount");
		};
		assert_eq!(mount.expressions().count(), 1);
		assert_eq!(lowered.warnings.len(), 1);
	}

	#[rstest]
	fn test_component_attributes_and_named_slots() {
		// Arrange
		let source = r#"<Card title="Hi" count={3} {...rest} disabled>
			<h1 slot="header">Title</h1>
			Body
		</Card>"#;

		// Act
		let Node::Component(card) = single(source) else {
			panic!("expected component");
		};

		// Assert
		assert_eq!(card.name, "Card");
		assert_eq!(
			card.attributes,
			vec![
				ComponentAttr::Named {
					key: "title".to_string(),
					value: AttrValue::Str("Hi".to_string()),
				},
				ComponentAttr::Named {
					key: "count".to_string(),
					value: AttrValue::Number("3".to_string()),
				},
				ComponentAttr::Spread {
					argument: Expression::new("rest"),
				},
				ComponentAttr::Named {
					key: "disabled".to_string(),
					value: AttrValue::True,
				},
			]
		);
		let Node::NamedSlotContent(slot) = &card.children[0] else {
			panic!("expected named slot content");
		};
		assert_eq!(slot.name, "header");
		let Node::Component(heading) = slot.element.as_ref() else {
			panic!("expected slot element");
		};
		assert!(heading.attributes.is_empty());
		assert_eq!(
			card.children[1],
			Node::Text(Text {
				value: "Body".to_string()
			})
		);
	}

	#[rstest]
	fn test_whitespace_and_empty_expressions_are_dropped() {
		let Node::Component(div) = single("<div>\n  <span />\n  {/* note */}\n</div>") else {
			panic!("expected component");
		};
		assert_eq!(div.children.len(), 1);
	}

	#[rstest]
	fn test_non_markup_statements_are_skipped() {
		let lowered = lower_source("import x from './x.js';\n<p>a</p>;\n<p>b</p>");
		assert_eq!(lowered.document.body.len(), 2);
	}

	#[rstest]
	#[case("Hello ", Some("Hello "))]
	#[case("  Hello world  ", Some("  Hello world  "))]
	#[case("\n   Hello\n   world\n", Some("Hello world"))]
	#[case("a\n  b  \n", Some("a b"))]
	#[case("\n   ", None)]
	#[case("   ", None)]
	fn test_clean_text(#[case] raw: &str, #[case] expected: Option<&str>) {
		assert_eq!(clean_text(raw).as_deref(), expected);
	}
}
