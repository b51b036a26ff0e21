//! Rendering of IR nodes to Preact JSX.

use crate::attr::AttrValue;
use crate::ir::{
	AsyncBlock, Component, ComponentAttr, Fragment, IfBlock, JsExpression, LoopBlock,
	NamedSlotContent, Node, OnMount, Props, RouteBlock, RouterBlock, SETTLED_ERROR, SETTLED_VALUE,
	Slot, StateDeclaration, SwitchBlock, Text, js_string,
};
use crate::route::RoutePattern;
use crate::scope::Scope;
use speck_ast::{Expression, ExpressionKind};

use super::visitor::IrVisitor;
use super::walk::walk_nodes;

/// Renders nodes as JSX children.
///
/// The generator carries the compilation scope by value; blocks that bind a
/// name render their children with a fresh generator bound to that name.
pub(crate) struct JsxGenerator<'a> {
	scope: Scope<'a>,
	destructured: &'a [String],
}

impl<'a> JsxGenerator<'a> {
	/// Creates a generator at the root scope. `destructured` lists the prop
	/// names bound directly in the function signature.
	pub(crate) fn new(scope: Scope<'a>, destructured: &'a [String]) -> Self {
		Self {
			scope,
			destructured,
		}
	}

	pub(crate) fn render_nodes(&mut self, nodes: &[Node]) -> String {
		walk_nodes(self, nodes).concat()
	}

	fn with_scope<'b>(&self, alias: &'b str) -> JsxGenerator<'b>
	where
		'a: 'b,
	{
		let scope: Scope<'b> = self.scope;
		JsxGenerator {
			scope: scope.bind(alias),
			destructured: self.destructured,
		}
	}

	fn render_route(&mut self, index: usize, route: &RouteBlock) -> String {
		let pattern = RoutePattern::parse(&route.path);
		let alias = route.let_var.as_deref();
		let children = match alias {
			Some(alias) => self.with_scope(alias).render_nodes(&route.children),
			None => self.render_nodes(&route.children),
		};
		let body = format!("return (<>{children}</>);");

		if pattern.is_static() {
			let binding = alias
				.map(|alias| format!("const {alias} = {{}};\n"))
				.unwrap_or_default();
			return format!(
				"if (_path === {}) {{\n{binding}{body}\n}}",
				js_string(&route.path)
			);
		}

		let match_var = format!("_match{index}");
		let binding = alias
			.map(|alias| {
				let fields = pattern
					.param_names()
					.iter()
					.enumerate()
					.map(|(i, name)| format!("{}: {match_var}[{}]", object_key(name), i + 1))
					.collect::<Vec<_>>()
					.join(", ");
				format!("const {alias} = {{ {fields} }};\n")
			})
			.unwrap_or_default();
		format!(
			"const {match_var} = new RegExp({}).exec(_path);\nif ({match_var}) {{\n{binding}{body}\n}}",
			js_string(&pattern.regex_source())
		)
	}
}

impl IrVisitor for JsxGenerator<'_> {
	type Output = String;

	fn visit_state(&mut self, _ir: &StateDeclaration) -> String {
		String::new()
	}

	fn visit_props(&mut self, _ir: &Props) -> String {
		String::new()
	}

	fn visit_on_mount(&mut self, ir: &OnMount) -> String {
		let Some(effect) = mount_effect([ir]) else {
			return String::new();
		};
		format!("{{(() => {{\n{effect}\nreturn null;\n}})()}}")
	}

	fn visit_if(&mut self, ir: &IfBlock) -> String {
		let children = self.render_nodes(&ir.children);
		format!(
			"{{Boolean({}) && (<>{children}</>)}}",
			ir.condition.source()
		)
	}

	fn visit_loop(&mut self, ir: &LoopBlock) -> String {
		let children = self.with_scope(&ir.loop_var).render_nodes(&ir.children);
		format!(
			"{{{}.map(({}, {}) => {{\nreturn (<>{children}</>);\n}})}}",
			iterable(&ir.items),
			ir.loop_var,
			index_param(&ir.loop_var)
		)
	}

	fn visit_async(&mut self, ir: &AsyncBlock) -> String {
		let deps = ir
			.key
			.as_ref()
			.map_or_else(|| "[]".to_string(), |key| format!("[{}]", key.source()));

		// A loop directly under `then` iterates the settled value itself and
		// keeps the enclosing scope.
		let then_body: String = ir
			.then
			.iter()
			.map(|child| match child {
				Node::LoopBlock(_) => self.visit_node(child),
				_ => self.with_scope(&ir.then_alias).visit_node(child),
			})
			.collect();
		let catch_body = self.with_scope(&ir.catch_alias).render_nodes(&ir.catch);
		let loading_body = self.render_nodes(&ir.loading);

		let then_binding = alias_binding(&ir.then_alias, SETTLED_VALUE);
		let catch_binding = alias_binding(&ir.catch_alias, SETTLED_ERROR);

		let lines = [
			"{(() => {".to_string(),
			"const [_status, _setStatus] = useState(\"pending\");".to_string(),
			"const [_data, _setData] = useState(null);".to_string(),
			"const [_error, _setError] = useState(null);".to_string(),
			"useEffect(() => {".to_string(),
			"let _active = true;".to_string(),
			"_setStatus(\"pending\");".to_string(),
			"Promise.resolve()".to_string(),
			format!(".then(async () => ({}))", ir.promise.source()),
			".then((_result) => { if (_active) { _setData(_result); _setStatus(\"fulfilled\"); } })"
				.to_string(),
			".catch((_err) => { if (_active) { _setError(_err); _setStatus(\"rejected\"); } });"
				.to_string(),
			"return () => { _active = false; };".to_string(),
			format!("}}, {deps});"),
			"if (_status === \"fulfilled\") {".to_string(),
			format!("{then_binding}return (<>{then_body}</>);"),
			"}".to_string(),
			"if (_status === \"rejected\") {".to_string(),
			format!("{catch_binding}return (<>{catch_body}</>);"),
			"}".to_string(),
			format!("return (<>{loading_body}</>);"),
			"})()}".to_string(),
		];
		lines.join("\n")
	}

	fn visit_router(&mut self, ir: &RouterBlock) -> String {
		let routes = ir
			.routes
			.iter()
			.enumerate()
			.map(|(index, route)| self.render_route(index, route))
			.collect::<Vec<_>>()
			.join("\n");
		format!("{{(() => {{\nconst _path = location.pathname;\n{routes}\nreturn null;\n}})()}}")
	}

	fn visit_switch(&mut self, ir: &SwitchBlock) -> String {
		let cases: String = ir
			.cases
			.iter()
			.map(|case| {
				let children = self.render_nodes(&case.children);
				format!("case {}: return (<>{children}</>);\n", case.value.to_js())
			})
			.collect();
		format!(
			"{{(() => {{\nswitch ({}) {{\n{cases}default: return null;\n}}\n}})()}}",
			ir.value.source()
		)
	}

	fn visit_slot(&mut self, ir: &Slot) -> String {
		match ir.name.as_deref() {
			Some(name) if self.is_destructured(name) => format!("{{{name}}}"),
			Some(name) => format!("{{props[{}]}}", js_string(name)),
			None if self.is_destructured("children") => "{children}".to_string(),
			None => "{props.children}".to_string(),
		}
	}

	fn visit_named_slot_content(&mut self, ir: &NamedSlotContent) -> String {
		let content = self.visit_node(&ir.element);
		match ir.element.as_ref() {
			Node::Component(_) => format!("{}={{{content}}}", ir.name),
			_ => format!("{}={{<>{content}</>}}", ir.name),
		}
	}

	fn visit_component(&mut self, ir: &Component) -> String {
		let attributes: Vec<String> = ir.attributes.iter().map(render_attribute).collect();
		let children: String = ir
			.children
			.iter()
			.filter(|child| !matches!(child, Node::NamedSlotContent(_)))
			.map(|child| self.visit_node(child))
			.collect();

		let mut props = attributes;
		if ir.is_custom() && !self.scope.is_self_reference(&ir.name) {
			// Named slot content becomes props of the referenced component.
			for child in &ir.children {
				if let Node::NamedSlotContent(slot) = child {
					props.push(self.visit_named_slot_content(slot));
				}
			}
		}
		let props: String = props.iter().map(|prop| format!(" {prop}")).collect();

		if children.is_empty() {
			format!("<{}{props} />", ir.name)
		} else {
			format!("<{name}{props}>{children}</{name}>", name = ir.name)
		}
	}

	fn visit_fragment(&mut self, ir: &Fragment) -> String {
		self.render_nodes(&ir.children)
	}

	fn visit_text(&mut self, ir: &Text) -> String {
		ir.value.clone()
	}

	fn visit_expression(&mut self, ir: &JsExpression) -> String {
		format!("{{{}}}", ir.expression.source())
	}
}

impl JsxGenerator<'_> {
	fn is_destructured(&self, name: &str) -> bool {
		self.destructured.iter().any(|prop| prop == name)
	}
}

/// Renders the body of one mount effect merging the expressions of every
/// given block, or `None` when there is nothing to run.
pub(crate) fn mount_effect<'n>(blocks: impl IntoIterator<Item = &'n OnMount>) -> Option<String> {
	let statements: Vec<String> = blocks
		.into_iter()
		.flat_map(OnMount::expressions)
		.map(|expr| format!("{};", expr.source()))
		.collect();
	if statements.is_empty() {
		return None;
	}
	Some(format!(
		"useEffect(() => {{\n{}\n}}, []);",
		statements.join("\n")
	))
}

fn render_attribute(attr: &ComponentAttr) -> String {
	match attr {
		ComponentAttr::Spread { argument } => format!("{{...{}}}", argument.source()),
		ComponentAttr::Named { key, value } => match value {
			AttrValue::True => key.clone(),
			AttrValue::Str(text) if value.script_source().is_some() => format!("{key}={{{text}}}"),
			AttrValue::Str(text) => format!("{key}=\"{}\"", text.replace('"', "'")),
			AttrValue::Number(number) => format!("{key}={{{number}}}"),
			AttrValue::Bool(value) => format!("{key}={{{value}}}"),
			AttrValue::Expr(expr) => format!("{key}={{{}}}", expr.source()),
		},
	}
}

/// The source of a loop, parenthesized unless `.map` can follow it directly.
fn iterable(items: &Expression) -> String {
	match items.kind() {
		ExpressionKind::Identifier | ExpressionKind::Call => items.source().to_string(),
		_ => format!("({})", items.source()),
	}
}

/// The index parameter of a loop callback, distinct from the loop variable.
fn index_param(loop_var: &str) -> &'static str {
	if loop_var == "_index" { "_index2" } else { "_index" }
}

fn alias_binding(alias: &str, state: &str) -> String {
	if alias == state {
		String::new()
	} else {
		format!("const {alias} = {state};\n")
	}
}

fn object_key(name: &str) -> String {
	let mut chars = name.chars();
	let valid = chars
		.next()
		.is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
		&& chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$');
	if valid {
		name.to_string()
	} else {
		js_string(name)
	}
}
