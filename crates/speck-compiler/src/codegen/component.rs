//! Assembly of the exported component function.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CompileError, CompileResult};
use crate::ir::{Document, Node, OnMount, Props, StateDeclaration};
use crate::scope::Scope;
use crate::warning::CompileWarning;

use super::jsx::JsxGenerator;
use super::options::CodegenOptions;
use super::usage::{Usage, references};
use super::visitor::IrVisitor;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// AUTO-GENERATED BY SPECK. DO NOT EDIT.";

static COMPONENT_TAG_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"<([A-Z][A-Za-z0-9]*)\b").expect("valid component tag regex"));

/// A generated component module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedComponent {
	/// Module source
	pub code: String,
	/// Sibling components imported from the registry, in order of first use
	pub used_components: Vec<String>,
	/// Degradations applied while generating
	pub warnings: Vec<CompileWarning>,
}

/// Declarations and body gathered from the document.
struct ComponentParts<'d> {
	props: Option<&'d Props>,
	states: Vec<&'d StateDeclaration>,
	mounts: Vec<&'d OnMount>,
	body: Vec<&'d Node>,
}

/// Generates the component module for a lowered document.
///
/// # Examples
///
/// ```
/// use speck_compiler::{CodegenOptions, generate, lower};
///
/// let program = speck_ast::parse("<p>{greeting}</p>").unwrap();
/// let lowered = lower(&program);
/// let output = generate(&lowered.document, "Greeting", &CodegenOptions::default()).unwrap();
/// assert!(output.code.contains("export default function Greeting(props)"));
/// ```
pub fn generate(
	document: &Document,
	component_name: &str,
	options: &CodegenOptions,
) -> CompileResult<GeneratedComponent> {
	if document.body.is_empty() {
		return Err(CompileError::EmptyDocument);
	}
	if !is_identifier(component_name) {
		return Err(CompileError::InvalidComponentName(
			component_name.to_string(),
		));
	}

	let mut warnings = Vec::new();
	let parts = collect_parts(document, &mut warnings);

	let destructured: &[String] = match parts.props {
		Some(props) if !props.spread => &props.names,
		_ => &[],
	};
	let usage = Usage::analyze(parts.body.iter().copied());
	for tag in &usage.misplaced_declarations {
		warnings.push(CompileWarning::new(format!(
			"<{tag}> below the component root is ignored"
		)));
	}

	let mut generator = JsxGenerator::new(Scope::root(component_name), destructured);
	let body: String = parts
		.body
		.iter()
		.map(|node| generator.visit_node(node))
		.collect();

	let mount_statements: Vec<String> = parts
		.mounts
		.iter()
		.copied()
		.flat_map(OnMount::expressions)
		.map(|expr| format!("{};", expr.source()))
		.collect();

	// State setup. Reactivity is inferred from the initializer and from any
	// use of the setter in authored expressions; generated scaffolding never
	// counts.
	let mut setup = Vec::new();
	let mut cells = Vec::new();
	let mut uses_state = usage.needs_state();
	for state in &parts.states {
		let Some(name) = state.name.as_deref() else {
			return Err(CompileError::MissingStateName {
				line: state.position.line,
				column: state.position.column,
			});
		};
		let value = state.value.to_js();
		let setter = format!("set{}", capitalize(name));
		let set_by_author = usage.references(&setter)
			|| mount_statements
				.iter()
				.any(|statement| references(statement, &setter));
		if state.is_hook || set_by_author {
			uses_state = true;
			setup.push(format!("const [{name}, {setter}] = useState({value});"));
		} else {
			setup.push(format!("const _{name}Ref = useRef({value});"));
			setup.push(format!("let {name} = _{name}Ref.current;"));
			cells.push(name);
		}
	}
	if !cells.is_empty() {
		uses_state = true;
		setup.push("const [, _forceRender] = useState(0);".to_string());
		setup.push("function update() {".to_string());
		for name in &cells {
			setup.push(format!("  _{name}Ref.current = {name};"));
		}
		setup.push("  _forceRender((x) => x + 1);".to_string());
		setup.push("}".to_string());
	}
	if !mount_statements.is_empty() {
		setup.push("useEffect(() => {".to_string());
		setup.extend(mount_statements.iter().map(|statement| format!("  {statement}")));
		setup.push("}, []);".to_string());
	}

	let mut hooks = Vec::new();
	if uses_state {
		hooks.push("useState");
	}
	if !cells.is_empty() {
		hooks.push("useRef");
	}
	if !mount_statements.is_empty() || usage.needs_effect() {
		hooks.push("useEffect");
	}

	let used_components = used_components(&body, component_name);

	let signature = match parts.props {
		Some(props) if !props.spread && !props.names.is_empty() => {
			let mut names = props.names.join(", ");
			if usage.reads_props_object(&props.names) {
				names.push_str(", ...props");
			}
			format!("{{ {names} }}")
		}
		_ => "props".to_string(),
	};

	let (open, close) = if options.wrapper_tag.is_empty() {
		("<>".to_string(), "</>".to_string())
	} else {
		(
			format!("<{}>", options.wrapper_tag),
			format!("</{}>", options.wrapper_tag),
		)
	};

	let mut code = String::new();
	code.push_str(GENERATED_HEADER);
	code.push('\n');
	code.push_str(&format!(
		"// This file was compiled from a .{} component.\n\n",
		options.source_extension
	));
	code.push_str(&format!(
		"import {{ {} }} from '{}';\n",
		options.jsx_pragma, options.jsx_module
	));
	if !hooks.is_empty() {
		code.push_str(&format!(
			"import {{ {} }} from '{}';\n",
			hooks.join(", "),
			options.hooks_module
		));
	}
	if !used_components.is_empty() {
		code.push_str(&format!(
			"import {{ {} }} from '{}';\n",
			used_components.join(", "),
			options.registry_module
		));
	}
	code.push('\n');
	code.push_str(&format!(
		"export default function {component_name}({signature}) {{\n"
	));
	for line in &setup {
		code.push_str("  ");
		code.push_str(line);
		code.push('\n');
	}
	code.push_str("  return (\n");
	code.push_str(&format!("    {open}\n"));
	if !body.is_empty() {
		code.push_str("      ");
		code.push_str(&body);
		code.push('\n');
	}
	code.push_str(&format!("    {close}\n"));
	code.push_str("  );\n}\n");

	tracing::debug!(
		component = component_name,
		states = parts.states.len(),
		imports = used_components.len(),
		"generated component"
	);

	Ok(GeneratedComponent {
		code,
		used_components,
		warnings,
	})
}

fn collect_parts<'d>(
	document: &'d Document,
	warnings: &mut Vec<CompileWarning>,
) -> ComponentParts<'d> {
	let root = document.root_component();

	let mut declarations: Vec<&Node> = Vec::new();
	let mut body: Vec<&Node> = Vec::new();
	let mut root_seen = false;
	for node in &document.body {
		match node {
			_ if node.is_declaration() => declarations.push(node),
			Node::Component(_) if !root_seen => root_seen = true,
			other if root.is_some() => warnings.push(CompileWarning::new(format!(
				"top-level {} outside the root component is ignored",
				other.type_name()
			))),
			other => body.push(other),
		}
	}

	if let Some(root) = root {
		for child in &root.children {
			match child {
				_ if child.is_declaration() => declarations.push(child),
				// The root is rendered as the wrapper, so slot content
				// addressed to it renders in place.
				Node::NamedSlotContent(slot) => body.push(&slot.element),
				_ => body.push(child),
			}
		}
	}

	let mut props = None;
	let mut states = Vec::new();
	let mut mounts = Vec::new();
	for node in declarations {
		match node {
			Node::Props(declared) if props.is_none() => props = Some(declared),
			Node::Props(_) => warnings.push(CompileWarning::new(
				"duplicate <props> declaration ignored",
			)),
			Node::StateDeclaration(state) => states.push(state),
			Node::OnMount(mount) => mounts.push(mount),
			_ => {}
		}
	}

	ComponentParts {
		props,
		states,
		mounts,
		body,
	}
}

/// Uppercase tags referenced by the rendered body, deduplicated in order of
/// first appearance and excluding the component itself.
fn used_components(body: &str, component_name: &str) -> Vec<String> {
	let mut names: Vec<String> = Vec::new();
	for captures in COMPONENT_TAG_RE.captures_iter(body) {
		let name = &captures[1];
		if name != component_name && !names.iter().any(|known| known == name) {
			names.push(name.to_string());
		}
	}
	names
}

fn capitalize(name: &str) -> String {
	let mut chars = name.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

fn is_identifier(name: &str) -> bool {
	let mut chars = name.chars();
	chars
		.next()
		.is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
		&& chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::attr::AttrValue;
	use crate::ir::{Component, JsExpression, Text};
	use rstest::rstest;
	use speck_ast::{Expression, Position};

	fn state(name: Option<&str>, value: AttrValue) -> Node {
		let is_hook = !value.is_literal();
		Node::StateDeclaration(StateDeclaration {
			name: name.map(str::to_string),
			value,
			is_hook,
			position: Position { line: 1, column: 6 },
		})
	}

	fn root(children: Vec<Node>) -> Document {
		Document {
			body: vec![Node::Component(Component {
				name: "div".to_string(),
				attributes: Vec::new(),
				children,
			})],
		}
	}

	fn expression(source: &str) -> Node {
		Node::JsExpression(JsExpression {
			expression: Expression::new(source),
		})
	}

	#[rstest]
	fn test_empty_document_is_rejected() {
		let result = generate(&Document::default(), "App", &CodegenOptions::default());
		assert_eq!(result, Err(CompileError::EmptyDocument));
	}

	#[rstest]
	fn test_invalid_component_name_is_rejected() {
		let document = root(Vec::new());
		let result = generate(&document, "my-app", &CodegenOptions::default());
		assert_eq!(
			result,
			Err(CompileError::InvalidComponentName("my-app".to_string()))
		);
	}

	#[rstest]
	fn test_missing_state_name_is_fatal() {
		let document = root(vec![state(None, AttrValue::True)]);
		let result = generate(&document, "App", &CodegenOptions::default());
		assert_eq!(
			result,
			Err(CompileError::MissingStateName { line: 1, column: 6 })
		);
	}

	#[rstest]
	fn test_literal_state_without_setter_uses_cell() {
		// Arrange
		let document = root(vec![
			state(Some("count"), AttrValue::Number("5".to_string())),
			expression("count"),
		]);

		// Act
		let output = generate(&document, "App", &CodegenOptions::default()).unwrap();

		// Assert
		assert!(output.code.contains("const _countRef = useRef(5);"));
		assert!(output.code.contains("let count = _countRef.current;"));
		assert!(output.code.contains("_countRef.current = count;"));
		assert!(output.code.contains("_forceRender((x) => x + 1);"));
		assert!(
			output
				.code
				.contains("import { useState, useRef } from 'preact/hooks';")
		);
		assert!(!output.code.contains("setCount"));
	}

	#[rstest]
	fn test_expression_state_uses_hook() {
		let document = root(vec![state(
			Some("items"),
			AttrValue::Expr(Expression::new("[]")),
		)]);

		let output = generate(&document, "App", &CodegenOptions::default()).unwrap();

		assert!(output.code.contains("const [items, setItems] = useState([]);"));
		assert!(!output.code.contains("useRef"));
	}

	#[rstest]
	fn test_setter_reference_promotes_literal_state() {
		let document = root(vec![
			state(Some("open"), AttrValue::Bool(false)),
			expression("() => setOpen(!open)"),
		]);

		let output = generate(&document, "App", &CodegenOptions::default()).unwrap();

		assert!(output.code.contains("const [open, setOpen] = useState(false);"));
	}

	#[rstest]
	fn test_setter_prefix_is_not_a_reference() {
		let document = root(vec![
			state(Some("open"), AttrValue::Bool(false)),
			expression("setOpened(true)"),
		]);

		let output = generate(&document, "App", &CodegenOptions::default()).unwrap();

		assert!(output.code.contains("const _openRef = useRef(false);"));
	}

	#[rstest]
	fn test_string_state_is_json_quoted() {
		let document = root(vec![state(
			Some("label"),
			AttrValue::Str("it's \"ok\"".to_string()),
		)]);

		let output = generate(&document, "App", &CodegenOptions::default()).unwrap();

		assert!(output
			.code
			.contains(r#"const _labelRef = useRef("it's \"ok\"");"#));
	}

	#[rstest]
	fn test_mount_effects_are_merged() {
		let document = Document {
			body: vec![
				Node::OnMount(OnMount {
					children: vec![expression("first()")],
				}),
				Node::Component(Component {
					name: "main".to_string(),
					attributes: Vec::new(),
					children: vec![Node::OnMount(OnMount {
						children: vec![expression("second()")],
					})],
				}),
			],
		};

		let output = generate(&document, "App", &CodegenOptions::default()).unwrap();

		assert!(
			output
				.code
				.contains("  useEffect(() => {\n    first();\n    second();\n  }, []);\n")
		);
		assert!(output.code.contains("import { useEffect } from 'preact/hooks';"));
	}

	#[rstest]
	fn test_props_signature() {
		// Arrange
		let document = root(vec![
			Node::Props(Props {
				spread: false,
				names: vec!["title".to_string()],
			}),
			Node::Component(Component {
				name: "h1".to_string(),
				attributes: Vec::new(),
				children: vec![expression("title")],
			}),
			Node::Slot(crate::ir::Slot { name: None }),
		]);

		// Act
		let output = generate(&document, "Card", &CodegenOptions::default()).unwrap();

		// Assert
		assert!(
			output
				.code
				.contains("export default function Card({ title, ...props }) {")
		);
		assert!(output.code.contains("<h1>{title}</h1>{props.children}"));
	}

	#[rstest]
	fn test_used_components_are_imported_once() {
		let document = root(vec![
			Node::Component(Component {
				name: "Nav".to_string(),
				attributes: Vec::new(),
				children: Vec::new(),
			}),
			Node::Component(Component {
				name: "Card".to_string(),
				attributes: Vec::new(),
				children: Vec::new(),
			}),
			Node::Component(Component {
				name: "Nav".to_string(),
				attributes: Vec::new(),
				children: Vec::new(),
			}),
		]);

		let output = generate(&document, "App", &CodegenOptions::default()).unwrap();

		assert_eq!(output.used_components, vec!["Nav", "Card"]);
		assert!(
			output
				.code
				.contains("import { Nav, Card } from './_componentRegistry.js';")
		);
	}

	#[rstest]
	fn test_minimal_output_layout() {
		let document = root(vec![Node::Text(Text {
			value: "Hello".to_string(),
		})]);

		let output = generate(&document, "Hello", &CodegenOptions::default()).unwrap();

		let expected = [
			"// AUTO-GENERATED BY SPECK. DO NOT EDIT.",
			"// This file was compiled from a .speck component.",
			"",
			"import { h } from 'preact';",
			"",
			"export default function Hello(props) {",
			"  return (",
			"    <div>",
			"      Hello",
			"    </div>",
			"  );",
			"}",
			"",
		]
		.join("\n");
		assert_eq!(output.code, expected);
		assert!(output.warnings.is_empty());
	}

	#[rstest]
	fn test_fragment_wrapper() {
		let options = CodegenOptions {
			wrapper_tag: String::new(),
			..CodegenOptions::default()
		};
		let output = generate(&root(Vec::new()), "App", &options).unwrap();
		assert!(output.code.contains("    <>\n    </>\n"));
	}

	#[rstest]
	fn test_extra_top_level_nodes_warn() {
		let mut document = root(Vec::new());
		document.body.push(Node::Text(Text {
			value: "stray".to_string(),
		}));

		let output = generate(&document, "App", &CodegenOptions::default()).unwrap();

		assert_eq!(output.warnings.len(), 1);
		assert!(!output.code.contains("stray"));
	}

	#[rstest]
	fn test_without_root_component_top_level_nodes_render() {
		let document = Document {
			body: vec![
				Node::Text(Text {
					value: "a".to_string(),
				}),
				expression("b"),
			],
		};

		let output = generate(&document, "App", &CodegenOptions::default()).unwrap();

		assert!(output.code.contains("      a{b}\n"));
	}

	#[rstest]
	#[case("count", "Count")]
	#[case("éclair", "Éclair")]
	#[case("", "")]
	fn test_capitalize(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(capitalize(input), expected);
	}
}
