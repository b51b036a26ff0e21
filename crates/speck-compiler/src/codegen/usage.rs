//! Analysis of what a component body needs from the runtime.

use crate::ir::{
	AsyncBlock, Component, ComponentAttr, Fragment, IfBlock, JsExpression, LoopBlock,
	NamedSlotContent, Node, OnMount, Props, RouterBlock, Slot, StateDeclaration, SwitchBlock, Text,
};

use regex::Regex;

use super::visitor::IrVisitor;
use super::walk::{walk_async_branches, walk_cases, walk_nodes, walk_routes};

/// Hooks and props accessed by the rendered body.
#[derive(Debug, Default)]
pub(crate) struct Usage {
	/// Number of async blocks (each holds state and an effect)
	pub async_blocks: usize,
	/// Number of non-root mount effects with at least one expression
	pub nested_mounts: usize,
	/// Slots read by the body, `None` being the default slot
	pub slot_reads: Vec<Option<String>>,
	/// Declarations found below the component root, which generate nothing
	pub misplaced_declarations: Vec<&'static str>,
	/// Source text of every expression the author wrote in the body
	pub scripts: Vec<String>,
}

impl Usage {
	pub(crate) fn analyze<'n>(nodes: impl IntoIterator<Item = &'n Node>) -> Self {
		let mut usage = Self::default();
		for node in nodes {
			usage.visit_node(node);
		}
		usage
	}

	/// Whether any authored expression mentions `name` as a whole word.
	pub(crate) fn references(&self, name: &str) -> bool {
		self.scripts.iter().any(|script| references(script, name))
	}

	pub(crate) fn needs_state(&self) -> bool {
		self.async_blocks > 0
	}

	pub(crate) fn needs_effect(&self) -> bool {
		self.async_blocks > 0 || self.nested_mounts > 0
	}

	/// Whether a slot read is not covered by the destructured prop names,
	/// so the props object itself must stay reachable.
	pub(crate) fn reads_props_object(&self, destructured: &[String]) -> bool {
		self.slot_reads.iter().any(|slot| {
			let name = slot.as_deref().unwrap_or("children");
			!destructured.iter().any(|prop| prop == name)
		})
	}
}

impl IrVisitor for Usage {
	type Output = ();

	fn visit_state(&mut self, _ir: &StateDeclaration) {
		self.misplaced_declarations.push("state");
	}

	fn visit_props(&mut self, _ir: &Props) {
		self.misplaced_declarations.push("props");
	}

	fn visit_on_mount(&mut self, ir: &OnMount) {
		let before = self.scripts.len();
		self.scripts
			.extend(ir.expressions().map(|expr| expr.source().to_string()));
		if self.scripts.len() > before {
			self.nested_mounts += 1;
		}
	}

	fn visit_if(&mut self, ir: &IfBlock) {
		self.scripts.push(ir.condition.source().to_string());
		walk_nodes(self, &ir.children);
	}

	fn visit_loop(&mut self, ir: &LoopBlock) {
		self.scripts.push(ir.items.source().to_string());
		walk_nodes(self, &ir.children);
	}

	fn visit_async(&mut self, ir: &AsyncBlock) {
		self.async_blocks += 1;
		self.scripts.push(ir.promise.source().to_string());
		if let Some(key) = &ir.key {
			self.scripts.push(key.source().to_string());
		}
		walk_async_branches(self, ir);
	}

	fn visit_router(&mut self, ir: &RouterBlock) {
		walk_routes(self, ir);
	}

	fn visit_switch(&mut self, ir: &SwitchBlock) {
		self.scripts.push(ir.value.source().to_string());
		walk_cases(self, ir);
	}

	fn visit_slot(&mut self, ir: &Slot) {
		self.slot_reads.push(ir.name.clone());
	}

	fn visit_named_slot_content(&mut self, ir: &NamedSlotContent) {
		self.visit_node(&ir.element);
	}

	fn visit_component(&mut self, ir: &Component) {
		for attr in &ir.attributes {
			let script = match attr {
				ComponentAttr::Named { value, .. } => value.script_source(),
				ComponentAttr::Spread { argument } => Some(argument.source()),
			};
			self.scripts.extend(script.map(str::to_string));
		}
		walk_nodes(self, &ir.children);
	}

	fn visit_fragment(&mut self, ir: &Fragment) {
		walk_nodes(self, &ir.children);
	}

	fn visit_text(&mut self, _ir: &Text) {}

	fn visit_expression(&mut self, ir: &JsExpression) {
		self.scripts.push(ir.expression.source().to_string());
	}
}

/// Whether `name` appears in `haystack` as a whole identifier.
pub(super) fn references(haystack: &str, name: &str) -> bool {
	let pattern = format!(
		r"(?:^|[^A-Za-z0-9_$]){}(?:$|[^A-Za-z0-9_$])",
		regex::escape(name)
	);
	match Regex::new(&pattern) {
		Ok(re) => re.is_match(haystack),
		Err(_) => haystack.contains(name),
	}
}
