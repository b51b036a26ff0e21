//! IrVisitor trait for walking the Speck IR.

use crate::ir::{
	AsyncBlock, Component, Fragment, IfBlock, JsExpression, LoopBlock, NamedSlotContent, Node,
	OnMount, Props, RouterBlock, Slot, StateDeclaration, SwitchBlock, Text,
};

/// Trait for visiting IR nodes and producing output.
///
/// The JSX generator and the hook-usage analysis are both visitors; new
/// passes over the IR should implement this trait rather than matching on
/// [`Node`] themselves.
pub trait IrVisitor {
	/// The output type produced by visiting nodes.
	type Output;

	/// Visits any node, dispatching on its variant.
	fn visit_node(&mut self, node: &Node) -> Self::Output {
		match node {
			Node::StateDeclaration(ir) => self.visit_state(ir),
			Node::Props(ir) => self.visit_props(ir),
			Node::IfBlock(ir) => self.visit_if(ir),
			Node::LoopBlock(ir) => self.visit_loop(ir),
			Node::AsyncBlock(ir) => self.visit_async(ir),
			Node::RouterBlock(ir) => self.visit_router(ir),
			Node::SwitchBlock(ir) => self.visit_switch(ir),
			Node::Slot(ir) => self.visit_slot(ir),
			Node::NamedSlotContent(ir) => self.visit_named_slot_content(ir),
			Node::OnMount(ir) => self.visit_on_mount(ir),
			Node::Component(ir) => self.visit_component(ir),
			Node::Fragment(ir) => self.visit_fragment(ir),
			Node::Text(ir) => self.visit_text(ir),
			Node::JsExpression(ir) => self.visit_expression(ir),
		}
	}

	// Declarations
	/// Visits a state declaration.
	fn visit_state(&mut self, ir: &StateDeclaration) -> Self::Output;

	/// Visits a props declaration.
	fn visit_props(&mut self, ir: &Props) -> Self::Output;

	/// Visits a mount effect.
	fn visit_on_mount(&mut self, ir: &OnMount) -> Self::Output;

	// Control flow
	fn visit_if(&mut self, ir: &IfBlock) -> Self::Output;

	fn visit_loop(&mut self, ir: &LoopBlock) -> Self::Output;

	fn visit_async(&mut self, ir: &AsyncBlock) -> Self::Output;

	fn visit_router(&mut self, ir: &RouterBlock) -> Self::Output;

	fn visit_switch(&mut self, ir: &SwitchBlock) -> Self::Output;

	// Slots
	fn visit_slot(&mut self, ir: &Slot) -> Self::Output;

	fn visit_named_slot_content(&mut self, ir: &NamedSlotContent) -> Self::Output;

	// Markup
	/// Visits a generic (native or user) component.
	fn visit_component(&mut self, ir: &Component) -> Self::Output;

	fn visit_fragment(&mut self, ir: &Fragment) -> Self::Output;

	fn visit_text(&mut self, ir: &Text) -> Self::Output;

	fn visit_expression(&mut self, ir: &JsExpression) -> Self::Output;
}
