//! Helper functions for walking IR trees.

use crate::ir::{AsyncBlock, Node, RouterBlock, SwitchBlock};

use super::visitor::IrVisitor;

/// Visits every node of a slice and collects the outputs.
pub fn walk_nodes<V: IrVisitor>(visitor: &mut V, nodes: &[Node]) -> Vec<V::Output> {
	nodes.iter().map(|n| visitor.visit_node(n)).collect()
}

/// Visits the `then`, `catch` and `loading` bodies of an async block, in
/// that order.
pub fn walk_async_branches<V: IrVisitor>(visitor: &mut V, block: &AsyncBlock) -> Vec<V::Output> {
	block
		.then
		.iter()
		.chain(&block.catch)
		.chain(&block.loading)
		.map(|n| visitor.visit_node(n))
		.collect()
}

/// Visits the children of every route of a router.
pub fn walk_routes<V: IrVisitor>(visitor: &mut V, router: &RouterBlock) -> Vec<V::Output> {
	router
		.routes
		.iter()
		.flat_map(|route| &route.children)
		.map(|n| visitor.visit_node(n))
		.collect()
}

/// Visits the children of every case of a switch.
pub fn walk_cases<V: IrVisitor>(visitor: &mut V, switch: &SwitchBlock) -> Vec<V::Output> {
	switch
		.cases
		.iter()
		.flat_map(|case| &case.children)
		.map(|n| visitor.visit_node(n))
		.collect()
}
