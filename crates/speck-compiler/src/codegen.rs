//! Code generation from Speck IR to Preact components.
//!
//! The [`IrVisitor`] trait is the seam for passes over the IR. Two visitors
//! live here: the JSX generator, which renders nodes to component markup,
//! and a usage analysis that tells the assembler which hooks and props the
//! rendered body relies on.
//!
//! ## Example Implementation
//!
//! ```
//! use speck_compiler::codegen::{IrVisitor, walk_async_branches, walk_cases, walk_nodes, walk_routes};
//! use speck_compiler::ir::*;
//!
//! /// Counts text nodes.
//! struct TextCounter(usize);
//!
//! impl IrVisitor for TextCounter {
//!     type Output = ();
//!
//!     fn visit_state(&mut self, _ir: &StateDeclaration) {}
//!     fn visit_props(&mut self, _ir: &Props) {}
//!     fn visit_on_mount(&mut self, _ir: &OnMount) {}
//!     fn visit_if(&mut self, ir: &IfBlock) { walk_nodes(self, &ir.children); }
//!     fn visit_loop(&mut self, ir: &LoopBlock) { walk_nodes(self, &ir.children); }
//!     fn visit_async(&mut self, ir: &AsyncBlock) { walk_async_branches(self, ir); }
//!     fn visit_router(&mut self, ir: &RouterBlock) { walk_routes(self, ir); }
//!     fn visit_switch(&mut self, ir: &SwitchBlock) { walk_cases(self, ir); }
//!     fn visit_slot(&mut self, _ir: &Slot) {}
//!     fn visit_named_slot_content(&mut self, ir: &NamedSlotContent) { self.visit_node(&ir.element); }
//!     fn visit_component(&mut self, ir: &Component) { walk_nodes(self, &ir.children); }
//!     fn visit_fragment(&mut self, ir: &Fragment) { walk_nodes(self, &ir.children); }
//!     fn visit_text(&mut self, _ir: &Text) { self.0 += 1; }
//!     fn visit_expression(&mut self, _ir: &JsExpression) {}
//! }
//!
//! let program = speck_ast::parse("<ul><li>a</li><li>b</li></ul>").unwrap();
//! let document = speck_compiler::lower(&program).document;
//! let mut counter = TextCounter(0);
//! walk_nodes(&mut counter, &document.body);
//! assert_eq!(counter.0, 2);
//! ```

mod component;
mod jsx;
mod options;
mod usage;
mod visitor;
mod walk;

pub use component::{GENERATED_HEADER, GeneratedComponent, generate};
pub use options::CodegenOptions;
pub use visitor::IrVisitor;
pub use walk::*;
