//! Compiler from Speck templates to Preact function components.
//!
//! Compilation runs in three stages:
//!
//! 1. **Parse** - `speck-ast` turns the source into a generic markup tree
//! 2. **Lower** - [`lower`] maps reserved tags (`state`, `if`, `loop`,
//!    `async`, `switch`, `Router`, ...) to typed [`ir::Node`]s
//! 3. **Generate** - [`generate`] renders the IR as an ES module exporting one
//!    component
//!
//! [`compile`] runs all three for a single source file. Compilation is pure:
//! no filesystem access happens here.
//!
//! ## Example
//!
//! ```
//! use speck_compiler::{CodegenOptions, compile};
//!
//! let source = r#"<section>
//!     <props>title</props>
//!     <h1>{title}</h1>
//!     <slot />
//! </section>"#;
//!
//! let output = compile(source, "Panel", &CodegenOptions::default()).unwrap();
//! assert!(output.code.contains("export default function Panel({ title, ...props })"));
//! assert!(output.code.contains("{props.children}"));
//! assert!(output.warnings.is_empty());
//! ```

mod attr;
pub mod codegen;
mod error;
pub mod ir;
mod lower;
mod pipeline;
pub mod route;
mod scope;
mod tags;
mod warning;

pub use attr::AttrValue;
pub use codegen::{CodegenOptions, GENERATED_HEADER, GeneratedComponent, IrVisitor, generate};
pub use error::{CompileError, CompileResult};
pub use lower::{Lowered, lower};
pub use pipeline::{CompileOutput, compile};
pub use route::{RouteParams, RoutePattern};
pub use scope::Scope;
pub use tags::{AsyncBranch, CASE_TAG, ReservedTag};
pub use warning::CompileWarning;
