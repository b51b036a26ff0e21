//! # Speck
//!
//! A compiler for Speck, a JSX-like template dialect with declarative
//! control-flow tags, targeting hooks-based Preact function components.
//!
//! ## Crates
//!
//! - [`ast`] - The generic markup parse tree and its parser
//! - [`compiler`] - Lowering, the Speck IR and component generation
//!
//! The `speck` binary (crate `speck-cli`) drives whole directories and keeps
//! the component registry in sync.
//!
//! ## Reserved Tags
//!
//! | Tag | Meaning |
//! |-----|---------|
//! | `<state name={v} />` | Component state, reactive when updated via `setName` |
//! | `<props>a b</props>` | Named props; `<props />` keeps the whole object |
//! | `<if cond={x}>` | Conditional rendering |
//! | `<loop of={xs} let="x">` | Iteration, awaiting `of` when it is a call |
//! | `<async promise={p} key={k}>` | `then`/`catch`/`loading` branches |
//! | `<switch on={v}>` | `case when=...` branches, no default |
//! | `<Router>` / `<route path="/u/:id" let={params}>` | Client-side routing |
//! | `<slot name="x" />` | Slot rendering; `slot="x"` on a child fills it |
//! | `<onMount>` | Expressions run once after mount |
//!
//! ## Quick Example
//!
//! ```
//! use speck::prelude::*;
//!
//! let source = r#"<div>
//!     <state count={0} />
//!     <button onClick={() => setCount(count + 1)}>{count}</button>
//! </div>"#;
//!
//! let output = compile(source, "Counter", &CodegenOptions::default()).unwrap();
//! assert!(output.code.starts_with(GENERATED_HEADER));
//! assert!(output.code.contains("useState(0)"));
//! ```

pub use speck_ast as ast;
pub use speck_compiler as compiler;

pub use speck_ast::{ParseError, parse};
pub use speck_compiler::{
	CodegenOptions, CompileError, CompileOutput, CompileResult, CompileWarning, compile, generate,
	lower,
};

/// Commonly used items.
pub mod prelude {
	pub use speck_ast::{Expression, ParseError, Program, parse};
	pub use speck_compiler::ir::{Document, Node};
	pub use speck_compiler::{
		CodegenOptions, CompileError, CompileOutput, CompileWarning, GENERATED_HEADER, IrVisitor,
		Lowered, RoutePattern, compile, generate, lower,
	};
}
