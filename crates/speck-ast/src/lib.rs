//! Parse tree definitions for Speck template sources.
//!
//! This crate provides the generic markup tree that Speck sources parse into,
//! together with the parser that builds it from the `oxc` JSX AST. The tree
//! knows nothing about Speck's reserved tags: `state`, `loop` and friends are
//! ordinary elements here and only gain meaning when `speck-compiler` lowers
//! the tree into its IR.
//!
//! ## Source Structure
//!
//! ```text
//! <div>
//!     <state count={0} />
//!     <button onClick={() => setCount(count + 1)}>{count}</button>
//! </div>
//! ```
//!
//! ## Main Types
//!
//! - [`Program`] - A whole source file: a sequence of top-level statements
//! - [`Element`] - A tag with attributes and children
//! - [`Fragment`] - A `<>...</>` group
//! - [`Attribute`] - A named attribute or a `{...spread}`
//! - [`Child`] - Text, expression container, element or fragment
//! - [`Expression`] - An embedded expression, kept as opaque source text
//!
//! ## Usage
//!
//! ```
//! use speck_ast::{Child, Statement, parse};
//!
//! let program = parse(r#"<h1 class="title">Hello {name}</h1>"#).unwrap();
//! let Statement::Markup(markup) = &program.body[0] else {
//!     panic!("expected markup");
//! };
//! let element = markup.as_element().unwrap();
//! assert_eq!(element.name, "h1");
//! assert!(matches!(element.children[1], Child::ExpressionContainer(_)));
//! ```

mod error;
mod expr;
mod node;
mod parser;

pub use error::{ParseError, ParseResult};
pub use expr::{Expression, ExpressionKind};
pub use node::{
	Attribute, AttributeValue, Child, Element, Fragment, Markup, NamedAttribute, Position, Program,
	SpreadAttribute, Statement,
};
pub use parser::parse;
