//! Compilation scope.

/// The name bound by the innermost enclosing block.
///
/// At the root of a component the scope name is the component's own name.
/// Loop, route and async blocks rebind it to their alias. A custom tag equal
/// to the scope name is a self-reference and renders as a plain element
/// instead of a component reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope<'a> {
	name: &'a str,
}

impl<'a> Scope<'a> {
	/// Scope at the top of the component named `component`.
	pub fn root(component: &'a str) -> Self {
		Self { name: component }
	}

	/// A child scope bound to `alias`.
	pub fn bind(self, alias: &'a str) -> Self {
		Self { name: alias }
	}

	/// Whether `tag` refers to the currently bound name.
	pub fn is_self_reference(&self, tag: &str) -> bool {
		self.name == tag
	}
}
