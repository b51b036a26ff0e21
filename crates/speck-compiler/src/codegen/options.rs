//! Code generation options.

/// Runtime module names and wrapper settings used by generated components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
	/// Module providing the JSX factory
	pub jsx_module: String,
	/// JSX factory imported from `jsx_module`
	pub jsx_pragma: String,
	/// Module providing `useState`, `useRef` and `useEffect`
	pub hooks_module: String,
	/// Module re-exporting every generated component
	pub registry_module: String,
	/// Element wrapping the component body; empty for a fragment
	pub wrapper_tag: String,
	/// Extension of source files, mentioned in the generated header
	pub source_extension: String,
}

impl Default for CodegenOptions {
	fn default() -> Self {
		Self {
			jsx_module: "preact".to_string(),
			jsx_pragma: "h".to_string(),
			hooks_module: "preact/hooks".to_string(),
			registry_module: "./_componentRegistry.js".to_string(),
			wrapper_tag: "div".to_string(),
			source_extension: "speck".to_string(),
		}
	}
}
