//! Single-file compilation: parse, lower, generate.

use tracing::{debug, instrument};

use crate::codegen::{CodegenOptions, generate};
use crate::error::CompileResult;
use crate::lower::lower;
use crate::warning::CompileWarning;

/// The compiled component module for one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOutput {
	/// Generated module source
	pub code: String,
	/// Non-fatal diagnostics from lowering and generation, in that order
	pub warnings: Vec<CompileWarning>,
	/// Custom components referenced by the generated markup
	pub used_components: Vec<String>,
}

/// Compiles one Speck source into a Preact component module.
///
/// The function is pure: identical inputs always produce identical output.
///
/// # Examples
///
/// ```
/// use speck_compiler::{CodegenOptions, compile};
///
/// let source = r#"<div>
///     <state count={0} />
///     <button onClick={() => setCount(count + 1)}>{count}</button>
/// </div>"#;
/// let output = compile(source, "Counter", &CodegenOptions::default()).unwrap();
/// assert!(output.code.contains("const [count, setCount] = useState(0);"));
/// ```
#[instrument(level = "debug", skip(source, options), fields(bytes = source.len()))]
pub fn compile(
	source: &str,
	component_name: &str,
	options: &CodegenOptions,
) -> CompileResult<CompileOutput> {
	let program = speck_ast::parse(source)?;
	let lowered = lower(&program);
	debug!(
		nodes = lowered.document.body.len(),
		warnings = lowered.warnings.len(),
		"lowered source"
	);

	let generated = generate(&lowered.document, component_name, options)?;

	let mut warnings = lowered.warnings;
	warnings.extend(generated.warnings);
	Ok(CompileOutput {
		code: generated.code,
		warnings,
		used_components: generated.used_components,
	})
}
