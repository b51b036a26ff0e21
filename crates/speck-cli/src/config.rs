//! Configuration for the `speck` driver.
//!
//! Settings come from an optional `speck.toml`; command-line arguments
//! override file values.
//!
//! ```toml
//! [compiler]
//! src_dir = "src/components"
//! out_dir = "src/.compiled"
//!
//! [runtime]
//! wrapper_tag = "section"
//! ```

use serde::{Deserialize, Serialize};
use speck_compiler::CodegenOptions;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no `--config` is given.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "speck.toml";

/// Main driver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SpeckConfig {
	/// Source discovery and output layout
	pub compiler: CompilerConfig,

	/// Runtime modules referenced by generated components
	pub runtime: RuntimeConfig,
}

impl SpeckConfig {
	/// Load configuration from a TOML file.
	///
	/// # Errors
	///
	/// Returns error if file cannot be read or parsed.
	pub(crate) fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::IoError {
			path: path.as_ref().to_path_buf(),
			source: e,
		})?;

		Self::from_toml(&content)
	}

	/// Parse configuration from TOML string.
	pub(crate) fn from_toml(content: &str) -> Result<Self, ConfigError> {
		toml::from_str(content).map_err(|e| ConfigError::ParseError {
			message: e.to_string(),
		})
	}

	/// Resolve the configuration for a run.
	///
	/// An explicit path must exist. Otherwise `speck.toml` in `base_dir` is
	/// used when present, and defaults when it is not.
	pub(crate) fn load(explicit: Option<&Path>, base_dir: &Path) -> Result<Self, ConfigError> {
		if let Some(path) = explicit {
			return Self::from_file(path);
		}
		let implicit = base_dir.join(DEFAULT_CONFIG_FILE);
		if implicit.is_file() {
			tracing::debug!(path = %implicit.display(), "loading configuration");
			Self::from_file(implicit)
		} else {
			Ok(Self::default())
		}
	}

	/// Merge CLI arguments into configuration.
	///
	/// CLI arguments take precedence over config file values.
	pub(crate) fn merge_cli_args(&mut self, args: &CliArgs) {
		if let Some(ref dir) = args.src_dir {
			self.compiler.src_dir = dir.clone();
		}

		if let Some(ref dir) = args.out_dir {
			self.compiler.out_dir = dir.clone();
		}
	}

	/// Options handed to the code generator.
	pub(crate) fn to_codegen_options(&self) -> CodegenOptions {
		CodegenOptions {
			jsx_module: self.runtime.jsx_module.clone(),
			jsx_pragma: self.runtime.jsx_pragma.clone(),
			hooks_module: self.runtime.hooks_module.clone(),
			registry_module: format!("./{}", self.compiler.registry_file),
			wrapper_tag: self.runtime.wrapper_tag.clone(),
			source_extension: self.compiler.source_extension.clone(),
		}
	}
}

/// Source discovery and output layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CompilerConfig {
	/// Directory scanned (non-recursively) for sources
	pub src_dir: PathBuf,

	/// Directory receiving generated components and the registry
	pub out_dir: PathBuf,

	/// Extension of source files, without the dot
	pub source_extension: String,

	/// Extension of generated files, without the dot
	pub output_extension: String,

	/// File name of the registry inside `out_dir`
	pub registry_file: String,
}

impl Default for CompilerConfig {
	fn default() -> Self {
		Self {
			src_dir: PathBuf::from("src/components"),
			out_dir: PathBuf::from("src/.compiled"),
			source_extension: "speck".to_string(),
			output_extension: "jsx".to_string(),
			registry_file: "_componentRegistry.js".to_string(),
		}
	}
}

/// Runtime modules referenced by generated components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct RuntimeConfig {
	pub jsx_module: String,
	pub jsx_pragma: String,
	pub hooks_module: String,

	/// Element wrapping each component body; empty for a fragment
	pub wrapper_tag: String,
}

impl Default for RuntimeConfig {
	fn default() -> Self {
		let options = CodegenOptions::default();
		Self {
			jsx_module: options.jsx_module,
			jsx_pragma: options.jsx_pragma,
			hooks_module: options.hooks_module,
			wrapper_tag: options.wrapper_tag,
		}
	}
}

/// CLI arguments that can override config file values.
#[derive(Debug, Clone, Default)]
pub(crate) struct CliArgs {
	pub src_dir: Option<PathBuf>,
	pub out_dir: Option<PathBuf>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
	#[error("IO error reading {path}: {source}")]
	IoError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse configuration: {message}")]
	ParseError { message: String },
}
