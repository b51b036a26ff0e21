//! Build driver: discovers sources, compiles each file in isolation, writes
//! outputs and finally rewrites the registry.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use speck_compiler::{CodegenOptions, CompileWarning, compile};
use walkdir::WalkDir;

use crate::config::{CompilerConfig, SpeckConfig};
use crate::registry::write_registry;
use crate::utils::{atomic_write, is_up_to_date};

/// Result type for driver operations.
pub(crate) type BuildResult<T> = Result<T, BuildError>;

/// Errors that abort a whole run rather than a single file.
#[derive(Debug, thiserror::Error)]
pub(crate) enum BuildError {
	#[error("source directory not found: {}", path.display())]
	MissingSourceDir { path: PathBuf },

	#[error("failed to list {}: {message}", path.display())]
	Walk { path: PathBuf, message: String },

	#[error("failed to create {}: {source}", path.display())]
	CreateDir {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write {}: {source}", path.display())]
	Write {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Whether outputs are written or only checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BuildMode {
	Write,
	Check,
}

/// What happened to one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FileStatus {
	/// Output written
	Compiled,
	/// Output already up to date
	Unchanged,
	/// Compiled without writing
	Checked,
	/// Compilation or the output write failed
	Failed(String),
}

impl FileStatus {
	pub(crate) fn is_success(&self) -> bool {
		!matches!(self, FileStatus::Failed(_))
	}
}

#[derive(Debug, Clone)]
pub(crate) struct FileReport {
	pub source: PathBuf,
	pub output: PathBuf,
	pub component: String,
	pub status: FileStatus,
	pub warnings: Vec<CompileWarning>,
}

/// Registry outcome of a write run.
#[derive(Debug)]
pub(crate) enum RegistryStatus {
	Written { path: PathBuf, components: usize },
	Failed(BuildError),
	/// Check runs leave the registry alone
	Skipped,
}

#[derive(Debug)]
pub(crate) struct BuildReport {
	pub mode: BuildMode,
	pub files: Vec<FileReport>,
	pub registry: RegistryStatus,
}

impl BuildReport {
	pub(crate) fn count(&self, predicate: impl Fn(&FileStatus) -> bool) -> usize {
		self.files.iter().filter(|file| predicate(&file.status)).count()
	}

	pub(crate) fn failed(&self) -> usize {
		self.count(|status| !status.is_success())
	}

	/// Overall outcome of the run.
	///
	/// A write run fails only when the registry could not be written or when
	/// sources existed and none of them compiled. A check run fails on any
	/// failed file.
	pub(crate) fn succeeded(&self) -> bool {
		match self.mode {
			BuildMode::Check => self.failed() == 0,
			BuildMode::Write => {
				let registry_ok = !matches!(self.registry, RegistryStatus::Failed(_));
				let any_compiled = self.files.is_empty() || self.failed() < self.files.len();
				registry_ok && any_compiled
			}
		}
	}
}

/// Source files in `src_dir` with the configured extension, sorted by name.
pub(crate) fn discover_sources(config: &CompilerConfig) -> BuildResult<Vec<PathBuf>> {
	if !config.src_dir.is_dir() {
		return Err(BuildError::MissingSourceDir {
			path: config.src_dir.clone(),
		});
	}

	let mut sources = Vec::new();
	for entry in WalkDir::new(&config.src_dir)
		.min_depth(1)
		.max_depth(1)
		.sort_by_file_name()
	{
		let entry = entry.map_err(|e| BuildError::Walk {
			path: config.src_dir.clone(),
			message: e.to_string(),
		})?;
		if entry.file_type().is_file()
			&& entry
				.path()
				.extension()
				.is_some_and(|ext| ext == config.source_extension.as_str())
		{
			sources.push(entry.into_path());
		}
	}
	Ok(sources)
}

/// Runs a build over every discovered source.
///
/// Files are compiled independently; a failure is recorded in the report and
/// the remaining files still compile. The registry is rewritten only after
/// every file has been handled.
pub(crate) fn build(config: &SpeckConfig, mode: BuildMode) -> BuildResult<BuildReport> {
	let compiler = &config.compiler;
	let sources = discover_sources(compiler)?;
	let options = config.to_codegen_options();

	if mode == BuildMode::Write {
		std::fs::create_dir_all(&compiler.out_dir).map_err(|e| BuildError::CreateDir {
			path: compiler.out_dir.clone(),
			source: e,
		})?;
	}

	let files: Vec<FileReport> = sources
		.iter()
		.map(|source| build_file(source, compiler, &options, mode))
		.collect();

	let registry = match mode {
		BuildMode::Check => RegistryStatus::Skipped,
		BuildMode::Write => {
			let failed: BTreeSet<String> = files
				.iter()
				.filter(|file| !file.status.is_success())
				.map(|file| file.component.clone())
				.collect();
			match write_registry(compiler, &failed) {
				Ok((path, names)) => RegistryStatus::Written {
					path,
					components: names.len(),
				},
				Err(e) => {
					tracing::error!(error = %e, "failed to write registry");
					RegistryStatus::Failed(e)
				}
			}
		}
	};

	Ok(BuildReport {
		mode,
		files,
		registry,
	})
}

fn build_file(
	source: &Path,
	config: &CompilerConfig,
	options: &CodegenOptions,
	mode: BuildMode,
) -> FileReport {
	let component = source
		.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.unwrap_or_default();
	let output = config
		.out_dir
		.join(format!("{component}.{}", config.output_extension));

	let mut report = FileReport {
		source: source.to_path_buf(),
		output,
		component,
		status: FileStatus::Checked,
		warnings: Vec::new(),
	};

	let text = match std::fs::read_to_string(source) {
		Ok(text) => text,
		Err(e) => {
			return fail(report, format!("failed to read file: {e}"));
		}
	};

	let compiled = match compile(&text, &report.component, options) {
		Ok(compiled) => compiled,
		Err(e) => return fail(report, e.to_string()),
	};
	report.warnings = compiled.warnings;

	if mode == BuildMode::Write {
		if is_up_to_date(&report.output, &compiled.code) {
			report.status = FileStatus::Unchanged;
		} else if let Err(e) = atomic_write(&report.output, &compiled.code) {
			return fail(report, format!("failed to write output: {e}"));
		} else {
			report.status = FileStatus::Compiled;
		}
	}

	tracing::info!(
		file = %report.source.display(),
		status = ?report.status,
		warnings = report.warnings.len(),
		"compiled"
	);
	report
}

fn fail(mut report: FileReport, message: String) -> FileReport {
	tracing::error!(
		file = %report.source.display(),
		"failed to compile file: {message}"
	);
	report.status = FileStatus::Failed(message);
	report
}
