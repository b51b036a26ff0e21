//! Component registry: a barrel module re-exporting every generated component.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::CompilerConfig;
use crate::driver::{BuildError, BuildResult};
use crate::utils::atomic_write;

/// Renders the registry module for the given component names, in order.
pub(crate) fn registry_content(names: &[String], output_extension: &str) -> String {
	let imports = names
		.iter()
		.map(|name| format!("import {name} from './{name}.{output_extension}';"))
		.collect::<Vec<_>>()
		.join("\n");
	format!("{imports}\n\nexport {{\n  {}\n}};\n", names.join(", "))
}

/// Component names for the generated files present in the output directory,
/// sorted, without the registry itself and without `excluded` stems.
pub(crate) fn registered_components(
	config: &CompilerConfig,
	excluded: &BTreeSet<String>,
) -> BuildResult<Vec<String>> {
	let mut names = Vec::new();
	for entry in WalkDir::new(&config.out_dir)
		.min_depth(1)
		.max_depth(1)
		.sort_by_file_name()
	{
		let entry = entry.map_err(|e| BuildError::Walk {
			path: config.out_dir.clone(),
			message: e.to_string(),
		})?;
		let path = entry.path();
		if !entry.file_type().is_file()
			|| !path
				.extension()
				.is_some_and(|ext| ext == config.output_extension.as_str())
			|| entry.file_name() == config.registry_file.as_str()
		{
			continue;
		}
		if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
			&& !excluded.contains(stem)
		{
			names.push(stem.to_string());
		}
	}
	Ok(names)
}

/// Rewrites the registry, returning its path and the registered names.
pub(crate) fn write_registry(
	config: &CompilerConfig,
	excluded: &BTreeSet<String>,
) -> BuildResult<(PathBuf, Vec<String>)> {
	let names = registered_components(config, excluded)?;
	let path = registry_path(config);
	let content = registry_content(&names, &config.output_extension);
	atomic_write(&path, &content).map_err(|e| BuildError::Write {
		path: path.clone(),
		source: e,
	})?;
	tracing::info!(path = %path.display(), components = names.len(), "registry updated");
	Ok((path, names))
}

pub(crate) fn registry_path(config: &CompilerConfig) -> PathBuf {
	Path::new(&config.out_dir).join(&config.registry_file)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use tempfile::TempDir;

	fn config_for(dir: &Path) -> CompilerConfig {
		CompilerConfig {
			out_dir: dir.to_path_buf(),
			..CompilerConfig::default()
		}
	}

	#[rstest]
	fn test_registry_content_layout() {
		let names = vec!["Card".to_string(), "Counter".to_string()];

		let content = registry_content(&names, "jsx");

		assert_eq!(
			content,
			"import Card from './Card.jsx';\nimport Counter from './Counter.jsx';\n\nexport {\n  Card, Counter\n};\n"
		);
	}

	#[rstest]
	fn test_registered_components_filters_and_sorts() {
		// Arrange
		let dir = TempDir::new().unwrap();
		for file in [
			"Zeta.jsx",
			"Alpha.jsx",
			"Broken.jsx",
			"_componentRegistry.js",
			"notes.txt",
		] {
			std::fs::write(dir.path().join(file), "").unwrap();
		}
		std::fs::create_dir(dir.path().join("Nested.jsx")).unwrap();
		let excluded = BTreeSet::from(["Broken".to_string()]);

		// Act
		let names = registered_components(&config_for(dir.path()), &excluded).unwrap();

		// Assert
		assert_eq!(names, vec!["Alpha".to_string(), "Zeta".to_string()]);
	}

	#[rstest]
	fn test_write_registry() {
		// Arrange
		let dir = TempDir::new().unwrap();
		std::fs::write(dir.path().join("Card.jsx"), "").unwrap();
		let config = config_for(dir.path());

		// Act
		let (path, names) = write_registry(&config, &BTreeSet::new()).unwrap();

		// Assert
		assert_eq!(names, vec!["Card".to_string()]);
		assert_eq!(
			std::fs::read_to_string(path).unwrap(),
			"import Card from './Card.jsx';\n\nexport {\n  Card\n};\n"
		);
	}
}
