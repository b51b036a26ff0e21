//! Filesystem helpers for the driver.

use std::path::Path;

/// Write content to a file atomically by writing to a temporary file first, then renaming.
///
/// The rename is atomic on the same filesystem, so readers never observe a
/// half-written component. Original file permissions are preserved.
pub(crate) fn atomic_write(path: &Path, content: &str) -> std::io::Result<()> {
	let original_perms = std::fs::metadata(path).ok().map(|m| m.permissions());

	// Same directory, same filesystem
	let tmp_path = tmp_path_for(path);
	std::fs::write(&tmp_path, content)?;

	if let Err(e) = std::fs::rename(&tmp_path, path) {
		let _ = std::fs::remove_file(&tmp_path);
		return Err(e);
	}

	if let Some(perms) = original_perms {
		std::fs::set_permissions(path, perms)?;
	}

	Ok(())
}

/// Whether `path` already holds exactly `content`.
pub(crate) fn is_up_to_date(path: &Path, content: &str) -> bool {
	std::fs::read_to_string(path).is_ok_and(|existing| existing == content)
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
	let mut name = path
		.file_name()
		.map(|name| name.to_os_string())
		.unwrap_or_default();
	name.push(".tmp");
	path.with_file_name(name)
}
