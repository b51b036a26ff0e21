//! Console report for build and check runs.

use colored::Colorize;

use crate::driver::{BuildMode, BuildReport, FileReport, FileStatus, RegistryStatus};

/// Prints one line per file, its warnings, a summary and the registry line.
pub(crate) fn print_report(report: &BuildReport, verbosity: u8) {
	let total = report.files.len();
	for (index, file) in report.files.iter().enumerate() {
		let progress = format!("[{}/{}]", index + 1, total);
		print_file(&progress, file, verbosity);
	}

	if total == 0 {
		println!("{}", "No source files found".yellow());
	}

	println!();
	let failed = report.failed();
	let failed_text = if failed > 0 {
		failed.to_string().red()
	} else {
		failed.to_string().green()
	};
	match report.mode {
		BuildMode::Write => println!(
			"{}: {} compiled, {} unchanged, {} failed",
			"Summary".bright_cyan(),
			report.count(|s| *s == FileStatus::Compiled),
			report.count(|s| *s == FileStatus::Unchanged),
			failed_text
		),
		BuildMode::Check => println!(
			"{}: {} ok, {} failed",
			"Summary".bright_cyan(),
			report.count(|s| *s == FileStatus::Checked),
			failed_text
		),
	}

	match &report.registry {
		RegistryStatus::Written { path, components } => println!(
			"{} {} ({} components)",
			"Registry updated:".green(),
			path.display(),
			components
		),
		RegistryStatus::Failed(e) => eprintln!("{} {}", "Registry failed:".red(), e),
		RegistryStatus::Skipped => {}
	}
}

fn print_file(progress: &str, file: &FileReport, verbosity: u8) {
	match &file.status {
		FileStatus::Compiled => println!(
			"{} {} {} -> {}",
			progress.bright_blue(),
			"Compiled:".green(),
			file.source.display(),
			file.output.display()
		),
		FileStatus::Unchanged => println!(
			"{} {} {}",
			progress.bright_blue(),
			"Unchanged:".dimmed(),
			file.source.display()
		),
		FileStatus::Checked => println!(
			"{} {} {}",
			progress.bright_blue(),
			"Ok:".green(),
			file.source.display()
		),
		FileStatus::Failed(message) => eprintln!(
			"{} {} failed to compile file {}: {}",
			progress.bright_blue(),
			"Failed:".red(),
			file.source.display(),
			message
		),
	}

	for warning in &file.warnings {
		println!("    {} {}", "warning:".yellow(), warning);
	}
	if verbosity > 1 && file.status.is_success() {
		println!("    {} {}", "component:".dimmed(), file.component);
	}
}
