//! Speck CLI
//!
//! Compiles `.speck` components into Preact modules and keeps the component
//! registry in sync.
//!
//! ## Usage
//!
//! ```bash
//! speck build
//! speck build --src views --out public/components
//! speck check
//! speck ir src/components/Counter.speck
//! ```

mod config;
mod driver;
mod registry;
mod report;
mod utils;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use config::{CliArgs, SpeckConfig};
use driver::{BuildMode, build};
use report::print_report;

#[derive(Parser)]
#[command(name = "speck")]
#[command(about = "Speck component compiler", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbosity: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Compile every component and rewrite the registry
	Build(ProjectArgs),

	/// Compile every component without writing anything
	Check(ProjectArgs),

	/// Print the lowered IR of one component as JSON
	Ir {
		/// Source file to lower
		#[arg(value_name = "FILE")]
		file: PathBuf,
	},
}

#[derive(Args)]
struct ProjectArgs {
	/// Directory containing component sources (overrides speck.toml)
	#[arg(long = "src", value_name = "DIR")]
	src_dir: Option<PathBuf>,

	/// Directory receiving compiled components (overrides speck.toml)
	#[arg(long = "out", value_name = "DIR")]
	out_dir: Option<PathBuf>,

	/// Path to the configuration file (defaults to ./speck.toml when present)
	#[arg(long, value_name = "FILE")]
	config: Option<PathBuf>,
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbosity);

	let result = match cli.command {
		Commands::Build(args) => run_build(args, BuildMode::Write, cli.verbosity),
		Commands::Check(args) => run_build(args, BuildMode::Check, cli.verbosity),
		Commands::Ir { file } => run_ir(&file).map(|()| true),
	};

	match result {
		Ok(true) => {}
		Ok(false) => process::exit(1),
		Err(e) => {
			eprintln!("{} {:#}", "Error:".red(), e);
			process::exit(1);
		}
	}
}

/// `SPECK_LOG` wins over `RUST_LOG`; without either, `-v` raises the level.
fn init_tracing(verbosity: u8) {
	let fallback = match verbosity {
		0 => "error",
		1 => "warn",
		2 => "info",
		3 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_env("SPECK_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| EnvFilter::new(fallback));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn run_build(args: ProjectArgs, mode: BuildMode, verbosity: u8) -> anyhow::Result<bool> {
	let mut config = SpeckConfig::load(args.config.as_deref(), Path::new("."))?;
	config.merge_cli_args(&CliArgs {
		src_dir: args.src_dir,
		out_dir: args.out_dir,
	});

	if verbosity > 0 {
		println!(
			"Compiling {} -> {}",
			config.compiler.src_dir.display(),
			config.compiler.out_dir.display()
		);
	}

	let report = build(&config, mode)?;
	print_report(&report, verbosity);
	Ok(report.succeeded())
}

fn run_ir(file: &Path) -> anyhow::Result<()> {
	let source = std::fs::read_to_string(file)
		.with_context(|| format!("failed to read {}", file.display()))?;
	let program = speck_ast::parse(&source)
		.with_context(|| format!("failed to parse {}", file.display()))?;
	let lowered = speck_compiler::lower(&program);

	for warning in &lowered.warnings {
		eprintln!("{} {}", "warning:".yellow(), warning);
	}
	println!("{}", serde_json::to_string_pretty(&lowered.document)?);
	Ok(())
}
