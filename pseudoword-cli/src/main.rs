//! CLI entry point printing pseudo-words from a frequency file

use std::process::ExitCode;

use clap::Parser;
use pseudoword_cli::cli::{GenerateArgs, report, run_generate};

fn main() -> ExitCode {
	env_logger::init();
	let args = GenerateArgs::parse();
	let result = run_generate(&args, &mut std::io::stdout().lock());
	report("pseudoword", result, &mut std::io::stderr().lock())
}
