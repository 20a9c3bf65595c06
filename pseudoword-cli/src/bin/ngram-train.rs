//! CLI entry point building a frequency file from a text corpus

use std::process::ExitCode;

use clap::Parser;
use pseudoword_cli::cli::{TrainArgs, report, run_train};

fn main() -> ExitCode {
	env_logger::init();
	let args = TrainArgs::parse();
	let result = run_train(&args, &mut std::io::stdout().lock());
	report("ngram-train", result, &mut std::io::stderr().lock())
}
