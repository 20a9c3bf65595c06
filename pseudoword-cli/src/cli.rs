use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;
use pseudoword_core::config::{DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, DEFAULT_TRAINING_ORDER};
use pseudoword_core::io::{load_table, read_lines, save_table, to_json_string};
use pseudoword_core::model::trainer::{TrainerConfig, train_lines};
use pseudoword_core::{ChainError, ChainGenerator, GenerationLimits, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Draws per word before giving up
pub const DEFAULT_MAX_ATTEMPTS: usize = 100_000;

#[derive(Parser, Debug)]
#[command(name = "pseudoword")]
#[command(author, version, about = "Generate pseudowords using Markov chains")]
/// Arguments of the generation tool
pub struct GenerateArgs {
	/// Frequency file (JSON, or postcard with a .bin extension)
	#[arg(value_name = "FREQUENCIES")]
	pub frequencies: PathBuf,

	/// Number of words to generate
	#[arg(value_name = "NUMBER")]
	pub number: usize,

	/// Shortest accepted word
	#[arg(long, default_value_t = DEFAULT_MIN_LENGTH)]
	pub min: usize,

	/// Longest accepted word
	#[arg(long, default_value_t = DEFAULT_MAX_LENGTH)]
	pub max: usize,

	/// Random seed for reproducible output
	#[arg(short, long)]
	pub seed: Option<u64>,

	/// Draws per word before giving up (0 for unbounded)
	#[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
	pub max_attempts: usize,
}

impl GenerateArgs {
	/// Iteration caps derived from the arguments
	pub fn limits(&self) -> GenerationLimits {
		GenerationLimits {
			max_reseeds: None,
			max_attempts: (self.max_attempts > 0).then_some(self.max_attempts),
		}
	}

	/// Seeded random source, or one seeded from the OS
	pub fn rng(&self) -> StdRng {
		match self.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		}
	}
}

/// Loads the table and writes `number` words, one per line
///
/// # Errors
///
/// Returns an error if the table cannot be loaded, a word cannot be
/// generated, or the output cannot be written
pub fn run_generate(args: &GenerateArgs, out: &mut impl Write) -> Result<()> {
	let table = load_table(&args.frequencies)?;
	let generator = ChainGenerator::new(table)?.with_limits(args.limits());
	let mut rng = args.rng();

	for _ in 0..args.number {
		let word = generator.render_word(args.min, args.max, &mut rng)?;
		writeln!(out, "{word}").map_err(stdout_error)?;
	}
	info!("Generated {} words", args.number);
	Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "ngram-train")]
#[command(author, version, about = "Count character n-grams of a corpus into a frequency file")]
/// Arguments of the training tool
pub struct TrainArgs {
	/// Corpus file, one sentence or word per line
	#[arg(value_name = "CORPUS")]
	pub corpus: PathBuf,

	/// Window size: context of n-1 characters plus the next one
	#[arg(short = 'n', long = "order", default_value_t = DEFAULT_TRAINING_ORDER)]
	pub order: usize,

	/// Wrap each line with spaces so word boundaries are learned
	#[arg(short, long)]
	pub pad: bool,

	/// Lowercase the corpus before counting
	#[arg(short, long)]
	pub lowercase: bool,

	/// Output file (.bin for postcard); JSON on stdout when omitted
	#[arg(short, long)]
	pub output: Option<PathBuf>,
}

impl TrainArgs {
	/// Training options derived from the arguments
	pub const fn config(&self) -> TrainerConfig {
		TrainerConfig { order: self.order, pad: self.pad, lowercase: self.lowercase }
	}
}

/// Trains on the corpus and writes the table
///
/// # Errors
///
/// Returns an error if the corpus cannot be read, the order is invalid, or
/// the table cannot be written
pub fn run_train(args: &TrainArgs, out: &mut impl Write) -> Result<()> {
	let lines = read_lines(&args.corpus)?;
	let table = train_lines(&lines, args.config())?;

	match &args.output {
		Some(path) => save_table(&table, path),
		None => writeln!(out, "{}", to_json_string(&table)?).map_err(stdout_error),
	}
}

/// Prints the readable form of a failure on `err` and maps it to the exit status
pub fn report(program: &str, result: Result<()>, err: &mut impl Write) -> ExitCode {
	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(error) => {
			// a failing stderr has nowhere left to be reported
			let _ = writeln!(err, "{program}: {error}");
			ExitCode::FAILURE
		}
	}
}

fn stdout_error(source: io::Error) -> ChainError {
	ChainError::Io { path: PathBuf::from("<stdout>"), operation: "write", source }
}
