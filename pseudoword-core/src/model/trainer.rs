use std::sync::mpsc;
use std::thread;

use log::info;

use super::frequency_table::FrequencyTable;
use super::ngram::NGram;
use crate::config::{DEFAULT_TRAINING_ORDER, TRAINING_CHUNK_FACTOR, WORD_DELIMITER};
use crate::error::{ChainError, Result, invalid_parameter};

/// Training options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainerConfig {
	/// Window size: a context of `order - 1` characters plus the next one.
	pub order: usize,

	/// Wrap every line with the word delimiter so word boundaries are learned.
	pub pad: bool,

	/// Lowercase lines before counting.
	pub lowercase: bool,
}

impl Default for TrainerConfig {
	fn default() -> Self {
		Self { order: DEFAULT_TRAINING_ORDER, pad: false, lowercase: false }
	}
}

/// Counts character n-grams of a corpus into a frequency table.
///
/// # Invariants
/// - `config.order >= 2`, so every context holds at least one character
#[derive(Debug, Clone)]
pub struct Trainer {
	config: TrainerConfig,
	table: FrequencyTable<char>,
}

impl Trainer {
	/// Creates an empty trainer.
	///
	/// # Errors
	/// Returns an error if `config.order < 2`.
	pub fn new(config: TrainerConfig) -> Result<Self> {
		if config.order < 2 {
			return Err(invalid_parameter("order", &config.order, &"must be >= 2"));
		}
		Ok(Self { config, table: FrequencyTable::new() })
	}

	/// Options this trainer counts with.
	pub fn config(&self) -> TrainerConfig {
		self.config
	}

	/// Adds every window of one line.
	///
	/// # Notes
	/// - Lines shorter than `order` (after padding) add nothing.
	pub fn add_line(&mut self, line: &str) {
		let mut chars: Vec<char> = if self.config.lowercase {
			line.chars().flat_map(char::to_lowercase).collect()
		} else {
			line.chars().collect()
		};
		if self.config.pad {
			chars.insert(0, WORD_DELIMITER);
			chars.push(WORD_DELIMITER);
		}

		for window in chars.windows(self.config.order) {
			if let Some((next, context)) = window.split_last() {
				self.table.record(NGram::new(context.to_vec()), *next);
			}
		}
	}

	/// Sums the counts of another trainer into this one.
	///
	/// # Errors
	/// Returns an error if the two trainers use different options.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.config != other.config {
			return Err(invalid_parameter(
				"config",
				&format!("{:?}", other.config),
				&format!("does not match {:?}", self.config),
			));
		}
		self.table.merge(&other.table);
		Ok(())
	}

	/// Counts so far.
	pub fn table(&self) -> &FrequencyTable<char> {
		&self.table
	}

	/// Finishes training.
	pub fn into_table(self) -> FrequencyTable<char> {
		self.table
	}
}

/// Trains on `lines` in parallel and merges the partial tables.
///
/// # Behavior
/// - Splits the lines into `cpus * TRAINING_CHUNK_FACTOR` chunks.
/// - Counts each chunk on its own thread.
/// - Merges partial tables as they arrive; counts do not depend on the split.
///
/// # Errors
/// Returns an error if `config` is invalid or a worker thread died.
pub fn train_lines(lines: &[String], config: TrainerConfig) -> Result<FrequencyTable<char>> {
	let mut final_trainer = Trainer::new(config)?;
	if lines.is_empty() {
		return Ok(final_trainer.into_table());
	}

	let chunks = num_cpus::get() * TRAINING_CHUNK_FACTOR;
	let chunk_size = lines.len().div_ceil(chunks);

	let (tx, rx) = mpsc::channel();
	let mut workers = 0;
	for chunk in lines.chunks(chunk_size) {
		let tx = tx.clone();
		let chunk: Vec<String> = chunk.to_vec();
		let mut partial = Trainer::new(config)?;
		workers += 1;

		thread::spawn(move || {
			for line in &chunk {
				partial.add_line(line);
			}
			// The receiver outlives every worker
			let _ = tx.send(partial);
		});
	}
	drop(tx);

	let mut received = 0;
	for partial in rx.iter() {
		final_trainer.merge(&partial)?;
		received += 1;
	}
	if received != workers {
		return Err(ChainError::Training {
			reason: format!("only {received} of {workers} workers reported"),
		});
	}

	info!(
		"Trained {} contexts of order {} from {} lines ({workers} chunks)",
		final_trainer.table().len(),
		config.order,
		lines.len()
	);
	Ok(final_trainer.into_table())
}
