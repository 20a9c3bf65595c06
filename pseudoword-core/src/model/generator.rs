use std::collections::BTreeMap;

use log::debug;
use rand::Rng;

use super::condition::{StartCondition, StopCondition};
use super::frequency_table::FrequencyTable;
use super::ngram::{NGram, Symbol};
use super::sampler;
use crate::config::{GenerationLimits, WORD_DELIMITER};
use crate::error::{ChainError, Result, invalid_parameter, load_error};

/// Markov chain generator walking a trained n-gram table.
///
/// # Responsibilities
/// - Own the frequency table and the derived per-context totals
/// - Draw a start context weighted by how often each context occurs
/// - Walk the chain symbol by symbol, re-seeding the context on chain breaks
/// - Render delimiter-bounded words within length bounds
///
/// # Invariants
/// - Every context has the same length (`order`), at least 1
/// - `totals[ctx]` equals the sum of the counts of `table[ctx]`
/// - Both tables are read-only after construction
#[derive(Debug, Clone)]
pub struct ChainGenerator<S: Ord> {
	table: FrequencyTable<S>,
	totals: BTreeMap<NGram<S>, u64>,
	order: usize,
	/// `false` when no context has a continuation; the walk can never advance.
	live: bool,
	limits: GenerationLimits,
}

impl<S: Symbol> ChainGenerator<S> {
	/// Validates the table and derives the per-context totals.
	///
	/// # Errors
	/// `ChainError::Load` if a context is empty, contexts differ in length, or
	/// the counts of a row or of the whole table add up past `u64::MAX`.
	pub fn new(table: FrequencyTable<S>) -> Result<Self> {
		let mut order = None;
		let mut totals = BTreeMap::new();
		let mut grand_total = 0u64;
		let mut live = false;

		for (context, row) in table.iter() {
			if context.is_empty() {
				return Err(load_error("n-gram contexts must hold at least one symbol"));
			}
			match order {
				None => order = Some(context.len()),
				Some(n) if n != context.len() => {
					return Err(load_error(format!(
						"inconsistent n-gram length: expected {n}, found {} for {context:?}",
						context.len()
					)));
				}
				Some(_) => (),
			}
			let total = row
				.total()
				.ok_or_else(|| load_error(format!("counts overflow: row {context:?} exceeds u64::MAX")))?;
			// start contexts are drawn over the sum of every row total
			grand_total = grand_total
				.checked_add(total)
				.ok_or_else(|| load_error("counts overflow: table total exceeds u64::MAX"))?;
			live |= row.has_continuations();
			totals.insert(context.clone(), total);
		}

		Ok(Self {
			table,
			totals,
			order: order.unwrap_or(0),
			live,
			limits: GenerationLimits::default(),
		})
	}

	/// Replaces the iteration caps.
	pub fn with_limits(mut self, limits: GenerationLimits) -> Self {
		self.limits = limits;
		self
	}

	/// Current iteration caps.
	pub fn limits(&self) -> GenerationLimits {
		self.limits
	}

	/// Context length (0 for an empty table).
	pub fn order(&self) -> usize {
		self.order
	}

	/// The trained table.
	pub fn table(&self) -> &FrequencyTable<S> {
		&self.table
	}

	/// Total observations of `context`.
	pub fn context_total(&self, context: &NGram<S>) -> Option<u64> {
		self.totals.get(context).copied()
	}

	/// Iterates `(context, total)` in context order.
	pub fn context_totals(&self) -> impl Iterator<Item = (&NGram<S>, u64)> {
		self.totals.iter().map(|(context, total)| (context, *total))
	}

	/// Draws a start context weighted by its total observations.
	fn sample_context<R: Rng + ?Sized>(
		&self,
		filter: Option<&dyn Fn(&NGram<S>) -> bool>,
		rng: &mut R,
	) -> Result<NGram<S>> {
		sampler::sample(&self.totals, filter, rng, "start context").cloned()
	}

	/// Walks the chain until `stop` holds.
	///
	/// The output starts with the symbols of the start context. On a chain
	/// break the context is re-drawn from every context, the output is kept.
	///
	/// # Errors
	/// - `ChainError::EmptyDomain` if no context satisfies `start`, or if no
	///   context of the table has any continuation and the walk breaks.
	/// - `ChainError::Exhausted` if `max_reseeds` is reached.
	///
	/// # Notes
	/// - Without a reseed cap, a `stop` that never holds never returns.
	pub fn render<R: Rng + ?Sized>(&self, stop: StopCondition<'_, S>, start: StartCondition<'_, S>, rng: &mut R) -> Result<Vec<S>> {
		let max_length = stop.max_length();
		let stop = stop.into_predicate();
		let filter = start.into_filter();

		let mut context = self.sample_context(filter.as_deref(), rng)?;
		let mut output: Vec<S> = context.symbols().to_vec();
		let mut reseeds = 0;

		while !stop(&output) {
			match self.table.get(&context).filter(|row| row.has_continuations()) {
				Some(row) => {
					let next = row.sample(rng)?.clone();
					output.push(next.clone());
					context = context.slide(next);
				}
				None => {
					if !self.live {
						return Err(ChainError::EmptyDomain { what: "continuation" });
					}
					if let Some(limit) = self.limits.max_reseeds
						&& reseeds >= limit
					{
						return Err(ChainError::Exhausted { operation: "re-seeds", limit });
					}
					reseeds += 1;
					debug!("Chain break at {context:?}, re-seeding");
					context = self.sample_context(None, rng)?;
				}
			}
		}

		if let Some(n) = max_length {
			output.truncate(n);
		}
		Ok(output)
	}

	/// Renders one delimiter-bounded item whose length lies in `[min_length, max_length]`.
	///
	/// Each draw starts from a context beginning with `delimiter` and stops
	/// at the next `delimiter`; surrounding delimiters are trimmed and the
	/// draw is discarded until its length fits.
	///
	/// # Errors
	/// - `ChainError::InvalidParameter` if `min_length > max_length`.
	/// - `ChainError::Exhausted` if `max_attempts` is reached.
	/// - Any error of [`render`](Self::render), without retrying.
	pub fn render_delimited<R: Rng + ?Sized>(
		&self,
		delimiter: &S,
		min_length: usize,
		max_length: usize,
		rng: &mut R,
	) -> Result<Vec<S>> {
		if min_length > max_length {
			return Err(invalid_parameter(
				"min_length",
				&min_length,
				&format!("must not exceed max_length ({max_length})"),
			));
		}

		let mut attempts = 0;
		loop {
			if let Some(limit) = self.limits.max_attempts
				&& attempts >= limit
			{
				return Err(ChainError::Exhausted { operation: "attempts", limit });
			}
			attempts += 1;

			let stop = StopCondition::when(|output: &[S]| output.len() > 1 && output.last() == Some(delimiter));
			let start = StartCondition::when(|context: &NGram<S>| context.first() == Some(delimiter));
			let output = self.render(stop, start, rng)?;

			let word = trim(&output, delimiter);
			if (min_length..=max_length).contains(&word.len()) {
				return Ok(word.to_vec());
			}
			debug!("Rejected candidate of length {} (attempt {attempts})", word.len());
		}
	}
}

impl ChainGenerator<char> {
	/// [`render`](Self::render) collected into a `String`.
	///
	/// # Errors
	/// Same as [`render`](Self::render).
	pub fn render_string<R: Rng + ?Sized>(&self, stop: StopCondition<'_, char>, start: StartCondition<'_, char>, rng: &mut R) -> Result<String> {
		Ok(self.render(stop, start, rng)?.into_iter().collect())
	}

	/// Generates a pseudo-word between `min_length` and `max_length` characters.
	///
	/// Assumes the table was trained on text where words are separated by
	/// spaces. Real words are not filtered out.
	///
	/// # Errors
	/// Same as [`render_delimited`](Self::render_delimited).
	pub fn render_word<R: Rng + ?Sized>(&self, min_length: usize, max_length: usize, rng: &mut R) -> Result<String> {
		let word = self.render_delimited(&WORD_DELIMITER, min_length, max_length, rng)?;
		Ok(word.into_iter().collect())
	}
}

/// Strips leading and trailing `delimiter` symbols.
fn trim<'a, S: PartialEq>(symbols: &'a [S], delimiter: &S) -> &'a [S] {
	let Some(start) = symbols.iter().position(|s| s != delimiter) else {
		return &[];
	};
	// a non-delimiter exists, so rposition finds one too
	let end = symbols.iter().rposition(|s| s != delimiter).unwrap_or(start);
	&symbols[start..=end]
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::transitions::Transitions;
	use rand::SeedableRng;

	fn table(entries: &[(&str, &[(char, u64)])]) -> FrequencyTable<char> {
		entries
			.iter()
			.map(|(context, row)| (NGram::from(*context), row.iter().copied().collect::<Transitions<char>>()))
			.collect()
	}

	#[test]
	fn totals_match_row_sums() {
		let generator = ChainGenerator::new(table(&[("ab", &[('c', 2), ('d', 1)]), ("bc", &[(' ', 5)]), ("cd", &[])])).unwrap();
		for (context, row) in generator.table().iter() {
			assert_eq!(generator.context_total(context), row.total());
		}
		assert_eq!(generator.context_total(&NGram::from("ab")), Some(3));
		assert_eq!(generator.context_total(&NGram::from("cd")), Some(0));
		assert_eq!(generator.context_totals().count(), 3);
		assert_eq!(generator.order(), 2);
	}

	#[test]
	fn mixed_context_lengths_are_rejected() {
		let err = ChainGenerator::new(table(&[("ab", &[('c', 1)]), ("abc", &[('d', 1)])])).unwrap_err();
		assert!(matches!(err, ChainError::Load { .. }));
	}

	#[test]
	fn empty_context_is_rejected() {
		let err = ChainGenerator::new(table(&[("", &[('c', 1)])])).unwrap_err();
		assert!(matches!(err, ChainError::Load { .. }));
	}

	#[test]
	fn overflowing_row_is_rejected() {
		let err = ChainGenerator::new(table(&[("ab", &[('c', u64::MAX), ('d', 1)])])).unwrap_err();
		assert!(matches!(err, ChainError::Load { ref reason, .. } if reason.contains("counts overflow")), "{err}");
	}

	#[test]
	fn overflowing_table_total_is_rejected() {
		let err = ChainGenerator::new(table(&[("ab", &[('c', u64::MAX)]), ("bc", &[('a', 1)])])).unwrap_err();
		assert!(matches!(err, ChainError::Load { ref reason, .. } if reason.contains("counts overflow")), "{err}");
	}

	#[test]
	fn largest_representable_total_is_accepted() {
		let generator = ChainGenerator::new(table(&[("ab", &[('c', u64::MAX - 1)]), ("bc", &[('a', 1)])])).unwrap();
		assert_eq!(generator.context_total(&NGram::from("ab")), Some(u64::MAX - 1));

		let mut rng = rand::rngs::StdRng::seed_from_u64(8);
		let output = generator.render_string(StopCondition::MaxLength(6), StartCondition::Any, &mut rng).unwrap();
		assert_eq!(output.chars().count(), 6);
	}

	#[test]
	fn trim_strips_both_ends() {
		assert_eq!(trim(&[' ', 'a', ' ', 'b', ' ', ' '], &' '), &['a', ' ', 'b']);
		assert!(trim(&[' ', ' '], &' ').is_empty());
		assert!(trim::<char>(&[], &' ').is_empty());
		assert_eq!(trim(&['x'], &' '), &['x']);
	}
}
