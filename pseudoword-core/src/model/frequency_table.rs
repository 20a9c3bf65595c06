use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ngram::{NGram, Symbol};
use super::transitions::Transitions;
use crate::error::{Result, load_error};

/// Text encoding of a character table: concatenated context → next char → count.
///
/// This is the shape written to and read from JSON and postcard files.
pub type TextTable = BTreeMap<String, BTreeMap<String, u64>>;

/// Mapping from each observed n-gram to the counts of the symbols that followed it.
///
/// The table is filled by training or decoding and then handed to a
/// [`ChainGenerator`](super::generator::ChainGenerator), which validates it
/// and keeps it read-only.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable<S: Ord> {
	rows: BTreeMap<NGram<S>, Transitions<S>>,
}

impl<S: Symbol> Default for FrequencyTable<S> {
	fn default() -> Self {
		Self { rows: BTreeMap::new() }
	}
}

impl<S: Symbol> FrequencyTable<S> {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one observation of `next` following `context`.
	pub fn record(&mut self, context: NGram<S>, next: S) {
		self.rows.entry(context).or_default().add(next);
	}

	/// Adds a whole row, summing with an existing row for the same context.
	pub fn insert(&mut self, context: NGram<S>, row: Transitions<S>) {
		match self.rows.get_mut(&context) {
			Some(existing) => existing.merge(&row),
			None => {
				self.rows.insert(context, row);
			}
		}
	}

	/// Outgoing counts of `context`, if it was observed.
	pub fn get(&self, context: &NGram<S>) -> Option<&Transitions<S>> {
		self.rows.get(context)
	}

	/// Iterates rows in context order.
	pub fn iter(&self) -> impl Iterator<Item = (&NGram<S>, &Transitions<S>)> {
		self.rows.iter()
	}

	/// Number of contexts.
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// `true` when no context was recorded.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Length of the context windows, taken from the first row.
	pub fn order(&self) -> Option<usize> {
		self.rows.keys().next().map(NGram::len)
	}

	/// Sums every row of `other` into this table.
	pub fn merge(&mut self, other: &Self) {
		for (context, row) in &other.rows {
			self.insert(context.clone(), row.clone());
		}
	}
}

impl<S: Symbol> FromIterator<(NGram<S>, Transitions<S>)> for FrequencyTable<S> {
	fn from_iter<I: IntoIterator<Item = (NGram<S>, Transitions<S>)>>(iter: I) -> Self {
		let mut table = Self::new();
		for (context, row) in iter {
			table.insert(context, row);
		}
		table
	}
}

impl FrequencyTable<char> {
	/// Decodes the text encoding.
	///
	/// # Errors
	/// `ChainError::Load` if a next-symbol key is not exactly one character.
	pub fn from_text(text: TextTable) -> Result<Self> {
		let mut table = Self::new();
		for (context, row) in text {
			let mut transitions = Transitions::new();
			for (next, count) in row {
				let mut chars = next.chars();
				let symbol = match (chars.next(), chars.next()) {
					(Some(c), None) => c,
					_ => {
						return Err(load_error(format!(
							"next symbol {next:?} after {context:?} must be a single character"
						)));
					}
				};
				transitions.add_count(symbol, count);
			}
			table.insert(NGram::from(context.as_str()), transitions);
		}
		Ok(table)
	}

	/// Encodes the table with contexts as concatenated strings.
	pub fn to_text(&self) -> TextTable {
		self.rows
			.iter()
			.map(|(context, row)| {
				let row = row.iter().map(|(next, count)| (next.to_string(), *count)).collect();
				(context.to_string(), row)
			})
			.collect()
	}
}
