use std::collections::BTreeMap;

use rand::Rng;

use serde::{Deserialize, Serialize};

use super::ngram::Symbol;
use super::sampler;
use crate::error::Result;

/// Outgoing counts of a single n-gram context.
///
/// Conceptually a node of the Markov chain whose edges are weighted by how
/// often each next symbol was observed after the context.
///
/// ## Responsibilities:
/// - Accumulate observations during training
/// - Draw the next symbol with weighted random sampling
/// - Merge with the row of another partial table (parallel training)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Transitions<S: Ord> {
	/// Example: { 'e' => 42, 'a' => 3 }
	counts: BTreeMap<S, u64>,
}

impl<S: Symbol> Default for Transitions<S> {
	fn default() -> Self {
		Self { counts: BTreeMap::new() }
	}
}

impl<S: Symbol> Transitions<S> {
	/// Creates an empty row.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one more occurrence of `next`.
	pub fn add(&mut self, next: S) {
		self.add_count(next, 1);
	}

	/// Adds `count` occurrences of `next`; a count saturates at `u64::MAX`.
	pub fn add_count(&mut self, next: S, count: u64) {
		let slot = self.counts.entry(next).or_insert(0);
		*slot = slot.saturating_add(count);
	}

	/// Occurrences of `next`, zero if never observed.
	pub fn count(&self, next: &S) -> u64 {
		self.counts.get(next).copied().unwrap_or(0)
	}

	/// Total observations of the context, `None` if the sum overflows `u64`.
	pub fn total(&self) -> Option<u64> {
		self.counts.values().try_fold(0u64, |sum, count| sum.checked_add(*count))
	}

	/// `true` when the context has at least one observed continuation.
	pub fn has_continuations(&self) -> bool {
		self.counts.values().any(|count| *count > 0)
	}

	/// Number of distinct next symbols.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	/// `true` when no next symbol was recorded.
	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Iterates `(next symbol, count)` in symbol order.
	pub fn iter(&self) -> impl Iterator<Item = (&S, &u64)> {
		self.counts.iter()
	}

	/// Draws the next symbol proportionally to its count.
	///
	/// # Errors
	/// `ChainError::EmptyDomain` if the row is empty.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&S> {
		sampler::sample(&self.counts, None, rng, "next symbol")
	}

	/// Sums the counts of `other` into this row.
	pub fn merge(&mut self, other: &Self) {
		for (next, count) in &other.counts {
			self.add_count(next.clone(), *count);
		}
	}
}

impl<S: Symbol> FromIterator<(S, u64)> for Transitions<S> {
	fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
		let mut row = Self::new();
		for (next, count) in iter {
			row.add_count(next, count);
		}
		row
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn add_accumulates_counts() {
		let mut row = Transitions::new();
		row.add('e');
		row.add('e');
		row.add('a');
		assert_eq!(row.count(&'e'), 2);
		assert_eq!(row.count(&'a'), 1);
		assert_eq!(row.count(&'z'), 0);
		assert_eq!(row.total(), Some(3));
	}

	#[test]
	fn merge_sums_matching_symbols() {
		let mut left: Transitions<char> = [('a', 2), ('b', 1)].into_iter().collect();
		let right: Transitions<char> = [('b', 4), ('c', 1)].into_iter().collect();
		left.merge(&right);
		assert_eq!(left.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(), vec![('a', 2), ('b', 5), ('c', 1)]);
	}

	#[test]
	fn overflowing_counts_have_no_total() {
		let mut row: Transitions<char> = [('a', u64::MAX), ('b', 1)].into_iter().collect();
		assert_eq!(row.total(), None);

		row.add('a');
		assert_eq!(row.count(&'a'), u64::MAX);
	}

	#[test]
	fn zero_counts_are_not_continuations() {
		let row: Transitions<char> = [('a', 0)].into_iter().collect();
		assert!(!row.is_empty());
		assert!(!row.has_continuations());
		assert!(!Transitions::<char>::new().has_continuations());
	}
}
