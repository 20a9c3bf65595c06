use std::fmt;

use serde::{Deserialize, Serialize};

/// Bounds required of a chain symbol.
///
/// Ordering keeps map iteration deterministic, so a seeded walk is
/// reproducible.
pub trait Symbol: Clone + Ord + fmt::Debug {}

impl<T: Clone + Ord + fmt::Debug> Symbol for T {}

/// Fixed-length window of symbols used as the chain context.
///
/// Immutable: sliding yields a new value. Equality is element-wise.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NGram<S> {
	symbols: Box<[S]>,
}

impl<S: Symbol> NGram<S> {
	/// Builds an n-gram from its symbols, oldest first.
	pub fn new(symbols: impl Into<Box<[S]>>) -> Self {
		Self { symbols: symbols.into() }
	}

	/// Number of symbols in the window.
	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	/// `true` for the zero-length window.
	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	/// The symbols, oldest first.
	pub fn symbols(&self) -> &[S] {
		&self.symbols
	}

	/// First (oldest) symbol.
	pub fn first(&self) -> Option<&S> {
		self.symbols.first()
	}

	/// Drops the oldest symbol and appends `next`.
	///
	/// Length is preserved; an empty window stays empty.
	pub fn slide(&self, next: S) -> Self {
		if self.symbols.is_empty() {
			return self.clone();
		}
		let symbols: Box<[S]> = self.symbols[1..].iter().cloned().chain(std::iter::once(next)).collect();
		Self { symbols }
	}
}

impl From<&str> for NGram<char> {
	fn from(value: &str) -> Self {
		Self::new(value.chars().collect::<Vec<_>>())
	}
}

impl fmt::Display for NGram<char> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for c in self.symbols.iter() {
			write!(f, "{c}")?;
		}
		Ok(())
	}
}
