use super::ngram::{NGram, Symbol};

/// When a chain walk stops.
///
/// # Variants
/// - `MaxLength(n)`: stop once the output holds `n` symbols. The output is
///   never longer than `n`.
/// - `Predicate(f)`: stop as soon as `f(output)` returns `true`.
pub enum StopCondition<'a, S: 'a> {
	MaxLength(usize),
	Predicate(Box<dyn Fn(&[S]) -> bool + 'a>),
}

impl<'a, S: Symbol + 'a> StopCondition<'a, S> {
	/// Stops when `predicate` first holds on the output so far.
	pub fn when(predicate: impl Fn(&[S]) -> bool + 'a) -> Self {
		Self::Predicate(Box::new(predicate))
	}

	/// Length the output is cut to, for `MaxLength`.
	pub fn max_length(&self) -> Option<usize> {
		match self {
			Self::MaxLength(n) => Some(*n),
			Self::Predicate(_) => None,
		}
	}

	/// Normalizes both variants into a single predicate over the output.
	pub fn into_predicate(self) -> Box<dyn Fn(&[S]) -> bool + 'a> {
		match self {
			Self::MaxLength(n) => Box::new(move |output: &[S]| output.len() >= n),
			Self::Predicate(predicate) => predicate,
		}
	}
}

impl<S> From<usize> for StopCondition<'_, S> {
	fn from(value: usize) -> Self {
		Self::MaxLength(value)
	}
}

/// Which n-gram a chain walk may start from.
///
/// # Variants
/// - `Any`: every observed context, weighted by how often it occurs.
/// - `Exact(ngram)`: only the given context.
/// - `Predicate(f)`: contexts accepted by `f`.
pub enum StartCondition<'a, S: 'a> {
	Any,
	Exact(NGram<S>),
	Predicate(Box<dyn Fn(&NGram<S>) -> bool + 'a>),
}

impl<'a, S: Symbol + 'a> StartCondition<'a, S> {
	/// Starts from contexts accepted by `predicate`.
	pub fn when(predicate: impl Fn(&NGram<S>) -> bool + 'a) -> Self {
		Self::Predicate(Box::new(predicate))
	}

	/// Normalizes into a filter for the start draw; `None` accepts everything.
	pub fn into_filter(self) -> Option<Box<dyn Fn(&NGram<S>) -> bool + 'a>> {
		match self {
			Self::Any => None,
			Self::Exact(expected) => Some(Box::new(move |candidate: &NGram<S>| *candidate == expected)),
			Self::Predicate(predicate) => Some(predicate),
		}
	}
}

impl<S> Default for StartCondition<'_, S> {
	fn default() -> Self {
		Self::Any
	}
}

impl<S> From<NGram<S>> for StartCondition<'_, S> {
	fn from(value: NGram<S>) -> Self {
		Self::Exact(value)
	}
}

impl From<&str> for StartCondition<'_, char> {
	fn from(value: &str) -> Self {
		Self::Exact(NGram::from(value))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn max_length_becomes_length_predicate() {
		let stop = StopCondition::<char>::from(3);
		assert_eq!(stop.max_length(), Some(3));
		let predicate = stop.into_predicate();
		assert!(!predicate(&['a', 'b'][..]));
		assert!(predicate(&['a', 'b', 'c'][..]));
	}

	#[test]
	fn exact_start_matches_only_that_ngram() {
		let filter = StartCondition::from("ab").into_filter().unwrap();
		assert!(filter(&NGram::from("ab")));
		assert!(!filter(&NGram::from("ba")));
	}

	#[test]
	fn any_start_has_no_filter() {
		assert!(StartCondition::<char>::Any.into_filter().is_none());
	}

	#[test]
	fn predicate_start_is_kept() {
		let filter = StartCondition::when(|g: &NGram<char>| g.first() == Some(&' ')).into_filter().unwrap();
		assert!(filter(&NGram::from(" a")));
		assert!(!filter(&NGram::from("a ")));
	}
}
