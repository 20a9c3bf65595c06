use rand::Rng;

use crate::error::{ChainError, Result, invalid_parameter};

/// Draws one key with probability proportional to its weight.
///
/// - `filter` restricts the candidates before drawing.
/// - Candidates are walked in iteration order; the first whose cumulative
///   weight exceeds a uniform draw in `[0, total)` wins.
/// - Zero-weight candidates are never chosen unless every candidate weighs
///   zero, in which case the choice is uniform.
///
/// `what` names the draw in the error returned for an empty domain.
///
/// # Errors
/// - `ChainError::EmptyDomain` if no candidate remains after filtering.
/// - `ChainError::InvalidParameter` if the candidate weights add up past `u64::MAX`.
pub fn sample<'a, K, R>(
	weights: impl IntoIterator<Item = (&'a K, &'a u64)>,
	filter: Option<&dyn Fn(&K) -> bool>,
	rng: &mut R,
	what: &'static str,
) -> Result<&'a K>
where
	K: 'a,
	R: Rng + ?Sized,
{
	let candidates: Vec<(&K, u64)> = weights
		.into_iter()
		.filter(|(key, _)| filter.is_none_or(|accept| accept(*key)))
		.map(|(key, weight)| (key, *weight))
		.collect();

	if candidates.is_empty() {
		return Err(ChainError::EmptyDomain { what });
	}

	let Some(total) = candidates.iter().try_fold(0u64, |sum, (_, weight)| sum.checked_add(*weight)) else {
		return Err(invalid_parameter("weights", &candidates.len(), &"total weight exceeds u64::MAX"));
	};
	if total == 0 {
		let index = rng.random_range(0..candidates.len());
		return Ok(candidates[index].0);
	}

	let mut r = rng.random_range(0..total);
	for (key, weight) in &candidates {
		if r < *weight {
			return Ok(*key);
		}
		r -= weight;
	}

	// r < total, so the loop always returns
	Err(ChainError::EmptyDomain { what })
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use std::collections::BTreeMap;

	fn weights(entries: &[(char, u64)]) -> BTreeMap<char, u64> {
		entries.iter().copied().collect()
	}

	#[test]
	fn frequency_follows_weights() {
		let table = weights(&[('a', 3), ('b', 1)]);
		let mut rng = StdRng::seed_from_u64(42);

		let draws = 10_000;
		let mut hits = 0;
		for _ in 0..draws {
			if *sample(&table, None, &mut rng, "test").unwrap() == 'a' {
				hits += 1;
			}
		}

		let ratio = f64::from(hits) / f64::from(draws);
		assert!((0.73..=0.77).contains(&ratio), "expected ~0.75, got {ratio}");
	}

	#[test]
	fn filter_restricts_candidates() {
		let table = weights(&[('a', 1), ('b', 1), ('c', 1)]);
		let mut rng = StdRng::seed_from_u64(7);
		let only_b: &dyn Fn(&char) -> bool = &|k| *k == 'b';

		for _ in 0..100 {
			assert_eq!(*sample(&table, Some(only_b), &mut rng, "test").unwrap(), 'b');
		}
	}

	#[test]
	fn filter_rejecting_everything_is_empty_domain() {
		let table = weights(&[('a', 1), ('b', 1), ('c', 1)]);
		let mut rng = StdRng::seed_from_u64(7);
		let nothing: &dyn Fn(&char) -> bool = &|_| false;

		let err = sample(&table, Some(nothing), &mut rng, "letters").unwrap_err();
		assert!(matches!(err, ChainError::EmptyDomain { what: "letters" }));
	}

	#[test]
	fn empty_mapping_is_empty_domain() {
		let table: BTreeMap<char, u64> = BTreeMap::new();
		let mut rng = StdRng::seed_from_u64(1);
		assert!(sample(&table, None, &mut rng, "test").is_err());
	}

	#[test]
	fn single_entry_always_wins() {
		let table = weights(&[('z', 9)]);
		let mut rng = StdRng::seed_from_u64(3);
		for _ in 0..50 {
			assert_eq!(*sample(&table, None, &mut rng, "test").unwrap(), 'z');
		}
	}

	#[test]
	fn zero_weight_is_never_drawn() {
		let table = weights(&[('a', 0), ('b', 5), ('c', 0)]);
		let mut rng = StdRng::seed_from_u64(11);
		for _ in 0..500 {
			assert_eq!(*sample(&table, None, &mut rng, "test").unwrap(), 'b');
		}
	}

	#[test]
	fn overflowing_total_is_rejected() {
		let table = weights(&[('a', u64::MAX), ('b', 1)]);
		let mut rng = StdRng::seed_from_u64(2);

		let err = sample(&table, None, &mut rng, "test").unwrap_err();
		assert!(matches!(err, ChainError::InvalidParameter { parameter: "weights", .. }));

		let only_a: &dyn Fn(&char) -> bool = &|k| *k == 'a';
		assert_eq!(*sample(&table, Some(only_a), &mut rng, "test").unwrap(), 'a');
	}

	#[test]
	fn all_zero_weights_fall_back_to_uniform() {
		let table = weights(&[('a', 0), ('b', 0)]);
		let mut rng = StdRng::seed_from_u64(5);
		let mut seen = BTreeMap::new();
		for _ in 0..1_000 {
			*seen.entry(*sample(&table, None, &mut rng, "test").unwrap()).or_insert(0) += 1;
		}
		assert_eq!(seen.len(), 2);
		assert!(seen.values().all(|count| *count > 350));
	}
}
