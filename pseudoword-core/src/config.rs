//! Generation constants and runtime limits

/// Symbol separating words in character-level tables.
pub const WORD_DELIMITER: char = ' ';

/// Shortest word accepted by default.
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// Longest word accepted by default.
pub const DEFAULT_MAX_LENGTH: usize = 12;

/// Default window size for training (context of `order - 1` symbols plus the next one).
pub const DEFAULT_TRAINING_ORDER: usize = 3;

/// Chunks per CPU when counting a corpus in parallel
pub const TRAINING_CHUNK_FACTOR: usize = 8;

/// Caps on the otherwise unbounded loops of the chain walk.
///
/// `None` keeps a loop unbounded. A reached cap is reported as
/// [`ChainError::Exhausted`](crate::ChainError::Exhausted).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationLimits {
	/// Maximum chain-break re-seeds within a single `render`.
	pub max_reseeds: Option<usize>,

	/// Maximum candidate draws within a single `render_word`.
	pub max_attempts: Option<usize>,
}

impl GenerationLimits {
	/// No caps at all.
	pub const fn unbounded() -> Self {
		Self { max_reseeds: None, max_attempts: None }
	}
}
