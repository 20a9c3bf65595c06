use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a frequency table or walking the chain.
///
/// None of these are retried internally: `render_word` only retries on a
/// rejected length, and any error below aborts the whole generation.
#[derive(Debug, Error)]
pub enum ChainError {
	/// The frequency table input does not have the expected shape.
	#[error("Failed to load frequency table{}: {reason}", path_suffix(.path))]
	Load {
		/// File the table was read from, if any.
		path: Option<PathBuf>,
		/// What was wrong with the input.
		reason: String,
	},

	/// Reading or writing a table or corpus file failed.
	#[error("I/O error during {operation} on '{}': {source}", .path.display())]
	Io {
		/// File involved in the operation.
		path: PathBuf,
		/// Operation being performed.
		operation: &'static str,
		/// Underlying I/O error.
		#[source]
		source: std::io::Error,
	},

	/// A weighted draw was requested over an empty (or fully filtered) domain.
	#[error("No candidates to sample from: {what}")]
	EmptyDomain {
		/// Which draw had nothing to choose from.
		what: &'static str,
	},

	/// An opt-in iteration cap was reached.
	#[error("Gave up after {limit} {operation}")]
	Exhausted {
		/// The capped loop (`"re-seeds"`, `"attempts"`).
		operation: &'static str,
		/// The cap that was reached.
		limit: usize,
	},

	/// A training worker stopped before reporting its counts.
	#[error("Training failed: {reason}")]
	Training {
		/// What went wrong.
		reason: String,
	},

	/// A caller-supplied parameter is out of range.
	#[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
	InvalidParameter {
		/// Name of the parameter.
		parameter: &'static str,
		/// Provided value.
		value: String,
		/// Why it was rejected.
		reason: String,
	},
}

fn path_suffix(path: &Option<PathBuf>) -> String {
	match path {
		Some(p) => format!(" '{}'", p.display()),
		None => String::new(),
	}
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, ChainError>;

/// Builds a `Load` error not tied to a file.
pub(crate) fn load_error(reason: impl ToString) -> ChainError {
	ChainError::Load { path: None, reason: reason.to_string() }
}

/// Builds an `InvalidParameter` error.
pub(crate) fn invalid_parameter(parameter: &'static str, value: &impl ToString, reason: &impl ToString) -> ChainError {
	ChainError::InvalidParameter {
		parameter,
		value: value.to_string(),
		reason: reason.to_string(),
	}
}

impl ChainError {
	/// Attaches the source file to a `Load` error that has none yet.
	pub(crate) fn with_path(self, file: impl Into<PathBuf>) -> Self {
		match self {
			Self::Load { path: None, reason } => Self::Load { path: Some(file.into()), reason },
			other => other,
		}
	}
}

impl From<serde_json::Error> for ChainError {
	fn from(err: serde_json::Error) -> Self {
		load_error(err)
	}
}

impl From<postcard::Error> for ChainError {
	fn from(err: postcard::Error) -> Self {
		load_error(err)
	}
}
