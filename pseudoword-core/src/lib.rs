//! N-gram Markov chain pseudo-word generation library.
//!
//! This crate provides:
//! - Weighted random sampling over count tables
//! - A chain generator walking a trained n-gram table
//! - Word rendering with trimming and length bounds
//! - Corpus training and table I/O (JSON, postcard)
//!
//! Randomness is always passed in by the caller, so a seeded
//! `rand::rngs::StdRng` gives reproducible output.

/// Core n-gram model and generation logic.
pub mod model;

/// Table and corpus file I/O.
pub mod io;

/// Generation constants and iteration caps.
pub mod config;

/// Error taxonomy shared by every module.
pub mod error;

pub use config::GenerationLimits;
pub use error::{ChainError, Result};
pub use model::condition::{StartCondition, StopCondition};
pub use model::frequency_table::FrequencyTable;
pub use model::generator::ChainGenerator;
pub use model::ngram::NGram;
