//! Top-level module for the n-gram chain system.
//!
//! This module provides:
//! - Symbol windows (`NGram`) and per-context counts (`Transitions`)
//! - The trained table (`FrequencyTable`) and its training (`Trainer`)
//! - Weighted sampling (`sampler`)
//! - Walk parameters (`StopCondition`, `StartCondition`)
//! - The chain walk itself (`ChainGenerator`)

/// Chain walk: start draw, symbol-by-symbol advance, chain-break re-seeding
/// and delimiter-bounded word rendering.
pub mod generator;

/// Stop and start conditions of a walk, normalized to predicates.
pub mod condition;

/// N-gram to next-symbol count table and its text encoding.
pub mod frequency_table;

/// Fixed-length symbol windows.
pub mod ngram;

/// Weighted random choice over a key → count mapping.
pub mod sampler;

/// Character n-gram counting over a corpus, sequential or parallel.
pub mod trainer;

/// Outgoing counts of a single context.
pub mod transitions;
