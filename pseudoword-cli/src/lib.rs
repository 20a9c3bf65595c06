//! Command-line surfaces for pseudo-word generation and n-gram training

/// Argument definitions and entry points of both binaries
pub mod cli;
