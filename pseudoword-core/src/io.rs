use std::fs;
use std::path::Path;

use log::info;

use crate::error::{ChainError, Result};
use crate::model::frequency_table::{FrequencyTable, TextTable};

/// Extension selecting the postcard encoding; anything else is JSON.
pub const BINARY_EXTENSION: &str = "bin";

fn is_binary<P: AsRef<Path>>(path: P) -> bool {
	path.as_ref().extension() == Some(std::ffi::OsStr::new(BINARY_EXTENSION))
}

fn io_error(path: &Path, operation: &'static str) -> impl FnOnce(std::io::Error) -> ChainError {
	let path = path.to_path_buf();
	move |source| ChainError::Io { path, operation, source }
}

/// Reads a text file and returns its lines.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
///
/// # Errors
/// `ChainError::Io` if the file cannot be read.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
	let path = path.as_ref();
	let contents = fs::read_to_string(path).map_err(io_error(path, "read"))?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Decodes a JSON table: `{ "<context>": { "<next>": count } }`.
///
/// # Errors
/// `ChainError::Load` on malformed JSON, non-numeric or negative counts,
/// or next-symbol keys longer than one character.
pub fn parse_json_table(json: &str) -> Result<FrequencyTable<char>> {
	let text: TextTable = serde_json::from_str(json)?;
	FrequencyTable::from_text(text)
}

/// Encodes a table as compact JSON.
///
/// # Errors
/// `ChainError::Load` if serialization fails.
pub fn to_json_string(table: &FrequencyTable<char>) -> Result<String> {
	Ok(serde_json::to_string(&table.to_text())?)
}

/// Loads a table from disk.
///
/// - `.bin` files are read with `postcard`
/// - Any other extension is read as JSON
///
/// # Errors
/// `ChainError::Io` if the file cannot be read, `ChainError::Load` (carrying
/// the path) if its content is malformed.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<FrequencyTable<char>> {
	let path = path.as_ref();
	let table = if is_binary(path) {
		let bytes = fs::read(path).map_err(io_error(path, "read"))?;
		postcard::from_bytes::<FrequencyTable<char>>(&bytes).map_err(|err| ChainError::from(err).with_path(path))?
	} else {
		let json = fs::read_to_string(path).map_err(io_error(path, "read"))?;
		parse_json_table(&json).map_err(|err| err.with_path(path))?
	};
	info!("Loaded {} contexts from {}", table.len(), path.display());
	Ok(table)
}

/// Writes a table to disk, choosing the encoding from the extension like [`load_table`].
///
/// # Errors
/// `ChainError::Io` if the file cannot be written.
pub fn save_table<P: AsRef<Path>>(table: &FrequencyTable<char>, path: P) -> Result<()> {
	let path = path.as_ref();
	let bytes = if is_binary(path) {
		postcard::to_stdvec(table)?
	} else {
		to_json_string(table)?.into_bytes()
	};
	fs::write(path, bytes).map_err(io_error(path, "write"))?;
	info!("Saved {} contexts to {}", table.len(), path.display());
	Ok(())
}
