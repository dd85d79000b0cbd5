// src/input/parser.rs

use std::fs;
use std::path::Path;

use crate::errors::Result;
use crate::input::InputDeck;

/// Parses the input deck from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML input file.
///
/// # Returns
///
/// * `Ok(InputDeck)` if parsing and validation succeed.
/// * `Err` if an error occurs during file reading, parsing or validation.
pub fn parse_input_deck<P: AsRef<Path>>(file_path: P) -> Result<InputDeck> {
    let contents = fs::read_to_string(file_path)?;
    InputDeck::from_yaml_str(&contents)
}
