//! Instructions and parameters
//!
//! The parsed form of one G-code line. Pure data, no dialect knowledge.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::error::ExtractError;
use crate::primitive::Primitive;

/// A command parameter like "X10" or "S255"
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Parameter {
    /// Parameter letter (e.g., 'X', 'Y', 'S')
    pub key: char,
    pub value: Primitive,
}

impl Parameter {
    pub fn new(key: char, value: impl Into<Primitive>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// A command with its parameters, tagged with the source line
///
/// Instructions are ordered by line number only.
#[derive(Debug, Clone, Serialize)]
pub struct Instruction<'a> {
    pub line_no: usize,
    /// Command key used verbatim for dispatch (e.g., "G1", "M104")
    pub command: &'a str,
    /// Parameters sorted by key
    pub params: Vec<Parameter>,
}

impl<'a> Instruction<'a> {
    /// Build an instruction, normalizing the parameter order
    pub fn new(line_no: usize, command: &'a str, mut params: Vec<Parameter>) -> Self {
        params.sort_by_key(|p| p.key);
        Self {
            line_no,
            command,
            params,
        }
    }

    /// First parameter with the given key
    pub fn param(&self, key: char) -> Option<Primitive> {
        find_param(&self.params, key)
    }
}

/// First parameter with the given key in a parameter list
pub fn find_param(params: &[Parameter], key: char) -> Option<Primitive> {
    params.iter().find(|p| p.key == key).map(|p| p.value)
}

impl PartialEq for Instruction<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.line_no == other.line_no
    }
}

impl Eq for Instruction<'_> {}

impl PartialOrd for Instruction<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instruction<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line_no.cmp(&other.line_no)
    }
}

impl fmt::Display for Instruction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line: {} command: {} Parameters ->",
            self.line_no, self.command
        )?;
        for param in &self.params {
            write!(f, " {} = {}", param.key, param.value)?;
        }
        Ok(())
    }
}

/// Parse a parameter word like "X10.5" into a Parameter
///
/// The first character is the key, the rest must be a finite number.
pub fn parse_parameter(word: &str) -> Result<Parameter, ExtractError> {
    let mut chars = word.chars();
    // words come from split_whitespace and are never empty
    let key = chars.next().unwrap_or_default();
    let value = chars.as_str();

    if value.is_empty() {
        return Err(ExtractError::MissingValue { key });
    }

    let magnitude = value
        .parse::<f64>()
        .map_err(|source| ExtractError::InvalidValue {
            key,
            value: value.to_string(),
            source,
        })?;

    // `f64::from_str` accepts "nan", "inf" and "infinity"
    if !magnitude.is_finite() {
        return Err(ExtractError::NonFinite {
            key,
            value: value.to_string(),
        });
    }

    Ok(Parameter::new(key, magnitude))
}

/// Convert the words of one line into an instruction
///
/// No words means no instruction. Any bad parameter rejects the whole line.
pub fn words_to_instruction<'a>(
    line_no: usize,
    mut words: impl Iterator<Item = &'a str>,
) -> Result<Option<Instruction<'a>>, ExtractError> {
    let Some(command) = words.next() else {
        return Ok(None);
    };

    let params = words.map(parse_parameter).collect::<Result<Vec<_>, _>>()?;

    Ok(Some(Instruction::new(line_no, command, params)))
}
