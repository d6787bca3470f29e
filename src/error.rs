//! Error types for the translation pipeline

use std::num::ParseFloatError;

use thiserror::Error;

/// Why a single line could not be turned into an instruction
///
/// These are local to one line: the line is skipped and the rest of the
/// input is still processed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error("parameter '{key}' has no value")]
    MissingValue { key: char },

    #[error("parameter '{key}' has an invalid value '{value}': {source}")]
    InvalidValue {
        key: char,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("parameter '{key}' has a non-finite value '{value}'")]
    NonFinite { key: char, value: String },
}

/// Failures that abort a whole parse
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    #[error(
        "command '{command}' on line {line_no} produced {found} axes, the dialect declares {expected}"
    )]
    AxisCountMismatch {
        line_no: usize,
        command: String,
        expected: usize,
        found: usize,
    },
}
