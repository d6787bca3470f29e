//! GHermeneus
//!
//! A fast G-code interpreter that turns an instruction stream into an
//! ordered sequence of machine state space vectors.
//!
//! This library provides:
//! - Zero-copy line and instruction extraction
//! - Relative/absolute primitive values and state vectors
//! - Dialect-based command translation
//! - A parallel extraction, sequential accumulation pipeline

pub mod cli;
pub mod config;
pub mod dialect;
pub mod error;
pub mod machine;
pub mod parser;
pub mod primitive;
pub mod state;

// Re-exports for clean public API
pub use config::Config;
pub use dialect::{Dialect, DialectRegistry, Marlin, Translator};
pub use error::{ExtractError, MachineError};
pub use machine::{read_gcode, Machine, ParseSummary, SkippedLine};
pub use parser::{extract_instruction, extract_lines, Instruction, Line, Parameter};
pub use primitive::Primitive;
pub use state::StateVector;
