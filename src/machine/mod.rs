//! Machine Pipeline
//!
//! Turns G-code text into a sequence of state space vectors:
//!
//! 1. split the buffer into indexed lines
//! 2. extract an optional instruction from every line, in parallel
//! 3. drop empty lines, record malformed ones, sort by line number
//! 4. fold the instructions through the dialect translator, in order
//!
//! The fold is a left fold over a combine operator that is neither
//! commutative nor associative once absolute values are involved, so it
//! always runs sequentially.

pub mod render;

use std::fmt;
use std::io::{self, Read};

use rayon::prelude::*;
use serde::Serialize;

use crate::dialect::{Dialect, Translator};
use crate::error::{ExtractError, MachineError};
use crate::parser::{extract_instruction, extract_lines, Instruction, Line};
use crate::state::StateVector;

/// A line that was dropped because its parameters did not parse
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedLine<'a> {
    pub line_no: usize,
    pub text: &'a str,
    #[serde(serialize_with = "serialize_display")]
    pub error: ExtractError,
}

fn serialize_display<S: serde::Serializer>(
    error: &ExtractError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

impl fmt::Display for SkippedLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({})", self.line_no, self.error, self.text)
    }
}

/// Outcome of extracting one line
pub type Extraction<'a> = Result<Option<Instruction<'a>>, SkippedLine<'a>>;

/// Counts from the last parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseSummary {
    pub lines: usize,
    pub instructions: usize,
    pub skipped: usize,
    /// Instructions whose command the dialect does not know
    pub unrecognized: usize,
}

impl fmt::Display for ParseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines, {} instructions, {} skipped, {} unrecognized",
            self.lines, self.instructions, self.skipped, self.unrecognized
        )
    }
}

/// Extract instructions from every line
///
/// The output has one entry per line, in line order.
pub fn extract_instructions<'a>(lines: &[Line<'a>], parallel: bool) -> Vec<Extraction<'a>> {
    let extract = |line: &Line<'a>| -> Extraction<'a> {
        extract_instruction(line).map_err(|error| SkippedLine {
            line_no: line.index,
            text: line.text,
            error,
        })
    };

    if parallel {
        lines.par_iter().map(extract).collect()
    } else {
        lines.iter().map(extract).collect()
    }
}

/// Split extraction results and restore source order
///
/// Accepts results in any order. Empty lines are dropped; instructions and
/// skipped lines both come back sorted by line number.
pub fn order_extractions<'a>(
    extractions: Vec<Extraction<'a>>,
    parallel: bool,
) -> (Vec<Instruction<'a>>, Vec<SkippedLine<'a>>) {
    let mut instructions = Vec::with_capacity(extractions.len());
    let mut skipped = Vec::new();

    for extraction in extractions {
        match extraction {
            Ok(Some(instruction)) => instructions.push(instruction),
            Ok(None) => {}
            Err(line) => skipped.push(line),
        }
    }

    if parallel {
        instructions.par_sort_unstable_by_key(|instruction| instruction.line_no);
    } else {
        instructions.sort_unstable_by_key(|instruction| instruction.line_no);
    }
    skipped.sort_unstable_by_key(|line| line.line_no);

    debug_assert!(
        instructions.is_sorted_by_key(|instruction| instruction.line_no),
        "instructions must be ordered by line number before translation"
    );

    (instructions, skipped)
}

/// Fold instructions into state vectors
///
/// The first vector is the machine at rest; every following vector is the
/// previous one combined with the delta of its instruction. The first
/// instruction anchors the rest state and its delta is not applied.
pub fn translate_instructions(
    translator: &Translator,
    instructions: &[Instruction<'_>],
) -> Result<Vec<StateVector>, MachineError> {
    if instructions.is_empty() {
        return Ok(Vec::new());
    }

    let expected = translator.axis_count();
    let mut states = Vec::with_capacity(instructions.len());
    let mut state = translator.initial_state();

    for instruction in &instructions[1..] {
        let delta = translator.translate(instruction);
        if delta.len() != expected {
            return Err(MachineError::AxisCountMismatch {
                line_no: instruction.line_no,
                command: instruction.command.to_string(),
                expected,
                found: delta.len(),
            });
        }
        let next = &state + &delta;
        states.push(state);
        state = next;
    }
    states.push(state);

    Ok(states)
}

/// Read a whole G-code source into the buffer handed to [`Machine::parse`]
///
/// The caller keeps the buffer alive for as long as the machine's results
/// are in use.
pub fn read_gcode<R: Read>(mut reader: R) -> io::Result<String> {
    let mut gcode = String::new();
    reader.read_to_string(&mut gcode)?;
    Ok(gcode)
}

/// G-code interpreter for one dialect
///
/// Results borrow from the text handed to [`Machine::parse`].
#[derive(Debug)]
pub struct Machine<'a> {
    translator: Translator,
    parallel_execution: bool,
    instructions: Vec<Instruction<'a>>,
    states: Vec<StateVector>,
    skipped: Vec<SkippedLine<'a>>,
    summary: ParseSummary,
}

impl<'a> Machine<'a> {
    pub fn new(translator: Translator) -> Self {
        Self {
            translator,
            parallel_execution: true,
            instructions: Vec::new(),
            states: Vec::new(),
            skipped: Vec::new(),
            summary: ParseSummary::default(),
        }
    }

    pub fn from_dialect(dialect: &dyn Dialect) -> Self {
        Self::new(Translator::from_dialect(dialect))
    }

    /// Allow parallel extraction, on by default
    pub fn set_parallel_execution(&mut self, parallel_execution: bool) {
        log::info!("Setting parallel execution mode to {}", parallel_execution);
        self.parallel_execution = parallel_execution;
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel_execution
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Parse G-code, replacing the results of any previous parse
    ///
    /// Malformed lines are skipped and listed in [`Machine::skipped`]. On
    /// error the machine is left empty.
    pub fn parse(&mut self, gcode: &'a str) -> Result<&[StateVector], MachineError> {
        self.clear();
        log::info!("Parsing G-code with the '{}' dialect", self.translator.name());

        log::debug!("Extracting lines");
        let lines = extract_lines(gcode);

        log::debug!("Interpreting {} lines", lines.len());
        let extractions = extract_instructions(&lines, self.parallel_execution);
        let (instructions, skipped) = order_extractions(extractions, self.parallel_execution);
        for line in &skipped {
            log::warn!("Skipping {}", line);
        }

        log::debug!("Translating {} instructions", instructions.len());
        let states = translate_instructions(&self.translator, &instructions)?;
        debug_assert_eq!(states.len(), instructions.len());

        let summary = ParseSummary {
            lines: lines.len(),
            instructions: instructions.len(),
            skipped: skipped.len(),
            unrecognized: instructions
                .iter()
                .filter(|instruction| !self.translator.recognizes(instruction.command))
                .count(),
        };
        log::info!("Parsed {}", summary);

        self.instructions = instructions;
        self.states = states;
        self.skipped = skipped;
        self.summary = summary;

        Ok(&self.states)
    }

    /// Drop the results of the last parse
    pub fn clear(&mut self) {
        self.instructions.clear();
        self.states.clear();
        self.skipped.clear();
        self.summary = ParseSummary::default();
    }

    pub fn states(&self) -> &[StateVector] {
        &self.states
    }

    pub fn instructions(&self) -> &[Instruction<'a>] {
        &self.instructions
    }

    pub fn skipped(&self) -> &[SkippedLine<'a>] {
        &self.skipped
    }

    pub fn summary(&self) -> ParseSummary {
        self.summary
    }
}
