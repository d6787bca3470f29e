//! Textual renderings of parse results

use std::fmt::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::OutputFormat;
use crate::machine::Machine;
use crate::state::StateVector;

/// Render the results of the last parse
pub fn render(machine: &Machine<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Instructions => Ok(machine.to_string()),
        OutputFormat::States => Ok(render_states(machine)),
        OutputFormat::Csv => render_csv(machine),
        OutputFormat::Json => render_json(machine),
    }
}

/// One line per state: `line: <n> command: <cmd> -> [..]`
pub fn render_states(machine: &Machine<'_>) -> String {
    let mut out = String::new();
    for (instruction, state) in machine.instructions().iter().zip(machine.states()) {
        out.push_str(&format!(
            "line: {} command: {} -> {}\n",
            instruction.line_no, instruction.command, state
        ));
    }
    out
}

/// Header with the dialect's axis names, one row per state
pub fn render_csv(machine: &Machine<'_>) -> Result<String> {
    let mut out = String::new();
    write_csv(&mut out, machine).context("Failed to render CSV")?;
    Ok(out)
}

fn write_csv(out: &mut impl Write, machine: &Machine<'_>) -> fmt::Result {
    write!(out, "line,command")?;
    for axis in machine.translator().axis_names() {
        write!(out, ",{}", axis)?;
    }
    writeln!(out)?;

    for (instruction, state) in machine.instructions().iter().zip(machine.states()) {
        write!(out, "{},{}", instruction.line_no, instruction.command)?;
        for value in state.iter() {
            write!(out, ",{}", value)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonRow<'m> {
    line: usize,
    command: &'m str,
    state: AxisValues<'m>,
}

/// A state vector keyed by axis name, in axis order
struct AxisValues<'m> {
    axes: &'m [String],
    state: &'m StateVector,
}

impl Serialize for AxisValues<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.axes.iter().zip(self.state.iter()))
    }
}

/// JSON array of `{ line, command, state }` objects
pub fn render_json(machine: &Machine<'_>) -> Result<String> {
    let axes = machine.translator().axis_names();
    let rows: Vec<JsonRow<'_>> = machine
        .instructions()
        .iter()
        .zip(machine.states())
        .map(|(instruction, state)| JsonRow {
            line: instruction.line_no,
            command: instruction.command,
            state: AxisValues { axes, state },
        })
        .collect();

    serde_json::to_string_pretty(&rows).context("Failed to serialize state vectors")
}

impl fmt::Display for Machine<'_> {
    /// Instruction listing
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in self.instructions() {
            writeln!(f, "{}", instruction)?;
        }
        Ok(())
    }
}
