//! Command-line front end
//!
//! Reads a G-code file, interprets it with the selected dialect and prints
//! the chosen rendering to stdout.

use std::fs::File;
use std::io::{self, Write};

use anyhow::{anyhow, Context, Result};

use crate::config::Config;
use crate::dialect::registry::DEFAULT_DIALECT;
use crate::dialect::{DialectRegistry, Translator};
use crate::machine::{read_gcode, render, Machine};

/// Run the interpreter with configuration from the command line
pub fn run() -> Result<()> {
    let config = Config::from_args_and_env()?;
    init_logging(&config);

    let output = interpret(&config)?;
    std::io::stdout()
        .lock()
        .write_all(output.as_bytes())
        .context("Failed to write output")?;

    Ok(())
}

fn init_logging(config: &Config) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = &config.log_level {
        builder.parse_filters(level);
    }
    builder.init();
}

/// Build the dialect registry from the built-in and configured dialects
pub fn build_registry(config: &Config) -> DialectRegistry {
    let mut registry = DialectRegistry::with_builtin();

    for dir in &config.dialect_dirs {
        if let Err(e) = registry.load_directory(dir) {
            log::warn!("{:#}", e);
        }
    }

    registry
}

/// Pick the translator for a document
///
/// Priority: command line, then a modeline in the document, then the
/// registry's active dialect.
pub fn select_translator(
    registry: &DialectRegistry,
    config: &Config,
    content: &str,
) -> Result<Translator> {
    if let Some(name) = config.get_effective_dialect() {
        return registry.translator(&name).ok_or_else(|| {
            anyhow!(
                "Unknown dialect '{}', available: {}",
                name,
                registry.list_dialects().join(", ")
            )
        });
    }

    if let Some(name) = registry.detect_modeline_dialect(content) {
        log::info!("Using dialect '{}' from modeline", name);
        if let Some(translator) = registry.translator(&name) {
            return Ok(translator);
        }
    }

    registry
        .active_dialect()
        .map(Translator::from_dialect)
        .ok_or_else(|| anyhow!("No active dialect, expected '{}'", DEFAULT_DIALECT))
}

/// Interpret the configured input file and render the result
pub fn interpret(config: &Config) -> Result<String> {
    let content = if config.reads_stdin() {
        read_gcode(io::stdin().lock()).context("Failed to read G-code from stdin")?
    } else {
        File::open(&config.input)
            .and_then(read_gcode)
            .with_context(|| format!("Failed to read G-code file: {}", config.input.display()))?
    };

    let registry = build_registry(config);
    let translator = select_translator(&registry, config, &content)?;

    let mut machine = Machine::new(translator);
    machine.set_parallel_execution(config.parallel);
    machine
        .parse(&content)
        .with_context(|| format!("Failed to interpret {}", config.input.display()))?;

    render::render(&machine, config.format)
}
