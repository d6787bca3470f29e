//! Dialect Translator
//!
//! Dispatches instructions to the delta functions of a dialect.

use std::fmt;
use std::sync::Arc;

use crate::dialect::{zero_delta, CommandMap, DeltaFn, Dialect, ParameterMap};
use crate::parser::{Instruction, Parameter};
use crate::state::StateVector;

/// Immutable command registry of one dialect
///
/// Shared freely between threads once built. Unknown commands dispatch to
/// the fallback, which by default yields the zero vector.
#[derive(Clone)]
pub struct Translator {
    name: String,
    axis_names: Vec<String>,
    commands: CommandMap,
    parameters: ParameterMap,
    fallback: DeltaFn,
}

impl Translator {
    pub fn from_dialect(dialect: &dyn Dialect) -> Self {
        Self {
            name: dialect.name().to_string(),
            axis_names: dialect.axis_names().into_iter().map(String::from).collect(),
            commands: dialect.commands(),
            parameters: dialect.parameters(),
            fallback: dialect.fallback(),
        }
    }

    pub fn builder<S: Into<String>>(
        name: impl Into<String>,
        axis_names: impl IntoIterator<Item = S>,
    ) -> TranslatorBuilder {
        TranslatorBuilder::new(name, axis_names)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn axis_names(&self) -> &[String] {
        &self.axis_names
    }

    pub fn axis_count(&self) -> usize {
        self.axis_names.len()
    }

    /// Index of a named axis
    pub fn axis(&self, name: &str) -> Option<usize> {
        self.axis_names.iter().position(|axis| axis == name)
    }

    /// The machine at rest: every axis relative zero
    pub fn initial_state(&self) -> StateVector {
        StateVector::zero(self.axis_count())
    }

    pub fn recognizes(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }

    /// Delta function for a command key, the fallback when unmapped
    pub fn command(&self, key: &str) -> &DeltaFn {
        self.commands.get(key).unwrap_or(&self.fallback)
    }

    /// Delta function registered for a global parameter key
    pub fn parameter(&self, key: &str) -> Option<&DeltaFn> {
        self.parameters.get(key)
    }

    /// Delta state vector for one instruction
    pub fn translate(&self, instruction: &Instruction<'_>) -> StateVector {
        if !self.recognizes(instruction.command) {
            log::debug!(
                "Unknown command '{}' on line {}, using fallback",
                instruction.command,
                instruction.line_no
            );
        }
        (self.command(instruction.command))(&instruction.params)
    }

    /// Sorted command keys, for diagnostics
    pub fn command_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("name", &self.name)
            .field("axis_names", &self.axis_names)
            .field("commands", &self.command_keys())
            .field("parameters", &self.parameters.len())
            .finish_non_exhaustive()
    }
}

/// Incremental construction of a [`Translator`] from closures
pub struct TranslatorBuilder {
    name: String,
    axis_names: Vec<String>,
    commands: CommandMap,
    parameters: ParameterMap,
    fallback: Option<DeltaFn>,
}

impl TranslatorBuilder {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        axis_names: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            axis_names: axis_names.into_iter().map(Into::into).collect(),
            commands: CommandMap::new(),
            parameters: ParameterMap::new(),
            fallback: None,
        }
    }

    pub fn command<F>(mut self, key: impl Into<String>, delta: F) -> Self
    where
        F: Fn(&[Parameter]) -> StateVector + Send + Sync + 'static,
    {
        self.commands.insert(key.into(), Arc::new(delta));
        self
    }

    pub fn parameter<F>(mut self, key: impl Into<String>, delta: F) -> Self
    where
        F: Fn(&[Parameter]) -> StateVector + Send + Sync + 'static,
    {
        self.parameters.insert(key.into(), Arc::new(delta));
        self
    }

    pub fn fallback<F>(mut self, delta: F) -> Self
    where
        F: Fn(&[Parameter]) -> StateVector + Send + Sync + 'static,
    {
        self.fallback = Some(Arc::new(delta));
        self
    }

    pub fn build(self) -> Translator {
        let fallback = self
            .fallback
            .unwrap_or_else(|| zero_delta(self.axis_names.len()));
        Translator {
            name: self.name,
            axis_names: self.axis_names,
            commands: self.commands,
            parameters: self.parameters,
            fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::find_param;
    use crate::primitive::Primitive;

    fn toy_translator() -> Translator {
        Translator::builder("toy", ["x"])
            .command("G0", |params| {
                let x = find_param(params, 'X').unwrap_or_default();
                StateVector::zero(1).with(0, x.with_relative(true))
            })
            .parameter("temp", |_| StateVector::zero(1))
            .build()
    }

    #[test]
    fn test_known_command_dispatch() {
        let translator = toy_translator();
        let instruction = Instruction::new(0, "G0", vec![Parameter::new('X', 4.0)]);

        let delta = translator.translate(&instruction);
        assert_eq!(delta.magnitudes(), vec![4.0]);
    }

    #[test]
    fn test_unknown_command_falls_back_to_zero() {
        let translator = toy_translator();
        let params = vec![Parameter::new('X', 99.0), Parameter::new('S', 1.0)];

        for command in ["M400", "G0x", "g0", "FOO"] {
            let instruction = Instruction::new(0, command, params.clone());
            assert!(!translator.recognizes(command));
            assert!(translator.translate(&instruction).is_zero());
        }
    }

    #[test]
    fn test_custom_fallback() {
        let translator = Translator::builder("toy", ["x", "y"])
            .fallback(|_| StateVector::zero(2).with(1, Primitive::relative(1.0)))
            .build();
        let delta = translator.translate(&Instruction::new(0, "G1", vec![]));
        assert_eq!(delta.magnitudes(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_parameter_lookup() {
        let translator = toy_translator();
        assert!(translator.parameter("temp").is_some());
        assert!(translator.parameter("feed").is_none());
    }

    #[test]
    fn test_axes() {
        let translator = Translator::builder("toy", ["t", "x"]).build();
        assert_eq!(translator.axis_count(), 2);
        assert_eq!(translator.axis("x"), Some(1));
        assert_eq!(translator.axis("z"), None);
        assert!(translator.initial_state().is_zero());
    }
}
