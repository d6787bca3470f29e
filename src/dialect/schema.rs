//! Dialect Schema Types
//!
//! TOML description of a dialect. Each command is a list of rules, one per
//! parameter key, saying which axis the value lands on and whether it is a
//! relative increment or an absolute override.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::dialect::{CommandMap, DeltaFn, Dialect};
use crate::parser::{find_param, Parameter};
use crate::primitive::Primitive;
use crate::state::StateVector;

/// Root dialect file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DialectFile {
    pub dialect: DialectMeta,
    #[serde(default)]
    pub commands: Vec<CommandDef>,
}

/// Dialect metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DialectMeta {
    pub name: String,
    pub description: Option<String>,
    pub axes: Vec<String>,
}

/// G-code command definition
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CommandDef {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterRule>,
}

/// Where one parameter's value goes in the delta vector
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ParameterRule {
    pub key: char,
    pub axis: String,
    #[serde(default)]
    pub mode: ValueMode,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueMode {
    #[default]
    Relative,
    Absolute,
}

/// A rule with its axis name resolved to an index
#[derive(Debug, Clone, Copy, PartialEq)]
struct ResolvedRule {
    key: char,
    axis: usize,
    mode: ValueMode,
    scale: f64,
}

impl ResolvedRule {
    fn apply(&self, params: &[Parameter], delta: &mut StateVector) {
        if let Some(value) = find_param(params, self.key) {
            let magnitude = value.magnitude() * self.scale;
            let primitive = match self.mode {
                ValueMode::Relative => Primitive::relative(magnitude),
                ValueMode::Absolute => Primitive::absolute(magnitude),
            };
            delta.set(self.axis, primitive);
        }
    }
}

/// Runtime dialect built from a [`DialectFile`]
#[derive(Debug, Clone, PartialEq)]
pub struct TomlDialect {
    pub name: String,
    pub description: Option<String>,
    axes: Vec<String>,
    commands: HashMap<String, Vec<ResolvedRule>>,
}

impl TomlDialect {
    /// Parse and validate TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: DialectFile =
            toml::from_str(content).context("Failed to parse dialect TOML")?;
        Self::try_from(file)
    }

    pub fn command_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl TryFrom<DialectFile> for TomlDialect {
    type Error = anyhow::Error;

    fn try_from(file: DialectFile) -> Result<Self> {
        let meta = file.dialect;
        if meta.axes.is_empty() {
            bail!("Dialect '{}' declares no axes", meta.name);
        }

        let mut commands = HashMap::new();
        for command in file.commands {
            let mut rules = Vec::with_capacity(command.parameters.len());
            for rule in &command.parameters {
                let axis = meta
                    .axes
                    .iter()
                    .position(|axis| axis == &rule.axis)
                    .with_context(|| {
                        format!(
                            "Command '{}' of dialect '{}' uses unknown axis '{}'",
                            command.name, meta.name, rule.axis
                        )
                    })?;
                rules.push(ResolvedRule {
                    key: rule.key,
                    axis,
                    mode: rule.mode,
                    scale: rule.scale,
                });
            }

            for alias in &command.aliases {
                commands.insert(alias.clone(), rules.clone());
            }
            commands.insert(command.name, rules);
        }

        Ok(Self {
            name: meta.name,
            description: meta.description,
            axes: meta.axes,
            commands,
        })
    }
}

impl Dialect for TomlDialect {
    fn name(&self) -> &str {
        &self.name
    }

    fn axis_names(&self) -> Vec<&str> {
        self.axes.iter().map(String::as_str).collect()
    }

    fn commands(&self) -> CommandMap {
        let axis_count = self.axes.len();
        self.commands
            .iter()
            .map(|(name, rules)| {
                let rules = rules.clone();
                let delta: DeltaFn = Arc::new(move |params: &[Parameter]| {
                    let mut delta = StateVector::zero(axis_count);
                    for rule in &rules {
                        rule.apply(params, &mut delta);
                    }
                    delta
                });
                (name.clone(), delta)
            })
            .collect()
    }
}
