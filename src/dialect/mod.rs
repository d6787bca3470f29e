//! G-code Dialects
//!
//! A dialect is the only dialect-aware part of the interpreter: it names the
//! axes of the state vector and maps command keys to pure functions that
//! produce a delta state vector from an instruction's parameters.
//!
//! Dialects come from Rust code (see [`marlin::Marlin`]) or from TOML files
//! (see [`schema`]), and are collected in a [`DialectRegistry`].

pub mod marlin;
pub mod registry;
pub mod schema;
pub mod translator;

use std::collections::HashMap;
use std::sync::Arc;

use crate::parser::Parameter;
use crate::state::StateVector;

pub use marlin::Marlin;
pub use registry::DialectRegistry;
pub use schema::{DialectFile, TomlDialect};
pub use translator::{Translator, TranslatorBuilder};

/// A pure function turning parameters into a delta state vector
pub type DeltaFn = Arc<dyn Fn(&[Parameter]) -> StateVector + Send + Sync>;

/// Command key to delta function
pub type CommandMap = HashMap<String, DeltaFn>;

/// Parameter key to delta function, reserved for global parameters
pub type ParameterMap = HashMap<String, DeltaFn>;

/// The plug-in contract for a G-code vocabulary
pub trait Dialect: Send + Sync {
    fn name(&self) -> &str;

    /// Names of the state vector axes, in order
    fn axis_names(&self) -> Vec<&str>;

    fn axis_count(&self) -> usize {
        self.axis_names().len()
    }

    fn commands(&self) -> CommandMap;

    fn parameters(&self) -> ParameterMap {
        ParameterMap::new()
    }

    /// Delta used for commands the dialect does not know
    fn fallback(&self) -> DeltaFn {
        zero_delta(self.axis_count())
    }
}

/// A delta function that ignores its parameters and changes nothing
pub fn zero_delta(axis_count: usize) -> DeltaFn {
    Arc::new(move |_params: &[Parameter]| StateVector::zero(axis_count))
}
