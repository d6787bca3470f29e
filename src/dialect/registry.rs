//! Dialect Registry
//!
//! Simple in-memory registry of the available dialects with one active
//! dialect. Dialects are added from Rust code or loaded from TOML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::dialect::{Dialect, Marlin, TomlDialect, Translator};

/// Name of the built-in default dialect
pub const DEFAULT_DIALECT: &str = "marlin";

const MODELINE_KEY: &str = "gcode_dialect=";

/// Simple in-memory dialect registry
#[derive(Clone, Default)]
pub struct DialectRegistry {
    dialects: HashMap<String, Arc<dyn Dialect>>,
    active_dialect: Option<String>,
}

impl std::fmt::Debug for DialectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialectRegistry")
            .field("dialects", &self.list_dialects())
            .field("active_dialect", &self.active_dialect)
            .finish()
    }
}

impl DialectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in dialects, with Marlin active
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.add_dialect(Marlin);
        registry.set_active_dialect(DEFAULT_DIALECT);
        registry
    }

    /// Add a dialect, replacing any dialect with the same name
    pub fn add_dialect<D: Dialect + 'static>(&mut self, dialect: D) {
        let name = dialect.name().to_string();
        if self.dialects.insert(name.clone(), Arc::new(dialect)).is_some() {
            log::info!("Dialect '{}' replaced", name);
        }
    }

    /// Set the active dialect
    pub fn set_active_dialect(&mut self, name: &str) -> bool {
        if self.dialects.contains_key(name) {
            self.active_dialect = Some(name.to_string());
            true
        } else {
            false
        }
    }

    /// Get the currently active dialect
    pub fn active_dialect(&self) -> Option<&dyn Dialect> {
        self.active_dialect
            .as_ref()
            .and_then(|name| self.get(name))
    }

    pub fn get(&self, name: &str) -> Option<&dyn Dialect> {
        self.dialects.get(name).map(|dialect| dialect.as_ref())
    }

    /// Translator for a named dialect
    pub fn translator(&self, name: &str) -> Option<Translator> {
        self.get(name).map(Translator::from_dialect)
    }

    /// List all available dialects, sorted by name
    pub fn list_dialects(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.dialects.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Load a single TOML dialect file and register it
    pub fn load_file(&mut self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dialect file: {}", path.display()))?;
        let dialect = TomlDialect::from_toml(&content)
            .with_context(|| format!("Failed to load dialect file: {}", path.display()))?;

        let name = dialect.name.clone();
        self.add_dialect(dialect);
        Ok(name)
    }

    /// Load every `*.toml` file of a directory
    ///
    /// A missing directory is not an error. Files that fail to load are
    /// logged and skipped. Returns the number of dialects loaded.
    pub fn load_directory(&mut self, dir: &Path) -> Result<usize> {
        if !dir.exists() {
            return Ok(0);
        }

        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read dialect directory: {}", dir.display()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) == Some("toml") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match self.load_file(&path) {
                Ok(name) => {
                    log::info!("Loaded dialect '{}' from {}", name, path.display());
                    loaded += 1;
                }
                Err(e) => log::warn!("{:#}", e),
            }
        }

        Ok(loaded)
    }

    /// Detect dialect from modeline in document content
    pub fn detect_modeline_dialect(&self, content: &str) -> Option<String> {
        // Check first and last few lines for modeline
        let lines: Vec<&str> = content.lines().collect();
        let check_lines: Vec<&str> = if lines.len() <= 10 {
            lines
        } else {
            let mut check = Vec::new();
            check.extend_from_slice(&lines[0..5]);
            check.extend_from_slice(&lines[lines.len() - 5..]);
            check
        };

        check_lines
            .into_iter()
            .filter_map(extract_dialect_from_modeline)
            .find(|name| self.dialects.contains_key(name))
    }
}

/// Extract dialect name from a modeline like `; gcode_dialect=marlin`
fn extract_dialect_from_modeline(line: &str) -> Option<String> {
    let start = line.find(MODELINE_KEY)?;
    let rest = &line[start + MODELINE_KEY.len()..];
    let end = rest
        .find(|c: char| c.is_whitespace() || c == ';' || c == '#')
        .unwrap_or(rest.len());
    let name = &rest[..end];

    if !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        Some(name.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOY: &str = r#"
[dialect]
name = "toy"
axes = ["x"]

[[commands]]
name = "G0"
parameters = [{ key = "X", axis = "x" }]
"#;

    #[test]
    fn test_registry_creation() {
        let registry = DialectRegistry::new();
        assert!(registry.list_dialects().is_empty());
        assert!(registry.active_dialect().is_none());
    }

    #[test]
    fn test_builtin_marlin_is_active() {
        let registry = DialectRegistry::with_builtin();
        assert_eq!(registry.list_dialects(), vec!["marlin"]);
        assert_eq!(registry.active_dialect().unwrap().name(), "marlin");
        assert_eq!(registry.translator("marlin").unwrap().axis_count(), 10);
    }

    #[test]
    fn test_add_and_activate_dialect() {
        let mut registry = DialectRegistry::with_builtin();
        registry.add_dialect(TomlDialect::from_toml(TOY).unwrap());

        assert!(registry.set_active_dialect("toy"));
        assert_eq!(registry.active_dialect().unwrap().axis_count(), 1);
        assert_eq!(registry.list_dialects(), vec!["marlin", "toy"]);
    }

    #[test]
    fn test_nonexistent_dialect() {
        let mut registry = DialectRegistry::with_builtin();
        assert!(!registry.set_active_dialect("nonexistent"));
        assert_eq!(registry.active_dialect().unwrap().name(), "marlin");
        assert!(registry.translator("nonexistent").is_none());
    }

    #[test]
    fn test_extract_modeline() {
        assert_eq!(
            extract_dialect_from_modeline("; gcode_dialect=marlin"),
            Some("marlin".to_string())
        );
        assert_eq!(
            extract_dialect_from_modeline("; vim: gcode_dialect=my-printer ;"),
            Some("my-printer".to_string())
        );
        assert_eq!(extract_dialect_from_modeline("; gcode_dialect="), None);
        assert_eq!(extract_dialect_from_modeline("G1 X10"), None);
    }

    #[test]
    fn test_detect_modeline_requires_registered_dialect() {
        let registry = DialectRegistry::with_builtin();
        assert_eq!(
            registry.detect_modeline_dialect("; gcode_dialect=marlin\nG1 X10"),
            Some("marlin".to_string())
        );
        assert_eq!(
            registry.detect_modeline_dialect("; gcode_dialect=reprap\nG1 X10"),
            None
        );
    }

    #[test]
    fn test_detect_modeline_at_end_of_long_file() {
        let registry = DialectRegistry::with_builtin();
        let mut content = "G1 X1\n".repeat(50);
        content.push_str("; gcode_dialect=marlin\n");
        assert_eq!(
            registry.detect_modeline_dialect(&content),
            Some("marlin".to_string())
        );

        let mut buried = "G1 X1\n".repeat(20);
        buried.push_str("; gcode_dialect=marlin\n");
        buried.push_str(&"G1 X1\n".repeat(20));
        assert_eq!(registry.detect_modeline_dialect(&buried), None);
    }
}
