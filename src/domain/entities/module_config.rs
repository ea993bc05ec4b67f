//! ModuleConfig entity - the exact input of one generator run

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of generator module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Optional feature layered on top of a generated project
    Extension,
    /// Part of every generated project
    Core,
    /// Project skeleton
    Starter,
}

impl ModuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleKind::Extension => "extension",
            ModuleKind::Core => "core",
            ModuleKind::Starter => "starter",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a generator-specific field toggle (scalars only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl FieldValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

/// Configuration of one module, forwarded verbatim to the generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleConfig {
    /// Instance identifier of the module inside the generated project
    pub module_id: String,
    pub kind: ModuleKind,
    #[serde(rename = "type")]
    pub module_type: String,
    /// Backend stacks to emit, in declaration order
    #[serde(default)]
    pub providers: Vec<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub field_values: BTreeMap<String, FieldValue>,
}

fn default_true() -> bool {
    true
}

impl ModuleConfig {
    pub fn new(
        module_id: impl Into<String>,
        kind: ModuleKind,
        module_type: impl Into<String>,
    ) -> Self {
        Self {
            module_id: module_id.into(),
            kind,
            module_type: module_type.into(),
            providers: Vec::new(),
            enabled: true,
            field_values: BTreeMap::new(),
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.providers.push(provider.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.field_values.insert(key.into(), value.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.field_values.get(key)
    }

    /// Boolean toggle; absent or non-boolean values read as `false`
    pub fn flag(&self, key: &str) -> bool {
        self.field(key).and_then(FieldValue::as_bool).unwrap_or(false)
    }

    pub fn has_provider(&self, provider: &str) -> bool {
        self.providers.iter().any(|p| p == provider)
    }
}
