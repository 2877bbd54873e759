//! Typed options store
//!
//! Options are declared once with a default and keep that kind forever.
//! Names are case-insensitive. Anything not registered is an error to read or
//! write; a collaborator asking for an undeclared option is a wiring bug.

use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKind {
    Bool,
    Str,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Bool => write!(f, "boolean"),
            OptionKind::Str => write!(f, "string"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Str(String),
}

impl OptionValue {
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionValue::Bool(_) => OptionKind::Bool,
            OptionValue::Str(_) => OptionKind::Str,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Str(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    #[error("No such option: {0}")]
    Unregistered(String),

    #[error("Option '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("Option '{name}' is a {expected} option")]
    WrongKind { name: String, expected: OptionKind },
}

#[derive(Debug, Default)]
pub struct Options {
    values: BTreeMap<String, OptionValue>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// The options every part of the application relies on, with their
    /// built-in defaults. The default script overrides the values.
    pub fn with_defaults() -> Self {
        let mut options = Self::new();
        for (name, default) in [
            ("center", OptionValue::Bool(false)),
            ("columns", OptionValue::Str(String::new())),
            ("sort", OptionValue::Str(String::new())),
            ("topbar", OptionValue::Str(String::new())),
        ] {
            // Names above are distinct, registration cannot collide.
            let _ = options.register(name, default);
        }
        options
    }

    pub fn register(&mut self, name: &str, default: OptionValue) -> Result<(), OptionError> {
        let key = name.to_lowercase();
        if self.values.contains_key(&key) {
            return Err(OptionError::AlreadyRegistered(key));
        }
        self.values.insert(key, default);
        Ok(())
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.values.contains_key(&name.to_lowercase())
    }

    pub fn get(&self, name: &str) -> Result<&OptionValue, OptionError> {
        self.values
            .get(&name.to_lowercase())
            .ok_or_else(|| OptionError::Unregistered(name.to_string()))
    }

    pub fn kind(&self, name: &str) -> Result<OptionKind, OptionError> {
        self.get(name).map(OptionValue::kind)
    }

    /// Replace a value. The new value must be of the registered kind.
    pub fn set(&mut self, name: &str, value: OptionValue) -> Result<(), OptionError> {
        let slot = self
            .values
            .get_mut(&name.to_lowercase())
            .ok_or_else(|| OptionError::Unregistered(name.to_string()))?;

        if slot.kind() != value.kind() {
            return Err(OptionError::WrongKind {
                name: name.to_string(),
                expected: slot.kind(),
            });
        }
        tracing::debug!(option = name, value = %value, "Option set");
        *slot = value;
        Ok(())
    }

    pub fn bool_value(&self, name: &str) -> Result<bool, OptionError> {
        match self.get(name)? {
            OptionValue::Bool(b) => Ok(*b),
            OptionValue::Str(_) => Err(OptionError::WrongKind {
                name: name.to_string(),
                expected: OptionKind::Str,
            }),
        }
    }

    pub fn string_value(&self, name: &str) -> Result<&str, OptionError> {
        match self.get(name)? {
            OptionValue::Str(s) => Ok(s),
            OptionValue::Bool(_) => Err(OptionError::WrongKind {
                name: name.to_string(),
                expected: OptionKind::Bool,
            }),
        }
    }

    /// Comma-separated string option split into its non-empty parts.
    pub fn list_value(&self, name: &str) -> Result<Vec<String>, OptionError> {
        Ok(self
            .string_value(name)?
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect())
    }
}
