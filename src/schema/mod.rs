//! Declarative configuration schemas.
//!
//! A [`Schema`] is an ordered list of [`Field`]s, each pairing a key
//! (required or optional, with an optional default) with a validator, plus an
//! optional transform that runs after every field passed. Schemas nest by
//! using a function that validates against another schema as a field
//! validator.
//!
//! Schemas are strict: keys not declared by a field are rejected.

use std::fmt;

use serde_json::{Map, Value};

use crate::core::errors::ConfigError;

/// Validates (and possibly normalizes) a single value.
pub type Validator = fn(&Value, &ConfigPath) -> Result<Value, ConfigError>;

/// Post-validation step applied to the whole validated mapping.
pub type Transform = fn(Map<String, Value>, &ConfigPath) -> Result<Map<String, Value>, ConfigError>;

/// Location of a value inside the configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPath(Vec<String>);

impl ConfigPath {
    /// The top of the configuration tree.
    pub fn root() -> Self {
        ConfigPath(Vec::new())
    }

    /// Path of a child key.
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        ConfigPath(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" -> "))
    }
}

/// How a field's key must appear in the input.
#[derive(Debug, Clone, Copy)]
pub enum Key {
    /// Must be present.
    Required(&'static str),
    /// May be absent; if a default is given it is validated in place of the
    /// missing value.
    Optional {
        name: &'static str,
        default: Option<fn() -> Value>,
    },
}

impl Key {
    pub fn name(&self) -> &'static str {
        match self {
            Key::Required(name) => name,
            Key::Optional { name, .. } => name,
        }
    }
}

/// A single schema entry.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub key: Key,
    pub validator: Validator,
}

impl Field {
    /// A key that must be present.
    pub fn required(name: &'static str, validator: Validator) -> Self {
        Field {
            key: Key::Required(name),
            validator,
        }
    }

    /// A key that may be omitted.
    pub fn optional(name: &'static str, validator: Validator) -> Self {
        Field {
            key: Key::Optional {
                name,
                default: None,
            },
            validator,
        }
    }

    /// Give an optional key a default value.
    pub fn with_default(mut self, default: fn() -> Value) -> Self {
        if let Key::Optional { name, .. } = self.key {
            self.key = Key::Optional {
                name,
                default: Some(default),
            };
        }
        self
    }
}

/// An ordered list of fields plus an optional post-validation transform.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<Field>,
    transform: Option<Transform>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Schema {
            fields,
            transform: None,
        }
    }

    /// Run `transform` on the validated mapping.
    pub fn then(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Names of all declared keys, in declaration order.
    pub fn keys(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|f| f.key.name().to_string())
            .collect()
    }

    /// Validate `value` located at `path`.
    ///
    /// The value must be a mapping. Fields are checked in declaration order
    /// and the first failure is returned.
    pub fn validate(&self, value: &Value, path: &ConfigPath) -> Result<Map<String, Value>, ConfigError> {
        let input = value.as_object().ok_or_else(|| ConfigError::InvalidType {
            path: path.clone(),
            expected: "a mapping",
            found: type_name(value),
        })?;

        if let Some(unknown) = input
            .keys()
            .find(|k| !self.fields.iter().any(|f| f.key.name() == k.as_str()))
        {
            return Err(ConfigError::UnknownKey {
                path: path.clone(),
                key: unknown.clone(),
                allowed: self.keys(),
            });
        }

        let mut output = Map::new();
        for field in &self.fields {
            let name = field.key.name();
            let field_path = path.join(name);

            let raw = match (input.get(name), field.key) {
                (Some(v), _) => v.clone(),
                (None, Key::Required(_)) => {
                    return Err(ConfigError::MissingKey {
                        path: path.clone(),
                        key: name.to_string(),
                    });
                }
                (None, Key::Optional { default: Some(default), .. }) => default(),
                (None, Key::Optional { default: None, .. }) => continue,
            };

            let validated = (field.validator)(&raw, &field_path)?;
            output.insert(name.to_string(), validated);
        }

        match self.transform {
            Some(transform) => transform(output, path),
            None => Ok(output),
        }
    }
}

/// Accept only string values; numbers and booleans are not coerced.
pub fn string_strict(value: &Value, path: &ConfigPath) -> Result<Value, ConfigError> {
    match value {
        Value::String(_) => Ok(value.clone()),
        other => Err(ConfigError::InvalidType {
            path: path.clone(),
            expected: "a string",
            found: type_name(other),
        }),
    }
}

/// Human-readable name of a value's type, used in error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

/// Default for optional nested blocks.
pub fn empty_mapping() -> Value {
    Value::Object(Map::new())
}
