//! Declarative input shapes and the shared validation routine
//!
//! Each tool declares its arguments once, as a static [`InputShape`]. The same
//! descriptor renders the JSON Schema advertised through `describe()` and
//! drives [`InputShape::validate`], which runs before any network access.

use crate::tools::ToolError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// Compiled field patterns, keyed by their source text
static PATTERNS: Lazy<Mutex<HashMap<&'static str, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Primitive type of a tool argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
}

impl FieldKind {
    fn schema_type(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
        }
    }
}

/// Value substituted for an omitted optional argument
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDefault {
    Str(&'static str),
    Int(i64),
    Bool(bool),
}

impl FieldDefault {
    fn to_value(self) -> Value {
        match self {
            FieldDefault::Str(s) => Value::String(s.to_string()),
            FieldDefault::Int(n) => Value::from(n),
            FieldDefault::Bool(b) => Value::Bool(b),
        }
    }
}

/// Constraints checked after the type check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    /// Strip surrounding whitespace before the other string checks
    pub trim: bool,
    /// Reject strings that are empty or whitespace-only
    pub non_empty: bool,
    /// Regex the whole (trimmed) string must match
    pub pattern: Option<&'static str>,
    /// Caller-facing explanation used when `pattern` fails
    pub pattern_hint: Option<&'static str>,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
}

impl Constraints {
    pub const NONE: Self = Self {
        trim: false,
        non_empty: false,
        pattern: None,
        pattern_hint: None,
        minimum: None,
        maximum: None,
    };

    /// Trimmed, non-empty string
    pub const IDENTIFIER: Self = Self {
        trim: true,
        non_empty: true,
        ..Self::NONE
    };

    /// Non-blank string kept exactly as supplied
    pub const NON_BLANK: Self = Self {
        non_empty: true,
        ..Self::NONE
    };

    /// Surrounding whitespace stripped, empty allowed
    pub const TRIMMED: Self = Self {
        trim: true,
        ..Self::NONE
    };
}

/// One declared argument
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<FieldDefault>,
    pub constraints: Constraints,
    pub description: &'static str,
}

impl FieldSpec {
    fn reject<R: Into<String>>(&self, reason: R) -> ToolError {
        ToolError::validation(self.name, reason)
    }

    /// Type-check and constrain one present value, returning the value to keep
    fn check(&self, value: &Value) -> Result<Value, ToolError> {
        let c = &self.constraints;
        match self.kind {
            FieldKind::String => {
                let raw = value
                    .as_str()
                    .ok_or_else(|| self.reject(format!("expected string, got {}", json_type(value))))?;
                let s = if c.trim { raw.trim() } else { raw };

                if c.non_empty && raw.trim().is_empty() {
                    return Err(self.reject("must not be empty"));
                }
                if let Some(pattern) = c.pattern {
                    if !self.pattern_regex(pattern)?.is_match(s) {
                        return Err(self.reject(match c.pattern_hint {
                            Some(hint) => format!("{hint} (pattern {pattern})"),
                            None => format!("must match pattern {pattern}"),
                        }));
                    }
                }
                Ok(Value::String(s.to_string()))
            }
            FieldKind::Integer => {
                let n = as_integer(value).ok_or_else(|| {
                    self.reject(format!("expected integer, got {}", describe_value(value)))
                })?;
                if let Some(min) = c.minimum {
                    if n < min {
                        return Err(self.reject(format!("must be >= {min}, got {n}")));
                    }
                }
                if let Some(max) = c.maximum {
                    if n > max {
                        return Err(self.reject(format!("must be <= {max}, got {n}")));
                    }
                }
                Ok(Value::from(n))
            }
            FieldKind::Boolean => value
                .as_bool()
                .map(Value::Bool)
                .ok_or_else(|| self.reject(format!("expected boolean, got {}", json_type(value)))),
        }
    }

    fn pattern_regex(&self, pattern: &'static str) -> Result<Regex, ToolError> {
        compiled_pattern(pattern).map_err(|e| {
            ToolError::SchemaError(format!("invalid pattern for {}: {e}", self.name))
        })
    }

    fn to_schema(&self) -> Value {
        let c = &self.constraints;
        let mut property = Map::new();
        property.insert("type".into(), json!(self.kind.schema_type()));
        property.insert("description".into(), json!(self.description));
        if let Some(default) = self.default {
            property.insert("default".into(), default.to_value());
        }
        if c.non_empty {
            property.insert("minLength".into(), json!(1));
        }
        if let Some(pattern) = c.pattern {
            property.insert("pattern".into(), json!(pattern));
        }
        if let Some(min) = c.minimum {
            property.insert("minimum".into(), json!(min));
        }
        if let Some(max) = c.maximum {
            property.insert("maximum".into(), json!(max));
        }
        Value::Object(property)
    }
}

/// Static argument descriptor for one tool
#[derive(Debug, Clone, Copy)]
pub struct InputShape {
    pub fields: &'static [FieldSpec],
}

impl InputShape {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Render as a JSON Schema object for host runtimes
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), f.to_schema()))
            .collect();
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false
        })
    }

    /// Compile every field pattern, so a bad one fails at registration
    pub fn check_patterns(&self) -> Result<(), ToolError> {
        for spec in self.fields {
            if let Some(pattern) = spec.constraints.pattern {
                spec.pattern_regex(pattern)?;
            }
        }
        Ok(())
    }

    /// Check raw caller input against the shape, applying trims and defaults
    pub fn validate(&self, raw: &Value) -> Result<ValidatedInput, ToolError> {
        let empty = Map::new();
        let object = match raw {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                return Err(ToolError::validation(
                    "<input>",
                    format!("expected object, got {}", json_type(other)),
                ))
            }
        };

        if let Some(unknown) = object.keys().find(|key| self.field(key).is_none()) {
            return Err(ToolError::validation(unknown.as_str(), "unexpected field"));
        }

        let mut validated = Map::new();
        for spec in self.fields {
            let value = match object.get(spec.name) {
                None | Some(Value::Null) if !spec.required => match spec.default {
                    Some(default) => default.to_value(),
                    None => continue,
                },
                None | Some(Value::Null) => return Err(spec.reject("is required")),
                Some(value) => spec.check(value)?,
            };
            validated.insert(spec.name.to_string(), value);
        }

        Ok(ValidatedInput(validated))
    }
}

/// Caller arguments after shape-checking and defaulting
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput(Map<String, Value>);

impl ValidatedInput {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Deserialize into the tool's typed argument struct
    pub fn into_args<T: DeserializeOwned>(self) -> Result<T, ToolError> {
        serde_json::from_value(Value::Object(self.0)).map_err(|e| {
            ToolError::SchemaError(format!("validated input does not fit argument type: {e}"))
        })
    }
}

/// Wrap a pattern so it must match the whole string
fn anchored(pattern: &str) -> String {
    let inner = pattern.strip_prefix('^').unwrap_or(pattern);
    let inner = inner.strip_suffix('$').unwrap_or(inner);
    format!("^(?:{inner})$")
}

/// Compile a field pattern once and hand out cheap clones
fn compiled_pattern(pattern: &'static str) -> Result<Regex, regex::Error> {
    let mut cache = PATTERNS.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(re) = cache.get(pattern) {
        return Ok(re.clone());
    }
    let re = Regex::new(&anchored(pattern))?;
    cache.insert(pattern, re.clone());
    Ok(re)
}

/// Integral JSON number, accepting float encodings such as `2.0`
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() <= i64::MAX as f64 / 2.0 {
        Some(f as i64)
    } else {
        None
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        other => json_type(other).to_string(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
