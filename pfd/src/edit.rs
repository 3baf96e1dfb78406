//! Copy-then-replace edits of PFD documents.
//!
//! A field is addressed with the key syntax of the form renderer: object keys
//! separated by dots, array elements by `[n]`, e.g.
//! `pfdDatas[0].apps.pfds[1].pfd.urls`. Edits never touch the input document;
//! they return a new one that must still decode as the same document type.

use crate::errors::{Result, SchemaError};
use crate::model::Document;
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    Key(String),
    Index(usize),
}

/// Parsed location of a field inside a JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Parses a path such as `pfdDatas[0].apps.allowedDelay`.
    ///
    /// Every dot-separated part starts with a non-empty key, optionally
    /// followed by one or more `[n]` indices.
    pub fn parse(path: &str) -> Result<Self> {
        let raw = path.trim();
        if raw.is_empty() {
            return Err(invalid_path(path, "path is empty"));
        }

        let mut segments = Vec::new();
        for part in raw.split('.') {
            let (key, mut rest) = match part.find('[') {
                Some(pos) => part.split_at(pos),
                None => (part, ""),
            };
            if key.is_empty() {
                return Err(invalid_path(path, "every part must start with a key"));
            }
            segments.push(PathSegment::Key(key.to_string()));

            while !rest.is_empty() {
                let (index, remainder) = rest
                    .strip_prefix('[')
                    .and_then(|r| r.split_once(']'))
                    .ok_or_else(|| invalid_path(path, "unbalanced brackets"))?;
                let index = index
                    .parse::<usize>()
                    .map_err(|_| invalid_path(path, "array index must be a number"))?;
                segments.push(PathSegment::Index(index));
                rest = remainder;
            }
        }

        Ok(FieldPath {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Writes `value` at this path inside `target`.
    ///
    /// Missing object keys are created. An index may address an existing
    /// element or the position right after the last one, which appends.
    fn set(&self, target: &mut JsonValue, value: JsonValue) -> Result<()> {
        let mut slot = target;

        for segment in &self.segments {
            slot = match segment {
                PathSegment::Key(key) => {
                    if slot.is_null() {
                        *slot = JsonValue::Object(Map::new());
                    }
                    let JsonValue::Object(map) = slot else {
                        return Err(invalid_path(&self.raw, &format!("`{key}` is not inside an object")));
                    };
                    map.entry(key.clone()).or_insert(JsonValue::Null)
                }
                PathSegment::Index(index) => {
                    if slot.is_null() {
                        *slot = JsonValue::Array(Vec::new());
                    }
                    let JsonValue::Array(items) = slot else {
                        return Err(invalid_path(&self.raw, &format!("[{index}] is not inside an array")));
                    };
                    if *index == items.len() {
                        items.push(JsonValue::Null);
                    }
                    let len = items.len();
                    items.get_mut(*index).ok_or_else(|| {
                        invalid_path(&self.raw, &format!("index {index} is out of bounds (length {len})"))
                    })?
                }
            };
        }

        *slot = value;
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self> {
        FieldPath::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A `path=value` pair as given on the command line.
///
/// The value is parsed as JSON when possible (`5`, `true`, `["a"]`), otherwise
/// it is taken as a plain string.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldAssignment {
    pub path: FieldPath,
    pub value: JsonValue,
}

impl FromStr for FieldAssignment {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self> {
        let (path, value) = s
            .split_once('=')
            .ok_or_else(|| invalid_path(s, "expected `path=value`"))?;

        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| JsonValue::String(value.to_string()));

        Ok(FieldAssignment {
            path: FieldPath::parse(path)?,
            value,
        })
    }
}

/// Returns a copy of `model` with the field at `path` set to `value`.
pub fn with_field<T: Document>(model: &T, path: &FieldPath, value: JsonValue) -> Result<T> {
    let mut document = model.to_value()?;
    path.set(&mut document, value)?;
    T::from_value(document)
}

/// Applies `assignments` in order, each on the result of the previous one.
pub fn with_fields<T: Document>(model: &T, assignments: &[FieldAssignment]) -> Result<T> {
    let mut document = model.to_value()?;
    for assignment in assignments {
        assignment.path.set(&mut document, assignment.value.clone())?;
    }

    if !assignments.is_empty() {
        tracing::debug!(count = assignments.len(), "Applied field assignments");
    }

    T::from_value(document)
}

fn invalid_path(path: &str, reason: &str) -> SchemaError {
    SchemaError::InvalidFieldPath(format!("{path}: {reason}"))
}
