//! The JSON document model and its two text emitters.
//!
//! [`JsonValue`] is a tagged sum type rather than an open class hierarchy:
//! every variant is matched exhaustively by the emitters, and integers are
//! kept separate from doubles (the parser classifies numeric literals, see
//! [`crate::tokenizer`]). Objects are insertion-ordered property lists, not
//! maps — duplicate names are permitted and lookup is a linear,
//! case-insensitive scan.
//!
//! # Raw strings
//!
//! String payloads hold the source text between the quotes verbatim: escape
//! sequences are *not* decoded, and the emitters write the payload back
//! without re-escaping. A document parsed from valid JSON therefore emits
//! valid JSON, byte-compatible with its source strings.
//!
//! # Key design decisions
//!
//! - **Compact emitter**: empty containers render exactly `{}` / `[]`;
//!   otherwise elements are comma-joined in insertion order with no added
//!   whitespace, object entries as `"name":value`.
//! - **Pretty emitter**: tab indentation, object entries as `"name" : value`.
//!   The array layout is intentionally asymmetric (items and the closing
//!   bracket sit at the array's own depth, one level shallower than object
//!   members) — downstream fixtures depend on this exact shape, so it must
//!   be reproduced bit-for-bit.

use crate::error::{JsonError, Result};

/// A single name/value pair owned by an object, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonProperty {
    pub name: String,
    pub value: JsonValue,
}

/// A JSON document value.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    /// Raw text between the source quotes; escapes preserved undecoded.
    String(String),
    Array(Vec<JsonValue>),
    /// Properties in insertion order; duplicate names permitted.
    Object(Vec<JsonProperty>),
}

impl JsonValue {
    /// Create an empty array value.
    pub fn array() -> Self {
        JsonValue::Array(Vec::new())
    }

    /// Create an empty object value.
    pub fn object() -> Self {
        JsonValue::Object(Vec::new())
    }

    /// The variant name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "bool",
            JsonValue::Integer(_) => "integer",
            JsonValue::Double(_) => "double",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, JsonValue::Bool(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, JsonValue::Integer(_))
    }

    pub fn is_double(&self) -> bool {
        matches!(self, JsonValue::Double(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    fn mismatch(&self, expected: &'static str) -> JsonError {
        JsonError::VariantMismatch {
            expected,
            found: self.kind(),
        }
    }

    /// The boolean payload, or `VariantMismatch`.
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            JsonValue::Bool(b) => Ok(*b),
            other => Err(other.mismatch("bool")),
        }
    }

    /// The 64-bit integer payload, or `VariantMismatch`.
    pub fn as_integer(&self) -> Result<i64> {
        match self {
            JsonValue::Integer(i) => Ok(*i),
            other => Err(other.mismatch("integer")),
        }
    }

    /// The 64-bit floating payload, or `VariantMismatch`.
    pub fn as_double(&self) -> Result<f64> {
        match self {
            JsonValue::Double(d) => Ok(*d),
            other => Err(other.mismatch("double")),
        }
    }

    /// The raw string payload, or `VariantMismatch`.
    pub fn as_str(&self) -> Result<&str> {
        match self {
            JsonValue::String(s) => Ok(s),
            other => Err(other.mismatch("string")),
        }
    }

    /// The array items, or `VariantMismatch`.
    pub fn as_array(&self) -> Result<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Ok(items),
            other => Err(other.mismatch("array")),
        }
    }

    /// Mutable access to the array items, or `VariantMismatch`.
    pub fn as_array_mut(&mut self) -> Result<&mut Vec<JsonValue>> {
        match self {
            JsonValue::Array(items) => Ok(items),
            other => Err(other.mismatch("array")),
        }
    }

    /// The object properties, or `VariantMismatch`.
    pub fn as_object(&self) -> Result<&[JsonProperty]> {
        match self {
            JsonValue::Object(props) => Ok(props),
            other => Err(other.mismatch("object")),
        }
    }

    /// Mutable access to the object properties, or `VariantMismatch`.
    pub fn as_object_mut(&mut self) -> Result<&mut Vec<JsonProperty>> {
        match self {
            JsonValue::Object(props) => Ok(props),
            other => Err(other.mismatch("object")),
        }
    }

    /// Look up a property by name. The scan is linear, first match wins,
    /// and names compare ASCII case-insensitively. Returns `None` when the
    /// value is not an object or the property is absent.
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(props) => props
                .iter()
                .find(|p| p.name.eq_ignore_ascii_case(name))
                .map(|p| &p.value),
            _ => None,
        }
    }

    /// Whether the object has a property with the given name
    /// (case-insensitive).
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Append a property to an object value.
    pub fn insert(&mut self, name: impl Into<String>, value: JsonValue) -> Result<()> {
        self.as_object_mut()?.push(JsonProperty {
            name: name.into(),
            value,
        });
        Ok(())
    }

    /// Append an item to an array value.
    pub fn push(&mut self, value: JsonValue) -> Result<()> {
        self.as_array_mut()?.push(value);
        Ok(())
    }

    /// Render the document as text: compact by default, tab-indented when
    /// `pretty` is set.
    pub fn to_text(&self, pretty: bool) -> String {
        let mut out = String::new();
        if pretty {
            self.write_pretty(&mut out, 0);
        } else {
            self.write_compact(&mut out);
        }
        out
    }

    fn write_compact(&self, out: &mut String) {
        match self {
            JsonValue::Null => out.push_str("null"),
            JsonValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            JsonValue::Integer(i) => out.push_str(&i.to_string()),
            JsonValue::Double(d) => out.push_str(&d.to_string()),
            JsonValue::String(s) => {
                out.push('"');
                out.push_str(s);
                out.push('"');
            }
            JsonValue::Array(items) => {
                if items.is_empty() {
                    out.push_str("[]");
                    return;
                }
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.write_compact(out);
                }
                out.push(']');
            }
            JsonValue::Object(props) => {
                if props.is_empty() {
                    out.push_str("{}");
                    return;
                }
                out.push('{');
                for (i, prop) in props.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push('"');
                    out.push_str(&prop.name);
                    out.push_str("\":");
                    prop.value.write_compact(out);
                }
                out.push('}');
            }
        }
    }

    /// Pretty-print at the given depth. Objects indent members one level
    /// deeper and close at their own depth; arrays place items *and* the
    /// closing bracket at the array's depth. Not symmetric, but the shape is
    /// pinned by compatibility fixtures.
    fn write_pretty(&self, out: &mut String, depth: usize) {
        match self {
            JsonValue::Array(items) => {
                if items.is_empty() {
                    out.push_str("[]");
                    return;
                }
                out.push_str("[\n");
                push_tabs(out, depth);
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(",\n");
                        push_tabs(out, depth);
                    }
                    item.write_pretty(out, depth + 1);
                }
                out.push('\n');
                push_tabs(out, depth);
                out.push(']');
            }
            JsonValue::Object(props) => {
                if props.is_empty() {
                    out.push_str("{}");
                    return;
                }
                out.push_str("{\n");
                for (i, prop) in props.iter().enumerate() {
                    if i > 0 {
                        out.push_str(",\n");
                    }
                    push_tabs(out, depth + 1);
                    out.push('"');
                    out.push_str(&prop.name);
                    out.push_str("\" : ");
                    prop.value.write_pretty(out, depth + 1);
                }
                out.push('\n');
                push_tabs(out, depth);
                out.push('}');
            }
            // Leaves render identically in both modes
            leaf => leaf.write_compact(out),
        }
    }
}

fn push_tabs(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Bool(b)
    }
}

impl From<i64> for JsonValue {
    fn from(i: i64) -> Self {
        JsonValue::Integer(i)
    }
}

impl From<i32> for JsonValue {
    fn from(i: i32) -> Self {
        JsonValue::Integer(i64::from(i))
    }
}

impl From<f64> for JsonValue {
    fn from(d: f64) -> Self {
        JsonValue::Double(d)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s)
    }
}

impl std::fmt::Display for JsonValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text(false))
    }
}
