//! The stack-based tree builder: one structural byte or token per step.
//!
//! Container nesting is tracked with an explicit stack of in-progress
//! parents instead of recursive descent, so nesting depth costs heap, not
//! call stack. The three pieces of state mirror the transition table:
//!
//! - `stack`: parents of the container being filled (`None` marks the root
//!   slot — the value pushed before the first `[` or `{`).
//! - `current`: the most recently opened container, or the completed root.
//! - `is_name`: the next string token is an object property name, not a
//!   value.
//!
//! A freshly named property carries a placeholder `Null` value; the
//! following value token (or closed sub-container) overwrites it. That is
//! the only mutation a value ever sees after construction.

use crate::error::{JsonError, Result};
use crate::tokenizer::{self, TokenScan};
use crate::value::{JsonProperty, JsonValue};

/// Outcome of one builder step over a buffer prefix.
pub(crate) enum Step {
    /// Consumed this many leading bytes (whitespace plus at most one token).
    Consumed(usize),
    /// Nothing more can be done with the available bytes; feed more input.
    NeedMore,
}

pub(crate) struct TreeBuilder {
    stack: Vec<Option<JsonValue>>,
    current: Option<JsonValue>,
    is_name: bool,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        TreeBuilder {
            stack: Vec::new(),
            current: None,
            is_name: false,
        }
    }

    /// Advance by one token. `at_end` means the byte source is exhausted, so
    /// a partial token is an error rather than a reason to wait.
    pub(crate) fn step(&mut self, buf: &[u8], at_end: bool) -> Result<Step> {
        let ws = tokenizer::trim(buf);
        if ws == buf.len() {
            // Trailing whitespace is consumable; an empty view needs input.
            return if ws > 0 {
                Ok(Step::Consumed(ws))
            } else {
                Ok(Step::NeedMore)
            };
        }

        let rest = &buf[ws..];
        match rest[0] {
            b'[' => {
                self.stack.push(self.current.take());
                self.current = Some(JsonValue::array());
                Ok(Step::Consumed(ws + 1))
            }
            b']' => {
                self.close_container(false)?;
                Ok(Step::Consumed(ws + 1))
            }
            b'{' => {
                self.stack.push(self.current.take());
                self.current = Some(JsonValue::object());
                self.is_name = true;
                Ok(Step::Consumed(ws + 1))
            }
            b'}' => {
                self.close_container(true)?;
                Ok(Step::Consumed(ws + 1))
            }
            b',' => {
                // Inside an object the next token is a property name;
                // inside an array it is a value.
                self.is_name = matches!(self.current, Some(JsonValue::Object(_)));
                Ok(Step::Consumed(ws + 1))
            }
            b':' => {
                self.is_name = false;
                Ok(Step::Consumed(ws + 1))
            }
            b'"' => match tokenizer::scan_string(rest) {
                Some((end, consumed)) => {
                    self.on_string(&rest[1..end])?;
                    Ok(Step::Consumed(ws + consumed))
                }
                None if at_end => Err(JsonError::unterminated("input ended inside a string")),
                None => Ok(Step::NeedMore),
            },
            b if tokenizer::is_numeric(b) => match tokenizer::scan_number(rest, at_end)? {
                TokenScan::Complete(value, consumed) => {
                    self.attach_value(value)?;
                    Ok(Step::Consumed(ws + consumed))
                }
                TokenScan::Partial => Ok(Step::NeedMore),
            },
            b'n' | b't' | b'f' => match tokenizer::scan_literal(rest, at_end)? {
                TokenScan::Complete(value, consumed) => {
                    self.attach_value(value)?;
                    Ok(Step::Consumed(ws + consumed))
                }
                TokenScan::Partial => Ok(Step::NeedMore),
            },
            other => Err(JsonError::malformed(format!(
                "unexpected byte '{}'",
                other as char
            ))),
        }
    }

    /// Finish the parse: the stack must be fully unwound and a root value
    /// present.
    pub(crate) fn finish(self) -> Result<JsonValue> {
        if !self.stack.is_empty() {
            return Err(JsonError::malformed(format!(
                "input ended with {} unclosed container(s)",
                self.stack.len()
            )));
        }
        self.current
            .ok_or_else(|| JsonError::malformed("input contained no JSON value"))
    }

    /// Handle a completed string token: a property name when expected, a
    /// plain value otherwise.
    fn on_string(&mut self, raw: &[u8]) -> Result<()> {
        let text = std::str::from_utf8(raw)
            .map_err(|_| JsonError::malformed("string is not valid UTF-8"))?
            .to_string();

        if self.is_name {
            match &mut self.current {
                Some(JsonValue::Object(props)) => {
                    props.push(JsonProperty {
                        name: text,
                        value: JsonValue::Null,
                    });
                    self.is_name = false;
                    Ok(())
                }
                _ => Err(JsonError::malformed(
                    "property name without an enclosing object",
                )),
            }
        } else {
            self.attach_value(JsonValue::String(text))
        }
    }

    /// Attach a completed value into the current container: the root slot if
    /// nothing is open, an array's tail, or the pending property of an
    /// object.
    fn attach_value(&mut self, value: JsonValue) -> Result<()> {
        match &mut self.current {
            None => {
                self.current = Some(value);
                Ok(())
            }
            Some(JsonValue::Array(items)) => {
                items.push(value);
                Ok(())
            }
            Some(JsonValue::Object(props)) => match props.last_mut() {
                Some(prop) => {
                    prop.value = value;
                    Ok(())
                }
                None => Err(JsonError::malformed(
                    "value inside an object with no property name",
                )),
            },
            Some(other) => Err(JsonError::malformed(format!(
                "cannot attach a value to a {}",
                other.kind()
            ))),
        }
    }

    /// Close the current container (`object` selects `}` over `]`), attach
    /// it into its parent, and restore the parent as current.
    fn close_container(&mut self, object: bool) -> Result<()> {
        let child = match self.current.take() {
            Some(v @ JsonValue::Object(_)) if object => v,
            Some(v @ JsonValue::Array(_)) if !object => v,
            other => {
                self.current = other;
                return Err(JsonError::malformed(if object {
                    "'}' without a matching '{'"
                } else {
                    "']' without a matching '['"
                }));
            }
        };
        self.is_name = false;

        let parent = match self.stack.pop() {
            Some(p) => p,
            None => {
                self.current = Some(child);
                return Err(JsonError::malformed("unbalanced closing bracket"));
            }
        };

        match parent {
            None => {
                // The closed container is the root.
                self.current = Some(child);
            }
            Some(mut parent) => {
                match &mut parent {
                    JsonValue::Array(items) => items.push(child),
                    JsonValue::Object(props) => {
                        match props.last_mut() {
                            Some(prop) => prop.value = child,
                            None => {
                                return Err(JsonError::malformed(
                                    "container closed inside an object with no property name",
                                ))
                            }
                        }
                        // After `obj.prop = {...}`, a comma would introduce
                        // another property name.
                        if object {
                            self.is_name = true;
                        }
                    }
                    other => {
                        return Err(JsonError::malformed(format!(
                            "cannot attach a container to a {}",
                            other.kind()
                        )))
                    }
                }
                self.current = Some(parent);
            }
        }
        Ok(())
    }
}
