//! Runtime values produced by the evaluator.

use crate::env::Environment;
use serde::{Serialize, Serializer};
use sprout_types::ast::Block;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A Sprout runtime value.
///
/// Values are produced only by the evaluator; the syntax tree never holds
/// one except inside `Literal.value`.
#[derive(Debug, Clone)]
pub enum Value {
    /// Floating point number — the single numeric type.
    Number(f64),
    Str(String),
    Bool(bool),
    Null,
    /// Ordered list.
    List(Vec<Value>),
    /// String-keyed record; insertion order is irrelevant.
    Object(HashMap<String, Value>),
    /// A function with its captured environment.
    Function(Rc<FunctionValue>),
}

/// A function value: declaration data plus the environment captured by
/// reference at the definition site.
pub struct FunctionValue {
    pub name: String,
    /// Ordered parameter names.
    pub params: Vec<String>,
    /// Shared with the `FuncDecl` node the value was created from.
    pub body: Rc<Block>,
    /// The defining scope. Shared, never copied — later mutations of the
    /// scope are visible through the closure.
    pub env: Rc<Environment>,
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The captured environment can reach this value again; keep Debug shallow.
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl Value {
    /// The value's type name, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Null => "null",
            Value::List(_) => "list",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }

    /// Host-logical truthiness: `false`, `0`, `NaN`, `""` and `null` are
    /// falsy; everything else (empty lists and objects included) is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Null => false,
            Value::List(_) | Value::Object(_) | Value::Function(_) => true,
        }
    }
}

/// Structural equality. NaN is never equal to itself; functions are never
/// equal to anything, themselves included.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k) == Some(v))
            }
            _ => false,
        }
    }
}

/// The printed representation used by `show` and string concatenation.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Value::Str(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "null"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Object(map) => {
                write!(f, "{{ ")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, " }}")
            }
            Value::Function(func) => write!(f, "<function {}>", func.name),
        }
    }
}

/// Values serialize into the execution-result wire form. Functions have no
/// data representation and serialize as their display marker.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Null => serializer.serialize_unit(),
            Value::List(items) => serializer.collect_seq(items),
            Value::Object(map) => serializer.collect_map(map),
            Value::Function(func) => {
                serializer.serialize_str(&format!("<function {}>", func.name))
            }
        }
    }
}
