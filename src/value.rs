//! Contains the `JsonNode` tree, a native Rust representation of any
//! parsed JSON value, and `JsonNumber`.
use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// A JSON number, stored without precision loss where possible.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum JsonNumber {
    /// Integers that fit in `i64`.
    I64(i64),
    /// Positive integers above `i64::MAX`.
    U64(u64),
    /// Everything else: fractions, exponents, and integers too large for `u64`.
    F64(f64),
}

impl JsonNumber {
    pub fn as_f64(self) -> f64 {
        match self {
            JsonNumber::I64(n) => n as f64,
            JsonNumber::U64(n) => n as f64,
            JsonNumber::F64(n) => n,
        }
    }

    pub fn as_i64(self) -> Option<i64> {
        match self {
            JsonNumber::I64(n) => Some(n),
            JsonNumber::U64(n) => i64::try_from(n).ok(),
            JsonNumber::F64(_) => None,
        }
    }

    pub fn as_u64(self) -> Option<u64> {
        match self {
            JsonNumber::I64(n) => u64::try_from(n).ok(),
            JsonNumber::U64(n) => Some(n),
            JsonNumber::F64(_) => None,
        }
    }
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonNumber::I64(n) => write!(f, "{}", n),
            JsonNumber::U64(n) => write!(f, "{}", n),
            JsonNumber::F64(n) => write!(f, "{}", n),
        }
    }
}

/// One node of the parsed tree.
///
/// Objects keep their members in document order and keep duplicate keys;
/// [`JsonNode::get`] resolves duplicates to the last one.
#[derive(Debug, PartialEq, Clone)]
pub enum JsonNode {
    Object(Vec<(String, JsonNode)>),
    Array(Vec<JsonNode>),
    String(String),
    Number(JsonNumber),
    Bool(bool),
    Null,
}

impl JsonNode {
    /// Parses a complete JSON document. Same as [`crate::parse`].
    pub fn parse(input: &str) -> Result<JsonNode, Error> {
        crate::parse(input)
    }

    /// The JSON type name, for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            JsonNode::Object(_) => "object",
            JsonNode::Array(_) => "array",
            JsonNode::String(_) => "string",
            JsonNode::Number(_) => "number",
            JsonNode::Bool(_) => "boolean",
            JsonNode::Null => "null",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonNode::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonNode::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonNode::Array(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonNode::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonNode::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<JsonNumber> {
        match self {
            JsonNode::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(JsonNumber::as_f64)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(JsonNumber::as_i64)
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_number().and_then(JsonNumber::as_u64)
    }

    pub fn as_array(&self) -> Option<&[JsonNode]> {
        match self {
            JsonNode::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, JsonNode)]> {
        match self {
            JsonNode::Object(members) => Some(members),
            _ => None,
        }
    }

    /// The value of the last member named `key`. `None` for non-objects.
    pub fn get(&self, key: &str) -> Option<&JsonNode> {
        self.as_object()?
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Every value named `key`, in document order.
    pub fn get_all<'s>(&'s self, key: &'s str) -> impl Iterator<Item = &'s JsonNode> + 's {
        self.as_object()
            .unwrap_or_default()
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// The array element at `index`. `None` for non-arrays.
    pub fn get_index(&self, index: usize) -> Option<&JsonNode> {
        self.as_array()?.get(index)
    }

    /// Number of members or elements; 0 for scalars.
    pub fn len(&self) -> usize {
        match self {
            JsonNode::Object(members) => members.len(),
            JsonNode::Array(items) => items.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromStr for JsonNode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}
