//! Optional-field accessor over a JSON tree.

use serde_json::Value;

/// A position in a JSON tree that may not exist.
///
/// Every accessor takes its default explicitly, so a missing key, a `null`
/// and a value of the wrong type all read the same way.
#[derive(Clone, Copy, Debug, Default)]
pub struct Node<'a>(Option<&'a Value>);

impl<'a> Node<'a> {
    pub const MISSING: Node<'static> = Node(None);

    #[must_use]
    pub fn new(value: &'a Value) -> Self {
        Node(Some(value))
    }

    #[must_use]
    pub fn raw(self) -> Option<&'a Value> {
        self.0
    }

    /// Object member `key`, or a missing node.
    #[must_use]
    pub fn get(self, key: &str) -> Node<'a> {
        Node(self.0.and_then(|v| v.as_object()).and_then(|m| m.get(key)))
    }

    /// First of `keys` that is present.
    #[must_use]
    pub fn get_any(self, keys: &[&str]) -> Node<'a> {
        keys.iter()
            .map(|k| self.get(k))
            .find(|n| n.is_present())
            .unwrap_or_default()
    }

    /// Exists and is not `null`.
    #[must_use]
    pub fn is_present(self) -> bool {
        matches!(self.0, Some(v) if !v.is_null())
    }

    #[must_use]
    pub fn is_object(self) -> bool {
        matches!(self.0, Some(Value::Object(_)))
    }

    #[must_use]
    pub fn as_f64(self) -> Option<f64> {
        match self.0? {
            Value::Number(n) => n.as_f64(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn f32_or(self, default: f32) -> f32 {
        self.as_f64().map_or(default, |v| v as f32)
    }

    /// Integer view; fractional numbers truncate toward zero.
    #[must_use]
    pub fn i64_or(self, default: i64) -> i64 {
        match self.0 {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                .unwrap_or(default),
            _ => self
                .as_f64()
                .filter(|f| f.is_finite())
                .map_or(default, |f| f as i64),
        }
    }

    #[must_use]
    pub fn as_bool(self) -> Option<bool> {
        match self.0? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|f| f != 0.0),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Some(true),
                "false" | "0" | "no" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    #[must_use]
    pub fn bool_or(self, default: bool) -> bool {
        self.as_bool().unwrap_or(default)
    }

    #[must_use]
    pub fn as_str(self) -> Option<&'a str> {
        self.0.and_then(Value::as_str)
    }

    #[must_use]
    pub fn str_or(self, default: &'a str) -> &'a str {
        self.as_str().unwrap_or(default)
    }

    /// Array elements; empty for anything that is not an array.
    pub fn items(self) -> impl Iterator<Item = Node<'a>> + Clone {
        self.0
            .and_then(Value::as_array)
            .map(|a| a.as_slice())
            .unwrap_or_default()
            .iter()
            .map(Node::new)
    }

    /// Array length, 0 for non-arrays.
    #[must_use]
    pub fn count(self) -> usize {
        self.0.and_then(Value::as_array).map_or(0, Vec::len)
    }

    /// Identifier of an entity node: the node itself when it is a string,
    /// else its `id`, else its `name`.
    #[must_use]
    pub fn ident(self) -> &'a str {
        if let Some(s) = self.as_str() {
            return s;
        }
        self.get("id")
            .as_str()
            .filter(|s| !s.is_empty())
            .or_else(|| self.get("name").as_str())
            .unwrap_or("")
    }
}
