//! The erased value flowing through the template dispatcher.

use crate::nodes::Node;

/// Stand-in produced when a replacement field cannot be resolved
/// (missing binding) or resolves to file contents. Carries a deferred
/// conversion that is applied to the final text instead of raising.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Placeholder {
    pub text: String,
    pub conversion: Option<char>,
}

impl Placeholder {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            conversion: None,
        }
    }
}

/// A value a node constructor can be fed with: template bindings,
/// container items and intermediate dispatch results are all `Value`s.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Node(Box<Node>),
    List(Vec<Value>),
    /// Unresolved binding; renders as the literal field name.
    Missing(Placeholder),
    /// Contents of a file referenced as `{[path]}`.
    FileContents(Placeholder),
}

impl Value {
    /// Parse a string binding, promoting numeric text to `Int`/`Float`.
    pub fn from_auto(text: &str) -> Value {
        if let Ok(n) = text.parse::<i64>() {
            return Value::Int(n);
        }
        if let Ok(f) = text.parse::<f64>() {
            return Value::Float(f);
        }
        Value::Str(text.to_string())
    }

    /// Textual form. Block nodes keep their surrounding blank lines so a
    /// node spliced into flowing text stays separated.
    pub fn to_text(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Node(node) => node.display_text(),
            Value::List(items) => items
                .iter()
                .map(Value::to_text)
                .collect::<Vec<_>>()
                .join(", "),
            Value::Missing(p) | Value::FileContents(p) => p.text.clone(),
        }
    }

    /// Splits a list value into its items; any other value is a single
    /// item. Containers are filled through this.
    pub fn into_items(self) -> Vec<Value> {
        match self {
            Value::List(items) => items,
            other => vec![other],
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Str(String::new())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(Box::new(node))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}
