//! Recursive tagged values produced by the spec scanner.

/// One parsed value inside a spec part.
///
/// `key=a` produces `Str("a")`, `key=a,b` produces a `List`, and
/// `key=sub=x` produces a `List` holding a `Pair`. The type is recursive
/// so `key=sub1=x,sub2=y` and deeper shapes are modelled uniformly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecValue {
    Str(String),
    List(Vec<SpecValue>),
    Pair(String, Box<SpecValue>),
}

impl SpecValue {
    /// The textual content if this is a plain string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SpecValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Flattens this value to display text, joining nested pairs with `=`
    /// and list entries with `,`.
    pub fn to_text(&self) -> String {
        match self {
            SpecValue::Str(s) => s.clone(),
            SpecValue::List(items) => items
                .iter()
                .map(SpecValue::to_text)
                .collect::<Vec<_>>()
                .join(","),
            SpecValue::Pair(key, value) => format!("{key}={}", value.to_text()),
        }
    }
}

/// One part of a spec: a bare name or a `key=value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecPart {
    Name(String),
    Pair(String, SpecValue),
}

impl SpecPart {
    /// The part's key: the bare name, or the left side of the `=`.
    pub fn key(&self) -> &str {
        match self {
            SpecPart::Name(name) => name,
            SpecPart::Pair(key, _) => key,
        }
    }

    pub fn value(&self) -> Option<&SpecValue> {
        match self {
            SpecPart::Name(_) => None,
            SpecPart::Pair(_, value) => Some(value),
        }
    }
}
