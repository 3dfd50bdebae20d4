//! Inline and block joiners.
//!
//! `Group` joins rendered children with a separator and stays inline;
//! `Lines` is its newline-joined block counterpart.

use markdown_loom_syntax::{SpecPart, parse_spec_part};

use crate::template::{FormatError, eval_spec};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub items: Vec<Value>,
    pub separator: String,
}

impl Group {
    pub fn new(items: Vec<Value>, separator: impl Into<String>) -> Self {
        Self {
            items,
            separator: separator.into(),
        }
    }

    /// A group holding a list value's items, or the single value.
    pub fn from_value(value: Value) -> Self {
        Self::new(value.into_items(), "")
    }

    /// Splits `text` on `separator`, keeping it as the group separator.
    pub fn from_str(text: &str, separator: &str) -> Self {
        let items = text
            .split(separator)
            .map(|part| Value::Str(part.to_string()))
            .collect();
        Self::new(items, separator)
    }

    pub fn render(&self) -> String {
        self.items
            .iter()
            .map(Value::to_text)
            .collect::<Vec<_>>()
            .join(&self.separator)
    }

    /// Group directive interpretation: an optional leading separator
    /// (bare string, or `sep=`/`separator=` pair), then the remaining
    /// spec is applied to every item individually.
    pub fn format_with_spec(&self, spec: &str) -> Result<String, FormatError> {
        let mut separator = self.separator.clone();
        let (first, after_first) = parse_spec_part(spec);

        let item_spec = match &first {
            SpecPart::Name(name) if !name.is_empty() => {
                separator = name.clone();
                after_first
            }
            SpecPart::Pair(key, value) if key == "sep" || key == "separator" => {
                separator = value.to_text();
                after_first
            }
            _ => spec,
        };

        let mut rendered = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let item = match item {
                Value::List(inner) => {
                    Value::from(super::Node::Group(Group::new(inner.clone(), &separator)))
                }
                other => other.clone(),
            };
            rendered.push(eval_spec(item, item_spec)?);
        }

        Ok(rendered.join(&separator))
    }
}

/// Newline-joined block container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lines {
    pub items: Vec<Value>,
}

impl Lines {
    pub fn new(items: Vec<Value>) -> Self {
        Self { items }
    }

    pub fn render(&self) -> String {
        self.items
            .iter()
            .map(Value::to_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strs(items: &[&str]) -> Vec<Value> {
        items.iter().map(|s| Value::from(*s)).collect()
    }

    #[test]
    fn group_joins_with_separator() {
        assert_eq!(Group::new(strs(&["a", "b", "c"]), ", ").render(), "a, b, c");
        assert_eq!(Group::new(strs(&["a", "b"]), "").render(), "ab");
    }

    #[test]
    fn group_from_str_round_trips() {
        let g = Group::from_str("x;y;z", ";");
        assert_eq!(g.items.len(), 3);
        assert_eq!(g.render(), "x;y;z");
    }

    #[test]
    fn lines_join_with_newlines() {
        assert_eq!(Lines::new(strs(&["a", "b"])).render(), "a\nb");
    }

    #[test]
    fn spec_leading_name_sets_separator() {
        let g = Group::new(strs(&["a", "b"]), "");
        assert_eq!(g.format_with_spec(" - ").unwrap(), "a - b");
    }

    #[test]
    fn spec_sep_pair_sets_separator() {
        let g = Group::new(strs(&["a", "b"]), "");
        assert_eq!(g.format_with_spec("sep=; ").unwrap(), "a; b");
    }

    #[test]
    fn remaining_spec_applies_per_item() {
        let g = Group::new(strs(&["a", "b"]), "");
        assert_eq!(g.format_with_spec("|:bold").unwrap(), "**a**|**b**");
    }
}
