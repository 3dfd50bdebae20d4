//! Blockquotes, including nested ones.

use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockQuote {
    pub items: Vec<Value>,
    pub separator: String,
}

impl BlockQuote {
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items,
            separator: String::new(),
        }
    }

    pub fn from_value(value: Value) -> Self {
        Self::new(value.into_items())
    }

    pub fn render(&self) -> String {
        let inner = self
            .items
            .iter()
            .map(Value::to_text)
            .collect::<Vec<_>>()
            .join(&self.separator);

        inner
            .lines()
            .map(|line| {
                if line.starts_with('>') {
                    // Already quoted: deepen without the extra space so
                    // nesting stacks as ">>".
                    format!(">{line}")
                } else if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
