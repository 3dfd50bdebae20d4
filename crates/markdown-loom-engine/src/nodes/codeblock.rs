//! Fenced code blocks.

use crate::textutil::backtick_count;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeBlock {
    pub items: Vec<Value>,
    pub language: String,
}

impl CodeBlock {
    pub fn new(items: Vec<Value>, language: impl Into<String>) -> Self {
        Self {
            items,
            language: language.into(),
        }
    }

    pub fn render(&self) -> String {
        let contents = self
            .items
            .iter()
            .map(Value::to_text)
            .collect::<Vec<_>>()
            .join("\n");

        let fence = "`".repeat(backtick_count(&contents, 3));

        let mut out = fence.clone();
        // Language tag sits directly after the opening fence, no space.
        out.push_str(&self.language);
        out.push('\n');
        out.push_str(&contents);
        out.push('\n');
        out.push_str(&fence);
        out
    }
}
