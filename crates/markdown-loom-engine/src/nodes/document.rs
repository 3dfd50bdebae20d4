//! Top-level document container.

use pulldown_cmark::{Options, Parser, html};

use crate::value::Value;

/// Blank-line-joined sequence of top-level sections.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub sections: Vec<Value>,
}

impl Document {
    pub fn new(sections: Vec<Value>) -> Self {
        Self { sections }
    }

    pub fn push(&mut self, section: impl Into<Value>) {
        self.sections.push(section.into());
    }

    pub fn render(&self) -> String {
        self.sections
            .iter()
            .map(Value::to_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Renders the document's Markdown to HTML. Tables use the
    /// pulldown-cmark extension; fenced code and the rest are CommonMark.
    pub fn to_html(&self) -> String {
        let markdown = self.render();
        let parser = Parser::new_ext(&markdown, Options::ENABLE_TABLES);

        let mut out = String::new();
        html::push_html(&mut out, parser);
        out
    }
}
