//! Inline text with bold/italic/code styling.

use std::ops::Add;

use super::{Group, Node};
use crate::textutil::{backtick_count, escape};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Text {
    pub content: Value,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

impl Text {
    pub fn new(content: Value) -> Self {
        Self {
            content,
            bold: false,
            italic: false,
            code: false,
        }
    }

    pub fn bold(content: Value) -> Self {
        Self {
            bold: true,
            ..Self::new(content)
        }
    }

    pub fn italic(content: Value) -> Self {
        Self {
            italic: true,
            ..Self::new(content)
        }
    }

    pub fn code(content: Value) -> Self {
        Self {
            code: true,
            ..Self::new(content)
        }
    }

    pub fn render(&self) -> String {
        // Literal `*` is escaped in raw content, but nested nodes are
        // trusted to have escaped themselves.
        let mut text = match &self.content {
            Value::Node(node) => node.display_text(),
            other => escape(&other.to_text(), "*"),
        };

        if self.code {
            let ticks = "`".repeat(backtick_count(&text, 1));
            let mut fenced = ticks.clone();
            if text.starts_with('`') {
                fenced.push(' ');
            }
            fenced.push_str(&text);
            if text.ends_with('`') {
                fenced.push(' ');
            }
            fenced.push_str(&ticks);
            text = fenced;
        }
        if self.bold {
            text = format!("**{text}**");
        }
        if self.italic {
            text = format!("*{text}*");
        }

        text
    }
}

impl Add<&str> for Text {
    type Output = Text;

    /// Concatenates raw content, keeping bold/italic styling.
    fn add(self, rhs: &str) -> Text {
        Text {
            content: Value::Str(format!("{}{rhs}", self.content.to_text())),
            bold: self.bold,
            italic: self.italic,
            code: false,
        }
    }
}

impl Add<Node> for Text {
    type Output = Group;

    fn add(self, rhs: Node) -> Group {
        Group::new(vec![Value::from(Node::Text(self)), Value::from(rhs)], "")
    }
}

impl Add<Text> for Text {
    type Output = Group;

    fn add(self, rhs: Text) -> Group {
        self + Node::Text(rhs)
    }
}
