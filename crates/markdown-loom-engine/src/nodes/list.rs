//! Bullet and numbered lists.

use crate::textutil::indent;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub items: Vec<Value>,
    pub ordered: bool,
    pub start: i64,
    pub marker: String,
}

impl List {
    pub fn new(items: Vec<Value>, ordered: bool) -> Self {
        Self {
            items,
            ordered,
            start: 1,
            marker: "-".to_string(),
        }
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.items.len());
        // Single shared counter; block children neither get a marker nor
        // advance it.
        let mut index = self.start;

        for item in &self.items {
            match item {
                Value::Node(node) if node.is_block() => {
                    lines.push(indent(&node.display_text(), 4));
                }
                other => {
                    let marker = if self.ordered {
                        let m = format!("{index}.");
                        index += 1;
                        m
                    } else {
                        self.marker.clone()
                    };
                    lines.push(format!("{marker} {}", other.to_text()));
                }
            }
        }

        lines.join("\n")
    }
}

impl Default for List {
    fn default() -> Self {
        Self::new(Vec::new(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{CodeBlock, Node};
    use pretty_assertions::assert_eq;

    fn strs(items: &[&str]) -> Vec<Value> {
        items.iter().map(|s| Value::from(*s)).collect()
    }

    #[test]
    fn unordered_uses_the_marker() {
        let list = List::new(strs(&["a", "b"]), false);
        assert_eq!(list.render(), "- a\n- b");
    }

    #[test]
    fn custom_marker() {
        let mut list = List::new(strs(&["a"]), false);
        list.marker = "*".to_string();
        assert_eq!(list.render(), "* a");
    }

    #[test]
    fn ordered_counts_from_start() {
        let mut list = List::new(strs(&["a", "b", "c"]), true);
        list.start = 3;
        assert_eq!(list.render(), "3. a\n4. b\n5. c");
    }

    #[test]
    fn block_children_are_indented_without_a_marker() {
        let block = Node::CodeBlock(CodeBlock::new(vec![Value::from("x")], ""));
        let list = List::new(
            vec![Value::from("a"), Value::from(block), Value::from("b")],
            true,
        );
        assert_eq!(
            list.render(),
            "1. a\n    \n    ```\n    x\n    ```\n\n2. b"
        );
    }
}
