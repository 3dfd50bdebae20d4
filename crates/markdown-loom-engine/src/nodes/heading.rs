//! ATX headings.

use std::ops::Add;

use super::{Group, Node};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    content: Value,
    level: u8,
}

impl Heading {
    /// Level is clamped to 1..=6 on construction; out-of-range values
    /// are never stored.
    pub fn new(content: Value, level: i64) -> Self {
        let mut heading = Self { content, level: 1 };
        heading.set_level(level);
        heading
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn set_level(&mut self, level: i64) {
        self.level = level.clamp(1, 6) as u8;
    }

    pub fn content(&self) -> &Value {
        &self.content
    }

    pub fn render(&self) -> String {
        format!("{} {}", "#".repeat(self.level as usize), self.content.to_text())
    }
}

impl Add<&str> for Heading {
    type Output = Heading;

    /// Concatenates content while preserving the level.
    fn add(self, rhs: &str) -> Heading {
        Heading {
            content: Value::Str(format!("{}{rhs}", self.content.to_text())),
            level: self.level,
        }
    }
}

impl Add<Node> for Heading {
    type Output = Heading;

    fn add(self, rhs: Node) -> Heading {
        let group = Group::new(vec![self.content, Value::from(rhs)], "");
        Heading {
            content: Value::from(Node::Group(group)),
            level: self.level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(-3, 1)]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(4, 4)]
    #[case(6, 6)]
    #[case(7, 6)]
    #[case(100, 6)]
    fn level_is_clamped(#[case] requested: i64, #[case] effective: u8) {
        assert_eq!(Heading::new(Value::from("x"), requested).level(), effective);
    }

    #[test]
    fn renders_hashes_then_content() {
        assert_eq!(Heading::new(Value::from("Title"), 3).render(), "### Title");
    }

    #[test]
    fn add_preserves_level() {
        let h = Heading::new(Value::from("Part "), 2) + "two";
        assert_eq!(h.render(), "## Part two");
    }
}
