//! The Markdown node model.
//!
//! Every variant serializes itself with [`Node::render`]; block variants
//! additionally get surrounding blank lines from [`Node::display_text`]
//! when spliced into larger text. Whether a variant is block or inline
//! is fixed per variant, never per instance.

pub mod blockquote;
pub mod codeblock;
pub mod document;
pub mod group;
pub mod heading;
pub mod link;
pub mod list;
pub mod table;
pub mod text;

pub use blockquote::BlockQuote;
pub use codeblock::CodeBlock;
pub use document::Document;
pub use group::{Group, Lines};
pub use heading::Heading;
pub use link::Link;
pub use list::List;
pub use table::{Alignment, Table, TableError};
pub use text::Text;

/// A typed unit of document content.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(Text),
    Heading(Heading),
    Link(Link),
    List(List),
    CodeBlock(CodeBlock),
    BlockQuote(BlockQuote),
    Group(Group),
    Lines(Lines),
    Document(Document),
    Table(Table),
    Rule,
}

impl Node {
    /// Serialize to Markdown text. Pure and deterministic.
    pub fn render(&self) -> String {
        match self {
            Node::Text(n) => n.render(),
            Node::Heading(n) => n.render(),
            Node::Link(n) => n.render(),
            Node::List(n) => n.render(),
            Node::CodeBlock(n) => n.render(),
            Node::BlockQuote(n) => n.render(),
            Node::Group(n) => n.render(),
            Node::Lines(n) => n.render(),
            Node::Document(n) => n.render(),
            Node::Table(n) => n.render(),
            Node::Rule => "---".to_string(),
        }
    }

    /// Block nodes render with a blank line above and below when
    /// embedded; inline nodes do not.
    pub fn is_block(&self) -> bool {
        match self {
            Node::Text(_) | Node::Link(_) | Node::Group(_) => false,
            Node::Heading(_)
            | Node::List(_)
            | Node::CodeBlock(_)
            | Node::BlockQuote(_)
            | Node::Lines(_)
            | Node::Document(_)
            | Node::Table(_)
            | Node::Rule => true,
        }
    }

    /// Rendered text with the block-type blank-line wrapping applied.
    pub fn display_text(&self) -> String {
        let text = self.render();
        if self.is_block() {
            format!("\n{text}\n")
        } else {
            text
        }
    }
}
