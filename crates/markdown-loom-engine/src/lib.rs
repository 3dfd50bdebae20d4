//! # markdown-loom-engine
//!
//! Builds Markdown documents from a tree of typed content nodes and
//! evaluates the embedded format-spec template language.
//!
//! The two halves are decoupled: nodes can be constructed and rendered
//! directly, or built indirectly by [`template::format`], which resolves
//! replacement fields against bindings and chains registered node
//! constructors per the parsed spec.
//!
//! ```
//! use markdown_loom_engine::nodes::Heading;
//! use markdown_loom_engine::value::Value;
//!
//! let h = Heading::new(Value::from("Release notes"), 2);
//! assert_eq!(h.render(), "## Release notes");
//! ```

pub mod io;
pub mod nodes;
pub mod template;
pub mod textutil;
pub mod urlnorm;
pub mod value;

// Re-export key types for easier usage
pub use nodes::{
    Alignment, BlockQuote, CodeBlock, Document, Group, Heading, Lines, Link, List, Node, Table,
    TableError, Text,
};
pub use template::{FormatError, format, format_values, registry};
pub use value::{Placeholder, Value};
