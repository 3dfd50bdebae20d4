//! # markdown-loom-syntax
//!
//! Tokenizer for the format-spec mini-language embedded in markdown-loom
//! templates.
//!
//! A spec is the text that follows the `:` in a replacement field such as
//! `{data:table:sort=name:filter=age=\d+}`. It is a sequence of
//! colon-separated *parts*; each part is either a bare name or a
//! `key=value` pair, and values can themselves contain `,`-separated lists
//! and nested `sub=value` pairs:
//!
//! ```text
//! csv                      → Name("csv")
//! sort=name                → Pair("sort", Str("name"))
//! sort=name,age            → Pair("sort", List([Str("name"), Str("age")]))
//! filter=name=A.*          → Pair("filter", List([Pair("name", Str("A.*"))]))
//! ```
//!
//! The scanner is a single pass over the characters with quoting (`'`/`"`,
//! plus raw `r'...'` quoting where backslash loses its meaning), backslash
//! escapes, and nested-bracket tracking (`(`, `{`, `[`, `<` suspend all
//! delimiter handling until the matching closer). Malformed input is never
//! an error: unterminated quotes and brackets simply run to the end of the
//! string and the part is emitted with whatever was collected.
//!
//! ## Quick start
//!
//! ```
//! use markdown_loom_syntax::{parse_spec, SpecPart, SpecValue};
//!
//! let parts = parse_spec("table:sort=name");
//! assert_eq!(
//!     parts,
//!     vec![
//!         SpecPart::Name("table".to_string()),
//!         SpecPart::Pair("sort".to_string(), SpecValue::Str("name".to_string())),
//!     ]
//! );
//! ```

pub mod scanner;
pub mod value;

pub use scanner::{parse_spec, parse_spec_part};
pub use value::{SpecPart, SpecValue};
