//! Process-wide component registry.
//!
//! Maps lower-cased directive keys to node constructors. Built-ins are
//! installed on first access; callers may register additional components
//! during setup, before concurrent reads begin. Concurrent registration
//! is out of contract.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use thiserror::Error;

use markdown_loom_syntax::SpecValue;

use crate::nodes::{
    BlockQuote, CodeBlock, Document, Heading, Lines, Link, List, Node, Table, Text,
};
use crate::template::FormatError;
use crate::textutil::strbool;
use crate::value::Value;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("component name must not be empty")]
    InvalidName,
}

/// Arguments parsed out of a directive: `key=a,b` gives positional
/// strings, `key=sub=x` gives named values.
#[derive(Debug, Clone, Default)]
pub struct Args {
    pub positional: Vec<String>,
    pub named: Vec<(String, SpecValue)>,
}

impl Args {
    pub fn from_value(value: Option<&SpecValue>) -> Args {
        let mut args = Args::default();
        let Some(value) = value else {
            return args;
        };

        match value {
            SpecValue::Str(s) => args.positional.push(s.clone()),
            SpecValue::Pair(key, value) => {
                args.named.push((key.clone(), (**value).clone()));
            }
            SpecValue::List(items) => {
                for item in items {
                    match item {
                        SpecValue::Pair(key, value) => {
                            args.named.push((key.clone(), (**value).clone()));
                        }
                        other => args.positional.push(other.to_text()),
                    }
                }
            }
        }
        args
    }

    pub fn named(&self, key: &str) -> Option<&SpecValue> {
        self.named
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    fn named_text(&self, key: &str) -> Option<String> {
        self.named(key).map(SpecValue::to_text)
    }
}

/// A node constructor: consumes the current dispatch value plus the
/// directive's arguments.
pub type Constructor = Arc<dyn Fn(Value, &Args) -> Result<Node, FormatError> + Send + Sync>;

static REGISTRY: LazyLock<RwLock<HashMap<String, Constructor>>> =
    LazyLock::new(|| RwLock::new(builtins()));

/// Registers a component under a case-insensitive name.
pub fn register(
    name: &str,
    constructor: impl Fn(Value, &Args) -> Result<Node, FormatError> + Send + Sync + 'static,
) -> Result<(), RegistryError> {
    if name.trim().is_empty() {
        return Err(RegistryError::InvalidName);
    }
    let mut map = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    map.insert(name.to_lowercase(), Arc::new(constructor));
    Ok(())
}

/// Case-insensitive lookup; the caller receives a clone of the
/// constructor so the lock is not held during construction.
pub fn lookup(name: &str) -> Option<Constructor> {
    let map = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    map.get(&name.to_lowercase()).cloned()
}

/// Items for a container component: positional arguments extend the
/// value's own items.
fn container_items(value: Value, args: &Args) -> Vec<Value> {
    let mut items = if args.positional.is_empty() {
        value.into_items()
    } else {
        vec![value]
    };
    items.extend(args.positional.iter().map(|s| Value::Str(s.clone())));
    items
}

fn heading_level(args: &Args) -> i64 {
    args.positional
        .first()
        .cloned()
        .or_else(|| args.named_text("level"))
        .and_then(|text| text.parse::<f64>().ok())
        .map(|level| level as i64)
        .unwrap_or(1)
}

fn table_from_value(value: Value) -> Result<Table, FormatError> {
    match value {
        Value::Node(node) => match *node {
            Node::Table(table) => Ok(table),
            other => Ok(Table::from_csv(&other.display_text())?),
        },
        Value::List(rows) => {
            let rows = rows
                .into_iter()
                .map(|row| match row {
                    Value::List(cells) => cells.iter().map(Value::to_text).collect(),
                    other => vec![other.to_text()],
                })
                .collect();
            Ok(Table::from_rows(rows))
        }
        other => Ok(Table::from_csv(&other.to_text())?),
    }
}

fn link_from_args(value: Value, args: &Args) -> Link {
    let mut link = match args.positional.first() {
        Some(url) => Link::new(
            value,
            url.clone(),
            args.positional.get(1).cloned().unwrap_or_default(),
        ),
        None => Link::bare(value.to_text()),
    };

    if let Some(url) = args.named_text("link") {
        link.url = url;
    }
    if let Some(title) = args.named_text("title") {
        link.title = title;
    }
    if let Some(label) = args.named_text("label") {
        link.label = Value::Str(label);
    }
    link
}

fn builtins() -> HashMap<String, Constructor> {
    let mut map: HashMap<String, Constructor> = HashMap::new();
    let mut add = |name: &str, ctor: Constructor| {
        map.insert(name.to_string(), ctor);
    };

    add(
        "document",
        Arc::new(|value, _| Ok(Node::Document(Document::new(value.into_items())))),
    );
    add("text", Arc::new(|value, _| Ok(Node::Text(Text::new(value)))));
    add(
        "bold",
        Arc::new(|value, _| Ok(Node::Text(Text::bold(value)))),
    );
    add(
        "italic",
        Arc::new(|value, _| Ok(Node::Text(Text::italic(value)))),
    );
    add(
        "code",
        Arc::new(|value, _| Ok(Node::Text(Text::code(value)))),
    );
    add(
        "heading",
        Arc::new(|value, args| Ok(Node::Heading(Heading::new(value, heading_level(args))))),
    );
    add(
        "table",
        Arc::new(|value, _| Ok(Node::Table(table_from_value(value)?))),
    );
    add(
        "csv",
        Arc::new(|value, _| Ok(Node::Table(Table::from_csv(&value.to_text())?))),
    );

    let blockquote: Constructor =
        Arc::new(|value, _| Ok(Node::BlockQuote(BlockQuote::from_value(value))));
    add("blockquote", blockquote.clone());
    add("quote", blockquote);

    let lines: Constructor =
        Arc::new(|value, args| Ok(Node::Lines(Lines::new(container_items(value, args)))));
    add("lines", lines.clone());
    add("paragraph", lines);

    add(
        "codeblock",
        Arc::new(|value, args| {
            let language = args.named_text("lang").unwrap_or_default();
            Ok(Node::CodeBlock(CodeBlock::new(
                value.into_items(),
                language,
            )))
        }),
    );
    add(
        "list",
        Arc::new(|value, args| {
            let ordered = args
                .named_text("ordered")
                .map(|text| strbool(&text))
                .unwrap_or(false);
            let mut list = List::new(container_items(value, args), ordered);
            if let Some(start) = args.named_text("start").and_then(|s| s.parse().ok()) {
                list.start = start;
            }
            if let Some(marker) = args.named_text("marker") {
                list.marker = marker;
            }
            Ok(Node::List(list))
        }),
    );
    add(
        "link",
        Arc::new(|value, args| Ok(Node::Link(link_from_args(value, args)))),
    );
    add(
        "image",
        Arc::new(|value, args| {
            let mut link = link_from_args(value, args);
            link.embed = true;
            Ok(Node::Link(link))
        }),
    );

    let rule: Constructor = Arc::new(|_, _| Ok(Node::Rule));
    add("rule", rule.clone());
    add("horizontalrule", rule);

    map
}
