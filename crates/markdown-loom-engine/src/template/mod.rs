//! Template expansion.
//!
//! A template is ordinary text with `{name}` replacement fields. A field
//! carries an optional conversion (`{name!r}`) and an optional colon-led
//! directive chain (`{name:heading=2}`) interpreted against the component
//! registry. `{{` and `}}` are literal braces.

pub mod registry;
mod stdfmt;

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use markdown_loom_syntax::{SpecPart, parse_spec_part};

use crate::io::{self, CsvError};
use crate::nodes::{Node, TableError};
use crate::value::{Placeholder, Value};

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("single '}}' encountered in template")]
    UnmatchedBrace,
    #[error("unterminated replacement field in template")]
    UnterminatedField,
    #[error("unknown conversion {0:?}")]
    UnknownConversion(char),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Csv(#[from] CsvError),
    #[error("failed to read referenced file: {0}")]
    Io(#[from] std::io::Error),
}

/// Expands every replacement field in `template` against `bindings`.
///
/// Unknown names do not fail: they render back as `{name}` so a later
/// pass (or a human) can fill them in.
pub fn format(template: &str, bindings: &HashMap<String, Value>) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        let (literal, tail) = rest.split_at(pos);
        out.push_str(literal);

        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push_str(&tail[..1]);
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('}') {
            return Err(FormatError::UnmatchedBrace);
        }

        let (field, remainder) = take_field(&tail[1..])?;
        out.push_str(&eval_field(field, bindings)?);
        rest = remainder;
    }

    out.push_str(rest);
    Ok(out)
}

/// Convenience wrapper over [`format`] for plain string pairs, with
/// numeric-looking values promoted to numbers.
pub fn format_values(template: &str, values: &[(&str, &str)]) -> Result<String, FormatError> {
    let bindings = values
        .iter()
        .map(|(name, value)| (name.to_string(), Value::from_auto(value)))
        .collect();
    format(template, &bindings)
}

/// Splits off one brace-balanced field body, returning it without the
/// closing brace.
fn take_field(input: &str) -> Result<(&str, &str), FormatError> {
    let mut depth = 0usize;
    for (i, c) in input.char_indices() {
        match c {
            '{' => depth += 1,
            '}' if depth == 0 => return Ok((&input[..i], &input[i + 1..])),
            '}' => depth -= 1,
            _ => {}
        }
    }
    Err(FormatError::UnterminatedField)
}

/// Splits a field body into name, conversion, and directive spec.
/// `[` .. `]` in the name protects embedded `!` and `:` so file paths
/// survive intact.
fn split_field(field: &str) -> (&str, Option<char>, &str) {
    let mut bracket = 0usize;
    for (i, c) in field.char_indices() {
        match c {
            '[' => bracket += 1,
            ']' => bracket = bracket.saturating_sub(1),
            '!' if bracket == 0 => {
                let name = &field[..i];
                let after = &field[i + 1..];
                let mut chars = after.char_indices();
                let conversion = chars.next().map(|(_, ch)| ch);
                let spec = match chars.next() {
                    Some((j, ':')) => &after[j + 1..],
                    _ => "",
                };
                return (name, conversion, spec);
            }
            ':' if bracket == 0 => return (&field[..i], None, &field[i + 1..]),
            _ => {}
        }
    }
    (field, None, "")
}

fn convert(text: &str, conversion: char) -> Result<String, FormatError> {
    match conversion {
        's' => Ok(text.to_string()),
        'r' => Ok(format!("{text:?}")),
        'a' => Ok(format!("\"{}\"", text.escape_default())),
        other => Err(FormatError::UnknownConversion(other)),
    }
}

fn resolve(name: &str, bindings: &HashMap<String, Value>) -> Result<Value, FormatError> {
    if let Some(value) = bindings.get(name) {
        return Ok(value.clone());
    }
    if name.len() > 2 && name.starts_with('[') && name.ends_with(']') {
        let path = Path::new(&name[1..name.len() - 1]);
        if path.is_file() {
            let contents = io::read_text(path)?;
            return Ok(Value::FileContents(Placeholder::new(contents)));
        }
    }
    Ok(Value::Missing(Placeholder::new(name)))
}

/// Re-emits a field wrapped in `2^(n-1)` brace pairs, so each expansion
/// pass halves the remaining deferral depth.
fn deferred_field(name: &str, conversion: Option<char>, spec: &str, n: u32) -> String {
    let braces = 1usize << (n - 1);
    let mut out = "{".repeat(braces);
    out.push_str(name);
    if let Some(c) = conversion {
        out.push('!');
        out.push(c);
    }
    if !spec.is_empty() {
        out.push(':');
        out.push_str(spec);
    }
    out.push_str(&"}".repeat(braces));
    out
}

fn eval_field(field: &str, bindings: &HashMap<String, Value>) -> Result<String, FormatError> {
    let (name, conversion, mut spec) = split_field(field);

    // A brace-wrapped leading directive defers the whole field: `{2}`
    // survives one pass, `{3}` two, and so on. Depths past 17 are
    // dropped rather than ballooning the output.
    if !spec.is_empty() {
        let (part, remainder) = parse_spec_part(spec);
        if let SpecPart::Name(token) = &part
            && token.len() > 2
            && token.starts_with('{')
            && token.ends_with('}')
        {
            let inner = &token[1..token.len() - 1];
            if inner.chars().all(|c| c.is_ascii_digit())
                && let Ok(n @ 1..=17) = inner.parse::<u32>()
            {
                return Ok(deferred_field(name, conversion, remainder, n));
            }
            // The braced token is consumed even when it defers nothing.
            spec = remainder;
        }
    }

    let mut value = resolve(name, bindings)?;

    // Placeholders keep their conversion until they are finally filled;
    // anything already known converts up front.
    let carried = match &mut value {
        Value::Missing(placeholder) | Value::FileContents(placeholder) => {
            placeholder.conversion = conversion;
            conversion
        }
        _ => {
            if let Some(c) = conversion {
                value = Value::Str(convert(&value.to_text(), c)?);
            }
            None
        }
    };

    let result = eval_spec(value, spec)?;
    match carried {
        Some(c) => convert(&result, c),
        None => Ok(result),
    }
}

/// Runs a directive chain left to right. Registry hits rebuild the value
/// as a node; on the first miss the value itself gets a say (tables,
/// links, and groups interpret the rest of the spec), and whatever is
/// left falls through to plain format handling.
pub(crate) fn eval_spec(value: Value, spec: &str) -> Result<String, FormatError> {
    let mut value = value;
    let mut rest = spec;

    loop {
        if rest.is_empty() {
            return finish_plain(&value, "");
        }
        let (part, remainder) = parse_spec_part(rest);
        if let Some(ctor) = registry::lookup(part.key()) {
            let args = registry::Args::from_value(part.value());
            value = Value::from(ctor(value, &args)?);
            rest = remainder;
            continue;
        }

        return match value {
            Value::Node(node) => match *node {
                Node::Table(table) => Ok(table.format_with_spec(rest)?),
                Node::Link(link) => link.format_with_spec(rest),
                Node::Group(group) => group.format_with_spec(rest),
                other => finish_plain(&Value::from(other), rest),
            },
            other => finish_plain(&other, rest),
        };
    }
}

/// Terminal handling: placeholders print their own text with any
/// unconsumed spec reattached; everything else gets standard
/// format-specifier treatment.
fn finish_plain(value: &Value, spec: &str) -> Result<String, FormatError> {
    match value {
        Value::Missing(placeholder) | Value::FileContents(placeholder) => {
            if spec.is_empty() {
                Ok(placeholder.text.clone())
            } else {
                Ok(format!("{}:{spec}", placeholder.text))
            }
        }
        other => Ok(stdfmt::apply(other, spec)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn bind(pairs: &[(&str, &str)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), Value::from_auto(value)))
            .collect()
    }

    #[test]
    fn plain_substitution() {
        let out = format("Hello {name}!", &bind(&[("name", "World")])).unwrap();
        assert_eq!(out, "Hello World!");
    }

    #[test]
    fn double_braces_are_literal() {
        let out = format("{{not a field}} {x}", &bind(&[("x", "y")])).unwrap();
        assert_eq!(out, "{not a field} y");
    }

    #[test]
    fn lone_closing_brace_fails() {
        let err = format("oops }", &HashMap::new()).unwrap_err();
        assert!(matches!(err, FormatError::UnmatchedBrace));
    }

    #[test]
    fn unterminated_field_fails() {
        let err = format("{name", &HashMap::new()).unwrap_err();
        assert!(matches!(err, FormatError::UnterminatedField));
    }

    #[test]
    fn unknown_name_renders_as_its_name() {
        let out = format("Hello {missing}", &HashMap::new()).unwrap();
        assert_eq!(out, "Hello missing");
    }

    #[test]
    fn unknown_name_keeps_an_unmatched_spec() {
        let out = format("{missing:nosuchthing}", &HashMap::new()).unwrap();
        assert_eq!(out, "missing:nosuchthing");
    }

    #[test]
    fn unknown_name_still_feeds_components() {
        let out = format("{missing:bold}", &HashMap::new()).unwrap();
        assert_eq!(out, "**missing**");
    }

    #[rstest]
    #[case("{color:bold}", "**red**")]
    #[case("{color:italic}", "*red*")]
    #[case("{color:bold:italic}", "***red***")]
    #[case("{color:code}", "`red`")]
    #[case("{color:heading=2}", "\n## red\n")]
    fn component_directives(#[case] template: &str, #[case] expected: &str) {
        let out = format(template, &bind(&[("color", "red")])).unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn directives_chain_left_to_right() {
        let out = format("{x:code:blockquote}", &bind(&[("x", "ls")])).unwrap();
        assert_eq!(out, "\n> `ls`\n");
    }

    #[test]
    fn conversion_applies_before_directives() {
        let out = format("{name!r:bold}", &bind(&[("name", "it")])).unwrap();
        assert_eq!(out, "**\"it\"**");
    }

    #[test]
    fn unknown_conversion_fails() {
        let err = format("{name!q}", &bind(&[("name", "x")])).unwrap_err();
        assert!(matches!(err, FormatError::UnknownConversion('q')));
    }

    #[test]
    fn placeholder_conversion_applies_to_final_text() {
        let out = format("{word!r}", &HashMap::new()).unwrap();
        assert_eq!(out, "\"word\"");
    }

    #[test]
    fn deferral_re_emits_the_conversion() {
        let out = format("{word!r:{2}:bold}", &HashMap::new()).unwrap();
        assert_eq!(out, "{{word!r:bold}}");
    }

    #[rstest]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(3, 4)]
    #[case(4, 8)]
    fn deferral_emits_doubled_braces(#[case] n: u32, #[case] pairs: usize) {
        let template = format!("{{name:{{{n}}}:bold}}");
        let out = format(&template, &bind(&[("name", "x")])).unwrap();
        let expected = format!("{}name:bold{}", "{".repeat(pairs), "}".repeat(pairs));
        assert_eq!(out, expected);
    }

    #[test]
    fn deferred_field_survives_one_pass() {
        let out = format("{name:{2}:bold}", &bind(&[("name", "x")])).unwrap();
        assert_eq!(out, "{{name:bold}}");
        let next = format(&out, &bind(&[("name", "x")])).unwrap();
        assert_eq!(next, "{name:bold}");
        let last = format(&next, &bind(&[("name", "x")])).unwrap();
        assert_eq!(last, "**x**");
    }

    #[test]
    fn excessive_deferral_depth_is_dropped() {
        let out = format("{name:{40}:bold}", &bind(&[("name", "x")])).unwrap();
        assert_eq!(out, "**x**");
    }

    #[test]
    fn file_reference_substitutes_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snippet.txt");
        std::fs::write(&path, "from disk").unwrap();

        let template = format!("say: {{[{}]}}", path.display());
        let out = format(&template, &HashMap::new()).unwrap();
        assert_eq!(out, "say: from disk");
    }

    #[test]
    fn missing_file_reference_renders_as_its_name() {
        let out = format("{[/no/such/file.txt]}", &HashMap::new()).unwrap();
        assert_eq!(out, "[/no/such/file.txt]");
    }

    #[test]
    fn file_contents_feed_directives() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.py");
        std::fs::write(&path, "print('hi')").unwrap();

        let template = format!("{{[{}]:codeblock=lang=python}}", path.display());
        let out = format(&template, &HashMap::new()).unwrap();
        assert_eq!(out, "\n```python\nprint('hi')\n```\n");
    }

    #[test]
    fn format_values_promotes_numbers() {
        let out = format_values("{n:6}|{s}", &[("n", "42"), ("s", "42x")]).unwrap();
        assert_eq!(out, "    42|42x");
    }

    #[test]
    fn node_bindings_render_with_block_spacing() {
        let mut bindings = HashMap::new();
        bindings.insert(
            "quote".to_string(),
            Value::from(Node::BlockQuote(crate::nodes::BlockQuote::new(vec![
                Value::from("stay curious"),
            ]))),
        );
        let out = format("Before{quote}After", &bindings).unwrap();
        assert_eq!(out, "Before\n> stay curious\nAfter");
    }

    #[test]
    fn csv_directive_builds_a_table() {
        let out = format("{data:csv}", &bind(&[("data", "a,b\n1,2")])).unwrap();
        assert_eq!(out, "\n| a | b |\n|---|---|\n| 1 | 2 |\n");
    }

    #[test]
    fn table_directive_accepts_spec_tail() {
        let out = format(
            "{data:csv:sort=a>}",
            &bind(&[("data", "a,b\n1,x\n2,y")]),
        )
        .unwrap();
        assert_eq!(out, "\n| a | b |\n|---|---|\n| 2 | y |\n| 1 | x |\n");
    }
}
