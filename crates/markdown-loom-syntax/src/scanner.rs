//! Single-pass scanner for the format-spec mini-language.
//!
//! See the crate docs for the grammar. The scanner is infallible: any
//! input, including unbalanced brackets, unmatched quotes, and trailing
//! `=`/`,`, produces a best-effort parse to the end of the string.

use crate::value::{SpecPart, SpecValue};

/// Character cursor over a spec string.
///
/// Tracks the byte position so the unconsumed remainder can be returned
/// as a subslice of the input.
#[derive(Debug, Clone)]
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }
}

/// Accumulator for one value slot.
///
/// A slot starts as plain text; an `=` inside it wraps what was collected
/// so far into a nested pair and keeps collecting into the right side.
#[derive(Debug)]
enum Slot {
    Str(String),
    Nested(Box<Slot>, String),
}

impl Slot {
    fn empty() -> Self {
        Slot::Str(String::new())
    }

    fn push(&mut self, c: char) {
        match self {
            Slot::Str(s) => s.push(c),
            Slot::Nested(_, current) => current.push(c),
        }
    }

    /// True while nothing has been collected into the open accumulator.
    fn at_start(&self) -> bool {
        match self {
            Slot::Str(s) => s.is_empty(),
            Slot::Nested(_, current) => current.is_empty(),
        }
    }

    /// The slot's text with nested pairs joined by `=`, used when a
    /// deeply nested left side collapses into a single pair key.
    fn flatten(&self) -> String {
        match self {
            Slot::Str(s) => s.clone(),
            Slot::Nested(inner, current) => format!("{}={current}", inner.flatten()),
        }
    }

    fn into_value(self) -> SpecValue {
        match self {
            Slot::Str(s) => SpecValue::Str(s),
            Slot::Nested(inner, current) => {
                SpecValue::Pair(inner.flatten(), Box::new(SpecValue::Str(current)))
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Key,
    Value,
}

/// Parse every part of `spec`, in order.
pub fn parse_spec(spec: &str) -> Vec<SpecPart> {
    let mut parts = Vec::new();
    let mut rest = spec;

    while !rest.is_empty() {
        let (part, remainder) = parse_spec_part(rest);
        parts.push(part);
        rest = remainder;
    }

    parts
}

/// Parse a single part and return it together with the unconsumed
/// remainder (everything after the terminating `:`, or `""`).
pub fn parse_spec_part(spec: &str) -> (SpecPart, &str) {
    let mut cur = Cursor::new(spec);

    let mut mode = Mode::Key;
    let mut key = String::new();
    let mut slots: Vec<Slot> = Vec::new();

    let mut brackets: Vec<char> = Vec::new();
    let mut quote: Option<char> = None;
    let mut raw_quote = false;

    while let Some(c) = cur.peek() {
        // Backslash escapes override everything, quotes and brackets
        // included. In raw quoting the backslash is kept as-is.
        if c == '\\' {
            cur.bump();
            match cur.bump() {
                Some(escaped) if raw_quote => {
                    append(&mut key, &mut slots, &mode, '\\');
                    append(&mut key, &mut slots, &mode, escaped);
                }
                Some(escaped) => append(&mut key, &mut slots, &mode, escaped),
                None if raw_quote => append(&mut key, &mut slots, &mode, '\\'),
                None => {}
            }
            continue;
        }

        if let Some(q) = quote {
            cur.bump();
            if c == q {
                quote = None;
                raw_quote = false;
            } else {
                append(&mut key, &mut slots, &mode, c);
            }
            continue;
        }

        // Quotes only open at the very start of an empty key or slot.
        if at_accumulator_start(&key, &slots, &mode) {
            if c == 'r' && matches!(cur.peek_second(), Some('\'' | '"')) {
                cur.bump();
                if let Some(q) = cur.bump() {
                    quote = Some(q);
                    raw_quote = true;
                }
                continue;
            }
            if c == '\'' || c == '"' {
                cur.bump();
                quote = Some(c);
                raw_quote = false;
                continue;
            }
        }

        if let Some(closer) = matching_closer(c) {
            brackets.push(closer);
            cur.bump();
            append(&mut key, &mut slots, &mode, c);
            continue;
        }
        if let Some(&expected) = brackets.last() {
            // Inside brackets `=`, `,` and `:` are plain text.
            cur.bump();
            if c == expected {
                brackets.pop();
            }
            append(&mut key, &mut slots, &mode, c);
            continue;
        }

        if c == ':' {
            cur.bump();
            break;
        }

        match mode {
            Mode::Key if c == '=' => {
                cur.bump();
                mode = Mode::Value;
                slots.push(Slot::empty());
                continue;
            }
            Mode::Value if c == '=' => {
                cur.bump();
                let inner = slots.pop().unwrap_or_else(Slot::empty);
                slots.push(Slot::Nested(Box::new(inner), String::new()));
                continue;
            }
            Mode::Value if c == ',' => {
                cur.bump();
                slots.push(Slot::empty());
                continue;
            }
            _ => {}
        }

        cur.bump();
        append(&mut key, &mut slots, &mode, c);
    }

    (finish(key, slots), cur.rest())
}

fn append(key: &mut String, slots: &mut Vec<Slot>, mode: &Mode, c: char) {
    match mode {
        Mode::Key => key.push(c),
        Mode::Value => {
            if slots.is_empty() {
                slots.push(Slot::empty());
            }
            if let Some(slot) = slots.last_mut() {
                slot.push(c);
            }
        }
    }
}

fn at_accumulator_start(key: &str, slots: &[Slot], mode: &Mode) -> bool {
    match mode {
        Mode::Key => key.is_empty(),
        Mode::Value => slots.last().map(Slot::at_start).unwrap_or(true),
    }
}

fn matching_closer(c: char) -> Option<char> {
    match c {
        '(' => Some(')'),
        '{' => Some('}'),
        '[' => Some(']'),
        '<' => Some('>'),
        _ => None,
    }
}

fn finish(key: String, mut slots: Vec<Slot>) -> SpecPart {
    match slots.len() {
        0 => SpecPart::Name(key),
        1 => match slots.remove(0) {
            Slot::Str(s) => SpecPart::Pair(key, SpecValue::Str(s)),
            nested => SpecPart::Pair(key, SpecValue::List(vec![nested.into_value()])),
        },
        _ => SpecPart::Pair(
            key,
            SpecValue::List(slots.into_iter().map(Slot::into_value).collect()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn name(s: &str) -> SpecPart {
        SpecPart::Name(s.to_string())
    }

    fn pair(key: &str, value: SpecValue) -> SpecPart {
        SpecPart::Pair(key.to_string(), value)
    }

    fn s(text: &str) -> SpecValue {
        SpecValue::Str(text.to_string())
    }

    fn sub(key: &str, value: &str) -> SpecValue {
        SpecValue::Pair(key.to_string(), Box::new(s(value)))
    }

    #[test]
    fn bare_name() {
        assert_eq!(parse_spec("csv"), vec![name("csv")]);
    }

    #[test]
    fn colon_separates_parts() {
        assert_eq!(parse_spec("csv:test"), vec![name("csv"), name("test")]);
    }

    #[test]
    fn single_value() {
        assert_eq!(parse_spec("sort=name"), vec![pair("sort", s("name"))]);
    }

    #[test]
    fn comma_list() {
        assert_eq!(
            parse_spec("test=hello,world"),
            vec![pair("test", SpecValue::List(vec![s("hello"), s("world")]))]
        );
    }

    #[test]
    fn nested_pairs() {
        assert_eq!(
            parse_spec("test=hello=world,wow=hello"),
            vec![pair(
                "test",
                SpecValue::List(vec![sub("hello", "world"), sub("wow", "hello")])
            )]
        );
    }

    #[test]
    fn single_nested_pair_stays_in_a_list() {
        assert_eq!(
            parse_spec("filter=name=A.*"),
            vec![pair("filter", SpecValue::List(vec![sub("name", "A.*")]))]
        );
    }

    #[test]
    fn escaped_backslash_collapses() {
        // Input text: filter=name=A.*,age=\\d+
        assert_eq!(
            parse_spec(r"filter=name=A.*,age=\\d+"),
            vec![pair(
                "filter",
                SpecValue::List(vec![sub("name", "A.*"), sub("age", r"\d+")])
            )]
        );
    }

    #[test]
    fn backslash_escapes_delimiters() {
        assert_eq!(parse_spec(r"a\=b"), vec![name("a=b")]);
        assert_eq!(parse_spec(r"a\:b"), vec![name("a:b")]);
    }

    #[test]
    fn part_remainder_split() {
        let (part, rest) = parse_spec_part("table:sort=name:align=center");
        assert_eq!(part, name("table"));
        assert_eq!(rest, "sort=name:align=center");
    }

    #[test]
    fn brackets_suspend_delimiters() {
        assert_eq!(
            parse_spec("a=(b,c):next"),
            vec![pair("a", s("(b,c)")), name("next")]
        );
    }

    #[test]
    fn nested_brackets() {
        assert_eq!(parse_spec("a=<x=(y,z)>"), vec![pair("a", s("<x=(y,z)>"))]);
    }

    #[test]
    fn braced_token_survives_as_key_text() {
        let (part, rest) = parse_spec_part("{2}:bold");
        assert_eq!(part, name("{2}"));
        assert_eq!(rest, "bold");
    }

    #[test]
    fn quoting_protects_delimiters() {
        assert_eq!(
            parse_spec("name='John: Smith'"),
            vec![pair("name", s("John: Smith"))]
        );
        assert_eq!(parse_spec(r#"a="x,y""#), vec![pair("a", s("x,y"))]);
    }

    #[test]
    fn escaped_quote_inside_quotes() {
        assert_eq!(parse_spec(r"a='it\'s'"), vec![pair("a", s("it's"))]);
    }

    #[test]
    fn raw_quote_keeps_backslashes() {
        assert_eq!(parse_spec(r"a=r'\d+'"), vec![pair("a", s(r"\d+"))]);
    }

    #[test]
    fn quote_mid_slot_is_literal() {
        assert_eq!(parse_spec("a=do'nt"), vec![pair("a", s("do'nt"))]);
    }

    #[rstest]
    #[case("")]
    #[case("a=(b,c")]
    #[case("a='unterminated")]
    #[case("a=r\"unterminated")]
    #[case("trailing=")]
    #[case("trailing=,")]
    #[case("=leading")]
    #[case("\\")]
    #[case("::::")]
    #[case("<<<<[[{{")]
    fn never_panics_on_malformed_input(#[case] input: &str) {
        let _ = parse_spec(input);
    }

    #[test]
    fn trailing_equals_yields_empty_value() {
        assert_eq!(parse_spec("trailing="), vec![pair("trailing", s(""))]);
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        assert_eq!(
            parse_spec("a='no close:here"),
            vec![pair("a", s("no close:here"))]
        );
    }
}
