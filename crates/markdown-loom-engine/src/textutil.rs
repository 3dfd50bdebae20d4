//! Small text helpers shared by the node renderers.

use std::sync::LazyLock;

use regex::Regex;

static BACKTICK_RUNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("`+").expect("backtick run pattern is valid")
});

/// Prefix a backslash before every backslash and every character in
/// `chars`.
pub fn escape(text: &str, chars: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\\' || chars.contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Fence length for content containing backticks: the smallest length
/// >= `start` that differs from every backtick run in `text`.
pub fn backtick_count(text: &str, start: usize) -> usize {
    let runs: Vec<usize> = BACKTICK_RUNS
        .find_iter(text)
        .map(|m| m.as_str().len())
        .collect();

    let mut count = start;
    while runs.contains(&count) {
        count += 1;
    }
    count
}

/// Indent every line of `text` (blank lines included) by `amount` spaces.
pub fn indent(text: &str, amount: usize) -> String {
    let pad = " ".repeat(amount);
    text.split_inclusive('\n')
        .map(|line| format!("{pad}{line}"))
        .collect()
}

/// Lenient boolean parse used by directive arguments.
pub fn strbool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "t" | "1")
}
