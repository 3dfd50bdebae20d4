//! Plain format-specifier handling for values no directive claimed.
//!
//! Supports the usual `[[fill]align][sign][0][width][,][.precision][type]`
//! shape. Specs that do not parse are treated as absent rather than
//! failing, since an unmatched spec tail is a recoverable condition.

use crate::value::Value;

#[derive(Debug, Default)]
struct Spec {
    fill: Option<char>,
    align: Option<char>,
    sign: Option<char>,
    zero: bool,
    width: usize,
    grouped: bool,
    precision: Option<usize>,
    kind: Option<char>,
}

pub fn apply(value: &Value, spec: &str) -> String {
    if spec.is_empty() {
        return value.to_text();
    }
    match parse(spec) {
        Some(parsed) => render(value, &parsed),
        None => value.to_text(),
    }
}

fn parse(spec: &str) -> Option<Spec> {
    let chars: Vec<char> = spec.chars().collect();
    let mut out = Spec::default();
    let mut i = 0;

    if chars.len() >= 2 && matches!(chars[1], '<' | '^' | '>') {
        out.fill = Some(chars[0]);
        out.align = Some(chars[1]);
        i = 2;
    } else if matches!(chars.first(), Some('<' | '^' | '>')) {
        out.align = Some(chars[0]);
        i = 1;
    }

    if matches!(chars.get(i), Some('+' | '-' | ' ')) {
        out.sign = Some(chars[i]);
        i += 1;
    }
    if chars.get(i) == Some(&'0') {
        out.zero = true;
        i += 1;
    }
    while chars.get(i).is_some_and(char::is_ascii_digit) {
        out.width = out.width * 10 + (chars[i] as usize - '0' as usize);
        i += 1;
    }
    if chars.get(i) == Some(&',') {
        out.grouped = true;
        i += 1;
    }
    if chars.get(i) == Some(&'.') {
        i += 1;
        let mut precision = 0usize;
        let mut digits = 0;
        while chars.get(i).is_some_and(char::is_ascii_digit) {
            precision = precision * 10 + (chars[i] as usize - '0' as usize);
            i += 1;
            digits += 1;
        }
        if digits == 0 {
            return None;
        }
        out.precision = Some(precision);
    }
    if i < chars.len() {
        if !matches!(chars[i], 's' | 'd' | 'f' | 'F' | 'e' | 'E' | 'x' | 'X' | 'o' | 'b' | '%') {
            return None;
        }
        out.kind = Some(chars[i]);
        i += 1;
    }
    if i != chars.len() {
        return None;
    }
    Some(out)
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Int(n) => Some(*n as f64),
        Value::Float(f) => Some(*f),
        _ => None,
    }
}

fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Int(n) => Some(*n),
        _ => None,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn signed(spec: &Spec, negative: bool, magnitude: String) -> (String, String) {
    let sign = if negative {
        "-"
    } else {
        match spec.sign {
            Some('+') => "+",
            Some(' ') => " ",
            _ => "",
        }
    };
    (sign.to_string(), magnitude)
}

fn render(value: &Value, spec: &Spec) -> String {
    // Work out the body text and whether numeric alignment rules apply.
    let (sign, body, numeric) = match spec.kind {
        Some(kind @ ('d' | 'x' | 'X' | 'o' | 'b')) => match as_int(value) {
            Some(n) => {
                let magnitude = match kind {
                    'x' => format!("{:x}", n.unsigned_abs()),
                    'X' => format!("{:X}", n.unsigned_abs()),
                    'o' => format!("{:o}", n.unsigned_abs()),
                    'b' => format!("{:b}", n.unsigned_abs()),
                    _ => {
                        let digits = n.unsigned_abs().to_string();
                        if spec.grouped {
                            group_thousands(&digits)
                        } else {
                            digits
                        }
                    }
                };
                let (sign, body) = signed(spec, n < 0, magnitude);
                (sign, body, true)
            }
            None => return value.to_text(),
        },
        Some(kind @ ('f' | 'F' | 'e' | 'E' | '%')) => match as_float(value) {
            Some(f) => {
                let precision = spec.precision.unwrap_or(6);
                let magnitude = match kind {
                    'e' => format!("{:.*e}", precision, f.abs()),
                    'E' => format!("{:.*E}", precision, f.abs()),
                    '%' => format!("{:.*}%", precision, f.abs() * 100.0),
                    _ => format!("{:.*}", precision, f.abs()),
                };
                let (sign, body) = signed(spec, f.is_sign_negative(), magnitude);
                (sign, body, true)
            }
            None => return value.to_text(),
        },
        _ => {
            let mut text = value.to_text();
            if let Some(precision) = spec.precision {
                text = text.chars().take(precision).collect();
            }
            match value {
                Value::Int(_) | Value::Float(_) => {
                    if spec.grouped && matches!(value, Value::Int(_)) {
                        text = group_thousands(&text.trim_start_matches('-').to_string());
                        let (sign, body) =
                            signed(spec, matches!(value, Value::Int(n) if *n < 0), text);
                        (sign, body, true)
                    } else {
                        let negative = text.starts_with('-');
                        let magnitude = text.trim_start_matches('-').to_string();
                        let (sign, body) = signed(spec, negative, magnitude);
                        (sign, body, true)
                    }
                }
                _ => (String::new(), text, false),
            }
        }
    };

    pad(spec, &sign, &body, numeric)
}

fn pad(spec: &Spec, sign: &str, body: &str, numeric: bool) -> String {
    let content_len = sign.chars().count() + body.chars().count();
    if content_len >= spec.width {
        return format!("{sign}{body}");
    }
    let missing = spec.width - content_len;

    // Zero padding goes between the sign and the digits.
    if numeric && spec.zero && spec.align.is_none() {
        return format!("{sign}{}{body}", "0".repeat(missing));
    }

    let fill = spec.fill.unwrap_or(' ');
    let align = spec
        .align
        .unwrap_or(if numeric { '>' } else { '<' });
    let content = format!("{sign}{body}");
    match align {
        '>' => format!("{}{content}", fill.to_string().repeat(missing)),
        '^' => {
            let left = missing / 2;
            let right = missing - left;
            format!(
                "{}{content}{}",
                fill.to_string().repeat(left),
                fill.to_string().repeat(right)
            )
        }
        _ => format!("{content}{}", fill.to_string().repeat(missing)),
    }
}
