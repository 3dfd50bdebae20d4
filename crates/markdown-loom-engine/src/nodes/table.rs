//! Tables and the table directive engine (`sort`, `filter`, `order`,
//! `align`).
//!
//! Normalization is eager: rows are padded/truncated to the header width
//! and the alignment list is sized to the header on construction and
//! after every mutation, so reads never recompute derived state.

use regex::Regex;
use thiserror::Error;

use markdown_loom_syntax::{SpecPart, SpecValue, parse_spec};

use crate::io::{self, CsvError};
use crate::textutil::{escape, strbool};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("column {0:?} is not in the header")]
    ColumnNotFound(String),
    #[error("invalid filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Per-column cell alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Lenient parse: full keywords and the short forms `l`/`c`/`r`;
    /// anything unrecognized falls back to `Left`.
    pub fn parse(token: &str) -> Alignment {
        match token.to_lowercase().as_str() {
            "left" | "l" => Alignment::Left,
            "center" | "c" => Alignment::Center,
            "right" | "r" => Alignment::Right,
            _ => Alignment::Left,
        }
    }

    /// True only for the exact full keywords, used to distinguish
    /// `align=center` from a per-column letter string like `align=lcr`.
    fn is_keyword(token: &str) -> bool {
        matches!(token, "left" | "center" | "right")
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    header: Vec<String>,
    display_header: Vec<String>,
    rows: Vec<Vec<String>>,
    alignment: Vec<Alignment>,
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Self {
            header,
            display_header: Vec::new(),
            rows,
            alignment: Vec::new(),
        };
        table.normalize();
        table
    }

    /// First row is the header, the rest are data rows.
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        if rows.is_empty() {
            return Self::default();
        }
        let header = rows.remove(0);
        Self::new(header, rows)
    }

    /// Loads through the CSV collaborator; `source` may be a file path
    /// or CSV text.
    pub fn from_csv(source: &str) -> Result<Self, CsvError> {
        Ok(Self::from_rows(io::load_csv(source)?))
    }

    /// Builds a table from `(column, cell)` records. Columns appear in
    /// first-seen order; records missing a column get an empty cell.
    pub fn from_records(records: &[Vec<(String, String)>]) -> Self {
        let mut header: Vec<String> = Vec::new();
        for record in records {
            for (column, _) in record {
                if !header.contains(column) {
                    header.push(column.clone());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                header
                    .iter()
                    .map(|column| {
                        record
                            .iter()
                            .find(|(c, _)| c == column)
                            .map(|(_, cell)| cell.clone())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Self::new(header, rows)
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn display_header(&self) -> &[String] {
        &self.display_header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn alignment(&self) -> &[Alignment] {
        &self.alignment
    }

    pub fn set_rows(&mut self, rows: Vec<Vec<String>>) {
        self.rows = rows;
        self.normalize();
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
        self.normalize();
    }

    pub fn set_alignment(&mut self, alignment: Vec<Alignment>) {
        self.alignment = alignment;
        self.normalize();
    }

    /// Overrides the rendered header names; empty entries fall back to
    /// the structural header.
    pub fn set_display_header(&mut self, display: Vec<String>) {
        self.display_header = display;
        self.normalize();
    }

    /// Re-establishes the shape invariants: every row exactly as wide as
    /// the header, alignment sized to the header (extended by repeating
    /// its last entry), display header filled from the header.
    fn normalize(&mut self) {
        let width = self.header.len();

        for row in &mut self.rows {
            row.resize(width, String::new());
        }

        let fill = self.alignment.last().copied().unwrap_or_default();
        self.alignment.resize(width, fill);
        self.alignment.truncate(width);

        let mut display = Vec::with_capacity(width);
        for (i, column) in self.header.iter().enumerate() {
            match self.display_header.get(i) {
                Some(cell) if !cell.is_empty() => display.push(cell.clone()),
                _ => display.push(column.clone()),
            }
        }
        self.display_header = display;
    }

    fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.header
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    }

    /// Multi-key sort as successive full stable sorts in listed order.
    /// Each pass re-sorts the previous output, so the last listed key
    /// ends up dominant.
    pub fn sort(&mut self, keys: &[(String, bool)]) -> Result<(), TableError> {
        let mut resolved = Vec::with_capacity(keys.len());
        for (name, descending) in keys {
            resolved.push((self.column_index(name)?, *descending));
        }

        for (index, descending) in resolved {
            self.rows.sort_by(|a, b| {
                let ordering = a[index].cmp(&b[index]);
                if descending { ordering.reverse() } else { ordering }
            });
        }
        Ok(())
    }

    /// Keeps a row only when, for every rule, the cell matches the
    /// pattern from its start AND equals the pattern's literal text.
    pub fn filter(&mut self, rules: &[(String, String)]) -> Result<(), TableError> {
        let mut resolved = Vec::with_capacity(rules.len());
        for (name, pattern) in rules {
            let regex = Regex::new(&format!(r"\A(?:{pattern})"))?;
            resolved.push((self.column_index(name)?, regex, pattern.clone()));
        }

        self.rows.retain(|row| {
            resolved.iter().all(|(index, regex, literal)| {
                regex.is_match(&row[*index]) && row[*index] == *literal
            })
        });
        Ok(())
    }

    /// Reorders and renames columns. Each entry is
    /// (new column name, source column name); a source absent from the
    /// current header yields an all-empty column.
    pub fn order(&mut self, spec: &[(String, String)]) {
        let new_rows = self
            .rows
            .iter()
            .map(|row| {
                spec.iter()
                    .map(|(_, source)| {
                        self.header
                            .iter()
                            .position(|column| column == source)
                            .map(|i| row[i].clone())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        self.header = spec.iter().map(|(new, _)| new.clone()).collect();
        self.display_header = self.header.clone();
        self.rows = new_rows;
        self.normalize();
    }

    /// Applies parsed directive parts. Unknown keys are ignored; unknown
    /// column names in `sort`/`filter` fail with [`TableError`].
    pub fn apply_directives(&mut self, parts: &[SpecPart]) -> Result<(), TableError> {
        for part in parts {
            let SpecPart::Pair(key, value) = part else {
                continue;
            };
            match key.as_str() {
                "sort" => self.sort(&sort_keys(value))?,
                "filter" => self.filter(&filter_rules(value))?,
                "order" => self.order(&order_spec(value)),
                "align" => {
                    let alignment = align_spec(value, &self.header, &self.alignment);
                    self.set_alignment(alignment);
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Directive entry point for the dispatcher: works on a copy and
    /// returns the display text.
    pub fn format_with_spec(&self, spec: &str) -> Result<String, TableError> {
        let mut table = self.clone();
        table.apply_directives(&parse_spec(spec))?;
        Ok(format!("\n{}\n", table.render()))
    }

    pub fn render(&self) -> String {
        let clean = |cell: &str| escape(&cell.replace('\n', "<br>"), "|");

        let header: Vec<String> = self.header.iter().map(|c| clean(c)).collect();
        let display: Vec<String> = self.display_header.iter().map(|c| clean(c)).collect();
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|c| clean(c)).collect())
            .collect();

        let widths: Vec<usize> = (0..self.header.len())
            .map(|i| {
                let mut width = header[i].chars().count().max(display[i].chars().count());
                for row in &rows {
                    width = width.max(row[i].chars().count());
                }
                width
            })
            .collect();

        let mut lines = vec![
            render_row(&display, &widths, &self.alignment),
            separator_row(&widths, &self.alignment),
        ];
        for row in &rows {
            lines.push(render_row(row, &widths, &self.alignment));
        }

        lines.join("\n")
    }
}

fn render_row(cells: &[String], widths: &[usize], alignment: &[Alignment]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .zip(alignment)
        .map(|((cell, width), align)| {
            let padding = width.saturating_sub(cell.chars().count());
            let (left, right) = match align {
                Alignment::Left => (0, padding),
                Alignment::Right => (padding, 0),
                // Center biases the extra space to the right.
                Alignment::Center => (padding / 2, padding - padding / 2),
            };
            format!(" {}{cell}{} ", " ".repeat(left), " ".repeat(right))
        })
        .collect();

    format!("|{}|", padded.join("|"))
}

fn separator_row(widths: &[usize], alignment: &[Alignment]) -> String {
    let all_left = alignment.iter().all(|a| *a == Alignment::Left);

    let cells: Vec<String> = widths
        .iter()
        .zip(alignment)
        .map(|(width, align)| {
            let dashes = "-".repeat(*width);
            if all_left {
                return format!("-{dashes}-");
            }
            match align {
                Alignment::Left => format!(":{dashes}-"),
                Alignment::Center => format!(":{dashes}:"),
                Alignment::Right => format!("-{dashes}:"),
            }
        })
        .collect();

    format!("|{}|", cells.join("|"))
}

/// `sort=name` or `sort=name>,age` or `sort=name=desc,...`: a trailing
/// `<`/`>`/`=` on a bare key selects direction, a pair value of `>` or a
/// truthy word means descending.
fn sort_keys(value: &SpecValue) -> Vec<(String, bool)> {
    let entry = |item: &SpecValue| match item {
        SpecValue::Str(key) => match key.chars().last() {
            Some(last @ ('<' | '>' | '=')) => {
                let trimmed = key[..key.len() - last.len_utf8()].to_string();
                (trimmed, last == '>')
            }
            _ => (key.clone(), false),
        },
        SpecValue::Pair(key, direction) => {
            let direction = direction.to_text();
            (key.clone(), direction == ">" || strbool(&direction))
        }
        other => (other.to_text(), false),
    };

    match value {
        SpecValue::List(items) => items.iter().map(entry).collect(),
        single => vec![entry(single)],
    }
}

fn filter_rules(value: &SpecValue) -> Vec<(String, String)> {
    let SpecValue::List(items) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            SpecValue::Pair(column, pattern) => Some((column.clone(), pattern.to_text())),
            _ => None,
        })
        .collect()
}

fn order_spec(value: &SpecValue) -> Vec<(String, String)> {
    match value {
        SpecValue::Str(column) => vec![(column.clone(), column.clone())],
        SpecValue::List(items) => items
            .iter()
            .map(|item| match item {
                SpecValue::Pair(new, source) => (new.clone(), source.to_text()),
                other => {
                    let name = other.to_text();
                    (name.clone(), name)
                }
            })
            .collect(),
        SpecValue::Pair(new, source) => vec![(new.clone(), source.to_text())],
    }
}

/// `align=center` (every column), `align=lcr` (per-column letters) or
/// `align=Name=right,c` (named and positional overrides).
fn align_spec(value: &SpecValue, header: &[String], current: &[Alignment]) -> Vec<Alignment> {
    match value {
        SpecValue::Str(token) => {
            let token = token.to_lowercase();
            if Alignment::is_keyword(&token) {
                vec![Alignment::parse(&token)]
            } else {
                token
                    .chars()
                    .map(|c| Alignment::parse(&c.to_string()))
                    .collect()
            }
        }
        SpecValue::List(items) => {
            let mut alignment = current.to_vec();
            let mut index = 0;
            for item in items {
                match item {
                    SpecValue::Pair(column, align) => {
                        if let Some(i) = header.iter().position(|c| c == column) {
                            index = i;
                            if index < alignment.len() {
                                alignment[index] = Alignment::parse(&align.to_text());
                            }
                        }
                    }
                    other => {
                        if index < alignment.len() {
                            alignment[index] = Alignment::parse(&other.to_text());
                        }
                    }
                }
                index += 1;
            }
            alignment
        }
        pair => align_spec(&SpecValue::List(vec![pair.clone()]), header, current),
    }
}
