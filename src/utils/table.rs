//! Table rendering for CLI output.
//!
//! Widths are measured in terminal columns (unicode-width) after stripping
//! ANSI escapes, so coloured cells line up with plain ones.

use regex::Regex;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub struct Column {
    pub header: String,
    /// Upper bound for the column; longer cells are cut with `…`.
    pub max_width: usize,
}

impl Column {
    pub fn new(header: impl Into<String>, max_width: usize) -> Self {
        Self {
            header: header.into(),
            max_width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let content = self
                    .rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| display_width(c))
                    .max()
                    .unwrap_or(0);
                content
                    .max(UnicodeWidthStr::width(col.header.as_str()))
                    .min(col.max_width.max(1))
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        for (col, w) in self.columns.iter().zip(&widths) {
            out.push_str(&pad(&truncate(&col.header, *w), *w));
            out.push_str("  ");
        }
        out = out.trim_end().to_string();
        out.push('\n');

        let rule: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&"─".repeat(rule));
        out.push('\n');

        for row in &self.rows {
            let mut line = String::new();
            for (i, w) in widths.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                line.push_str(&pad(&truncate(cell, *w), *w));
                line.push_str("  ");
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }

        out
    }
}

fn ansi_regex() -> Option<Regex> {
    Regex::new(r"\x1B\[[0-9;]*[mK]").ok()
}

pub fn strip_ansi(s: &str) -> String {
    match ansi_regex() {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

/// Cuts plain text to `width` columns. Coloured cells are left untouched;
/// they only ever carry short labels.
pub fn truncate(s: &str, width: usize) -> String {
    if display_width(s) <= width || s.contains('\x1b') {
        return s.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn pad(s: &str, width: usize) -> String {
    let w = display_width(s);
    format!("{s}{}", " ".repeat(width.saturating_sub(w)))
}
