//! Plain-text rendering helpers: fixed-width tables, key/value lines, and
//! confirmation lines. Responses are consumed here and never mutated.

use std::io::Write;

/// A fixed-width table. Every column is padded to its widest cell plus two
/// spaces; the last column is written as-is.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Adds a row. Rows render in insertion order.
    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn write(&self, out: &mut dyn Write) {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.len()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() && cell.len() > widths[i] {
                    widths[i] = cell.len();
                }
            }
        }
        write_row(out, &self.headers, &widths);
        for row in &self.rows {
            write_row(out, row, &widths);
        }
    }
}

fn write_row(out: &mut dyn Write, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i + 1 == cells.len() {
            line.push_str(cell);
        } else {
            line.push_str(&format!("{:width$}", cell, width = widths[i] + 2));
        }
    }
    let _ = writeln!(out, "{}", line);
}

/// Writes one `Key: value` line with an indent prefix.
pub fn field(out: &mut dyn Write, indent: &str, key: &str, value: &dyn std::fmt::Display) {
    let _ = writeln!(out, "{}{}: {}", indent, key, value);
}

/// Writes a confirmation line.
pub fn success(out: &mut dyn Write, message: &str) {
    let _ = writeln!(out, "{}", message);
}

/// Writes a blank separator line.
pub fn line_break(out: &mut dyn Write) {
    let _ = writeln!(out);
}
