//! Table rendering utilities for CLI outputs.

use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width: width.max(header.width()),
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

    /// Add a row, widening columns to fit. Widths use display width, not
    /// byte length; full names are not always ASCII.
    pub fn add_row(&mut self, row: Vec<String>) {
        for (i, cell) in row.iter().enumerate() {
            if let Some(col) = self.columns.get_mut(i) {
                col.width = col.width.max(cell.width());
            }
        }
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&pad(&col.header, col.width));
            out.push(' ');
        }
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&pad(cell, col.width));
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}

fn pad(s: &str, width: usize) -> String {
    let w = s.width();
    let fill = width.saturating_sub(w);
    format!("{s}{}", " ".repeat(fill))
}
