//! `DOUBLE[]`/`DOUBLE[][]` array literal encoding and parsing for bundle
//! columns.
//!
//! `DuckDB`'s `Appender` doesn't reliably handle array columns built from
//! `Vec<f64>`; binding a string-serialized literal through a parameterized
//! `?::DOUBLE[]` (or `?::DOUBLE[][]`) cast is the validated approach for
//! writes. Reads mirror this: columns are selected with an explicit
//! `::VARCHAR` cast and parsed back out of DuckDB's bracketed list text
//! representation, rather than matching on the row-value variant, so both
//! directions of the round-trip go through the same text encoding.

use std::fmt::Write as _;

/// Format a `Vec<f64>` as a `DuckDB` array literal: `[0.1, 0.2, ...]`.
#[must_use]
pub fn vec_to_sql(v: &[f64]) -> String {
    let mut s = String::with_capacity(v.len() * 10 + 2);
    s.push('[');
    for (i, x) in v.iter().enumerate() {
        if i > 0 {
            s.push_str(", ");
        }
        let _ = write!(s, "{x}");
    }
    s.push(']');
    s
}

/// Format a `Vec<Vec<f64>>` as a nested `DuckDB` array literal:
/// `[[0.1, 0.2], [0.3, 0.4]]`.
#[must_use]
pub fn nested_vec_to_sql(rows: &[Vec<f64>]) -> String {
    let mut s = String::from("[");
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            s.push_str(", ");
        }
        s.push_str(&vec_to_sql(row));
    }
    s.push(']');
    s
}

/// Parse a flat `DOUBLE[]` rendered as `DuckDB`'s `VARCHAR` list text (e.g.
/// `"[1.0, 2.5, -3.0]"`) back into `Vec<f64>`.
#[must_use]
pub fn parse_flat_list(text: &str) -> Vec<f64> {
    let inner = text.trim().trim_start_matches('[').trim_end_matches(']');
    if inner.trim().is_empty() {
        return Vec::new();
    }
    inner
        .split(',')
        .filter_map(|tok| tok.trim().parse::<f64>().ok())
        .collect()
}

/// Parse a nested `DOUBLE[][]` rendered as `DuckDB`'s `VARCHAR` list text
/// (e.g. `"[[1.0, 2.0], [3.0, 4.0]]"`) back into `Vec<Vec<f64>>`, splitting
/// on top-level `],` boundaries so embedded commas inside each row don't
/// confuse the split.
#[must_use]
pub fn parse_nested_list(text: &str) -> Vec<Vec<f64>> {
    let inner = text.trim();
    let inner = inner
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(inner);
    let inner = inner.trim();
    if inner.is_empty() {
        return Vec::new();
    }

    let mut rows = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, ch) in inner.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    rows.push(parse_flat_list(&inner[start..=i]));
                    start = i + 1;
                }
            }
            _ => {}
        }
    }
    let _ = start;
    rows
}
