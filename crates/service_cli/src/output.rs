//! Table and JSON rendering.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered key/value rows, serialised as a JSON object in row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Labelled(pub Vec<(String, f64)>);

impl Serialize for Labelled {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Formats a value with the three decimals results are rounded to.
pub fn format_value(value: f64) -> String {
    format!("{:.3}", value)
}

/// Renders a box-drawn table.
///
/// Column widths fit the widest cell. Numeric-looking cells are right
/// aligned.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(mid), right)
    };
    let line = |cells: Vec<String>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| {
                if cell.parse::<f64>().is_ok() {
                    format!(" {:>w$} ", cell, w = w)
                } else {
                    format!(" {:<w$} ", cell, w = w)
                }
            })
            .collect();
        format!("│{}│\n", padded.join("│"))
    };

    let mut out = rule("┌", "┬", "┐");
    out.push_str(&line(headers.iter().map(|h| h.to_string()).collect()));
    out.push_str(&rule("├", "┼", "┤"));
    for row in rows {
        let mut cells = row.clone();
        cells.resize(widths.len(), String::new());
        out.push_str(&line(cells));
    }
    out.push_str(&rule("└", "┴", "┘"));
    out
}

/// Renders labelled rows as a two-column table.
pub fn render_labelled(rows: &Labelled) -> String {
    let body: Vec<Vec<String>> = rows
        .0
        .iter()
        .map(|(key, value)| vec![key.clone(), format_value(*value)])
        .collect();
    render_table(&["Key", "Value"], &body)
}
