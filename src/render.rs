//! Report renderer
//!
//! Turns decoded result rows plus a column-format spec into fixed-width
//! aligned text. All per-report print logic is driven by [`ColumnSpec`]
//! data rather than hand-written formatting per report.

use std::fmt;

use crate::error::{CliError, Result};
use crate::store::{Cell, ResultRow};

/// Semantic type of an output column, controlling its display rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Left-justified text
    Text,
    /// Decimal integer
    Integer,
    /// Fixed-point number with the given scale
    Decimal { scale: u8 },
    /// Dollars in millions: `$12.34M`
    Currency,
    /// Yes/No flag
    Boolean,
    /// Minutes: `148 min` (fractional averages render as `148.5 min`)
    Duration,
}

/// One output column: header, display rule, declared width.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub width: usize,
}

/// A fully rendered table, ready for display.
#[derive(Debug, Clone)]
pub struct RenderedTable {
    pub header: String,
    pub separator: String,
    pub body: Vec<String>,
    pub footers: Vec<String>,
}

impl RenderedTable {
    /// Append a footer row (preceded by a separator when first pushed).
    pub fn push_footer(&mut self, line: String) {
        self.footers.push(line);
    }
}

impl fmt::Display for RenderedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        writeln!(f, "{}", self.separator)?;
        for line in &self.body {
            writeln!(f, "{}", line)?;
        }
        if !self.footers.is_empty() {
            writeln!(f, "{}", self.separator)?;
            for line in &self.footers {
                writeln!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}

/// Width of the client-side row-number column, when enabled.
const ORDINAL_WIDTH: usize = 4;

/// Normalize a boolean-ish cell to a flag. The store may deliver booleans as
/// single-character `'t'`/`'f'` text; everything not recognizably truthy is
/// treated as false.
pub fn flag_is_truthy(cell: &Cell) -> bool {
    match cell {
        Cell::Boolean(b) => *b,
        Cell::Text(s) => s == "t" || s.eq_ignore_ascii_case("true"),
        Cell::Integer(v) => *v != 0,
        _ => false,
    }
}

fn numeric_value(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Integer(v) => Some(*v as f64),
        Cell::Decimal(v) => Some(*v),
        _ => None,
    }
}

/// Format a single cell under a column's display rule. Nulls never reach the
/// numeric paths; they render as the `N/A` placeholder. Boolean columns are
/// the exception: a null flag is just another non-truthy value and renders
/// as `No`.
pub fn format_cell(cell: &Cell, kind: ColumnKind) -> String {
    if matches!(kind, ColumnKind::Boolean) {
        return if flag_is_truthy(cell) {
            "Yes".to_string()
        } else {
            "No".to_string()
        };
    }

    if matches!(cell, Cell::Null) {
        return "N/A".to_string();
    }

    match kind {
        ColumnKind::Text => match cell {
            Cell::Text(s) => s.clone(),
            Cell::Integer(v) => v.to_string(),
            Cell::Decimal(v) => v.to_string(),
            Cell::Boolean(b) => b.to_string(),
            Cell::Null => unreachable!(),
        },
        ColumnKind::Integer => match numeric_value(cell) {
            Some(v) => format!("{:.0}", v),
            None => format_cell(cell, ColumnKind::Text),
        },
        ColumnKind::Decimal { scale } => match numeric_value(cell) {
            Some(v) => format!("{:.*}", scale as usize, v),
            None => "N/A".to_string(),
        },
        ColumnKind::Currency => match numeric_value(cell) {
            Some(v) => format!("${:.2}M", v / 1_000_000.0),
            None => "N/A".to_string(),
        },
        ColumnKind::Duration => match cell {
            Cell::Integer(v) => format!("{} min", v),
            Cell::Decimal(v) => format!("{:.1} min", v),
            _ => "N/A".to_string(),
        },
        // Handled above, before the null guard.
        ColumnKind::Boolean => unreachable!(),
    }
}

/// Truncate a string to max width with ellipsis.
fn truncate_value(value: &str, max_width: usize) -> String {
    if value.chars().count() <= max_width {
        value.to_string()
    } else if max_width <= 3 {
        value.chars().take(max_width).collect()
    } else {
        let take = max_width - 3;
        format!("{}...", value.chars().take(take).collect::<String>())
    }
}

fn pad(value: &str, width: usize) -> String {
    format!("{:<width$}", truncate_value(value, width), width = width)
}

/// Lay out pre-formatted cell texts into one aligned line.
pub fn layout_row(values: &[String], columns: &[ColumnSpec], numbered: Option<usize>) -> String {
    let mut line = String::new();
    if let Some(n) = numbered {
        line.push_str(&pad(&format!("{}.", n), ORDINAL_WIDTH));
    }
    for (value, col) in values.iter().zip(columns) {
        line.push_str(&pad(value, col.width));
    }
    line.trim_end().to_string()
}

fn header_line(columns: &[ColumnSpec], numbered: bool) -> String {
    let mut line = String::new();
    if numbered {
        line.push_str(&pad("#", ORDINAL_WIDTH));
    }
    for col in columns {
        line.push_str(&pad(col.name, col.width));
    }
    line.trim_end().to_string()
}

fn separator_line(columns: &[ColumnSpec], numbered: bool) -> String {
    let mut width: usize = columns.iter().map(|c| c.width).sum();
    if numbered {
        width += ORDINAL_WIDTH;
    }
    "-".repeat(width)
}

/// Render rows into an aligned table. Every row must match the declared
/// column count; a mismatch is a contract violation surfaced as an error,
/// not a panic. Empty input is the caller's sentinel state and never reaches
/// this function.
pub fn render_table(
    columns: &[ColumnSpec],
    rows: &[ResultRow],
    numbered: bool,
) -> Result<RenderedTable> {
    for row in rows {
        if row.len() != columns.len() {
            return Err(CliError::ShapeMismatch {
                expected: columns.len(),
                actual: row.len(),
            });
        }
    }

    let body = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let values: Vec<String> = row
                .iter()
                .zip(columns)
                .map(|(cell, col)| format_cell(cell, col.kind))
                .collect();
            layout_row(&values, columns, numbered.then_some(i + 1))
        })
        .collect();

    Ok(RenderedTable {
        header: header_line(columns, numbered),
        separator: separator_line(columns, numbered),
        body,
        footers: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLS: &[ColumnSpec] = &[
        ColumnSpec {
            name: "Title",
            kind: ColumnKind::Text,
            width: 12,
        },
        ColumnSpec {
            name: "Box Office",
            kind: ColumnKind::Currency,
            width: 15,
        },
    ];

    #[test]
    fn test_currency_formatting() {
        let cell = Cell::Decimal(2_500_000.0);
        assert_eq!(format_cell(&cell, ColumnKind::Currency), "$2.50M");
        // Idempotent under re-formatting
        assert_eq!(
            format_cell(&cell, ColumnKind::Currency),
            format_cell(&cell, ColumnKind::Currency)
        );
        assert_eq!(
            format_cell(&Cell::Integer(160_000_000), ColumnKind::Currency),
            "$160.00M"
        );
    }

    #[test]
    fn test_null_renders_placeholder() {
        assert_eq!(format_cell(&Cell::Null, ColumnKind::Currency), "N/A");
        assert_eq!(
            format_cell(&Cell::Null, ColumnKind::Decimal { scale: 2 }),
            "N/A"
        );
        assert_eq!(format_cell(&Cell::Null, ColumnKind::Text), "N/A");
    }

    #[test]
    fn test_boolean_normalization() {
        assert_eq!(
            format_cell(&Cell::Text("t".into()), ColumnKind::Boolean),
            "Yes"
        );
        assert_eq!(
            format_cell(&Cell::Text("f".into()), ColumnKind::Boolean),
            "No"
        );
        assert_eq!(
            format_cell(&Cell::Boolean(true), ColumnKind::Boolean),
            "Yes"
        );
        assert_eq!(
            format_cell(&Cell::Text("maybe".into()), ColumnKind::Boolean),
            "No"
        );
        assert_eq!(format_cell(&Cell::Integer(0), ColumnKind::Boolean), "No");
        // An absent flag is falsy, not a missing value
        assert_eq!(format_cell(&Cell::Null, ColumnKind::Boolean), "No");
    }

    #[test]
    fn test_duration_formatting() {
        assert_eq!(
            format_cell(&Cell::Integer(148), ColumnKind::Duration),
            "148 min"
        );
        assert_eq!(
            format_cell(&Cell::Decimal(148.5), ColumnKind::Duration),
            "148.5 min"
        );
    }

    #[test]
    fn test_truncate_value() {
        assert_eq!(truncate_value("short", 10), "short");
        assert_eq!(
            truncate_value("this is a very long string that needs truncation", 20),
            "this is a very lo..."
        );
        assert_eq!(truncate_value("test", 3), "tes");
        assert_eq!(truncate_value("test", 4), "test");
        assert_eq!(truncate_value("hello", 4), "h...");
    }

    #[test]
    fn test_render_table_alignment() {
        let rows = vec![vec![
            Cell::Text("Inception".into()),
            Cell::Decimal(836_800_000.0),
        ]];
        let table = render_table(COLS, &rows, false).unwrap();
        assert_eq!(table.header, "Title       Box Office");
        assert_eq!(table.separator.len(), 27);
        assert_eq!(table.body, vec!["Inception   $836.80M"]);
    }

    #[test]
    fn test_render_table_numbered() {
        let rows = vec![
            vec![Cell::Text("A".into()), Cell::Decimal(1_000_000.0)],
            vec![Cell::Text("B".into()), Cell::Decimal(2_000_000.0)],
        ];
        let table = render_table(COLS, &rows, true).unwrap();
        assert!(table.header.starts_with("#"));
        assert!(table.body[0].starts_with("1."));
        assert!(table.body[1].starts_with("2."));
    }

    #[test]
    fn test_shape_mismatch_is_error() {
        let rows = vec![vec![Cell::Text("lonely".into())]];
        let err = render_table(COLS, &rows, false).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CliError::ShapeMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }
}
