//! Report runner
//!
//! Executes a resolved catalog entry against a [`Store`] and assembles the
//! complete text output: title banner, section headings, rendered tables,
//! empty-result sentinels, computed footers, and mutation confirmations.
//! The caller decides what to do with the text (print it, test it).

use crate::catalog::{self, QuerySpec, ReportKind};
use crate::error::Result;
use crate::render::{self, RenderedTable};
use crate::store::{Cell, ParamValue, ResultRow, Store};

/// Run a named report with the given parameters and return its rendered
/// output. Parameter validation happens up front; the store is not touched
/// for an unknown report or a bad parameter list.
pub fn run_report(store: &mut dyn Store, name: &str, params: &[ParamValue]) -> Result<String> {
    let (spec, bound) = catalog::resolve(name, params)?;
    tracing::info!(report = spec.name, "running report");

    let mut out = String::new();
    out.push_str(&format!("=== {} ===\n", substitute(spec.title, &bound)));

    match spec.kind {
        ReportKind::Queries(queries) => {
            for query in queries {
                run_query(store, query, &bound, &mut out)?;
            }
        }
        ReportKind::Mutation {
            sql,
            success,
            returns_id,
        } => {
            let id = store.execute_mutation(sql, &bound)?;
            out.push('\n');
            match (returns_id, id) {
                (true, Some(id)) => out.push_str(&format!("{} {}\n", success, id)),
                _ => out.push_str(&format!("{}\n", success)),
            }
        }
    }

    Ok(out)
}

/// Replace `{0}`, `{1}`, ... placeholders in a title with bound parameters.
fn substitute(title: &str, params: &[ParamValue]) -> String {
    let mut result = title.to_string();
    for (i, param) in params.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), &param.to_string());
    }
    result
}

fn run_query(
    store: &mut dyn Store,
    query: &QuerySpec,
    params: &[ParamValue],
    out: &mut String,
) -> Result<()> {
    if let Some(heading) = query.heading {
        out.push('\n');
        out.push_str(heading);
        out.push('\n');
    }

    let rows = store.execute(query.sql, params)?;

    // Empty results never produce a header-only table.
    if rows.is_empty() {
        out.push_str(query.empty_message);
        out.push('\n');
        return Ok(());
    }

    let mut table = render::render_table(query.columns, &rows, query.numbered)?;
    if let Some(footer) = query.footer {
        push_weighted_footer(&rows, query, footer, &mut table);
    }
    out.push_str(&table.to_string());

    if let Some(label) = query.trailing_count {
        out.push_str(&format!("\n{}: {}\n", label, rows.len()));
    }

    if let Some(list) = query.group_list {
        out.push('\n');
        out.push_str(&format!("{}:\n", list.heading));
        for row in &rows {
            let name = render::format_cell(&row[list.name_col], query.columns[list.name_col].kind);
            let items = match &row[list.items_col] {
                Cell::Text(s) => s.clone(),
                other => render::format_cell(other, query.columns[list.items_col].kind),
            };
            out.push_str(&format!("{}:\n  {}\n", name, items));
        }
    }

    Ok(())
}

fn cell_count(cell: &Cell) -> i64 {
    match cell {
        Cell::Integer(v) => *v,
        _ => 0,
    }
}

fn cell_number(cell: &Cell) -> f64 {
    match cell {
        Cell::Integer(v) => *v as f64,
        Cell::Decimal(v) => *v,
        _ => 0.0,
    }
}

/// Append the count-weighted overall average row, computed from the already
/// decoded body cells. Buckets with a null average contribute zero.
fn push_weighted_footer(
    rows: &[ResultRow],
    query: &QuerySpec,
    footer: crate::catalog::WeightedFooter,
    table: &mut RenderedTable,
) {
    let mut total: i64 = 0;
    let mut weighted_sum = 0.0;
    for row in rows {
        let count = cell_count(&row[footer.count_col]);
        total += count;
        weighted_sum += cell_number(&row[footer.avg_col]) * count as f64;
    }
    let overall = if total > 0 {
        weighted_sum / total as f64
    } else {
        0.0
    };

    let mut values: Vec<String> = query.columns.iter().map(|_| String::new()).collect();
    values[0] = footer.label.to_string();
    values[footer.count_col] = total.to_string();
    values[footer.avg_col] = format!("{:.2}", overall);

    table.push_footer(render::layout_row(&values, query.columns, None));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_placeholders() {
        assert_eq!(
            substitute("Films released in {0}", &[ParamValue::Integer(2010)]),
            "Films released in 2010"
        );
        assert_eq!(substitute("No params", &[]), "No params");
        assert_eq!(
            substitute(
                "{0} and {1}",
                &[
                    ParamValue::Text("a".into()),
                    ParamValue::Text("b".into())
                ]
            ),
            "a and b"
        );
    }

    #[test]
    fn test_cell_helpers() {
        assert_eq!(cell_count(&Cell::Integer(3)), 3);
        assert_eq!(cell_count(&Cell::Null), 0);
        assert_eq!(cell_number(&Cell::Decimal(7.5)), 7.5);
        assert_eq!(cell_number(&Cell::Null), 0.0);
    }
}
