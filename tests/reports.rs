//! End-to-end report tests against a canned in-memory store.

use std::collections::VecDeque;

use cinedb_cli::{run_report, Cell, CliError, ParamValue, ResultRow, Store, StoreError};

/// Store double: hands out pre-canned result sets in order and records every
/// statement it was asked to run. Mutations with a RETURNING clause hand out
/// monotonically increasing ids.
#[derive(Default)]
struct FakeStore {
    results: VecDeque<Vec<ResultRow>>,
    executed: Vec<(String, Vec<ParamValue>)>,
    next_id: i64,
}

impl FakeStore {
    fn with_results(results: Vec<Vec<ResultRow>>) -> Self {
        Self {
            results: results.into(),
            executed: Vec::new(),
            next_id: 0,
        }
    }
}

impl Store for FakeStore {
    fn execute(&mut self, sql: &str, params: &[ParamValue]) -> Result<Vec<ResultRow>, StoreError> {
        self.executed.push((sql.to_string(), params.to_vec()));
        Ok(self.results.pop_front().unwrap_or_default())
    }

    fn execute_mutation(
        &mut self,
        sql: &str,
        params: &[ParamValue],
    ) -> Result<Option<i64>, StoreError> {
        self.executed.push((sql.to_string(), params.to_vec()));
        if sql.contains("RETURNING") {
            self.next_id += 1;
            Ok(Some(self.next_id))
        } else {
            Ok(None)
        }
    }
}

fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

#[test]
fn empty_result_prints_sentinel_not_header() {
    let mut store = FakeStore::with_results(vec![vec![]]);
    let out = run_report(&mut store, "films-by-year", &[ParamValue::Integer(1890)]).unwrap();

    assert!(out.contains("=== Films released in 1890 ==="));
    assert!(out.contains("No films found."));
    // No header-only table and no separator line
    assert!(!out.contains("Title"));
    assert!(!out.contains("---"));
    assert!(!out.contains("Total films"));
}

#[test]
fn films_by_year_renders_table_and_count() {
    let rows = vec![
        vec![
            Cell::Integer(2),
            text("Inception"),
            Cell::Integer(148),
            text("Christopher Nolan"),
        ],
        vec![
            Cell::Integer(9),
            text("Shutter Island"),
            Cell::Integer(138),
            Cell::Null,
        ],
    ];
    let mut store = FakeStore::with_results(vec![rows]);
    let out = run_report(&mut store, "films-by-year", &[ParamValue::Integer(2010)]).unwrap();

    assert!(out.contains("ID"));
    assert!(out.contains("Inception"));
    assert!(out.contains("148 min"));
    // Null director renders as the placeholder
    assert!(out.contains("N/A"));
    assert!(out.contains("Total films: 2"));

    // The year parameter was bound to the single statement
    assert_eq!(store.executed.len(), 1);
    assert_eq!(store.executed[0].1, vec![ParamValue::Integer(2010)]);
}

#[test]
fn unknown_report_is_an_error_and_store_untouched() {
    let mut store = FakeStore::default();
    let err = run_report(&mut store, "frobnicate", &[]).unwrap_err();
    assert!(matches!(err, CliError::UnknownReport(_)));
    assert!(store.executed.is_empty());
}

#[test]
fn parameter_count_mismatch_is_an_error_and_store_untouched() {
    let mut store = FakeStore::default();
    let err = run_report(&mut store, "top-grossing-films", &[]).unwrap_err();
    assert!(matches!(
        err,
        CliError::ParameterCountMismatch {
            expected: 1,
            actual: 0,
            ..
        }
    ));
    assert!(store.executed.is_empty());
}

#[test]
fn shape_mismatch_is_contained_as_an_error() {
    // films-by-year declares 4 columns; deliver 2
    let rows = vec![vec![Cell::Integer(1), text("Stub")]];
    let mut store = FakeStore::with_results(vec![rows]);
    let err = run_report(&mut store, "films-by-year", &[ParamValue::Integer(2010)]).unwrap_err();
    assert!(matches!(
        err,
        CliError::ShapeMismatch {
            expected: 4,
            actual: 2
        }
    ));
}

#[test]
fn demonstrate_all_runs_every_statement_even_when_empty() {
    // All ten queries come back empty; the suite must not stop early.
    let mut store = FakeStore::with_results(vec![vec![]; 10]);
    let out = run_report(&mut store, "demonstrate-all", &[]).unwrap();

    assert_eq!(store.executed.len(), 10);
    assert!(out.contains("1. Films by director Christopher Nolan:"));
    assert!(out.contains("10. Directors who have won awards:"));
    assert!(out.contains("No people found."));
}

#[test]
fn demonstrate_all_numbers_top_three() {
    let mut results: Vec<Vec<ResultRow>> = vec![vec![]; 10];
    // Query 6 is the LIMIT 3 listing with client-side numbering
    results[5] = vec![
        vec![text("Barbie"), Cell::Decimal(1_446_000_000.0)],
        vec![text("Jurassic Park"), Cell::Decimal(1_046_000_000.0)],
        vec![text("Oppenheimer"), Cell::Decimal(952_000_000.0)],
    ];
    let mut store = FakeStore::with_results(results);
    let out = run_report(&mut store, "demonstrate-all", &[]).unwrap();

    assert!(out.contains("1.  Barbie"));
    assert!(out.contains("3.  Oppenheimer"));
    assert!(out.contains("$1446.00M"));
}

#[test]
fn duration_statistics_weighted_footer_and_film_list() {
    let rows = vec![
        vec![
            text("Short"),
            Cell::Integer(2),
            Cell::Decimal(84.5),
            Cell::Decimal(7.0),
            Cell::Decimal(6.5),
            Cell::Decimal(7.5),
            text("Following, La Jetee"),
        ],
        vec![
            text("Medium"),
            Cell::Integer(3),
            Cell::Decimal(150.0),
            Cell::Decimal(8.0),
            Cell::Decimal(7.5),
            Cell::Decimal(9.0),
            text("Arrival, Dune, Inception"),
        ],
    ];
    let mut store = FakeStore::with_results(vec![rows]);
    let out = run_report(&mut store, "duration-statistics", &[]).unwrap();

    // Weighted overall: (7.0 * 2 + 8.0 * 3) / 5 = 7.60, from decoded cells
    assert!(out.contains("OVERALL"));
    assert!(out.contains("7.60"));
    assert_eq!(store.executed.len(), 1, "footer must not re-query");

    // Full film list section after the table
    assert!(out.contains("Film List by Category:"));
    assert!(out.contains("  Arrival, Dune, Inception"));
}

#[test]
fn duration_statistics_footer_treats_null_average_as_zero() {
    let rows = vec![
        vec![
            text("Short"),
            Cell::Integer(1),
            Cell::Decimal(69.0),
            Cell::Null,
            Cell::Null,
            Cell::Null,
            text("Following"),
        ],
        vec![
            text("Long"),
            Cell::Integer(1),
            Cell::Decimal(221.0),
            Cell::Decimal(8.0),
            Cell::Decimal(8.0),
            Cell::Decimal(8.0),
            text("Gone with the Wind"),
        ],
    ];
    let mut store = FakeStore::with_results(vec![rows]);
    let out = run_report(&mut store, "duration-statistics", &[]).unwrap();

    // (0 * 1 + 8.0 * 1) / 2 = 4.00
    assert!(out.contains("4.00"));
}

#[test]
fn mutations_report_monotonic_ids() {
    let mut store = FakeStore::default();

    let film_params = vec![
        ParamValue::Text("Tenet".into()),
        ParamValue::Integer(2020),
        ParamValue::Integer(150),
        ParamValue::Float(200_000_000.0),
        ParamValue::Float(365_000_000.0),
        ParamValue::Integer(1),
    ];
    let out = run_report(&mut store, "add-film", &film_params).unwrap();
    assert!(out.contains("Film added successfully! Film ID: 1"));

    let actor_params = vec![
        ParamValue::Text("John".into()),
        ParamValue::Text("Washington".into()),
        ParamValue::Text("1984-07-28".into()),
        ParamValue::Text("American".into()),
        ParamValue::Boolean(false),
    ];
    let out = run_report(&mut store, "add-actor", &actor_params).unwrap();
    assert!(out.contains("Actor added successfully! Actor ID: 2"));
}

#[test]
fn update_box_office_reports_success_without_id() {
    let mut store = FakeStore::default();
    let out = run_report(
        &mut store,
        "update-film-box-office",
        &[ParamValue::Integer(2), ParamValue::Float(900_000_000.0)],
    )
    .unwrap();

    assert!(out.contains("Film box office updated successfully!"));
    assert!(!out.contains("ID:"));

    // Integer film id stays integral, box office arrives as a float
    assert_eq!(
        store.executed[0].1,
        vec![ParamValue::Integer(2), ParamValue::Float(900_000_000.0)]
    );
}

#[test]
fn update_box_office_accepts_integer_amount() {
    let mut store = FakeStore::default();
    run_report(
        &mut store,
        "update-film-box-office",
        &[ParamValue::Integer(2), ParamValue::Integer(900_000_000)],
    )
    .unwrap();

    // Widened before reaching the store
    assert_eq!(
        store.executed[0].1,
        vec![ParamValue::Integer(2), ParamValue::Float(900_000_000.0)]
    );
}

#[test]
fn overview_renders_all_seven_sections() {
    let mut store = FakeStore::with_results(vec![vec![]; 7]);
    let out = run_report(&mut store, "overview", &[]).unwrap();

    assert_eq!(store.executed.len(), 7);
    assert!(out.contains("=== Test Data Overview ==="));
    assert!(out.contains("1. Directors:"));
    assert!(out.contains("7. Summary Statistics:"));
}

#[test]
fn overview_boolean_flags_normalize_to_yes_no() {
    let mut results: Vec<Vec<ResultRow>> = vec![vec![]; 7];
    // Actors section carries the oscar-winner flag; text 't'/'f' must render
    // as Yes/No like a native boolean would.
    results[1] = vec![
        vec![
            Cell::Integer(1),
            text("Leonardo"),
            text("DiCaprio"),
            text("American"),
            text("t"),
        ],
        vec![
            Cell::Integer(4),
            text("Samuel"),
            text("Jackson"),
            text("American"),
            Cell::Boolean(false),
        ],
        vec![
            Cell::Integer(5),
            text("Amy"),
            text("Adams"),
            text("American"),
            Cell::Null,
        ],
    ];
    let mut store = FakeStore::with_results(results);
    let out = run_report(&mut store, "overview", &[]).unwrap();

    let dicaprio = out.lines().find(|l| l.contains("DiCaprio")).unwrap();
    assert!(dicaprio.ends_with("Yes"));
    let jackson = out.lines().find(|l| l.contains("Jackson")).unwrap();
    assert!(jackson.ends_with("No"));
    // A null flag is falsy, not N/A
    let adams = out.lines().find(|l| l.contains("Adams")).unwrap();
    assert!(adams.ends_with("No"));
}

#[test]
fn top_grossing_binds_limit_and_formats_roi() {
    let rows = vec![vec![
        text("Inception"),
        Cell::Integer(2010),
        Cell::Decimal(836_800_000.0),
        text("Christopher Nolan"),
        Cell::Decimal(423.0),
    ]];
    let mut store = FakeStore::with_results(vec![rows]);
    let out = run_report(&mut store, "top-grossing-films", &[ParamValue::Integer(5)]).unwrap();

    assert!(out.contains("=== Top 5 Grossing Films ==="));
    assert!(out.contains("$836.80M"));
    assert!(out.contains("423.00"));
    assert_eq!(store.executed[0].1, vec![ParamValue::Integer(5)]);
}
