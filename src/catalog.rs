//! Query catalog
//!
//! The fixed set of named report definitions: SQL templates, parameter
//! shapes, and output-column descriptors. Specs are static data built once
//! at compile time and never mutated; `resolve` turns a report name plus
//! user-supplied parameters into an executable spec or a usage error.
//!
//! ROI, profitability buckets, and duration categories are deliberately
//! computed in SQL (ROUND/CASE/CTE) rather than client-side, so the
//! formatting layer never re-rounds values the server already rounded.

use crate::error::{CliError, Result};
use crate::render::{ColumnKind, ColumnSpec};
use crate::store::ParamValue;

/// Declared type of one report parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Integer,
    Float,
    Text,
    Boolean,
}

impl ParamKind {
    /// Parse raw user input (prompt line or `--param` value) into a bound
    /// parameter of this kind.
    pub fn parse(self, raw: &str) -> Result<ParamValue> {
        let trimmed = raw.trim();
        match self {
            ParamKind::Integer => trimmed
                .parse::<i64>()
                .map(ParamValue::Integer)
                .map_err(|_| CliError::Parse(format!("expected an integer, got '{}'", trimmed))),
            ParamKind::Float => trimmed
                .parse::<f64>()
                .map(ParamValue::Float)
                .map_err(|_| CliError::Parse(format!("expected a number, got '{}'", trimmed))),
            ParamKind::Text => Ok(ParamValue::Text(trimmed.to_string())),
            ParamKind::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "y" | "yes" | "t" | "true" => Ok(ParamValue::Boolean(true)),
                "n" | "no" | "f" | "false" => Ok(ParamValue::Boolean(false)),
                other => Err(CliError::Parse(format!(
                    "expected y/n, got '{}'",
                    other
                ))),
            },
        }
    }

    fn matches(self, value: &ParamValue) -> bool {
        matches!(
            (self, value),
            (ParamKind::Integer, ParamValue::Integer(_))
                | (ParamKind::Float, ParamValue::Float(_))
                | (ParamKind::Float, ParamValue::Integer(_))
                | (ParamKind::Text, ParamValue::Text(_))
                | (ParamKind::Boolean, ParamValue::Boolean(_))
        )
    }
}

/// One declared parameter: its kind plus the interactive prompt label.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub kind: ParamKind,
    pub prompt: &'static str,
}

/// Footer rule: a trailing row whose rating column is the per-bucket
/// averages weighted by each bucket's row count.
#[derive(Debug, Clone, Copy)]
pub struct WeightedFooter {
    pub label: &'static str,
    pub count_col: usize,
    pub avg_col: usize,
}

/// A per-group detail section printed after the table, listing the
/// aggregated items column in full (the table view truncates it).
#[derive(Debug, Clone, Copy)]
pub struct GroupList {
    pub heading: &'static str,
    pub name_col: usize,
    pub items_col: usize,
}

/// One row-returning statement within a report.
#[derive(Debug, Clone, Copy)]
pub struct QuerySpec {
    /// Section heading for composite reports.
    pub heading: Option<&'static str>,
    pub sql: &'static str,
    pub columns: &'static [ColumnSpec],
    /// Sentinel line for an empty result set.
    pub empty_message: &'static str,
    /// Label for a trailing `<label>: <row count>` line.
    pub trailing_count: Option<&'static str>,
    /// Number body rows client-side (1., 2., ...).
    pub numbered: bool,
    pub footer: Option<WeightedFooter>,
    pub group_list: Option<GroupList>,
}

/// What a report does when run.
#[derive(Debug, Clone, Copy)]
pub enum ReportKind {
    /// One or more row-returning statements rendered in sequence.
    Queries(&'static [QuerySpec]),
    /// A single mutation; `returns_id` marks a RETURNING clause.
    Mutation {
        sql: &'static str,
        success: &'static str,
        returns_id: bool,
    },
}

/// Static definition of one named report.
#[derive(Debug, Clone, Copy)]
pub struct ReportSpec {
    pub name: &'static str,
    /// Banner title; `{0}`, `{1}`, ... are replaced with bound parameters.
    pub title: &'static str,
    pub params: &'static [ParamSpec],
    pub kind: ReportKind,
}

const fn text(name: &'static str, width: usize) -> ColumnSpec {
    ColumnSpec {
        name,
        kind: ColumnKind::Text,
        width,
    }
}

const fn integer(name: &'static str, width: usize) -> ColumnSpec {
    ColumnSpec {
        name,
        kind: ColumnKind::Integer,
        width,
    }
}

const fn decimal(name: &'static str, scale: u8, width: usize) -> ColumnSpec {
    ColumnSpec {
        name,
        kind: ColumnKind::Decimal { scale },
        width,
    }
}

const fn currency(name: &'static str, width: usize) -> ColumnSpec {
    ColumnSpec {
        name,
        kind: ColumnKind::Currency,
        width,
    }
}

const fn boolean(name: &'static str, width: usize) -> ColumnSpec {
    ColumnSpec {
        name,
        kind: ColumnKind::Boolean,
        width,
    }
}

const fn duration(name: &'static str, width: usize) -> ColumnSpec {
    ColumnSpec {
        name,
        kind: ColumnKind::Duration,
        width,
    }
}

const fn query(
    heading: Option<&'static str>,
    sql: &'static str,
    columns: &'static [ColumnSpec],
    empty_message: &'static str,
) -> QuerySpec {
    QuerySpec {
        heading,
        sql,
        columns,
        empty_message,
        trailing_count: None,
        numbered: false,
        footer: None,
        group_list: None,
    }
}

// ---------------------------------------------------------------------------
// Overview: six unfiltered listings plus a category count summary.
// ---------------------------------------------------------------------------

static OVERVIEW_QUERIES: &[QuerySpec] = &[
    query(
        Some("1. Directors:"),
        "SELECT director_id, first_name, last_name, nationality \
         FROM directors ORDER BY director_id",
        &[
            integer("ID", 5),
            text("First Name", 15),
            text("Last Name", 15),
            text("Nationality", 15),
        ],
        "No directors found.",
    ),
    query(
        Some("2. Actors:"),
        "SELECT actor_id, first_name, last_name, nationality, is_oscar_winner \
         FROM actors ORDER BY actor_id",
        &[
            integer("ID", 5),
            text("First Name", 15),
            text("Last Name", 15),
            text("Nationality", 15),
            boolean("Oscar Winner", 12),
        ],
        "No actors found.",
    ),
    query(
        Some("3. Films:"),
        "SELECT f.film_id, f.title, f.release_year, f.duration_minutes, \
         f.budget, f.box_office, d.first_name || ' ' || d.last_name as director \
         FROM films f \
         JOIN directors d ON f.director_id = d.director_id \
         ORDER BY f.film_id",
        &[
            integer("ID", 5),
            text("Title", 30),
            integer("Year", 8),
            duration("Duration", 12),
            currency("Budget", 15),
            currency("Box Office", 15),
            text("Director", 20),
        ],
        "No films found.",
    ),
    query(
        Some("4. Genres:"),
        "SELECT genre_id, name, description FROM genres ORDER BY genre_id",
        &[integer("ID", 5), text("Name", 15), text("Description", 30)],
        "No genres found.",
    ),
    query(
        Some("5. Film Roles:"),
        "SELECT f.title, a.first_name || ' ' || a.last_name as actor, \
         fr.character_name, fr.is_main_role \
         FROM film_roles fr \
         JOIN films f ON fr.film_id = f.film_id \
         JOIN actors a ON fr.actor_id = a.actor_id \
         ORDER BY f.title, fr.is_main_role DESC",
        &[
            text("Film", 30),
            text("Actor", 25),
            text("Character", 25),
            boolean("Main Role", 12),
        ],
        "No film roles found.",
    ),
    query(
        Some("6. Reviews:"),
        "SELECT f.title, r.reviewer_name, r.rating, r.comment \
         FROM reviews r \
         JOIN films f ON r.film_id = f.film_id \
         ORDER BY f.title, r.rating DESC",
        &[
            text("Film", 30),
            text("Reviewer", 15),
            decimal("Rating", 1, 10),
            text("Comment", 30),
        ],
        "No reviews found.",
    ),
    query(
        Some("7. Summary Statistics:"),
        "SELECT 'Directors' as category, COUNT(*)::text as count FROM directors \
         UNION ALL SELECT 'Actors', COUNT(*)::text FROM actors \
         UNION ALL SELECT 'Films', COUNT(*)::text FROM films \
         UNION ALL SELECT 'Genres', COUNT(*)::text FROM genres \
         UNION ALL SELECT 'Film Roles', COUNT(*)::text FROM film_roles \
         UNION ALL SELECT 'Reviews', COUNT(*)::text FROM reviews \
         UNION ALL SELECT 'Awards', COUNT(*)::text FROM awards \
         ORDER BY category",
        &[text("Category", 15), text("Count", 10)],
        "No data found.",
    ),
];

// ---------------------------------------------------------------------------
// Single-query reports.
// ---------------------------------------------------------------------------

static FILMS_BY_YEAR: QuerySpec = QuerySpec {
    heading: None,
    sql: "SELECT f.film_id, f.title, f.duration_minutes, \
          d.first_name || ' ' || d.last_name as director \
          FROM films f \
          LEFT JOIN directors d ON f.director_id = d.director_id \
          WHERE f.release_year = $1 \
          ORDER BY f.title",
    columns: &[
        integer("ID", 5),
        text("Title", 40),
        duration("Duration", 12),
        text("Director", 25),
    ],
    empty_message: "No films found.",
    trailing_count: Some("Total films"),
    numbered: false,
    footer: None,
    group_list: None,
};

static DIRECTOR_STATISTICS: QuerySpec = QuerySpec {
    heading: None,
    sql: "SELECT d.first_name || ' ' || d.last_name as director_name, \
          COUNT(f.film_id) as film_count, \
          SUM(f.box_office) as total_box_office, \
          AVG(f.box_office) as avg_box_office \
          FROM directors d \
          LEFT JOIN films f ON d.director_id = f.director_id \
          GROUP BY d.director_id, director_name \
          HAVING COUNT(f.film_id) > 0 \
          ORDER BY total_box_office DESC NULLS LAST",
    columns: &[
        text("Director", 25),
        integer("Films", 10),
        currency("Total Box Office", 18),
        currency("Average", 15),
    ],
    empty_message: "No directors found.",
    trailing_count: None,
    numbered: false,
    footer: None,
    group_list: None,
};

static ACTORS_BY_FILM: QuerySpec = QuerySpec {
    heading: None,
    sql: "SELECT a.first_name || ' ' || a.last_name as actor_name, \
          fr.character_name, fr.is_main_role \
          FROM film_roles fr \
          JOIN actors a ON fr.actor_id = a.actor_id \
          JOIN films f ON fr.film_id = f.film_id \
          WHERE LOWER(f.title) LIKE LOWER('%' || $1 || '%') \
          ORDER BY fr.is_main_role DESC, a.last_name",
    columns: &[
        text("Actor", 25),
        text("Character", 25),
        boolean("Main Role", 10),
    ],
    empty_message: "No actors found for films matching this title.",
    trailing_count: Some("Total actors found"),
    numbered: false,
    footer: None,
    group_list: None,
};

static TOP_GROSSING_FILMS: QuerySpec = QuerySpec {
    heading: None,
    sql: "SELECT f.title, f.release_year, f.box_office, \
          d.first_name || ' ' || d.last_name as director, \
          ROUND((f.box_office - f.budget) / f.budget * 100, 2) as roi \
          FROM films f \
          JOIN directors d ON f.director_id = d.director_id \
          WHERE f.box_office > 0 AND f.budget > 0 \
          ORDER BY f.box_office DESC \
          LIMIT $1",
    columns: &[
        text("Title", 35),
        integer("Year", 8),
        currency("Box Office", 15),
        text("Director", 20),
        decimal("ROI %", 2, 10),
    ],
    empty_message: "No films found.",
    trailing_count: None,
    numbered: false,
    footer: None,
    group_list: None,
};

static FILMS_BY_GENRE: QuerySpec = QuerySpec {
    heading: None,
    sql: "SELECT f.title, f.release_year, f.duration_minutes, \
          STRING_AGG(g.name, ', ') as genres \
          FROM films f \
          JOIN film_genres fg ON f.film_id = fg.film_id \
          JOIN genres g ON fg.genre_id = g.genre_id \
          WHERE LOWER(g.name) LIKE LOWER('%' || $1 || '%') \
          GROUP BY f.film_id, f.title, f.release_year, f.duration_minutes \
          ORDER BY f.release_year DESC",
    columns: &[
        text("Title", 35),
        integer("Year", 8),
        duration("Duration", 12),
        text("Genres", 25),
    ],
    empty_message: "No films found.",
    trailing_count: None,
    numbered: false,
    footer: None,
    group_list: None,
};

static AVERAGE_FILM_RATINGS: QuerySpec = QuerySpec {
    heading: None,
    sql: "SELECT f.title, \
          ROUND(AVG(r.rating), 2) as avg_rating, \
          COUNT(r.review_id) as review_count \
          FROM films f \
          LEFT JOIN reviews r ON f.film_id = r.film_id \
          GROUP BY f.film_id, f.title \
          HAVING COUNT(r.review_id) >= 1 \
          ORDER BY avg_rating DESC",
    columns: &[
        text("Title", 35),
        decimal("Avg Rating", 2, 12),
        integer("Reviews", 12),
    ],
    empty_message: "No ratings found.",
    trailing_count: None,
    numbered: false,
    footer: None,
    group_list: None,
};

// ---------------------------------------------------------------------------
// Demonstration suite: ten illustrative query shapes, run in sequence.
// ---------------------------------------------------------------------------

static DEMONSTRATE_QUERIES: &[QuerySpec] = &[
    query(
        Some("1. Films by director Christopher Nolan:"),
        "SELECT f.title, f.release_year, f.budget, f.box_office \
         FROM films f \
         JOIN directors d ON f.director_id = d.director_id \
         WHERE d.first_name = 'Christopher' AND d.last_name = 'Nolan'",
        &[
            text("Title", 30),
            integer("Year", 8),
            currency("Budget", 15),
            currency("Box Office", 15),
        ],
        "No films found.",
    ),
    query(
        Some("2. Average budget by release year:"),
        "SELECT release_year, AVG(budget) as avg_budget, COUNT(*) as film_count \
         FROM films \
         GROUP BY release_year \
         HAVING COUNT(*) > 0 \
         ORDER BY release_year DESC",
        &[
            integer("Year", 8),
            currency("Avg Budget", 15),
            integer("Films", 8),
        ],
        "No data found.",
    ),
    query(
        Some("3. Films with above average box office:"),
        "SELECT title, box_office \
         FROM films \
         WHERE box_office > (SELECT AVG(box_office) FROM films) \
         ORDER BY box_office DESC",
        &[text("Title", 35), currency("Box Office", 15)],
        "No films found.",
    ),
    query(
        Some("4. All directors with their film count:"),
        "SELECT d.first_name || ' ' || d.last_name as director, \
         COUNT(f.film_id) as film_count \
         FROM directors d \
         LEFT JOIN films f ON d.director_id = f.director_id \
         GROUP BY d.director_id \
         ORDER BY film_count DESC",
        &[text("Director", 25), integer("Films", 8)],
        "No directors found.",
    ),
    query(
        Some("5. Films with their genres:"),
        "SELECT f.title, STRING_AGG(g.name, ', ') as genres \
         FROM films f \
         JOIN film_genres fg ON f.film_id = fg.film_id \
         JOIN genres g ON fg.genre_id = g.genre_id \
         GROUP BY f.film_id, f.title \
         ORDER BY f.title",
        &[text("Title", 35), text("Genres", 30)],
        "No films found.",
    ),
    QuerySpec {
        heading: Some("6. Top 3 highest grossing films:"),
        sql: "SELECT title, box_office \
              FROM films \
              ORDER BY box_office DESC \
              LIMIT 3",
        columns: &[text("Title", 35), currency("Box Office", 15)],
        empty_message: "No films found.",
        trailing_count: None,
        numbered: true,
        footer: None,
        group_list: None,
    },
    query(
        Some("7. Film profitability analysis:"),
        "SELECT title, budget, box_office, \
         CASE \
           WHEN box_office > budget * 5 THEN 'Blockbuster' \
           WHEN box_office > budget * 2 THEN 'Successful' \
           WHEN box_office > budget THEN 'Profitable' \
           ELSE 'Unprofitable' \
         END as profitability \
         FROM films \
         ORDER BY box_office DESC",
        &[
            text("Title", 35),
            currency("Budget", 15),
            currency("Box Office", 15),
            text("Profitability", 15),
        ],
        "No films found.",
    ),
    query(
        Some("8. Films ranked within their release year:"),
        "SELECT title, release_year, box_office, \
         RANK() OVER (PARTITION BY release_year ORDER BY box_office DESC) as yearly_rank \
         FROM films \
         ORDER BY release_year, yearly_rank",
        &[
            text("Title", 35),
            integer("Year", 8),
            currency("Box Office", 15),
            integer("Rank", 8),
        ],
        "No films found.",
    ),
    query(
        Some("9. All people in cinema (directors and actors):"),
        "SELECT first_name || ' ' || last_name as name, 'Director' as role \
         FROM directors \
         UNION \
         SELECT first_name || ' ' || last_name as name, 'Actor' as role \
         FROM actors \
         ORDER BY name \
         LIMIT 5",
        &[text("Name", 25), text("Role", 10)],
        "No people found.",
    ),
    query(
        Some("10. Directors who have won awards:"),
        "SELECT d.first_name || ' ' || d.last_name as director \
         FROM directors d \
         WHERE EXISTS (\
           SELECT 1 FROM films f \
           JOIN film_awards fa ON f.film_id = fa.film_id \
           WHERE f.director_id = d.director_id\
         )",
        &[text("Director", 25)],
        "No directors found.",
    ),
];

// ---------------------------------------------------------------------------
// Duration statistics: CASE bucketing in SQL, weighted footer client-side.
// ---------------------------------------------------------------------------

static DURATION_STATISTICS: QuerySpec = QuerySpec {
    heading: None,
    sql: "WITH duration_categories AS (\
            SELECT f.film_id, f.title, f.duration_minutes, r.rating, \
              CASE \
                WHEN f.duration_minutes < 100 THEN 'Short' \
                WHEN f.duration_minutes < 200 THEN 'Medium' \
                ELSE 'Long' \
              END as duration_category \
            FROM films f \
            LEFT JOIN reviews r ON f.film_id = r.film_id\
          ) \
          SELECT duration_category, \
            COUNT(DISTINCT film_id) as film_count, \
            ROUND(AVG(duration_minutes)::numeric, 1) as avg_duration, \
            ROUND(AVG(rating)::numeric, 2) as avg_rating, \
            MIN(rating) as min_rating, \
            MAX(rating) as max_rating, \
            STRING_AGG(DISTINCT title, ', ' ORDER BY title) as films \
          FROM duration_categories \
          GROUP BY duration_category \
          HAVING COUNT(DISTINCT film_id) > 0 \
          ORDER BY \
            CASE duration_category \
              WHEN 'Short' THEN 1 \
              WHEN 'Medium' THEN 2 \
              ELSE 3 \
            END",
    columns: &[
        text("Duration Category", 20),
        integer("Films", 8),
        duration("Avg Duration", 15),
        decimal("Avg Rating", 2, 12),
        decimal("Min Rating", 2, 12),
        decimal("Max Rating", 2, 12),
        text("Film List", 35),
    ],
    empty_message: "No data found.",
    trailing_count: None,
    numbered: false,
    footer: Some(WeightedFooter {
        label: "OVERALL",
        count_col: 1,
        avg_col: 3,
    }),
    group_list: Some(GroupList {
        heading: "Film List by Category",
        name_col: 0,
        items_col: 6,
    }),
};

// ---------------------------------------------------------------------------
// The catalog.
// ---------------------------------------------------------------------------

pub static CATALOG: &[ReportSpec] = &[
    ReportSpec {
        name: "overview",
        title: "Test Data Overview",
        params: &[],
        kind: ReportKind::Queries(OVERVIEW_QUERIES),
    },
    ReportSpec {
        name: "films-by-year",
        title: "Films released in {0}",
        params: &[ParamSpec {
            kind: ParamKind::Integer,
            prompt: "Enter year",
        }],
        kind: ReportKind::Queries(std::slice::from_ref(&FILMS_BY_YEAR)),
    },
    ReportSpec {
        name: "director-statistics",
        title: "Director Statistics",
        params: &[],
        kind: ReportKind::Queries(std::slice::from_ref(&DIRECTOR_STATISTICS)),
    },
    ReportSpec {
        name: "actors-by-film",
        title: "Actors in films matching \"{0}\"",
        params: &[ParamSpec {
            kind: ParamKind::Text,
            prompt: "Enter film title",
        }],
        kind: ReportKind::Queries(std::slice::from_ref(&ACTORS_BY_FILM)),
    },
    ReportSpec {
        name: "top-grossing-films",
        title: "Top {0} Grossing Films",
        params: &[ParamSpec {
            kind: ParamKind::Integer,
            prompt: "Enter limit",
        }],
        kind: ReportKind::Queries(std::slice::from_ref(&TOP_GROSSING_FILMS)),
    },
    ReportSpec {
        name: "films-by-genre",
        title: "Films in genre: {0}",
        params: &[ParamSpec {
            kind: ParamKind::Text,
            prompt: "Enter genre",
        }],
        kind: ReportKind::Queries(std::slice::from_ref(&FILMS_BY_GENRE)),
    },
    ReportSpec {
        name: "average-film-ratings",
        title: "Average Film Ratings",
        params: &[],
        kind: ReportKind::Queries(std::slice::from_ref(&AVERAGE_FILM_RATINGS)),
    },
    ReportSpec {
        name: "add-film",
        title: "Add New Film",
        params: &[
            ParamSpec {
                kind: ParamKind::Text,
                prompt: "Enter title",
            },
            ParamSpec {
                kind: ParamKind::Integer,
                prompt: "Enter release year",
            },
            ParamSpec {
                kind: ParamKind::Integer,
                prompt: "Enter duration (minutes)",
            },
            ParamSpec {
                kind: ParamKind::Float,
                prompt: "Enter budget",
            },
            ParamSpec {
                kind: ParamKind::Float,
                prompt: "Enter box office",
            },
            ParamSpec {
                kind: ParamKind::Integer,
                prompt: "Enter director ID",
            },
        ],
        kind: ReportKind::Mutation {
            sql: "INSERT INTO films \
                  (title, release_year, duration_minutes, budget, box_office, director_id) \
                  VALUES ($1, $2, $3, $4, $5, $6) RETURNING film_id",
            success: "Film added successfully! Film ID:",
            returns_id: true,
        },
    },
    ReportSpec {
        name: "add-actor",
        title: "Add New Actor",
        params: &[
            ParamSpec {
                kind: ParamKind::Text,
                prompt: "Enter first name",
            },
            ParamSpec {
                kind: ParamKind::Text,
                prompt: "Enter last name",
            },
            ParamSpec {
                kind: ParamKind::Text,
                prompt: "Enter birth date (YYYY-MM-DD)",
            },
            ParamSpec {
                kind: ParamKind::Text,
                prompt: "Enter nationality",
            },
            ParamSpec {
                kind: ParamKind::Boolean,
                prompt: "Oscar winner? (y/n)",
            },
        ],
        kind: ReportKind::Mutation {
            sql: "INSERT INTO actors \
                  (first_name, last_name, birth_date, nationality, is_oscar_winner) \
                  VALUES ($1, $2, $3::date, $4, $5) RETURNING actor_id",
            success: "Actor added successfully! Actor ID:",
            returns_id: true,
        },
    },
    ReportSpec {
        name: "update-film-box-office",
        title: "Update Film Box Office",
        params: &[
            ParamSpec {
                kind: ParamKind::Integer,
                prompt: "Enter film ID",
            },
            ParamSpec {
                kind: ParamKind::Float,
                prompt: "Enter new box office",
            },
        ],
        kind: ReportKind::Mutation {
            sql: "UPDATE films SET box_office = $2 WHERE film_id = $1",
            success: "Film box office updated successfully!",
            returns_id: false,
        },
    },
    ReportSpec {
        name: "demonstrate-all",
        title: "Demonstrating All 10 Required SQL Queries",
        params: &[],
        kind: ReportKind::Queries(DEMONSTRATE_QUERIES),
    },
    ReportSpec {
        name: "duration-statistics",
        title: "Film Duration Statistics",
        params: &[],
        kind: ReportKind::Queries(std::slice::from_ref(&DURATION_STATISTICS)),
    },
];

/// Look up a report by name, case-insensitively.
pub fn find(name: &str) -> Option<&'static ReportSpec> {
    CATALOG
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name.trim()))
}

/// Resolve a report request into an executable spec plus bound parameters.
///
/// Fails with `UnknownReport` for an unrecognized name, and with
/// `ParameterCountMismatch` when the supplied parameter count or types do
/// not line up with the spec. Integer values are accepted for Float slots.
pub fn resolve(
    name: &str,
    params: &[ParamValue],
) -> Result<(&'static ReportSpec, Vec<ParamValue>)> {
    let spec = find(name).ok_or_else(|| CliError::UnknownReport(name.to_string()))?;

    if params.len() != spec.params.len() {
        return Err(CliError::ParameterCountMismatch {
            report: spec.name,
            expected: spec.params.len(),
            actual: params.len(),
        });
    }

    let mut bound = Vec::with_capacity(params.len());
    for (value, decl) in params.iter().zip(spec.params) {
        if !decl.kind.matches(value) {
            return Err(CliError::ParameterCountMismatch {
                report: spec.name,
                expected: spec.params.len(),
                actual: params.len(),
            });
        }
        // Widen integers bound to float slots so the wire type matches.
        let value = match (decl.kind, value) {
            (ParamKind::Float, ParamValue::Integer(v)) => ParamValue::Float(*v as f64),
            _ => value.clone(),
        };
        bound.push(value);
    }

    Ok((spec, bound))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_case_insensitive() {
        assert!(find("Films-By-Year").is_some());
        assert!(find(" overview ").is_some());
        assert!(find("frobnicate").is_none());
    }

    #[test]
    fn test_resolve_unknown_report() {
        let err = resolve("nonsense", &[]).unwrap_err();
        assert!(matches!(err, CliError::UnknownReport(_)));
    }

    #[test]
    fn test_resolve_parameter_count() {
        let err = resolve("films-by-year", &[]).unwrap_err();
        assert!(matches!(
            err,
            CliError::ParameterCountMismatch {
                expected: 1,
                actual: 0,
                ..
            }
        ));

        let ok = resolve("films-by-year", &[ParamValue::Integer(2010)]);
        assert!(ok.is_ok());
    }

    #[test]
    fn test_resolve_parameter_type() {
        let err = resolve("films-by-year", &[ParamValue::Text("2010".into())]).unwrap_err();
        assert!(matches!(err, CliError::ParameterCountMismatch { .. }));
    }

    #[test]
    fn test_resolve_widens_integer_to_float() {
        let (_, bound) = resolve(
            "update-film-box-office",
            &[ParamValue::Integer(1), ParamValue::Integer(825_000_000)],
        )
        .unwrap();
        assert_eq!(bound[0], ParamValue::Integer(1));
        assert_eq!(bound[1], ParamValue::Float(825_000_000.0));
    }

    #[test]
    fn test_param_kind_parse() {
        assert_eq!(
            ParamKind::Integer.parse("2010").unwrap(),
            ParamValue::Integer(2010)
        );
        assert_eq!(
            ParamKind::Boolean.parse("y").unwrap(),
            ParamValue::Boolean(true)
        );
        assert_eq!(
            ParamKind::Boolean.parse("N").unwrap(),
            ParamValue::Boolean(false)
        );
        assert!(ParamKind::Integer.parse("abc").is_err());
        assert!(ParamKind::Boolean.parse("maybe").is_err());
    }

    #[test]
    fn test_catalog_column_shapes_are_consistent() {
        // Footer/group-list column indices must point inside the declared
        // column list.
        for spec in CATALOG {
            if let ReportKind::Queries(queries) = spec.kind {
                for q in queries {
                    if let Some(footer) = q.footer {
                        assert!(footer.count_col < q.columns.len());
                        assert!(footer.avg_col < q.columns.len());
                    }
                    if let Some(list) = q.group_list {
                        assert!(list.name_col < q.columns.len());
                        assert!(list.items_col < q.columns.len());
                    }
                }
            }
        }
    }
}
