//! Store execution interface
//!
//! The database itself is an external collaborator: this module defines the
//! narrow surface the catalog runs against (SQL text plus positional
//! parameters in, nullable typed cells out) and the PostgreSQL-backed
//! implementation used by the binary. Tests substitute their own [`Store`].

use std::fmt;

use postgres::types::{ToSql, Type};
use postgres::{Client, NoTls, Row};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// A single nullable scalar value decoded from the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    Null,
}

/// One result row: an ordered sequence of cells.
pub type ResultRow = Vec<Cell>;

/// A positional query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
}

impl ParamValue {
    /// Wire type used when preparing the statement. Forcing the parameter
    /// types here keeps server-side inference out of the picture.
    pub fn sql_type(&self) -> Type {
        match self {
            ParamValue::Integer(_) => Type::INT8,
            ParamValue::Float(_) => Type::FLOAT8,
            ParamValue::Text(_) => Type::TEXT,
            ParamValue::Boolean(_) => Type::BOOL,
        }
    }

    fn as_sql(&self) -> &(dyn ToSql + Sync) {
        match self {
            ParamValue::Integer(v) => v,
            ParamValue::Float(v) => v,
            ParamValue::Text(v) => v,
            ParamValue::Boolean(v) => v,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Integer(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Text(v) => write!(f, "{}", v),
            ParamValue::Boolean(v) => write!(f, "{}", v),
        }
    }
}

/// Errors surfaced by the store layer
#[derive(Debug)]
pub enum StoreError {
    /// Could not establish the connection
    Connection(String),

    /// Statement failed (malformed SQL, constraint violation, ...)
    Execution(String),

    /// A returned value could not be decoded into a [`Cell`]
    Decode { column: usize, message: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Connection(msg) => write!(f, "Store connection error: {}", msg),
            StoreError::Execution(msg) => write!(f, "Store execution error: {}", msg),
            StoreError::Decode { column, message } => {
                write!(f, "Failed to decode column {}: {}", column, message)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<postgres::Error> for StoreError {
    fn from(err: postgres::Error) -> Self {
        StoreError::Execution(err.to_string())
    }
}

/// Query-execution interface consumed by the report runner.
///
/// One statement in flight at a time; implementations are synchronous.
pub trait Store {
    /// Run a row-returning statement with positional parameters.
    fn execute(&mut self, sql: &str, params: &[ParamValue]) -> Result<Vec<ResultRow>, StoreError>;

    /// Run a mutation. Returns the generated id when the statement carries a
    /// RETURNING clause, `None` otherwise.
    fn execute_mutation(
        &mut self,
        sql: &str,
        params: &[ParamValue],
    ) -> Result<Option<i64>, StoreError>;
}

/// PostgreSQL-backed store. Owns the single long-lived connection for the
/// session; dropping it releases the connection on every exit path.
pub struct PostgresStore {
    client: Client,
}

impl PostgresStore {
    /// Connect with a libpq-style connection string
    /// (`host=... port=... dbname=... user=... password=...`).
    pub fn connect(conn_string: &str) -> Result<Self, StoreError> {
        let client = Client::connect(conn_string, NoTls)
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self { client })
    }

    fn bind(params: &[ParamValue]) -> (Vec<Type>, Vec<&(dyn ToSql + Sync)>) {
        let types = params.iter().map(ParamValue::sql_type).collect();
        let args = params.iter().map(ParamValue::as_sql).collect();
        (types, args)
    }
}

impl Store for PostgresStore {
    fn execute(&mut self, sql: &str, params: &[ParamValue]) -> Result<Vec<ResultRow>, StoreError> {
        tracing::debug!(sql, params = params.len(), "executing query");
        let (types, args) = Self::bind(params);
        let stmt = self.client.prepare_typed(sql, &types)?;
        let rows = self.client.query(&stmt, &args)?;

        let mut decoded = Vec::with_capacity(rows.len());
        for row in &rows {
            decoded.push(decode_row(row)?);
        }
        Ok(decoded)
    }

    fn execute_mutation(
        &mut self,
        sql: &str,
        params: &[ParamValue],
    ) -> Result<Option<i64>, StoreError> {
        tracing::debug!(sql, params = params.len(), "executing mutation");
        let (types, args) = Self::bind(params);

        let mut tx = self.client.transaction()?;
        let stmt = tx.prepare_typed(sql, &types)?;
        let rows = tx.query(&stmt, &args)?;
        tx.commit()?;

        // A RETURNING clause yields exactly one row with the generated id.
        match rows.first() {
            Some(row) => match decode_cell(row, 0)? {
                Cell::Integer(id) => Ok(Some(id)),
                other => Err(StoreError::Decode {
                    column: 0,
                    message: format!("expected integer id, got {:?}", other),
                }),
            },
            None => Ok(None),
        }
    }
}

fn decode_row(row: &Row) -> Result<ResultRow, StoreError> {
    let mut cells = Vec::with_capacity(row.len());
    for idx in 0..row.len() {
        cells.push(decode_cell(row, idx)?);
    }
    Ok(cells)
}

/// NULL-aware decoding keyed on the declared column type. Anything the typed
/// arms do not cover is fetched as text.
fn decode_cell(row: &Row, idx: usize) -> Result<Cell, StoreError> {
    let ty = row.columns()[idx].type_().clone();
    let decode_err = |e: postgres::Error| StoreError::Decode {
        column: idx,
        message: e.to_string(),
    };

    let cell = if ty == Type::BOOL {
        row.try_get::<_, Option<bool>>(idx)
            .map_err(decode_err)?
            .map_or(Cell::Null, Cell::Boolean)
    } else if ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(idx)
            .map_err(decode_err)?
            .map_or(Cell::Null, |v| Cell::Integer(i64::from(v)))
    } else if ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(idx)
            .map_err(decode_err)?
            .map_or(Cell::Null, |v| Cell::Integer(i64::from(v)))
    } else if ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(idx)
            .map_err(decode_err)?
            .map_or(Cell::Null, Cell::Integer)
    } else if ty == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(idx)
            .map_err(decode_err)?
            .map_or(Cell::Null, |v| Cell::Decimal(f64::from(v)))
    } else if ty == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(idx)
            .map_err(decode_err)?
            .map_or(Cell::Null, Cell::Decimal)
    } else if ty == Type::NUMERIC {
        match row.try_get::<_, Option<Decimal>>(idx).map_err(decode_err)? {
            Some(d) => d.to_f64().map_or(Cell::Null, Cell::Decimal),
            None => Cell::Null,
        }
    } else {
        row.try_get::<_, Option<String>>(idx)
            .map_err(decode_err)?
            .map_or(Cell::Null, Cell::Text)
    };

    Ok(cell)
}
