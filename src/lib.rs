//! Interactive SQL reporting terminal for a cinema database.
//!
//! The crate is a thin pipeline: a static report [`catalog`] describes what
//! can be run, a [`store`] executes SQL against PostgreSQL, [`render`] lays
//! decoded rows out as aligned text, and [`reports`] glues the three
//! together. [`session`] wraps it all in a numbered menu loop.

pub mod catalog;
pub mod config;
pub mod error;
pub mod render;
pub mod reports;
pub mod session;
pub mod store;

pub use catalog::{ParamKind, ReportKind, ReportSpec, CATALOG};
pub use config::Config;
pub use error::{CliError, Result};
pub use render::{ColumnKind, ColumnSpec};
pub use reports::run_report;
pub use session::Session;
pub use store::{Cell, ParamValue, PostgresStore, ResultRow, Store, StoreError};
