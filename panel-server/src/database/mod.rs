//! Per-request access to the operator's SQLite file.
//!
//! Every request opens its own [`DbHandle`], does its work through the
//! helpers below, and closes the handle again. Identifiers only reach SQL
//! text through [`Ident`].

pub mod executor;
pub mod handle;
pub mod ident;
pub mod reader;
pub mod schema;
pub mod updater;

pub use executor::{execute_batch, split_statements};
pub use handle::{probe, with_handle, DbHandle};
pub use ident::Ident;
pub use reader::{fetch_blob, read_page, SortSpec};
pub use schema::{database_overview, describe_schema, list_tables, primary_key, row_count, table_info};
pub use updater::{update_blob, update_cell};

use rusqlite::types::ValueRef;
use shared_types::CellValue;

/// Convert a borrowed engine value into an owned cell
pub(crate) fn cell_from_ref(value: ValueRef<'_>) -> CellValue {
    match value {
        ValueRef::Null => CellValue::Null,
        ValueRef::Integer(i) => CellValue::Integer(i),
        ValueRef::Real(f) => CellValue::Real(f),
        ValueRef::Text(s) => CellValue::Text(String::from_utf8_lossy(s).into_owned()),
        ValueRef::Blob(b) => CellValue::Blob(b.to_vec()),
    }
}

/// Borrow a cell as a bindable engine value
pub(crate) fn cell_to_sql(value: &CellValue) -> rusqlite::types::Value {
    match value {
        CellValue::Null => rusqlite::types::Value::Null,
        CellValue::Integer(i) => rusqlite::types::Value::Integer(*i),
        CellValue::Real(f) => rusqlite::types::Value::Real(*f),
        CellValue::Text(s) => rusqlite::types::Value::Text(s.clone()),
        CellValue::Blob(b) => rusqlite::types::Value::Blob(b.clone()),
    }
}
