use super::handle::DbHandle;
use super::schema::list_tables;
use crate::error::{AppError, AppResult};
use shared_types::ColumnDescriptor;
use std::fmt;

const MAX_IDENT_LEN: usize = 255;

/// A table or column name that is known to exist, rendered as a quoted SQL identifier.
///
/// This is the only value that may be spliced into SQL text; everything else is bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident(String);

impl Ident {
    /// Validate `name` against the live table list of `handle`
    pub fn table(handle: &DbHandle, name: &str) -> AppResult<Self> {
        check_plausible(name, "table")?;

        let tables = list_tables(handle)?;
        if tables.iter().any(|t| t == name) {
            Ok(Ident(name.to_string()))
        } else {
            tracing::warn!("Rejected unknown table name {:?}", name);
            Err(AppError::BadRequest(format!("Unknown table: {}", name)))
        }
    }

    /// Validate `name` against a table's column descriptors
    pub fn column(columns: &[ColumnDescriptor], name: &str) -> AppResult<Self> {
        check_plausible(name, "column")?;

        if columns.iter().any(|c| c.name == name) {
            Ok(Ident(name.to_string()))
        } else {
            Err(AppError::BadRequest(format!("Unknown column: {}", name)))
        }
    }

    /// For names read straight out of the catalog or `PRAGMA table_info`
    pub(crate) fn from_catalog(name: impl Into<String>) -> Self {
        Ident(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0.replace('"', "\"\""))
    }
}

fn check_plausible(name: &str, kind: &str) -> AppResult<()> {
    if name.is_empty() {
        return Err(AppError::BadRequest(format!("A {} name is required", kind)));
    }
    if name.len() > MAX_IDENT_LEN {
        return Err(AppError::BadRequest(format!("The {} name is too long", kind)));
    }
    if name.chars().any(char::is_control) {
        return Err(AppError::BadRequest(format!(
            "The {} name contains control characters",
            kind
        )));
    }
    Ok(())
}
