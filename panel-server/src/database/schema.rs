use super::handle::DbHandle;
use super::ident::Ident;
use crate::error::AppResult;
use shared_types::{ColumnDescriptor, TableOverview};
use std::fmt::Write;

/// User tables in catalog order
pub fn list_tables(handle: &DbHandle) -> AppResult<Vec<String>> {
    let mut stmt = handle
        .conn()
        .prepare("SELECT name FROM sqlite_master WHERE type='table'")?;
    let tables = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tables)
}

pub fn table_info(handle: &DbHandle, table: &Ident) -> AppResult<Vec<ColumnDescriptor>> {
    let sql = format!("PRAGMA table_info({})", table);
    let mut stmt = handle.conn().prepare(&sql)?;
    let columns = stmt
        .query_map([], |row| {
            Ok(ColumnDescriptor {
                cid: row.get("cid")?,
                name: row.get("name")?,
                column_type: row.get("type")?,
                notnull: row.get("notnull")?,
                dflt_value: row.get("dflt_value")?,
                pk: row.get("pk")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}

pub fn row_count(handle: &DbHandle, table: &Ident) -> AppResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", table);
    Ok(handle.conn().query_row(&sql, [], |row| row.get(0))?)
}

/// Row counts for every table.
///
/// A table that cannot be counted is reported with `row_count = -1`; only a
/// failure to list the tables aborts.
pub fn database_overview(handle: &DbHandle) -> AppResult<Vec<TableOverview>> {
    let tables = list_tables(handle)?;
    Ok(overview_from(tables, |name| {
        row_count(handle, &Ident::from_catalog(name))
    }))
}

fn overview_from<F>(tables: Vec<String>, count: F) -> Vec<TableOverview>
where
    F: Fn(&str) -> AppResult<i64>,
{
    tables
        .into_iter()
        .map(|name| {
            let row_count = match count(&name) {
                Ok(count) => count,
                Err(e) => {
                    tracing::warn!("Failed to count rows of table {}: {}", name, e);
                    -1
                }
            };
            TableOverview {
                table_name: name,
                row_count,
            }
        })
        .collect()
}

/// Primary-key columns ordered by their position in the key
pub fn primary_key(columns: &[ColumnDescriptor]) -> Vec<&ColumnDescriptor> {
    let mut key: Vec<&ColumnDescriptor> = columns.iter().filter(|c| c.is_primary_key()).collect();
    key.sort_by_key(|c| c.pk);
    key
}

/// Plain-text schema handed to the SQL generator
pub fn describe_schema(handle: &DbHandle) -> AppResult<String> {
    let mut schema = String::from("Database Schema:\n\n");

    for table in list_tables(handle)? {
        let columns = table_info(handle, &Ident::from_catalog(table.as_str()))?;

        let _ = writeln!(schema, "Table: {}", table);
        for column in &columns {
            let _ = write!(schema, "  - {} ({}", column.name, column.column_type);
            if column.is_not_null() {
                schema.push_str(" NOT NULL");
            }
            if column.is_primary_key() {
                schema.push_str(" PRIMARY KEY");
            }
            schema.push_str(")\n");
        }
        schema.push('\n');
    }

    Ok(schema)
}
