use super::handle::DbHandle;
use super::ident::Ident;
use super::reader::{check_row_position, order_by_clause, SortSpec};
use super::schema::{primary_key, table_info};
use crate::error::{AppError, AppResult};
use rusqlite::types::Value;
use rusqlite::OptionalExtension;
use shared_types::CellValue;

/// Set one cell, addressed by its row position in `sort` order.
///
/// The row is located by position and then updated through its primary key.
/// The locate and the write are separate statements with no transaction
/// around them, so a concurrent insert or delete ahead of the position moves
/// the update onto a different row.
pub fn update_cell(
    handle: &DbHandle,
    table: &str,
    row_position: i64,
    column: &str,
    new_value: &CellValue,
    sort: Option<&SortSpec>,
) -> AppResult<usize> {
    update_at_position(
        handle,
        table,
        row_position,
        column,
        super::cell_to_sql(new_value),
        sort,
    )
}

/// [`update_cell`] for a binary payload
pub fn update_blob(
    handle: &DbHandle,
    table: &str,
    row_position: i64,
    column: &str,
    data: Vec<u8>,
    sort: Option<&SortSpec>,
) -> AppResult<usize> {
    update_at_position(handle, table, row_position, column, Value::Blob(data), sort)
}

fn update_at_position(
    handle: &DbHandle,
    table: &str,
    row_position: i64,
    column: &str,
    value: Value,
    sort: Option<&SortSpec>,
) -> AppResult<usize> {
    check_row_position(row_position)?;

    let table = Ident::table(handle, table)?;
    let columns = table_info(handle, &table)?;

    let key: Vec<Ident> = primary_key(&columns)
        .into_iter()
        .map(|c| Ident::from_catalog(c.name.as_str()))
        .collect();
    if key.is_empty() {
        return Err(AppError::Unsupported("Table has no primary key".to_string()));
    }

    let target = Ident::column(&columns, column)?;
    let order_by = order_by_clause(&columns, sort)?;

    let key_list = key
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let locate_sql = format!(
        "SELECT {} FROM {}{} LIMIT 1 OFFSET ?",
        key_list, table, order_by
    );

    let key_values: Vec<Value> = handle
        .conn()
        .query_row(&locate_sql, [row_position], |row| {
            (0..key.len()).map(|i| row.get::<_, Value>(i)).collect()
        })
        .optional()?
        .ok_or_else(|| AppError::NotFound("Row not found".to_string()))?;

    // IS so that NULL values in a composite key still match
    let where_clause = key
        .iter()
        .map(|k| format!("{} IS ?", k))
        .collect::<Vec<_>>()
        .join(" AND ");
    let update_sql = format!("UPDATE {} SET {} = ? WHERE {}", table, target, where_clause);

    let mut params = Vec::with_capacity(key_values.len() + 1);
    params.push(value);
    params.extend(key_values);

    let changed = handle
        .conn()
        .execute(&update_sql, rusqlite::params_from_iter(params))?;

    tracing::info!(
        "Updated {}.{} at row position {} ({} row(s) changed)",
        table.name(),
        target.name(),
        row_position,
        changed
    );

    // The located row was deleted or the write was suppressed
    if changed == 0 {
        return Err(AppError::NotFound("Row not found".to_string()));
    }

    Ok(changed)
}
