use super::handle::DbHandle;
use super::ident::Ident;
use super::schema::{row_count, table_info};
use crate::error::{AppError, AppResult};
use rusqlite::types::ValueRef;
use rusqlite::OptionalExtension;
use shared_types::{
    CellValue, ColumnDescriptor, PaginatedResult, Pagination, Row, SortDirection, BLOB_MARKER,
};

/// Longest text value returned by the table browser, in characters
pub const MAX_TEXT_CHARS: usize = 1000;

/// Requested ordering of a table view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Build from raw request parameters.
    ///
    /// No (or an empty) column means natural order; the direction is then ignored.
    pub fn from_params(column: Option<&str>, direction: Option<&str>) -> AppResult<Option<Self>> {
        let column = match column {
            Some(c) if !c.is_empty() => c,
            _ => return Ok(None),
        };

        let direction = match direction {
            None | Some("") => SortDirection::Asc,
            Some(d) => SortDirection::parse(d).ok_or_else(|| {
                AppError::BadRequest(format!("Invalid sort direction: {}", d))
            })?,
        };

        Ok(Some(SortSpec {
            column: column.to_string(),
            direction,
        }))
    }
}

/// `ORDER BY` clause (with leading space) for `sort`, or an empty string
pub(crate) fn order_by_clause(
    columns: &[ColumnDescriptor],
    sort: Option<&SortSpec>,
) -> AppResult<String> {
    match sort {
        Some(spec) => {
            let column = Ident::column(columns, &spec.column)?;
            Ok(format!(" ORDER BY {} {}", column, spec.direction.as_sql()))
        }
        None => Ok(String::new()),
    }
}

/// Reject negative row positions before they reach `OFFSET`
pub(crate) fn check_row_position(row_position: i64) -> AppResult<()> {
    if row_position < 0 {
        return Err(AppError::BadRequest(
            "Row index must not be negative".to_string(),
        ));
    }
    Ok(())
}

/// One page of `table`, sorted if requested
pub fn read_page(
    handle: &DbHandle,
    table: &str,
    page: i64,
    items_per_page: i64,
    sort: Option<&SortSpec>,
) -> AppResult<PaginatedResult> {
    if page < 1 {
        return Err(AppError::BadRequest("Page must be at least 1".to_string()));
    }
    if items_per_page < 1 {
        return Err(AppError::BadRequest(
            "Items per page must be at least 1".to_string(),
        ));
    }
    let offset = (page - 1)
        .checked_mul(items_per_page)
        .ok_or_else(|| AppError::BadRequest("Page is out of range".to_string()))?;

    let table = Ident::table(handle, table)?;
    let columns = table_info(handle, &table)?;
    let total = row_count(handle, &table)?;
    let order_by = order_by_clause(&columns, sort)?;

    let blob_columns: Vec<&str> = columns
        .iter()
        .filter(|c| c.is_blob())
        .map(|c| c.name.as_str())
        .collect();

    let sql = format!("SELECT * FROM {}{} LIMIT ? OFFSET ?", table, order_by);
    tracing::debug!("Reading page {} of {}: {}", page, table.name(), sql);

    let mut stmt = handle.conn().prepare(&sql)?;
    let names: Vec<String> = stmt.column_names().iter().map(|n| n.to_string()).collect();

    let rows = stmt
        .query_map([items_per_page, offset], |row| {
            let mut out = Row::with_capacity(names.len());
            for (i, name) in names.iter().enumerate() {
                let value = if blob_columns.contains(&name.as_str()) {
                    CellValue::Text(BLOB_MARKER.to_string())
                } else {
                    display_cell(row.get_ref(i)?)
                };
                out.push(name.as_str(), value);
            }
            Ok(out)
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PaginatedResult {
        columns,
        rows,
        pagination: Pagination::new(total, page, items_per_page),
    })
}

/// Browser rendering of one cell: blobs are redacted and long text is cut
fn display_cell(value: ValueRef<'_>) -> CellValue {
    match value {
        ValueRef::Blob(_) => CellValue::Text(BLOB_MARKER.to_string()),
        ValueRef::Text(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            match text.char_indices().nth(MAX_TEXT_CHARS) {
                Some((cut, _)) => CellValue::Text(format!("{}...", &text[..cut])),
                None => CellValue::Text(text.into_owned()),
            }
        }
        other => super::cell_from_ref(other),
    }
}

/// Raw bytes of one cell, addressed by row position within `sort` order
pub fn fetch_blob(
    handle: &DbHandle,
    table: &str,
    row_position: i64,
    column: &str,
    sort: Option<&SortSpec>,
) -> AppResult<Vec<u8>> {
    check_row_position(row_position)?;

    let table = Ident::table(handle, table)?;
    let columns = table_info(handle, &table)?;
    let column = Ident::column(&columns, column)?;
    let order_by = order_by_clause(&columns, sort)?;

    let sql = format!(
        "SELECT {} FROM {}{} LIMIT 1 OFFSET ?",
        column, table, order_by
    );

    let value = handle
        .conn()
        .query_row(&sql, [row_position], |row| {
            Ok(super::cell_from_ref(row.get_ref(0)?))
        })
        .optional()?;

    match value {
        None => Err(AppError::NotFound("Row not found".to_string())),
        Some(CellValue::Null) => Err(AppError::NotFound("Blob data is null".to_string())),
        Some(CellValue::Blob(bytes)) => Ok(bytes),
        Some(_) => Err(AppError::NotFound("Blob data not found".to_string())),
    }
}
