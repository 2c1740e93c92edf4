use super::handle::DbHandle;
use crate::error::{AppError, AppResult};
use rusqlite::Connection;
use shared_types::{ColumnName, ExecuteQueryResponse, QueryOutcome, Row};

/// Split free-form SQL on `;`, trimming and dropping empty pieces.
///
/// This is a plain text split: a `;` inside a string literal or quoted
/// identifier breaks that statement in two.
pub fn split_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Run every statement of `sql` in order on one handle.
///
/// A failing statement is reported in its slot and does not stop the batch.
pub fn execute_batch(handle: &DbHandle, sql: &str) -> AppResult<ExecuteQueryResponse> {
    let queries = split_statements(sql);
    if queries.is_empty() {
        return Err(AppError::BadRequest("SQL query is required".to_string()));
    }

    let results = queries
        .iter()
        .map(|query| match execute_one(handle.conn(), query) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::info!("Statement failed: {}", e);
                QueryOutcome::Error {
                    query: query.clone(),
                    error: e.to_string(),
                }
            }
        })
        .collect::<Vec<_>>();

    let failed = results.iter().filter(|r| r.is_error()).count();
    tracing::info!(
        "Executed {} statement(s), {} failed",
        queries.len(),
        failed
    );

    Ok(ExecuteQueryResponse { queries, results })
}

fn execute_one(conn: &Connection, query: &str) -> rusqlite::Result<QueryOutcome> {
    let mut stmt = conn.prepare(query)?;

    if stmt.column_count() == 0 {
        let before = total_changes(conn)?;
        stmt.execute([])?;
        let after = total_changes(conn)?;
        return Ok(QueryOutcome::Empty {
            rows_affected: usize::try_from(after - before).unwrap_or(0),
        });
    }

    let names: Vec<String> = stmt.column_names().iter().map(|n| n.to_string()).collect();
    let layout = object_layout(&names);

    let rows = stmt
        .query_map([], |row| {
            let mut out = Row::with_capacity(layout.len());
            for (name, index) in &layout {
                out.push(name.as_str(), super::cell_from_ref(row.get_ref(*index)?));
            }
            Ok(out)
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let columns = rows
        .first()
        .map(|row| row.column_names().map(ColumnName::new).collect())
        .unwrap_or_default();

    Ok(QueryOutcome::Rows { columns, rows })
}

/// Row changes made by the connection so far, as counted by the engine
fn total_changes(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT total_changes()", [], |row| row.get(0))
}

/// Keyed-object layout of a result: each distinct name once, in first-seen
/// order, taking the value of its last occurrence.
fn object_layout(names: &[String]) -> Vec<(String, usize)> {
    let mut layout: Vec<(String, usize)> = Vec::with_capacity(names.len());
    for (index, name) in names.iter().enumerate() {
        match layout.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = index,
            None => layout.push((name.clone(), index)),
        }
    }
    layout
}
