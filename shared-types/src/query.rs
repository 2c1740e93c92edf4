use crate::schema::ColumnName;
use crate::value::Row;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteQueryRequest {
    pub sql_query: Option<String>,
}

/// Result of one statement inside a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryOutcome {
    /// The statement failed; later statements still ran
    Error { query: String, error: String },
    /// The statement has result columns. `columns` is taken from the first
    /// returned row, so it is empty when no rows came back.
    Rows { columns: Vec<ColumnName>, rows: Vec<Row> },
    /// Statement without result columns (DDL/DML)
    Empty {
        #[serde(rename = "rowsAffected")]
        rows_affected: usize,
    },
}

impl QueryOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, QueryOutcome::Error { .. })
    }
}

/// `queries[i]` is the normalized text of the statement that produced `results[i]`
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct ExecuteQueryResponse {
    pub queries: Vec<String>,
    #[ts(type = "Array<QueryOutcome>")]
    pub results: Vec<QueryOutcome>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct GenerateQueryRequest {
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct GenerateQueryResponse {
    pub query: String,
}
