use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One row of `PRAGMA table_info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct ColumnDescriptor {
    #[ts(type = "number")]
    pub cid: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[ts(type = "number")]
    pub notnull: i64,
    pub dflt_value: Option<String>,
    /// 0 when the column is not part of the primary key, otherwise its
    /// 1-based position within the key
    #[ts(type = "number")]
    pub pk: i64,
}

impl ColumnDescriptor {
    pub fn is_primary_key(&self) -> bool {
        self.pk > 0
    }

    pub fn is_not_null(&self) -> bool {
        self.notnull != 0
    }

    pub fn is_blob(&self) -> bool {
        self.column_type.eq_ignore_ascii_case("BLOB")
    }
}

/// Column header as rendered by the generic result grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct ColumnName {
    pub name: String,
}

impl ColumnName {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct TablesResponse {
    pub tables: Vec<String>,
}

/// Per-table summary; `row_count` is -1 when the table could not be counted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct TableOverview {
    pub table_name: String,
    #[ts(type = "number")]
    pub row_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct DatabaseInfoResponse {
    pub columns: Vec<ColumnName>,
    pub rows: Vec<TableOverview>,
}

impl DatabaseInfoResponse {
    pub fn new(rows: Vec<TableOverview>) -> Self {
        Self {
            columns: vec![ColumnName::new("table_name"), ColumnName::new("row_count")],
            rows,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct TableSchemaQuery {
    pub table: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct TableSchemaResponse {
    pub columns: Vec<ColumnName>,
    pub rows: Vec<ColumnDescriptor>,
}

impl TableSchemaResponse {
    pub fn new(rows: Vec<ColumnDescriptor>) -> Self {
        let columns = ["cid", "name", "type", "notnull", "dflt_value", "pk"]
            .into_iter()
            .map(ColumnName::new)
            .collect();
        Self { columns, rows }
    }
}
