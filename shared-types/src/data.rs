use crate::value::{CellValue, Row};
use crate::schema::ColumnDescriptor;
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Case-insensitive `asc` / `desc`
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Query string of `GET /api/db/table-data`
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct TableDataQuery {
    pub table: Option<String>,
    #[ts(type = "number | null")]
    pub page: Option<i64>,
    #[ts(type = "number | null")]
    pub items_per_page: Option<i64>,
    pub sort_column: Option<String>,
    pub sort_direction: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[ts(type = "number")]
    pub total: i64,
    #[ts(type = "number")]
    pub page: i64,
    #[ts(type = "number")]
    pub items_per_page: i64,
    #[ts(type = "number")]
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(total: i64, page: i64, items_per_page: i64) -> Self {
        let total_pages = if total <= 0 {
            0
        } else {
            total / items_per_page + i64::from(total % items_per_page != 0)
        };
        Self {
            total,
            page,
            items_per_page,
            total_pages,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct PaginatedResult {
    pub columns: Vec<ColumnDescriptor>,
    #[ts(type = "Array<Row>")]
    pub rows: Vec<Row>,
    pub pagination: Pagination,
}

/// Body of `POST /api/db/update-table-data`.
///
/// `sortColumn`/`sortDirection` must repeat the ordering the client rendered,
/// otherwise `rowIndex` refers to the natural scan order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTableDataRequest {
    pub table: Option<String>,
    #[ts(type = "number | null")]
    pub row_index: Option<i64>,
    pub column_name: Option<String>,
    /// `None` when the field is absent; an explicit JSON `null` is `Some(CellValue::Null)`
    #[serde(default, deserialize_with = "deserialize_present")]
    #[ts(type = "CellValue")]
    pub new_value: Option<CellValue>,
    pub sort_column: Option<String>,
    pub sort_direction: Option<String>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<CellValue>, D::Error>
where
    D: Deserializer<'de>,
{
    CellValue::deserialize(deserializer).map(Some)
}

/// Query string of `GET /api/db/blob-data`
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct BlobDataQuery {
    pub table: Option<String>,
    #[ts(type = "number | null")]
    pub row_index: Option<i64>,
    pub column_name: Option<String>,
    pub sort_column: Option<String>,
    pub sort_direction: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
