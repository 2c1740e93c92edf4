use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod auth;
pub mod data;
pub mod query;
pub mod schema;
pub mod typescript_gen;
pub mod value;

pub use typescript_gen::generate_typescript_definitions;

pub use auth::{LoginRequest, LoginResponse, LogoutResponse};
pub use data::{
    BlobDataQuery, MessageResponse, PaginatedResult, Pagination, SortDirection, TableDataQuery,
    UpdateTableDataRequest,
};
pub use query::{
    ExecuteQueryRequest, ExecuteQueryResponse, GenerateQueryRequest, GenerateQueryResponse,
    QueryOutcome,
};
pub use schema::{
    ColumnDescriptor, ColumnName, DatabaseInfoResponse, TableOverview, TableSchemaQuery,
    TableSchemaResponse, TablesResponse,
};
pub use value::{CellValue, Row, BLOB_MARKER};

// Shared models for the panel server and its browser front-end

#[derive(Debug, Serialize, Deserialize, TS)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ServerStatus {
    pub status: String,
    pub version: String,
    #[ts(type = "number")]
    pub uptime: u64,
}
