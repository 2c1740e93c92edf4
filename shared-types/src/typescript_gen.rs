use ts_rs::TS;

/// Value types with hand-written serde impls; ts-rs cannot derive them.
const CELL_VALUE_TS: &str = "export type CellValue = string | number | null;";
const ROW_TS: &str = "export type Row = Record<string, CellValue>;";
const QUERY_OUTCOME_TS: &str = "export type QueryOutcome = { query: string, error: string, } | { columns: Array<ColumnName>, rows: Array<Row>, } | { rowsAffected: number, };";

/// Every type name accepted by [`generate_typescript_definitions`]
pub const ALL_TYPE_NAMES: &[&str] = &[
    "CellValue",
    "Row",
    "ColumnDescriptor",
    "ColumnName",
    "TablesResponse",
    "TableOverview",
    "DatabaseInfoResponse",
    "TableSchemaQuery",
    "TableSchemaResponse",
    "SortDirection",
    "TableDataQuery",
    "Pagination",
    "PaginatedResult",
    "UpdateTableDataRequest",
    "BlobDataQuery",
    "MessageResponse",
    "ExecuteQueryRequest",
    "QueryOutcome",
    "ExecuteQueryResponse",
    "GenerateQueryRequest",
    "GenerateQueryResponse",
    "LoginRequest",
    "LoginResponse",
    "LogoutResponse",
    "ErrorResponse",
    "ServerStatus",
];

pub fn generate_typescript_definitions(
    type_names: &[&str],
) -> Result<String, Box<dyn std::error::Error>> {
    if type_names.is_empty() {
        return Err("No type names provided".into());
    }

    let mut definitions = Vec::new();

    for name in type_names {
        let type_def = export_type(name)?;
        let cleaned = clean_type(type_def);

        if !cleaned.trim().is_empty() {
            definitions.push(cleaned);
        }
    }

    Ok(definitions.join("\n\n"))
}

fn export_type(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    use crate::*;

    let result = match name {
        "CellValue" => CELL_VALUE_TS.to_string(),
        "Row" => ROW_TS.to_string(),
        "QueryOutcome" => QUERY_OUTCOME_TS.to_string(),

        "ColumnDescriptor" => ColumnDescriptor::export_to_string()?,
        "ColumnName" => ColumnName::export_to_string()?,
        "TablesResponse" => TablesResponse::export_to_string()?,
        "TableOverview" => TableOverview::export_to_string()?,
        "DatabaseInfoResponse" => DatabaseInfoResponse::export_to_string()?,
        "TableSchemaQuery" => TableSchemaQuery::export_to_string()?,
        "TableSchemaResponse" => TableSchemaResponse::export_to_string()?,

        "SortDirection" => SortDirection::export_to_string()?,
        "TableDataQuery" => TableDataQuery::export_to_string()?,
        "Pagination" => Pagination::export_to_string()?,
        "PaginatedResult" => PaginatedResult::export_to_string()?,
        "UpdateTableDataRequest" => UpdateTableDataRequest::export_to_string()?,
        "BlobDataQuery" => BlobDataQuery::export_to_string()?,
        "MessageResponse" => MessageResponse::export_to_string()?,

        "ExecuteQueryRequest" => ExecuteQueryRequest::export_to_string()?,
        "ExecuteQueryResponse" => ExecuteQueryResponse::export_to_string()?,
        "GenerateQueryRequest" => GenerateQueryRequest::export_to_string()?,
        "GenerateQueryResponse" => GenerateQueryResponse::export_to_string()?,

        "LoginRequest" => LoginRequest::export_to_string()?,
        "LoginResponse" => LoginResponse::export_to_string()?,
        "LogoutResponse" => LogoutResponse::export_to_string()?,

        "ErrorResponse" => ErrorResponse::export_to_string()?,
        "ServerStatus" => ServerStatus::export_to_string()?,

        _ => {
            return Err(format!(
                "Unknown type: '{}'. Available types can be found in shared-types/src/",
                name
            )
            .into());
        }
    };

    Ok(result)
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let lines: Vec<&str> = type_def.lines().collect();

    let filtered: Vec<&str> = lines
        .iter()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
        })
        .cloned()
        .collect();

    filtered.join("\n").trim().to_string()
}
