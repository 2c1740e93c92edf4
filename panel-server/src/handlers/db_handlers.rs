use super::AppState;
use crate::database::{
    database_overview, list_tables, read_page, table_info, update_cell, with_handle, Ident,
    SortSpec,
};
use crate::error::AppError;
use crate::middleware::session_from_request;
use actix_web::{web, HttpRequest, HttpResponse, Result};
use shared_types::{
    DatabaseInfoResponse, MessageResponse, TableDataQuery, TableSchemaQuery, TableSchemaResponse,
    TablesResponse, UpdateTableDataRequest,
};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_ITEMS_PER_PAGE: i64 = 10;

pub async fn get_tables(
    data: web::Data<AppState>,
    http_req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let session = session_from_request(&http_req)?;
    let busy_timeout = data.busy_timeout();

    let tables =
        web::block(move || with_handle(&session.db_path, busy_timeout, list_tables)).await??;

    Ok(HttpResponse::Ok().json(TablesResponse { tables }))
}

pub async fn get_database_info(
    data: web::Data<AppState>,
    http_req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let session = session_from_request(&http_req)?;
    let busy_timeout = data.busy_timeout();

    let overview =
        web::block(move || with_handle(&session.db_path, busy_timeout, database_overview))
            .await??;

    Ok(HttpResponse::Ok().json(DatabaseInfoResponse::new(overview)))
}

pub async fn get_table_schema(
    data: web::Data<AppState>,
    query: web::Query<TableSchemaQuery>,
    http_req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let session = session_from_request(&http_req)?;
    let table = query
        .into_inner()
        .table
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Table name parameter is required".to_string()))?;
    let busy_timeout = data.busy_timeout();

    let columns = web::block(move || {
        with_handle(&session.db_path, busy_timeout, |handle| {
            let table = Ident::table(handle, &table)?;
            table_info(handle, &table)
        })
    })
    .await??;

    Ok(HttpResponse::Ok().json(TableSchemaResponse::new(columns)))
}

pub async fn get_table_data(
    data: web::Data<AppState>,
    query: web::Query<TableDataQuery>,
    http_req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let session = session_from_request(&http_req)?;
    let query = query.into_inner();

    let table = query
        .table
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Table name is required".to_string()))?;
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let items_per_page = query.items_per_page.unwrap_or(DEFAULT_ITEMS_PER_PAGE);
    let sort = SortSpec::from_params(query.sort_column.as_deref(), query.sort_direction.as_deref())?;
    let busy_timeout = data.busy_timeout();

    let result = web::block(move || {
        with_handle(&session.db_path, busy_timeout, |handle| {
            read_page(handle, &table, page, items_per_page, sort.as_ref())
        })
    })
    .await??;

    Ok(HttpResponse::Ok().json(result))
}

pub async fn update_table_data(
    data: web::Data<AppState>,
    request: web::Json<UpdateTableDataRequest>,
    http_req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let session = session_from_request(&http_req)?;
    let req = request.into_inner();

    let (table, row_index, column_name, new_value) =
        match (req.table, req.row_index, req.column_name, req.new_value) {
            (Some(table), Some(row_index), Some(column_name), Some(new_value))
                if !table.is_empty() && !column_name.is_empty() =>
            {
                (table, row_index, column_name, new_value)
            }
            _ => return Err(AppError::BadRequest("Missing required parameters".to_string())),
        };
    let sort = SortSpec::from_params(req.sort_column.as_deref(), req.sort_direction.as_deref())?;
    let busy_timeout = data.busy_timeout();

    web::block(move || {
        with_handle(&session.db_path, busy_timeout, |handle| {
            update_cell(handle, &table, row_index, &column_name, &new_value, sort.as_ref())
        })
    })
    .await??;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Data updated successfully")))
}
