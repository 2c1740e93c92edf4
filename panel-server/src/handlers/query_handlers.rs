use super::AppState;
use crate::database::{describe_schema, execute_batch, with_handle};
use crate::error::AppError;
use crate::middleware::session_from_request;
use crate::sql_generator;
use actix_web::{web, HttpRequest, HttpResponse, Result};
use shared_types::{ExecuteQueryRequest, GenerateQueryRequest, GenerateQueryResponse};

/// Run a `;`-separated batch and report one outcome per statement
pub async fn execute_query(
    data: web::Data<AppState>,
    request: web::Json<ExecuteQueryRequest>,
    http_req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let session = session_from_request(&http_req)?;
    let sql = request
        .into_inner()
        .sql_query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("SQL query is required".to_string()))?;
    let busy_timeout = data.busy_timeout();

    let response = web::block(move || {
        with_handle(&session.db_path, busy_timeout, |handle| execute_batch(handle, &sql))
    })
    .await??;

    Ok(HttpResponse::Ok().json(response))
}

/// Turn a natural-language request into SQL; the statement is not executed
pub async fn generate_query(
    data: web::Data<AppState>,
    request: web::Json<GenerateQueryRequest>,
    http_req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let session = session_from_request(&http_req)?;
    let client = sql_generator::configured(data.llm_client.as_deref())?;

    let prompt = request
        .into_inner()
        .prompt
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("A prompt is required".to_string()))?;
    let busy_timeout = data.busy_timeout();

    let schema =
        web::block(move || with_handle(&session.db_path, busy_timeout, describe_schema)).await??;

    let query = sql_generator::generate_sql(client, &schema, &prompt).await?;

    Ok(HttpResponse::Ok().json(GenerateQueryResponse { query }))
}
