use super::AppState;
use crate::database::{fetch_blob, update_blob, with_handle, SortSpec};
use crate::error::AppError;
use crate::middleware::session_from_request;
use actix_multipart::{Field, Multipart};
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpRequest, HttpResponse, Result};
use futures_util::StreamExt;
use shared_types::{BlobDataQuery, MessageResponse};

pub async fn get_blob_data(
    data: web::Data<AppState>,
    query: web::Query<BlobDataQuery>,
    http_req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let session = session_from_request(&http_req)?;
    let query = query.into_inner();

    let (table, row_index, column_name) = match (query.table, query.row_index, query.column_name) {
        (Some(table), Some(row_index), Some(column_name))
            if !table.is_empty() && !column_name.is_empty() =>
        {
            (table, row_index, column_name)
        }
        _ => {
            return Err(AppError::BadRequest(
                "Table name, row index, and column name are required".to_string(),
            ))
        }
    };
    let sort = SortSpec::from_params(query.sort_column.as_deref(), query.sort_direction.as_deref())?;
    let busy_timeout = data.busy_timeout();

    let filename = format!("{}_{}.bin", column_name, row_index);
    let bytes = web::block(move || {
        with_handle(&session.db_path, busy_timeout, |handle| {
            fetch_blob(handle, &table, row_index, &column_name, sort.as_ref())
        })
    })
    .await??;

    tracing::debug!("Serving {} ({} bytes)", filename, bytes.len());

    Ok(HttpResponse::Ok()
        .content_type("application/octet-stream")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .body(bytes))
}

/// Fields of the blob upload form
#[derive(Debug, Default)]
struct BlobUpload {
    table: Option<String>,
    row_index: Option<i64>,
    column_name: Option<String>,
    file: Option<Vec<u8>>,
    sort_column: Option<String>,
    sort_direction: Option<String>,
}

pub async fn update_blob_data(
    data: web::Data<AppState>,
    mut payload: Multipart,
    http_req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let session = session_from_request(&http_req)?;
    let max_bytes = data.config.server.max_upload_bytes;

    let mut upload = BlobUpload::default();
    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?;
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => upload.file = Some(read_field(&mut field, max_bytes).await?),
            "table" => upload.table = Some(read_text(&mut field).await?),
            // Unparseable indexes count as missing
            "rowIndex" => upload.row_index = read_text(&mut field).await?.trim().parse().ok(),
            "columnName" => upload.column_name = Some(read_text(&mut field).await?),
            "sortColumn" => upload.sort_column = Some(read_text(&mut field).await?),
            "sortDirection" => upload.sort_direction = Some(read_text(&mut field).await?),
            other => {
                tracing::debug!("Ignoring multipart field {}", other);
                read_field(&mut field, max_bytes).await?;
            }
        }
    }

    let (table, row_index, column_name, file) =
        match (upload.table, upload.row_index, upload.column_name, upload.file) {
            (Some(table), Some(row_index), Some(column_name), Some(file))
                if !table.is_empty() && !column_name.is_empty() =>
            {
                (table, row_index, column_name, file)
            }
            _ => {
                return Err(AppError::BadRequest(
                    "File, table name, valid row index, and column name are required".to_string(),
                ))
            }
        };
    let sort = SortSpec::from_params(upload.sort_column.as_deref(), upload.sort_direction.as_deref())?;
    let busy_timeout = data.busy_timeout();

    tracing::info!(
        "Uploading {} bytes into {}.{} at row position {}",
        file.len(),
        table,
        column_name,
        row_index
    );

    web::block(move || {
        with_handle(&session.db_path, busy_timeout, |handle| {
            update_blob(handle, &table, row_index, &column_name, file, sort.as_ref())
        })
    })
    .await??;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Blob data updated successfully")))
}

/// Collect one field in memory, failing once it grows past `max_bytes`
async fn read_field(field: &mut Field, max_bytes: usize) -> Result<Vec<u8>, AppError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?;
        if bytes.len() + chunk.len() > max_bytes {
            return Err(AppError::BadRequest(format!(
                "Upload exceeds the limit of {} bytes",
                max_bytes
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

async fn read_text(field: &mut Field) -> Result<String, AppError> {
    let bytes = read_field(field, MAX_TEXT_FIELD_BYTES).await?;
    String::from_utf8(bytes)
        .map_err(|_| AppError::BadRequest("Form fields must be valid UTF-8".to_string()))
}
