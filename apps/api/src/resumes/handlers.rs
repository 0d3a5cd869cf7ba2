use askama::Template;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{records_to_csv, CSV_FILENAME};
use crate::render::{IndexPage, ResultsPage};
use crate::resumes::upload::{collect_uploads, run_batch, BatchOutcome};
use crate::results::StoredBatch;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub batch: Option<Uuid>,
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = IndexPage {
        max_upload_mb: state.config.max_upload_bytes / (1024 * 1024),
    };
    Ok(Html(page.render()?))
}

/// POST /upload
/// An upload without files sends the user back to the form.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let documents = collect_uploads(&mut multipart).await?;
    if documents.is_empty() {
        return Ok(Redirect::to("/").into_response());
    }

    let outcome = run_batch(&state, documents).await?;
    let page = ResultsPage {
        batch_id: outcome.batch.batch_id,
        records: &outcome.batch.records,
        skipped: outcome.skipped(),
    };
    Ok(Html(page.render()?).into_response())
}

/// GET /export_csv?batch=<id>
/// Without `batch` the CSV is header-only; results are never shared across
/// callers who do not hold the batch id.
pub async fn handle_export_csv(
    State(state): State<AppState>,
    Query(params): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let records = match params.batch {
        Some(batch_id) => {
            state
                .results
                .get(batch_id)
                .ok_or_else(|| AppError::NotFound(format!("Batch {batch_id} not found")))?
                .records
        }
        None => Vec::new(),
    };

    let csv = records_to_csv(&records)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_FILENAME}\""),
            ),
        ],
        csv,
    )
        .into_response())
}

/// POST /api/v1/resumes
pub async fn handle_api_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchOutcome>, AppError> {
    let documents = collect_uploads(&mut multipart).await?;
    if documents.is_empty() {
        return Err(AppError::Validation(
            "No files were uploaded in the 'resumes' field".to_string(),
        ));
    }
    Ok(Json(run_batch(&state, documents).await?))
}

/// GET /api/v1/resumes/:batch_id
pub async fn handle_get_batch(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
) -> Result<Json<StoredBatch>, AppError> {
    state
        .results
        .get(batch_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Batch {batch_id} not found")))
}
