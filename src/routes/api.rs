use axum::{
    extract::{Path, State},
    response::Redirect,
    Form, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::db;
use crate::error::AppError;
use crate::state::AppState;
use crate::storage;

#[derive(Deserialize)]
pub struct CounterForm {
    #[serde(rename = "xmlFilePath")]
    pub xml_file_path: String,
}

pub async fn vote_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CounterForm>,
) -> Result<Redirect, AppError> {
    let touched = db::increment_votes(state.pool.as_ref(), &form.xml_file_path).await?;
    if touched == 0 {
        tracing::warn!("vote for unknown submission: {}", form.xml_file_path);
    }
    Ok(Redirect::to("/"))
}

pub async fn report_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CounterForm>,
) -> Result<Redirect, AppError> {
    let touched = db::increment_reports(state.pool.as_ref(), &form.xml_file_path).await?;
    if touched == 0 {
        tracing::warn!("report for unknown submission: {}", form.xml_file_path);
    }
    Ok(Redirect::to("/"))
}

/// Deletes a submission's two files and its row. Only routed when removal is
/// enabled in the config. File deletion failures are logged and do not stop
/// the remaining steps.
pub async fn remove_handler(
    State(state): State<Arc<AppState>>,
    Path(xml_file_path): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let submission = db::find_by_xml_filename(state.pool.as_ref(), &xml_file_path)
        .await?
        .ok_or(AppError::NotFound)?;

    for stored in [&submission.xml_file_path, &submission.image_file_path] {
        let path = storage::disk_path(&state.config.upload_folder, stored);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::error!("failed to remove {}: {}", path.display(), e);
        }
    }

    db::delete_submission(state.pool.as_ref(), submission.id).await?;

    Ok(Json(serde_json::json!({
        "message": "XML file removed successfully"
    })))
}
