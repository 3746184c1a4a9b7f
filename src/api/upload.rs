//! `POST /upload`

use crate::domain::models::UploadedFile;
use crate::error::Result;
use crate::pipeline::IncomingFile;
use crate::AppState;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

/// Multipart field carrying the files
const FILES_FIELD: &str = "files";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub files: Vec<UploadedFile>,
}

/// Classify and extract uploaded transcripts and contact lists
pub async fn upload_files(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let mut multipart = multipart?;
    let mut batch = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;

        batch.push(IncomingFile::new(name, bytes.to_vec()));
    }

    log::info!("Received {} uploaded file(s)", batch.len());

    let outcome = state.intake.process(batch).await?;
    state.intake.cleanup(&outcome.stored).await;

    Ok(Json(UploadResponse {
        success: true,
        files: outcome.files,
    }))
}
