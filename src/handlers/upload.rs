use std::path::Path;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

/// Multipart field carrying the image.
const IMAGE_FIELD: &str = "image";
/// URL prefix the uploads directory is served under.
pub const UPLOADS_ROUTE: &str = "/uploads";

const MAX_EXTENSION_LEN: usize = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub image_path: String,
    pub original_name: String,
}

pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let mut multipart = multipart?;

    let mut image = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        // An empty file input is submitted as a part with `filename=""`.
        let Some(original_name) = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
        else {
            continue;
        };
        let bytes = field.bytes().await?;
        image = Some((original_name, bytes));
        break;
    }

    let (original_name, bytes) =
        image.ok_or_else(|| AppError::ValidationError("No image provided".to_string()))?;

    let uploads_dir = &state.config.uploads_dir;
    tokio::fs::create_dir_all(uploads_dir).await?;

    let filename = stored_filename(&original_name);
    tokio::fs::write(uploads_dir.join(&filename), &bytes).await?;

    tracing::info!(
        file = %filename,
        original = %original_name,
        size = bytes.len(),
        "Image uploaded"
    );

    let body = UploadResponse {
        image_path: format!("{UPLOADS_ROUTE}/{filename}"),
        original_name,
    };
    Ok(success(body).into_response())
}

/// Random name for an uploaded file, keeping a sanitized extension from the client's
/// filename so static serving picks the right content type.
fn stored_filename(original_name: &str) -> String {
    let stem = Uuid::new_v4().simple().to_string();
    match sanitized_extension(original_name) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

fn sanitized_extension(original_name: &str) -> Option<String> {
    // Browsers may send a full client path; only the last component matters.
    let name = original_name.rsplit(['/', '\\']).next().unwrap_or(original_name);
    let ext = Path::new(name).extension()?.to_str()?;

    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
