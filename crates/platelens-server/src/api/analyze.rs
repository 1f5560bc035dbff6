//! POST /analyze - food photo analysis endpoint
//!
//! Multipart body with an `image` field (jpg/jpeg/png). Responses:
//! - 400 `{"error": "No image uploaded"}` when the field is absent
//! - 200 `{"message": "No food items found"}` when nothing is allow-listed
//! - 200 with the full per-100g analysis result otherwise
//! - 502 `{"error": ...}` when the vision labeler fails

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

use platelens_types::Error as PipelineError;

use crate::AppState;

/// Errors surfaced by the analyze handler
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("No image uploaded")]
    NoImage,

    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        let status = match &self {
            AnalyzeError::NoImage
            | AnalyzeError::UnsupportedFormat
            | AnalyzeError::Multipart(_) => StatusCode::BAD_REQUEST,
            AnalyzeError::Pipeline(PipelineError::Upstream { .. }) => StatusCode::BAD_GATEWAY,
            AnalyzeError::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            warn!(error = %self, "analyze request failed");
        }

        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}

/// Pull the `image` field out of the multipart body.
async fn read_image_field(multipart: &mut Multipart) -> Result<Option<Vec<u8>>, AnalyzeError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("image") {
            let bytes = field.bytes().await?;
            return Ok(Some(bytes.to_vec()));
        }
    }
    Ok(None)
}

/// Accepted upload formats. The dashboard offers jpg/jpeg/png only.
fn is_supported_format(image: &[u8]) -> bool {
    matches!(
        image::guess_format(image),
        Ok(image::ImageFormat::Jpeg | image::ImageFormat::Png)
    )
}

/// POST /analyze
pub async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AnalyzeError> {
    let image = read_image_field(&mut multipart)
        .await?
        .ok_or(AnalyzeError::NoImage)?;

    if !is_supported_format(&image) {
        return Err(AnalyzeError::UnsupportedFormat);
    }

    info!(bytes = image.len(), "analyzing uploaded image");
    let result = state.pipeline.analyze(&image).await?;

    if result.is_empty() {
        return Ok(Json(json!({"message": "No food items found"})).into_response());
    }

    Ok(Json(result).into_response())
}
