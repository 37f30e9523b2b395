// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Multipart media upload endpoint

use axum::{
    extract::{multipart::{MultipartError, MultipartRejection}, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use image::GenericImageView;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::AppState;
use crate::error::FieldError;
use crate::upload::{preview_data_url, MediaFile, MediaKind, UploadError};
use crate::{FactlensError, Result};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UploadedMedia {
    file_name: String,
    mime_type: String,
    media_type: MediaKind,
    size: u64,
    hash: String,
    preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
}

#[derive(Serialize)]
pub(super) struct UploadResponse {
    success: bool,
    data: UploadedMedia,
}

/// Body-limit overruns surface as multipart errors; keep them as 413
fn multipart_failure(err: MultipartError, limit_mb: u64) -> Response {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return FactlensError::Upload(UploadError::FileTooLarge { size: 0, limit_mb }).into_response();
    }
    FactlensError::Validation(vec![FieldError::body("file", err.body_text())]).into_response()
}

async fn read_file_field(multipart: &mut Multipart) -> std::result::Result<Option<MediaFile>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            debug!("Skipping multipart field {:?}", field.name());
            continue;
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        let mime = field.content_type().unwrap_or("").to_string();
        let bytes = field.bytes().await?;
        return Ok(Some(MediaFile::new(name, mime, bytes.to_vec())));
    }
    Ok(None)
}

fn image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image::load_from_memory(bytes).ok().map(|img| img.dimensions())
}

pub(super) async fn api_upload(
    State(state): State<Arc<AppState>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> std::result::Result<Json<UploadResponse>, Response> {
    let mut multipart = multipart.map_err(|rejection| {
        FactlensError::Validation(vec![FieldError::body("file", rejection.body_text())]).into_response()
    })?;
    let limit_mb = state.upload_policy.max_size_bytes.div_ceil(1024 * 1024);

    let file = match read_file_field(&mut multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => return Err(FactlensError::Upload(UploadError::Missing).into_response()),
        Err(e) => return Err(multipart_failure(e, limit_mb)),
    };

    accept(&state, file).map(Json).map_err(IntoResponse::into_response)
}

fn accept(state: &AppState, file: MediaFile) -> Result<UploadResponse> {
    let kind = state.upload_policy.validate(&file.name, &file.mime, file.size())?;

    let (width, height) = match kind {
        MediaKind::Image => image_dimensions(&file.bytes).unzip(),
        _ => (None, None),
    };

    info!("Accepted {:?} upload {} ({} bytes)", kind, file.name, file.size());
    Ok(UploadResponse {
        success: true,
        data: UploadedMedia {
            hash: blake3::hash(&file.bytes).to_hex().to_string(),
            preview: preview_data_url(&file.mime, &file.bytes),
            size: file.size(),
            media_type: kind,
            width,
            height,
            mime_type: file.mime,
            file_name: file.name,
        },
    })
}
