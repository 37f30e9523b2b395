// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Media upload validation and preview rendering
//!
//! Mirrors what the drag-and-drop widget does in the browser: check the
//! file against a size limit and an accept list, render a data URL
//! preview, detect the media kind, and hand the result to a callback.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::config::UploadConfig;

/// Reasons an upload is refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("File size exceeds {limit_mb}MB limit")]
    FileTooLarge { size: u64, limit_mb: u64 },

    #[error("File type {0} is not supported")]
    UnsupportedType(String),

    #[error("File is empty")]
    EmptyFile,

    #[error("No file provided")]
    Missing,
}

/// Broad media category of an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Document,
    Other,
}

impl MediaKind {
    pub fn from_mime(mime: &str) -> Self {
        let top = mime.split('/').next().unwrap_or("").to_ascii_lowercase();
        match top.as_str() {
            "image" => Self::Image,
            "video" => Self::Video,
            "audio" => Self::Audio,
            "text" => Self::Document,
            "application" if mime.eq_ignore_ascii_case("application/pdf") => Self::Document,
            _ => Self::Other,
        }
    }
}

/// Size limit and accept list applied to uploads
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_size_bytes: u64,
    pub accept: Vec<String>,
}

impl UploadPolicy {
    pub fn new(max_size_bytes: u64, accept: Vec<String>) -> Self {
        Self { max_size_bytes, accept }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(config.max_size_bytes(), config.accept.clone())
    }

    /// Check whether a MIME type matches the accept list
    pub fn accepts(&self, mime: &str) -> bool {
        let mime = essence(mime);
        self.accept.iter().any(|pattern| {
            let pattern = pattern.trim().to_ascii_lowercase();
            match pattern.strip_suffix("/*") {
                Some(prefix) => mime.split('/').next() == Some(prefix),
                None => pattern == "*/*" || pattern == mime,
            }
        })
    }

    /// Validate size and type, returning the detected media kind
    pub fn validate(&self, name: &str, mime: &str, size: u64) -> Result<MediaKind, UploadError> {
        debug!("Validating upload {:?} ({}, {} bytes)", name, mime, size);

        if size == 0 {
            return Err(UploadError::EmptyFile);
        }
        if size > self.max_size_bytes {
            return Err(UploadError::FileTooLarge {
                size,
                limit_mb: self.max_size_bytes.div_ceil(1024 * 1024),
            });
        }
        if !self.accepts(mime) {
            return Err(UploadError::UnsupportedType(essence(mime)));
        }
        Ok(MediaKind::from_mime(mime))
    }
}

/// Strip parameters (`; charset=...`) and normalise case
fn essence(mime: &str) -> String {
    mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase()
}

/// Guess a MIME type from the file extension when the client sent none
pub fn guess_mime(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Encode bytes as a `data:` URL suitable for an inline preview
pub fn preview_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", essence(mime), general_purpose::STANDARD.encode(bytes))
}

/// Split a `data:` URL back into MIME type and payload
pub fn decode_data_url(url: &str) -> Option<(String, Vec<u8>)> {
    let rest = url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    let bytes = general_purpose::STANDARD.decode(payload).ok()?;
    Some((mime.to_string(), bytes))
}

/// A file handed to the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mut mime = mime.into();
        if mime.trim().is_empty() {
            mime = guess_mime(&name).to_string();
        }
        Self { name, mime, bytes }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Widget state for a single upload slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadState {
    pub file: Option<MediaFile>,
    pub preview: Option<String>,
    pub media_kind: Option<MediaKind>,
    pub error: Option<String>,
}

/// Accepted upload passed to the caller's callback
#[derive(Debug, Clone, Copy)]
pub struct AcceptedUpload<'a> {
    pub file: &'a MediaFile,
    pub preview: &'a str,
    pub media_kind: MediaKind,
}

/// Upload slot that validates files and notifies a callback on success
pub struct UploadWidget<F>
where
    F: FnMut(AcceptedUpload<'_>),
{
    policy: UploadPolicy,
    state: UploadState,
    on_upload: F,
}

impl<F> UploadWidget<F>
where
    F: FnMut(AcceptedUpload<'_>),
{
    pub fn new(policy: UploadPolicy, on_upload: F) -> Self {
        Self {
            policy,
            state: UploadState::default(),
            on_upload,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Validate a dropped or selected file and update the preview
    ///
    /// A rejected file leaves the slot empty with `error` set; the callback
    /// only fires for accepted files.
    pub fn handle_file(&mut self, file: MediaFile) -> Result<MediaKind, UploadError> {
        self.state = UploadState::default();

        let kind = match self.policy.validate(&file.name, &file.mime, file.size()) {
            Ok(kind) => kind,
            Err(e) => {
                self.state.error = Some(e.to_string());
                return Err(e);
            }
        };

        let preview = preview_data_url(&file.mime, &file.bytes);
        (self.on_upload)(AcceptedUpload {
            file: &file,
            preview: &preview,
            media_kind: kind,
        });

        self.state = UploadState {
            file: Some(file),
            preview: Some(preview),
            media_kind: Some(kind),
            error: None,
        };
        Ok(kind)
    }

    /// Drop the current file and any error
    pub fn clear(&mut self) {
        self.state = UploadState::default();
    }
}
