use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};

/// File name given to frames captured from a camera rather than picked from disk.
pub const CAPTURE_FILE_NAME: &str = "capture.jpg";

/// What an uploaded image represents, sent to the agent as the `type` field.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    LiveImage,
    IdCard,
}

impl AttachmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AttachmentKind::LiveImage => "live_image",
            AttachmentKind::IdCard => "id_card",
        }
    }
}

/// A single file held between selection and submission.
#[derive(Clone, Debug)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
    pub kind: Option<AttachmentKind>,
}

impl Attachment {
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ChatError::Attachment {
                path: path.to_path_buf(),
                source,
            })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        log::debug!("Loaded attachment {} ({} bytes)", file_name, bytes.len());
        Ok(Self::from_bytes(file_name, bytes))
    }

    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        Self {
            content_type: content_type_for(&file_name),
            file_name,
            bytes,
            kind: None,
        }
    }

    /// A camera frame, tagged as a live image.
    pub fn capture(jpeg: Vec<u8>) -> Self {
        Self::from_bytes(CAPTURE_FILE_NAME, jpeg).with_kind(AttachmentKind::LiveImage)
    }

    pub fn with_kind(mut self, kind: AttachmentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn size_kb(&self) -> String {
        format!("{:.1} KB", self.bytes.len() as f64 / 1024.0)
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}
