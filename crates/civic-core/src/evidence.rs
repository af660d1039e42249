//! Evidence files attached to an issue report.

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::config::MediaConfig;
use crate::error::FingerprintError;

/// Broad media class derived from the declared MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Other,
}

impl MediaKind {
    /// Classify a declared media type such as `image/png` or `video/mp4`.
    pub fn from_media_type(media_type: &str) -> Self {
        let top = media_type
            .split('/')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match top.as_str() {
            "image" => Self::Image,
            "video" => Self::Video,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::Other => write!(f, "other"),
        }
    }
}

/// A user-selected media file attached as evidence.
///
/// Content is reference-counted so fingerprinting can hand it to a blocking
/// decode task without copying.
#[derive(Debug, Clone)]
pub struct EvidenceFile {
    name: String,
    media_type: String,
    content: Arc<[u8]>,
}

impl EvidenceFile {
    /// Wrap raw bytes with their declared media type.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            content: content.into(),
        }
    }

    /// Read a file from disk, declaring its media type from the extension.
    pub async fn from_path(path: &Path, media: &MediaConfig) -> Result<Self, FingerprintError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        let content = tokio::fs::read(path)
            .await
            .map_err(|source| FingerprintError::Io {
                name: path.display().to_string(),
                source,
            })?;
        Ok(Self::new(name, media_type_for_path(path, media), content))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_media_type(&self.media_type)
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Shared handle to the content.
    pub fn shared_content(&self) -> Arc<[u8]> {
        Arc::clone(&self.content)
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// BLAKE3 hash of the exact bytes.
    pub fn content_hash(&self) -> String {
        blake3::hash(&self.content).to_hex().to_string()
    }

    /// `data:` URL suitable for an inline preview.
    pub fn preview_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.media_type,
            base64::engine::general_purpose::STANDARD.encode(&self.content)
        )
    }

    /// Serializable summary without the content bytes.
    pub fn summary(&self) -> EvidenceSummary {
        EvidenceSummary {
            name: self.name.clone(),
            media_type: self.media_type.clone(),
            kind: self.kind(),
            size: self.size(),
            content_hash: self.content_hash(),
        }
    }
}

/// What gets recorded about an evidence file alongside an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceSummary {
    pub name: String,
    pub media_type: String,
    pub kind: MediaKind,
    pub size: u64,
    pub content_hash: String,
}

/// Declared media type for a path, based on its extension.
///
/// Unknown extensions become `application/octet-stream`.
pub fn media_type_for_path(path: &Path, media: &MediaConfig) -> String {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return "application/octet-stream".to_string(),
    };
    let matches = |list: &[String]| list.iter().any(|e| e.eq_ignore_ascii_case(&ext));

    if matches(&media.image_extensions) {
        let subtype = match ext.as_str() {
            "jpg" => "jpeg",
            other => other,
        };
        format!("image/{subtype}")
    } else if matches(&media.video_extensions) {
        let subtype = match ext.as_str() {
            "mov" => "quicktime",
            "mkv" => "x-matroska",
            "avi" => "x-msvideo",
            "3gp" => "3gpp",
            other => other,
        };
        format!("video/{subtype}")
    } else {
        "application/octet-stream".to_string()
    }
}
