//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Default Hamming-distance threshold for 1024-bit fingerprints.
pub const DEFAULT_SIMILARITY_THRESHOLD: u32 = 10;

/// Default fingerprint grid edge length.
pub const DEFAULT_GRID_SIZE: u32 = 32;

/// Duplicate detection tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Maximum Hamming distance at which two fingerprints count as duplicates
    pub similarity_threshold: u32,

    /// Fingerprint grid width in cells
    pub grid_width: u32,

    /// Fingerprint grid height in cells
    pub grid_height: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            grid_width: DEFAULT_GRID_SIZE,
            grid_height: DEFAULT_GRID_SIZE,
        }
    }
}

impl DetectionConfig {
    /// Number of bits in every fingerprint produced with this grid.
    pub fn fingerprint_bits(&self) -> usize {
        self.grid_width as usize * self.grid_height as usize
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,

    /// Decode timeout in milliseconds
    pub decode_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 10000,
            decode_timeout_ms: 5000,
        }
    }
}

/// File extensions used to infer a declared media type for files on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Extensions treated as `image/*`
    pub image_extensions: Vec<String>,

    /// Extensions treated as `video/*`
    pub video_extensions: Vec<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            image_extensions: ["jpg", "jpeg", "png", "webp", "gif", "bmp", "tiff"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            video_extensions: ["mp4", "mov", "webm", "mkv", "avi", "3gp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Hosted issue store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the hosted data service (e.g. "https://xyz.example.co")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// API key, either literal or a `${ENV_VAR}` reference
    pub api_key: String,

    /// Table that holds issue rows
    pub table: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: "${CIVIC_STORE_KEY}".to_string(),
            table: "issues".to_string(),
            timeout_ms: 15000,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
