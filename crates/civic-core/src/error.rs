//! Error types for civic issue reporting.
//!
//! Errors are organized by concern so that callers can decide which failures
//! are recoverable locally (a single bad evidence file) and which must be
//! surfaced (a rejected report submission).

use thiserror::Error;

/// Top-level error type for civic-core operations.
#[derive(Error, Debug)]
pub enum CivicError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Fingerprint generation errors
    #[error("Fingerprint error: {0}")]
    Fingerprint(#[from] FingerprintError),

    /// Fingerprint comparison errors
    #[error("Compare error: {0}")]
    Compare(#[from] CompareError),

    /// Report draft errors
    #[error("Draft error: {0}")]
    Draft(#[from] DraftError),

    /// Issue store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Failures while turning an evidence file into a fingerprint.
///
/// None of these abort a batch: the submission gate logs them and treats the
/// file as having no fingerprint.
#[derive(Error, Debug)]
pub enum FingerprintError {
    /// Content could not be decoded as a raster image
    #[error("Decode error for {name}: {message}")]
    Decode { name: String, message: String },

    /// Source file could not be read
    #[error("IO error for {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Decoding took longer than the configured limit
    #[error("Decode of {name} timed out after {timeout_ms}ms")]
    Timeout { name: String, timeout_ms: u64 },

    /// File exceeds size limit
    #[error("File too large: {name} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        name: String,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {name} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        name: String,
        width: u32,
        height: u32,
        max_dim: u32,
    },
}

/// Comparison errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    /// Two fingerprints of different bit length were compared
    #[error("Fingerprint length mismatch: {left} bits vs {right} bits")]
    LengthMismatch { left: usize, right: usize },

    /// A fingerprint string could not be parsed
    #[error("Malformed fingerprint: {0}")]
    Malformed(String),
}

/// Report draft errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DraftError {
    /// Title, description, or category is missing
    #[error("Please fill all required fields (missing: {})", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Category id is not in the catalogue
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Coordinates are outside the valid range
    #[error("Invalid location: latitude {latitude}, longitude {longitude}")]
    InvalidLocation { latitude: f64, longitude: f64 },
}

/// Errors from the hosted issue store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No endpoint configured
    #[error("Issue store endpoint is not configured (set [store].endpoint)")]
    NotConfigured,

    /// Request failed or returned a non-success status
    #[error("Issue store request failed: {message}")]
    Request {
        message: String,
        status_code: Option<u16>,
    },

    /// Response body did not match the expected shape
    #[error("Failed to parse issue store response: {0}")]
    Response(String),
}

/// Convenience type alias for civic-core results.
pub type Result<T> = std::result::Result<T, CivicError>;
