//! Error types for palette extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Error categories. Each one has its own recovery path in the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The container could not be fetched (missing, unreadable, too large).
    Fetch,
    /// The container structure is malformed.
    Parse,
    /// An embedded image or data URI could not be decoded.
    Decode,
    /// A buffer or image points at an external resource.
    UnsupportedReference,
}

/// Main error type for the extractor.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to fetch {location}: {message}")]
    Fetch { location: String, message: String },

    #[error("Asset is too large: {size} bytes exceeds the limit of {limit} bytes")]
    AssetTooLarge { size: u64, limit: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a glTF container: bad magic 0x{found:08X}")]
    InvalidMagic { found: u32 },

    #[error("Unsupported glTF container version {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Truncated container: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("Invalid chunk: {message}")]
    InvalidChunk { message: String },

    #[error("Invalid glTF JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{kind} {index} not found")]
    MissingReference { kind: &'static str, index: usize },

    #[error("Buffer {index} refers to a binary chunk but the container has none")]
    MissingBinaryChunk { index: usize },

    #[error("Buffer view range {start}..{end} exceeds buffer length {length}")]
    ViewOutOfBounds {
        start: usize,
        end: usize,
        length: usize,
    },

    #[error("Invalid hex color: '{value}'")]
    InvalidHexColor { value: String },

    #[error("Invalid data URI: {message}")]
    InvalidDataUri { message: String },

    #[error("Image decode failed: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("External reference not supported: {uri}")]
    UnsupportedReference { uri: String },
}

impl ExtractError {
    /// Get the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::FileNotFound { .. } => ErrorKind::Fetch,
            ExtractError::Fetch { .. } => ErrorKind::Fetch,
            ExtractError::AssetTooLarge { .. } => ErrorKind::Fetch,
            ExtractError::Io(_) => ErrorKind::Fetch,
            ExtractError::InvalidMagic { .. } => ErrorKind::Parse,
            ExtractError::UnsupportedVersion { .. } => ErrorKind::Parse,
            ExtractError::Truncated { .. } => ErrorKind::Parse,
            ExtractError::InvalidChunk { .. } => ErrorKind::Parse,
            ExtractError::Json(_) => ErrorKind::Parse,
            ExtractError::MissingReference { .. } => ErrorKind::Parse,
            ExtractError::MissingBinaryChunk { .. } => ErrorKind::Parse,
            ExtractError::ViewOutOfBounds { .. } => ErrorKind::Parse,
            ExtractError::InvalidHexColor { .. } => ErrorKind::Parse,
            ExtractError::InvalidDataUri { .. } => ErrorKind::Decode,
            ExtractError::ImageDecode(_) => ErrorKind::Decode,
            ExtractError::UnsupportedReference { .. } => ErrorKind::UnsupportedReference,
        }
    }
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
