//! Error types for asset loading and mesh output.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for loaders and writers.
pub type IoResult<T> = Result<T, IoError>;

/// Failure to load an asset or write a painted mesh.
#[derive(Debug, Error)]
pub enum IoError {
    /// The asset path does not exist.
    #[error("asset not found: {path}")]
    FileNotFound {
        /// Requested path.
        path: PathBuf,
    },

    /// Extension is not one of the supported asset formats.
    #[error("unsupported asset format: .{extension}")]
    UnknownFormat {
        /// Extension as found, or `(none)`.
        extension: String,
    },

    /// The bytes do not describe a valid asset of the detected format.
    #[error("invalid asset: {message}")]
    InvalidContent {
        /// What the loader rejected.
        message: String,
    },

    /// Binary STL too short to hold its 84-byte header.
    #[error("truncated STL header: need {expected} bytes, have {got}")]
    InvalidHeader {
        /// Bytes needed.
        expected: usize,
        /// Bytes present.
        got: usize,
    },

    /// Binary STL body shorter than its declared face count.
    #[error("invalid face count: expected {expected}, got {got}")]
    InvalidFaceCount {
        /// Number of faces declared in the header.
        expected: u32,
        /// Number of complete faces present.
        got: u32,
    },

    /// Reading or writing failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Text format that is not UTF-8.
    #[error("asset is not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Bad number in a coordinate or colour.
    #[error("bad float: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    /// Bad face index.
    #[error("bad index: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}

impl IoError {
    /// Shorthand for [`IoError::InvalidContent`].
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }

    /// Whether the input could not be parsed, as opposed to not being read.
    #[must_use]
    pub const fn is_invalid_content(&self) -> bool {
        matches!(
            self,
            Self::InvalidContent { .. }
                | Self::InvalidHeader { .. }
                | Self::InvalidFaceCount { .. }
                | Self::Utf8(_)
                | Self::ParseFloat(_)
                | Self::ParseInt(_)
        )
    }
}
