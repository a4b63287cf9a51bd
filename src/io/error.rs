//! Error types and context management for tiling operations

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Why a search stopped before reaching a goal node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The configured wall-clock limit elapsed
    TimeLimit(Duration),
    /// The search expanded as many nodes as it was allowed
    ExpansionLimit(usize),
    /// The caller raised the cancellation flag
    Cancelled,
    /// No open nodes remained; only reachable if the catalog loses the unit brick
    FrontierExhausted,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimeLimit(limit) => write!(f, "time limit of {limit:?} exceeded"),
            Self::ExpansionLimit(limit) => write!(f, "expansion budget of {limit} nodes used up"),
            Self::Cancelled => f.write_str("cancelled"),
            Self::FrontierExhausted => f.write_str("frontier exhausted"),
        }
    }
}

/// Main error type for all tiling operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Failed to decode a source image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Source image is not stored as three bytes per pixel
    UnsupportedPixelFormat {
        /// Path to the image file
        path: PathBuf,
        /// Pixel layout that was found
        color_type: String,
    },

    /// Source image does not have the fixed grid size
    InvalidDimensions {
        /// Width that was found
        width: usize,
        /// Height that was found
        height: usize,
        /// Required width and height
        expected: (usize, usize),
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Best-first search stopped before finding a tiling
    SearchAborted {
        /// What stopped the search
        reason: AbortReason,
        /// Nodes expanded before stopping
        expanded: usize,
    },

    /// Failed to save a generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::UnsupportedPixelFormat { path, color_type } => {
                write!(
                    f,
                    "Unsupported color depth in source image '{}': {color_type} (expected 8-bit RGB)",
                    path.display()
                )
            }
            Self::InvalidDimensions {
                width,
                height,
                expected,
            } => {
                write!(
                    f,
                    "Source image is {width}x{height}, expected {}x{}",
                    expected.0, expected.1
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::SearchAborted { reason, expanded } => {
                write!(f, "Search aborted after {expanded} expansions: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for tiling results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

const UNKNOWN_PATH: &str = "<unknown>";

/// Enriches IO and image errors with the path being worked on
pub trait WithContext<T> {
    /// Attach a path to errors that were converted without one
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;

    /// Name the file system operation that failed
    ///
    /// # Errors
    ///
    /// Propagates the original error with the operation applied
    fn with_operation(self, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<AlgorithmError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only errors created through `From` carry the placeholder path
            match &mut error {
                AlgorithmError::ImageLoad { path: p, .. }
                | AlgorithmError::ImageExport { path: p, .. }
                | AlgorithmError::FileSystem { path: p, .. }
                | AlgorithmError::UnsupportedPixelFormat { path: p, .. }
                    if p.as_os_str() == UNKNOWN_PATH =>
                {
                    *p = path.to_path_buf();
                }
                _ => {}
            }
            error
        })
    }

    fn with_operation(self, operation: &'static str) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            if let AlgorithmError::FileSystem { operation: op, .. } = &mut error {
                *op = operation;
            }
            error
        })
    }
}

impl From<image::ImageError> for AlgorithmError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a search aborted error
pub const fn search_aborted(reason: AbortReason, expanded: usize) -> AlgorithmError {
    AlgorithmError::SearchAborted { reason, expanded }
}

/// Create a path validation error for the CLI
pub fn path_error(path: &Path, msg: &str) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter: "path",
        value: path.display().to_string(),
        reason: msg.to_string(),
    }
}
