use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while loading and reporting on a recording.
///
/// Problems inside the recording itself (malformed lines, dangling object
/// references, unknown events) are never errors; only the input source and
/// the output encoders can fail.
#[derive(Error, Debug)]
pub enum StatsError {
    /// A recording could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file was recognised as a ZIP archive but its member could not be read.
    #[error("Failed to read archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// The archive contains no member to read the recording from.
    #[error("Archive contains no files: {0}")]
    EmptyArchive(PathBuf),

    /// The JSON report could not be encoded.
    #[error("Failed to encode JSON: {0}")]
    JsonEncode(#[from] serde_json::Error),
}

/// Convenience alias used throughout the acmi crates.
pub type Result<T> = std::result::Result<T, StatsError>;
