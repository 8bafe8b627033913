//! Errors raised while loading a single file

use std::process::ExitStatus;

use thiserror::Error;

use crate::model::RowWidthError;

/// Why a file produced no data.
///
/// The loader never lets one of these escape the batch; it is the "absent"
/// signal handed back to the orchestrator, with the cause kept intact.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The extension is not in the dispatch table
    #[error("unsupported file type: {}", display_extension(.extension))]
    Unsupported { extension: String },

    /// File could not be opened or read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Text file is not valid UTF-8
    #[error("invalid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[cfg(feature = "excel")]
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error(transparent)]
    RowWidth(#[from] RowWidthError),

    /// Parsed, but not into a shape we can display
    #[error("malformed input: {message}")]
    Malformed { message: String },

    /// A statistical table was found but no analytics session is configured
    #[error("no analytics session configured for statistical files")]
    SessionUnavailable,

    #[error("analytics session error: {0}")]
    Session(#[from] SessionError),
}

/// Coarse classification of a [`LoadError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    UnsupportedFormat,
    Io,
    ParseFailure,
    Session,
}

impl LoadError {
    pub fn malformed(message: impl Into<String>) -> Self {
        LoadError::Malformed {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::Unsupported { .. } => LoadErrorKind::UnsupportedFormat,
            LoadError::Io(_) => LoadErrorKind::Io,
            LoadError::Csv(e) if e.is_io_error() => LoadErrorKind::Io,
            LoadError::SessionUnavailable | LoadError::Session(_) => LoadErrorKind::Session,
            _ => LoadErrorKind::ParseFailure,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        self.kind() == LoadErrorKind::UnsupportedFormat
    }
}

fn display_extension(ext: &str) -> String {
    if ext.is_empty() {
        "(none)".to_string()
    } else {
        format!(".{ext}")
    }
}

/// Failures of the external analytics session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session is not open")]
    NotOpen,

    #[error("session has no converter program configured")]
    NoProgram,

    #[error("failed to start converter '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("converter exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("converter output is not a table: {0}")]
    Output(String),
}
