use std::io;
use std::path::Path;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy for the data layer and chart builders
// ---------------------------------------------------------------------------

/// Errors raised by the data layer and the chart builders.
///
/// Core operations return these to the caller without logging or swallowing
/// them; a failed operation leaves the store and any chart model untouched.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file or table is not in the expected shape: wrong extension,
    /// ragged rows, a non-numeric cell, or a header missing its `:` label.
    #[error("format error: {0}")]
    Format(String),

    /// A dataset, lookup key, column header or column index does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Reading or writing a file failed.
    #[error("cannot access {path}: {source}")]
    Access {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl DataError {
    pub fn format(msg: impl Into<String>) -> Self {
        DataError::Format(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        DataError::NotFound(msg.into())
    }

    pub fn access(path: &Path, source: io::Error) -> Self {
        DataError::Access {
            path: path.display().to_string(),
            source,
        }
    }

    /// Map a `csv::Error` for `path`, keeping I/O failures as access errors
    /// and anything else (malformed records) as format errors.
    pub fn from_csv(path: &Path, err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io_err) => DataError::access(path, io_err),
                other => DataError::format(format!("{}: {:?}", path.display(), other)),
            }
        } else {
            DataError::format(format!("{}: {err}", path.display()))
        }
    }
}
