//! Darwin board loading error types.

use std::fmt;
use std::path::PathBuf;

/// Errors from loading a Darwin departure board.
#[derive(Debug)]
pub enum DarwinError {
    /// The board file could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },
}

impl fmt::Display for DarwinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DarwinError::Io { path, source } => {
                write!(f, "failed to read board {}: {source}", path.display())
            }
            DarwinError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for DarwinError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DarwinError::Io { source, .. } => Some(source),
            DarwinError::Json { .. } => None,
        }
    }
}
