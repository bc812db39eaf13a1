//! Darwin LDB (Live Departure Boards) adapter.
//!
//! Reads `GetDepBoardWithDetails` responses and turns their services into
//! next-train options. Fetching boards is left to whoever polls Darwin; this
//! module only consumes the JSON they saved.
//!
//! Key characteristics of Darwin:
//! - Service IDs are **ephemeral** - only valid while the service appears
//!   on a departure board
//! - Times are in "HH:MM" format (UK local time)
//! - Estimated times may be statuses ("On time", "Delayed", "Cancelled")

mod convert;
mod error;
mod types;

use std::path::Path;

pub use convert::{
    BoardConverter, ConversionError, delay_minutes, expected_departure, resolve_toc, via_names,
};
pub use error::DarwinError;
pub use types::{
    ArrayOfCallingPoints, CallingPoint, ServiceItemWithCallingPoints, ServiceLocation,
    StationBoardWithDetails,
};

/// Longest body excerpt kept in a JSON error.
const BODY_EXCERPT_LEN: usize = 200;

/// Parses a departure board response.
pub fn parse_board(json: &str) -> Result<StationBoardWithDetails, DarwinError> {
    serde_json::from_str(json).map_err(|e| DarwinError::Json {
        message: e.to_string(),
        body: Some(json.chars().take(BODY_EXCERPT_LEN).collect()),
    })
}

/// Reads and parses a saved departure board.
pub async fn load_board(path: impl AsRef<Path>) -> Result<StationBoardWithDetails, DarwinError> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DarwinError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let board = parse_board(&json)?;
    tracing::debug!(
        path = %path.display(),
        station = %board.crs,
        services = board.services().len(),
        "loaded departure board"
    );
    Ok(board)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parse_error_keeps_excerpt() {
        let err = parse_board(r#"{"crs": 12}"#).unwrap_err();
        match err {
            DarwinError::Json { body, .. } => assert_eq!(body.as_deref(), Some(r#"{"crs": 12}"#)),
            other => panic!("unexpected error: {other}"),
        }

        let long = format!("[{}", "1,".repeat(500));
        match parse_board(&long).unwrap_err() {
            DarwinError::Json { body, .. } => assert_eq!(body.unwrap().len(), BODY_EXCERPT_LEN),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn load_board_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"locationName": "Ford", "crs": "FOD", "trainServices": []}}"#
        )
        .unwrap();

        let board = load_board(file.path()).await.unwrap();
        assert_eq!(board.location_name, "Ford");
        assert!(board.services().is_empty());
    }

    #[tokio::test]
    async fn load_missing_board() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_board(dir.path().join("ECR.json")).await.unwrap_err();
        assert!(matches!(err, DarwinError::Io { .. }));
        assert!(err.to_string().contains("ECR.json"));
    }
}
