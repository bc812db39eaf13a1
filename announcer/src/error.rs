//! Announcement error types.
//!
//! Every failure is raised while the script is being built or validated,
//! before anything is handed to the player, so an error always means
//! nothing was played.

/// Errors that abandon an announcement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnnouncementError {
    /// The calling pattern describes a divide that cannot be announced
    #[error("invalid train configuration: {0}")]
    InvalidTrainConfiguration(String),

    /// A clip the script needs is not in the audio catalogue
    #[error("audio clip not available: {0}")]
    MissingAudioAsset(String),

    /// An option value could not be understood
    #[error("invalid announcement option {field}: {message}")]
    InvalidOption {
        field: &'static str,
        message: String,
    },

    /// The player failed after accepting the script
    #[error("playback failed: {0}")]
    Playback(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AnnouncementError::InvalidTrainConfiguration(
            "splitting train doesn't have any calling points".into(),
        );
        assert_eq!(
            err.to_string(),
            "invalid train configuration: splitting train doesn't have any calling points"
        );

        let err = AnnouncementError::MissingAudioAsset("hour.s.25".into());
        assert_eq!(err.to_string(), "audio clip not available: hour.s.25");

        let err = AnnouncementError::InvalidOption {
            field: "delayTime",
            message: "expected a number of minutes".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid announcement option delayTime: expected a number of minutes"
        );

        let err = AnnouncementError::Playback("output closed".into());
        assert_eq!(err.to_string(), "playback failed: output closed");
    }
}
