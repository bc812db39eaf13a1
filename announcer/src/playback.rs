//! Handing finished scripts to an audio player.
//!
//! Playing audio is someone else's job: a player receives the ordered clip
//! list and either plays it or saves it for download. The [`Announcer`]
//! validates and builds a script completely before the player sees it, so a
//! failed build never produces partial audio.

use std::future::Future;
use std::path::PathBuf;

use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::audio::AudioItem;
use crate::catalogue::Catalogue;
use crate::config::AnnouncerConfig;
use crate::error::AnnouncementError;
use crate::script::{Announcement, ScriptBuilder};

/// Plays or downloads a finished script.
pub trait AudioPlayer {
    /// Plays `sequence` in order, or saves it when `as_download` is set.
    fn play(
        &self,
        sequence: &[AudioItem],
        as_download: bool,
    ) -> impl Future<Output = Result<(), AnnouncementError>> + Send;
}

/// Writes scripts to stdout, one clip per line, or as JSON when downloading.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutPlayer;

impl AudioPlayer for StdoutPlayer {
    async fn play(&self, sequence: &[AudioItem], as_download: bool) -> Result<(), AnnouncementError> {
        let out = if as_download {
            let mut json = serde_json::to_string_pretty(sequence)
                .map_err(|e| AnnouncementError::Playback(e.to_string()))?;
            json.push('\n');
            json
        } else {
            sequence.iter().map(|item| format!("{item}\n")).collect()
        };

        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(out.as_bytes())
            .await
            .map_err(|e| AnnouncementError::Playback(e.to_string()))?;
        stdout
            .flush()
            .await
            .map_err(|e| AnnouncementError::Playback(e.to_string()))
    }
}

/// Saves downloaded scripts as a JSON manifest for an external player to fetch.
///
/// The manifest is the clip list in its wire shape, so the file can be fed
/// straight to the audio-asset resolver. Scripts that are not downloads are
/// played through [`StdoutPlayer`] and leave the manifest untouched.
#[derive(Debug, Clone)]
pub struct ManifestPlayer {
    path: PathBuf,
}

impl ManifestPlayer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl AudioPlayer for ManifestPlayer {
    async fn play(&self, sequence: &[AudioItem], as_download: bool) -> Result<(), AnnouncementError> {
        if !as_download {
            return StdoutPlayer.play(sequence, false).await;
        }

        let json = serde_json::to_vec_pretty(sequence)
            .map_err(|e| AnnouncementError::Playback(e.to_string()))?;

        tokio::fs::write(&self.path, json).await.map_err(|e| {
            AnnouncementError::Playback(format!(
                "failed to write manifest {}: {}",
                self.path.display(),
                e
            ))
        })?;

        debug!(
            path = %self.path.display(),
            clips = sequence.len(),
            "wrote announcement manifest"
        );
        Ok(())
    }
}

/// Validates, builds and plays announcements.
#[derive(Debug)]
pub struct Announcer<P> {
    config: AnnouncerConfig,
    catalogue: Catalogue,
    player: P,
}

impl<P: AudioPlayer> Announcer<P> {
    pub fn new(config: AnnouncerConfig, catalogue: Catalogue, player: P) -> Self {
        Self {
            config,
            catalogue,
            player,
        }
    }

    pub fn config(&self) -> &AnnouncerConfig {
        &self.config
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn builder(&self) -> ScriptBuilder<'_> {
        ScriptBuilder::new(&self.config, &self.catalogue)
    }

    /// Plays an announcement, returning the script that was played.
    ///
    /// Validation and building both finish before the player is called; on
    /// error the player is never invoked.
    pub async fn announce(
        &self,
        announcement: &Announcement,
        as_download: bool,
    ) -> Result<Vec<AudioItem>, AnnouncementError> {
        announcement.validate(&self.catalogue)?;
        let script = self.builder().build(announcement)?;

        info!(
            kind = announcement.kind(),
            clips = script.len(),
            as_download,
            "playing announcement"
        );
        self.player.play(&script, as_download).await?;

        Ok(script)
    }
}
