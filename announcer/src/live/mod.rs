//! Announcing trains from a live departure board.
//!
//! Given a Darwin board and the current time, pick the first service that is
//! about to depart and has not been announced yet, convert it to next-train
//! options and play it.

mod registry;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::audio::AudioItem;
use crate::catalogue::Catalogue;
use crate::config::AnnouncerConfig;
use crate::darwin::{
    BoardConverter, ServiceItemWithCallingPoints, StationBoardWithDetails, expected_departure,
};
use crate::domain::ClockTime;
use crate::error::AnnouncementError;
use crate::playback::{Announcer, AudioPlayer};
use crate::script::{Announcement, NextTrainOptions};

pub use registry::AnnouncedRegistry;

/// A service chosen for announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveSelection {
    pub service_id: String,
    pub options: NextTrainOptions,
}

/// Why a service was passed over.
fn skip_reason(
    service: &ServiceItemWithCallingPoints,
    now: ClockTime,
    window_mins: i64,
) -> Option<&'static str> {
    let etd = service.etd.as_deref();

    if service.is_cancelled.unwrap_or(false) || etd == Some("Cancelled") {
        return Some("cancelled");
    }
    if etd == Some("Delayed") {
        return Some("delayed without estimate");
    }
    if service.platform.as_deref().is_none_or(str::is_empty) {
        return Some("no platform");
    }

    let Some(scheduled) = service
        .std
        .as_deref()
        .and_then(|std| ClockTime::parse_hhmm(std).ok())
    else {
        return Some("no scheduled departure");
    };

    let departs_in = now.minutes_until(expected_departure(scheduled, etd));
    if departs_in > window_mins {
        return Some("not departing yet");
    }
    if departs_in < -window_mins {
        return Some("already departed");
    }

    None
}

/// Picks the next service to announce and claims it in `registry`.
///
/// Services are considered in board order. A claimed service that then fails
/// conversion stays claimed, so a malformed entry is not retried on every
/// poll.
pub async fn select_next_train(
    board: &StationBoardWithDetails,
    now: ClockTime,
    registry: &AnnouncedRegistry,
    catalogue: &Catalogue,
    config: &AnnouncerConfig,
) -> Option<LiveSelection> {
    let converter = BoardConverter::new(board, catalogue, config);

    for service in board.services() {
        if registry.contains(&service.service_id) {
            debug!(service = %service.describe(), "skipping: already announced");
            continue;
        }
        if let Some(reason) = skip_reason(service, now, config.announce_window_mins) {
            debug!(service = %service.describe(), reason, "skipping");
            continue;
        }
        if !registry.claim(&service.service_id).await {
            debug!(service = %service.describe(), "skipping: claimed by another poller");
            continue;
        }

        match converter.next_train(service) {
            Ok(options) => {
                return Some(LiveSelection {
                    service_id: service.service_id.clone(),
                    options,
                });
            }
            Err(e) => {
                warn!(service = %service.describe(), error = %e, "failed to convert service");
            }
        }
    }

    None
}

/// A live announcement that was played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveAnnouncement {
    pub service_id: String,
    pub script: Vec<AudioItem>,
}

/// Announces departures from successive boards, one at a time.
#[derive(Debug)]
pub struct LiveAnnouncer<P> {
    announcer: Announcer<P>,
    registry: AnnouncedRegistry,
    in_flight: Mutex<()>,
}

impl<P: AudioPlayer> LiveAnnouncer<P> {
    pub fn new(announcer: Announcer<P>) -> Self {
        let registry = AnnouncedRegistry::new(announcer.config());
        Self {
            announcer,
            registry,
            in_flight: Mutex::new(()),
        }
    }

    pub fn announcer(&self) -> &Announcer<P> {
        &self.announcer
    }

    pub fn registry(&self) -> &AnnouncedRegistry {
        &self.registry
    }

    /// Announces the next suitable train on `board`, if any.
    ///
    /// Returns `Ok(None)` when nothing is due or another announcement is
    /// still playing.
    pub async fn poll(
        &self,
        board: &StationBoardWithDetails,
        now: ClockTime,
    ) -> Result<Option<LiveAnnouncement>, AnnouncementError> {
        let Ok(_guard) = self.in_flight.try_lock() else {
            debug!(station = %board.crs, "announcement already playing");
            return Ok(None);
        };

        let Some(selection) = select_next_train(
            board,
            now,
            &self.registry,
            self.announcer.catalogue(),
            self.announcer.config(),
        )
        .await
        else {
            return Ok(None);
        };

        info!(
            station = %board.crs,
            service_id = %selection.service_id,
            "announcing live departure"
        );
        let script = self
            .announcer
            .announce(&Announcement::NextTrain(selection.options), false)
            .await?;

        Ok(Some(LiveAnnouncement {
            service_id: selection.service_id,
            script,
        }))
    }
}
