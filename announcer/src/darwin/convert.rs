//! Conversion from Darwin DTOs to announcement options.
//!
//! Darwin describes a service the way a departure board shows it; the
//! announcer wants clip keys. This module bridges the two: times become
//! hour and minute clip keys, operator names are matched against the
//! catalogue, and calling points without recordings are dropped.

use std::collections::HashMap;

use crate::catalogue::Catalogue;
use crate::config::AnnouncerConfig;
use crate::domain::{CallingPoint, ClockTime, Crs, MAX_COACHES};
use crate::script::{Chime, NextTrainOptions};

use super::types::{ServiceItemWithCallingPoints, StationBoardWithDetails};

/// Stations served by West Midlands Trains' London Northwestern brand.
const LONDON_NORTHWESTERN_STATIONS: [&str; 8] =
    ["EUS", "CRE", "BDM", "SAA", "MKC", "TRI", "LIV", "NMP"];

/// Platform used when Darwin's platform has no recording.
const FALLBACK_PLATFORM: &str = "1";

/// Error during DTO to options conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Failed to parse a CRS code
    #[error("invalid CRS code: {0}")]
    InvalidCrs(String),

    /// Failed to parse a time string
    #[error("invalid time: {0}")]
    InvalidTime(String),

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Parse an expected time field, which may be a time or a status string.
///
/// "On time" and unparseable statuses fall back to the scheduled time.
pub fn expected_departure(scheduled: ClockTime, etd: Option<&str>) -> ClockTime {
    match etd {
        Some("On time") | None => scheduled,
        Some(time_str) => ClockTime::parse_hhmm(time_str).unwrap_or(scheduled),
    }
}

/// Minutes late, never negative.
pub fn delay_minutes(scheduled: ClockTime, etd: Option<&str>) -> i64 {
    scheduled
        .minutes_until(expected_departure(scheduled, etd))
        .max(0)
}

/// Operator as the catalogue names it, or empty if it has no recording.
pub fn resolve_toc(catalogue: &Catalogue, operator: &str, origin: &str, destination: &str) -> String {
    let name = if operator.eq_ignore_ascii_case("west midlands trains") {
        if LONDON_NORTHWESTERN_STATIONS.contains(&origin)
            || LONDON_NORTHWESTERN_STATIONS.contains(&destination)
        {
            "London North Western Railway"
        } else {
            "West Midlands Railway"
        }
    } else {
        operator
    };

    catalogue.find_toc(name).unwrap_or_default().to_string()
}

/// Splits Darwin's "via" text into station names.
///
/// `"via Gatwick Airport & Horsham"` gives `["Gatwick Airport", "Horsham"]`.
pub fn via_names(via: &str) -> Vec<&str> {
    let via = via.trim();
    let via = via.strip_prefix("via ").unwrap_or(via);

    via.split('&')
        .flat_map(|part| part.split(" and "))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Converts board services to next-train options.
///
/// Holds a name-to-CRS index of every location mentioned on the board, used
/// to resolve "via" text.
#[derive(Debug)]
pub struct BoardConverter<'a> {
    catalogue: &'a Catalogue,
    config: &'a AnnouncerConfig,
    names: HashMap<String, Crs>,
}

impl<'a> BoardConverter<'a> {
    pub fn new(
        board: &StationBoardWithDetails,
        catalogue: &'a Catalogue,
        config: &'a AnnouncerConfig,
    ) -> Self {
        let mut names = HashMap::new();
        let mut add = |name: &str, crs: &str| {
            if let Ok(crs) = Crs::parse(crs) {
                names.entry(name.trim().to_lowercase()).or_insert(crs);
            }
        };

        add(&board.location_name, &board.crs);
        for service in board.services() {
            for location in service.origin.iter().chain(&service.destination).flatten() {
                add(&location.location_name, &location.crs);
            }
            for point in service.calling_points() {
                add(&point.location_name, &point.crs);
            }
        }

        Self {
            catalogue,
            config,
            names,
        }
    }

    /// Looks up a station by its display name, ignoring case.
    pub fn station_named(&self, name: &str) -> Option<Crs> {
        self.names.get(&name.trim().to_lowercase()).copied()
    }

    /// Convert a single service to next-train options.
    pub fn next_train(
        &self,
        item: &ServiceItemWithCallingPoints,
    ) -> Result<NextTrainOptions, ConversionError> {
        let std = item
            .std
            .as_deref()
            .ok_or(ConversionError::MissingField("std (scheduled departure)"))?;
        let scheduled =
            ClockTime::parse_hhmm(std).map_err(|_| ConversionError::InvalidTime(std.to_string()))?;

        let destination = item
            .first_destination()
            .ok_or(ConversionError::MissingField("destination"))?;
        let terminating = Crs::parse(&destination.crs)
            .map_err(|_| ConversionError::InvalidCrs(destination.crs.clone()))?;

        let platform = item
            .platform
            .as_deref()
            .ok_or(ConversionError::MissingField("platform"))?;
        let platform = if self.catalogue.has_platform(platform) {
            platform.to_lowercase()
        } else {
            FALLBACK_PLATFORM.to_string()
        };

        let origin = item.first_origin().map_or("", |o| o.crs.as_str());
        let toc = resolve_toc(
            self.catalogue,
            item.operator.as_deref().unwrap_or_default(),
            origin,
            &destination.crs,
        );

        let hour = match scheduled.hour_str().as_str() {
            "00" => "00 - midnight".to_string(),
            other => other.to_string(),
        };
        let min = match scheduled.minute_str().as_str() {
            "00" => "00 - hundred".to_string(),
            other => other.to_string(),
        };

        let delay = delay_minutes(scheduled, item.etd.as_deref());

        Ok(NextTrainOptions {
            chime: Chime::Four,
            platform,
            hour,
            min,
            is_delayed: delay > self.config.delayed_threshold_mins,
            toc,
            terminating_station_code: terminating,
            vias: self.vias(destination.via.as_deref()),
            calling_at: self.calling_at(item, terminating),
            coaches: item
                .length
                .and_then(|n| u8::try_from(n).ok())
                .filter(|n| (1..=MAX_COACHES).contains(n)),
        })
    }

    fn vias(&self, via: Option<&str>) -> Vec<CallingPoint> {
        let Some(via) = via else {
            return Vec::new();
        };

        via_names(via)
            .into_iter()
            .filter_map(|name| {
                let crs = self.station_named(name);
                if crs.is_none() {
                    tracing::debug!(via = name, "could not resolve via station");
                }
                crs
            })
            .map(CallingPoint::new)
            .collect()
    }

    /// Calling points with recordings, minus cancelled stops and the
    /// destination itself.
    fn calling_at(&self, item: &ServiceItemWithCallingPoints, terminating: Crs) -> Vec<CallingPoint> {
        let mut stops: Vec<Crs> = item
            .calling_points()
            .iter()
            .filter(|p| !p.is_cancelled())
            .filter_map(|p| Crs::parse(&p.crs).ok())
            .filter(|crs| self.catalogue.has_station(crs))
            .collect();

        if stops.last() == Some(&terminating) {
            stops.pop();
        }

        stops.into_iter().map(CallingPoint::new).collect()
    }
}
