//! Announcement options as supplied by the UI or the live adapter.
//!
//! The wire format is the camelCase JSON the announcement UI produces.
//! Fields are kept close to that shape (hour and minute stay as their clip
//! keys, for example) and checked against the catalogue before building.

use serde::{Deserialize, Deserializer, Serialize};

use crate::audio::clip;
use crate::catalogue::Catalogue;
use crate::domain::{CallingPoint, Crs, MAX_COACHES};
use crate::error::AnnouncementError;

/// Chime played before the announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chime {
    Three,
    #[default]
    Four,
    None,
}

impl Chime {
    /// The chime clip, if any.
    pub fn clip(&self) -> Option<String> {
        match self {
            Chime::Three => Some(clip::chimes("three")),
            Chime::Four => Some(clip::chimes("four")),
            Chime::None => None,
        }
    }
}

/// What has gone wrong with a disrupted train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisruptionType {
    /// Delayed by an unknown amount.
    #[default]
    Delay,
    /// Delayed by `delayTime` minutes.
    DelayedBy,
    Cancel,
}

/// Options for a next-train announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextTrainOptions {
    #[serde(default)]
    pub chime: Chime,
    pub platform: String,
    /// Hour clip key, e.g. `"07"` or `"00 - midnight"`.
    pub hour: String,
    /// Minute clip key, e.g. `"33"` or `"00 - hundred"`.
    pub min: String,
    #[serde(default)]
    pub is_delayed: bool,
    #[serde(default)]
    pub toc: String,
    pub terminating_station_code: Crs,
    #[serde(default)]
    pub vias: Vec<CallingPoint>,
    #[serde(default)]
    pub calling_at: Vec<CallingPoint>,
    /// Train length; also accepts the UI's `"8 coaches"` form.
    #[serde(
        default,
        deserialize_with = "coach_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub coaches: Option<u8>,
}

impl NextTrainOptions {
    pub fn via_codes(&self) -> Vec<Crs> {
        self.vias.iter().map(|v| v.crs).collect()
    }

    /// Checks every clip the announcement will reference.
    pub fn validate(&self, catalogue: &Catalogue) -> Result<(), AnnouncementError> {
        catalogue.check_platform(&self.platform)?;
        catalogue.check_hour(&self.hour)?;
        catalogue.check_minute(&self.min)?;
        catalogue.check_toc(&self.toc)?;

        let calling_points = self.calling_at.iter().flat_map(|p| {
            std::iter::once(&p.crs).chain(p.split_calling_points.iter().map(|s| &s.crs))
        });
        catalogue.check_stations(
            std::iter::once(&self.terminating_station_code)
                .chain(self.vias.iter().map(|v| &v.crs))
                .chain(calling_points),
        )?;

        if let Some(coaches) = self.coaches
            && !(1..=MAX_COACHES).contains(&coaches)
        {
            return Err(AnnouncementError::InvalidOption {
                field: "coaches",
                message: format!("{coaches} is not between 1 and {MAX_COACHES}"),
            });
        }

        Ok(())
    }
}

/// Options for a delayed or cancelled train announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisruptedTrainOptions {
    #[serde(default)]
    pub chime: Chime,
    /// Not spoken; kept so UI payloads round-trip.
    #[serde(default)]
    pub platform: String,
    pub hour: String,
    pub min: String,
    #[serde(default)]
    pub toc: String,
    pub terminating_station_code: Crs,
    #[serde(default)]
    pub vias: Vec<CallingPoint>,
    #[serde(default)]
    pub disruption_type: DisruptionType,
    /// Reason clip key; empty for no reason.
    #[serde(default)]
    pub disruption_reason: String,
    /// Minutes of delay, for [`DisruptionType::DelayedBy`].
    #[serde(default)]
    pub delay_time: String,
}

impl DisruptedTrainOptions {
    /// Parses `delay_time` as a whole number of minutes.
    pub fn delay_minutes(&self) -> Result<u32, AnnouncementError> {
        self.delay_time
            .trim()
            .parse()
            .map_err(|_| AnnouncementError::InvalidOption {
                field: "delayTime",
                message: format!("'{}' is not a whole number of minutes", self.delay_time),
            })
    }

    pub fn validate(&self, catalogue: &Catalogue) -> Result<(), AnnouncementError> {
        catalogue.check_hour(&self.hour)?;
        catalogue.check_minute(&self.min)?;
        catalogue.check_toc(&self.toc)?;
        catalogue.check_stations([&self.terminating_station_code])?;
        catalogue.check_disruption_reason(&self.disruption_reason)?;

        if self.disruption_type == DisruptionType::DelayedBy {
            let minutes = self.delay_minutes()?;
            // Below ten the numeral comes from the platform recordings.
            if minutes < 10 {
                catalogue.check_platform(&minutes.to_string())?;
            } else {
                catalogue.check_minute(&minutes.to_string())?;
            }
        }

        Ok(())
    }
}

/// Options for a non-stopping train announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThroughTrainOptions {
    #[serde(default)]
    pub chime: Chime,
    pub platform: String,
}

impl ThroughTrainOptions {
    pub fn validate(&self, catalogue: &Catalogue) -> Result<(), AnnouncementError> {
        catalogue.check_platform(&self.platform)
    }
}

/// Accepts `8`, `"8"`, `"8 coaches"`, `""` or `null`.
fn coach_count<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u8),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(text)) => match text.split_whitespace().next() {
            None => Ok(None),
            Some(count) => count
                .parse()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid coach count: {text}"))),
        },
    }
}
