//! Audio items and the clip identifier namespace.
//!
//! Clip ids are dotted keys resolved by the external audio-asset store, so
//! their spelling is part of the wire contract. Phrases come in several
//! recordings that differ only in intonation, selected by an inflection
//! letter: `s.` opens a sentence, `m.` sits mid-sentence, `e.` closes one,
//! and `w.` is a whole standalone sentence.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Crs;

/// Intonation variant of a recorded phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inflection {
    Start,
    Mid,
    End,
    Whole,
}

impl Inflection {
    /// The single-letter key used in clip ids.
    pub fn letter(&self) -> &'static str {
        match self {
            Inflection::Start => "s",
            Inflection::Mid => "m",
            Inflection::End => "e",
            Inflection::Whole => "w",
        }
    }

    /// Mid-sentence unless `at_end`.
    pub fn mid_or_end(at_end: bool) -> Self {
        if at_end { Inflection::End } else { Inflection::Mid }
    }

    /// Clip id for a spoken phrase in this inflection.
    pub fn phrase(&self, text: impl fmt::Display) -> String {
        format!("{}.{}", self.letter(), text)
    }
}

/// Playback hints attached to a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipOpts {
    /// Silence before the clip starts, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_start: Option<u32>,
}

/// One entry of an announcement script.
///
/// Serializes to the shape the player expects: a bare string, or
/// `{ "id": ..., "opts": { "delayStart": ... } }`.
///
/// ```
/// use station_announcer::audio::AudioItem;
///
/// let items = vec![
///     AudioItem::delayed("m.calling at", 750),
///     AudioItem::from("station.m.HSK"),
/// ];
/// assert_eq!(
///     serde_json::to_string(&items).unwrap(),
///     r#"[{"id":"m.calling at","opts":{"delayStart":750}},"station.m.HSK"]"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AudioItem {
    Clip(String),
    WithOpts { id: String, opts: ClipOpts },
}

impl AudioItem {
    /// A clip with no playback hints.
    pub fn clip(id: impl Into<String>) -> Self {
        AudioItem::Clip(id.into())
    }

    /// A clip preceded by `delay_ms` of silence.
    pub fn delayed(id: impl Into<String>, delay_ms: u32) -> Self {
        AudioItem::WithOpts {
            id: id.into(),
            opts: ClipOpts {
                delay_start: Some(delay_ms),
            },
        }
    }

    /// A clip with an optional delay; `None` gives a bare clip.
    pub fn with_delay(id: impl Into<String>, delay_ms: Option<u32>) -> Self {
        match delay_ms {
            Some(ms) => AudioItem::delayed(id, ms),
            None => AudioItem::clip(id),
        }
    }

    /// Returns the clip id.
    pub fn id(&self) -> &str {
        match self {
            AudioItem::Clip(id) => id,
            AudioItem::WithOpts { id, .. } => id,
        }
    }

    /// Returns the start delay, if any.
    pub fn delay_start(&self) -> Option<u32> {
        match self {
            AudioItem::Clip(_) => None,
            AudioItem::WithOpts { opts, .. } => opts.delay_start,
        }
    }
}

impl From<String> for AudioItem {
    fn from(value: String) -> Self {
        AudioItem::Clip(value)
    }
}

impl From<&str> for AudioItem {
    fn from(value: &str) -> Self {
        AudioItem::Clip(value.to_string())
    }
}

impl fmt::Display for AudioItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.delay_start() {
            Some(ms) => write!(f, "{} (+{}ms)", self.id(), ms),
            None => f.write_str(self.id()),
        }
    }
}

/// Builders for the fixed parts of the clip namespace.
pub mod clip {
    use std::fmt::Display;

    use super::Inflection;
    use crate::domain::Crs;

    /// List conjunction "and".
    pub const AND: &str = "m.and";

    /// List conjunction "or".
    pub const OR: &str = "m.or-2";

    /// Start-of-sentence phrase.
    pub fn s(text: impl Display) -> String {
        Inflection::Start.phrase(text)
    }

    /// Mid-sentence phrase.
    pub fn m(text: impl Display) -> String {
        Inflection::Mid.phrase(text)
    }

    /// End-of-sentence phrase.
    pub fn e(text: impl Display) -> String {
        Inflection::End.phrase(text)
    }

    /// Whole standalone sentence.
    pub fn w(text: impl Display) -> String {
        Inflection::Whole.phrase(text)
    }

    /// Prefix for station clips, to be followed by a CRS code.
    pub fn station_prefix(inflection: Inflection) -> String {
        format!("station.{}.", inflection.letter())
    }

    /// `station.<i>.<CRS>`
    pub fn station(inflection: Inflection, crs: &Crs) -> String {
        format!("{}{}", station_prefix(inflection), crs)
    }

    /// `hour.s.<HH>`
    pub fn hour(hour: &str) -> String {
        format!("hour.s.{hour}")
    }

    /// `mins.m.<MM>`; also used for spoken numbers from 10 upwards.
    pub fn minutes(minute: impl Display) -> String {
        format!("mins.m.{minute}")
    }

    /// `platform.<i>.<n>`; platform numbers double as coach counts and small numerals.
    pub fn number(inflection: Inflection, n: impl Display) -> String {
        format!("platform.{}.{}", inflection.letter(), n)
    }

    /// `toc.m.<operator>` with the operator name lowercased.
    pub fn toc(name: &str) -> String {
        format!("toc.m.{}", name.to_lowercase())
    }

    /// `disruption-reason.e.<reason>`
    pub fn disruption_reason(reason: &str) -> String {
        format!("disruption-reason.e.{reason}")
    }

    /// `sfx - <n> chimes`
    pub fn chimes(count: &str) -> String {
        format!("sfx - {count} chimes")
    }
}

/// Convenience for a list of station clips in one inflection.
pub fn station_clips<'a>(
    stations: impl IntoIterator<Item = &'a Crs>,
    inflection: Inflection,
) -> Vec<String> {
    stations
        .into_iter()
        .map(|crs| clip::station(inflection, crs))
        .collect()
}
