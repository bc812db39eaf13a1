//! Audio catalogue: the static tables describing which clips exist.
//!
//! The catalogue is configuration data, not logic. It records operator
//! names (and how each is spoken), disruption reasons, platforms, hours,
//! minutes and station codes that have recordings. Script builders consult
//! it for operator phrasing; callers use it to reject options that would
//! reference a missing recording before anything is played.

mod error;

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::domain::Crs;
use crate::error::AnnouncementError;

pub use error::CatalogueError;

/// Catalogue shipped with the crate.
const BUILTIN_CATALOGUE: &str = include_str!("../../data/catalogue.json");

/// How an operator name is combined with "service to".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TocStyle {
    /// No operator: just "service to".
    Generic,
    /// The name is recorded alone and followed by a separate "service to".
    Standalone,
    /// A single "<operator> service to" recording exists.
    WithServiceTo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TocLists {
    with_service_to_from: Vec<String>,
    standalone_only: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogueFile {
    tocs: TocLists,
    #[serde(default)]
    disruption_reasons: Vec<String>,
    #[serde(default)]
    platforms: Vec<String>,
    #[serde(default)]
    hours: Vec<String>,
    #[serde(default)]
    minutes: Vec<String>,
    #[serde(default)]
    stations: Vec<Crs>,
}

/// Read-only lookup of available recordings.
#[derive(Debug, Clone)]
pub struct Catalogue {
    /// Every operator name, in display form, sorted case-insensitively.
    tocs: Vec<String>,
    /// Lowercased names of operators recorded without "service to".
    standalone_tocs: HashSet<String>,
    disruption_reasons: HashSet<String>,
    platforms: HashSet<String>,
    hours: HashSet<String>,
    minutes: HashSet<String>,
    stations: HashSet<Crs>,
}

impl Catalogue {
    /// Load the catalogue shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogueError> {
        Self::from_json(BUILTIN_CATALOGUE)
    }

    /// Parse a catalogue from JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogueError> {
        let file: CatalogueFile = serde_json::from_str(json)?;

        let mut tocs: Vec<String> = file
            .tocs
            .standalone_only
            .iter()
            .chain(file.tocs.with_service_to_from.iter())
            .cloned()
            .collect();
        tocs.sort_by_key(|name| name.to_lowercase());
        tocs.dedup_by(|a, b| a.eq_ignore_ascii_case(b));

        if tocs.is_empty() {
            return Err(CatalogueError::Empty("tocs"));
        }

        Ok(Self {
            tocs,
            standalone_tocs: file
                .tocs
                .standalone_only
                .iter()
                .map(|name| name.to_lowercase())
                .collect(),
            disruption_reasons: file.disruption_reasons.into_iter().collect(),
            platforms: file
                .platforms
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
            hours: file.hours.into_iter().collect(),
            minutes: file.minutes.into_iter().collect(),
            stations: file.stations.into_iter().collect(),
        })
    }

    /// Load a catalogue from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogueError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogueError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// All operator names, sorted.
    pub fn tocs(&self) -> &[String] {
        &self.tocs
    }

    /// Finds the catalogue spelling of an operator, ignoring case.
    pub fn find_toc(&self, name: &str) -> Option<&str> {
        self.tocs
            .iter()
            .find(|t| t.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    /// How `toc` should be spoken before "service to".
    ///
    /// Operators missing from the catalogue are assumed to have a combined
    /// recording; validation reports them separately.
    pub fn toc_style(&self, toc: &str) -> TocStyle {
        if toc.is_empty() {
            TocStyle::Generic
        } else if self.standalone_tocs.contains(&toc.to_lowercase()) {
            TocStyle::Standalone
        } else {
            TocStyle::WithServiceTo
        }
    }

    /// Returns true if `platform` has recordings (case-insensitive).
    pub fn has_platform(&self, platform: &str) -> bool {
        self.platforms.contains(&platform.to_lowercase())
    }

    /// Returns true if `crs` has station recordings.
    pub fn has_station(&self, crs: &Crs) -> bool {
        self.stations.contains(crs)
    }

    /// Returns the number of stations with recordings.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn check_hour(&self, hour: &str) -> Result<(), AnnouncementError> {
        require(self.hours.contains(hour), || format!("hour.s.{hour}"))
    }

    pub fn check_minute(&self, minute: &str) -> Result<(), AnnouncementError> {
        require(self.minutes.contains(minute), || format!("mins.m.{minute}"))
    }

    pub fn check_platform(&self, platform: &str) -> Result<(), AnnouncementError> {
        require(self.has_platform(platform), || {
            format!("platform.s.{platform}")
        })
    }

    /// An empty operator is always valid (it is read as "service to").
    pub fn check_toc(&self, toc: &str) -> Result<(), AnnouncementError> {
        require(toc.is_empty() || self.find_toc(toc).is_some(), || {
            format!("toc.m.{}", toc.to_lowercase())
        })
    }

    /// An empty reason is always valid (no reason is given).
    pub fn check_disruption_reason(&self, reason: &str) -> Result<(), AnnouncementError> {
        require(
            reason.is_empty() || self.disruption_reasons.contains(reason),
            || format!("disruption-reason.e.{reason}"),
        )
    }

    /// Checks every station, reporting the first without a recording.
    pub fn check_stations<'a>(
        &self,
        stations: impl IntoIterator<Item = &'a Crs>,
    ) -> Result<(), AnnouncementError> {
        for crs in stations {
            require(self.has_station(crs), || format!("station.m.{crs}"))?;
        }
        Ok(())
    }
}

fn require(ok: bool, clip_id: impl FnOnce() -> String) -> Result<(), AnnouncementError> {
    if ok {
        Ok(())
    } else {
        let clip_id = clip_id();
        tracing::warn!(clip = %clip_id, "announcement references a missing recording");
        Err(AnnouncementError::MissingAudioAsset(clip_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> Catalogue {
        Catalogue::builtin().unwrap()
    }

    fn crs(s: &str) -> Crs {
        Crs::parse(s).unwrap()
    }

    #[test]
    fn builtin_loads() {
        let cat = builtin();

        assert!(cat.tocs().len() > 150);
        assert!(cat.station_count() > 2000);
        assert!(cat.has_station(&crs("BTN")));
        assert!(cat.has_station(&crs("HRH")));
    }

    #[test]
    fn tocs_sorted_case_insensitively() {
        let cat = builtin();
        let lowered: Vec<String> = cat.tocs().iter().map(|t| t.to_lowercase()).collect();
        let mut sorted = lowered.clone();
        sorted.sort();
        assert_eq!(lowered, sorted);
    }

    #[test]
    fn toc_styles() {
        let cat = builtin();

        assert_eq!(cat.toc_style(""), TocStyle::Generic);
        assert_eq!(cat.toc_style("southern"), TocStyle::WithServiceTo);
        assert_eq!(cat.toc_style("Southern"), TocStyle::WithServiceTo);
        assert_eq!(cat.toc_style("south western railway"), TocStyle::Standalone);
        assert_eq!(cat.toc_style("West Midlands Railway"), TocStyle::Standalone);
        assert_eq!(cat.toc_style("Some New Operator"), TocStyle::WithServiceTo);
    }

    #[test]
    fn find_toc_ignores_case() {
        let cat = builtin();

        assert_eq!(cat.find_toc("gatwick express"), Some("Gatwick Express"));
        assert_eq!(cat.find_toc("C2C"), Some("c2c"));
        assert_eq!(cat.find_toc("Avanti West Coast"), None);
    }

    #[test]
    fn platform_lookup() {
        let cat = builtin();

        assert!(cat.has_platform("1"));
        assert!(cat.has_platform("12d"));
        assert!(cat.has_platform("12D"));
        assert!(cat.has_platform("20"));
        assert!(cat.has_platform("a"));
        assert!(!cat.has_platform("21"));
        assert!(!cat.has_platform("13a"));
    }

    #[test]
    fn checks_report_clip_ids() {
        let cat = builtin();

        assert!(cat.check_hour("07").is_ok());
        assert!(cat.check_hour("00 - midnight").is_ok());
        assert_eq!(
            cat.check_hour("24"),
            Err(AnnouncementError::MissingAudioAsset("hour.s.24".into()))
        );

        assert!(cat.check_minute("33").is_ok());
        assert!(cat.check_minute("00 - hundred").is_ok());
        assert_eq!(
            cat.check_minute("01"),
            Err(AnnouncementError::MissingAudioAsset("mins.m.01".into()))
        );

        assert!(cat.check_toc("").is_ok());
        assert!(cat.check_toc("thameslink").is_ok());
        assert_eq!(
            cat.check_toc("Avanti West Coast"),
            Err(AnnouncementError::MissingAudioAsset(
                "toc.m.avanti west coast".into()
            ))
        );

        assert!(cat.check_disruption_reason("").is_ok());
        assert!(cat.check_disruption_reason("a broken rail").is_ok());
        assert!(cat.check_disruption_reason("leaves on the line").is_err());

        assert!(cat.check_platform("4").is_ok());
        assert!(cat.check_platform("99").is_err());
    }

    #[test]
    fn check_stations_reports_first_missing() {
        let cat = Catalogue::from_json(
            r#"{"tocs": {"withServiceToFrom": ["Southern"], "standaloneOnly": []},
                "stations": ["BTN", "HOV"]}"#,
        )
        .unwrap();

        assert!(cat.check_stations(&[crs("BTN"), crs("HOV")]).is_ok());
        assert_eq!(
            cat.check_stations(&[crs("BTN"), crs("XYZ"), crs("ABC")]),
            Err(AnnouncementError::MissingAudioAsset("station.m.XYZ".into()))
        );
    }

    #[test]
    fn rejects_empty_toc_lists() {
        let err = Catalogue::from_json(
            r#"{"tocs": {"withServiceToFrom": [], "standaloneOnly": []}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogueError::Empty("tocs")));
    }

    #[test]
    fn rejects_bad_station_codes() {
        let err = Catalogue::from_json(
            r#"{"tocs": {"withServiceToFrom": ["Southern"], "standaloneOnly": []},
                "stations": ["Brighton"]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogueError::Json(_)));
    }
}
