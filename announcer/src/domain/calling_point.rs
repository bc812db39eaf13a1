//! Calling point types for announcement input.
//!
//! A `CallingPoint` is one scheduled stop as the announcement builder sees
//! it: a station plus the per-stop annotations that change what gets said
//! (short platforms, request stops, and divide markers).

use serde::{Deserialize, Serialize};

use super::formation::{Formation, blank_as_none};
use super::Crs;

/// How a train's formation changes at a calling point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SplitType {
    /// The train stays together.
    #[default]
    None,
    /// Some coaches detach here and terminate.
    SplitTerminates,
    /// The train divides here and both portions continue.
    Splits,
}

impl SplitType {
    /// Returns the divide kind, or `None` if the train does not divide.
    pub fn divide_kind(&self) -> Option<DivideKind> {
        match self {
            SplitType::None => None,
            SplitType::SplitTerminates => Some(DivideKind::SplitTerminates),
            SplitType::Splits => Some(DivideKind::Splits),
        }
    }
}

/// A formation change that actually divides the train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DivideKind {
    SplitTerminates,
    Splits,
}

impl From<DivideKind> for SplitType {
    fn from(value: DivideKind) -> Self {
        match value {
            DivideKind::SplitTerminates => SplitType::SplitTerminates,
            DivideKind::Splits => SplitType::Splits,
        }
    }
}

/// A scheduled stop on the service being announced.
///
/// Deserializes from the camelCase shape the announcement UI produces,
/// ignoring display-only fields such as `name`:
///
/// ```
/// use station_announcer::domain::{CallingPoint, SplitType};
///
/// let json = r#"{
///     "crsCode": "HRH",
///     "name": "Horsham",
///     "splitType": "splits",
///     "splitForm": "rear.4",
///     "splitCallingPoints": [{ "crsCode": "CHH" }, { "crsCode": "BOG" }]
/// }"#;
///
/// let cp: CallingPoint = serde_json::from_str(json).unwrap();
/// assert_eq!(cp.crs.as_str(), "HRH");
/// assert_eq!(cp.split_type, SplitType::Splits);
/// assert_eq!(cp.split_calling_points.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallingPoint {
    /// Station CRS code
    #[serde(rename = "crsCode")]
    pub crs: Crs,

    /// Short-platform instruction, if only part of the train can be used here
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub short_platform: Option<Formation>,

    /// Whether the train only stops here on request
    #[serde(default)]
    pub request_stop: bool,

    /// Formation change at this stop
    #[serde(default)]
    pub split_type: SplitType,

    /// The portion named by the divide marker (defaults to the front coach)
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub split_form: Option<Formation>,

    /// Stops served only by the portion named in `split_form`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub split_calling_points: Vec<CallingPoint>,
}

impl CallingPoint {
    /// Creates a plain stop with no annotations.
    pub fn new(crs: Crs) -> Self {
        Self {
            crs,
            short_platform: None,
            request_stop: false,
            split_type: SplitType::None,
            split_form: None,
            split_calling_points: Vec::new(),
        }
    }

    /// Marks this stop as having a short platform.
    pub fn with_short_platform(mut self, formation: Formation) -> Self {
        self.short_platform = Some(formation);
        self
    }

    /// Marks this stop as a request stop.
    pub fn as_request_stop(mut self) -> Self {
        self.request_stop = true;
        self
    }

    /// Marks this stop as the divide point.
    pub fn with_divide(
        mut self,
        kind: DivideKind,
        form: Option<Formation>,
        split_calling_points: Vec<CallingPoint>,
    ) -> Self {
        self.split_type = kind.into();
        self.split_form = form;
        self.split_calling_points = split_calling_points;
        self
    }

    /// Returns true if the train divides at this stop.
    pub fn is_divide(&self) -> bool {
        self.split_type != SplitType::None
    }
}

impl From<Crs> for CallingPoint {
    fn from(crs: Crs) -> Self {
        CallingPoint::new(crs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crs(s: &str) -> Crs {
        Crs::parse(s).unwrap()
    }

    #[test]
    fn new_has_no_annotations() {
        let cp = CallingPoint::new(crs("HSK"));

        assert_eq!(cp.crs, crs("HSK"));
        assert!(cp.short_platform.is_none());
        assert!(!cp.request_stop);
        assert_eq!(cp.split_type, SplitType::None);
        assert!(cp.split_form.is_none());
        assert!(cp.split_calling_points.is_empty());
        assert!(!cp.is_divide());
    }

    #[test]
    fn builders() {
        let cp = CallingPoint::new(crs("HRH"))
            .with_short_platform(Formation::parse("front.4").unwrap())
            .as_request_stop()
            .with_divide(
                DivideKind::SplitTerminates,
                Formation::parse("rear.4").ok(),
                vec![crs("CHH").into()],
            );

        assert!(cp.request_stop);
        assert!(cp.is_divide());
        assert_eq!(cp.split_type, SplitType::SplitTerminates);
        assert_eq!(cp.split_form.unwrap().to_string(), "rear.4");
        assert_eq!(cp.short_platform.unwrap().to_string(), "front.4");
    }

    #[test]
    fn split_type_wire_names() {
        assert_eq!(
            serde_json::from_str::<SplitType>(r#""none""#).unwrap(),
            SplitType::None
        );
        assert_eq!(
            serde_json::from_str::<SplitType>(r#""splitTerminates""#).unwrap(),
            SplitType::SplitTerminates
        );
        assert_eq!(
            serde_json::from_str::<SplitType>(r#""splits""#).unwrap(),
            SplitType::Splits
        );
    }

    #[test]
    fn divide_kind_mapping() {
        assert_eq!(SplitType::None.divide_kind(), None);
        assert_eq!(
            SplitType::Splits.divide_kind(),
            Some(DivideKind::Splits)
        );
        assert_eq!(SplitType::from(DivideKind::SplitTerminates), SplitType::SplitTerminates);
    }

    #[test]
    fn deserialize_minimal() {
        let cp: CallingPoint = serde_json::from_str(r#"{"crsCode": "PRP"}"#).unwrap();
        assert_eq!(cp, CallingPoint::new(crs("PRP")));
    }

    #[test]
    fn deserialize_blank_short_platform() {
        let json = r#"{"crsCode": "SWK", "shortPlatform": "", "requestStop": true}"#;
        let cp: CallingPoint = serde_json::from_str(json).unwrap();

        assert!(cp.short_platform.is_none());
        assert!(cp.request_stop);
    }

    #[test]
    fn deserialize_rejects_bad_formation() {
        let json = r#"{"crsCode": "SWK", "shortPlatform": "front.40"}"#;
        assert!(serde_json::from_str::<CallingPoint>(json).is_err());
    }

    #[test]
    fn serialize_skips_empty_annotations() {
        let cp = CallingPoint::new(crs("LIT"));
        let json = serde_json::to_string(&cp).unwrap();
        assert_eq!(
            json,
            r#"{"crsCode":"LIT","requestStop":false,"splitType":"none"}"#
        );
    }
}
