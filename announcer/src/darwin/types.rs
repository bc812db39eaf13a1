//! Darwin departure board DTOs.
//!
//! These types map directly to the Darwin LDB JSON responses, keeping only
//! the fields an announcement needs. They use `Option` liberally because
//! Darwin omits fields rather than sending null values in many cases.

use serde::Deserialize;

/// Response from `GetDepBoardWithDetails`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationBoardWithDetails {
    /// Human-readable name of the station.
    pub location_name: String,

    /// CRS code of the station.
    pub crs: String,

    /// Train services at this station.
    pub train_services: Option<Vec<ServiceItemWithCallingPoints>>,
}

impl StationBoardWithDetails {
    /// Train services, or an empty slice when Darwin omitted them.
    pub fn services(&self) -> &[ServiceItemWithCallingPoints] {
        self.train_services.as_deref().unwrap_or(&[])
    }
}

/// A service on the departure board, including calling points.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItemWithCallingPoints {
    /// Darwin service ID. Only valid while on the departure board.
    #[serde(rename = "serviceID", alias = "serviceIdGuid")]
    pub service_id: String,

    /// Scheduled time of departure from this station.
    pub std: Option<String>,

    /// Estimated time of departure from this station.
    /// May be "On time", "Delayed", "Cancelled", or a time like "10:15".
    pub etd: Option<String>,

    /// Platform number/letter.
    pub platform: Option<String>,

    /// Train operating company name.
    pub operator: Option<String>,

    /// Whether this service is cancelled.
    pub is_cancelled: Option<bool>,

    /// Train length in coaches.
    pub length: Option<i32>,

    /// Origin station(s).
    pub origin: Option<Vec<ServiceLocation>>,

    /// Destination station(s).
    pub destination: Option<Vec<ServiceLocation>>,

    /// Subsequent calling points (stations still to visit).
    pub subsequent_calling_points: Option<Vec<ArrayOfCallingPoints>>,
}

impl ServiceItemWithCallingPoints {
    /// The first listed destination.
    pub fn first_destination(&self) -> Option<&ServiceLocation> {
        self.destination.as_ref().and_then(|d| d.first())
    }

    /// The first listed origin.
    pub fn first_origin(&self) -> Option<&ServiceLocation> {
        self.origin.as_ref().and_then(|o| o.first())
    }

    /// Calling points of the main portion.
    pub fn calling_points(&self) -> &[CallingPoint] {
        self.subsequent_calling_points
            .as_ref()
            .and_then(|arrays| arrays.first())
            .map(|array| array.calling_point.as_slice())
            .unwrap_or_default()
    }

    /// A short description for log lines, e.g. `10:45 to Bristol Temple Meads`.
    pub fn describe(&self) -> String {
        format!(
            "{} to {}",
            self.std.as_deref().unwrap_or("??:??"),
            self.first_destination()
                .map_or("unknown", |d| d.location_name.as_str())
        )
    }
}

/// Wrapper for a list of calling points.
///
/// Darwin wraps calling points in this structure to support split/join services,
/// where multiple arrays represent different portions of a train.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayOfCallingPoints {
    /// The calling points in this portion.
    pub calling_point: Vec<CallingPoint>,
}

/// A single calling point (station stop).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallingPoint {
    /// Human-readable station name.
    pub location_name: String,

    /// CRS code of the station.
    pub crs: String,

    /// Estimated time; "Cancelled" marks a cancelled call.
    pub et: Option<String>,

    /// Whether this call is cancelled.
    pub is_cancelled: Option<bool>,
}

impl CallingPoint {
    pub fn is_cancelled(&self) -> bool {
        self.is_cancelled.unwrap_or(false) || self.et.as_deref() == Some("Cancelled")
    }
}

/// Origin or destination location.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLocation {
    /// Human-readable station name.
    pub location_name: String,

    /// CRS code.
    pub crs: String,

    /// "via" text (e.g., "via Bristol Parkway").
    pub via: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_station_board() {
        let json = r#"{
            "generatedAt": "2024-03-15T10:30:00Z",
            "locationName": "East Croydon",
            "crs": "ECR",
            "platformAvailable": true,
            "trainServices": [
                {
                    "serviceID": "abc123",
                    "std": "10:45",
                    "etd": "On time",
                    "platform": "4",
                    "operator": "Southern",
                    "operatorCode": "SN",
                    "length": 8,
                    "destination": [
                        {"locationName": "Littlehampton", "crs": "LIT", "via": "via Hove"}
                    ],
                    "subsequentCallingPoints": [
                        {
                            "callingPoint": [
                                {"locationName": "Gatwick Airport", "crs": "GTW", "st": "11:00", "et": "On time"},
                                {"locationName": "Littlehampton", "crs": "LIT", "st": "12:00", "et": "On time"}
                            ]
                        }
                    ]
                }
            ]
        }"#;

        let board: StationBoardWithDetails = serde_json::from_str(json).unwrap();

        assert_eq!(board.location_name, "East Croydon");
        assert_eq!(board.crs, "ECR");

        let services = board.services();
        assert_eq!(services.len(), 1);

        let service = &services[0];
        assert_eq!(service.service_id, "abc123");
        assert_eq!(service.std.as_deref(), Some("10:45"));
        assert_eq!(service.etd.as_deref(), Some("On time"));
        assert_eq!(service.platform.as_deref(), Some("4"));
        assert_eq!(service.length, Some(8));

        let dest = service.first_destination().unwrap();
        assert_eq!(dest.location_name, "Littlehampton");
        assert_eq!(dest.via.as_deref(), Some("via Hove"));

        let calls = service.calling_points();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].location_name, "Gatwick Airport");
        assert_eq!(calls[0].crs, "GTW");
        assert_eq!(service.describe(), "10:45 to Littlehampton");
    }

    #[test]
    fn board_without_services() {
        let board: StationBoardWithDetails =
            serde_json::from_str(r#"{"locationName": "Ford", "crs": "FOD"}"#).unwrap();
        assert!(board.services().is_empty());
    }

    #[test]
    fn service_id_guid_alias() {
        let service: ServiceItemWithCallingPoints =
            serde_json::from_str(r#"{"serviceIdGuid": "f00d", "std": "09:00"}"#).unwrap();

        assert_eq!(service.service_id, "f00d");
        assert!(service.calling_points().is_empty());
        assert_eq!(service.describe(), "09:00 to unknown");
    }

    #[test]
    fn cancelled_calling_point() {
        let by_flag: CallingPoint = serde_json::from_str(
            r#"{"locationName": "Hove", "crs": "HOV", "isCancelled": true}"#,
        )
        .unwrap();
        let by_estimate: CallingPoint = serde_json::from_str(
            r#"{"locationName": "Hove", "crs": "HOV", "et": "Cancelled"}"#,
        )
        .unwrap();
        let running: CallingPoint = serde_json::from_str(
            r#"{"locationName": "Hove", "crs": "HOV", "st": "10:25", "et": "10:28", "isCancelled": false}"#,
        )
        .unwrap();

        assert!(by_flag.is_cancelled());
        assert!(by_estimate.is_cancelled());
        assert!(!running.is_cancelled());
    }

    #[test]
    fn deserialize_cancelled_service() {
        let json = r#"{
            "serviceID": "xyz789",
            "std": "14:00",
            "etd": "Cancelled",
            "isCancelled": true,
            "cancelReason": "A fault with the signalling system",
            "destination": [
                {"locationName": "Brighton", "crs": "BTN"}
            ]
        }"#;

        let service: ServiceItemWithCallingPoints = serde_json::from_str(json).unwrap();

        assert!(service.is_cancelled.unwrap());
        assert_eq!(service.etd.as_deref(), Some("Cancelled"));
        assert!(service.first_origin().is_none());
    }
}
