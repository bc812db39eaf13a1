//! Coach formation and train portion types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Longest train a formation can describe.
pub const MAX_COACHES: u8 = 12;

/// Error returned when parsing an invalid formation string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid formation {input:?}: {reason}")]
pub struct InvalidFormation {
    input: String,
    reason: &'static str,
}

/// Which end of the train a group of coaches sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CoachPosition {
    Front,
    Middle,
    Rear,
}

impl CoachPosition {
    /// The word used in clip ids (`m.should travel in the front`).
    pub fn as_str(&self) -> &'static str {
        match self {
            CoachPosition::Front => "front",
            CoachPosition::Middle => "middle",
            CoachPosition::Rear => "rear",
        }
    }

    /// The end a continuing portion occupies when this end detaches.
    ///
    /// A front detachment leaves the rear; anything else leaves the front.
    pub fn opposite(&self) -> Self {
        match self {
            CoachPosition::Front => CoachPosition::Rear,
            CoachPosition::Middle | CoachPosition::Rear => CoachPosition::Front,
        }
    }
}

impl FromStr for CoachPosition {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "front" => Ok(CoachPosition::Front),
            "middle" => Ok(CoachPosition::Middle),
            "rear" => Ok(CoachPosition::Rear),
            _ => Err(()),
        }
    }
}

/// A run of coaches at one end of a train, written `"<position>.<count>"`.
///
/// Used both for short-platform instructions ("only the front 4 coaches will
/// open") and for the portion named by a divide marker.
///
/// # Examples
///
/// ```
/// use station_announcer::domain::{CoachPosition, Formation};
///
/// let f = Formation::parse("rear.4").unwrap();
/// assert_eq!(f.position(), CoachPosition::Rear);
/// assert_eq!(f.coaches(), 4);
/// assert_eq!(f.to_string(), "rear.4");
///
/// assert!(Formation::parse("rear").is_err());
/// assert!(Formation::parse("side.2").is_err());
/// assert!(Formation::parse("front.13").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Formation {
    position: CoachPosition,
    coaches: u8,
}

impl Formation {
    /// Formation assumed for a divide marker that does not give one.
    pub const DEFAULT_SPLIT: Formation = Formation {
        position: CoachPosition::Front,
        coaches: 1,
    };

    /// Create a formation, rejecting coach counts outside 1..=12.
    pub fn new(position: CoachPosition, coaches: u8) -> Result<Self, InvalidFormation> {
        if coaches == 0 || coaches > MAX_COACHES {
            return Err(InvalidFormation {
                input: format!("{}.{}", position.as_str(), coaches),
                reason: "coach count must be 1-12",
            });
        }
        Ok(Self { position, coaches })
    }

    /// Parse a `"<position>.<count>"` string.
    pub fn parse(s: &str) -> Result<Self, InvalidFormation> {
        let invalid = |reason| InvalidFormation {
            input: s.to_string(),
            reason,
        };

        let (position, count) = s
            .split_once('.')
            .ok_or_else(|| invalid("expected <position>.<count>"))?;

        let position = position
            .parse::<CoachPosition>()
            .map_err(|_| invalid("position must be front, middle or rear"))?;

        let coaches = count
            .parse::<u8>()
            .map_err(|_| invalid("count must be a number"))?;

        Self::new(position, coaches).map_err(|_| invalid("coach count must be 1-12"))
    }

    /// Returns the end of the train.
    pub fn position(&self) -> CoachPosition {
        self.position
    }

    /// Returns the number of coaches.
    pub fn coaches(&self) -> u8 {
        self.coaches
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.position.as_str(), self.coaches)
    }
}

impl Serialize for Formation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Formation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Formation::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Deserialize an optional formation, treating `""` and `null` as absent.
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<Formation>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => Formation::parse(s).map(Some).map_err(serde::de::Error::custom),
    }
}

/// The part of a train that serves a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PortionPosition {
    /// Undivided stretch: every coach serves the stop.
    Any,
    Front,
    Middle,
    Rear,
    /// Divided, but the formation is not known.
    Unknown,
}

impl PortionPosition {
    /// The word used in clip ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            PortionPosition::Any => "any",
            PortionPosition::Front => "front",
            PortionPosition::Middle => "middle",
            PortionPosition::Rear => "rear",
            PortionPosition::Unknown => "unknown",
        }
    }

    /// Returns the physical end, if this is one.
    pub fn coach_position(&self) -> Option<CoachPosition> {
        match self {
            PortionPosition::Front => Some(CoachPosition::Front),
            PortionPosition::Middle => Some(CoachPosition::Middle),
            PortionPosition::Rear => Some(CoachPosition::Rear),
            PortionPosition::Any | PortionPosition::Unknown => None,
        }
    }
}

impl From<CoachPosition> for PortionPosition {
    fn from(value: CoachPosition) -> Self {
        match value {
            CoachPosition::Front => PortionPosition::Front,
            CoachPosition::Middle => PortionPosition::Middle,
            CoachPosition::Rear => PortionPosition::Rear,
        }
    }
}

/// Position and length (in coaches) of the part of the train serving a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Portion {
    pub position: PortionPosition,
    pub length: Option<u8>,
}

impl Portion {
    pub fn new(position: PortionPosition, length: Option<u8>) -> Self {
        Self { position, length }
    }

    /// The whole train, before any divide.
    pub fn whole(length: Option<u8>) -> Self {
        Self::new(PortionPosition::Any, length)
    }

    /// A divided portion whose formation is not known.
    pub fn unknown() -> Self {
        Self::new(PortionPosition::Unknown, None)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn position() -> impl Strategy<Value = CoachPosition> {
        prop_oneof![
            Just(CoachPosition::Front),
            Just(CoachPosition::Middle),
            Just(CoachPosition::Rear),
        ]
    }

    proptest! {
        /// Every in-range formation survives display then parse
        #[test]
        fn display_parse_roundtrip(pos in position(), n in 1u8..=12) {
            let f = Formation::new(pos, n).unwrap();
            prop_assert_eq!(Formation::parse(&f.to_string()).unwrap(), f);
        }

        /// Counts above the maximum are always rejected
        #[test]
        fn oversized_rejected(pos in position(), n in 13u8..=255) {
            prop_assert!(Formation::new(pos, n).is_err());
        }
    }
}
