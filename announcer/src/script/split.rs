//! Split resolution: which part of the train serves which stop.
//!
//! A calling-point list may carry one divide marker. Stops up to and
//! including the marker are served by the whole train. After it, the train
//! is in two portions: the *continuing* portion runs on through the rest of
//! the list to the terminating station, and the *detaching* portion (the
//! one named by the marker's formation) serves the marker's own
//! split calling points.

use crate::domain::{
    CallingPoint, Crs, DivideKind, Formation, MAX_COACHES, Portion, PortionPosition, SplitType,
};

/// A stop tagged with the portion of the train that serves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitInfoStop {
    pub crs: Crs,
    pub short_platform: Option<Formation>,
    pub request_stop: bool,
    pub portion: Portion,
}

impl SplitInfoStop {
    fn tagged(point: &CallingPoint, portion: Portion) -> Self {
        Self {
            crs: point.crs,
            short_platform: point.short_platform,
            request_stop: point.request_stop,
            portion,
        }
    }
}

/// One half of a divided train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPortion {
    pub stops: Vec<SplitInfoStop>,
    pub position: PortionPosition,
    pub length: Option<u8>,
}

impl SplitPortion {
    fn new(points: &[CallingPoint], portion: Portion) -> Self {
        Self {
            stops: points
                .iter()
                .map(|p| SplitInfoStop::tagged(p, portion))
                .collect(),
            position: portion.position,
            length: portion.length,
        }
    }
}

/// Where and how the train divides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divide {
    pub kind: DivideKind,
    /// The station carrying the divide marker.
    pub at: Crs,
    /// Portion A: runs on to the terminating station.
    pub continuing: SplitPortion,
    /// Portion B: the portion named by the divide marker.
    pub detaching: SplitPortion,
}

/// Result of resolving a calling-point list against its divide marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitInfo {
    /// Stops served by the whole train, ending with the divide station
    /// when there is one.
    pub stops_up_to_split: Vec<SplitInfoStop>,
    pub divide: Option<Divide>,
}

impl SplitInfo {
    pub fn divide_type(&self) -> SplitType {
        self.divide
            .as_ref()
            .map_or(SplitType::None, |d| d.kind.into())
    }

    /// Every stop: common stops, then portion A, then portion B.
    pub fn all_stops(&self) -> impl Iterator<Item = &SplitInfoStop> {
        let (continuing, detaching) = match &self.divide {
            Some(d) => (d.continuing.stops.as_slice(), d.detaching.stops.as_slice()),
            None => (&[][..], &[][..]),
        };

        self.stops_up_to_split
            .iter()
            .chain(continuing)
            .chain(detaching)
    }
}

/// Resolves the first divide marker in `points`.
///
/// Later markers are ignored. Without a marker every stop is tagged
/// [`PortionPosition::Any`] and the terminating station is not added.
///
/// The divide marker's formation (default `front.1`) gives portion B. Portion
/// A takes the opposite end and the remaining coaches, clamped to
/// `1..=12`. When `overall_length` is unknown, both portions are reported as
/// [`PortionPosition::Unknown`] with no length.
pub fn split_info(points: &[CallingPoint], terminating: Crs, overall_length: Option<u8>) -> SplitInfo {
    let common = Portion::whole(overall_length);

    let Some(marker) = points.iter().position(CallingPoint::is_divide) else {
        return SplitInfo {
            stops_up_to_split: points
                .iter()
                .map(|p| SplitInfoStop::tagged(p, common))
                .collect(),
            divide: None,
        };
    };

    let (before, after) = points.split_at(marker + 1);
    let divide_point = &before[marker];

    let mut continuing_points = after.to_vec();
    continuing_points.push(CallingPoint::new(terminating));

    let (a, b) = match overall_length {
        Some(length) => {
            let form = divide_point.split_form.unwrap_or(Formation::DEFAULT_SPLIT);
            let a_length = length.saturating_sub(form.coaches()).clamp(1, MAX_COACHES);

            (
                Portion::new(form.position().opposite().into(), Some(a_length)),
                Portion::new(form.position().into(), Some(form.coaches())),
            )
        }
        None => (Portion::unknown(), Portion::unknown()),
    };

    let divide = divide_point.split_type.divide_kind().map(|kind| Divide {
        kind,
        at: divide_point.crs,
        continuing: SplitPortion::new(&continuing_points, a),
        detaching: SplitPortion::new(&divide_point.split_calling_points, b),
    });

    SplitInfo {
        stops_up_to_split: before
            .iter()
            .map(|p| SplitInfoStop::tagged(p, common))
            .collect(),
        divide,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::CoachPosition;
    use proptest::prelude::*;

    fn crs() -> impl Strategy<Value = Crs> {
        "[A-Z]{3}".prop_map(|s| Crs::parse(&s).unwrap())
    }

    fn position() -> impl Strategy<Value = CoachPosition> {
        prop_oneof![
            Just(CoachPosition::Front),
            Just(CoachPosition::Middle),
            Just(CoachPosition::Rear),
        ]
    }

    proptest! {
        /// Without a marker, every stop is served by the whole train
        #[test]
        fn undivided_is_any(
            stops in proptest::collection::vec(crs(), 0..10),
            dest in crs(),
            length in proptest::option::of(1u8..=12),
        ) {
            let points: Vec<CallingPoint> = stops.into_iter().map(CallingPoint::new).collect();
            let info = split_info(&points, dest, length);

            prop_assert_eq!(info.divide_type(), SplitType::None);
            prop_assert_eq!(info.stops_up_to_split.len(), points.len());
            prop_assert!(info.stops_up_to_split.iter().all(|s| s.portion.position == PortionPosition::Any));
        }

        /// With a known length, portion lengths follow the formation
        #[test]
        fn portion_lengths(
            before in proptest::collection::vec(crs(), 0..5),
            after in proptest::collection::vec(crs(), 0..5),
            split in proptest::collection::vec(crs(), 1..5),
            at in crs(),
            dest in crs(),
            pos in position(),
            n in 1u8..=12,
            length in 1u8..=12,
        ) {
            let mut points: Vec<CallingPoint> = before.into_iter().map(CallingPoint::new).collect();
            points.push(CallingPoint::new(at).with_divide(
                DivideKind::Splits,
                Some(Formation::new(pos, n).unwrap()),
                split.iter().copied().map(CallingPoint::new).collect(),
            ));
            points.extend(after.iter().copied().map(CallingPoint::new));

            let info = split_info(&points, dest, Some(length));
            let divide = info.divide.unwrap();

            prop_assert_eq!(divide.detaching.length, Some(n));
            prop_assert_eq!(divide.detaching.position, PortionPosition::from(pos));
            let expected = (i16::from(length) - i16::from(n)).clamp(1, 12) as u8;
            prop_assert_eq!(divide.continuing.length, Some(expected));
            prop_assert_eq!(divide.continuing.position, PortionPosition::from(pos.opposite()));
            prop_assert_eq!(divide.continuing.stops.len(), after.len() + 1);
            prop_assert_eq!(divide.detaching.stops.len(), split.len());
        }
    }
}
