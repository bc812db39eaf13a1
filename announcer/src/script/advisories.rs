//! Short-platform and request-stop advisories.

use std::collections::BTreeMap;

use crate::audio::{AudioItem, Inflection, clip, pluralise};
use crate::domain::{CallingPoint, Crs, Formation, Portion, PortionPosition};

use super::ScriptBuilder;
use super::calling_points::distinct;
use super::split::split_info;

/// Where to sit at a short platform, for a stop served by `portion`.
///
/// When the stop is served by the whole train (or the matching portion) the
/// instruction stands alone. Otherwise it is qualified with the portion, so
/// "the front 2 coaches of the rear 4 coaches".
fn short_platform_clips(short: Formation, portion: Portion) -> Vec<String> {
    let position = short.position().as_str();
    let coaches = short.coaches();

    let matches = match portion.position {
        PortionPosition::Any | PortionPosition::Unknown => true,
        other => other.coach_position() == Some(short.position()),
    };

    if matches {
        return if coaches == 1 {
            vec![clip::e(format!(
                "should travel in the {position} coach of the train"
            ))]
        } else {
            vec![
                clip::m(format!("should travel in the {position}")),
                clip::number(Inflection::Start, coaches),
                clip::e("coaches of the train"),
            ]
        };
    }

    let mut files = vec![clip::m(format!("should travel in the {position}"))];
    if coaches == 1 {
        files.push(clip::m("coach"));
    } else {
        files.push(clip::number(Inflection::Start, coaches));
        files.push(clip::m("coaches"));
    }

    files.push(clip::m("of"));
    files.push(clip::m("the"));
    files.push(clip::m(portion.position.as_str()));
    if portion.length == Some(1) {
        files.push(clip::e("coach of this train"));
    } else {
        if let Some(length) = portion.length {
            files.push(clip::number(Inflection::Start, length));
        }
        files.push(clip::e("coaches of the train"));
    }

    files
}

#[derive(Debug, Default)]
struct ShortPlatformGroup {
    clips: Vec<String>,
    stations: Vec<Crs>,
}

impl ScriptBuilder<'_> {
    /// Advice for stops where the platform is shorter than the train.
    ///
    /// Stops needing the same instruction are grouped and share one lead-in.
    /// Groups are read in lexical order of their instruction.
    pub fn short_platforms(
        &self,
        points: &[CallingPoint],
        terminating: Crs,
        overall_length: Option<u8>,
    ) -> Vec<AudioItem> {
        let info = split_info(points, terminating, overall_length);

        let mut groups: BTreeMap<String, ShortPlatformGroup> = BTreeMap::new();
        for stop in info.all_stops() {
            let Some(short) = stop.short_platform else {
                continue;
            };
            let clips = short_platform_clips(short, stop.portion);
            let group = groups.entry(clips.join(",")).or_default();
            group.clips = clips;
            group.stations.push(stop.crs);
        }

        let station_list = self
            .station_list()
            .with_prefix(clip::station_prefix(Inflection::Mid));
        let single = groups.len() == 1;

        let mut files = Vec::new();
        for (i, group) in groups.into_values().enumerate() {
            let codes: Vec<&str> = group.stations.iter().map(Crs::as_str).collect();

            match (i, single, group.stations.as_slice()) {
                (0, true, [only]) => {
                    files.push(AudioItem::delayed(clip::m("due to a short platform at"), 400));
                    files.push(clip::station(Inflection::Mid, only).into());
                    files.push(clip::m("customers for this station").into());
                }
                (0, _, _) => {
                    files.push(AudioItem::delayed(
                        clip::s("due to short platforms customers for"),
                        400,
                    ));
                    files.extend(pluralise(&codes, &station_list));
                }
                _ => {
                    files.push(AudioItem::delayed(clip::s("customers for"), 200));
                    files.extend(pluralise(&codes, &station_list));
                }
            }

            files.extend(group.clips.into_iter().map(AudioItem::from));
        }

        files
    }

    /// Advice for stops the train only calls at on request.
    pub fn request_stops(
        &self,
        points: &[CallingPoint],
        terminating: Crs,
        overall_length: Option<u8>,
    ) -> Vec<AudioItem> {
        let info = split_info(points, terminating, overall_length);

        let stops = distinct(info.all_stops().filter(|s| s.request_stop).map(|s| s.crs));
        if stops.is_empty() {
            return Vec::new();
        }

        let codes: Vec<&str> = stops.iter().map(Crs::as_str).collect();
        let style = self
            .station_list()
            .with_prefix(clip::station_prefix(Inflection::Mid))
            .with_conjunction(clip::OR);

        let mut files = vec![AudioItem::delayed(
            clip::s("customers may request to stop at"),
            400,
        )];
        files.extend(pluralise(&codes, &style));
        files.push(clip::e("by contacting the conductor on board the train").into());
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DivideKind;
    use crate::script::test_support::*;

    fn short_platforms(points: &[CallingPoint], length: Option<u8>) -> Vec<AudioItem> {
        let config = config();
        let catalogue = catalogue();
        ScriptBuilder::new(&config, &catalogue).short_platforms(points, crs("BTN"), length)
    }

    fn request_stops(points: &[CallingPoint]) -> Vec<AudioItem> {
        let config = config();
        let catalogue = catalogue();
        ScriptBuilder::new(&config, &catalogue).request_stops(points, crs("BTN"), Some(8))
    }

    #[test]
    fn matching_portion_single_coach() {
        assert_eq!(
            short_platform_clips(formation("front.1"), Portion::whole(Some(8))),
            ["e.should travel in the front coach of the train"]
        );
    }

    #[test]
    fn matching_portion_several_coaches() {
        assert_eq!(
            short_platform_clips(
                formation("rear.4"),
                Portion::new(PortionPosition::Rear, Some(6))
            ),
            [
                "m.should travel in the rear",
                "platform.s.4",
                "e.coaches of the train"
            ]
        );
    }

    #[test]
    fn mismatched_portion_is_qualified() {
        assert_eq!(
            short_platform_clips(
                formation("front.2"),
                Portion::new(PortionPosition::Rear, Some(4))
            ),
            [
                "m.should travel in the front",
                "platform.s.2",
                "m.coaches",
                "m.of",
                "m.the",
                "m.rear",
                "platform.s.4",
                "e.coaches of the train"
            ]
        );
    }

    #[test]
    fn mismatched_single_coach_portion() {
        assert_eq!(
            short_platform_clips(
                formation("front.1"),
                Portion::new(PortionPosition::Rear, Some(1))
            ),
            [
                "m.should travel in the front",
                "m.coach",
                "m.of",
                "m.the",
                "m.rear",
                "e.coach of this train"
            ]
        );
    }

    #[test]
    fn unknown_portion_reads_as_unqualified() {
        assert_eq!(
            short_platform_clips(formation("front.2"), Portion::unknown()),
            [
                "m.should travel in the front",
                "platform.s.2",
                "e.coaches of the train"
            ]
        );
    }

    #[test]
    fn no_short_platforms() {
        assert!(short_platforms(&[stop("HSK"), stop("PRP")], Some(8)).is_empty());
    }

    #[test]
    fn single_station_lead_in() {
        let points = vec![
            stop("HSK"),
            stop("PRP").with_short_platform(formation("front.4")),
        ];

        assert_eq!(
            short_platforms(&points, Some(8)),
            vec![
                AudioItem::delayed("m.due to a short platform at", 400),
                AudioItem::clip("station.m.PRP"),
                AudioItem::clip("m.customers for this station"),
                AudioItem::clip("m.should travel in the front"),
                AudioItem::clip("platform.s.4"),
                AudioItem::clip("e.coaches of the train"),
            ]
        );
    }

    #[test]
    fn identical_instructions_share_a_lead_in() {
        let points = vec![
            stop("HSK").with_short_platform(formation("front.4")),
            stop("PRP"),
            stop("LIT").with_short_platform(formation("front.4")),
        ];

        assert_eq!(
            short_platforms(&points, Some(8)),
            vec![
                AudioItem::delayed("s.due to short platforms customers for", 400),
                AudioItem::clip("station.m.HSK"),
                AudioItem::delayed("m.and", 100),
                AudioItem::delayed("station.m.LIT", 100),
                AudioItem::clip("m.should travel in the front"),
                AudioItem::clip("platform.s.4"),
                AudioItem::clip("e.coaches of the train"),
            ]
        );
    }

    #[test]
    fn groups_in_lexical_order() {
        let points = vec![
            stop("HSK").with_short_platform(formation("rear.2")),
            stop("PRP").with_short_platform(formation("front.1")),
            stop("LIT").with_short_platform(formation("rear.2")),
        ];
        let files = short_platforms(&points, Some(8));

        assert_eq!(
            ids(&files),
            [
                "s.due to short platforms customers for",
                "station.m.PRP",
                "e.should travel in the front coach of the train",
                "s.customers for",
                "station.m.HSK",
                "m.and",
                "station.m.LIT",
                "m.should travel in the rear",
                "platform.s.2",
                "e.coaches of the train",
            ]
        );
        assert_eq!(files[3], AudioItem::delayed("s.customers for", 200));
    }

    #[test]
    fn portion_stops_after_divide() {
        let points = vec![
            divide("HRH", DivideKind::Splits, Some("rear.4"), &["CHH"]),
            stop("ARU").with_short_platform(formation("front.2")),
        ];
        let mut split = points.clone();
        split[0].split_calling_points[0].short_platform = Some(formation("front.2"));

        // ARU is served by the front 4 coaches, so the instruction matches.
        let files = short_platforms(&points, Some(8));
        assert_eq!(
            ids(&files)[3..],
            [
                "m.should travel in the front",
                "platform.s.2",
                "e.coaches of the train"
            ]
        );

        // CHH is served by the rear 4, so it is qualified.
        let files = short_platforms(&split, Some(8));
        assert!(ids(&files).contains(&"m.rear"));
    }

    #[test]
    fn request_stops_use_or() {
        let points = vec![
            stop("HSK").as_request_stop(),
            stop("PRP"),
            stop("LIT").as_request_stop(),
        ];

        assert_eq!(
            request_stops(&points),
            vec![
                AudioItem::delayed("s.customers may request to stop at", 400),
                AudioItem::clip("station.m.HSK"),
                AudioItem::delayed("m.or-2", 100),
                AudioItem::delayed("station.m.LIT", 100),
                AudioItem::clip("e.by contacting the conductor on board the train"),
            ]
        );
    }

    #[test]
    fn request_stops_deduplicated() {
        let mut points = vec![
            divide("HRH", DivideKind::Splits, Some("rear.4"), &["CHH", "BOG"]),
            stop("CHH").as_request_stop(),
        ];
        points[0].split_calling_points[0].request_stop = true;

        let files = request_stops(&points);
        assert_eq!(
            ids(&files),
            [
                "s.customers may request to stop at",
                "station.m.CHH",
                "e.by contacting the conductor on board the train"
            ]
        );
    }

    #[test]
    fn no_request_stops() {
        assert!(request_stops(&[stop("HSK")]).is_empty());
    }
}
