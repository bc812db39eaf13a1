//! The "calling at" clause, including divide instructions.

use crate::audio::{AudioItem, Inflection, clip, pluralise, station_clips};
use crate::domain::{CallingPoint, Crs, DivideKind, PortionPosition};
use crate::error::AnnouncementError;

use super::ScriptBuilder;
use super::split::{SplitPortion, split_info};

/// Distinct station codes in first-seen order.
pub(super) fn distinct(stations: impl IntoIterator<Item = Crs>) -> Vec<Crs> {
    let mut seen = Vec::new();
    for crs in stations {
        if !seen.contains(&crs) {
            seen.push(crs);
        }
    }
    seen
}

impl ScriptBuilder<'_> {
    /// `customers for <stations>`
    fn customers_for(&self, stations: &[Crs]) -> Vec<AudioItem> {
        let mut files = vec![AudioItem::delayed(clip::s("customers for"), 400)];
        files.extend(pluralise(
            &station_clips(stations, Inflection::Mid),
            &self.station_list(),
        ));
        files
    }

    /// Where to sit for stops served by only one portion.
    fn portion_instruction(portion: &SplitPortion) -> Vec<AudioItem> {
        match portion.position.coach_position() {
            None => vec![clip::w("please listen for announcements on board the train").into()],
            Some(position) => {
                let mut files = vec![AudioItem::from(clip::m(format!(
                    "should travel in the {}",
                    position.as_str()
                )))];
                if let Some(length) = portion.length {
                    files.push(clip::number(Inflection::Start, length).into());
                }
                files.push(clip::e("coaches of the train").into());
                files
            }
        }
    }

    /// Calling points for a dividing train.
    ///
    /// Returns an empty script when the train does not divide. Fails when a
    /// `splits` divide has no stops for its detaching portion.
    pub fn calling_points_with_splits(
        &self,
        points: &[CallingPoint],
        terminating: Crs,
        overall_length: Option<u8>,
    ) -> Result<Vec<AudioItem>, AnnouncementError> {
        let info = split_info(points, terminating, overall_length);
        let Some(divide) = &info.divide else {
            return Ok(Vec::new());
        };

        let common: Vec<Crs> = info.stops_up_to_split.iter().map(|s| s.crs).collect();
        let mut files = pluralise(
            &station_clips(&common, Inflection::Mid),
            &self.station_list(),
        );

        files.push(clip::e("where the train will divide").into());
        files.push(AudioItem::delayed(
            clip::w("please make sure you travel in the correct part of this train"),
            400,
        ));

        match divide.kind {
            DivideKind::SplitTerminates => {
                let detaching = &divide.detaching;
                match (detaching.position.coach_position(), detaching.length) {
                    (Some(position), Some(length)) => {
                        files.push(AudioItem::delayed(
                            clip::s(format!("please note that the {}", position.as_str())),
                            400,
                        ));
                        let coaches = if length == 1 {
                            "coach".to_string()
                        } else {
                            format!("{length} coaches")
                        };
                        files.push(clip::m(format!("{coaches} will detach at")).into());
                    }
                    _ => {
                        files.push(AudioItem::delayed(clip::s("please note that"), 400));
                        files.push(clip::m("coaches").into());
                        files.push(clip::m("will be detached and will terminate at").into());
                    }
                }
                files.push(clip::station(Inflection::End, &divide.at).into());
            }
            DivideKind::Splits => {
                if divide.detaching.stops.is_empty() {
                    return Err(AnnouncementError::InvalidTrainConfiguration(format!(
                        "train dividing at {} has no calling points for its detaching portion",
                        divide.at
                    )));
                }
            }
        }

        let a_stops = distinct(divide.continuing.stops.iter().map(|s| s.crs));
        let b_stops = distinct(divide.detaching.stops.iter().map(|s| s.crs));
        let any_stops = distinct(
            common
                .iter()
                .copied()
                .chain(a_stops.iter().copied().filter(|crs| b_stops.contains(crs))),
        );
        let a_only: Vec<Crs> = a_stops
            .into_iter()
            .filter(|crs| !any_stops.contains(crs))
            .collect();
        let b_only: Vec<Crs> = b_stops
            .into_iter()
            .filter(|crs| !any_stops.contains(crs))
            .collect();

        if !any_stops.is_empty() {
            files.extend(self.customers_for(&any_stops));
            files.push(clip::e("may travel in any part of the train").into());
        }

        let portion_files = |stops: &[Crs], portion: &SplitPortion| -> Vec<AudioItem> {
            if stops.is_empty() {
                return Vec::new();
            }
            let mut files = self.customers_for(stops);
            files.extend(Self::portion_instruction(portion));
            files
        };
        let a_files = portion_files(&a_only, &divide.continuing);
        let b_files = portion_files(&b_only, &divide.detaching);

        if divide.continuing.position == PortionPosition::Front {
            files.extend(a_files);
            files.extend(b_files);
        } else {
            files.extend(b_files);
            files.extend(a_files);
        }

        files.push(AudioItem::delayed(clip::s("this train will divide at"), 200));
        files.push(clip::station(Inflection::End, &divide.at).into());

        Ok(files)
    }

    /// The full "calling at" clause.
    pub fn calling_points(
        &self,
        points: &[CallingPoint],
        terminating: Crs,
        overall_length: Option<u8>,
    ) -> Result<Vec<AudioItem>, AnnouncementError> {
        let mut files = vec![AudioItem::delayed(clip::m("calling at"), 750)];

        let with_splits = self.calling_points_with_splits(points, terminating, overall_length)?;
        if !with_splits.is_empty() {
            files.extend(with_splits);
            return Ok(files);
        }

        if points.is_empty() {
            files.push(clip::station(Inflection::Mid, &terminating).into());
            files.push(clip::e("only").into());
        } else {
            let mut stations = station_clips(points.iter().map(|p| &p.crs), Inflection::Mid);
            stations.push(clip::station(Inflection::End, &terminating));
            files.extend(pluralise(&stations, &self.station_list()));
        }

        Ok(files)
    }
}
