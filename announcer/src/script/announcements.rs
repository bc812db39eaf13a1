//! Complete announcements.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::audio::{AudioItem, Inflection, clip};
use crate::catalogue::Catalogue;
use crate::error::AnnouncementError;

use super::ScriptBuilder;
use super::options::{DisruptedTrainOptions, DisruptionType, NextTrainOptions, ThroughTrainOptions};
use super::train_info::TrainInfo;

/// Any announcement, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Announcement {
    NextTrain(NextTrainOptions),
    DisruptedTrain(DisruptedTrainOptions),
    ThroughTrain(ThroughTrainOptions),
}

impl Announcement {
    pub fn kind(&self) -> &'static str {
        match self {
            Announcement::NextTrain(_) => "next train",
            Announcement::DisruptedTrain(_) => "disrupted train",
            Announcement::ThroughTrain(_) => "through train",
        }
    }

    pub fn validate(&self, catalogue: &Catalogue) -> Result<(), AnnouncementError> {
        match self {
            Announcement::NextTrain(opts) => opts.validate(catalogue),
            Announcement::DisruptedTrain(opts) => opts.validate(catalogue),
            Announcement::ThroughTrain(opts) => opts.validate(catalogue),
        }
    }
}

impl ScriptBuilder<'_> {
    /// Builds the script for any announcement.
    pub fn build(&self, announcement: &Announcement) -> Result<Vec<AudioItem>, AnnouncementError> {
        match announcement {
            Announcement::NextTrain(opts) => self.next_train(opts),
            Announcement::DisruptedTrain(opts) => self.disrupted_train(opts),
            Announcement::ThroughTrain(opts) => Ok(self.through_train(opts)),
        }
    }

    /// "Platform 2 for the ..." lead-in.
    fn platform_clips(&self, platform: &str, delayed: bool) -> Vec<AudioItem> {
        if self.config.has_combined_platform_clip(platform) {
            let mut files = vec![AudioItem::delayed(
                clip::s(format!("platform {platform} for the")),
                250,
            )];
            if delayed {
                files.push(clip::m("delayed").into());
            }
            files
        } else {
            vec![
                AudioItem::delayed(clip::s("platform"), 250),
                clip::number(Inflection::Start, platform).into(),
                clip::m(if delayed { "for the delayed" } else { "for the" }).into(),
            ]
        }
    }

    /// Announces the next train from a platform.
    ///
    /// The platform and train details are read at the start and repeated at
    /// the end. Fails if the calling points describe an impossible divide;
    /// nothing is returned in that case.
    pub fn next_train(&self, opts: &NextTrainOptions) -> Result<Vec<AudioItem>, AnnouncementError> {
        let vias = opts.via_codes();
        let terminating = opts.terminating_station_code;
        let info = TrainInfo {
            hour: &opts.hour,
            minute: &opts.min,
            toc: &opts.toc,
            vias: &vias,
            terminating,
            calling_points: &opts.calling_at,
        };

        let platform = self.platform_clips(&opts.platform, opts.is_delayed);
        let train_info = self.basic_train_info(&info, Inflection::End);

        let mut files: Vec<AudioItem> = opts.chime.clip().into_iter().map(AudioItem::from).collect();
        files.extend(platform.iter().cloned());
        files.extend(train_info.iter().cloned());
        files.extend(self.calling_points(&opts.calling_at, terminating, opts.coaches)?);
        files.extend(self.short_platforms(&opts.calling_at, terminating, opts.coaches));
        files.extend(self.request_stops(&opts.calling_at, terminating, opts.coaches));

        if let Some(coaches) = opts.coaches {
            files.push(AudioItem::delayed(clip::s("this train is formed of"), 250));
            files.push(clip::number(Inflection::Start, coaches).into());
            files.push(clip::e(if coaches == 1 { "coach" } else { "coaches" }).into());
        }

        files.extend(platform);
        files.extend(train_info);

        debug!(
            destination = %terminating,
            platform = %opts.platform,
            clips = files.len(),
            "built next train announcement"
        );
        Ok(files)
    }

    /// Announces a delayed or cancelled train.
    ///
    /// Vias and divides are not read; the destination stays mid-sentence
    /// because the disruption follows it.
    pub fn disrupted_train(
        &self,
        opts: &DisruptedTrainOptions,
    ) -> Result<Vec<AudioItem>, AnnouncementError> {
        let info = TrainInfo {
            hour: &opts.hour,
            minute: &opts.min,
            toc: &opts.toc,
            vias: &[],
            terminating: opts.terminating_station_code,
            calling_points: &[],
        };

        let mut files: Vec<AudioItem> = opts.chime.clip().into_iter().map(AudioItem::from).collect();
        files.push(clip::s("were sorry to announce that the").into());
        files.extend(self.basic_train_info(&info, Inflection::Mid));

        let has_reason = !opts.disruption_reason.is_empty();
        let last = Inflection::mid_or_end(!has_reason);

        match opts.disruption_type {
            DisruptionType::DelayedBy => {
                let minutes = opts.delay_minutes()?;
                files.push(clip::m("is delayed by approximately").into());
                files.push(if minutes < 10 {
                    clip::number(Inflection::Mid, minutes).into()
                } else {
                    clip::minutes(minutes).into()
                });
                files.push(last.phrase(if minutes == 1 { "minute" } else { "minutes" }).into());
            }
            DisruptionType::Delay => files.push(last.phrase("is being delayed").into()),
            DisruptionType::Cancel => files.push(last.phrase("has been cancelled").into()),
        }

        if has_reason {
            files.push(clip::m("due to").into());
            files.push(clip::disruption_reason(&opts.disruption_reason).into());
        }

        files.push(AudioItem::delayed(
            clip::w("were sorry for the delay this will cause to your journey"),
            250,
        ));

        debug!(
            destination = %opts.terminating_station_code,
            disruption = ?opts.disruption_type,
            clips = files.len(),
            "built disrupted train announcement"
        );
        Ok(files)
    }

    /// Warns of a train passing through without stopping.
    pub fn through_train(&self, opts: &ThroughTrainOptions) -> Vec<AudioItem> {
        let mut files: Vec<AudioItem> = opts.chime.clip().into_iter().map(AudioItem::from).collect();
        files.extend([
            AudioItem::delayed(clip::s("the train now approaching"), 250),
            clip::number(Inflection::Mid, &opts.platform).into(),
            clip::m("does not stop here").into(),
            AudioItem::delayed(clip::s("please stand well clear of the edge of"), 250),
            clip::number(Inflection::End, &opts.platform).into(),
        ]);
        files
    }
}
