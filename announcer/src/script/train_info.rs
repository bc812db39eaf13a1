//! The "12:34 Southern service to Brighton" clause.

use crate::audio::{AudioItem, Inflection, ListStyle, clip, pluralise};
use crate::catalogue::TocStyle;
use crate::domain::{CallingPoint, Crs};

use super::ScriptBuilder;

/// Service details spoken in the train-info clause.
#[derive(Debug, Clone, Copy)]
pub struct TrainInfo<'a> {
    pub hour: &'a str,
    pub minute: &'a str,
    /// Operator name; empty for a generic "service to".
    pub toc: &'a str,
    pub vias: &'a [Crs],
    pub terminating: Crs,
    /// Used only to find a divide, which names both destinations.
    pub calling_points: &'a [CallingPoint],
}

impl ScriptBuilder<'_> {
    fn operator_clips(&self, toc: &str) -> Vec<AudioItem> {
        match self.catalogue.toc_style(toc) {
            TocStyle::Generic => vec![AudioItem::delayed(clip::m("service to"), 50)],
            TocStyle::Standalone => vec![
                AudioItem::delayed(clip::toc(toc), 150),
                clip::m("service to").into(),
            ],
            TocStyle::WithServiceTo => {
                vec![AudioItem::delayed(clip::toc(&format!("{toc} service to")), 150)]
            }
        }
    }

    /// Time, operator and destination.
    ///
    /// `last` is the inflection of the final station clip: [`Inflection::End`]
    /// when the clause ends the sentence, [`Inflection::Mid`] when more
    /// follows.
    pub fn basic_train_info(&self, info: &TrainInfo<'_>, last: Inflection) -> Vec<AudioItem> {
        let mut files = vec![
            AudioItem::from(clip::hour(info.hour)),
            AudioItem::from(clip::minutes(info.minute)),
        ];
        files.extend(self.operator_clips(info.toc));

        let divide_destination = info
            .calling_points
            .iter()
            .find(|p| p.is_divide())
            .and_then(|p| p.split_calling_points.last())
            .map(|p| p.crs);

        if let Some(other) = divide_destination {
            let style = ListStyle::default()
                .with_prefix(clip::station_prefix(Inflection::Mid))
                .with_final_prefix(clip::station_prefix(last))
                .with_first_item_delay(100)
                .with_before_and_delay(100)
                .with_before_item_delay(50);
            files.extend(pluralise(
                &[info.terminating.as_str(), other.as_str()],
                &style,
            ));
        } else if !info.vias.is_empty() {
            files.push(clip::station(Inflection::Mid, &info.terminating).into());
            files.push(clip::m("via").into());

            let vias: Vec<String> = info
                .vias
                .iter()
                .enumerate()
                .map(|(i, crs)| {
                    let at_end = last == Inflection::End && i == info.vias.len() - 1;
                    clip::station(Inflection::mid_or_end(at_end), crs)
                })
                .collect();
            files.extend(pluralise(
                &vias,
                &ListStyle::default().with_before_and_delay(100),
            ));
        } else {
            files.push(clip::station(last, &info.terminating).into());
        }

        files
    }
}
