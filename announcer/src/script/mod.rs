//! Announcement script building.
//!
//! Turns structured service descriptions into ordered clip sequences. All
//! building is synchronous and side-effect free: a [`ScriptBuilder`] only
//! reads its configuration and catalogue, so any number of scripts can be
//! built concurrently from the same one.

mod advisories;
mod announcements;
mod calling_points;
mod options;
mod split;
mod train_info;

pub use announcements::Announcement;
pub use options::{
    Chime, DisruptedTrainOptions, DisruptionType, NextTrainOptions, ThroughTrainOptions,
};
pub use split::{Divide, SplitInfo, SplitInfoStop, SplitPortion, split_info};
pub use train_info::TrainInfo;

use crate::audio::ListStyle;
use crate::catalogue::Catalogue;
use crate::config::AnnouncerConfig;

/// Builds announcement scripts against a configuration and catalogue.
#[derive(Debug, Clone, Copy)]
pub struct ScriptBuilder<'a> {
    config: &'a AnnouncerConfig,
    catalogue: &'a Catalogue,
}

impl<'a> ScriptBuilder<'a> {
    pub fn new(config: &'a AnnouncerConfig, catalogue: &'a Catalogue) -> Self {
        Self { config, catalogue }
    }

    pub fn config(&self) -> &'a AnnouncerConfig {
        self.config
    }

    pub fn catalogue(&self) -> &'a Catalogue {
        self.catalogue
    }

    /// List style for runs of stations, with the configured pauses.
    fn station_list(&self) -> ListStyle {
        ListStyle::calling_points(
            self.config.calling_point_delay_ms,
            self.config.calling_point_and_delay_ms,
        )
    }
}
