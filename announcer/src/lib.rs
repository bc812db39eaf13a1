//! Station announcement builder.
//!
//! Turns a description of a train (platform, departure time, operator,
//! destination, calling points, dividing portions) into the ordered list of
//! pre-recorded clips a UK station announcement is made of, and hands that
//! list to an audio player.

pub mod audio;
pub mod catalogue;
pub mod config;
pub mod darwin;
pub mod domain;
pub mod error;
pub mod live;
pub mod playback;
pub mod script;
