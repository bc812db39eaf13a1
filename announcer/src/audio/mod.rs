//! Audio script primitives: clip ids, script items and list rendering.

mod item;
mod list;

pub use item::{AudioItem, ClipOpts, Inflection, clip, station_clips};
pub use list::{ListStyle, pluralise};
