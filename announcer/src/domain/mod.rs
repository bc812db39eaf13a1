//! Domain types for the announcement builder.
//!
//! This module contains the validated input model: station codes, coach
//! formations, calling points and clock times. All types enforce their
//! invariants at construction time, so the script builders can trust them.

mod calling_point;
mod formation;
mod station;
mod time;

pub use calling_point::{CallingPoint, DivideKind, SplitType};
pub use formation::{
    CoachPosition, Formation, InvalidFormation, MAX_COACHES, Portion, PortionPosition,
};
pub use station::{Crs, InvalidCrs};
pub use time::{ClockTime, TimeError};
