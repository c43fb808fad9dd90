//! Payment frequencies and schedule generation.

mod error;
mod frequency;
mod schedule;

pub use error::ScheduleError;
pub use frequency::Frequency;
pub use schedule::Schedule;
