//! Timetabling domain models.
//!
//! Provides the catalog types (the read-only input of a run), the derived
//! lecture sessions, and the timetable produced by the generator.
//!
//! # Domain Mappings
//!
//! | u-timetable | Generic scheduling | Role in a run |
//! |-------------|--------------------|---------------|
//! | LectureSession | Activity | Unit being placed |
//! | Faculty / Room / Batch | Resources | Must never be double-booked |
//! | WeekCalendar | Time horizon | Discrete (day, period) grid |
//! | Timetable | Schedule | Entries + unscheduled sessions |

mod batch;
mod calendar;
mod catalog;
mod faculty;
mod room;
mod session;
mod subject;
mod timetable;

pub use batch::Batch;
pub use calendar::{Period, WeekCalendar, DEFAULT_DAYS, DEFAULT_PERIODS_PER_DAY};
pub use catalog::{Catalog, Constraints};
pub use faculty::Faculty;
pub use room::{Room, RoomKind};
pub use session::LectureSession;
pub use subject::{Subject, SubjectKind, LAB_DURATION, THEORY_DURATION};
pub use timetable::{
    Block, GridDay, GridSlot, Timetable, TimetableEntry, Violation, ViolationType,
};

#[cfg(test)]
pub(crate) use catalog::fixtures;
