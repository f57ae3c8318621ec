//! Weekly lecture timetable generation.
//!
//! Turns a catalog of rooms, labs, faculties, subjects and student batches
//! into a weekly timetable: every (batch, subject) pair is expanded into
//! lecture sessions, which are placed greedily on a day × period grid so
//! that no batch, faculty or room is ever double-booked and no faculty
//! exceeds its daily load.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Catalog`, `Room`, `Faculty`, `Subject`,
//!   `Batch`, `WeekCalendar`, `LectureSession`, `Timetable`
//! - **`dispatching`**: Session ordering rules and the `RuleEngine`
//! - **`scheduler`**: The greedy `TimetableGenerator` and `TimetableKpi`
//! - **`validation`**: Catalog integrity checks and timetable verification
//! - **`view`**: Batch and faculty projections, merged render blocks
//! - **`error`**: `GenerationError`
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{Batch, Catalog, Faculty, Room, Subject};
//! use u_timetable::view::{merge_blocks, project, ViewFilter};
//! use u_timetable::TimetableGenerator;
//!
//! let catalog = Catalog::new()
//!     .with_room(Room::classroom("C101"))
//!     .with_lab(Room::lab("L301"))
//!     .with_faculty(Faculty::new("F001").with_subjects(["CS101", "CS201L"]))
//!     .with_subject(Subject::theory("CS101").with_weekly_sessions(3))
//!     .with_subject(Subject::lab("CS201L"))
//!     .with_batch(Batch::new("B01").with_subjects(["CS101", "CS201L"]));
//!
//! let timetable = TimetableGenerator::new().generate(&catalog).unwrap();
//! assert!(timetable.is_complete());
//!
//! let days = merge_blocks(&project(&timetable, &ViewFilter::Batch("B01".into())));
//! let blocks: usize = days.iter().map(|d| d.blocks.len()).sum();
//! assert_eq!(blocks, 4);
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated
//!   timetabling"

pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod view;

pub use error::{GenerationError, GenerationResult};
pub use scheduler::{TimetableGenerator, TimetableKpi, TimetableRequest};
