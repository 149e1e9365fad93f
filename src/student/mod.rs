//! Student record types
//!
//! A record is a flat profile plus an ordered list of course entries.
//! Identity is assigned by the store exactly once and never changes.

mod patch;
mod types;

pub use patch::StudentPatch;
pub use types::{CourseEntry, Intake, Stream, StudentId, StudentProfile, StudentRecord};
