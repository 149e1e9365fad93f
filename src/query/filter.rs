//! # Filter Predicates
//!
//! AND-combined criteria over stored student records.

use crate::student::StudentRecord;

/// A single search criterion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// Case-insensitive substring of `fullname`. Holds the lowercased needle.
    NameContains(String),

    /// Exact `enrollmentNumber`
    EnrollmentEquals(String),

    /// Exact stream wire value. Unknown values match nothing.
    StreamEquals(String),
}

impl Criterion {
    /// Case-insensitive name criterion
    pub fn name_contains(needle: &str) -> Self {
        Criterion::NameContains(needle.to_lowercase())
    }

    /// Check if a record satisfies this criterion
    pub fn matches(&self, record: &StudentRecord) -> bool {
        let profile = &record.profile;
        match self {
            Criterion::NameContains(needle) => {
                profile.full_name.to_lowercase().contains(needle.as_str())
            }
            Criterion::EnrollmentEquals(number) => profile.enrollment_number == *number,
            Criterion::StreamEquals(stream) => profile.stream.as_str() == stream,
        }
    }
}

/// A set of criteria combined with AND logic.
///
/// An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub criteria: Vec<Criterion>,
}

impl StudentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// True when no criterion narrows the result set
    pub fn is_unrestricted(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Check if a record matches all criteria
    pub fn matches(&self, record: &StudentRecord) -> bool {
        self.criteria.iter().all(|c| c.matches(record))
    }
}
