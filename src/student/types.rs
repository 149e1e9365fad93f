//! Core record types and their wire shape.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// Enrollment cohort tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stream {
    /// April intake
    #[serde(rename = "Stream-1")]
    Stream1,
    /// October intake
    #[serde(rename = "Stream-2")]
    Stream2,
}

/// Intake month a stream stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intake {
    April,
    October,
}

impl Stream {
    /// Every accepted stream, in display order
    pub const ALL: [Stream; 2] = [Stream::Stream1, Stream::Stream2];

    /// Wire value of this stream
    pub fn as_str(&self) -> &'static str {
        match self {
            Stream::Stream1 => "Stream-1",
            Stream::Stream2 => "Stream-2",
        }
    }

    /// Parse an exact wire value. Matching is case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    pub fn intake(&self) -> Intake {
        match self {
            Stream::Stream1 => Intake::April,
            Stream::Stream2 => Intake::October,
        }
    }

    /// Comma separated list of accepted values, for messages
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque store-assigned record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    /// Wrap an existing identifier (e.g. from a request path)
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh identifier. Only stores call this.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StudentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A (course code, subject) pair owned by its record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseEntry {
    pub course_code: String,
    pub subject: String,
}

impl CourseEntry {
    pub fn new(course_code: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            course_code: course_code.into(),
            subject: subject.into(),
        }
    }
}

/// A validated student record without its identity.
///
/// Every value here has already passed validation: text fields are
/// trimmed and non-empty, and `courses` holds at least one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(rename = "fullname")]
    pub full_name: String,

    #[serde(rename = "class")]
    pub class_name: String,

    pub mobile_number: String,

    pub enrollment_number: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,

    pub email_id: String,

    /// Monetary amount. Negative values represent a credit.
    #[serde(serialize_with = "serialize_balance")]
    pub balance: f64,

    pub address: String,

    pub stream: Stream,

    pub courses: Vec<CourseEntry>,
}

/// Largest magnitude an f64 holds with every integer exact
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Whole balances go out as JSON integers so `12` reads back as `12`.
pub(super) fn serialize_balance<S: Serializer>(balance: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if balance.fract() == 0.0 && balance.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*balance as i64)
    } else {
        serializer.serialize_f64(*balance)
    }
}

pub(super) fn serialize_optional_balance<S: Serializer>(
    balance: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match balance {
        Some(b) => serialize_balance(b, serializer),
        None => serializer.serialize_none(),
    }
}

/// A stored record: identity plus profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "_id")]
    pub id: StudentId,

    #[serde(flatten)]
    pub profile: StudentProfile,
}

impl StudentRecord {
    pub fn new(id: StudentId, profile: StudentProfile) -> Self {
        Self { id, profile }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_profile() -> StudentProfile {
        StudentProfile {
            full_name: "Ana Li".to_string(),
            class_name: "10A".to_string(),
            mobile_number: "555".to_string(),
            enrollment_number: "E100".to_string(),
            reference_number: None,
            email_id: "a@x.com".to_string(),
            balance: 0.0,
            address: "1 Rd".to_string(),
            stream: Stream::Stream1,
            courses: vec![CourseEntry::new("C1", "Math")],
        }
    }

    #[test]
    fn test_stream_parse() {
        assert_eq!(Stream::parse("Stream-1"), Some(Stream::Stream1));
        assert_eq!(Stream::parse("Stream-2"), Some(Stream::Stream2));
        assert_eq!(Stream::parse("Stream-3"), None);
        assert_eq!(Stream::parse("stream-1"), None);
    }

    #[test]
    fn test_stream_intake() {
        assert_eq!(Stream::Stream1.intake(), Intake::April);
        assert_eq!(Stream::Stream2.intake(), Intake::October);
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        assert_ne!(StudentId::generate(), StudentId::generate());
    }

    #[test]
    fn test_record_wire_shape() {
        let record = StudentRecord::new(StudentId::new("abc"), sample_profile());
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["_id"], "abc");
        assert_eq!(value["fullname"], "Ana Li");
        assert_eq!(value["class"], "10A");
        assert_eq!(value["enrollmentNumber"], "E100");
        assert_eq!(value["stream"], "Stream-1");
        assert_eq!(value["courses"], json!([{"courseCode": "C1", "subject": "Math"}]));
        assert!(value.get("referenceNumber").is_none());
    }

    #[test]
    fn test_whole_balance_is_written_as_integer() {
        let balance_text = |balance: f64| {
            let profile = StudentProfile {
                balance,
                ..sample_profile()
            };
            serde_json::to_value(&profile).unwrap()["balance"].to_string()
        };

        assert_eq!(balance_text(12.0), "12");
        assert_eq!(balance_text(-50.0), "-50");
        assert_eq!(balance_text(0.0), "0");
        assert_eq!(balance_text(12.5), "12.5");
    }

    #[test]
    fn test_record_reads_back_from_json() {
        let record = StudentRecord::new(StudentId::new("abc"), sample_profile());
        let text = serde_json::to_string(&record).unwrap();
        let parsed: StudentRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, record);
    }
}
