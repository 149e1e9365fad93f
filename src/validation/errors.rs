//! Field-level defects reported by the validator.

use std::fmt;

use serde::Serialize;

use crate::student::Stream;

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectReason {
    /// Required field absent
    Missing,
    /// Text field present but blank
    Empty,
    /// Expected text
    NotText,
    /// Not coercible to a finite number
    NotNumeric,
    /// Not one of the accepted stream values
    InvalidStream,
    /// Expected a list
    NotList,
    /// List must hold at least one entry
    EmptyList,
    /// Expected an object
    NotObject,
    /// Explicit null where a value is required
    NullValue,
}

impl DefectReason {
    /// Stable machine-readable code
    pub fn as_str(&self) -> &'static str {
        match self {
            DefectReason::Missing => "missing",
            DefectReason::Empty => "empty",
            DefectReason::NotText => "not_text",
            DefectReason::NotNumeric => "not_numeric",
            DefectReason::InvalidStream => "invalid_stream",
            DefectReason::NotList => "not_list",
            DefectReason::EmptyList => "empty_list",
            DefectReason::NotObject => "not_object",
            DefectReason::NullValue => "null_value",
        }
    }

    /// Human-readable description
    pub fn describe(&self) -> String {
        match self {
            DefectReason::Missing => "field is required".to_string(),
            DefectReason::Empty => "must not be empty".to_string(),
            DefectReason::NotText => "must be text".to_string(),
            DefectReason::NotNumeric => "must be a number".to_string(),
            DefectReason::InvalidStream => {
                format!("must be one of: {}", Stream::allowed_values())
            }
            DefectReason::NotList => "must be a list".to_string(),
            DefectReason::EmptyList => "must contain at least one entry".to_string(),
            DefectReason::NotObject => "must be an object".to_string(),
            DefectReason::NullValue => "must not be null".to_string(),
        }
    }
}

impl fmt::Display for DefectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rejected field.
///
/// `field` is the wire path of the offending value, e.g. `stream` or
/// `courses[1].subject`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefect {
    pub field: String,
    pub reason: DefectReason,
    pub message: String,
}

impl FieldDefect {
    pub fn new(field: impl Into<String>, reason: DefectReason) -> Self {
        Self {
            field: field.into(),
            reason,
            message: reason.describe(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, DefectReason::Missing)
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self::new(field, DefectReason::NullValue)
    }
}

impl fmt::Display for FieldDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defect_display() {
        let defect = FieldDefect::missing("fullname");
        assert_eq!(defect.to_string(), "field 'fullname': field is required");
    }

    #[test]
    fn test_stream_defect_lists_allowed_values() {
        let defect = FieldDefect::new("stream", DefectReason::InvalidStream);
        assert!(defect.message.contains("Stream-1"));
        assert!(defect.message.contains("Stream-2"));
    }

    #[test]
    fn test_defect_serializes_reason_code() {
        let value = serde_json::to_value(FieldDefect::new("courses", DefectReason::EmptyList)).unwrap();
        assert_eq!(value["field"], "courses");
        assert_eq!(value["reason"], "empty_list");
    }
}
