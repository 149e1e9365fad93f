//! Sparse update payloads.
//!
//! Each field is either present (and validated) or absent. Absent fields
//! leave the stored value alone; nothing is inferred from "falsy" values,
//! so a balance of `0` is an ordinary update.

use serde::Serialize;

use super::types::{serialize_optional_balance, CourseEntry, Stream, StudentProfile};

/// A validated partial update.
///
/// Serializes with the record's wire names; untouched fields are
/// omitted and a cleared reference number is written as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPatch {
    #[serde(rename = "fullname", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(rename = "class", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_number: Option<String>,
    /// `Some(None)` clears the reference number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    #[serde(
        serialize_with = "serialize_optional_balance",
        skip_serializing_if = "Option::is_none"
    )]
    pub balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<Stream>,
    /// Replaces the whole course list when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<CourseEntry>>,
}

impl StudentPatch {
    /// True when the patch touches no field
    pub fn is_empty(&self) -> bool {
        self.touched_fields().is_empty()
    }

    /// Wire names of the fields this patch replaces, in record order
    pub fn touched_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.full_name.is_some() {
            fields.push("fullname");
        }
        if self.class_name.is_some() {
            fields.push("class");
        }
        if self.mobile_number.is_some() {
            fields.push("mobileNumber");
        }
        if self.enrollment_number.is_some() {
            fields.push("enrollmentNumber");
        }
        if self.reference_number.is_some() {
            fields.push("referenceNumber");
        }
        if self.email_id.is_some() {
            fields.push("emailId");
        }
        if self.balance.is_some() {
            fields.push("balance");
        }
        if self.address.is_some() {
            fields.push("address");
        }
        if self.stream.is_some() {
            fields.push("stream");
        }
        if self.courses.is_some() {
            fields.push("courses");
        }
        fields
    }

    /// Merge this patch over `profile`. Touched fields are replaced
    /// wholesale; untouched fields keep their prior values.
    pub fn apply_to(&self, profile: &mut StudentProfile) {
        if let Some(v) = &self.full_name {
            profile.full_name = v.clone();
        }
        if let Some(v) = &self.class_name {
            profile.class_name = v.clone();
        }
        if let Some(v) = &self.mobile_number {
            profile.mobile_number = v.clone();
        }
        if let Some(v) = &self.enrollment_number {
            profile.enrollment_number = v.clone();
        }
        if let Some(v) = &self.reference_number {
            profile.reference_number = v.clone();
        }
        if let Some(v) = &self.email_id {
            profile.email_id = v.clone();
        }
        if let Some(v) = self.balance {
            profile.balance = v;
        }
        if let Some(v) = &self.address {
            profile.address = v.clone();
        }
        if let Some(v) = self.stream {
            profile.stream = v;
        }
        if let Some(v) = &self.courses {
            profile.courses = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> StudentProfile {
        StudentProfile {
            full_name: "Ana Li".to_string(),
            class_name: "10A".to_string(),
            mobile_number: "555".to_string(),
            enrollment_number: "E100".to_string(),
            reference_number: Some("R1".to_string()),
            email_id: "a@x.com".to_string(),
            balance: 120.0,
            address: "1 Rd".to_string(),
            stream: Stream::Stream1,
            courses: vec![CourseEntry::new("C1", "Math")],
        }
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let patch = StudentPatch::default();
        assert!(patch.is_empty());

        let mut p = profile();
        patch.apply_to(&mut p);
        assert_eq!(p, profile());
    }

    #[test]
    fn test_zero_balance_is_applied() {
        let patch = StudentPatch {
            balance: Some(0.0),
            ..Default::default()
        };
        let mut p = profile();
        patch.apply_to(&mut p);
        assert_eq!(p.balance, 0.0);
        assert_eq!(patch.touched_fields(), vec!["balance"]);
    }

    #[test]
    fn test_clear_reference_number() {
        let patch = StudentPatch {
            reference_number: Some(None),
            ..Default::default()
        };
        let mut p = profile();
        patch.apply_to(&mut p);
        assert_eq!(p.reference_number, None);
        assert_eq!(p.full_name, "Ana Li");
    }

    #[test]
    fn test_patch_serializes_touched_fields_only() {
        let patch = StudentPatch {
            full_name: Some("Bo".to_string()),
            reference_number: Some(None),
            balance: Some(-50.0),
            stream: Some(Stream::Stream2),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "fullname": "Bo",
                "referenceNumber": null,
                "balance": -50,
                "stream": "Stream-2"
            })
        );
    }

    #[test]
    fn test_courses_replaced_wholesale() {
        let patch = StudentPatch {
            courses: Some(vec![CourseEntry::new("C9", "Art"), CourseEntry::new("C2", "Bio")]),
            stream: Some(Stream::Stream2),
            ..Default::default()
        };
        let mut p = profile();
        patch.apply_to(&mut p);
        assert_eq!(p.courses.len(), 2);
        assert_eq!(p.courses[0].course_code, "C9");
        assert_eq!(p.stream, Stream::Stream2);
        assert_eq!(patch.touched_fields(), vec!["stream", "courses"]);
    }
}
