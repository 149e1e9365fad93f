//! Create and update validation for student candidates.
//!
//! Candidates arrive as arbitrary JSON. Unknown keys (including `_id`)
//! are ignored; they are neither stored nor reported.

use serde_json::{Map, Value};

use super::errors::{DefectReason, FieldDefect};
use crate::student::{CourseEntry, Stream, StudentPatch, StudentProfile};

/// Field path used when the candidate itself is not an object
pub const ROOT_FIELD: &str = "$root";

/// A wire field and the alternative keys accepted for it.
struct Field {
    name: &'static str,
    aliases: &'static [&'static str],
}

const FULL_NAME: Field = Field { name: "fullname", aliases: &["fullName"] };
const CLASS_NAME: Field = Field { name: "class", aliases: &["className"] };
const MOBILE_NUMBER: Field = Field { name: "mobileNumber", aliases: &[] };
const ENROLLMENT_NUMBER: Field = Field { name: "enrollmentNumber", aliases: &[] };
const REFERENCE_NUMBER: Field = Field { name: "referenceNumber", aliases: &[] };
const EMAIL_ID: Field = Field { name: "emailId", aliases: &[] };
const BALANCE: Field = Field { name: "balance", aliases: &[] };
const ADDRESS: Field = Field { name: "address", aliases: &[] };
const STREAM: Field = Field { name: "stream", aliases: &[] };
const COURSES: Field = Field { name: "courses", aliases: &[] };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Create,
    Update,
}

/// Result of looking a field up in the candidate.
enum Slot<'a> {
    Absent,
    Null,
    Present(&'a Value),
}

/// Validates a full record for creation.
///
/// # Errors
///
/// Returns every defect found. The list is never empty on `Err`.
pub fn validate_for_create(candidate: &Value) -> Result<StudentProfile, Vec<FieldDefect>> {
    let obj = candidate_object(candidate)?;
    let mut checker = Checker::new(obj, Mode::Create);

    let full_name = checker.text(&FULL_NAME);
    let class_name = checker.text(&CLASS_NAME);
    let mobile_number = checker.text(&MOBILE_NUMBER);
    let enrollment_number = checker.text(&ENROLLMENT_NUMBER);
    let reference_number = checker.optional_text(&REFERENCE_NUMBER);
    let email_id = checker.text(&EMAIL_ID);
    let balance = checker.number(&BALANCE);
    let address = checker.text(&ADDRESS);
    let stream = checker.stream(&STREAM);
    let courses = checker.courses(&COURSES);

    let profile = (|| {
        Some(StudentProfile {
            full_name: full_name?,
            class_name: class_name?,
            mobile_number: mobile_number?,
            enrollment_number: enrollment_number?,
            reference_number: reference_number.flatten(),
            email_id: email_id?,
            balance: balance?,
            address: address?,
            stream: stream?,
            courses: courses?,
        })
    })();

    match (checker.defects.is_empty(), profile) {
        (true, Some(profile)) => Ok(profile),
        _ => Err(checker.defects),
    }
}

/// Validates a sparse patch. Absent fields are not checked.
///
/// # Errors
///
/// Returns every defect found among the present fields.
pub fn validate_for_update(candidate: &Value) -> Result<StudentPatch, Vec<FieldDefect>> {
    let obj = candidate_object(candidate)?;
    let mut checker = Checker::new(obj, Mode::Update);

    let patch = StudentPatch {
        full_name: checker.text(&FULL_NAME),
        class_name: checker.text(&CLASS_NAME),
        mobile_number: checker.text(&MOBILE_NUMBER),
        enrollment_number: checker.text(&ENROLLMENT_NUMBER),
        reference_number: checker.optional_text(&REFERENCE_NUMBER),
        email_id: checker.text(&EMAIL_ID),
        balance: checker.number(&BALANCE),
        address: checker.text(&ADDRESS),
        stream: checker.stream(&STREAM),
        courses: checker.courses(&COURSES),
    };

    if checker.defects.is_empty() {
        Ok(patch)
    } else {
        Err(checker.defects)
    }
}

fn candidate_object(candidate: &Value) -> Result<&Map<String, Value>, Vec<FieldDefect>> {
    candidate
        .as_object()
        .ok_or_else(|| vec![FieldDefect::new(ROOT_FIELD, DefectReason::NotObject)])
}

/// Walks the candidate, collecting defects as it goes.
///
/// Each accessor returns `None` when the field is absent or defective;
/// the defect (if any) is recorded in `defects`.
struct Checker<'a> {
    obj: &'a Map<String, Value>,
    mode: Mode,
    defects: Vec<FieldDefect>,
}

impl<'a> Checker<'a> {
    fn new(obj: &'a Map<String, Value>, mode: Mode) -> Self {
        Self {
            obj,
            mode,
            defects: Vec::new(),
        }
    }

    fn lookup(&self, field: &Field) -> Slot<'a> {
        let obj = self.obj;
        let found = std::iter::once(field.name)
            .chain(field.aliases.iter().copied())
            .find_map(|key| obj.get(key));

        match found {
            None => Slot::Absent,
            Some(Value::Null) => Slot::Null,
            Some(value) => Slot::Present(value),
        }
    }

    fn reject(&mut self, path: impl Into<String>, reason: DefectReason) {
        self.defects.push(FieldDefect::new(path, reason));
    }

    /// Resolve a required field: absent is a defect only on create,
    /// null is always a defect.
    fn required(&mut self, field: &Field) -> Option<&'a Value> {
        match self.lookup(field) {
            Slot::Present(value) => Some(value),
            Slot::Absent => {
                if self.mode == Mode::Create {
                    self.defects.push(FieldDefect::missing(field.name));
                }
                None
            }
            Slot::Null => {
                let defect = match self.mode {
                    Mode::Create => FieldDefect::missing(field.name),
                    Mode::Update => FieldDefect::null_value(field.name),
                };
                self.defects.push(defect);
                None
            }
        }
    }

    fn text(&mut self, field: &Field) -> Option<String> {
        let value = self.required(field)?;
        self.text_value(field.name, value)
    }

    /// `None` = absent, `Some(None)` = explicitly cleared. A null or
    /// blank string both clear.
    fn optional_text(&mut self, field: &Field) -> Option<Option<String>> {
        match self.lookup(field) {
            Slot::Absent => None,
            Slot::Null => Some(None),
            Slot::Present(Value::String(s)) if s.trim().is_empty() => Some(None),
            Slot::Present(value) => self.text_value(field.name, value).map(Some),
        }
    }

    fn text_value(&mut self, path: &str, value: &Value) -> Option<String> {
        let text = match value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => {
                self.reject(path, DefectReason::NotText);
                return None;
            }
        };

        if text.is_empty() {
            self.reject(path, DefectReason::Empty);
            return None;
        }
        Some(text)
    }

    fn number(&mut self, field: &Field) -> Option<f64> {
        let value = self.required(field)?;
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match parsed {
            Some(n) if n.is_finite() => Some(n),
            _ => {
                self.reject(field.name, DefectReason::NotNumeric);
                None
            }
        }
    }

    fn stream(&mut self, field: &Field) -> Option<Stream> {
        let value = self.required(field)?;
        match value.as_str().map(str::trim).and_then(Stream::parse) {
            Some(stream) => Some(stream),
            None => {
                self.reject(field.name, DefectReason::InvalidStream);
                None
            }
        }
    }

    fn courses(&mut self, field: &Field) -> Option<Vec<CourseEntry>> {
        let value = self.required(field)?;
        let Some(items) = value.as_array() else {
            self.reject(field.name, DefectReason::NotList);
            return None;
        };
        if items.is_empty() {
            self.reject(field.name, DefectReason::EmptyList);
            return None;
        }

        let before = self.defects.len();
        let mut courses = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if let Some(course) = self.course(field.name, index, item) {
                courses.push(course);
            }
        }

        if self.defects.len() == before {
            Some(courses)
        } else {
            None
        }
    }

    fn course(&mut self, list: &str, index: usize, item: &Value) -> Option<CourseEntry> {
        let prefix = format!("{}[{}]", list, index);
        let Some(entry) = item.as_object() else {
            self.reject(prefix, DefectReason::NotObject);
            return None;
        };

        let course_code = self.course_text(&prefix, entry, "courseCode");
        let subject = self.course_text(&prefix, entry, "subject");
        Some(CourseEntry {
            course_code: course_code?,
            subject: subject?,
        })
    }

    fn course_text(
        &mut self,
        prefix: &str,
        entry: &Map<String, Value>,
        key: &str,
    ) -> Option<String> {
        let path = format!("{}.{}", prefix, key);
        match entry.get(key) {
            None | Some(Value::Null) => {
                self.defects.push(FieldDefect::missing(path));
                None
            }
            Some(value) => self.text_value(&path, value),
        }
    }
}
