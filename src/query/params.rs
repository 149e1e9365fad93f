//! # Search Parameters
//!
//! The optional `fullname`, `enrollmentNumber` and `stream` query
//! parameters, and the mapping from them to a [`StudentFilter`].

use serde::{Deserialize, Serialize};

use super::filter::{Criterion, StudentFilter};

/// Optional search parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default)]
    pub fullname: Option<String>,

    #[serde(default)]
    pub enrollment_number: Option<String>,

    #[serde(default)]
    pub stream: Option<String>,
}

impl SearchParams {
    pub fn by_name(fullname: impl Into<String>) -> Self {
        Self {
            fullname: Some(fullname.into()),
            ..Default::default()
        }
    }
}

/// A parameter counts only when it holds non-blank text. `?fullname=`
/// in a query string is the same as leaving it out.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Build a filter from search parameters.
///
/// Each present parameter adds one criterion; criteria combine with AND.
/// The stream value is not validated here.
pub fn build_filter(params: &SearchParams) -> StudentFilter {
    let mut filter = StudentFilter::new();

    if let Some(name) = present(&params.fullname) {
        filter = filter.and(Criterion::name_contains(name));
    }
    if let Some(number) = present(&params.enrollment_number) {
        filter = filter.and(Criterion::EnrollmentEquals(number.to_string()));
    }
    if let Some(stream) = present(&params.stream) {
        filter = filter.and(Criterion::StreamEquals(stream.to_string()));
    }

    filter
}
