//! Parsing of raw request fields into the domain types the services accept.
//!
//! Everything here runs before the database is touched; failures become
//! [`ApiError::InvalidInput`].

use crate::error::ApiError;
use chrono::{NaiveDate, NaiveDateTime};
use models::{semester::Semester, ssn::Ssn, template_id::TemplateId};

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMAT: &str = "%d.%m.%Y";

pub fn parse_ssn(value: &str) -> Result<Ssn, ApiError> {
    value
        .parse()
        .map_err(|err| ApiError::InvalidInput(format!("invalid SSN: {err}")))
}

/// An empty or missing semester means "the current semester"
pub fn parse_semester(value: Option<&str>) -> Result<Option<Semester>, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<Semester>()
            .map(Some)
            .map_err(|err| ApiError::InvalidInput(err.to_string())),
    }
}

pub fn parse_template_id(value: &str) -> Result<TemplateId, ApiError> {
    value
        .parse::<TemplateId>()
        .map_err(|err| ApiError::InvalidInput(err.to_string()))
}

/// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` or `DD.MM.YYYY`
pub fn parse_course_date(field: &str, value: &str) -> Result<NaiveDateTime, ApiError> {
    let value = value.trim();

    let parsed = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        });

    parsed.ok_or_else(|| {
        ApiError::InvalidInput(format!(
            "{field} must be a date like 2016-08-22 00:00:00 or 22.08.2016, got {value:?}"
        ))
    })
}

pub fn parse_date_range(
    start: &str,
    end: &str,
) -> Result<(NaiveDateTime, NaiveDateTime), ApiError> {
    let start = parse_course_date("startDate", start)?;
    let end = parse_course_date("endDate", end)?;

    if start > end {
        return Err(ApiError::InvalidInput(
            "startDate must not be after endDate".to_string(),
        ));
    }

    Ok((start, end))
}

/// `0` means the course has no capacity limit
pub fn parse_max_students(value: i64) -> Result<i32, ApiError> {
    i32::try_from(value)
        .ok()
        .filter(|max| *max >= 0)
        .ok_or_else(|| {
            ApiError::InvalidInput(format!(
                "maxStudents must be between 0 and {}, got {value}",
                i32::MAX
            ))
        })
}
