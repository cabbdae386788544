use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[cfg(feature = "database")]
use sea_orm::Value;

/// Lifecycle of a student's enrollment in a course.
///
/// Removing a student never deletes the enrollment row. The row is tagged
/// [`EnrollmentStatus::Removed`] instead, so re-enrolling the same student
/// reactivates the existing row rather than inserting a new one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EnrollmentStatus {
    /// The student currently occupies a seat
    Active,
    /// The student was removed; the row is kept for history
    Removed,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for EnrollmentStatus {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => s.parse().map_err(|_| sea_orm::sea_query::ValueTypeErr),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "EnrollmentStatus".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::Text
    }
}

#[cfg(feature = "database")]
impl From<EnrollmentStatus> for Value {
    fn from(status: EnrollmentStatus) -> Self {
        Value::String(Some(Box::new(status.to_string())))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for EnrollmentStatus {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let val: String = res.try_get_by(index)?;

        val.parse().map_err(|e| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "Failed to parse EnrollmentStatus from {val:?}: {e}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for EnrollmentStatus {
    fn null() -> Value {
        Value::String(None)
    }
}

#[cfg(test)]
mod test {
    use crate::enrollment_status::EnrollmentStatus;
    use std::str::FromStr;

    #[test]
    fn test_status_round_trips_through_text() {
        assert_eq!(EnrollmentStatus::Active.to_string(), "active");
        assert_eq!(EnrollmentStatus::Removed.as_str(), "removed");
        assert_eq!(
            EnrollmentStatus::from_str("removed").unwrap(),
            EnrollmentStatus::Removed
        );
        assert!(EnrollmentStatus::from_str("deleted").is_err());
    }

    #[test]
    fn test_status_serializes_as_snake_case() {
        let json = serde_json::to_string(&EnrollmentStatus::Active).unwrap();
        assert_eq!(json, "\"active\"");
    }

    #[test]
    fn test_only_active_holds_a_seat() {
        assert!(EnrollmentStatus::Active.is_active());
        assert!(!EnrollmentStatus::Removed.is_active());
    }
}
