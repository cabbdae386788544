use database::entities::student;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    pub ssn: String,
    pub name: String,
}

impl From<student::Model> for StudentResponse {
    fn from(student: student::Model) -> Self {
        Self {
            ssn: student.ssn,
            name: student.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrollStudentRequest {
    #[schema(example = "1234567890")]
    pub ssn: String,
}

/// Outcome of a removal or an explicit promotion
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PromotionResponse {
    /// The student moved from the waiting list into the course, if any
    pub promoted: Option<StudentResponse>,
}
