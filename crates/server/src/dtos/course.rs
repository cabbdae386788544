use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: i32,
    pub template_id: String,
    pub name: String,
    pub credits: i32,
    pub semester: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    /// `0` means the course has no capacity limit
    pub max_students: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCourseRequest {
    #[schema(example = "T-514-VEFT")]
    pub template_id: String,
    #[schema(example = "20163")]
    pub semester: String,
    #[schema(example = "2016-08-22 00:00:00")]
    pub start_date: String,
    #[schema(example = "2016-11-30 00:00:00")]
    pub end_date: String,
    #[serde(default)]
    pub max_students: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[schema(example = "22.08.2016")]
    pub start_date: String,
    #[schema(example = "30.11.2016")]
    pub end_date: String,
    pub max_students: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseQueryParams {
    /// Five digit semester code; defaults to the current semester
    pub semester: Option<String>,
}
