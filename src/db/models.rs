use crate::types::{ApplicationId, InternshipId, Role, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub department: String,
    pub designation: Option<String>,
    pub roll_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct Internship {
    pub id: InternshipId,
    pub title: String,
    pub link: String,
    pub skills: Option<String>,
    pub target_year: Option<String>,
    pub pay: Option<String>,
    pub positions: i64,
    pub posted_by_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Dashboard row: an internship with its poster's name and live applicant count.
#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct InternshipSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub internship: Internship,
    pub recruiter: String,
    pub applicant_count: i64,
}

/// One of the caller's applications joined with the internship it targets.
#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct MyApplication {
    pub id: ApplicationId,
    pub internship_id: InternshipId,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub title: String,
    pub link: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct RosterEntry {
    pub application_id: ApplicationId,
    pub student_id: UserId,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub roll_number: Option<String>,
    pub status: String,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct DepartmentCount {
    pub department: String,
    pub count: i64,
}

/// Applicants of one internship plus the per-department breakdown used for the chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Roster {
    pub internship: Internship,
    pub applicants: Vec<RosterEntry>,
    pub department_stats: Vec<DepartmentCount>,
}
