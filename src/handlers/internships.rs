use axum::{Json, extract::State, response::Redirect};
use serde::Serialize;
use tracing::{debug, info};

use crate::db::models::InternshipSummary;
use crate::error::AppError;
use crate::middleware::{CurrentUser, TeacherUser};
use crate::middleware::extract::{FormBody, IdPath};
use crate::server::router::AppState;
use crate::service::authorization::Resource;
use crate::types::InternshipId;
use crate::types::forms::InternshipForm;

const TEACHER_DASH: &str = "/teacher-dash";

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub internships: Vec<InternshipSummary>,
}

/// GET /teacher-dash -> the caller's postings with live applicant counts.
pub async fn teacher_dashboard(
    TeacherUser(identity): TeacherUser,
    State(state): State<AppState>,
) -> Result<Json<DashboardView>, AppError> {
    let internships = state.store.list_internships_by_owner(identity.id).await?;
    Ok(Json(DashboardView { internships }))
}

/// GET /student-dash -> every posting, with recruiter name and applicant count.
pub async fn student_dashboard(
    CurrentUser(_identity): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<DashboardView>, AppError> {
    let internships = state.store.list_all_internships().await?;
    Ok(Json(DashboardView { internships }))
}

pub async fn post_internship(
    TeacherUser(identity): TeacherUser,
    State(state): State<AppState>,
    FormBody(form): FormBody<InternshipForm>,
) -> Result<Redirect, AppError> {
    let internship = form.validate()?;
    let id = state.store.create_internship(identity.id, &internship).await?;
    info!(internship_id = id, user_id = identity.id, "internship posted");
    Ok(Redirect::to(TEACHER_DASH))
}

/// Removes the posting and all its applications. Not the owner: nothing happens.
pub async fn delete_internship(
    TeacherUser(identity): TeacherUser,
    State(state): State<AppState>,
    IdPath(id): IdPath<InternshipId>,
) -> Result<Redirect, AppError> {
    if state
        .store
        .authorize(&identity, Resource::Internship(id))
        .await?
    {
        let deleted = state.store.delete_internship(identity.id, id).await?;
        info!(internship_id = id, deleted, "internship deleted");
    } else {
        debug!(internship_id = id, user_id = identity.id, "delete ignored");
    }
    Ok(Redirect::to(TEACHER_DASH))
}
