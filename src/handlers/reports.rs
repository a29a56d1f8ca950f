use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::db::models::Roster;
use crate::error::AppError;
use crate::middleware::TeacherUser;
use crate::middleware::extract::IdPath;
use crate::server::router::AppState;
use crate::service::authorization::Resource;
use crate::service::roster_export::{XLSX_CONTENT_TYPE, build_workbook, export_file_name};
use crate::types::{Identity, InternshipId};

/// GET /applicants/{id} -> roster and department counts for the caller's internship.
pub async fn applicants(
    TeacherUser(identity): TeacherUser,
    State(state): State<AppState>,
    IdPath(id): IdPath<InternshipId>,
) -> Result<Json<Roster>, AppError> {
    Ok(Json(owned_roster(&state, &identity, id).await?))
}

/// GET /download-applicants/{id} -> the same roster as an `.xlsx` attachment.
pub async fn download_applicants(
    TeacherUser(identity): TeacherUser,
    State(state): State<AppState>,
    IdPath(id): IdPath<InternshipId>,
) -> Result<Response, AppError> {
    let roster = owned_roster(&state, &identity, id).await?;
    let bytes = build_workbook(&roster)?;
    info!(
        internship_id = id,
        rows = roster.applicants.len(),
        "applicant roster exported"
    );
    let disposition = format!("attachment; filename=\"{}\"", export_file_name(&roster));
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// Another teacher's internship looks exactly like a missing one.
async fn owned_roster(
    state: &AppState,
    identity: &Identity,
    id: InternshipId,
) -> Result<Roster, AppError> {
    if !state
        .store
        .authorize(identity, Resource::Internship(id))
        .await?
    {
        return Err(AppError::NotFound);
    }
    let internship = state
        .store
        .get_internship(id)
        .await?
        .ok_or(AppError::NotFound)?;
    state.store.roster(internship).await
}
