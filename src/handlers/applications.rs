use axum::{Json, extract::State, response::Redirect};
use serde::Serialize;
use tracing::{debug, info};

use crate::db::models::MyApplication;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::middleware::extract::{FormBody, IdPath};
use crate::server::router::AppState;
use crate::service::authorization::Resource;
use crate::types::forms::StatusForm;
use crate::types::{ApplicationId, InternshipId};

const MY_APPLICATIONS: &str = "/my-applications";

#[derive(Debug, Serialize)]
pub struct ApplicationsView {
    pub apps: Vec<MyApplication>,
}

/// POST /apply/{id} -> applying again is a no-op.
pub async fn apply(
    CurrentUser(identity): CurrentUser,
    State(state): State<AppState>,
    IdPath(internship_id): IdPath<InternshipId>,
) -> Result<Redirect, AppError> {
    let created = state.store.apply(identity.id, internship_id).await?;
    info!(internship_id, user_id = identity.id, created, "apply");
    Ok(Redirect::to(MY_APPLICATIONS))
}

pub async fn my_applications(
    CurrentUser(identity): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<ApplicationsView>, AppError> {
    let apps = state.store.list_applications(identity.id).await?;
    Ok(Json(ApplicationsView { apps }))
}

pub async fn update_status(
    CurrentUser(identity): CurrentUser,
    State(state): State<AppState>,
    IdPath(id): IdPath<ApplicationId>,
    FormBody(form): FormBody<StatusForm>,
) -> Result<Redirect, AppError> {
    let status = form.validate()?;
    if state
        .store
        .authorize(&identity, Resource::Application(id))
        .await?
    {
        state
            .store
            .update_application_status(identity.id, id, &status)
            .await?;
    } else {
        debug!(application_id = id, user_id = identity.id, "status update ignored");
    }
    Ok(Redirect::to(MY_APPLICATIONS))
}

pub async fn remove_application(
    CurrentUser(identity): CurrentUser,
    State(state): State<AppState>,
    IdPath(id): IdPath<ApplicationId>,
) -> Result<Redirect, AppError> {
    if state
        .store
        .authorize(&identity, Resource::Application(id))
        .await?
    {
        state.store.remove_application(identity.id, id).await?;
    } else {
        debug!(application_id = id, user_id = identity.id, "removal ignored");
    }
    Ok(Redirect::to(MY_APPLICATIONS))
}
