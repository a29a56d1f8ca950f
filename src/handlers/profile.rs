use axum::{Json, extract::State, response::Redirect};

use crate::db::models::User;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::middleware::extract::FormBody;
use crate::server::router::AppState;
use crate::types::forms::ProfileForm;

pub async fn view_profile(
    CurrentUser(identity): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<User>, AppError> {
    let user = state
        .store
        .find_user(identity.id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(user))
}

/// Only the caller's own row is ever touched.
pub async fn update_profile(
    CurrentUser(identity): CurrentUser,
    State(state): State<AppState>,
    FormBody(form): FormBody<ProfileForm>,
) -> Result<Redirect, AppError> {
    let update = form.validate()?;
    state.store.update_profile(identity.id, &update).await?;
    Ok(Redirect::to("/profile"))
}
