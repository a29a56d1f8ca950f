use axum::{extract::State, response::Redirect};
use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::info;

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::middleware::auth::{LOGIN_PATH, end_session, start_session};
use crate::middleware::extract::FormBody;
use crate::server::router::AppState;
use crate::service::accounts;
use crate::types::forms::{LoginForm, RegisterForm};

/// POST /register -> creates the account, then sends the user to the login page.
pub async fn register(
    State(state): State<AppState>,
    FormBody(form): FormBody<RegisterForm>,
) -> Result<Redirect, AppError> {
    accounts::register(&state.store, form).await?;
    Ok(Redirect::to(LOGIN_PATH))
}

/// POST /login -> sets the session cookie and lands on the role's dashboard.
pub async fn login(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    FormBody(form): FormBody<LoginForm>,
) -> Result<(PrivateCookieJar, Redirect), AppError> {
    let identity = accounts::login(&state.store, form).await?;
    let jar = start_session(jar, &identity, !state.insecure_cookie)?;
    Ok((jar, Redirect::to(identity.role.home())))
}

/// GET /logout
pub async fn logout(
    CurrentUser(identity): CurrentUser,
    jar: PrivateCookieJar,
) -> (PrivateCookieJar, Redirect) {
    info!(user_id = identity.id, "user logged out");
    (end_session(jar), Redirect::to(LOGIN_PATH))
}
