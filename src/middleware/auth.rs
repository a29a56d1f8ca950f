//! Session gate: the encrypted `user` cookie carries the caller's identity.
//!
//! The cookie is sealed with the server key (`PrivateCookieJar`), so a value
//! that decrypts and parses is trusted as-is. Sessions end on logout or when
//! the cookie's max-age runs out; there is no server-side revocation.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use time::Duration;
use tracing::debug;

use crate::error::AppError;
use crate::types::{Identity, Role};

pub const SESSION_COOKIE: &str = "user";
pub const LOGIN_PATH: &str = "/login";

const SESSION_MAX_AGE: Duration = Duration::days(30);

/// Add the session cookie for `identity` to the jar.
pub fn start_session(
    jar: PrivateCookieJar,
    identity: &Identity,
    secure: bool,
) -> Result<PrivateCookieJar, AppError> {
    let claims = serde_json::to_string(identity)?;
    let cookie = Cookie::build(Cookie::new(SESSION_COOKIE, claims))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(SESSION_MAX_AGE)
        .build();
    Ok(jar.add(cookie))
}

pub fn end_session(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(Cookie::build(Cookie::new(SESSION_COOKIE, "")).path("/").build())
}

/// `None` when the cookie is missing, was not sealed by our key, or does not parse.
pub fn identity_from_jar(jar: &PrivateCookieJar) -> Option<Identity> {
    let cookie = jar.get(SESSION_COOKIE)?;
    serde_json::from_str(cookie.value())
        .inspect_err(|e| debug!(error = %e, "discarding malformed session claims"))
        .ok()
}

/// Any signed-in user. Redirects to the login page otherwise.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Identity);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = match PrivateCookieJar::<Key>::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };
        match identity_from_jar(&jar) {
            Some(identity) => Ok(Self(identity)),
            None => Err(Redirect::to(LOGIN_PATH).into_response()),
        }
    }
}

/// A signed-in teacher. Students are sent back to their own dashboard.
#[derive(Debug, Clone, Copy)]
pub struct TeacherUser(pub Identity);

impl<S> FromRequestParts<S> for TeacherUser
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(identity) = CurrentUser::from_request_parts(parts, state).await?;
        match identity.role {
            Role::Teacher => Ok(Self(identity)),
            Role::Student => {
                debug!(user_id = identity.id, path = %parts.uri.path(), "teacher route refused");
                Err(Redirect::to(identity.role.home()).into_response())
            }
        }
    }
}
