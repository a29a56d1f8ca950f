use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;

use crate::db::Storage;
use crate::handlers::{applications, auth, internships, pages, profile, reports};
use crate::middleware::security_headers::content_security_policy;

/// Shared, immutable per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Storage,
    cookie_key: Key,
    /// When set, the session cookie is issued without `Secure`.
    pub insecure_cookie: bool,
}

impl AppState {
    pub fn new(store: Storage, cookie_key: Key, insecure_cookie: bool) -> Self {
        Self {
            store,
            cookie_key,
            insecure_cookie,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/login", get(pages::login_page).post(auth::login))
        .route("/register", get(pages::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
        .route("/profile", get(profile::view_profile))
        .route("/update-profile", post(profile::update_profile))
        .route("/teacher-dash", get(internships::teacher_dashboard))
        .route("/post-internship", post(internships::post_internship))
        .route(
            "/delete-internship/{id}",
            post(internships::delete_internship),
        )
        .route("/applicants/{id}", get(reports::applicants))
        .route(
            "/download-applicants/{id}",
            get(reports::download_applicants),
        )
        .route("/student-dash", get(internships::student_dashboard))
        .route("/apply/{id}", post(applications::apply))
        .route("/my-applications", get(applications::my_applications))
        .route("/update-app-status/{id}", post(applications::update_status))
        .route(
            "/remove-application/{id}",
            post(applications::remove_application),
        )
        .fallback(pages::not_found)
        .layer(axum::middleware::from_fn(content_security_policy))
        .with_state(state)
}
